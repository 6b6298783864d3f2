// simlink/src/lib.rs

//! simlink
//!
//! Pure Rust host-side stack for serial (phoenix style) SIM card readers:
//! answer-to-reset handshake, echo-verified APDU transport and the GSM
//! file/record/CHV command layer built on top of it.
#![warn(missing_docs)]

pub mod card;
pub mod channel;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
