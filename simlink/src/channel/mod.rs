// simlink/src/channel/mod.rs

//! Byte channels the reader talks through.

/// Scripted in-memory line
pub mod mock;
/// Real serial port
#[cfg(feature = "serial")]
pub mod serial;
/// Channel abstraction
pub mod traits;

pub use mock::{MockChannel, Rx};
#[cfg(feature = "serial")]
pub use serial::SerialChannel;
pub use traits::ByteChannel;
