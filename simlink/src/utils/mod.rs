//! Utilities for simlink: small, reusable helpers used across the crate.
//!
//! Hex rendering for traces, the nibble-swapped BCD storage convention of
//! SIM elementary files, and timeout helpers.

pub mod bcd;
pub mod hex;
pub mod timeout;

// Re-export the most common helpers at the `utils` module level so callers can
// use `crate::utils::bytes_to_hex(...)` etc if they prefer.
pub use bcd::*;
pub use hex::*;
pub use timeout::*;
