// simlink/src/prelude.rs

//! Common imports: `use simlink::prelude::*;`

pub use crate::card::{ChvStatus, FileDescriptor, Phase, SimCard, SimInfo, SmsRecord};
pub use crate::channel::{ByteChannel, MockChannel};
#[cfg(feature = "serial")]
pub use crate::channel::SerialChannel;
pub use crate::device::{Device, DeviceBuilder, DeviceConfig};
pub use crate::device::{Initialized, Uninitialized};
pub use crate::protocol::{CapabilityDescriptor, CommandPdu, ResponsePdu};
pub use crate::{
    ControlLine, Error, FileId, FilePath, ResetPin, Result, StatusKind, StatusWord,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, default_read_timeout, ms, parse_hex};
