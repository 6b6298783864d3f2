// simlink/src/device/mod.rs

//! Reader handle: reset, presence detection and APDU dispatch.

/// Device builder
pub mod builder;
/// Link configuration
pub mod config;
/// Type-state reader handle
pub mod handle;
/// Card presence polling
pub mod presence;
/// Reset pulse
pub mod reset;

pub use builder::DeviceBuilder;
pub use config::{DEFAULT_BAUD_RATE, DeviceConfig};
pub use handle::{Device, Initialized, Uninitialized};
pub use presence::{PresencePolicy, wait_for_presence};
pub use reset::perform_reset;
