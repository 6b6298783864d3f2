// simlink/src/device/builder.rs

use crate::channel::ByteChannel;
use crate::device::config::DeviceConfig;
use crate::device::handle::{Device, Uninitialized};
use crate::protocol::ExchangeConfig;
use crate::types::ResetPin;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    channel: Option<Box<dyn ByteChannel>>,
    config: DeviceConfig,
}

impl DeviceBuilder {
    /// Builder with the default configuration and no channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created channel (e.g. MockChannel)
    pub fn with_channel(mut self, channel: Box<dyn ByteChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Control line and polarity used for reset
    pub fn reset_pin(mut self, pin: ResetPin) -> Self {
        self.config.reset_pin = pin;
        self
    }

    /// How long reset stays asserted
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    /// Delay between presence polls
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// Malformed answers tolerated while polling
    pub fn max_malformed_answers(mut self, n: usize) -> Self {
        self.config.max_malformed_answers = n;
        self
    }

    /// Per-byte read timeout
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.exchange.read_timeout_ms = ms;
        self
    }

    /// Total time NULL procedure bytes may extend an exchange
    pub fn wait_timeout_ms(mut self, ms: u64) -> Self {
        self.config.exchange.wait_timeout_ms = ms;
        self
    }

    /// Send byte by byte instead of in bursts
    pub fn burst(mut self, burst: bool) -> Self {
        self.config.exchange.burst = burst;
        self
    }

    /// Replace the exchange timing as a whole
    pub fn exchange(mut self, exchange: ExchangeConfig) -> Self {
        self.config.exchange = exchange;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    /// Requires a channel to be provided; otherwise returns InvalidParameter.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        match self.channel {
            Some(c) => Ok(Device::new_with_channel(c).with_config(self.config)),
            None => Err(Error::InvalidParameter("no channel provided".into())),
        }
    }

    /// Open `path` as a serial reader (8E2) and build a device on it. The
    /// port read timeout follows the configured per-byte timeout.
    #[cfg(feature = "serial")]
    pub fn build_serial(self, path: &str, baud_rate: u32) -> Result<Device<Uninitialized>> {
        let channel = crate::channel::SerialChannel::open(
            path,
            baud_rate,
            self.config.exchange.read_timeout_ms,
        )?;
        self.with_channel(Box::new(channel)).build_uninitialized()
    }
}
