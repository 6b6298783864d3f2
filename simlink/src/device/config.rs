// simlink/src/device/config.rs

//! Link configuration. Defaults match a phoenix-style serial reader at
//! 9600 baud with reset on inverted RTS.

use std::time::Duration;

use crate::device::presence::PresencePolicy;
use crate::protocol::ExchangeConfig;
use crate::types::ResetPin;
use crate::utils::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_DELAY_MS, ms};

/// Baud rate of the reader (ISO 7816 default clock / 372)
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Consecutive malformed answers tolerated while polling for a card that is
/// only half inserted
pub const DEFAULT_MAX_MALFORMED_ANSWERS: usize = 2;

/// Reader and card timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Line that drives the card reset
    pub reset_pin: ResetPin,
    /// How long reset stays asserted
    pub settle_delay_ms: u64,
    /// Delay between presence polls
    pub poll_interval_ms: u64,
    /// Consecutive malformed answers tolerated while polling
    pub max_malformed_answers: usize,
    /// T=0 exchange timing
    pub exchange: ExchangeConfig,
}

impl DeviceConfig {
    /// `settle_delay_ms` as a `Duration`
    pub fn settle_delay(&self) -> Duration {
        ms(self.settle_delay_ms)
    }

    /// `poll_interval_ms` as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        ms(self.poll_interval_ms)
    }

    /// Per-byte read timeout of the exchange
    pub fn read_timeout_ms(&self) -> u64 {
        self.exchange.read_timeout_ms
    }

    /// Polling parameters derived from this config
    pub fn presence_policy(&self) -> PresencePolicy {
        PresencePolicy {
            poll_interval: self.poll_interval(),
            max_malformed_answers: self.max_malformed_answers,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            reset_pin: ResetPin::default(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_malformed_answers: DEFAULT_MAX_MALFORMED_ANSWERS,
            exchange: ExchangeConfig::default(),
        }
    }
}
