// simlink/src/device/handle.rs

use std::time::Duration;

use log::info;

use crate::Result;
use crate::card::SimCard;
use crate::channel::ByteChannel;
use crate::device::config::DeviceConfig;
use crate::device::presence::wait_for_presence;
use crate::device::reset::perform_reset;
use crate::protocol::{self, CapabilityDescriptor, CommandPdu, ResponsePdu};

/// Type-state markers
pub struct Uninitialized;

/// A card answered the last reset.
pub struct Initialized {
    atr: CapabilityDescriptor,
}

/// Reader handle that enforces "card has been reset" at compile time.
///
/// Owns the channel for the whole session; dropping the device closes it.
pub struct Device<State = Uninitialized> {
    channel: Box<dyn ByteChannel>,
    config: DeviceConfig,
    state: State,
}

fn reset_card(
    channel: &mut dyn ByteChannel,
    config: &DeviceConfig,
) -> Result<CapabilityDescriptor> {
    perform_reset(
        channel,
        config.reset_pin,
        config.settle_delay(),
        config.read_timeout_ms(),
    )
}

impl<S> Device<S> {
    /// Active configuration
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Give the channel back, e.g. to reopen a device with another config.
    pub fn into_channel(self) -> Box<dyn ByteChannel> {
        self.channel
    }

    fn into_initialized(self, atr: CapabilityDescriptor) -> Device<Initialized> {
        Device {
            channel: self.channel,
            config: self.config,
            state: Initialized { atr },
        }
    }
}

impl Device<Uninitialized> {
    /// Create a Device from an already opened channel (a `SerialChannel`, or
    /// a `MockChannel` in tests) with the default configuration.
    pub fn new_with_channel(channel: Box<dyn ByteChannel>) -> Self {
        Self {
            channel,
            config: DeviceConfig::default(),
            state: Uninitialized,
        }
    }

    /// Replace the configuration before the first reset.
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Reset the card once. Fails with `NoCardSignal` when nothing answers.
    pub fn initialize(mut self) -> Result<Device<Initialized>> {
        let atr = reset_card(self.channel.as_mut(), &self.config)?;
        info!("card answered reset: {}", atr.to_hex());
        Ok(self.into_initialized(atr))
    }

    /// Poll until a card answers, see [`wait_for_presence`].
    pub fn wait_for_card(
        mut self,
        timeout: Option<Duration>,
        new_card_only: bool,
    ) -> Result<Device<Initialized>> {
        let policy = self.config.presence_policy();
        let config = &self.config;
        let channel = &mut self.channel;
        let atr = wait_for_presence(
            || reset_card(&mut **channel, config),
            timeout,
            new_card_only,
            &policy,
        )?;
        info!("card present: {}", atr.to_hex());
        Ok(self.into_initialized(atr))
    }
}

impl Device<Initialized> {
    /// Answer to the most recent reset
    pub fn atr(&self) -> &CapabilityDescriptor {
        &self.state.atr
    }

    /// Reset the card again and remember the new answer.
    pub fn reset(&mut self) -> Result<&CapabilityDescriptor> {
        self.state.atr = reset_card(self.channel.as_mut(), &self.config)?;
        Ok(&self.state.atr)
    }

    /// Like `Device<Uninitialized>::wait_for_card`, for a session that is
    /// already running (e.g. to wait for the user to swap cards).
    pub fn wait_for_card(
        &mut self,
        timeout: Option<Duration>,
        new_card_only: bool,
    ) -> Result<&CapabilityDescriptor> {
        let policy = self.config.presence_policy();
        let config = &self.config;
        let channel = &mut self.channel;
        self.state.atr = wait_for_presence(
            || reset_card(&mut **channel, config),
            timeout,
            new_card_only,
            &policy,
        )?;
        Ok(&self.state.atr)
    }

    /// Single exchange; the status word is returned uninterpreted.
    pub fn send_raw(&mut self, pdu: &CommandPdu) -> Result<ResponsePdu> {
        protocol::send_raw(self.channel.as_mut(), pdu, &self.config.exchange)
    }

    /// Exchange including GET RESPONSE / corrected length follow-ups.
    pub fn send(&mut self, pdu: &CommandPdu) -> Result<ResponsePdu> {
        protocol::send(self.channel.as_mut(), pdu, &self.config.exchange)
    }

    /// `send`, failing with `CardRejected` unless the status is 9000.
    pub fn send_and_check(&mut self, pdu: &CommandPdu) -> Result<ResponsePdu> {
        protocol::send_and_check(self.channel.as_mut(), pdu, &self.config.exchange)
    }

    /// GSM command layer borrowing this device
    pub fn card(&mut self) -> SimCard<'_> {
        SimCard::new(self)
    }
}
