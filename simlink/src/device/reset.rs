// simlink/src/device/reset.rs

use std::thread;
use std::time::Duration;

use log::debug;

use crate::Result;
use crate::channel::ByteChannel;
use crate::protocol::CapabilityDescriptor;
use crate::types::ResetPin;

/// Pulse the reset line and read the card's answer.
///
/// Holds reset active for `settle_delay`, throws away whatever the line
/// collected meanwhile, releases reset and parses the answer. Each call is
/// a physical reset of the card.
pub fn perform_reset<C: ByteChannel + ?Sized>(
    channel: &mut C,
    pin: ResetPin,
    settle_delay: Duration,
    timeout_ms: u64,
) -> Result<CapabilityDescriptor> {
    channel.set_control_line(pin.line, pin.active_level)?;
    thread::sleep(settle_delay);
    channel.clear_input()?;
    channel.set_control_line(pin.line, pin.inactive_level())?;

    let atr = CapabilityDescriptor::read_from(channel, timeout_ms)?;
    debug!("ATR: {}", atr.to_hex());
    Ok(atr)
}
