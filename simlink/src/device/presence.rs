// simlink/src/device/presence.rs

use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::protocol::CapabilityDescriptor;
use crate::utils::{deadline_after, expired};
use crate::{Error, Result};

/// Polling parameters for card presence detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresencePolicy {
    /// Delay between resets
    pub poll_interval: Duration,
    /// Consecutive malformed answers tolerated before giving up
    pub max_malformed_answers: usize,
}

/// Wait until a card answers `reset`.
///
/// One attempt is made right away; only a silent line is acceptable there,
/// any other error is returned as is. With `require_reinsertion` a card
/// that is already present does not count: it has to go away (a silent
/// reset) and come back first. Afterwards `reset` is retried every poll
/// interval until `timeout` runs out (`None` waits forever). Malformed
/// answers while polling are tolerated up to
/// `policy.max_malformed_answers` in a row.
pub fn wait_for_presence<F>(
    mut reset: F,
    timeout: Option<Duration>,
    require_reinsertion: bool,
    policy: &PresencePolicy,
) -> Result<CapabilityDescriptor>
where
    F: FnMut() -> Result<CapabilityDescriptor>,
{
    let mut existing = false;
    let mut malformed = 0usize;

    match reset() {
        Ok(atr) if !require_reinsertion => return Ok(atr),
        Ok(_) => {
            debug!("card already present, waiting for it to be swapped");
            existing = true;
        }
        Err(Error::NoCardSignal) => {}
        Err(e) => return Err(e),
    }

    let deadline = deadline_after(timeout);
    while !expired(deadline) {
        thread::sleep(policy.poll_interval);
        match reset() {
            Ok(atr) if !existing => return Ok(atr),
            Ok(_) => malformed = 0,
            Err(Error::NoCardSignal) => {
                if existing {
                    debug!("card removed");
                }
                existing = false;
                malformed = 0;
            }
            Err(Error::MalformedAnswer(reason)) => {
                if existing {
                    // The old card is on its way out.
                    existing = false;
                } else {
                    tolerate_malformed(&mut malformed, reason, policy)?;
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::PresenceTimeout)
}

fn tolerate_malformed(count: &mut usize, reason: String, policy: &PresencePolicy) -> Result<()> {
    *count += 1;
    if *count > policy.max_malformed_answers {
        return Err(Error::MalformedAnswer(reason));
    }
    warn!(
        "malformed answer to reset ({}), {}/{} tolerated",
        reason, count, policy.max_malformed_answers
    );
    Ok(())
}
