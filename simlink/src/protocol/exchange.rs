// simlink/src/protocol/exchange.rs

//! T=0 command/response exchange over an echoing half-duplex line.
//!
//! 1. Send the header and read back its echo.
//! 2. Wait for the procedure byte: INS means "go on", 0x60 means "wait",
//!    anything else is SW1 of an early status word.
//! 3. Send the data field (if any), again reading back its echo.
//! 4. Collect the response until silence or P3 + 3 bytes.
//! 5. The last two bytes are the status word.

use std::time::Instant;

use log::{debug, trace};

use crate::channel::ByteChannel;
use crate::constants::{INS_GET_RESPONSE, NULL_PROCEDURE};
use crate::protocol::{CommandPdu, ResponsePdu};
use crate::types::StatusWord;
use crate::utils::{DEFAULT_READ_TIMEOUT_MS, DEFAULT_WAIT_TIMEOUT_MS, bytes_to_hex, ms};
use crate::{Error, Result};

/// Timing and line discipline of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangeConfig {
    /// Per-byte read timeout
    pub read_timeout_ms: u64,
    /// How long a card may keep sending NULL procedure bytes
    pub wait_timeout_ms: u64,
    /// Send header and data in one write each. Only safe when the card
    /// cannot start talking before the burst is over, which T=0 guarantees
    /// for well behaved cards. Disable to send byte by byte.
    pub burst: bool,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            burst: true,
        }
    }
}

/// Write `bytes` and verify the line echoes each one back unchanged.
pub fn transmit<C: ByteChannel + ?Sized>(
    channel: &mut C,
    bytes: &[u8],
    cfg: &ExchangeConfig,
) -> Result<()> {
    if cfg.burst {
        channel.write(bytes)?;
        let echo = channel.read_bytes(bytes.len(), cfg.read_timeout_ms)?;
        return compare_echo(bytes, &echo, 0);
    }

    for (i, &b) in bytes.iter().enumerate() {
        channel.write(&[b])?;
        let echo = channel.read_byte(cfg.read_timeout_ms)?;
        compare_echo(&[b], echo.as_slice(), i)?;
    }
    Ok(())
}

fn compare_echo(sent: &[u8], echo: &[u8], base: usize) -> Result<()> {
    for (i, &expected) in sent.iter().enumerate() {
        let observed = echo.get(i).copied();
        if observed != Some(expected) {
            return Err(Error::EchoMismatch {
                position: base + i,
                expected,
                observed,
            });
        }
    }
    trace!("echo ok: {}", bytes_to_hex(sent));
    Ok(())
}

/// One exchange, status word returned uninterpreted.
pub fn send_raw<C: ByteChannel + ?Sized>(
    channel: &mut C,
    pdu: &CommandPdu,
    cfg: &ExchangeConfig,
) -> Result<ResponsePdu> {
    debug!("command: {}", pdu.to_hex());
    let timeout = cfg.read_timeout_ms;
    let wait_deadline = Instant::now() + ms(cfg.wait_timeout_ms);

    transmit(channel, &pdu.header(), cfg)?;

    let mut ack = channel.read_byte(timeout)?.ok_or(Error::Timeout)?;
    loop {
        if ack == pdu.ins() {
            break;
        }
        if ack != NULL_PROCEDURE {
            // Could be SW1 of a status word sent instead of the ACK.
            let sw2 = channel.read_byte(timeout)?;
            let trailing = channel.read_byte(timeout)?;
            return match (sw2, trailing) {
                (Some(sw2), None) => {
                    let sw = StatusWord::new(ack, sw2);
                    debug!("early status: {}", sw);
                    Ok(ResponsePdu::new(Vec::new(), sw))
                }
                _ => Err(Error::UnexpectedAcknowledgement {
                    ins: pdu.ins(),
                    ack,
                }),
            };
        }
        if Instant::now() >= wait_deadline {
            return Err(Error::Timeout);
        }
        trace!("NULL procedure byte, card asks for more time");
        ack = channel.read_byte(timeout)?.ok_or(Error::Timeout)?;
    }

    if !pdu.data().is_empty() {
        transmit(channel, pdu.data(), cfg)?;
    }

    // Room for the status word plus one byte of slack.
    let expected = pdu.expected_response_len();
    let mut received = Vec::with_capacity(expected + 1);
    while received.len() < expected + 1 {
        match channel.read_byte(timeout)? {
            None => break,
            // Only skipped when no data is expected back.
            Some(NULL_PROCEDURE) if pdu.p3() == 0 => {
                if Instant::now() >= wait_deadline {
                    return Err(Error::Timeout);
                }
                trace!("NULL procedure byte while waiting for status");
            }
            Some(b) => received.push(b),
        }
    }

    let response = ResponsePdu::from_raw(received)?;
    debug!("status: {} data: {}", response.status(), response.data_hex());
    Ok(response)
}

/// Exchange with the usual follow-ups: 9Fxx/61xx fetch the pending answer
/// with GET RESPONSE, 6Cxx repeats a data-less command with the corrected
/// length.
pub fn send<C: ByteChannel + ?Sized>(
    channel: &mut C,
    pdu: &CommandPdu,
    cfg: &ExchangeConfig,
) -> Result<ResponsePdu> {
    let response = send_raw(channel, pdu, cfg)?;
    let sw = response.status();
    match sw.sw1() {
        0x9F | 0x61 => {
            let get_response = CommandPdu::new(pdu.cla(), INS_GET_RESPONSE, 0x00, 0x00, sw.sw2());
            send_raw(channel, &get_response, cfg)
        }
        0x6C if pdu.data().is_empty() => send_raw(channel, &pdu.with_p3(sw.sw2()), cfg),
        _ => Ok(response),
    }
}

/// `send` that turns anything but 9000 into `CardRejected`.
pub fn send_and_check<C: ByteChannel + ?Sized>(
    channel: &mut C,
    pdu: &CommandPdu,
    cfg: &ExchangeConfig,
) -> Result<ResponsePdu> {
    send(channel, pdu, cfg)?.check()
}
