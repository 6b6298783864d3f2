// simlink/src/protocol/atr.rs

//! Answer-to-reset decoding.
//!
//! Layout: `TS T0 {TAi TBi TCi TDi}* T1..Tk [extra]`. T0's high nibble says
//! which of TA1..TD1 follow; each present TDi announces the next group the
//! same way. T0's low nibble is the number of historical bytes. Whatever
//! the card sends after the historical bytes (TCK, junk from a bouncing
//! line) is kept verbatim in `extra`.

use log::{debug, warn};

use crate::channel::ByteChannel;
use crate::constants::{ATR_TS_DIRECT, ATR_TS_INVERSE};
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// Interface groups beyond this are treated as line noise
pub const MAX_INTERFACE_GROUPS: usize = 8;

/// Trailing bytes kept after the historical bytes; the rest is read and discarded
pub const MAX_EXTRA_BYTES: usize = 32;

/// Bit ordering announced by TS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Convention {
    /// Most significant bit last (TS = 3B)
    Direct,
    /// TS = 3F
    Inverse,
}

/// One TAi/TBi/TCi/TDi group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceGroup {
    /// TAi
    pub ta: Option<u8>,
    /// TBi
    pub tb: Option<u8>,
    /// TCi
    pub tc: Option<u8>,
    /// TDi: next group presence and protocol
    pub td: Option<u8>,
}

impl InterfaceGroup {
    /// Protocol type `T=n` announced by TDi, if present.
    pub fn protocol(&self) -> Option<u8> {
        self.td.map(|td| td & 0x0f)
    }

    /// Bitmap of groups following this one (TDi high nibble).
    fn next_presence(&self) -> u8 {
        self.td.map_or(0, |td| td >> 4)
    }
}

/// Parsed answer to reset
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapabilityDescriptor {
    /// Always `Direct`; anything else is rejected
    pub convention: Convention,
    /// Format byte T0
    pub t0: u8,
    /// TA1..TDn, in order
    pub interface_groups: Vec<InterfaceGroup>,
    /// `T0 & 0x0F` historical bytes
    pub historical: Vec<u8>,
    /// Bytes after the historical bytes (TCK and noise), at most `MAX_EXTRA_BYTES`
    pub extra: Vec<u8>,
    /// Every byte consumed, including repeated TS bytes (discarded trailing
    /// bytes excepted)
    pub raw: Vec<u8>,
}

impl CapabilityDescriptor {
    /// Read an answer to reset from `channel`. The reset pulse itself is the
    /// caller's job (see `device::reset`).
    pub fn read_from<C: ByteChannel + ?Sized>(channel: &mut C, timeout_ms: u64) -> Result<Self> {
        Self::decode_with(|| channel.read_byte(timeout_ms))
    }

    /// Decode an answer to reset held in memory. The end of `bytes` plays
    /// the role of line silence.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut it = bytes.iter().copied();
        Self::decode_with(|| Ok(it.next()))
    }

    fn decode_with<F>(mut next: F) -> Result<Self>
    where
        F: FnMut() -> Result<Option<u8>>,
    {
        let mut raw = Vec::new();
        let mut read = |raw: &mut Vec<u8>| -> Result<Option<u8>> {
            let b = next()?;
            if let Some(b) = b {
                raw.push(b);
            }
            Ok(b)
        };

        let ts = read(&mut raw)?.ok_or(Error::NoCardSignal)?;
        match ts {
            ATR_TS_DIRECT => debug!("TS: {:#04x} direct convention", ts),
            ATR_TS_INVERSE => {
                return Err(Error::MalformedAnswer(
                    "inverse convention is not supported".into(),
                ));
            }
            other => {
                return Err(Error::MalformedAnswer(format!("invalid TS {other:#04x}")));
            }
        }

        // An unstable contact can bounce TS several times.
        let mut t0 = ts;
        while t0 == ATR_TS_DIRECT {
            t0 = read(&mut raw)?
                .ok_or_else(|| Error::MalformedAnswer("missing format byte T0".into()))?;
        }
        debug!("T0: {:#04x}", t0);

        let mut interface_groups = Vec::new();
        let mut presence = t0 >> 4;
        while presence != 0 {
            if interface_groups.len() == MAX_INTERFACE_GROUPS {
                return Err(Error::MalformedAnswer(format!(
                    "more than {MAX_INTERFACE_GROUPS} interface byte groups"
                )));
            }
            let index = interface_groups.len() + 1;
            let mut group = InterfaceGroup::default();
            let slots = [
                (&mut group.ta, 'A'),
                (&mut group.tb, 'B'),
                (&mut group.tc, 'C'),
                (&mut group.td, 'D'),
            ];
            for (bit, (slot, name)) in slots.into_iter().enumerate() {
                if presence & (1 << bit) == 0 {
                    continue;
                }
                let b = read(&mut raw)?.ok_or_else(|| {
                    Error::MalformedAnswer(format!("missing interface byte T{name}{index}"))
                })?;
                debug!("T{}{} = {:#04x}", name, index, b);
                *slot = Some(b);
            }
            presence = group.next_presence();
            interface_groups.push(group);
        }

        let historical_len = (t0 & 0x0f) as usize;
        let mut historical = Vec::with_capacity(historical_len);
        for i in 0..historical_len {
            let b = read(&mut raw)?.ok_or_else(|| {
                Error::MalformedAnswer(format!(
                    "historical byte {} of {historical_len} missing",
                    i + 1
                ))
            })?;
            historical.push(b);
        }
        if !historical.is_empty() {
            debug!("historical: {}", bytes_to_hex(&historical));
        }

        // Drained until silence; only the first MAX_EXTRA_BYTES are kept.
        let mut extra = Vec::new();
        let mut dropped = 0usize;
        while let Some(b) = read(&mut raw)? {
            if extra.len() < MAX_EXTRA_BYTES {
                extra.push(b);
            } else {
                raw.pop();
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!("answer to reset kept going, discarded {} trailing byte(s)", dropped);
        }
        if !extra.is_empty() {
            debug!("extra: {}", bytes_to_hex(&extra));
        }

        Ok(Self {
            convention: Convention::Direct,
            t0,
            interface_groups,
            historical,
            extra,
            raw,
        })
    }

    /// Protocols offered through the TDi chain. Defaults to T=0 when the card
    /// names none.
    pub fn protocols(&self) -> Vec<u8> {
        let offered: Vec<u8> = self
            .interface_groups
            .iter()
            .filter_map(InterfaceGroup::protocol)
            .collect();
        if offered.is_empty() { vec![0] } else { offered }
    }

    /// Raw answer as lowercase hex
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.raw)
    }
}
