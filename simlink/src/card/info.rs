// simlink/src/card/info.rs

//! Decoders for SIM identity files, CHV status and SMS records.

use std::fmt;

use crate::protocol::parser::{byte_at, ensure_len, slice_at};
use crate::utils::{decode_bcd_digits, swapped_hex};
use crate::{Error, Result};

/// Trailing part of an EF_MSISDN / EF_ADN record after the alpha identifier
const DIALLING_NUMBER_TAIL_LEN: usize = 14;
const DIALLING_NUMBER_MAX_BYTES: usize = 10;

/// One CHV as reported in the MF status answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChvSlot {
    /// CHV checking switched on
    pub enabled: bool,
    /// 0 means blocked
    pub tries_left: u8,
}

/// CHV1 and CHV2 as reported by the MF status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChvStatus {
    /// CHV1 (the PIN)
    pub chv1: ChvSlot,
    /// Absent on cards whose status answer stops before the CHV2 byte
    pub chv2: Option<ChvSlot>,
}

impl ChvStatus {
    /// Decode the GSM specific part of a DF status answer (everything from
    /// byte 13 on).
    pub fn decode(gsm_data: &[u8]) -> Result<Self> {
        let characteristics = byte_at(gsm_data, 0)?;
        let chv1 = ChvSlot {
            enabled: characteristics & 0x80 == 0,
            tries_left: byte_at(gsm_data, 5)? & 0x0f,
        };
        let chv2 = if gsm_data.len() >= 9 {
            Some(ChvSlot {
                enabled: true,
                tries_left: gsm_data[7] & 0x0f,
            })
        } else {
            None
        };
        Ok(Self { chv1, chv2 })
    }
}

/// SIM phase from EF_PHASE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Phase 1 (00)
    Phase1,
    /// Phase 2 (02)
    Phase2,
    /// Phase 2+ (03)
    Phase2Plus,
    /// Reserved phase value
    Unknown(u8),
}

impl From<u8> for Phase {
    fn from(b: u8) -> Self {
        match b {
            0x00 => Self::Phase1,
            0x02 => Self::Phase2,
            0x03 => Self::Phase2Plus,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phase1 => f.write_str("Phase 1"),
            Self::Phase2 => f.write_str("Phase 2"),
            Self::Phase2Plus => f.write_str("Phase 2+"),
            Self::Unknown(_) => f.write_str("Unknown"),
        }
    }
}

/// Identity summary of the inserted SIM
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimInfo {
    /// LAI from EF_LOCI, nibble swapped hex (MCC, MNC, LAC)
    pub location_area: String,
    /// Own number from EF_MSISDN, if set
    pub msisdn: Option<String>,
    /// IMSI digits
    pub imsi: String,
    /// ICCID digits
    pub iccid: String,
    /// SIM phase
    pub phase: Phase,
}

impl fmt::Display for SimInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ICCID:  {}", self.iccid)?;
        writeln!(f, "IMSI:   {}", self.imsi)?;
        writeln!(f, "MSISDN: {}", self.msisdn.as_deref().unwrap_or("-"))?;
        writeln!(f, "LAI:    {}", self.location_area)?;
        write!(f, "Phase:  {}", self.phase)
    }
}

/// Status byte of an EF_SMS record (GSM 11.11 §10.3.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmsStatus {
    /// Record unused
    Free,
    /// Received, read
    Read,
    /// Received, not read yet
    Unread,
    /// Originated, sent
    Sent,
    /// Originated, not sent yet
    Unsent,
    /// Reserved status value
    Unknown(u8),
}

impl From<u8> for SmsStatus {
    fn from(b: u8) -> Self {
        if b == 0x00 {
            return Self::Free;
        }
        if b & 0x01 == 0 {
            return Self::Unknown(b);
        }
        match b & 0x07 {
            0x01 => Self::Read,
            0x03 => Self::Unread,
            0x05 => Self::Sent,
            _ => Self::Unsent,
        }
    }
}

/// EF_SMS record: status byte plus the undecoded remainder
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmsRecord {
    /// 1-based record number
    pub index: u8,
    /// Status byte
    pub status: SmsStatus,
    /// Record after the status byte
    pub payload: Vec<u8>,
}

impl SmsRecord {
    /// Split an EF_SMS record into status and payload.
    pub fn from_record(index: u8, record: &[u8]) -> Result<Self> {
        let status = byte_at(record, 0)?;
        Ok(Self {
            index,
            status: status.into(),
            payload: record[1..].to_vec(),
        })
    }

    /// True for an unused record
    pub fn is_free(&self) -> bool {
        self.status == SmsStatus::Free
    }
}

/// ICCID from the 10 bytes of EF_ICCID
pub fn decode_iccid(bytes: &[u8]) -> String {
    decode_bcd_digits(bytes)
}

/// IMSI from EF_IMSI: length byte, then nibble swapped digits.
///
/// The first digit nibble is the parity/type indicator. It is dropped here,
/// unlike readers that print the whole swapped field, so the result is the
/// plain IMSI (at most 15 digits). Use `read_binary` and
/// [`swapped_hex`](crate::utils::swapped_hex) for the raw field.
pub fn decode_imsi(bytes: &[u8]) -> Result<String> {
    let len = byte_at(bytes, 0)? as usize;
    let digits = slice_at(bytes, 1, len)?;
    Ok(decode_bcd_digits(digits).chars().skip(1).collect())
}

/// Location area identity from the 5 LAI bytes of EF_LOCI
pub fn decode_location_area(bytes: &[u8]) -> String {
    swapped_hex(bytes)
}

/// Dialling number of an EF_MSISDN (or EF_ADN) record. `None` when the
/// record is unused.
pub fn decode_dialling_number(record: &[u8]) -> Result<Option<String>> {
    ensure_len(record, DIALLING_NUMBER_TAIL_LEN)?;
    let tail = &record[record.len() - DIALLING_NUMBER_TAIL_LEN..];
    let len = tail[0];
    if len == 0xff || len == 0 {
        return Ok(None);
    }
    // The length covers TON/NPI plus the number itself.
    let number_len = len as usize - 1;
    if number_len > DIALLING_NUMBER_MAX_BYTES {
        return Err(Error::InvalidLength {
            expected: DIALLING_NUMBER_MAX_BYTES,
            actual: number_len,
        });
    }
    let ton_npi = tail[1];
    let digits = decode_bcd_digits(&tail[2..2 + number_len]);
    if ton_npi & 0x70 == 0x10 {
        Ok(Some(format!("+{digits}")))
    } else {
        Ok(Some(digits))
    }
}
