// simlink/src/types.rs

//! Newtypes shared across the crate.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use derive_more::Display;

use crate::Error;

/// File identifier - Newtype Pattern (2 バイト)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{:04x}", _0)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(u16);

impl FileId {
    /// Master file
    pub const MF: Self = Self(0x3F00);
    /// DF_TELECOM
    pub const DF_TELECOM: Self = Self(0x7F10);
    /// DF_GSM
    pub const DF_GSM: Self = Self(0x7F20);
    /// ICC identification
    pub const EF_ICCID: Self = Self(0x2FE2);
    /// Language preference
    pub const EF_LP: Self = Self(0x6F05);
    /// IMSI
    pub const EF_IMSI: Self = Self(0x6F07);
    /// Ciphering key Kc
    pub const EF_KC: Self = Self(0x6F20);
    /// HPLMN search period
    pub const EF_HPLMN: Self = Self(0x6F31);
    /// SIM service table
    pub const EF_SST: Self = Self(0x6F38);
    /// Abbreviated dialling numbers
    pub const EF_ADN: Self = Self(0x6F3A);
    /// Fixed dialling numbers
    pub const EF_FDN: Self = Self(0x6F3B);
    /// Short messages
    pub const EF_SMS: Self = Self(0x6F3C);
    /// Own number
    pub const EF_MSISDN: Self = Self(0x6F40);
    /// Last number dialled
    pub const EF_LND: Self = Self(0x6F44);
    /// Service provider name
    pub const EF_SPN: Self = Self(0x6F46);
    /// Broadcast control channels
    pub const EF_BCCH: Self = Self(0x6F74);
    /// Access control class
    pub const EF_ACC: Self = Self(0x6F78);
    /// Forbidden PLMNs
    pub const EF_FPLMN: Self = Self(0x6F7B);
    /// Location information
    pub const EF_LOCI: Self = Self(0x6F7E);
    /// Administrative data
    pub const EF_AD: Self = Self(0x6FAD);
    /// Phase identification
    pub const EF_PHASE: Self = Self(0x6FAE);

    /// Wrap a raw identifier
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Raw value
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Big endian, as sent in SELECT
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl FromStr for FileId {
    type Err = Error;

    /// Parse a 4 hex digit identifier such as `"3f00"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 {
            return Err(Error::InvalidParameter(format!(
                "file id must be 4 hex digits, got '{s}'"
            )));
        }
        u16::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| Error::InvalidParameter(format!("invalid file id '{s}': {e}")))
    }
}

/// Complete path from the MF outward. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilePath(Vec<FileId>);

impl FilePath {
    /// Fails with `InvalidParameter` when `ids` is empty.
    pub fn new(ids: Vec<FileId>) -> crate::Result<Self> {
        if ids.is_empty() {
            return Err(Error::InvalidParameter("file path must not be empty".into()));
        }
        Ok(Self(ids))
    }

    /// Elements, root first
    pub fn ids(&self) -> &[FileId] {
        &self.0
    }

    /// The element the path designates.
    pub fn target(&self) -> FileId {
        // new() and From<FileId> guarantee at least one element
        self.0[self.0.len() - 1]
    }

    /// Extend the path by one element.
    pub fn join(&self, id: FileId) -> Self {
        let mut ids = self.0.clone();
        ids.push(id);
        Self(ids)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<FileId> for FilePath {
    fn from(id: FileId) -> Self {
        Self(vec![id])
    }
}

impl<const N: usize> From<[FileId; N]> for FilePath {
    /// An empty array designates the MF.
    fn from(ids: [FileId; N]) -> Self {
        if N == 0 {
            return Self(vec![FileId::MF]);
        }
        Self(ids.to_vec())
    }
}

impl TryFrom<&[&str]> for FilePath {
    type Error = Error;

    fn try_from(ids: &[&str]) -> Result<Self, Self::Error> {
        let ids = ids
            .iter()
            .map(|s| s.parse())
            .collect::<crate::Result<Vec<FileId>>>()?;
        Self::new(ids)
    }
}

impl FromStr for FilePath {
    type Err = Error;

    /// Parse `"3f00/7f20/6f07"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').filter(|p| !p.is_empty()).collect();
        Self::try_from(&parts[..])
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str("/")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

/// Status word SW1‖SW2
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display(fmt = "{:04x}", _0)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusWord(u16);

impl StatusWord {
    /// 9000
    pub const SUCCESS: Self = Self(0x9000);

    /// Combine SW1 and SW2
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self(((sw1 as u16) << 8) | sw2 as u16)
    }

    /// From `0xSW1SW2`
    pub const fn from_u16(sw: u16) -> Self {
        Self(sw)
    }

    /// `0xSW1SW2`
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// First status byte
    pub fn sw1(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Second status byte
    pub fn sw2(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// True for 9000 only
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }

    /// Classify the status word
    pub fn kind(&self) -> StatusKind {
        StatusKind::from(*self)
    }
}

/// Interpretation of a status word per GSM 11.11 §9.4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// 9000
    Success,
    /// 9Fxx / 61xx: xx bytes waiting for GET RESPONSE
    ResponseAvailable(u8),
    /// 6Cxx: wrong P3, xx is the correct one
    WrongExpectedLength(u8),
    /// 67xx
    WrongLength,
    /// 6Bxx: wrong P1 or P2
    WrongParameters,
    /// 6Dxx
    UnknownInstruction,
    /// 6Exx
    WrongClass,
    /// 6Fxx
    TechnicalProblem,
    /// 9240
    MemoryProblem,
    /// 9400
    NoEfSelected,
    /// 9402: invalid address or record number
    OutOfRange,
    /// 9404
    FileNotFound,
    /// 9408: file inconsistent with the command
    FileInconsistent,
    /// 9802
    NoChvInitialised,
    /// Access condition not fulfilled, or CHV verification failed
    AccessDenied,
    /// 9808: in contradiction with CHV status
    ChvContradiction,
    /// 9810: in contradiction with invalidation status
    InvalidationContradiction,
    /// 9840: no attempts left
    ChvBlocked,
    /// 9850: increase failed, maximum reached
    MaxValueReached,
    /// Anything else
    Unknown,
}

impl From<StatusWord> for StatusKind {
    fn from(sw: StatusWord) -> Self {
        match (sw.sw1(), sw.sw2()) {
            (0x90, 0x00) => Self::Success,
            (0x9F, n) | (0x61, n) => Self::ResponseAvailable(n),
            (0x6C, n) => Self::WrongExpectedLength(n),
            (0x67, _) => Self::WrongLength,
            (0x6B, _) => Self::WrongParameters,
            (0x6D, _) => Self::UnknownInstruction,
            (0x6E, _) => Self::WrongClass,
            (0x6F, _) => Self::TechnicalProblem,
            (0x92, 0x40) => Self::MemoryProblem,
            (0x94, 0x00) => Self::NoEfSelected,
            (0x94, 0x02) => Self::OutOfRange,
            (0x94, 0x04) => Self::FileNotFound,
            (0x94, 0x08) => Self::FileInconsistent,
            (0x98, 0x02) => Self::NoChvInitialised,
            (0x98, 0x04) => Self::AccessDenied,
            (0x98, 0x08) => Self::ChvContradiction,
            (0x98, 0x10) => Self::InvalidationContradiction,
            (0x98, 0x40) => Self::ChvBlocked,
            (0x98, 0x50) => Self::MaxValueReached,
            _ => Self::Unknown,
        }
    }
}

/// Modem control line usable as the card reset line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlLine {
    /// Request to send
    Rts,
    /// Data terminal ready
    Dtr,
}

/// Which control line drives card reset and which level asserts it.
///
/// Textual form: `"-rts"` asserts RTS high then releases it low, `"+rts"`
/// does the opposite. Same for `dtr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetPin {
    /// Line wired to the card's RST contact
    pub line: ControlLine,
    /// Level written while the card is held in reset
    pub active_level: bool,
}

impl ResetPin {
    /// Pin on `line`, asserted by writing `active_level`
    pub const fn new(line: ControlLine, active_level: bool) -> Self {
        Self { line, active_level }
    }

    /// Level that lets the card run
    pub fn inactive_level(&self) -> bool {
        !self.active_level
    }
}

impl Default for ResetPin {
    fn default() -> Self {
        Self::new(ControlLine::Rts, true)
    }
}

impl FromStr for ResetPin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidParameter(format!("invalid reset pin '{s}'"));
        let mut chars = s.chars();
        let active_level = match chars.next() {
            Some('-') => true,
            Some('+') => false,
            _ => return Err(invalid()),
        };
        let line = match chars.as_str().to_ascii_lowercase().as_str() {
            "rts" => ControlLine::Rts,
            "dtr" => ControlLine::Dtr,
            _ => return Err(invalid()),
        };
        Ok(Self { line, active_level })
    }
}

impl fmt::Display for ResetPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.active_level { '-' } else { '+' };
        let line = match self.line {
            ControlLine::Rts => "rts",
            ControlLine::Dtr => "dtr",
        };
        write!(f, "{sign}{line}")
    }
}
