// simlink/src/card/descriptor.rs

//! Decoding of the SELECT / GET RESPONSE answer (GSM 11.11 §9.2.1).
//!
//! ```text
//!  0..2  RFU
//!  2..4  file size (EF) / free memory (MF, DF)
//!  4..6  file id
//!  6     type of file: 01 MF, 02 DF, 04 EF
//! 13     EF structure: 00 transparent, 01 linear fixed, 03 cyclic
//! 14     record length
//! ```

use crate::protocol::parser::{be_u16_at, byte_at};
use crate::types::FileId;
use crate::{Error, Result};

const SIZE_OFFSET: usize = 2;
const FILE_ID_OFFSET: usize = 4;
const TYPE_OFFSET: usize = 6;
const STRUCTURE_OFFSET: usize = 13;
const RECORD_LEN_OFFSET: usize = 14;

/// Type of file byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Master file
    Mf,
    /// Dedicated file
    Df,
    /// Elementary file
    Ef,
    /// Reserved or proprietary value
    Unknown(u8),
}

impl From<u8> for FileType {
    fn from(b: u8) -> Self {
        match b {
            0x01 => Self::Mf,
            0x02 => Self::Df,
            0x04 => Self::Ef,
            other => Self::Unknown(other),
        }
    }
}

/// EF structure byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileStructure {
    /// Read with READ BINARY
    Transparent,
    /// Fixed length records
    LinearFixed,
    /// Fixed length records, oldest overwritten first
    Cyclic,
    /// Reserved or proprietary value
    Unknown(u8),
}

impl From<u8> for FileStructure {
    fn from(b: u8) -> Self {
        match b {
            0x00 => Self::Transparent,
            0x01 => Self::LinearFixed,
            0x03 => Self::Cyclic,
            other => Self::Unknown(other),
        }
    }
}

/// What the card tells about a file when it is selected
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileDescriptor {
    /// Total size in bytes; free memory for MF/DF
    pub size: u16,
    /// Identifier of the selected file
    pub file_id: FileId,
    /// MF, DF or EF
    pub file_type: FileType,
    /// `None` when the answer is too short to carry the EF part
    pub structure: Option<FileStructure>,
    /// 0 when absent
    pub record_len: u8,
    /// Answer as received
    pub raw: Vec<u8>,
}

impl FileDescriptor {
    /// Decode a SELECT / GET RESPONSE answer.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let size = be_u16_at(bytes, SIZE_OFFSET).map_err(|_| too_short(bytes))?;
        let file_id = be_u16_at(bytes, FILE_ID_OFFSET).map_err(|_| too_short(bytes))?;
        let file_type = byte_at(bytes, TYPE_OFFSET).map_err(|_| too_short(bytes))?;
        Ok(Self {
            size,
            file_id: FileId::new(file_id),
            file_type: file_type.into(),
            structure: byte_at(bytes, STRUCTURE_OFFSET).ok().map(FileStructure::from),
            record_len: byte_at(bytes, RECORD_LEN_OFFSET).unwrap_or(0),
            raw: bytes.to_vec(),
        })
    }

    /// Linear fixed or cyclic
    pub fn is_record_based(&self) -> bool {
        matches!(
            self.structure,
            Some(FileStructure::LinearFixed) | Some(FileStructure::Cyclic)
        )
    }

    /// Number of records: size / record length, which must divide evenly.
    pub fn record_count(&self) -> Result<usize> {
        if self.record_len == 0 {
            return Err(Error::MalformedDescriptor(format!(
                "file {} has no record length",
                self.file_id
            )));
        }
        let (size, len) = (self.size as usize, self.record_len as usize);
        if size % len != 0 {
            return Err(Error::MalformedDescriptor(format!(
                "file {} size {} is not a multiple of record length {}",
                self.file_id, size, len
            )));
        }
        Ok(size / len)
    }
}

fn too_short(bytes: &[u8]) -> Error {
    Error::MalformedDescriptor(format!(
        "{} byte(s), need at least {}",
        bytes.len(),
        TYPE_OFFSET + 1
    ))
}
