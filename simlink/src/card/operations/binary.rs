// simlink/src/card/operations/binary.rs

//! READ BINARY / UPDATE BINARY on transparent files.

use crate::card::FileDescriptor;
use crate::card::operations::select::{select, select_descriptor};
use crate::constants::{
    APDU_MAX_DATA_LEN, CLA_GSM, INS_READ_BINARY, INS_UPDATE_BINARY, READ_BINARY_MAX_CHUNK,
};
use crate::device::{Device, Initialized};
use crate::protocol::CommandPdu;
use crate::types::FilePath;
use crate::{Error, Result};

/// Read a transparent file with a single READ BINARY.
///
/// `length` defaults to the rest of the file after `offset`. At most one
/// 256 byte chunk is transferred; use [`read_binary_all`] for larger files.
pub fn read_binary(
    device: &mut Device<Initialized>,
    path: &FilePath,
    length: Option<usize>,
    offset: u16,
) -> Result<Vec<u8>> {
    let mut answers = select(device, path)?;
    let length = match length {
        Some(n) => n,
        None => {
            let last = answers.pop().unwrap_or_default();
            remaining(&FileDescriptor::decode(&last)?, offset)?
        }
    };
    if length == 0 {
        return Ok(Vec::new());
    }

    let p3 = (length.min(READ_BINARY_MAX_CHUNK) & 0xff) as u8;
    read_chunk(device, offset, p3)
}

/// Read a whole transparent file, chunk by chunk.
pub fn read_binary_all(device: &mut Device<Initialized>, path: &FilePath) -> Result<Vec<u8>> {
    let descriptor = select_descriptor(device, path)?;
    let size = descriptor.size as usize;
    let mut out = Vec::with_capacity(size);
    while out.len() < size {
        let chunk = (size - out.len()).min(APDU_MAX_DATA_LEN);
        let data = read_chunk(device, out.len() as u16, chunk as u8)?;
        if data.is_empty() {
            return Err(Error::InvalidLength {
                expected: size,
                actual: out.len(),
            });
        }
        out.extend_from_slice(&data);
    }
    Ok(out)
}

/// Write `data` at `offset` of a transparent file.
pub fn update_binary(
    device: &mut Device<Initialized>,
    path: &FilePath,
    data: &[u8],
    offset: u16,
) -> Result<()> {
    select(device, path)?;
    let [hi, lo] = offset.to_be_bytes();
    let cmd = CommandPdu::with_data(CLA_GSM, INS_UPDATE_BINARY, hi, lo, data)?;
    device.send_and_check(&cmd)?;
    Ok(())
}

fn read_chunk(device: &mut Device<Initialized>, offset: u16, p3: u8) -> Result<Vec<u8>> {
    let [hi, lo] = offset.to_be_bytes();
    let cmd = CommandPdu::new(CLA_GSM, INS_READ_BINARY, hi, lo, p3);
    Ok(device.send_and_check(&cmd)?.into_data())
}

fn remaining(descriptor: &FileDescriptor, offset: u16) -> Result<usize> {
    (descriptor.size as usize)
        .checked_sub(offset as usize)
        .ok_or_else(|| {
            Error::InvalidParameter(format!(
                "offset {} beyond size {} of file {}",
                offset, descriptor.size, descriptor.file_id
            ))
        })
}
