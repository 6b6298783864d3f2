// simlink/src/card/operations/record.rs

//! Record oriented files (linear fixed and cyclic).

use crate::card::FileDescriptor;
use crate::card::operations::select::{select, select_descriptor};
use crate::constants::{CLA_GSM, INS_READ_RECORD, INS_UPDATE_RECORD, RECORD_MODE_ABSOLUTE};
use crate::device::{Device, Initialized};
use crate::protocol::CommandPdu;
use crate::types::FilePath;
use crate::{Error, Result};

/// Record length of a linear fixed / cyclic file
pub fn record_size(device: &mut Device<Initialized>, path: &FilePath) -> Result<u8> {
    Ok(record_descriptor(device, path)?.record_len)
}

/// Number of records; the file size must be a multiple of the record length.
pub fn record_count(device: &mut Device<Initialized>, path: &FilePath) -> Result<usize> {
    record_descriptor(device, path)?.record_count()
}

/// Read record `index` (1-based).
pub fn read_record(
    device: &mut Device<Initialized>,
    path: &FilePath,
    index: u8,
) -> Result<Vec<u8>> {
    check_index(index)?;
    let descriptor = record_descriptor(device, path)?;
    read_selected(device, index, descriptor.record_len)
}

/// Read every record of the file, in order.
pub fn read_records(device: &mut Device<Initialized>, path: &FilePath) -> Result<Vec<Vec<u8>>> {
    let descriptor = record_descriptor(device, path)?;
    let count = descriptor.record_count()?;
    let count = u8::try_from(count).map_err(|_| {
        Error::MalformedDescriptor(format!("{count} records in {path}, at most 255 addressable"))
    })?;
    (1..=count)
        .map(|i| read_selected(device, i, descriptor.record_len))
        .collect()
}

/// Overwrite record `index` (1-based).
///
/// Unless `force_length` is set, `data` must be exactly one record long;
/// otherwise nothing but the select is sent.
pub fn update_record(
    device: &mut Device<Initialized>,
    path: &FilePath,
    index: u8,
    data: &[u8],
    force_length: bool,
) -> Result<()> {
    check_index(index)?;
    if force_length {
        select(device, path)?;
    } else {
        let descriptor = select_descriptor(device, path)?;
        if data.len() != descriptor.record_len as usize {
            return Err(Error::InvalidLength {
                expected: descriptor.record_len as usize,
                actual: data.len(),
            });
        }
    }
    let cmd = CommandPdu::with_data(CLA_GSM, INS_UPDATE_RECORD, index, RECORD_MODE_ABSOLUTE, data)?;
    device.send_and_check(&cmd)?;
    Ok(())
}

fn record_descriptor(device: &mut Device<Initialized>, path: &FilePath) -> Result<FileDescriptor> {
    let descriptor = select_descriptor(device, path)?;
    if descriptor.record_len == 0 {
        return Err(Error::MalformedDescriptor(format!(
            "{path} is not record based"
        )));
    }
    Ok(descriptor)
}

fn read_selected(device: &mut Device<Initialized>, index: u8, len: u8) -> Result<Vec<u8>> {
    let cmd = CommandPdu::new(CLA_GSM, INS_READ_RECORD, index, RECORD_MODE_ABSOLUTE, len);
    Ok(device.send_and_check(&cmd)?.into_data())
}

fn check_index(index: u8) -> Result<()> {
    if index == 0 {
        return Err(Error::InvalidParameter("record numbers start at 1".into()));
    }
    Ok(())
}
