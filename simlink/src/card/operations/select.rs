// simlink/src/card/operations/select.rs

//! SELECT along absolute file paths.

use log::debug;

use crate::card::FileDescriptor;
use crate::constants::{CLA_GSM, INS_SELECT};
use crate::device::{Device, Initialized};
use crate::protocol::CommandPdu;
use crate::types::FilePath;
use crate::{Error, Result};

/// Select every element of `path` in order. Returns one answer per
/// element; the last one describes the target.
pub fn select(device: &mut Device<Initialized>, path: &FilePath) -> Result<Vec<Vec<u8>>> {
    let mut answers = Vec::with_capacity(path.len());
    for id in path.ids() {
        let cmd = CommandPdu::with_data(CLA_GSM, INS_SELECT, 0x00, 0x00, id.to_be_bytes())?;
        let response = device.send_and_check(&cmd)?;
        answers.push(response.into_data());
    }
    debug!("selected {}", path);
    Ok(answers)
}

/// Select `path` and decode the target's descriptor.
pub fn select_descriptor(
    device: &mut Device<Initialized>,
    path: &FilePath,
) -> Result<FileDescriptor> {
    let mut answers = select(device, path)?;
    let last = answers
        .pop()
        .ok_or_else(|| Error::MalformedDescriptor(format!("no answer selecting {path}")))?;
    FileDescriptor::decode(&last)
}
