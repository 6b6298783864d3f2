// simlink/src/card/operations/chv.rs

//! CHV (PIN) lifecycle. Codes are ASCII digits, sent right padded with
//! 0xFF to 8 bytes.

use log::info;

use crate::card::operations::select::select;
use crate::constants::{
    CHV_LEN, CHV_PAD, CLA_GSM, INS_CHANGE_CHV, INS_DISABLE_CHV, INS_ENABLE_CHV, INS_UNBLOCK_CHV,
    INS_VERIFY_CHV,
};
use crate::device::{Device, Initialized};
use crate::protocol::CommandPdu;
use crate::types::{FileId, FilePath};
use crate::{Error, Result};

/// Encode `code` as an 8 byte CHV block.
pub fn pad_chv(code: &str) -> Result<[u8; CHV_LEN]> {
    let bytes = code.as_bytes();
    if bytes.is_empty() || bytes.len() > CHV_LEN {
        return Err(Error::InvalidParameter(format!(
            "CHV must be 1 to {CHV_LEN} characters, got {}",
            bytes.len()
        )));
    }
    let mut block = [CHV_PAD; CHV_LEN];
    block[..bytes.len()].copy_from_slice(bytes);
    Ok(block)
}

fn gsm_context() -> FilePath {
    FilePath::from([FileId::MF, FileId::DF_GSM])
}

fn sst_context() -> FilePath {
    FilePath::from([FileId::MF, FileId::DF_GSM, FileId::EF_SST])
}

fn check_chv(chv: u8) -> Result<()> {
    match chv {
        1 | 2 => Ok(()),
        other => Err(Error::InvalidParameter(format!("no CHV{other}, only 1 and 2"))),
    }
}

fn send_chv(device: &mut Device<Initialized>, ins: u8, p2: u8, data: Vec<u8>) -> Result<()> {
    let cmd = CommandPdu::with_data(CLA_GSM, ins, 0x00, p2, data)?;
    device.send_and_check(&cmd)?;
    Ok(())
}

/// VERIFY CHV `chv` (1 or 2).
pub fn verify(device: &mut Device<Initialized>, chv: u8, code: &str) -> Result<()> {
    check_chv(chv)?;
    let block = pad_chv(code)?;
    select(device, &gsm_context())?;
    send_chv(device, INS_VERIFY_CHV, chv, block.to_vec())?;
    info!("CHV{} verified", chv);
    Ok(())
}

/// Replace CHV `chv` by `new`, authorised with `old`.
pub fn change(device: &mut Device<Initialized>, chv: u8, old: &str, new: &str) -> Result<()> {
    check_chv(chv)?;
    let data = [pad_chv(old)?, pad_chv(new)?].concat();
    select(device, &gsm_context())?;
    send_chv(device, INS_CHANGE_CHV, chv, data)
}

/// Switch off CHV1 checking.
pub fn disable(device: &mut Device<Initialized>, code: &str) -> Result<()> {
    let block = pad_chv(code)?;
    select(device, &gsm_context())?;
    send_chv(device, INS_DISABLE_CHV, 0x01, block.to_vec())
}

/// Switch CHV1 checking back on.
pub fn enable(device: &mut Device<Initialized>, code: &str) -> Result<()> {
    let block = pad_chv(code)?;
    select(device, &sst_context())?;
    send_chv(device, INS_ENABLE_CHV, 0x01, block.to_vec())
}

/// Reset the retry counter of `chv` with its unblock code and set a new
/// value. CHV1 is addressed as 0 by UNBLOCK CHV.
pub fn unblock(
    device: &mut Device<Initialized>,
    chv: u8,
    unblock_code: &str,
    new_code: &str,
) -> Result<()> {
    check_chv(chv)?;
    let data = [pad_chv(unblock_code)?, pad_chv(new_code)?].concat();
    select(device, &sst_context())?;
    let p2 = if chv == 1 { 0x00 } else { chv };
    send_chv(device, INS_UNBLOCK_CHV, p2, data)
}
