// simlink/src/card/operations/gsm.rs

//! Authentication, toolkit profile and SMS storage.

use crate::card::SmsRecord;
use crate::card::operations::record::read_records;
use crate::card::operations::select::select;
use crate::constants::{CLA_GSM, GSM_RAND_LEN, INS_RUN_GSM_ALGORITHM, INS_TERMINAL_PROFILE};
use crate::device::{Device, Initialized};
use crate::protocol::CommandPdu;
use crate::types::{FileId, FilePath};
use crate::{Error, Result};

/// Run the A3/A8 algorithm on `rand`. Returns SRES (4 bytes) followed by
/// Kc (8 bytes).
pub fn run_gsm(device: &mut Device<Initialized>, rand: &[u8; GSM_RAND_LEN]) -> Result<Vec<u8>> {
    select(device, &FilePath::from([FileId::MF, FileId::DF_GSM]))?;
    let cmd = CommandPdu::with_data(CLA_GSM, INS_RUN_GSM_ALGORITHM, 0x00, 0x00, rand.to_vec())?;
    Ok(device.send_and_check(&cmd)?.into_data())
}

/// Tell the card which SIM toolkit features the terminal supports.
pub fn terminal_profile(device: &mut Device<Initialized>, profile: &[u8]) -> Result<()> {
    if profile.is_empty() {
        return Err(Error::InvalidParameter("empty terminal profile".into()));
    }
    let cmd = CommandPdu::with_data(CLA_GSM, INS_TERMINAL_PROFILE, 0x00, 0x00, profile)?;
    device.send_and_check(&cmd)?;
    Ok(())
}

/// All EF_SMS records, free ones included.
pub fn read_sms(device: &mut Device<Initialized>) -> Result<Vec<SmsRecord>> {
    let path = FilePath::from([FileId::MF, FileId::DF_TELECOM, FileId::EF_SMS]);
    read_records(device, &path)?
        .iter()
        .zip(1u8..)
        .map(|(record, index)| SmsRecord::from_record(index, record))
        .collect()
}
