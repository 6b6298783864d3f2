// simlink/src/card/operations/query.rs

//! STATUS and identity file readers.

use log::debug;

use crate::card::info::{
    decode_dialling_number, decode_iccid, decode_imsi, decode_location_area,
};
use crate::card::operations::binary::read_binary;
use crate::card::operations::record::read_record;
use crate::card::operations::select::select;
use crate::card::{ChvStatus, Phase, SimInfo};
use crate::constants::{CLA_GSM, INS_STATUS, STATUS_GSM_DATA_OFFSET, STATUS_HEADER_LEN};
use crate::device::{Device, Initialized};
use crate::protocol::CommandPdu;
use crate::protocol::parser::{byte_at, ensure_len};
use crate::types::{FileId, FilePath, StatusKind};
use crate::{Error, Result};

/// STATUS of the current directory. A short first request tells how many GSM
/// specific bytes follow, then the full answer is requested.
pub fn status(device: &mut Device<Initialized>) -> Result<Vec<u8>> {
    let short = CommandPdu::new(CLA_GSM, INS_STATUS, 0x00, 0x00, STATUS_HEADER_LEN);
    let first = device.send_and_check(&short)?.into_data();
    let total = STATUS_HEADER_LEN as usize + byte_at(&first, 12)? as usize;
    let total = u8::try_from(total).map_err(|_| Error::InvalidLength {
        expected: u8::MAX as usize,
        actual: total,
    })?;
    let full = device.send_and_check(&short.with_p3(total))?.into_data();
    Ok(full)
}

/// CHV1/CHV2 state, from the MF status.
pub fn chv_status(device: &mut Device<Initialized>) -> Result<ChvStatus> {
    select(device, &FilePath::from(FileId::MF))?;
    let data = status(device)?;
    ensure_len(&data, STATUS_GSM_DATA_OFFSET + 1)?;
    let status = ChvStatus::decode(&data[STATUS_GSM_DATA_OFFSET..])?;
    debug!("CHV status: {:?}", status);
    Ok(status)
}

fn gsm_ef(id: FileId) -> FilePath {
    FilePath::from([FileId::MF, FileId::DF_GSM, id])
}

/// LAI bytes of EF_LOCI as nibble swapped hex
pub fn location_area(device: &mut Device<Initialized>) -> Result<String> {
    let data = read_binary(device, &gsm_ef(FileId::EF_LOCI), Some(5), 4)?;
    Ok(decode_location_area(&data))
}

/// Own number from the first EF_MSISDN record. `None` when it is not set
/// or the card has no EF_MSISDN.
pub fn msisdn(device: &mut Device<Initialized>) -> Result<Option<String>> {
    let path = FilePath::from([FileId::MF, FileId::DF_TELECOM, FileId::EF_MSISDN]);
    match read_record(device, &path, 1) {
        Ok(record) => decode_dialling_number(&record),
        Err(Error::CardRejected(sw)) if sw.kind() == StatusKind::FileNotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// ICCID digits from EF_ICCID
pub fn iccid(device: &mut Device<Initialized>) -> Result<String> {
    let path = FilePath::from([FileId::MF, FileId::EF_ICCID]);
    let data = read_binary(device, &path, Some(10), 0)?;
    Ok(decode_iccid(&data))
}

/// IMSI from EF_IMSI, see [`decode_imsi`](crate::card::decode_imsi).
pub fn imsi(device: &mut Device<Initialized>) -> Result<String> {
    let data = read_binary(device, &gsm_ef(FileId::EF_IMSI), Some(9), 0)?;
    decode_imsi(&data)
}

/// Phase from EF_PHASE
pub fn phase(device: &mut Device<Initialized>) -> Result<Phase> {
    let data = read_binary(device, &gsm_ef(FileId::EF_PHASE), Some(1), 0)?;
    Ok(Phase::from(byte_at(&data, 0)?))
}

/// Identity summary: LAI, MSISDN, ICCID, IMSI and phase, read in that
/// order.
pub fn sim_info(device: &mut Device<Initialized>) -> Result<SimInfo> {
    let location_area = location_area(device)?;
    let msisdn = msisdn(device)?;
    let iccid = iccid(device)?;
    let imsi = imsi(device)?;
    let phase = phase(device)?;
    Ok(SimInfo {
        location_area,
        msisdn,
        imsi,
        iccid,
        phase,
    })
}
