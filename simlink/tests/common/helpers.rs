// helpers.rs: scripts for multi-command flows

use simlink::channel::MockChannel;
use simlink::test_support::{ef_descriptor, script_ok, script_path};
use simlink::{FileId, FilePath};

use super::fixtures::*;

/// Transparent EF: select + one READ BINARY answering `content`.
pub fn script_read_binary(mock: &MockChannel, path: &FilePath, size: u16, content: &[u8]) {
    script_path(mock, path, &ef_descriptor(path.target(), size, 0x00, 0));
    script_ok(mock, 0xB0, content);
}

/// Linear fixed EF: select + one READ RECORD answering `record`.
pub fn script_read_record(mock: &MockChannel, path: &FilePath, records: u16, record: &[u8]) {
    let len = record.len() as u8;
    script_path(
        mock,
        path,
        &ef_descriptor(path.target(), records * len as u16, 0x01, len),
    );
    script_ok(mock, 0xB2, record);
}

/// Everything `sim_info` reads, in order.
pub fn script_sim_info(mock: &MockChannel) {
    script_read_binary(mock, &gsm_ef_path(FileId::EF_LOCI), 11, &LOCI_LAI);
    script_read_record(
        mock,
        &telecom_ef_path(FileId::EF_MSISDN),
        2,
        &msisdn_record(),
    );
    script_read_binary(
        mock,
        &FilePath::from([FileId::MF, FileId::EF_ICCID]),
        10,
        &EF_ICCID,
    );
    script_read_binary(mock, &gsm_ef_path(FileId::EF_IMSI), 9, &EF_IMSI);
    script_read_binary(mock, &gsm_ef_path(FileId::EF_PHASE), 1, &EF_PHASE);
}

/// Header bytes (5 byte writes) with the given INS, in order
pub fn headers_with_ins(mock: &MockChannel, ins: u8) -> Vec<Vec<u8>> {
    mock.writes()
        .into_iter()
        .filter(|w| w.len() == 5 && w[0] == 0xA0 && w[1] == ins)
        .collect()
}

/// The write following the first header with `ins` (its data field)
pub fn data_after(mock: &MockChannel, ins: u8) -> Option<Vec<u8>> {
    let writes = mock.writes();
    let pos = writes
        .iter()
        .position(|w| w.len() == 5 && w[0] == 0xA0 && w[1] == ins)?;
    writes.get(pos + 1).cloned()
}
