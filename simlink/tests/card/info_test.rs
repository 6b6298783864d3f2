#[path = "../common/mod.rs"]
mod common;

use simlink::card::{Phase, SmsStatus};
use simlink::test_support::{
    df_descriptor, ef_descriptor, initialized_mock_device, script_ok, script_path,
    script_response, script_status,
};
use simlink::{FileId, FilePath, StatusWord};

use common::fixtures::*;
use common::helpers::{headers_with_ins, script_read_binary, script_sim_info};

#[test]
fn iccid_end_to_end() {
    common::init_logger();
    let (mock, mut dev) = initialized_mock_device().unwrap();
    script_read_binary(
        &mock,
        &FilePath::from([FileId::MF, FileId::EF_ICCID]),
        10,
        &EF_ICCID,
    );

    assert_eq!(dev.card().iccid().unwrap(), ICCID);
    assert_eq!(mock.pending_rx(), 0);
}

#[test]
fn sim_info_end_to_end() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    script_sim_info(&mock);

    let info = dev.card().sim_info().unwrap();
    assert_eq!(info.location_area, LOCATION_AREA);
    assert_eq!(info.msisdn.as_deref(), Some(MSISDN));
    assert_eq!(info.iccid, ICCID);
    assert_eq!(info.imsi, IMSI);
    assert_eq!(info.phase, Phase::Phase2Plus);
    assert_eq!(mock.pending_rx(), 0);

    // LAI is read from offset 4 of EF_LOCI
    assert_eq!(headers_with_ins(&mock, 0xB0)[0], hex::decode("a0b0000405").unwrap());
    let text = info.to_string();
    assert!(text.contains(ICCID));
    assert!(text.contains("Phase 2+"));
}

#[test]
fn msisdn_absent_or_unset() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    // card without EF_MSISDN
    script_select_dirs(&mock);
    script_status(&mock, StatusWord::new(0x94, 0x04));
    assert_eq!(dev.card().msisdn().unwrap(), None);

    // present but blank
    let path = telecom_ef_path(FileId::EF_MSISDN);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_MSISDN, 28, 0x01, 28));
    script_ok(&mock, 0xB2, &unused_record(MSISDN_RECORD_LEN));
    assert_eq!(dev.card().msisdn().unwrap(), None);
}

fn script_select_dirs(mock: &simlink::channel::MockChannel) {
    script_path(
        mock,
        &FilePath::from([FileId::MF, FileId::DF_TELECOM]),
        &df_descriptor(FileId::DF_TELECOM),
    );
}

#[test]
fn read_sms_returns_every_record() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = telecom_ef_path(FileId::EF_SMS);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_SMS, 176 * 3, 0x01, 176));
    let mut unread = vec![0x03];
    unread.extend_from_slice(&[0x07; 175]);
    let mut free = vec![0x00];
    free.extend_from_slice(&[0xFF; 175]);
    script_ok(&mock, 0xB2, &unread);
    script_ok(&mock, 0xB2, &free);
    script_ok(&mock, 0xB2, &free);

    let sms = dev.card().read_sms().unwrap();
    assert_eq!(sms.len(), 3);
    assert_eq!(sms[0].index, 1);
    assert_eq!(sms[0].status, SmsStatus::Unread);
    assert_eq!(sms[0].payload.len(), 175);
    assert!(sms[1].is_free() && sms[2].is_free());
    assert_eq!(sms[2].index, 3);
}

#[test]
fn run_gsm_fetches_sres_and_kc() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    script_path(
        &mock,
        &FilePath::from([FileId::MF, FileId::DF_GSM]),
        &df_descriptor(FileId::DF_GSM),
    );
    script_response(&mock, 0x88, &[], StatusWord::new(0x9F, 0x0C));
    script_ok(&mock, 0xC0, &GSM_AUTH_RESULT);

    let out = dev.card().run_gsm(&RAND).unwrap();
    assert_eq!(out, GSM_AUTH_RESULT.to_vec());
    assert_eq!(headers_with_ins(&mock, 0x88), vec![hex::decode("a088000010").unwrap()]);
}

#[test]
fn terminal_profile_is_sent_as_is() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    script_ok(&mock, 0x10, &[]);
    dev.card().terminal_profile(&[0xFF, 0xFF, 0x7F]).unwrap();
    assert_eq!(headers_with_ins(&mock, 0x10), vec![hex::decode("a010000003").unwrap()]);
    assert!(dev.card().terminal_profile(&[]).is_err());
}
