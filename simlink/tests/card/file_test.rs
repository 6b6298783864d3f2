#[path = "../common/mod.rs"]
mod common;

use simlink::test_support::{
    ef_descriptor, initialized_mock_device, script_ok, script_path, script_status,
};
use simlink::{Error, FileId, FilePath, StatusKind, StatusWord};

use common::fixtures::telecom_ef_path;
use common::helpers::{data_after, headers_with_ins, script_read_binary};

#[test]
fn read_binary_defaults_to_rest_of_file() {
    common::init_logger();
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = FilePath::from([FileId::MF, FileId::DF_GSM, FileId::EF_SPN]);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_SPN, 17, 0x00, 0));
    script_ok(&mock, 0xB0, &[0x41; 15]);

    let data = dev.card().read_binary(&path, None, 2).unwrap();
    assert_eq!(data, vec![0x41; 15]);
    assert_eq!(headers_with_ins(&mock, 0xB0), vec![hex::decode("a0b000020f").unwrap()]);

    // one select per path element: 3f00, 7f20, 6f46
    let selected: Vec<_> = mock
        .writes()
        .into_iter()
        .filter(|w| w.len() == 2)
        .collect();
    assert_eq!(selected, vec![vec![0x3F, 0x00], vec![0x7F, 0x20], vec![0x6F, 0x46]]);
}

#[test]
fn read_binary_single_chunk_uses_low_byte() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = FilePath::from(FileId::EF_ICCID);
    script_read_binary(&mock, &path, 10, &[0u8; 10]);

    let data = dev.card().read_binary(&path, Some(10), 0).unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(headers_with_ins(&mock, 0xB0)[0], hex::decode("a0b000000a").unwrap());
}

#[test]
fn read_binary_all_in_chunks() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = FilePath::from([FileId::MF, FileId::DF_GSM, FileId::EF_ACC]);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_ACC, 300, 0x00, 0));
    script_ok(&mock, 0xB0, &[0xAA; 255]);
    script_ok(&mock, 0xB0, &[0xBB; 45]);

    let data = dev.card().read_binary_all(&path).unwrap();
    assert_eq!(data.len(), 300);
    assert_eq!(data[254], 0xAA);
    assert_eq!(data[255], 0xBB);
    let reads = headers_with_ins(&mock, 0xB0);
    assert_eq!(reads[0], hex::decode("a0b00000ff").unwrap());
    assert_eq!(reads[1], hex::decode("a0b000ff2d").unwrap());
}

#[test]
fn update_binary_sends_offset_and_data() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = FilePath::from([FileId::MF, FileId::DF_GSM, FileId::EF_PHASE]);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_PHASE, 1, 0x00, 0));
    script_ok(&mock, 0xD6, &[]);

    dev.card().update_binary(&path, &[0x03], 0).unwrap();
    assert_eq!(headers_with_ins(&mock, 0xD6), vec![hex::decode("a0d6000001").unwrap()]);
    assert_eq!(data_after(&mock, 0xD6), Some(vec![0x03]));
}

#[test]
fn update_record_sends_whole_record() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = telecom_ef_path(FileId::EF_ADN);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_ADN, 4 * 3, 0x01, 4));
    script_ok(&mock, 0xDC, &[]);

    dev.card()
        .update_record(&path, 2, &[1, 2, 3, 4], false)
        .unwrap();
    assert_eq!(headers_with_ins(&mock, 0xDC), vec![hex::decode("a0dc020404").unwrap()]);
    assert_eq!(data_after(&mock, 0xDC), Some(vec![1, 2, 3, 4]));
}

#[test]
fn update_record_length_mismatch_sends_nothing_after_select() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = telecom_ef_path(FileId::EF_ADN);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_ADN, 4 * 3, 0x01, 4));

    let err = dev
        .card()
        .update_record(&path, 1, &[1, 2, 3], false)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidLength { expected: 4, actual: 3 }));

    // last thing on the wire is the GET RESPONSE of the final select
    let writes = mock.writes();
    assert_eq!(writes.last().unwrap()[1], 0xC0);
    assert!(headers_with_ins(&mock, 0xDC).is_empty());
}

#[test]
fn forced_length_skips_the_check() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = telecom_ef_path(FileId::EF_ADN);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_ADN, 4 * 3, 0x01, 4));
    script_ok(&mock, 0xDC, &[]);

    dev.card()
        .update_record(&path, 1, &[1, 2], true)
        .unwrap();
    assert_eq!(headers_with_ins(&mock, 0xDC), vec![hex::decode("a0dc010402").unwrap()]);
}

#[test]
fn record_size_and_count() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = telecom_ef_path(FileId::EF_SMS);
    let descriptor = ef_descriptor(FileId::EF_SMS, 176 * 10, 0x01, 176);
    script_path(&mock, &path, &descriptor);
    script_path(&mock, &path, &descriptor);

    assert_eq!(dev.card().record_size(&path).unwrap(), 176);
    assert_eq!(dev.card().record_count(&path).unwrap(), 10);
}

#[test]
fn transparent_file_has_no_records() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = FilePath::from(FileId::EF_ICCID);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_ICCID, 10, 0x00, 0));
    assert!(matches!(
        dev.card().read_record(&path, 1),
        Err(Error::MalformedDescriptor(_))
    ));
}

#[test]
fn missing_file_is_rejected_with_status() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    script_status(&mock, StatusWord::new(0x94, 0x04));

    match dev.card().select(&FilePath::from(FileId::new(0x6F99))) {
        Err(Error::CardRejected(sw)) => assert_eq!(sw.kind(), StatusKind::FileNotFound),
        other => panic!("expected CardRejected, got: {:?}", other),
    }
}

#[test]
fn select_descriptor_decodes_target() {
    let (mock, mut dev) = initialized_mock_device().unwrap();
    let path = telecom_ef_path(FileId::EF_ADN);
    script_path(&mock, &path, &ef_descriptor(FileId::EF_ADN, 280, 0x01, 28));

    let d = dev.card().select_descriptor(&path).unwrap();
    assert_eq!(d.file_id, FileId::EF_ADN);
    assert_eq!(d.size, 280);
    assert_eq!(d.record_count().unwrap(), 10);
}
