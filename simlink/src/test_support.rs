//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers script a MockChannel the way a real SIM answers so tests
//! across the crate and tests/ directory can reuse the same card model.
#![allow(dead_code)]

use crate::channel::MockChannel;
use crate::device::{Device, DeviceConfig, Initialized};
use crate::protocol::ExchangeConfig;
use crate::types::{FileId, FilePath, StatusWord};
use crate::{Result, constants};

/// Answer to reset of a common GSM SIM (T=0, 15 historical bytes, TCK)
#[doc(hidden)]
pub const TEST_ATR: [u8; 22] = [
    0x3B, 0x9F, 0x95, 0x80, 0x1F, 0xC3, 0x80, 0x31, 0xE0, 0x73, 0xFE, 0x21, 0x1B, 0x63, 0x3A,
    0x20, 0x4E, 0x83, 0x00, 0x90, 0x00, 0x31,
];

/// Config without real delays; the mock never blocks anyway.
#[doc(hidden)]
pub fn fast_config() -> DeviceConfig {
    DeviceConfig {
        settle_delay_ms: 0,
        poll_interval_ms: 5,
        exchange: ExchangeConfig {
            read_timeout_ms: 10,
            wait_timeout_ms: 200,
            burst: true,
        },
        ..Default::default()
    }
}

/// Convenience: a Device<Initialized> over a MockChannel that answered
/// `TEST_ATR`. The returned MockChannel shares state with the device's.
#[doc(hidden)]
pub fn initialized_mock_device() -> Result<(MockChannel, Device<Initialized>)> {
    let mock = MockChannel::new();
    mock.queue_atr(&TEST_ATR);
    let device = Device::new_with_channel(Box::new(mock.clone()))
        .with_config(fast_config())
        .initialize()?;
    Ok((mock, device))
}

/// Card acknowledges `ins`, answers `data` and `sw`, then goes quiet.
#[doc(hidden)]
pub fn script_response(mock: &MockChannel, ins: u8, data: &[u8], sw: StatusWord) {
    mock.push_rx(&[ins]);
    mock.push_rx(data);
    mock.push_rx(&[sw.sw1(), sw.sw2()]);
    mock.push_silence();
}

/// `script_response` with 9000
#[doc(hidden)]
pub fn script_ok(mock: &MockChannel, ins: u8, data: &[u8]) {
    script_response(mock, ins, data, StatusWord::SUCCESS);
}

/// Card answers a status word instead of the acknowledgement.
#[doc(hidden)]
pub fn script_status(mock: &MockChannel, sw: StatusWord) {
    mock.push_rx(&[sw.sw1(), sw.sw2()]);
    mock.push_silence();
}

/// One SELECT the way a SIM does it: `9Fxx`, then the descriptor through
/// GET RESPONSE.
#[doc(hidden)]
pub fn script_select(mock: &MockChannel, descriptor: &[u8]) {
    script_response(
        mock,
        constants::INS_SELECT,
        &[],
        StatusWord::new(0x9F, descriptor.len() as u8),
    );
    script_ok(mock, constants::INS_GET_RESPONSE, descriptor);
}

/// Script a select of every element of `path`; directories get a generic
/// DF descriptor, the last element gets `target`.
#[doc(hidden)]
pub fn script_path(mock: &MockChannel, path: &FilePath, target: &[u8]) {
    let ids = path.ids();
    for &id in &ids[..ids.len() - 1] {
        script_select(mock, &df_descriptor(id));
    }
    script_select(mock, target);
}

/// MF/DF descriptor (22 bytes)
#[doc(hidden)]
pub fn df_descriptor(id: FileId) -> Vec<u8> {
    let [hi, lo] = id.to_be_bytes();
    let file_type = if id == FileId::MF { 0x01 } else { 0x02 };
    vec![
        0x00, 0x00, 0x1F, 0x40, hi, lo, file_type, 0x00, 0x00, 0x00, 0x00, 0x00, 0x09, 0x13,
        0x00, 0x04, 0x04, 0x00, 0x83, 0x8A, 0x83, 0x8A,
    ]
}

/// EF descriptor (15 bytes). `structure`: 00 transparent, 01 linear
/// fixed, 03 cyclic.
#[doc(hidden)]
pub fn ef_descriptor(id: FileId, size: u16, structure: u8, record_len: u8) -> Vec<u8> {
    let [size_hi, size_lo] = size.to_be_bytes();
    let [hi, lo] = id.to_be_bytes();
    vec![
        0x00, 0x00, size_hi, size_lo, hi, lo, 0x04, 0x00, 0x11, 0xFF, 0x22, 0x01, 0x02,
        structure, record_len,
    ]
}
