// simlink/src/constants.rs
//! Common protocol constants used across the crate

/// TS byte announcing the direct convention. Also the only accepted card
/// presence signal after a reset.
pub const ATR_TS_DIRECT: u8 = 0x3B;

/// TS byte of the inverse convention (recognised, not supported)
pub const ATR_TS_INVERSE: u8 = 0x3F;

/// Procedure byte a card sends while it needs more time ("NULL").
pub const NULL_PROCEDURE: u8 = 0x60;

/// Length of a command header: CLA INS P1 P2 P3
pub const APDU_HEADER_LEN: usize = 5;

/// Largest data field expressible with a single P3 byte
pub const APDU_MAX_DATA_LEN: usize = 255;

/// Largest single READ BINARY transfer (P3 = 0x00 means 256)
pub const READ_BINARY_MAX_CHUNK: usize = 256;

/// GSM 11.11 class byte
pub const CLA_GSM: u8 = 0xA0;

// GSM 11.11 instruction codes
/// SELECT
pub const INS_SELECT: u8 = 0xA4;
/// STATUS
pub const INS_STATUS: u8 = 0xF2;
/// READ BINARY
pub const INS_READ_BINARY: u8 = 0xB0;
/// UPDATE BINARY
pub const INS_UPDATE_BINARY: u8 = 0xD6;
/// READ RECORD
pub const INS_READ_RECORD: u8 = 0xB2;
/// UPDATE RECORD
pub const INS_UPDATE_RECORD: u8 = 0xDC;
/// VERIFY CHV
pub const INS_VERIFY_CHV: u8 = 0x20;
/// CHANGE CHV
pub const INS_CHANGE_CHV: u8 = 0x24;
/// DISABLE CHV
pub const INS_DISABLE_CHV: u8 = 0x26;
/// ENABLE CHV
pub const INS_ENABLE_CHV: u8 = 0x28;
/// UNBLOCK CHV
pub const INS_UNBLOCK_CHV: u8 = 0x2C;
/// RUN GSM ALGORITHM
pub const INS_RUN_GSM_ALGORITHM: u8 = 0x88;
/// TERMINAL PROFILE
pub const INS_TERMINAL_PROFILE: u8 = 0x10;
/// GET RESPONSE
pub const INS_GET_RESPONSE: u8 = 0xC0;

/// READ/UPDATE RECORD P2: absolute/current mode
pub const RECORD_MODE_ABSOLUTE: u8 = 0x04;

/// CHV values are always sent as 8 bytes, right padded with 0xFF
pub const CHV_LEN: usize = 8;
/// CHV padding byte
pub const CHV_PAD: u8 = 0xFF;

/// Length of the short first STATUS; byte 12 of its answer gives the
/// number of additional GSM-specific bytes.
pub const STATUS_HEADER_LEN: u8 = 0x0D;

/// Offset where the GSM specific part of a DF status answer begins
pub const STATUS_GSM_DATA_OFFSET: usize = 13;

/// RUN GSM ALGORITHM challenge length
pub const GSM_RAND_LEN: usize = 16;
