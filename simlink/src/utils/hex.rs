//! Hexadecimal helpers.
//!
//! Exchanges are traced and compared as lowercase hex strings with the status
//! word as the last four digits, so these helpers define the one rendering
//! used everywhere (logs, `Display`, `to_hex`).

use std::fmt::Write;

use crate::{Error, Result};

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xa0, 0xa4]` -> `"a0a4"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        // write! never fails writing to a String
        let _ = write!(s, "{b:02x}");
        s
    })
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte. Used for ATR traces.
///
/// Example: `&[0x3b, 0x00]` -> `"3b 00"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a hex string into bytes.
///
/// Accepts upper or lower case digits and ignores ASCII whitespace. Odd
/// digit counts and non-hex characters are `InvalidParameter`.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = s.bytes().filter(|c| !c.is_ascii_whitespace()).collect();

    if digits.len() % 2 != 0 {
        return Err(Error::InvalidParameter(format!(
            "hex string has odd length: '{s}'"
        )));
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_digit(pair[0]);
            let lo = hex_digit(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(Error::InvalidParameter(format!(
                    "invalid hex pair '{}{}'",
                    pair[0] as char, pair[1] as char
                ))),
            }
        })
        .collect()
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}
