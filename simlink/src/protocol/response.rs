// simlink/src/protocol/response.rs

//! Response PDU: data plus status word.

use std::fmt;

use crate::types::StatusWord;
use crate::utils::bytes_to_hex;
use crate::{Error, Result};

/// Response data plus trailing status word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePdu {
    data: Vec<u8>,
    sw: StatusWord,
}

impl ResponsePdu {
    /// Response from parts
    pub fn new(data: Vec<u8>, sw: StatusWord) -> Self {
        Self { data, sw }
    }

    /// Split raw received bytes: the last two are the status word.
    pub fn from_raw(mut raw: Vec<u8>) -> Result<Self> {
        if raw.len() < 2 {
            return Err(Error::TruncatedResponse {
                received: raw.len(),
            });
        }
        let sw2 = raw.pop().unwrap_or_default();
        let sw1 = raw.pop().unwrap_or_default();
        Ok(Self {
            data: raw,
            sw: StatusWord::new(sw1, sw2),
        })
    }

    /// Data field without the status word
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take the data field
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Trailing status word
    pub fn status(&self) -> StatusWord {
        self.sw
    }

    /// Pass through 9000, anything else is `CardRejected`.
    pub fn check(self) -> Result<Self> {
        if self.sw.is_success() {
            Ok(self)
        } else {
            Err(Error::CardRejected(self.sw))
        }
    }

    /// Hex of the data field alone
    pub fn data_hex(&self) -> String {
        bytes_to_hex(&self.data)
    }

    /// Hex trace form: data followed by the 4 status digits
    pub fn to_hex(&self) -> String {
        format!("{}{}", self.data_hex(), self.sw)
    }
}

impl fmt::Display for ResponsePdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
