// simlink/src/protocol/command.rs

use std::fmt;
use std::str::FromStr;

use crate::constants::{APDU_HEADER_LEN, APDU_MAX_DATA_LEN};
use crate::utils::{bytes_to_hex, parse_hex};
use crate::{Error, Result};

/// T=0 command: 5 byte header `CLA INS P1 P2 P3` plus an optional data
/// field. With data, P3 is the data length; without, P3 is the number of
/// bytes expected back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPdu {
    cla: u8,
    ins: u8,
    p1: u8,
    p2: u8,
    p3: u8,
    data: Vec<u8>,
}

impl CommandPdu {
    /// Command without data field; `p3` is the expected response length.
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8, p3: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            p3,
            data: Vec::new(),
        }
    }

    /// Command carrying `data`; P3 is derived from its length.
    pub fn with_data(cla: u8, ins: u8, p1: u8, p2: u8, data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        if data.len() > APDU_MAX_DATA_LEN {
            return Err(Error::InvalidLength {
                expected: APDU_MAX_DATA_LEN,
                actual: data.len(),
            });
        }
        Ok(Self {
            cla,
            ins,
            p1,
            p2,
            p3: data.len() as u8,
            data,
        })
    }

    /// Decode a header plus optional data. When data follows the header,
    /// P3 must match its length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < APDU_HEADER_LEN {
            return Err(Error::InvalidLength {
                expected: APDU_HEADER_LEN,
                actual: bytes.len(),
            });
        }
        let (header, data) = bytes.split_at(APDU_HEADER_LEN);
        let p3 = header[4];
        if !data.is_empty() && data.len() != p3 as usize {
            return Err(Error::InvalidLength {
                expected: p3 as usize,
                actual: data.len(),
            });
        }
        Ok(Self {
            cla: header[0],
            ins: header[1],
            p1: header[2],
            p2: header[3],
            p3,
            data: data.to_vec(),
        })
    }

    /// Parse the hex trace form, e.g. `"a0a40000023f00"`.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&parse_hex(s)?)
    }

    /// Class byte
    pub fn cla(&self) -> u8 {
        self.cla
    }

    /// Instruction byte
    pub fn ins(&self) -> u8 {
        self.ins
    }

    /// First parameter
    pub fn p1(&self) -> u8 {
        self.p1
    }

    /// Second parameter
    pub fn p2(&self) -> u8 {
        self.p2
    }

    /// Data length, or expected response length without data
    pub fn p3(&self) -> u8 {
        self.p3
    }

    /// Data field, empty when none
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Same command with another P3. Only meaningful without data, where
    /// P3 is the expected length (e.g. re-issuing after a 6Cxx).
    pub fn with_p3(&self, p3: u8) -> Self {
        Self { p3, ..self.clone() }
    }

    /// `CLA INS P1 P2 P3`
    pub fn header(&self) -> [u8; APDU_HEADER_LEN] {
        [self.cla, self.ins, self.p1, self.p2, self.p3]
    }

    /// Upper bound on response bytes: P3 plus the status word.
    pub fn expected_response_len(&self) -> usize {
        self.p3 as usize + 2
    }

    /// Header followed by the data field
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(APDU_HEADER_LEN + self.data.len());
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&self.data);
        out
    }

    /// Lowercase hex of `encode()`
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.encode())
    }
}

impl fmt::Display for CommandPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for CommandPdu {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}
