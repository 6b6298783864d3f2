// simlink/src/error.rs

//! Crate wide error type.

use thiserror::Error;

use crate::types::StatusWord;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing came back after the reset line was released.
    #[error("no answer to reset: card absent or not seated")]
    NoCardSignal,

    /// The answer to reset broke the ATR grammar.
    #[error("malformed answer to reset: {0}")]
    MalformedAnswer(String),

    /// The line did not echo a transmitted byte back unchanged.
    #[error(
        "echo mismatch at byte {position}: expected {expected:#04x}, got {}",
        .observed.map_or_else(|| "nothing".to_string(), |b| format!("{b:#04x}"))
    )]
    EchoMismatch {
        /// Index of the byte within the header or data field
        position: usize,
        /// Byte that was sent
        expected: u8,
        /// Byte read back, `None` on silence
        observed: Option<u8>,
    },

    /// Neither INS, a NULL byte nor a two byte status came back.
    #[error("unexpected acknowledgement {ack:#04x} for instruction {ins:#04x}")]
    UnexpectedAcknowledgement {
        /// INS of the command
        ins: u8,
        /// Procedure byte received instead
        ack: u8,
    },

    /// Fewer than two response bytes.
    #[error("truncated response: received {received} byte(s), status word needs 2")]
    TruncatedResponse {
        /// Bytes collected before silence
        received: usize,
    },

    /// Well-formed exchange, refused by the card. Carries the raw status.
    #[error("card rejected command: status {0}")]
    CardRejected(StatusWord),

    /// A length did not match what the data or the card requires.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Caller supplied argument out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// SELECT answer too short or inconsistent.
    #[error("malformed file descriptor: {0}")]
    MalformedDescriptor(String),

    /// `wait_for_card` ran out of time.
    #[error("no card presented before the presence timeout")]
    PresenceTimeout,

    /// The card went quiet mid exchange or kept asking for more time.
    #[error("operation timed out")]
    Timeout,

    /// Channel I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    // `serial` feature 有効時のみ
    /// Opening or configuring the serial port failed.
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl Error {
    /// Status word of a card-level refusal, if this is one.
    pub fn status(&self) -> Option<StatusWord> {
        match self {
            Self::CardRejected(sw) => Some(*sw),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
