// simlink/src/channel/traits.rs

use crate::Result;
use crate::types::ControlLine;

/// ByteChannel abstracts the half-duplex serial line away from the
/// reset/APDU logic.
///
/// The line is expected to echo every transmitted byte back into the receive
/// buffer (TX and RX tied together). Implementations must not hide that echo;
/// the exchange layer reads and verifies it.
pub trait ByteChannel {
    /// Transmit raw bytes
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Receive one byte, waiting at most `timeout_ms`. `Ok(None)` means the
    /// line stayed silent for the whole timeout.
    fn read_byte(&mut self, timeout_ms: u64) -> Result<Option<u8>>;

    /// Drive a modem control line to `level`
    fn set_control_line(&mut self, line: ControlLine, level: bool) -> Result<()>;

    /// Discard whatever is sitting in the receive buffer
    fn clear_input(&mut self) -> Result<()>;

    /// Receive up to `len` bytes, stopping early at the first silence.
    fn read_bytes(&mut self, len: usize, timeout_ms: u64) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            match self.read_byte(timeout_ms)? {
                Some(b) => out.push(b),
                None => break,
            }
        }
        Ok(out)
    }
}

impl<T: ByteChannel + ?Sized> ByteChannel for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn read_byte(&mut self, timeout_ms: u64) -> Result<Option<u8>> {
        (**self).read_byte(timeout_ms)
    }

    fn set_control_line(&mut self, line: ControlLine, level: bool) -> Result<()> {
        (**self).set_control_line(line, level)
    }

    fn clear_input(&mut self) -> Result<()> {
        (**self).clear_input()
    }

    fn read_bytes(&mut self, len: usize, timeout_ms: u64) -> Result<Vec<u8>> {
        (**self).read_bytes(len, timeout_ms)
    }
}
