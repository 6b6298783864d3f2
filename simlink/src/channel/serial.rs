// simlink/src/channel/serial.rs

#![cfg(feature = "serial")]

use std::io::{ErrorKind, Read, Write};

use log::debug;
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};

use crate::Result;
use crate::channel::traits::ByteChannel;
use crate::types::ControlLine;
use crate::utils::ms;

/// Serial reader link (phoenix / "simcard reader" style). It is feature-gated
/// behind `--features serial` and requires the `serialport` crate.
///
/// Framing is fixed at 8 data bits, even parity, 2 stop bits and no flow
/// control, as ISO 7816-3 character frames require.
pub struct SerialChannel {
    port: Box<dyn SerialPort>,
    timeout_ms: u64,
}

impl SerialChannel {
    /// Open `path` at `baud_rate`. `timeout_ms` becomes the initial per-byte
    /// read timeout.
    pub fn open(path: &str, baud_rate: u32, timeout_ms: u64) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::Even)
            .stop_bits(StopBits::Two)
            .flow_control(FlowControl::None)
            .timeout(ms(timeout_ms))
            .open()?;
        debug!("opened {} at {} baud (8E2)", path, baud_rate);
        Ok(Self { port, timeout_ms })
    }

    /// Close the port. Dropping the channel has the same effect.
    pub fn close(self) {
        drop(self.port);
    }
}

impl ByteChannel for SerialChannel {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_byte(&mut self, timeout_ms: u64) -> Result<Option<u8>> {
        if timeout_ms != self.timeout_ms {
            self.port.set_timeout(ms(timeout_ms))?;
            self.timeout_ms = timeout_ms;
        }
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_control_line(&mut self, line: ControlLine, level: bool) -> Result<()> {
        match line {
            ControlLine::Rts => self.port.write_request_to_send(level)?,
            ControlLine::Dtr => self.port.write_data_terminal_ready(level)?,
        }
        Ok(())
    }

    fn clear_input(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }
}
