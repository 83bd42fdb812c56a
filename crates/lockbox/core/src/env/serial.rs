//! Serial console collaborator.

use std::collections::VecDeque;

use crate::error::{ErrorSeverity, LockboxError};

/// Errors raised by serial transports.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SerialError {
    /// The other end went away; no more input will arrive.
    #[error("serial port closed")]
    Closed,

    /// The transport failed to read or write.
    #[error("serial I/O failure: {0}")]
    Io(String),
}

impl LockboxError for SerialError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Closed => "SERIAL_CLOSED",
            Self::Io(_) => "SERIAL_IO",
        }
    }
}

/// Byte-oriented serial transport.
pub trait SerialPort {
    /// Whether a byte can be read without blocking.
    fn byte_available(&mut self) -> Result<bool, SerialError>;

    /// Read one byte. Only called after `byte_available` returned `true`.
    fn read_byte(&mut self) -> Result<u8, SerialError>;

    /// Write raw bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError>;

    /// Write a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        self.write(&[byte])
    }
}

impl<P: SerialPort + ?Sized> SerialPort for &mut P {
    fn byte_available(&mut self) -> Result<bool, SerialError> {
        (**self).byte_available()
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        (**self).read_byte()
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        (**self).write(bytes)
    }
}

/// Serial port that replays a script one line at a time.
///
/// The script is split after every `\r`. A line only arrives once a poll has
/// found the port empty, the way an operator answers after reading a prompt,
/// so bytes drained before a prompt never include the answer to it. Bytes
/// given to [`ScriptedSerial::type_ahead`] are waiting immediately.
///
/// Once the script runs dry the port reports [`SerialError::Closed`], so a
/// reader waiting for more input fails instead of spinning forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSerial {
    lines: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    polled_empty: bool,
    output: Vec<u8>,
}

impl ScriptedSerial {
    pub fn new(script: impl AsRef<[u8]>) -> Self {
        let lines = script
            .as_ref()
            .split_inclusive(|&byte| byte == b'\r')
            .map(<[u8]>::to_vec)
            .collect();
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Queue bytes that are already waiting before the next read.
    pub fn type_ahead(&mut self, bytes: impl AsRef<[u8]>) {
        self.pending.extend(bytes.as_ref());
    }

    /// Bytes of the script not yet consumed.
    pub fn remaining(&self) -> usize {
        self.pending.len() + self.lines.iter().map(Vec::len).sum::<usize>()
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl SerialPort for ScriptedSerial {
    fn byte_available(&mut self) -> Result<bool, SerialError> {
        if !self.pending.is_empty() {
            return Ok(true);
        }
        if !self.polled_empty {
            self.polled_empty = true;
            return Ok(false);
        }
        let line = self.lines.pop_front().ok_or(SerialError::Closed)?;
        self.pending.extend(line);
        self.polled_empty = false;
        Ok(true)
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        self.pending.pop_front().ok_or(SerialError::Closed)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}
