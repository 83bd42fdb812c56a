//! Serial port over host byte streams.

use std::io::{self, ErrorKind, Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use lockbox_core::{SerialError, SerialPort};

use crate::error::Result;

/// How long `byte_available` waits for input before answering `false`.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Console serial port backed by a reader thread.
///
/// A background thread reads the input stream and feeds a channel, so
/// `byte_available` never blocks for long. Line feeds are translated to the
/// carriage return the console protocol uses; a CR LF pair yields one CR.
/// Output goes straight to the writer and is flushed on every write.
pub struct StdioSerial<W = io::Stdout> {
    rx: Receiver<u8>,
    pending: Option<u8>,
    writer: W,
}

impl StdioSerial {
    /// Serial port on the process's stdin and stdout.
    pub fn stdio() -> Result<Self> {
        Self::spawn(io::stdin(), io::stdout())
    }
}

impl<W: Write> StdioSerial<W> {
    pub fn spawn<R: Read + Send + 'static>(reader: R, writer: W) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("serial-reader".to_string())
            .spawn(move || pump(reader, tx))?;
        Ok(Self {
            rx,
            pending: None,
            writer,
        })
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

fn pump<R: Read>(mut reader: R, tx: Sender<u8>) {
    let mut buf = [0u8; 64];
    let mut after_cr = false;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!("serial input failed: {}", e);
                break;
            }
        };
        for &byte in &buf[..n] {
            let translated = match byte {
                b'\n' if after_cr => None,
                b'\n' => Some(b'\r'),
                other => Some(other),
            };
            after_cr = byte == b'\r';
            if let Some(byte) = translated
                && tx.send(byte).is_err()
            {
                return;
            }
        }
    }
    tracing::debug!("serial input closed");
}

impl<W: Write> SerialPort for StdioSerial<W> {
    fn byte_available(&mut self) -> std::result::Result<bool, SerialError> {
        if self.pending.is_some() {
            return Ok(true);
        }
        match self.rx.recv_timeout(POLL_INTERVAL) {
            Ok(byte) => {
                self.pending = Some(byte);
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => Err(SerialError::Closed),
        }
    }

    fn read_byte(&mut self) -> std::result::Result<u8, SerialError> {
        match self.pending.take() {
            Some(byte) => Ok(byte),
            None => self.rx.recv().map_err(|_| SerialError::Closed),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> std::result::Result<(), SerialError> {
        self.writer
            .write_all(bytes)
            .and_then(|()| self.writer.flush())
            .map_err(|e| SerialError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain<W: Write>(port: &mut StdioSerial<W>) -> Vec<u8> {
        let mut bytes = Vec::new();
        while let Ok(available) = port.byte_available() {
            if available {
                bytes.push(port.read_byte().unwrap());
            }
        }
        bytes
    }

    #[test]
    fn line_endings_become_carriage_returns() {
        let input = Cursor::new(b"1\n15\r\nx\r".to_vec());
        let mut port = StdioSerial::spawn(input, Vec::new()).unwrap();

        assert_eq!(drain(&mut port), b"1\r15\rx\r");
    }

    #[test]
    fn end_of_input_closes_the_port() {
        let mut port = StdioSerial::spawn(Cursor::new(Vec::new()), Vec::new()).unwrap();

        assert_eq!(drain(&mut port), b"");
        assert_eq!(port.byte_available(), Err(SerialError::Closed));
        assert_eq!(port.read_byte(), Err(SerialError::Closed));
    }

    #[test]
    fn writes_reach_the_writer() {
        let mut port = StdioSerial::spawn(Cursor::new(Vec::new()), Vec::new()).unwrap();
        port.write(b": ").unwrap();
        port.write_byte(b'5').unwrap();

        assert_eq!(port.writer(), b": 5");
    }
}
