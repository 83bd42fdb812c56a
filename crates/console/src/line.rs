//! Line collection over a serial port.

use arrayvec::ArrayVec;
use lockbox_core::input::MAX_LINE_LEN;
use lockbox_core::{SerialError, SerialPort};

use crate::messages;

/// Collects carriage-return terminated lines into a fixed stack buffer.
///
/// The buffer is sized for the longest field and reused for every prompt.
/// Anything typed before the call is discarded, so only bytes sent after the
/// prompt make up the entry.
/// A line longer than the caller's limit is thrown away in full: the overflow
/// notice is printed, the remaining bytes up to the terminator are discarded
/// and collection starts again behind a fresh `": "` prompt.
#[derive(Debug, Default)]
pub struct LineReader {
    buffer: ArrayVec<u8, MAX_LINE_LEN>,
    echo: bool,
}

impl LineReader {
    pub fn new(echo: bool) -> Self {
        Self {
            buffer: ArrayVec::new(),
            echo,
        }
    }

    /// Discard pending input, then block until a line of at most `max_len`
    /// bytes has been entered.
    ///
    /// `\r` ends the line and is not part of it; `\n` is ignored. Limits above
    /// [`MAX_LINE_LEN`] are clamped.
    pub fn read_line<P: SerialPort>(
        &mut self,
        port: &mut P,
        max_len: usize,
    ) -> Result<&[u8], SerialError> {
        let max_len = max_len.min(MAX_LINE_LEN);
        let mut overflowed = false;
        self.buffer.clear();

        let mut discarded = 0usize;
        while port.byte_available()? {
            port.read_byte()?;
            discarded += 1;
        }
        if discarded > 0 {
            tracing::debug!("discarded {discarded} bytes of typeahead");
        }

        loop {
            if !port.byte_available()? {
                std::hint::spin_loop();
                continue;
            }

            match port.read_byte()? {
                b'\r' if overflowed => {
                    overflowed = false;
                    self.buffer.clear();
                    port.write(messages::PROMPT.as_bytes())?;
                }
                b'\r' => {
                    port.write(messages::NEWLINE.as_bytes())?;
                    return Ok(self.buffer.as_slice());
                }
                b'\n' => {}
                _ if overflowed => {}
                byte if self.buffer.len() < max_len => {
                    self.buffer.push(byte);
                    if self.echo {
                        port.write_byte(byte)?;
                    }
                }
                _ => {
                    overflowed = true;
                    tracing::debug!("discarding entry longer than {max_len} characters");
                    port.write(messages::NEWLINE.as_bytes())?;
                    port.write(messages::entry_too_long(max_len).as_bytes())?;
                    port.write(messages::NEWLINE.as_bytes())?;
                }
            }
        }
    }
}
