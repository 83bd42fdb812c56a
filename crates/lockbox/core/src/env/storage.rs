//! Byte-addressed non-volatile storage (EEPROM-like).

use crate::error::{ErrorSeverity, LockboxError};

/// Errors raised by storage collaborators.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Address lies outside the device.
    #[error("address {address} is outside storage of {capacity} bytes")]
    OutOfBounds { address: usize, capacity: usize },

    /// The backing medium failed to read or write.
    #[error("storage I/O failure: {0}")]
    Io(String),
}

impl LockboxError for StorageError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "STORAGE_OUT_OF_BOUNDS",
            Self::Io(_) => "STORAGE_IO",
        }
    }
}

/// Byte storage with write-if-different semantics.
///
/// `update_byte` must leave the cell untouched when it already holds `value`,
/// so rewriting an identical image is idempotent and spares write cycles.
pub trait Storage {
    /// Total number of addressable bytes.
    fn capacity(&self) -> usize;

    /// Read the byte at `address`.
    fn read_byte(&self, address: usize) -> Result<u8, StorageError>;

    /// Write `value` at `address` only if it differs from the stored byte.
    fn update_byte(&mut self, address: usize, value: u8) -> Result<(), StorageError>;

    /// Commit pending writes to the medium.
    ///
    /// Devices that write through (EEPROM) have nothing to do.
    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    /// Read `buf.len()` bytes starting at `address`.
    fn read_into(&self, address: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        for (offset, slot) in buf.iter_mut().enumerate() {
            *slot = self.read_byte(address + offset)?;
        }
        Ok(())
    }

    /// Update `bytes.len()` bytes starting at `address`.
    fn update_from(&mut self, address: usize, bytes: &[u8]) -> Result<(), StorageError> {
        for (offset, byte) in bytes.iter().enumerate() {
            self.update_byte(address + offset, *byte)?;
        }
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read_byte(&self, address: usize) -> Result<u8, StorageError> {
        (**self).read_byte(address)
    }

    fn update_byte(&mut self, address: usize, value: u8) -> Result<(), StorageError> {
        (**self).update_byte(address, value)
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        (**self).flush()
    }
}

/// In-memory storage, zero-filled on creation.
///
/// Counts physical writes so callers can observe the write-if-different
/// behaviour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryStorage {
    bytes: Vec<u8>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new(capacity: usize) -> Self {
        Self::filled(capacity, 0)
    }

    /// Storage with every cell set to `value` (0xFF mimics erased EEPROM).
    pub fn filled(capacity: usize, value: u8) -> Self {
        Self {
            bytes: vec![value; capacity],
            writes: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes physically changed since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn check(&self, address: usize) -> Result<(), StorageError> {
        if address < self.bytes.len() {
            Ok(())
        } else {
            Err(StorageError::OutOfBounds {
                address,
                capacity: self.bytes.len(),
            })
        }
    }
}

impl Storage for MemoryStorage {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read_byte(&self, address: usize) -> Result<u8, StorageError> {
        self.check(address)?;
        Ok(self.bytes[address])
    }

    fn update_byte(&mut self, address: usize, value: u8) -> Result<(), StorageError> {
        self.check(address)?;
        if self.bytes[address] != value {
            self.bytes[address] = value;
            self.writes += 1;
        }
        Ok(())
    }
}
