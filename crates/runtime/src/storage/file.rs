//! EEPROM image kept in a file.

use std::fs;
use std::path::{Path, PathBuf};

use lockbox_core::{Storage, StorageError};

use crate::error::{Result, RuntimeError};
use crate::storage::write_atomic;

/// File-backed EEPROM.
///
/// The whole image is held in memory. `update_byte` only touches bytes that
/// change and marks the image dirty; `flush` writes it back with a temp file
/// and an atomic rename, so a crash never leaves a half-written image.
///
/// A missing file is created erased (every byte `0xFF`), like a fresh chip.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    image: Vec<u8>,
    dirty: bool,
}

impl FileStorage {
    /// EEPROM size of the ATmega328P.
    pub const DEFAULT_CAPACITY: usize = 1024;

    /// Open the image at `path`, creating an erased one if it does not exist.
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let image = fs::read(&path)?;
            if image.len() != capacity {
                return Err(RuntimeError::ImageSize {
                    path,
                    expected: capacity,
                    actual: image.len(),
                });
            }
            tracing::debug!("Loaded EEPROM image from {}", path.display());
            return Ok(Self {
                path,
                image,
                dirty: false,
            });
        }

        let image = vec![0xFF; capacity];
        write_atomic(&path, &image)?;
        tracing::info!("Created erased EEPROM image at {}", path.display());
        Ok(Self {
            path,
            image,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are updates not yet flushed to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.image
    }

    fn out_of_bounds(&self, address: usize) -> StorageError {
        StorageError::OutOfBounds {
            address,
            capacity: self.image.len(),
        }
    }
}

impl Storage for FileStorage {
    fn capacity(&self) -> usize {
        self.image.len()
    }

    fn read_byte(&self, address: usize) -> std::result::Result<u8, StorageError> {
        self.image
            .get(address)
            .copied()
            .ok_or_else(|| self.out_of_bounds(address))
    }

    fn update_byte(&mut self, address: usize, value: u8) -> std::result::Result<(), StorageError> {
        let capacity = self.image.len();
        let slot = self.image.get_mut(address).ok_or(StorageError::OutOfBounds {
            address,
            capacity,
        })?;
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> std::result::Result<(), StorageError> {
        if !self.dirty {
            return Ok(());
        }
        write_atomic(&self.path, &self.image).map_err(|e| StorageError::Io(e.to_string()))?;
        self.dirty = false;
        tracing::debug!("Flushed EEPROM image to {}", self.path.display());
        Ok(())
    }
}
