//! Checkpoint store: the persistence boundary for [`GameConfig`].
//!
//! The store owns the storage collaborator and is its only writer. It reads
//! and writes the whole image described in [`crate::codec`]; individual fields
//! never leak out as raw bytes.

use crate::codec;
use crate::config::LockboxConfig;
use crate::env::{Storage, StorageError};
use crate::error::{ErrorSeverity, LockboxError};
use crate::state::GameConfig;

/// Errors surfaced by the checkpoint store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("storage too small: need {required} bytes, device has {capacity}")]
    TooSmall { required: usize, capacity: usize },

    #[error("image truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("corrupted configuration: {0}")]
    Corrupted(String),
}

impl LockboxError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(inner) => inner.error_code(),
            Self::TooSmall { .. } => "STORE_TOO_SMALL",
            Self::Truncated { .. } => "STORE_TRUNCATED",
            Self::Corrupted(_) => "STORE_CORRUPTED",
        }
    }
}

/// Reads and writes the game configuration image at address 0.
#[derive(Debug)]
pub struct CheckpointStore<S> {
    storage: S,
}

impl<S: Storage> CheckpointStore<S> {
    /// Wrap `storage`, which must hold the five-checkpoint footprint.
    pub fn new(storage: S) -> Result<Self, StoreError> {
        let capacity = storage.capacity();
        if capacity < LockboxConfig::STORAGE_FOOTPRINT {
            return Err(StoreError::TooSmall {
                required: LockboxConfig::STORAGE_FOOTPRINT,
                capacity,
            });
        }
        Ok(Self { storage })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Hydrate the configuration. `None` means the device is unconfigured.
    pub fn load(&self) -> Result<Option<GameConfig>, StoreError> {
        let count_byte = self.storage.read_byte(LockboxConfig::ADDR_CHECKPOINT_COUNT)?;
        let Some(len) = codec::image_len(count_byte)? else {
            tracing::debug!("storage holds no configuration");
            return Ok(None);
        };

        let mut image = [0u8; LockboxConfig::STORAGE_FOOTPRINT];
        self.storage.read_into(0, &mut image[..len])?;
        let config = codec::decode_config(&image[..len])?;

        if let Some(config) = &config {
            tracing::debug!(
                "loaded configuration: {} checkpoints, at checkpoint {}, extended={}",
                config.checkpoint_count(),
                config.current_point_number(),
                config.is_time_extended()
            );
        }
        Ok(config)
    }

    /// Persist the full configuration.
    ///
    /// Bytes that already hold the right value are not rewritten, so saving
    /// an unchanged configuration touches nothing.
    pub fn save(&mut self, config: &GameConfig) -> Result<(), StoreError> {
        let image = codec::encode_config(config);
        self.storage.update_from(0, &image)?;
        self.storage.flush()?;
        tracing::debug!("saved configuration image ({} bytes)", image.len());
        Ok(())
    }

    /// Zero the whole lockbox region.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.storage.update_from(0, &[0u8; LockboxConfig::STORAGE_FOOTPRINT])?;
        self.storage.flush()?;
        tracing::info!("configuration storage reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryStorage;
    use crate::state::{Checkpoint, Location, Timestamp};

    fn store() -> CheckpointStore<MemoryStorage> {
        CheckpointStore::new(MemoryStorage::new(1024)).unwrap()
    }

    fn config(count: u32) -> GameConfig {
        let checkpoints = (0..count).map(|i| {
            let location = Location::new(i as i32 + 1, -(i as i32) - 1);
            Checkpoint::new(location, Timestamp(2_000 + i), 60)
        });
        GameConfig::new(Timestamp(1_000), checkpoints).unwrap()
    }

    #[test]
    fn rejects_undersized_storage() {
        let err = CheckpointStore::new(MemoryStorage::new(86)).unwrap_err();
        assert_eq!(
            err,
            StoreError::TooSmall {
                required: 87,
                capacity: 86
            }
        );
    }

    #[test]
    fn blank_storage_loads_as_unconfigured() {
        assert_eq!(store().load().unwrap(), None);
        let erased = CheckpointStore::new(MemoryStorage::filled(87, 0xFF)).unwrap();
        assert_eq!(erased.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_restores_configuration() {
        let mut store = store();
        let saved = config(5);
        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), Some(saved));
    }

    #[test]
    fn saving_twice_writes_nothing_new() {
        let mut store = store();
        let saved = config(3);
        store.save(&saved).unwrap();
        let writes = store.storage().write_count();

        store.save(&saved).unwrap();
        assert_eq!(store.storage().write_count(), writes);
    }

    #[test]
    fn footprint_is_sized_to_count() {
        let mut store = store();
        store.save(&config(2)).unwrap();
        let bytes = store.storage().as_bytes();
        assert_ne!(&bytes[7..39], &[0u8; 32]);
        assert!(bytes[39..].iter().all(|&b| b == 0));
    }

    #[test]
    fn reset_zeroes_region_and_unconfigures() {
        let mut store = store();
        store.save(&config(5)).unwrap();
        store.reset().unwrap();
        assert!(store.storage().as_bytes()[..87].iter().all(|&b| b == 0));
        assert_eq!(store.load().unwrap(), None);
    }
}
