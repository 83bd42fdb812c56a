//! Composition root: builds collaborators from [`ClientConfig`].

use anyhow::{Context, Result};
use lockbox_core::{CheckpointStore, GameSession};
use lockbox_runtime::{FileStorage, LockController, OffsetClock};

use crate::config::ClientConfig;

pub type Store = CheckpointStore<FileStorage>;
pub type Session = GameSession<FileStorage>;
pub type Controller = LockController<FileStorage, OffsetClock>;

pub struct App {
    config: ClientConfig,
}

impl App {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn open_store(&self) -> Result<Store> {
        let path = &self.config.eeprom_path;
        let storage = FileStorage::open(path, self.config.eeprom_capacity)
            .with_context(|| format!("Failed to open EEPROM image: {}", path.display()))?;
        Ok(CheckpointStore::new(storage)?)
    }

    pub fn open_clock(&self) -> Result<OffsetClock> {
        let path = &self.config.clock_path;
        OffsetClock::open(path)
            .with_context(|| format!("Failed to open RTC offset file: {}", path.display()))
    }

    /// The configured game, or an error telling the operator to run setup.
    pub fn open_session(&self) -> Result<Session> {
        GameSession::open(self.open_store()?)
            .context("Failed to read the stored game")?
            .context("No game configured; run `lockbox setup` first")
    }

    pub fn controller(&self) -> Result<Controller> {
        Ok(LockController::new(
            self.open_session()?,
            self.open_clock()?,
            self.config.lockbox.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockbox_core::{Checkpoint, GameConfig, Location, Timestamp};
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        App::new(ClientConfig {
            eeprom_path: dir.path().join("eeprom.bin"),
            clock_path: dir.path().join("rtc_offset"),
            log_dir: dir.path().join("logs"),
            ..ClientConfig::default()
        })
    }

    #[test]
    fn unconfigured_image_asks_for_setup() {
        let dir = TempDir::new().unwrap();
        let err = app(&dir).open_session().unwrap_err();
        assert!(err.to_string().contains("lockbox setup"));
    }

    #[test]
    fn stored_game_opens_with_controller() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let game = GameConfig::new(
            Timestamp(1_000),
            [Checkpoint::new(Location::ORIGIN, Timestamp(2_000), 60)],
        )
        .unwrap();
        GameSession::create(app.open_store().unwrap(), game.clone()).unwrap();

        let controller = app.controller().unwrap();
        assert_eq!(controller.session().config(), &game);
        assert_eq!(controller.clock().offset_secs(), 0);
    }
}
