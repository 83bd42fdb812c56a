//! Progression API used by the lock-control loop.
//!
//! [`GameSession`] pairs the owned [`GameConfig`] with the [`CheckpointStore`]
//! it came from. Every mutation goes through the pure transition on the
//! config and is then persisted; a failed save leaves the in-memory state
//! ahead of storage and is reported to the caller.

use crate::env::Storage;
use crate::state::{Checkpoint, GameConfig, Timestamp};
use crate::store::{CheckpointStore, StoreError};

/// A configured game bound to its persistent storage.
#[derive(Debug)]
pub struct GameSession<S> {
    store: CheckpointStore<S>,
    config: GameConfig,
}

impl<S: Storage> GameSession<S> {
    /// Restore the session persisted in `store`, if the device is configured.
    pub fn open(store: CheckpointStore<S>) -> Result<Option<Self>, StoreError> {
        Ok(store.load()?.map(|config| Self { store, config }))
    }

    /// Start a session with a new configuration, overwriting storage.
    pub fn create(mut store: CheckpointStore<S>, config: GameConfig) -> Result<Self, StoreError> {
        store.save(&config)?;
        tracing::info!(
            "configuration committed: {} checkpoints, game starts {}",
            config.checkpoint_count(),
            config.game_start()
        );
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &CheckpointStore<S> {
        &self.store
    }

    pub fn game_start(&self) -> Timestamp {
        self.config.game_start()
    }

    pub fn current_checkpoint(&self) -> &Checkpoint {
        self.config.current_checkpoint()
    }

    /// 1-based number of the active checkpoint.
    pub fn current_point_number(&self) -> usize {
        self.config.current_point_number()
    }

    pub fn total_points(&self) -> usize {
        self.config.checkpoint_count()
    }

    pub fn is_final_checkpoint(&self) -> bool {
        self.config.is_final_checkpoint()
    }

    pub fn is_time_extended(&self) -> bool {
        self.config.is_time_extended()
    }

    /// Move to the next checkpoint and persist.
    ///
    /// Returns `Ok(false)` without writing anything at the final checkpoint.
    pub fn advance(&mut self) -> Result<bool, StoreError> {
        if !self.config.advance() {
            tracing::debug!("advance ignored at final checkpoint");
            return Ok(false);
        }
        self.store.save(&self.config)?;
        tracing::info!(
            "progressed to checkpoint {}/{}",
            self.config.current_point_number(),
            self.config.checkpoint_count()
        );
        Ok(true)
    }

    /// Apply the one-time extension and persist.
    ///
    /// Returns `Ok(false)` without writing anything once the extension has
    /// been used.
    pub fn extend_time(
        &mut self,
        duration_secs: u32,
        game_start_reached: bool,
        before_window_open: bool,
    ) -> Result<bool, StoreError> {
        if !self
            .config
            .extend_time(duration_secs, game_start_reached, before_window_open)
        {
            tracing::debug!("time extension already used");
            return Ok(false);
        }
        self.store.save(&self.config)?;
        tracing::info!(
            "time extended by {}s (game started: {}, before window open: {})",
            duration_secs,
            game_start_reached,
            before_window_open
        );
        Ok(true)
    }

    /// Wipe the configuration and hand the store back.
    pub fn reset(self) -> Result<CheckpointStore<S>, StoreError> {
        let mut store = self.store;
        store.reset()?;
        Ok(store)
    }

    /// Drop the session, keeping storage as it is.
    pub fn into_store(self) -> CheckpointStore<S> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryStorage;
    use crate::state::Location;

    fn session(count: u32) -> GameSession<MemoryStorage> {
        let store = CheckpointStore::new(MemoryStorage::new(128)).unwrap();
        let checkpoints = (0..count)
            .map(|i| Checkpoint::new(Location::new(1, 2), Timestamp(10_000 + i * 1_000), 300));
        GameSession::create(store, GameConfig::new(Timestamp(5_000), checkpoints).unwrap())
            .unwrap()
    }

    fn reopen(session: GameSession<MemoryStorage>) -> GameSession<MemoryStorage> {
        GameSession::open(session.into_store()).unwrap().unwrap()
    }

    #[test]
    fn advance_is_persisted() {
        let mut game = session(3);
        assert!(game.advance().unwrap());
        let game = reopen(game);
        assert_eq!(game.current_point_number(), 2);
    }

    #[test]
    fn advance_at_terminal_writes_nothing() {
        let mut game = session(2);
        game.advance().unwrap();
        let writes = game.store().storage().write_count();

        assert!(!game.advance().unwrap());
        assert!(!game.advance().unwrap());
        assert_eq!(game.store().storage().write_count(), writes);
        assert_eq!(game.config().current_index(), 1);
    }

    #[test]
    fn two_checkpoints_one_advance_is_final() {
        let mut game = session(2);
        assert!(!game.is_final_checkpoint());
        game.advance().unwrap();
        assert!(game.is_final_checkpoint());
        game.advance().unwrap();
        assert_eq!(game.current_point_number(), 2);
    }

    #[test]
    fn extension_is_persisted_once() {
        let mut game = session(2);
        assert!(game.extend_time(600, false, true).unwrap());
        assert!(!game.extend_time(60, true, false).unwrap());

        let game = reopen(game);
        assert!(game.is_time_extended());
        assert_eq!(game.game_start(), Timestamp(5_600));
        assert_eq!(game.current_checkpoint().window_open(), Timestamp(10_600));
        assert_eq!(game.current_checkpoint().window_close(), Timestamp(10_900));
    }

    #[test]
    fn reset_unconfigures_storage() {
        let store = session(4).reset().unwrap();
        assert!(GameSession::open(store).unwrap().is_none());
    }
}
