use arrayvec::ArrayVec;

use crate::config::LockboxConfig;
use crate::state::{Checkpoint, ConfigError, Timestamp};

/// Ordered checkpoint run, sized to the configured count.
pub type Checkpoints = ArrayVec<Checkpoint, { LockboxConfig::MAX_CHECKPOINTS }>;

/// Whole-game configuration and progress.
///
/// Invariants:
/// - `1 <= checkpoint_count <= MAX_CHECKPOINTS`
/// - `current_index < checkpoint_count`, and it never decreases
/// - sequence order is visit order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GameConfigRecord"))]
pub struct GameConfig {
    game_start: Timestamp,
    checkpoints: Checkpoints,
    current_index: u8,
    time_extended: bool,
}

impl GameConfig {
    /// Fresh game: progress at the first checkpoint, no extension used.
    pub fn new(
        game_start: Timestamp,
        checkpoints: impl IntoIterator<Item = Checkpoint>,
    ) -> Result<Self, ConfigError> {
        Self::restore(game_start, checkpoints, 0, false)
    }

    /// Game with explicit progress, as read back from storage.
    pub fn restore(
        game_start: Timestamp,
        checkpoints: impl IntoIterator<Item = Checkpoint>,
        current_index: usize,
        time_extended: bool,
    ) -> Result<Self, ConfigError> {
        let mut collected = Checkpoints::new();
        let mut requested = 0usize;
        for checkpoint in checkpoints {
            requested += 1;
            // Keep counting past capacity so the error reports the real size.
            let _ = collected.try_push(checkpoint);
        }

        if requested == 0 {
            return Err(ConfigError::NoCheckpoints);
        }
        if requested > LockboxConfig::MAX_CHECKPOINTS {
            return Err(ConfigError::TooManyCheckpoints {
                max: LockboxConfig::MAX_CHECKPOINTS,
                requested,
            });
        }
        if current_index >= collected.len() {
            return Err(ConfigError::IndexOutOfRange {
                index: current_index,
                count: collected.len(),
            });
        }

        Ok(Self {
            game_start,
            checkpoints: collected,
            current_index: current_index as u8,
            time_extended,
        })
    }

    pub const fn game_start(&self) -> Timestamp {
        self.game_start
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    pub const fn current_index(&self) -> usize {
        self.current_index as usize
    }

    /// 1-based number of the active checkpoint, for display.
    pub const fn current_point_number(&self) -> usize {
        self.current_index as usize + 1
    }

    pub const fn is_time_extended(&self) -> bool {
        self.time_extended
    }

    pub fn current_checkpoint(&self) -> &Checkpoint {
        &self.checkpoints[self.current_index()]
    }

    /// Whether the active checkpoint is the last one (the unlock stage).
    pub fn is_final_checkpoint(&self) -> bool {
        self.current_index() == self.checkpoint_count() - 1
    }

    /// Move progress to the next checkpoint.
    ///
    /// Returns `false` and leaves the state untouched at the final checkpoint.
    pub fn advance(&mut self) -> bool {
        if self.is_final_checkpoint() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Grant the one-time extension of `duration_secs`.
    ///
    /// The game start moves only if the game has not started yet. Every
    /// checkpoint from the active one onwards has its close moved, and its
    /// opening too when `before_window_open` is set. Completed checkpoints are
    /// left alone.
    ///
    /// Returns `false` without touching anything if the extension was already
    /// used.
    pub fn extend_time(
        &mut self,
        duration_secs: u32,
        game_start_reached: bool,
        before_window_open: bool,
    ) -> bool {
        if self.time_extended {
            return false;
        }
        if !game_start_reached {
            self.game_start = self.game_start.saturating_add(duration_secs);
        }
        let from = self.current_index();
        for checkpoint in &mut self.checkpoints[from..] {
            checkpoint.shift(duration_secs, before_window_open);
        }
        self.time_extended = true;
        true
    }
}

/// Unchecked wire form of [`GameConfig`]; deserialized documents go through
/// [`GameConfig::restore`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GameConfigRecord {
    game_start: Timestamp,
    checkpoints: Vec<Checkpoint>,
    current_index: usize,
    time_extended: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<GameConfigRecord> for GameConfig {
    type Error = ConfigError;

    fn try_from(record: GameConfigRecord) -> Result<Self, Self::Error> {
        Self::restore(
            record.game_start,
            record.checkpoints,
            record.current_index,
            record.time_extended,
        )
    }
}
