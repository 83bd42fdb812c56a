//! Lock control loop.
//!
//! Each call to [`LockController::poll`] is one iteration of the loop the
//! firmware runs: read the clock, compare against the active checkpoint and,
//! when the window is open and the GPS fix is close enough, either reveal the
//! next hint or unlock.

use std::fmt;

use lockbox_core::{
    CheckpointPhase, Clock, GameSession, Location, LockboxConfig, Storage, TimeSpan, Timestamp,
};
use serde::Serialize;

use crate::error::Result;

/// Outcome of one control-loop step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The game has not started yet.
    AwaitingGameStart { remaining: TimeSpan },
    /// The hint for `point` is out; its window opens in `remaining`.
    AwaitingWindow {
        point: usize,
        location: Location,
        remaining: TimeSpan,
    },
    /// The final checkpoint was reached in time.
    Unlock,
    /// Checkpoint reached; the hint for `point` is now active.
    HintRevealed { point: usize, location: Location },
    /// Window open, but the fix is too far from the checkpoint.
    OutOfRange { distance_m: f64 },
    /// Window open, but no GPS fix is available.
    NoFix,
    /// The active window closed before the checkpoint was reached.
    Expired,
}

impl Verdict {
    pub fn is_unlock(&self) -> bool {
        matches!(self, Self::Unlock)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingGameStart { remaining } => write!(f, "Game starts in {remaining}."),
            Self::AwaitingWindow {
                point,
                location,
                remaining,
            } => write!(f, "Point {point} at {location}; window opens in {remaining}."),
            Self::Unlock => write!(f, "Unlocked."),
            Self::HintRevealed { point, location } => {
                write!(f, "Checkpoint reached. Point {point} is at {location}.")
            }
            Self::OutOfRange { distance_m } => {
                write!(f, "Window open; {distance_m:.0} m from the checkpoint.")
            }
            Self::NoFix => write!(f, "Window open; waiting for a GPS fix."),
            Self::Expired => write!(f, "Window closed."),
        }
    }
}

/// Snapshot of the game for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LockStatus {
    pub now: Timestamp,
    pub phase: CheckpointPhase,
    pub point: usize,
    pub total_points: usize,
    pub is_final: bool,
    pub game_start: Timestamp,
    pub location: Location,
    pub window_open: Timestamp,
    pub window_close: Timestamp,
    pub time_extended: bool,
}

pub struct LockController<S, C> {
    session: GameSession<S>,
    clock: C,
    config: LockboxConfig,
}

impl<S: Storage, C: Clock> LockController<S, C> {
    pub fn new(session: GameSession<S>, clock: C, config: LockboxConfig) -> Self {
        Self {
            session,
            clock,
            config,
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_session(self) -> GameSession<S> {
        self.session
    }

    /// Evaluate one step against the current clock and `fix`.
    pub fn poll(&mut self, fix: Option<Location>) -> Result<Verdict> {
        let now = self.clock.now()?;
        let game = self.session.config();
        let checkpoint = *game.current_checkpoint();

        let verdict = match game.phase(now) {
            CheckpointPhase::AwaitingGameStart => Verdict::AwaitingGameStart {
                remaining: game.time_until_game_start(now),
            },
            CheckpointPhase::AwaitingWindow => Verdict::AwaitingWindow {
                point: game.current_point_number(),
                location: checkpoint.location(),
                remaining: game.time_until_window_opens(now),
            },
            CheckpointPhase::WindowExpired => Verdict::Expired,
            CheckpointPhase::WindowOpen => {
                if self.config.require_gps {
                    let Some(fix) = fix else {
                        return Ok(Verdict::NoFix);
                    };
                    let distance_m = fix.distance_m(&checkpoint.location());
                    if distance_m > self.config.unlock_radius_m {
                        tracing::debug!("fix {} is {:.0} m from checkpoint", fix, distance_m);
                        return Ok(Verdict::OutOfRange { distance_m });
                    }
                }

                if self.session.is_final_checkpoint() {
                    tracing::info!("final checkpoint reached at {}; unlocking", now);
                    Verdict::Unlock
                } else {
                    self.session.advance()?;
                    Verdict::HintRevealed {
                        point: self.session.current_point_number(),
                        location: self.session.current_checkpoint().location(),
                    }
                }
            }
        };
        Ok(verdict)
    }

    /// Use the one-time extension with an explicit length.
    ///
    /// Whether the game has started and whether the active window has opened
    /// are read from the clock. Returns `false` if the extension was used
    /// before.
    pub fn extend(&mut self, duration_secs: u32) -> Result<bool> {
        let now = self.clock.now()?;
        let game = self.session.config();
        let game_start_reached = game.is_game_start_reached(now);
        let before_window_open = !game.has_window_opened(now);

        Ok(self
            .session
            .extend_time(duration_secs, game_start_reached, before_window_open)?)
    }

    /// Use the one-time extension with the configured length.
    pub fn extend_default(&mut self) -> Result<bool> {
        self.extend(self.config.extension_secs)
    }

    pub fn status(&self) -> Result<LockStatus> {
        let now = self.clock.now()?;
        let game = self.session.config();
        let checkpoint = game.current_checkpoint();

        Ok(LockStatus {
            now,
            phase: game.phase(now),
            point: game.current_point_number(),
            total_points: game.checkpoint_count(),
            is_final: game.is_final_checkpoint(),
            game_start: game.game_start(),
            location: checkpoint.location(),
            window_open: checkpoint.window_open(),
            window_close: checkpoint.window_close(),
            time_extended: game.is_time_extended(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockbox_core::{Checkpoint, CheckpointStore, FixedClock, GameConfig, MemoryStorage};

    const START: u32 = 1_906_545_600;
    const FIRST_OPEN: u32 = START + 900;
    const SECOND_OPEN: u32 = START + 3_600;

    fn first() -> Location {
        Location::new(121_234_567, -109_876_543)
    }

    fn second() -> Location {
        Location::new(130_000_000, -110_000_000)
    }

    fn controller(now: u32, config: LockboxConfig) -> LockController<MemoryStorage, FixedClock> {
        let game = GameConfig::new(
            Timestamp(START),
            [
                Checkpoint::new(first(), Timestamp(FIRST_OPEN), 900),
                Checkpoint::new(second(), Timestamp(SECOND_OPEN), 1_800),
            ],
        )
        .unwrap();
        let store = CheckpointStore::new(MemoryStorage::new(128)).unwrap();
        let session = GameSession::create(store, game).unwrap();
        LockController::new(session, FixedClock::new(Timestamp(now)), config)
    }

    #[test]
    fn waits_for_game_start_then_window() {
        let mut lock = controller(START - 60, LockboxConfig::default());
        assert_eq!(
            lock.poll(None).unwrap(),
            Verdict::AwaitingGameStart {
                remaining: TimeSpan::from_secs(60)
            }
        );

        lock.clock_mut().advance_by(60);
        assert_eq!(
            lock.poll(None).unwrap(),
            Verdict::AwaitingWindow {
                point: 1,
                location: first(),
                remaining: TimeSpan::from_secs(900)
            }
        );
    }

    #[test]
    fn open_window_needs_a_nearby_fix() {
        let mut lock = controller(FIRST_OPEN, LockboxConfig::default());
        assert_eq!(lock.poll(None).unwrap(), Verdict::NoFix);

        let far = Location::new(121_334_567, -109_876_543);
        match lock.poll(Some(far)).unwrap() {
            Verdict::OutOfRange { distance_m } => assert!(distance_m > 1_000.0),
            other => panic!("unexpected verdict {other:?}"),
        }
        assert_eq!(lock.session().current_point_number(), 1);
    }

    #[test]
    fn reaching_a_checkpoint_reveals_the_next_hint() {
        let mut lock = controller(FIRST_OPEN + 10, LockboxConfig::default());
        assert_eq!(
            lock.poll(Some(first())).unwrap(),
            Verdict::HintRevealed {
                point: 2,
                location: second()
            }
        );
        assert!(lock.session().is_final_checkpoint());

        assert!(matches!(
            lock.poll(Some(first())).unwrap(),
            Verdict::AwaitingWindow { point: 2, .. }
        ));
    }

    #[test]
    fn final_checkpoint_unlocks_without_advancing() {
        let mut lock = controller(FIRST_OPEN, LockboxConfig::default());
        lock.poll(Some(first())).unwrap();

        lock.clock_mut().set_now(Timestamp(SECOND_OPEN)).unwrap();
        assert!(lock.poll(Some(second())).unwrap().is_unlock());
        assert!(lock.poll(Some(second())).unwrap().is_unlock());
        assert_eq!(lock.session().current_point_number(), 2);
    }

    #[test]
    fn gps_can_be_disabled() {
        let config = LockboxConfig {
            require_gps: false,
            ..LockboxConfig::default()
        };
        let mut lock = controller(FIRST_OPEN, config);
        assert!(matches!(
            lock.poll(None).unwrap(),
            Verdict::HintRevealed { point: 2, .. }
        ));
    }

    #[test]
    fn closed_window_expires() {
        let mut lock = controller(FIRST_OPEN + 900, LockboxConfig::default());
        assert_eq!(lock.poll(Some(first())).unwrap(), Verdict::Expired);
    }

    #[test]
    fn extension_reopens_an_expired_window_once() {
        let mut lock = controller(FIRST_OPEN + 900, LockboxConfig::default());

        assert!(lock.extend_default().unwrap());
        let status = lock.status().unwrap();
        assert!(status.time_extended);
        assert_eq!(status.game_start, Timestamp(START));
        assert_eq!(status.window_open, Timestamp(FIRST_OPEN));
        assert_eq!(status.window_close, Timestamp(FIRST_OPEN + 900 + 1_800));
        assert_eq!(status.phase, CheckpointPhase::WindowOpen);

        assert!(!lock.extend(600).unwrap());
        assert_eq!(lock.status().unwrap().window_close, status.window_close);
    }

    #[test]
    fn extension_before_start_moves_everything() {
        let mut lock = controller(START - 10, LockboxConfig::default());
        assert!(lock.extend(600).unwrap());

        let status = lock.status().unwrap();
        assert_eq!(status.game_start, Timestamp(START + 600));
        assert_eq!(status.window_open, Timestamp(FIRST_OPEN + 600));
        assert_eq!(status.window_close, Timestamp(FIRST_OPEN + 900 + 600));
    }

    #[test]
    fn verdicts_read_as_sentences() {
        let verdict = Verdict::AwaitingGameStart {
            remaining: TimeSpan::from_secs(90_061),
        };
        assert_eq!(verdict.to_string(), "Game starts in 1d 01:01:01.");
        assert_eq!(
            Verdict::OutOfRange { distance_m: 1234.4 }.to_string(),
            "Window open; 1234 m from the checkpoint."
        );
    }

    #[test]
    fn verdicts_serialize_with_a_tag() {
        let json = serde_json::to_value(Verdict::Expired).unwrap();
        assert_eq!(json["verdict"], "expired");

        let json = serde_json::to_value(Verdict::OutOfRange { distance_m: 12.5 }).unwrap();
        assert_eq!(json["verdict"], "out_of_range");
        assert_eq!(json["distance_m"], 12.5);
    }
}
