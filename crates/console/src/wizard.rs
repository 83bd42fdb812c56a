//! Interactive configuration wizard.
//!
//! The wizard erases any previous game, then asks for the number of
//! checkpoints, the game start and, per checkpoint, latitude, longitude,
//! window-open time and grace duration. Invalid entries are reported and the
//! field is asked again; only transport, clock or storage failures end the
//! session early.

use lockbox_core::input::{self, validate};
use lockbox_core::{
    Checkpoint, CheckpointStore, Clock, ClockError, ConfigError, ErrorSeverity, Field,
    GameConfig, GameSession, InputError, Location, LockboxError, SerialError, SerialPort,
    Storage, StoreError, Timestamp,
};

use crate::line::LineReader;
use crate::messages::{self, PointRole};

/// Presentation switches for the wizard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WizardOptions {
    /// Echo typed characters back to the terminal.
    pub echo: bool,
    /// Clear the terminal between steps.
    pub clear_screen: bool,
    /// Show the splash banner and wait for a key before starting.
    pub splash: bool,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            echo: true,
            clear_screen: true,
            splash: true,
        }
    }
}

/// Failures that end a wizard run.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("serial console failed: {0}")]
    Serial(#[from] SerialError),

    #[error("checkpoint storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("clock unavailable: {0}")]
    Clock(#[from] ClockError),

    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),
}

impl LockboxError for WizardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Serial(e) => e.severity(),
            Self::Store(e) => e.severity(),
            Self::Clock(e) => e.severity(),
            Self::Config(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Serial(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Clock(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Drives one configuration session over a serial port.
pub struct ConfigWizard<P, C> {
    port: P,
    clock: C,
    options: WizardOptions,
    reader: LineReader,
}

impl<P: SerialPort, C: Clock> ConfigWizard<P, C> {
    pub fn new(port: P, clock: C, options: WizardOptions) -> Self {
        Self {
            port,
            clock,
            options,
            reader: LineReader::new(options.echo),
        }
    }

    /// Run the full setup sequence and commit the result to `store`.
    ///
    /// The store is reset before the first prompt, so an aborted run leaves
    /// the device unconfigured rather than half-configured.
    pub fn run<S: Storage>(
        &mut self,
        mut store: CheckpointStore<S>,
    ) -> Result<GameSession<S>, WizardError> {
        store.reset()?;
        tracing::info!("configuration wizard started");

        if self.options.splash {
            self.clear_screen()?;
            self.write_lines(messages::SPLASH)?;
            self.await_key()?;
        }
        self.clear_screen()?;

        self.write_lines(messages::POINT_COUNT)?;
        let count = usize::from(self.prompt(Field::PointCount, input::read_point_count)?);
        self.clear_screen()?;

        let game_start = self.prompt_game_start()?;
        self.clear_screen()?;

        let mut checkpoints = Vec::with_capacity(count);
        for number in 1..=count {
            let role = PointRole::for_point(number, count);
            let checkpoint = self.prompt_checkpoint(role)?;
            tracing::debug!(
                "checkpoint {number}/{count}: {} open {} for {}s",
                checkpoint.location(),
                checkpoint.window_open(),
                checkpoint.grace_secs()
            );
            checkpoints.push(checkpoint);
        }

        let config = GameConfig::new(game_start, checkpoints)?;
        let session = GameSession::create(store, config)?;
        self.write_line(messages::LOCK_INSTRUCTION)?;
        Ok(session)
    }

    fn prompt_game_start(&mut self) -> Result<Timestamp, WizardError> {
        loop {
            self.write_lines(messages::GAME_START)?;
            self.write_lines(messages::TIME_FORMAT)?;
            let start = self.prompt(Field::DateTime, input::read_date_time)?;

            let now = self.clock.now()?;
            match validate::not_in_past(start, now) {
                Ok(start) => return Ok(start),
                Err(err) => self.report(&err)?,
            }
        }
    }

    fn prompt_checkpoint(&mut self, role: PointRole) -> Result<Checkpoint, WizardError> {
        self.write_line(&role.latitude_prompt())?;
        self.write_lines(messages::coordinate_format(Field::Latitude))?;
        let latitude = self.prompt(Field::Latitude, input::read_latitude)?;
        self.clear_screen()?;

        self.write_line(&role.longitude_prompt())?;
        self.write_lines(messages::coordinate_format(Field::Longitude))?;
        let longitude = self.prompt(Field::Longitude, input::read_longitude)?;
        self.clear_screen()?;

        self.write_line(role.window_open_prompt())?;
        self.write_lines(messages::TIME_FORMAT)?;
        let window_open = self.prompt(Field::DateTime, input::read_date_time)?;
        self.clear_screen()?;

        self.write_lines(messages::GRACE_WINDOW)?;
        let grace_secs = self.prompt(Field::GraceDuration, input::read_grace_secs)?;
        self.clear_screen()?;

        Ok(Checkpoint::new(
            Location::new(latitude, longitude),
            window_open,
            grace_secs,
        ))
    }

    /// Ask for `field` until `read` accepts the entry.
    fn prompt<T>(
        &mut self,
        field: Field,
        read: impl Fn(&[u8]) -> Result<T, InputError>,
    ) -> Result<T, WizardError> {
        loop {
            self.port.write(messages::PROMPT.as_bytes())?;
            let line = self.reader.read_line(&mut self.port, field.max_len())?;
            match read(line) {
                Ok(value) => return Ok(value),
                Err(err) => self.report(&err)?,
            }
        }
    }

    fn report(&mut self, err: &InputError) -> Result<(), SerialError> {
        tracing::debug!(code = err.error_code(), "entry rejected: {err}");
        self.write_line(&messages::diagnostic(err))?;
        self.port.write(messages::NEWLINE.as_bytes())
    }

    /// Wait for a key press and swallow the rest of that line.
    fn await_key(&mut self) -> Result<(), SerialError> {
        while !self.port.byte_available()? {
            std::hint::spin_loop();
        }
        while self.port.byte_available()? {
            if self.port.read_byte()? == b'\r' {
                break;
            }
        }
        Ok(())
    }

    fn clear_screen(&mut self) -> Result<(), SerialError> {
        if self.options.clear_screen {
            self.port.write(messages::CLEAR_SCREEN.as_bytes())?;
        }
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<(), SerialError> {
        self.port.write(text.as_bytes())?;
        self.port.write(messages::NEWLINE.as_bytes())
    }

    fn write_lines(&mut self, lines: &[&str]) -> Result<(), SerialError> {
        lines.iter().try_for_each(|line| self.write_line(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockbox_core::{FixedClock, MemoryStorage, ScriptedSerial};

    /// 2030-01-01T00:00:00
    const NOW: Timestamp = Timestamp(1_893_456_000);

    const QUIET: WizardOptions = WizardOptions {
        echo: false,
        clear_screen: false,
        splash: false,
    };

    fn run(
        script: &str,
        options: WizardOptions,
    ) -> (Result<GameSession<MemoryStorage>, WizardError>, String) {
        let mut port = ScriptedSerial::new(script);
        let store = CheckpointStore::new(MemoryStorage::new(128)).unwrap();
        let result = {
            let mut wizard = ConfigWizard::new(&mut port, FixedClock::new(NOW), options);
            wizard.run(store)
        };
        (result, port.output_text())
    }

    const ONE_POINT: &str = concat!(
        "1\r",
        "2030-06-01T12:00:00\r",
        "+12.1234567\r",
        "-010.9876543\r",
        "2030-06-01T12:15:00\r",
        "15\r",
    );

    #[test]
    fn single_checkpoint_session() {
        let (result, output) = run(ONE_POINT, QUIET);
        let session = result.unwrap();

        assert_eq!(session.total_points(), 1);
        assert_eq!(session.game_start(), Timestamp(1_906_545_600));
        assert!(session.is_final_checkpoint());
        assert!(!session.is_time_extended());

        let checkpoint = session.current_checkpoint();
        assert_eq!(checkpoint.location(), Location::new(121_234_567, -109_876_543));
        assert_eq!(checkpoint.window_open(), Timestamp(1_906_546_500));
        assert_eq!(checkpoint.window_close(), Timestamp(1_906_547_400));

        assert!(output.contains("final unlock location"));
        assert!(!output.contains("next hint reveal location"));
        assert!(output.ends_with("Cycle unlock key (to locked state) to lock unit.\r\n"));
    }

    #[test]
    fn committed_session_is_persisted() {
        let (result, _) = run(ONE_POINT, QUIET);
        let session = result.unwrap();
        let config = session.config().clone();

        let reopened = GameSession::open(session.into_store()).unwrap().unwrap();
        assert_eq!(reopened.config(), &config);
    }

    #[test]
    fn invalid_entries_are_asked_again() {
        let script = concat!(
            "7\r",
            "1\r",
            "2030/06/01T12:00:00\r",
            "2030-06-01T12:00:00\r",
            "+95.0000000\r",
            "+12.1234567\r",
            "-010.9876543\r",
            "2030-06-01T12:15:00\r",
            "99\r",
            "15\r",
        );
        let (result, output) = run(script, QUIET);
        assert!(result.is_ok());

        assert!(output.contains("INVALID: Value entered is logically invalid (point count). Value must be between 1 and 5 (inclusive)."));
        assert!(output.contains("Character: First hyphen"));
        assert!(output.contains("Value must be between -90 and +90."));
        assert!(output.contains("Value must be between 1 and 60 (inclusive)."));
    }

    #[test]
    fn game_start_in_the_past_is_rejected() {
        let script = format!("1\r2020-04-03T23:53:26\r{}", &ONE_POINT[2..]);
        let (result, output) = run(&script, QUIET);

        assert_eq!(result.unwrap().game_start(), Timestamp(1_906_545_600));
        assert!(output.contains("Value must be later than the current date/time."));
        assert_eq!(output.matches("when you wish the game to start").count(), 2);
    }

    #[test]
    fn earlier_checkpoints_use_hint_wording() {
        let script = concat!(
            "2\r",
            "2030-06-01T12:00:00\r",
            "+12.1234567\r",
            "-010.9876543\r",
            "2030-06-01T12:15:00\r",
            "15\r",
            "+13.0000000\r",
            "-011.0000000\r",
            "2030-06-01T13:00:00\r",
            "30\r",
        );
        let (result, output) = run(script, QUIET);
        let session = result.unwrap();

        assert_eq!(session.total_points(), 2);
        assert_eq!(session.current_point_number(), 1);
        assert!(output.contains("Enter the latitude value of the next hint reveal location"));
        assert!(output.contains("Enter the UTC date/time value of the next hint reveal."));
        assert!(output.contains("Enter the latitude value of the final unlock location"));
        assert!(output.contains("for when you wish the unit to unlock."));
    }

    #[test]
    fn splash_waits_for_a_key() {
        let script = format!("x\r{ONE_POINT}");
        let options = WizardOptions {
            splash: true,
            ..QUIET
        };
        let (result, output) = run(&script, options);

        assert!(result.is_ok());
        assert!(output.starts_with("+-------------------------+"));
        assert!(output.contains("To continue, press any key..."));
    }

    #[test]
    fn clear_screen_and_echo_follow_options() {
        let (_, quiet) = run(ONE_POINT, QUIET);
        assert!(!quiet.contains(messages::CLEAR_SCREEN));
        assert!(!quiet.contains("+12.1234567\r\n"));

        let options = WizardOptions {
            splash: false,
            ..WizardOptions::default()
        };
        let (_, loud) = run(ONE_POINT, options);
        assert!(loud.starts_with(messages::CLEAR_SCREEN));
        assert!(loud.contains(": +12.1234567\r\n"));
    }

    #[test]
    fn closed_console_aborts_and_leaves_storage_blank() {
        let mut port = ScriptedSerial::new("2\r2030-06-01T12:00:00\r");
        let mut storage = MemoryStorage::filled(128, 0xAB);
        {
            let store = CheckpointStore::new(&mut storage).unwrap();
            let mut wizard = ConfigWizard::new(&mut port, FixedClock::new(NOW), QUIET);
            let err = wizard.run(store).unwrap_err();

            assert!(matches!(err, WizardError::Serial(SerialError::Closed)));
            assert_eq!(err.severity(), ErrorSeverity::Fatal);
        }
        assert!(storage.as_bytes()[..87].iter().all(|&b| b == 0));
        assert!(storage.as_bytes()[87..].iter().all(|&b| b == 0xAB));
    }
}
