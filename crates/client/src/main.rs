//! Timed GPS lockbox host binary.
//!
//! This binary is the composition root: it loads configuration from the
//! environment, sets up file logging, and assembles the file-backed EEPROM,
//! the offset RTC and the stdio console into the lockbox components.
//!
//! # Examples
//!
//! ```bash
//! # Configure a game interactively
//! lockbox setup
//!
//! # One control-loop step with a GPS fix
//! lockbox poll --lat +12.1234567 --lon -010.9876543
//!
//! # Pretend it is a different time
//! lockbox clock --set 2030-06-01T12:15:00
//! ```

mod app;
mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{Advance, ClockCommand, Dump, Extend, Poll, Reset, Setup, Status};

use crate::app::App;
use crate::config::ClientConfig;

/// Timed GPS lockbox controller
#[derive(Parser)]
#[command(name = "lockbox")]
#[command(about = "GPS and time gated lockbox controller", long_about = None)]
#[command(version)]
struct Cli {
    /// EEPROM image file (overrides LOCKBOX_EEPROM_PATH)
    #[arg(long, global = true)]
    eeprom: Option<PathBuf>,

    /// RTC offset file (overrides LOCKBOX_CLOCK_PATH)
    #[arg(long, global = true)]
    rtc: Option<PathBuf>,

    /// Log directory (overrides LOCKBOX_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Configure a new game over the console
    Setup(Setup),

    /// Show progress through the configured game
    Status(Status),

    /// Run one control-loop step
    Poll(Poll),

    /// Move to the next checkpoint by hand
    Advance(Advance),

    /// Use the one-time time extension
    Extend(Extend),

    /// Erase the stored game
    Reset(Reset),

    /// Show or set the lockbox clock
    Clock(ClockCommand),

    /// Hex dump of the EEPROM image
    Dump(Dump),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(path) = cli.eeprom {
        config.eeprom_path = path;
    }
    if let Some(path) = cli.rtc {
        config.clock_path = path;
    }
    if let Some(path) = cli.log_dir {
        config.log_dir = path;
    }

    let _guard = logging::setup_logging(&config)?;
    tracing::debug!("EEPROM image: {}", config.eeprom_path.display());

    let app = App::new(config);
    let result = match cli.command {
        Command::Setup(cmd) => cmd.execute(&app),
        Command::Status(cmd) => cmd.execute(&app),
        Command::Poll(cmd) => cmd.execute(&app),
        Command::Advance(cmd) => cmd.execute(&app),
        Command::Extend(cmd) => cmd.execute(&app),
        Command::Reset(cmd) => cmd.execute(&app),
        Command::Clock(cmd) => cmd.execute(&app),
        Command::Dump(cmd) => cmd.execute(&app),
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    result
}
