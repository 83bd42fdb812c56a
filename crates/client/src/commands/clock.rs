use anyhow::{Context, Result};
use clap::Parser;
use lockbox_core::{Clock, input};

use crate::app::App;

/// Show or set the lockbox clock (UTC)
#[derive(Parser, Debug)]
pub struct ClockCommand {
    /// New time, formatted YYYY-MM-DDTHH:MM:SS
    #[arg(long)]
    pub set: Option<String>,
}

impl ClockCommand {
    pub fn execute(self, app: &App) -> Result<()> {
        let mut clock = app.open_clock()?;

        if let Some(text) = &self.set {
            let now = input::read_date_time(text.as_bytes()).context("Invalid --set")?;
            clock.set_now(now)?;
        }

        println!("{}", clock.now()?);
        Ok(())
    }
}
