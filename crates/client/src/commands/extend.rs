use anyhow::Result;
use clap::Parser;

use crate::app::App;

/// Use the one-time extension of the remaining windows
#[derive(Parser, Debug)]
pub struct Extend {
    /// Extension length in minutes (default: LOCKBOX_EXTENSION_MINUTES)
    #[arg(long)]
    pub minutes: Option<u32>,
}

impl Extend {
    pub fn execute(self, app: &App) -> Result<()> {
        let mut controller = app.controller()?;
        let extended = match self.minutes {
            Some(minutes) => controller.extend(minutes.saturating_mul(60))?,
            None => controller.extend_default()?,
        };

        if extended {
            let status = controller.status()?;
            println!("Extended. Window now closes at {}.", status.window_close);
        } else {
            println!("The time extension has already been used.");
        }
        Ok(())
    }
}
