use anyhow::Result;
use clap::Parser;

use crate::app::App;

/// Show progress through the configured game
#[derive(Parser, Debug)]
pub struct Status {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl Status {
    pub fn execute(self, app: &App) -> Result<()> {
        let status = app.controller()?.status()?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        println!("Now:           {}", status.now);
        println!("Game start:    {}", status.game_start);
        println!(
            "Checkpoint:    {}/{}{}",
            status.point,
            status.total_points,
            if status.is_final { " (final)" } else { "" }
        );
        println!("Location:      {}", status.location);
        println!("Window:        {} .. {}", status.window_open, status.window_close);
        println!("Phase:         {}", status.phase);
        println!(
            "Extension:     {}",
            if status.time_extended { "used" } else { "available" }
        );
        Ok(())
    }
}
