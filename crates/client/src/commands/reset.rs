use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::app::App;

/// Erase the stored game
#[derive(Parser, Debug)]
pub struct Reset {
    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Reset {
    pub fn execute(self, app: &App) -> Result<()> {
        if !self.yes && !confirm("Erase the stored game? [y/N] ")? {
            println!("Cancelled.");
            return Ok(());
        }

        app.open_store()?.reset()?;
        println!("Storage reset; the lockbox is unconfigured.");
        Ok(())
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
