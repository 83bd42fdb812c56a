//! Interactive configuration over the terminal.

use anyhow::Result;
use clap::Parser;
use lockbox_console::ConfigWizard;
use lockbox_runtime::StdioSerial;

use crate::app::App;

/// Erase the stored game and configure a new one interactively
#[derive(Parser, Debug)]
pub struct Setup {
    /// Skip the splash screen
    #[arg(long)]
    pub no_splash: bool,

    /// Do not clear the terminal between steps
    #[arg(long)]
    pub no_clear: bool,

    /// Echo typed characters (for raw serial terminals)
    #[arg(long)]
    pub echo: bool,
}

impl Setup {
    pub fn execute(self, app: &App) -> Result<()> {
        let mut options = app.config().wizard;
        options.splash &= !self.no_splash;
        options.clear_screen &= !self.no_clear;
        options.echo |= self.echo;

        let store = app.open_store()?;
        let clock = app.open_clock()?;
        let port = StdioSerial::stdio()?;

        let session = ConfigWizard::new(port, clock, options).run(store)?;
        tracing::info!(
            "Configured {} checkpoints starting {}",
            session.total_points(),
            session.game_start()
        );
        Ok(())
    }
}
