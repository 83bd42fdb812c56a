use anyhow::Result;
use clap::Parser;

use crate::app::App;

/// Move to the next checkpoint by hand
#[derive(Parser, Debug)]
pub struct Advance {}

impl Advance {
    pub fn execute(self, app: &App) -> Result<()> {
        let mut session = app.open_session()?;
        if session.advance()? {
            println!(
                "Now at checkpoint {}/{}.",
                session.current_point_number(),
                session.total_points()
            );
        } else {
            println!("Already at the final checkpoint.");
        }
        Ok(())
    }
}
