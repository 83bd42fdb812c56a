use anyhow::{Context, Result};
use clap::Parser;
use lockbox_core::{Location, input};

use crate::app::App;

/// Run one control-loop step against the clock and an optional GPS fix
#[derive(Parser, Debug)]
pub struct Poll {
    /// Fix latitude, formatted like setup input (e.g. +12.1234567)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Fix longitude, formatted like setup input (e.g. -010.9876543)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl Poll {
    pub fn execute(self, app: &App) -> Result<()> {
        let fix = match (&self.lat, &self.lon) {
            (Some(lat), Some(lon)) => Some(parse_fix(lat, lon)?),
            _ => None,
        };

        let verdict = app.controller()?.poll(fix)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&verdict)?);
        } else {
            println!("{verdict}");
        }
        Ok(())
    }
}

fn parse_fix(lat: &str, lon: &str) -> Result<Location> {
    let latitude = input::read_latitude(lat.as_bytes()).context("Invalid --lat")?;
    let longitude = input::read_longitude(lon.as_bytes()).context("Invalid --lon")?;
    Ok(Location::new(latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_uses_setup_grammar() {
        let fix = parse_fix("+12.1234567", "-010.9876543").unwrap();
        assert_eq!(fix, Location::new(121_234_567, -109_876_543));

        let err = parse_fix("12.1234567", "-010.9876543").unwrap_err();
        assert!(err.to_string().contains("--lat"));
    }
}
