use anyhow::Result;
use clap::Parser;
use lockbox_core::{LockboxConfig, Storage};

use crate::app::App;

const ROW_LEN: usize = 16;

/// Hex dump of the lockbox region of the EEPROM image
#[derive(Parser, Debug)]
pub struct Dump {
    /// Dump the whole image instead of the lockbox region
    #[arg(long)]
    pub all: bool,
}

impl Dump {
    pub fn execute(self, app: &App) -> Result<()> {
        let store = app.open_store()?;
        let storage = store.storage();

        let len = if self.all {
            storage.capacity()
        } else {
            LockboxConfig::STORAGE_FOOTPRINT
        };
        let mut bytes = vec![0u8; len];
        storage.read_into(0, &mut bytes)?;

        for line in hex_rows(&bytes) {
            println!("{line}");
        }
        Ok(())
    }
}

fn hex_rows(bytes: &[u8]) -> impl Iterator<Item = String> + '_ {
    bytes
        .chunks(ROW_LEN)
        .enumerate()
        .map(|(row, chunk)| format!("{:04x}: {}", row * ROW_LEN, hex::encode(chunk)))
}
