//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use lockbox_console::WizardOptions;
use lockbox_core::LockboxConfig;
use lockbox_runtime::FileStorage;

/// Everything the `lockbox` binary needs to assemble its collaborators.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// EEPROM image file.
    pub eeprom_path: PathBuf,
    pub eeprom_capacity: usize,
    /// File holding the RTC offset from host time.
    pub clock_path: PathBuf,
    pub log_dir: PathBuf,
    /// Mirror log output to stderr as well as the log file.
    pub log_stderr: bool,
    pub lockbox: LockboxConfig,
    pub wizard: WizardOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let data_dir = data_dir();
        Self {
            eeprom_path: data_dir.join("eeprom.bin"),
            eeprom_capacity: FileStorage::DEFAULT_CAPACITY,
            clock_path: data_dir.join("rtc_offset"),
            log_dir: data_dir.join("logs"),
            log_stderr: false,
            lockbox: LockboxConfig::default(),
            // A host terminal echoes typed characters itself.
            wizard: WizardOptions {
                echo: false,
                ..WizardOptions::default()
            },
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LOCKBOX_EEPROM_PATH` - EEPROM image (default: `<data dir>/eeprom.bin`)
    /// - `LOCKBOX_CLOCK_PATH` - RTC offset file (default: `<data dir>/rtc_offset`)
    /// - `LOCKBOX_LOG_DIR` - Log directory (default: `<data dir>/logs`)
    /// - `LOCKBOX_LOG_STDERR` - Also log to stderr (default: false)
    /// - `LOCKBOX_UNLOCK_RADIUS_M` - Arrival radius in metres (default: 50)
    /// - `LOCKBOX_REQUIRE_GPS` - Require a GPS fix to progress (default: true)
    /// - `LOCKBOX_EXTENSION_MINUTES` - Length of the time extension (default: 30)
    /// - `LOCKBOX_ECHO` - Echo typed characters in setup (default: false)
    /// - `LOCKBOX_SPLASH` - Show the setup splash screen (default: true)
    /// - `LOCKBOX_CLEAR_SCREEN` - Clear the terminal between setup steps (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("LOCKBOX_EEPROM_PATH") {
            config.eeprom_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("LOCKBOX_CLOCK_PATH") {
            config.clock_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("LOCKBOX_LOG_DIR") {
            config.log_dir = PathBuf::from(path);
        }
        if let Some(enable) = read_flag(&lookup, "LOCKBOX_LOG_STDERR") {
            config.log_stderr = enable;
        }

        if let Some(radius) = read_var::<f64>(&lookup, "LOCKBOX_UNLOCK_RADIUS_M")
            && radius.is_finite()
            && radius > 0.0
        {
            config.lockbox.unlock_radius_m = radius;
        }
        if let Some(require) = read_flag(&lookup, "LOCKBOX_REQUIRE_GPS") {
            config.lockbox.require_gps = require;
        }
        if let Some(minutes) = read_var::<u32>(&lookup, "LOCKBOX_EXTENSION_MINUTES") {
            config.lockbox.extension_secs = minutes.saturating_mul(60);
        }

        if let Some(echo) = read_flag(&lookup, "LOCKBOX_ECHO") {
            config.wizard.echo = echo;
        }
        if let Some(splash) = read_flag(&lookup, "LOCKBOX_SPLASH") {
            config.wizard.splash = splash;
        }
        if let Some(clear) = read_flag(&lookup, "LOCKBOX_CLEAR_SCREEN") {
            config.wizard.clear_screen = clear;
        }

        config
    }
}

/// Platform data directory, e.g. `~/.local/share/lockbox` on Linux.
fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "lockbox")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./lockbox_data"))
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Accepts `1/0`, `true/false`, `yes/no` and `on/off`. A variable that is set
/// but empty counts as enabled.
fn read_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    let value = lookup(key)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.lockbox, LockboxConfig::default());
        assert_eq!(config.eeprom_capacity, 1024);
        assert!(config.eeprom_path.ends_with("eeprom.bin"));
        assert!(config.log_dir.ends_with("logs"));
        assert!(!config.wizard.echo);
        assert!(config.wizard.splash);
        assert!(!config.log_stderr);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("LOCKBOX_EEPROM_PATH", "/tmp/box/eeprom.bin"),
            ("LOCKBOX_CLOCK_PATH", "/tmp/box/rtc"),
            ("LOCKBOX_LOG_DIR", "/tmp/box/logs"),
            ("LOCKBOX_LOG_STDERR", "1"),
            ("LOCKBOX_UNLOCK_RADIUS_M", "25.5"),
            ("LOCKBOX_REQUIRE_GPS", "false"),
            ("LOCKBOX_EXTENSION_MINUTES", "45"),
            ("LOCKBOX_ECHO", "yes"),
            ("LOCKBOX_SPLASH", "off"),
            ("LOCKBOX_CLEAR_SCREEN", "0"),
        ]);

        assert_eq!(config.eeprom_path, PathBuf::from("/tmp/box/eeprom.bin"));
        assert_eq!(config.clock_path, PathBuf::from("/tmp/box/rtc"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/box/logs"));
        assert!(config.log_stderr);
        assert_eq!(config.lockbox.unlock_radius_m, 25.5);
        assert!(!config.lockbox.require_gps);
        assert_eq!(config.lockbox.extension_secs, 2_700);
        assert_eq!(
            config.wizard,
            WizardOptions {
                echo: true,
                clear_screen: false,
                splash: false,
            }
        );
    }

    #[test]
    fn unparseable_values_keep_defaults() {
        let config = config_from(&[
            ("LOCKBOX_UNLOCK_RADIUS_M", "-3"),
            ("LOCKBOX_REQUIRE_GPS", "maybe"),
            ("LOCKBOX_EXTENSION_MINUTES", "half an hour"),
        ]);
        assert_eq!(config.lockbox, LockboxConfig::default());
    }
}
