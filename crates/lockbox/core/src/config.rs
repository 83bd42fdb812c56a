/// Lockbox limits, persisted layout offsets and tunable defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LockboxConfig {
    /// Radius around a checkpoint within which a GPS fix counts as "arrived".
    pub unlock_radius_m: f64,
    /// Whether a GPS fix is required at all before unlocking / revealing.
    pub require_gps: bool,
    /// Length of the one-shot time extension.
    pub extension_secs: u32,
}

impl LockboxConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of checkpoints a game can hold.
    pub const MAX_CHECKPOINTS: usize = 5;

    // ===== persisted layout =====
    pub const ADDR_CHECKPOINT_COUNT: usize = 0;
    pub const ADDR_CURRENT_INDEX: usize = 1;
    pub const ADDR_TIME_EXTENDED: usize = 2;
    pub const ADDR_GAME_START: usize = 3;
    pub const ADDR_CHECKPOINTS: usize = 7;
    /// latitude(i32) + longitude(i32) + window_open(u32) + window_close(u32)
    pub const CHECKPOINT_RECORD_LEN: usize = 16;
    /// Size of the region owned by the lockbox: 7 + 16 * 5.
    pub const STORAGE_FOOTPRINT: usize =
        Self::ADDR_CHECKPOINTS + Self::CHECKPOINT_RECORD_LEN * Self::MAX_CHECKPOINTS;

    // ===== input limits =====
    pub const MIN_GRACE_SECS: u32 = 60;
    pub const MAX_GRACE_SECS: u32 = 3600;
    pub const MAX_LATITUDE: i32 = 900_000_000;
    pub const MAX_LONGITUDE: i32 = 1_800_000_000;
    /// Years are stored by the RTC as an offset from 1970 in one byte.
    pub const EPOCH_YEAR: u16 = 1970;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_UNLOCK_RADIUS_M: f64 = 50.0;
    pub const DEFAULT_EXTENSION_SECS: u32 = 30 * 60;

    pub fn new() -> Self {
        Self {
            unlock_radius_m: Self::DEFAULT_UNLOCK_RADIUS_M,
            require_gps: true,
            extension_secs: Self::DEFAULT_EXTENSION_SECS,
        }
    }

    /// Byte offset of checkpoint record `index`.
    pub const fn checkpoint_addr(index: usize) -> usize {
        Self::ADDR_CHECKPOINTS + index * Self::CHECKPOINT_RECORD_LEN
    }

    /// Number of bytes an image holding `count` checkpoints occupies.
    pub const fn footprint(count: usize) -> usize {
        Self::ADDR_CHECKPOINTS + count * Self::CHECKPOINT_RECORD_LEN
    }
}

impl Default for LockboxConfig {
    fn default() -> Self {
        Self::new()
    }
}
