//! Fixed-width field codec and the persisted configuration image.
//!
//! Every multi-byte field is little-endian, the byte order of the AVR
//! firmware, so images written by either side read back unchanged.
//!
//! ```text
//! [0]        checkpoint_count   u8
//! [1]        current_index      u8
//! [2]        time_extended      u8 (0/1)
//! [3..7]     game_start         u32
//! [7 + 16i]  latitude           i32
//! [11 + 16i] longitude          i32
//! [15 + 16i] window_open        u32
//! [19 + 16i] window_close       u32
//! ```

use arrayvec::ArrayVec;

use crate::config::LockboxConfig;
use crate::state::{Checkpoint, GameConfig, Location, Timestamp};
use crate::store::StoreError;

/// Buffer large enough for the biggest image (five checkpoints).
pub type Image = ArrayVec<u8, { LockboxConfig::STORAGE_FOOTPRINT }>;

/// Count byte of a freshly erased EEPROM.
const ERASED: u8 = 0xFF;

pub const fn encode_u32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

pub const fn decode_u32(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

pub const fn encode_i32(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

pub const fn decode_i32(bytes: [u8; 4]) -> i32 {
    i32::from_le_bytes(bytes)
}

fn word(image: &[u8], at: usize) -> [u8; 4] {
    [image[at], image[at + 1], image[at + 2], image[at + 3]]
}

/// Serialize `config` into its persisted image (`7 + 16 * n` bytes).
pub fn encode_config(config: &GameConfig) -> Image {
    let mut image = Image::new();
    image.push(config.checkpoint_count() as u8);
    image.push(config.current_index() as u8);
    image.push(u8::from(config.is_time_extended()));
    image.extend(encode_u32(config.game_start().as_secs()));

    for checkpoint in config.checkpoints() {
        let location = checkpoint.location();
        image.extend(encode_i32(location.latitude));
        image.extend(encode_i32(location.longitude));
        image.extend(encode_u32(checkpoint.window_open().as_secs()));
        image.extend(encode_u32(checkpoint.window_close().as_secs()));
    }
    image
}

/// Length of the image announced by its count byte, or `None` if the byte
/// marks unconfigured storage.
pub fn image_len(count_byte: u8) -> Result<Option<usize>, StoreError> {
    match count_byte {
        0 | ERASED => Ok(None),
        count if usize::from(count) <= LockboxConfig::MAX_CHECKPOINTS => {
            Ok(Some(LockboxConfig::footprint(count.into())))
        }
        count => Err(StoreError::Corrupted(format!(
            "checkpoint count {count} exceeds maximum {}",
            LockboxConfig::MAX_CHECKPOINTS
        ))),
    }
}

/// Parse a persisted image.
///
/// Returns `Ok(None)` for a zeroed or erased image. A stored progress pointer
/// past the last checkpoint is clamped to the final checkpoint.
pub fn decode_config(image: &[u8]) -> Result<Option<GameConfig>, StoreError> {
    let Some(&count_byte) = image.first() else {
        return Err(StoreError::Truncated {
            expected: LockboxConfig::ADDR_CHECKPOINTS,
            actual: 0,
        });
    };
    let Some(expected) = image_len(count_byte)? else {
        return Ok(None);
    };
    if image.len() < expected {
        return Err(StoreError::Truncated {
            expected,
            actual: image.len(),
        });
    }

    let count = usize::from(count_byte);
    let mut current_index = usize::from(image[LockboxConfig::ADDR_CURRENT_INDEX]);
    if current_index >= count {
        tracing::warn!(
            "stored checkpoint index {} out of range for {} checkpoints, clamping",
            current_index,
            count
        );
        current_index = count - 1;
    }
    let time_extended = image[LockboxConfig::ADDR_TIME_EXTENDED] != 0;
    let game_start = Timestamp(decode_u32(word(image, LockboxConfig::ADDR_GAME_START)));

    let mut checkpoints = ArrayVec::<Checkpoint, { LockboxConfig::MAX_CHECKPOINTS }>::new();
    for index in 0..count {
        let at = LockboxConfig::checkpoint_addr(index);
        let location = Location::new(decode_i32(word(image, at)), decode_i32(word(image, at + 4)));
        let open = Timestamp(decode_u32(word(image, at + 8)));
        let close = Timestamp(decode_u32(word(image, at + 12)));
        let checkpoint = Checkpoint::with_window(location, open, close)
            .map_err(|e| StoreError::Corrupted(format!("checkpoint {}: {e}", index + 1)))?;
        checkpoints.push(checkpoint);
    }

    GameConfig::restore(game_start, checkpoints, current_index, time_extended)
        .map(Some)
        .map_err(|e| StoreError::Corrupted(e.to_string()))
}
