//! Keypad geometry shared by the render pipeline and every device sink.
//!
//! The key resolution is a fixed contract: a sink only ever receives images of
//! exactly `BUTTON_SIZE` x `BUTTON_SIZE` pixels.

// =============================================================================
// Key Display Configuration
// =============================================================================

/// Width and height of one key display in pixels.
pub const BUTTON_SIZE: u32 = 72;

/// Number of pixels in one key image.
pub const PIXEL_COUNT: usize = (BUTTON_SIZE * BUTTON_SIZE) as usize;

/// Bytes in one packed 24-bit key image.
pub const IMAGE_BYTES: usize = PIXEL_COUNT * 3;

// =============================================================================
// Key Grid
// =============================================================================

/// Keys per row.
pub const KEY_COLS: u8 = 5;

/// Rows of keys.
pub const KEY_ROWS: u8 = 3;

/// Total addressable keys. Valid widget indices are `0..KEY_COUNT`.
pub const KEY_COUNT: usize = (KEY_COLS as usize) * (KEY_ROWS as usize);

// =============================================================================
// Labels
// =============================================================================

/// Longest label that fits on a key. Longer labels are rejected, never clipped.
pub const MAX_LABEL_CHARS: usize = 5;

const _: () = assert!(KEY_COUNT <= u8::MAX as usize);
