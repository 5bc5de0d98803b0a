//! Color constants for key images.
//!
//! Key images are 24-bit `Rgb888`, the native format of the keypad's LCD keys.
//! Standard colors come from the `RgbColor` trait constants; the rest are
//! application-specific shades.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Default label background and the indicator key backdrop.
pub const BLACK: Rgb888 = Rgb888::BLACK;

/// Pure white. Default text color for both widget kinds.
pub const WHITE: Rgb888 = Rgb888::WHITE;

/// Pure red. Lit red indicator lamp, error log lines.
pub const RED: Rgb888 = Rgb888::RED;

/// Pure green. Lit green indicator lamp, info log lines.
pub const GREEN: Rgb888 = Rgb888::GREEN;

/// Pure yellow. Lit yellow indicator lamp, warning log lines.
pub const YELLOW: Rgb888 = Rgb888::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Background of a label while its key is held down.
pub const PRESSED_BLUE: Rgb888 = Rgb888::new(0, 0, 153);

/// Background of a label while its key is up.
pub const IDLE_BLACK: Rgb888 = BLACK;

/// Unlit indicator lamp.
pub const LAMP_OFF: Rgb888 = Rgb888::new(56, 56, 56);

/// Rim drawn around the indicator lamp so an unlit lamp stays visible.
pub const LAMP_RIM: Rgb888 = Rgb888::new(110, 110, 110);

/// Mid gray for debug/trace log lines.
pub const GRAY: Rgb888 = Rgb888::new(128, 128, 128);
