//! Text layout selection by label length.
//!
//! Labels are a single line of at most [`MAX_LABEL_CHARS`] characters. The font
//! size and origin depend only on how many characters there are, never on which
//! characters: one table entry per length, selected by a plain lookup.
//!
//! Origins are the left edge of the text baseline. The two widget kinds share
//! the left origins and font size but use different baselines: a plain label
//! sits higher on the key, an indicator button keeps the top of the key free
//! for its lamp.
//!
//! | Chars | Font | Left | Label baseline | Indicator baseline |
//! |-------|------|------|----------------|--------------------|
//! | 0, 1  | 32   | 30   | 44             | 56                 |
//! | 2     | 32   | 23   | 44             | 56                 |
//! | 3     | 32   | 17   | 44             | 56                 |
//! | 4     | 32   | 11   | 44             | 56                 |
//! | 5     | 32   | 5    | 44             | 56                 |

use embedded_graphics::prelude::Point;

use crate::config::{BUTTON_SIZE, MAX_LABEL_CHARS};
use crate::error::WidgetError;

// =============================================================================
// Layout Constants
// =============================================================================

/// Font size for every label length.
pub const LABEL_FONT_SIZE: f32 = 32.0;

/// Left origin per label length (index = char count, 0 shares the 1-char entry).
pub const LEFT_ORIGINS: [i32; MAX_LABEL_CHARS + 1] = [30, 30, 23, 17, 11, 5];

/// Baseline of plain label text.
pub const LABEL_BASELINE: i32 = 44;

/// Baseline of indicator button text, below the lamp.
pub const INDICATOR_BASELINE: i32 = 56;

const _: () = assert!(LEFT_ORIGINS[0] == LEFT_ORIGINS[1]);
const _: () = assert!(LEFT_ORIGINS[1] > LEFT_ORIGINS[2]);
const _: () = assert!(LEFT_ORIGINS[2] > LEFT_ORIGINS[3]);
const _: () = assert!(LEFT_ORIGINS[3] > LEFT_ORIGINS[4]);
const _: () = assert!(LEFT_ORIGINS[4] > LEFT_ORIGINS[5]);
const _: () = assert!(LABEL_BASELINE < INDICATOR_BASELINE);
const _: () = assert!(INDICATOR_BASELINE < BUTTON_SIZE as i32);

// =============================================================================
// Layout Table
// =============================================================================

/// Font size and baseline origin for one label length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Font size in points.
    pub font_size: f32,
    /// Left edge of the text baseline.
    pub origin: Point,
}

/// Length-indexed layout constants for one widget kind.
#[derive(Debug, PartialEq)]
pub struct LayoutTable {
    entries: [LayoutParams; MAX_LABEL_CHARS + 1],
}

impl LayoutTable {
    /// Build a table with the shared font size and left origins on `baseline`.
    pub const fn with_baseline(baseline: i32) -> Self {
        let mut entries = [LayoutParams {
            font_size: LABEL_FONT_SIZE,
            origin: Point::new(0, baseline),
        }; MAX_LABEL_CHARS + 1];

        let mut len = 0;
        while len < entries.len() {
            entries[len].origin.x = LEFT_ORIGINS[len];
            len += 1;
        }

        Self { entries }
    }

    /// Layout for a label of `len` characters.
    ///
    /// Fails with [`WidgetError::LabelTooLong`] above [`MAX_LABEL_CHARS`].
    pub fn layout_for(
        &self,
        len: usize,
    ) -> Result<LayoutParams, WidgetError> {
        self.entries.get(len).copied().ok_or(WidgetError::LabelTooLong { len })
    }

    /// Layout for `text`, counting characters rather than bytes.
    pub fn layout_for_text(
        &self,
        text: &str,
    ) -> Result<LayoutParams, WidgetError> {
        self.layout_for(label_len(text))
    }
}

/// Layout used by [`Label`](crate::widgets::Label).
pub static LABEL_LAYOUT: LayoutTable = LayoutTable::with_baseline(LABEL_BASELINE);

/// Layout used by [`IndicatorButton`](crate::widgets::IndicatorButton).
pub static INDICATOR_LAYOUT: LayoutTable = LayoutTable::with_baseline(INDICATOR_BASELINE);

/// Number of characters in a label.
#[inline]
pub fn label_len(text: &str) -> usize { text.chars().count() }

// =============================================================================
// Tests
// =============================================================================
