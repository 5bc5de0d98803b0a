//! Window geometry: where each key sits and which key is under the cursor.
//!
//! # Layout
//!
//! ```text
//! +--------------------------------------------+
//! |  [0]  [1]  [2]  [3]  [4]                   |
//! |  [5]  [6]  [7]  [8]  [9]      key grid     |
//! |  [10] [11] [12] [13] [14]                  |
//! +--------------------------------------------+
//! |  [I] 00012 assets loaded        log pane   |
//! +--------------------------------------------+
//! ```

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use keydeck_widgets::config::{BUTTON_SIZE, KEY_COLS, KEY_COUNT, KEY_ROWS};

/// Gap between keys and around the grid.
pub const KEY_GAP: u32 = 10;

/// Distance between the left edges of neighbouring keys.
const KEY_PITCH: u32 = BUTTON_SIZE + KEY_GAP;

/// Width of the key grid, outer gaps included.
pub const GRID_WIDTH: u32 = KEY_COLS as u32 * KEY_PITCH + KEY_GAP;

/// Height of the key grid, outer gaps included.
pub const GRID_HEIGHT: u32 = KEY_ROWS as u32 * KEY_PITCH + KEY_GAP;

/// Height of the log pane under the grid.
pub const LOG_PANE_HEIGHT: u32 = 136;

/// Full window size.
pub const WINDOW_SIZE: Size = Size::new(GRID_WIDTH, GRID_HEIGHT + LOG_PANE_HEIGHT);

/// Area of the log pane.
pub const LOG_PANE: Rectangle = Rectangle::new(
    Point::new(0, GRID_HEIGHT as i32),
    Size::new(GRID_WIDTH, LOG_PANE_HEIGHT),
);

/// Top-left corner of key `index`.
pub fn key_origin(index: u8) -> Option<Point> {
    if usize::from(index) >= KEY_COUNT {
        return None;
    }

    let col = u32::from(index % KEY_COLS);
    let row = u32::from(index / KEY_COLS);
    Some(Point::new(
        (KEY_GAP + col * KEY_PITCH) as i32,
        (KEY_GAP + row * KEY_PITCH) as i32,
    ))
}

/// Area covered by key `index`.
pub fn key_area(index: u8) -> Option<Rectangle> {
    key_origin(index).map(|origin| Rectangle::new(origin, Size::new(BUTTON_SIZE, BUTTON_SIZE)))
}

/// Key under `point`, `None` on gaps and outside the grid.
pub fn key_at(point: Point) -> Option<u8> {
    if point.x < KEY_GAP as i32 || point.y < KEY_GAP as i32 {
        return None;
    }

    let x = (point.x as u32) - KEY_GAP;
    let y = (point.y as u32) - KEY_GAP;
    if x % KEY_PITCH >= BUTTON_SIZE || y % KEY_PITCH >= BUTTON_SIZE {
        return None;
    }

    let col = x / KEY_PITCH;
    let row = y / KEY_PITCH;
    if col >= u32::from(KEY_COLS) || row >= u32::from(KEY_ROWS) {
        return None;
    }
    Some((row * u32::from(KEY_COLS) + col) as u8)
}
