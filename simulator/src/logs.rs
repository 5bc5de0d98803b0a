//! Log pane under the key grid.
//!
//! Shows the newest entries of the widget log ring with color-coded levels and
//! timestamps.
//!
//! # Layout
//!
//! ```text
//! LOG                               (header)
//! [I] 00012 assets loaded           (entries, newest last)
//! [D] 00480 key 3 pushed "MUTE"
//! [W] 00950 key 7 push failed: ...
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;
use keydeck_widgets::colors::{BLACK, GRAY, WHITE};
use keydeck_widgets::log_buffer::{LOG_BUFFER, LogEntry};

/// Height of one log line.
const LINE_HEIGHT: i32 = 12;

/// Log lines that fit under the header.
pub const VISIBLE_LINES: usize = 10;

/// Left margin of every line.
const MARGIN: i32 = 6;

/// Message column, after `[L] TTTTT `.
const MESSAGE_X: i32 = MARGIN + 11 * 6;

/// Redraw the log pane inside `area`.
pub fn draw_log_pane<D>(
    display: &mut D,
    area: Rectangle,
) where
    D: DrawTarget<Color = Rgb888>,
{
    let header_style = MonoTextStyle::new(&FONT_6X10, GRAY);
    display.fill_solid(&area, BLACK).ok();

    let top = area.top_left.y;
    Text::new("LOG", Point::new(MARGIN, top + LINE_HEIGHT), header_style)
        .draw(display)
        .ok();

    // The widgets may be logging from another thread; skip a frame rather than wait.
    let Ok(buffer) = LOG_BUFFER.try_lock() else {
        return;
    };

    let mut y = top + LINE_HEIGHT * 2;
    for entry in buffer.tail(VISIBLE_LINES) {
        draw_log_entry(display, entry, y);
        y += LINE_HEIGHT;
    }
}

/// Draw a single log entry.
fn draw_log_entry<D>(
    display: &mut D,
    entry: &LogEntry,
    y: i32,
) where
    D: DrawTarget<Color = Rgb888>,
{
    let level_style = MonoTextStyle::new(&FONT_6X10, entry.level.color());
    let msg_style = MonoTextStyle::new(&FONT_6X10, WHITE);

    // [L] TTTTT: level prefix in color, timestamp mod 100000
    let mut prefix: String<16> = String::new();
    write!(prefix, "[{}] {:05}", entry.level.prefix(), entry.timestamp_ms % 100_000).ok();

    Text::new(&prefix, Point::new(MARGIN, y), level_style).draw(display).ok();
    Text::new(entry.message.as_str(), Point::new(MESSAGE_X, y), msg_style)
        .draw(display)
        .ok();
}
