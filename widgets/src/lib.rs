//! Stateful text-labelled key widgets for LCD keypads.
//!
//! Each physical key of a keypad shows a small square bitmap. This crate turns
//! a short label and a bit of widget state into that bitmap and pushes it to a
//! device sink:
//!
//! - [`colors`]: Rgb888 color constants
//! - [`config`]: Key resolution and grid constants
//! - [`layout`]: Length-keyed text layout tables
//! - [`surface`]: Key image buffer and layer compositing
//! - [`font`]: Glyph rasterizer seam and the ProFont family
//! - [`assets`]: Font and indicator bitmaps, loaded once
//! - [`sink`]: Device sink trait and an in-memory sink
//! - [`widgets`]: [`Label`] and [`IndicatorButton`]
//! - [`deck`]: Routes key events to the widget on each key
//! - [`log_buffer`]: Log ring with levels and timestamps
//! - [`error`]: Error types
//!
//! # Rendering
//!
//! Rendering is synchronous and every render is a full redraw. A failed render
//! pushes nothing, so a key always shows either its previous image or a
//! complete new one.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod assets;
pub mod colors;
pub mod config;
pub mod deck;
pub mod error;
pub mod font;
pub mod layout;
pub mod log_buffer;
pub mod sink;
pub mod surface;
pub mod widgets;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use assets::{AssetStore, Assets, BuiltinAssets};
pub use deck::Deck;
pub use error::{AssetError, RasterError, SinkError, WidgetError};
pub use font::{FontFamily, GlyphRasterizer};
pub use sink::{DeviceSink, MemorySink};
pub use surface::PixelBuffer;
pub use widgets::{IndicatorButton, IndicatorColor, IndicatorOptions, Label, LabelOptions, PressState, Widget};
