//! Process-wide font and indicator bitmaps.
//!
//! Everything here is loaded once, before the first widget exists, and is
//! read-only afterwards. Hosts wrap the result in an `Arc` and hand a clone to
//! every widget; no locking is needed because nothing writes after load.
//!
//! # Usage
//!
//! ```ignore
//! let assets = match Assets::load(&BuiltinAssets) {
//!     Ok(assets) => Arc::new(assets),
//!     Err(e) => {
//!         eprintln!("cannot start: {e}");
//!         std::process::exit(1);
//!     }
//! };
//! ```

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyleBuilder};

use crate::colors::{BLACK, LAMP_RIM};
use crate::error::AssetError;
use crate::font::{FontFamily, FontHandle, GlyphRasterizer};
use crate::surface::PixelBuffer;
use crate::widgets::IndicatorColor;

// =============================================================================
// Lamp Geometry
// =============================================================================

/// Centre of the indicator lamp, top middle of the key.
pub const LAMP_CENTER: Point = Point::new(36, 15);

/// Lamp diameter in pixels, rim included.
pub const LAMP_DIAMETER: u32 = 22;

/// Rim stroke width.
pub const LAMP_RIM_WIDTH: u32 = 2;

// =============================================================================
// Asset Store
// =============================================================================

/// Source of the font and pre-decoded indicator bitmaps.
pub trait AssetStore {
    /// Load the label font.
    fn load_font(&self) -> Result<FontHandle, AssetError>;

    /// Load the full-key bitmap for one indicator variant.
    fn load_indicator_bitmap(
        &self,
        variant: IndicatorColor,
    ) -> Result<PixelBuffer, AssetError>;
}

/// Store that needs no files: ProFont and lamps drawn with primitives.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinAssets;

impl AssetStore for BuiltinAssets {
    fn load_font(&self) -> Result<FontHandle, AssetError> { Ok(Box::new(FontFamily::profont())) }

    fn load_indicator_bitmap(
        &self,
        variant: IndicatorColor,
    ) -> Result<PixelBuffer, AssetError> {
        Ok(draw_lamp(variant))
    }
}

/// Black key with a round lamp at the top.
pub fn draw_lamp(variant: IndicatorColor) -> PixelBuffer {
    let mut bitmap = PixelBuffer::filled(BLACK);
    let style = PrimitiveStyleBuilder::new()
        .fill_color(variant.lamp_color())
        .stroke_color(LAMP_RIM)
        .stroke_width(LAMP_RIM_WIDTH)
        .build();

    Circle::with_center(LAMP_CENTER, LAMP_DIAMETER)
        .into_styled(style)
        .draw(&mut bitmap)
        .ok();
    bitmap
}

// =============================================================================
// Loaded Assets
// =============================================================================

/// Font and indicator bitmaps shared by all widgets.
pub struct Assets {
    font: FontHandle,
    off: PixelBuffer,
    red: PixelBuffer,
    green: PixelBuffer,
    yellow: PixelBuffer,
}

impl Assets {
    /// Load every asset from `store`, each exactly once.
    pub fn load<S>(store: &S) -> Result<Self, AssetError>
    where
        S: AssetStore + ?Sized,
    {
        let font = store.load_font()?;
        let assets = Self {
            font,
            off: store.load_indicator_bitmap(IndicatorColor::Off)?,
            red: store.load_indicator_bitmap(IndicatorColor::Red)?,
            green: store.load_indicator_bitmap(IndicatorColor::Green)?,
            yellow: store.load_indicator_bitmap(IndicatorColor::Yellow)?,
        };

        crate::log_info!("assets loaded");
        Ok(assets)
    }

    /// The label font.
    #[inline]
    pub fn font(&self) -> &dyn GlyphRasterizer { self.font.as_ref() }

    /// Bitmap for one indicator variant.
    pub fn indicator(
        &self,
        variant: IndicatorColor,
    ) -> &PixelBuffer {
        match variant {
            IndicatorColor::Off => &self.off,
            IndicatorColor::Red => &self.red,
            IndicatorColor::Green => &self.green,
            IndicatorColor::Yellow => &self.yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::colors::{GREEN, LAMP_OFF, RED, YELLOW};

    /// Counts loader calls; optionally fails one variant.
    #[derive(Default)]
    struct CountingStore {
        font_loads: Cell<u32>,
        bitmap_loads: Cell<u32>,
        font_missing: bool,
        missing: Option<IndicatorColor>,
    }

    impl AssetStore for CountingStore {
        fn load_font(&self) -> Result<FontHandle, AssetError> {
            self.font_loads.set(self.font_loads.get() + 1);
            if self.font_missing {
                return Err(AssetError::MissingFont);
            }
            BuiltinAssets.load_font()
        }

        fn load_indicator_bitmap(
            &self,
            variant: IndicatorColor,
        ) -> Result<PixelBuffer, AssetError> {
            self.bitmap_loads.set(self.bitmap_loads.get() + 1);
            if self.missing == Some(variant) {
                return Err(AssetError::MissingIndicator(variant));
            }
            BuiltinAssets.load_indicator_bitmap(variant)
        }
    }

    #[test]
    fn test_each_asset_loaded_once() {
        let store = CountingStore::default();
        let _assets = Assets::load(&store).unwrap();
        assert_eq!(store.font_loads.get(), 1);
        assert_eq!(store.bitmap_loads.get(), 4, "one load per indicator variant");
    }

    #[test]
    fn test_missing_bitmap_is_fatal() {
        let store = CountingStore {
            missing: Some(IndicatorColor::Yellow),
            ..CountingStore::default()
        };
        assert!(matches!(
            Assets::load(&store),
            Err(AssetError::MissingIndicator(IndicatorColor::Yellow))
        ));
    }

    #[test]
    fn test_missing_font_stops_loading() {
        let store = CountingStore {
            font_missing: true,
            ..CountingStore::default()
        };
        assert!(matches!(Assets::load(&store), Err(AssetError::MissingFont)));
        assert_eq!(store.bitmap_loads.get(), 0);
    }

    #[test]
    fn test_lamp_colors() {
        let assets = Assets::load(&BuiltinAssets).unwrap();
        let cases = [
            (IndicatorColor::Off, LAMP_OFF),
            (IndicatorColor::Red, RED),
            (IndicatorColor::Green, GREEN),
            (IndicatorColor::Yellow, YELLOW),
        ];
        for (variant, lamp) in cases {
            let bitmap = assets.indicator(variant);
            assert_eq!(bitmap.pixel(LAMP_CENTER), Some(lamp), "lamp of {variant:?}");
            assert_eq!(bitmap.pixel(Point::new(0, 71)), Some(BLACK));
        }
    }

    #[test]
    fn test_variants_are_distinct() {
        let assets = Assets::load(&BuiltinAssets).unwrap();
        assert_ne!(assets.indicator(IndicatorColor::Off), assets.indicator(IndicatorColor::Red));
        assert_ne!(assets.indicator(IndicatorColor::Red), assets.indicator(IndicatorColor::Green));
        assert_ne!(assets.indicator(IndicatorColor::Green), assets.indicator(IndicatorColor::Yellow));
    }
}
