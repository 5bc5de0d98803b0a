//! Test helpers shared by the unit tests.

use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::assets::{AssetStore, Assets, BuiltinAssets};
use crate::error::{AssetError, RasterError};
use crate::font::{FontHandle, GlyphRasterizer};
use crate::surface::PixelBuffer;
use crate::widgets::IndicatorColor;

/// Side of the block drawn by [`BlockRasterizer`].
pub const BLOCK_SIZE: u32 = 4;

/// Rasterizer that draws one solid block with its top-left corner on the
/// origin, whatever the text. Makes "was the text drawn, and where" a single
/// pixel lookup.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn draw_text(
        &self,
        target: &mut PixelBuffer,
        _text: &str,
        _font_size: f32,
        origin: Point,
        color: Rgb888,
    ) -> Result<(), RasterError> {
        Rectangle::new(origin, Size::new(BLOCK_SIZE, BLOCK_SIZE))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(target)
            .ok();
        Ok(())
    }
}

/// Built-in lamps with [`BlockRasterizer`] as the font.
struct BlockStore;

impl AssetStore for BlockStore {
    fn load_font(&self) -> Result<FontHandle, AssetError> { Ok(Box::new(BlockRasterizer)) }

    fn load_indicator_bitmap(
        &self,
        variant: IndicatorColor,
    ) -> Result<PixelBuffer, AssetError> {
        BuiltinAssets.load_indicator_bitmap(variant)
    }
}

/// Assets with the real ProFont family.
pub fn profont_assets() -> Arc<Assets> { Arc::new(Assets::load(&BuiltinAssets).unwrap()) }

/// Assets whose font draws a [`BlockRasterizer`] block.
pub fn block_assets() -> Arc<Assets> { Arc::new(Assets::load(&BlockStore).unwrap()) }
