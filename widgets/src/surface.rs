//! Key image buffer and the layer compositing pipeline.
//!
//! Every render starts from a fresh [`PixelBuffer`] and overwrites it layer by
//! layer, no blending:
//!
//! 1. background: a solid fill or a copy of an indicator bitmap
//! 2. text: skipped when the label is empty
//!
//! A label that does not fit aborts the whole render before anything reaches a
//! device sink, so a failed render never shows up as a half-drawn key.

use core::convert::Infallible;
use core::fmt;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::BLACK;
use crate::config::{BUTTON_SIZE, IMAGE_BYTES, PIXEL_COUNT};
use crate::error::{AssetError, WidgetError};
use crate::font::GlyphRasterizer;
use crate::layout::LayoutTable;

// =============================================================================
// Pixel Buffer
// =============================================================================

/// One key image: `BUTTON_SIZE` x `BUTTON_SIZE` pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Box<[Rgb888]>,
}

impl PixelBuffer {
    /// A buffer with every pixel set to `color`.
    pub fn filled(color: Rgb888) -> Self {
        Self {
            pixels: vec![color; PIXEL_COUNT].into_boxed_slice(),
        }
    }

    /// Build a buffer from packed RGB bytes (3 per pixel, row-major).
    pub fn from_rgb_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() != IMAGE_BYTES {
            return Err(AssetError::BitmapSize {
                expected: IMAGE_BYTES,
                found: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(3)
            .map(|px| Rgb888::new(px[0], px[1], px[2]))
            .collect();
        Ok(Self { pixels })
    }

    /// Color at `point`, `None` outside the key.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb888> {
        index_of(point).map(|i| self.pixels[i])
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Rgb888] { &self.pixels }

    /// Packed RGB bytes, row-major.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r(), c.g(), c.b()]).collect()
    }

    /// Packed BGR bytes, row-major. Most keypad firmwares expect this order.
    pub fn to_bgr_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.b(), c.g(), c.r()]).collect()
    }
}

impl Default for PixelBuffer {
    fn default() -> Self { Self::filled(BLACK) }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("size", &BUTTON_SIZE)
            .finish_non_exhaustive()
    }
}

#[inline]
fn index_of(Point { x, y }: Point) -> Option<usize> {
    let size = BUTTON_SIZE as i32;
    if (0..size).contains(&x) && (0..size).contains(&y) {
        Some((y * size + x) as usize)
    } else {
        None
    }
}

impl OriginDimensions for PixelBuffer {
    fn size(&self) -> Size { Size::new(BUTTON_SIZE, BUTTON_SIZE) }
}

impl DrawTarget for PixelBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Glyphs may run past the key edge; those pixels are dropped.
            if let Some(i) = index_of(point) {
                self.pixels[i] = color;
            }
        }

        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        for y in area.top_left.y..=bottom_right.y {
            let row = (y * BUTTON_SIZE as i32) as usize;
            let start = row + area.top_left.x as usize;
            let end = row + bottom_right.x as usize;
            self.pixels[start..=end].fill(color);
        }

        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

// =============================================================================
// Compositing
// =============================================================================

/// Bottom layer of a key image.
#[derive(Clone, Copy, Debug)]
pub enum Background<'a> {
    /// Fill the whole key with one color.
    Solid(Rgb888),
    /// Copy a full-key bitmap.
    Bitmap(&'a PixelBuffer),
}

/// Top layer of a key image.
#[derive(Clone, Copy, Debug)]
pub struct TextLayer<'a> {
    /// Label, at most five characters.
    pub text: &'a str,
    /// Glyph color.
    pub color: Rgb888,
    /// Length-keyed layout of the widget kind.
    pub layout: &'a LayoutTable,
}

/// Composite `background` and `text` into a fresh key image.
pub fn compose(
    background: Background<'_>,
    text: &TextLayer<'_>,
    font: &dyn GlyphRasterizer,
) -> Result<PixelBuffer, WidgetError> {
    let mut image = match background {
        Background::Solid(color) => PixelBuffer::filled(color),
        Background::Bitmap(bitmap) => bitmap.clone(),
    };

    if !text.text.is_empty() {
        let params = text.layout.layout_for_text(text.text)?;
        font.draw_text(&mut image, text.text, params.font_size, params.origin, text.color)?;
    }

    Ok(image)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::PrimitiveStyle;

    use super::*;
    use crate::colors::{GREEN, PRESSED_BLUE, RED, WHITE};
    use crate::error::RasterError;
    use crate::font::FontFamily;
    use crate::layout::{INDICATOR_LAYOUT, LABEL_LAYOUT};
    use crate::testing::BlockRasterizer;

    fn layer<'a>(
        text: &'a str,
        color: Rgb888,
    ) -> TextLayer<'a> {
        TextLayer {
            text,
            color,
            layout: &LABEL_LAYOUT,
        }
    }

    #[test]
    fn test_filled_buffer() {
        let buf = PixelBuffer::filled(RED);
        assert_eq!(buf.pixels().len(), PIXEL_COUNT);
        assert!(buf.pixels().iter().all(|&c| c == RED));
        assert_eq!(buf.size(), Size::new(72, 72));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let buf = PixelBuffer::default();
        assert_eq!(buf.pixel(Point::new(0, 0)), Some(BLACK));
        assert_eq!(buf.pixel(Point::new(71, 71)), Some(BLACK));
        assert_eq!(buf.pixel(Point::new(72, 0)), None);
        assert_eq!(buf.pixel(Point::new(0, -1)), None);
    }

    #[test]
    fn test_draw_clips_to_key() {
        let mut buf = PixelBuffer::default();
        Rectangle::new(Point::new(60, 60), Size::new(40, 40))
            .into_styled(PrimitiveStyle::with_fill(GREEN))
            .draw(&mut buf)
            .ok();

        assert_eq!(buf.pixel(Point::new(59, 59)), Some(BLACK));
        assert_eq!(buf.pixel(Point::new(60, 60)), Some(GREEN));
        assert_eq!(buf.pixel(Point::new(71, 71)), Some(GREEN));
    }

    #[test]
    fn test_fill_solid_outside_is_noop() {
        let mut buf = PixelBuffer::default();
        buf.fill_solid(&Rectangle::new(Point::new(100, 100), Size::new(5, 5)), RED)
            .ok();
        assert_eq!(buf, PixelBuffer::default());
    }

    #[test]
    fn test_rgb_byte_roundtrip_and_order() {
        let mut buf = PixelBuffer::default();
        Pixel(Point::new(1, 0), Rgb888::new(1, 2, 3)).draw(&mut buf).ok();

        let rgb = buf.to_rgb_bytes();
        assert_eq!(rgb.len(), IMAGE_BYTES);
        assert_eq!(&rgb[3..6], &[1, 2, 3]);
        assert_eq!(&buf.to_bgr_bytes()[3..6], &[3, 2, 1]);
        assert_eq!(PixelBuffer::from_rgb_bytes(&rgb), Ok(buf));
    }

    #[test]
    fn test_from_rgb_bytes_wrong_size() {
        assert_eq!(
            PixelBuffer::from_rgb_bytes(&[0; 10]),
            Err(AssetError::BitmapSize {
                expected: IMAGE_BYTES,
                found: 10,
            })
        );
    }

    #[test]
    fn test_compose_empty_text_is_background_only() {
        let image = compose(Background::Solid(PRESSED_BLUE), &layer("", WHITE), &BlockRasterizer).unwrap();
        assert_eq!(image, PixelBuffer::filled(PRESSED_BLUE));
    }

    #[test]
    fn test_compose_bitmap_background_is_copied() {
        let bitmap = PixelBuffer::filled(GREEN);
        let image = compose(Background::Bitmap(&bitmap), &layer("", WHITE), &BlockRasterizer).unwrap();
        assert_eq!(image, bitmap);
    }

    #[test]
    fn test_compose_text_on_top() {
        let image = compose(Background::Solid(RED), &layer("AB", WHITE), &BlockRasterizer).unwrap();
        let origin = LABEL_LAYOUT.layout_for(2).unwrap().origin;

        assert_eq!(image.pixel(origin), Some(WHITE), "text must overwrite the background");
        assert_eq!(image.pixel(Point::new(0, 0)), Some(RED));
    }

    #[test]
    fn test_compose_uses_widget_layout() {
        let text = TextLayer {
            text: "X",
            color: WHITE,
            layout: &INDICATOR_LAYOUT,
        };
        let image = compose(Background::Solid(BLACK), &text, &BlockRasterizer).unwrap();

        assert_eq!(image.pixel(INDICATOR_LAYOUT.layout_for(1).unwrap().origin), Some(WHITE));
        assert_eq!(image.pixel(LABEL_LAYOUT.layout_for(1).unwrap().origin), Some(BLACK));
    }

    #[test]
    fn test_compose_rejects_long_label() {
        let result = compose(Background::Solid(BLACK), &layer("TOOLONG", WHITE), &BlockRasterizer);
        assert_eq!(result, Err(WidgetError::LabelTooLong { len: 7 }));
    }

    #[test]
    fn test_compose_propagates_raster_error() {
        let result = compose(Background::Solid(BLACK), &layer("né", WHITE), &FontFamily::profont());
        assert_eq!(result, Err(WidgetError::Rasterization(RasterError::UnsupportedGlyph('é'))));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let font = FontFamily::profont();
        let a = compose(Background::Solid(PRESSED_BLUE), &layer("HELLO", WHITE), &font).unwrap();
        let b = compose(Background::Solid(PRESSED_BLUE), &layer("HELLO", WHITE), &font).unwrap();
        assert_eq!(a, b);
    }
}
