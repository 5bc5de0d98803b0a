//! Glyph rasterization.
//!
//! The render pipeline only needs "draw this short ASCII string at size S with
//! its baseline starting at P". [`GlyphRasterizer`] is that seam; [`FontFamily`]
//! implements it with ProFont bitmap faces.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

use crate::error::RasterError;
use crate::surface::PixelBuffer;

/// Draws opaque text into a key image.
pub trait GlyphRasterizer {
    /// Draw `text` with its baseline's left edge at `origin`.
    fn draw_text(
        &self,
        target: &mut PixelBuffer,
        text: &str,
        font_size: f32,
        origin: Point,
        color: Rgb888,
    ) -> Result<(), RasterError>;
}

/// Shared, read-only font handed out by an [`AssetStore`](crate::assets::AssetStore).
pub type FontHandle = Box<dyn GlyphRasterizer + Send + Sync>;

// =============================================================================
// ProFont Family
// =============================================================================

/// ProFont faces by point size, smallest first.
const PROFONT_FACES: [(f32, &MonoFont<'static>); 7] = [
    (7.0, &PROFONT_7_POINT),
    (9.0, &PROFONT_9_POINT),
    (10.0, &PROFONT_10_POINT),
    (12.0, &PROFONT_12_POINT),
    (14.0, &PROFONT_14_POINT),
    (18.0, &PROFONT_18_POINT),
    (24.0, &PROFONT_24_POINT),
];

/// A set of monospaced bitmap faces at fixed point sizes.
///
/// A request is served by the largest face not bigger than the requested size;
/// anything below the smallest face uses the smallest. When drawing, the face
/// also steps down until the whole label fits between its origin and the
/// right edge of the key.
#[derive(Clone, Copy)]
pub struct FontFamily {
    faces: &'static [(f32, &'static MonoFont<'static>)],
}

impl FontFamily {
    /// The ProFont family, 7 to 24 pt.
    pub const fn profont() -> Self { Self { faces: &PROFONT_FACES } }

    /// Face used for `font_size`.
    pub fn face_for(
        &self,
        font_size: f32,
    ) -> Result<&'static MonoFont<'static>, RasterError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(RasterError::InvalidSize);
        }

        self.faces
            .iter()
            .rev()
            .find(|(points, _)| *points <= font_size)
            .or_else(|| self.faces.first())
            .map(|&(_, face)| face)
            .ok_or(RasterError::InvalidSize)
    }

    /// Largest face not bigger than `font_size` that draws `chars` characters
    /// within `available` pixels. Falls back to the smallest face.
    pub fn face_fitting(
        &self,
        font_size: f32,
        chars: usize,
        available: u32,
    ) -> Result<&'static MonoFont<'static>, RasterError> {
        let requested = self.face_for(font_size)?;
        let fitting = self
            .faces
            .iter()
            .rev()
            .filter(|(points, _)| *points <= font_size)
            .map(|&(_, face)| face)
            .find(|face| text_width(face, chars) <= available);

        Ok(fitting.or_else(|| self.faces.first().map(|&(_, face)| face)).unwrap_or(requested))
    }
}

/// Width in pixels of `chars` characters set in `face`.
pub fn text_width(
    face: &MonoFont<'_>,
    chars: usize,
) -> u32 {
    let chars = chars as u32;
    chars * face.character_size.width + chars.saturating_sub(1) * face.character_spacing
}

impl Default for FontFamily {
    fn default() -> Self { Self::profont() }
}

impl GlyphRasterizer for FontFamily {
    fn draw_text(
        &self,
        target: &mut PixelBuffer,
        text: &str,
        font_size: f32,
        origin: Point,
        color: Rgb888,
    ) -> Result<(), RasterError> {
        // ProFont only carries printable ASCII; refuse rather than draw '?'.
        if let Some(c) = text.chars().find(|c| !matches!(c, ' '..='~')) {
            return Err(RasterError::UnsupportedGlyph(c));
        }

        let available = (target.size().width as i32 - origin.x).max(0) as u32;
        let face = self.face_fitting(font_size, text.chars().count(), available)?;
        let style = MonoTextStyle::new(face, color);
        Text::with_baseline(text, origin, style, Baseline::Alphabetic)
            .draw(target)
            .ok();

        Ok(())
    }
}
