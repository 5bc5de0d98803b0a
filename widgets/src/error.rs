//! Error types for rendering, transport and asset loading.
//!
//! Render-path errors abort the current render or push and go straight back to
//! the caller. Nothing in this crate retries.

use core::fmt;

use crate::widgets::IndicatorColor;

/// Failure of the glyph rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    /// The font has no glyph for this character.
    UnsupportedGlyph(char),
    /// Requested font size is not a positive, finite number.
    InvalidSize,
}

impl fmt::Display for RasterError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::UnsupportedGlyph(c) => write!(f, "no glyph for {c:?}"),
            Self::InvalidSize => f.write_str("invalid font size"),
        }
    }
}

impl std::error::Error for RasterError {}

/// Failure of a device sink to accept a key image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The device has no key with this index.
    KeyOutOfRange(u8),
    /// The device is gone.
    Disconnected,
}

impl fmt::Display for SinkError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::KeyOutOfRange(index) => write!(f, "key {index} does not exist on the device"),
            Self::Disconnected => f.write_str("device disconnected"),
        }
    }
}

impl std::error::Error for SinkError {}

/// Errors returned by widget rendering, drawing and event handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetError {
    /// Label has more than [`MAX_LABEL_CHARS`](crate::config::MAX_LABEL_CHARS) characters.
    LabelTooLong {
        /// Character count of the rejected label.
        len: usize,
    },
    /// Drawing the label text failed.
    Rasterization(RasterError),
    /// Pushing the finished image to the device failed.
    DeviceWrite(SinkError),
    /// No widget slot with this index.
    UnknownKey(u8),
}

impl fmt::Display for WidgetError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::LabelTooLong { len } => write!(f, "label has {len} characters, at most 5 fit on a key"),
            Self::Rasterization(e) => write!(f, "text rasterization failed: {e}"),
            Self::DeviceWrite(e) => write!(f, "device write failed: {e}"),
            Self::UnknownKey(index) => write!(f, "no widget at key {index}"),
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rasterization(e) => Some(e),
            Self::DeviceWrite(e) => Some(e),
            Self::LabelTooLong { .. } | Self::UnknownKey(_) => None,
        }
    }
}

impl From<RasterError> for WidgetError {
    fn from(e: RasterError) -> Self { Self::Rasterization(e) }
}

impl From<SinkError> for WidgetError {
    fn from(e: SinkError) -> Self { Self::DeviceWrite(e) }
}

/// Startup failure while loading the font or indicator bitmaps.
///
/// There is no degraded mode: a host that gets one of these must not build
/// any widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetError {
    /// The font resource could not be loaded.
    MissingFont,
    /// The bitmap for this indicator variant could not be loaded.
    MissingIndicator(IndicatorColor),
    /// A supplied bitmap does not match the key resolution.
    BitmapSize {
        /// Expected byte length.
        expected: usize,
        /// Byte length actually supplied.
        found: usize,
    },
}

impl fmt::Display for AssetError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::MissingFont => f.write_str("font resource missing"),
            Self::MissingIndicator(color) => write!(f, "indicator bitmap {} missing", color.name()),
            Self::BitmapSize { expected, found } => {
                write!(f, "bitmap has {found} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for AssetError {}
