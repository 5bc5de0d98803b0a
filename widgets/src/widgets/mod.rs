//! Key widgets.
//!
//! Both widget kinds are a key index, a label and a text color on top of a
//! different bottom layer:
//!
//! - [`Label`]: solid background that follows the physical key (blue while
//!   held, black when up)
//! - [`IndicatorButton`]: lamp bitmap that toggles on every press
//!
//! Each render is a full redraw into a fresh image, which is then pushed to
//! the widget's [`DeviceSink`]. A failed render pushes nothing.

mod indicator;
mod label;

use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb888;

pub use indicator::{IndicatorButton, IndicatorColor, IndicatorOptions};
pub use label::{Label, LabelOptions, PressCallback};

use crate::assets::Assets;
use crate::error::WidgetError;
use crate::layout::LayoutTable;
use crate::sink::DeviceSink;
use crate::surface::{Background, PixelBuffer, TextLayer, compose};

/// Physical key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PressState {
    /// Key went down.
    Pressed,
    /// Key came up.
    #[default]
    Released,
}

/// A renderable key bound to one device index.
pub trait Widget {
    /// Physical key index.
    fn index(&self) -> u8;

    /// Current label.
    fn text(&self) -> &str;

    /// Composite the current state into a fresh image without pushing it.
    fn render(&self) -> Result<PixelBuffer, WidgetError>;

    /// Render and push to the device.
    fn draw(&self) -> Result<(), WidgetError>;

    /// Whether [`on_event`](Self::on_event) already pushes a fresh image.
    /// Hosts draw after an event only when this is `false`.
    fn redraws_on_event(&self) -> bool;

    /// Handle a physical press or release.
    fn on_event(
        &mut self,
        state: PressState,
    ) -> Result<(), WidgetError>;
}

// =============================================================================
// Shared Key Face
// =============================================================================

/// State common to every widget kind: identity, label and output.
pub(crate) struct KeyFace<S> {
    index: u8,
    text: String,
    text_color: Rgb888,
    layout: &'static LayoutTable,
    assets: Arc<Assets>,
    sink: S,
}

impl<S: DeviceSink> KeyFace<S> {
    pub(crate) fn new(
        sink: S,
        assets: Arc<Assets>,
        index: u8,
        layout: &'static LayoutTable,
        text: String,
        text_color: Rgb888,
    ) -> Self {
        Self {
            index,
            text,
            text_color,
            layout,
            assets,
            sink,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> u8 { self.index }

    #[inline]
    pub(crate) fn text(&self) -> &str { &self.text }

    #[inline]
    pub(crate) fn text_color(&self) -> Rgb888 { self.text_color }

    #[inline]
    pub(crate) fn assets(&self) -> &Assets { &self.assets }

    pub(crate) fn set_text(
        &mut self,
        text: String,
    ) {
        self.text = text;
    }

    pub(crate) fn set_text_color(
        &mut self,
        color: Rgb888,
    ) {
        self.text_color = color;
    }

    /// Composite `background` under the label.
    pub(crate) fn render(
        &self,
        background: Background<'_>,
    ) -> Result<PixelBuffer, WidgetError> {
        let text = TextLayer {
            text: &self.text,
            color: self.text_color,
            layout: self.layout,
        };

        compose(background, &text, self.assets.font()).inspect_err(|e| {
            crate::log_warn!("key {} render aborted: {}", self.index, e);
        })
    }

    /// Render and push. Nothing reaches the sink unless the render succeeded.
    pub(crate) fn present(
        &self,
        background: Background<'_>,
    ) -> Result<(), WidgetError> {
        let image = self.render(background)?;
        self.sink.push(self.index, &image).map_err(|e| {
            crate::log_warn!("key {} push failed: {}", self.index, e);
            WidgetError::DeviceWrite(e)
        })?;

        crate::log_debug!("key {} pushed {:?}", self.index, self.text);
        Ok(())
    }
}
