//! Toggle key with an indicator lamp.
//!
//! # State Machine
//!
//! | Event / call            | `state`   | Renders |
//! |-------------------------|-----------|---------|
//! | Pressed                 | toggled   | no      |
//! | Released                | unchanged | no      |
//! | `set_state`             | set       | yes     |
//! | `set_text`              | unchanged | yes     |
//! | `set_indicator_color`   | unchanged | yes     |
//!
//! Key events only flip the state; the host decides when to draw. The shown
//! bitmap is the configured color while toggled on and the off lamp otherwise.

use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb888;

use super::{KeyFace, PressState, Widget};
use crate::assets::Assets;
use crate::colors::{GREEN, LAMP_OFF, RED, WHITE, YELLOW};
use crate::error::WidgetError;
use crate::layout::INDICATOR_LAYOUT;
use crate::sink::DeviceSink;
use crate::surface::{Background, PixelBuffer};

// =============================================================================
// Indicator Color
// =============================================================================

/// Lamp variant. Each one has its own pre-loaded bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum IndicatorColor {
    /// Red lamp.
    Red,
    /// Green lamp, the default.
    #[default]
    Green,
    /// Yellow lamp.
    Yellow,
    /// Unlit lamp. Shown by every button that is toggled off.
    Off,
}

impl IndicatorColor {
    /// Every variant, in load order.
    pub const ALL: [Self; 4] = [Self::Off, Self::Red, Self::Green, Self::Yellow];

    /// Lower-case name, as used for asset file names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Off => "off",
        }
    }

    /// Fill color of the lamp.
    pub const fn lamp_color(self) -> Rgb888 {
        match self {
            Self::Red => RED,
            Self::Green => GREEN,
            Self::Yellow => YELLOW,
            Self::Off => LAMP_OFF,
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Construction options for [`IndicatorButton`].
#[derive(Clone, Debug)]
pub struct IndicatorOptions {
    /// Initial label, at most five characters.
    pub text: String,
    /// Glyph color.
    pub text_color: Rgb888,
    /// Lamp color while toggled on.
    pub color: IndicatorColor,
    /// Initial toggle state.
    pub state: bool,
}

impl Default for IndicatorOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: WHITE,
            color: IndicatorColor::Green,
            state: false,
        }
    }
}

impl IndicatorOptions {
    /// Set the initial label.
    pub fn text(
        mut self,
        text: impl Into<String>,
    ) -> Self {
        self.text = text.into();
        self
    }

    /// Set the glyph color.
    pub fn text_color(
        mut self,
        color: Rgb888,
    ) -> Self {
        self.text_color = color;
        self
    }

    /// Set the lamp color shown while toggled on.
    pub fn color(
        mut self,
        color: IndicatorColor,
    ) -> Self {
        self.color = color;
        self
    }

    /// Set the initial toggle state.
    pub fn state(
        mut self,
        state: bool,
    ) -> Self {
        self.state = state;
        self
    }
}

// =============================================================================
// Indicator Button
// =============================================================================

/// Key that toggles a lamp on every press.
pub struct IndicatorButton<S> {
    face: KeyFace<S>,
    color: IndicatorColor,
    state: bool,
}

impl<S: DeviceSink> IndicatorButton<S> {
    /// Create a button on key `index`. Nothing is drawn until the first
    /// [`draw`](Widget::draw) or setter.
    pub fn new(
        sink: S,
        assets: Arc<Assets>,
        index: u8,
        options: IndicatorOptions,
    ) -> Self {
        Self {
            face: KeyFace::new(sink, assets, index, &INDICATOR_LAYOUT, options.text, options.text_color),
            color: options.color,
            state: options.state,
        }
    }

    /// Whether the lamp is on.
    #[inline]
    pub fn state(&self) -> bool { self.state }

    /// Configured lamp color.
    #[inline]
    pub fn indicator_color(&self) -> IndicatorColor { self.color }

    /// Glyph color.
    #[inline]
    pub fn text_color(&self) -> Rgb888 { self.face.text_color() }

    /// Lamp variant currently shown.
    pub fn shown_indicator(&self) -> IndicatorColor {
        if self.state { self.color } else { IndicatorColor::Off }
    }

    /// Set the toggle state, then render and push.
    pub fn set_state(
        &mut self,
        state: bool,
    ) -> Result<(), WidgetError> {
        self.state = state;
        self.draw()
    }

    /// Replace the label, then render and push.
    ///
    /// A label longer than five characters is kept but fails with
    /// [`WidgetError::LabelTooLong`]; nothing is pushed.
    pub fn set_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<(), WidgetError> {
        self.face.set_text(text.into());
        self.draw()
    }

    /// Change the lamp color, then render and push.
    pub fn set_indicator_color(
        &mut self,
        color: IndicatorColor,
    ) -> Result<(), WidgetError> {
        self.color = color;
        self.draw()
    }

    /// Change the glyph color. Shown on the next draw.
    pub fn set_text_color(
        &mut self,
        color: Rgb888,
    ) {
        self.face.set_text_color(color);
    }

    fn background(&self) -> Background<'_> { Background::Bitmap(self.face.assets().indicator(self.shown_indicator())) }
}

impl<S: DeviceSink> Widget for IndicatorButton<S> {
    fn index(&self) -> u8 { self.face.index() }

    fn text(&self) -> &str { self.face.text() }

    fn render(&self) -> Result<PixelBuffer, WidgetError> { self.face.render(self.background()) }

    fn draw(&self) -> Result<(), WidgetError> { self.face.present(self.background()) }

    fn redraws_on_event(&self) -> bool { false }

    /// Flip the state on press. Never renders.
    fn on_event(
        &mut self,
        state: PressState,
    ) -> Result<(), WidgetError> {
        if state == PressState::Pressed {
            self.state = !self.state;
            crate::log_trace!("key {} toggled {}", self.face.index(), self.state);
        }
        Ok(())
    }
}
