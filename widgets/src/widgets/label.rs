//! Plain colored label key.
//!
//! # State Machine
//!
//! | Event    | Background     | Then                        |
//! |----------|----------------|-----------------------------|
//! | Pressed  | `PRESSED_BLUE` | render, push, callback      |
//! | Released | `IDLE_BLACK`   | render, push, callback      |
//!
//! Repeating an event re-renders the same image; it is never an error.

use std::sync::Arc;

use embedded_graphics::pixelcolor::Rgb888;

use super::{KeyFace, PressState, Widget};
use crate::assets::Assets;
use crate::colors::{IDLE_BLACK, PRESSED_BLUE, WHITE};
use crate::error::WidgetError;
use crate::layout::LABEL_LAYOUT;
use crate::sink::DeviceSink;
use crate::surface::{Background, PixelBuffer};

/// Called with `(index, state)` after a label handled a key event.
pub type PressCallback = Box<dyn FnMut(u8, PressState) + Send>;

/// Background shown for a key state.
const fn background_for(state: PressState) -> Rgb888 {
    match state {
        PressState::Pressed => PRESSED_BLUE,
        PressState::Released => IDLE_BLACK,
    }
}

/// Construction options for [`Label`].
pub struct LabelOptions {
    /// Initial label, at most five characters.
    pub text: String,
    /// Glyph color.
    pub text_color: Rgb888,
    /// Key state the label starts in; selects the initial background.
    pub state: PressState,
    /// Called after every key event.
    pub on_event: Option<PressCallback>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: WHITE,
            state: PressState::Released,
            on_event: None,
        }
    }
}

impl LabelOptions {
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

    /// Set the initial key state.
    pub fn state(
        mut self,
        state: PressState,
    ) -> Self {
        self.state = state;
        self
    }

    /// Register a key event callback.
    pub fn on_event<F>(
        mut self,
        callback: F,
    ) -> Self
    where
        F: FnMut(u8, PressState) + Send + 'static,
    {
        self.on_event = Some(Box::new(callback));
        self
    }
}

/// Text on a solid background that lights up while the key is held.
pub struct Label<S> {
    face: KeyFace<S>,
    background: Rgb888,
    state: PressState,
    callback: Option<PressCallback>,
}

impl<S: DeviceSink> Label<S> {
    /// Create a label on key `index`. Nothing is drawn until the first
    /// [`draw`](Widget::draw), setter or event.
    pub fn new(
        sink: S,
        assets: Arc<Assets>,
        index: u8,
        options: LabelOptions,
    ) -> Self {
        Self {
            face: KeyFace::new(sink, assets, index, &LABEL_LAYOUT, options.text, options.text_color),
            background: background_for(options.state),
            state: options.state,
            callback: options.on_event,
        }
    }

    /// Replace the label, then render and push it.
    ///
    /// A label longer than five characters is kept but fails with
    /// [`WidgetError::LabelTooLong`]; the key keeps showing its previous image.
    pub fn set_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<(), WidgetError> {
        self.face.set_text(text.into());
        self.draw()
    }

    /// Change the glyph color. Shown on the next draw.
    pub fn set_text_color(
        &mut self,
        color: Rgb888,
    ) {
        self.face.set_text_color(color);
    }

    /// Change the background. Shown on the next draw; the next key event
    /// replaces it again.
    pub fn set_background(
        &mut self,
        color: Rgb888,
    ) {
        self.background = color;
    }

    /// Replace the key event callback.
    pub fn set_callback(
        &mut self,
        callback: Option<PressCallback>,
    ) {
        self.callback = callback;
    }

    /// Current background color.
    #[inline]
    pub fn background(&self) -> Rgb888 { self.background }

    /// Glyph color.
    #[inline]
    pub fn text_color(&self) -> Rgb888 { self.face.text_color() }

    /// Last key state seen.
    #[inline]
    pub fn state(&self) -> PressState { self.state }
}

impl<S: DeviceSink> Widget for Label<S> {
    fn index(&self) -> u8 { self.face.index() }

    fn text(&self) -> &str { self.face.text() }

    fn render(&self) -> Result<PixelBuffer, WidgetError> { self.face.render(Background::Solid(self.background)) }

    fn draw(&self) -> Result<(), WidgetError> { self.face.present(Background::Solid(self.background)) }

    fn redraws_on_event(&self) -> bool { true }

    /// Switch background, redraw, then report the event.
    ///
    /// The callback runs even when the redraw fails, since the key event did
    /// happen; the draw error is still returned.
    fn on_event(
        &mut self,
        state: PressState,
    ) -> Result<(), WidgetError> {
        self.state = state;
        self.background = background_for(state);
        let drawn = self.draw();

        if let Some(callback) = self.callback.as_mut() {
            callback(self.face.index(), state);
        }
        drawn
    }
}
