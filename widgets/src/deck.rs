//! Key event routing for a full keypad.
//!
//! A [`Deck`] owns one widget per occupied key. Hosts feed it raw device
//! events and it forwards each to the widget on that key; `&mut self` on
//! every entry point means a widget's handler and its push never overlap.

use crate::config::KEY_COUNT;
use crate::error::WidgetError;
use crate::widgets::{PressState, Widget};

/// Boxed widget stored in a [`Deck`].
pub type DeckWidget<'a> = Box<dyn Widget + 'a>;

/// Widgets indexed by key.
pub struct Deck<'a> {
    keys: [Option<DeckWidget<'a>>; KEY_COUNT],
}

impl<'a> Deck<'a> {
    /// An empty keypad.
    pub fn new() -> Self {
        Self {
            keys: [const { None }; KEY_COUNT],
        }
    }

    /// Place `widget` on its key, returning the widget it replaced.
    pub fn insert(
        &mut self,
        widget: DeckWidget<'a>,
    ) -> Result<Option<DeckWidget<'a>>, WidgetError> {
        let index = widget.index();
        let slot = self
            .keys
            .get_mut(usize::from(index))
            .ok_or(WidgetError::UnknownKey(index))?;
        Ok(slot.replace(widget))
    }

    /// Remove the widget on key `index`.
    pub fn remove(
        &mut self,
        index: u8,
    ) -> Option<DeckWidget<'a>> {
        self.keys.get_mut(usize::from(index)).and_then(Option::take)
    }

    /// Widget on key `index`.
    pub fn get(
        &self,
        index: u8,
    ) -> Option<&(dyn Widget + 'a)> {
        self.keys.get(usize::from(index))?.as_deref()
    }

    /// Mutable widget on key `index`.
    pub fn get_mut(
        &mut self,
        index: u8,
    ) -> Option<&mut (dyn Widget + 'a)> {
        match self.keys.get_mut(usize::from(index)) {
            Some(Some(widget)) => Some(widget.as_mut()),
            _ => None,
        }
    }

    /// Number of occupied keys.
    pub fn len(&self) -> usize { self.keys.iter().flatten().count() }

    /// Whether no key is occupied.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Route a key event to the widget on key `index`.
    pub fn dispatch(
        &mut self,
        index: u8,
        state: PressState,
    ) -> Result<(), WidgetError> {
        let Some(widget) = self.get_mut(index) else {
            crate::log_warn!("{:?} on empty key {}", state, index);
            return Err(WidgetError::UnknownKey(index));
        };
        widget.on_event(state)
    }

    /// Route a key event and make sure the key shows the result.
    ///
    /// Widgets that redraw on their own are pushed once; the others are drawn
    /// after the event.
    pub fn handle(
        &mut self,
        index: u8,
        state: PressState,
    ) -> Result<(), WidgetError> {
        self.dispatch(index, state)?;
        match self.get(index) {
            Some(widget) if !widget.redraws_on_event() => widget.draw(),
            _ => Ok(()),
        }
    }

    /// Render and push the widget on key `index`.
    pub fn draw(
        &self,
        index: u8,
    ) -> Result<(), WidgetError> {
        let Some(widget) = self.get(index) else {
            crate::log_warn!("draw on empty key {}", index);
            return Err(WidgetError::UnknownKey(index));
        };
        widget.draw()
    }

    /// Render and push every widget in key order. Stops at the first error.
    pub fn draw_all(&self) -> Result<(), WidgetError> {
        self.keys.iter().flatten().try_for_each(|widget| widget.draw())
    }
}

impl Default for Deck<'_> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{IDLE_BLACK, PRESSED_BLUE};
    use crate::error::SinkError;
    use crate::sink::MemorySink;
    use crate::surface::PixelBuffer;
    use crate::testing::profont_assets;
    use crate::widgets::{IndicatorButton, IndicatorColor, IndicatorOptions, Label, LabelOptions};

    #[test]
    fn test_insert_and_replace() {
        let sink = MemorySink::new();
        let assets = profont_assets();
        let mut deck = Deck::new();
        assert!(deck.is_empty());

        let first = Label::new(&sink, assets.clone(), 3, LabelOptions::default().text("A"));
        assert!(deck.insert(Box::new(first)).unwrap().is_none());

        let second = Label::new(&sink, assets, 3, LabelOptions::default().text("B"));
        let replaced = deck.insert(Box::new(second)).unwrap();
        assert_eq!(replaced.map(|w| w.text().to_owned()).as_deref(), Some("A"));
        assert_eq!(deck.get(3).map(|w| w.text()), Some("B"));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_insert_out_of_range() {
        let sink = MemorySink::new();
        let mut deck = Deck::new();
        let label = Label::new(&sink, profont_assets(), KEY_COUNT as u8, LabelOptions::default());
        assert!(matches!(
            deck.insert(Box::new(label)),
            Err(WidgetError::UnknownKey(15))
        ));
    }

    #[test]
    fn test_dispatch_routes_to_widget() {
        let sink = MemorySink::new();
        let mut deck = Deck::new();
        deck.insert(Box::new(Label::new(&sink, profont_assets(), 0, LabelOptions::default())))
            .unwrap();

        deck.dispatch(0, PressState::Pressed).unwrap();
        assert_eq!(sink.frame(0), Some(PixelBuffer::filled(PRESSED_BLUE)));
        deck.dispatch(0, PressState::Released).unwrap();
        assert_eq!(sink.frame(0), Some(PixelBuffer::filled(IDLE_BLACK)));
    }

    #[test]
    fn test_dispatch_unknown_key() {
        let mut deck = Deck::new();
        assert_eq!(deck.dispatch(4, PressState::Pressed), Err(WidgetError::UnknownKey(4)));
        assert_eq!(deck.dispatch(200, PressState::Pressed), Err(WidgetError::UnknownKey(200)));
        assert_eq!(deck.draw(4), Err(WidgetError::UnknownKey(4)));
    }

    #[test]
    fn test_press_then_host_draw() {
        let sink = MemorySink::new();
        let assets = profont_assets();
        let mut deck = Deck::new();
        let button = IndicatorButton::new(
            &sink,
            assets.clone(),
            2,
            IndicatorOptions::default().color(IndicatorColor::Yellow),
        );
        deck.insert(Box::new(button)).unwrap();

        deck.dispatch(2, PressState::Pressed).unwrap();
        assert_eq!(sink.push_count(), 0);
        deck.draw(2).unwrap();
        assert_eq!(sink.frame(2).as_ref(), Some(assets.indicator(IndicatorColor::Yellow)));
    }

    #[test]
    fn test_handle_pushes_each_key_once() {
        let sink = MemorySink::new();
        let assets = profont_assets();
        let mut deck = Deck::new();
        deck.insert(Box::new(Label::new(&sink, assets.clone(), 0, LabelOptions::default().text("GO"))))
            .unwrap();
        deck.insert(Box::new(IndicatorButton::new(&sink, assets.clone(), 1, IndicatorOptions::default())))
            .unwrap();

        deck.handle(0, PressState::Pressed).unwrap();
        assert_eq!(sink.push_count(), 1, "label presents itself, no second push");

        deck.handle(1, PressState::Pressed).unwrap();
        assert_eq!(sink.push_count(), 2);
        assert_eq!(sink.frame(1).as_ref(), Some(assets.indicator(IndicatorColor::Green)));
    }

    #[test]
    fn test_handle_unknown_key() {
        let mut deck = Deck::new();
        assert_eq!(deck.handle(9, PressState::Released), Err(WidgetError::UnknownKey(9)));
    }

    #[test]
    fn test_draw_all() {
        let sink = MemorySink::new();
        let assets = profont_assets();
        let mut deck = Deck::new();
        for index in [0, 5, 14] {
            deck.insert(Box::new(Label::new(&sink, assets.clone(), index, LabelOptions::default())))
                .unwrap();
        }

        deck.draw_all().unwrap();
        assert_eq!(sink.push_count(), 3);
        assert!(sink.frame(14).is_some());
        assert!(sink.frame(1).is_none());
    }

    #[test]
    fn test_draw_all_stops_at_first_error() {
        let sink = MemorySink::new();
        let assets = profont_assets();
        let mut deck = Deck::new();
        deck.insert(Box::new(Label::new(&sink, assets.clone(), 0, LabelOptions::default())))
            .unwrap();
        deck.insert(Box::new(Label::new(&sink, assets, 1, LabelOptions::default())))
            .unwrap();
        sink.disconnect();

        assert_eq!(deck.draw_all(), Err(WidgetError::DeviceWrite(SinkError::Disconnected)));
    }

    #[test]
    fn test_remove() {
        let sink = MemorySink::new();
        let mut deck = Deck::new();
        deck.insert(Box::new(Label::new(&sink, profont_assets(), 7, LabelOptions::default())))
            .unwrap();

        assert!(deck.remove(7).is_some());
        assert!(deck.remove(7).is_none());
        assert!(deck.get(7).is_none());
    }
}
