//! Desktop keypad simulator.
//!
//! Plays the part of the keypad for the keydeck widgets: a window with a 5x3
//! key grid that receives every pushed key image, mouse clicks as key
//! presses, and the widget log under the grid.
//!
//! # Controls
//!
//! - Mouse button down/up on a key: Pressed/Released
//! - Close the window to quit

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod grid;
mod logs;
mod sink;
mod timing;

use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use embedded_graphics_simulator::sdl2::MouseButton;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorEvent, Window};
use keydeck_widgets::colors::{GREEN, RED, YELLOW};
use keydeck_widgets::{
    Assets,
    BuiltinAssets,
    Deck,
    IndicatorButton,
    IndicatorColor,
    IndicatorOptions,
    Label,
    LabelOptions,
    PressState,
    WidgetError,
    log_error,
    log_info,
};

use crate::grid::{LOG_PANE, key_at};
use crate::logs::draw_log_pane;
use crate::sink::SimulatorSink;
use crate::timing::FRAME_TIME;

fn main() {
    let assets = match Assets::load(&BuiltinAssets) {
        Ok(assets) => Arc::new(assets),
        Err(e) => {
            eprintln!("cannot load assets: {e}");
            std::process::exit(1);
        }
    };

    let sink = Rc::new(SimulatorSink::new());
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Keydeck Sim", &output_settings);

    let deck = match build_deck(&sink, &assets) {
        Ok(deck) => deck,
        Err(e) => {
            eprintln!("cannot set up keys: {e}");
            std::process::exit(1);
        }
    };
    run(deck, &sink, &mut window);
}

/// Demo layout: labels on the top row, indicator buttons below.
fn build_deck(
    sink: &Rc<SimulatorSink>,
    assets: &Arc<Assets>,
) -> Result<Deck<'static>, WidgetError> {
    let mut deck = Deck::new();

    for (index, text) in [(0, "A"), (1, "OK"), (2, "MUTE"), (3, "HELLO")] {
        let options = LabelOptions::default()
            .text(text)
            .on_event(|index, state| log_info!("key {} {:?}", index, state));
        deck.insert(Box::new(Label::new(Rc::clone(sink), Arc::clone(assets), index, options)))?;
    }
    let warn = LabelOptions::default().text("WARN").text_color(YELLOW);
    deck.insert(Box::new(Label::new(Rc::clone(sink), Arc::clone(assets), 4, warn)))?;

    let buttons = [
        (5, "REC", IndicatorColor::Red, false),
        (6, "LIVE", IndicatorColor::Green, true),
        (7, "MIC", IndicatorColor::Yellow, false),
        (8, "CAM", IndicatorColor::Green, false),
        (9, "", IndicatorColor::Red, true),
    ];
    for (index, text, color, state) in buttons {
        let options = IndicatorOptions::default().text(text).color(color).state(state);
        deck.insert(Box::new(IndicatorButton::new(
            Rc::clone(sink),
            Arc::clone(assets),
            index,
            options,
        )))?;
    }

    for (index, text, color) in [(10, "1", RED), (12, "2", GREEN), (14, "3", YELLOW)] {
        let options = LabelOptions::default().text(text).text_color(color);
        deck.insert(Box::new(Label::new(Rc::clone(sink), Arc::clone(assets), index, options)))?;
    }

    Ok(deck)
}

fn run(
    mut deck: Deck<'_>,
    sink: &SimulatorSink,
    window: &mut Window,
) {
    if let Err(e) = deck.draw_all() {
        log_error!("initial draw: {}", e);
    }
    log_info!("{} keys ready", deck.len());

    // Release goes to the key that saw the press, wherever the cursor is now.
    let mut held: Option<u8> = None;

    loop {
        let frame_start = Instant::now();

        draw_log_pane(&mut *sink.display_mut(), LOG_PANE);
        window.update(&sink.display());

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    point,
                } => {
                    if let Some(index) = key_at(point) {
                        held = Some(index);
                        handle_key(&mut deck, index, PressState::Pressed);
                    }
                }
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    ..
                } => {
                    if let Some(index) = held.take() {
                        handle_key(&mut deck, index, PressState::Released);
                    }
                }
                _ => {}
            }
        }

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}

/// Route one key event; the deck draws the key if the widget did not.
fn handle_key(
    deck: &mut Deck<'_>,
    index: u8,
    state: PressState,
) {
    if let Err(e) = deck.handle(index, state) {
        log_error!("key {}: {}", index, e);
    }
}
