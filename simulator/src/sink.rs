//! Device sink that blits key images into the simulator window.

use std::cell::{Ref, RefCell, RefMut};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;
use keydeck_widgets::colors::BLACK;
use keydeck_widgets::{DeviceSink, PixelBuffer, SinkError};

use crate::grid::{WINDOW_SIZE, key_area};

/// The simulated keypad surface. Widgets share it through an `Rc`.
pub struct SimulatorSink {
    display: RefCell<SimulatorDisplay<Rgb888>>,
}

impl SimulatorSink {
    /// A blank window-sized display.
    pub fn new() -> Self {
        let mut display = SimulatorDisplay::new(WINDOW_SIZE);
        display.clear(BLACK).ok();
        Self {
            display: RefCell::new(display),
        }
    }

    /// Borrow the display, e.g. to update the window.
    pub fn display(&self) -> Ref<'_, SimulatorDisplay<Rgb888>> { self.display.borrow() }

    /// Mutably borrow the display for drawing outside the key grid.
    pub fn display_mut(&self) -> RefMut<'_, SimulatorDisplay<Rgb888>> { self.display.borrow_mut() }
}

impl DeviceSink for SimulatorSink {
    fn push(
        &self,
        index: u8,
        image: &PixelBuffer,
    ) -> Result<(), SinkError> {
        let area = key_area(index).ok_or(SinkError::KeyOutOfRange(index))?;
        // Only fails if the host holds a display borrow across a push.
        let mut display = self.display.try_borrow_mut().map_err(|_| SinkError::Disconnected)?;

        display.fill_contiguous(&area, image.pixels().iter().copied()).ok();
        Ok(())
    }
}
