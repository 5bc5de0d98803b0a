//! Device sinks: where finished key images go.
//!
//! A sink is the only I/O boundary of the widgets. It takes `&self` so that
//! one transport can be shared by every widget on the keypad; a sink that talks
//! to a single physical link must serialize writes itself.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::KEY_COUNT;
use crate::error::SinkError;
use crate::surface::PixelBuffer;

/// Accepts finished key images.
pub trait DeviceSink {
    /// Show `image` on key `index`.
    fn push(
        &self,
        index: u8,
        image: &PixelBuffer,
    ) -> Result<(), SinkError>;
}

impl<T: DeviceSink + ?Sized> DeviceSink for &T {
    fn push(
        &self,
        index: u8,
        image: &PixelBuffer,
    ) -> Result<(), SinkError> {
        (**self).push(index, image)
    }
}

impl<T: DeviceSink + ?Sized> DeviceSink for Rc<T> {
    fn push(
        &self,
        index: u8,
        image: &PixelBuffer,
    ) -> Result<(), SinkError> {
        (**self).push(index, image)
    }
}

impl<T: DeviceSink + ?Sized> DeviceSink for Arc<T> {
    fn push(
        &self,
        index: u8,
        image: &PixelBuffer,
    ) -> Result<(), SinkError> {
        (**self).push(index, image)
    }
}

// =============================================================================
// In-Memory Sink
// =============================================================================

/// Sink that keeps the last image of every key in memory.
///
/// Useful for headless hosts and for checking what a device would show.
/// [`disconnect`](Self::disconnect) makes every later push fail, as if the
/// keypad had been unplugged.
pub struct MemorySink {
    frames: Mutex<[Option<PixelBuffer>; KEY_COUNT]>,
    pushes: AtomicUsize,
    connected: AtomicBool,
}

impl MemorySink {
    /// Create a connected sink with all keys blank.
    pub const fn new() -> Self {
        Self {
            frames: Mutex::new([const { None }; KEY_COUNT]),
            pushes: AtomicUsize::new(0),
            connected: AtomicBool::new(true),
        }
    }

    /// Last image pushed to key `index`.
    pub fn frame(
        &self,
        index: u8,
    ) -> Option<PixelBuffer> {
        let frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        frames.get(usize::from(index)).cloned().flatten()
    }

    /// Number of successful pushes so far.
    #[inline]
    pub fn push_count(&self) -> usize { self.pushes.load(Ordering::Relaxed) }

    /// Make later pushes fail with [`SinkError::Disconnected`].
    pub fn disconnect(&self) { self.connected.store(false, Ordering::Relaxed); }

    /// Accept pushes again.
    pub fn reconnect(&self) { self.connected.store(true, Ordering::Relaxed); }
}

impl Default for MemorySink {
    fn default() -> Self { Self::new() }
}

impl DeviceSink for MemorySink {
    fn push(
        &self,
        index: u8,
        image: &PixelBuffer,
    ) -> Result<(), SinkError> {
        if !self.connected.load(Ordering::Relaxed) {
            return Err(SinkError::Disconnected);
        }

        let mut frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = frames
            .get_mut(usize::from(index))
            .ok_or(SinkError::KeyOutOfRange(index))?;
        *slot = Some(image.clone());
        self.pushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::RED;

    #[test]
    fn test_memory_sink_records_last_frame() {
        let sink = MemorySink::new();
        assert_eq!(sink.frame(3), None);

        sink.push(3, &PixelBuffer::default()).unwrap();
        sink.push(3, &PixelBuffer::filled(RED)).unwrap();

        assert_eq!(sink.frame(3), Some(PixelBuffer::filled(RED)));
        assert_eq!(sink.frame(4), None);
        assert_eq!(sink.push_count(), 2);
    }

    #[test]
    fn test_memory_sink_rejects_unknown_key() {
        let sink = MemorySink::new();
        let result = sink.push(KEY_COUNT as u8, &PixelBuffer::default());
        assert_eq!(result, Err(SinkError::KeyOutOfRange(KEY_COUNT as u8)));
        assert_eq!(sink.push_count(), 0);
    }

    #[test]
    fn test_memory_sink_disconnect() {
        let sink = MemorySink::new();
        sink.disconnect();
        assert_eq!(sink.push(0, &PixelBuffer::default()), Err(SinkError::Disconnected));
        assert_eq!(sink.frame(0), None);

        sink.reconnect();
        assert!(sink.push(0, &PixelBuffer::default()).is_ok());
    }

    #[test]
    fn test_shared_handles_forward() {
        let sink = Arc::new(MemorySink::new());
        let shared = Arc::clone(&sink);
        shared.push(1, &PixelBuffer::filled(RED)).unwrap();
        (&*sink).push(2, &PixelBuffer::filled(RED)).unwrap();

        let local = Rc::new(MemorySink::new());
        local.push(0, &PixelBuffer::default()).unwrap();

        assert_eq!(sink.push_count(), 2);
        assert_eq!(local.push_count(), 1);
    }
}
