//! Log ring with levels and timestamps.
//!
//! Widgets and hosts log into one process-wide ring buffer that a host can
//! show on screen (the simulator draws it under the key grid). Each entry has
//! a level, a truncated message and a millisecond timestamp.
//!
//! # Log Levels
//!
//! - `Trace`: Gray - verbose debugging
//! - `Debug`: Gray - every key push
//! - `Info`: Green - startup and host events
//! - `Warn`: Yellow - aborted renders, failed pushes
//! - `Error`: Red - errors
//!
//! # Usage
//!
//! ```ignore
//! use keydeck_widgets::{log_info, log_warn};
//!
//! log_info!("deck ready");
//! log_warn!("key {} push failed: {}", index, err);
//! ```

use core::fmt::{self, Write};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use heapless::{Deque, String};

use crate::colors::{GRAY, GREEN, RED, YELLOW};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 32;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 48;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging
    Trace = 0,
    /// Debug information
    Debug = 1,
    /// Normal operation
    #[default]
    Info = 2,
    /// Warnings
    Warn = 3,
    /// Errors
    Error = 4,
}

impl LogLevel {
    /// Display color for this level.
    pub const fn color(self) -> Rgb888 {
        match self {
            Self::Trace | Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry.
#[derive(Clone, Debug, Default)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// Message, truncated to `LOG_MSG_LEN - 1` characters.
    pub message: String<LOG_MSG_LEN>,
    /// Milliseconds since the first log call of the process.
    pub timestamp_ms: u32,
}

impl LogEntry {
    /// Create an entry, truncating `message` to fit.
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars() {
            if msg.len() + c.len_utf8() > LOG_MSG_LEN - 1 {
                break;
            }
            msg.push(c).ok();
        }
        Self {
            level,
            message: msg,
            timestamp_ms,
        }
    }
}

/// Ring of the most recent log entries. The oldest entry goes first.
pub struct LogBuffer {
    entries: Deque<LogEntry, LOG_ENTRIES>,
}

impl LogBuffer {
    /// Create an empty buffer.
    pub const fn new() -> Self { Self { entries: Deque::new() } }

    /// Push an entry, dropping the oldest when full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries.push_back(entry).ok();
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// The newest `count` entries, oldest first.
    pub fn tail(
        &self,
        count: usize,
    ) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.len().saturating_sub(count))
    }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Process-wide log ring.
pub static LOG_BUFFER: Mutex<LogBuffer> = Mutex::new(LogBuffer::new());

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Milliseconds since the first call.
pub fn current_timestamp_ms() -> u32 {
    let epoch = EPOCH.get_or_init(Instant::now);
    u32::try_from(epoch.elapsed().as_millis()).unwrap_or(u32::MAX)
}

/// Format and push one entry into [`LOG_BUFFER`]. Used by the `log_*!` macros.
pub fn push_log(
    level: LogLevel,
    args: fmt::Arguments<'_>,
) {
    let mut text = std::string::String::new();
    text.write_fmt(args).ok();
    let entry = LogEntry::new(level, &text, current_timestamp_ms());

    LOG_BUFFER.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
}

/// Copy of the current log contents, oldest first.
pub fn snapshot() -> Vec<LogEntry> {
    LOG_BUFFER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .cloned()
        .collect()
}

/// Log a message at Trace level.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Trace, format_args!($($arg)*))
    };
}

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Debug, format_args!($($arg)*))
    };
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Info, format_args!($($arg)*))
    };
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Warn, format_args!($($arg)*))
    };
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::Error, format_args!($($arg)*))
    };
}
