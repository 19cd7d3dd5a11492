//! Diagnostics log.
//!
//! Ring buffer of short notices (reconnects, rejected events, layout
//! problems) shown on the simulator's debug page. The firmware logs the same
//! notices over `defmt`; this buffer is what a host without a probe sees.
//!
//! # Usage
//!
//! ```ignore
//! let mut log = EventLog::new();
//! log.push_notice(Notice::Reconnect { source: 1 });
//!
//! for line in log.iter() {
//!     println!("{}", line);
//! }
//! ```

use core::fmt::Write;

use heapless::{Deque, String};

use crate::error::Error;

// =============================================================================
// Event Log Configuration
// =============================================================================

/// Maximum number of log lines kept in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum characters per log line.
pub const LOG_LINE_LENGTH: usize = 48;

// =============================================================================
// Notices
// =============================================================================

/// Something a widget wants recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    /// A battery source went from unseen/disconnected to connected.
    Reconnect { source: u8 },
    /// A battery source dropped to 0 %.
    Disconnect { source: u8 },
    /// A battery event named a source outside the configured range.
    InvalidSource { source: u8, source_count: u8 },
    /// A battery level above 100 %.
    OutOfRangeLevel { source: u8, level: u8 },
}

impl Notice {
    /// Notice for an event error on battery `source`. Layout errors are fatal
    /// at startup and never become notices.
    pub const fn for_error(
        source: u8,
        err: Error,
    ) -> Option<Self> {
        match err {
            Error::InvalidSource(e) => Some(Notice::InvalidSource { source: e.source, source_count: e.source_count }),
            Error::OutOfRangeLevel(level) => Some(Notice::OutOfRangeLevel { source, level }),
            Error::Layout(_) => None,
        }
    }

    /// Write the notice as a single log line.
    pub fn write_line<const N: usize>(
        &self,
        line: &mut String<N>,
    ) {
        // Overlong lines are cut off by the capacity; that's fine for a log.
        let _ = match *self {
            Notice::Reconnect { source } => write!(line, "src {source} reconnected"),
            Notice::Disconnect { source } => write!(line, "src {source} disconnected"),
            Notice::InvalidSource { source, source_count } => {
                write!(line, "src {source} ignored ({source_count} sources)")
            }
            Notice::OutOfRangeLevel { source, level } => write!(line, "src {source} bad level {level}"),
        };
    }
}

// =============================================================================
// Event Log Ring Buffer
// =============================================================================

/// Ring buffer for diagnostic messages.
///
/// Stores the last `LOG_BUFFER_SIZE` messages. Old messages are dropped when
/// the buffer is full. Also counts every message ever pushed, so the debug
/// page can show how many scrolled away.
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LENGTH>, LOG_BUFFER_SIZE>,
    total: u32,
}

impl EventLog {
    /// Create a new empty log.
    pub const fn new() -> Self {
        Self {
            buffer: Deque::new(),
            total: 0,
        }
    }

    /// Push a log message. If the buffer is full, the oldest message is dropped.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        self.push_line(line);
    }

    /// Push a formatted notice.
    pub fn push_notice(
        &mut self,
        notice: Notice,
    ) {
        let mut line: String<LOG_LINE_LENGTH> = String::new();
        notice.write_line(&mut line);
        self.push_line(line);
    }

    fn push_line(
        &mut self,
        line: String<LOG_LINE_LENGTH>,
    ) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(line).ok();
        self.total = self.total.saturating_add(1);
    }

    /// Iterate over log messages (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.buffer.iter().map(|line| line.as_str()) }

    /// Most recent message.
    pub fn last(&self) -> Option<&str> { self.buffer.back().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Messages pushed since creation, including dropped ones.
    #[inline]
    pub const fn total(&self) -> u32 { self.total }

    pub fn clear(&mut self) { self.buffer.clear(); }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
