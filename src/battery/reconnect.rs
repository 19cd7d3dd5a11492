//! Peripheral reconnect detection.
//!
//! Split peripherals report a level below 1 % when they drop off. The tracker
//! remembers the last level per source and flags the first valid report after
//! a drop (or the very first report) as a reconnect, which wakes the screen.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::error::InvalidSource;
use crate::thresholds::BATTERY_CONNECTED_MIN;

/// Last-seen sentinel for a source that never reported.
const NEVER_SEEN: i16 = -1;

/// Connection state of a source, derived from its last level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceState {
    NeverSeen,
    Disconnected,
    Connected,
}

impl SourceState {
    const fn from_last_level(level: i16) -> Self {
        if level == NEVER_SEEN {
            Self::NeverSeen
        } else if level < BATTERY_CONNECTED_MIN as i16 {
            Self::Disconnected
        } else {
            Self::Connected
        }
    }
}

/// Result of a valid observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Observation {
    /// Source went from never-seen or disconnected to connected.
    pub reconnect: bool,
    /// State before this observation.
    pub previous: SourceState,
}

/// Last-seen level per battery source.
#[derive(Clone, Debug)]
pub struct ReconnectTracker<const N: usize> {
    last_levels: [i16; N],
    rejected: u32,
}

impl<const N: usize> ReconnectTracker<N> {
    /// Tracker with every source never seen.
    pub const fn new() -> Self {
        Self {
            last_levels: [NEVER_SEEN; N],
            rejected: 0,
        }
    }

    /// Record `level` for `source` and classify the transition.
    ///
    /// Sources outside `0..N` are rejected without touching any state and
    /// counted in [`Self::rejected`].
    pub fn observe(
        &mut self,
        source: u8,
        level: u8,
    ) -> Result<Observation, InvalidSource> {
        let Some(last) = self.last_levels.get_mut(source as usize) else {
            self.rejected = self.rejected.saturating_add(1);
            return Err(InvalidSource {
                source,
                source_count: N as u8,
            });
        };

        let previous = SourceState::from_last_level(*last);
        let reconnect = previous != SourceState::Connected && level >= BATTERY_CONNECTED_MIN;
        *last = i16::from(level);

        #[cfg(feature = "defmt")]
        if reconnect {
            defmt::info!("source {} reconnected at {}% (was {})", source, level, previous);
        }

        Ok(Observation { reconnect, previous })
    }

    /// State of `source`, or `None` when out of range.
    pub fn state(
        &self,
        source: u8,
    ) -> Option<SourceState> {
        self.last_levels.get(source as usize).map(|&l| SourceState::from_last_level(l))
    }

    /// Last level stored for `source`, `None` when never seen or out of range.
    pub fn last_level(
        &self,
        source: u8,
    ) -> Option<u8> {
        match self.last_levels.get(source as usize) {
            Some(&l) if l != NEVER_SEEN => Some(l as u8),
            _ => None,
        }
    }

    /// Forget every source. The rejected counter is kept.
    pub fn reset(&mut self) { self.last_levels = [NEVER_SEEN; N]; }

    /// Observations rejected for an out-of-range source.
    #[inline]
    pub const fn rejected(&self) -> u32 { self.rejected }

    /// Number of sources tracked.
    #[inline]
    pub const fn source_count(&self) -> usize { N }
}

impl<const N: usize> Default for ReconnectTracker<N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Shared Tracker
// =============================================================================

/// [`ReconnectTracker`] behind an embassy blocking mutex, for delivery from
/// more than one task or interrupt context.
pub struct SharedReconnectTracker<M: RawMutex, const N: usize> {
    inner: Mutex<M, RefCell<ReconnectTracker<N>>>,
}

impl<M: RawMutex, const N: usize> SharedReconnectTracker<M, N> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(ReconnectTracker::new())),
        }
    }

    pub fn observe(
        &self,
        source: u8,
        level: u8,
    ) -> Result<Observation, InvalidSource> {
        self.inner.lock(|tracker| tracker.borrow_mut().observe(source, level))
    }

    pub fn reset(&self) { self.inner.lock(|tracker| tracker.borrow_mut().reset()); }

    pub fn rejected(&self) -> u32 { self.inner.lock(|tracker| tracker.borrow().rejected()) }
}

impl<M: RawMutex, const N: usize> Default for SharedReconnectTracker<M, N> {
    fn default() -> Self { Self::new() }
}
