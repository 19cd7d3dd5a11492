//! Render state and dirty tracking.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Background | First frame / after invalidate | Full clear |
//! | Widgets | On subscribed event | Redraw dirty widgets only |
//! | Widgets | First frame / after invalidate | Redraw all |
//!
//! Widgets clear their own area before drawing, so a partial redraw never
//! leaves stale pixels behind.

// =============================================================================
// Dirty Mask
// =============================================================================

/// Set of widget slots needing a redraw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyMask(u8);

impl DirtyMask {
    /// Number of slots a mask can hold.
    pub const CAPACITY: usize = u8::BITS as usize;

    pub const EMPTY: Self = Self(0);

    /// Every slot below `count`.
    pub const fn all(count: usize) -> Self {
        if count >= Self::CAPACITY {
            Self(u8::MAX)
        } else {
            Self(((1u16 << count) - 1) as u8)
        }
    }

    /// Mark `slot` dirty. Slots past capacity are ignored.
    #[inline]
    pub fn set(
        &mut self,
        slot: u8,
    ) {
        if (slot as usize) < Self::CAPACITY {
            self.0 |= 1 << slot;
        }
    }

    #[inline]
    pub const fn contains(
        &self,
        slot: u8,
    ) -> bool {
        (slot as usize) < Self::CAPACITY && self.0 & (1 << slot) != 0
    }

    #[inline]
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.0 == 0 }

    #[inline]
    pub const fn count(&self) -> u32 { self.0.count_ones() }

    /// Dirty slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ { (0..Self::CAPACITY as u8).filter(|&slot| self.contains(slot)) }
}

// =============================================================================
// Render State
// =============================================================================

/// Tracks what must be drawn on the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderState {
    /// Whether this is the first frame (need full redraw).
    first_frame: bool,

    /// Whether the display was cleared or lost externally (e.g. panel power
    /// cycle, simulator page switch). Forces a full redraw.
    display_cleared: bool,

    /// Widgets changed since the last frame.
    dirty: DirtyMask,
}

impl RenderState {
    /// Create a new render state for first frame.
    pub const fn new() -> Self {
        Self {
            first_frame: true,
            display_cleared: false,
            dirty: DirtyMask::EMPTY,
        }
    }

    /// Check if the whole screen needs clearing and redrawing.
    #[inline]
    pub const fn need_full_redraw(&self) -> bool { self.first_frame || self.display_cleared }

    /// Check if anything needs drawing.
    #[inline]
    pub const fn needs_draw(&self) -> bool { self.need_full_redraw() || !self.dirty.is_empty() }

    /// Add widgets changed by an event.
    #[inline]
    pub fn mark_dirty(
        &mut self,
        dirty: DirtyMask,
    ) {
        self.dirty = self.dirty.union(dirty);
    }

    /// Force a full redraw on the next frame.
    #[inline]
    pub fn mark_display_cleared(&mut self) { self.display_cleared = true; }

    /// Slots to draw this frame out of `count` widgets.
    pub const fn pending(
        &self,
        count: usize,
    ) -> DirtyMask {
        if self.need_full_redraw() { DirtyMask::all(count) } else { self.dirty }
    }

    /// Mark the frame as drawn.
    pub fn end_frame(&mut self) {
        self.first_frame = false;
        self.display_cleared = false;
        self.dirty = DirtyMask::EMPTY;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
