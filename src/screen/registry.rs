//! Listener registry and event dispatch.
//!
//! Each widget declares the [`EventKind`]s it cares about. At construction
//! the registry builds a dispatch table, one row of widget slots per event
//! kind, so an event only reaches the widgets subscribed to it.

use heapless::Vec;

use super::render::DirtyMask;
use crate::diagnostics::Notice;
use crate::events::{EventKind, StatusEvent};
use crate::layout::WidgetKind;

/// Maximum widgets a registry holds.
pub const MAX_LISTENERS: usize = WidgetKind::COUNT;

const _: () = assert!(MAX_LISTENERS <= DirtyMask::CAPACITY);

// =============================================================================
// Listener Trait
// =============================================================================

/// What a listener wants done after handling an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderUpdate {
    /// Displayed state changed; redraw the listener.
    pub redraw: bool,
    /// Turn the screen on and restart the idle clock.
    pub wake: bool,
    /// Something worth recording in the diagnostics log.
    pub notice: Option<Notice>,
}

impl RenderUpdate {
    /// Nothing changed.
    pub const NONE: Self = Self {
        redraw: false,
        wake: false,
        notice: None,
    };

    /// Redraw, no wake.
    pub const REDRAW: Self = Self {
        redraw: true,
        wake: false,
        notice: None,
    };

    /// Redraw only when `changed`.
    #[inline]
    pub const fn redraw_if(changed: bool) -> Self { if changed { Self::REDRAW } else { Self::NONE } }

    #[inline]
    pub const fn with_wake(
        self,
        wake: bool,
    ) -> Self {
        Self { wake, ..self }
    }

    #[inline]
    pub const fn with_notice(
        self,
        notice: Option<Notice>,
    ) -> Self {
        Self { notice, ..self }
    }
}

/// Something that reacts to status events.
pub trait StatusListener {
    /// Event kinds this listener wants. Fixed for the listener's lifetime.
    fn subscriptions(&self) -> &'static [EventKind];

    /// Update internal state from `event`.
    fn on_event(
        &mut self,
        event: &StatusEvent,
    ) -> RenderUpdate;
}

// =============================================================================
// Dispatch
// =============================================================================

/// Aggregated outcome of routing one event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Slots that need a redraw.
    pub dirty: DirtyMask,
    /// Any listener asked to wake the screen.
    pub wake: bool,
    /// Notices raised, in slot order.
    pub notices: Vec<Notice, MAX_LISTENERS>,
}

/// Dispatch table from event kind to subscribed listener slots.
#[derive(Clone, Debug, Default)]
pub struct WidgetRegistry {
    table: [Vec<u8, MAX_LISTENERS>; EventKind::COUNT],
    len: usize,
}

impl WidgetRegistry {
    pub const fn new() -> Self {
        Self {
            table: [const { Vec::new() }; EventKind::COUNT],
            len: 0,
        }
    }

    /// Build a registry over `listeners`, slot `i` being `listeners[i]`.
    ///
    /// Listeners beyond [`MAX_LISTENERS`] are not registered.
    pub fn from_listeners<L: StatusListener>(listeners: &[L]) -> Self {
        let mut registry = Self::new();
        for listener in listeners.iter().take(MAX_LISTENERS) {
            registry.register(listener.subscriptions());
        }
        registry
    }

    /// Register the next slot with its subscriptions and return the slot.
    /// `None` when the registry is full.
    pub fn register(
        &mut self,
        subscriptions: &[EventKind],
    ) -> Option<u8> {
        if self.len >= MAX_LISTENERS {
            return None;
        }
        let slot = self.len as u8;
        for kind in subscriptions {
            let row = &mut self.table[kind.index()];
            if !row.contains(&slot) {
                // Row capacity equals the slot limit checked above.
                let _ = row.push(slot);
            }
        }
        self.len += 1;
        Some(slot)
    }

    /// Slots subscribed to `kind`, in registration order.
    #[inline]
    pub fn subscribers(
        &self,
        kind: EventKind,
    ) -> &[u8] {
        &self.table[kind.index()]
    }

    /// Number of registered slots.
    #[inline]
    pub const fn len(&self) -> usize { self.len }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Route `event` to its subscribers in `listeners` and collect the result.
    pub fn dispatch<L: StatusListener>(
        &self,
        listeners: &mut [L],
        event: &StatusEvent,
    ) -> Dispatch {
        let mut outcome = Dispatch::default();
        for &slot in self.subscribers(event.kind()) {
            let Some(listener) = listeners.get_mut(slot as usize) else {
                continue;
            };
            let update = listener.on_event(event);
            if update.redraw {
                outcome.dirty.set(slot);
            }
            outcome.wake |= update.wake;
            if let Some(notice) = update.notice {
                let _ = outcome.notices.push(notice);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts events and redraws on every one; wakes on USB power.
    struct Recorder {
        subscriptions: &'static [EventKind],
        seen: u32,
    }

    impl Recorder {
        const fn new(subscriptions: &'static [EventKind]) -> Self { Self { subscriptions, seen: 0 } }
    }

    impl StatusListener for Recorder {
        fn subscriptions(&self) -> &'static [EventKind] { self.subscriptions }

        fn on_event(
            &mut self,
            event: &StatusEvent,
        ) -> RenderUpdate {
            self.seen += 1;
            let wake = matches!(event, StatusEvent::UsbPower { present: true });
            let notice = wake.then_some(Notice::Reconnect { source: 0 });
            RenderUpdate::REDRAW.with_wake(wake).with_notice(notice)
        }
    }

    #[test]
    fn test_dispatch_reaches_subscribers_only() {
        let mut recorders = [
            Recorder::new(&[EventKind::Wpm]),
            Recorder::new(&[EventKind::Layer]),
            Recorder::new(&[EventKind::Wpm, EventKind::UsbPower]),
        ];
        let registry = WidgetRegistry::from_listeners(&recorders);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.subscribers(EventKind::Wpm), &[0, 2]);
        assert!(registry.subscribers(EventKind::Modifiers).is_empty());

        let outcome = registry.dispatch(&mut recorders, &StatusEvent::Wpm(80));
        assert_eq!(recorders[0].seen, 1);
        assert_eq!(recorders[1].seen, 0, "layer recorder must not see WPM events");
        assert_eq!(recorders[2].seen, 1);
        assert!(outcome.dirty.contains(0));
        assert!(!outcome.dirty.contains(1));
        assert!(outcome.dirty.contains(2));
        assert!(!outcome.wake);
    }

    #[test]
    fn test_wake_and_notices_aggregate() {
        let mut recorders = [Recorder::new(&[EventKind::UsbPower]), Recorder::new(&[EventKind::UsbPower])];
        let registry = WidgetRegistry::from_listeners(&recorders);
        let outcome = registry.dispatch(&mut recorders, &StatusEvent::UsbPower { present: true });
        assert!(outcome.wake);
        assert_eq!(outcome.notices.len(), 2);
    }

    #[test]
    fn test_unsubscribed_event_is_noop() {
        let mut recorders = [Recorder::new(&[EventKind::Wpm])];
        let registry = WidgetRegistry::from_listeners(&recorders);
        let outcome = registry.dispatch(&mut recorders, &StatusEvent::layer(1, None));
        assert!(outcome.dirty.is_empty());
        assert_eq!(recorders[0].seen, 0);
    }

    #[test]
    fn test_duplicate_subscriptions_register_once() {
        let mut registry = WidgetRegistry::new();
        assert_eq!(registry.register(&[EventKind::Wpm, EventKind::Wpm]), Some(0));
        assert_eq!(registry.subscribers(EventKind::Wpm), &[0]);
    }

    #[test]
    fn test_registry_capacity() {
        let mut registry = WidgetRegistry::new();
        for i in 0..MAX_LISTENERS {
            assert_eq!(registry.register(&[EventKind::Wpm]), Some(i as u8));
        }
        assert_eq!(registry.register(&[EventKind::Wpm]), None);
    }

    #[test]
    fn test_render_update_builders() {
        assert_eq!(RenderUpdate::redraw_if(false), RenderUpdate::NONE);
        let update = RenderUpdate::redraw_if(true).with_wake(true);
        assert!(update.redraw && update.wake);
        assert_eq!(update.notice, None);
    }
}
