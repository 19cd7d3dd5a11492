//! The status screen: placed widgets, event routing and redraw.
//!
//! - `composer`: widget placement from the layout table
//! - `registry`: [`StatusListener`] and the event dispatch table
//! - `render`: dirty tracking between frames
//! - `power`: idle timeout for the display backlight
//!
//! # Frame Flow
//!
//! 1. Events arrive through [`StatusScreen::handle_event`]; subscribed widgets
//!    update and are marked dirty.
//! 2. [`StatusScreen::draw`] clears the screen on the first frame (or after
//!    [`StatusScreen::invalidate`]) and draws every widget, otherwise only
//!    the dirty ones.
//! 3. A wake request from a handled event goes to [`DisplayPower`].

mod composer;
mod power;
mod registry;
mod render;

pub use composer::{Placement, Placements, compose};
pub use power::{DisplayPower, PowerTransition, screen_should_be_on};
pub use registry::{Dispatch, MAX_LISTENERS, RenderUpdate, StatusListener, WidgetRegistry};
pub use render::{DirtyMask, RenderState};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;

use crate::colors::Theme;
use crate::config::{FEATURES, GRID};
use crate::diagnostics::EventLog;
use crate::error::Error;
use crate::events::StatusEvent;
use crate::layout::{GridSpec, WidgetFeatures, WidgetKind};
use crate::widgets::StatusWidget;

/// Owns the widgets, their dispatch table and the render state.
pub struct StatusScreen {
    widgets: Vec<StatusWidget, MAX_LISTENERS>,
    registry: WidgetRegistry,
    render: RenderState,
    theme: Theme,
    log: EventLog,
    grid: GridSpec,
}

impl StatusScreen {
    /// Place and build the widgets enabled in `features`.
    ///
    /// Fails with [`Error::Layout`] when they don't fit `grid`.
    pub fn new(
        grid: &GridSpec,
        features: WidgetFeatures,
        theme: Theme,
    ) -> Result<Self, Error> {
        let placements = compose(grid, features)?;

        let mut widgets = Vec::new();
        for placement in &placements {
            // Placements never exceed one per widget kind.
            let _ = widgets.push(StatusWidget::from_placement(placement));
        }
        let registry = WidgetRegistry::from_listeners(&widgets);

        #[cfg(feature = "defmt")]
        defmt::info!("status screen: {} widgets on {}x{} grid", widgets.len(), grid.rows(), grid.columns());

        Ok(Self {
            widgets,
            registry,
            render: RenderState::new(),
            theme,
            log: EventLog::new(),
            grid: *grid,
        })
    }

    /// Screen for the build-time configuration: [`GRID`], [`FEATURES`] and
    /// the theme selected by Cargo features.
    pub fn from_config() -> Result<Self, Error> { Self::new(&GRID, FEATURES, Theme::from_cargo_features()) }

    /// Route an event to subscribed widgets. Returns `true` when the screen
    /// should wake.
    pub fn handle_event(
        &mut self,
        event: &StatusEvent,
    ) -> bool {
        let outcome = self.registry.dispatch(&mut self.widgets, event);
        self.render.mark_dirty(outcome.dirty);
        for notice in outcome.notices {
            #[cfg(feature = "defmt")]
            defmt::debug!("notice: {}", notice);
            self.log.push_notice(notice);
        }
        outcome.wake
    }

    /// Draw what changed since the last call. Returns `true` if anything was drawn.
    pub fn draw<D>(
        &mut self,
        display: &mut D,
    ) -> bool
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.render.needs_draw() {
            return false;
        }

        if self.render.need_full_redraw() {
            display.clear(self.theme.background).ok();
        }

        let pending = self.render.pending(self.widgets.len());
        for slot in pending.iter() {
            if let Some(widget) = self.widgets.get(slot as usize) {
                widget.draw(display, &self.theme);
            }
        }

        self.render.end_frame();
        true
    }

    /// Force a full redraw on the next [`draw`](Self::draw).
    pub fn invalidate(&mut self) { self.render.mark_display_cleared(); }

    #[inline]
    pub const fn needs_draw(&self) -> bool { self.render.needs_draw() }

    /// Recent notices (reconnects, rejected events).
    #[inline]
    pub const fn diagnostics(&self) -> &EventLog { &self.log }

    #[inline]
    pub fn widgets(&self) -> &[StatusWidget] { &self.widgets }

    /// Widget of `kind`, if enabled.
    pub fn widget(
        &self,
        kind: WidgetKind,
    ) -> Option<&StatusWidget> {
        self.widgets.iter().find(|widget| widget.kind() == kind)
    }

    #[inline]
    pub const fn theme(&self) -> &Theme { &self.theme }

    #[inline]
    pub const fn grid(&self) -> &GridSpec { &self.grid }

    /// Change the theme and redraw everything.
    pub fn set_theme(
        &mut self,
        theme: Theme,
    ) {
        self.theme = theme;
        self.invalidate();
    }
}
