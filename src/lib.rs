//! Dongle status screen - widgets and layout for a split-keyboard dongle display.
//!
//! This library contains everything that doesn't touch hardware: grid
//! layout, the widget set, battery meter arithmetic, reconnect tracking and
//! event dispatch. It draws through `embedded-graphics`, so the same code
//! drives the desktop simulator and the firmware's ST7789 panel.
//!
//! # Usage
//!
//! ```ignore
//! let mut screen = StatusScreen::from_config()?;
//! loop {
//!     let event = STATUS_EVENTS.receive().await;
//!     if screen.handle_event(&event) {
//!         backlight_on();
//!     }
//!     screen.draw(&mut display);
//! }
//! ```
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test
//! cargo test --features dongle-battery
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware links the crate as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Configuration
pub mod config;
pub mod thresholds;

// Core
pub mod battery;
pub mod error;
pub mod events;
pub mod layout;

// Rendering
pub mod colors;
pub mod screen;
pub mod styles;
pub mod widgets;

// Diagnostics
pub mod diagnostics;

pub use error::Error;
pub use events::{STATUS_EVENTS, StatusEvent};
pub use screen::StatusScreen;
