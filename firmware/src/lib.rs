//! Dongle screen firmware library - board constants and the pure logic behind
//! the firmware tasks.
//!
//! The binary (`main.rs`) adds the embassy tasks and the display driver.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p dongle-screen-firmware --lib --target x86_64-unknown-linux-gnu
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod board;
pub mod supply;
