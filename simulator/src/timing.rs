//! Timing constants for the simulator.
//!
//! These use `std::time::Duration`, so they live here rather than in the
//! `no_std` library.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if the frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Frames between two scripted events.
pub const SCRIPT_STEP_FRAMES: u32 = 100;

/// Frames between two scripted WPM samples.
pub const WPM_SAMPLE_FRAMES: u32 = 10;

/// Idle timeout used by the simulator. Much shorter than the firmware's so
/// blanking can be watched without waiting five minutes.
pub const SIM_IDLE_TIMEOUT_SECS: u64 = 20;
