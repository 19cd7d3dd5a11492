//! Frame timing and event counters for the debug page.

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::String;

/// Frame timing and event statistics.
pub struct SimMetrics {
    // Frame timing (microseconds)
    pub frame_time_us: u32,
    pub render_time_us: u32,
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    pub events: u32,
    pub redraws: u32,
    pub wakes: u32,
    /// Events that found the channel full.
    pub dropped: u32,

    start_time: Instant,
}

impl SimMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            events: 0,
            redraws: 0,
            wakes: 0,
            dropped: 0,
            start_time: Instant::now(),
        }
    }

    /// Record timing for the frame that just finished.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
    ) {
        let total_us = total_time.as_micros() as u32;
        self.frame_time_us = total_us;
        self.render_time_us = render_time.as_micros() as u32;
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        self.frame_time_avg_us = if self.total_frames == 0 {
            total_us as f32
        } else {
            Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us)
        };

        self.total_frames += 1;
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Milliseconds since start, the clock fed to `DisplayPower`.
    #[inline]
    pub fn now_ms(&self) -> u64 { self.start_time.elapsed().as_millis() as u64 }

    /// Uptime as HH:MM:SS.
    pub fn uptime_string(&self) -> String<12> {
        let secs = self.start_time.elapsed().as_secs();
        let mut s = String::new();
        let _ = write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
        s
    }
}

impl Default for SimMetrics {
    fn default() -> Self { Self::new() }
}
