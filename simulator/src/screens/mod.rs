//! Simulator-only pages.

mod debug;

pub use debug::{DebugSnapshot, draw_debug_page};
