//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock and fixed-step frame pacing)
//! - Input intents
//!
//! Storage lives in [`crate::persistence`].

pub mod input;
pub mod time;

pub use input::Intent;
pub use time::{FrameClock, now_ms};
