//! Neon Dash - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `audio` / `render`: Feedback sinks (fire-and-forget)
//! - `persistence` / `highscores`: Best score and leaderboard storage
//! - `platform`: Input intents and frame timing

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Duration of one logical tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Largest wall-clock step fed to the simulation per frame.
    /// A stalled frame advances at most one tick so fast hazards can't tunnel.
    pub const MAX_FRAME_MS: f64 = TICK_MS;

    /// Default playable surface
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;
}
