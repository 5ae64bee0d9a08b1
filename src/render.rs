//! Renderer contract
//!
//! Drawing is a pure function of state: the core hands a read-only
//! [`FrameSnapshot`] to a [`Renderer`] and never reads anything back.

use serde::Serialize;

use crate::sim::{Coin, GamePhase, GameState, Hazard, Pickup, Player, Surface};

/// Everything a frame needs to be drawn
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub phase: GamePhase,
    pub surface: Surface,
    pub player: &'a Player,
    pub hazards: &'a [Hazard],
    pub pickups: &'a [Pickup],
    pub coins: &'a [Coin],
    pub score: u64,
    pub level: u32,
    pub high_score: u64,
    /// Animation clock in milliseconds
    pub time_ms: f64,
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(state: &'a GameState, high_score: u64) -> Self {
        Self {
            phase: state.phase,
            surface: state.surface,
            player: &state.player,
            hazards: state.spawner.hazards(),
            pickups: state.spawner.pickups(),
            coins: state.spawner.coins(),
            score: state.progression.final_score(),
            level: state.progression.level,
            high_score,
            time_ms: state.time_ms(),
        }
    }

    /// JSON form handed to a host page for drawing
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Draws frames
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>);
}

/// Renderer that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &FrameSnapshot<'_>) {}
}
