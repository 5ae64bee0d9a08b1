//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`] and is touched only from
//! inside a tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{HazardKind, PickupKind};
use super::player::Player;
use super::progression::Progression;
use super::spawn::SpawnEngine;
use crate::consts::TICK_MS;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Fatal hit with the revival allowance still unspent
    RevivalOffer,
    /// Run ended
    GameOver,
}

/// Things that happened during a tick, for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    DoubleJump,
    Slide,
    CoinCollected { at: Vec2 },
    PickupCollected { kind: PickupKind, at: Vec2 },
    /// Emitted at the struck sub-box's center whether or not a shield absorbed it
    HazardHit { kind: HazardKind, at: Vec2, absorbed: bool },
    LevelUp { level: u32 },
    RevivalOffered,
    Revived,
    GameOver { score: u64 },
}

/// Playable surface dimensions and the derived floor line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    /// y of the running floor; also the spawn anchor for grounded entities
    pub ground_y: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        Self {
            width,
            height,
            ground_y: height - tuning.ground_height,
        }
    }
}

/// Complete state of a run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter (drives animation time)
    pub time_ticks: u64,
    pub surface: Surface,
    pub player: Player,
    pub spawner: SpawnEngine,
    pub progression: Progression,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, waiting in `Ready`
    pub fn new(seed: u64, tuning: &Tuning, surface: Surface) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            time_ticks: 0,
            surface,
            player: Player::new(tuning, surface.ground_y),
            spawner: SpawnEngine::new(tuning),
            progression: Progression::new(tuning),
            events: Vec::new(),
        }
    }

    /// Begin a fresh run on the same surface, reseeding the RNG
    pub fn restart(&mut self, seed: u64, tuning: &Tuning) {
        *self = Self::new(seed, tuning, self.surface);
        self.phase = GamePhase::Playing;
    }

    /// Simulation time in milliseconds (animation phase source)
    pub fn time_ms(&self) -> f64 {
        self.time_ticks as f64 * TICK_MS
    }

    /// Adopt new surface dimensions, moving the floor and everything on it
    pub fn resize(&mut self, width: f32, height: f32, tuning: &Tuning) {
        let surface = Surface::new(width, height, tuning);
        let delta = surface.ground_y - self.surface.ground_y;
        self.surface = surface;
        if delta != 0.0 {
            self.player.shift_ground(delta);
            self.spawner.shift_ground(delta);
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_floor() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning, Surface::new(800.0, 400.0, &tuning));
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.surface.ground_y, 350.0);
        assert_eq!(state.player.bounds().bottom(), 350.0);
        assert_eq!(state.progression.level, 1);
    }

    #[test]
    fn test_resize_moves_floor_and_entities() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning, Surface::new(800.0, 400.0, &tuning));
        let id = state.spawner.next_entity_id();
        state.spawner.push_hazard(crate::sim::Hazard::with_size(
            id,
            HazardKind::Ground,
            500.0,
            350.0,
            Vec2::new(40.0, 40.0),
            &tuning,
        ));

        state.resize(1200.0, 600.0, &tuning);
        assert_eq!(state.surface.width, 1200.0);
        assert_eq!(state.surface.ground_y, 550.0);
        assert_eq!(state.player.bounds().bottom(), 550.0);
        assert_eq!(state.spawner.hazards()[0].bounds().bottom(), 550.0);
    }

    #[test]
    fn test_restart_resets_run() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning, Surface::new(800.0, 400.0, &tuning));
        state.progression.add_bonus(500.0);
        state.time_ticks = 99;
        state.restart(2, &tuning);
        assert_eq!(state.seed, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.score, 0.0);
        assert_eq!(state.time_ticks, 0);
    }
}
