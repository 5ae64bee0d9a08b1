//! Data-driven game balance
//!
//! Every speed, duration, size and probability the simulation reads lives in
//! [`Tuning`]. The struct is immutable during a run and passed by reference, so
//! tests can run the same systems under alternate tunings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Inclusive numeric range used for randomized sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Inverted spans collapse onto `max`
    pub fn sanitized(self) -> Self {
        if self.min > self.max {
            Self::fixed(self.max)
        } else {
            self
        }
    }
}

/// Game balance parameters (units are world pixels and logical ticks)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Distance from the bottom of the surface to the running floor
    pub ground_height: f32,
    /// Fixed horizontal position of the player
    pub player_x: f32,

    // === Player ===
    pub player_width: f32,
    pub standing_height: f32,
    pub sliding_height: f32,
    /// Fairness inset applied to the player's hit-box on every side
    pub player_padding: f32,
    /// Velocity added every tick (positive is down)
    pub gravity: f32,
    pub jump_velocity: f32,
    pub double_jump_velocity: f32,
    pub slide_ticks: u32,

    // === Speed ===
    pub initial_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Scroll speed gained on each level-up
    pub speed_per_level: f32,

    // === Scoring / progression ===
    pub score_rate: f64,
    pub coin_bonus: f64,
    pub first_level_threshold: f64,
    pub level_threshold_step: f64,
    pub max_level: u32,
    pub revival_min_score: f64,

    // === Hazard spacing ===
    pub base_min_gap: f32,
    pub base_max_gap: f32,
    pub min_gap_floor: f32,
    pub max_gap_floor: f32,
    /// Per-difficulty shrink of the minimum gap
    pub min_gap_shrink: f32,
    /// Per-difficulty shrink of the maximum gap
    pub max_gap_shrink: f32,
    pub difficulty_per_level: f32,
    /// Scroll distance before the first hazard of a run
    pub opening_distance: f32,

    // === Hazard geometry ===
    pub hazard_padding: f32,
    pub ground_width: Span,
    pub ground_height_span: Span,
    pub air_width: f32,
    pub air_height: f32,
    /// Clearance between the floor and the underside of an air hazard
    pub air_clearance: f32,
    pub double_width: f32,
    pub double_height: f32,
    pub double_spacing: f32,
    pub tall_width: f32,
    pub tall_height: f32,
    /// Open space left under a tall hazard's hit-box
    pub tall_slide_gap: f32,
    pub long_width: Span,
    pub long_height: f32,

    // === Coins ===
    pub coin_size: f32,
    pub coin_gap_threshold: f32,
    pub coin_chance: f32,
    pub max_coins: usize,
    /// Height above the floor of a straight coin line
    pub coin_line_height: f32,
    /// Height above the floor of the ends of a coin arc
    pub coin_arc_base: f32,
    pub coin_arc_amplitude: f32,

    // === Pickups ===
    pub pickup_size: f32,
    /// Base per-tick spawn probability at initial speed
    pub powerup_chance: f32,
    /// Pickups appear up to this far beyond the right edge
    pub pickup_spawn_spread: f32,
    pub pickup_min_height: f32,
    pub pickup_max_height: f32,
    /// Extra reach above a pickup's box to ease timing
    pub pickup_reach: f32,
    pub pickup_bob_amplitude: f32,
    /// Bob angular rate in radians per millisecond
    pub pickup_bob_rate: f32,
    pub shield_ticks: u32,
    pub multiplier_ticks: u32,
    pub multiplier_factor: f64,
    /// Shield granted on revival
    pub revival_shield_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_height: 50.0,
            player_x: 100.0,

            player_width: 40.0,
            standing_height: 60.0,
            sliding_height: 30.0,
            player_padding: 8.0,
            gravity: 0.6,
            jump_velocity: -13.0,
            double_jump_velocity: -11.0,
            slide_ticks: 40,

            initial_speed: 6.0,
            min_speed: 4.0,
            max_speed: 14.0,
            speed_per_level: 0.5,

            score_rate: 0.1,
            coin_bonus: 50.0,
            first_level_threshold: 1000.0,
            level_threshold_step: 1000.0,
            max_level: 10,
            revival_min_score: 5000.0,

            base_min_gap: 400.0,
            base_max_gap: 700.0,
            min_gap_floor: 200.0,
            max_gap_floor: 300.0,
            min_gap_shrink: 30.0,
            max_gap_shrink: 50.0,
            difficulty_per_level: 0.15,
            opening_distance: 600.0,

            hazard_padding: 5.0,
            ground_width: Span::new(30.0, 50.0),
            ground_height_span: Span::new(40.0, 70.0),
            air_width: 50.0,
            air_height: 30.0,
            air_clearance: 40.0,
            double_width: 30.0,
            double_height: 45.0,
            double_spacing: 70.0,
            tall_width: 40.0,
            tall_height: 160.0,
            tall_slide_gap: 40.0,
            long_width: Span::new(120.0, 180.0),
            long_height: 25.0,

            coin_size: 20.0,
            coin_gap_threshold: 350.0,
            coin_chance: 0.7,
            max_coins: 5,
            coin_line_height: 80.0,
            coin_arc_base: 40.0,
            coin_arc_amplitude: 100.0,

            pickup_size: 30.0,
            powerup_chance: 0.002,
            pickup_spawn_spread: 300.0,
            pickup_min_height: 80.0,
            pickup_max_height: 150.0,
            pickup_reach: 15.0,
            pickup_bob_amplitude: 5.0,
            pickup_bob_rate: 0.003,
            shield_ticks: 300,
            multiplier_ticks: 600,
            multiplier_factor: 2.0,
            revival_shield_ticks: 180,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Clamp inconsistent bounds instead of failing on them.
    ///
    /// Min/max pairs with min > max collapse to a single value and
    /// probabilities are forced into [0, 1].
    pub fn sanitized(mut self) -> Self {
        if self.min_speed > self.max_speed {
            self.min_speed = self.max_speed;
        }
        self.initial_speed = self.initial_speed.clamp(self.min_speed, self.max_speed);
        if self.base_min_gap > self.base_max_gap {
            self.base_min_gap = self.base_max_gap;
        }
        if self.min_gap_floor > self.max_gap_floor {
            self.min_gap_floor = self.max_gap_floor;
        }
        // Gaps may only shrink as difficulty rises
        self.min_gap_shrink = self.min_gap_shrink.max(0.0);
        self.max_gap_shrink = self.max_gap_shrink.max(0.0);
        self.difficulty_per_level = self.difficulty_per_level.max(0.0);
        if self.pickup_min_height > self.pickup_max_height {
            self.pickup_min_height = self.pickup_max_height;
        }
        self.ground_width = self.ground_width.sanitized();
        self.ground_height_span = self.ground_height_span.sanitized();
        self.long_width = self.long_width.sanitized();
        self.coin_chance = self.coin_chance.clamp(0.0, 1.0);
        self.powerup_chance = self.powerup_chance.clamp(0.0, 1.0);
        self.max_level = self.max_level.max(1);
        self.sliding_height = self.sliding_height.min(self.standing_height);
        // A zero-length timer would never expire
        self.slide_ticks = self.slide_ticks.max(1);
        self.shield_ticks = self.shield_ticks.max(1);
        self.multiplier_ticks = self.multiplier_ticks.max(1);
        self.revival_shield_ticks = self.revival_shield_ticks.max(1);
        self
    }

    /// Difficulty scalar for a level
    pub fn difficulty(&self, level: u32) -> f32 {
        1.0 + level as f32 * self.difficulty_per_level
    }

    /// Scroll speed clamped into the configured band
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_speed, self.max_speed.max(self.min_speed))
    }
}
