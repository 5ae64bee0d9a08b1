//! Player body, motion state machine and power-up timers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::tuning::Tuning;

/// Motion state derived from the player's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    Standing,
    Sliding,
    Airborne,
}

/// What a jump intent did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpResult {
    /// Left the ground
    Jumped,
    /// Used the mid-air charge
    DoubleJumped,
    /// Ended an active slide early; no jump was performed
    SlideCancelled,
    /// Nothing changed
    Rejected,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Current pose size (standing or sliding)
    pub size: Vec2,
    /// Vertical velocity (positive is down)
    pub vel_y: f32,
    pub airborne: bool,
    pub sliding: bool,
    pub shielded: bool,
    /// Mid-air jump unlocked for the rest of the run
    pub has_double_jump: bool,
    /// Mid-air jump already spent during the current airborne period
    pub double_jumped: bool,
    pub multiplier: f64,
    pub multiplier_ticks: u32,
    pub slide_ticks: u32,
    pub shield_ticks: u32,
}

impl Player {
    /// Standing on the floor at the configured column
    pub fn new(tuning: &Tuning, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, ground_y - tuning.standing_height),
            size: Vec2::new(tuning.player_width, tuning.standing_height),
            vel_y: 0.0,
            airborne: false,
            sliding: false,
            shielded: false,
            has_double_jump: false,
            double_jumped: false,
            multiplier: 1.0,
            multiplier_ticks: 0,
            slide_ticks: 0,
            shield_ticks: 0,
        }
    }

    pub fn state(&self) -> MotionState {
        if self.airborne {
            MotionState::Airborne
        } else if self.sliding {
            MotionState::Sliding
        } else {
            MotionState::Standing
        }
    }

    /// Visual box
    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Hazard/pickup box: the visual box inset on every side
    pub fn hit_box(&self, padding: f32) -> Rect {
        self.bounds().inset(padding)
    }

    /// Apply a jump intent
    pub fn jump(&mut self, tuning: &Tuning) -> JumpResult {
        match self.state() {
            MotionState::Standing => {
                self.vel_y = tuning.jump_velocity;
                self.airborne = true;
                self.double_jumped = false;
                JumpResult::Jumped
            }
            MotionState::Sliding => {
                self.stand(tuning);
                JumpResult::SlideCancelled
            }
            MotionState::Airborne if self.has_double_jump && !self.double_jumped => {
                self.vel_y = tuning.double_jump_velocity;
                self.double_jumped = true;
                JumpResult::DoubleJumped
            }
            MotionState::Airborne => JumpResult::Rejected,
        }
    }

    /// Apply a slide intent; only accepted while standing
    pub fn slide(&mut self, tuning: &Tuning) -> bool {
        if self.state() != MotionState::Standing {
            return false;
        }
        let bottom = self.pos.y + self.size.y;
        self.sliding = true;
        self.slide_ticks = tuning.slide_ticks;
        self.size.y = tuning.sliding_height;
        self.pos.y = bottom - self.size.y;
        true
    }

    /// Return to the standing pose, keeping the feet where they are
    fn stand(&mut self, tuning: &Tuning) {
        let bottom = self.pos.y + self.size.y;
        self.sliding = false;
        self.slide_ticks = 0;
        self.size.y = tuning.standing_height;
        self.pos.y = bottom - self.size.y;
    }

    pub fn grant_shield(&mut self, ticks: u32) {
        self.shielded = true;
        self.shield_ticks = ticks;
    }

    /// Spend the shield on a hit
    pub fn break_shield(&mut self) {
        self.shielded = false;
        self.shield_ticks = 0;
    }

    pub fn grant_multiplier(&mut self, factor: f64, ticks: u32) {
        self.multiplier = factor;
        self.multiplier_ticks = ticks;
    }

    /// Advance timers and physics by one tick
    pub fn update(&mut self, tuning: &Tuning, ground_y: f32) {
        if self.sliding {
            self.slide_ticks = self.slide_ticks.saturating_sub(1);
            if self.slide_ticks == 0 {
                self.stand(tuning);
            }
        }

        if self.shield_ticks > 0 {
            self.shield_ticks -= 1;
            if self.shield_ticks == 0 {
                self.shielded = false;
            }
        }

        if self.multiplier_ticks > 0 {
            self.multiplier_ticks -= 1;
            if self.multiplier_ticks == 0 {
                self.multiplier = 1.0;
            }
        }

        // Semi-implicit Euler: velocity first, then position
        self.vel_y += tuning.gravity;
        self.pos.y += self.vel_y;

        let floor = ground_y - self.size.y;
        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vel_y = 0.0;
            self.airborne = false;
            self.double_jumped = false;
        }
    }

    /// Follow a moved floor (surface resize)
    pub fn shift_ground(&mut self, delta_y: f32) {
        self.pos.y += delta_y;
    }
}
