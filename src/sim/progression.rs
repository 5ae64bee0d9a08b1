//! Score, level curve, scroll speed and the one-time revival allowance

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Run progression state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    /// Never decreases during a run
    pub score: f64,
    /// 1..=max_level
    pub level: u32,
    /// Cumulative score needed for the next level
    pub next_level_threshold: f64,
    pub scroll_speed: f32,
    /// The revival allowance is spent
    pub revival_used: bool,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0.0,
            level: 1,
            next_level_threshold: tuning.first_level_threshold,
            scroll_speed: tuning.clamp_speed(tuning.initial_speed),
            revival_used: false,
        }
    }

    /// Accrue one tick of survival score and check for a level-up.
    ///
    /// Returns the new level if one was reached this tick.
    pub fn advance(&mut self, tuning: &Tuning, multiplier: f64) -> Option<u32> {
        let gained = self.scroll_speed as f64 * tuning.score_rate * multiplier;
        self.score += gained.max(0.0);
        self.check_level_up(tuning)
    }

    /// Flat score award (coins)
    pub fn add_bonus(&mut self, amount: f64) {
        self.score += amount.max(0.0);
    }

    /// At most one level per call; thresholds accumulate
    pub fn check_level_up(&mut self, tuning: &Tuning) -> Option<u32> {
        if self.score >= self.next_level_threshold && self.level < tuning.max_level {
            self.level += 1;
            self.next_level_threshold += tuning.level_threshold_step;
            self.scroll_speed = tuning.clamp_speed(self.scroll_speed + tuning.speed_per_level);
            log::info!(
                "Level {} reached at score {:.0} (speed {:.1}, next at {:.0})",
                self.level,
                self.score,
                self.scroll_speed,
                self.next_level_threshold
            );
            Some(self.level)
        } else {
            None
        }
    }

    /// Whether a fatal hit can still be undone this run
    pub fn can_revive(&self, tuning: &Tuning) -> bool {
        !self.revival_used && self.score >= tuning.revival_min_score
    }

    /// Spend the revival allowance; false if it was not available
    pub fn consume_revival(&mut self, tuning: &Tuning) -> bool {
        if !self.can_revive(tuning) {
            return false;
        }
        self.revival_used = true;
        true
    }

    /// Integer score recorded on the leaderboard
    pub fn final_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}
