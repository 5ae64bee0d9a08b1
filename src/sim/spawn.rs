//! Procedural spawning of hazards, coins and pickups
//!
//! The engine owns every live entity. Each tick it scrolls the world, counts
//! down the distance to the next hazard, rolls for power-ups and sweeps out
//! anything that left the screen or was consumed.

use glam::Vec2;
use rand::Rng;

use super::entities::{Coin, Hazard, HazardKind, Pickup, PickupKind};
use super::random;
use super::state::Surface;
use crate::tuning::Tuning;

/// Coin batches form one of two shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinPattern {
    /// Straight row at jump height
    Line,
    /// Hump following a jump trajectory
    Arc,
}

/// Smallest and largest hazard spacing for a level.
///
/// Both bounds shrink with difficulty and bottom out at their floors; an
/// inverted pair collapses onto the maximum.
pub fn gap_range(tuning: &Tuning, level: u32) -> (f32, f32) {
    let difficulty = tuning.difficulty(level);
    let max_gap = (tuning.base_max_gap - difficulty * tuning.max_gap_shrink).max(tuning.max_gap_floor);
    let min_gap = (tuning.base_min_gap - difficulty * tuning.min_gap_shrink)
        .max(tuning.min_gap_floor)
        .min(max_gap);
    (min_gap, max_gap)
}

/// Owner of the live entity collections and the spawn schedule
#[derive(Debug, Clone)]
pub struct SpawnEngine {
    hazards: Vec<Hazard>,
    pickups: Vec<Pickup>,
    coins: Vec<Coin>,
    /// Scroll distance left before the next hazard appears
    distance_to_next_hazard: f32,
    next_id: u32,
}

impl SpawnEngine {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            hazards: Vec::new(),
            pickups: Vec::new(),
            coins: Vec::new(),
            distance_to_next_hazard: tuning.opening_distance,
            next_id: 1,
        }
    }

    /// Drop every entity and restart the schedule
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn distance_to_next_hazard(&self) -> f32 {
        self.distance_to_next_hazard
    }

    /// Override the countdown (scripted openings, tests)
    pub fn schedule_next_hazard(&mut self, distance: f32) {
        self.distance_to_next_hazard = distance;
    }

    /// Mutable access to all three collections at once, for one tick's collision pass
    pub fn entities_mut(&mut self) -> (&mut [Hazard], &mut [Pickup], &mut [Coin]) {
        (&mut self.hazards, &mut self.pickups, &mut self.coins)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_hazard(&mut self, hazard: Hazard) {
        self.hazards.push(hazard);
    }

    pub fn push_pickup(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    pub fn push_coin(&mut self, coin: Coin) {
        self.coins.push(coin);
    }

    /// Remove every hazard (revival)
    pub fn clear_hazards(&mut self) {
        self.hazards.clear();
    }

    /// Move every entity vertically (the floor moved)
    pub fn shift_ground(&mut self, delta_y: f32) {
        let delta = Vec2::new(0.0, delta_y);
        for hazard in &mut self.hazards {
            hazard.pos += delta;
        }
        for pickup in &mut self.pickups {
            pickup.pos += delta;
        }
        for coin in &mut self.coins {
            coin.pos += delta;
        }
    }

    /// Advance the world by one tick
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        surface: &Surface,
        scroll_speed: f32,
        level: u32,
        time_ms: f64,
    ) {
        for hazard in &mut self.hazards {
            hazard.scroll(scroll_speed);
        }
        for pickup in &mut self.pickups {
            pickup.scroll(scroll_speed);
            pickup.animate(time_ms, tuning);
        }
        for coin in &mut self.coins {
            coin.scroll(scroll_speed);
            coin.animate(time_ms);
        }

        self.distance_to_next_hazard -= scroll_speed;
        if self.distance_to_next_hazard <= 0.0 {
            self.spawn_hazard(tuning, rng, surface, level);
        }

        let chance = tuning.powerup_chance * (scroll_speed / tuning.initial_speed);
        if random::chance(rng, chance) {
            self.spawn_pickup(tuning, rng, surface, time_ms);
        }

        self.retire();
    }

    /// Spawn one hazard at the right edge and schedule the next
    fn spawn_hazard<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        surface: &Surface,
        level: u32,
    ) {
        let kind = random::weighted(rng, HazardKind::weights(level)).unwrap_or(HazardKind::Ground);
        let id = self.next_entity_id();
        let hazard = Hazard::spawn(id, kind, surface.width, surface.ground_y, tuning, rng);

        let (min_gap, max_gap) = gap_range(tuning, level);
        let gap = random::range(rng, min_gap, max_gap);
        self.distance_to_next_hazard = gap;

        log::debug!(
            "spawned {:?} #{} (level {}), next gap {:.0}",
            kind,
            id,
            level,
            gap
        );

        if gap > tuning.coin_gap_threshold && random::chance(rng, tuning.coin_chance) {
            let pattern = if random::chance(rng, 0.5) {
                CoinPattern::Line
            } else {
                CoinPattern::Arc
            };
            let from = hazard.bounds().right();
            let to = hazard.pos.x + gap;
            self.spawn_coins(tuning, surface, from, to, pattern);
        }

        self.hazards.push(hazard);
    }

    /// Lay a coin batch across the open stretch `[from, to]`
    pub fn spawn_coins(
        &mut self,
        tuning: &Tuning,
        surface: &Surface,
        from: f32,
        to: f32,
        pattern: CoinPattern,
    ) {
        let size = tuning.coin_size;
        // Keep a coin's width clear of both neighbouring hazards
        let start = from + size;
        let span = to - size * 2.0 - start;
        if span <= 0.0 || tuning.max_coins == 0 {
            return;
        }

        let count = ((span / (size * 2.0)) as usize + 1).min(tuning.max_coins);
        for i in 0..count {
            let t = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.5
            };
            let x = start + span * t;
            let y = match pattern {
                CoinPattern::Arc if count > 1 => {
                    let base = surface.ground_y - tuning.coin_arc_base;
                    base - (t * std::f32::consts::PI).sin() * tuning.coin_arc_amplitude
                }
                _ => surface.ground_y - tuning.coin_line_height,
            };
            let id = self.next_entity_id();
            self.coins.push(Coin::new(id, Vec2::new(x, y - size / 2.0), size));
        }
    }

    fn spawn_pickup<R: Rng + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
        surface: &Surface,
        time_ms: f64,
    ) {
        let kind = random::weighted(rng, &PickupKind::WEIGHTS).unwrap_or(PickupKind::Shield);
        let x = surface.width + random::range(rng, 0.0, tuning.pickup_spawn_spread);
        let height = random::range(rng, tuning.pickup_min_height, tuning.pickup_max_height);
        let phase = random::range(rng, 0.0, std::f32::consts::TAU);
        let pos = Vec2::new(x, surface.ground_y - height - tuning.pickup_size);

        let id = self.next_entity_id();
        let mut pickup = Pickup::new(id, kind, pos, tuning.pickup_size, phase);
        pickup.animate(time_ms, tuning);
        log::debug!("spawned {:?} pickup #{} at x={:.0}", kind, id, x);
        self.pickups.push(pickup);
    }

    /// The only deallocation path: drop off-screen or consumed entities
    fn retire(&mut self) {
        self.hazards.retain(|h| !h.is_off_screen() && !h.shattered);
        self.pickups.retain(|p| !p.is_off_screen() && !p.collected);
        self.coins.retain(|c| !c.is_off_screen() && !c.collected);
    }
}
