//! World entities: hazards, pickups and coins
//!
//! Each hazard kind fixes its geometry and hit-boxes once, at creation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::random;
use super::rect::Rect;
use crate::tuning::Tuning;

/// Coin spin rate (radians per millisecond, purely visual)
const COIN_SPIN_RATE: f32 = 0.006;

/// Hazard types, in the fixed order used for weighted selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    /// Low block sitting on the floor; jump it
    Ground,
    /// Floating bar at head height; slide under it
    Air,
    /// Two blocks with a short landing gap between them
    Double,
    /// Pillar with a slide-through gap at the bottom
    Tall,
    /// Wide, low slab; needs a long jump
    Long,
}

impl HazardKind {
    /// Spawn weights for a level; kinds unlock as the level rises
    pub fn weights(level: u32) -> &'static [(HazardKind, u32)] {
        use HazardKind::*;
        match level {
            0 | 1 => &[(Ground, 100)],
            2 => &[(Ground, 70), (Air, 30)],
            3 => &[(Ground, 50), (Air, 30), (Double, 20)],
            4 => &[(Ground, 40), (Air, 25), (Double, 20), (Tall, 15)],
            _ => &[(Ground, 30), (Air, 20), (Double, 20), (Tall, 15), (Long, 15)],
        }
    }

    /// Draw this kind's bounding size
    fn roll_size<R: Rng + ?Sized>(self, tuning: &Tuning, rng: &mut R) -> Vec2 {
        match self {
            HazardKind::Ground => Vec2::new(
                random::range(rng, tuning.ground_width.min, tuning.ground_width.max),
                random::range(
                    rng,
                    tuning.ground_height_span.min,
                    tuning.ground_height_span.max,
                ),
            ),
            HazardKind::Air => Vec2::new(tuning.air_width, tuning.air_height),
            HazardKind::Double => Vec2::new(
                tuning.double_width * 2.0 + tuning.double_spacing,
                tuning.double_height,
            ),
            HazardKind::Tall => Vec2::new(tuning.tall_width, tuning.tall_height),
            HazardKind::Long => Vec2::new(
                random::range(rng, tuning.long_width.min, tuning.long_width.max),
                tuning.long_height,
            ),
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    /// Top-left of the visual bounds
    pub pos: Vec2,
    pub size: Vec2,
    /// Hit-boxes relative to `pos`, padding already applied
    parts: [Option<Rect>; 2],
    /// Broken by a shield; retired on the next sweep
    pub shattered: bool,
}

impl Hazard {
    /// Create a hazard of `kind` with its left edge at `x`, rolling any
    /// randomized dimensions
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        kind: HazardKind,
        x: f32,
        ground_y: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let size = kind.roll_size(tuning, rng);
        Self::with_size(id, kind, x, ground_y, size, tuning)
    }

    /// Create a hazard with explicit bounding size
    pub fn with_size(
        id: u32,
        kind: HazardKind,
        x: f32,
        ground_y: f32,
        size: Vec2,
        tuning: &Tuning,
    ) -> Self {
        let pad = tuning.hazard_padding;
        let (top, parts) = match kind {
            HazardKind::Ground | HazardKind::Long => {
                let local = Rect::new(0.0, 0.0, size.x, size.y);
                (ground_y - size.y, [Some(local.inset(pad)), None])
            }
            HazardKind::Air => {
                let local = Rect::new(0.0, 0.0, size.x, size.y);
                (
                    ground_y - tuning.air_clearance - size.y,
                    [Some(local.inset(pad)), None],
                )
            }
            HazardKind::Double => {
                let part_w = ((size.x - tuning.double_spacing) / 2.0).max(0.0);
                let first = Rect::new(0.0, 0.0, part_w, size.y);
                let second = Rect::new(size.x - part_w, 0.0, part_w, size.y);
                (ground_y - size.y, [Some(first.inset(pad)), Some(second.inset(pad))])
            }
            HazardKind::Tall => {
                // Hit-box stops short of the floor, leaving room to slide through
                let lowered = Rect::new(0.0, 0.0, size.x, size.y - tuning.tall_slide_gap);
                (ground_y - size.y, [Some(lowered.inset(pad)), None])
            }
        };

        Self {
            id,
            kind,
            pos: Vec2::new(x, top),
            size,
            parts,
            shattered: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// World-space hit-boxes, in fixed part order
    pub fn hit_boxes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.parts
            .iter()
            .flatten()
            .map(move |part| part.translated(self.pos))
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    pub fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Absorbs one hazard hit for a limited time
    Shield,
    /// Unlocks a mid-air jump for the rest of the run
    DoubleJump,
    /// Doubles score accrual for a limited time
    Multiplier,
}

impl PickupKind {
    pub const WEIGHTS: [(PickupKind, u32); 3] = [
        (PickupKind::Shield, 40),
        (PickupKind::DoubleJump, 30),
        (PickupKind::Multiplier, 30),
    ];
}

/// A floating power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    /// Rest position (top-left) before bobbing
    pub pos: Vec2,
    pub size: f32,
    /// Per-pickup bob phase so neighbours don't move in lockstep
    pub phase: f32,
    /// Current vertical bob offset
    pub bob: f32,
    pub collected: bool,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2, size: f32, phase: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            phase,
            bob: 0.0,
            collected: false,
        }
    }

    /// Recompute the bob offset for a point in time
    pub fn animate(&mut self, time_ms: f64, tuning: &Tuning) {
        let angle = (time_ms as f32) * tuning.pickup_bob_rate + self.phase;
        self.bob = angle.sin() * tuning.pickup_bob_amplitude;
    }

    /// Visual box including the current bob
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y + self.bob, self.size, self.size)
    }

    /// Collection box: the visual box stretched upward by `reach`
    pub fn hit_box(&self, reach: f32) -> Rect {
        self.bounds().extend_up(reach)
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size < 0.0
    }

    pub fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

/// A score coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// Rotation phase for the spin animation (radians)
    pub spin: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2, size: f32) -> Self {
        Self {
            id,
            pos,
            size,
            spin: 0.0,
            collected: false,
        }
    }

    pub fn animate(&mut self, time_ms: f64) {
        // Offset by id so a batch doesn't spin in unison
        let angle = time_ms as f32 * COIN_SPIN_RATE + self.id as f32 * 0.7;
        self.spin = angle.rem_euclid(std::f32::consts::TAU);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size < 0.0
    }

    pub fn scroll(&mut self, dx: f32) {
        self.pos.x -= dx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 350.0;

    fn hazard(kind: HazardKind, size: Vec2) -> Hazard {
        Hazard::with_size(1, kind, 100.0, GROUND, size, &Tuning::default())
    }

    #[test]
    fn test_ground_hazard_sits_on_floor() {
        let h = hazard(HazardKind::Ground, Vec2::new(40.0, 50.0));
        assert_eq!(h.bounds().bottom(), GROUND);
        let boxes: Vec<_> = h.hit_boxes().collect();
        assert_eq!(boxes, vec![Rect::new(105.0, GROUND - 45.0, 30.0, 40.0)]);
    }

    #[test]
    fn test_air_hazard_floats() {
        let tuning = Tuning::default();
        let h = hazard(HazardKind::Air, Vec2::new(50.0, 30.0));
        assert_eq!(h.bounds().bottom(), GROUND - tuning.air_clearance);
    }

    #[test]
    fn test_double_hazard_has_two_parts() {
        let tuning = Tuning::default();
        let size = Vec2::new(130.0, 45.0);
        let h = hazard(HazardKind::Double, size);
        let boxes: Vec<_> = h.hit_boxes().collect();
        assert_eq!(boxes.len(), 2);
        assert!(boxes[0].right() < boxes[1].left());
        // Gap between the blocks is the spacing plus both paddings
        let gap = boxes[1].left() - boxes[0].right();
        assert!((gap - (tuning.double_spacing + 2.0 * tuning.hazard_padding)).abs() < 1e-4);
        // Both parts use the same inset rule
        assert_eq!(boxes[0].size, boxes[1].size);
        assert_eq!(boxes[0].bottom(), GROUND - tuning.hazard_padding);
    }

    #[test]
    fn test_tall_hazard_leaves_slide_gap() {
        let tuning = Tuning::default();
        let h = hazard(HazardKind::Tall, Vec2::new(40.0, 160.0));
        let hit = h.hit_boxes().next().unwrap();
        assert_eq!(h.bounds().bottom(), GROUND);
        assert!(hit.bottom() <= GROUND - tuning.tall_slide_gap);
    }

    #[test]
    fn test_off_screen_boundary() {
        let mut h = hazard(HazardKind::Ground, Vec2::new(40.0, 50.0));
        h.pos.x = -40.0;
        assert!(!h.is_off_screen());
        h.scroll(0.5);
        assert!(h.is_off_screen());
    }

    #[test]
    fn test_hazard_weights_unlock_by_level() {
        use HazardKind::*;
        assert_eq!(HazardKind::weights(0), &[(Ground, 100)]);
        assert_eq!(HazardKind::weights(1), &[(Ground, 100)]);
        assert_eq!(HazardKind::weights(2), &[(Ground, 70), (Air, 30)]);
        assert_eq!(
            HazardKind::weights(3),
            &[(Ground, 50), (Air, 30), (Double, 20)]
        );
        assert_eq!(
            HazardKind::weights(4),
            &[(Ground, 40), (Air, 25), (Double, 20), (Tall, 15)]
        );
        let top = [(Ground, 30), (Air, 20), (Double, 20), (Tall, 15), (Long, 15)];
        assert_eq!(HazardKind::weights(5), &top);
        assert_eq!(HazardKind::weights(10), &top);
        for level in 1..20 {
            let total: u32 = HazardKind::weights(level).iter().map(|&(_, w)| w).sum();
            assert_eq!(total, 100);
        }
    }

    #[test]
    fn test_pickup_weights() {
        assert_eq!(
            PickupKind::WEIGHTS,
            [
                (PickupKind::Shield, 40),
                (PickupKind::DoubleJump, 30),
                (PickupKind::Multiplier, 30),
            ]
        );
    }

    #[test]
    fn test_pickup_bob_and_reach() {
        let tuning = Tuning::default();
        let mut p = Pickup::new(1, PickupKind::Shield, Vec2::new(10.0, 100.0), 30.0, 0.0);
        p.animate(0.0, &tuning);
        assert_eq!(p.bob, 0.0);

        let quarter = std::f64::consts::FRAC_PI_2 / tuning.pickup_bob_rate as f64;
        p.animate(quarter, &tuning);
        assert!((p.bob - tuning.pickup_bob_amplitude).abs() < 1e-3);

        let hit = p.hit_box(15.0);
        assert!((hit.top() - (p.bounds().top() - 15.0)).abs() < 1e-4);
        assert_eq!(hit.bottom(), p.bounds().bottom());
    }
}
