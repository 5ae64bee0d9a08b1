//! Collision resolution for one tick
//!
//! Three independent passes, always in this order:
//! 1. coins against the raw player box
//! 2. hazards (oldest first) against the padded player box; the first hit
//!    either spends the shield or ends the run, and stops the pass
//! 3. pickups against the padded player box, each stretched upward
//!
//! Pickups are still collected on a tick that turns out fatal.

use super::entities::{Coin, Hazard, Pickup, PickupKind};
use super::player::Player;
use super::rect::Rect;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Gameplay result of a tick's collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Fatal,
}

/// Everything the collision pass hands back to progression
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Flat score earned from coins this tick
    pub coin_bonus: f64,
}

/// Test the player against every live entity and apply the results
pub fn resolve(
    player: &mut Player,
    hazards: &mut [Hazard],
    pickups: &mut [Pickup],
    coins: &mut [Coin],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    let body = player.bounds();
    let hit_box = player.hit_box(tuning.player_padding);

    let mut coin_bonus = 0.0;
    for coin in coins.iter_mut().filter(|c| !c.collected) {
        let bounds = coin.bounds();
        if body.overlaps(&bounds) {
            coin.collected = true;
            coin_bonus += tuning.coin_bonus;
            events.push(GameEvent::CoinCollected {
                at: bounds.center(),
            });
        }
    }

    let outcome = resolve_hazards(player, hit_box, hazards, events);

    for pickup in pickups.iter_mut().filter(|p| !p.collected) {
        if hit_box.overlaps(&pickup.hit_box(tuning.pickup_reach)) {
            pickup.collected = true;
            apply_pickup(player, pickup.kind, tuning);
            events.push(GameEvent::PickupCollected {
                kind: pickup.kind,
                at: pickup.bounds().center(),
            });
        }
    }

    Resolution {
        outcome,
        coin_bonus,
    }
}

fn resolve_hazards(
    player: &mut Player,
    hit_box: Rect,
    hazards: &mut [Hazard],
    events: &mut Vec<GameEvent>,
) -> Outcome {
    for hazard in hazards.iter_mut().filter(|h| !h.shattered) {
        let Some(part) = hazard.hit_boxes().find(|part| part.overlaps(&hit_box)) else {
            continue;
        };

        let absorbed = player.shielded;
        events.push(GameEvent::HazardHit {
            kind: hazard.kind,
            at: part.center(),
            absorbed,
        });

        if absorbed {
            player.break_shield();
            hazard.shattered = true;
            return Outcome::Continue;
        }
        return Outcome::Fatal;
    }
    Outcome::Continue
}

/// Pickup effects replace any running timer; nothing stacks
fn apply_pickup(player: &mut Player, kind: PickupKind, tuning: &Tuning) {
    match kind {
        PickupKind::Shield => player.grant_shield(tuning.shield_ticks),
        PickupKind::DoubleJump => player.has_double_jump = true,
        PickupKind::Multiplier => {
            player.grant_multiplier(tuning.multiplier_factor, tuning.multiplier_ticks)
        }
    }
}
