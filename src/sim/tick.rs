//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Per tick:
//! progression → spawning → player physics → collisions, then the outcome
//! either continues the run, offers the revival or ends it.

use super::autopilot;
use super::collision::{self, Outcome};
use super::player::JumpResult;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub jump: bool,
    pub slide: bool,
    /// Pause toggle
    pub pause: bool,
    /// Accept the revival offer
    pub revive: bool,
    /// Decline the revival offer
    pub decline: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Jump intent; only an active run accepts it
pub fn jump(state: &mut GameState, tuning: &Tuning) -> JumpResult {
    if !state.is_active() {
        return JumpResult::Rejected;
    }
    let result = state.player.jump(tuning);
    match result {
        JumpResult::Jumped => state.events.push(GameEvent::Jump),
        JumpResult::DoubleJumped => state.events.push(GameEvent::DoubleJump),
        JumpResult::SlideCancelled | JumpResult::Rejected => {}
    }
    result
}

/// Slide intent; returns whether a slide started
pub fn slide(state: &mut GameState, tuning: &Tuning) -> bool {
    if !state.is_active() {
        return false;
    }
    let started = state.player.slide(tuning);
    if started {
        state.events.push(GameEvent::Slide);
    }
    started
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    if state.phase == GamePhase::RevivalOffer {
        if input.revive {
            revive(state, tuning);
        } else if input.decline {
            end_run(state);
        }
        return;
    }

    // Don't tick unless a run is active
    if state.phase != GamePhase::Playing {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot::steer(state, &mut input);
    }

    state.time_ticks += 1;
    let time_ms = state.time_ms();

    if input.jump {
        jump(state, tuning);
    }
    if input.slide {
        slide(state, tuning);
    }

    if let Some(level) = state
        .progression
        .advance(tuning, state.player.multiplier)
    {
        state.events.push(GameEvent::LevelUp { level });
    }

    let speed = state.progression.scroll_speed;
    let level = state.progression.level;
    state
        .spawner
        .advance(tuning, &mut state.rng, &state.surface, speed, level, time_ms);

    state.player.update(tuning, state.surface.ground_y);

    let (hazards, pickups, coins) = state.spawner.entities_mut();
    let resolution = collision::resolve(
        &mut state.player,
        hazards,
        pickups,
        coins,
        tuning,
        &mut state.events,
    );
    state.progression.add_bonus(resolution.coin_bonus);

    if resolution.outcome == Outcome::Fatal {
        on_fatal(state, tuning);
    }
}

fn on_fatal(state: &mut GameState, tuning: &Tuning) {
    if state.progression.can_revive(tuning) {
        log::info!(
            "Fatal hit at score {:.0}; revival available",
            state.progression.score
        );
        state.phase = GamePhase::RevivalOffer;
        state.events.push(GameEvent::RevivalOffered);
    } else {
        end_run(state);
    }
}

/// Resume after a fatal hit: hazards cleared, fresh shield, allowance spent
pub fn revive(state: &mut GameState, tuning: &Tuning) -> bool {
    if state.phase != GamePhase::RevivalOffer || !state.progression.consume_revival(tuning) {
        return false;
    }
    state.spawner.clear_hazards();
    state.player.grant_shield(tuning.revival_shield_ticks);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Revived);
    log::info!("Revived at score {:.0}", state.progression.score);
    true
}

/// Terminal transition
pub fn end_run(state: &mut GameState) {
    let score = state.progression.final_score();
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::GameOver { score });
    log::info!(
        "Run over: score {} (level {}, {} ticks)",
        score,
        state.progression.level,
        state.time_ticks
    );
}
