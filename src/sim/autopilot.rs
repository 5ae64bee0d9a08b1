//! Idle/demo mode: a simple reflex player
//!
//! Looks at the nearest hazard still ahead and jumps or slides when it gets
//! close enough. Good enough to survive the early levels, not a solver.

use super::entities::HazardKind;
use super::player::MotionState;
use super::state::GameState;
use super::tick::TickInput;

/// Fill in jump/slide intents for this tick
pub fn steer(state: &GameState, input: &mut TickInput) {
    let player = state.player.bounds();
    let speed = state.progression.scroll_speed;

    let nearest = state
        .spawner
        .hazards()
        .iter()
        .filter(|h| !h.shattered && h.bounds().right() > player.left())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    let Some(hazard) = nearest else {
        return;
    };
    let distance = hazard.bounds().left() - player.right();

    match (hazard.kind, state.player.state()) {
        (HazardKind::Air | HazardKind::Tall, MotionState::Standing) => {
            if distance < speed * 4.0 {
                input.slide = true;
            }
        }
        (HazardKind::Long, MotionState::Standing) => {
            if distance < speed * 6.0 {
                input.jump = true;
            }
        }
        (HazardKind::Ground | HazardKind::Double, MotionState::Standing) => {
            if distance < speed * 8.0 {
                input.jump = true;
            }
        }
        (HazardKind::Double | HazardKind::Long, MotionState::Airborne) => {
            // Stretch the arc if the charge is there and we're falling too early
            let over_hazard = distance < 0.0;
            if over_hazard && state.player.vel_y > 0.0 {
                input.jump = true;
            }
        }
        _ => {}
    }
}
