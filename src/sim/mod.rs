//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Time enters only as an explicit parameter
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod player;
pub mod progression;
pub mod random;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Outcome, Resolution, resolve};
pub use entities::{Coin, Hazard, HazardKind, Pickup, PickupKind};
pub use player::{JumpResult, MotionState, Player};
pub use progression::Progression;
pub use rect::Rect;
pub use spawn::{CoinPattern, SpawnEngine, gap_range};
pub use state::{GameEvent, GamePhase, GameState, Surface};
pub use tick::{TickInput, end_run, jump, revive, slide, tick};
