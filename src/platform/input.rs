//! Abstract input intents
//!
//! Hosts map their own events (keys, touches, buttons) to an [`Intent`] and
//! hand it to [`crate::Game::handle_intent`].

use serde::{Deserialize, Serialize};

/// Player intent, independent of the device that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Jump,
    Slide,
    Pause,
    /// Leave the ready screen
    Start,
    /// New run after game over
    Restart,
    /// Accept the one-time revival
    Revive,
    /// Decline the revival and end the run
    Decline,
}

impl Intent {
    /// Default keyboard mapping (`KeyboardEvent.code` names)
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" | "KeyW" => Some(Intent::Jump),
            "ArrowDown" | "KeyS" => Some(Intent::Slide),
            "Escape" | "KeyP" => Some(Intent::Pause),
            "Enter" => Some(Intent::Start),
            "KeyR" => Some(Intent::Restart),
            "KeyY" => Some(Intent::Revive),
            "KeyN" => Some(Intent::Decline),
            _ => None,
        }
    }
}
