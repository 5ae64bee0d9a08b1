//! Browser bindings
//!
//! The host page owns the canvas and the `requestAnimationFrame` loop. It
//! forwards timestamps and input here and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::game::Game;
use crate::persistence::LocalStorageStore;
use crate::platform::Intent;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Neon Dash starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty; unparsable tuning falls back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: &str) -> WebGame {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).unwrap_or_else(|err| {
                log::warn!("Invalid tuning, using defaults: {err}");
                Tuning::default()
            })
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let game = Game::new(
            seed,
            tuning,
            width,
            height,
            Box::new(AudioManager::new()),
            Box::new(LocalStorageStore::browser()),
        );
        WebGame { game }
    }

    /// Advance to the `requestAnimationFrame` timestamp; returns ticks run
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        self.game.frame(now_ms)
    }

    pub fn jump(&mut self) {
        self.game.handle_intent(Intent::Jump);
    }

    pub fn slide(&mut self) {
        self.game.handle_intent(Intent::Slide);
    }

    pub fn pause(&mut self) {
        self.game.handle_intent(Intent::Pause);
    }

    pub fn start(&mut self) {
        self.game.handle_intent(Intent::Start);
    }

    pub fn restart(&mut self) {
        self.game.handle_intent(Intent::Restart);
    }

    pub fn revive(&mut self) {
        self.game.handle_intent(Intent::Revive);
    }

    pub fn decline(&mut self) {
        self.game.handle_intent(Intent::Decline);
    }

    /// Map a `KeyboardEvent.code`; returns whether it was consumed
    pub fn key(&mut self, code: &str) -> bool {
        match Intent::from_key_code(code) {
            Some(intent) => {
                self.game.handle_intent(intent);
                true
            }
            None => false,
        }
    }

    /// Tab hidden: pause an active run
    pub fn visibility_lost(&mut self) {
        if self.game.state().is_active() {
            self.game.toggle_pause();
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    #[wasm_bindgen(js_name = highScore)]
    pub fn high_score(&self) -> u64 {
        self.game.high_score()
    }

    /// Drawable state as JSON (empty object if serialization fails)
    pub fn snapshot_json(&self) -> String {
        self.game.snapshot().to_json().unwrap_or_else(|err| {
            log::error!("Snapshot serialization failed: {err}");
            "{}".to_string()
        })
    }
}
