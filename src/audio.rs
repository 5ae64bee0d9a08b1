//! Audio feedback
//!
//! The simulation never waits on sound: it raises [`GameEvent`]s and the frame
//! driver forwards the audible ones as fire-and-forget [`Cue`]s. On wasm32 each
//! cue is a short Web Audio oscillator sweep; elsewhere cues are only logged.

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Jump,
    DoubleJump,
    Coin,
    Slide,
    PickupCollect,
    HazardHit,
    LevelUp,
}

impl Cue {
    /// Cue for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jump => Some(Cue::Jump),
            GameEvent::DoubleJump => Some(Cue::DoubleJump),
            GameEvent::Slide => Some(Cue::Slide),
            GameEvent::CoinCollected { .. } => Some(Cue::Coin),
            GameEvent::PickupCollected { .. } => Some(Cue::PickupCollect),
            GameEvent::HazardHit { .. } => Some(Cue::HazardHit),
            GameEvent::LevelUp { .. } => Some(Cue::LevelUp),
            GameEvent::RevivalOffered | GameEvent::Revived | GameEvent::GameOver { .. } => None,
        }
    }

    /// Oscillator sweep for this cue
    pub fn tone(self) -> Tone {
        match self {
            Cue::Jump => Tone::new(300.0, 600.0, 0.12, 0.4),
            Cue::DoubleJump => Tone::new(450.0, 900.0, 0.12, 0.4),
            Cue::Coin => Tone::new(1000.0, 1400.0, 0.08, 0.25),
            Cue::Slide => Tone::new(220.0, 110.0, 0.15, 0.3),
            Cue::PickupCollect => Tone::new(600.0, 1000.0, 0.2, 0.3),
            Cue::HazardHit => Tone::new(180.0, 50.0, 0.3, 0.6),
            Cue::LevelUp => Tone::new(500.0, 1200.0, 0.35, 0.35),
        }
    }
}

/// A single exponential frequency sweep with a decaying gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub start_hz: f32,
    pub end_hz: f32,
    pub duration_secs: f64,
    pub gain: f32,
}

impl Tone {
    const fn new(start_hz: f32, end_hz: f32, duration_secs: f64, gain: f32) -> Self {
        Self {
            start_hz,
            end_hz,
            duration_secs,
            gain,
        }
    }
}

/// Fire-and-forget sound sink
pub trait AudioFeedback {
    fn play(&mut self, cue: Cue);
}

/// Sink that drops every cue
#[derive(Debug, Default)]
pub struct Silent;

impl AudioFeedback for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = web_sys::AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&self, cue: Cue, vol: f32) {
        use web_sys::{AudioContextState, OscillatorType};

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let tone = cue.tone();
        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        osc.set_type(OscillatorType::Square);
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let t = ctx.current_time();
        let end = t + tone.duration_secs;
        gain.gain().set_value_at_time(vol * tone.gain, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
        osc.frequency().set_value_at_time(tone.start_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(tone.end_hz, end)
            .ok();
        osc.start().ok();
        osc.stop_with_when(end + 0.05).ok();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&self, cue: Cue, vol: f32) {
        log::debug!("audio cue {:?} at volume {:.2}", cue, vol);
    }
}

impl AudioFeedback for AudioManager {
    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.emit(cue, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HazardKind, PickupKind};
    use glam::Vec2;

    #[test]
    fn test_event_cues() {
        assert_eq!(Cue::for_event(&GameEvent::Jump), Some(Cue::Jump));
        assert_eq!(
            Cue::for_event(&GameEvent::PickupCollected {
                kind: PickupKind::Shield,
                at: Vec2::ZERO
            }),
            Some(Cue::PickupCollect)
        );
        assert_eq!(
            Cue::for_event(&GameEvent::HazardHit {
                kind: HazardKind::Air,
                at: Vec2::ZERO,
                absorbed: true
            }),
            Some(Cue::HazardHit)
        );
        assert_eq!(Cue::for_event(&GameEvent::GameOver { score: 1 }), None);
    }

    #[test]
    fn test_volume_controls() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(0.5);
        assert_eq!(audio.effective_volume(), 0.5);
        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_tones_are_audible() {
        for cue in [
            Cue::Jump,
            Cue::DoubleJump,
            Cue::Coin,
            Cue::Slide,
            Cue::PickupCollect,
            Cue::HazardHit,
            Cue::LevelUp,
        ] {
            let tone = cue.tone();
            assert!(tone.start_hz > 20.0 && tone.end_hz > 20.0);
            assert!(tone.duration_secs > 0.0 && tone.gain > 0.0);
        }
    }
}
