//! Frame driver
//!
//! Owns a run's [`GameState`] together with its collaborators and turns
//! host frames and intents into fixed simulation ticks. Everything the
//! simulation raises is forwarded here: audible events become cues, and the
//! terminal event records the run with the score store exactly once.

use crate::audio::{AudioFeedback, Cue};
use crate::highscores::HighScoreEntry;
use crate::persistence::ScoreStore;
use crate::platform::{FrameClock, Intent};
use crate::render::{FrameSnapshot, Renderer};
use crate::sim::{self, GameEvent, GamePhase, GameState, JumpResult, Surface, TickInput};
use crate::tuning::Tuning;

/// A game session: one run at a time, many runs per session
pub struct Game {
    state: GameState,
    tuning: Tuning,
    input: TickInput,
    clock: FrameClock,
    audio: Box<dyn AudioFeedback>,
    scores: Box<dyn ScoreStore>,
    /// Best score, read once at startup and raised as runs finish
    high_score: u64,
    leaderboard: Vec<HighScoreEntry>,
    run_recorded: bool,
    next_seed: u64,
}

impl Game {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        width: f32,
        height: f32,
        audio: Box<dyn AudioFeedback>,
        scores: Box<dyn ScoreStore>,
    ) -> Self {
        let tuning = tuning.sanitized();
        let surface = Surface::new(width, height, &tuning);
        let high_score = scores.high_score();
        log::info!("Game ready (seed {seed}, best {high_score})");
        Self {
            state: GameState::new(seed, &tuning, surface),
            tuning,
            input: TickInput::default(),
            clock: FrameClock::new(),
            audio,
            scores,
            high_score,
            leaderboard: Vec::new(),
            run_recorded: false,
            next_seed: seed,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Leaderboard as of the last finished run (empty before the first)
    pub fn leaderboard(&self) -> &[HighScoreEntry] {
        &self.leaderboard
    }

    /// Let the autopilot play (demo mode)
    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Leave the ready screen
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Ready {
            self.state.phase = GamePhase::Playing;
            self.clock.reset();
            log::info!("Run started (seed {})", self.state.seed);
        }
    }

    /// Throw away the current run and begin a new one with a fresh seed
    pub fn restart(&mut self) {
        // LCG step (Knuth MMIX constants) keeps successive seeds reproducible
        self.next_seed = self
            .next_seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state.restart(self.next_seed, &self.tuning);
        self.run_recorded = false;
        self.clock.reset();
        log::info!("Run restarted (seed {})", self.next_seed);
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Playing => {
                self.state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Playing;
                self.clock.reset();
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    pub fn on_jump_intent(&mut self) -> JumpResult {
        let result = sim::jump(&mut self.state, &self.tuning);
        self.flush_events();
        result
    }

    pub fn on_slide_intent(&mut self) -> bool {
        let started = sim::slide(&mut self.state, &self.tuning);
        self.flush_events();
        started
    }

    pub fn accept_revival(&mut self) -> bool {
        let revived = sim::revive(&mut self.state, &self.tuning);
        if revived {
            self.clock.reset();
        }
        self.flush_events();
        revived
    }

    pub fn decline_revival(&mut self) {
        if self.state.phase == GamePhase::RevivalOffer {
            sim::end_run(&mut self.state);
            self.flush_events();
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height, &self.tuning);
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Jump => {
                self.on_jump_intent();
            }
            Intent::Slide => {
                self.on_slide_intent();
            }
            Intent::Pause => self.toggle_pause(),
            Intent::Start => self.start(),
            Intent::Restart => {
                if self.state.phase == GamePhase::GameOver {
                    self.restart();
                }
            }
            Intent::Revive => {
                self.accept_revival();
            }
            Intent::Decline => self.decline_revival(),
        }
    }

    /// Advance by wall-clock time; returns the number of ticks run
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        if !self.state.is_active() {
            // Nothing accumulates outside an active run
            self.clock.reset();
            return 0;
        }

        let ticks = self.clock.advance(now_ms);
        let mut ran = 0;
        for _ in 0..ticks {
            sim::tick(&mut self.state, &self.input, &self.tuning);
            ran += 1;
            if !self.state.is_active() {
                break;
            }
        }
        self.flush_events();
        ran
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot::capture(&self.state, self.high_score)
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.snapshot());
    }

    fn flush_events(&mut self) {
        for event in self.state.drain_events() {
            if let Some(cue) = Cue::for_event(&event) {
                self.audio.play(cue);
            }
            if let GameEvent::GameOver { score } = event {
                self.record_run(score);
            }
        }
    }

    fn record_run(&mut self, score: u64) {
        if self.run_recorded {
            return;
        }
        self.run_recorded = true;
        self.leaderboard = self.scores.record_run(score);
        if score > self.high_score {
            log::info!("New high score: {score}");
        }
        self.high_score = self.high_score.max(self.scores.high_score()).max(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;
    use crate::persistence::MemoryStore;
    use crate::sim::{Hazard, HazardKind};
    use glam::Vec2;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl AudioFeedback for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    /// Memory store that counts how often runs are recorded
    struct CountingStore {
        inner: MemoryStore,
        runs: Rc<Cell<u32>>,
    }

    impl ScoreStore for CountingStore {
        fn high_score(&self) -> u64 {
            self.inner.high_score()
        }

        fn set_high_score(&mut self, score: u64) {
            self.inner.set_high_score(score);
        }

        fn record_run(&mut self, score: u64) -> Vec<HighScoreEntry> {
            self.runs.set(self.runs.get() + 1);
            self.inner.record_run(score)
        }
    }

    struct Harness {
        game: Game,
        cues: Rc<RefCell<Vec<Cue>>>,
        runs: Rc<Cell<u32>>,
        now: f64,
    }

    impl Harness {
        fn new() -> Self {
            let recorder = Recorder::default();
            let cues = recorder.0.clone();
            let runs = Rc::new(Cell::new(0));
            let store = CountingStore {
                inner: MemoryStore::in_memory(),
                runs: runs.clone(),
            };
            let game = Game::new(
                7,
                Tuning::default(),
                800.0,
                400.0,
                Box::new(recorder),
                Box::new(store),
            );
            Self {
                game,
                cues,
                runs,
                now: 0.0,
            }
        }

        /// One host frame, one tick later than the previous
        fn step(&mut self) -> u32 {
            self.now += TICK_MS;
            self.game.frame(self.now)
        }

        fn block_player(&mut self) {
            let state = &mut self.game.state;
            let x = state.player.pos.x + 5.0 + state.progression.scroll_speed;
            let id = state.spawner.next_entity_id();
            state.spawner.push_hazard(Hazard::with_size(
                id,
                HazardKind::Ground,
                x,
                state.surface.ground_y,
                Vec2::new(40.0, 50.0),
                &self.game.tuning,
            ));
        }
    }

    #[test]
    fn test_frames_do_nothing_until_started() {
        let mut h = Harness::new();
        h.step();
        assert_eq!(h.step(), 0);
        assert_eq!(h.game.state().time_ticks, 0);

        h.game.start();
        h.step(); // primes the clock
        assert_eq!(h.step(), 1);
        assert_eq!(h.game.state().time_ticks, 1);
    }

    #[test]
    fn test_stalled_frame_runs_one_tick() {
        let mut h = Harness::new();
        h.game.start();
        h.game.frame(0.0);
        assert_eq!(h.game.frame(3_000.0), 1);
        assert_eq!(h.game.state().time_ticks, 1);
    }

    #[test]
    fn test_paused_time_never_reaches_simulation() {
        let mut h = Harness::new();
        h.game.start();
        h.step();
        h.step();
        let ticks = h.game.state().time_ticks;

        h.game.handle_intent(Intent::Pause);
        assert_eq!(h.game.phase(), GamePhase::Paused);
        h.now += 60_000.0;
        assert_eq!(h.step(), 0);

        h.game.handle_intent(Intent::Pause);
        assert_eq!(h.game.phase(), GamePhase::Playing);
        h.now += 60_000.0;
        assert_eq!(h.step(), 0);
        assert_eq!(h.step(), 1);
        assert_eq!(h.game.state().time_ticks, ticks + 1);
    }

    #[test]
    fn test_intents_play_cues() {
        let mut h = Harness::new();
        assert_eq!(h.game.on_jump_intent(), JumpResult::Rejected);
        assert!(h.cues.borrow().is_empty());

        h.game.start();
        assert_eq!(h.game.on_jump_intent(), JumpResult::Jumped);
        assert_eq!(h.cues.borrow().as_slice(), &[Cue::Jump]);
    }

    #[test]
    fn test_game_over_records_once() {
        let mut h = Harness::new();
        h.game.start();
        h.step();
        h.game.state.progression.score = 1200.0;
        h.block_player();
        h.step();
        assert_eq!(h.game.phase(), GamePhase::GameOver);
        assert!(h.cues.borrow().contains(&Cue::HazardHit));

        for _ in 0..10 {
            h.step();
        }
        h.game.decline_revival();
        assert_eq!(h.runs.get(), 1);
        assert!(h.game.high_score() >= 1200);
        assert_eq!(h.game.leaderboard().len(), 1);
    }

    #[test]
    fn test_revival_offer_accept() {
        let mut h = Harness::new();
        h.game.start();
        h.step();
        h.game.state.progression.score = 6000.0;
        h.block_player();
        h.step();
        assert_eq!(h.game.phase(), GamePhase::RevivalOffer);
        assert_eq!(h.runs.get(), 0);

        assert!(h.game.accept_revival());
        assert_eq!(h.game.phase(), GamePhase::Playing);
        assert!(h.game.state().player.shielded);
        assert!(h.game.state().spawner.hazards().is_empty());
        assert!(!h.game.accept_revival());
    }

    #[test]
    fn test_revival_decline_ends_run() {
        let mut h = Harness::new();
        h.game.start();
        h.step();
        h.game.state.progression.score = 6000.0;
        h.block_player();
        h.step();
        h.game.handle_intent(Intent::Decline);
        assert_eq!(h.game.phase(), GamePhase::GameOver);
        assert_eq!(h.runs.get(), 1);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut h = Harness::new();
        h.game.start();
        h.step();
        h.game.handle_intent(Intent::Restart);
        assert_eq!(h.game.state().seed, 7);

        h.block_player();
        h.step();
        assert_eq!(h.game.phase(), GamePhase::GameOver);
        h.game.handle_intent(Intent::Restart);
        assert_eq!(h.game.phase(), GamePhase::Playing);
        assert_ne!(h.game.state().seed, 7);
        assert_eq!(h.game.state().time_ticks, 0);

        // A second run is recorded too
        h.block_player();
        h.step();
        h.step();
        assert_eq!(h.game.phase(), GamePhase::GameOver);
        assert_eq!(h.runs.get(), 2);
    }

    #[test]
    fn test_resize_moves_ground() {
        let mut h = Harness::new();
        h.game.resize(1024.0, 600.0);
        let surface = h.game.state().surface;
        assert_eq!(surface.width, 1024.0);
        assert_eq!(surface.ground_y, 600.0 - h.game.tuning().ground_height);
        let player = &h.game.state().player;
        assert_eq!(player.pos.y + player.size.y, surface.ground_y);
    }

    #[test]
    fn test_idle_mode_survives_a_while() {
        let mut h = Harness::new();
        h.game.set_idle(true);
        h.game.start();
        for _ in 0..600 {
            h.step();
        }
        assert!(h.game.state().time_ticks > 0);
    }
}
