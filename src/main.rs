//! Neon Dash headless runner
//!
//! Plays one demo run with the autopilot at a simulated 60 fps and prints the
//! result. The browser build is driven from `web::WebGame` instead.
//!
//! Usage: `neon-dash [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_dash::audio::AudioManager;
    use neon_dash::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TICK_MS};
    use neon_dash::persistence::JsonFileStore;
    use neon_dash::persistence::file::DEFAULT_SCORE_FILE;
    use neon_dash::platform::{Intent, now_ms};
    use neon_dash::render::NullRenderer;
    use neon_dash::sim::GamePhase;
    use neon_dash::{Game, Tuning};

    /// Stop after ten simulated minutes even if the autopilot never dies
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Dash (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|err| {
            log::warn!("Could not load tuning from {path}: {err}; using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| now_ms() as u64);

    let mut game = Game::new(
        seed,
        tuning,
        DEFAULT_WIDTH,
        DEFAULT_HEIGHT,
        Box::new(AudioManager::new()),
        Box::new(JsonFileStore::at(DEFAULT_SCORE_FILE)),
    );
    let mut renderer = NullRenderer;

    game.set_idle(true);
    game.handle_intent(Intent::Start);

    let mut now = 0.0;
    for _ in 0..MAX_FRAMES {
        now += TICK_MS;
        game.frame(now);
        game.render(&mut renderer);
        match game.phase() {
            // The demo always takes the revival when it is offered
            GamePhase::RevivalOffer => game.handle_intent(Intent::Revive),
            GamePhase::GameOver => break,
            _ => {}
        }
    }

    let state = game.state();
    if game.phase() != GamePhase::GameOver {
        log::info!("Demo stopped after {} ticks without a crash", state.time_ticks);
    }
    println!(
        "seed {} | score {} | level {} | {:.1}s survived | best {}",
        seed,
        state.progression.final_score(),
        state.progression.level,
        state.time_ms() / 1000.0,
        game.high_score()
    );
    for (rank, entry) in game.leaderboard().iter().enumerate() {
        println!("  #{} {}", rank + 1, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
