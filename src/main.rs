//! Hoop Shot headless demo
//!
//! Plays the game core on its own: an autoplayer takes shots with jittered aim
//! and power, events are logged, and the leaderboard is kept in a local data
//! directory (`HOOP_SHOT_DATA`, default `.hoop-shot`). Log level via `RUST_LOG`.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hoop_shot::consts::{MAX_POWER, MIN_POWER};
    use hoop_shot::persistence::FileStorage;
    use hoop_shot::sim::{GameEvent, GamePhase, aim_at_rim};
    use hoop_shot::{Game, Settings};

    /// Simulated frame length (60 Hz host)
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Simulated session length
    const DEMO_SECONDS: u32 = 180;
    /// Frames the autoplayer waits at rest before shooting
    const SHOT_DELAY_FRAMES: u32 = 30;
    /// Horizontal aim error range (units/tick)
    const AIM_JITTER: f32 = 1.6;

    const NAMES: [&str; 5] = ["Ace", "Swish", "Brick", "Dunk", "Rim"];

    /// Demo-mode player
    struct Autoplay {
        rng: Pcg32,
        idle_frames: u32,
    }

    impl Autoplay {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                idle_frames: 0,
            }
        }

        /// Shoot after resting for a moment
        fn step(&mut self, game: &mut Game) {
            if game.state().phase != GamePhase::Idle {
                self.idle_frames = 0;
                return;
            }
            self.idle_frames += 1;
            if self.idle_frames < SHOT_DELAY_FRAMES {
                return;
            }

            let power = self.rng.random_range(MIN_POWER..=MAX_POWER);
            let state = game.state();
            let aimed = aim_at_rim(&state.ball, &state.backboard, game.settings(), power);
            let jitter = Vec2::new(self.rng.random_range(-AIM_JITTER..=AIM_JITTER), 0.0);
            if game.launch(aimed + jitter) {
                self.idle_frames = 0;
            }
        }

        fn pick_name(&mut self) -> &'static str {
            NAMES[self.rng.random_range(0..NAMES.len())]
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let data_dir = std::env::var("HOOP_SHOT_DATA").unwrap_or_else(|_| ".hoop-shot".into());
        let storage = FileStorage::new(&data_dir);
        let settings = Settings::load(&storage);

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!("Hoop Shot demo (seed {seed}, data in {data_dir})");

        let mut game = Game::new(settings, Box::new(storage));
        let mut autoplay = Autoplay::new(seed);
        let mut shots = 0u32;
        let mut makes = 0u32;

        let frames = DEMO_SECONDS * 1000 / FRAME_MS as u32;
        for _ in 0..frames {
            game.update(FRAME_MS);
            autoplay.step(&mut game);

            for event in game.drain_events() {
                match event {
                    GameEvent::Launched { vel } => {
                        shots += 1;
                        log::debug!("Shot {shots}: ({:.2}, {:.2})", vel.x, vel.y);
                    }
                    GameEvent::Scored { score } => {
                        makes += 1;
                        log::info!("Swish! Score {score}");
                    }
                    GameEvent::Missed { streak } => log::info!("Miss {streak}"),
                    GameEvent::DifficultyChanged { speed } => {
                        log::info!("Backboard speed now {speed}")
                    }
                    GameEvent::NameRequired { score, rank } => {
                        let name = autoplay.pick_name();
                        log::info!("{name} takes rank {rank} with {score}");
                        if let Err(e) = game.submit_name(name) {
                            log::warn!("Name rejected: {e}");
                        }
                    }
                    _ => {}
                }
            }
        }
        game.shutdown();

        log::info!("{makes}/{shots} shots made");
        let view = game.view();
        if view.leaderboard.is_empty() {
            log::info!("No scores yet.");
        }
        for (i, entry) in view.leaderboard.iter().enumerate() {
            log::info!("{}. {:<16} {}", i + 1, entry.display_name(), entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is used as a library; hosts drive `hoop_shot::Game` directly.
}
