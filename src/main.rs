//! Aurex headless runner
//!
//! Plays one session natively with a simple steering bot and reports the
//! outcome through the logger. Environment:
//! - `AUREX_SEED`: seed the layout generator (otherwise thread RNG)
//! - `AUREX_TUNING`: path to a tuning JSON file
//! - `AUREX_STORE`: high score file (default `aurex-highscore.json`)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use aurex::Session;
    use aurex::platform::{FileStore, HeldKeys, MoveKey};
    use aurex::session::RandomLayouts;
    use aurex::sim::{GameEvent, GamePhase};
    use aurex::tuning::Tuning;

    /// Simulated frame length (~60 fps)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_RUN_MS: f64 = 10.0 * 60.0 * 1000.0;
    /// Close enough on an axis to stop pressing it
    const DEADZONE: f32 = 2.0;

    pub fn run() -> Result<(), aurex::sim::WorldError> {
        let tuning = match std::env::var("AUREX_TUNING") {
            Ok(path) => Tuning::load(path),
            Err(_) => Tuning::default(),
        };
        let store_path =
            std::env::var("AUREX_STORE").unwrap_or_else(|_| "aurex-highscore.json".to_string());
        let store = FileStore::new(store_path);
        log::info!("High score file: {}", store.path().display());

        let mut session = match std::env::var("AUREX_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
            Some(seed) => {
                log::info!("Using layout seed {}", seed);
                Session::new(tuning, RandomLayouts::new(Pcg32::seed_from_u64(seed)), store)?
            }
            None => Session::random(tuning, store)?,
        };

        let mut keys = HeldKeys::new();
        let mut now = 0.0;
        while !session.state().is_over() && now < MAX_RUN_MS {
            steer(&session, &mut keys);
            for event in session.frame(now, &keys) {
                match event {
                    GameEvent::PlayerSpotted { .. } => {}
                    other => log::debug!("{:?}", other),
                }
            }
            now += FRAME_MS;
        }

        let state = session.state();
        match state.phase {
            GamePhase::Won => log::info!("Won with {} shards delivered", state.shards_delivered),
            GamePhase::Lost(cause) => log::info!(
                "Lost ({:?}) with {} shards delivered, player health {:.1}",
                cause,
                state.shards_delivered,
                state.player.health
            ),
            GamePhase::Running => log::warn!("Gave up after {:.0} ms of simulated time", now),
        }
        log::info!(
            "{} ticks, {:.0} ms simulated, previous best {}",
            state.tick_count,
            state.elapsed_ms,
            state.high_score
        );
        Ok(())
    }

    /// Head for whatever moves the economy forward next
    fn steer(session: &Session, keys: &mut HeldKeys) {
        let player = session.player();
        let [hub, station] = session.landmarks();
        let target = if player.shards() > 0 {
            station.center
        } else if player.keys() >= session.tuning().shard_cost {
            hub.center
        } else {
            session
                .keys()
                .iter()
                .map(|k| k.pos)
                .min_by(|a, b| a.distance_squared(player.pos).total_cmp(&b.distance_squared(player.pos)))
                .unwrap_or(hub.center)
        };

        let delta: Vec2 = target - player.pos;
        keys.set(MoveKey::Right, delta.x > DEADZONE);
        keys.set(MoveKey::Left, delta.x < -DEADZONE);
        keys.set(MoveKey::Down, delta.y > DEADZONE);
        keys.set(MoveKey::Up, delta.y < -DEADZONE);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Aurex (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("Could not start session: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `aurex::Session` directly, this is just to satisfy the compiler
}
