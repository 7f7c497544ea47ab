//! Session controller
//!
//! Owns one play session: the game state, the frame clock that turns
//! animation-frame timestamps into tick deltas, the pause flag, and the high
//! score record. Hosts call [`Session::frame`] once per animation frame and
//! read everything they need to draw through the accessors.

use rand::Rng;

use crate::highscores::HighScore;
use crate::platform::{FrameClock, HeldKeys, KeyValueStore};
use crate::sim::{
    GameEvent, GamePhase, GameState, KeyPickup, Landmark, Layout, Player, Sentry, World, WorldError,
    generate_layout, tick,
};
use crate::tuning::Tuning;

/// Where new layouts come from on setup and reset
pub trait LayoutSource {
    fn next_layout(&mut self, tuning: &Tuning) -> Result<Layout, WorldError>;
}

/// Freshly generated layout every time
#[derive(Debug)]
pub struct RandomLayouts<R> {
    rng: R,
}

impl<R: Rng> RandomLayouts<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LayoutSource for RandomLayouts<R> {
    fn next_layout(&mut self, tuning: &Tuning) -> Result<Layout, WorldError> {
        generate_layout(&mut self.rng, tuning)
    }
}

/// The same hand-built layout on every reset
#[derive(Debug, Clone)]
pub struct FixedLayout(pub Layout);

impl LayoutSource for FixedLayout {
    fn next_layout(&mut self, _tuning: &Tuning) -> Result<Layout, WorldError> {
        Ok(self.0.clone())
    }
}

/// One running game plus its time base and persistence
pub struct Session {
    tuning: Tuning,
    state: GameState,
    clock: FrameClock,
    paused: bool,
    high_score: HighScore,
    layouts: Box<dyn LayoutSource>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("phase", &self.state.phase)
            .field("paused", &self.paused)
            .field("tick_count", &self.state.tick_count)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Build the first layout and read the recorded high score
    pub fn new(
        tuning: Tuning,
        layouts: impl LayoutSource + 'static,
        store: impl KeyValueStore + 'static,
    ) -> Result<Self, WorldError> {
        let mut layouts: Box<dyn LayoutSource> = Box::new(layouts);
        let high_score = HighScore::new(store);

        let layout = layouts.next_layout(&tuning)?;
        let state = GameState::new(layout, &tuning, high_score.read())?;
        log::info!(
            "Session started ({}x{} grid, {} sentries, {} keys, {} conversion, high score {})",
            state.world.width(),
            state.world.height(),
            state.sentries.len(),
            state.keys.len(),
            tuning.conversion.as_str(),
            state.high_score
        );

        Ok(Self {
            tuning,
            state,
            clock: FrameClock::new(),
            paused: false,
            high_score,
            layouts,
        })
    }

    /// Session over randomly generated layouts from the thread RNG
    pub fn random(tuning: Tuning, store: impl KeyValueStore + 'static) -> Result<Self, WorldError> {
        Self::new(tuning, RandomLayouts::new(rand::rng()), store)
    }

    /// Drive one animation frame at absolute time `now_ms`
    ///
    /// Ticks once with the held keys sampled now, unless paused or finished.
    /// Returns the events produced by that tick.
    pub fn frame(&mut self, now_ms: f64, keys: &HeldKeys) -> &[GameEvent] {
        if self.paused || self.state.is_over() {
            return &[];
        }

        let dt = self.tuning.clamp_frame_dt(self.clock.advance(now_ms) as f32);
        let input = keys.snapshot();
        tick(&mut self.state, &input, dt, &self.tuning);

        for event in &self.state.events {
            log::trace!("tick {}: {:?}", self.state.tick_count, event);
        }

        if self.state.is_over() {
            self.finish();
        }
        &self.state.events
    }

    /// Stop ticking; the clock is rebased on resume
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Paused at {:.0} ms", self.state.elapsed_ms);
        }
    }

    /// Continue ticking, measuring the next delta from `now_ms`
    ///
    /// Does nothing once the session is won or lost.
    pub fn resume(&mut self, now_ms: f64) {
        if self.state.is_over() {
            log::debug!("Ignoring resume after the session ended");
            return;
        }
        if self.paused {
            self.paused = false;
            self.clock.rebase(now_ms);
            log::info!("Resumed");
        }
    }

    /// Throw the session away and start over on a new layout
    ///
    /// On error the current session is left untouched.
    pub fn reset(&mut self) -> Result<(), WorldError> {
        let layout = self.layouts.next_layout(&self.tuning)?;
        let high_score = self.high_score.read();
        self.state = GameState::new(layout, &self.tuning, high_score)?;
        self.clock.reset();
        self.paused = false;
        log::info!("Session reset (high score {})", high_score);
        Ok(())
    }

    fn finish(&mut self) {
        self.paused = true;
        let delivered = self.state.shards_delivered;
        match self.state.phase {
            GamePhase::Won => log::info!(
                "System restored after {:.0} ms, {} shards delivered",
                self.state.elapsed_ms,
                delivered
            ),
            GamePhase::Lost(cause) => {
                log::info!("Session lost ({:?}), {} shards delivered", cause, delivered)
            }
            GamePhase::Running => {}
        }
        if self.high_score.submit(delivered, self.state.high_score) {
            log::info!("New high score: {}", delivered);
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn sentries(&self) -> &[Sentry] {
        &self.state.sentries
    }

    pub fn keys(&self) -> &[KeyPickup] {
        &self.state.keys
    }

    /// Hub then Station
    pub fn landmarks(&self) -> [&Landmark; 2] {
        [self.state.world.hub(), self.state.world.station()]
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
