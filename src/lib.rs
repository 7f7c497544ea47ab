//! Aurex - real-time stealth courier simulation
//!
//! Core modules:
//! - `sim`: Simulation (world, entities, economy, tick)
//! - `session`: Pause/resume/reset and the time base fed to the simulation
//! - `platform`: Held-key input, frame clock, key-value storage
//! - `highscores`: High score persistence on top of `platform::storage`
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::Session;
pub use tuning::{ConversionTrigger, Tuning};

use std::f32::consts::{PI, TAU};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    use std::f32::consts::PI;

    /// World grid
    pub const TILE_SIZE: f32 = 50.0;
    pub const GRID_WIDTH: u32 = 16;
    pub const GRID_HEIGHT: u32 = 12;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 8.0;
    /// Pixels per millisecond
    pub const PLAYER_SPEED: f32 = 0.15;
    pub const PLAYER_START_HEALTH: f32 = 100.0;

    /// System health
    pub const SYSTEM_START_HEALTH: f32 = 50.0;
    pub const SYSTEM_MAX_HEALTH: f32 = 100.0;
    /// Points per millisecond
    pub const SYSTEM_HEALTH_DECAY: f32 = 0.003;

    /// Sentry vision: 2.5 tiles deep, 60 degree cone
    pub const SENTRY_VISION_RADIUS: f32 = TILE_SIZE * 2.5;
    pub const SENTRY_VISION_HALF_ANGLE: f32 = PI / 6.0;
    /// Health per millisecond while spotted
    pub const SENTRY_DAMAGE_RATE: f32 = 0.005;
    /// Angular speed range (radians per millisecond)
    pub const SENTRY_MIN_TURN_RATE: f32 = 0.0005;
    pub const SENTRY_MAX_TURN_RATE: f32 = 0.001;

    /// Economy
    pub const KEY_RADIUS: f32 = 5.0;
    /// Keys needed to decrypt one shard
    pub const SHARD_COST: u32 = 3;
    pub const SHARD_HEALTH_REWARD: f32 = 25.0;

    /// Layout generation
    pub const SENTRY_COUNT: usize = 6;
    pub const KEY_COUNT: usize = 8;
    /// Chance that an interior tile holds obstacles
    pub const OBSTACLE_CHANCE: f64 = 0.6;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut angle = angle % TAU;
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Signed difference `a - b`, normalized to (-π, π]
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    normalize_angle(a - b)
}
