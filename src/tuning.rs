//! Data-driven game balance
//!
//! Every gameplay constant lives here so a tuning file can override it.
//! Missing fields fall back to the values in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the Hub converts keys into shards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionTrigger {
    /// Convert one batch on every tick the player is in range with enough keys
    #[default]
    Level,
    /// Convert once per visit; leave the Hub range to convert again
    Edge,
}

impl ConversionTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionTrigger::Level => "level",
            ConversionTrigger::Edge => "edge",
        }
    }
}

/// Balance constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub tile_size: f32,
    pub grid_width: u32,
    pub grid_height: u32,

    // === Player ===
    pub player_radius: f32,
    /// Pixels per millisecond
    pub player_speed: f32,
    pub player_start_health: f32,

    // === System health ===
    pub system_start_health: f32,
    pub system_max_health: f32,
    /// Points per millisecond
    pub system_health_decay: f32,

    // === Sentries ===
    pub sentry_count: usize,
    pub sentry_vision_radius: f32,
    pub sentry_vision_half_angle: f32,
    /// Health per millisecond while the player is in a cone
    pub sentry_damage_rate: f32,
    pub sentry_min_turn_rate: f32,
    pub sentry_max_turn_rate: f32,

    // === Economy ===
    pub key_count: usize,
    pub key_radius: f32,
    pub shard_cost: u32,
    pub shard_health_reward: f32,
    pub conversion: ConversionTrigger,

    // === Generation ===
    pub obstacle_chance: f64,

    // === Timing ===
    /// Largest frame delta handed to the simulation; `None` leaves it uncapped
    pub max_frame_dt_ms: Option<f32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_start_health: PLAYER_START_HEALTH,

            system_start_health: SYSTEM_START_HEALTH,
            system_max_health: SYSTEM_MAX_HEALTH,
            system_health_decay: SYSTEM_HEALTH_DECAY,

            sentry_count: SENTRY_COUNT,
            sentry_vision_radius: SENTRY_VISION_RADIUS,
            sentry_vision_half_angle: SENTRY_VISION_HALF_ANGLE,
            sentry_damage_rate: SENTRY_DAMAGE_RATE,
            sentry_min_turn_rate: SENTRY_MIN_TURN_RATE,
            sentry_max_turn_rate: SENTRY_MAX_TURN_RATE,

            key_count: KEY_COUNT,
            key_radius: KEY_RADIUS,
            shard_cost: SHARD_COST,
            shard_health_reward: SHARD_HEALTH_REWARD,
            conversion: ConversionTrigger::Level,

            obstacle_chance: OBSTACLE_CHANCE,

            max_frame_dt_ms: None,
        }
    }
}

impl Tuning {
    /// Parse a tuning file; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from disk, falling back to defaults if the file is missing or bad
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default tuning ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply the optional frame cap; negative deltas become zero
    pub fn clamp_frame_dt(&self, dt: f32) -> f32 {
        let dt = dt.max(0.0);
        match self.max_frame_dt_ms {
            Some(cap) => dt.min(cap),
            None => dt,
        }
    }
}
