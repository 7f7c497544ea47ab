//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame is readable from [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::economy::Inventory;
use super::world::{World, WorldError};
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// System health reached full
    Won,
    /// Player or system health ran out
    Lost(LossCause),
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Why a session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Player health hit zero (sentry damage)
    PlayerDown,
    /// System health decayed to zero
    SystemFailure,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    KeysCollected { count: u32, remaining: usize },
    ShardDecrypted { shards_held: u32 },
    ShardsDelivered { count: u32, system_health: f32 },
    PlayerSpotted { sentry: usize },
    Won { shards_delivered: u64 },
    Lost { cause: LossCause, shards_delivered: u64 },
}

/// The player-controlled agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Starts full and is never clamped below; <= 0 means dead
    pub health: f32,
    pub inventory: Inventory,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            radius: tuning.player_radius,
            health: tuning.player_start_health,
            inventory: Inventory::default(),
        }
    }

    pub fn keys(&self) -> u32 {
        self.inventory.keys
    }

    pub fn shards(&self) -> u32 {
        self.inventory.shards
    }
}

/// A rotating watchtower with a vision cone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentry {
    /// Fixed after spawn
    pub pos: Vec2,
    /// Facing angle, always in (-π, π]
    pub angle: f32,
    /// Radians per millisecond (signed)
    pub angular_vel: f32,
}

impl Sentry {
    pub fn new(pos: Vec2, angle: f32, angular_vel: f32) -> Self {
        Self {
            pos,
            angle: normalize_angle(angle),
            angular_vel,
        }
    }

    /// Advance the facing angle by `dt` milliseconds
    pub fn rotate(&mut self, dt: f32) {
        self.angle = normalize_angle(self.angle + self.angular_vel * dt);
    }

    /// Whether a point is inside this sentry's vision cone
    pub fn sees(&self, target: Vec2, tuning: &Tuning) -> bool {
        super::collision::in_vision_cone(
            self.pos,
            self.angle,
            target,
            tuning.sentry_vision_radius,
            tuning.sentry_vision_half_angle,
        )
    }
}

/// A key lying in the world, waiting to be collected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPickup {
    pub pos: Vec2,
    pub radius: f32,
}

/// Static input for a session: world plus entity start positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    pub world: World,
    pub player_start: Vec2,
    pub sentries: Vec<Sentry>,
    pub keys: Vec<KeyPickup>,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Immutable for the session
    pub world: World,
    pub player: Player,
    pub sentries: Vec<Sentry>,
    /// Active keys; only ever shrinks
    pub keys: Vec<KeyPickup>,
    /// Clamped to the maximum after every increase, never clamped below
    pub system_health: f32,
    /// Monotonic within a session
    pub shards_delivered: u64,
    /// Best score recorded before this session started
    pub high_score: u64,
    pub phase: GamePhase,
    /// Simulated time in milliseconds
    pub elapsed_ms: f64,
    pub tick_count: u64,
    /// Edge-triggered conversion: a shard was decrypted during this Hub visit
    #[serde(default)]
    pub hub_latched: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session from a layout
    ///
    /// The player must start inside the grid, clear of every obstacle.
    pub fn new(layout: Layout, tuning: &Tuning, high_score: u64) -> Result<Self, WorldError> {
        let Layout {
            world,
            player_start,
            sentries,
            keys,
        } = layout;

        if world.is_blocked(player_start, tuning.player_radius) {
            return Err(WorldError::PlayerStartBlocked { pos: player_start });
        }

        Ok(Self {
            world,
            player: Player::new(player_start, tuning),
            sentries,
            keys,
            system_health: tuning.system_start_health,
            shards_delivered: 0,
            high_score,
            phase: GamePhase::Running,
            elapsed_ms: 0.0,
            tick_count: 0,
            hub_latched: false,
            events: Vec::new(),
        })
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_sentry_rotation_wraps() {
        let mut sentry = Sentry::new(Vec2::ZERO, PI - 0.01, 0.001);
        sentry.rotate(20.0);
        assert!(sentry.angle < 0.0);
        assert!(sentry.angle > -PI);
        assert!((sentry.angle - (-PI + 0.01)).abs() < 1e-4);
    }

    #[test]
    fn test_sentry_new_normalizes() {
        let sentry = Sentry::new(Vec2::ZERO, 1.5 * PI, -0.0007);
        assert!((sentry.angle + 0.5 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_new_state_defaults() {
        let tuning = Tuning::default();
        let layout = Layout {
            world: World::open(16, 12, 50.0).unwrap(),
            player_start: Vec2::new(75.0, 75.0),
            sentries: Vec::new(),
            keys: vec![KeyPickup {
                pos: Vec2::new(300.0, 300.0),
                radius: 5.0,
            }],
        };
        let state = GameState::new(layout, &tuning, 7).unwrap();
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.system_health, 50.0);
        assert_eq!(state.high_score, 7);
        assert_eq!(state.keys.len(), 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.is_over());
    }

    #[test]
    fn test_rejects_blocked_player_start() {
        use crate::sim::collision::Rect;
        use crate::sim::world::TileCoord;

        let tuning = Tuning::default();
        let layout_at = |world: World, player_start: Vec2| Layout {
            world,
            player_start,
            sentries: Vec::new(),
            keys: Vec::new(),
        };

        let outside = layout_at(World::open(4, 4, 50.0).unwrap(), Vec2::new(-5.0, 10.0));
        assert_eq!(
            GameState::new(outside, &tuning, 0).unwrap_err(),
            WorldError::PlayerStartBlocked {
                pos: Vec2::new(-5.0, 10.0)
            }
        );

        // Tile (1, 1) holds a block the player would overlap
        let mut obstacles = vec![Vec::new(); 16];
        obstacles[5] = vec![Rect::new(60.0, 60.0, 20.0, 20.0)];
        let world =
            World::new(4, 4, 50.0, obstacles, TileCoord::new(1, 2), TileCoord::new(2, 1)).unwrap();
        let inside = layout_at(world.clone(), Vec2::new(70.0, 70.0));
        assert!(matches!(
            GameState::new(inside, &tuning, 0),
            Err(WorldError::PlayerStartBlocked { .. })
        ));

        // Same tile, clear of the block
        let clear = layout_at(world, Vec2::new(90.0, 90.0));
        assert!(GameState::new(clear, &tuning, 0).is_ok());
    }
}
