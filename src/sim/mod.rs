//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep, one call per frame delta (milliseconds)
//! - Single-threaded, every stage runs to completion inside `tick`
//! - No rendering, input wiring or storage dependencies

pub mod collision;
pub mod economy;
pub mod generate;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{Rect, in_vision_cone, intersects_rect};
pub use economy::Inventory;
pub use generate::{generate_layout, player_spawn_tile};
pub use state::{GameEvent, GamePhase, GameState, KeyPickup, Layout, LossCause, Player, Sentry};
pub use tick::{TickInput, move_player, tick};
pub use world::{Landmark, LandmarkKind, Obstacle, Tile, TileCoord, World, WorldError};
