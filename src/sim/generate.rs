//! Random layout generation
//!
//! Produces the static obstacle grid plus entity start positions for one
//! session. The simulation only relies on these guarantees:
//! - border tiles are clear
//! - landmark tiles and the player's spawn tile are clear
//! - sentries and keys sit on clear interior tiles, sentries never on a
//!   landmark or the spawn tile

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::Rect;
use super::state::{KeyPickup, Layout, Sentry};
use super::world::{
    Obstacle, TileCoord, World, WorldError, default_hub_tile, default_station_tile, tile_bounds,
    tile_center,
};
use crate::tuning::Tuning;

/// Smallest obstacle edge in pixels
const MIN_OBSTACLE_SIZE: f32 = 10.0;
/// Obstacle origins stay at least this far from the tile's right/bottom edge
const OBSTACLE_ORIGIN_MARGIN: f32 = 20.0;
/// Obstacles per occupied tile (inclusive range)
const OBSTACLES_PER_TILE: std::ops::RangeInclusive<usize> = 1..=3;

/// Tile the player spawns on
pub fn player_spawn_tile() -> TileCoord {
    TileCoord::new(1, 1)
}

/// Generate a complete layout using the tuning's grid and entity counts
pub fn generate_layout<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Result<Layout, WorldError> {
    let width = tuning.grid_width;
    let height = tuning.grid_height;
    let tile_size = tuning.tile_size;

    let hub = default_hub_tile(width, height);
    let station = default_station_tile(width, height);
    let spawn = player_spawn_tile();
    let reserved = [hub, station, spawn];
    let obstacle_chance = tuning.obstacle_chance.clamp(0.0, 1.0);

    let mut obstacles = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let coord = TileCoord::new(x, y);
            let interior = x > 0 && x + 1 < width && y > 0 && y + 1 < height;
            if interior && !reserved.contains(&coord) && rng.random_bool(obstacle_chance) {
                obstacles.push(generate_obstacles(rng, coord, tile_size));
            } else {
                obstacles.push(Vec::new());
            }
        }
    }

    let world = World::new(width, height, tile_size, obstacles, hub, station)?;

    let clear_interior: Vec<TileCoord> = world
        .tiles()
        .iter()
        .filter(|tile| {
            let c = tile.coord;
            tile.is_clear() && c.x > 0 && c.x + 1 < width && c.y > 0 && c.y + 1 < height
        })
        .map(|tile| tile.coord)
        .collect();

    let sentry_tiles: Vec<TileCoord> = clear_interior
        .iter()
        .copied()
        .filter(|c| !reserved.contains(c))
        .collect();

    let mut sentries = Vec::with_capacity(tuning.sentry_count);
    for _ in 0..tuning.sentry_count {
        let coord = *sentry_tiles
            .choose(rng)
            .ok_or(WorldError::NoFreeTile("sentry"))?;
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = random_turn_rate(rng, tuning);
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        sentries.push(Sentry::new(tile_center(coord, tile_size), angle, speed * direction));
    }

    let mut keys = Vec::with_capacity(tuning.key_count);
    for _ in 0..tuning.key_count {
        let coord = *clear_interior
            .choose(rng)
            .ok_or(WorldError::NoFreeTile("key"))?;
        keys.push(KeyPickup {
            pos: tile_center(coord, tile_size),
            radius: tuning.key_radius,
        });
    }

    log::debug!(
        "Generated layout: {} blocked tiles, {} sentries, {} keys",
        world.tiles().iter().filter(|t| !t.is_clear()).count(),
        sentries.len(),
        keys.len()
    );

    Ok(Layout {
        player_start: player_spawn_point(tuning),
        world,
        sentries,
        keys,
    })
}

/// 1-3 random rectangles kept inside the tile
fn generate_obstacles<R: Rng + ?Sized>(rng: &mut R, coord: TileCoord, tile_size: f32) -> Vec<Obstacle> {
    let bounds = tile_bounds(coord, tile_size);
    let max_size = (tile_size / 1.5).max(MIN_OBSTACLE_SIZE + 1.0);
    let max_offset = (tile_size - OBSTACLE_ORIGIN_MARGIN).max(1.0);

    let count = rng.random_range(OBSTACLES_PER_TILE);
    (0..count)
        .map(|_| {
            let x = bounds.x + rng.random_range(0.0..max_offset);
            let y = bounds.y + rng.random_range(0.0..max_offset);
            let width = rng.random_range(MIN_OBSTACLE_SIZE..max_size);
            let height = rng.random_range(MIN_OBSTACLE_SIZE..max_size);
            // Clip to the tile so the containment invariant holds
            Rect::new(
                x,
                y,
                width.min(bounds.right() - x),
                height.min(bounds.bottom() - y),
            )
        })
        .collect()
}

fn random_turn_rate<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> f32 {
    if tuning.sentry_max_turn_rate > tuning.sentry_min_turn_rate {
        rng.random_range(tuning.sentry_min_turn_rate..tuning.sentry_max_turn_rate)
    } else {
        tuning.sentry_min_turn_rate
    }
}

/// Convenience: world-space center of the player's spawn tile
pub fn player_spawn_point(tuning: &Tuning) -> Vec2 {
    tile_center(player_spawn_tile(), tuning.tile_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn layout(seed: u64) -> Layout {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_layout(&mut rng, &Tuning::default()).unwrap()
    }

    #[test]
    fn test_border_and_reserved_tiles_are_clear() {
        for seed in 0..20 {
            let layout = layout(seed);
            let world = &layout.world;
            for tile in world.tiles() {
                let c = tile.coord;
                let border = c.x == 0 || c.y == 0 || c.x == world.width() - 1 || c.y == world.height() - 1;
                if border {
                    assert!(tile.is_clear(), "border tile {:?} blocked (seed {})", c, seed);
                }
            }
            assert!(world.tile(world.hub().tile).unwrap().is_clear());
            assert!(world.tile(world.station().tile).unwrap().is_clear());
            assert!(world.tile(player_spawn_tile()).unwrap().is_clear());
            assert_eq!(layout.player_start, Vec2::new(75.0, 75.0));
        }
    }

    #[test]
    fn test_entity_counts_and_placement() {
        let tuning = Tuning::default();
        for seed in 0..20 {
            let layout = layout(seed);
            let world = &layout.world;
            assert_eq!(layout.sentries.len(), tuning.sentry_count);
            assert_eq!(layout.keys.len(), tuning.key_count);

            for sentry in &layout.sentries {
                let tile = world.tile_at(sentry.pos).unwrap();
                assert!(tile.is_clear());
                assert_ne!(tile.coord, world.hub().tile);
                assert_ne!(tile.coord, world.station().tile);
                assert_ne!(tile.coord, player_spawn_tile());
                let rate = sentry.angular_vel.abs();
                assert!(rate >= tuning.sentry_min_turn_rate && rate < tuning.sentry_max_turn_rate);
            }
            for key in &layout.keys {
                assert!(world.tile_at(key.pos).unwrap().is_clear());
                assert_eq!(key.radius, tuning.key_radius);
            }
        }
    }

    #[test]
    fn test_some_interior_tiles_are_blocked() {
        // 140 interior candidates at 60% each: an empty grid is not a real outcome
        let layout = layout(42);
        assert!(layout.world.tiles().iter().any(|t| !t.is_clear()));
        for tile in layout.world.tiles() {
            assert!(tile.obstacles.len() <= 3);
        }
    }

    #[test]
    fn test_fully_blocked_grid_reports_no_free_tile() {
        let tuning = Tuning {
            grid_width: 4,
            grid_height: 4,
            obstacle_chance: 1.0,
            ..Tuning::default()
        };
        // Interior of a 4x4 grid is exactly spawn, hub, station and one blocked tile
        let mut rng = Pcg32::seed_from_u64(1);
        let err = generate_layout(&mut rng, &tuning).unwrap_err();
        assert_eq!(err, WorldError::NoFreeTile("sentry"));
    }

    #[test]
    fn test_spawn_point() {
        assert_eq!(player_spawn_point(&Tuning::default()), Vec2::new(75.0, 75.0));
    }
}
