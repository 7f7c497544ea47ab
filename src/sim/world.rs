//! Static world: tile grid, obstacles and the two landmarks
//!
//! Built once per session from layout data and never mutated afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, intersects_rect};

/// Obstacles are plain rectangles in world pixels
pub type Obstacle = Rect;

/// Integer grid cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// One cell of the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub coord: TileCoord,
    pub obstacles: Vec<Obstacle>,
}

impl Tile {
    pub fn is_clear(&self) -> bool {
        self.obstacles.is_empty()
    }
}

/// Which fixed interaction point a landmark is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandmarkKind {
    /// Converts keys into shards
    Hub,
    /// Accepts shard deliveries
    Station,
}

/// A fixed interaction point occupying one obstacle-free tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub tile: TileCoord,
    /// Center of the tile in world pixels
    pub center: Vec2,
}

/// Errors raised while building a world or generating a layout
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("grid must have at least one tile and a positive tile size")]
    EmptyGrid,

    #[error("expected {expected} tiles of obstacle data, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    #[error("obstacle {obstacle:?} extends outside tile ({}, {})", .tile.x, .tile.y)]
    ObstacleOutsideTile { tile: TileCoord, obstacle: Obstacle },

    #[error("{kind:?} tile ({}, {}) is outside the grid", .tile.x, .tile.y)]
    LandmarkOutOfBounds { kind: LandmarkKind, tile: TileCoord },

    #[error("{kind:?} tile ({}, {}) holds obstacles", .tile.x, .tile.y)]
    LandmarkBlocked { kind: LandmarkKind, tile: TileCoord },

    #[error("no free tile left to place a {0}")]
    NoFreeTile(&'static str),

    #[error("player start ({}, {}) is outside the grid or inside an obstacle", .pos.x, .pos.y)]
    PlayerStartBlocked { pos: Vec2 },
}

/// The tile grid plus landmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    width: u32,
    height: u32,
    tile_size: f32,
    /// Row-major, `width * height` entries
    tiles: Vec<Tile>,
    hub: Landmark,
    station: Landmark,
}

impl World {
    /// Build a world from per-tile obstacle lists (row-major)
    ///
    /// Obstacles must sit fully inside their tile and landmark tiles must be
    /// clear. These are checked here once; queries trust them afterwards.
    pub fn new(
        width: u32,
        height: u32,
        tile_size: f32,
        obstacles: Vec<Vec<Obstacle>>,
        hub_tile: TileCoord,
        station_tile: TileCoord,
    ) -> Result<Self, WorldError> {
        if width == 0 || height == 0 || !(tile_size > 0.0) {
            return Err(WorldError::EmptyGrid);
        }
        let expected = (width * height) as usize;
        if obstacles.len() != expected {
            return Err(WorldError::TileCountMismatch {
                expected,
                actual: obstacles.len(),
            });
        }

        let mut tiles = Vec::with_capacity(expected);
        for (index, tile_obstacles) in obstacles.into_iter().enumerate() {
            let coord = TileCoord::new(index as u32 % width, index as u32 / width);
            let bounds = tile_bounds(coord, tile_size);
            if let Some(bad) = tile_obstacles.iter().find(|o| !bounds.contains_rect(o)) {
                return Err(WorldError::ObstacleOutsideTile {
                    tile: coord,
                    obstacle: *bad,
                });
            }
            tiles.push(Tile {
                coord,
                obstacles: tile_obstacles,
            });
        }

        let mut world = Self {
            width,
            height,
            tile_size,
            tiles,
            hub: landmark(LandmarkKind::Hub, hub_tile, tile_size),
            station: landmark(LandmarkKind::Station, station_tile, tile_size),
        };
        for mark in [world.hub, world.station] {
            match world.tile(mark.tile) {
                None => {
                    return Err(WorldError::LandmarkOutOfBounds {
                        kind: mark.kind,
                        tile: mark.tile,
                    });
                }
                Some(tile) if !tile.is_clear() => {
                    return Err(WorldError::LandmarkBlocked {
                        kind: mark.kind,
                        tile: mark.tile,
                    });
                }
                Some(_) => {}
            }
        }
        world.tiles.shrink_to_fit();
        Ok(world)
    }

    /// Obstacle-free world with the default landmark placement
    pub fn open(width: u32, height: u32, tile_size: f32) -> Result<Self, WorldError> {
        let obstacles = vec![Vec::new(); (width * height) as usize];
        Self::new(
            width,
            height,
            tile_size,
            obstacles,
            default_hub_tile(width, height),
            default_station_tile(width, height),
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World extent in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    pub fn hub(&self) -> &Landmark {
        &self.hub
    }

    pub fn station(&self) -> &Landmark {
        &self.station
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile by grid coordinate
    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        self.tiles.get((coord.y * self.width + coord.x) as usize)
    }

    /// Grid coordinate containing a point, `None` outside the grid
    pub fn coord_at(&self, pos: Vec2) -> Option<TileCoord> {
        let tx = (pos.x / self.tile_size).floor();
        let ty = (pos.y / self.tile_size).floor();
        if tx < 0.0 || ty < 0.0 || tx >= self.width as f32 || ty >= self.height as f32 {
            return None;
        }
        Some(TileCoord::new(tx as u32, ty as u32))
    }

    /// Tile containing a point, `None` outside the grid
    pub fn tile_at(&self, pos: Vec2) -> Option<&Tile> {
        self.coord_at(pos).and_then(|coord| self.tile(coord))
    }

    /// Obstacles of the tile containing a point (empty outside the grid)
    pub fn obstacles_at(&self, pos: Vec2) -> &[Obstacle] {
        self.tile_at(pos)
            .map(|tile| tile.obstacles.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a circle at `pos` would collide
    ///
    /// Only the tile containing the center is consulted. Leaving the grid
    /// always counts as a collision.
    pub fn is_blocked(&self, pos: Vec2, radius: f32) -> bool {
        match self.tile_at(pos) {
            None => true,
            Some(tile) => tile
                .obstacles
                .iter()
                .any(|obstacle| intersects_rect(pos, radius, obstacle)),
        }
    }

    /// Center of a tile in world pixels
    pub fn tile_center(&self, coord: TileCoord) -> Vec2 {
        tile_center(coord, self.tile_size)
    }

    /// Radius around a landmark center that counts as "at" the landmark
    pub fn landmark_reach(&self) -> f32 {
        self.tile_size / 2.0
    }
}

/// Station sits one tile in from the top-right corner
pub fn default_station_tile(width: u32, _height: u32) -> TileCoord {
    TileCoord::new(width.saturating_sub(2), 1)
}

/// Hub sits one tile in from the bottom-left corner
pub fn default_hub_tile(_width: u32, height: u32) -> TileCoord {
    TileCoord::new(1, height.saturating_sub(2))
}

pub(crate) fn tile_bounds(coord: TileCoord, tile_size: f32) -> Rect {
    Rect::new(
        coord.x as f32 * tile_size,
        coord.y as f32 * tile_size,
        tile_size,
        tile_size,
    )
}

pub(crate) fn tile_center(coord: TileCoord, tile_size: f32) -> Vec2 {
    Vec2::new(
        (coord.x as f32 + 0.5) * tile_size,
        (coord.y as f32 + 0.5) * tile_size,
    )
}

fn landmark(kind: LandmarkKind, tile: TileCoord, tile_size: f32) -> Landmark {
    Landmark {
        kind,
        tile,
        center: tile_center(tile, tile_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_world() -> World {
        // 4x4 grid, tile (2, 1) holds a block in its left half
        let mut obstacles = vec![Vec::new(); 16];
        obstacles[6] = vec![Rect::new(100.0, 50.0, 20.0, 50.0)];
        World::new(4, 4, 50.0, obstacles, TileCoord::new(1, 2), TileCoord::new(3, 0)).unwrap()
    }

    #[test]
    fn test_tile_at_maps_by_floor_division() {
        let world = walled_world();
        let tile = world.tile_at(Vec2::new(149.9, 50.0)).unwrap();
        assert_eq!(tile.coord, TileCoord::new(2, 1));
        assert_eq!(world.obstacles_at(Vec2::new(149.9, 50.0)).len(), 1);
        assert!(world.obstacles_at(Vec2::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_none_and_blocking() {
        let world = walled_world();
        assert!(world.tile_at(Vec2::new(-0.1, 10.0)).is_none());
        assert!(world.tile_at(Vec2::new(10.0, 200.0)).is_none());
        assert!(world.obstacles_at(Vec2::new(500.0, 10.0)).is_empty());
        assert!(world.is_blocked(Vec2::new(-1.0, 10.0), 8.0));
        assert!(!world.is_blocked(Vec2::new(25.0, 25.0), 8.0));
    }

    #[test]
    fn test_is_blocked_by_obstacle_in_own_tile() {
        let world = walled_world();
        assert!(world.is_blocked(Vec2::new(110.0, 75.0), 8.0));
        assert!(world.is_blocked(Vec2::new(127.0, 75.0), 8.0));
        assert!(!world.is_blocked(Vec2::new(140.0, 75.0), 8.0));
    }

    #[test]
    fn test_landmark_centers() {
        let world = World::open(16, 12, 50.0).unwrap();
        assert_eq!(world.station().tile, TileCoord::new(14, 1));
        assert_eq!(world.station().center, Vec2::new(725.0, 75.0));
        assert_eq!(world.hub().tile, TileCoord::new(1, 10));
        assert_eq!(world.hub().center, Vec2::new(75.0, 525.0));
        assert_eq!(world.tile_center(TileCoord::new(0, 0)), Vec2::new(25.0, 25.0));
        assert_eq!(world.pixel_size(), Vec2::new(800.0, 600.0));
        assert_eq!(world.landmark_reach(), 25.0);
    }

    #[test]
    fn test_rejects_obstacle_outside_tile() {
        let mut obstacles = vec![Vec::new(); 4];
        obstacles[0] = vec![Rect::new(40.0, 10.0, 20.0, 10.0)];
        let err = World::new(2, 2, 50.0, obstacles, TileCoord::new(0, 1), TileCoord::new(1, 1))
            .unwrap_err();
        assert!(matches!(err, WorldError::ObstacleOutsideTile { tile, .. } if tile == TileCoord::new(0, 0)));
    }

    #[test]
    fn test_rejects_blocked_landmark() {
        let mut obstacles = vec![Vec::new(); 4];
        obstacles[3] = vec![Rect::new(60.0, 60.0, 10.0, 10.0)];
        let err = World::new(2, 2, 50.0, obstacles, TileCoord::new(0, 1), TileCoord::new(1, 1))
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::LandmarkBlocked {
                kind: LandmarkKind::Station,
                tile: TileCoord::new(1, 1)
            }
        );
    }

    #[test]
    fn test_rejects_bad_shape() {
        assert_eq!(World::open(0, 4, 50.0).unwrap_err(), WorldError::EmptyGrid);
        let err = World::new(2, 2, 50.0, vec![Vec::new(); 3], TileCoord::new(0, 0), TileCoord::new(1, 1))
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::TileCountMismatch {
                expected: 4,
                actual: 3
            }
        );
    }
}
