use std::collections::HashSet;

use crate::geometry::Tile;

/// Obstacle predicates exposed by the map collaborator.
///
/// The core only ever queries; it never mutates map state.
pub trait MapOracle {
    /// Tile lies on the map and its terrain can be stood on.
    fn is_walkable(&self, tile: Tile) -> bool;

    /// Tile blocks a character right now (terrain, barriers, other characters).
    fn is_obstacle_for_character(&self, tile: Tile) -> bool;

    /// Tile blocks unconditionally, including diagonal squeezes past it.
    fn is_hard_obstacle(&self, tile: Tile) -> bool;

    /// Tile cannot be crossed mid-air.
    fn is_obstacle_for_jump(&self, tile: Tile) -> bool {
        self.is_hard_obstacle(tile)
    }

    /// Tile carries a trap trigger region.
    fn is_trap(&self, _tile: Tile) -> bool {
        false
    }
}

/// How a tile blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    /// Blocks walking only; jumps may cross it.
    Soft,
    /// Blocks walking and diagonal squeezes; jumps may cross it.
    Hard,
    /// Blocks walking and jumping.
    Wall,
}

/// Rectangular map backed by plain obstacle sets.
///
/// Tiles outside `width × height` are treated as walls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridMap {
    width: i32,
    height: i32,
    soft: HashSet<Tile>,
    hard: HashSet<Tile>,
    walls: HashSet<Tile>,
    traps: HashSet<Tile>,
}

impl GridMap {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    pub fn set_obstacle(&mut self, tile: Tile, kind: ObstacleKind) {
        self.clear_obstacle(tile);
        match kind {
            ObstacleKind::Soft => self.soft.insert(tile),
            ObstacleKind::Hard => self.hard.insert(tile),
            ObstacleKind::Wall => self.walls.insert(tile),
        };
    }

    pub fn clear_obstacle(&mut self, tile: Tile) {
        self.soft.remove(&tile);
        self.hard.remove(&tile);
        self.walls.remove(&tile);
    }

    pub fn set_trap(&mut self, tile: Tile, trap: bool) {
        if trap {
            self.traps.insert(tile);
        } else {
            self.traps.remove(&tile);
        }
    }
}

impl MapOracle for GridMap {
    fn is_walkable(&self, tile: Tile) -> bool {
        self.contains(tile) && !self.walls.contains(&tile)
    }

    fn is_obstacle_for_character(&self, tile: Tile) -> bool {
        !self.is_walkable(tile) || self.soft.contains(&tile) || self.hard.contains(&tile)
    }

    fn is_hard_obstacle(&self, tile: Tile) -> bool {
        !self.is_walkable(tile) || self.hard.contains(&tile)
    }

    fn is_obstacle_for_jump(&self, tile: Tile) -> bool {
        !self.is_walkable(tile)
    }

    fn is_trap(&self, tile: Tile) -> bool {
        self.traps.contains(&tile)
    }
}
