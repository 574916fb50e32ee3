//! Position control by a magic sprite.

use crate::env::{MapOracle, SpriteId};
use crate::geometry::{Direction, Pixel, Tile, neighbor};

/// How a sprite moves the character it holds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForcedMode {
    /// Rigidly attached at a fixed offset from the sprite.
    Carry { offset: Pixel },
    /// Pulled along while the straight line to the sprite stays open.
    Drag,
}

/// Active forced movement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedMovement {
    pub sprite: SpriteId,
    pub mode: ForcedMode,
    /// Last observed travel direction of the sprite.
    pub last_direction: Pixel,
}

impl ForcedMovement {
    pub fn carry(sprite: SpriteId, offset: Pixel) -> Self {
        Self {
            sprite,
            mode: ForcedMode::Carry { offset },
            last_direction: Pixel::ZERO,
        }
    }

    pub fn drag(sprite: SpriteId) -> Self {
        Self {
            sprite,
            mode: ForcedMode::Drag,
            last_direction: Pixel::ZERO,
        }
    }
}

/// First open tile found by stepping back against `travel` from `tile`.
///
/// Probes up to `probes` tiles. A zero travel vector probes southwards.
pub fn release_tile(map: &dyn MapOracle, tile: Tile, travel: Pixel, probes: u8) -> Option<Tile> {
    let back = Direction::from_vector(travel)
        .map(Direction::opposite)
        .unwrap_or_default();
    let mut probe = tile;
    for _ in 0..probes {
        probe = neighbor(probe, back);
        if !map.is_obstacle_for_character(probe) {
            return Some(probe);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, ObstacleKind};

    #[test]
    fn release_steps_back_against_travel() {
        let mut map = GridMap::new(20, 20);
        let tile = Tile::new(5, 6);
        map.set_obstacle(tile, ObstacleKind::Soft);
        let west = neighbor(tile, Direction::West);
        map.set_obstacle(west, ObstacleKind::Soft);

        // Travelling east: probe west, the first west tile is blocked.
        let found = release_tile(&map, tile, Pixel::new(1.0, 0.0), 5);
        assert_eq!(found, Some(neighbor(west, Direction::West)));
    }

    #[test]
    fn release_gives_up_after_probe_range() {
        let mut map = GridMap::new(20, 20);
        let tile = Tile::new(10, 6);
        let mut probe = tile;
        for _ in 0..6 {
            map.set_obstacle(probe, ObstacleKind::Soft);
            probe = neighbor(probe, Direction::West);
        }
        assert_eq!(release_tile(&map, tile, Pixel::new(1.0, 0.0), 5), None);
    }
}
