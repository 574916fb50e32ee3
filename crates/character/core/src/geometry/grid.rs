use super::direction::Direction;
use super::tile::{Pixel, Tile};
use crate::config::CoreConfig;

const HALF_WIDTH: f32 = CoreConfig::TILE_WIDTH / 2.0;
const HALF_HEIGHT: f32 = CoreConfig::TILE_HEIGHT / 2.0;

/// Upper bound on steps taken by grid walks, far beyond any on-screen distance.
const MAX_WALK_STEPS: usize = 4096;

/// Pixel center of a tile.
pub fn tile_to_world(tile: Tile) -> Pixel {
    let shift = if tile.is_odd_row() { HALF_WIDTH } else { 0.0 };
    Pixel::new(
        tile.x as f32 * CoreConfig::TILE_WIDTH + shift,
        tile.y as f32 * HALF_HEIGHT,
    )
}

/// Tile whose diamond contains the pixel.
///
/// The pixel plane is cut into 64×32 cells, each holding one odd-row diamond
/// in its middle and four even-row diamond corners.
pub fn world_to_tile(pixel: Pixel) -> Tile {
    let column = (pixel.x / CoreConfig::TILE_WIDTH).floor();
    let band = (pixel.y / CoreConfig::TILE_HEIGHT).floor();
    let dx = pixel.x - column * CoreConfig::TILE_WIDTH;
    let dy = pixel.y - band * CoreConfig::TILE_HEIGHT;

    let x = column as i32;
    let y = band as i32 * 2 + 1;

    let inside_odd = (dx - HALF_WIDTH).abs() / HALF_WIDTH + (dy - HALF_HEIGHT).abs() / HALF_HEIGHT
        <= 1.0;
    if inside_odd {
        return Tile::new(x, y);
    }
    match (dx < HALF_WIDTH, dy < HALF_HEIGHT) {
        (true, true) => Tile::new(x, y - 1),
        (true, false) => Tile::new(x, y + 1),
        (false, true) => Tile::new(x + 1, y - 1),
        (false, false) => Tile::new(x + 1, y + 1),
    }
}

/// The 8 neighbors of a tile, indexed by [`Direction`].
///
/// | dir | even row   | odd row    |
/// |-----|------------|------------|
/// | S   | (x, y+2)   | (x, y+2)   |
/// | SW  | (x-1, y+1) | (x, y+1)   |
/// | W   | (x-1, y)   | (x-1, y)   |
/// | NW  | (x-1, y-1) | (x, y-1)   |
/// | N   | (x, y-2)   | (x, y-2)   |
/// | NE  | (x, y-1)   | (x+1, y-1) |
/// | E   | (x+1, y)   | (x+1, y)   |
/// | SE  | (x, y+1)   | (x+1, y+1) |
pub fn neighbors(tile: Tile) -> [Tile; 8] {
    let Tile { x, y } = tile;
    if tile.is_odd_row() {
        [
            Tile::new(x, y + 2),
            Tile::new(x, y + 1),
            Tile::new(x - 1, y),
            Tile::new(x, y - 1),
            Tile::new(x, y - 2),
            Tile::new(x + 1, y - 1),
            Tile::new(x + 1, y),
            Tile::new(x + 1, y + 1),
        ]
    } else {
        [
            Tile::new(x, y + 2),
            Tile::new(x - 1, y + 1),
            Tile::new(x - 1, y),
            Tile::new(x - 1, y - 1),
            Tile::new(x, y - 2),
            Tile::new(x, y - 1),
            Tile::new(x + 1, y),
            Tile::new(x, y + 1),
        ]
    }
}

/// The neighbor of `tile` in `direction`.
pub fn neighbor(tile: Tile, direction: Direction) -> Tile {
    neighbors(tile)[direction.index()]
}

/// Pixel distance between two tile centers.
pub fn tile_distance(from: Tile, to: Tile) -> f32 {
    tile_to_world(from).distance(tile_to_world(to))
}

/// Number of neighbor steps between two tiles.
pub fn view_tile_distance(from: Tile, to: Tile) -> u32 {
    line_tiles(from, to).len().saturating_sub(1) as u32
}

/// Discrete line walk from `from` to `to`, both ends included.
///
/// Each step moves to the neighbor facing the remaining pixel vector, so
/// consecutive tiles are always grid neighbors.
pub fn line_tiles(from: Tile, to: Tile) -> Vec<Tile> {
    let mut tiles = vec![from];
    let mut current = from;
    while current != to && tiles.len() < MAX_WALK_STEPS {
        let remaining = tile_to_world(to) - tile_to_world(current);
        let Some(direction) = Direction::from_vector(remaining) else {
            break;
        };
        current = neighbor(current, direction);
        tiles.push(current);
    }
    tiles
}
