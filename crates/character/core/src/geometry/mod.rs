//! Grid geometry for the isometric brick layout.
//!
//! Tiles are 64×32 diamonds. Odd rows are shifted half a tile to the right, so
//! the neighbor offsets of a tile depend on the parity of its row. Everything
//! here is pure and stateless.

mod direction;
mod grid;
mod tile;

pub use direction::Direction;
pub use grid::{
    line_tiles, neighbor, neighbors, tile_distance, tile_to_world, view_tile_distance,
    world_to_tile,
};
pub use tile::{Pixel, Tile};
