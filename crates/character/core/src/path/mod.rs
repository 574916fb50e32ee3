//! Path planning over the brick neighbor graph.
//!
//! The character never searches itself; it hands start, goal and quality mode
//! to a [`PathFinder`] and follows whatever tile sequence comes back. An empty
//! sequence always means "no usable path".
mod grid;
mod step;

pub use grid::GridPathFinder;
pub use step::{blocked_directions, directional_walk, greedy_walk};

use crate::env::MapOracle;
use crate::geometry::Tile;

/// Search effort and strategy for one path request.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PathQuality {
    /// Greedy stepping, a handful of tiles at a time.
    OneStep,
    /// Greedy best-first search.
    SimpleMaxNpcTry,
    /// A* with an NPC-sized expansion budget.
    #[default]
    PerfectMaxNpcTry,
    /// A* with the larger player budget.
    PerfectMaxPlayerTry,
    /// Straight line that ignores obstacles.
    StraightLine,
}

impl PathQuality {
    /// Step or expansion budget; `None` for unbounded modes.
    pub const fn max_tries(self) -> Option<u32> {
        match self {
            PathQuality::OneStep => Some(10),
            PathQuality::SimpleMaxNpcTry => Some(100),
            PathQuality::PerfectMaxNpcTry => Some(100),
            PathQuality::PerfectMaxPlayerTry => Some(500),
            PathQuality::StraightLine => None,
        }
    }
}

/// Path planning collaborator.
pub trait PathFinder {
    /// Tile sequence from `start` to `goal`, `start` included.
    ///
    /// `fan_out` limits which of the 8 directions may be taken. Returns an
    /// empty path when `start == goal`, when the goal is blocked or when the
    /// search gives up.
    fn find_path(
        &self,
        start: Tile,
        goal: Tile,
        quality: PathQuality,
        fan_out: u8,
        map: &dyn MapOracle,
    ) -> Vec<Tile>;

    /// Best-effort walk toward `goal` used when search fails.
    ///
    /// Each tile after `start` is strictly closer to `goal` than the one
    /// before it. Returns an empty path when not even one step is possible.
    fn directional_path(&self, start: Tile, goal: Tile, map: &dyn MapOracle) -> Vec<Tile>;
}

/// Whether direction `index` is allowed under a movement fan-out.
///
/// A fan-out of 1 only walks south, 2 walks south and north, 4 walks the
/// axis directions; anything else allows the first `fan_out` directions.
pub const fn can_move_in_direction(index: usize, fan_out: u8) -> bool {
    match fan_out {
        1 => index == 0,
        2 => index == 0 || index == 4,
        4 => index % 2 == 0,
        n => index < n as usize,
    }
}
