//! Movement engine building blocks.
//!
//! Path following, jumps, curve moves and forced movement are driven by the
//! character's tick (see `Character::update`); this module holds the motion
//! records they advance and the speed formula they share.
mod curve;
mod error;
mod forced;
mod jump;

pub use curve::CurveMove;
pub use error::MoveError;
pub use forced::{ForcedMode, ForcedMovement, release_tile};
pub use jump::JumpPath;

use crate::config::CoreConfig;
use crate::geometry::Pixel;

/// Result of one path-following step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// At least one waypoint was reached this tick.
    pub moved: bool,
    /// The last waypoint was reached this tick.
    pub reached_destination: bool,
}

/// Movement speed in pixels per second.
///
/// ```text
/// speed = base × walk_speed × (1 + max(floor, bonus) / 100) × fold
/// ```
pub fn move_speed(config: &CoreConfig, walk_speed: f32, bonus_percent: i32, fold: f32) -> f32 {
    let bonus = bonus_percent.max(config.min_speed_bonus_percent) as f32;
    (config.base_speed * walk_speed * (1.0 + bonus / 100.0) * fold).max(0.0)
}

/// Pixels covered in `dt` milliseconds at `speed` pixels per second.
#[inline]
pub fn distance_for(speed: f32, dt: f32) -> f32 {
    speed * dt.max(0.0) / 1000.0
}

/// Moves from `from` toward `to` by at most `budget` pixels.
///
/// Returns the new position and, when `to` was reached, the unused part of
/// the budget.
pub fn step_toward(from: Pixel, to: Pixel, budget: f32) -> (Pixel, Option<f32>) {
    let remaining = from.distance(to);
    if remaining <= budget {
        (to, Some(budget - remaining))
    } else {
        (from + (to - from).normalized() * budget, None)
    }
}
