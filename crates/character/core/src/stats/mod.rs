//! Character stat model.
//!
//! Vital pools are stored and clamped on every mutation; combat stats are
//! stored as base values and resolved through percentage modifiers on every
//! read, because the statuses feeding those modifiers expire at arbitrary
//! ticks.
mod level;
mod meter;
mod modifiers;

pub use level::{LevelRow, LevelTable};
pub use meter::Meter;
pub use modifiers::{CombatModifiers, CombatStats, Modifier, ModifierStack};
