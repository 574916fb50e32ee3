//! Per-character simulation core for a real-time, tile-based action RPG.
//!
//! `character-core` turns a character's stat snapshot into an actor that moves,
//! fights and dies inside a tick loop. A [`Character`] owns its status timers,
//! waypoint queue and animation counters; everything outside the character
//! (map obstacles, path search, audio, scripts, cached animation assets) is
//! reached through the read-only collaborators bundled in [`Env`].
//!
//! Data flows top-down only: the state machine drives movement and combat, and
//! nothing calls back into a character except through return values such as
//! [`TickReport`] and [`DamageReport`].
pub mod character;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod geometry;
pub mod movement;
pub mod path;
pub mod stats;
pub mod status;

pub use character::{
    Character, CharacterHooks, CharacterKind, CharacterState, Damageable, HookEvent, Movable,
    NoHooks, Relation, Stateful, TickReport,
};
pub use combat::{
    AttackOutcome, AttackerSnapshot, DamageReport, ExperienceAward, MagicDamage, ShieldEffect,
    hit_chance,
};
pub use config::{AnimationSpec, CharacterConfig, CoreConfig, VisibilityVariable};
pub use env::{
    AnimationCache, AudioSink, CharacterId, Env, GridMap, MagicSpriteOracle, MapOracle, PcgRng,
    RngOracle, Roster, ScriptVariables, SpriteId, SpriteSnapshot,
};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Direction, Pixel, Tile, neighbors, tile_to_world, world_to_tile};
pub use movement::{ForcedMode, ForcedMovement, WalkOutcome};
pub use path::{GridPathFinder, PathFinder, PathQuality};
pub use stats::{LevelRow, LevelTable, Meter};
pub use status::{StatusEffects, StatusKind, StatusReport};
