//! Read-only collaborators a character consults while it ticks.
//!
//! The map, the path planner and the roster of other characters are queried;
//! audio and animation loading are fire-and-forget requests. The [`Env`]
//! aggregate bundles them so movement and combat code never needs to know the
//! concrete world types.
mod map;
mod media;
mod rng;
mod roster;
mod sprite;

pub use map::{GridMap, MapOracle, ObstacleKind};
pub use media::{AnimationCache, AudioSink, ScriptVariables};
pub use rng::{FixedRng, PcgRng, RngOracle, RollContext, compute_seed};
pub use roster::{CharacterId, Roster};
pub use sprite::{MagicSpriteOracle, SpriteId, SpriteSnapshot};

use crate::config::AnimationSpec;
use crate::geometry::{Pixel, Tile};
use crate::path::PathFinder;

/// Collaborator bundle passed to every tick and command.
///
/// Only the map and the path planner are mandatory. The rest default to a
/// silent world: no audio, unset script variables, no sprites, an empty
/// animation cache and a roster in which everyone is alive.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    map: &'a dyn MapOracle,
    paths: &'a dyn PathFinder,
    roster: &'a dyn Roster,
    sprites: &'a dyn MagicSpriteOracle,
    scripts: &'a dyn ScriptVariables,
    audio: &'a dyn AudioSink,
    animations: &'a dyn AnimationCache,
    rng: &'a dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(map: &'a dyn MapOracle, paths: &'a dyn PathFinder) -> Self {
        Self {
            map,
            paths,
            roster: &SILENT_WORLD,
            sprites: &SILENT_WORLD,
            scripts: &SILENT_WORLD,
            audio: &SILENT_WORLD,
            animations: &SILENT_WORLD,
            rng: &DEFAULT_RNG,
        }
    }

    pub fn with_roster(mut self, roster: &'a dyn Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_sprites(mut self, sprites: &'a dyn MagicSpriteOracle) -> Self {
        self.sprites = sprites;
        self
    }

    pub fn with_scripts(mut self, scripts: &'a dyn ScriptVariables) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn with_audio(mut self, audio: &'a dyn AudioSink) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_animations(mut self, animations: &'a dyn AnimationCache) -> Self {
        self.animations = animations;
        self
    }

    pub fn with_rng(mut self, rng: &'a dyn RngOracle) -> Self {
        self.rng = rng;
        self
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn paths(&self) -> &'a dyn PathFinder {
        self.paths
    }

    pub fn roster(&self) -> &'a dyn Roster {
        self.roster
    }

    pub fn sprites(&self) -> &'a dyn MagicSpriteOracle {
        self.sprites
    }

    pub fn scripts(&self) -> &'a dyn ScriptVariables {
        self.scripts
    }

    pub fn audio(&self) -> &'a dyn AudioSink {
        self.audio
    }

    pub fn animations(&self) -> &'a dyn AnimationCache {
        self.animations
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

static SILENT_WORLD: SilentWorld = SilentWorld;
static DEFAULT_RNG: PcgRng = PcgRng;

/// Stand-in for every optional collaborator.
#[derive(Clone, Copy, Debug, Default)]
struct SilentWorld;

impl Roster for SilentWorld {
    fn is_alive(&self, _id: CharacterId) -> bool {
        true
    }

    fn tile_of(&self, _id: CharacterId) -> Option<Tile> {
        None
    }
}

impl MagicSpriteOracle for SilentWorld {
    fn sprite(&self, _id: SpriteId) -> Option<SpriteSnapshot> {
        None
    }
}

impl ScriptVariables for SilentWorld {
    fn get(&self, _name: &str) -> i32 {
        0
    }
}

impl AudioSink for SilentWorld {
    fn play_once(&self, _key: &str, _at: Pixel) {}

    fn play_loop(&self, _owner: CharacterId, _key: &str, _at: Pixel) {}

    fn stop_loop(&self, _owner: CharacterId) {}
}

impl AnimationCache for SilentWorld {
    fn get(&self, _key: &str) -> Option<AnimationSpec> {
        None
    }

    fn request_load(&self, _key: &str) {}
}
