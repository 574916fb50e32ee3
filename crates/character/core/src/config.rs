//! Tunable parameters and the per-character config snapshot.
//!
//! [`CoreConfig`] carries balancing constants shared by every character.
//! [`CharacterConfig`] is the immutable snapshot a spawner hands to
//! [`crate::Character::spawn`]; the core never parses files itself.

use std::collections::BTreeMap;

use crate::character::{CharacterKind, CharacterState, Relation};
use crate::path::PathQuality;

/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoreConfig {
    /// Movement speed of a character with walk speed 1, in pixels per second.
    pub base_speed: f32,
    /// Speed multiplier applied while running.
    pub run_speed_fold: f32,
    /// Speed multiplier applied while jumping.
    pub jump_speed_fold: f32,
    /// Speed multiplier applied while frozen.
    pub freeze_speed_fold: f32,
    /// Remaining distance (pixels) under which a waypoint counts as reached.
    pub arrival_threshold: f32,
    /// Lower bound for the summed move-speed bonus percentage.
    pub min_speed_bonus_percent: i32,
    /// Time without hostile action before a character leaves fight mode.
    pub fight_timeout_ms: f32,
    /// Interval between two poison damage ticks.
    pub poison_interval_ms: f32,
    /// Life removed on each poison tick.
    pub poison_damage: i32,
    /// A hurt animation plays on one in `hurt_chance` non-lethal hits.
    pub hurt_chance: u32,
    /// Hit probability every attack starts from.
    pub base_hit_chance: f32,
    /// Damage floor applied after defence and shields.
    pub minimum_damage: i32,
    /// Experience floor for a kill.
    pub minimum_kill_experience: u32,
    /// Tiles probed when releasing a character from a destroyed carrier.
    pub release_probe_tiles: u8,
    /// Height of a curve move's control point, as a fraction of its span.
    pub curve_height_ratio: f32,
    /// Directions a planned path may use (1, 2, 4 or 8).
    pub path_fan_out: u8,
}

impl CoreConfig {
    // ===== compile-time constants =====
    /// Tile diamond width in pixels.
    pub const TILE_WIDTH: f32 = 64.0;
    /// Tile diamond height in pixels.
    pub const TILE_HEIGHT: f32 = 32.0;
    /// Shield effects tracked per character.
    pub const MAX_SHIELDS: usize = 8;
    /// Summons tracked per magic file.
    pub const MAX_SUMMONS_PER_MAGIC: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_SPEED: f32 = 100.0;
    pub const DEFAULT_RUN_SPEED_FOLD: f32 = 2.0;
    pub const DEFAULT_JUMP_SPEED_FOLD: f32 = 3.0;
    pub const DEFAULT_FIGHT_TIMEOUT_MS: f32 = 7_000.0;

    pub fn new() -> Self {
        Self {
            base_speed: Self::DEFAULT_BASE_SPEED,
            run_speed_fold: Self::DEFAULT_RUN_SPEED_FOLD,
            jump_speed_fold: Self::DEFAULT_JUMP_SPEED_FOLD,
            freeze_speed_fold: 0.5,
            arrival_threshold: 2.0,
            min_speed_bonus_percent: -90,
            fight_timeout_ms: Self::DEFAULT_FIGHT_TIMEOUT_MS,
            poison_interval_ms: 250.0,
            poison_damage: 10,
            hurt_chance: 4,
            base_hit_chance: 0.05,
            minimum_damage: 5,
            minimum_kill_experience: 4,
            release_probe_tiles: 5,
            curve_height_ratio: 0.3,
            path_fan_out: 8,
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Frame layout of one animation asset, resolved by the rendering collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpec {
    /// Asset key the renderer resolves into frames.
    pub asset: String,
    pub frames_per_direction: u16,
    pub interval_ms: u32,
}

impl AnimationSpec {
    pub fn new(asset: impl Into<String>, frames_per_direction: u16, interval_ms: u32) -> Self {
        Self {
            asset: asset.into(),
            frames_per_direction,
            interval_ms,
        }
    }
}

/// Script variable gating whether a character is present at all.
///
/// The character is simulated and drawn only while the variable's value is at
/// least `value`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityVariable {
    pub name: String,
    pub value: i32,
}

/// Immutable stat/config snapshot used to initialize a character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterConfig {
    pub name: String,
    pub kind: CharacterKind,
    pub relation: Relation,
    pub group: u32,

    pub life: i32,
    pub life_max: i32,
    pub mana: i32,
    pub mana_max: i32,
    pub thew: i32,
    pub thew_max: i32,

    pub attack: i32,
    pub attack2: i32,
    pub attack3: i32,
    pub defend: i32,
    pub defend2: i32,
    pub defend3: i32,
    pub evade: i32,

    pub level: u32,
    pub experience: u32,
    pub level_up_experience: u32,
    /// Added to the experience a killer receives.
    pub experience_bonus: u32,
    pub can_level_up: bool,

    pub walk_speed: f32,
    pub move_speed_bonus_percent: i32,
    /// Equipment percentage bonuses folded into real attack/defend/evade.
    pub attack_bonus_percent: i32,
    pub defend_bonus_percent: i32,
    pub evade_bonus_percent: i32,

    pub path_quality: PathQuality,
    pub fight_disabled: bool,
    pub jump_disabled: bool,
    /// Death without animation, removal on the same tick.
    pub is_summon: bool,
    /// Lifetime of a timed character.
    pub life_ms: Option<f32>,
    pub visibility: Option<VisibilityVariable>,

    pub animations: BTreeMap<CharacterState, AnimationSpec>,
    pub sounds: BTreeMap<CharacterState, String>,
}

impl CharacterConfig {
    /// Creates a config with neutral stats and no animations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: CharacterKind::Normal,
            relation: Relation::Neutral,
            group: 0,
            life: 100,
            life_max: 100,
            mana: 0,
            mana_max: 0,
            thew: 0,
            thew_max: 0,
            attack: 0,
            attack2: 0,
            attack3: 0,
            defend: 0,
            defend2: 0,
            defend3: 0,
            evade: 0,
            level: 1,
            experience: 0,
            level_up_experience: 0,
            experience_bonus: 0,
            can_level_up: false,
            walk_speed: 1.0,
            move_speed_bonus_percent: 0,
            attack_bonus_percent: 0,
            defend_bonus_percent: 0,
            evade_bonus_percent: 0,
            path_quality: PathQuality::PerfectMaxNpcTry,
            fight_disabled: false,
            jump_disabled: false,
            is_summon: false,
            life_ms: None,
            visibility: None,
            animations: BTreeMap::new(),
            sounds: BTreeMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: CharacterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    pub fn with_life(mut self, life: i32, life_max: i32) -> Self {
        self.life = life;
        self.life_max = life_max;
        self
    }

    pub fn with_mana(mut self, mana: i32, mana_max: i32) -> Self {
        self.mana = mana;
        self.mana_max = mana_max;
        self
    }

    pub fn with_thew(mut self, thew: i32, thew_max: i32) -> Self {
        self.thew = thew;
        self.thew_max = thew_max;
        self
    }

    pub fn with_combat(mut self, attack: i32, defend: i32, evade: i32) -> Self {
        self.attack = attack;
        self.defend = defend;
        self.evade = evade;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_walk_speed(mut self, walk_speed: f32) -> Self {
        self.walk_speed = walk_speed;
        self
    }

    pub fn with_path_quality(mut self, quality: PathQuality) -> Self {
        self.path_quality = quality;
        self
    }

    pub fn with_animation(mut self, state: CharacterState, spec: AnimationSpec) -> Self {
        self.animations.insert(state, spec);
        self
    }

    pub fn with_sound(mut self, state: CharacterState, key: impl Into<String>) -> Self {
        self.sounds.insert(state, key.into());
        self
    }

    /// Registers a one-frame placeholder animation for each given state.
    pub fn with_basic_animations(mut self, states: &[CharacterState]) -> Self {
        for state in states {
            self.animations
                .insert(*state, AnimationSpec::new(state.to_string(), 1, 100));
        }
        self
    }

    pub fn summoned(mut self) -> Self {
        self.is_summon = true;
        self
    }

    pub fn timed(mut self, life_ms: f32) -> Self {
        self.life_ms = Some(life_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CoreConfig::default();
        assert_eq!(config.fight_timeout_ms, 7_000.0);
        assert_eq!(config.minimum_damage, 5);
        assert_eq!(config.arrival_threshold, 2.0);
        assert_eq!(config.release_probe_tiles, 5);
    }

    #[test]
    fn builder_registers_animations() {
        let config = CharacterConfig::new("guard")
            .with_basic_animations(&[CharacterState::Stand, CharacterState::Walk])
            .with_sound(CharacterState::Walk, "step.wav");

        assert!(config.animations.contains_key(&CharacterState::Walk));
        assert!(!config.animations.contains_key(&CharacterState::Jump));
        assert_eq!(config.sounds[&CharacterState::Walk], "step.wav");
    }
}
