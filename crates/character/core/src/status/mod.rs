//! Timed status effects of one character.
//!
//! Every effect is an independent countdown in milliseconds. [`StatusEffects::advance`]
//! runs once per tick, before anything else a character does, and reports
//! what the tick has to act on: poison damage due, an expired morph, and
//! whether the character is petrified (which zeroes the tick for everything
//! downstream).
mod error;
mod timer;

pub use error::StatusError;
pub use timer::StatusTimer;

use crate::config::CoreConfig;
use crate::env::CharacterId;
use crate::stats::{CombatModifiers, Modifier};

/// Status effect names, as used by scripts and magic definitions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    Poison,
    Frozen,
    Petrified,
    DisableMove,
    DisableSkill,
    Weaken,
    SpeedChange,
    Morph,
    Opposite,
    Invisible,
}

impl StatusKind {
    /// Parses a status name, warning on unknown names.
    pub fn parse(name: &str) -> Result<StatusKind, StatusError> {
        name.parse().map_err(|_| {
            tracing::warn!(name, "unknown status effect");
            StatusError::UnknownStatus(name.to_owned())
        })
    }
}

/// Who applied an effect, for experience attribution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSource {
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
}

/// Poison damage due this tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoisonTick {
    pub damage: i32,
    pub source: Option<EffectSource>,
}

/// Stat bonuses granted while a character is morphed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MorphBonus {
    /// Name of the magic that caused the morph.
    pub source: String,
    pub attack_percent: i32,
    pub defend_percent: i32,
    pub evade_percent: i32,
}

/// Outcome of one status tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusReport {
    pub poison: Option<PoisonTick>,
    /// Source name of a morph that ran out this tick.
    pub morph_expired: Option<String>,
    /// Petrified during this tick; the character must not act.
    pub petrified: bool,
    /// Elapsed time to pass downstream: 0 while petrified.
    pub effective_dt: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    poison: StatusTimer,
    poison_elapsed_ms: f32,
    poison_source: Option<EffectSource>,
    frozen: StatusTimer,
    petrified: StatusTimer,
    disable_move: StatusTimer,
    disable_skill: StatusTimer,
    weaken: StatusTimer,
    weaken_attack_percent: i32,
    weaken_defend_percent: i32,
    speed_change: StatusTimer,
    speed_percent: i32,
    morph: StatusTimer,
    morph_bonus: Option<MorphBonus>,
    opposite: StatusTimer,
    invisible: StatusTimer,
    visible_when_attack: bool,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Application
    // ------------------------------------------------------------------

    pub fn poison(&mut self, duration_ms: f32, source: Option<EffectSource>, visual: bool) {
        if !self.poison.is_active() {
            self.poison_elapsed_ms = 0.0;
        }
        self.poison.start(duration_ms, visual);
        if source.is_some() {
            self.poison_source = source;
        }
    }

    pub fn freeze(&mut self, duration_ms: f32, visual: bool) {
        self.frozen.start(duration_ms, visual);
    }

    pub fn petrify(&mut self, duration_ms: f32, visual: bool) {
        self.petrified.start(duration_ms, visual);
    }

    pub fn disable_move(&mut self, duration_ms: f32) {
        self.disable_move.start(duration_ms, false);
    }

    pub fn disable_skill(&mut self, duration_ms: f32) {
        self.disable_skill.start(duration_ms, false);
    }

    pub fn weaken(&mut self, duration_ms: f32, attack_percent: i32, defend_percent: i32) {
        self.weaken.start(duration_ms, false);
        self.weaken_attack_percent = attack_percent.clamp(0, 100);
        self.weaken_defend_percent = defend_percent.clamp(0, 100);
    }

    pub fn change_speed(&mut self, duration_ms: f32, percent: i32) {
        self.speed_change.start(duration_ms, false);
        self.speed_percent = percent;
    }

    pub fn morph(&mut self, duration_ms: f32, bonus: MorphBonus) {
        self.morph.start(duration_ms, false);
        self.morph_bonus = Some(bonus);
    }

    /// Flips the character's relation for a while. Player characters keep
    /// their relation.
    pub fn toggle_opposite(
        &mut self,
        duration_ms: f32,
        is_player: bool,
    ) -> Result<(), StatusError> {
        if is_player {
            return Err(StatusError::RefusedForPlayer(StatusKind::Opposite.into()));
        }
        self.opposite.start(duration_ms, false);
        Ok(())
    }

    pub fn make_invisible(&mut self, duration_ms: f32, visible_when_attack: bool) {
        self.invisible.start(duration_ms, false);
        self.visible_when_attack = visible_when_attack;
    }

    /// Applies an effect by name with neutral payloads.
    pub fn apply_named(
        &mut self,
        name: &str,
        duration_ms: i64,
        visual: bool,
        is_player: bool,
    ) -> Result<StatusKind, StatusError> {
        let kind = StatusKind::parse(name)?;
        if duration_ms <= 0 {
            return Err(StatusError::NonPositiveDuration(duration_ms));
        }
        let ms = duration_ms as f32;
        match kind {
            StatusKind::Poison => self.poison(ms, None, visual),
            StatusKind::Frozen => self.freeze(ms, visual),
            StatusKind::Petrified => self.petrify(ms, visual),
            StatusKind::DisableMove => self.disable_move(ms),
            StatusKind::DisableSkill => self.disable_skill(ms),
            StatusKind::Weaken => self.weaken(ms, 0, 0),
            StatusKind::SpeedChange => self.change_speed(ms, 0),
            StatusKind::Morph => self.morph(ms, MorphBonus::default()),
            StatusKind::Opposite => self.toggle_opposite(ms, is_player)?,
            StatusKind::Invisible => self.make_invisible(ms, false),
        }
        Ok(kind)
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    pub fn remove(&mut self, kind: StatusKind) {
        match kind {
            StatusKind::Poison => {
                self.poison.clear();
                self.poison_elapsed_ms = 0.0;
                self.poison_source = None;
            }
            StatusKind::Frozen => self.frozen.clear(),
            StatusKind::Petrified => self.petrified.clear(),
            StatusKind::DisableMove => self.disable_move.clear(),
            StatusKind::DisableSkill => self.disable_skill.clear(),
            StatusKind::Weaken => {
                self.weaken.clear();
                self.weaken_attack_percent = 0;
                self.weaken_defend_percent = 0;
            }
            StatusKind::SpeedChange => {
                self.speed_change.clear();
                self.speed_percent = 0;
            }
            StatusKind::Morph => {
                self.morph.clear();
                self.morph_bonus = None;
            }
            StatusKind::Opposite => self.opposite.clear(),
            StatusKind::Invisible => {
                self.invisible.clear();
                self.visible_when_attack = false;
            }
        }
    }

    /// Clears every timer and payload.
    pub fn clear_all(&mut self) {
        *self = StatusEffects::default();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    fn timer(&self, kind: StatusKind) -> &StatusTimer {
        match kind {
            StatusKind::Poison => &self.poison,
            StatusKind::Frozen => &self.frozen,
            StatusKind::Petrified => &self.petrified,
            StatusKind::DisableMove => &self.disable_move,
            StatusKind::DisableSkill => &self.disable_skill,
            StatusKind::Weaken => &self.weaken,
            StatusKind::SpeedChange => &self.speed_change,
            StatusKind::Morph => &self.morph,
            StatusKind::Opposite => &self.opposite,
            StatusKind::Invisible => &self.invisible,
        }
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.timer(kind).is_active()
    }

    pub fn remaining_ms(&self, kind: StatusKind) -> f32 {
        self.timer(kind).remaining_ms()
    }

    pub fn has_visual(&self, kind: StatusKind) -> bool {
        self.timer(kind).has_visual()
    }

    pub fn is_petrified(&self) -> bool {
        self.petrified.is_active()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.is_active()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poison.is_active()
    }

    pub fn is_move_disabled(&self) -> bool {
        self.disable_move.is_active()
    }

    pub fn is_skill_disabled(&self) -> bool {
        self.disable_skill.is_active()
    }

    pub fn is_opposite(&self) -> bool {
        self.opposite.is_active()
    }

    pub fn is_invisible(&self) -> bool {
        self.invisible.is_active()
    }

    pub fn is_visible_when_attack(&self) -> bool {
        self.visible_when_attack
    }

    pub fn poison_source(&self) -> Option<&EffectSource> {
        self.poison_source.as_ref()
    }

    pub fn morph_bonus(&self) -> Option<&MorphBonus> {
        self.morph_bonus.as_ref().filter(|_| self.morph.is_active())
    }

    /// Speed bonus from an active speed change, in percent.
    pub fn speed_bonus_percent(&self) -> i32 {
        if self.speed_change.is_active() { self.speed_percent } else { 0 }
    }

    /// Multiplier on movement and animation speed; frozen characters slow down.
    pub fn speed_fold(&self, config: &CoreConfig) -> f32 {
        if self.is_frozen() { config.freeze_speed_fold } else { 1.0 }
    }

    /// Weaken and morph contributions to the combat stat modifiers.
    pub fn combat_modifiers(&self) -> CombatModifiers {
        let mut modifiers = CombatModifiers::default();
        if self.weaken.is_active() {
            modifiers.attack.push_nonzero(Modifier::Reduced(self.weaken_attack_percent));
            modifiers.defend.push_nonzero(Modifier::Reduced(self.weaken_defend_percent));
        }
        if let Some(bonus) = self.morph_bonus() {
            modifiers.attack.push_nonzero(Modifier::Increased(bonus.attack_percent));
            modifiers.defend.push_nonzero(Modifier::Increased(bonus.defend_percent));
            modifiers.evade.push_nonzero(Modifier::Increased(bonus.evade_percent));
        }
        modifiers
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advances every timer by `dt` milliseconds.
    ///
    /// Timers run even for a character whose death is already invoked; its
    /// report then carries no poison damage and no morph expiry.
    pub fn advance(&mut self, dt: f32, death_invoked: bool, config: &CoreConfig) -> StatusReport {
        let dt = dt.max(0.0);
        let petrified = self.petrified.is_active();
        let mut report = StatusReport {
            petrified,
            effective_dt: if petrified { 0.0 } else { dt },
            ..StatusReport::default()
        };

        if self.poison.is_active() {
            self.poison_elapsed_ms += dt;
            let interval = config.poison_interval_ms.max(1.0);
            let due = (self.poison_elapsed_ms / interval).floor();
            if due >= 1.0 {
                self.poison_elapsed_ms -= due * interval;
                report.poison = Some(PoisonTick {
                    damage: config.poison_damage.saturating_mul(due as i32),
                    source: self.poison_source.clone(),
                });
            }
            if self.poison.advance(dt) {
                self.poison_elapsed_ms = 0.0;
                self.poison_source = None;
            }
        }

        self.frozen.advance(dt);
        self.petrified.advance(dt);
        self.disable_move.advance(dt);
        self.disable_skill.advance(dt);
        if self.weaken.advance(dt) {
            self.weaken_attack_percent = 0;
            self.weaken_defend_percent = 0;
        }
        if self.speed_change.advance(dt) {
            self.speed_percent = 0;
        }
        if self.morph.advance(dt) {
            report.morph_expired = self.morph_bonus.take().map(|bonus| bonus.source);
        }
        self.opposite.advance(dt);
        if self.invisible.advance(dt) {
            self.visible_when_attack = false;
        }

        if death_invoked {
            report.poison = None;
            report.morph_expired = None;
        }
        report
    }
}
