//! Combat result types.

use super::error::CombatError;
use crate::env::CharacterId;
use crate::status::EffectSource;

/// Everything a defender needs to know about its attacker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackerSnapshot {
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
    /// Real evade, after every modifier.
    pub evade: i32,
    /// Player or follower; only these earn kill experience.
    pub player_aligned: bool,
}

impl AttackerSnapshot {
    /// Attribution record for effects this attacker applies.
    pub fn source(&self) -> EffectSource {
        EffectSource {
            id: self.id,
            name: self.name.clone(),
            level: self.level,
        }
    }
}

/// Outcome of an incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Hit rejected before the roll.
    Ignored(CombatError),
    /// Hit roll failed.
    Miss,
    /// Damage applied.
    Hit,
}

/// Experience owed to a character; the caller applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperienceAward {
    pub recipient: CharacterId,
    pub amount: u32,
}

/// Result of `take_damage` / `take_magic_damage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    pub outcome: AttackOutcome,
    /// Life removed.
    pub damage: i32,
    /// Mana removed.
    pub mana_drained: i32,
    pub killed: bool,
    pub experience: Option<ExperienceAward>,
    /// Control of a remotely controlled character was released by the death.
    pub control_released: bool,
}

impl DamageReport {
    pub const fn ignored(reason: CombatError) -> Self {
        Self {
            outcome: AttackOutcome::Ignored(reason),
            damage: 0,
            mana_drained: 0,
            killed: false,
            experience: None,
            control_released: false,
        }
    }

    pub const fn miss() -> Self {
        Self {
            outcome: AttackOutcome::Miss,
            damage: 0,
            mana_drained: 0,
            killed: false,
            experience: None,
            control_released: false,
        }
    }

    pub const fn is_hit(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit)
    }
}
