use crate::error::{ErrorSeverity, GameError};

/// Reasons an incoming hit is ignored before the hit roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("target is already dying or dead")]
    TargetDead,

    #[error("target is invincible")]
    Invincible,

    #[error("target is shielded by an immunity effect")]
    Immune,

    #[error("damage {0} is not positive")]
    NonPositiveDamage(i32),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::TargetDead => "COMBAT_TARGET_DEAD",
            CombatError::Invincible => "COMBAT_INVINCIBLE",
            CombatError::Immune => "COMBAT_IMMUNE",
            CombatError::NonPositiveDamage(_) => "COMBAT_NON_POSITIVE_DAMAGE",
        }
    }
}
