use arrayvec::ArrayVec;

use crate::config::CoreConfig;

/// A timed protective effect on a character.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldEffect {
    pub remaining_ms: f32,
    /// Mitigation per damage channel.
    pub mitigation: ShieldMitigation,
    /// Blocks every hit while active.
    pub immune: bool,
}

impl ShieldEffect {
    pub fn mitigating(duration_ms: f32, mitigation: ShieldMitigation) -> Self {
        Self {
            remaining_ms: duration_ms,
            mitigation,
            immune: false,
        }
    }

    pub fn immunity(duration_ms: f32) -> Self {
        Self {
            remaining_ms: duration_ms,
            mitigation: ShieldMitigation::default(),
            immune: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ms > 0.0
    }
}

/// Damage subtracted per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldMitigation {
    pub primary: i32,
    pub secondary: i32,
    pub tertiary: i32,
    pub mana: i32,
}

/// Active shields, bounded by [`CoreConfig::MAX_SHIELDS`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shields {
    effects: ArrayVec<ShieldEffect, { CoreConfig::MAX_SHIELDS }>,
}

impl Shields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shield. Returns false when every slot is taken.
    pub fn add(&mut self, effect: ShieldEffect) -> bool {
        if !effect.is_active() {
            return false;
        }
        match self.effects.try_push(effect) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("shield slots full, effect dropped");
                false
            }
        }
    }

    /// Counts every shield down and drops the expired ones.
    pub fn advance(&mut self, dt: f32) {
        for effect in self.effects.iter_mut() {
            effect.remaining_ms -= dt;
        }
        self.effects.retain(|effect| effect.is_active());
    }

    pub fn is_immune(&self) -> bool {
        self.effects.iter().any(|e| e.immune && e.is_active())
    }

    /// Summed mitigation of all active shields.
    pub fn mitigation(&self) -> ShieldMitigation {
        self.effects
            .iter()
            .filter(|e| e.is_active())
            .fold(ShieldMitigation::default(), |acc, e| ShieldMitigation {
                primary: acc.primary + e.mitigation.primary,
                secondary: acc.secondary + e.mitigation.secondary,
                tertiary: acc.tertiary + e.mitigation.tertiary,
                mana: acc.mana + e.mitigation.mana,
            })
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
