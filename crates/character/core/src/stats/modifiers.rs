//! Percentage modifiers for attack, defend and evade.
//!
//! Resolution order is fixed:
//! Reduced (summed) → Increased (summed) → floor at 0
//!
//! ```text
//! effective = base × (100 − Σreduced) / 100
//! real      = effective × (100 + Σincreased) / 100
//! ```

/// A single percentage modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modifier {
    /// Weakening; applied first (20 = −20%).
    Reduced(i32),
    /// Morph or equipment bonus; applied to the weakened value (20 = +20%).
    Increased(i32),
}

/// Modifiers feeding one stat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierStack {
    modifiers: Vec<Modifier>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    /// Adds a modifier unless its percentage is zero.
    pub fn push_nonzero(&mut self, modifier: Modifier) {
        let percent = match modifier {
            Modifier::Reduced(p) | Modifier::Increased(p) => p,
        };
        if percent != 0 {
            self.add(modifier);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    fn sum(&self, reduced: bool) -> i64 {
        self.modifiers
            .iter()
            .filter_map(|m| match (m, reduced) {
                (Modifier::Reduced(p), true) | (Modifier::Increased(p), false) => Some(*p as i64),
                _ => None,
            })
            .sum()
    }

    /// Base value after reductions only.
    pub fn effective(&self, base: i32) -> i32 {
        let reduced = self.sum(true).clamp(0, 100);
        (base as i64 * (100 - reduced) / 100) as i32
    }

    /// Base value after reductions and increases, floored at 0.
    pub fn apply(&self, base: i32) -> i32 {
        let effective = self.effective(base) as i64;
        let increased = self.sum(false).max(-100);
        (effective * (100 + increased) / 100).clamp(0, i32::MAX as i64) as i32
    }
}

/// The seven combat stats of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub attack: i32,
    pub attack2: i32,
    pub attack3: i32,
    pub defend: i32,
    pub defend2: i32,
    pub defend3: i32,
    pub evade: i32,
}

/// Modifier stacks for the three stat families.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatModifiers {
    pub attack: ModifierStack,
    pub defend: ModifierStack,
    pub evade: ModifierStack,
}

impl CombatStats {
    /// Resolves every stat through its family's modifiers.
    pub fn resolve(&self, modifiers: &CombatModifiers) -> CombatStats {
        CombatStats {
            attack: modifiers.attack.apply(self.attack),
            attack2: modifiers.attack.apply(self.attack2),
            attack3: modifiers.attack.apply(self.attack3),
            defend: modifiers.defend.apply(self.defend),
            defend2: modifiers.defend.apply(self.defend2),
            defend3: modifiers.defend.apply(self.defend3),
            evade: modifiers.evade.apply(self.evade),
        }
    }
}
