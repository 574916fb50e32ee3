//! Damage after defence and shields.

use super::shield::ShieldMitigation;

/// The three elemental components of a magic hit plus its mana drain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagicDamage {
    pub primary: i32,
    pub secondary: i32,
    pub tertiary: i32,
    pub mana: i32,
}

impl MagicDamage {
    pub const fn new(primary: i32, secondary: i32, tertiary: i32, mana: i32) -> Self {
        Self {
            primary,
            secondary,
            tertiary,
            mana,
        }
    }

    pub fn has_damage(&self) -> bool {
        self.primary > 0 || self.secondary > 0 || self.tertiary > 0 || self.mana > 0
    }
}

/// Physical hit damage.
///
/// ```text
/// damage = clamp(max(0, raw − defend) − shield, minimum, life)
/// ```
///
/// The life cap wins over the floor, so a nearly dead defender never loses
/// more life than it has.
pub fn physical_damage(raw: i32, defend: i32, shield: i32, minimum: i32, life: i32) -> i32 {
    let damage = raw.saturating_sub(defend).max(0).saturating_sub(shield);
    damage.max(minimum).min(life.max(0))
}

/// Magic hit damage.
///
/// Each component is defended and shielded on its own channel. Secondary and
/// tertiary components only ever add; the primary may go negative and eat
/// into them before the floor applies.
pub fn magic_damage(
    damage: &MagicDamage,
    defends: [i32; 3],
    shield: &ShieldMitigation,
    minimum: i32,
    life: i32,
) -> i32 {
    let primary = damage.primary - defends[0] - shield.primary;
    let secondary = damage.secondary - defends[1] - shield.secondary;
    let tertiary = damage.tertiary - defends[2] - shield.tertiary;

    let mut total = primary;
    if secondary > 0 {
        total += secondary;
    }
    if tertiary > 0 {
        total += tertiary;
    }
    total.max(minimum).min(life.max(0))
}

/// Experience a killer earns.
pub fn kill_experience(
    killer_level: u32,
    victim_level: u32,
    victim_bonus: u32,
    minimum: u32,
) -> u32 {
    killer_level
        .saturating_mul(victim_level)
        .saturating_add(victim_bonus)
        .max(minimum)
}
