/// Probability that an attack lands.
///
/// # Formula
///
/// ```text
/// defender ≥ attacker:  base + (attacker / defender) × 0.5   (defender > 0)
///                       base + 0.5                           (defender ≤ 0)
/// attacker > defender:  base + 0.5 + min((attacker − defender) / 100, 1) × 0.45
/// ```
///
/// With the default 5% base, equal evades give 55% and an attacker ahead by
/// 100 or more always hits.
pub fn hit_chance(attacker_evade: i32, defender_evade: i32, base: f32) -> f32 {
    let attacker = attacker_evade as f32;
    let defender = defender_evade as f32;
    if defender_evade >= attacker_evade {
        if defender_evade > 0 {
            base + (attacker / defender).max(0.0) * 0.5
        } else {
            base + 0.5
        }
    } else {
        base + 0.5 + ((attacker - defender) / 100.0).min(1.0) * 0.45
    }
}

/// A roll in `[0, 1)` above the chance misses.
#[inline]
pub fn check_hit(chance: f32, roll: f32) -> bool {
    roll <= chance
}
