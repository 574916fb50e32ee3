//! Life, mana, thew, real combat stats and leveling.

use super::Character;
use crate::env::Env;
use crate::stats::{CombatStats, LevelTable, Meter, Modifier};

impl Character {
    pub fn life(&self) -> i32 {
        self.life.current()
    }

    pub fn life_max(&self) -> i32 {
        self.life.max()
    }

    pub fn mana(&self) -> i32 {
        self.mana.current()
    }

    pub fn mana_max(&self) -> i32 {
        self.mana.max()
    }

    pub fn thew(&self) -> i32 {
        self.thew.current()
    }

    pub fn thew_max(&self) -> i32 {
        self.thew.max()
    }

    /// Changes life by `delta`. Returns `true` when this call killed the
    /// character.
    pub fn add_life(&mut self, delta: i32, env: &Env<'_>) -> bool {
        if self.is_death_invoked() {
            return false;
        }
        self.life.add(delta);
        self.check_life(env)
    }

    /// Sets life, clamped to `[0, life_max]`. Returns `true` when this call
    /// killed the character.
    pub fn set_life(&mut self, life: i32, env: &Env<'_>) -> bool {
        if self.is_death_invoked() {
            return false;
        }
        self.life.set(life);
        self.check_life(env)
    }

    pub fn full_life(&mut self) {
        if !self.is_death_invoked() {
            self.life.refill();
        }
    }

    pub fn set_life_max(&mut self, life_max: i32) {
        self.life.set_max(life_max);
    }

    fn check_life(&mut self, env: &Env<'_>) -> bool {
        if self.life.is_empty() {
            self.death(None, env);
            true
        } else {
            false
        }
    }

    pub fn add_mana(&mut self, delta: i32) -> i32 {
        self.mana.add(delta)
    }

    pub fn set_mana(&mut self, mana: i32) {
        self.mana.set(mana);
    }

    pub fn full_mana(&mut self) {
        self.mana.refill();
    }

    pub fn add_thew(&mut self, delta: i32) -> i32 {
        self.thew.add(delta)
    }

    pub fn set_thew(&mut self, thew: i32) {
        self.thew.set(thew);
    }

    pub fn full_thew(&mut self) {
        self.thew.refill();
    }

    /// Unmodified combat stats.
    pub fn base_stats(&self) -> CombatStats {
        self.base
    }

    /// Combat stats after weaken, morph and equipment bonuses.
    pub fn real_stats(&self) -> CombatStats {
        let mut modifiers = self.status.combat_modifiers();
        modifiers
            .attack
            .push_nonzero(Modifier::Increased(self.attack_bonus_percent));
        modifiers
            .defend
            .push_nonzero(Modifier::Increased(self.defend_bonus_percent));
        modifiers
            .evade
            .push_nonzero(Modifier::Increased(self.evade_bonus_percent));
        self.base.resolve(&modifiers)
    }

    pub fn real_defend(&self) -> i32 {
        self.real_stats().defend
    }

    pub fn real_evade(&self) -> i32 {
        self.real_stats().evade
    }

    // ===== leveling =====

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn level_up_experience(&self) -> u32 {
        self.level_up_experience
    }

    /// Experience a killer of this character receives on top of the base.
    pub fn experience_bonus(&self) -> u32 {
        self.experience_bonus
    }

    /// Adds experience and levels up when the threshold is met. Returns
    /// `true` on a level change.
    pub fn add_experience(&mut self, amount: u32, levels: &LevelTable) -> bool {
        self.experience = self.experience.saturating_add(amount);
        if !self.can_level_up
            || self.level_up_experience == 0
            || self.experience < self.level_up_experience
        {
            return false;
        }
        let target = levels.level_for_experience(self.experience);
        self.level_up_to(target, levels)
    }

    /// Raises the character to `target`, applying the stat difference between
    /// the two level rows and refilling the pools.
    ///
    /// Levels past the end of the table clamp to its last row and zero the
    /// experience counters.
    pub fn level_up_to(&mut self, target: u32, levels: &LevelTable) -> bool {
        if target <= self.level {
            return false;
        }
        let max_level = levels.max_level();
        let capped = target > max_level;
        let target = target.min(max_level);

        let (Some(current), Some(next)) = (levels.row(self.level), levels.row(target)) else {
            return false;
        };
        let delta = next.delta_from(current);

        grow(&mut self.life, delta.life_max);
        grow(&mut self.thew, delta.thew_max);
        grow(&mut self.mana, delta.mana_max);
        self.base.attack += delta.attack;
        self.base.attack2 += delta.attack2;
        self.base.attack3 += delta.attack3;
        self.base.defend += delta.defend;
        self.base.defend2 += delta.defend2;
        self.base.defend3 += delta.defend3;
        self.base.evade += delta.evade;

        let from = self.level;
        self.level = target;
        if capped {
            self.experience = 0;
            self.level_up_experience = 0;
        } else {
            self.level_up_experience = delta.level_up_experience;
        }
        tracing::debug!(id = %self.id, from, to = target, capped, "level up");
        true
    }
}

fn grow(meter: &mut Meter, delta: i32) {
    meter.set_max(meter.max() + delta);
    meter.refill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CharacterConfig, CoreConfig};
    use crate::env::{CharacterId, GridMap};
    use crate::geometry::Tile;
    use crate::path::GridPathFinder;
    use crate::stats::LevelRow;

    fn table() -> LevelTable {
        let row = |threshold, life_max, attack| LevelRow {
            level_up_experience: threshold,
            life_max,
            mana_max: life_max / 2,
            attack,
            ..LevelRow::default()
        };
        LevelTable::from_rows([row(100, 200, 10), row(300, 260, 14), row(700, 330, 19)])
    }

    fn hero() -> Character {
        let mut config = CharacterConfig::new("hero")
            .with_life(150, 200)
            .with_mana(10, 100)
            .with_combat(10, 5, 5);
        config.level_up_experience = 100;
        config.can_level_up = true;
        Character::spawn(CharacterId::PLAYER, &config, Tile::new(2, 2), CoreConfig::default())
    }

    #[test]
    fn life_stays_in_range() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder);
        let mut hero = hero();
        hero.add_life(500, &env);
        assert_eq!(hero.life(), hero.life_max());
        assert!(hero.set_life(-20, &env));
        assert_eq!(hero.life(), 0);
        assert!(hero.is_death_invoked());
        assert!(!hero.add_life(-5, &env));
    }

    #[test]
    fn level_up_applies_row_delta() {
        let mut hero = hero();
        assert!(hero.level_up_to(2, &table()));
        assert_eq!(hero.level(), 2);
        assert_eq!(hero.life_max(), 260);
        assert_eq!(hero.life(), 260);
        assert_eq!(hero.mana_max(), 130);
        assert_eq!(hero.base_stats().attack, 14);
        assert_eq!(hero.level_up_experience(), 300);
    }

    #[test]
    fn experience_crosses_several_levels() {
        let mut hero = hero();
        assert!(!hero.add_experience(40, &table()));
        assert!(hero.add_experience(400, &table()));
        assert_eq!(hero.level(), 3);
        assert_eq!(hero.level_up_experience(), 700);
    }

    #[test]
    fn level_past_table_is_capped() {
        let mut hero = hero();
        assert!(hero.add_experience(5_000, &table()));
        assert_eq!(hero.level(), 3);
        assert_eq!(hero.experience(), 0);
        assert_eq!(hero.level_up_experience(), 0);
        assert!(!hero.add_experience(5_000, &table()));
    }

    #[test]
    fn equipment_bonus_feeds_real_stats() {
        let mut config = CharacterConfig::new("knight").with_combat(100, 40, 20);
        config.defend_bonus_percent = 50;
        let knight =
            Character::spawn(CharacterId(9), &config, Tile::new(1, 1), CoreConfig::default());
        assert_eq!(knight.real_defend(), 60);
        assert_eq!(knight.real_evade(), 20);
    }
}
