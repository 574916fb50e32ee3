//! Incoming damage, death, and the attack and magic entry points.

use super::{Character, CharacterFlags, CharacterState};
use crate::combat::{
    AttackOutcome, AttackerSnapshot, CombatError, DamageReport, ExperienceAward, MagicDamage,
    check_hit, hit_chance, kill_experience, magic_damage, physical_damage,
};
use crate::config::AnimationSpec;
use crate::env::{CharacterId, Env, RollContext};
use crate::error::GameError;
use crate::geometry::{Direction, Tile, tile_to_world};
use crate::status::{EffectSource, StatusKind};

/// Drift from the tile center tolerated at death.
const DEATH_DRIFT_PX: f32 = 1.0;

const ATTACK_STATES: [CharacterState; 3] = [
    CharacterState::Attack,
    CharacterState::Attack1,
    CharacterState::Attack2,
];

impl Character {
    /// What this character looks like to someone it hits.
    pub fn snapshot(&self) -> AttackerSnapshot {
        AttackerSnapshot {
            id: self.id,
            name: self.name.clone(),
            level: self.level,
            evade: self.real_evade(),
            player_aligned: self.kind.is_player_aligned(),
        }
    }

    /// Attribution for effects this character applies to others.
    pub fn effect_source(&self) -> EffectSource {
        self.snapshot().source()
    }

    /// Applies a physical hit of `raw` damage.
    ///
    /// `attacker` is `None` for environmental damage, which always hits.
    pub fn take_damage(
        &mut self,
        raw: i32,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport {
        if let Err(reason) = self.accepts_damage(raw) {
            return self.ignore(reason);
        }
        if !self.roll_hit(attacker, env) {
            return DamageReport::miss();
        }
        let damage = physical_damage(
            raw,
            self.real_defend(),
            self.shields.mitigation().primary,
            self.core.minimum_damage,
            self.life.current(),
        );
        self.apply_hit(damage, 0, attacker, env)
    }

    /// Applies a magic hit with up to three elemental components and a mana
    /// drain.
    pub fn take_magic_damage(
        &mut self,
        damage: MagicDamage,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport {
        let strongest = damage
            .primary
            .max(damage.secondary)
            .max(damage.tertiary)
            .max(damage.mana);
        if let Err(reason) = self.accepts_damage(strongest) {
            return self.ignore(reason);
        }
        if !self.roll_hit(attacker, env) {
            return DamageReport::miss();
        }
        let real = self.real_stats();
        let mitigation = self.shields.mitigation();
        let life_damage = magic_damage(
            &damage,
            [real.defend, real.defend2, real.defend3],
            &mitigation,
            self.core.minimum_damage,
            self.life.current(),
        );
        let drain = (damage.mana - mitigation.mana).max(0);
        self.apply_hit(life_damage, drain, attacker, env)
    }

    fn accepts_damage(&self, damage: i32) -> Result<(), CombatError> {
        if self.is_death_invoked() || self.is_dead() {
            Err(CombatError::TargetDead)
        } else if damage <= 0 {
            Err(CombatError::NonPositiveDamage(damage))
        } else if self.invincible_ms > 0.0 {
            Err(CombatError::Invincible)
        } else if self.shields.is_immune() {
            Err(CombatError::Immune)
        } else {
            Ok(())
        }
    }

    fn ignore(&self, reason: CombatError) -> DamageReport {
        tracing::debug!(id = %self.id, code = reason.error_code(), %reason, "hit ignored");
        DamageReport::ignored(reason)
    }

    fn roll_hit(&mut self, attacker: Option<&AttackerSnapshot>, env: &Env<'_>) -> bool {
        let Some(attacker) = attacker else {
            return true;
        };
        let chance = hit_chance(attacker.evade, self.real_evade(), self.core.base_hit_chance);
        let seed = self.next_seed(RollContext::Hit);
        let hit = check_hit(chance, env.rng().roll_unit(seed));
        if !hit {
            tracing::debug!(id = %self.id, attacker = %attacker.id, chance, "attack missed");
        }
        hit
    }

    fn apply_hit(
        &mut self,
        damage: i32,
        mana_drain: i32,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport {
        let mut report = DamageReport {
            outcome: AttackOutcome::Hit,
            damage: -self.life.add(-damage),
            mana_drained: -self.mana.add(-mana_drain),
            ..DamageReport::miss()
        };

        let attacker_id = attacker.map(|a| a.id);
        if attacker_id.is_some() {
            self.last_attacker = attacker_id;
        }
        self.enter_fighting(env);
        self.hooks.on_damaged(attacker_id, report.damage);

        if self.life.is_empty() {
            report.killed = true;
            report.experience = attacker
                .filter(|a| a.player_aligned)
                .map(|a| self.kill_award(a.id, a.level));
            report.control_released = self.death(attacker_id, env);
        } else {
            self.try_hurt(env);
        }
        report
    }

    /// Experience owed to whoever killed this character.
    pub(crate) fn kill_award(&self, killer: CharacterId, killer_level: u32) -> ExperienceAward {
        ExperienceAward {
            recipient: killer,
            amount: kill_experience(
                killer_level,
                self.level,
                self.experience_bonus,
                self.core.minimum_kill_experience,
            ),
        }
    }

    fn try_hurt(&mut self, env: &Env<'_>) {
        let uninterruptible = self.state == CharacterState::Magic
            && self.flags.contains(CharacterFlags::UNINTERRUPTIBLE);
        if self.status.is_petrified()
            || matches!(self.state, CharacterState::Hurt | CharacterState::Death)
            || uninterruptible
            || self.special_action.is_some()
            || self.curve.is_some()
            || !self.has_animation(CharacterState::Hurt)
        {
            return;
        }
        let seed = self.next_seed(RollContext::Hurt);
        if !env.rng().one_in(seed, self.core.hurt_chance) {
            return;
        }
        self.destination = None;
        self.set_state(CharacterState::Hurt, env);
        self.animator.play_once();
    }

    /// Starts dying. Only the first call has any effect.
    ///
    /// Returns `true` when the death released the player's remote control of
    /// this character.
    pub fn death(&mut self, killer: Option<CharacterId>, env: &Env<'_>) -> bool {
        if self.is_death_invoked() {
            return false;
        }
        self.flags.insert(CharacterFlags::DEATH_INVOKED);
        self.life.drain();
        self.status.remove(StatusKind::Invisible);
        self.status.remove(StatusKind::SpeedChange);
        let control_released = self.flags.contains(CharacterFlags::CONTROLLED);
        self.flags.remove(CharacterFlags::CONTROLLED | CharacterFlags::ATTACK_REVEALED);
        tracing::debug!(id = %self.id, killer = ?killer, "death");
        self.hooks.on_death(killer);

        self.path.clear();
        self.destination = None;
        self.curve = None;
        self.curve_end = None;
        self.forced = None;
        self.special_action = None;

        if self.is_summon() {
            self.finalize_death();
            return control_released;
        }

        let center = tile_to_world(self.tile);
        if self.position.distance(center) > DEATH_DRIFT_PX {
            self.position = center;
        }

        if self.has_animation(CharacterState::Death) {
            let variant = self.death_variant();
            self.set_state(CharacterState::Death, env);
            if let Some(variant) = variant {
                self.flags.insert(CharacterFlags::NO_CORPSE);
                match env.animations().get(variant) {
                    Some(spec) => self.animator.reset(Some(&spec)),
                    None => {
                        env.animations().request_load(variant);
                        self.pending_death_asset = Some(variant.to_owned());
                    }
                }
            }
            self.animator.play_once();
            self.status.clear_all();
        } else {
            self.status.clear_all();
            self.finalize_death();
        }
        control_released
    }

    /// Asset key of the status-specific death animation, if one applies.
    fn death_variant(&self) -> Option<&'static str> {
        [
            (StatusKind::Frozen, "frozen"),
            (StatusKind::Poison, "poisoned"),
            (StatusKind::Petrified, "petrified"),
        ]
        .into_iter()
        .find(|(kind, _)| self.status.is_active(*kind) && self.status.has_visual(*kind))
        .map(|(_, key)| key)
    }

    /// Installs an animation asset that finished loading after it was
    /// requested. Ignored unless the character still waits for it.
    pub fn apply_loaded_animation(&mut self, key: &str, spec: &AnimationSpec) -> bool {
        if self.state != CharacterState::Death
            || self.is_dead()
            || self.pending_death_asset.as_deref() != Some(key)
        {
            return false;
        }
        self.pending_death_asset = None;
        self.animator.reset(Some(spec));
        self.animator.play_once();
        true
    }

    pub(crate) fn finalize_death(&mut self) {
        self.flags.insert(CharacterFlags::DEAD);
        self.flags.remove(CharacterFlags::IN_FIGHTING);
        self.pending_death_asset = None;
        self.animator.clamp_to_last();
    }

    // ===== attack and magic =====

    /// Starts an attack toward `target`, choosing among the attack animations
    /// the character has.
    pub fn attack_to(&mut self, target: Tile, env: &Env<'_>) -> bool {
        if !self.can_perform_action() || self.flags.contains(CharacterFlags::FIGHT_DISABLED) {
            tracing::debug!(id = %self.id, %target, state = %self.state, "attack refused");
            return false;
        }
        let available: Vec<CharacterState> = ATTACK_STATES
            .into_iter()
            .filter(|state| self.has_animation(*state))
            .collect();
        if available.is_empty() {
            tracing::debug!(id = %self.id, %target, "attack refused, no attack animation");
            return false;
        }
        let seed = self.next_seed(RollContext::Hit);
        let pick = env.rng().roll_die(seed, available.len() as u32).saturating_sub(1) as usize;
        let state = available[pick.min(available.len() - 1)];

        self.begin_strike(target, state, env);
        self.attack_target = Some(target);
        true
    }

    /// Starts casting toward `target`. An uninterruptible cast ignores hurt
    /// reactions.
    pub fn cast_magic_to(&mut self, target: Tile, uninterruptible: bool, env: &Env<'_>) -> bool {
        if !self.can_perform_action()
            || self.status.is_skill_disabled()
            || !self.has_animation(CharacterState::Magic)
        {
            tracing::debug!(id = %self.id, %target, state = %self.state, "cast refused");
            return false;
        }
        self.begin_strike(target, CharacterState::Magic, env);
        self.magic_target = Some(target);
        self.flags.set(CharacterFlags::UNINTERRUPTIBLE, uninterruptible);
        true
    }

    fn begin_strike(&mut self, target: Tile, state: CharacterState, env: &Env<'_>) {
        self.destination = None;
        if let Some(direction) = Direction::from_vector(tile_to_world(target) - self.position) {
            self.direction = direction;
        }
        self.enter_fighting(env);
        self.set_state(state, env);
        self.animator.play_once();
        if self.status.is_invisible() && self.status.is_visible_when_attack() {
            self.flags.insert(CharacterFlags::ATTACK_REVEALED);
        }
    }

    pub(crate) fn finish_attack(&mut self, env: &Env<'_>) {
        let state = self.state;
        let target = self.attack_target.take();
        self.flags.remove(CharacterFlags::ATTACK_REVEALED);
        self.play_state_sound(state, env);
        self.hooks.use_queued_magic();
        self.hooks.on_attacking(target);
        let idle = self.idle_state();
        self.set_state(idle, env);
    }

    pub(crate) fn finish_magic(&mut self, env: &Env<'_>) {
        let target = self.magic_target.take();
        self.flags.remove(CharacterFlags::ATTACK_REVEALED);
        self.play_state_sound(CharacterState::Magic, env);
        self.hooks.on_magic_cast(target);
        let idle = self.idle_state();
        self.set_state(idle, env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{ShieldEffect, ShieldMitigation};
    use crate::config::{CharacterConfig, CoreConfig};
    use crate::env::{FixedRng, GridMap};
    use crate::path::GridPathFinder;

    const ALWAYS: FixedRng = FixedRng(0);

    fn defender(defend: i32) -> Character {
        let config = CharacterConfig::new("orc")
            .with_life(100, 100)
            .with_combat(0, defend, 10)
            .with_basic_animations(&[CharacterState::Stand, CharacterState::Death]);
        Character::spawn(CharacterId(8), &config, Tile::new(3, 3), CoreConfig::default())
    }

    fn attacker() -> AttackerSnapshot {
        AttackerSnapshot {
            id: CharacterId::PLAYER,
            name: "hero".into(),
            level: 3,
            evade: 10,
            player_aligned: true,
        }
    }

    #[test]
    fn defend_and_floor() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);

        let mut soft = defender(40);
        let report = soft.take_damage(100, Some(&attacker()), &env);
        assert_eq!(report.outcome, AttackOutcome::Hit);
        assert_eq!(report.damage, 60);
        assert_eq!(soft.life(), 40);

        let mut hard = defender(200);
        assert_eq!(hard.take_damage(100, Some(&attacker()), &env).damage, 5);
    }

    #[test]
    fn petrified_target_keeps_state_and_frame() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
        let config = CharacterConfig::new("statue")
            .with_life(100, 100)
            .with_basic_animations(&[
                CharacterState::FightStand,
                CharacterState::Hurt,
                CharacterState::Death,
            ])
            .with_animation(CharacterState::Stand, AnimationSpec::new("stand", 4, 100));
        let mut statue =
            Character::spawn(CharacterId(9), &config, Tile::new(3, 3), CoreConfig::default());
        statue.update(250.0, &env);
        assert_eq!(statue.frame(), 2);

        statue.status_mut().petrify(1_000.0, false);
        assert!(statue.take_damage(20, None, &env).is_hit());
        assert_eq!(statue.life(), 80);
        assert!(statue.is_in_fighting());
        assert_eq!(statue.state(), CharacterState::Stand);
        assert_eq!(statue.frame(), 2);
    }

    #[test]
    fn shields_mitigate_and_immunity_ignores() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
        let mut orc = defender(0);
        orc.shields_mut().add(ShieldEffect::mitigating(
            1_000.0,
            ShieldMitigation {
                primary: 30,
                ..ShieldMitigation::default()
            },
        ));
        assert_eq!(orc.take_damage(50, None, &env).damage, 20);

        orc.shields_mut().add(ShieldEffect::immunity(1_000.0));
        let report = orc.take_damage(50, None, &env);
        assert_eq!(report.outcome, AttackOutcome::Ignored(CombatError::Immune));
        assert_eq!(orc.life(), 80);
    }

    #[test]
    fn kill_awards_experience_and_enters_death() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
        let mut orc = defender(0);
        let report = orc.take_damage(500, Some(&attacker()), &env);
        assert!(report.killed);
        assert_eq!(report.damage, 100);
        assert_eq!(
            report.experience,
            Some(ExperienceAward {
                recipient: CharacterId::PLAYER,
                amount: 4,
            })
        );
        assert_eq!(orc.state(), CharacterState::Death);
        assert!(orc.is_death_invoked());
        assert!(!orc.is_dead());
        assert_eq!(
            orc.take_damage(10, Some(&attacker()), &env).outcome,
            AttackOutcome::Ignored(CombatError::TargetDead)
        );
    }

    #[test]
    fn magic_damage_drains_mana() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
        let mut config = CharacterConfig::new("mage").with_mana(50, 50).with_combat(0, 10, 0);
        config.defend2 = 5;
        let mut mage =
            Character::spawn(CharacterId(4), &config, Tile::new(2, 2), CoreConfig::default());

        let report = mage.take_magic_damage(MagicDamage::new(30, 15, 0, 20), None, &env);
        // (30 − 10) + (15 − 5)
        assert_eq!(report.damage, 30);
        assert_eq!(report.mana_drained, 20);
        assert_eq!(mage.mana(), 30);
    }

    #[test]
    fn summon_dies_without_animation() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder);
        let config = CharacterConfig::new("wolf")
            .with_basic_animations(&[CharacterState::Stand, CharacterState::Death])
            .summoned();
        let mut wolf =
            Character::spawn(CharacterId(20), &config, Tile::new(2, 2), CoreConfig::default());
        wolf.death(None, &env);
        assert!(wolf.is_dead());
        assert!(wolf.ready_for_removal());
        assert!(!wolf.leaves_corpse());
        assert_eq!(wolf.state(), CharacterState::Stand);
    }

    #[test]
    fn attack_requires_animation_and_sets_target() {
        let map = GridMap::new(8, 8);
        let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
        let mut orc = defender(0);
        assert!(!orc.attack_to(Tile::new(4, 3), &env));

        let config = CharacterConfig::new("archer")
            .with_basic_animations(&[CharacterState::Stand, CharacterState::Attack1]);
        let mut archer =
            Character::spawn(CharacterId(6), &config, Tile::new(2, 3), CoreConfig::default());
        assert!(archer.attack_to(Tile::new(4, 3), &env));
        assert_eq!(archer.state(), CharacterState::Attack1);
        assert_eq!(archer.attack_target(), Some(Tile::new(4, 3)));
        assert_eq!(archer.direction(), Direction::East);
        assert!(archer.is_in_fighting());
        assert!(!archer.can_perform_action());
    }
}
