mod common;

use character_core::combat::CombatError;
use character_core::env::FixedRng;
use character_core::status::EffectSource;
use character_core::{
    AnimationSpec, AttackOutcome, AttackerSnapshot, Character, CharacterConfig, CharacterId,
    CharacterKind, CharacterState, CoreConfig, Env, ExperienceAward, GridMap, GridPathFinder,
    HookEvent, Tile, hit_chance,
};
use common::{Assets, Living, Recorder, init_tracing};

const ALWAYS: FixedRng = FixedRng(0);
/// Rolls just under 1.0: every roll misses unless the chance is certain.
const NEVER: FixedRng = FixedRng(u32::MAX);

fn target(defend: i32, recorder: &Recorder) -> Character {
    let config = CharacterConfig::new("bandit")
        .with_life(100, 100)
        .with_combat(20, defend, 30)
        .with_basic_animations(&[
            CharacterState::Stand,
            CharacterState::Hurt,
            CharacterState::Death,
        ]);
    Character::spawn(CharacterId(7), &config, Tile::new(4, 4), CoreConfig::default())
        .with_hooks(recorder.clone())
}

fn hero(evade: i32) -> AttackerSnapshot {
    AttackerSnapshot {
        id: CharacterId::PLAYER,
        name: "hero".into(),
        level: 5,
        evade,
        player_aligned: true,
    }
}

#[test]
fn hit_chance_follows_evade_ratio() {
    let base = CoreConfig::default().base_hit_chance;
    for evade in [1, 30, 250] {
        assert!((hit_chance(evade, evade, base) - 0.55).abs() < 1e-6);
    }
    assert!((hit_chance(0, 0, base) - 0.55).abs() < 1e-6);
    assert!((hit_chance(150, 50, base) - 1.0).abs() < 1e-6);
    assert!((hit_chance(900, 10, base) - 1.0).abs() < 1e-6);
    assert!((hit_chance(10, 40, base) - 0.175).abs() < 1e-6);
}

#[test]
fn damage_respects_defend_and_floor() {
    init_tracing();
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);

    let mut soft = target(40, &Recorder::default());
    let report = soft.take_damage(100, Some(&hero(30)), &env);
    assert_eq!(report.outcome, AttackOutcome::Hit);
    assert_eq!(report.damage, 60);

    let mut hard = target(200, &Recorder::default());
    assert_eq!(hard.take_damage(100, Some(&hero(30)), &env).damage, 5);
    assert_eq!(hard.life(), 95);
}

#[test]
fn miss_changes_nothing() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&NEVER);
    let recorder = Recorder::default();
    let mut bandit = target(0, &recorder);

    let report = bandit.take_damage(50, Some(&hero(30)), &env);
    assert_eq!(report.outcome, AttackOutcome::Miss);
    assert_eq!(bandit.life(), 100);
    assert!(recorder.events().is_empty());
}

#[test]
fn ignored_hits_are_silent() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
    let recorder = Recorder::default();
    let mut bandit = target(0, &recorder);

    assert_eq!(
        bandit.take_damage(0, Some(&hero(30)), &env).outcome,
        AttackOutcome::Ignored(CombatError::NonPositiveDamage(0))
    );
    bandit.set_invincible(500.0);
    assert_eq!(
        bandit.take_damage(50, Some(&hero(30)), &env).outcome,
        AttackOutcome::Ignored(CombatError::Invincible)
    );
    assert_eq!(bandit.life(), 100);
    assert!(recorder.events().is_empty());

    // Invincibility runs out with the tick clock.
    bandit.update(500.0, &env);
    assert!(bandit.take_damage(50, Some(&hero(30)), &env).is_hit());
}

#[test]
fn hurt_interrupts_and_recovers() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
    let recorder = Recorder::default();
    let mut bandit = target(0, &recorder);

    bandit.take_damage(10, Some(&hero(30)), &env);
    assert_eq!(bandit.state(), CharacterState::Hurt);
    assert!(!bandit.can_perform_action());
    assert_eq!(
        recorder.events(),
        vec![HookEvent::Damaged {
            attacker: Some(CharacterId::PLAYER),
            damage: 10,
        }]
    );

    bandit.update(100.0, &env);
    assert_eq!(bandit.state(), CharacterState::Stand);
    assert!(bandit.is_in_fighting());
}

#[test]
fn death_runs_once() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
    let recorder = Recorder::default();
    let mut bandit = target(0, &recorder);
    bandit.status_mut().poison(5_000.0, None, false);

    let report = bandit.take_damage(1_000, Some(&hero(30)), &env);
    assert!(report.killed);
    assert_eq!(
        report.experience,
        Some(ExperienceAward {
            recipient: CharacterId::PLAYER,
            amount: 5,
        })
    );
    assert_eq!(bandit.state(), CharacterState::Death);
    assert!(!bandit.status().is_poisoned());

    assert!(!bandit.death(Some(CharacterId(99)), &env));
    let deaths = recorder.count(|event| matches!(event, HookEvent::Death { .. }));
    assert_eq!(deaths, 1);
    assert_eq!(bandit.state(), CharacterState::Death);
}

#[test]
fn npc_kill_awards_no_experience() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
    let mut bandit = target(0, &Recorder::default());
    let wolf = AttackerSnapshot {
        player_aligned: false,
        ..hero(30)
    };
    let report = bandit.take_damage(1_000, Some(&wolf), &env);
    assert!(report.killed);
    assert_eq!(report.experience, None);
}

#[test]
fn poison_kill_credits_living_poisoner() {
    let map = GridMap::new(10, 10);
    let roster = Living::with(&[CharacterId(40)]);
    let env = Env::new(&map, &GridPathFinder).with_roster(&roster);
    let mut bandit = target(0, &Recorder::default());
    bandit.set_life(10, &env);
    bandit.status_mut().poison(
        5_000.0,
        Some(EffectSource {
            id: CharacterId(40),
            name: "spider".into(),
            level: 3,
        }),
        false,
    );

    let report = bandit.update(250.0, &env);
    assert!(report.died);
    assert_eq!(
        report.experience,
        Some(ExperienceAward {
            recipient: CharacterId(40),
            amount: 4,
        })
    );
}

#[test]
fn poison_kill_by_dead_poisoner_awards_nothing() {
    let map = GridMap::new(10, 10);
    let roster = Living::default();
    let env = Env::new(&map, &GridPathFinder).with_roster(&roster);
    let mut bandit = target(0, &Recorder::default());
    bandit.set_life(10, &env);
    bandit.status_mut().poison(
        5_000.0,
        Some(EffectSource {
            id: CharacterId(40),
            name: "spider".into(),
            level: 3,
        }),
        false,
    );

    let report = bandit.update(250.0, &env);
    assert!(report.died);
    assert_eq!(report.experience, None);
}

#[test]
fn frozen_death_waits_for_variant_asset() {
    let map = GridMap::new(10, 10);
    let assets = Assets::default();
    let env = Env::new(&map, &GridPathFinder)
        .with_rng(&ALWAYS)
        .with_animations(&assets);
    let mut bandit = target(0, &Recorder::default());
    bandit.status_mut().freeze(5_000.0, true);

    bandit.take_damage(1_000, None, &env);
    assert_eq!(bandit.state(), CharacterState::Death);
    assert_eq!(assets.requested.borrow().as_slice(), &["frozen".to_owned()]);

    let late = AnimationSpec::new("death_frozen", 4, 100);
    assert!(!bandit.apply_loaded_animation("poisoned", &late));
    assert!(bandit.apply_loaded_animation("frozen", &late));
    assert_eq!(bandit.animator().asset(), Some("death_frozen"));
    assert!(!bandit.apply_loaded_animation("frozen", &late));

    for _ in 0..4 {
        bandit.update(100.0, &env);
    }
    assert!(bandit.ready_for_removal());
    assert!(!bandit.leaves_corpse());
}

#[test]
fn attack_completion_fires_hooks_in_order() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
    let recorder = Recorder::default();
    let config = CharacterConfig::new("hero")
        .with_kind(CharacterKind::Player)
        .with_basic_animations(&[CharacterState::Stand, CharacterState::Attack]);
    let mut hero =
        Character::spawn(CharacterId::PLAYER, &config, Tile::new(2, 2), CoreConfig::default())
            .with_hooks(recorder.clone());

    assert!(hero.attack_to(Tile::new(3, 2), &env));
    assert!(!hero.walk_to(Tile::new(5, 5), &env));
    hero.update(100.0, &env);

    assert_eq!(
        recorder.events(),
        vec![
            HookEvent::UseQueuedMagic,
            HookEvent::Attacking {
                target: Some(Tile::new(3, 2)),
            },
        ]
    );
    assert_eq!(hero.state(), CharacterState::Stand);
    assert!(hero.can_perform_action());
}

#[test]
fn invisible_attacker_is_revealed_while_striking() {
    let map = GridMap::new(10, 10);
    let env = Env::new(&map, &GridPathFinder).with_rng(&ALWAYS);
    let config = CharacterConfig::new("assassin")
        .with_basic_animations(&[CharacterState::Stand, CharacterState::Magic]);
    let mut assassin =
        Character::spawn(CharacterId(3), &config, Tile::new(2, 2), CoreConfig::default());
    assassin.status_mut().make_invisible(10_000.0, true);
    assert!(!assassin.is_draw());

    assert!(assassin.cast_magic_to(Tile::new(5, 2), false, &env));
    assert!(assassin.is_draw());
    assassin.update(100.0, &env);
    assert_eq!(assassin.state(), CharacterState::Stand);
    assert!(!assassin.is_draw());
}
