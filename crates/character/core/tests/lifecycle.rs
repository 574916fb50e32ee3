mod common;

use std::collections::HashSet;

use character_core::{
    AttackerSnapshot, Character, CharacterConfig, CharacterId, CharacterState, CoreConfig,
    Damageable, Direction, Env, GridMap, GridPathFinder, LevelRow, LevelTable, Movable, Stateful,
    Tile, neighbors,
};
use common::init_tracing;

#[test]
fn neighbor_tables_for_both_row_parities() {
    let even = Tile::new(5, 4);
    let expected_even = [
        (5, 6),
        (4, 5),
        (4, 4),
        (4, 3),
        (5, 2),
        (5, 3),
        (6, 4),
        (5, 5),
    ];
    let odd = Tile::new(5, 3);
    let expected_odd = [
        (5, 5),
        (5, 4),
        (4, 3),
        (5, 2),
        (5, 1),
        (6, 2),
        (6, 3),
        (6, 4),
    ];

    for (tile, expected) in [(even, expected_even), (odd, expected_odd)] {
        let found = neighbors(tile);
        let unique: HashSet<Tile> = found.iter().copied().collect();
        assert_eq!(unique.len(), 8);
        for (direction, (x, y)) in Direction::ALL.into_iter().zip(expected) {
            assert_eq!(found[direction.index()], Tile::new(x, y), "{direction} of {tile}");
        }
    }
}

#[test]
fn level_up_applies_table_difference() {
    let table = LevelTable::from_rows([
        LevelRow {
            level_up_experience: 100,
            life_max: 120,
            thew_max: 50,
            attack: 10,
            defend: 4,
            evade: 6,
            ..LevelRow::default()
        },
        LevelRow {
            level_up_experience: 250,
            life_max: 165,
            thew_max: 58,
            attack: 13,
            defend: 6,
            evade: 7,
            ..LevelRow::default()
        },
    ]);
    let mut config = CharacterConfig::new("squire")
        .with_life(30, 120)
        .with_thew(10, 50)
        .with_combat(10, 4, 6);
    config.can_level_up = true;
    config.level_up_experience = 100;
    let mut squire =
        Character::spawn(CharacterId::PLAYER, &config, Tile::new(3, 3), CoreConfig::default());

    assert!(squire.add_experience(120, &table));
    assert_eq!(squire.level(), 2);
    assert_eq!(squire.life_max(), 120 + (165 - 120));
    assert_eq!(squire.life(), squire.life_max());
    assert_eq!(squire.thew(), 58);
    let stats = squire.base_stats();
    assert_eq!((stats.attack, stats.defend, stats.evade), (13, 6, 7));
    assert_eq!(squire.level_up_experience(), 250);
}

/// Drives a unit through the capability traits only.
fn strike_and_settle<T: Movable + Damageable + Stateful>(unit: &mut T, env: &Env<'_>) -> i32 {
    let attacker = AttackerSnapshot {
        id: CharacterId(50),
        name: "troll".into(),
        level: 2,
        evade: 1_000,
        player_aligned: false,
    };
    unit.take_damage(25, Some(&attacker), env);
    for _ in 0..5 {
        unit.update(100.0, env);
    }
    unit.life()
}

#[test]
fn capability_traits_drive_a_character() {
    init_tracing();
    let map = GridMap::new(12, 12);
    let env = Env::new(&map, &GridPathFinder);
    let config = CharacterConfig::new("villager")
        .with_life(100, 100)
        .with_basic_animations(&[CharacterState::Stand, CharacterState::Walk]);
    let mut villager =
        Character::spawn(CharacterId(11), &config, Tile::new(2, 2), CoreConfig::default());

    assert_eq!(strike_and_settle(&mut villager, &env), 75);
    assert_eq!(Stateful::state(&villager), CharacterState::Stand);
    assert!(Movable::walk_to(&mut villager, Tile::new(6, 2), &env));
    assert_eq!(Stateful::state(&villager), CharacterState::Walk);
    Movable::stand(&mut villager, &env);
    assert!(villager.path().is_empty());
    assert_eq!(Movable::tile(&villager), Tile::new(2, 2));
}

#[test]
fn special_action_suspends_and_restores_facing() {
    let map = GridMap::new(12, 12);
    let env = Env::new(&map, &GridPathFinder);
    let config = CharacterConfig::new("dancer").with_basic_animations(&[CharacterState::Stand]);
    let mut dancer =
        Character::spawn(CharacterId(4), &config, Tile::new(2, 2), CoreConfig::default());
    dancer.set_direction(Direction::NorthWest);

    let bow = character_core::AnimationSpec::new("bow", 3, 100);
    assert!(dancer.begin_special_action(&bow));
    assert!(!dancer.can_perform_action());
    assert!(!dancer.walk_to(Tile::new(5, 5), &env));

    dancer.set_direction(Direction::South);
    dancer.update(200.0, &env);
    assert!(dancer.is_in_special_action());
    dancer.update(100.0, &env);
    assert!(!dancer.is_in_special_action());
    assert_eq!(dancer.direction(), Direction::NorthWest);
    assert!(dancer.can_perform_action());
}
