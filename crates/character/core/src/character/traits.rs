//! Capability traits for code that only needs one facet of a character.

use super::{Character, CharacterState, TickReport};
use crate::combat::{AttackerSnapshot, DamageReport, MagicDamage};
use crate::env::Env;
use crate::geometry::{Pixel, Tile};

/// Something that occupies a tile and can be told to move.
pub trait Movable {
    fn tile(&self) -> Tile;

    fn position(&self) -> Pixel;

    fn walk_to(&mut self, destination: Tile, env: &Env<'_>) -> bool;

    fn run_to(&mut self, destination: Tile, env: &Env<'_>) -> bool;

    fn jump_to(&mut self, destination: Tile, env: &Env<'_>) -> bool;

    /// Drops any path and returns to idle.
    fn stand(&mut self, env: &Env<'_>);
}

/// Something with life that can be hit.
pub trait Damageable {
    fn life(&self) -> i32;

    fn is_death_invoked(&self) -> bool;

    fn take_damage(
        &mut self,
        raw: i32,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport;

    fn take_magic_damage(
        &mut self,
        damage: MagicDamage,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport;
}

/// Something driven by the tick loop.
pub trait Stateful {
    fn state(&self) -> CharacterState;

    fn can_perform_action(&self) -> bool;

    fn update(&mut self, dt: f32, env: &Env<'_>) -> TickReport;
}

impl Movable for Character {
    fn tile(&self) -> Tile {
        Character::tile(self)
    }

    fn position(&self) -> Pixel {
        Character::position(self)
    }

    fn walk_to(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        Character::walk_to(self, destination, env)
    }

    fn run_to(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        Character::run_to(self, destination, env)
    }

    fn jump_to(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        Character::jump_to(self, destination, env)
    }

    fn stand(&mut self, env: &Env<'_>) {
        Character::stand(self, env);
    }
}

impl Damageable for Character {
    fn life(&self) -> i32 {
        Character::life(self)
    }

    fn is_death_invoked(&self) -> bool {
        Character::is_death_invoked(self)
    }

    fn take_damage(
        &mut self,
        raw: i32,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport {
        Character::take_damage(self, raw, attacker, env)
    }

    fn take_magic_damage(
        &mut self,
        damage: MagicDamage,
        attacker: Option<&AttackerSnapshot>,
        env: &Env<'_>,
    ) -> DamageReport {
        Character::take_magic_damage(self, damage, attacker, env)
    }
}

impl Stateful for Character {
    fn state(&self) -> CharacterState {
        Character::state(self)
    }

    fn can_perform_action(&self) -> bool {
        Character::can_perform_action(self)
    }

    fn update(&mut self, dt: f32, env: &Env<'_>) -> TickReport {
        Character::update(self, dt, env)
    }
}
