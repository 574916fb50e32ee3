//! Jumps and curve moves.

use super::{Character, CharacterFlags, CharacterState};
use crate::env::Env;
use crate::geometry::{Direction, Tile, tile_to_world, world_to_tile};
use crate::movement::{CurveMove, JumpPath, MoveError, distance_for};

impl Character {
    pub fn jump_to(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        let result = self.begin_jump(destination, env);
        self.report_refusal("jump_to", destination, result)
    }

    fn begin_jump(&mut self, destination: Tile, env: &Env<'_>) -> Result<(), MoveError> {
        if !self.can_perform_action() {
            return Err(MoveError::ActionBlocked);
        }
        if self.status.is_move_disabled() {
            return Err(MoveError::MovementDisabled);
        }
        if destination == self.tile {
            return Err(MoveError::AlreadyThere(destination));
        }
        let map = env.map();
        if map.is_obstacle_for_character(destination) || map.is_hard_obstacle(destination) {
            return Err(MoveError::DestinationBlocked(destination));
        }
        if !self.has_animation(CharacterState::Jump)
            && !self.has_animation(CharacterState::FightJump)
        {
            return Err(MoveError::MissingAnimation("jump"));
        }
        if self.flags.contains(CharacterFlags::JUMP_DISABLED) {
            return Err(MoveError::JumpDisabled);
        }

        self.path.clear();
        self.destination = None;
        self.attack_target = None;
        let to = tile_to_world(destination);
        if let Some(direction) = Direction::from_vector(to - self.position) {
            self.direction = direction;
        }
        let state = self.jump_state();
        self.set_state(state, env);
        self.jump = Some(JumpPath::new(self.position, to, self.tile, destination));
        self.animator.play_once();
        Ok(())
    }

    /// Per-tick jump advance followed by the jump animation.
    ///
    /// The tile follows the position while in flight. The jump ends once the
    /// span is covered, on a trap, or when the landing becomes blocked; the
    /// animation holds its last frame until then.
    pub(crate) fn update_jump(&mut self, dt: f32, anim_dt: f32, env: &Env<'_>) {
        if let Some(mut jump) = self.jump.take() {
            let map = env.map();
            let landing = jump.target;
            if map.is_hard_obstacle(landing) || env.roster().event_actor_at(landing) {
                tracing::debug!(id = %self.id, %landing, "jump aborted, landing blocked");
                self.tile = jump.safe;
                self.position = tile_to_world(jump.safe);
            } else {
                let speed = self.move_speed(self.core.jump_speed_fold);
                self.position = jump.advance(distance_for(speed, dt));
                let underfoot = world_to_tile(self.position);
                let entered = underfoot != self.tile;
                self.tile = underfoot;
                if !map.is_obstacle_for_character(underfoot) {
                    jump.safe = underfoot;
                }
                if entered && map.is_trap(underfoot) {
                    tracing::debug!(id = %self.id, tile = %underfoot, "jump ended on trap");
                } else if jump.is_finished() {
                    self.tile = landing;
                    self.position = jump.to;
                } else {
                    self.jump = Some(jump);
                }
            }
        }

        let animation_done = self.animator.update(anim_dt) || self.animator.is_finished();
        if animation_done && self.jump.is_none() {
            let idle = self.idle_state();
            self.set_state(idle, env);
        }
    }

    /// Moves along an arc to `destination` at `speed` pixels per second,
    /// suspending the state machine until the move ends.
    ///
    /// `on_end` runs once the move finishes or is stopped by an obstacle.
    pub fn bezier_move_to(
        &mut self,
        destination: Tile,
        speed: f32,
        on_end: impl FnOnce(&mut Character) + 'static,
    ) -> bool {
        if self.is_death_invoked() || destination == self.tile {
            return false;
        }
        self.path.clear();
        self.destination = None;
        let to = tile_to_world(destination);
        if let Some(direction) = Direction::from_vector(to - self.position) {
            self.direction = direction;
        }
        self.curve = Some(CurveMove::new(
            self.position,
            to,
            speed,
            self.core.curve_height_ratio,
        ));
        self.curve_end = Some(Box::new(on_end));
        true
    }

    pub(crate) fn update_curve(&mut self, dt: f32, env: &Env<'_>) {
        let Some(mut curve) = self.curve.take() else {
            return;
        };
        let position = curve.advance(dt);
        let tile = world_to_tile(position);
        let finished = if tile != self.tile && env.map().is_obstacle_for_jump(tile) {
            tracing::debug!(id = %self.id, %tile, "curve move stopped by obstacle");
            self.position = tile_to_world(self.tile);
            true
        } else {
            self.position = position;
            self.tile = tile;
            curve.is_finished()
        };

        if finished {
            if let Some(on_end) = self.curve_end.take() {
                on_end(self);
            }
        } else {
            self.curve = Some(curve);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnimationSpec, CharacterConfig, CoreConfig};
    use crate::env::{CharacterId, GridMap, ObstacleKind, Roster};
    use crate::path::GridPathFinder;

    fn jumper(jump_disabled: bool) -> Character {
        let mut config = CharacterConfig::new("jumper")
            .with_basic_animations(&[CharacterState::Stand, CharacterState::Jump]);
        config.jump_disabled = jump_disabled;
        Character::spawn(CharacterId(2), &config, Tile::new(4, 4), CoreConfig::default())
    }

    #[test]
    fn jump_refusals() {
        let mut map = GridMap::new(12, 12);
        map.set_obstacle(Tile::new(6, 4), ObstacleKind::Soft);
        let env = Env::new(&map, &GridPathFinder);

        let mut character = jumper(false);
        assert!(!character.jump_to(Tile::new(4, 4), &env));
        assert!(!character.jump_to(Tile::new(6, 4), &env));
        assert!(!jumper(true).jump_to(Tile::new(4, 8), &env));

        let bare = CharacterConfig::new("bare");
        let mut grounded =
            Character::spawn(CharacterId(3), &bare, Tile::new(4, 4), CoreConfig::default());
        assert!(!grounded.jump_to(Tile::new(4, 8), &env));
    }

    #[test]
    fn jump_lands_on_target() {
        let map = GridMap::new(12, 12);
        let env = Env::new(&map, &GridPathFinder);
        let mut character = jumper(false);
        assert!(character.jump_to(Tile::new(7, 4), &env));
        assert_eq!(character.state(), CharacterState::Jump);
        assert!(!character.can_perform_action());

        // 192 px at 300 px/s, 15 px per tick. The one-frame animation is over
        // after two ticks; the flight continues on its last frame.
        for _ in 0..12 {
            character.update_jump(50.0, 50.0, &env);
        }
        assert!(character.is_jumping());
        assert_eq!(character.state(), CharacterState::Jump);
        assert_eq!(character.tile(), world_to_tile(character.position()));

        character.update_jump(50.0, 50.0, &env);
        assert_eq!(character.tile(), Tile::new(7, 4));
        assert_eq!(character.position(), tile_to_world(Tile::new(7, 4)));
        assert_eq!(character.state(), CharacterState::Stand);
        assert!(!character.is_jumping());
    }

    #[test]
    fn tile_follows_position_in_flight() {
        let map = GridMap::new(16, 12);
        let env = Env::new(&map, &GridPathFinder);
        let config = CharacterConfig::new("jumper")
            .with_basic_animations(&[CharacterState::Stand])
            .with_animation(CharacterState::Jump, AnimationSpec::new("jump", 20, 100));
        let mut character =
            Character::spawn(CharacterId(2), &config, Tile::new(4, 4), CoreConfig::default());
        assert!(character.jump_to(Tile::new(10, 4), &env));

        for _ in 0..4 {
            character.update_jump(100.0, 100.0, &env);
            assert_eq!(character.tile(), world_to_tile(character.position()));
        }
        assert_eq!(character.tile(), Tile::new(6, 4));
    }

    #[test]
    fn trap_underfoot_ends_jump_early() {
        let mut map = GridMap::new(16, 12);
        map.set_trap(Tile::new(8, 4), true);
        let env = Env::new(&map, &GridPathFinder);
        let mut character = jumper(false);
        assert!(character.jump_to(Tile::new(10, 4), &env));

        for _ in 0..30 {
            character.update_jump(50.0, 50.0, &env);
        }
        assert_eq!(character.tile(), Tile::new(8, 4));
        assert!(character.position().x < tile_to_world(Tile::new(8, 4)).x);
        assert_eq!(character.state(), CharacterState::Stand);
        assert!(!character.is_jumping());
    }

    struct Actor(Tile);

    impl Roster for Actor {
        fn is_alive(&self, _id: CharacterId) -> bool {
            true
        }

        fn tile_of(&self, _id: CharacterId) -> Option<Tile> {
            Some(self.0)
        }

        fn event_actor_at(&self, tile: Tile) -> bool {
            tile == self.0
        }
    }

    #[test]
    fn event_actor_on_landing_aborts_jump() {
        let map = GridMap::new(12, 12);
        let mut character = jumper(false);
        {
            let env = Env::new(&map, &GridPathFinder);
            assert!(character.jump_to(Tile::new(8, 4), &env));
            for _ in 0..7 {
                character.update_jump(50.0, 50.0, &env);
            }
        }
        // 105 px in: over tile (6, 4).
        assert_eq!(character.tile(), Tile::new(6, 4));

        let actor = Actor(Tile::new(8, 4));
        let env = Env::new(&map, &GridPathFinder).with_roster(&actor);
        character.update_jump(50.0, 50.0, &env);
        assert!(!character.is_jumping());
        assert_eq!(character.tile(), Tile::new(6, 4));
        assert_eq!(character.position(), tile_to_world(Tile::new(6, 4)));
        assert_eq!(character.state(), CharacterState::Stand);
    }

    #[test]
    fn aborted_jump_settles_on_last_safe_tile() {
        let mut map = GridMap::new(12, 12);
        map.set_obstacle(Tile::new(5, 4), ObstacleKind::Soft);
        let mut character = jumper(false);
        {
            let env = Env::new(&map, &GridPathFinder);
            assert!(character.jump_to(Tile::new(7, 4), &env));
            for _ in 0..4 {
                character.update_jump(50.0, 50.0, &env);
            }
        }
        // 60 px in: above the fence on (5, 4).
        assert_eq!(character.tile(), Tile::new(5, 4));

        map.set_obstacle(Tile::new(7, 4), ObstacleKind::Hard);
        let env = Env::new(&map, &GridPathFinder);
        character.update_jump(50.0, 50.0, &env);
        assert_eq!(character.tile(), Tile::new(4, 4));
        assert_eq!(character.position(), tile_to_world(Tile::new(4, 4)));
    }

    #[test]
    fn jump_aborts_when_landing_turns_hard() {
        let mut map = GridMap::new(12, 12);
        let mut character = jumper(false);
        {
            let env = Env::new(&map, &GridPathFinder);
            assert!(character.jump_to(Tile::new(7, 4), &env));
        }
        map.set_obstacle(Tile::new(7, 4), ObstacleKind::Hard);
        let env = Env::new(&map, &GridPathFinder);
        character.update_jump(10.0, 10.0, &env);
        assert_eq!(character.tile(), Tile::new(4, 4));
        assert_eq!(character.position(), tile_to_world(Tile::new(4, 4)));
        assert!(!character.is_jumping());
    }

    #[test]
    fn curve_move_runs_callback() {
        let map = GridMap::new(12, 12);
        let env = Env::new(&map, &GridPathFinder);
        let mut character = jumper(false);
        assert!(character.bezier_move_to(Tile::new(6, 4), 1_000.0, |c| c.set_hidden(true)));
        assert!(!character.can_perform_action());
        for _ in 0..20 {
            character.update_curve(50.0, &env);
        }
        assert!(!character.is_curve_moving());
        assert_eq!(character.tile(), Tile::new(6, 4));
        assert!(!character.is_draw());
    }
}
