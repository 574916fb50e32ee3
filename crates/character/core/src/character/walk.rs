//! Path following and the walk/run entry points.

use std::collections::VecDeque;

use super::{Character, CharacterState};
use crate::env::Env;
use crate::error::GameError;
use crate::geometry::{Direction, Pixel, Tile, tile_to_world, world_to_tile};
use crate::movement::{MoveError, WalkOutcome, distance_for, move_speed, step_toward};

/// Distance under which a position counts as exactly on a tile center.
const CENTER_EPSILON: f32 = 1e-3;

impl Character {
    /// Current movement speed in pixels per second, before state folds.
    pub fn move_speed(&self, fold: f32) -> f32 {
        move_speed(
            &self.core,
            self.walk_speed,
            self.move_speed_bonus_percent + self.status.speed_bonus_percent(),
            fold * self.status.speed_fold(&self.core),
        )
    }

    pub fn walk_to(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        let result = self.begin_path(destination, false, env);
        self.report_refusal("walk_to", destination, result)
    }

    pub fn run_to(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        let result = self.begin_path(destination, true, env);
        self.report_refusal("run_to", destination, result)
    }

    /// `walk_to` that keeps the pending attack and interaction targets.
    pub fn walk_to_keeping_target(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        let (attack, interactive) = (self.attack_target, self.interactive_target);
        let walking = self.walk_to(destination, env);
        self.attack_target = attack;
        self.interactive_target = interactive;
        walking
    }

    /// `run_to` that keeps the pending attack and interaction targets.
    pub fn run_to_keeping_target(&mut self, destination: Tile, env: &Env<'_>) -> bool {
        let (attack, interactive) = (self.attack_target, self.interactive_target);
        let running = self.run_to(destination, env);
        self.attack_target = attack;
        self.interactive_target = interactive;
        running
    }

    pub(crate) fn report_refusal(
        &self,
        action: &'static str,
        destination: Tile,
        result: Result<(), MoveError>,
    ) -> bool {
        match result {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(
                    id = %self.id,
                    action,
                    %destination,
                    code = error.error_code(),
                    %error,
                    "movement refused"
                );
                false
            }
        }
    }

    fn begin_path(&mut self, destination: Tile, run: bool, env: &Env<'_>) -> Result<(), MoveError> {
        if !self.can_perform_action() {
            return Err(MoveError::ActionBlocked);
        }
        if self.status.is_move_disabled() {
            return Err(MoveError::MovementDisabled);
        }
        if destination == self.tile {
            return Ok(());
        }
        if run
            && !self.has_animation(CharacterState::Run)
            && !self.has_animation(CharacterState::FightRun)
        {
            return Err(MoveError::MissingAnimation("run"));
        }

        let Some((path, destination)) = self.plan(destination, env) else {
            self.stand(env);
            return Err(MoveError::NoPath(destination));
        };

        self.path = path;
        self.destination = Some(destination);
        self.attack_target = None;
        self.interactive_target = None;
        let state = if run { self.run_state() } else { self.walk_state() };
        self.set_state(state, env);
        Ok(())
    }

    /// Plans a route from the current tile, falling back to a directional
    /// walk. Returns the waypoints after the current tile and the tile the
    /// route actually ends on.
    fn plan(&self, destination: Tile, env: &Env<'_>) -> Option<(VecDeque<Tile>, Tile)> {
        let paths = env.paths();
        let mut route = paths.find_path(
            self.tile,
            destination,
            self.path_quality,
            self.core.path_fan_out,
            env.map(),
        );
        if route.len() < 2 {
            tracing::debug!(
                id = %self.id,
                from = %self.tile,
                to = %destination,
                "falling back to directional walk"
            );
            route = paths.directional_path(self.tile, destination, env.map());
        }
        if route.len() < 2 {
            return None;
        }
        let end = route.last().copied()?;
        Some((route.into_iter().skip(1).collect(), end))
    }

    /// Advances along the waypoint queue for `dt` milliseconds.
    ///
    /// `fold` multiplies the speed (1 for walking, the run fold for running).
    pub fn walk_along_path(&mut self, dt: f32, fold: f32, run: bool, env: &Env<'_>) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        if self.path.is_empty() {
            let idle = self.idle_state();
            self.set_state(idle, env);
            return outcome;
        }

        let mut budget = distance_for(self.move_speed(fold), dt);
        while let Some(&next) = self.path.front() {
            if next != self.tile && env.map().is_obstacle_for_character(next) {
                self.handle_obstruction(next, env);
                return outcome;
            }

            let target = tile_to_world(next);
            if self.position.distance(target) < self.core.arrival_threshold {
                self.position = target;
                self.tile = next;
                self.path.pop_front();
                outcome.moved = true;
                if self.path.is_empty() {
                    self.arrive(env);
                    outcome.reached_destination = true;
                    return outcome;
                }
                continue;
            }
            if budget <= 0.0 {
                break;
            }

            if let Some(direction) = Direction::from_vector(target - self.position) {
                self.direction = direction;
            }
            let (position, leftover) = step_toward(self.position, target, budget);
            self.position = position;
            match leftover {
                Some(leftover) => {
                    budget = leftover;
                }
                None => {
                    budget = 0.0;
                    // Tile ownership passes over halfway between centers.
                    if position.distance(target) < position.distance(tile_to_world(self.tile)) {
                        self.tile = next;
                    }
                }
            }
        }

        if !self.path.is_empty() {
            let state = if run { self.run_state() } else { self.walk_state() };
            self.set_state(state, env);
        }
        outcome
    }

    fn arrive(&mut self, env: &Env<'_>) {
        let tile = self.tile;
        self.destination = None;
        let idle = self.idle_state();
        self.set_state(idle, env);
        self.hooks.on_reached_destination(tile);
    }

    /// Reacts to an obstacle that appeared on the next waypoint.
    fn handle_obstruction(&mut self, blocked: Tile, env: &Env<'_>) {
        tracing::debug!(id = %self.id, %blocked, tile = %self.tile, "waypoint obstructed");
        if self.path.back() == Some(&blocked) {
            self.stand(env);
            return;
        }

        let center = tile_to_world(self.tile);
        let at_center = self.position.distance(center) < CENTER_EPSILON;
        let replanned = match self.destination {
            Some(destination) if at_center => self.plan(destination, env),
            _ => None,
        };
        if let Some((path, end)) = replanned {
            tracing::debug!(id = %self.id, destination = %end, "re-planned around obstacle");
            self.path = path;
            self.destination = Some(end);
            return;
        }

        self.position = center;
        self.stand(env);
    }

    /// Moves along `direction` for `dt` milliseconds with no obstacle check.
    pub fn move_to_vector(&mut self, direction: Pixel, dt: f32) {
        if direction.is_zero() {
            return;
        }
        let step = direction.normalized() * distance_for(self.move_speed(1.0), dt);
        self.position = self.position + step;
        self.tile = world_to_tile(self.position);
        if let Some(facing) = Direction::from_vector(direction) {
            self.direction = facing;
        }
    }

    pub fn move_to_direction(&mut self, direction: Direction, dt: f32) {
        self.move_to_vector(direction.unit_vector(), dt);
    }
}
