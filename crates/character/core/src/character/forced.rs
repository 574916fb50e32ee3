//! Movement imposed by a magic sprite.

use super::Character;
use crate::env::{Env, SpriteId};
use crate::geometry::{Pixel, line_tiles, tile_to_world, world_to_tile};
use crate::movement::{ForcedMode, ForcedMovement, release_tile};

impl Character {
    /// Attaches the character rigidly to a sprite at `offset` from it.
    pub fn carry_by(&mut self, sprite: SpriteId, offset: Pixel) {
        self.attach(ForcedMovement::carry(sprite, offset));
    }

    /// Lets a sprite pull the character along behind it.
    pub fn drag_by(&mut self, sprite: SpriteId) {
        self.attach(ForcedMovement::drag(sprite));
    }

    fn attach(&mut self, forced: ForcedMovement) {
        if self.is_death_invoked() {
            return;
        }
        self.path.clear();
        self.destination = None;
        self.forced = Some(forced);
    }

    /// Ends forced movement without moving the character.
    pub fn detach(&mut self) {
        self.forced = None;
    }

    pub(crate) fn update_forced(&mut self, env: &Env<'_>) {
        let Some(mut forced) = self.forced else {
            return;
        };
        let sprite = env
            .sprites()
            .sprite(forced.sprite)
            .filter(|sprite| !sprite.is_finished);
        let Some(sprite) = sprite else {
            self.release(forced, env);
            return;
        };
        if !sprite.direction.is_zero() {
            forced.last_direction = sprite.direction;
        }

        let map = env.map();
        let (target, tile) = match forced.mode {
            ForcedMode::Carry { offset } => {
                let target = sprite.position + offset;
                let tile = world_to_tile(target);
                if tile != self.tile && map.is_obstacle_for_character(tile) {
                    tracing::debug!(id = %self.id, %tile, "carried into obstacle, detaching");
                    self.settle();
                    return;
                }
                (target, tile)
            }
            ForcedMode::Drag => {
                let tile = world_to_tile(sprite.position);
                let blocked = line_tiles(self.tile, tile)
                    .into_iter()
                    .skip(1)
                    .any(|step| map.is_obstacle_for_character(step));
                if blocked {
                    tracing::debug!(id = %self.id, %tile, "drag line blocked, detaching");
                    self.settle();
                    return;
                }
                (sprite.position, tile)
            }
        };

        self.position = target;
        self.tile = tile;
        self.forced = Some(forced);
    }

    /// Sprite is gone: step off an obstacle tile if needed and detach.
    fn release(&mut self, forced: ForcedMovement, env: &Env<'_>) {
        let map = env.map();
        if map.is_obstacle_for_character(self.tile) {
            if let Some(safe) =
                release_tile(map, self.tile, forced.last_direction, self.core.release_probe_tiles)
            {
                tracing::debug!(
                    id = %self.id,
                    from = %self.tile,
                    to = %safe,
                    "released onto open tile"
                );
                self.tile = safe;
            }
        }
        self.settle();
    }

    fn settle(&mut self) {
        self.position = tile_to_world(self.tile);
        self.forced = None;
    }
}
