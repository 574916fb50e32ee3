use std::collections::HashSet;

use super::can_move_in_direction;
use crate::env::MapOracle;
use crate::geometry::{Direction, Tile, neighbors, tile_distance, tile_to_world};

/// Upper bound on directional steps; distance shrinks every step so this is
/// only reached on absurdly distant goals.
const MAX_DIRECTIONAL_STEPS: usize = 1024;

/// Directions out of `tile` that a character cannot take.
///
/// A blocked neighbor blocks its own direction. A hard obstacle on a diagonal
/// additionally blocks the two axis directions flanking it, so characters
/// cannot squeeze past wall corners.
pub fn blocked_directions(map: &dyn MapOracle, tile: Tile) -> [bool; 8] {
    let mut blocked = [false; 8];
    for (index, neighbor) in neighbors(tile).into_iter().enumerate() {
        if !map.is_obstacle_for_character(neighbor) {
            continue;
        }
        blocked[index] = true;
        if index % 2 == 1 && map.is_hard_obstacle(neighbor) {
            blocked[(index + 7) % 8] = true;
            blocked[(index + 1) % 8] = true;
        }
    }
    blocked
}

/// Candidate directions in priority order: facing first, then fanning out to
/// both sides, the opposite last.
fn fan(target: Direction) -> [Direction; 8] {
    [
        target,
        target.rotated(1),
        target.rotated(-1),
        target.rotated(2),
        target.rotated(-2),
        target.rotated(3),
        target.rotated(-3),
        target.opposite(),
    ]
}

/// Greedy stepping toward `goal` for at most `steps` tiles, never revisiting
/// a tile. The path need not reach the goal.
pub fn greedy_walk(
    map: &dyn MapOracle,
    start: Tile,
    goal: Tile,
    steps: u32,
    fan_out: u8,
) -> Vec<Tile> {
    let mut path = vec![start];
    let mut visited = HashSet::from([start]);
    let mut current = start;

    for _ in 0..steps {
        let Some(target) = Direction::from_vector(tile_to_world(goal) - tile_to_world(current))
        else {
            break;
        };
        let around = neighbors(current);
        let blocked = blocked_directions(map, current);
        let next = fan(target).into_iter().find_map(|direction| {
            let index = direction.index();
            let tile = around[index];
            (!blocked[index] && can_move_in_direction(index, fan_out) && !visited.contains(&tile))
                .then_some(tile)
        });
        let Some(next) = next else {
            break;
        };
        current = next;
        visited.insert(current);
        path.push(current);
        if current == goal {
            break;
        }
    }

    if path.len() < 2 { Vec::new() } else { path }
}

/// Walks toward `goal` for as long as some open neighbor is strictly closer.
pub fn directional_walk(map: &dyn MapOracle, start: Tile, goal: Tile) -> Vec<Tile> {
    let mut path = vec![start];
    let mut current = start;

    while current != goal && path.len() < MAX_DIRECTIONAL_STEPS {
        let Some(target) = Direction::from_vector(tile_to_world(goal) - tile_to_world(current))
        else {
            break;
        };
        let remaining = tile_distance(current, goal);
        let around = neighbors(current);
        let blocked = blocked_directions(map, current);
        let next = fan(target).into_iter().take(5).find_map(|direction| {
            let index = direction.index();
            let tile = around[index];
            (!blocked[index] && tile_distance(tile, goal) < remaining).then_some(tile)
        });
        let Some(next) = next else {
            break;
        };
        current = next;
        path.push(current);
    }

    if path.len() < 2 { Vec::new() } else { path }
}
