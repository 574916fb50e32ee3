use std::cell::Cell;

use pathfinding::prelude::astar;

use super::step::{blocked_directions, directional_walk, greedy_walk};
use super::{PathFinder, PathQuality, can_move_in_direction};
use crate::env::MapOracle;
use crate::geometry::{Tile, line_tiles, neighbors, tile_distance};

/// Built-in planner over the brick neighbor graph.
///
/// Perfect modes run A* with pixel-distance edge costs. The simple mode runs
/// the same search with zero edge costs, which degenerates into greedy
/// best-first ordering by distance to the goal. Both stop after the mode's
/// expansion budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridPathFinder;

impl GridPathFinder {
    pub fn new() -> Self {
        Self
    }

    fn search(
        &self,
        start: Tile,
        goal: Tile,
        budget: u32,
        weighted: bool,
        fan_out: u8,
        map: &dyn MapOracle,
    ) -> Vec<Tile> {
        let expansions = Cell::new(0u32);
        let result = astar(
            &start,
            |&tile| {
                if expansions.get() >= budget {
                    return Vec::new();
                }
                expansions.set(expansions.get() + 1);
                let blocked = blocked_directions(map, tile);
                neighbors(tile)
                    .into_iter()
                    .enumerate()
                    .filter(|&(index, _)| !blocked[index] && can_move_in_direction(index, fan_out))
                    .map(|(_, next)| {
                        let cost = if weighted { step_cost(tile, next) } else { 0 };
                        (next, cost)
                    })
                    .collect::<Vec<_>>()
            },
            |&tile| tile_distance(tile, goal) as u32,
            |&tile| tile == goal,
        );

        match result {
            Some((path, _)) => path,
            None => {
                tracing::debug!(
                    %start,
                    %goal,
                    expansions = expansions.get(),
                    "path search exhausted"
                );
                Vec::new()
            }
        }
    }
}

fn step_cost(from: Tile, to: Tile) -> u32 {
    tile_distance(from, to).round() as u32
}

impl PathFinder for GridPathFinder {
    fn find_path(
        &self,
        start: Tile,
        goal: Tile,
        quality: PathQuality,
        fan_out: u8,
        map: &dyn MapOracle,
    ) -> Vec<Tile> {
        if start == goal || map.is_obstacle_for_character(goal) {
            return Vec::new();
        }

        match quality {
            PathQuality::StraightLine => line_tiles(start, goal),
            PathQuality::OneStep => greedy_walk(map, start, goal, 10, fan_out),
            PathQuality::SimpleMaxNpcTry => self.search(start, goal, 100, false, fan_out, map),
            PathQuality::PerfectMaxNpcTry => self.search(start, goal, 100, true, fan_out, map),
            PathQuality::PerfectMaxPlayerTry => self.search(start, goal, 500, true, fan_out, map),
        }
    }

    fn directional_path(&self, start: Tile, goal: Tile, map: &dyn MapOracle) -> Vec<Tile> {
        directional_walk(map, start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, ObstacleKind};

    fn assert_walkable(path: &[Tile], map: &GridMap) {
        for pair in path.windows(2) {
            assert!(neighbors(pair[0]).contains(&pair[1]), "{} -> {}", pair[0], pair[1]);
        }
        for tile in &path[1..] {
            assert!(!map.is_obstacle_for_character(*tile), "path crosses {tile}");
        }
    }

    #[test]
    fn same_tile_and_blocked_goal_are_empty() {
        let mut map = GridMap::new(20, 20);
        let finder = GridPathFinder::new();
        let tile = Tile::new(3, 3);
        assert!(finder.find_path(tile, tile, PathQuality::PerfectMaxNpcTry, 8, &map).is_empty());

        map.set_obstacle(Tile::new(6, 3), ObstacleKind::Soft);
        assert!(
            finder
                .find_path(tile, Tile::new(6, 3), PathQuality::PerfectMaxNpcTry, 8, &map)
                .is_empty()
        );
    }

    #[test]
    fn perfect_search_routes_around_wall() {
        let mut map = GridMap::new(16, 20);
        for y in 6..14 {
            map.set_obstacle(Tile::new(8, y), ObstacleKind::Hard);
        }
        let start = Tile::new(5, 10);
        let goal = Tile::new(11, 10);
        let path = GridPathFinder.find_path(start, goal, PathQuality::PerfectMaxPlayerTry, 8, &map);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_walkable(&path, &map);
    }

    #[test]
    fn goal_step_obeys_corner_and_fan_out_rules() {
        let mut map = GridMap::new(20, 20);
        let start = Tile::new(5, 6);
        // Hard corner to the north-east closes the direct east step.
        map.set_obstacle(Tile::new(5, 5), ObstacleKind::Hard);
        let path = GridPathFinder.find_path(
            start,
            Tile::new(6, 6),
            PathQuality::PerfectMaxNpcTry,
            8,
            &map,
        );
        assert_eq!(path, vec![start, Tile::new(5, 7), Tile::new(6, 6)]);

        // Axis-only movement never changes row parity.
        let axis = GridPathFinder.find_path(
            start,
            Tile::new(5, 7),
            PathQuality::PerfectMaxNpcTry,
            4,
            &map,
        );
        assert!(axis.is_empty());
    }

    #[test]
    fn simple_search_finds_open_path() {
        let map = GridMap::new(20, 20);
        let start = Tile::new(2, 2);
        let goal = Tile::new(6, 9);
        let path = GridPathFinder.find_path(start, goal, PathQuality::SimpleMaxNpcTry, 8, &map);
        assert_eq!(path.last(), Some(&goal));
        assert_walkable(&path, &map);
    }

    #[test]
    fn budget_exhaustion_gives_up() {
        let mut map = GridMap::new(40, 40);
        // Enclose the goal completely.
        let goal = Tile::new(30, 30);
        for tile in neighbors(goal) {
            map.set_obstacle(tile, ObstacleKind::Wall);
        }
        let path =
            GridPathFinder.find_path(Tile::new(2, 2), goal, PathQuality::PerfectMaxNpcTry, 8, &map);
        assert!(path.is_empty());
    }

    #[test]
    fn straight_line_ignores_obstacles() {
        let mut map = GridMap::new(20, 20);
        map.set_obstacle(Tile::new(4, 2), ObstacleKind::Hard);
        let path = GridPathFinder.find_path(
            Tile::new(2, 2),
            Tile::new(6, 2),
            PathQuality::StraightLine,
            8,
            &map,
        );
        assert!(path.contains(&Tile::new(4, 2)));
        assert_eq!(path.len(), 5);
    }
}
