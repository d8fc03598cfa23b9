//! Shortest walking routes over a finished map.

use pathfinding::prelude::dijkstra;

use crate::city::{CityMap, Coord};
use crate::tilemap::Tilemap;

/// Which cells a courier can stand on. Built once per map.
pub struct WalkableGrid {
    walkable: Tilemap<bool>,
}

impl WalkableGrid {
    /// Every non-empty cell (road, hub or house) is walkable.
    pub fn from_map(map: &CityMap) -> Self {
        let side = map.side();
        let mut walkable = Tilemap::new(side, side);
        for (x, y, cell) in map.cells().iter() {
            walkable.set(x, y, cell.is_walkable());
        }
        Self { walkable }
    }

    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.walkable.try_get(coord.col, coord.row).copied().unwrap_or(false)
    }

    /// Walkable neighbors of an in-bounds cell, each one step away.
    fn successors(&self, coord: &Coord) -> Vec<(Coord, u32)> {
        self.walkable
            .neighbors(coord.col as usize, coord.row as usize)
            .into_iter()
            .filter(|&(x, y)| *self.walkable.get(x, y))
            .map(|(x, y)| (Coord::new(y as i32, x as i32), 1))
            .collect()
    }

    /// Shortest 4-connected path from `start` to `goal`, both ends included.
    pub fn shortest_path(&self, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
        if !self.is_walkable(start) || !self.is_walkable(goal) {
            return None;
        }
        dijkstra(&start, |c| self.successors(c), |c| *c == goal).map(|(path, _)| path)
    }
}
