//! Read-only probes that measure free space and pick headings.
//!
//! Nothing here mutates the map; all functions take `&CityMap`.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::cell::{Coord, Direction};
use super::map::CityMap;

/// More road neighbours than this means we ran alongside another road.
pub const MAX_ADJACENT_ROADS: usize = 2;

/// Count empty cells in a straight line, starting one step away from `coord`.
pub fn probe_direction(map: &CityMap, coord: Coord, dir: Direction) -> i32 {
    let mut next = coord.step(dir);
    let mut distance = 0;
    while map.is_valid(next) {
        next = next.step(dir);
        distance += 1;
    }
    distance
}

/// Distance to the map edge or the first house, whichever comes first.
///
/// Roads and the hub do not stop the probe, so a road may run into
/// another one and join it.
pub fn probe_bounds(map: &CityMap, coord: Coord, dir: Direction) -> i32 {
    let mut next = coord.step(dir);
    let mut distance = 0;
    while map.in_bounds(next) && !map.is_house(next) {
        next = next.step(dir);
        distance += 1;
    }
    distance
}

/// Direction with the longest empty run, excluding `current`.
///
/// With no current heading all four directions are candidates. Ties go to
/// the first direction in N, S, E, W order. Returns `None` when every
/// candidate is blocked immediately.
pub fn choose_optimal_direction(
    map: &CityMap,
    coord: Coord,
    current: Option<Direction>,
) -> Option<Direction> {
    let mut best = None;
    let mut best_len = 0;

    for dir in Direction::ALL {
        if Some(dir) == current {
            continue;
        }
        let len = probe_direction(map, coord, dir);
        if len > best_len {
            best_len = len;
            best = Some(dir);
        }
    }

    best
}

/// Pick one of the two perpendicular directions uniformly at random.
pub fn choose_sideways_direction(current: Direction, rng: &mut ChaCha8Rng) -> Direction {
    let options = current.perpendicular();
    options[rng.gen_range(0..options.len())]
}

/// Number of in-bounds road cells sharing an edge with `coord`.
pub fn count_adjacent_roads(map: &CityMap, coord: Coord) -> usize {
    Direction::ALL
        .iter()
        .filter(|dir| map.is_road(coord.step(**dir)))
        .count()
}

/// Parallel-road guard used by the growth loop.
pub fn has_too_many_adjacent_roads(map: &CityMap, coord: Coord) -> bool {
    count_adjacent_roads(map, coord) > MAX_ADJACENT_ROADS
}
