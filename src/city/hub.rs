//! Hub placement: the origin every road grows out of.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::cell::{Coord, Direction};
use super::map::CityMap;
use super::probe::choose_optimal_direction;

/// Where the first highway starts and which way it heads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HubSeed {
    pub hub: Coord,
    /// Cell beside the hub where the highway begins
    pub start: Coord,
    pub heading: Direction,
}

/// Uniformly random coordinate on the map (row drawn first). May be occupied.
pub fn pick_random_spot(map: &CityMap, rng: &mut ChaCha8Rng) -> Coord {
    let side = map.side() as i32;
    let row = rng.gen_range(0..side);
    let col = rng.gen_range(0..side);
    Coord::new(row, col)
}

/// Drop the hub somewhere random and work out where the first highway goes.
///
/// The highway runs parallel to the most open direction, starting from the
/// first free cell beside the hub (east/west of it for a vertical heading,
/// north/south for a horizontal one). If neither side is free the last
/// candidate checked is used anyway.
pub fn build_hub(map: &mut CityMap, rng: &mut ChaCha8Rng) -> HubSeed {
    let hub = pick_random_spot(map, rng);
    map.place_hub(hub);

    let heading = choose_optimal_direction(map, hub, None).unwrap_or(Direction::North);
    let start = highway_start(map, hub, heading);

    log::debug!("hub at {}, highway starts at {} heading {}", hub, start, heading);

    HubSeed { hub, start, heading }
}

/// First free cell beside `hub` at right angles to `heading`.
fn highway_start(map: &CityMap, hub: Coord, heading: Direction) -> Coord {
    let mut start = hub;
    for side in heading.perpendicular() {
        start = hub.step(side);
        if map.is_valid(start) {
            break;
        }
    }
    start
}
