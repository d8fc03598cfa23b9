//! Recursive road growth.
//!
//! Highways, streets and neighborhoods all run the same walk: lay a road,
//! step forward, turn when space runs out, and every so often branch off
//! sideways into the next smaller tier. Neighborhoods branch into houses
//! instead of roads.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::cell::{Coord, Direction};
use super::map::CityMap;
use super::probe::{
    choose_optimal_direction, choose_sideways_direction, has_too_many_adjacent_roads,
    probe_bounds, probe_direction,
};

/// Remaining headroom (in cells) at which a road turns.
const TURN_HEADROOM: i32 = 3;

/// Growth tier, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    Highway,
    Street,
    Neighborhood,
}

/// What a tier produces when it branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spawn {
    Road(Tier),
    House,
}

/// Branching behaviour of a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierParams {
    /// Each step rolls `1..=roll_max`; a 1 arms the next branch.
    pub roll_max: i32,
    /// Steps since the last branch before an armed branch may fire.
    pub min_gap: i32,
    /// Steps since the last branch after which a branch fires regardless.
    pub forced_gap: i32,
    pub spawn: Spawn,
}

impl Tier {
    pub fn params(self) -> TierParams {
        match self {
            Tier::Highway => TierParams {
                roll_max: 12,
                min_gap: 6,
                forced_gap: 12,
                spawn: Spawn::Road(Tier::Street),
            },
            Tier::Street => TierParams {
                roll_max: 8,
                min_gap: 3,
                forced_gap: 6,
                spawn: Spawn::Road(Tier::Neighborhood),
            },
            Tier::Neighborhood => TierParams {
                roll_max: 3,
                min_gap: 1,
                forced_gap: 2,
                spawn: Spawn::House,
            },
        }
    }

    /// Inclusive length range for a segment with `free` empty cells ahead.
    /// May be inverted (`min > max`) for short runs.
    pub fn length_bounds(self, free: i32) -> (i32, i32) {
        match self {
            Tier::Highway => (free * 2, free * 4),
            Tier::Street => (free / 2, free - 3),
            Tier::Neighborhood => (free / 8, free / 2),
        }
    }

    /// Draw a maximum length for a segment starting at `coord` heading `dir`.
    ///
    /// An inverted range yields 0, which stops the segment after its first cell.
    pub fn sample_length(
        self,
        map: &CityMap,
        coord: Coord,
        dir: Direction,
        rng: &mut ChaCha8Rng,
    ) -> i32 {
        let free = probe_direction(map, coord, dir);
        let (min, max) = self.length_bounds(free);
        random_in_range(rng, min, max).unwrap_or(0)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Highway => write!(f, "highway"),
            Tier::Street => write!(f, "street"),
            Tier::Neighborhood => write!(f, "neighborhood"),
        }
    }
}

/// Uniform integer in `[min, max]`, or `None` when the range is empty.
pub fn random_in_range(rng: &mut ChaCha8Rng, min: i32, max: i32) -> Option<i32> {
    if min > max {
        return None;
    }
    Some(rng.gen_range(min..=max))
}

/// Why a segment stopped growing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The last cell touched more than two roads.
    Crowded,
    /// The next step would leave the map.
    OutOfBounds,
    /// The segment used up its length.
    LengthExhausted,
}

/// Grow one segment of `tier` from `start`, recursing into branches.
pub fn grow(
    map: &mut CityMap,
    tier: Tier,
    start: Coord,
    heading: Direction,
    max_length: i32,
    rng: &mut ChaCha8Rng,
) -> Termination {
    let params = tier.params();
    let mut position = start;
    let mut direction = heading;
    let mut travelled = 0;
    let mut since_branch = 0;
    let mut branch_ready = false;

    loop {
        let _ = map.place_road(position);

        if has_too_many_adjacent_roads(map, position) {
            return Termination::Crowded;
        }

        position = position.step(direction);
        if !map.in_bounds(position) {
            return Termination::OutOfBounds;
        }
        if travelled > max_length {
            return Termination::LengthExhausted;
        }

        // A turn counts as a branch; without the reset roads bunch up at corners.
        if probe_bounds(map, position, direction) <= TURN_HEADROOM {
            if let Some(turn) = choose_optimal_direction(map, position, Some(direction)) {
                direction = turn;
            }
            since_branch = 0;
        }

        if rng.gen_range(1..=params.roll_max) == 1 {
            branch_ready = true;
        }

        if (branch_ready && since_branch >= params.min_gap) || since_branch > params.forced_gap {
            let side = choose_sideways_direction(direction, rng);
            match params.spawn {
                Spawn::Road(child) => {
                    let branch_start = position.step(side);
                    let length = child.sample_length(map, branch_start, side, rng);
                    let end = grow(map, child, branch_start, side, length, rng);
                    log::trace!("{} from {} ended: {:?}", child, branch_start, end);
                }
                Spawn::House => {
                    let _ = map.place_house(position, side);
                }
            }
            since_branch = 0;
            branch_ready = false;
        }

        since_branch += 1;
        travelled += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::cell::Cell;
    use rand::SeedableRng;

    #[test]
    fn test_length_bounds_per_tier() {
        assert_eq!(Tier::Highway.length_bounds(10), (20, 40));
        assert_eq!(Tier::Street.length_bounds(10), (5, 7));
        assert_eq!(Tier::Neighborhood.length_bounds(16), (2, 8));
    }

    #[test]
    fn test_short_neighborhood_gets_zero_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut map = CityMap::with_side(8);
        // Two free cells west of (0, 2): d = 2 -> [0, 1]
        assert!((0..=1).contains(&Tier::Neighborhood.sample_length(
            &map,
            Coord::new(0, 2),
            Direction::West,
            &mut rng
        )));

        // d = 1 -> [0, 0]
        for _ in 0..16 {
            assert_eq!(
                Tier::Neighborhood.sample_length(&map, Coord::new(0, 1), Direction::West, &mut rng),
                0
            );
        }

        // Street with d = 4 -> [2, 1], inverted
        map.place_road(Coord::new(5, 0));
        assert_eq!(Tier::Street.length_bounds(4), (2, 1));
        assert_eq!(
            Tier::Street.sample_length(&map, Coord::new(0, 0), Direction::South, &mut rng),
            0
        );
    }

    #[test]
    fn test_random_in_range_rejects_inverted_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(random_in_range(&mut rng, 5, 4), None);
        assert_eq!(random_in_range(&mut rng, 4, 4), Some(4));
        for _ in 0..64 {
            let v = random_in_range(&mut rng, -2, 2).unwrap();
            assert!((-2..=2).contains(&v));
        }
    }

    #[test]
    fn test_first_step_always_lays_a_road() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut map = CityMap::with_side(16);
        let start = Coord::new(8, 8);

        grow(&mut map, Tier::Street, start, Direction::East, 0, &mut rng);
        assert_eq!(map.get(start), Some(Cell::Road));
    }

    #[test]
    fn test_zero_length_segment_stops_after_two_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut map = CityMap::with_side(16);

        // travelled starts at 0, so a zero-length segment lays two cells.
        let end = grow(&mut map, Tier::Neighborhood, Coord::new(8, 2), Direction::East, 0, &mut rng);
        assert_eq!(end, Termination::LengthExhausted);
        assert!(map.is_road(Coord::new(8, 2)));
        assert!(map.is_road(Coord::new(8, 3)));
        assert!(map.is_empty(Coord::new(8, 4)));
    }

    #[test]
    fn test_crowded_cell_terminates_segment() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut map = CityMap::with_side(8);
        let start = Coord::new(4, 4);
        for coord in [Coord::new(3, 4), Coord::new(5, 4), Coord::new(4, 3)] {
            map.place_road(coord);
        }

        let end = grow(&mut map, Tier::Highway, start, Direction::East, 100, &mut rng);
        assert_eq!(end, Termination::Crowded);
        assert!(map.is_road(start));
        assert!(map.is_empty(Coord::new(4, 5)));
    }

    #[test]
    fn test_leaving_the_map_terminates_segment() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut map = CityMap::with_side(8);

        let end = grow(&mut map, Tier::Neighborhood, Coord::new(0, 0), Direction::North, 50, &mut rng);
        assert_eq!(end, Termination::OutOfBounds);
        assert!(map.is_road(Coord::new(0, 0)));
    }

    #[test]
    fn test_neighborhood_places_houses_beside_road() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut map = CityMap::with_side(64);

        grow(&mut map, Tier::Neighborhood, Coord::new(32, 4), Direction::East, 20, &mut rng);

        // forced gap guarantees a branch at least every few steps
        assert!(map.house_count() > 0);
        for (i, house) in map.house_locations().into_iter().enumerate() {
            assert_eq!(map.get(house), Some(Cell::House(i as u32 + 1)));
            let touches_road = Direction::ALL.iter().any(|d| map.is_road(house.step(*d)));
            assert!(touches_road, "house {} is not beside a road", house);
        }
    }
}
