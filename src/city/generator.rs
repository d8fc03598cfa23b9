//! Top-level city generation.

use rand_chacha::ChaCha8Rng;

use super::cell::{Coord, Direction};
use super::growth::{grow, Tier};
use super::hub::{build_hub, HubSeed};
use super::map::{CityMap, CitySize};
use crate::error::{CityError, Result};

/// Highway attempts from one hub before the hub is moved.
pub const MAX_HIGHWAY_ATTEMPTS: u32 = 64;

/// Hub placements before a map is given up on as barren.
pub const MAX_HUB_PLACEMENTS: u32 = 16;

/// Summary of a finished generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    pub hub: Coord,
    pub highway_start: Coord,
    pub highway_heading: Direction,
    pub highway_length: i32,
    /// Total highway growth calls across all hubs
    pub highway_attempts: u32,
    pub hub_placements: u32,
    pub house_count: u32,
    pub road_count: usize,
}

/// Generate a city of the given size from `rng`.
pub fn generate_city(size: CitySize, rng: &mut ChaCha8Rng) -> Result<(CityMap, GenerationReport)> {
    let mut map = CityMap::new(size);
    let report = generate_on(&mut map, rng)?;
    Ok((map, report))
}

/// Grow a city on an existing (normally empty) map until it has a house.
///
/// The same highway is regrown from the same start while no house exists;
/// each attempt consumes fresh randomness and can reach new ground through
/// its branches. If a hub stays barren for [`MAX_HIGHWAY_ATTEMPTS`] the hub
/// is placed again. Maps too small to ever hold a house fail with
/// [`CityError::Barren`] after [`MAX_HUB_PLACEMENTS`] hubs.
pub fn generate_on(map: &mut CityMap, rng: &mut ChaCha8Rng) -> Result<GenerationReport> {
    grow_from_hubs(map, rng, build_hub)
}

fn grow_from_hubs<F>(map: &mut CityMap, rng: &mut ChaCha8Rng, mut next_hub: F) -> Result<GenerationReport>
where
    F: FnMut(&mut CityMap, &mut ChaCha8Rng) -> HubSeed,
{
    let mut highway_attempts = 0;

    for hub_placements in 1..=MAX_HUB_PLACEMENTS {
        let HubSeed { hub, start, heading } = next_hub(map, rng);

        let highway_length = Tier::Highway.sample_length(map, start, heading, rng);

        for _ in 0..MAX_HIGHWAY_ATTEMPTS {
            let end = grow(map, Tier::Highway, start, heading, highway_length, rng);
            highway_attempts += 1;
            log::debug!(
                "highway attempt {} ended {:?}, {} houses",
                highway_attempts,
                end,
                map.house_count()
            );

            if map.house_count() > 0 {
                let report = GenerationReport {
                    hub,
                    highway_start: start,
                    highway_heading: heading,
                    highway_length,
                    highway_attempts,
                    hub_placements,
                    house_count: map.house_count(),
                    road_count: map.road_count(),
                };
                log::info!(
                    "generated {}x{} city: {} houses, {} roads, {} highway attempts",
                    map.side(),
                    map.side(),
                    report.house_count,
                    report.road_count,
                    report.highway_attempts
                );
                return Ok(report);
            }
        }

        log::warn!("hub at {} produced no houses, placing a new hub", hub);
    }

    Err(CityError::Barren {
        side: map.side(),
        hub_placements: MAX_HUB_PLACEMENTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::cell::Cell;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn assert_house_ids_contiguous(map: &CityMap) {
        let ids: Vec<u32> = map.cells().iter().filter_map(|(_, _, c)| c.house_id()).collect();
        let unique: HashSet<u32> = ids.iter().copied().collect();

        assert_eq!(ids.len(), map.house_count() as usize);
        assert_eq!(unique.len(), ids.len());
        assert!(ids.iter().all(|id| (1..=map.house_count()).contains(id)));
    }

    fn hub_cells(map: &CityMap) -> usize {
        map.cells().iter().filter(|(_, _, c)| **c == Cell::Hub).count()
    }

    #[test]
    fn test_small_city_has_houses_and_one_hub() {
        for seed in [1u64, 2, 3, 42, 1000] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let (map, report) = generate_city(CitySize::Small, &mut rng).unwrap();

            assert_eq!(map.side(), 64);
            assert!(map.house_count() >= 1);
            assert_eq!(report.house_count, map.house_count());
            assert_eq!(map.hub(), Some(report.hub));

            assert_eq!(hub_cells(&map), 1);
            assert_house_ids_contiguous(&map);
        }
    }

    #[test]
    fn test_large_city_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let (map, report) = generate_city(CitySize::Large, &mut rng).unwrap();

        assert_eq!(map.side(), 256);
        assert!(report.house_count >= 1);
        assert_house_ids_contiguous(&map);
    }

    #[test]
    fn test_generation_is_reproducible() {
        let (a, report_a) = generate_city(CitySize::Small, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        let (b, report_b) = generate_city(CitySize::Small, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();

        assert_eq!(report_a, report_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_highway_starts_on_the_hub_seed() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let (map, report) = generate_city(CitySize::Small, &mut rng).unwrap();

        assert_eq!(report.hub_placements, 1);
        assert_eq!(map.get(report.highway_start), Some(Cell::Road));
        assert!(report.road_count > 0);
    }

    #[test]
    fn test_tiny_maps_fail_as_barren() {
        for side in [1usize, 2] {
            let mut map = CityMap::with_side(side);
            let result = generate_on(&mut map, &mut ChaCha8Rng::seed_from_u64(1));

            match result {
                Err(CityError::Barren { side: s, hub_placements }) => {
                    assert_eq!(s, side);
                    assert_eq!(hub_placements, MAX_HUB_PLACEMENTS);
                }
                other => panic!("expected a barren map, got {:?}", other),
            }
            assert_eq!(map.house_count(), 0);
            assert_eq!(hub_cells(&map), 1);
        }
    }

    #[test]
    fn test_barren_hub_is_replaced_and_demoted() {
        let barren = Coord::new(0, 0);
        let mut placed = 0;
        // First hub sits in a corner with its highway starting off the map.
        let next_hub = |map: &mut CityMap, rng: &mut ChaCha8Rng| {
            placed += 1;
            if placed == 1 {
                map.place_hub(barren);
                HubSeed {
                    hub: barren,
                    start: Coord::new(-1, 0),
                    heading: Direction::North,
                }
            } else {
                build_hub(map, rng)
            }
        };

        let mut map = CityMap::new(CitySize::Small);
        let report = grow_from_hubs(&mut map, &mut ChaCha8Rng::seed_from_u64(3), next_hub).unwrap();

        assert!(report.hub_placements > 1);
        assert!(report.highway_attempts > MAX_HIGHWAY_ATTEMPTS);
        assert_ne!(report.hub, barren);
        assert_eq!(map.hub(), Some(report.hub));
        assert_eq!(map.get(barren), Some(Cell::Road));
        assert_eq!(hub_cells(&map), 1);
        assert!(map.house_count() >= 1);
        assert_house_ids_contiguous(&map);
    }
}
