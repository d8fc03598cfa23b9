//! The city grid and its placement rules.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Coord, Direction};
use crate::tilemap::Tilemap;

/// Side of a small city (4^3).
pub const SMALL_CITY_SIDE: usize = 64;
/// Side of a large city (4^4).
pub const LARGE_CITY_SIDE: usize = 256;

/// The two supported city sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitySize {
    #[default]
    Small,
    Large,
}

impl CitySize {
    /// Map the numeric size selector onto a band: `<= 1` is small, anything larger is large.
    pub fn from_selector(selector: i64) -> Self {
        if selector <= 1 {
            CitySize::Small
        } else {
            CitySize::Large
        }
    }

    pub fn side(&self) -> usize {
        match self {
            CitySize::Small => SMALL_CITY_SIDE,
            CitySize::Large => LARGE_CITY_SIDE,
        }
    }
}

impl std::fmt::Display for CitySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Outcome of a placement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Placed,
    OutOfBounds,
    Occupied(Cell),
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed)
    }
}

/// Square city grid. Owns every cell plus the hub location and house counter.
#[derive(Clone, Debug, PartialEq)]
pub struct CityMap {
    cells: Tilemap<Cell>,
    house_count: u32,
    hub: Option<Coord>,
}

impl CityMap {
    /// An all-empty map for one of the two size bands.
    pub fn new(size: CitySize) -> Self {
        Self::with_side(size.side())
    }

    /// An all-empty map of arbitrary side. Mostly useful for tests and parsing.
    pub fn with_side(side: usize) -> Self {
        Self {
            cells: Tilemap::new_with(side, side, Cell::Empty),
            house_count: 0,
            hub: None,
        }
    }

    /// Rebuild a map from already classified cells (e.g. a parsed dump).
    ///
    /// The house count is taken from the highest id and the hub from the
    /// first hub cell in row-major order.
    pub fn from_cells(cells: Tilemap<Cell>) -> Self {
        let mut house_count = 0;
        let mut hub = None;
        for (x, y, cell) in cells.iter() {
            match cell {
                Cell::House(id) => house_count = house_count.max(*id),
                Cell::Hub if hub.is_none() => hub = Some(Coord::new(y as i32, x as i32)),
                _ => {}
            }
        }
        Self { cells, house_count, hub }
    }

    pub fn side(&self) -> usize {
        self.cells.width
    }

    pub fn house_count(&self) -> u32 {
        self.house_count
    }

    pub fn hub(&self) -> Option<Coord> {
        self.hub
    }

    pub fn cells(&self) -> &Tilemap<Cell> {
        &self.cells
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        self.cells.in_bounds(coord.col, coord.row)
    }

    /// Cell at `coord`, or `None` off the map.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.cells.try_get(coord.col, coord.row).copied()
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Cell::Empty)
    }

    pub fn is_road(&self, coord: Coord) -> bool {
        self.get(coord) == Some(Cell::Road)
    }

    pub fn is_house(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::House(_)))
    }

    /// In bounds and empty: the only cells growth may claim.
    pub fn is_valid(&self, coord: Coord) -> bool {
        self.is_empty(coord)
    }

    fn check_placeable(&self, coord: Coord) -> Placement {
        match self.get(coord) {
            None => Placement::OutOfBounds,
            Some(Cell::Empty) => Placement::Placed,
            Some(other) => Placement::Occupied(other),
        }
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells.set(coord.col as usize, coord.row as usize, cell);
    }

    /// Lay a road on an empty cell.
    pub fn place_road(&mut self, coord: Coord) -> Placement {
        let status = self.check_placeable(coord);
        if status.is_placed() {
            self.set(coord, Cell::Road);
        }
        status
    }

    /// Put the next house on the empty cell one step from `coord` in `dir`.
    pub fn place_house(&mut self, coord: Coord, dir: Direction) -> Placement {
        let target = coord.step(dir);
        let status = self.check_placeable(target);
        if status.is_placed() {
            self.house_count += 1;
            self.set(target, Cell::House(self.house_count));
        }
        status
    }

    /// Mark `coord` as the hub, overwriting whatever is there.
    ///
    /// A previously recorded hub is demoted to road so the map only ever
    /// carries one hub cell.
    pub fn place_hub(&mut self, coord: Coord) -> Placement {
        if !self.in_bounds(coord) {
            return Placement::OutOfBounds;
        }
        if let Some(previous) = self.hub.take() {
            if previous != coord {
                self.set(previous, Cell::Road);
            }
        }
        if let Some(Cell::House(_)) = self.get(coord) {
            log::warn!("hub placed over house at {}", coord);
        }
        self.set(coord, Cell::Hub);
        self.hub = Some(coord);
        Placement::Placed
    }

    pub fn road_count(&self) -> usize {
        self.cells.iter().filter(|(_, _, c)| **c == Cell::Road).count()
    }

    /// Coordinates of every house, indexed by `id - 1`.
    pub fn house_locations(&self) -> Vec<Coord> {
        let mut houses: Vec<(u32, Coord)> = self
            .cells
            .iter()
            .filter_map(|(x, y, c)| c.house_id().map(|id| (id, Coord::new(y as i32, x as i32))))
            .collect();
        houses.sort_unstable_by_key(|(id, _)| *id);
        houses.into_iter().map(|(_, coord)| coord).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_selector_bands() {
        assert_eq!(CitySize::from_selector(-4), CitySize::Small);
        assert_eq!(CitySize::from_selector(1), CitySize::Small);
        assert_eq!(CitySize::from_selector(2), CitySize::Large);
        assert_eq!(CitySize::from_selector(9), CitySize::Large);
        assert_eq!(CitySize::Large.side(), CitySize::Small.side() * 4);
    }

    #[test]
    fn test_place_road_only_on_empty_cells() {
        let mut map = CityMap::with_side(4);
        let c = Coord::new(1, 1);

        assert_eq!(map.place_road(c), Placement::Placed);
        assert!(map.is_road(c));
        assert_eq!(map.place_road(c), Placement::Occupied(Cell::Road));
        assert_eq!(map.place_road(Coord::new(4, 0)), Placement::OutOfBounds);
        assert_eq!(map.place_road(Coord::new(0, -1)), Placement::OutOfBounds);
    }

    #[test]
    fn test_house_ids_are_sequential() {
        let mut map = CityMap::with_side(4);
        let origin = Coord::new(1, 1);

        assert!(map.place_house(origin, Direction::North).is_placed());
        assert!(map.place_house(origin, Direction::East).is_placed());
        // occupied target leaves the counter untouched
        assert_eq!(
            map.place_house(origin, Direction::North),
            Placement::Occupied(Cell::House(1))
        );
        assert_eq!(map.place_house(Coord::new(0, 0), Direction::West), Placement::OutOfBounds);

        assert_eq!(map.house_count(), 2);
        assert_eq!(map.get(Coord::new(0, 1)), Some(Cell::House(1)));
        assert_eq!(map.get(Coord::new(1, 2)), Some(Cell::House(2)));
        assert_eq!(map.house_locations(), vec![Coord::new(0, 1), Coord::new(1, 2)]);
    }

    #[test]
    fn test_replacing_hub_keeps_a_single_hub_cell() {
        let mut map = CityMap::with_side(4);
        map.place_hub(Coord::new(0, 0));
        map.place_hub(Coord::new(3, 3));

        let hubs = map.cells().iter().filter(|(_, _, c)| **c == Cell::Hub).count();
        assert_eq!(hubs, 1);
        assert_eq!(map.hub(), Some(Coord::new(3, 3)));
        assert!(map.is_road(Coord::new(0, 0)));
    }

    #[test]
    fn test_from_cells_recovers_counters() {
        let mut cells = Tilemap::new_with(3, 3, Cell::Empty);
        cells.set(1, 1, Cell::Hub);
        cells.set(0, 2, Cell::House(2));
        cells.set(2, 0, Cell::House(1));

        let map = CityMap::from_cells(cells);
        assert_eq!(map.hub(), Some(Coord::new(1, 1)));
        assert_eq!(map.house_count(), 2);
        assert_eq!(map.house_locations(), vec![Coord::new(0, 2), Coord::new(2, 0)]);
    }
}
