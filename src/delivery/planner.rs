//! Greedy delivery planning: always drive to the nearest unvisited order.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand_chacha::ChaCha8Rng;

use super::bucket_sort::{bucket_sort, SortOrder};
use super::pathfinder::WalkableGrid;
use super::quadtree::{QuadTree, Rect};
use crate::city::{random_in_range, Cell, CityMap, Coord};
use crate::error::{CityError, Result};

/// One leg of the route, from the previous stop to a house.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub house: u32,
    pub path: Vec<Coord>,
}

impl Leg {
    pub fn from(&self) -> Option<Coord> {
        self.path.first().copied()
    }

    pub fn to(&self) -> Option<Coord> {
        self.path.last().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DeliveryPlan {
    /// Legs in driving order, the first one leaving the hub
    pub legs: Vec<Leg>,
    /// Orders with no walkable route from where the courier ended up
    pub unreachable: Vec<u32>,
}

impl DeliveryPlan {
    /// Cells driven over all legs (shared stops are counted once per leg).
    pub fn total_cells(&self) -> usize {
        self.legs.iter().map(|leg| leg.path.len()).sum()
    }
}

/// Pick a random number of distinct house ids to deliver to.
///
/// The count is drawn from `[min_orders, max_orders]` and capped at the
/// number of houses so the draw always terminates.
pub fn generate_orders(
    rng: &mut ChaCha8Rng,
    house_count: u32,
    min_orders: u32,
    max_orders: u32,
) -> Vec<u32> {
    if house_count == 0 {
        return Vec::new();
    }

    let wanted = random_in_range(rng, min_orders as i32, max_orders as i32).unwrap_or(min_orders as i32);
    let count = (wanted.max(0) as u32).min(house_count) as usize;

    let mut orders = Vec::with_capacity(count);
    while orders.len() < count {
        let house = random_in_range(rng, 1, house_count as i32).unwrap_or(1) as u32;
        if !orders.contains(&house) {
            orders.push(house);
        }
    }
    orders
}

/// Spatial index of everything standing on the map, tagged by cell.
pub fn index_map(map: &CityMap) -> QuadTree<Cell> {
    let side = map.side() as i32;
    let mut tree = QuadTree::new(Rect::new(0, 0, side, side));
    for (x, y, cell) in map.cells().iter() {
        if cell.is_walkable() {
            tree.insert(x as i32, y as i32, *cell);
        }
    }
    tree
}

/// Location of every house on the map, looked up through the spatial index.
pub fn house_index(tree: &QuadTree<Cell>) -> HashMap<u32, Coord> {
    tree.points()
        .into_iter()
        .filter_map(|p| p.data.house_id().map(|id| (id, Coord::new(p.y, p.x))))
        .collect()
}

/// Plan a route from the hub through every order, nearest stop first.
///
/// Ties go to the order listed first.
pub fn plan_route(map: &CityMap, orders: &[u32], sort_buckets: usize) -> Result<DeliveryPlan> {
    let hub = map.hub().ok_or(CityError::MissingHub)?;
    let houses = house_index(&index_map(map));
    let grid = WalkableGrid::from_map(map);

    let mut remaining: Vec<(u32, Coord)> = orders
        .iter()
        .map(|id| houses.get(id).map(|c| (*id, *c)).ok_or(CityError::UnknownHouse(*id)))
        .collect::<Result<_>>()?;

    let mut plan = DeliveryPlan::default();
    let mut current = hub;

    while !remaining.is_empty() {
        let routes: Vec<Option<Vec<Coord>>> = remaining
            .iter()
            .map(|(_, target)| grid.shortest_path(current, *target))
            .collect();

        let mut lengths: Vec<i64> = routes.iter().flatten().map(|p| p.len() as i64).collect();
        if lengths.is_empty() {
            plan.unreachable.extend(remaining.iter().map(|(id, _)| *id));
            break;
        }
        bucket_sort(&mut lengths, sort_buckets, SortOrder::Ascending);
        let shortest = lengths[0];

        let Some(next) = routes
            .iter()
            .position(|r| r.as_ref().is_some_and(|p| p.len() as i64 == shortest))
        else {
            break;
        };

        let (house, target) = remaining.remove(next);
        let path = routes.into_iter().nth(next).flatten().unwrap_or_default();
        log::debug!("leg to house {} at {}: {} cells", house, target, path.len());

        plan.legs.push(Leg { house, path });
        current = target;
    }

    Ok(plan)
}

/// Write every leg's cells as `x y` lines (column, then row).
pub fn write_route<W: Write>(plan: &DeliveryPlan, out: &mut W) -> std::io::Result<()> {
    for leg in &plan.legs {
        for coord in &leg.path {
            writeln!(out, "{} {}", coord.col, coord.row)?;
        }
    }
    Ok(())
}

pub fn save_route(plan: &DeliveryPlan, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| CityError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_route(plan, &mut out)
        .and_then(|_| out.flush())
        .map_err(|e| CityError::io(path, e))
}
