//! Delivery pass over a finished city: spatial index, routing and greedy
//! order planning.

pub mod bucket_sort;
pub mod pathfinder;
pub mod planner;
pub mod quadtree;

pub use pathfinder::WalkableGrid;
pub use planner::{generate_orders, plan_route, save_route, DeliveryPlan, Leg};
pub use quadtree::{QuadTree, Rect};
