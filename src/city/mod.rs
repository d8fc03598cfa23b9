//! Procedural city layout: a hub, highways, streets, neighborhoods and houses
//! grown on a square grid.

pub mod cell;
pub mod generator;
pub mod growth;
pub mod hub;
pub mod map;
pub mod probe;

pub use cell::{Cell, Coord, Direction};
pub use generator::{generate_city, generate_on, GenerationReport};
pub use growth::{random_in_range, Tier};
pub use map::{CityMap, CitySize, Placement};
