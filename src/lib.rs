//! City generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod city;
pub mod config;
pub mod delivery;
pub mod error;
pub mod logging;
pub mod map_export;
pub mod seeds;
pub mod tilemap;

pub use error::{CityError, Result};
