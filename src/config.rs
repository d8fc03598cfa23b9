//! Run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::city::CitySize;
use crate::error::{CityError, Result};

/// Configuration for one generator run.
///
/// Branch probabilities and tier thresholds are fixed; only the size band,
/// seed, output locations and the delivery pass are tunable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Size selector: `<= 1` small (64x64), `>= 2` large (256x256).
    pub size: i64,

    /// Master seed (random if not set).
    pub seed: Option<u64>,

    /// Where the map dump is written.
    pub map_output: PathBuf,

    /// Where the delivery route is written.
    pub route_output: PathBuf,

    /// Run the delivery planner after generation.
    pub deliveries: bool,

    /// Fewest orders per delivery run.
    pub min_orders: u32,

    /// Most orders per delivery run.
    pub max_orders: u32,

    /// Buckets used when ranking route distances.
    pub sort_buckets: usize,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            size: 1,
            seed: None,
            map_output: PathBuf::from("map.txt"),
            route_output: PathBuf::from("outputPath.txt"),
            deliveries: true,
            min_orders: 2,
            max_orders: 7,
            sort_buckets: 10,
        }
    }
}

impl CityConfig {
    pub fn city_size(&self) -> CitySize {
        CitySize::from_selector(self.size)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: CityConfig = serde_json::from_str(text)?;
        Ok(config.normalized())
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CityError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Swap an inverted order range and keep at least one bucket.
    fn normalized(mut self) -> Self {
        if self.min_orders > self.max_orders {
            std::mem::swap(&mut self.min_orders, &mut self.max_orders);
        }
        self.sort_buckets = self.sort_buckets.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CityConfig::default();
        assert_eq!(config.city_size(), CitySize::Small);
        assert_eq!((config.min_orders, config.max_orders), (2, 7));
        assert_eq!(config.map_output, PathBuf::from("map.txt"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CityConfig::from_json_str(r#"{ "size": 2, "seed": 17 }"#).unwrap();
        assert_eq!(config.city_size(), CitySize::Large);
        assert_eq!(config.seed, Some(17));
        assert_eq!(config.sort_buckets, 10);
        assert!(config.deliveries);
    }

    #[test]
    fn test_inverted_order_range_is_swapped() {
        let config =
            CityConfig::from_json_str(r#"{ "min_orders": 9, "max_orders": 3, "sort_buckets": 0 }"#)
                .unwrap();
        assert_eq!((config.min_orders, config.max_orders), (3, 9));
        assert_eq!(config.sort_buckets, 1);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            CityConfig::from_json_str("{ size: }"),
            Err(CityError::Config(_))
        ));
    }
}
