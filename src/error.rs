//! Crate error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid map token {token:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("map is not square: line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("map contains no cells")]
    EmptyMap,

    #[error("no house could be grown on a {side}x{side} map after {hub_placements} hub placements")]
    Barren { side: usize, hub_placements: u32 },

    #[error("map has no hub")]
    MissingHub,

    #[error("house {0} does not exist on this map")]
    UnknownHouse(u32),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl CityError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CityError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CityError>;
