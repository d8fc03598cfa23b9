//! Flat text dump of a city map.
//!
//! One line per row, one comma-terminated token per cell:
//! - road `-1`
//! - hub `-2`
//! - empty `0`
//! - house: its id
//!
//! Downstream readers treat `0` as background, anything else as walkable,
//! and positive numbers as deliverable houses.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::city::{Cell, CityMap};
use crate::error::{CityError, Result};
use crate::tilemap::Tilemap;

/// Write the map dump to any writer.
pub fn write_map<W: Write>(map: &CityMap, out: &mut W) -> std::io::Result<()> {
    for row in map.cells().rows() {
        for cell in row {
            write!(out, "{},", cell.token())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render the map dump as a string.
pub fn map_to_text(map: &CityMap) -> String {
    let mut buf = Vec::with_capacity(map.side() * map.side() * 3);
    // Writing into a Vec cannot fail.
    let _ = write_map(map, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Save the map dump to `path`, replacing any existing file.
pub fn save_map(map: &CityMap, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| CityError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_map(map, &mut out)
        .and_then(|_| out.flush())
        .map_err(|e| CityError::io(path, e))
}

/// Parse a map dump back into cells.
///
/// Blank lines are skipped. Every row must have as many cells as there are
/// rows.
pub fn parse_map(text: &str) -> Result<CityMap> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let body = line.strip_suffix(',').unwrap_or(line);
        let mut row = Vec::new();
        for (col_idx, token) in body.split(',').enumerate() {
            let cell = Cell::from_token(token).ok_or_else(|| CityError::Parse {
                line: line_idx + 1,
                column: col_idx + 1,
                token: token.to_string(),
            })?;
            row.push(cell);
        }
        rows.push(row);
    }

    let side = rows.len();
    if side == 0 {
        return Err(CityError::EmptyMap);
    }

    let mut cells = Tilemap::new_with(side, side, Cell::Empty);
    for (y, row) in rows.iter().enumerate() {
        if row.len() != side {
            return Err(CityError::Ragged {
                line: y + 1,
                found: row.len(),
                expected: side,
            });
        }
        for (x, cell) in row.iter().enumerate() {
            cells.set(x, y, *cell);
        }
    }

    Ok(CityMap::from_cells(cells))
}

/// Load and parse a map dump from `path`.
pub fn load_map(path: &Path) -> Result<CityMap> {
    let text = fs::read_to_string(path).map_err(|e| CityError::io(path, e))?;
    parse_map(&text)
}
