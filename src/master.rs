//! Master index construction.
//!
//! Groups the master table's valid coordinate pairs by normalized species
//! name. Rows with an empty name or an unusable latitude/longitude are
//! dropped silently; duplicate rows stay as separate sampling candidates.

use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::columns::{resolve_column, ColumnError, MASTER_LAT, MASTER_LON, MASTER_NAME};
use crate::models::{Coordinate, MasterIndex, Table};
use crate::normalize::normalize_cell;

/// Resolved column positions in the master table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasterColumns {
    pub name: usize,
    pub lat: usize,
    pub lon: usize,
}

impl MasterColumns {
    pub fn resolve(headers: &[String]) -> Result<Self, ColumnError> {
        Ok(Self {
            name: resolve_column(headers, MASTER_NAME, "master name")?,
            lat: resolve_column(headers, MASTER_LAT, "master latitude")?,
            lon: resolve_column(headers, MASTER_LON, "master longitude")?,
        })
    }
}

/// Parse a coordinate cell. Blank, non-numeric and non-finite values are missing.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build the index from an already-loaded master table.
pub fn build_master_index(table: &Table) -> Result<MasterIndex, ColumnError> {
    let cols = MasterColumns::resolve(&table.headers)?;
    let mut index: MasterIndex = FxHashMap::default();

    for row in &table.rows {
        let name = normalize_cell(&row[cols.name]);
        if name.is_empty() {
            continue;
        }
        let (Some(lat), Some(lon)) = (parse_coordinate(&row[cols.lat]), parse_coordinate(&row[cols.lon]))
        else {
            continue;
        };
        index.entry(name).or_default().push(Coordinate::new(lat, lon));
    }

    Ok(index)
}

/// Total number of candidate pairs across all species.
pub fn candidate_count(index: &MasterIndex) -> usize {
    index.values().map(Vec::len).sum()
}
