//! Coordinate assignment by seeded sampling with replacement.
//!
//! Each observation row whose normalized species has K candidates in the
//! master index receives candidate `rng.random_range(0..K)`. Draws are
//! independent, so rows of the same species may share a pair. Rows are
//! visited in table order and only matched rows consume the generator,
//! which makes the output a pure function of (inputs, seed).

use rand::Rng;

use crate::models::{Coordinate, MasterIndex, Table};
use crate::normalize::normalize_cell;

/// Derived column headers
pub const LAT_COLUMN: &str = "lat";
pub const LON_COLUMN: &str = "lon";
pub const LAT_LON_COLUMN: &str = "lat_lon";

/// Normalized species name for every row of `table`'s species column.
pub fn normalized_species(table: &Table, species_col: usize) -> Vec<String> {
    table.column(species_col).map(normalize_cell).collect()
}

/// Pick one coordinate per row. `None` means the species has no candidates.
pub fn assign_coordinates<R: Rng + ?Sized>(
    species: &[String],
    index: &MasterIndex,
    rng: &mut R,
) -> Vec<Option<Coordinate>> {
    species
        .iter()
        .map(|name| {
            let candidates = index.get(name).filter(|c| !c.is_empty())?;
            Some(candidates[rng.random_range(0..candidates.len())])
        })
        .collect()
}

/// Render a coordinate component with six fractional digits, or "" if unusable.
pub fn format_component(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.6}", v),
        _ => String::new(),
    }
}

/// Render `"{lat},{lon}"`, or "" if either side is unusable.
pub fn format_pair(lat: Option<f64>, lon: Option<f64>) -> String {
    let (lat, lon) = (format_component(lat), format_component(lon));
    if lat.is_empty() || lon.is_empty() {
        String::new()
    } else {
        format!("{},{}", lat, lon)
    }
}

/// Add (or overwrite) the `lat`, `lon` and `lat_lon` columns.
pub fn enrich_table(table: &Table, assignments: &[Option<Coordinate>]) -> Table {
    let mut lats = Vec::with_capacity(assignments.len());
    let mut lons = Vec::with_capacity(assignments.len());
    let mut pairs = Vec::with_capacity(assignments.len());

    for coord in assignments {
        let lat = coord.map(|c| c.lat);
        let lon = coord.map(|c| c.lon);
        lats.push(format_component(lat));
        lons.push(format_component(lon));
        pairs.push(format_pair(lat, lon));
    }

    let mut out = table.clone();
    out.set_column(LAT_COLUMN, lats);
    out.set_column(LON_COLUMN, lons);
    out.set_column(LAT_LON_COLUMN, pairs);
    out
}
