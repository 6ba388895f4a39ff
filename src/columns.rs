//! Column resolution across header spelling variants.
//!
//! Headers are compared after whitespace collapse and case folding, so
//! "Nombre  de Ave" resolves against the candidate "nombre de ave".

use thiserror::Error;

use crate::normalize::{collapse_whitespace, fold_case};

// ============================================================================
// Candidate Headers
// ============================================================================

/// Species column of the observation table
pub const OBSERVATION_SPECIES: &[&str] = &["species", "especie", "nombre de ave", "nombre"];

/// Name column of the master table
pub const MASTER_NAME: &[&str] = &["nombre de ave", "nombre_de_ave", "nombre", "especie", "species"];

/// Latitude column of the master table
pub const MASTER_LAT: &[&str] = &["latitud", "lat"];

/// Longitude column of the master table ("lopnong" is a typo found in real files)
pub const MASTER_LON: &[&str] = &["longitud", "lon", "long", "lopnong"];

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ColumnError {
    #[error("{column} column not found: tried {candidates:?}, available headers {available:?}")]
    NotFound {
        column: String,
        candidates: Vec<String>,
        available: Vec<String>,
    },
}

// ============================================================================
// Resolution
// ============================================================================

fn header_key(header: &str) -> String {
    fold_case(&collapse_whitespace(header.trim_start_matches('\u{feff}')))
}

/// Find the first header (in table order) matching any candidate.
///
/// Returns the header's index. `column` names the logical column for the error.
pub fn resolve_column(
    headers: &[String],
    candidates: &[&str],
    column: &str,
) -> Result<usize, ColumnError> {
    let targets: Vec<String> = candidates.iter().map(|c| fold_case(c)).collect();

    headers
        .iter()
        .position(|h| {
            let key = header_key(h);
            targets.iter().any(|t| *t == key)
        })
        .ok_or_else(|| ColumnError::NotFound {
            column: column.to_string(),
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            available: headers.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(v: &[&str]) -> Vec<String> {
        v.iter().map(|x| x.to_string()).collect()
    }

    #[test]
    fn test_resolves_case_and_whitespace_variants() {
        let h = headers(&["Fecha", "  Nombre   de AVE ", "Conteo"]);
        assert_eq!(resolve_column(&h, OBSERVATION_SPECIES, "species"), Ok(1));
    }

    #[test]
    fn test_first_matching_header_wins() {
        // Header order decides, not candidate order
        let h = headers(&["Nombre", "Species"]);
        assert_eq!(resolve_column(&h, OBSERVATION_SPECIES, "species"), Ok(0));
    }

    #[test]
    fn test_longitude_typo_variant() {
        let h = headers(&["Nombre de ave", "Latitud", "Lopnong"]);
        assert_eq!(resolve_column(&h, MASTER_LON, "longitude"), Ok(2));
        assert_eq!(resolve_column(&h, MASTER_LAT, "latitude"), Ok(1));
        assert_eq!(resolve_column(&h, MASTER_NAME, "name"), Ok(0));
    }

    #[test]
    fn test_bom_on_first_header() {
        let h = headers(&["\u{feff}species", "count"]);
        assert_eq!(resolve_column(&h, OBSERVATION_SPECIES, "species"), Ok(0));
    }

    #[test]
    fn test_not_found_names_candidates_and_headers() {
        let h = headers(&["date", "count"]);
        let err = resolve_column(&h, MASTER_LAT, "latitude").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("latitude column not found"));
        assert!(msg.contains("\"latitud\""));
        assert!(msg.contains("\"lat\""));
        assert!(msg.contains("\"date\""));
        assert!(msg.contains("\"count\""));
    }

    #[test]
    fn test_partial_header_does_not_match() {
        let h = headers(&["latitude_deg"]);
        assert!(resolve_column(&h, MASTER_LAT, "latitude").is_err());
    }
}
