//! Core data models for coordinate assignment.
//!
//! This module contains the table representation, the master index type and
//! the serializable run summary used throughout the pipeline.

use rustc_hash::FxHashMap;
use serde::Serialize;

// ============================================================================
// Type Aliases
// ============================================================================

/// Normalized species name -> candidate coordinates, in master row order.
/// Every entry holds at least one candidate.
pub type MasterIndex = FxHashMap<String, Vec<Coordinate>>;

// ============================================================================
// Coordinates
// ============================================================================

/// A (latitude, longitude) pair from the master table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

// ============================================================================
// Tables
// ============================================================================

/// A CSV table held in memory with the schema discovered at load time.
///
/// Every row has exactly `headers.len()` cells; missing cells are empty strings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding it to the header width. The CSV reader rejects
    /// over-long rows before they get here.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell values of one column, in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[idx].as_str())
    }

    /// Index of the column with this exact header, if any.
    pub fn position(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Set a column's values, overwriting an existing column of the same name
    /// or appending a new one.
    pub fn set_column(&mut self, header: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.position(header) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(header.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }
}

// ============================================================================
// Run Summary
// ============================================================================

/// Counts reported at the end of a run (and written by `--stats`).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_rows: usize,
    pub assigned_rows: usize,
    pub unmatched_species: usize,
    pub master_species: usize,
    pub master_candidates: usize,
    pub seed: u64,
    pub output: String,
    /// `None` when every species matched and no report was written.
    pub no_match_report: Option<String>,
}
