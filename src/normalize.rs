//! Species name normalization shared by the observation and master tables.
//!
//! Two raw names refer to the same species iff their normalized forms are
//! byte-equal. Any change here changes which rows match, so run tests after edits.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Parenthesized span plus surrounding whitespace: "Great Egret (Ardea alba)".
/// Non-greedy, so "a (b (c) d) e" loses only "(b (c)" and keeps "d) e".
/// Spans may cross line breaks.
pub static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\s*\(.*?\)\s*").unwrap());

/// Any run of whitespace
pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// ============================================================================
// MISSING-VALUE TOKENS
// ============================================================================

/// Cell values that mean "no value" in exported spreadsheets (matched exactly,
/// case-sensitive, same set pandas treats as NA by default).
pub static MISSING_TOKENS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

pub fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(cell)
}

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Collapse whitespace runs to a single space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// Full Unicode case folding ("ß" and "SS" both fold to "ss").
pub fn fold_case(s: &str) -> String {
    caseless::default_case_fold_str(s)
}

/// Normalize a species name into its join key.
///
/// Steps, in order:
/// 1. Drop every `( ... )` span, leaving a single space in its place
/// 2. Collapse whitespace and trim
/// 3. Case-fold
///
/// A missing cell is passed as `None` and normalizes to `""`.
pub fn normalize_species(name: Option<&str>) -> String {
    let Some(name) = name else {
        return String::new();
    };
    let stripped = PARENTHETICAL.replace_all(name, " ");
    fold_case(&collapse_whitespace(&stripped))
}

/// Treat empty cells and missing-value tokens ("NA", "null", ...) as missing.
pub fn normalize_cell(cell: &str) -> String {
    if is_missing(cell) {
        normalize_species(None)
    } else {
        normalize_species(Some(cell))
    }
}
