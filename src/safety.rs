//! Safety checks to prevent overwriting input tables.
//!
//! Every output path is validated against the input paths before the
//! pipeline writes anything.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Resolve a path for comparison. Falls back to the path as given when it
/// does not exist yet (outputs usually don't).
fn comparable(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Validates that an output path is safe to overwrite.
///
/// # Arguments
/// * `output` - The output path that will be created/overwritten
/// * `source_paths` - Input paths that must not match the output
///
/// # Returns
/// * `Ok(())` if the output path is safe
/// * `Err` with a descriptive message if the check fails
pub fn validate_output_path(output: &Path, source_paths: &[&Path]) -> Result<()> {
    if output.file_name().is_none() {
        bail!(
            "Safety check failed: output '{}' is not a file path",
            output.display()
        );
    }

    let output_cmp = comparable(output);
    for source in source_paths {
        if output == *source || output_cmp == comparable(source) {
            bail!(
                "Safety check failed: output '{}' cannot be the same as source '{}'",
                output.display(),
                source.display()
            );
        }
    }

    Ok(())
}
