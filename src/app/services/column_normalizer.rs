//! Column name normalization for Telepase exports
//!
//! Lane systems spell the same column differently ("TRANSITO", "Tránsito ",
//! "Nro. Tránsito"). Names are trimmed, folded to lowercase ASCII and matched
//! against [`COLUMN_ALIASES`]; new export variants are added to that table.

use deunicode::deunicode;
use tracing::{debug, info};

use crate::app::models::{CanonicalTable, FramedTable};
use crate::constants::{COLUMN_ALIASES, columns};
use crate::{Error, Result};

/// Lowercase ASCII form of a column name used for alias matching
pub fn fold_column_name(name: &str) -> String {
    deunicode(name.trim()).to_lowercase()
}

/// Canonical name for a column, or the trimmed original when nothing matches
pub fn canonical_column_name(name: &str) -> String {
    let trimmed = name.trim();
    let folded = fold_column_name(trimmed);

    COLUMN_ALIASES
        .iter()
        .find(|(pattern, _)| folded.contains(pattern))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// Rewrite column names to the canonical vocabulary
///
/// Fails when Descripción or Tránsito is still missing afterwards, reporting
/// the normalized column names that were available.
pub fn normalize_columns(table: FramedTable) -> Result<CanonicalTable> {
    let normalized: Vec<String> = table
        .columns
        .iter()
        .map(|name| {
            let canonical = canonical_column_name(name);
            if canonical != name.as_str() {
                debug!("Column '{}' normalized to '{}'", name, canonical);
            }
            canonical
        })
        .collect();

    let canonical = CanonicalTable::new(normalized, table.rows);

    let missing: Vec<String> = columns::REQUIRED
        .iter()
        .filter(|name| !canonical.has_column(name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(Error::required_column_missing(
            missing,
            canonical.columns().to_vec(),
        ));
    }

    info!(
        "Normalized {} columns: {:?}",
        canonical.columns().len(),
        canonical.columns()
    );
    Ok(canonical)
}
