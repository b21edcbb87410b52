//! Application constants for the Telepase monitor
//!
//! This module contains the default values, marker phrases and column name
//! tables used throughout the processing pipeline.

// =============================================================================
// Header Detection
// =============================================================================

/// Number of leading rows searched for the header row
pub const HEADER_SCAN_ROWS: usize = 50;

/// Token that must appear in the header row
pub const HEADER_ANCHOR_TOKEN: &str = "hora";

/// At least one of these tokens must appear alongside the anchor
pub const HEADER_COMPANION_TOKENS: &[&str] = &["vía", "via", "descripción"];

// =============================================================================
// Canonical Columns
// =============================================================================

/// Canonical column names produced by the column normalizer
pub mod columns {
    pub const DESCRIPCION: &str = "Descripción";
    pub const TRANSITO: &str = "Tránsito";
    pub const VIA: &str = "Vía";
    pub const HORA: &str = "Hora";
    pub const SENTIDO: &str = "Sentido";
    pub const OBSERVACION: &str = "Observación";

    /// Columns the classifier cannot run without
    pub const REQUIRED: &[&str] = &[DESCRIPCION, TRANSITO];
}

/// Substring patterns (lowercase, accents folded) mapped to canonical names.
///
/// Checked in order; the first pattern contained in a column name wins, so a
/// name mentioning both "transito" and "descripcion" becomes Tránsito.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("transito", columns::TRANSITO),
    ("descripcion", columns::DESCRIPCION),
    ("observacion", columns::OBSERVACION),
    ("sentido", columns::SENTIDO),
    ("hora", columns::HORA),
    ("via", columns::VIA),
];

// =============================================================================
// Classification
// =============================================================================

/// Description phrase logged by the lane when an operator typed the plate
pub const MANUAL_ENTRY_MARKER: &str = "Tránsito con Patente Ingresada Manualmente";

/// Description keyword present on successful transponder reads
pub const TAG_KEYWORD: &str = "TAG";

/// Placeholder for values that could not be read or extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// Display labels for each read status
pub mod status_labels {
    pub const READ_OK: &str = "Leído Correctamente (TAG)";
    pub const MANUAL_UNREAD: &str = "Manual (No Leído)";
    pub const OTHER: &str = "Otro (Violación/Exento)";
}

// =============================================================================
// Loading
// =============================================================================

/// File extensions accepted at the upload boundary
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xls", "xlsx"];

/// Delimiters tried when sniffing delimited text, in order of preference
pub const DEFAULT_DELIMITERS: &[u8] = b",;\t|";

/// Number of records sampled when sniffing the delimiter
pub const SNIFF_SAMPLE_ROWS: usize = 100;

/// Seconds in one day, for fraction-of-day time values
pub const SECONDS_PER_DAY: f64 = 86_400.0;
