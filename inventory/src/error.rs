//! Error types for the inventory pipeline.
//!
//! Each stage has its own error enum and the top-level [`InventoryError`]
//! wraps them all:
//!
//! - [`ParseError`] - reading the tabular source (workbook or CSV)
//! - [`LoadError`] - turning raw rows into host records
//! - [`BuildError`] - grouping records into an inventory document
//! - [`InventoryError`] - orchestration and output
//!
//! `From` implementations let `?` cross stage boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Parsing Errors
// =============================================================================

/// Errors while reading the tabular source.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be read.
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The extension is not one of the supported tabular formats.
    #[error("Unsupported source format for '{0}' (expected .xlsx, .xlsm, .xls, .xlsb, .ods or .csv)")]
    UnsupportedFormat(PathBuf),

    /// The workbook could not be opened or decoded.
    #[error("Invalid workbook '{path}': {message}")]
    Workbook { path: PathBuf, message: String },

    /// The requested worksheet does not exist.
    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    /// The workbook contains no worksheet at all.
    #[error("Workbook has no worksheets")]
    NoSheets,

    /// Malformed CSV content.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The source has no header row.
    #[error("Source is empty (no header row)")]
    EmptySource,
}

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while loading host records from parsed rows.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read.
    #[error("Data source error: {0}")]
    DataSource(#[from] ParseError),

    /// One or more required columns are absent from the header row.
    #[error("Missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
}

// =============================================================================
// Build Errors
// =============================================================================

/// Errors while grouping records into an inventory.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A selected record has no value for a required field.
    #[error("Row {row}: missing value for '{field}'")]
    MissingField { row: usize, field: &'static str },

    /// A group value would shadow the reserved `_meta` entry.
    #[error("Row {row}: '{name}' is reserved and cannot be used as a group name")]
    ReservedGroup { row: usize, name: String },
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Top-level error returned by [`crate::generate_inventory`] and the CLI.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Loading failed (unreadable source or missing columns).
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Building the document failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Serializing the document failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<ParseError> for InventoryError {
    fn from(err: ParseError) -> Self {
        Self::Load(LoadError::DataSource(err))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for building.
pub type BuildResult<T> = Result<T, BuildError>;

/// Result type for the whole pipeline.
pub type InventoryResult<T> = Result<T, InventoryError>;
