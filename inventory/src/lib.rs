//! # hostinv - Ansible dynamic inventory from a spreadsheet
//!
//! hostinv reads a host registry (xlsx workbook or CSV export) and emits an
//! Ansible dynamic inventory grouped by server environment and server type.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  xlsx / csv │────▶│   Parser    │────▶│   Loader    │────▶│  Inventory  │
//! │  registry   │     │ (rows, raw) │     │ (HostRecord)│     │  (grouped)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostinv::{generate_inventory, render_json, InventoryOptions};
//!
//! let inventory = generate_inventory("hosts_data.xlsx", &InventoryOptions::default())?;
//! println!("{}", render_json(&inventory)?);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - HostRecord, HostVars, InventoryDocument
//! - [`parser`] - Workbook and CSV reading
//! - [`loader`] - Column check and record normalization
//! - [`transform`] - Filtering, grouping, and pipeline

// Core modules
pub mod error;
pub mod models;

// Input
pub mod parser;
pub mod loader;

// Grouping
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    BuildError,
    InventoryError,
    InventoryResult,
    LoadError,
    ParseError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Group,
    HostRecord,
    HostVars,
    InventoryDocument,
    META_KEY,
};

// =============================================================================
// Re-exports - Parsing and loading
// =============================================================================

pub use parser::{
    parse_source,
    ParsedTable,
    SourceFormat,
    SourceRow,
    DATETIME_KEY,
    DEFAULT_SOURCE,
};

pub use loader::{
    load_hosts,
    load_records,
    split_notes,
    REQUIRED_COLUMNS,
};

// =============================================================================
// Re-exports - Inventory
// =============================================================================

pub use transform::{
    build_from_table,
    build_inventory,
    generate_inventory,
    render_host_json,
    render_json,
    InventoryFilter,
    InventoryOptions,
};
