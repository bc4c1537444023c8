//! High-level pipeline: source file → host records → inventory.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostinv::{generate_inventory, render_json, InventoryFilter, InventoryOptions};
//!
//! let options = InventoryOptions {
//!     filter: InventoryFilter::all().with_environment("Production"),
//!     sheet: None,
//! };
//! let inventory = generate_inventory("hosts_data.xlsx", &options)?;
//! println!("{}", render_json(&inventory)?);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::filter::InventoryFilter;
use super::grouper::build_inventory;
use crate::error::InventoryResult;
use crate::loader::{load_hosts, load_records};
use crate::models::{HostVars, InventoryDocument};
use crate::parser::ParsedTable;

/// Options for one inventory run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryOptions {
    /// Environment/type selection.
    pub filter: InventoryFilter,
    /// Worksheet to read; the first one when `None`.
    pub sheet: Option<String>,
}

/// Read `path` and build the inventory.
///
/// Steps:
/// 1. Parse the source (workbook or CSV)
/// 2. Check required columns and load host records
/// 3. Filter and group
pub fn generate_inventory<P: AsRef<Path>>(path: P, options: &InventoryOptions) -> InventoryResult<InventoryDocument> {
    let path = path.as_ref();
    info!(source = %path.display(), "reading host registry");
    if !options.filter.is_unrestricted() {
        info!(filter = %options.filter, "selecting hosts");
    }

    let records = load_hosts(path, options.sheet.as_deref())?;
    Ok(build_inventory(&records, &options.filter)?)
}

/// Build the inventory from an already parsed table.
pub fn build_from_table(table: &ParsedTable, filter: &InventoryFilter) -> InventoryResult<InventoryDocument> {
    let records = load_records(table)?;
    Ok(build_inventory(&records, filter)?)
}

/// Pretty-print the inventory (two-space indent).
pub fn render_json(inventory: &InventoryDocument) -> InventoryResult<String> {
    Ok(serde_json::to_string_pretty(inventory)?)
}

/// Pretty-print one host's variables, `{}` for an unknown host.
pub fn render_host_json(inventory: &InventoryDocument, host: &str) -> InventoryResult<String> {
    let json = match inventory.host_vars(host) {
        Some(vars) => serde_json::to_string_pretty::<HostVars>(vars)?,
        None => {
            info!(host, "host not in inventory");
            serde_json::to_string_pretty(&serde_json::Map::new())?
        }
    };
    Ok(json)
}
