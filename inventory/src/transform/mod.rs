//! Transformation module.
//!
//! - Filter: environment/type selection
//! - Grouper: host records to inventory groups
//! - Pipeline: source file to rendered inventory

pub mod filter;
pub mod grouper;
pub mod pipeline;

pub use filter::InventoryFilter;
pub use grouper::build_inventory;
pub use pipeline::*;
