//! Domain models for the inventory pipeline.
//!
//! - [`HostRecord`] - one registry row, typed
//! - [`HostVars`] - per-host variables exposed to Ansible
//! - [`Group`] - named list of hosts
//! - [`InventoryDocument`] - the full dynamic inventory
//!
//! # Output shape
//!
//! ```json
//! {
//!   "_meta": {
//!     "hostvars": {
//!       "db1": {
//!         "ansible_host": "db1",
//!         "notes": ["backup", "legacy"],
//!         "server_environment": "Production",
//!         "server_type": "Database",
//!         "ansible_user": "svc"
//!       }
//!     }
//!   },
//!   "Production": { "hosts": ["db1"] },
//!   "Database": { "hosts": ["db1"] }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the reserved metadata entry.
pub const META_KEY: &str = "_meta";

// =============================================================================
// Host Record
// =============================================================================

/// One host row of the registry.
///
/// String cells are `None` when blank in the source; whether that is an
/// error depends on whether the record is selected by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRecord {
    /// 1-based row number in the source, for error messages.
    pub row: usize,
    /// Host name, also used as the SSH address.
    pub host_name: Option<String>,
    /// e.g. "Production".
    pub server_environment: Option<String>,
    /// e.g. "Database".
    pub server_type: Option<String>,
    pub ansible_user: Option<String>,
    /// Notes split on `;`, possibly empty.
    pub notes: Vec<String>,
}

// =============================================================================
// Host Variables
// =============================================================================

/// Variables attached to a host under `_meta.hostvars`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostVars {
    pub ansible_host: String,
    pub notes: Vec<String>,
    pub server_environment: String,
    pub server_type: String,
    pub ansible_user: String,
}

// =============================================================================
// Inventory Document
// =============================================================================

/// A named group of hosts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    /// Host names in append order; may contain duplicates.
    pub hosts: Vec<String>,
}

/// Content of the `_meta` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    pub hostvars: IndexMap<String, HostVars>,
}

/// Ansible dynamic inventory.
///
/// Serializes with `_meta` first, then groups in the order they were first
/// seen. Hostvars keep first-seen order even when overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryDocument {
    #[serde(rename = "_meta")]
    meta: Meta,
    #[serde(flatten)]
    groups: IndexMap<String, Group>,
}

impl InventoryDocument {
    /// An inventory with empty hostvars and no groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups in first-seen order.
    pub fn groups(&self) -> &IndexMap<String, Group> {
        &self.groups
    }

    /// Host list of `name`, if the group exists.
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(|g| g.hosts.as_slice())
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// All host variables, keyed by host name.
    pub fn hostvars(&self) -> &IndexMap<String, HostVars> {
        &self.meta.hostvars
    }

    /// Variables of a single host (`--host` lookup).
    pub fn host_vars(&self, host: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(host)
    }

    /// True when no host was selected.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.meta.hostvars.is_empty()
    }

    /// Append `host` to `group`, creating the group on first sight.
    pub(crate) fn add_to_group(&mut self, group: &str, host: &str) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .hosts
            .push(host.to_string());
    }

    /// Set the variables of `host`; a later call replaces the earlier value.
    pub(crate) fn set_host_vars(&mut self, host: &str, vars: HostVars) {
        self.meta.hostvars.insert(host.to_string(), vars);
    }
}
