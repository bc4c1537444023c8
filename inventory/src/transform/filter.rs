//! Host selection by server environment and server type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::HostRecord;

/// Optional constraints on environment and type.
///
/// A `None` side places no constraint on that dimension. Matching is exact
/// and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub environment: Option<String>,
    pub server_type: Option<String>,
}

impl InventoryFilter {
    /// Filter from raw configuration values.
    ///
    /// `Some("")` is a real constraint: it only matches a blank value, which
    /// no loaded record has, so it selects nothing.
    pub fn new(environment: Option<String>, server_type: Option<String>) -> Self {
        Self {
            environment,
            server_type,
        }
    }

    /// Filter that selects every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn with_server_type(mut self, server_type: impl Into<String>) -> Self {
        self.server_type = Some(server_type.into());
        self
    }

    /// True when neither side is set.
    pub fn is_unrestricted(&self) -> bool {
        self.environment.is_none() && self.server_type.is_none()
    }

    /// Whether `record` passes both constraints.
    ///
    /// A record with a blank environment or type never matches a constraint
    /// on that side.
    pub fn matches(&self, record: &HostRecord) -> bool {
        side_matches(self.environment.as_deref(), record.server_environment.as_deref())
            && side_matches(self.server_type.as_deref(), record.server_type.as_deref())
    }
}

fn side_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

impl fmt::Display for InventoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "environment={}, type={}",
            self.environment.as_deref().unwrap_or("*"),
            self.server_type.as_deref().unwrap_or("*")
        )
    }
}
