//! Group host records into an Ansible inventory.
//!
//! Every selected record lands in two groups: its environment group and its
//! type group. Both are plain keys of the same map, so an environment and a
//! type with the same name share one host list.
//!
//! ```text
//! Records                                Inventory
//! ┌──────────────────────────────┐      ┌───────────────────────────┐
//! │ db1  Production  Database    │      │ Production: [db1, web1]   │
//! │ web1 Production  Web         │  →   │ Database:   [db1]         │
//! └──────────────────────────────┘      │ Web:        [web1]        │
//!                                       │ _meta.hostvars: db1, web1 │
//!                                       └───────────────────────────┘
//! ```
//!
//! A host name seen twice is appended twice; its hostvars come from the last
//! record.

use tracing::{debug, info};

use super::filter::InventoryFilter;
use crate::error::{BuildError, BuildResult};
use crate::loader::{ANSIBLE_USER, HOST_NAME, SERVER_ENVIRONMENT, SERVER_TYPE};
use crate::models::{HostRecord, HostVars, InventoryDocument, META_KEY};

/// Build the inventory for the records selected by `filter`.
///
/// Input order decides host order inside each group and group order in the
/// document.
pub fn build_inventory(records: &[HostRecord], filter: &InventoryFilter) -> BuildResult<InventoryDocument> {
    let mut inventory = InventoryDocument::new();
    let mut selected = 0usize;

    for record in records.iter().filter(|r| filter.matches(r)) {
        let host = required(record, record.host_name.as_deref(), HOST_NAME)?;
        let environment = group_name(record, record.server_environment.as_deref(), SERVER_ENVIRONMENT)?;
        let server_type = group_name(record, record.server_type.as_deref(), SERVER_TYPE)?;
        let user = required(record, record.ansible_user.as_deref(), ANSIBLE_USER)?;

        inventory.add_to_group(environment, host);
        inventory.add_to_group(server_type, host);

        if inventory.host_vars(host).is_some() {
            debug!(host, row = record.row, "duplicate host, replacing hostvars");
        }
        inventory.set_host_vars(
            host,
            HostVars {
                ansible_host: host.to_string(),
                notes: record.notes.clone(),
                server_environment: environment.to_string(),
                server_type: server_type.to_string(),
                ansible_user: user.to_string(),
            },
        );

        selected += 1;
    }

    info!(
        selected,
        total = records.len(),
        groups = inventory.groups().len(),
        filter = %filter,
        "built inventory"
    );
    Ok(inventory)
}

fn required<'a>(record: &HostRecord, value: Option<&'a str>, field: &'static str) -> BuildResult<&'a str> {
    value.ok_or(BuildError::MissingField {
        row: record.row,
        field,
    })
}

fn group_name<'a>(record: &HostRecord, value: Option<&'a str>, field: &'static str) -> BuildResult<&'a str> {
    let name = required(record, value, field)?;
    if name == META_KEY {
        return Err(BuildError::ReservedGroup {
            row: record.row,
            name: name.to_string(),
        });
    }
    Ok(name)
}
