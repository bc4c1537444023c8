//! Host record loading.
//!
//! Checks that the source has every required column, then turns each
//! [`SourceRow`] into a [`HostRecord`]. The Notes cell is split on `;`.

use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LoadError, LoadResult};
use crate::models::HostRecord;
use crate::parser::{parse_source, ParsedTable, SourceRow, DATETIME_KEY};

pub const HOST_NAME: &str = "Host Name";
pub const SERVER_ENVIRONMENT: &str = "Server Environment";
pub const SERVER_TYPE: &str = "Server Type";
pub const ANSIBLE_USER: &str = "Ansible User";
pub const NOTES: &str = "Notes";

/// Columns every registry must have.
pub const REQUIRED_COLUMNS: [&str; 5] = [HOST_NAME, SERVER_ENVIRONMENT, SERVER_TYPE, ANSIBLE_USER, NOTES];

/// Separator between notes in the Notes cell.
pub const NOTES_DELIMITER: char = ';';

/// Read `path` and load its host records in source order.
pub fn load_hosts<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> LoadResult<Vec<HostRecord>> {
    let table = parse_source(path.as_ref(), sheet)?;
    load_records(&table)
}

/// Load host records from an already parsed table.
pub fn load_records(table: &ParsedTable) -> LoadResult<Vec<HostRecord>> {
    check_columns(table)?;

    let records: Vec<HostRecord> = table.rows.iter().map(record_from_row).collect();

    info!(
        records = records.len(),
        sheet = table.sheet.as_deref().unwrap_or("-"),
        "loaded host records"
    );
    Ok(records)
}

/// Fail with [`LoadError::Schema`] listing every missing required column.
pub fn check_columns(table: &ParsedTable) -> LoadResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !table.has_column(column))
        .map(|column| column.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::Schema { missing })
    }
}

/// Build a typed record from one row.
pub fn record_from_row(row: &SourceRow) -> HostRecord {
    let record = HostRecord {
        row: row.line,
        host_name: cell_text(row.get(HOST_NAME)),
        server_environment: cell_text(row.get(SERVER_ENVIRONMENT)),
        server_type: cell_text(row.get(SERVER_TYPE)),
        ansible_user: cell_text(row.get(ANSIBLE_USER)),
        notes: split_notes(row.get(NOTES)),
    };
    debug!(row = record.row, host = ?record.host_name, "loaded record");
    record
}

/// Split a Notes cell on `;`.
///
/// Only text cells are split; pieces are kept verbatim. Anything else
/// (blank, number, boolean) gives an empty list.
pub fn split_notes(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::String(text)) => text.split(NOTES_DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Render a scalar cell as text.
///
/// Whole floats drop their fractional part (`42.0` becomes `"42"`), which is
/// how spreadsheets store numeric host names and users. Workbook dates render
/// as their wrapped text.
pub fn cell_text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", f as i64)
            } else {
                f.to_string()
            }
        }),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(cell) => cell
            .get(DATETIME_KEY)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string),
        Value::Null | Value::Array(_) => None,
    }
}
