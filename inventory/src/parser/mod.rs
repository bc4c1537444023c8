//! Tabular source reading.
//!
//! Turns a host registry file into a [`ParsedTable`]: the header row plus one
//! [`SourceRow`] per data row, keyed by header name. No inventory logic here.
//!
//! Supported sources:
//!
//! - workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`), see [`workbook`]
//! - delimited text (`.csv`, `.tsv`, `.txt`) with encoding and delimiter
//!   auto-detection, see [`delimited`]
//!
//! Blank cells become [`Value::Null`]. Date and duration cells become an
//! object `{"datetime": "<text>"}` so they never pass for text. Rows where
//! every cell is blank are dropped.

pub mod delimited;
pub mod workbook;

use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use crate::error::{ParseError, ParseResult};

pub use delimited::{decode_content, detect_delimiter, detect_encoding, parse_csv_bytes, parse_csv_str};
pub use workbook::{parse_workbook, table_from_range};

/// Key of the object that wraps a workbook date or duration cell.
pub const DATETIME_KEY: &str = "datetime";

/// Default registry file name, looked up in the working directory.
pub const DEFAULT_SOURCE: &str = "hosts_data.xlsx";

/// Kind of tabular source, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Spreadsheet workbook read through calamine.
    Workbook,
    /// Delimited text file.
    Csv,
}

impl SourceFormat {
    /// Pick the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> ParseResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Ok(Self::Workbook),
            Some("csv" | "tsv" | "txt") => Ok(Self::Csv),
            _ => Err(ParseError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// One data row of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// 1-based row number in the source (the header is row 1 for most files).
    pub line: usize,
    /// Cell values keyed by header name.
    pub values: Map<String, Value>,
}

impl SourceRow {
    /// Cell value for `column`, `None` if the column does not exist.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    fn is_blank(&self) -> bool {
        self.values.values().all(Value::is_null)
    }
}

/// Result of reading a tabular source.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Column headers, in source order.
    pub headers: Vec<String>,
    /// Non-blank data rows, in source order.
    pub rows: Vec<SourceRow>,
    /// Format the rows were read from.
    pub format: SourceFormat,
    /// Worksheet name for workbook sources.
    pub sheet: Option<String>,
}

impl ParsedTable {
    /// Whether the header row contains `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

/// Read a tabular source, dispatching on its extension.
///
/// `sheet` selects a worksheet by name for workbooks (first sheet when
/// `None`); it is ignored for delimited files.
pub fn parse_source<P: AsRef<Path>>(path: P, sheet: Option<&str>) -> ParseResult<ParsedTable> {
    let path = path.as_ref();
    match SourceFormat::from_path(path)? {
        SourceFormat::Workbook => parse_workbook(path, sheet),
        SourceFormat::Csv => {
            let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_csv_bytes(&bytes)
        }
    }
}

/// Build a row object from header names and cell values.
///
/// With duplicated headers the first column wins. Returns `None` for a row
/// with only blank cells.
pub(crate) fn build_row<I>(line: usize, headers: &[String], cells: I) -> Option<SourceRow>
where
    I: IntoIterator<Item = Value>,
{
    let mut values = Map::new();
    let mut cells = cells.into_iter();

    for header in headers {
        let value = cells.next().unwrap_or(Value::Null);
        values.entry(header.clone()).or_insert(value);
    }

    let row = SourceRow { line, values };
    if row.is_blank() {
        debug!(line, "skipping blank row");
        None
    } else {
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("hosts_data.xlsx")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("legacy/HOSTS.XLS")).unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("export.csv")).unwrap(),
            SourceFormat::Csv
        );
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = SourceFormat::from_path(Path::new("hosts.json")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(p) if p == PathBuf::from("hosts.json")));

        assert!(SourceFormat::from_path(Path::new("hosts")).is_err());
    }

    #[test]
    fn test_build_row_pads_missing_cells() {
        let headers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let row = build_row(2, &headers, vec![json!("1")]).unwrap();

        assert_eq!(row.line, 2);
        assert_eq!(row.get("a"), Some(&json!("1")));
        assert_eq!(row.get("b"), Some(&Value::Null));
        assert_eq!(row.get("c"), Some(&Value::Null));
        assert_eq!(row.get("d"), None);
    }

    #[test]
    fn test_build_row_first_duplicate_header_wins() {
        let headers = vec!["Notes".to_string(), "Notes".to_string()];
        let row = build_row(2, &headers, vec![json!("first"), json!("second")]).unwrap();
        assert_eq!(row.get("Notes"), Some(&json!("first")));
    }

    #[test]
    fn test_build_row_skips_blank() {
        let headers = vec!["a".to_string(), "b".to_string()];
        assert!(build_row(5, &headers, vec![Value::Null, Value::Null]).is_none());
        assert!(build_row(5, &headers, Vec::new()).is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_source("/nonexistent/dir/hosts.csv", None).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
