//! Spreadsheet workbook sources (xlsx, xlsm, xlsb, xls, ods) via calamine.

use calamine::{open_workbook_auto, Data, Range, Reader};
use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::debug;

use super::{build_row, ParsedTable, SourceFormat, DATETIME_KEY};
use crate::error::{ParseError, ParseResult};

/// Read one worksheet of a workbook.
///
/// Uses the sheet named `sheet`, or the first sheet when `None`. The first
/// non-empty row of the used range is the header row.
pub fn parse_workbook(path: &Path, sheet: Option<&str>) -> ParseResult<ParsedTable> {
    // calamine folds I/O failures into format errors, so check access first
    std::fs::File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    let names = workbook.sheet_names();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| ParseError::SheetNotFound(wanted.to_string()))?,
        None => names.first().cloned().ok_or(ParseError::NoSheets)?,
    };

    debug!(path = %path.display(), sheet = %name, "reading worksheet");

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| workbook_error(path, e))?;

    table_from_range(&range, name)
}

/// Convert a worksheet range into a table.
pub fn table_from_range(range: &Range<Data>, sheet: String) -> ParseResult<ParsedTable> {
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows_iter = range.rows();

    let headers: Vec<String> = rows_iter
        .next()
        .ok_or(ParseError::EmptySource)?
        .iter()
        .map(header_name)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(ParseError::EmptySource);
    }

    let mut rows = Vec::new();
    for (idx, cells) in rows_iter.enumerate() {
        // 1-based, header sits on first_row + 1
        let line = first_row + idx + 2;
        rows.extend(build_row(line, &headers, cells.iter().map(cell_value)));
    }

    Ok(ParsedTable {
        headers,
        rows,
        format: SourceFormat::Workbook,
        sheet: Some(sheet),
    })
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Map a cell to a JSON value; blank and error cells are `null`.
///
/// Dates and durations are wrapped under [`DATETIME_KEY`] rather than
/// flattened to a string, so they keep their cell kind.
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
            let mut wrapped = Map::new();
            wrapped.insert(DATETIME_KEY.to_string(), Value::String(cell.to_string()));
            Value::Object(wrapped)
        }
    }
}

fn workbook_error(path: &Path, err: calamine::Error) -> ParseError {
    match err {
        calamine::Error::Io(source) => ParseError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => ParseError::Workbook {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    }
}
