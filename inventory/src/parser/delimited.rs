//! Delimited text (CSV) sources with encoding and delimiter auto-detection.

use encoding_rs::Encoding;
use serde_json::Value;
use tracing::{debug, warn};

use super::{build_row, ParsedTable, SourceFormat};
use crate::error::{ParseError, ParseResult};

/// Delimiters tried by [`detect_delimiter`], in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Guess the text encoding of raw bytes.
///
/// Plain ASCII and unknown charsets fall back to UTF-8.
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    let (charset, confidence, _) = chardet::detect(bytes);

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => encoding_rs::UTF_8,
        // chardet reports latin-1 for most western single-byte files
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::WINDOWS_1252,
        other => Encoding::for_label(other.as_bytes()).unwrap_or_else(|| {
            debug!(charset = other, confidence, "unknown charset, using UTF-8");
            encoding_rs::UTF_8
        }),
    }
}

/// Decode bytes with `encoding`, replacing invalid sequences.
///
/// A byte order mark overrides `encoding` and is stripped.
pub fn decode_content(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = used.name(), "source contains undecodable bytes");
    }
    text.into_owned()
}

/// Pick the delimiter occurring most often in the header line.
///
/// Ties go to the earlier candidate, so a line without any candidate
/// yields `,`.
pub fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");

    let mut best = CANDIDATE_DELIMITERS[0];
    let mut best_count = 0;
    for candidate in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Parse delimited text with an explicit delimiter.
///
/// Fields are kept verbatim; empty fields become `null`. Rows may have fewer
/// or more fields than the header.
pub fn parse_csv_str(content: &str, delimiter: u8) -> ParseResult<ParsedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(String::is_empty) {
        return Err(ParseError::EmptySource);
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        let cells = record.iter().map(|field| {
            if field.is_empty() {
                Value::Null
            } else {
                Value::String(field.to_string())
            }
        });

        rows.extend(build_row(line, &headers, cells));
    }

    Ok(ParsedTable {
        headers,
        rows,
        format: SourceFormat::Csv,
        sheet: None,
    })
}

/// Parse raw CSV bytes, detecting encoding and delimiter.
pub fn parse_csv_bytes(bytes: &[u8]) -> ParseResult<ParsedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, encoding);
    let delimiter = detect_delimiter(&content);

    debug!(
        encoding = encoding.name(),
        delimiter = %char::from(delimiter).escape_default(),
        "parsing delimited source"
    );

    parse_csv_str(&content, delimiter)
}
