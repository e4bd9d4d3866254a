//! # Output Parser
//!
//! Converts zmap's line-oriented text output into structured records. Two
//! formats are supported: the default one-IP-per-line output and the csv
//! output module's comma-separated rows. Malformed input never aborts a
//! whole result set: bad lines are counted, bad rows are reported
//! per-row, and parsing continues.

use crate::error::ZmapError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::str::FromStr;

/// Result of parsing default line-per-IP output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineParse {
    /// Valid IP addresses in input order
    pub ips: Vec<String>,
    /// Number of non-blank lines that failed address validation
    pub skipped_lines: usize,
}

/// A row-scoped parse failure in structured output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based row number within the output
    pub row: usize,
    /// Why the row was rejected
    pub message: String,
}

/// Result of parsing csv output: partial results plus row-level errors
#[derive(Debug, Clone, Default)]
pub struct CsvParse {
    /// Successfully parsed rows, keyed by field name, in input order
    pub rows: Vec<BTreeMap<String, String>>,
    /// Row-scoped errors for rows that failed to parse
    pub row_errors: Vec<RowError>,
}

/// Parse default zmap output: one IP address per line
///
/// Blank lines are ignored. Non-blank lines that fail address validation
/// are skipped and counted so the caller can observe "N lines skipped"
/// rather than losing them silently.
pub fn parse_ip_lines(text: &str) -> LineParse {
    let mut parse = LineParse::default();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if IpAddr::from_str(trimmed).is_ok() {
            parse.ips.push(trimmed.to_string());
        } else {
            parse.skipped_lines += 1;
        }
    }

    parse
}

/// Parse csv output rows against a caller-declared field list
///
/// Fields are mapped positionally. A header row matching the declared
/// field list (zmap's csv module emits one) is recognized and skipped. A
/// field-count mismatch rejects that row only; subsequent rows are still
/// parsed and the caller receives both partial results and the list of
/// row errors.
pub fn parse_csv_rows(text: &str, fields: &[String]) -> CsvParse {
    let mut parse = CsvParse::default();
    let header = fields.join(",");

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if index == 0 && trimmed == header {
            continue;
        }

        let row_number = index + 1;
        match parse_row(trimmed, fields, row_number) {
            Ok(row) => parse.rows.push(row),
            Err(e) => parse.row_errors.push(RowError {
                row: row_number,
                message: e.to_string(),
            }),
        }
    }

    parse
}

fn parse_row(
    line: &str,
    fields: &[String],
    row_number: usize,
) -> Result<BTreeMap<String, String>, ZmapError> {
    let values: Vec<&str> = line.split(',').collect();

    if values.len() != fields.len() {
        return Err(ZmapError::malformed_row(
            row_number,
            format!(
                "expected {} fields, found {} in '{}'",
                fields.len(),
                values.len(),
                line
            ),
        ));
    }

    Ok(fields
        .iter()
        .zip(values)
        .map(|(field, value)| (field.clone(), value.trim().to_string()))
        .collect())
}
