//! Raw table row types

use serde::{Deserialize, Serialize};

/// Number of comma-separated fields in a well-formed row
pub const FIELD_COUNT: usize = 14;

/// Number of ancestor-name columns per row
pub const LEVEL_COUNT: usize = 8;

/// Status value that excludes a row from the report
pub const INACTIVE_STATUS: &str = "Inactive";

/// One raw row of the account table
///
/// All fields are kept as strings exactly as they appear in the source;
/// typing (weight sign, recurring flag) happens in the core model. The
/// `levels` vector always holds `LEVEL_COUNT` entries, ordered from the
/// most distant recorded ancestor to the immediate parent, padded with
/// empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub status: String,
    pub name: String,
    pub report_index: String,
    pub code: String,
    pub weight: String,
    pub recurring: String,
    pub levels: Vec<String>,
    /// 1-indexed line number in the source
    pub line: usize,
    /// Source file path, if parsed from a file
    pub source: Option<String>,
}

/// Result of parsing a table: retained rows plus the skipped-row count
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedTable {
    pub rows: Vec<TableRow>,
    /// Rows dropped for having fewer than `FIELD_COUNT` fields
    pub skipped: usize,
    pub source: Option<String>,
}
