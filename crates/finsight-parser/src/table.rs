//! Line-oriented account table parser

use crate::error::ParseError;
use crate::types::{ParsedTable, TableRow, FIELD_COUNT, LEVEL_COUNT};

/// Simple line-based parser for the comma-separated account table
///
/// The source format has no quoting or escaping: every line is split
/// naively on `,`. Lines that are blank or start with `#` are ignored;
/// lines with fewer than `FIELD_COUNT` fields are counted as skipped.
pub struct SimpleTableParser;

impl SimpleTableParser {
    /// Parse table content
    pub fn parse(content: &str) -> Result<ParsedTable, ParseError> {
        Self::parse_with_source(content, None)
    }

    /// Parse table content with a source file path for row provenance
    pub fn parse_with_source(content: &str, source: Option<&str>) -> Result<ParsedTable, ParseError> {
        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim_end_matches('\r').trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            // Line number is 1-indexed (i starts from 0)
            match Self::parse_line(trimmed, i + 1, source) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }

        Ok(ParsedTable {
            rows,
            skipped,
            source: source.map(|s| s.to_string()),
        })
    }

    /// Parse a single row; returns None for rows with too few fields
    fn parse_line(line: &str, line_number: usize, source: Option<&str>) -> Option<TableRow> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < FIELD_COUNT {
            return None;
        }

        // Extra fields beyond FIELD_COUNT are ignored
        let field = |idx: usize| fields[idx].trim().to_string();

        Some(TableRow {
            status: field(0),
            name: field(1),
            report_index: field(2),
            code: field(3),
            weight: field(4),
            recurring: field(5),
            levels: (6..6 + LEVEL_COUNT).map(field).collect(),
            line: line_number,
            source: source.map(|s| s.to_string()),
        })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::INACTIVE_STATUS;

    #[test]
    fn test_parse_simple_row() {
        let input = "0110,EBT,110,0110,1,,NPAT,,,,,,,";
        let result = SimpleTableParser::parse(input);
        assert!(result.is_ok());
        let table = result.unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.skipped, 0);

        let row = &table.rows[0];
        assert_eq!(row.name, "EBT");
        assert_eq!(row.status, "0110");
        assert_eq!(row.report_index, "110");
        assert_eq!(row.code, "0110");
        assert_eq!(row.weight, "1");
        assert_eq!(row.recurring, "");
        assert_eq!(row.levels.len(), LEVEL_COUNT);
        assert_eq!(row.levels[0], "NPAT");
        assert_eq!(row.line, 1);
    }

    #[test]
    fn test_skip_short_rows() {
        let input = "0110,EBT,110,0110,1,,NPAT,,,,,,,\nnot,enough,fields\n0120,EBIT,120,0120,1,,NPAT,EBT,,,,,,";
        let table = SimpleTableParser::parse(input).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped, 1);
    }

    #[test]
    fn test_skip_comments_and_blanks() {
        let input = "# header comment\n\n0100,NPAT,100,0100,1,,,,,,,,,\n";
        let table = SimpleTableParser::parse(input).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.skipped, 0);
        assert_eq!(table.rows[0].name, "NPAT");
        assert_eq!(table.rows[0].line, 3);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let input = "0110, EBT ,110,0110, 1 ,, NPAT ,,,,,,,";
        let table = SimpleTableParser::parse(input).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.name, "EBT");
        assert_eq!(row.weight, "1");
        assert_eq!(row.levels[0], "NPAT");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let input = "0110,EBT,110,0110,1,,NPAT,,,,,,,,stray,fields";
        let table = SimpleTableParser::parse(input).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].levels.len(), LEVEL_COUNT);
    }

    #[test]
    fn test_default_table_parses_clean() {
        let table = SimpleTableParser::parse(crate::DEFAULT_TABLE).unwrap();
        assert!(table.rows.len() > 50);
        assert_eq!(table.skipped, 0);
        assert!(table.rows.iter().any(|r| r.name == "NPAT"));
        assert!(table.rows.iter().any(|r| r.status == INACTIVE_STATUS));
    }

    #[test]
    fn test_source_tracking() {
        let input = "0100,NPAT,100,0100,1,,,,,,,,,";
        let table = SimpleTableParser::parse_with_source(input, Some("data/pl.csv")).unwrap();
        assert_eq!(table.source.as_deref(), Some("data/pl.csv"));
        assert_eq!(table.rows[0].source.as_deref(), Some("data/pl.csv"));
    }
}
