//! Core data models for the report

use serde::{Deserialize, Serialize};

use finsight_parser::TableRow;

use super::types::{RecordStatus, Weight};

/// One account line of the P&L report table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Record status (active rows carry their code here in the source)
    pub status: RecordStatus,
    /// Account name, unique within the active set
    pub name: String,
    /// Report ordering index (display-only)
    pub report_index: String,
    /// Account code (display-only)
    pub code: String,
    /// Contribution polarity toward the parent aggregate
    pub weight: Weight,
    /// Recurring line flag ("Y" in the source)
    pub recurring: bool,
    /// The eight ancestor columns in source order, most distant first;
    /// blank entries are not real ancestors
    pub levels: Vec<String>,
    /// Line number in the source table
    pub line: usize,
    /// Source file location
    pub source: Option<String>,
}

impl AccountRecord {
    /// Build a typed record from a raw table row
    pub fn from_row(row: TableRow) -> Self {
        Self {
            status: RecordStatus::from_field(&row.status),
            name: row.name,
            report_index: row.report_index,
            code: row.code,
            weight: Weight::from_field(&row.weight),
            recurring: row.recurring == "Y",
            levels: row.levels,
            line: row.line,
            source: row.source,
        }
    }

    /// Check if the record participates in the report
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// The real ancestors: non-empty level entries in source order
    pub fn parent_chain(&self) -> Vec<&str> {
        self.levels
            .iter()
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Depth = count of non-empty level entries
    pub fn depth(&self) -> usize {
        self.levels.iter().filter(|s| !s.is_empty()).count()
    }

    /// The immediate parent: the last non-empty level entry
    pub fn parent_name(&self) -> Option<&str> {
        self.levels
            .iter()
            .rev()
            .map(|s| s.as_str())
            .find(|s| !s.is_empty())
    }

    /// Check if this record has no recorded ancestors
    pub fn is_root(&self) -> bool {
        self.parent_name().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, name: &str, weight: &str, recurring: &str, levels: &[&str]) -> TableRow {
        let mut padded: Vec<String> = levels.iter().map(|s| s.to_string()).collect();
        padded.resize(finsight_parser::LEVEL_COUNT, String::new());
        TableRow {
            status: status.to_string(),
            name: name.to_string(),
            report_index: "100".to_string(),
            code: "0100".to_string(),
            weight: weight.to_string(),
            recurring: recurring.to_string(),
            levels: padded,
            line: 1,
            source: None,
        }
    }

    #[test]
    fn test_from_row_typing() {
        let record = AccountRecord::from_row(row("0180", "Total COGS", "-1", "Y", &["NPAT", "EBT"]));
        assert!(record.is_active());
        assert_eq!(record.weight.sign(), -1);
        assert!(record.recurring);

        let record = AccountRecord::from_row(row("Inactive", "AMS", "1", "", &[]));
        assert!(!record.is_active());
        assert!(!record.recurring);
    }

    #[test]
    fn test_depth_counts_non_empty_entries() {
        let record = AccountRecord::from_row(row("01", "X", "1", "", &["NPAT", "EBT", "EBIT"]));
        assert_eq!(record.depth(), 3);
        assert_eq!(AccountRecord::from_row(row("01", "Y", "1", "", &[])).depth(), 0);
    }

    #[test]
    fn test_parent_is_last_non_empty_entry() {
        // Gaps in the chain still resolve to the entry closest to level 1
        let mut raw = row("01", "EBT", "1", "", &[]);
        raw.levels[4] = "NPAT".to_string();
        let record = AccountRecord::from_row(raw);
        assert_eq!(record.parent_name(), Some("NPAT"));
        assert_eq!(record.depth(), 1);

        let record = AccountRecord::from_row(row("01", "EBIT", "1", "", &["NPAT", "EBT"]));
        assert_eq!(record.parent_name(), Some("EBT"));

        let root = AccountRecord::from_row(row("01", "NPAT", "1", "", &[]));
        assert_eq!(root.parent_name(), None);
        assert!(root.is_root());
    }
}
