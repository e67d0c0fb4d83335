//! Hierarchy builder: flat account records to a forest of trees
//!
//! Parent links are resolved by account name against the active record
//! set. A record whose named parent does not resolve becomes a root
//! instead of raising; a record with no recorded ancestors is always a
//! root. Duplicate names keep the first record and skip the rest.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::expand::ExpandState;
use super::models::AccountRecord;

/// A node of the report forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// The owning record
    pub record: AccountRecord,
    /// Child nodes in source row order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Total node count of this subtree, including self
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(|c| c.size()).sum::<usize>()
    }
}

/// One row of the flattened, expansion-aware rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub name: String,
    pub report_index: String,
    pub code: String,
    pub weight: i8,
    pub recurring: bool,
    /// Render indent: 0 at every root, +1 per tree level
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Remove inactive records, preserving relative order
pub fn filter_active(records: Vec<AccountRecord>) -> Vec<AccountRecord> {
    records.into_iter().filter(|r| r.is_active()).collect()
}

/// Build the forest from the active record list
///
/// Deterministic for a fixed input order: children and roots both keep
/// source row order, and each record lands in exactly one parent-or-root
/// list. Records whose name was already registered are skipped with a
/// warning rather than overwriting the earlier entry.
pub fn build_forest(records: Vec<AccountRecord>) -> Vec<TreeNode> {
    // First pass: drop duplicate names, keeping the first registration
    let mut kept: Vec<AccountRecord> = Vec::with_capacity(records.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    for record in records {
        if index.contains_key(&record.name) {
            warn!("duplicate account name '{}' at line {}, keeping first", record.name, record.line);
            continue;
        }
        index.insert(record.name.clone(), kept.len());
        kept.push(record);
    }

    // Second pass: assign every record to its parent's child list or to
    // the root list, in source row order
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); kept.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, record) in kept.iter().enumerate() {
        match record.parent_name() {
            Some(parent) => match index.get(parent) {
                Some(&pi) if pi != i => children[pi].push(i),
                _ => {
                    debug!("account '{}' has unresolvable parent '{}', treating as root", record.name, parent);
                    roots.push(i);
                }
            },
            None => roots.push(i),
        }
    }

    roots.iter().map(|&i| assemble(i, &kept, &children)).collect()
}

fn assemble(i: usize, records: &[AccountRecord], children: &[Vec<usize>]) -> TreeNode {
    TreeNode {
        record: records[i].clone(),
        children: children[i].iter().map(|&c| assemble(c, records, children)).collect(),
    }
}

/// Flatten the forest into display rows: pre-order, descending into a
/// node's children only when it is expanded. Recomputed fresh from the
/// current state on every call; the forest itself is never mutated.
pub fn flatten_rows(forest: &[TreeNode], expand: &ExpandState) -> Vec<DisplayRow> {
    let mut rows = Vec::new();
    for node in forest {
        flatten_node(node, 0, expand, &mut rows);
    }
    rows
}

fn flatten_node(node: &TreeNode, depth: usize, expand: &ExpandState, rows: &mut Vec<DisplayRow>) {
    let expanded = expand.is_expanded(node.name());
    rows.push(DisplayRow {
        name: node.record.name.clone(),
        report_index: node.record.report_index.clone(),
        code: node.record.code.clone(),
        weight: node.record.weight.sign(),
        recurring: node.record.recurring,
        depth,
        has_children: node.has_children(),
        expanded,
    });

    if expanded {
        for child in &node.children {
            flatten_node(child, depth + 1, expand, rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_parser::{SimpleTableParser, LEVEL_COUNT};

    fn record(status: &str, name: &str, levels: &[&str]) -> AccountRecord {
        let mut padded: Vec<String> = levels.iter().map(|s| s.to_string()).collect();
        padded.resize(LEVEL_COUNT, String::new());
        AccountRecord::from_row(finsight_parser::TableRow {
            status: status.to_string(),
            name: name.to_string(),
            report_index: String::new(),
            code: String::new(),
            weight: "1".to_string(),
            recurring: String::new(),
            levels: padded,
            line: 0,
            source: None,
        })
    }

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name()).collect()
    }

    #[test]
    fn test_filter_active_preserves_order() {
        let records = vec![
            record("01", "A", &[]),
            record("Inactive", "B", &[]),
            record("02", "C", &[]),
        ];
        let active = filter_active(records);
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].name, "A");
        assert_eq!(active[1].name, "C");
        assert!(active.iter().all(|r| r.is_active()));
    }

    #[test]
    fn test_empty_chain_is_root() {
        let forest = build_forest(vec![record("01", "NPAT", &[])]);
        assert_eq!(names(&forest), vec!["NPAT"]);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn test_child_attaches_exactly_once() {
        let forest = build_forest(vec![
            record("01", "NPAT", &[]),
            record("02", "EBT", &["NPAT"]),
        ]);
        assert_eq!(names(&forest), vec!["NPAT"]);
        assert_eq!(names(&forest[0].children), vec!["EBT"]);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        // NPAT is named as a parent but is not itself a row, so EBT
        // degrades to a root; EBIT still attaches under EBT
        let forest = build_forest(vec![
            record("0003", "EBT", &["NPAT"]),
            record("0005", "EBIT", &["NPAT", "EBT"]),
        ]);
        assert_eq!(names(&forest), vec!["EBT"]);
        assert_eq!(names(&forest[0].children), vec!["EBIT"]);
    }

    #[test]
    fn test_inactive_rows_are_dropped_before_build() {
        let records = filter_active(vec![
            record("0003", "EBT", &["NPAT"]),
            record("0005", "EBIT", &["NPAT", "EBT"]),
            record("Inactive", "AMS", &["NPAT", "EBT", "EBIT", "Total SG&A"]),
        ]);
        let forest = build_forest(records);
        assert_eq!(names(&forest), vec!["EBT"]);
        assert_eq!(forest[0].size(), 2);
    }

    #[test]
    fn test_children_keep_source_row_order() {
        let forest = build_forest(vec![
            record("01", "NPAT", &[]),
            record("02", "Tax", &["NPAT"]),
            record("03", "EBT", &["NPAT"]),
            record("04", "Other", &["NPAT"]),
        ]);
        assert_eq!(names(&forest[0].children), vec!["Tax", "EBT", "Other"]);
    }

    #[test]
    fn test_build_forest_is_deterministic() {
        let make = || {
            build_forest(vec![
                record("01", "NPAT", &[]),
                record("02", "EBT", &["NPAT"]),
                record("03", "EBIT", &["NPAT", "EBT"]),
                record("04", "Orphan", &["Missing"]),
            ])
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let forest = build_forest(vec![
            record("01", "NPAT", &[]),
            record("02", "EBT", &["NPAT"]),
            record("03", "EBT", &["NPAT"]),
            record("04", "EBIT", &["NPAT", "EBT"]),
        ]);
        assert_eq!(names(&forest), vec!["NPAT"]);
        // One EBT survives and still receives its child
        assert_eq!(names(&forest[0].children), vec!["EBT"]);
        assert_eq!(names(&forest[0].children[0].children), vec!["EBIT"]);
    }

    #[test]
    fn test_self_parent_degrades_to_root() {
        let forest = build_forest(vec![record("01", "Loop", &["Loop"])]);
        assert_eq!(names(&forest), vec!["Loop"]);
    }

    #[test]
    fn test_flatten_respects_expansion() {
        let forest = build_forest(vec![
            record("01", "NPAT", &[]),
            record("02", "EBT", &["NPAT"]),
            record("03", "EBIT", &["NPAT", "EBT"]),
            record("04", "Headcount", &[]),
        ]);

        let rows = flatten_rows(&forest, &ExpandState::new(true));
        let row_names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(row_names, vec!["NPAT", "EBT", "EBIT", "Headcount"]);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].depth, 1);
        assert_eq!(rows[2].depth, 2);
        assert_eq!(rows[3].depth, 0);

        // Collapsed root emits a single row per root
        let rows = flatten_rows(&forest, &ExpandState::new(false));
        let row_names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(row_names, vec!["NPAT", "Headcount"]);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);

        // A single override opens just that subtree level
        let mut expand = ExpandState::new(false);
        expand.toggle("NPAT");
        let rows = flatten_rows(&forest, &expand);
        let row_names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(row_names, vec!["NPAT", "EBT", "Headcount"]);
    }

    #[test]
    fn test_default_table_forest_shape() {
        let table = SimpleTableParser::parse(finsight_parser::DEFAULT_TABLE).unwrap();
        let records = filter_active(table.rows.into_iter().map(AccountRecord::from_row).collect());
        let forest = build_forest(records.clone());

        // Two roots: the P&L tree and the headcount memo block
        assert_eq!(names(&forest), vec!["NPAT", "Headcount"]);

        // Every active record is reachable exactly once
        let total: usize = forest.iter().map(|n| n.size()).sum();
        assert_eq!(total, records.len());

        // Expand-all flattening shows the level-8 leaf below its parent
        let rows = flatten_rows(&forest, &ExpandState::new(true));
        let branded = rows.iter().position(|r| r.name == "Branded Keywords").unwrap();
        let paid_search = rows.iter().position(|r| r.name == "Paid Search").unwrap();
        assert_eq!(branded, paid_search + 1);
        assert_eq!(rows[branded].depth, rows[paid_search].depth + 1);
    }
}
