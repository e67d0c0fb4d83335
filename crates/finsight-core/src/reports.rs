//! Report structures for API responses

use serde::{Deserialize, Serialize};

use super::tree::{DisplayRow, TreeNode};

/// Headline counts for the dashboard and summary API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Rows parsed from the source, before filtering
    pub total_rows: usize,
    pub active_accounts: usize,
    pub inactive_accounts: usize,
    /// Rows dropped during parsing for having too few fields
    pub skipped_rows: usize,
    pub root_count: usize,
    /// Deepest recorded ancestor chain among active accounts
    pub max_depth: usize,
    pub recurring_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Account tree node for hierarchical JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNodeResponse {
    pub name: String,
    pub report_index: String,
    pub code: String,
    pub weight: i8,
    pub recurring: bool,
    /// Recorded ancestor chain length (not the render indent)
    pub depth: usize,
    pub has_children: bool,
    pub children: Vec<TreeNodeResponse>,
}

impl TreeNodeResponse {
    /// Build the response tree from a forest node
    pub fn from_node(node: &TreeNode) -> Self {
        Self {
            name: node.record.name.clone(),
            report_index: node.record.report_index.clone(),
            code: node.record.code.clone(),
            weight: node.record.weight.sign(),
            recurring: node.record.recurring,
            depth: node.record.depth(),
            has_children: node.has_children(),
            children: node.children.iter().map(TreeNodeResponse::from_node).collect(),
        }
    }
}

/// Flattened rows response for the rows API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsResponse {
    pub rows: Vec<DisplayRow>,
    pub total_count: usize,
    pub expand_all: bool,
}
