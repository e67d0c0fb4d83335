//! Core report processing and business logic
//!
//! The `Report` aggregate owns the loaded account records and the built
//! forest, and serves every read and mutation the API layer needs.

pub mod error;
pub mod types;
pub mod models;
pub mod tree;
pub mod expand;
pub mod reports;

use finsight_config::Config;
use finsight_parser::{ParsedTable, TableParserTrait, DEFAULT_TABLE};
use log::info;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use expand::ExpandState;
pub use models::AccountRecord;
pub use reports::{ReportSummary, RowsResponse, TreeNodeResponse};
pub use tree::{build_forest, filter_active, flatten_rows, DisplayRow, TreeNode};
pub use types::{RecordStatus, Weight};

/// Parser reference type
pub type ParserRef = Arc<dyn TableParserTrait>;

/// In-memory report data, rebuilt on every (re)load
#[derive(Debug, Default)]
pub struct ReportData {
    /// Active records in source row order
    pub records: Vec<AccountRecord>,
    /// The built forest, root nodes in source row order
    pub forest: Vec<TreeNode>,
    /// Rows parsed before filtering
    pub total_rows: usize,
    pub inactive_count: usize,
    pub skipped_rows: usize,
    pub source: Option<String>,
    pub loaded: bool,
}

/// Main report structure
pub struct Report {
    config: Config,
    parser: ParserRef,
    data: RwLock<ReportData>,
    expand: RwLock<ExpandState>,
}

impl Report {
    /// Create an empty report; call `load` or `load_embedded` before use
    pub fn new(config: Config, parser: ParserRef) -> Self {
        let expand_all = config.display.expand_all;
        Self {
            config,
            parser,
            data: RwLock::new(ReportData::default()),
            expand: RwLock::new(ExpandState::new(expand_all)),
        }
    }

    /// Load the account table from a file
    pub async fn load(&self, path: PathBuf) -> CoreResult<()> {
        let table = self.parser.parse_file(path).await?;
        self.install(table);
        Ok(())
    }

    /// Load the embedded default table
    pub async fn load_embedded(&self) -> CoreResult<()> {
        let table = self.parser.parse(DEFAULT_TABLE).await?;
        self.install(table);
        Ok(())
    }

    /// Re-read the current source and rebuild the forest
    pub async fn reload(&self) -> CoreResult<()> {
        let source = self.data.read().unwrap().source.clone();
        match source {
            Some(path) => self.load(PathBuf::from(path)).await,
            None => self.load_embedded().await,
        }
    }

    /// Install a parsed table: type the rows, filter inactive records,
    /// build the forest, and reset expansion to the configured default
    fn install(&self, table: ParsedTable) {
        let total_rows = table.rows.len();
        let skipped = table.skipped;
        let source = table.source;

        let records: Vec<AccountRecord> =
            table.rows.into_iter().map(AccountRecord::from_row).collect();
        let active = tree::filter_active(records);
        let inactive_count = total_rows - active.len();
        let forest = tree::build_forest(active.clone());

        info!(
            "report loaded: {} rows, {} active, {} inactive, {} skipped, {} roots",
            total_rows,
            active.len(),
            inactive_count,
            skipped,
            forest.len()
        );

        {
            let mut data = self.data.write().unwrap();
            data.records = active;
            data.forest = forest;
            data.total_rows = total_rows;
            data.inactive_count = inactive_count;
            data.skipped_rows = skipped;
            data.source = source;
            data.loaded = true;
        }

        // Expansion restarts from the configured default whenever the
        // source data changes
        self.expand.write().unwrap().set_expand_all(self.config.display.expand_all);
    }

    /// Check whether a table has been loaded
    pub fn is_loaded(&self) -> bool {
        self.data.read().unwrap().loaded
    }

    /// The configuration this report was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Active records in source row order
    pub fn records(&self) -> Vec<AccountRecord> {
        self.data.read().unwrap().records.clone()
    }

    /// Look up a single active account by name
    pub fn account(&self, name: &str) -> Option<AccountRecord> {
        self.data.read().unwrap().records.iter().find(|r| r.name == name).cloned()
    }

    /// The built forest, root nodes in source row order
    pub fn forest(&self) -> Vec<TreeNode> {
        self.data.read().unwrap().forest.clone()
    }

    /// The forest as serializable API response nodes
    pub fn forest_response(&self) -> Vec<TreeNodeResponse> {
        self.data.read().unwrap().forest.iter().map(TreeNodeResponse::from_node).collect()
    }

    /// Flatten the forest with the current expansion state
    pub fn rows(&self) -> Vec<DisplayRow> {
        let data = self.data.read().unwrap();
        let expand = self.expand.read().unwrap();
        tree::flatten_rows(&data.forest, &expand)
    }

    /// Toggle one node's expansion; errors if the account is unknown
    pub fn toggle_node(&self, name: &str) -> CoreResult<bool> {
        let known = self.data.read().unwrap().records.iter().any(|r| r.name == name);
        if !known {
            return Err(CoreError::AccountNotFound { name: name.to_string() });
        }
        Ok(self.expand.write().unwrap().toggle(name))
    }

    /// Set the global expand default, clearing per-node overrides
    pub fn set_expand_all(&self, expand: bool) {
        self.expand.write().unwrap().set_expand_all(expand);
    }

    /// Answer the expansion query for one node
    pub fn is_expanded(&self, name: &str) -> bool {
        self.expand.read().unwrap().is_expanded(name)
    }

    /// Snapshot of the current expansion state
    pub fn expand_state(&self) -> ExpandState {
        self.expand.read().unwrap().clone()
    }

    /// Headline counts for the dashboard and summary API
    pub fn summary(&self) -> ReportSummary {
        let data = self.data.read().unwrap();
        ReportSummary {
            total_rows: data.total_rows,
            active_accounts: data.records.len(),
            inactive_accounts: data.inactive_count,
            skipped_rows: data.skipped_rows,
            root_count: data.forest.len(),
            max_depth: data.records.iter().map(|r| r.depth()).max().unwrap_or(0),
            recurring_count: data.records.iter().filter(|r| r.recurring).count(),
            source: data.source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_parser::DefaultTableParser;

    fn report() -> Report {
        Report::new(Config::default(), Arc::new(DefaultTableParser))
    }

    #[tokio::test]
    async fn test_load_embedded_builds_forest() {
        let report = report();
        assert!(!report.is_loaded());

        report.load_embedded().await.unwrap();
        assert!(report.is_loaded());

        let summary = report.summary();
        assert!(summary.active_accounts > 50);
        assert_eq!(summary.inactive_accounts, 3);
        assert_eq!(summary.skipped_rows, 0);
        assert_eq!(summary.root_count, 2);
        assert_eq!(summary.max_depth, 8);
    }

    #[tokio::test]
    async fn test_toggle_and_expand_all() {
        let report = report();
        report.load_embedded().await.unwrap();

        // Config default is expand-all
        assert!(report.is_expanded("EBT"));
        let rows_open = report.rows().len();

        assert!(!report.toggle_node("EBT").unwrap());
        assert!(!report.is_expanded("EBT"));
        assert!(report.rows().len() < rows_open);

        report.set_expand_all(true);
        assert!(report.is_expanded("EBT"));
        assert_eq!(report.rows().len(), rows_open);

        assert!(report.toggle_node("Missing Account").is_err());
    }

    #[tokio::test]
    async fn test_reload_resets_expansion() {
        let report = report();
        report.load_embedded().await.unwrap();

        report.toggle_node("EBIT").unwrap();
        assert!(!report.is_expanded("EBIT"));

        report.reload().await.unwrap();
        assert!(report.is_expanded("EBIT"));
        assert_eq!(report.expand_state().override_count(), 0);
    }

    #[tokio::test]
    async fn test_rows_match_forest_when_expanded() {
        let report = report();
        report.load_embedded().await.unwrap();

        let total: usize = report.forest().iter().map(|n| n.size()).sum();
        assert_eq!(report.rows().len(), total);
        assert_eq!(total, report.records().len());
    }
}
