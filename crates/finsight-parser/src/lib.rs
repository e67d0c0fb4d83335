//! Account table parser implementation
//!
//! A lightweight line-oriented parser for the comma-separated P&L
//! account table (14 fields per row, no quoting).

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod types;
pub mod table;

pub use error::ParseError;
pub use table::SimpleTableParser;

// Re-export commonly used types
pub use types::{ParsedTable, TableRow, FIELD_COUNT, INACTIVE_STATUS, LEVEL_COUNT};

/// The account table shipped with the binary, used when no data file is
/// configured or the configured file is missing
pub const DEFAULT_TABLE: &str = include_str!("../data/default_accounts.csv");

// ==================== Parser Trait ====================

/// Parser reference type
pub type ParserRef = Arc<dyn TableParserTrait>;

/// Trait for account table parsers
#[async_trait]
pub trait TableParserTrait: Send + Sync {
    /// Parse table content and return the retained rows
    async fn parse(&self, content: &str) -> Result<ParsedTable, ParseError>;

    /// Parse from a file path
    async fn parse_file(&self, path: PathBuf) -> Result<ParsedTable, ParseError>;
}

/// Default parser implementation
#[derive(Debug, Default)]
pub struct DefaultTableParser;

#[async_trait]
impl TableParserTrait for DefaultTableParser {
    async fn parse(&self, content: &str) -> Result<ParsedTable, ParseError> {
        SimpleTableParser::parse(content)
    }

    async fn parse_file(&self, path: PathBuf) -> Result<ParsedTable, ParseError> {
        let content = tokio::fs::read_to_string(&path).await.map_err(ParseError::IoError)?;

        let source_path = path.to_string_lossy().to_string();
        SimpleTableParser::parse_with_source(&content, Some(&source_path))
    }
}
