//! Error types for finsight-core
//!
//! Error codes, detailed messages, and suggestions for the core report
//! functionality.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use std::io;

use finsight_parser::ParseError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Report not loaded
    NotLoaded,
    /// Account not found
    AccountNotFound,
    /// Parse error
    ParseError,
    /// IO error
    IoError,
    /// Invalid data format
    InvalidFormat,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for finsight-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Report not loaded")]
    NotLoaded,

    #[error("Account not found: {name}")]
    AccountNotFound { name: String },

    #[error("Parse error: {message}")]
    ParseFailed { message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("Invalid data format: {message}")]
    InvalidFormat { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<ParseError> for CoreError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::IoError(e) => CoreError::IoError(e),
            other => CoreError::ParseFailed { message: other.to_string() },
        }
    }
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            CoreError::ParseFailed { .. } => ErrorCode::ParseError,
            CoreError::IoError(_) => ErrorCode::IoError,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Warning,
            CoreError::AccountNotFound { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded => {
                details = details.with_suggestion(
                    "Load the account table before querying the report.".to_string()
                );
            }
            CoreError::AccountNotFound { name } => {
                details = details.with_detail(serde_json::json!({ "account": name }));
                details = details.with_suggestion(
                    format!("Check that '{}' is an active account in the source table.", name)
                );
            }
            CoreError::IoError(_) => {
                details = details.with_suggestion(
                    "Check that the data path in the configuration exists and is readable.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
