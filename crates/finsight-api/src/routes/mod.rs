//! Route modules for the API server
//!
//! All routes are organized into modules:
//! - report: The P&L report tree, expand/collapse control
//! - settings: Configuration display
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTMX page rendering

pub mod report;
pub mod settings;
