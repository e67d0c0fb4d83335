//! Report routes - P&L tree view and expand/collapse control

pub mod api;
pub mod page;

pub use api::{api_expand_all, api_report, api_report_rows, api_report_summary, api_toggle_node};
pub use page::{htmx_report_tree, page_report};
