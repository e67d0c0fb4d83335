//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::report: The P&L tree view, expand/collapse control
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use finsight_config::Config;
use finsight_core::Report;
use finsight_utils::format_number;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub report: Arc<RwLock<Report>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::report::{api_expand_all, api_report, api_report_rows, api_report_summary, api_toggle_node, htmx_report_tree, page_report};
    use routes::settings::{api_settings, page_settings};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_report_summary))
        .route("/api/report", get(api_report))
        .route("/api/report/rows", get(api_report_rows))
        .route("/api/report/summary", get(api_report_summary))
        .route("/api/report/toggle", post(api_toggle_node))
        .route("/api/report/expand-all", post(api_expand_all))
        .route("/api/settings", get(api_settings))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/dashboard", get(page_dashboard))
        .route("/report", get(page_report))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/report/tree", get(htmx_report_tree))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Finsight</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard", "dashboard"),
        ("/report", "P&L Report", "report"),
        ("/settings", "Settings", "settings"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Finsight</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, id) in &links {
        let is_active = if *path == "/" {
            current_path == "/" || current_path == "/dashboard"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        let icon = match *id {
            "dashboard" => "📊",
            "report" => "📈",
            "settings" => "⚙️",
            _ => "📄",
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        // HTMX partial - just the content area (no sidebar for partial updates)
        format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            inner_content)
    } else {
        // Full page - wrap with base HTML and sidebar
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Index page with summary cards
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let report = state.report.read().await;
    let summary = report.summary();
    let forest = report.forest();

    let root_rows: Vec<String> = forest.iter().map(|root| {
        let weight_class = if root.record.weight.sign() < 0 { "text-red-600" } else { "text-green-600" };
        format!(
            "<div class='flex justify-between py-2 border-b'><span class='font-medium {}'>{}</span><span class='text-gray-500'>{} lines</span></div>",
            weight_class,
            finsight_utils::escape_html(&root.record.name),
            root.size()
        )
    }).collect();

    let source_label = summary.source.clone().unwrap_or_else(|| "embedded default table".to_string());

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Dashboard</h2></div>
        <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200'><p class='text-sm text-green-600'>Active accounts</p><p class='text-2xl font-bold text-green-700'>{}</p></div>
            <div class='bg-blue-50 p-4 rounded-lg border border-blue-200'><p class='text-sm text-blue-600'>Top-level accounts</p><p class='text-2xl font-bold text-blue-700'>{}</p></div>
            <div class='bg-yellow-50 p-4 rounded-lg border border-yellow-200'><p class='text-sm text-yellow-600'>Deepest level</p><p class='text-2xl font-bold text-yellow-700'>{}</p></div>
            <div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>Recurring lines</p><p class='text-2xl font-bold text-indigo-700'>{}</p></div>
        </div>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Top-level accounts</h3>
                <div class='space-y-1'>{}</div>
                <a href='/report' class='inline-block mt-4 text-sm text-indigo-600 hover:text-indigo-800'>Open full report →</a>
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-4'>Source table</h3>
                <div class='grid grid-cols-2 gap-4'>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Rows parsed</p><p class='text-xl font-bold'>{}</p></div>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Inactive</p><p class='text-xl font-bold'>{}</p></div>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Skipped rows</p><p class='text-xl font-bold'>{}</p></div>
                    <div class='text-center p-4 bg-gray-50 rounded-lg'><p class='text-sm text-gray-600'>Source</p><p class='text-sm font-medium break-all'>{}</p></div>
                </div>
            </div>
        </div>"#,
        format_number(summary.active_accounts),
        format_number(summary.root_count),
        summary.max_depth,
        format_number(summary.recurring_count),
        root_rows.join(""),
        format_number(summary.total_rows),
        format_number(summary.inactive_accounts),
        format_number(summary.skipped_rows),
        finsight_utils::escape_html(&source_label)
    );

    axum::response::Html(page_response(&headers, "Dashboard", "/dashboard", &inner_content))
}

/// Dashboard page (alias for index)
async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    index_page(state, headers).await
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and starts
/// listening for requests.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `report` - The shared report state
pub async fn start_server(config: Config, report: Arc<RwLock<Report>>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { report, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting Finsight server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - / (Dashboard)");
    eprintln!("[INFO]   - /report (P&L report tree)");
    eprintln!("[INFO]   - /settings (Configuration)");
    eprintln!("[INFO]   - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await
    {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}

/// Reload report API endpoint
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    let report = state.report.write().await;
    match report.reload().await {
        Ok(_) => r#"{"success": true, "message": "Report reloaded"}"#.to_string(),
        Err(e) => format!(r#"{{"success": false, "message": "{}"}}"#, e),
    }
}
