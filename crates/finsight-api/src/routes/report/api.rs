//! Report API endpoints - JSON API and expand/collapse control

use crate::AppState;
use axum::extract::Query;
use finsight_core::RowsResponse;
use std::collections::HashMap;

/// Get the full account forest (JSON API)
pub async fn api_report(state: axum::extract::State<AppState>) -> String {
    let report = state.report.read().await;
    let forest = report.forest_response();
    serde_json::to_string(&forest).unwrap_or_default()
}

/// Get the flattened display rows under the current expansion state
pub async fn api_report_rows(state: axum::extract::State<AppState>) -> String {
    let report = state.report.read().await;
    let rows = report.rows();
    let response = RowsResponse {
        total_count: rows.len(),
        expand_all: report.expand_state().expand_all(),
        rows,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Get report summary counts (JSON API)
pub async fn api_report_summary(state: axum::extract::State<AppState>) -> String {
    let report = state.report.read().await;
    serde_json::to_string(&report.summary()).unwrap_or_default()
}

/// Read a named parameter from query params or a form-encoded body
fn param_from(query: &HashMap<String, String>, body: &str, key: &str) -> String {
    if let Some(value) = query.get(key) {
        return value.clone();
    }
    for pair in body.split('&') {
        let parts: Vec<&str> = pair.split('=').collect();
        if parts.len() == 2 && parts[0] == key {
            return urlencoding::decode(parts[1]).unwrap_or_default().into_owned();
        }
    }
    String::new()
}

/// Toggle one node's expansion (POST) - supports query params and form body
pub async fn api_toggle_node(
    state: axum::extract::State<AppState>,
    query: axum::extract::Query<HashMap<String, String>>,
    body: String,
) -> String {
    let name = param_from(&query.0, &body, "name");

    eprintln!("[DEBUG] api_toggle_node called with name: '{}'", name);

    if name.is_empty() {
        return r#"{"success": false, "message": "Missing 'name' parameter"}"#.to_string();
    }

    let report = state.report.read().await;
    match report.toggle_node(&name) {
        Ok(expanded) => format!(r#"{{"success": true, "expanded": {}}}"#, expanded),
        Err(e) => {
            serde_json::to_string(&serde_json::json!({
                "success": false,
                "error": e.to_details(),
            })).unwrap_or_default()
        }
    }
}

/// Set the global expand default (POST) - clears per-node overrides
pub async fn api_expand_all(
    state: axum::extract::State<AppState>,
    query: Query<HashMap<String, String>>,
    body: String,
) -> String {
    let value = param_from(&query.0, &body, "expand");
    let expand = value == "true" || value == "1";

    eprintln!("[DEBUG] api_expand_all called with expand: {}", expand);

    let report = state.report.read().await;
    report.set_expand_all(expand);

    format!(r#"{{"success": true, "expand_all": {}}}"#, expand)
}
