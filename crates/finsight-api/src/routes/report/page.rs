//! Report page rendering - Full page and HTMX partials

use crate::AppState;
use axum::extract::Query;
use finsight_core::{ExpandState, TreeNode};
use finsight_utils::escape_html;
use std::collections::HashMap;

fn has_matching_descendant(node: &TreeNode, search_lower: &str) -> bool {
    if node.record.name.to_lowercase().contains(search_lower)
        || node.record.code.to_lowercase().contains(search_lower) {
        return true;
    }
    node.children.iter().any(|c| has_matching_descendant(c, search_lower))
}

fn render_report_node(
    node: &TreeNode,
    depth: usize,
    search_term: &str,
    expand: &ExpandState,
    indent_px: usize,
) -> String {
    let node_matches = if search_term.is_empty() {
        true
    } else {
        let search_lower = search_term.to_lowercase();
        node.record.name.to_lowercase().contains(&search_lower)
            || node.record.code.to_lowercase().contains(&search_lower)
    };

    let visible_children: Vec<&TreeNode> = if search_term.is_empty() {
        node.children.iter().collect()
    } else {
        let search_lower = search_term.to_lowercase();
        node.children
            .iter()
            .filter(|child| has_matching_descendant(child, &search_lower))
            .collect()
    };

    let should_show = search_term.is_empty() || node_matches || !visible_children.is_empty();
    if !should_show {
        return String::new();
    }

    let expanded = expand.is_expanded(&node.record.name);
    // A live search overrides collapse so matches stay reachable
    let descend = !visible_children.is_empty() && (expanded || !search_term.is_empty());

    let display_name = escape_html(&node.record.name);
    let indent_html = if depth > 0 {
        format!(r#"<span class="inline-block flex-shrink-0" style="width: {}px"></span>"#, depth * indent_px)
    } else {
        String::new()
    };

    let toggle_html = if node.has_children() {
        let rotation = if expanded { " rotate-90" } else { "" };
        format!(
            r#"<svg class="w-4 h-4 text-gray-400 mr-1 flex-shrink-0 transition-transform{}" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5l7 7-7 7"/></svg>"#,
            rotation
        )
    } else {
        r#"<span class="w-4 h-4 mr-1 flex-shrink-0"></span>"#.to_string()
    };

    let name_html = if node.has_children() {
        format!(r#"<span class="font-semibold text-gray-800">{}</span>"#, display_name)
    } else {
        format!(r#"<span class="font-medium text-gray-700">{}</span>"#, display_name)
    };

    let weight_html = if node.record.weight.sign() < 0 {
        r#"<span class="ml-2 px-1.5 py-0.5 text-xs rounded bg-red-50 text-red-600 border border-red-200">&minus;</span>"#
    } else {
        r#"<span class="ml-2 px-1.5 py-0.5 text-xs rounded bg-green-50 text-green-600 border border-green-200">+</span>"#
    };

    let recurring_html = if node.record.recurring {
        r#"<span class="ml-2 px-1.5 py-0.5 text-xs rounded bg-indigo-50 text-indigo-600 border border-indigo-200">recurring</span>"#
    } else {
        ""
    };

    let right_html = format!(
        r#"<span class="text-sm text-gray-500 font-mono">{}</span><span class="text-sm text-gray-400 font-mono w-12 text-right">{}</span>"#,
        escape_html(&node.record.code),
        escape_html(&node.record.report_index)
    );

    let row_attrs = if node.has_children() {
        format!(
            r#" class="flex items-center py-2 px-3 hover:bg-gray-50 border-b border-gray-100 cursor-pointer" onclick="toggleNode('{}')""#,
            display_name
        )
    } else {
        r#" class="flex items-center py-2 px-3 hover:bg-gray-50 border-b border-gray-100""#.to_string()
    };

    let mut html = format!(
        r#"<div{}><div class="flex items-center flex-1 min-w-0">{}{}{}{}{}</div><div class="flex items-center gap-4 flex-shrink-0">{}</div></div>"#,
        row_attrs, indent_html, toggle_html, name_html, weight_html, recurring_html, right_html
    );

    if descend {
        for child in visible_children {
            html.push_str(&render_report_node(child, depth + 1, search_term, expand, indent_px));
        }
    }
    html
}

pub fn render_report_tree(
    forest: &[TreeNode],
    search_term: &str,
    expand: &ExpandState,
    indent_px: usize,
) -> String {
    if forest.is_empty() {
        return String::from(r#"<div class="text-center py-12 text-gray-500"><p>No account data loaded</p></div>"#);
    }
    let mut html = String::new();
    for node in forest {
        html.push_str(&render_report_node(node, 0, search_term, expand, indent_px));
    }
    if html.is_empty() {
        return String::from(r#"<div class="text-center py-12 text-gray-500"><p>No accounts match the search</p></div>"#);
    }
    html
}

/// HTMX partial: just the rendered tree rows
pub async fn htmx_report_tree(
    state: axum::extract::State<AppState>,
    query: Option<Query<HashMap<String, String>>>,
) -> axum::response::Html<String> {
    let report = state.report.read().await;
    let forest = report.forest();
    let expand = report.expand_state();

    let search_term = query
        .as_ref()
        .and_then(|q| q.0.get("search"))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let indent_px = state.config.display.indent_px;
    axum::response::Html(render_report_tree(&forest, &search_term, &expand, indent_px))
}

/// Client-side helpers for expand/collapse control - included once per page
fn report_tree_script() -> &'static str {
    r#"<script>
    function refreshTree() {
        var search = document.getElementById('report-search');
        var q = search && search.value ? '?search=' + encodeURIComponent(search.value) : '';
        htmx.ajax('GET', '/report/tree' + q, '#report-tree');
    }

    function toggleNode(name) {
        htmx.ajax('POST', '/api/report/toggle?name=' + encodeURIComponent(name),
            { target: 'body', swap: 'none' }).then(refreshTree)
            .catch(err => console.error('Failed to toggle node:', err));
    }

    function setExpandAll(expand) {
        htmx.ajax('POST', '/api/report/expand-all?expand=' + expand,
            { target: 'body', swap: 'none' }).then(refreshTree)
            .catch(err => console.error('Failed to set expand state:', err));
    }
    </script>"#
}

/// The P&L report page
pub async fn page_report(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    query: Option<Query<HashMap<String, String>>>,
) -> axum::response::Html<String> {
    let report = state.report.read().await;
    let forest = report.forest();
    let expand = report.expand_state();
    let summary = report.summary();

    let search_term = query
        .as_ref()
        .and_then(|q| q.0.get("search"))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let indent_px = state.config.display.indent_px;
    let tree_html = render_report_tree(&forest, &search_term, &expand, indent_px);

    let header_html = format!(
        r#"<div class="mb-6 flex items-center justify-between flex-wrap gap-4">
            <div>
                <h2 class="text-2xl font-bold">P&amp;L Report</h2>
                <p class="text-gray-500 mt-1 text-sm">{} active accounts, {} top-level</p>
            </div>
            <div class="flex items-center gap-2">
                <button onclick="setExpandAll(true)" class="px-3 py-2 text-sm border border-gray-300 rounded-lg hover:bg-gray-50">Expand all</button>
                <button onclick="setExpandAll(false)" class="px-3 py-2 text-sm border border-gray-300 rounded-lg hover:bg-gray-50">Collapse all</button>
            </div>
        </div>"#,
        summary.active_accounts, summary.root_count
    );

    let search_attr = if search_term.is_empty() {
        String::new()
    } else {
        format!(r#" value="{}""#, escape_html(&search_term))
    };

    let controls_html = format!(
        r##"<div class="bg-white rounded-xl shadow-sm border border-gray-200 overflow-hidden">
            <div class="p-4 border-b border-gray-200 bg-gray-50">
                <div class="relative">
                    <svg class="absolute left-3 top-1/2 -translate-y-1/2 w-5 h-5 text-gray-400" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z"/>
                    </svg>
                    <input type="text" id="report-search" name="search" placeholder="Search accounts..."{}
                        hx-get="/report/tree" hx-target="#report-tree" hx-trigger="keyup changed, delay:300ms"
                        class="w-full pl-10 pr-4 py-2.5 border border-gray-300 rounded-lg focus:ring-2 focus:ring-indigo-500 focus:border-indigo-500">
                </div>
            </div>
            <div id="report-tree" class="divide-y divide-gray-100">{}</div>
        </div>"##,
        search_attr, tree_html
    );

    let inner_content = format!("{}{}{}", header_html, controls_html, report_tree_script());
    axum::response::Html(crate::page_response(&headers, "P&L Report", "/report", &inner_content))
}
