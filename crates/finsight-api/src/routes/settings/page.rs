//! Settings page rendering - Full page endpoints

use crate::AppState;

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;

    let server_host = &config.server.host;
    let server_port = config.server.port;

    let data_path = &config.data.path;
    let data_file = &config.data.accounts_file;
    let use_embedded = config.data.use_embedded;

    let display_expand = config.display.expand_all;
    let display_indent = config.display.indent_px;
    let display_depth = config.display.max_depth;

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Host</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Data</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Data directory</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Account table file</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Table source</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Display</h3>
            <div class='grid grid-cols-2 gap-4 mb-4'>
                <div><p class='text-sm text-gray-500'>Expand all by default</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Indent per level</p><p class='font-medium'>{} px</p></div>
                <div><p class='text-sm text-gray-500'>Max ancestor depth</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Logging</h3>
            <div><p class='text-sm text-gray-500'>Level</p><p class='font-medium'>{}</p></div>
        </div>"#,
        server_host,
        server_port,
        data_path.display(),
        data_file,
        if use_embedded { "embedded default" } else { "data file" },
        if display_expand { "yes" } else { "no" },
        display_indent,
        display_depth,
        config.logging.level
    );

    axum::response::Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}
