use axum::http::{header, HeaderMap};

use crate::Device;

static INDEX_HTML: &str = include_str!("./index.html");
static MODAL_HTML: &str = include_str!("./modal.html");

/// Browsers submitting the device form ask for html, API clients get json.
pub fn prefers_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|accept| accept.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}

pub fn index_html<'a>(devices: impl IntoIterator<Item = &'a Device>) -> String {
    let cards = devices
        .into_iter()
        .map(|device| {
            format!(
                r#"<div class="card"><h2>{name}</h2><form action="/wake/{id}"><button type="submit">Wake Up</button></form></div>"#,
                name = escape(&device.name),
                id = escape(&device.id),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    INDEX_HTML.replace("#CARDS#", &cards)
}

pub fn modal_html(message: &str) -> String {
    MODAL_HTML.replace("#MESSAGE#", &escape(message))
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}
