use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use reachability::Probe;
use wol::Wake;

use super::html::index_html;
use crate::PowerService;

pub async fn index<P, W>(State(service): State<Arc<PowerService<P, W>>>) -> Html<String>
where
    P: Probe + 'static,
    W: Wake + 'static,
{
    Html(index_html(service.registry().devices()))
}
