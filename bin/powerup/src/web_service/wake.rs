use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use reachability::Probe;
use serde::Serialize;
use wol::Wake;

use super::html::{modal_html, prefers_html};
use super::ServiceError;
use crate::{Error, PowerService, PowerState, WakeOutcome};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WakeResponse<'a> {
    device: &'a str,
    name: &'a str,
    already_on: bool,
    sent: bool,
    state: PowerState,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    probe_error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_error: Option<&'a str>,
}

impl<'a> From<&'a WakeOutcome> for WakeResponse<'a> {
    fn from(outcome: &'a WakeOutcome) -> Self {
        WakeResponse {
            device: &outcome.device.id,
            name: &outcome.device.name,
            already_on: outcome.already_on(),
            sent: outcome.sent(),
            state: outcome.state,
            message: &outcome.message,
            probe_error: outcome.probe_error.as_deref(),
            send_error: outcome.send_error.as_deref(),
        }
    }
}

pub async fn wake<P, W>(
    State(service): State<Arc<PowerService<P, W>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ServiceError>
where
    P: Probe + 'static,
    W: Wake + 'static,
{
    let html = prefers_html(&headers);

    match service.wake(&id).await {
        Ok(outcome) if html => Ok((StatusCode::OK, Html(modal_html(&outcome.message))).into_response()),
        Ok(outcome) => Ok((StatusCode::OK, Json(WakeResponse::from(&outcome))).into_response()),
        Err(Error::UnknownDevice(_)) if html => {
            Ok((StatusCode::NOT_FOUND, Html(modal_html("❌ Unknown device."))).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
