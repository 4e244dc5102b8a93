mod devices;
mod html;
mod index;
mod status;
mod wake;

use std::sync::Arc;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use reachability::Probe;
use serde_json::json;
use wol::Wake;

use crate::{Error, PowerService};

pub struct ServiceError(Error, uuid::Uuid);

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response<Body> {
        match self.0 {
            Error::UnknownDevice(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "unknown device", "device": id })),
            )
                .into_response(),
            err => {
                error!("ServiceError[{}]: {}", self.1, err);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string(), "id": self.1.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl From<Error> for ServiceError {
    fn from(value: Error) -> Self {
        ServiceError(value, uuid::Uuid::new_v4())
    }
}

pub fn router<P, W>(service: Arc<PowerService<P, W>>) -> Router
where
    P: Probe + 'static,
    W: Wake + 'static,
{
    Router::new()
        .route("/", get(index::index::<P, W>))
        .route("/devices", get(devices::devices::<P, W>))
        .route("/status", get(status::status_all::<P, W>))
        .route("/status/{id}", get(status::status::<P, W>))
        .route("/wake/{id}", get(wake::wake::<P, W>))
        .with_state(service)
}

#[cfg(test)]
async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    String::from_utf8(bytes.to_vec()).unwrap()
}
