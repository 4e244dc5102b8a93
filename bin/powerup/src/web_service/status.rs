use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use reachability::Probe;
use serde_json::{json, Value};
use wol::Wake;

use super::ServiceError;
use crate::{PowerService, StatusMap};

pub async fn status_all<P, W>(State(service): State<Arc<PowerService<P, W>>>) -> Json<StatusMap>
where
    P: Probe + 'static,
    W: Wake + 'static,
{
    Json(service.status_all().await)
}

pub async fn status<P, W>(
    State(service): State<Arc<PowerService<P, W>>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError>
where
    P: Probe + 'static,
    W: Wake + 'static,
{
    let status = service.status(&id).await?;
    Ok(Json(json!({ "device": id, "status": status })))
}
