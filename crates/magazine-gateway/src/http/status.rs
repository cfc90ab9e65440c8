//! Service status probe.
//!
//! The gateway is `Up` while it is running and both routed groups accept messages;
//! from the moment shutdown starts it is `Down`.

use super::AppState;
use crate::lifecycle::GatewayState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

pub const STATUS_PATH: &str = "/status";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// `Up` or `Down`.
    pub status: String,
    pub state: String,
    pub service: String,
    pub version: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(STATUS_PATH, get(service_status))
}

fn is_up(state: &AppState) -> bool {
    state.lifecycle.current() == GatewayState::Running
        && !state.query.router().is_stopped()
        && !state.commander.router().is_stopped()
}

#[utoipa::path(
    tag = "Status",
    get,
    path = "/status",
    responses(
        (status = 200, body = ServiceStatus, description = "The gateway is up"),
        (status = 503, body = ServiceStatus, description = "The gateway is shutting down")
    )
)]
pub(crate) async fn service_status(
    State(state): State<AppState>,
) -> (StatusCode, Json<ServiceStatus>) {
    let up = is_up(&state);
    let code = if up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let body = ServiceStatus {
        status: if up { "Up" } else { "Down" }.to_string(),
        state: format!("{:?}", state.lifecycle.current()),
        service: state.info.title.clone(),
        version: state.info.version.clone(),
    };
    (code, Json(body))
}
