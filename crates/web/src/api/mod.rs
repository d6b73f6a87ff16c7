use axum::{extract::State, routing::get, Json, Router};
use chrono::{Duration, Local};
use serde::Serialize;
use utility::serde::iso8601;

pub mod igc;

use crate::{common::route_not_found, WebState};

pub const VERSION: &str = "v1";
pub const DESCRIPTION: &str = "Service for IGC tracks.";

/// Paths are registered in full so they only match exactly, e.g. `/api/` or
/// `/api//igc` are not found.
pub fn routes(state: WebState) -> Router {
    Router::new()
        .route(
            "/api",
            get(status).head(route_not_found).fallback(route_not_found),
        )
        .merge(igc::routes())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct StatusDto {
    #[serde(serialize_with = "iso8601::serialize")]
    pub uptime: Duration,
    pub info: &'static str,
    pub version: &'static str,
}

async fn status(State(WebState { started_at, .. }): State<WebState>) -> Json<StatusDto> {
    Json(StatusDto {
        uptime: Local::now() - started_at,
        info: DESCRIPTION,
        version: VERSION,
    })
}
