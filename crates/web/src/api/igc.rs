use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::get,
    Json, Router,
};
use model::track::TrackSummary;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{
    common::{route_not_found, RouteErrorResponse, RouteResult},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    // wrong methods fall through to "not found" instead of 405, HEAD included
    Router::new()
        .route(
            "/api/igc",
            get(get_tracks)
                .post(create_track)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .route(
            "/api/igc/:id",
            get(get_track)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .route(
            "/api/igc/:id/:field",
            get(get_track_field)
                .head(route_not_found)
                .fallback(route_not_found),
        )
}

/// Body of a track upload. Every member has to be a string, only `url` is
/// read.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CreateTrackRequest {
    pub members: HashMap<String, String>,
}

impl CreateTrackRequest {
    pub fn url(&self) -> Option<&str> {
        self.members.get("url").map(String::as_str)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateTrackResponse {
    pub id: Id<TrackSummary>,
}

/// Field names are one or more ASCII letters or underscores.
fn is_field_name(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_alphabetic() || b == b'_')
}

async fn get_tracks(
    State(WebState { track_client, .. }): State<WebState>,
) -> Json<Vec<Id<TrackSummary>>> {
    let mut ids = track_client.track_ids().await;
    ids.sort();
    Json(ids)
}

async fn create_track(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { track_client, .. }): State<WebState>,
    body: Bytes,
) -> RouteResult<Json<CreateTrackResponse>> {
    let invalid_body = || {
        RouteErrorResponse::bad_request("Invalid body.")
            .with_method(&Method::POST)
            .with_uri(original_uri.path())
    };
    let request: CreateTrackRequest =
        serde_json::from_slice(&body).map_err(|_| invalid_body())?;
    let url = request.url().ok_or_else(invalid_body)?;

    track_client
        .create_track(url)
        .await
        .map(|id| Json(CreateTrackResponse { id }))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::POST)
                .with_uri(original_uri.path())
        })
}

async fn get_track(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { track_client, .. }): State<WebState>,
) -> RouteResult<Json<TrackSummary>> {
    track_client.track(&id).await.map(Json).map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    })
}

async fn get_track_field(
    OriginalUri(original_uri): OriginalUri,
    Path((id, field)): Path<(String, String)>,
    State(WebState { track_client, .. }): State<WebState>,
) -> RouteResult<String> {
    if !is_field_name(&field) {
        return Err(RouteErrorResponse::not_found(&Method::GET, original_uri.path()));
    }
    track_client.track_field(&id, &field).await.map_err(|why| {
        RouteErrorResponse::from(why)
            .with_method(&Method::GET)
            .with_uri(original_uri.path())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_grammar() {
        assert!(is_field_name("pilot"));
        assert!(is_field_name("track_length"));
        assert!(is_field_name("_"));
        assert!(!is_field_name(""));
        assert!(!is_field_name("2"));
        assert!(!is_field_name("glider-id"));
        assert!(!is_field_name("pilöt"));
    }

    #[test]
    fn upload_body_members_must_be_strings() {
        let request: CreateTrackRequest =
            serde_json::from_str(r#"{"url": "http://a", "note": "b"}"#).unwrap();
        assert_eq!(request.url(), Some("http://a"));

        let request: CreateTrackRequest = serde_json::from_str(r#"{"note": "b"}"#).unwrap();
        assert_eq!(request.url(), None);

        assert!(serde_json::from_str::<CreateTrackRequest>(r#"{"url": "http://a", "n": 1}"#)
            .is_err());
        assert!(serde_json::from_str::<CreateTrackRequest>(r#"["http://a"]"#).is_err());
    }
}
