pub use crate::common::RouteResult;

use axum::{extract::FromRef, Router};
use chrono::{DateTime, Local};
use common::route_not_found;
use config::WebConfig;
use middleware::request_log::request_log_middleware;
use tokio::net::TcpListener;
use tracks::client::Client;

pub mod api;
pub mod common;
pub mod config;
pub mod middleware;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub track_client: Client,
    pub started_at: DateTime<Local>,
}

impl WebState {
    pub fn new(track_client: Client) -> Self {
        Self {
            track_client,
            started_at: Local::now(),
        }
    }
}

pub fn app(state: WebState) -> Router {
    Router::new()
        .merge(api::routes(state))
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn(request_log_middleware))
}

pub async fn start_web_server(state: WebState, config: WebConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.address()).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state).into_make_service()).await?;

    Ok(())
}
