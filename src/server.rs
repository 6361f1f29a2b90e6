//! HTTP routes for the dashboard.

use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Serialize;

use crate::measurement::LocalReading;
use crate::open_meteo::{Coordinates, OpenMeteoClient, RemoteForecast};
use crate::sensor::LocalReader;
use crate::view::{CardView, render_card};

pub const BIND_ADDR: &str = "0.0.0.0:5080";

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<LocalReader>,
    pub open_meteo: OpenMeteoClient,
    pub coordinates: Coordinates,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub local: LocalReading,
    pub open_meteo: Option<RemoteForecast>,
}

/// Turns a failed sensor read or render into a 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

/// The I2C measurement sleeps between register reads, so it runs off the
/// async workers.
async fn read_local(reader: Arc<LocalReader>) -> Result<LocalReading, anyhow::Error> {
    tokio::task::spawn_blocking(move || reader.read_local())
        .await
        .context("Sensor read task failed")?
}

/// GET /api/weather
async fn api_weather(State(state): State<AppState>) -> Result<Json<WeatherResponse>, AppError> {
    let local = read_local(Arc::clone(&state.reader)).await?;
    let remote = state.open_meteo.fetch_remote(state.coordinates).await;

    Ok(Json(WeatherResponse {
        local,
        open_meteo: remote.into_option(),
    }))
}

/// GET /
async fn card(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let local = read_local(Arc::clone(&state.reader)).await?;
    let remote = state.open_meteo.fetch_remote(state.coordinates).await;

    let view = CardView::new(local, remote, Utc::now());
    let html = render_card(&view).context("Failed to render card")?;
    Ok(Html(html))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(card))
        .route("/api/weather", get(api_weather))
        .with_state(state)
}

/// Serves the dashboard until `shutdown` resolves.
pub async fn run_http_server<F>(
    state: AppState,
    addr: &str,
    shutdown: F,
) -> Result<(), anyhow::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
