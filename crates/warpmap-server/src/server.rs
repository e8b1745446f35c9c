//! HTTP server and request handling.

use crate::protocol::{ErrorResponse, FormInput, StandardMapQuery};
use axum::extract::{DefaultBodyLimit, FromRequest, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};
use uuid::Uuid;
use warpmap_core::{random_map, MapError, MapRequest};

/// Largest request body accepted by the map endpoint.
pub const MAX_BODY_BYTES: usize = 10 * 1024;

const SVG_CONTENT_TYPE: &str = "image/svg+xml";
const ERROR_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Reasons a request is turned away before or while rendering.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid json object")]
    InvalidJson,

    #[error("invalid form data")]
    InvalidForm,

    #[error("unsupported content type: {0:?}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Map(#[from] MapError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!("Rejected map request: {}", self);

        let body = ErrorResponse::new(status.as_u16(), self.to_string());
        let json = serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string());
        (status, [(CONTENT_TYPE, ERROR_CONTENT_TYPE)], json).into_response()
    }
}

fn svg_response(svg: String) -> Response {
    ([(CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response()
}

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/map-data", post(post_map_data))
        .route("/api/random-map", get(random_map_svg))
        .route("/api/standard-map", get(standard_map_svg))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

/// Run the HTTP server until Ctrl-C or SIGTERM.
pub async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Warpmap server listening on {}", addr);

    serve_until(listener, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

/// Serve on `listener` until `shutdown` resolves, then drain open connections
async fn serve_until<F>(listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Unable to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl-C received, draining connections"),
        _ = terminate => info!("SIGTERM received, draining connections"),
    }
}

async fn health() -> &'static str {
    "ok"
}

/// The media type of a request without parameters such as `charset`.
fn media_type(request: &Request) -> String {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Accept a map description as JSON or as form-encoded CSV and return the SVG.
async fn post_map_data(request: Request) -> Result<Response, ApiError> {
    let request_id = Uuid::new_v4();

    let map: MapRequest = match media_type(&request).as_str() {
        "application/json" => {
            let Json(map) = Json::<MapRequest>::from_request(request, &())
                .await
                .map_err(|_| ApiError::InvalidJson)?;
            map
        }
        "application/x-www-form-urlencoded" => {
            let Form(form) = Form::<FormInput>::from_request(request, &())
                .await
                .map_err(|_| ApiError::InvalidForm)?;
            form.into_map_request()?
        }
        other => return Err(ApiError::UnsupportedMediaType(other.to_string())),
    };

    let svg = map.render_svg()?;
    info!(%request_id, stars = map.nodes.len(), mono = map.mono, "Rendered map");
    Ok(svg_response(svg))
}

/// Render a freshly generated random map.
async fn random_map_svg() -> Result<Response, ApiError> {
    let map = random_map(&mut rand::thread_rng());
    let svg = map.render_svg()?;
    info!(stars = map.nodes.len(), "Rendered random map");
    Ok(svg_response(svg))
}

/// Render the built-in standard map.
async fn standard_map_svg(Query(query): Query<StandardMapQuery>) -> Result<Response, ApiError> {
    let mut map = MapRequest::standard();
    map.mono = query.mono;
    Ok(svg_response(map.render_svg()?))
}
