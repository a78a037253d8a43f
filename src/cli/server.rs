//! HTTP server mode for REST API access to exports

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::engine::{ExportArtifact, ExportEngine};
use crate::error::{Error, Result};
use crate::output::XLSX_CONTENT_TYPE;
use crate::settings::Settings;

/// Header listing non-fatal export problems
const WARNINGS_HEADER: HeaderName = HeaderName::from_static("x-export-warnings");

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Service settings (port, output directory, timeouts)
    pub settings: Settings,
}

impl ServerConfig {
    /// Wrap service settings
    pub fn from_settings(settings: Settings) -> Self {
        Self { settings }
    }
}

/// App state shared across handlers
struct AppState {
    engine: ExportEngine,
}

/// Error body
#[derive(Debug, Serialize)]
struct ApiError {
    success: bool,
    error: String,
}

impl ApiError {
    fn response(status: StatusCode, msg: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                success: false,
                error: msg.into(),
            }),
        )
            .into_response()
    }
}

/// Build the router for an engine
pub fn router(engine: ExportEngine) -> Router {
    // Allow all origins; the UI may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_DISPOSITION, WARNINGS_HEADER]);

    Router::new()
        .route("/health", get(health))
        .route("/api/test-api", post(test_api))
        .route("/api/export", post(export))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { engine }))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig) -> Result<()> {
    let engine = ExportEngine::from_settings(&config.settings)?;
    let app = router(engine);

    let port = config.settings.port;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(
        "Starting HTTP server on http://{} (output dir {})",
        addr,
        config.settings.output_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Other(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Parse a request body as JSON
fn parse_body(body: &Bytes) -> std::result::Result<Value, Response> {
    serde_json::from_slice(body).map_err(|e| {
        ApiError::response(
            StatusCode::BAD_REQUEST,
            format!("Request body is not valid JSON: {e}"),
        )
    })
}

/// Send the configured request once
async fn test_api(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let result = state.engine.test_api(&payload).await;
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result)).into_response()
}

/// Run an export and return the workbook
async fn export(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let outcome = state.engine.export(&payload).await;
    let Some(artifact) = outcome.artifact else {
        let message = outcome
            .error
            .unwrap_or_else(|| "Export failed".to_string());
        return ApiError::response(StatusCode::INTERNAL_SERVER_ERROR, message);
    };

    match tokio::fs::read(&artifact.path).await {
        Ok(bytes) => (StatusCode::OK, download_headers(&artifact), bytes).into_response(),
        Err(e) => {
            error!("Failed to read {}: {e}", artifact.path.display());
            ApiError::response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read export file: {e}"),
            )
        }
    }
}

/// Attachment headers for a written workbook
fn download_headers(artifact: &ExportArtifact) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(XLSX_CONTENT_TYPE),
    );

    let disposition = format!("attachment; filename=\"{}\"", header_safe(&artifact.file_name));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    if !artifact.warnings.is_empty() {
        let joined = header_safe(&artifact.warnings.join("; "));
        if let Ok(value) = HeaderValue::from_str(&joined) {
            headers.insert(WARNINGS_HEADER, value);
        }
    }

    headers
}

/// Replace bytes a header value cannot carry
fn header_safe(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == '"' {
                '\''
            } else if c == ' ' || c.is_ascii_graphic() {
                c
            } else {
                '?'
            }
        })
        .collect()
}
