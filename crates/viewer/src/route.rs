//! HTTP routes over the debug log engine.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tailer::{DebugLog, DispatchError, EntryCollection, SseDispatcher, Watcher};
use tokio::io::AsyncReadExt;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tokio_util::io::ReaderStream;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdatesQuery {
    pub lines: Option<u64>,
    pub seek: Option<u64>,
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SseQuery {
    /// Tick interval in seconds.
    pub sseti: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    pub save: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Downwards,
    Upwards,
}

impl Direction {
    fn parse(value: Option<&str>) -> ApiResult<Self> {
        match value.unwrap_or("downwards") {
            "downwards" => Ok(Direction::Downwards),
            "upwards" => Ok(Direction::Upwards),
            other => Err(ApiError::InvalidRequest(format!("unknown direction '{}'", other))),
        }
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let cors = if state.config.server.enable_cors {
        let origins = state.config.server.cors_origins
            .iter()
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
    };

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    // One-shot routes get a timeout; the event stream is open-ended
    let api_router = Router::new()
        .route("/api/debug-log", get(updates_handler))
        .route("/api/debug-log/clear", post(clear_handler))
        .route("/api/debug-log/download", get(download_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout));

    Router::new()
        .route("/api/debug-log/sse", get(sse_handler))
        .merge(api_router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
        )
        .with_state(state)
}

async fn open_log(state: &AppState) -> ApiResult<DebugLog> {
    Ok(DebugLog::open(&state.config.tailer).await?)
}

/// GET /api/debug-log: one window of parsed entries
async fn updates_handler(
    State(state): State<AppState>,
    Query(query): Query<UpdatesQuery>,
) -> ApiResult<Json<EntryCollection>> {
    let mut log = open_log(&state).await?;
    let direction = Direction::parse(query.dir.as_deref())?;

    let lines = query.lines
        .filter(|n| *n > 0)
        .unwrap_or(state.config.tailer.watch.default_lines);
    let seek = query.seek.filter(|s| *s > 0);

    let batch = match (direction, seek) {
        (Direction::Downwards, None) => log.last_lines(lines, None, false).await?,
        (Direction::Downwards, Some(seek)) => log.from_line(seek, None).await?,
        (Direction::Upwards, seek) => log.last_lines(lines, seek, false).await?,
    };

    Ok(Json(batch))
}

/// GET /api/debug-log/sse: live watch session as server-sent events
async fn sse_handler(
    State(state): State<AppState>,
    Query(query): Query<SseQuery>,
) -> ApiResult<Response> {
    let log = open_log(&state).await?;

    let mut watcher = Watcher::new(log, &state.config.tailer.watch, state.shutdown.child_token());
    if let Some(secs) = query.sseti {
        watcher = watcher.with_interval(Duration::from_secs(secs));
    }

    let (dispatcher, rx) = SseDispatcher::channel(state.config.server.stream_buffer);
    let metrics = state.metrics.clone();
    metrics.stream_started();

    let session_metrics = metrics.clone();
    tokio::spawn(async move {
        match dispatcher.run(watcher).await {
            Ok(()) | Err(DispatchError::Disconnected) => {}
            Err(e) => {
                session_metrics.stream_failed();
                warn!("Watch stream failed: {}", e);
            }
        }
        session_metrics.stream_ended();
    });

    let frames = ReceiverStream::new(rx).map(move |frame| {
        metrics.frame_sent(frame.len());
        Ok::<_, Infallible>(frame)
    });

    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("X-Accel-Buffering", "no")
        .body(Body::from_stream(frames))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// POST /api/debug-log/clear: truncate, optionally keeping a backup copy
async fn clear_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearQuery>,
) -> ApiResult<impl IntoResponse> {
    let mut log = open_log(&state).await?;
    let backup = log.clear(is_truthy(query.save.as_deref())).await?;

    Ok(Json(json!({
        "cleared": true,
        "backup": backup.map(|p| p.display().to_string()),
    })))
}

/// GET /api/debug-log/download: raw file as an attachment
async fn download_handler(State(state): State<AppState>) -> ApiResult<Response> {
    let path = &state.config.tailer.log_file;

    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ApiError::NotFound),
        Err(e) => return Err(ApiError::Internal(format!("open {}: {}", path.display(), e))),
    };
    let metadata = file.metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("stat {}: {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(ApiError::NotFound);
    }

    let filename = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "debug.log".to_string());

    // Bytes appended after the stat are not sent; Content-Length must hold
    let length = metadata.len();
    let body = Body::from_stream(ReaderStream::new(file.take(length)));

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain")
        .header(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename))
        .header(header::CONTENT_LENGTH, length)
        .body(body)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Health check handler - reports whether the log is readable
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let path = &state.config.tailer.log_file;
    let size = tokio::fs::metadata(path)
        .await
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.len());

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "log": {
            "path": path.display().to_string(),
            "exists": size.is_some(),
            "size": size,
        },
        "streams": {
            "active": state.metrics.active_count(),
        }
    }))
}

/// Metrics endpoint
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = &state.metrics;

    Json(json!({
        "streams": {
            "active": metrics.active_count(),
            "total_created": metrics.total_streams(),
            "failed": metrics.failed_count(),
        },
        "frames": {
            "total": metrics.frames_sent(),
            "total_bytes": metrics.bytes_sent(),
        }
    }))
}
