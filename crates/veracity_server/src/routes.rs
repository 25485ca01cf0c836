//! Route table and handlers.

use crate::{ApiError, AppState};
use axum::{
    Json, Router,
    body::Body,
    extract::{DefaultBodyLimit, Multipart, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;
use veracity_core::Verdict;
use veracity_error::{TransferErrorKind, ValidationError, VeracityError, VeracityErrorKind};

/// Extension used when an uploaded file name carries none.
const DEFAULT_UPLOAD_EXTENSION: &str = "mp4";

/// Body of `POST /analyze`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeImageRequest {
    /// Base64 image data, optionally with a data URI prefix
    #[serde(default)]
    pub base64: Option<String>,
    /// Declared image content type
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}

/// Body of `POST /analyze-video-url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeUrlRequest {
    /// Platform or direct video URL
    #[serde(default, rename = "videoUrl")]
    pub video_url: Option<String>,
}

/// Query of `GET /proxy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyParams {
    /// Target URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes();

    Router::new()
        .route("/", get(health))
        .route("/analyze", post(analyze_image))
        .route("/analyze-video", post(analyze_video))
        .route("/analyze-video-url", post(analyze_video_url))
        .route("/proxy", get(proxy))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "message": "Deepfake Detector API is running",
        "status": "healthy",
        "endpoints": {
            "analyze": "POST /analyze",
            "analyzeVideo": "POST /analyze-video",
            "analyzeVideoUrl": "POST /analyze-video-url",
            "proxy": "GET /proxy",
        },
    }))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ValidationError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ValidationError::new(rejection.body_text()))
}

#[instrument(skip_all)]
async fn analyze_image(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<Verdict>, ApiError> {
    let request = json_body(body).map_err(ApiError::image)?;
    let verdict = state
        .pipeline()
        .analyze_image(request.base64.as_deref(), request.mime_type.as_deref())
        .await
        .map_err(ApiError::image)?;
    Ok(Json(verdict))
}

#[instrument(skip_all)]
async fn analyze_video_url(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeUrlRequest>, JsonRejection>,
) -> Result<Json<Verdict>, ApiError> {
    let request = json_body(body).map_err(ApiError::video)?;
    let verdict = state
        .pipeline()
        .analyze_url(request.video_url.as_deref())
        .await
        .map_err(ApiError::video)?;
    Ok(Json(verdict))
}

#[instrument(skip_all)]
async fn analyze_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Verdict>, ApiError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::video(ValidationError::new(e.body_text())))?;
        let Some(field) = field else {
            return Err(ApiError::video(ValidationError::new("Missing video file")));
        };
        if field.name() != Some("video") {
            continue;
        }

        let extension = upload_extension(field.file_name());
        tracing::info!(
            file_name = ?field.file_name(),
            content_type = ?field.content_type(),
            "Receiving video upload"
        );

        let chunks = field.map_err(|e| {
            VeracityError::from(ValidationError::new(format!(
                "Upload interrupted: {}",
                e.body_text()
            )))
        });
        let verdict = state
            .pipeline()
            .analyze_upload(chunks, &extension)
            .await
            .map_err(ApiError::video)?;
        return Ok(Json(verdict));
    }
}

/// File extension to stage an upload under.
///
/// Keeps a short alphanumeric extension from the client's file name, else
/// falls back to `mp4`.
///
/// # Examples
///
/// ```
/// use veracity_server::upload_extension;
///
/// assert_eq!(upload_extension(Some("clip.MOV")), "mov");
/// assert_eq!(upload_extension(Some("../../etc/passwd")), "mp4");
/// assert_eq!(upload_extension(None), "mp4");
/// ```
pub fn upload_extension(file_name: Option<&str>) -> String {
    file_name
        .and_then(|name| std::path::Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .filter(|extension| {
            !extension.is_empty()
                && extension.len() <= 8
                && extension.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| DEFAULT_UPLOAD_EXTENSION.to_string())
}

#[instrument(skip(state))]
async fn proxy(State(state): State<AppState>, Query(params): Query<ProxyParams>) -> Response {
    let Some(url) = params.url.filter(|url| !url.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "Error: The \"url\" query parameter is missing.",
        )
            .into_response();
    };

    match state.fetcher().fetch(&url).await {
        Ok(media) => {
            let mut response = Response::builder().status(StatusCode::OK);
            if let Some(content_type) = media.content_type() {
                response = response.header(header::CONTENT_TYPE, content_type);
            }
            response
                .body(Body::from_stream(media.into_body()))
                .unwrap_or_else(|e| proxy_failure(&e.to_string()))
        }
        Err(e) => match e.kind() {
            VeracityErrorKind::Transfer(transfer) => match &transfer.kind {
                TransferErrorKind::Status { status, reason } => {
                    tracing::warn!(status, %reason, "Proxy target refused request");
                    let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
                    (status, format!("Error fetching the URL: {}", reason)).into_response()
                }
                _ => proxy_failure(&e.message()),
            },
            _ => proxy_failure(&e.message()),
        },
    }
}

fn proxy_failure(message: &str) -> Response {
    tracing::error!(%message, "Proxy request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Server error: Could not proxy the request. {}", message),
    )
        .into_response()
}
