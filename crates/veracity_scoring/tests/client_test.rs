//! SightengineClient against a local stand-in for the detection API.

use axum::{Json, Router, extract::Multipart, extract::State, routing::post};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use veracity_error::{ScoringErrorKind, VeracityErrorKind};
use veracity_scoring::{DetectionResponse, FrameEntry, MediaScorer, ScoringConfig, SightengineClient};

type Captured = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

async fn capture(
    path: &'static str,
    captured: Captured,
    mut multipart: Multipart,
) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().unwrap_or_default().to_string();
        let value = match file_name {
            Some(file_name) => format!("file:{}:{}", file_name, content_type),
            None => field.text().await.unwrap_or_default(),
        };
        fields.insert(name, value);
    }
    captured.lock().unwrap().push((path.to_string(), fields.clone()));
    fields
}

async fn spawn_api(image: DetectionResponse, video: DetectionResponse) -> (String, Captured) {
    let captured: Captured = Arc::default();

    let app = Router::new()
        .route(
            "/check.json",
            post({
                let image = image.clone();
                move |State(captured): State<Captured>, multipart: Multipart| async move {
                    capture("check.json", captured, multipart).await;
                    Json(image)
                }
            }),
        )
        .route(
            "/video/check-sync.json",
            post({
                let video = video.clone();
                move |State(captured): State<Captured>, multipart: Multipart| async move {
                    capture("video/check-sync.json", captured, multipart).await;
                    Json(video)
                }
            }),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn client(base_url: &str) -> SightengineClient {
    let config = ScoringConfig::new("user-1", "secret-1").with_base_url(base_url);
    SightengineClient::new(config, reqwest::Client::new())
}

#[tokio::test]
async fn test_score_image_sends_media_and_credentials() -> anyhow::Result<()> {
    let (base_url, captured) = spawn_api(
        DetectionResponse::image(0.91, Some("stable_diffusion".to_string())),
        DetectionResponse::video(Some(Vec::new())),
    )
    .await;

    let score = client(&base_url)
        .score_image(b"\xff\xd8\xff".to_vec(), "image/png")
        .await?;
    assert_eq!(score.score().value(), 0.91);
    assert_eq!(score.ai_class().as_deref(), Some("stable_diffusion"));

    let captured = captured.lock().unwrap();
    let (path, fields) = &captured[0];
    assert_eq!(path, "check.json");
    assert_eq!(fields["media"], "file:image.jpg:image/png");
    assert_eq!(fields["models"], "genai");
    assert_eq!(fields["api_user"], "user-1");
    assert_eq!(fields["api_secret"], "secret-1");
    Ok(())
}

#[tokio::test]
async fn test_score_video_url_sends_stream_url() -> anyhow::Result<()> {
    let (base_url, captured) = spawn_api(
        DetectionResponse::image(0.0, None),
        DetectionResponse::video(Some(vec![
            FrameEntry::with_score(0.8),
            FrameEntry::with_score(0.6),
        ])),
    )
    .await;

    let frames = client(&base_url)
        .score_video_url("https://cdn.example/video_1.mp4")
        .await?;
    assert_eq!(frames.len(), 2);

    let captured = captured.lock().unwrap();
    let (path, fields) = &captured[0];
    assert_eq!(path, "video/check-sync.json");
    assert_eq!(fields["stream_url"], "https://cdn.example/video_1.mp4");
    assert_eq!(fields["models"], "genai");
    Ok(())
}

#[tokio::test]
async fn test_service_failure_surfaces_message() -> anyhow::Result<()> {
    let (base_url, _) = spawn_api(
        DetectionResponse::failure("Daily usage limit reached"),
        DetectionResponse::failure("Video too long"),
    )
    .await;
    let client = client(&base_url);

    let err = client.score_image(vec![1, 2, 3], "image/jpeg").await.unwrap_err();
    assert_eq!(err.message(), "Daily usage limit reached");

    let err = client.score_video_url("https://cdn.example/v.mp4").await.unwrap_err();
    match err.kind() {
        VeracityErrorKind::Scoring(e) => {
            assert_eq!(e.kind, ScoringErrorKind::Api("Video too long".to_string()))
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_is_http_error() {
    let client = client("http://127.0.0.1:9");

    let err = client.score_video_url("https://cdn.example/v.mp4").await.unwrap_err();
    assert!(matches!(
        err.kind(),
        VeracityErrorKind::Scoring(e) if matches!(e.kind, ScoringErrorKind::Http(_))
    ));
}

#[test]
fn test_config_debug_redacts_secret() {
    let config = ScoringConfig::new("user-1", "very-secret");
    let debug = format!("{:?}", config);

    assert!(debug.contains("user-1"));
    assert!(!debug.contains("very-secret"));
    assert_eq!(config.base_url, ScoringConfig::DEFAULT_BASE_URL);
}
