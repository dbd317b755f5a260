use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use contest_board::server::router;
use contest_board::standings::{Handles, SourceError, StandingRecord, StandingsSource};
use contest_board::store::{DocumentKey, DocumentStore, FileProvider, MemoryProvider};
use contest_board::AppContext;

const PASSWORD: &str = "test-password";

struct FixedSource(Vec<StandingRecord>);

#[async_trait]
impl StandingsSource for FixedSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn fetch_standings(&self) -> Result<Vec<StandingRecord>, SourceError> {
        Ok(self.0.clone())
    }
}

struct DownSource;

#[async_trait]
impl StandingsSource for DownSource {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn fetch_standings(&self) -> Result<Vec<StandingRecord>, SourceError> {
        Err(SourceError::Status(503))
    }
}

fn ig(handle: &str, score: f64) -> StandingRecord {
    StandingRecord::new(
        Handles {
            instagram: Some(handle.to_string()),
            ..Default::default()
        },
        score,
    )
}

fn app_with(source: Arc<dyn StandingsSource>) -> (Router, MemoryProvider) {
    let memory = MemoryProvider::new();
    let shared = memory.clone();
    let context = AppContext::new(
        PASSWORD,
        move || DocumentStore::new(vec![Box::new(shared.clone())]),
        source,
    );
    (router(context), memory)
}

fn app() -> (Router, MemoryProvider) {
    app_with(Arc::new(FixedSource(vec![
        ig("a", 100.0),
        ig("b", 80.0),
        ig("c", 80.0),
    ])))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value, password: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(password) = password {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", password));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn ranking(body: &Value) -> Vec<(String, f64, u64)> {
    body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["instagram"].as_str().unwrap().to_string(),
                e["expTotal"].as_f64().unwrap(),
                e["rank"].as_u64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_leaderboard_ranks_totals_without_baseline() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/leaderboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ranking(&body),
        vec![
            ("a".to_string(), 100.0, 1),
            ("b".to_string(), 80.0, 2),
            ("c".to_string(), 80.0, 3),
        ]
    );
    assert_eq!(body["prizes"].as_array().unwrap().len(), 3);
    assert_eq!(body["timer"]["isActive"], json!(true));
    assert!(body["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_leaderboard_source_down() {
    let (app, _) = app_with(Arc::new(DownSource));
    let (status, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], json!("Failed to fetch leaderboard data"));
}

#[tokio::test]
async fn test_stored_baseline_is_subtracted() {
    let (app, memory) = app_with(Arc::new(FixedSource(vec![ig("a", 100.0)])));
    memory.insert(
        DocumentKey::Timer,
        json!({
            "title": "t",
            "description": "d",
            "endDate": "2099-01-01T00:00:00Z",
            "isActive": true,
            "startExp": [{"instagram": "a", "expTotal": 40}],
        }),
    );

    let (_, body) = send(&app, get("/api/leaderboard")).await;
    assert_eq!(ranking(&body), vec![("a".to_string(), 60.0, 1)]);
}

#[tokio::test]
async fn test_restart_zeroes_leaderboard() {
    let (app, memory) = app();
    let (status, body) = send(&app, post("/api/timer/restart", json!({}), Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], json!(true));
    assert_eq!(body["startExp"].as_array().unwrap().len(), 3);
    assert!(memory.stored(DocumentKey::Timer).is_some());

    let (_, body) = send(&app, get("/api/leaderboard")).await;
    let scores: Vec<_> = ranking(&body).into_iter().map(|(_, score, _)| score).collect();
    assert_eq!(scores, vec![0.0, 0.0, 0.0]);
}

#[tokio::test]
async fn test_restart_requires_password() {
    let (app, memory) = app();
    let (status, _) = send(&app, post("/api/timer/restart", json!({}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, post("/api/timer/restart", json!({}), Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(memory.stored(DocumentKey::Timer).is_none());
}

#[tokio::test]
async fn test_restart_fails_when_source_down() {
    let (app, memory) = app_with(Arc::new(DownSource));
    let (status, _) = send(&app, post("/api/timer/restart", json!({}), Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(memory.stored(DocumentKey::Timer).is_none());
}

#[tokio::test]
async fn test_prizes_roundtrip() {
    let (app, _) = app();
    let prizes = json!([
        {"position": 2, "description": "Silber", "value": "2500€"},
        {"position": 1, "description": "Gold", "value": "5000€"},
    ]);
    let (status, body) = send(&app, post("/api/prizes", prizes, Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = send(&app, get("/api/prizes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["description"], json!("Gold"));
    assert_eq!(body[1]["description"], json!("Silber"));
}

#[tokio::test]
async fn test_invalid_prizes_rejected() {
    let (app, memory) = app();
    let (status, body) = send(
        &app,
        post("/api/prizes", json!([{"position": "1"}]), Some(PASSWORD)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("Validation failed"));
    assert_eq!(body["details"].as_array().unwrap().len(), 3);
    assert!(memory.stored(DocumentKey::Prizes).is_none());
}

#[tokio::test]
async fn test_timer_save_and_read() {
    let (app, _) = app();
    let timer = json!({
        "title": "Contest endet in:",
        "description": "Auszahlung",
        "endDate": "2020-01-01T00:00:00Z",
        "isActive": true,
    });
    let (status, _) = send(&app, post("/api/timer", timer, Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/timer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], json!("Auszahlung"));
    assert_eq!(body["isActive"], json!(true));
}

#[tokio::test]
async fn test_timer_invalid_date_rejected() {
    let (app, _) = app();
    let timer = json!({
        "title": "t",
        "description": "d",
        "endDate": "tomorrow",
        "isActive": true,
    });
    let (status, body) = send(&app, post("/api/timer", timer, Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!(["endDate: invalid date 'tomorrow'"]));
}

#[tokio::test]
async fn test_login() {
    let (app, _) = app();
    let (status, body) = send(&app, post("/api/auth", json!({"password": PASSWORD}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let token = body["token"].as_str().unwrap().to_string();
    let (status, _) = send(&app, post("/api/prizes", json!([]), Some(token.as_str()))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, post("/api/auth", json!({"password": "nope"}), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, post("/api/auth", json!({}), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_write_without_storage_leaves_earlier_document() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = DocumentStore::new(vec![Box::new(FileProvider::new(dir.path()))]);
    contest_board::prizes::save_prizes(
        &file_store,
        &json!([{"position": 1, "description": "Gold", "value": "5000€"}]),
    )
    .await
    .unwrap();

    let context = AppContext::new(
        PASSWORD,
        || DocumentStore::new(vec![]),
        Arc::new(FixedSource(vec![])),
    );
    let app = router(context);
    let (status, body) = send(
        &app,
        post("/api/prizes", json!([]), Some(PASSWORD)),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("No storage available"));

    let prizes = contest_board::prizes::load_prizes(&file_store).await;
    assert_eq!(prizes.len(), 1);
    assert_eq!(prizes[0].description, "Gold");
}

#[tokio::test]
async fn test_debug_lists_storage_chain() {
    let (app, _) = app();
    let (status, body) = send(&app, get("/api/debug")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["providers"], json!(["memory"]));
    assert_eq!(body["hasBlob"], json!(false));
    assert_eq!(body["source"], json!("fixed"));
}

#[tokio::test]
async fn test_prizes_with_fractional_and_negative_positions() {
    let (app, _) = app();
    let prizes = json!([
        {"position": 1.5, "description": "Zwischenpreis", "value": "100€"},
        {"position": -1, "description": "Bonus", "value": "50€"},
    ]);
    let (status, _) = send(&app, post("/api/prizes", prizes, Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/api/prizes")).await;
    assert_eq!(body[0]["description"], json!("Bonus"));
    assert_eq!(body[0]["position"], json!(-1));
    assert_eq!(body[1]["position"], json!(1.5));
}

#[tokio::test]
async fn test_timer_date_without_offset_is_utc() {
    let (app, _) = app();
    let timer = json!({
        "title": "t",
        "description": "d",
        "endDate": "2026-11-01T18:00:00",
        "isActive": true,
    });
    let (status, _) = send(&app, post("/api/timer", timer, Some(PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/api/timer")).await;
    assert_eq!(body["endDate"], json!("2026-11-01T18:00:00Z"));
}
