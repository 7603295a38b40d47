use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use math_challenge_back::{
    config::AppConfig,
    dao::player_store::JsonFilePlayerStore,
    quiz::QuestionGenerator,
    routes,
    state::{AppState, SharedState, clock::ManualClock},
};

struct TestApp {
    state: SharedState,
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            store_path: dir.path().join("players.json"),
            ..AppConfig::default()
        };
        let store = JsonFilePlayerStore::new(config.store_path.clone());
        let state = AppState::new(
            config,
            Arc::new(store),
            Arc::new(ManualClock::new()),
            QuestionGenerator::seeded(42),
        );
        Self { state, _dir: dir }
    }

    fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn join(&self, name: &str) -> Value {
        let (status, body) = self.send("POST", "/players", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    fn pending_answer(&self, name: &str) -> usize {
        self.state.pending().get(name).unwrap().question.correct_index
    }
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/healthcheck", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn topics_are_listed() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/topics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);
    assert_eq!(body[6]["label"], "Word Problems");
}

#[tokio::test]
async fn join_then_welcome_back() {
    let app = TestApp::new();
    let first = app.join("Ada").await;
    assert_eq!(first["created"], true);

    let second = app.join("Ada").await;
    assert_eq!(second["created"], false);
    assert_eq!(second["message"], "Welcome back, Ada!");

    let (status, players) = app.send("GET", "/players", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(players.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_names_are_rejected() {
    let app = TestApp::new();
    let long = "x".repeat(41);
    for name in ["", "   ", "bad\nname", long.as_str()] {
        let (status, body) = app.send("POST", "/players", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{name:?}");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn question_and_answer_update_the_player() {
    let app = TestApp::new();
    app.join("Ada").await;

    let (status, question) = app
        .send("POST", "/players/Ada/questions?topic=algebra", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["topic"], "Algebra");
    assert_eq!(question["options"].as_array().unwrap().len(), 4);
    assert!(question.get("correct_index").is_none());

    let index = app.pending_answer("Ada");
    let (status, outcome) = app
        .send(
            "POST",
            "/players/Ada/answers",
            Some(json!({ "selected_index": index })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["correct"], true);
    assert_eq!(outcome["points"], 15);
    assert_eq!(outcome["player"]["score"], 15);
    assert_eq!(outcome["player"]["accuracy"], 100.0);

    let (_, player) = app.send("GET", "/players/Ada", None).await;
    assert_eq!(player["questions_answered"], 1);
}

#[tokio::test]
async fn unknown_topic_is_a_bad_request() {
    let app = TestApp::new();
    app.join("Ada").await;
    let (status, body) = app
        .send("POST", "/players/Ada/questions?topic=Poetry", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Poetry"));
}

#[tokio::test]
async fn error_statuses() {
    let app = TestApp::new();
    let (status, _) = app.send("GET", "/players/Ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    app.join("Ada").await;
    let (status, _) = app
        .send(
            "POST",
            "/players/Ada/answers",
            Some(json!({ "selected_index": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            "POST",
            "/players/Ada/speed-round/answers",
            Some(json!({ "selected_index": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn speed_round_starts_and_reports_status() {
    let app = TestApp::new();
    app.join("Ada").await;

    let (status, started) = app.send("POST", "/players/Ada/speed-round", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["phase"], "active");
    assert_eq!(started["remaining_secs"], 60.0);
    assert!(started["question"]["prompt"].is_string());

    let (status, _) = app.send("POST", "/players/Ada/speed-round", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, polled) = app.send("GET", "/players/Ada/speed-round", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(polled["phase"], "active");
}

#[tokio::test]
async fn leaderboard_analytics_and_reset() {
    let app = TestApp::new();
    app.join("Ada").await;
    let (_, board) = app.send("GET", "/leaderboard", None).await;
    assert_eq!(board["tournament_ready"], false);

    app.join("Bob").await;
    app.send("POST", "/players/Bob/questions", None).await;
    let index = app.pending_answer("Bob");
    app.send(
        "POST",
        "/players/Bob/answers",
        Some(json!({ "selected_index": index })),
    )
    .await;

    let (status, board) = app.send("GET", "/leaderboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["tournament_ready"], true);
    assert_eq!(board["entries"][0]["name"], "Bob");
    assert_eq!(board["entries"][1]["rank"], 2);

    let (_, analytics) = app.send("GET", "/analytics", None).await;
    assert_eq!(analytics["player_count"], 2);
    assert_eq!(analytics["total_questions"], 1);
    assert_eq!(analytics["top_scorer"], "Bob");

    let (status, _) = app.send("POST", "/admin/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, players) = app.send("GET", "/players", None).await;
    assert!(players.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn openapi_document_lists_the_game_routes() {
    let app = TestApp::new();
    let (status, doc) = app
        .send("GET", routes::docs::OPENAPI_JSON_PATH, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/leaderboard"].is_object());
    assert!(doc["paths"]["/players/{name}/speed-round"].is_object());
}
