//! HTTP API tests against a server bound to an ephemeral port.

use lectio_core::{Database, Journal};
use lectio_server::AppState;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::oneshot;

const NOV_1: i64 = 1_761_955_200_000;
const DAY_MS: i64 = 86_400_000;

struct TestServer {
    base: String,
    client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start() -> Self {
        let db = Database::open_in_memory().unwrap();
        db.migrate().unwrap();
        let state = AppState::new(Journal::new(db));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            lectio_server::serve(listener, state, async {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
            _shutdown: tx,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: &Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.delete(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }
}

fn payload(day: i64, book: i64, chapter: i64) -> Value {
    json!({"date": NOV_1 + day * DAY_MS, "start": {"book": book, "chapter": chapter}})
}

#[tokio::test]
async fn test_create_and_fetch_entry() {
    let server = TestServer::start().await;

    let (status, created) = server.post("/api/entries", &payload(0, 18, 23)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["start"], json!({"book": 18, "chapter": 23}));

    let (status, fetched) = server.get("/api/entries/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_rejects_invalid_position() {
    let server = TestServer::start().await;

    let (status, body) = server.post("/api/entries", &payload(0, 18, 151)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"errors": ["Psalms only has 150 chapters."]}));

    let (_, list) = server.get("/api/entries").await;
    assert_eq!(list["totalEntries"], 0);
}

#[tokio::test]
async fn test_malformed_body_fails_validation() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/api/entries"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({"errors": ["A valid date is required.", "Start location is required."]})
    );
}

#[tokio::test]
async fn test_list_pages_and_clamps() {
    let server = TestServer::start().await;
    for day in 0..25 {
        server.post("/api/entries", &payload(day, 0, 1)).await;
    }

    let (status, first) = server.get("/api/entries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["page"], 1);
    assert_eq!(first["totalPages"], 3);
    assert_eq!(first["totalEntries"], 25);
    assert_eq!(first["entries"].as_array().unwrap().len(), 10);
    assert_eq!(first["entries"][0]["id"], 25);

    let (_, last) = server.get("/api/entries?page=99").await;
    assert_eq!(last["page"], 3);
    assert_eq!(last["entries"].as_array().unwrap().len(), 5);

    let (_, garbage) = server.get("/api/entries?page=abc").await;
    assert_eq!(garbage["page"], 1);

    let (_, prefixed) = server.get("/api/entries?page=2abc").await;
    assert_eq!(prefixed["page"], 2);
    assert_eq!(prefixed["entries"][0]["id"], 15);

    let (_, fractional) = server.get("/api/entries?page=3.7").await;
    assert_eq!(fractional["page"], 3);
}

#[tokio::test]
async fn test_update_and_delete() {
    let server = TestServer::start().await;
    server.post("/api/entries", &payload(0, 0, 1)).await;

    let (status, updated) = server.put("/api/entries/1", &payload(1, 39, 5)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["start"], json!({"book": 39, "chapter": 5}));

    let (status, body) = server.put("/api/entries/7", &payload(1, 39, 5)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Entry not found"}));

    let (status, body) = server.put("/api/entries/7", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    let (status, body) = server.delete("/api/entries/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = server.delete("/api/entries/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Entry not found"}));
}

#[tokio::test]
async fn test_stats() {
    let server = TestServer::start().await;

    let (_, empty) = server.get("/api/stats").await;
    assert_eq!(
        empty,
        json!({
            "totalEntries": 0,
            "totalChapters": 0,
            "uniqueBooks": 0,
            "otEntries": 0,
            "ntEntries": 0,
            "longestStreak": 0
        })
    );

    server.post("/api/entries", &payload(0, 0, 1)).await;
    server.post("/api/entries", &payload(1, 0, 10)).await;
    server.post("/api/entries", &payload(2, 39, 1)).await;

    let (status, stats) = server.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({
            "totalEntries": 3,
            "totalChapters": 929,
            "uniqueBooks": 2,
            "otEntries": 2,
            "ntEntries": 1,
            "longestStreak": 3
        })
    );
}

#[tokio::test]
async fn test_unknown_routes() {
    let server = TestServer::start().await;

    for path in ["/api/nope", "/api/entries/abc", "/"] {
        let (status, body) = server.get(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "path {}", path);
        assert_eq!(body, json!({"error": "Route not found"}));
    }

    let (status, body) = server.post("/api/stats", &json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Route not found"}));
}
