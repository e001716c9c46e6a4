//! Shared test harness: an in-process mock CrumbCompass backend.
//!
//! Each test spins up the mock on an ephemeral port and points a client
//! at it. The shared [`MockState`] records what the server saw (bearer
//! headers, refresh/logout call counts) so tests can assert on the wire
//! behavior of the client.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Observable and configurable state of the mock backend.
#[derive(Default)]
pub struct MockState {
    /// Number of POST /auth/refresh calls received.
    pub refresh_calls: AtomicUsize,
    /// Number of POST /auth/logout calls received.
    pub logout_calls: AtomicUsize,
    /// Access tokens the server currently accepts.
    pub valid_access_tokens: Mutex<HashSet<String>>,
    /// Refresh tokens the server currently accepts.
    pub valid_refresh_tokens: Mutex<HashSet<String>>,
    /// (path, bearer) pairs for every request to a recording route.
    pub seen_bearers: Mutex<Vec<(String, Option<String>)>>,
    /// When set, POST /auth/logout answers 500.
    pub fail_logout: AtomicBool,
    /// Artificial delay inside /auth/refresh, to pile up concurrent 401s.
    pub refresh_delay_ms: AtomicU64,
    /// When set, refresh responses rotate the refresh token too.
    pub rotate_refresh_token: AtomicBool,
}

impl MockState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark a refresh token as accepted without going through login.
    pub fn seed_refresh_token(&self, token: &str) {
        self.valid_refresh_tokens
            .lock()
            .unwrap()
            .insert(token.to_string());
    }

    /// Mark an access token as accepted without going through login.
    pub fn seed_access_token(&self, token: &str) {
        self.valid_access_tokens
            .lock()
            .unwrap()
            .insert(token.to_string());
    }

    /// Bearer values recorded for a given path.
    pub fn bearers_for(&self, path: &str) -> Vec<Option<String>> {
        self.seen_bearers
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
            .collect()
    }
}

/// A running mock backend.
pub struct MockServer {
    pub base_url: String,
    pub state: Arc<MockState>,
}

/// Start the mock backend on an ephemeral port.
pub async fn spawn_mock_server() -> MockServer {
    spawn_mock_server_with(MockState::new()).await
}

pub async fn spawn_mock_server_with(state: Arc<MockState>) -> MockServer {
    let app = Router::new()
        .route("/auth/login", post(auth_login))
        .route("/auth/register", post(auth_register))
        .route("/auth/refresh", post(auth_refresh))
        .route("/auth/logout", post(auth_logout))
        .route("/auth/profile", get(auth_profile))
        .route("/protected", get(protected))
        .route("/bakeries", get(bakeries_list).post(bakeries_create))
        .route("/bakeries/search", get(bakeries_search))
        .route("/bakeries/top", get(bakeries_top))
        .route("/bakeries/stats", get(bakeries_stats))
        .route(
            "/bakeries/:id",
            get(bakeries_get).patch(bakeries_update).delete(bakeries_delete),
        )
        .route("/categories", get(categories_flat))
        .route("/contacts", get(contacts_list))
        .route("/contacts/search", get(contacts_search))
        .route("/contacts/top", get(contacts_top))
        .route("/contacts/stats", get(contacts_stats))
        .route("/contacts/:id", patch(contacts_update))
        .route("/slow", get(slow))
        .route("/plain", get(plain))
        .route("/weird", get(weird))
        .route("/bytes", get(bytes_route))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });

    MockServer {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

fn record(state: &MockState, path: &str, headers: &HeaderMap) {
    state
        .seen_bearers
        .lock()
        .unwrap()
        .push((path.to_string(), bearer_of(headers)));
}

fn alice() -> Value {
    json!({
        "id": 1,
        "username": "alice",
        "email": "alice@example.com",
        "role": "admin"
    })
}

fn bakery(id: i64, name: &str, rating: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "city": "Lyon",
        "average_rating": rating,
        "review_count": 12
    })
}

fn all_bakeries() -> Vec<Value> {
    vec![
        bakery(1, "Flour Power", 4.5),
        bakery(2, "Sourdough Central", 4.9),
        bakery(3, "Crumb & Get It", 3.8),
    ]
}

async fn auth_login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "alice@example.com" && body["password"] == "secret123" {
        state.seed_access_token("access-1");
        state.seed_refresh_token("refresh-1");
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "access-1",
                "refresh_token": "refresh-1",
                "user": alice()
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        )
    }
}

async fn auth_register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.seed_access_token("access-1");
    state.seed_refresh_token("refresh-1");
    (
        StatusCode::CREATED,
        Json(json!({
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "user": {
                "id": 2,
                "username": body["username"],
                "email": body["email"]
            }
        })),
    )
}

async fn auth_refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> impl IntoResponse {
    let call = state.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let delay = state.refresh_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let presented = body["refresh_token"].as_str().unwrap_or_default();
    let known = state
        .valid_refresh_tokens
        .lock()
        .unwrap()
        .contains(presented);
    if !known {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid refresh token"})),
        );
    }

    let access = format!("access-r{}", call);
    state.seed_access_token(&access);

    let mut response = json!({ "access_token": access });
    if state.rotate_refresh_token.load(Ordering::SeqCst) {
        let refresh = format!("refresh-r{}", call);
        state.seed_refresh_token(&refresh);
        response["refresh_token"] = json!(refresh);
    }
    (StatusCode::OK, Json(response))
}

async fn auth_logout(State(state): State<Arc<MockState>>) -> impl IntoResponse {
    state.logout_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_logout.load(Ordering::SeqCst) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "logout backend down"})),
        )
    } else {
        (StatusCode::OK, Json(json!({"message": "ok"})))
    }
}

async fn auth_profile(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    record(&state, "/auth/profile", &headers);
    match bearer_of(&headers) {
        Some(token) if state.valid_access_tokens.lock().unwrap().contains(&token) => {
            (StatusCode::OK, Json(json!({ "user": alice() })))
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Missing or expired token"})),
        ),
    }
}

async fn protected(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    record(&state, "/protected", &headers);
    match bearer_of(&headers) {
        Some(token) if state.valid_access_tokens.lock().unwrap().contains(&token) => {
            (StatusCode::OK, Json(json!({"ok": true})))
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Missing or expired token"})),
        ),
    }
}

async fn bakeries_list(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    record(&state, "/bakeries", &headers);
    Json(json!({ "bakeries": all_bakeries() }))
}

async fn bakeries_create(Json(body): Json<Value>) -> impl IntoResponse {
    let mut created = body;
    created["id"] = json!(99);
    (StatusCode::CREATED, Json(created))
}

async fn bakeries_get(Path(id): Path<i64>) -> impl IntoResponse {
    match all_bakeries().into_iter().find(|b| b["id"] == json!(id)) {
        Some(found) => (StatusCode::OK, Json(found)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Bakery not found"})),
        ),
    }
}

async fn bakeries_delete(Path(_id): Path<i64>) -> impl IntoResponse {
    Json(json!({"message": "deleted"}))
}

// Overlays the patch onto the stored entity, PATCH semantics.
fn apply_patch(mut entity: Value, patch: &Value) -> Value {
    if let (Some(fields), Some(changes)) = (entity.as_object_mut(), patch.as_object()) {
        for (key, value) in changes {
            fields.insert(key.clone(), value.clone());
        }
    }
    entity
}

async fn bakeries_update(Path(id): Path<i64>, Json(patch): Json<Value>) -> impl IntoResponse {
    match all_bakeries().into_iter().find(|b| b["id"] == json!(id)) {
        Some(found) => (StatusCode::OK, Json(apply_patch(found, &patch))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Bakery not found"})),
        ),
    }
}

fn contact(id: i64, name: &str, message: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "message": message
    })
}

fn all_contacts() -> Vec<Value> {
    vec![
        contact(1, "Ada", "Do you ship rye?"),
        contact(2, "Linus", "Wholesale pricing please"),
    ]
}

async fn contacts_list() -> impl IntoResponse {
    Json(json!({ "contacts": all_contacts() }))
}

async fn contacts_search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let matches: Vec<Value> = all_contacts()
        .into_iter()
        .filter(|c| {
            c["message"]
                .as_str()
                .unwrap_or("")
                .to_lowercase()
                .contains(&q)
        })
        .collect();
    Json(json!({ "contacts": matches }))
}

async fn contacts_top(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let mut list = all_contacts();
    list.truncate(limit);
    Json(json!({ "contacts": list }))
}

async fn contacts_stats() -> impl IntoResponse {
    Json(json!({"total": 2, "unread": 1}))
}

async fn contacts_update(Path(id): Path<i64>, Json(patch): Json<Value>) -> impl IntoResponse {
    match all_contacts().into_iter().find(|c| c["id"] == json!(id)) {
        Some(found) => (StatusCode::OK, Json(apply_patch(found, &patch))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Contact not found"})),
        ),
    }
}

async fn bakeries_search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let matches: Vec<Value> = all_bakeries()
        .into_iter()
        .filter(|b| b["name"].as_str().unwrap_or("").to_lowercase().contains(&q))
        .collect();
    Json(json!({ "bakeries": matches }))
}

async fn bakeries_top(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let mut list = all_bakeries();
    list.sort_by(|a, b| {
        b["average_rating"]
            .as_f64()
            .unwrap_or(0.0)
            .total_cmp(&a["average_rating"].as_f64().unwrap_or(0.0))
    });
    list.truncate(limit);
    Json(json!({ "bakeries": list }))
}

async fn bakeries_stats() -> impl IntoResponse {
    Json(json!({"total": 3, "average_rating": 4.4, "top_city": "Lyon"}))
}

// Bare top-level array, to exercise the collection-key fallback.
async fn categories_flat() -> impl IntoResponse {
    Json(json!([
        {"id": 1, "name": "Bread"},
        {"id": 2, "name": "Pastry", "description": "Sweet things"}
    ]))
}

async fn slow() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({"ok": true}))
}

async fn plain() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        "fresh out of the oven",
    )
}

async fn weird() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/x-crumb")], "???")
}

async fn bytes_route() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        vec![0xDEu8, 0xAD, 0xBE, 0xEF],
    )
}
