//! In-process fake backend for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use attendo_client::{AttendoClient, ClientConfig, NetworkHttpClient};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use shared::{ApiResponse, ErrorBody};

pub const TOKEN: &str = "good-token";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "secret";
pub const ADMIN_EMAIL: &str = "grace@example.com";

#[derive(Default)]
pub struct Backend {
    /// Reject every bearer token while set
    pub reject_tokens: AtomicBool,
    pub fail_notification_writes: AtomicBool,
    pub leave_posts: AtomicU32,
    pub status_calls: AtomicU32,
    pub actions: AtomicU32,
    pub user_writes: AtomicU32,
}

type Shared = Arc<Backend>;

fn authorized(backend: &Backend, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {TOKEN}");
    !backend.reject_tokens.load(Ordering::SeqCst)
        && headers.get("authorization").and_then(|v| v.to_str().ok()) == Some(expected.as_str())
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

fn unauthorized() -> Response {
    fail(StatusCode::UNAUTHORIZED, "Not authorized, token failed")
}

fn data(value: Value) -> Response {
    Json(ApiResponse::ok(value)).into_response()
}

fn user_json(role: &str) -> Value {
    json!({
        "_id": "u1",
        "employeeId": "EMP1001",
        "name": "Ada Lovelace",
        "email": EMAIL,
        "role": role,
        "department": "IT",
        "joinedOn": "2024-01-15T00:00:00.000Z",
        "status": "Active"
    })
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != PASSWORD {
        return fail(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    if body["email"] == EMAIL {
        Json(json!({ "token": TOKEN, "user": user_json("EMPLOYEE") })).into_response()
    } else if body["email"] == ADMIN_EMAIL {
        let mut admin = user_json("ADMIN");
        admin["email"] = json!(ADMIN_EMAIL);
        Json(json!({ "token": TOKEN, "user": admin })).into_response()
    } else {
        fail(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn me(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    data(user_json("EMPLOYEE"))
}

async fn attendance_status(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    b.status_calls.fetch_add(1, Ordering::SeqCst);
    if b.actions.load(Ordering::SeqCst) > 0 {
        data(json!({ "status": "CLOCKED_IN", "workStartTime": "2025-06-02T08:00:00.000Z", "breakStartTime": null }))
    } else {
        data(json!({ "status": "CLOCKED_OUT", "workStartTime": null, "breakStartTime": null }))
    }
}

async fn attendance_action(State(b): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    if body["action"] != "CLOCK_IN" {
        return fail(StatusCode::BAD_REQUEST, "Invalid action");
    }
    b.actions.fetch_add(1, Ordering::SeqCst);
    data(json!({ "status": "CLOCKED_IN" }))
}

async fn leave_balance(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    data(json!([
        { "type": "Annual Leave", "total": 14, "used": 12, "color": "#f00" },
        { "type": "Medical Leave", "total": 10, "used": 0 }
    ]))
}

async fn submit_leave(State(b): State<Shared>, headers: HeaderMap, Json(_body): Json<Value>) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    b.leave_posts.fetch_add(1, Ordering::SeqCst);
    (StatusCode::CREATED, Json(json!({ "message": "Leave request submitted" }))).into_response()
}

async fn list_leaves(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    data(json!([{
        "_id": "l1",
        "user": { "_id": "u1", "name": "Ada Lovelace", "role": "EMPLOYEE", "avatar": "" },
        "leaveType": "Annual Leave",
        "from": "2025-05-05",
        "to": "2025-05-06",
        "days": 2,
        "reason": "trip",
        "status": "Pending"
    }]))
}

async fn list_users(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    data(json!([user_json("EMPLOYEE"), user_json("ADMIN")]))
}

async fn create_user(State(b): State<Shared>, headers: HeaderMap, Json(_body): Json<Value>) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    b.user_writes.fetch_add(1, Ordering::SeqCst);
    (StatusCode::CREATED, Json(json!({ "message": "User created" }))).into_response()
}

async fn update_user(
    State(b): State<Shared>,
    headers: HeaderMap,
    Path(_id): Path<String>,
    Json(_body): Json<Value>,
) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    b.user_writes.fetch_add(1, Ordering::SeqCst);
    data(user_json("EMPLOYEE"))
}

async fn notifications(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    data(json!([
        { "_id": "n1", "text": "Leave approved", "type": "leave", "read": false, "createdAt": "2025-06-01T10:00:00.000Z" },
        { "_id": "n2", "text": "Clocked in late", "type": "attendance", "read": false, "createdAt": "2025-06-02T09:15:00.000Z" }
    ]))
}

async fn notification_write(State(b): State<Shared>, headers: HeaderMap) -> Response {
    if !authorized(&b, &headers) {
        return unauthorized();
    }
    if b.fail_notification_writes.load(Ordering::SeqCst) {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable");
    }
    Json(json!({ "message": "ok" })).into_response()
}

async fn mark_one(state: State<Shared>, headers: HeaderMap, Path(_id): Path<String>) -> Response {
    notification_write(state, headers).await
}

pub fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/attendance/status", get(attendance_status))
        .route("/api/attendance/action", post(attendance_action))
        .route("/api/leaves/balance", get(leave_balance))
        .route("/api/leaves", get(list_leaves).post(submit_leave))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", put(update_user))
        .route("/api/notifications", get(notifications))
        .route("/api/notifications/read-all", put(notification_write))
        .route("/api/notifications/{id}/read", put(mark_one))
        .with_state(backend)
}

pub struct TestServer {
    pub backend: Shared,
    pub base_url: String,
    pub work_dir: tempfile::TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let backend = Shared::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::clone(&backend));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            backend,
            base_url: format!("http://{addr}/api"),
            work_dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url)
            .with_timeout(5)
            .with_work_dir(self.work_dir.path())
    }

    pub fn client(&self) -> AttendoClient<NetworkHttpClient> {
        AttendoClient::connect(self.config()).unwrap()
    }

    pub async fn logged_in_client(&self) -> AttendoClient<NetworkHttpClient> {
        let client = self.client();
        client.login(EMAIL, PASSWORD).await.unwrap();
        client
    }

    pub async fn admin_client(&self) -> AttendoClient<NetworkHttpClient> {
        let client = self.client();
        client.login(ADMIN_EMAIL, PASSWORD).await.unwrap();
        client
    }
}
