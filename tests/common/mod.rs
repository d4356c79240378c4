//! In-process stand-in for the Family Calendar backend.
//!
//! Serves the same `/api` routes on an ephemeral port; `Behavior` lets a test
//! bend individual endpoints out of shape.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use familycal_probe::client::ApiClient;
use familycal_probe::config::Config;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const GOOGLE_CONSENT_URL: &str =
    "https://accounts.google.com/o/oauth2/v2/auth?access_type=offline&prompt=consent";

/// How the fake backend answers
#[derive(Debug, Clone)]
pub struct Behavior {
    pub correct_pin: String,
    /// Status returned for any other PIN
    pub wrong_pin_status: u16,
    pub authenticated: bool,
    /// Replaces the whole auth status body
    pub auth_status_body: Option<Value>,
    /// Replaces the whole health body
    pub health_body: Option<Value>,
    /// Delay before the health endpoint answers
    pub health_delay: Option<Duration>,
    /// Status for a well-formed add-event request
    pub add_event_status: u16,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            correct_pin: "0312".to_string(),
            wrong_pin_status: 401,
            authenticated: false,
            auth_status_body: None,
            health_body: None,
            health_delay: None,
            add_event_status: 401,
        }
    }
}

/// Running fake backend; stops when dropped
pub struct FakeBackend {
    pub base_url: String,
    task: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        Self::start_with(Behavior::default()).await
    }

    pub async fn start_with(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = router(behavior);
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            task,
        }
    }

    /// Config pointing at this backend with a short timeout
    pub fn config(&self) -> Config {
        config_for(&self.base_url)
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("Failed to build client")
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        timeout_secs: 1,
        ..Config::default()
    }
}

/// URL of a local port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe port");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    format!("http://{}", addr)
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).expect("Invalid status code in test behavior")
}

fn router(behavior: Behavior) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/status", get(auth_status))
        .route("/api/auth/google", get(auth_google))
        .route("/api/verify-pin", post(verify_pin))
        .route("/api/add-event", post(add_event))
        .fallback(not_found)
        .with_state(behavior)
}

async fn health(State(behavior): State<Behavior>) -> Json<Value> {
    if let Some(delay) = behavior.health_delay {
        tokio::time::sleep(delay).await;
    }
    Json(
        behavior
            .health_body
            .unwrap_or_else(|| json!({ "status": "ok", "timestamp": "2024-01-15T10:00:00.000Z" })),
    )
}

async fn auth_status(State(behavior): State<Behavior>) -> Json<Value> {
    let message = if behavior.authenticated {
        "Google Calendar is connected!"
    } else {
        "Setup required"
    };
    Json(behavior.auth_status_body.unwrap_or_else(
        || json!({ "authenticated": behavior.authenticated, "message": message }),
    ))
}

async fn auth_google() -> Redirect {
    Redirect::temporary(GOOGLE_CONSENT_URL)
}

async fn verify_pin(State(behavior): State<Behavior>, Json(body): Json<Value>) -> Response {
    let pin = body.get("pin").and_then(Value::as_str);
    if pin == Some(behavior.correct_pin.as_str()) {
        return Json(json!({ "success": true })).into_response();
    }

    let code = status(behavior.wrong_pin_status);
    if code == StatusCode::OK {
        return Json(json!({ "success": true })).into_response();
    }
    (code, Json(json!({ "success": false, "message": "Incorrect PIN" }))).into_response()
}

async fn add_event(State(behavior): State<Behavior>, Json(body): Json<Value>) -> Response {
    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    };
    let all_day = body.get("isAllDay").and_then(Value::as_bool).unwrap_or(false);

    if !field("title") || !field("date") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Title and date are required" })),
        )
            .into_response();
    }
    if !all_day && (!field("startTime") || !field("endTime")) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Start and end times are required for timed events"
            })),
        )
            .into_response();
    }

    let code = status(behavior.add_event_status);
    let body = match code {
        StatusCode::OK => json!({ "success": true, "message": "Event added successfully!" }),
        StatusCode::UNAUTHORIZED => json!({
            "success": false,
            "message": "Google Calendar not connected. Please run setup."
        }),
        _ => json!({ "success": false, "message": "Could not add event. Please try again." }),
    };
    (code, Json(body)).into_response()
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
