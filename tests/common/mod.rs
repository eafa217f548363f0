//! In-process stand-in for the shortening service.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy)]
pub enum Behavior {
    /// Answer 201 with a well-formed body, alias derived from the call count.
    Shorten,
    /// Answer 500 with a plain-text body.
    Fail,
    /// Answer 200 with a body that is not the expected JSON.
    Garbage,
}

#[derive(Default)]
pub struct Received {
    pub bodies: Vec<Value>,
    pub content_types: Vec<String>,
}

#[derive(Clone)]
struct StubState {
    behavior: Behavior,
    received: Arc<Mutex<Received>>,
}

pub struct StubService {
    pub base_url: String,
    received: Arc<Mutex<Received>>,
}

impl StubService {
    pub fn bodies(&self) -> Vec<Value> {
        self.received.lock().unwrap().bodies.clone()
    }

    pub fn content_types(&self) -> Vec<String> {
        self.received.lock().unwrap().content_types.clone()
    }
}

async fn create_alias(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let count = {
        let mut received = state.received.lock().unwrap();
        received.content_types.push(
            headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        );
        received.bodies.push(body.clone());
        received.bodies.len()
    };

    match state.behavior {
        Behavior::Shorten => {
            let alias = format!("abc{count}");
            let original = body.get("url").cloned().unwrap_or(Value::Null);
            (
                StatusCode::CREATED,
                Json(json!({
                    "alias": alias,
                    "_links": {
                        "self": original,
                        "short": format!("https://short.url/{alias}"),
                    }
                })),
            )
                .into_response()
        }
        Behavior::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response(),
        Behavior::Garbage => (StatusCode::OK, "<html>maintenance</html>").into_response(),
    }
}

pub async fn spawn_stub(behavior: Behavior) -> StubService {
    let received = Arc::new(Mutex::new(Received::default()));
    let state = StubState {
        behavior,
        received: Arc::clone(&received),
    };

    let app = Router::new()
        .route("/api/alias", post(create_alias))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubService {
        base_url: format!("http://{addr}/api"),
        received,
    }
}

/// A base URL on which nothing is listening.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}
