//! Local mock servers for the APOD and chat-completion endpoints.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stargazer::config::{Credentials, Settings};

pub const APOD_PATH: &str = "/planetary/apod";

pub fn sample_record() -> Value {
    json!({
        "date": "2024-08-06",
        "title": "The Horsehead Nebula",
        "explanation": "A dark cloud of dust shaped like a horse's head rises against glowing hydrogen.",
        "url": "https://apod.nasa.gov/apod/image/2408/horsehead.jpg"
    })
}

struct ApodState {
    status: StatusCode,
    body: Value,
    hits: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

/// A running mock of the APOD endpoint.
pub struct MockApod {
    pub addr: SocketAddr,
    state: Arc<ApodState>,
}

impl MockApod {
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, APOD_PATH)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state.queries.lock().unwrap().clone()
    }
}

async fn apod_handler(
    State(state): State<Arc<ApodState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.queries.lock().unwrap().push(params);
    (state.status, Json(state.body.clone()))
}

/// Start an APOD mock that always answers with `status` and `body`.
pub async fn spawn_apod(status: StatusCode, body: Value) -> MockApod {
    let state = Arc::new(ApodState {
        status,
        body,
        hits: AtomicUsize::new(0),
        queries: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route(APOD_PATH, get(apod_handler))
        .with_state(state.clone());

    let addr = serve(app).await;
    MockApod { addr, state }
}

struct ChatState {
    requests: Mutex<Vec<Value>>,
}

/// A running mock of an OpenAI-compatible chat-completion endpoint.
///
/// The first turn asks for the APOD tool; once a tool result is present in
/// the transcript it answers with the title and explanation found there.
pub struct MockChat {
    pub addr: SocketAddr,
    state: Arc<ChatState>,
}

impl MockChat {
    pub fn api_base(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// Build the final answer the mock model gives for a tool result.
pub fn answer_for(record: &Value) -> String {
    format!(
        "Today's Astronomy Picture of the Day is \"{}\". {}",
        record["title"].as_str().unwrap_or_default(),
        record["explanation"].as_str().unwrap_or_default()
    )
}

fn completion(message: Value, finish_reason: &str) -> Value {
    json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "created": 1722902400,
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "index": 0,
            "message": message,
            "finish_reason": finish_reason,
            "logprobs": null
        }],
        "usage": {
            "prompt_tokens": 10,
            "completion_tokens": 10,
            "total_tokens": 20
        }
    })
}

async fn chat_handler(State(state): State<Arc<ChatState>>, Json(request): Json<Value>) -> Json<Value> {
    state.requests.lock().unwrap().push(request.clone());

    let tool_result = request["messages"]
        .as_array()
        .and_then(|messages| messages.iter().rev().find(|m| m["role"] == "tool"))
        .and_then(|m| m["content"].as_str())
        .and_then(|content| serde_json::from_str::<Value>(content).ok());

    let response = match tool_result {
        Some(record) => completion(
            json!({"role": "assistant", "content": answer_for(&record)}),
            "stop",
        ),
        None => completion(
            json!({
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_apod_1",
                    "type": "function",
                    "function": {
                        "name": "astronomy_picture_of_the_day",
                        "arguments": "{}"
                    }
                }]
            }),
            "tool_calls",
        ),
    };

    Json(response)
}

pub async fn spawn_chat() -> MockChat {
    let state = Arc::new(ChatState {
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/v1/chat/completions", post(chat_handler))
        .with_state(state.clone());

    let addr = serve(app).await;
    MockChat { addr, state }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Settings pointing at local mocks, with no thumbnail parameter.
pub fn settings_for(apod_base: &str, llm_base: &str) -> Settings {
    let mut settings = Settings::default();
    settings.apod.base_url = apod_base.to_string();
    settings.apod.thumbs = false;
    settings.llm.api_base = llm_base.to_string();
    settings
}

pub fn credentials() -> Credentials {
    Credentials::new("sk-test-key", "TEST_NASA_KEY").unwrap()
}
