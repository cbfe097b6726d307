//! Mock image generation backend for integration tests
//!
//! Speaks just enough of the inference wire format to exercise every
//! response shape the classifier handles

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use tokio_util::sync::CancellationToken;

/// Bytes served as the "generated image"
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-a-real-png";

/// Response shape the mock serves for every request
#[derive(Debug, Clone, Copy)]
pub enum MockMode {
    /// 200 with `image/png` bytes
    Png,
    /// 200 with JSON `{ "image": "<base64>" }`
    JsonBase64,
    /// 200 with JSON `{ "error": … }`
    JsonError,
    /// 200 with `image/png` and a zero-length body
    EmptyImage,
    /// 503 with a model-loading error body
    ServiceUnavailable,
}

/// Mock backend that returns a scripted response and counts requests
pub struct MockBackend {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    mode: MockMode,
    request_count: AtomicU32,
    last_body: Mutex<Option<serde_json::Value>>,
}

impl MockBackend {
    /// Start the mock server, returning immediately
    pub async fn start(mode: MockMode) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            mode,
            request_count: AtomicU32::new(0),
            last_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/models/{model}", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            state,
        })
    }

    /// Endpoint URL for configuring the mock as a backend
    pub fn endpoint(&self) -> String {
        format!("http://{}/models/mock", self.addr)
    }

    /// Number of generation requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// The most recent request body, if any
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.state.last_body.lock().unwrap().clone()
    }

    /// The `inputs` field of the most recent request, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.last_body()
            .and_then(|body| body.get("inputs").and_then(serde_json::Value::as_str).map(str::to_owned))
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    *state.last_body.lock().unwrap() = Some(body);

    match state.mode {
        MockMode::Png => (
            [(header::CONTENT_TYPE, "image/png")],
            Bytes::from_static(FAKE_PNG),
        )
            .into_response(),
        MockMode::JsonBase64 => {
            Json(serde_json::json!({ "image": STANDARD.encode(FAKE_PNG) })).into_response()
        }
        MockMode::JsonError => {
            Json(serde_json::json!({ "error": "quota exceeded" })).into_response()
        }
        MockMode::EmptyImage => {
            ([(header::CONTENT_TYPE, "image/png")], Bytes::new()).into_response()
        }
        MockMode::ServiceUnavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "Model is currently loading" })),
        )
            .into_response(),
    }
}
