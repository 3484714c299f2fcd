//! Helpers shared by unit tests: in-process stand-ins for the external
//! services the gateway talks to.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use crate::error::GatewayError;
use crate::hosting::ImageHost;

/// Raw bytes every fake provider returns as "the image".
pub(crate) const FAKE_IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

/// Serves `app` on an ephemeral localhost port and returns its address.
pub(crate) async fn spawn_server(app: Router) -> SocketAddr {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// How the fake inference provider answers.
#[derive(Debug, Clone)]
pub(crate) enum ProviderBehavior {
    /// Always `200` with [`FAKE_IMAGE`].
    Image,
    /// Always the given status with a short text body.
    Status(u16),
    /// `503` for the first `n` calls, then behaves like `Image`.
    LoadingThenImage(usize),
    /// Sleeps before answering with an image.
    Slow(Duration),
    /// `200` with an empty body.
    Empty,
}

#[derive(Debug, Clone)]
struct ProviderState {
    behavior: ProviderBehavior,
    calls: Arc<AtomicUsize>,
}

/// A running fake text-to-image provider.
#[derive(Debug)]
pub(crate) struct FakeProvider {
    /// Model URL to point an inference client at.
    pub(crate) url: String,
    calls: Arc<AtomicUsize>,
}

impl FakeProvider {
    /// Starts a provider with the given behavior.
    pub(crate) async fn start(behavior: ProviderBehavior) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = ProviderState {
            behavior,
            calls: Arc::clone(&calls),
        };
        let app = Router::new()
            .route("/models/test-model", post(provider_handler))
            .with_state(state);
        let addr = spawn_server(app).await;
        Self {
            url: format!("http://{addr}/models/test-model"),
            calls,
        }
    }

    /// Number of requests received so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn provider_handler(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<serde_json::Value>,
) -> Response {
    let call = state.calls.fetch_add(1, Ordering::SeqCst);

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer test-token");
    if !authorized || body.get("inputs").and_then(|v| v.as_str()).is_none() {
        return (StatusCode::UNAUTHORIZED, "bad request to provider").into_response();
    }

    let image = || ([(header::CONTENT_TYPE, "image/png")], FAKE_IMAGE).into_response();
    match state.behavior {
        ProviderBehavior::Image => image(),
        ProviderBehavior::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "provider said no").into_response()
        }
        ProviderBehavior::LoadingThenImage(n) if call < n => {
            (StatusCode::SERVICE_UNAVAILABLE, r#"{"error":"Model is loading"}"#).into_response()
        }
        ProviderBehavior::LoadingThenImage(_) => image(),
        ProviderBehavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            image()
        }
        ProviderBehavior::Empty => StatusCode::OK.into_response(),
    }
}

/// Image host that hands back a predictable URL, or fails on demand.
#[derive(Debug, Default)]
pub(crate) struct FakeImageHost {
    /// When set, every upload fails with this message.
    pub(crate) fail_with: Option<String>,
    uploads: AtomicUsize,
}

impl FakeImageHost {
    /// A host whose uploads always succeed.
    pub(crate) fn ok() -> Self {
        Self::default()
    }

    /// A host whose uploads always fail.
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            uploads: AtomicUsize::new(0),
        }
    }

    /// Number of upload attempts so far.
    pub(crate) fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, _source: &str) -> Result<String, GatewayError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(GatewayError::Hosting(message.clone())),
            None => Ok(format!("https://img.test/upload-{n}.png")),
        }
    }
}
