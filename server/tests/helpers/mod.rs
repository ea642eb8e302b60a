//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for driving signed interactions through the full axum
//! router, plus `spawn_test_server` for standing up a mock remote API that the
//! REST client can call.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use ix_crypto::Keypair;
use ix_server::api::{create_router, AppState};
use ix_server::commands::{builtin, CommandRegistry};
use ix_server::config::Config;
use ix_server::interactions::{Dispatcher, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use ix_server::rest::{RestClient, RetryPolicy};
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Fixed seed so failures reproduce with the same key.
const TEST_SEED: [u8; 32] = [7; 32];

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub config: Arc<Config>,
    pub keypair: Keypair,
}

impl TestApp {
    /// Test app serving the builtin commands.
    pub fn new() -> Self {
        let registry = builtin::registry().expect("builtin registry");
        Self::with_registry(Config::default_for_test(), registry)
    }

    /// Test app with a custom config and registry.
    ///
    /// The config's public key is replaced with the test keypair's.
    pub fn with_registry(mut config: Config, registry: CommandRegistry) -> Self {
        let keypair = Keypair::from_seed(TEST_SEED);
        config.public_key = Some(keypair.public_key_hex());

        let rest = RestClient::from_config(&config).expect("Failed to build REST client");
        let dispatcher = Dispatcher::new(keypair.verifier(), registry, rest);
        let state = AppState::new(dispatcher, config.clone());

        Self {
            router: create_router(state),
            config: Arc::new(config),
            keypair,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Build a `POST /interactions` request signed with the test keypair.
    pub fn signed_interaction(&self, body: &serde_json::Value) -> Request<Body> {
        let body = serde_json::to_vec(body).expect("serialize interaction");
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.keypair.sign(&timestamp, &body);

        Self::request(Method::POST, "/interactions")
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .header(TIMESTAMP_HEADER, timestamp)
            .body(Body::from(body))
            .unwrap()
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }
}

/// Config whose REST calls go to `base_url`.
pub fn config_for(base_url: &str) -> Config {
    Config {
        api_base: base_url.to_owned(),
        ..Config::default_for_test()
    }
}

/// REST client pointed at a mock server.
pub fn rest_client(base_url: &str, retry: RetryPolicy) -> RestClient {
    RestClient::new(
        base_url,
        Some("test-token".into()),
        retry,
        Duration::from_secs(5),
    )
    .expect("Failed to build REST client")
}

// ============================================================================
// Test Server
// ============================================================================

/// A running test server bound to a random port.
pub struct TestServer {
    /// Server address (127.0.0.1:PORT).
    pub addr: SocketAddr,
    /// Base URL for HTTP requests (e.g., `http://127.0.0.1:12345`).
    pub url: String,
    /// Handle to the server task for cleanup.
    _handle: JoinHandle<()>,
}

/// Spawn a real HTTP server on a random port.
///
/// Used to stand in for the remote REST API.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer {
        addr,
        url,
        _handle: handle,
    }
}

// ============================================================================
// Response helpers
// ============================================================================

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes()
        .to_vec()
}

/// Parse a response body as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}

/// Application command interaction for `name` with the given option tree.
pub fn command_interaction(name: &str, options: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "900",
        "application_id": "1000",
        "type": 2,
        "token": "interaction-token",
        "version": 1,
        "channel_id": "300",
        "member": { "user": { "id": "400", "username": "tester" }, "roles": [] },
        "data": { "id": "500", "name": name, "type": 1, "options": options }
    })
}
