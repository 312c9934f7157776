//! In-process test harness for the HTTP API.
//!
//! Requests go straight into the router via `tower::ServiceExt::oneshot`, so
//! no port is bound and every collaborator is a mock.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use verifier_core::kernel::TestDependencies;
use verifier_core::server::build_app;

/// Router wired to mock dependencies
pub struct TestHarness {
    pub deps: TestDependencies,
    app: Router,
}

impl TestHarness {
    pub fn new(deps: TestDependencies) -> Self {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let app = build_app(deps.server_deps());
        Self { deps, app }
    }

    /// Send a request and return the raw response
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    /// POST a raw body as JSON to `path`
    pub async fn post_raw(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        read_json(self.send(request).await).await
    }

    /// POST a JSON value to `path`
    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(path, &body.to_string()).await
    }

    /// POST `{"text": ...}` to `/verify`
    pub async fn verify(&self, text: &str) -> (StatusCode, Value) {
        self.post_json("/verify", serde_json::json!({ "text": text }))
            .await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        read_json(self.send(request).await).await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new(TestDependencies::new())
    }
}

/// Status plus parsed body; non-JSON bodies come back as `Value::Null`
pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
