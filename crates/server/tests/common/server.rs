//! Server test utilities.

use super::fixtures::seeded_bytes;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use fixture_core::{AppConfig, FixtureBuffer};
use fixture_server::{AppState, create_router};
use tower::ServiceExt;

/// Seed for the deterministic payload the suites are built over.
const TEST_BUFFER_SEED: u64 = 0xF17E;

/// A test server wrapper with router and state over a small deterministic
/// payload.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server with default test configuration.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test server with custom config modifications.
    pub fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        let buffer = FixtureBuffer::from_bytes(seeded_bytes(
            TEST_BUFFER_SEED,
            config.fixture.buffer_len_usize(),
        ));
        let state = AppState::new(config, buffer);
        let router = create_router(state.clone());

        Self { router, state }
    }

    /// The payload bytes the server was built over.
    pub fn payload(&self) -> Bytes {
        self.state.buffer.full()
    }
}

/// Issue a request against the router and collect status, headers, body.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Bytes) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = builder.body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, body)
}
