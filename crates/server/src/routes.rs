//! Route classification and dispatch.

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use tower_http::trace::TraceLayer;

/// Access policy selected for a request path.
///
/// Classification is an explicit ordered match over path segments; the
/// first matching rule wins and later rules are not consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathClass {
    /// Digest-authenticated delivery.
    Digest,
    /// Basic-authenticated delivery.
    Basic,
    /// Range-aware delivery.
    Seekable,
    /// Unconditional delivery (catch-all).
    Open,
}

impl PathClass {
    /// Classify a request path by its segments, case-sensitively.
    ///
    /// A rule matches when any full `/`-delimited segment equals its
    /// marker: `/a/digest/b` matches `digest`, `/a/digestive` does not.
    pub fn classify(path: &str) -> Self {
        const RULES: [(&str, PathClass); 3] = [
            ("digest", PathClass::Digest),
            ("basic", PathClass::Basic),
            ("seekable", PathClass::Seekable),
        ];

        for (marker, class) in RULES {
            if path.split('/').any(|segment| segment == marker) {
                return class;
            }
        }
        PathClass::Open
    }
}

/// Create the application router.
///
/// Every request funnels through the fallback dispatcher: the
/// contains-a-segment patterns this server honors cannot be spelled in
/// axum's routing DSL.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Classify a request and hand it to exactly one delivery behavior.
async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return ApiError::MethodNotAllowed.into_response();
    }

    let class = PathClass::classify(req.uri().path());
    tracing::debug!(path = %req.uri().path(), class = ?class, "classified request");

    let result = match class {
        PathClass::Digest => handlers::serve_digest(&state, &req),
        PathClass::Basic => handlers::serve_basic(&state, &req),
        PathClass::Seekable => handlers::serve_seekable(&state, &req),
        PathClass::Open => Ok(handlers::serve_full(&state, &req)),
    };

    result.unwrap_or_else(|e| e.into_response())
}
