//! Authenticated delivery gates.

use crate::auth::{self, AuthOutcome};
use crate::error::{ApiError, ApiResult};
use crate::handlers::deliver::serve_full;
use crate::state::AppState;
use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::response::Response;

/// Digest-gated delivery: verify, then hand off to unconditional delivery.
pub fn serve_digest(state: &AppState, req: &Request) -> ApiResult<Response> {
    match auth::verify_digest(authorization(req), req.method().as_str(), &state.digest) {
        AuthOutcome::Granted => Ok(serve_full(state, req)),
        AuthOutcome::Denied => Err(ApiError::Unauthorized {
            challenge: auth::digest_challenge(&state.digest.realm),
        }),
    }
}

/// Basic-gated delivery. The challenge realm is empty for this account.
pub fn serve_basic(state: &AppState, req: &Request) -> ApiResult<Response> {
    match auth::verify_basic(authorization(req), &state.basic) {
        AuthOutcome::Granted => Ok(serve_full(state, req)),
        AuthOutcome::Denied => Err(ApiError::Unauthorized {
            challenge: auth::basic_challenge(""),
        }),
    }
}

fn authorization(req: &Request) -> Option<&str> {
    req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok())
}
