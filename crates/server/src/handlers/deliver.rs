//! Payload delivery: unconditional and range-aware.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::http::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use fixture_core::ByteRange;

const OCTET_STREAM: &str = "application/octet-stream";

/// Serve the entire fixture with `200 OK`, ignoring any `Range` header.
///
/// Terminal action for the open catch-all and for requests that passed
/// access control.
pub fn serve_full(state: &AppState, req: &Request) -> Response {
    let buffer = &state.buffer;
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, OCTET_STREAM.to_string()),
            (CONTENT_LENGTH, buffer.len().to_string()),
        ],
        payload(req, buffer.full()),
    )
        .into_response()
}

/// Serve a seekable path: the whole fixture when no `Range` header is
/// present, a `206` slice for a valid range, `416` otherwise.
///
/// Malformed range headers get the same `416` as out-of-bounds ones.
pub fn serve_seekable(state: &AppState, req: &Request) -> ApiResult<Response> {
    let buffer = &state.buffer;
    let total = buffer.len();

    let Some(range_header) = req.headers().get(RANGE) else {
        return Ok((
            StatusCode::OK,
            [
                (CONTENT_TYPE, OCTET_STREAM.to_string()),
                (CONTENT_LENGTH, total.to_string()),
                (ACCEPT_RANGES, "bytes".to_string()),
            ],
            payload(req, buffer.full()),
        )
            .into_response());
    };

    let resolved = range_header
        .to_str()
        .ok()
        .and_then(|value| ByteRange::parse(value).ok())
        .and_then(|range| range.resolve(total).ok())
        .ok_or(ApiError::RangeNotSatisfiable { total })?;

    Ok((
        StatusCode::PARTIAL_CONTENT,
        [
            (CONTENT_TYPE, OCTET_STREAM.to_string()),
            (CONTENT_LENGTH, resolved.len().to_string()),
            (
                CONTENT_RANGE,
                format!("bytes {}-{}/{}", resolved.start, resolved.end, resolved.total),
            ),
            (ACCEPT_RANGES, "bytes".to_string()),
        ],
        payload(req, buffer.slice(resolved.start, resolved.end)),
    )
        .into_response())
}

/// Body for the request method: HEAD answers carry headers only.
fn payload(req: &Request, bytes: Bytes) -> Body {
    if req.method() == Method::HEAD {
        Body::empty()
    } else {
        Body::from(bytes)
    }
}
