//! Digest access control behavior on `digest` paths.
//!
//! The happy-path tests run the full challenge/response round trip: hit
//! the gate, parse the challenge, compute the response digest the way the
//! download client does, and retry with the Authorization header.

mod common;

use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use common::{TestServer, send};

fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Pull a quoted parameter out of a challenge value.
fn challenge_param(challenge: &str, key: &str) -> String {
    let rest = challenge
        .split_once(' ')
        .map(|(_, rest)| rest)
        .unwrap_or(challenge);
    rest.split(',')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(&format!("{key}=")))
        .map(|value| value.trim_matches('"').to_string())
        .unwrap_or_else(|| panic!("challenge {challenge:?} has no {key}"))
}

/// Fetch a digest challenge for `uri` and return its nonce.
async fn obtain_nonce(server: &TestServer, uri: &str) -> String {
    let (status, headers, _) = send(&server.router, "GET", uri, &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let challenge = headers
        .get(WWW_AUTHENTICATE)
        .expect("401 without a challenge")
        .to_str()
        .unwrap()
        .to_string();
    assert!(challenge.starts_with("Digest "));
    challenge_param(&challenge, "nonce")
}

/// Build the Authorization value for the qop=auth flow.
fn qop_auth_header(
    username: &str,
    password: &str,
    realm: &str,
    method: &str,
    uri: &str,
    nonce: &str,
) -> String {
    let nc = "00000001";
    let cnonce = "0a4f113b";
    let ha1 = md5_hex(&format!("{username}:{realm}:{password}"));
    let ha2 = md5_hex(&format!("{method}:{uri}"));
    let response = md5_hex(&format!("{ha1}:{nonce}:{nc}:{cnonce}:auth:{ha2}"));
    format!(
        "Digest username=\"{username}\", realm=\"{realm}\", nonce=\"{nonce}\", \
         uri=\"{uri}\", qop=auth, nc={nc}, cnonce=\"{cnonce}\", response=\"{response}\""
    )
}

/// Build the Authorization value for the legacy (RFC 2069) flow.
fn legacy_header(
    username: &str,
    password: &str,
    realm: &str,
    method: &str,
    uri: &str,
    nonce: &str,
) -> String {
    let ha1 = md5_hex(&format!("{username}:{realm}:{password}"));
    let ha2 = md5_hex(&format!("{method}:{uri}"));
    let response = md5_hex(&format!("{ha1}:{nonce}:{ha2}"));
    format!(
        "Digest username=\"{username}\", realm=\"{realm}\", nonce=\"{nonce}\", \
         uri=\"{uri}\", response=\"{response}\""
    )
}

#[tokio::test]
async fn unauthenticated_request_is_challenged() {
    let server = TestServer::new();

    let (status, headers, body) = send(&server.router, "GET", "/files/digest", &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let challenge = headers.get(WWW_AUTHENTICATE).unwrap().to_str().unwrap();
    assert!(challenge.starts_with("Digest realm=\"Locked Area\""));
    assert!(challenge.contains("qop=\"auth\""));
    assert!(!challenge_param(challenge, "nonce").is_empty());
    assert_ne!(body, server.payload());
}

#[tokio::test]
async fn qop_auth_round_trip_returns_the_full_payload() {
    let server = TestServer::new();
    let uri = "/files/digest";
    let nonce = obtain_nonce(&server, uri).await;

    let header = qop_auth_header("user", "password", "Locked Area", "GET", uri, &nonce);
    let (status, _, body) = send(&server.router, "GET", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, server.payload());
}

#[tokio::test]
async fn legacy_round_trip_returns_the_full_payload() {
    let server = TestServer::new();
    let uri = "/digest/sub/path";
    let nonce = obtain_nonce(&server, uri).await;

    let header = legacy_header("user", "password", "Locked Area", "GET", uri, &nonce);
    let (status, _, body) = send(&server.router, "GET", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, server.payload());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let server = TestServer::new();
    let uri = "/files/digest";
    let nonce = obtain_nonce(&server, uri).await;

    let header = qop_auth_header("user", "hunter2", "Locked Area", "GET", uri, &nonce);
    let (status, headers, _) =
        send(&server.router, "GET", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.contains_key(WWW_AUTHENTICATE));
}

#[tokio::test]
async fn unknown_username_is_rejected() {
    let server = TestServer::new();
    let uri = "/files/digest";
    let nonce = obtain_nonce(&server, uri).await;

    // Internally consistent digest for an account the server never knew.
    let header = qop_auth_header("mallory", "password", "Locked Area", "GET", uri, &nonce);
    let (status, _, _) = send(&server.router, "GET", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_uri_is_rejected() {
    let server = TestServer::new();
    let uri = "/files/digest";
    let nonce = obtain_nonce(&server, uri).await;

    // Digest computed over the real URI, header claims another one.
    let header = qop_auth_header("user", "password", "Locked Area", "GET", uri, &nonce)
        .replace("uri=\"/files/digest\"", "uri=\"/elsewhere\"");
    let (status, _, _) = send(&server.router, "GET", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_nonce_count_is_rejected() {
    let server = TestServer::new();
    let uri = "/files/digest";
    let nonce = obtain_nonce(&server, uri).await;

    let header = qop_auth_header("user", "password", "Locked Area", "GET", uri, &nonce)
        .replace("nc=00000001", "nc=00000002");
    let (status, _, _) = send(&server.router, "GET", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_authorization_is_rejected() {
    let server = TestServer::new();

    for header in [
        "Digest",
        "Digest nonsense",
        "Digest username=\"user\"",
        "Basic dXNlcjpwYXNzd29yZA==",
    ] {
        let (status, _, _) = send(
            &server.router,
            "GET",
            "/digest",
            &[("authorization", header)],
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header}");
    }
}

#[tokio::test]
async fn head_round_trip_serves_headers_only() {
    let server = TestServer::new();
    let uri = "/files/digest";
    let nonce = obtain_nonce(&server, uri).await;

    let header = qop_auth_header("user", "password", "Locked Area", "HEAD", uri, &nonce);
    let (status, headers, body) =
        send(&server.router, "HEAD", uri, &[("authorization", &header)]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("content-length").unwrap().to_str().unwrap(),
        server.payload().len().to_string()
    );
    assert!(body.is_empty());
}

#[tokio::test]
async fn each_challenge_carries_a_fresh_nonce() {
    let server = TestServer::new();
    let first = obtain_nonce(&server, "/digest").await;
    let second = obtain_nonce(&server, "/digest").await;
    assert_ne!(first, second);
}
