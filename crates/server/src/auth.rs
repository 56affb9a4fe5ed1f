//! Challenge construction and credential verification.
//!
//! Verification is a pure function of the `Authorization` header and the
//! static credential record; nothing here touches shared mutable state.
//! Digest nonces are issued fresh per challenge and verified statelessly
//! against the value the client echoes back.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use fixture_core::{BasicCredential, DigestCredential};
use uuid::Uuid;

/// Outcome of verifying an `Authorization` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials check out; serve the payload.
    Granted,
    /// Missing, malformed, or wrong credentials; answer with a challenge.
    Denied,
}

/// Build the `WWW-Authenticate` value for a digest challenge.
///
/// Carries a fresh UUIDv4 nonce. No record of issued nonces is kept;
/// verification uses the nonce the client sends back.
pub fn digest_challenge(realm: &str) -> String {
    let nonce = Uuid::new_v4().simple();
    format!("Digest realm=\"{realm}\", qop=\"auth\", nonce=\"{nonce}\"")
}

/// Build the `WWW-Authenticate` value for a basic challenge.
pub fn basic_challenge(realm: &str) -> String {
    format!("Basic realm=\"{realm}\"")
}

/// Verify a basic `Authorization` header against the credential record.
///
/// Succeeds only when the base64 payload decodes to exactly
/// `username:password` for the configured account.
pub fn verify_basic(header: Option<&str>, credential: &BasicCredential) -> AuthOutcome {
    let Some(payload) = strip_scheme(header, "Basic") else {
        return AuthOutcome::Denied;
    };
    let Ok(decoded) = BASE64.decode(payload.trim()) else {
        return AuthOutcome::Denied;
    };
    let Ok(pair) = String::from_utf8(decoded) else {
        return AuthOutcome::Denied;
    };
    let Some((username, password)) = pair.split_once(':') else {
        return AuthOutcome::Denied;
    };

    if username == credential.username && password == credential.password {
        AuthOutcome::Granted
    } else {
        AuthOutcome::Denied
    }
}

/// Verify a digest `Authorization` header for `method` against the
/// credential record.
///
/// Accepts both the RFC 2069 form (no qop) and `qop=auth` with `nc` and
/// `cnonce`; `auth-int` needs an entity-body hash and is rejected.
pub fn verify_digest(
    header: Option<&str>,
    method: &str,
    credential: &DigestCredential,
) -> AuthOutcome {
    let Some(params) = strip_scheme(header, "Digest") else {
        return AuthOutcome::Denied;
    };
    let Some(authorization) = DigestAuthorization::parse(params) else {
        return AuthOutcome::Denied;
    };

    // An unknown username verifies against an empty HA1, which can never
    // match a real response digest.
    let ha1 = if authorization.username == credential.username {
        credential.ha1.as_str()
    } else {
        ""
    };

    let ha2 = md5_hex(&format!("{}:{}", method, authorization.uri));
    let expected = match authorization.qop.as_deref() {
        None => md5_hex(&format!("{}:{}:{}", ha1, authorization.nonce, ha2)),
        Some("auth") => {
            let (Some(nc), Some(cnonce)) = (&authorization.nc, &authorization.cnonce) else {
                return AuthOutcome::Denied;
            };
            md5_hex(&format!(
                "{}:{}:{}:{}:auth:{}",
                ha1, authorization.nonce, nc, cnonce, ha2
            ))
        }
        Some(_) => return AuthOutcome::Denied,
    };

    if expected.eq_ignore_ascii_case(&authorization.response) {
        AuthOutcome::Granted
    } else {
        AuthOutcome::Denied
    }
}

/// Strip an authorization scheme prefix. Scheme names compare
/// case-insensitively (RFC 7235).
fn strip_scheme<'a>(header: Option<&'a str>, scheme: &str) -> Option<&'a str> {
    let (claimed, rest) = header?.trim().split_once(' ')?;
    if claimed.eq_ignore_ascii_case(scheme) {
        Some(rest)
    } else {
        None
    }
}

/// Parsed fields of a `Digest` authorization parameter list.
#[derive(Debug)]
struct DigestAuthorization {
    username: String,
    nonce: String,
    uri: String,
    response: String,
    qop: Option<String>,
    nc: Option<String>,
    cnonce: Option<String>,
}

impl DigestAuthorization {
    /// Parse `key=value` parameters. Returns `None` when a required field
    /// (username, nonce, uri, response) is missing.
    fn parse(params: &str) -> Option<Self> {
        let mut username = None;
        let mut nonce = None;
        let mut uri = None;
        let mut response = None;
        let mut qop = None;
        let mut nc = None;
        let mut cnonce = None;

        for (key, value) in split_params(params) {
            match key.as_str() {
                "username" => username = Some(value),
                "nonce" => nonce = Some(value),
                "uri" => uri = Some(value),
                "response" => response = Some(value),
                "qop" => qop = Some(value),
                "nc" => nc = Some(value),
                "cnonce" => cnonce = Some(value),
                // realm, opaque, algorithm and unknown parameters carry no
                // weight in verification.
                _ => {}
            }
        }

        Some(Self {
            username: username?,
            nonce: nonce?,
            uri: uri?,
            response: response?,
            qop,
            nc,
            cnonce,
        })
    }
}

/// Split a comma-separated parameter list into `(key, value)` pairs,
/// keeping commas inside quoted values intact.
fn split_params(params: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut quoted = false;
    let mut current = String::new();

    for c in params.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            ',' if !quoted => {
                push_pair(&mut pairs, &current);
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_pair(&mut pairs, &current);

    pairs
}

fn push_pair(pairs: &mut Vec<(String, String)>, raw: &str) {
    if let Some((key, value)) = raw.split_once('=') {
        pairs.push((
            key.trim().to_ascii_lowercase(),
            value.trim().trim_matches('"').to_string(),
        ));
    }
}

fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}
