//! Static credential records for the two authentication schemes.
//!
//! Both records are derived once from configuration at startup and held
//! immutable for the server's lifetime.

/// Digest-scheme credential: a username paired with the precomputed
/// RFC 2617 HA1, `MD5(username:realm:password)` as lowercase hex.
///
/// Storing the hash rather than the password mirrors how a digest user
/// table is provisioned; the plaintext is only needed at derivation time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestCredential {
    /// Account name the fixture recognizes.
    pub username: String,
    /// Protection-space identifier presented in challenges.
    pub realm: String,
    /// Precomputed HA1, lowercase hex.
    pub ha1: String,
}

impl DigestCredential {
    /// Derive the record from plaintext credentials.
    pub fn derive(username: &str, realm: &str, password: &str) -> Self {
        let ha1 = format!("{:x}", md5::compute(format!("{username}:{realm}:{password}")));
        Self {
            username: username.to_string(),
            realm: realm.to_string(),
            ha1,
        }
    }
}

/// Basic-scheme credential: a plaintext pair compared at request time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicCredential {
    /// Account name the fixture recognizes.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}
