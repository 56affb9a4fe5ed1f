//! Configuration types shared across crates.

use crate::credentials::{BasicCredential, DigestCredential};
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Fixture payload configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixtureConfig {
    /// Buffer length in bytes.
    #[serde(default = "default_buffer_len")]
    pub buffer_len: u64,
}

/// Credential configuration for the two authentication schemes.
///
/// A single account gates both schemes: digest combines `username`,
/// `digest_realm`, and `password` into the stored hash; basic compares
/// `username` and `password` directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Account name.
    #[serde(default = "default_username")]
    pub username: String,
    /// Account password.
    #[serde(default = "default_password")]
    pub password: String,
    /// Realm presented in digest challenges.
    #[serde(default = "default_digest_realm")]
    pub digest_realm: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_buffer_len() -> u64 {
    crate::DEFAULT_BUFFER_LEN
}

fn default_username() -> String {
    "user".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_digest_realm() -> String {
    "Locked Area".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            buffer_len: default_buffer_len(),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
            digest_realm: default_digest_realm(),
        }
    }
}

impl FixtureConfig {
    /// Validate fixture configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_len == 0 {
            return Err("fixture.buffer_len must be at least 1 byte".to_string());
        }
        if usize::try_from(self.buffer_len).is_err() {
            return Err(format!(
                "fixture.buffer_len {} is not addressable on this platform",
                self.buffer_len
            ));
        }
        Ok(())
    }

    /// Buffer length as an allocatable size.
    ///
    /// `validate()` has already checked the conversion; saturating is a
    /// fallback, not an expected path.
    pub fn buffer_len_usize(&self) -> usize {
        usize::try_from(self.buffer_len).unwrap_or(usize::MAX)
    }
}

impl CredentialsConfig {
    /// Derive the digest credential record (precomputed HA1).
    pub fn digest_credential(&self) -> DigestCredential {
        DigestCredential::derive(&self.username, &self.digest_realm, &self.password)
    }

    /// The basic credential record.
    pub fn basic_credential(&self) -> BasicCredential {
        BasicCredential {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Fixture payload configuration.
    #[serde(default)]
    pub fixture: FixtureConfig,
    /// Credential configuration.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl AppConfig {
    /// Create a test configuration with a small buffer.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            fixture: FixtureConfig {
                buffer_len: 64 * 1024,
            },
            ..Self::default()
        }
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        self.fixture.validate()
    }
}
