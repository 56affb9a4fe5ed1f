//! Application state shared across handlers.

use fixture_core::{AppConfig, BasicCredential, DigestCredential, FixtureBuffer};
use std::sync::Arc;

/// Shared application state.
///
/// Every field is immutable after construction; handlers clone the state
/// cheaply (`Arc`s and a `Bytes`-backed buffer) and never take a lock.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The fixture payload.
    pub buffer: FixtureBuffer,
    /// Digest-scheme credential record (precomputed HA1).
    pub digest: Arc<DigestCredential>,
    /// Basic-scheme credential record.
    pub basic: Arc<BasicCredential>,
}

impl AppState {
    /// Create application state from configuration and the generated
    /// fixture buffer. Credential records are derived here, once.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. Binaries that want a
    /// diagnostic exit should call `AppConfig::validate` first.
    pub fn new(config: AppConfig, buffer: FixtureBuffer) -> Self {
        if let Err(error) = config.validate() {
            panic!("Invalid configuration: {error}");
        }

        let digest = Arc::new(config.credentials.digest_credential());
        let basic = Arc::new(config.credentials.basic_credential());

        Self {
            config: Arc::new(config),
            buffer,
            digest,
            basic,
        }
    }
}
