//! Core domain types and shared logic for the HTTP test-fixture server.
//!
//! This crate defines the data model used by the server and its tests:
//! - The immutable random fixture buffer
//! - Credential records for the digest and basic schemes
//! - Byte-range grammar and resolution
//! - Configuration types

pub mod buffer;
pub mod config;
pub mod credentials;
pub mod error;
pub mod range;

pub use buffer::FixtureBuffer;
pub use config::{AppConfig, CredentialsConfig, FixtureConfig, ServerConfig};
pub use credentials::{BasicCredential, DigestCredential};
pub use error::{Error, Result};
pub use range::{ByteRange, ResolvedRange};

/// Default fixture buffer length: 100 MiB.
pub const DEFAULT_BUFFER_LEN: u64 = 100 * 1024 * 1024;
