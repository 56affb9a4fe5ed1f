//! HTTP surface of the test-fixture server.
//!
//! This crate provides the request path:
//! - Route classification (digest / basic / seekable / open)
//! - Digest and basic access control
//! - Range-aware and unconditional payload delivery
//! - API error mapping

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{PathClass, create_router};
pub use state::AppState;
