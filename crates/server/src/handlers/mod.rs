//! HTTP request handlers.

pub mod deliver;
pub mod protected;

pub use deliver::*;
pub use protected::*;
