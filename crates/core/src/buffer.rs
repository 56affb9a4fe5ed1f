//! The in-memory fixture payload.

use bytes::Bytes;
use rand::RngCore;
use rand::rngs::OsRng;

/// Immutable random byte buffer served as the fixture payload.
///
/// Generated once at process start and shared by every request handler.
/// Backed by [`Bytes`], so full-body responses and range slices are
/// zero-copy views of the same allocation. Cloning the buffer clones a
/// reference, not the payload.
#[derive(Clone, Debug)]
pub struct FixtureBuffer {
    bytes: Bytes,
}

impl FixtureBuffer {
    /// Generate a buffer of `len` bytes from the OS CSPRNG.
    pub fn generate(len: usize) -> Self {
        let mut data = vec![0u8; len];
        OsRng.fill_bytes(&mut data);
        Self {
            bytes: Bytes::from(data),
        }
    }

    /// Wrap existing bytes. Tests use this for deterministic payloads.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Total length in bytes.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The full payload (zero-copy).
    pub fn full(&self) -> Bytes {
        self.bytes.clone()
    }

    /// The inclusive span `[start, end]` (zero-copy).
    ///
    /// Bounds must lie within the buffer; resolve spans through
    /// [`crate::ByteRange::resolve`] first.
    pub fn slice(&self, start: u64, end: u64) -> Bytes {
        self.bytes.slice(start as usize..=end as usize)
    }
}
