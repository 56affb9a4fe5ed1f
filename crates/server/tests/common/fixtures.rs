//! Test fixtures for generating payload data.

use bytes::Bytes;

/// Generate deterministic test data based on a seed.
///
/// The integration suites assert byte-for-byte payload equality, so the
/// payload must be reproducible across requests and test processes.
pub fn seeded_bytes(seed: u64, len: usize) -> Bytes {
    let mut data = vec![0u8; len];
    let mut state = seed;

    for chunk in data.chunks_mut(8) {
        // Simple LCG for deterministic data
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let bytes = state.to_le_bytes();
        for (i, byte) in chunk.iter_mut().enumerate() {
            *byte = bytes[i % 8];
        }
    }

    Bytes::from(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_bytes_deterministic() {
        let a = seeded_bytes(42, 100);
        let b = seeded_bytes(42, 100);
        assert_eq!(a, b);

        let c = seeded_bytes(43, 100);
        assert_ne!(a, c);
    }
}
