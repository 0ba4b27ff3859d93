//! State Hashing for Verification
//!
//! Provides deterministic hashing of game state for:
//! - Replay validation (same seed + same moves = same hash)
//! - Compact fingerprints in logs

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Domain separator for game state hashes.
pub const STATE_DOMAIN: &[u8] = b"TWENTY48_STATE_V1";

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 with little-endian helpers.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for game state.
    pub fn for_game_state() -> Self {
        Self::new(STATE_DOMAIN)
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute state hash for game verification.
///
/// Called by `GameState::compute_hash()`. The move counter and score are
/// always hashed first; the closure adds the board.
pub fn compute_state_hash<F>(moves: u32, score: u32, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_game_state();

    hasher.update_u32(moves);
    hasher.update_u32(score);

    add_state(&mut hasher);

    hasher.finalize()
}

/// Short hex fingerprint of a hash, for log lines.
pub fn short_hex(hash: &StateHash) -> String {
    hex::encode(&hash[..8])
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_game_state();
            hasher.update_u32(100);
            hasher.update_u8(7);
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let hash_in = |domain: &[u8]| {
            let mut h = StateHasher::new(domain);
            h.update_u32(1234);
            h.finalize()
        };

        let hash1 = hash_in(b"DOMAIN_A");
        let hash2 = hash_in(b"DOMAIN_B");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_compute_state_hash() {
        let hash = compute_state_hash(10, 512, |hasher| hasher.update_u32(2048));
        let hash2 = compute_state_hash(10, 512, |hasher| hasher.update_u32(2048));
        assert_eq!(hash, hash2);

        // Different score = different hash
        let hash3 = compute_state_hash(10, 516, |hasher| hasher.update_u32(2048));
        assert_ne!(hash, hash3);
    }

    #[test]
    fn test_short_hex_is_sixteen_chars() {
        let hash = compute_state_hash(1, 4, |_| {});
        let s = short_hex(&hash);

        assert_eq!(s.len(), 16);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
