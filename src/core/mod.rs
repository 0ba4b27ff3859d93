//! Core deterministic primitives.
//!
//! Randomness and hashing shared by the game logic. Nothing here touches
//! global state.

pub mod hash;
pub mod rng;

// Re-export core types
pub use hash::{compute_state_hash, StateHash};
pub use rng::{DeterministicRng, RandomSource};
