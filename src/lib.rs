//! # Twenty48
//!
//! Deterministic engine for the 2048 sliding-tile puzzle, plus the small
//! terminal session that drives it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TWENTY48                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - RandomSource trait, Xorshift128+ PRNG     │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── board.rs    - Grid, row compaction, transforms          │
//! │  ├── input.rs    - Move enum and command parsing             │
//! │  ├── state.rs    - Game state and phase                      │
//! │  ├── step.rs     - Move application, replay                  │
//! │  ├── events.rs   - Merge/spawn/win/loss events               │
//! │  └── render.rs   - Text frame for the terminal               │
//! │                                                              │
//! │  config.rs       - Seed and log filter                       │
//! │  session.rs      - Input loop, restart/quit (non-determ.)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules do no I/O and read no clock. Every random
//! decision goes through a caller-supplied [`RandomSource`], so a seeded
//! [`DeterministicRng`] and the same list of moves always reproduce the same
//! game.
//!
//! ```
//! use twenty48::{apply_move, new_game, DeterministicRng, Move};
//!
//! let mut rng = DeterministicRng::new(42);
//! let state = new_game(&mut rng);
//! let (next, moved) = apply_move(state, Move::Left, &mut rng);
//! assert!(next.score >= state.score);
//! # let _ = moved;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use config::GameConfig;
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use game::board::{Board, Cell};
pub use game::input::{Command, Move};
pub use game::state::{new_game, GamePhase, GameState};
pub use game::step::{apply_move, can_move, replay_game, step, StepResult};
pub use session::GameSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Board width and height.
pub const BOARD_SIZE: usize = 4;

/// Merging into this tile wins the game.
pub const WIN_TILE: u32 = 2048;
