//! Game Logic Module
//!
//! All board and move code. 100% deterministic given a random source.
//!
//! ## Module Structure
//!
//! - `board`: Grid, row compaction, transpose/reverse, spawning
//! - `input`: Move enum and text command parsing
//! - `state`: Game state, phase, new game
//! - `step`: Move application and replay
//! - `events`: Events produced by a move
//! - `render`: Terminal text for boards and states

pub mod board;
pub mod events;
pub mod input;
pub mod render;
pub mod state;
pub mod step;

// Re-export key types
pub use board::{compact_row, Board, Cell, Row, RowCompaction, ShiftResult, TileSpawn};
pub use events::{GameEvent, GameEventData};
pub use input::{Command, Move, ParseMoveError};
pub use state::{new_game, GamePhase, GameState};
pub use step::{apply_move, can_move, replay_game, step, StepResult};
