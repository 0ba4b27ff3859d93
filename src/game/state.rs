//! Game State Definitions
//!
//! The complete state of one game. It is a plain `Copy` value: the caller
//! owns it, hands it to [`apply_move`](crate::game::step::apply_move) and gets
//! the next state back.

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::RandomSource;
use crate::game::board::{Board, Cell};

/// Number of tiles placed on a fresh board.
pub const START_TILES: usize = 2;

// =============================================================================
// GAME PHASE
// =============================================================================

/// Where a game stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Moves are accepted
    #[default]
    Playing,
    /// A merge reached the winning tile; the board is frozen
    Won,
    /// No move can change the board; the board is frozen
    Lost,
}

impl GamePhase {
    /// Won or Lost.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Tile grid
    pub board: Board,

    /// Sum of every merged tile so far
    pub score: u32,

    /// A merge produced the winning tile
    pub won: bool,

    /// The board is full and nothing can merge
    pub lost: bool,

    /// Number of moves that changed the board
    pub moves: u32,
}

impl GameState {
    /// Wrap an existing board in a fresh, unscored state.
    ///
    /// No tiles are spawned and the flags are not evaluated.
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            ..Self::default()
        }
    }

    /// Current phase. A win takes precedence over a loss in the same move.
    pub fn phase(&self) -> GamePhase {
        if self.won {
            GamePhase::Won
        } else if self.lost {
            GamePhase::Lost
        } else {
            GamePhase::Playing
        }
    }

    /// True once the game is won or lost.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Largest tile on the board.
    pub fn max_tile(&self) -> Cell {
        self.board.max_tile()
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.moves, self.score, |hasher| {
            hasher.update_bool(self.won);
            hasher.update_bool(self.lost);

            // Row-major, so the hash is orientation-sensitive
            for value in self.board.iter() {
                hasher.update_u32(value);
            }
        })
    }
}

/// Start a new game: empty board plus two random tiles.
pub fn new_game<R: RandomSource + ?Sized>(rng: &mut R) -> GameState {
    let mut board = Board::new();
    for _ in 0..START_TILES {
        board.spawn_random_tile(rng);
    }
    GameState::from_board(board)
}

// =============================================================================
// TESTS
// =============================================================================
