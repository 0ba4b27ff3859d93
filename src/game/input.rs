//! Input Normalization
//!
//! Turns raw command text into the closed set of values the engine accepts.
//! The engine only ever sees a [`Move`]; quitting is a session concern and is
//! carried separately in [`Command`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// MOVE
// =============================================================================

/// Direction to slide every tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Move {
    /// Toward row 0
    Up = 0,
    /// Toward the last row
    Down = 1,
    /// Toward column 0
    Left = 2,
    /// Toward the last column
    Right = 3,
}

impl Move {
    /// All four directions.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Get move from index (0-3).
    pub fn from_index(index: u8) -> Option<Move> {
        match index {
            0 => Some(Move::Up),
            1 => Some(Move::Down),
            2 => Some(Move::Left),
            3 => Some(Move::Right),
            _ => None,
        }
    }

    /// Keyboard letter bound to this move.
    pub fn key(self) -> char {
        match self {
            Move::Up => 'w',
            Move::Down => 's',
            Move::Left => 'a',
            Move::Right => 'd',
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised command text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised input {input:?}")]
pub struct ParseMoveError {
    /// The trimmed, lowercased text that failed to parse
    pub input: String,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Accepts `w`/`a`/`s`/`d` or the direction name, any case,
    /// surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "w" | "up" => Ok(Move::Up),
            "s" | "down" => Ok(Move::Down),
            "a" | "left" => Ok(Move::Left),
            "d" | "right" => Ok(Move::Right),
            _ => Err(ParseMoveError { input: normalized }),
        }
    }
}

// =============================================================================
// COMMAND
// =============================================================================

/// One line of player input during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Slide the tiles
    Move(Move),
    /// Leave the game
    Quit,
}

impl FromStr for Command {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" => Ok(Command::Quit),
            _ => s.parse().map(Command::Move),
        }
    }
}

/// Interpret an answer to the "play again" prompt.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
