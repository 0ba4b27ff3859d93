//! Game Events
//!
//! Events generated by a move, for replay and for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::game::board::Cell;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Two equal tiles merged into one
    TilesMerged {
        /// Value of the merged tile
        value: Cell,
    },

    /// A random tile appeared after a successful move
    TileSpawned {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// 2 or 4
        value: Cell,
    },

    /// A merge produced the winning tile
    GameWon {
        /// Score including the winning merge
        score: u32,
    },

    /// No move can change the board any more
    GameLost {
        /// Final score
        score: u32,
        /// Largest tile on the final board
        max_tile: Cell,
    },
}

/// A game event stamped with the move that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Value of `GameState::moves` after the producing move
    pub move_number: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(move_number: u32, data: GameEventData) -> Self {
        Self { move_number, data }
    }

    /// Create tiles merged event.
    pub fn tiles_merged(move_number: u32, value: Cell) -> Self {
        Self::new(move_number, GameEventData::TilesMerged { value })
    }

    /// Create tile spawned event.
    pub fn tile_spawned(move_number: u32, row: usize, col: usize, value: Cell) -> Self {
        Self::new(move_number, GameEventData::TileSpawned { row, col, value })
    }

    /// Create game won event.
    pub fn game_won(move_number: u32, score: u32) -> Self {
        Self::new(move_number, GameEventData::GameWon { score })
    }

    /// Create game lost event.
    pub fn game_lost(move_number: u32, score: u32, max_tile: Cell) -> Self {
        Self::new(move_number, GameEventData::GameLost { score, max_tile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_stamp_move_number() {
        let events = [
            GameEvent::tiles_merged(3, 8),
            GameEvent::tile_spawned(3, 0, 1, 2),
            GameEvent::game_won(3, 20000),
            GameEvent::game_lost(3, 1200, 128),
        ];

        assert!(events.iter().all(|e| e.move_number == 3));
        assert_eq!(
            events[3].data,
            GameEventData::GameLost { score: 1200, max_tile: 128 }
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::tile_spawned(7, 1, 2, 4);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["move_number"], 7);
        assert_eq!(json["data"]["TileSpawned"]["value"], 4);
    }
}
