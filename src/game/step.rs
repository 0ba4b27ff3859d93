//! Move Application
//!
//! The state transition of the game. Given a state, a direction and a
//! random source, [`step`] produces exactly one next state.
//!
//! # Determinism
//!
//! The only randomness is drawn from the supplied [`RandomSource`], and only
//! when a move changes the board. Same seed and same moves always produce
//! the same game (see [`replay_game`]).

use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::board::TileSpawn;
use crate::game::events::GameEvent;
use crate::game::input::Move;
use crate::game::state::{new_game, GamePhase, GameState};
use crate::WIN_TILE;

/// Result of a step.
#[derive(Debug, Default)]
pub struct StepResult {
    /// Whether any cell changed
    pub moved: bool,
    /// Points earned by this move
    pub score_gained: u32,
    /// Tile placed after the move, if any
    pub spawned: Option<TileSpawn>,
    /// Events generated by this move
    pub events: Vec<GameEvent>,
    /// Phase after the move
    pub phase: GamePhase,
}

/// Apply one move to `state` in place.
///
/// # Arguments
///
/// * `state` - The game state (will be mutated)
/// * `direction` - Which way to slide
/// * `rng` - Source for the spawned tile
///
/// A finished game is left untouched and reports `moved == false`.
pub fn step<R: RandomSource + ?Sized>(
    state: &mut GameState,
    direction: Move,
    rng: &mut R,
) -> StepResult {
    let mut result = StepResult {
        phase: state.phase(),
        ..StepResult::default()
    };

    if state.is_over() {
        return result;
    }

    // 1. Slide and merge through the canonical left compaction
    let shift = state.board.shift(direction);

    // 2. Compare every cell with the pre-move board
    if shift.board == state.board {
        return result;
    }

    state.moves += 1;
    state.board = shift.board;
    state.score = state.score.saturating_add(shift.score);
    result.moved = true;
    result.score_gained = shift.score;

    for &value in &shift.merges {
        result.events.push(GameEvent::tiles_merged(state.moves, value));
    }

    // 3. Win check
    if shift.merges.contains(&WIN_TILE) {
        state.won = true;
        result.events.push(GameEvent::game_won(state.moves, state.score));
    }

    // 4. Spawn one tile (skipped on a full board)
    result.spawned = state.board.spawn_random_tile(rng);
    if let Some(spawn) = result.spawned {
        result.events.push(GameEvent::tile_spawned(
            state.moves,
            spawn.row,
            spawn.col,
            spawn.value,
        ));
    }

    // 5. Loss check
    if !state.board.can_move() {
        state.lost = true;
        result.events.push(GameEvent::game_lost(
            state.moves,
            state.score,
            state.board.max_tile(),
        ));
    }

    result.phase = state.phase();
    result
}

/// Apply one move and hand back the next state.
///
/// Returns the state unchanged with `moved == false` when the game is
/// already won or lost, or when the move would not change any cell.
pub fn apply_move<R: RandomSource + ?Sized>(
    state: GameState,
    direction: Move,
    rng: &mut R,
) -> (GameState, bool) {
    let mut next = state;
    let result = step(&mut next, direction, rng);
    (next, result.moved)
}

/// True if any move could still change the board.
pub fn can_move(state: &GameState) -> bool {
    state.board.can_move()
}

/// Replay a game from its seed and recorded moves.
///
/// Moves after the game ends are ignored. Returns the final state and every
/// event produced along the way.
pub fn replay_game(seed: u64, moves: &[Move]) -> (GameState, Vec<GameEvent>) {
    let mut rng = DeterministicRng::new(seed);
    let mut state = new_game(&mut rng);
    let mut all_events = Vec::new();

    for &direction in moves {
        if state.is_over() {
            break;
        }
        let result = step(&mut state, direction, &mut rng);
        all_events.extend(result.events);
    }

    (state, all_events)
}
