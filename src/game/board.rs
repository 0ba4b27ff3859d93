//! Board Grid and Slide Primitives
//!
//! The 4×4 grid of tile values and everything that reshapes it.
//!
//! Every move is the same primitive, [`compact_row`], applied to each row of a
//! board that has been transposed and/or mirrored so the requested direction
//! faces left. The transforms are undone afterwards, so all four directions
//! share one merge rule.

use serde::{Deserialize, Serialize};

use crate::core::rng::RandomSource;
use crate::game::input::Move;
use crate::BOARD_SIZE;

/// Value of a single cell. 0 is empty; tiles are powers of two ≥ 2.
pub type Cell = u32;

/// One row (or, after a transpose, one column) of the board.
pub type Row = [Cell; BOARD_SIZE];

/// Odds against a spawned tile being a 4 (1 in 10).
pub const FOUR_TILE_ODDS: u32 = 10;

/// Returns true for values a cell may legally hold.
#[inline]
pub fn is_valid_cell(value: Cell) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

// =============================================================================
// ROW COMPACTION
// =============================================================================

/// Result of compacting one row toward index 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowCompaction {
    /// The left-packed row
    pub row: Row,
    /// Sum of all merged tile values
    pub score: u32,
    /// Value of each merged tile, in scan order
    pub merges: Vec<Cell>,
}

/// Slide the nonzero cells of `row` to the left, merging equal neighbours.
///
/// Single left-to-right pass over the nonzero values. A merged tile is
/// written out immediately and never compared again, so `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]`.
pub fn compact_row(row: Row) -> RowCompaction {
    let mut packed = [0; BOARD_SIZE];
    let mut score = 0u32;
    let mut merges = Vec::new();
    let mut len = 0;

    let mut tiles = row.iter().copied().filter(|&v| v != 0).peekable();
    while let Some(value) = tiles.next() {
        if tiles.peek() == Some(&value) {
            tiles.next();
            let merged = value.saturating_mul(2);
            score = score.saturating_add(merged);
            merges.push(merged);
            packed[len] = merged;
        } else {
            packed[len] = value;
        }
        len += 1;
    }

    RowCompaction {
        row: packed,
        score,
        merges,
    }
}

// =============================================================================
// BOARD
// =============================================================================

/// Where a random tile was placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpawn {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
    /// Spawned value (2 or 4)
    pub value: Cell,
}

/// Board after a slide in one direction, before any spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftResult {
    /// Board after sliding and merging
    pub board: Board,
    /// Points earned by the merges
    pub score: u32,
    /// Merged tile values
    pub merges: Vec<Cell>,
}

/// N×N grid of cell values, stored row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Row; BOARD_SIZE],
}

impl Board {
    /// An all-empty board.
    pub const EMPTY: Board = Board {
        cells: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Create an empty board.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Create a board from explicit rows.
    pub const fn from_rows(cells: [Row; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Rows, top to bottom.
    #[inline]
    pub fn rows(&self) -> &[Row; BOARD_SIZE] {
        &self.cells
    }

    /// Cell value at (row, col).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Overwrite the cell at (row, col).
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        self.cells[row][col] = value;
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Swap rows and columns. Its own inverse.
    pub fn transpose(&self) -> Board {
        let mut out = *self;
        for i in 0..BOARD_SIZE {
            for j in (i + 1)..BOARD_SIZE {
                out.cells[i][j] = self.cells[j][i];
                out.cells[j][i] = self.cells[i][j];
            }
        }
        out
    }

    /// Mirror every row left-to-right. Its own inverse.
    pub fn reverse_rows(&self) -> Board {
        let mut out = *self;
        for row in &mut out.cells {
            row.reverse();
        }
        out
    }

    /// Compact every row toward the left edge.
    pub fn compact_left(&self) -> ShiftResult {
        let mut board = *self;
        let mut score = 0u32;
        let mut merges = Vec::new();

        for row in &mut board.cells {
            let compaction = compact_row(*row);
            *row = compaction.row;
            score = score.saturating_add(compaction.score);
            merges.extend(compaction.merges);
        }

        ShiftResult {
            board,
            score,
            merges,
        }
    }

    /// Slide and merge toward `direction`. Does not spawn a tile.
    pub fn shift(&self, direction: Move) -> ShiftResult {
        match direction {
            Move::Left => self.compact_left(),
            Move::Right => {
                let mut result = self.reverse_rows().compact_left();
                result.board = result.board.reverse_rows();
                result
            }
            Move::Up => {
                let mut result = self.transpose().compact_left();
                result.board = result.board.transpose();
                result
            }
            Move::Down => {
                let mut result = self.transpose().reverse_rows().compact_left();
                result.board = result.board.reverse_rows().transpose();
                result
            }
        }
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    empty.push((i, j));
                }
            }
        }
        empty
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.iter().filter(|&v| v == 0).count()
    }

    /// Number of tiles (nonzero cells).
    pub fn tile_count(&self) -> usize {
        self.iter().filter(|&v| v != 0).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Largest tile on the board (0 for an empty board).
    pub fn max_tile(&self) -> Cell {
        self.iter().max().unwrap_or(0)
    }

    /// True if any move could change the board.
    ///
    /// An empty cell, or two equal tiles side by side or one above the
    /// other. Only right and down neighbours are checked; the other two
    /// directions are covered by symmetry.
    pub fn can_move(&self) -> bool {
        for i in 0..BOARD_SIZE {
            for j in 0..BOARD_SIZE {
                let value = self.cells[i][j];
                if value == 0 {
                    return true;
                }
                if i + 1 < BOARD_SIZE && value == self.cells[i + 1][j] {
                    return true;
                }
                if j + 1 < BOARD_SIZE && value == self.cells[i][j + 1] {
                    return true;
                }
            }
        }
        false
    }

    /// Place a 2 (9 in 10) or a 4 (1 in 10) on a uniformly chosen empty cell.
    ///
    /// Returns `None` without drawing from `rng` when the board is full.
    pub fn spawn_random_tile<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Option<TileSpawn> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let (row, col) = empty[rng.next_index(empty.len())];
        let value = if rng.one_in(FOUR_TILE_ODDS) { 4 } else { 2 };
        self.cells[row][col] = value;

        Some(TileSpawn { row, col, value })
    }
}

impl From<[Row; BOARD_SIZE]> for Board {
    fn from(cells: [Row; BOARD_SIZE]) -> Self {
        Self::from_rows(cells)
    }
}

// =============================================================================
// TESTS
// =============================================================================
