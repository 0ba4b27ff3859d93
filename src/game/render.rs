//! Text rendering for the terminal front end.

use std::fmt;

use crate::game::board::Board;
use crate::game::input::Move;
use crate::game::state::{GamePhase, GameState};

/// Horizontal rule between rows.
pub const RULE: &str = "+------+------+------+------+";

/// Shown once the winning tile appears.
pub const WIN_BANNER: &str = "You won! Congratulations!";

/// Shown when no move is left.
pub const LOSS_BANNER: &str = "Game Over! No more moves available.";

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        for row in self.rows() {
            f.write_str("|")?;
            for &value in row {
                if value == 0 {
                    f.write_str("      |")?;
                } else {
                    write!(f, " {:>4} |", value)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", RULE)?;
        }
        Ok(())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f)?;
        write!(f, "{}", self.board)?;
        writeln!(f)?;
        write_controls(f)?;
        match self.phase() {
            GamePhase::Won => writeln!(f, "{}", WIN_BANNER),
            GamePhase::Lost => writeln!(f, "{}", LOSS_BANNER),
            GamePhase::Playing => Ok(()),
        }
    }
}

/// Key help shown under the board, one `key(name)` entry per move.
fn write_controls(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Controls: ")?;
    for mv in Move::ALL {
        write!(f, "{}({}), ", mv.key(), mv)?;
    }
    writeln!(f, "q(quit)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_frame() {
        let board = Board::from_rows([
            [2, 0, 0, 2048],
            [0, 0, 0, 0],
            [0, 16, 0, 0],
            [0, 0, 0, 4],
        ]);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], RULE);
        assert_eq!(lines[1], "|    2 |      |      | 2048 |");
        assert_eq!(lines[2], RULE);
        assert_eq!(lines[5], "|      |   16 |      |      |");
        assert_eq!(lines[8], RULE);
    }

    #[test]
    fn test_state_banners() {
        let mut state = GameState::from_board(Board::EMPTY);
        state.score = 36;

        let playing = state.to_string();
        assert!(playing.starts_with("Score: 36\n\n+"));
        assert!(playing.contains("\nControls: w(up), s(down), a(left), d(right), q(quit)\n"));
        assert!(!playing.contains(WIN_BANNER));
        assert!(!playing.contains(LOSS_BANNER));

        state.lost = true;
        assert!(state.to_string().ends_with(&format!("{}\n", LOSS_BANNER)));

        state.won = true;
        assert!(state.to_string().contains(WIN_BANNER));
        assert!(!state.to_string().contains(LOSS_BANNER));
    }
}
