//! Game Session Management
//!
//! Owns the live game, its random source and the restart/quit lifecycle.
//! This is the non-deterministic edge of the crate: it reads player input,
//! writes frames and logs. All game logic runs through `game/`.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::core::hash::short_hex;
use crate::core::rng::{seed_from_clock, DeterministicRng, RandomSource};
use crate::game::input::{is_affirmative, Command, Move};
use crate::game::state::{new_game, GamePhase, GameState};
use crate::game::step::{step, StepResult};

/// Clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Printed when a line is neither a move nor quit.
pub const INVALID_INPUT: &str = "Invalid input! Use w/a/s/d for movement or q to quit.";

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting moves.
    Playing,
    /// Game over, waiting for the play-again answer.
    AwaitingRestart,
    /// Player quit or input ended.
    Closed,
}

/// Session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading input or writing a frame failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// What a finished session reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Games started, including the current one
    pub games_played: u32,
    /// Highest score seen in this process
    pub best_score: u32,
    /// State of the last game when the session closed
    pub final_state: GameState,
}

/// A single-player session.
pub struct GameSession<R: RandomSource = DeterministicRng> {
    /// Seed the random source was created from (for logs).
    seed: u64,
    rng: R,
    game: GameState,
    state: SessionState,
    best_score: u32,
    games_played: u32,
    /// Shown under the next frame, then cleared.
    notice: Option<&'static str>,
}

impl GameSession<DeterministicRng> {
    /// Create a session seeded from config (or the clock).
    pub fn new(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(seed_from_clock);
        Self::with_rng(seed, DeterministicRng::new(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session around an existing random source.
    pub fn with_rng(seed: u64, mut rng: R) -> Self {
        let game = new_game(&mut rng);
        info!(seed, "New game");
        Self {
            seed,
            rng,
            game,
            state: SessionState::Playing,
            best_score: 0,
            games_played: 1,
            notice: None,
        }
    }

    /// Current game.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Highest score seen so far.
    pub fn best_score(&self) -> u32 {
        self.best_score.max(self.game.score)
    }

    /// Summary of the session so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            games_played: self.games_played,
            best_score: self.best_score(),
            final_state: self.game,
        }
    }

    /// Apply a move to the live game.
    ///
    /// Returns `None` unless the session is playing.
    pub fn play(&mut self, direction: Move) -> Option<StepResult> {
        if self.state != SessionState::Playing {
            return None;
        }

        let result = step(&mut self.game, direction, &mut self.rng);
        debug!(
            direction = %direction,
            moved = result.moved,
            gained = result.score_gained,
            score = self.game.score,
            "Move applied"
        );

        match result.phase {
            GamePhase::Won => {
                info!(score = self.game.score, moves = self.game.moves, "Game won");
                self.state = SessionState::AwaitingRestart;
            }
            GamePhase::Lost => {
                info!(
                    score = self.game.score,
                    max_tile = self.game.max_tile(),
                    moves = self.game.moves,
                    "Game lost"
                );
                self.state = SessionState::AwaitingRestart;
            }
            GamePhase::Playing => {}
        }

        Some(result)
    }

    /// Handle one parsed command while playing.
    pub fn handle(&mut self, command: Command) -> Option<StepResult> {
        match command {
            Command::Move(direction) => self.play(direction),
            Command::Quit => {
                self.close();
                None
            }
        }
    }

    /// Replace the current game with a fresh one.
    pub fn restart(&mut self) {
        self.best_score = self.best_score();
        self.game = new_game(&mut self.rng);
        self.games_played += 1;
        self.state = SessionState::Playing;
        info!(seed = self.seed, game = self.games_played, "New game");
    }

    /// Mark the session closed.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;
        info!(
            score = self.game.score,
            best = self.best_score(),
            games = self.games_played,
            hash = %short_hex(&self.game.compute_hash()),
            "Session closed"
        );
    }

    /// Run the interactive loop until the player quits or input ends.
    pub fn run<I, O>(
        &mut self,
        mut input: I,
        mut output: O,
    ) -> Result<SessionSummary, SessionError>
    where
        I: BufRead,
        O: Write,
    {
        writeln!(output, "Welcome to 2048!")?;
        writeln!(output, "Combine tiles with the same number to reach 2048!")?;
        write!(output, "Press Enter to start...")?;
        output.flush()?;
        if read_line(&mut input)?.is_none() {
            self.close();
        }

        while self.state != SessionState::Closed {
            self.render(&mut output)?;

            match self.state {
                SessionState::AwaitingRestart => {
                    write!(output, "Play again? (y/n): ")?;
                    output.flush()?;
                    match read_line(&mut input)? {
                        Some(answer) if is_affirmative(&answer) => self.restart(),
                        _ => self.close(),
                    }
                }
                SessionState::Playing => {
                    write!(output, "Enter move: ")?;
                    output.flush()?;
                    let Some(line) = read_line(&mut input)? else {
                        self.close();
                        break;
                    };
                    match line.parse::<Command>() {
                        Ok(command) => {
                            self.handle(command);
                        }
                        Err(err) => {
                            warn!(%err, "Ignoring input");
                            self.notice = Some(INVALID_INPUT);
                        }
                    }
                }
                SessionState::Closed => {}
            }
        }

        writeln!(output)?;
        writeln!(output, "Thanks for playing!")?;
        output.flush()?;

        Ok(self.summary())
    }

    fn render<O: Write>(&mut self, output: &mut O) -> Result<(), SessionError> {
        write!(output, "{}{}", CLEAR_SCREEN, self.game)?;
        if let Some(notice) = self.notice.take() {
            writeln!(output, "{}", notice)?;
        }
        Ok(())
    }
}

/// Read one line; `None` at end of input.
///
/// Bytes that are not UTF-8 are replaced, so they fail to parse as a
/// command instead of ending the session.
fn read_line<I: BufRead>(input: &mut I) -> Result<Option<String>, SessionError> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::game::board::Board;
    use crate::game::render::{LOSS_BANNER, WIN_BANNER};

    fn create_test_session() -> GameSession {
        GameSession::new(&GameConfig {
            seed: Some(12345),
            ..GameConfig::default()
        })
    }

    fn run_with(session: &mut GameSession, script: &str) -> (SessionSummary, String) {
        run_bytes(session, script.as_bytes())
    }

    fn run_bytes(session: &mut GameSession, script: &[u8]) -> (SessionSummary, String) {
        let mut out = Vec::new();
        let summary = session.run(Cursor::new(script), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = create_test_session();
        let b = create_test_session();
        assert_eq!(a.game(), b.game());
        assert_eq!(a.state(), SessionState::Playing);
    }

    #[test]
    fn test_quit_immediately() {
        let mut session = create_test_session();
        let start = *session.game();

        let (summary, out) = run_with(&mut session, "\nq\n");

        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(summary.final_state, start);
        assert_eq!(summary.games_played, 1);
        assert!(out.starts_with("Welcome to 2048!"));
        assert!(out.contains("Enter move: "));
        assert!(out.ends_with("Thanks for playing!\n"));
    }

    #[test]
    fn test_eof_closes_session() {
        let mut session = create_test_session();
        let (_, out) = run_with(&mut session, "");

        assert_eq!(session.state(), SessionState::Closed);
        assert!(!out.contains("Enter move: "));
        assert!(out.contains("Thanks for playing!"));
    }

    #[test]
    fn test_invalid_input_shows_notice_once() {
        let mut session = create_test_session();
        let (_, out) = run_with(&mut session, "\nxyz\nq\n");

        assert_eq!(out.matches(INVALID_INPUT).count(), 1);
        assert_eq!(session.game().moves, 0);
    }

    #[test]
    fn test_non_utf8_line_is_invalid_input() {
        let mut session = create_test_session();
        let start = *session.game();

        let (summary, out) = run_bytes(&mut session, b"\n\xff\xfe\nq\n");

        assert_eq!(out.matches(INVALID_INPUT).count(), 1);
        assert_eq!(summary.final_state, start);
        assert_eq!(session.state(), SessionState::Closed);
        assert!(out.ends_with("Thanks for playing!\n"));
    }

    #[test]
    fn test_moves_are_applied() {
        let mut session = create_test_session();
        let mut expected = *session.game();
        let mut rng = DeterministicRng::new(12345);
        let _ = new_game(&mut rng);
        for mv in [Move::Left, Move::Up, Move::Right] {
            expected = crate::game::step::apply_move(expected, mv, &mut rng).0;
        }

        let (summary, _) = run_with(&mut session, "\na\nw\nd\nq\n");

        assert_eq!(summary.final_state, expected);
    }

    #[test]
    fn test_restart_after_loss() {
        let mut session = create_test_session();
        session.game = GameState::from_board(Board::from_rows([
            [2, 4, 8, 16],
            [32, 64, 128, 256],
            [512, 1024, 2, 8],
            [2, 2, 16, 32],
        ]));
        session.game.score = 5000;

        // The only free cell after the slide is the corner; a 2 or a 4 there
        // has no equal neighbour.
        let result = session.play(Move::Left).unwrap();
        assert!(result.moved);
        assert!(session.game().lost);
        assert_eq!(session.state(), SessionState::AwaitingRestart);
        assert!(session.play(Move::Right).is_none());

        let (summary, out) = run_with(&mut session, "\ny\nq\n");
        assert!(out.contains(LOSS_BANNER));
        assert!(out.contains("Play again? (y/n): "));
        assert_eq!(summary.games_played, 2);
        assert_eq!(summary.best_score, 5004);
        assert_eq!(summary.final_state.score, 0);
    }

    #[test]
    fn test_decline_after_win() {
        let mut session = create_test_session();
        session.game = GameState::from_board(Board::from_rows([
            [1024, 1024, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]));

        session.play(Move::Left).unwrap();
        assert!(session.game().won);
        assert_eq!(session.state(), SessionState::AwaitingRestart);

        let (summary, out) = run_with(&mut session, "\nn\n");
        assert!(out.contains(WIN_BANNER));
        assert_eq!(summary.games_played, 1);
        assert_eq!(summary.best_score, 2048);
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_handle_quit() {
        let mut session = create_test_session();
        assert!(session.handle(Command::Quit).is_none());
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.handle(Command::Move(Move::Left)).is_none());
    }
}
