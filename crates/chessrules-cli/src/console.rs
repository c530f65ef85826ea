//! Line-oriented console game loop.

use crate::command::{Command, HELP};
use crate::config::DisplayConfig;
use crate::render;
use chessrules_core::{Color, Move};
use chessrules_engine::{Board, GameState, HistoryIndex};
use std::io::{self, BufRead, Write};

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A two-player game at one terminal. Turns alternate starting with White.
pub struct Console {
    board: Board,
    turn: Color,
    display: DisplayConfig,
}

impl Console {
    pub fn new(board: Board, display: DisplayConfig) -> Self {
        Console {
            board,
            turn: Color::White,
            display,
        }
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reads commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        self.show_board(out)?;
        write!(out, "{}> ", self.turn)?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(command) => self.execute(command, out)?,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(());
            }
            write!(out, "{}> ", self.turn)?;
            out.flush()?;
        }
        writeln!(out)
    }

    /// Runs a single command.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        match command {
            Command::Play(mv) => self.play(mv, out)?,
            Command::Moves(square) => {
                let set = self.board.legal_destinations(square, self.turn);
                if set.is_empty() {
                    writeln!(out, "no legal moves from {} for {}", square, self.turn)?;
                } else {
                    writeln!(out, "{}: {}", square, render::square_list(set))?;
                    if self.display.show_destinations {
                        writeln!(out, "{}", render::destinations(set, self.display.coordinates))?;
                    }
                }
            }
            Command::History(index) => match self.board.history_view(index) {
                Some(view) => writeln!(out, "{}", render::board(view, self.display.coordinates))?,
                None => {
                    let len = self.board.history().len();
                    match index {
                        HistoryIndex::At(n) => {
                            writeln!(out, "no snapshot {}; {} recorded", n, len)?
                        }
                        HistoryIndex::Latest => writeln!(out, "no snapshots recorded")?,
                    }
                }
            },
            Command::Board => self.show_board(out)?,
            Command::Reset => {
                self.board.reset();
                self.turn = Color::White;
                writeln!(out, "new game")?;
                self.show_board(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
            Command::Unknown(text) => {
                writeln!(out, "unknown command '{}'; type 'help'", text)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self, mv: Move, out: &mut impl Write) -> io::Result<()> {
        if !self.board.apply_move(mv.from, mv.to, self.turn) {
            writeln!(out, "illegal move {} for {}", mv, self.turn)?;
            return Ok(());
        }
        let mover = self.turn;
        self.turn = mover.opposite();
        tracing::debug!(%mover, %mv, "move played");

        self.show_board(out)?;
        let state = self.board.checkmate_state(self.turn);
        writeln!(out, "{} to move: {}", self.turn, state)?;
        match state {
            GameState::Checkmate => writeln!(out, "{} wins; 'reset' starts a new game", mover)?,
            GameState::Stalemate => writeln!(out, "draw; 'reset' starts a new game")?,
            GameState::InCheck | GameState::None => {}
        }
        if self.board.threefold_repetition() {
            writeln!(out, "threefold repetition")?;
        }
        if self.board.due_fifty_moves_rule() {
            writeln!(out, "fifty-move rule")?;
        }
        Ok(())
    }

    fn show_board(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render::board(&self.board.view(), self.display.coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessrules_engine::NullSink;
    use std::sync::Arc;

    fn console() -> Console {
        Console::new(Board::with_diagnostics(Arc::new(NullSink)), DisplayConfig::default())
    }

    fn run(console: &mut Console, script: &str) -> String {
        let mut out = Vec::new();
        console.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_turns_alternate() {
        let mut console = console();
        let output = run(&mut console, "e2e4\ne7-e5\n");
        assert_eq!(console.turn(), Color::White);
        assert!(output.contains("Black to move: none"));
        assert!(output.contains("White to move: none"));
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut console = console();
        let output = run(&mut console, "e7e5\n");
        assert!(output.contains("illegal move e7e5 for White"));
        assert_eq!(console.turn(), Color::White);
        assert_eq!(console.board().history().len(), 1);
    }

    #[test]
    fn test_fools_mate_reports_winner() {
        let mut console = console();
        let output = run(&mut console, "f2f3\ne7e5\ng2g4\nd8h4\n");
        assert!(output.contains("White to move: checkmate"));
        assert!(output.contains("Black wins"));
    }

    #[test]
    fn test_moves_lists_destinations() {
        let mut console = console();
        let output = run(&mut console, "moves g1\nmoves e4\n");
        assert!(output.contains("g1: f3 h3"));
        assert!(output.contains("no legal moves from e4 for White"));
    }

    #[test]
    fn test_history_and_reset() {
        let mut console = console();
        let output = run(&mut console, "e2e4\nhistory 0\nhistory 9\nreset\n");
        assert!(output.contains("no snapshot 9; 2 recorded"));
        assert!(output.contains("new game"));
        assert_eq!(console.board().history().len(), 1);
        assert_eq!(console.turn(), Color::White);
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut console = console();
        let _ = run(&mut console, "quit\ne2e4\n");
        assert_eq!(console.board().history().len(), 1);
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let mut console = console();
        let output = run(&mut console, "e2e9\nfly\n");
        assert!(output.contains("invalid square: 'e9'"));
        assert!(output.contains("unknown command 'fly'"));
    }

    #[test]
    fn test_draw_flags_after_shuffle() {
        let mut console = console();
        let script = "g1f3\ng8f6\nf3g1\nf6g8\n".repeat(3);
        let output = run(&mut console, &script);
        assert!(output.contains("threefold repetition"));
        assert!(!output.contains("fifty-move rule"));
    }
}
