//! Session loop: reads commands, drives a [`Game`], writes responses.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::core::{Game, GameError, GameSnapshot, Grid, RandomSource};
use crate::protocol::{
    create_error, create_snapshot, parse_command, Command, DirectionArg, ErrorCode, Response,
};

/// A game plus the outbound sequence counter.
pub struct Session<R> {
    game: Game<R>,
    seq: u64,
}

impl<R: RandomSource> Session<R> {
    pub fn new(game: Game<R>) -> Self {
        Self { game, seq: 0 }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn into_game(self) -> Game<R> {
        self.game
    }

    /// Snapshot of the current game, without running a command.
    pub fn current(&mut self) -> Response {
        let seq = self.next_seq();
        create_snapshot(seq, &self.game.snapshot())
    }

    /// Handle one raw input line. Blank lines produce no response.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match parse_command(line) {
            Ok(cmd) => Some(self.handle(cmd)),
            Err(e) => {
                warn!(error = %e, "bad request");
                let seq = self.next_seq();
                Some(create_error(seq, ErrorCode::BadRequest, &e.to_string()))
            }
        }
    }

    /// Apply one command to the game.
    pub fn handle(&mut self, cmd: Command) -> Response {
        debug!(?cmd, "command");
        let result = self.apply(cmd);
        let seq = self.next_seq();
        match result {
            Ok(snap) => create_snapshot(seq, &snap),
            Err(e) => {
                debug!(code = e.code(), error = %e, "command rejected");
                create_error(seq, ErrorCode::from(&e), &e.to_string())
            }
        }
    }

    fn apply(&mut self, cmd: Command) -> Result<GameSnapshot, GameError> {
        match cmd {
            Command::Move {
                direction: DirectionArg::Name(name),
            } => self.game.move_named(&name),
            Command::Move {
                direction: DirectionArg::Code(code),
            } => match u8::try_from(code) {
                Ok(code) => self.game.move_code(code),
                Err(_) => Err(GameError::InvalidDirection(code.to_string())),
            },
            Command::NewGame => Ok(self.game.new_game()),
            Command::Continue => self.game.continue_after_win(),
            Command::Snapshot => Ok(self.game.snapshot()),
            Command::Settle => {
                self.game.settle();
                Ok(self.game.snapshot())
            }
            Command::Restore { grid, score } => {
                let grid = Grid::from_values(&grid)?;
                self.game.restore(grid, score)
            }
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

/// Run the protocol until `input` is exhausted.
///
/// The first line written is a snapshot of the starting session. Returns the
/// number of responses written.
pub fn run<R, I, O>(session: &mut Session<R>, input: I, mut output: O) -> Result<u64>
where
    R: RandomSource,
    I: BufRead,
    O: Write,
{
    info!("headless session started");
    let mut written = 0;

    let first = session.current();
    write_response(&mut output, &first)?;
    written += 1;

    for line in input.lines() {
        let line = line?;
        if let Some(resp) = session.handle_line(&line) {
            write_response(&mut output, &resp)?;
            written += 1;
        }
    }

    info!(responses = written, "headless session ended");
    Ok(written)
}

fn write_response<O: Write>(out: &mut O, resp: &Response) -> Result<()> {
    serde_json::to_writer(&mut *out, resp)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
