//! Game module - the orchestrator behind the public API
//!
//! `Game` owns the grid, the score tracker, the randomness source and the
//! session state. Each operation runs the pure pieces in order (resolve,
//! spawn, detect terminal state, score) and hands back an immutable
//! [`GameSnapshot`]. Rejected operations return a [`GameError`] and leave the
//! session exactly as it was.

use tracing::{debug, info};

use crate::error::GameError;
use crate::grid::Grid;
use crate::moves::resolve_move;
use crate::rng::{RandomSource, SimpleRng};
use crate::rules::{is_lost, next_state};
use crate::scoring::ScoreTracker;
use crate::snapshot::GameSnapshot;
use crate::spawn::{spawn_tile, starting_grid, Spawned};
use crate::store::BestScoreStore;
use crate::types::{Direction, GameAction, GameState, Score};

/// Engine options chosen by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Keep the engine busy after a grid-changing move until [`Game::settle`]
    /// is called, so moves arriving during the host's slide animation are
    /// rejected with [`GameError::Busy`].
    pub hold_until_settled: bool,
}

/// A single-player session plus everything that outlives it (best score, RNG).
pub struct Game<R = SimpleRng> {
    grid: Grid,
    state: GameState,
    /// Player chose to keep playing after a win; `Won` is not surfaced again.
    win_acknowledged: bool,
    busy: bool,
    last_moved: bool,
    last_spawn: Option<Spawned>,
    /// Monotonic session id (increments on new game and restore).
    session_id: u32,
    /// Grid-changing moves accepted in this session.
    move_count: u32,
    scores: ScoreTracker,
    rng: R,
    config: GameConfig,
}

impl<R: RandomSource> Game<R> {
    /// Create an engine and deal the first session.
    ///
    /// The best score is read from `store` here and nowhere else.
    pub fn new(rng: R, store: impl BestScoreStore + Send + 'static) -> Self {
        Self::with_config(rng, store, GameConfig::default())
    }

    pub fn with_config(
        rng: R,
        store: impl BestScoreStore + Send + 'static,
        config: GameConfig,
    ) -> Self {
        let mut game = Self {
            grid: Grid::empty(),
            state: GameState::Idle,
            win_acknowledged: false,
            busy: false,
            last_moved: false,
            last_spawn: None,
            session_id: 0,
            move_count: 0,
            scores: ScoreTracker::new(Box::new(store)),
            rng,
            config,
        };
        let grid = starting_grid(&mut game.rng);
        game.deal(grid, 0, GameState::Idle);
        game
    }

    /// Throw away the current session and deal a fresh one.
    pub fn new_game(&mut self) -> GameSnapshot {
        let grid = starting_grid(&mut self.rng);
        self.deal(grid, 0, GameState::Idle);
        self.session_id = self.session_id.wrapping_add(1);
        info!(session = self.session_id, "new game");
        self.snapshot()
    }

    /// Replace the session with a saved grid and score.
    ///
    /// The grid is re-validated, then the state is derived from it: `Won` when
    /// it holds a winning tile, `Lost` when no move exists, `Playing` otherwise.
    pub fn restore(&mut self, grid: Grid, score: Score) -> Result<GameSnapshot, GameError> {
        let grid = Grid::from_rows(grid.into_rows())?;
        let state = next_state(&grid, GameState::Playing, false);
        self.deal(grid, score, state);
        self.session_id = self.session_id.wrapping_add(1);
        info!(session = self.session_id, state = %state, score, "session restored");
        Ok(self.snapshot())
    }

    fn deal(&mut self, grid: Grid, score: Score, state: GameState) {
        self.grid = grid;
        self.state = state;
        self.win_acknowledged = false;
        self.busy = false;
        self.last_moved = false;
        self.last_spawn = None;
        self.move_count = 0;
        self.scores.reset();
        self.scores.set_score(score);
    }

    /// Slide every tile toward `direction`.
    ///
    /// A move that changes nothing is accepted with `moved = false` and has no
    /// other effect: no spawn, no score, no state change.
    pub fn move_tiles(&mut self, direction: Direction) -> Result<GameSnapshot, GameError> {
        if self.state == GameState::Lost {
            return Err(GameError::SessionTerminated);
        }
        if self.busy {
            return Err(GameError::Busy);
        }
        self.busy = true;

        let outcome = resolve_move(&self.grid, direction);
        debug!(
            direction = %direction,
            moved = outcome.moved,
            score_delta = outcome.score_delta,
            "move resolved"
        );
        if !outcome.moved {
            self.busy = false;
            self.last_moved = false;
            return Ok(self.snapshot());
        }

        let mut grid = outcome.grid;
        self.last_spawn = None;
        if let Some((spawned_grid, spawned)) = spawn_tile(&grid, &mut self.rng) {
            grid = spawned_grid;
            self.last_spawn = Some(spawned);
        }
        self.grid = grid;
        self.move_count = self.move_count.wrapping_add(1);
        self.last_moved = true;

        let previous = self.state;
        self.state = next_state(&self.grid, previous, self.win_acknowledged);
        self.scores.add(outcome.score_delta);

        if self.state != previous && self.state.is_terminal() {
            self.scores.record_best();
            info!(
                session = self.session_id,
                state = %self.state,
                score = self.scores.score(),
                max_tile = self.grid.max_tile(),
                "session reached terminal state"
            );
        }

        self.busy = self.config.hold_until_settled;
        Ok(self.snapshot())
    }

    /// Parse and apply a direction name (see [`Direction::from_str`]).
    pub fn move_named(&mut self, name: &str) -> Result<GameSnapshot, GameError> {
        let direction =
            Direction::from_str(name).ok_or_else(|| GameError::InvalidDirection(name.to_string()))?;
        self.move_tiles(direction)
    }

    /// Apply a numeric direction code (`0 = Up`, `1 = Down`, `2 = Left`, `3 = Right`).
    pub fn move_code(&mut self, code: u8) -> Result<GameSnapshot, GameError> {
        let direction =
            Direction::try_from(code).map_err(|e| GameError::InvalidDirection(e.0.to_string()))?;
        self.move_tiles(direction)
    }

    /// Dismiss a win and keep playing. `Won` will not be surfaced again this session.
    pub fn continue_after_win(&mut self) -> Result<GameSnapshot, GameError> {
        if self.state != GameState::Won {
            return Err(GameError::IllegalContinuation(self.state));
        }
        self.win_acknowledged = true;
        self.last_moved = false;
        self.state = if is_lost(&self.grid) {
            GameState::Lost
        } else {
            GameState::Playing
        };
        if self.state == GameState::Lost {
            self.scores.record_best();
        }
        info!(session = self.session_id, state = %self.state, "continuing after win");
        Ok(self.snapshot())
    }

    /// Apply a host action.
    pub fn apply_action(&mut self, action: GameAction) -> Result<GameSnapshot, GameError> {
        match action {
            GameAction::Move(direction) => self.move_tiles(direction),
            GameAction::NewGame => Ok(self.new_game()),
            GameAction::Continue => self.continue_after_win(),
        }
    }

    /// Release the busy flag held by [`GameConfig::hold_until_settled`].
    pub fn settle(&mut self) {
        self.busy = false;
    }
}

impl<R> Game<R> {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.into_rows(),
            score: self.scores.score(),
            best_score: self.scores.best(),
            state: self.state,
            moved: self.last_moved,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> Score {
        self.scores.score()
    }

    pub fn best_score(&self) -> Score {
        self.scores.best()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Tile placed by the last grid-changing move.
    pub fn last_spawn(&self) -> Option<Spawned> {
        self.last_spawn
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl<R> std::fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("grid", &self.grid)
            .field("state", &self.state)
            .field("scores", &self.scores)
            .field("busy", &self.busy)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}
