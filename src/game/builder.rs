//! Builder for fresh games.
//!
//! Mirrors the driver's setup flow: pick a mode, collect names, build a
//! randomized board from a seed. PvAI games always get exactly two players,
//! the human first and the AI second.

use tracing::info;

use super::state::{GameState, Mode};
use crate::core::{Board, GameRng, Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};

/// Default board height.
pub const DEFAULT_ROWS: usize = 10;

/// Default board width.
pub const DEFAULT_COLS: usize = 10;

/// Name given to the computer opponent in PvAI games.
pub const AI_NAME: &str = "AI";

/// Builder for creating a fresh [`GameState`] in the placement phase.
pub struct GameBuilder {
    rows: usize,
    cols: usize,
    mode: Mode,
    names: Vec<String>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            mode: Mode::Pvp,
            names: Vec::new(),
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board dimensions. Defaults to 10x10.
    pub fn dimensions(mut self, rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Board must have at least one tile");
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Game mode. Defaults to [`Mode::Pvp`].
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Add a human player. Call once for PvAI, 2-4 times for PvP.
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Build the initial state: randomized board, every player owing one
    /// placement, phase set to Placing.
    ///
    /// Panics when the human count does not fit the mode: PvAI takes exactly
    /// one human (the AI fills the second seat), PvP takes 2-4.
    #[must_use]
    pub fn build(self, seed: u64) -> GameState {
        let mut players: Vec<Player> = self
            .names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(i as u8 + 1), name, false))
            .collect();

        match self.mode {
            Mode::PvAi => {
                assert!(
                    players.len() == 1,
                    "PvAI games take exactly one human player"
                );
                players.push(Player::new(PlayerId::new(2), AI_NAME, true));
            }
            Mode::Pvp => {
                assert!(
                    (MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()),
                    "PvP games take 2-4 players"
                );
            }
        }

        let mut rng = GameRng::new(seed);
        let board = Board::random(self.rows, self.cols, &mut rng);

        info!(
            rows = self.rows,
            cols = self.cols,
            players = players.len(),
            seed,
            "new game built"
        );
        GameState::start(board, players, self.mode)
    }
}
