//! # penguins
//!
//! Core state machine for a turn-based, 2-4 player tile-capture game played
//! on a rectangular grid. Players place one penguin each on a one-fish tile,
//! then take turns moving it a single step, capturing the fish value of each
//! tile they land on, until nobody has a legal move left.
//!
//! ## Design Principles
//!
//! 1. **Driver-Agnostic**: The crate contains no I/O beyond the save codec.
//!    An external driver owns the prompt/render loop and feeds validated
//!    inputs into the state machine.
//!
//! 2. **Deterministic**: Board generation takes an explicit seeded RNG, and
//!    both AI heuristics are pure functions. Same seed, same game.
//!
//! 3. **Recoverable Rejection**: Semantically invalid inputs (bad placement
//!    target, illegal direction) return a [`RuleViolation`] without mutating
//!    any state, so the driver can simply re-prompt.
//!
//! ## Modules
//!
//! - `core`: Coordinates, tiles, the board and its legality predicates,
//!   players, deterministic RNG
//! - `game`: The Placing -> Moving -> Over phase machine
//! - `ai`: Deterministic placement and movement heuristics
//! - `save`: Line-oriented suspend/resume codec (`PENGUINS_SAVE_V1`)

pub mod ai;
pub mod core;
pub mod game;
pub mod save;

// Re-export commonly used types
pub use crate::core::{
    Board, Coord, Direction, GameRng, Player, PlayerColor, PlayerId, Tile, MAX_PLAYERS,
    MIN_PLAYERS, NAME_LIMIT,
};

pub use crate::game::{
    GameBuilder, GameResult, GameState, Mode, Phase, RuleViolation, TurnInput, TurnOutcome,
};

pub use crate::save::{
    load_game, read_save, save_exists, save_game, write_save, LoadError, SaveError,
    DEFAULT_SAVE_FILE, SAVE_HEADER,
};
