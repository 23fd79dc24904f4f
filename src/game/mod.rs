//! The game phase machine: Placing -> Moving -> Over.
//!
//! A driver owns one [`GameState`] (built via [`GameBuilder`] or restored by
//! the save codec) and feeds it placements and turn inputs until the phase
//! reaches [`Phase::Over`].

pub mod builder;
pub mod state;

pub use builder::{GameBuilder, AI_NAME, DEFAULT_COLS, DEFAULT_ROWS};
pub use state::{GameResult, GameState, Mode, Phase, RuleViolation, TurnInput, TurnOutcome};
