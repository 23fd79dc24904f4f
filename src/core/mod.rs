//! Core game types: coordinates, tiles, the board, players, RNG.
//!
//! Everything here is pure data plus predicates; the phase machine in
//! `crate::game` drives the mutations.

pub mod board;
pub mod player;
pub mod rng;

pub use board::{Board, Coord, Direction, Tile};
pub use player::{Player, PlayerColor, PlayerId, MAX_PLAYERS, MIN_PLAYERS, NAME_LIMIT};
pub use rng::GameRng;
