//! Deterministic AI heuristics.
//!
//! Both functions are pure: the same board always yields the same choice,
//! which keeps AI-only games reproducible from the board seed alone.

pub mod strategy;

pub use strategy::{choose_move, choose_placement};
