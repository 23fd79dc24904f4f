//! Suspend/resume persistence.
//!
//! One tagged, versioned, line-oriented text record per save. The format is
//! the crate's only binary-compatible external contract; see [`codec`] for
//! the exact layout.

pub mod codec;

pub use codec::{
    load_game, read_save, save_exists, save_game, write_save, LoadError, SaveError,
    DEFAULT_SAVE_FILE, SAVE_HEADER,
};
