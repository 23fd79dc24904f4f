//! The save format and its encoder/decoder.
//!
//! ## Layout
//!
//! Whitespace-separated tokens, conventionally one record per line:
//!
//! ```text
//! PENGUINS_SAVE_V1
//! <rows> <cols>
//! <numPlayers> <mode> <turnIndex>
//! <active_0> ... <active_{numPlayers-1}>
//! <id> <isAI> <remainingPlacements> <score> <name>    (one line per player)
//! <fish> <owner>                                      (one line per tile, row-major)
//! ```
//!
//! `mode` is 1 (PvP) or 2 (PvAI); `isAI` and the active flags are 0/1;
//! `owner` is 0 for unowned tiles. Names are single whitespace-free tokens
//! and are clamped to 31 characters on read. The decoder tokenizes on
//! arbitrary whitespace and ignores anything after the final tile.
//!
//! Decoding either produces a complete movement-phase [`GameState`] or an
//! error; no partial state ever escapes. Saves snapshot whatever they are
//! given; a snapshot with leftover placement quota resumes into movement
//! and the quota is ignored from then on.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::player::truncate_name;
use crate::core::{Board, Player, PlayerId, Tile, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::{GameState, Mode};

/// First token of every valid save file.
pub const SAVE_HEADER: &str = "PENGUINS_SAVE_V1";

/// Save file name used by the reference driver.
pub const DEFAULT_SAVE_FILE: &str = "savegame.txt";

/// A save that could not be written. The in-memory game is untouched.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not write save file: {0}")]
    Io(#[from] io::Error),
}

/// A save that could not be read. No game state is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read save file: {0}")]
    Io(#[from] io::Error),
    #[error("not a penguin save file")]
    BadHeader,
    #[error("missing or malformed {0}")]
    Malformed(&'static str),
    #[error("{0} out of range")]
    OutOfRange(&'static str),
}

/// Encode a game into a writer.
pub fn write_save<W: Write>(state: &GameState, out: &mut W) -> io::Result<()> {
    let board = state.board();

    writeln!(out, "{SAVE_HEADER}")?;
    writeln!(out, "{} {}", board.rows(), board.cols())?;
    writeln!(
        out,
        "{} {} {}",
        state.players().len(),
        state.mode().code(),
        state.turn_index()
    )?;

    let flags: Vec<String> = state
        .players()
        .iter()
        .map(|p| u8::from(p.active).to_string())
        .collect();
    writeln!(out, "{}", flags.join(" "))?;

    for player in state.players() {
        writeln!(
            out,
            "{} {} {} {} {}",
            player.id.get(),
            u8::from(player.is_ai),
            player.remaining_placements,
            player.score,
            player.name
        )?;
    }

    for (_, tile) in board.iter() {
        writeln!(out, "{} {}", tile.fish, tile.owner.map_or(0, |p| p.get()))?;
    }

    Ok(())
}

/// Decode a game from a reader. Always resumes into the movement phase.
pub fn read_save<R: Read>(mut input: R) -> Result<GameState, LoadError> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let mut tokens = text.split_whitespace();

    match tokens.next() {
        Some(SAVE_HEADER) => {}
        _ => return Err(LoadError::BadHeader),
    }

    let rows: usize = parse(&mut tokens, "row count")?;
    let cols: usize = parse(&mut tokens, "column count")?;
    let tile_count = rows
        .checked_mul(cols)
        .filter(|&n| n > 0)
        .ok_or(LoadError::OutOfRange("board dimensions"))?;

    let num_players: usize = parse(&mut tokens, "player count")?;
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
        return Err(LoadError::OutOfRange("player count"));
    }

    let mode_code: u8 = parse(&mut tokens, "mode")?;
    let mode = Mode::from_code(mode_code).ok_or(LoadError::OutOfRange("mode"))?;

    let turn_index: usize = parse(&mut tokens, "turn index")?;
    if turn_index >= num_players {
        return Err(LoadError::OutOfRange("turn index"));
    }

    let mut active = Vec::with_capacity(num_players);
    for _ in 0..num_players {
        active.push(parse_flag(&mut tokens, "active flag")?);
    }

    let mut players = Vec::with_capacity(num_players);
    for slot in 0..num_players {
        let id: u8 = parse(&mut tokens, "player id")?;
        if id as usize != slot + 1 {
            return Err(LoadError::OutOfRange("player id"));
        }
        let is_ai = parse_flag(&mut tokens, "ai flag")?;
        let remaining_placements: u8 = parse(&mut tokens, "placement count")?;
        let score: u32 = parse(&mut tokens, "score")?;
        let name = tokens.next().ok_or(LoadError::Malformed("player name"))?;

        players.push(Player {
            id: PlayerId::new(id),
            name: truncate_name(name.to_string()),
            is_ai,
            remaining_placements,
            score,
            active: active[slot],
        });
    }

    let mut tiles = Vec::with_capacity(tile_count);
    for _ in 0..tile_count {
        let fish: u8 = parse(&mut tokens, "tile fish")?;
        if fish > 3 {
            return Err(LoadError::OutOfRange("tile fish"));
        }
        let owner: u8 = parse(&mut tokens, "tile owner")?;
        if owner as usize > num_players {
            return Err(LoadError::OutOfRange("tile owner"));
        }
        tiles.push(Tile {
            fish,
            owner: (owner != 0).then(|| PlayerId::new(owner)),
        });
    }

    let board = Board::from_tiles(rows, cols, tiles);
    Ok(GameState::resume(board, players, mode, turn_index))
}

/// Encode a game into a file. A failure leaves the in-memory state intact,
/// though a partially written file may remain on disk.
pub fn save_game(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_save(state, &mut out)?;
    out.flush()?;
    debug!(path = %path.display(), "game saved");
    Ok(())
}

/// Decode a game from a file.
pub fn load_game(path: impl AsRef<Path>) -> Result<GameState, LoadError> {
    let path = path.as_ref();
    let state = read_save(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), "game loaded");
    Ok(state)
}

/// Whether a save file is present, for the driver's resume prompt.
#[must_use]
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

fn parse<'a, T, I>(tokens: &mut I, field: &'static str) -> Result<T, LoadError>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .ok_or(LoadError::Malformed(field))?
        .parse()
        .map_err(|_| LoadError::Malformed(field))
}

fn parse_flag<'a, I>(tokens: &mut I, field: &'static str) -> Result<bool, LoadError>
where
    I: Iterator<Item = &'a str>,
{
    match parse::<u8, I>(tokens, field)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(LoadError::OutOfRange(field)),
    }
}
