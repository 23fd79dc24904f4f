//! The board: a rectangular grid of fish tiles.
//!
//! ## Storage
//!
//! Tiles live in one flat row-major `Vec` indexed by `row * cols + col`, so
//! a board either exists completely or not at all.
//!
//! ## Tile lifecycle
//!
//! A tile starts with 0-3 fish and no owner. Placing or moving onto it
//! captures its fish and tags it with the mover's id; vacating it strips
//! both, leaving *dead water* (`fish == 0`, no owner), which never becomes
//! playable again.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use super::rng::GameRng;

/// Chance that a generated tile starts as empty water.
const EMPTY_WATER_CHANCE: f64 = 0.15;

/// A grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate.
    ///
    /// ```
    /// use penguins::core::Coord;
    ///
    /// assert_eq!(Coord::new(2, 3).manhattan(Coord::new(2, 4)), 1);
    /// assert_eq!(Coord::new(0, 0).manhattan(Coord::new(1, 1)), 2);
    /// ```
    #[must_use]
    pub const fn manhattan(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One movement step. Variant order is the canonical scan order used by
/// move legality and the AI: up, down, left, right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in canonical scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The coordinate one step in this direction, or `None` when stepping
    /// off the top or left edge. Bottom/right overflow is left to the
    /// board's bounds check.
    #[must_use]
    pub const fn step(self, from: Coord) -> Option<Coord> {
        match self {
            Direction::Up => match from.row.checked_sub(1) {
                Some(row) => Some(Coord::new(row, from.col)),
                None => None,
            },
            Direction::Down => Some(Coord::new(from.row + 1, from.col)),
            Direction::Left => match from.col.checked_sub(1) {
                Some(col) => Some(Coord::new(from.row, col)),
                None => None,
            },
            Direction::Right => Some(Coord::new(from.row, from.col + 1)),
        }
    }

    /// Map a W/A/S/D command character (either case) to a direction.
    ///
    /// ```
    /// use penguins::core::Direction;
    ///
    /// assert_eq!(Direction::from_wasd('w'), Some(Direction::Up));
    /// assert_eq!(Direction::from_wasd('D'), Some(Direction::Right));
    /// assert_eq!(Direction::from_wasd('q'), None);
    /// ```
    #[must_use]
    pub const fn from_wasd(cmd: char) -> Option<Self> {
        match cmd {
            'w' | 'W' => Some(Direction::Up),
            's' | 'S' => Some(Direction::Down),
            'a' | 'A' => Some(Direction::Left),
            'd' | 'D' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// One grid cell: a fish count and an optional owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Fish remaining on this tile, 0-3.
    pub fish: u8,

    /// The player whose penguin sits here, if any.
    pub owner: Option<PlayerId>,
}

impl Tile {
    /// Create an unowned tile with the given fish count.
    #[must_use]
    pub const fn with_fish(fish: u8) -> Self {
        Self { fish, owner: None }
    }

    /// Dead water: no fish and no owner. Permanently unplayable.
    #[must_use]
    pub const fn is_empty_water(&self) -> bool {
        self.fish == 0 && self.owner.is_none()
    }
}

/// Rectangular grid of tiles. Dimensions are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Create a randomized board: each tile independently gets no fish with
    /// probability 0.15, otherwise a uniform count in 1..=3. No owners.
    #[must_use]
    pub fn random(rows: usize, cols: usize, rng: &mut GameRng) -> Self {
        assert!(rows > 0 && cols > 0, "Board must have at least one tile");

        let tiles = (0..rows * cols)
            .map(|_| {
                let fish = if rng.gen_bool(EMPTY_WATER_CHANCE) {
                    0
                } else {
                    rng.gen_range(1..=3)
                };
                Tile::with_fish(fish)
            })
            .collect();

        Self { rows, cols, tiles }
    }

    /// Rebuild a board from row-major tiles (used by the save codec and
    /// test fixtures).
    #[must_use]
    pub fn from_tiles(rows: usize, cols: usize, tiles: Vec<Tile>) -> Self {
        assert!(rows > 0 && cols > 0, "Board must have at least one tile");
        assert_eq!(tiles.len(), rows * cols, "Tile count must match dimensions");

        Self { rows, cols, tiles }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether a coordinate lies on the board.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// The tile at a coordinate. Panics when out of bounds; use
    /// [`Board::get`] for fallible access.
    #[must_use]
    pub fn tile(&self, coord: Coord) -> &Tile {
        &self.tiles[coord.row * self.cols + coord.col]
    }

    /// The tile at a coordinate, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        if self.in_bounds(coord) {
            Some(self.tile(coord))
        } else {
            None
        }
    }

    pub(crate) fn tile_mut(&mut self, coord: Coord) -> &mut Tile {
        &mut self.tiles[coord.row * self.cols + coord.col]
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.tiles.iter().enumerate().map(|(i, tile)| {
            (Coord::new(i / self.cols, i % self.cols), tile)
        })
    }

    /// In-bounds 4-neighbors of a coordinate in canonical scan order
    /// (up, down, left, right).
    #[must_use]
    pub fn neighbors(&self, coord: Coord) -> SmallVec<[Coord; 4]> {
        Direction::ALL
            .iter()
            .filter_map(|dir| dir.step(coord))
            .filter(|&c| self.in_bounds(c))
            .collect()
    }

    /// Whether a single step from `from` to `to` is legal: `to` in bounds,
    /// exactly one tile away 4-directionally, not dead water, and unowned.
    ///
    /// Does not check that `from` belongs to the mover.
    #[must_use]
    pub fn is_valid_move(&self, from: Coord, to: Coord) -> bool {
        if !self.in_bounds(to) {
            return false;
        }
        if from.manhattan(to) != 1 {
            return false;
        }
        let tile = self.tile(to);
        if tile.is_empty_water() {
            return false;
        }
        tile.owner.is_none()
    }

    /// Locate a player's penguin: the first tile in row-major order owned by
    /// `player`. At most one such tile exists at any time.
    #[must_use]
    pub fn find_piece(&self, player: PlayerId) -> Option<Coord> {
        self.iter()
            .find(|(_, tile)| tile.owner == Some(player))
            .map(|(coord, _)| coord)
    }

    /// Whether any placement target remains: a tile with exactly one fish
    /// and no owner.
    #[must_use]
    pub fn can_place(&self) -> bool {
        self.tiles
            .iter()
            .any(|tile| tile.fish == 1 && tile.owner.is_none())
    }

    /// Whether the player's penguin has at least one legal step. A player
    /// with no penguin on the board cannot move.
    #[must_use]
    pub fn player_can_move(&self, player: PlayerId) -> bool {
        match self.find_piece(player) {
            Some(from) => self
                .neighbors(from)
                .iter()
                .any(|&to| self.is_valid_move(from, to)),
            None => false,
        }
    }

    /// Total fish remaining on the board.
    #[must_use]
    pub fn total_fish(&self) -> u32 {
        self.tiles.iter().map(|tile| u32::from(tile.fish)).sum()
    }
}
