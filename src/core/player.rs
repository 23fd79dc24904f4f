//! Player identity and per-player game data.
//!
//! ## PlayerId
//!
//! Type-safe 1-based player identifier, matching the id field of the
//! persisted save format. Games support 2-4 players.
//!
//! ## Player
//!
//! Identity plus the mutable per-player state the phase machine tracks:
//! placement quota, score, and the permanent activity flag.

use serde::{Deserialize, Serialize};

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 4;

/// Longest player name the save format carries (in characters).
pub const NAME_LIMIT: usize = 31;

/// Player identifier, 1-based: the first player is `PlayerId(1)`.
///
/// The 1-based numbering matches the persisted format, where tile owner `0`
/// means "unowned"; inside the crate an unowned tile is `None` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw 1-based id.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Get the 0-based index into the player list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use penguins::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Display color assigned to a player.
///
/// A pure function of the player id; rendering the color (ANSI or otherwise)
/// is the driver's job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Blue,
    Red,
    Green,
    Yellow,
}

impl PlayerColor {
    /// The color for a player id: 1 blue, 2 red, 3 green, 4 yellow.
    #[must_use]
    pub const fn for_player(id: PlayerId) -> Self {
        match id.get() {
            1 => PlayerColor::Blue,
            2 => PlayerColor::Red,
            3 => PlayerColor::Green,
            _ => PlayerColor::Yellow,
        }
    }
}

/// One participant in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique 1-based id; also the owner tag on captured tiles.
    pub id: PlayerId,

    /// Single whitespace-free token, at most [`NAME_LIMIT`] characters.
    pub name: String,

    /// Whether this player is driven by the AI heuristics.
    pub is_ai: bool,

    /// Placements still owed during the placement phase. Starts at 1.
    pub remaining_placements: u8,

    /// Total captured fish. Monotonically non-decreasing.
    pub score: u32,

    /// Permanently cleared the first time the player has no legal move.
    /// Only meaningful during the movement phase.
    pub active: bool,
}

impl Player {
    /// Create a fresh player with one placement owed and an empty score.
    ///
    /// Names longer than [`NAME_LIMIT`] characters are truncated.
    pub fn new(id: PlayerId, name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            id,
            name: truncate_name(name.into()),
            is_ai,
            remaining_placements: 1,
            score: 0,
            active: true,
        }
    }

    /// The display color for this player.
    #[must_use]
    pub const fn color(&self) -> PlayerColor {
        PlayerColor::for_player(self.id)
    }
}

/// Clamp a name to [`NAME_LIMIT`] characters.
pub(crate) fn truncate_name(name: String) -> String {
    match name.char_indices().nth(NAME_LIMIT) {
        Some((byte_idx, _)) => name[..byte_idx].to_string(),
        None => name,
    }
}
