//! The aggregate game state and its turn-by-turn transitions.
//!
//! ## Phases
//!
//! - `Placing`: players put one penguin each on a one-fish tile, in id
//!   order, until everyone has placed or no target remains.
//! - `Moving`: round-robin single-step moves; a player with no legal step is
//!   permanently inactivated. The phase ends when nobody is active, or when
//!   a full pass over all slots completes no move.
//! - `Over`: terminal; [`GameState::result`] ranks players by score.
//!
//! ## Input contract
//!
//! Semantically invalid inputs return a [`RuleViolation`] without mutating
//! anything and without advancing the turn cursor, so the driver re-prompts
//! the same slot. AI slots need no input at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::ai;
use crate::core::{Board, Coord, Direction, Player, PlayerId};

/// Who is playing: two to four humans, or one human against the AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Pvp,
    PvAi,
}

impl Mode {
    /// The integer tag used by the save format: 1 for PvP, 2 for PvAI.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Mode::Pvp => 1,
            Mode::PvAi => 2,
        }
    }

    /// Decode a save-format mode tag.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Mode::Pvp),
            2 => Some(Mode::PvAi),
            _ => None,
        }
    }
}

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Placing,
    Moving,
    Over,
}

/// What a human slot feeds into [`GameState::play_turn`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnInput {
    /// Step the penguin one tile.
    Move(Direction),
    /// Stop without completing the turn so the driver can save and quit.
    Suspend,
}

/// What happened when a movement slot was processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player stepped onto `to` and captured `gained` fish.
    Moved {
        player: PlayerId,
        to: Coord,
        gained: u8,
    },
    /// The player had no legal step and is now permanently inactive.
    Inactivated(PlayerId),
    /// The player was already inactive; the cursor moved on.
    Skipped(PlayerId),
    /// The player chose to suspend; snapshot the state and exit.
    Suspended(PlayerId),
}

/// A recoverable rejection: the input was semantically invalid and nothing
/// changed. The driver re-prompts and tries again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("no placement is expected right now")]
    NotPlacing,
    #[error("the game is not in the movement phase")]
    NotMoving,
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),
    #[error("tile {0} must have exactly 1 fish")]
    NotOneFish(Coord),
    #[error("tile {0} is already occupied")]
    Occupied(Coord),
    #[error("cannot step {0:?} from the current tile")]
    IllegalMove(Direction),
    #[error("a command is required for a human turn")]
    InputRequired,
}

/// Final standing of a finished game, ranked by captured fish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single highest score.
    Winner(PlayerId),
    /// Shared highest score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won (or shared the win).
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

/// The complete aggregate: board, players, mode, phase, and the round-robin
/// turn cursor.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    players: Vec<Player>,
    mode: Mode,
    phase: Phase,
    /// Round-robin cursor into `players`; meaningful during movement.
    turn_index: usize,
    /// Slots visited since the current pass began.
    pass_slots: usize,
    /// Completed moves in the current pass.
    pass_moves: usize,
}

impl GameState {
    pub(crate) fn start(board: Board, players: Vec<Player>, mode: Mode) -> Self {
        let mut state = Self {
            board,
            players,
            mode,
            phase: Phase::Placing,
            turn_index: 0,
            pass_slots: 0,
            pass_moves: 0,
        };
        // A board with no one-fish tile skips placement entirely
        state.finish_placement_if_done();
        state
    }

    pub(crate) fn resume(
        board: Board,
        players: Vec<Player>,
        mode: Mode,
        turn_index: usize,
    ) -> Self {
        let mut state = Self {
            board,
            players,
            mode,
            phase: Phase::Moving,
            turn_index,
            pass_slots: 0,
            pass_moves: 0,
        };
        if state.active_count() == 0 {
            state.finish_game("no active players in snapshot");
        }
        state
    }

    // === Accessors ===

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All players in id order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up one player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// The game mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The round-robin movement cursor.
    #[must_use]
    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// The player whose movement slot is next.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.turn_index]
    }

    /// Players still able to move.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.active).count()
    }

    /// Final standing once the phase is [`Phase::Over`], `None` before.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.phase != Phase::Over {
            return None;
        }

        let top = self.players.iter().map(|p| p.score).max()?;
        let winners: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.score == top)
            .map(|p| p.id)
            .collect();

        match winners.as_slice() {
            [single] => Some(GameResult::Winner(*single)),
            _ => Some(GameResult::Winners(winners)),
        }
    }

    // === Placement phase ===

    /// The player due to place next: lowest id still owing a placement,
    /// provided a target tile remains. `None` once placement is finished.
    #[must_use]
    pub fn next_placer(&self) -> Option<PlayerId> {
        if self.phase != Phase::Placing || !self.board.can_place() {
            return None;
        }
        self.players
            .iter()
            .find(|p| p.remaining_placements > 0)
            .map(|p| p.id)
    }

    /// Place the due player's penguin on `coord`.
    ///
    /// The target must be in bounds, carry exactly one fish, and be unowned;
    /// anything else is rejected without mutation. A valid placement scores
    /// the fish, claims the tile, and consumes the quota. When the last
    /// placement lands (or the board runs out of targets) the phase advances
    /// to movement.
    pub fn place_piece(&mut self, coord: Coord) -> Result<PlayerId, RuleViolation> {
        let Some(player_id) = self.next_placer() else {
            return Err(RuleViolation::NotPlacing);
        };

        if !self.board.in_bounds(coord) {
            return Err(RuleViolation::OutOfBounds(coord));
        }
        let tile = *self.board.tile(coord);
        if tile.fish != 1 {
            return Err(RuleViolation::NotOneFish(coord));
        }
        if tile.owner.is_some() {
            return Err(RuleViolation::Occupied(coord));
        }

        let idx = player_id.index();
        self.players[idx].score += u32::from(tile.fish);
        self.players[idx].remaining_placements = 0;
        let target = self.board.tile_mut(coord);
        target.fish = 0;
        target.owner = Some(player_id);

        debug!(player = player_id.get(), %coord, "penguin placed");
        self.finish_placement_if_done();
        Ok(player_id)
    }

    fn finish_placement_if_done(&mut self) {
        if self.phase != Phase::Placing {
            return;
        }
        let all_placed = self.players.iter().all(|p| p.remaining_placements == 0);
        if all_placed || !self.board.can_place() {
            self.phase = Phase::Moving;
            info!(all_placed, "placement finished, movement begins");
        }
    }

    // === Movement phase ===

    /// Whether the current slot needs a [`TurnInput`] from the driver.
    ///
    /// False for AI slots and for players already inactive.
    #[must_use]
    pub fn needs_input(&self) -> bool {
        if self.phase != Phase::Moving {
            return false;
        }
        let player = self.current_player();
        player.active && !player.is_ai
    }

    /// Process one movement slot for the current player.
    ///
    /// Inactive players are skipped, players without a legal step are
    /// inactivated, AI players pick their own destination, and human players
    /// consume `input`. Every completed slot advances the cursor by one;
    /// a rejected human input leaves the cursor (and all state) untouched.
    pub fn play_turn(&mut self, input: Option<TurnInput>) -> Result<TurnOutcome, RuleViolation> {
        if self.phase != Phase::Moving {
            return Err(RuleViolation::NotMoving);
        }

        let idx = self.turn_index;
        let (player_id, is_ai) = {
            let player = &self.players[idx];
            (player.id, player.is_ai)
        };

        if !self.players[idx].active {
            self.advance_slot(false);
            return Ok(TurnOutcome::Skipped(player_id));
        }

        if !self.board.player_can_move(player_id) {
            return Ok(self.deactivate_current(player_id));
        }

        // The legality scan above implies the piece exists; a player whose
        // lookup still fails is treated the same as one who cannot move.
        let Some(from) = self.board.find_piece(player_id) else {
            return Ok(self.deactivate_current(player_id));
        };

        let to = if is_ai {
            match ai::choose_move(&self.board, player_id) {
                Some(to) => to,
                None => return Ok(self.deactivate_current(player_id)),
            }
        } else {
            match input {
                None => return Err(RuleViolation::InputRequired),
                Some(TurnInput::Suspend) => {
                    // The slot counts as visited: the saved cursor points past
                    // the suspender. Pass bookkeeping restarts on resume.
                    self.turn_index = (self.turn_index + 1) % self.players.len();
                    self.pass_slots = 0;
                    self.pass_moves = 0;
                    debug!(player = player_id.get(), "turn suspended");
                    return Ok(TurnOutcome::Suspended(player_id));
                }
                Some(TurnInput::Move(dir)) => {
                    match dir.step(from).filter(|&to| self.board.is_valid_move(from, to)) {
                        Some(to) => to,
                        None => return Err(RuleViolation::IllegalMove(dir)),
                    }
                }
            }
        };

        let gained = self.board.tile(to).fish;
        self.players[idx].score += u32::from(gained);

        let dest = self.board.tile_mut(to);
        dest.fish = 0;
        dest.owner = Some(player_id);

        // The origin becomes permanent dead water
        let origin = self.board.tile_mut(from);
        origin.fish = 0;
        origin.owner = None;

        self.advance_slot(true);
        Ok(TurnOutcome::Moved {
            player: player_id,
            to,
            gained,
        })
    }

    fn deactivate_current(&mut self, player_id: PlayerId) -> TurnOutcome {
        self.players[self.turn_index].active = false;
        debug!(player = player_id.get(), "no legal move, player inactivated");
        self.advance_slot(false);
        if self.active_count() == 0 {
            self.finish_game("all players inactive");
        }
        TurnOutcome::Inactivated(player_id)
    }

    fn advance_slot(&mut self, moved: bool) {
        let slots = self.players.len();
        self.turn_index = (self.turn_index + 1) % slots;
        self.pass_slots += 1;
        if moved {
            self.pass_moves += 1;
        }
        if self.pass_slots == slots {
            if self.pass_moves == 0 {
                self.finish_game("full pass without a completed move");
            }
            self.pass_slots = 0;
            self.pass_moves = 0;
        }
    }

    fn finish_game(&mut self, reason: &str) {
        if self.phase != Phase::Over {
            self.phase = Phase::Over;
            info!(reason, "game over");
        }
    }
}
