//! The two decision functions consumed by the movement phase machine.

use crate::core::{Board, Coord, PlayerId};

/// Pick a placement target: the first tile in row-major order with exactly
/// one fish and no owner. `None` when the board has no target left.
#[must_use]
pub fn choose_placement(board: &Board) -> Option<Coord> {
    board
        .iter()
        .find(|(_, tile)| tile.fish == 1 && tile.owner.is_none())
        .map(|(coord, _)| coord)
}

/// Pick a movement destination: scan the piece's neighbors in canonical
/// order (up, down, left, right) and keep the candidate with the most fish,
/// first one winning ties. `None` when no legal step exists, including when
/// the player has no piece on the board.
#[must_use]
pub fn choose_move(board: &Board, player: PlayerId) -> Option<Coord> {
    let from = board.find_piece(player)?;

    let mut best: Option<(Coord, u8)> = None;
    for to in board.neighbors(from) {
        if !board.is_valid_move(from, to) {
            continue;
        }
        let fish = board.tile(to).fish;
        match best {
            Some((_, best_fish)) if fish <= best_fish => {}
            _ => best = Some((to, fish)),
        }
    }

    best.map(|(coord, _)| coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Tile;

    fn tile(fish: u8, owner: Option<u8>) -> Tile {
        Tile {
            fish,
            owner: owner.map(PlayerId::new),
        }
    }

    #[test]
    fn test_choose_placement_row_major() {
        let tiles = vec![
            tile(2, None),
            tile(1, Some(1)), // occupied, skipped
            tile(1, None),    // first qualifying tile
            tile(1, None),
        ];
        let board = Board::from_tiles(2, 2, tiles);

        assert_eq!(choose_placement(&board), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_choose_placement_exhausted() {
        let tiles = vec![tile(2, None), tile(0, None), tile(3, None), tile(1, Some(2))];
        let board = Board::from_tiles(2, 2, tiles);

        assert_eq!(choose_placement(&board), None);
    }

    #[test]
    fn test_choose_move_prefers_most_fish() {
        // Piece at the center of a 3x3: up has 2 fish, down is dead water,
        // left is owned by a rival, right has 3 fish. Right wins on value.
        let tiles = vec![
            tile(0, None),
            tile(2, None),
            tile(0, None),
            tile(0, Some(2)),
            tile(0, Some(1)),
            tile(3, None),
            tile(0, None),
            tile(0, None),
            tile(0, None),
        ];
        let board = Board::from_tiles(3, 3, tiles);

        assert_eq!(choose_move(&board, PlayerId::new(1)), Some(Coord::new(1, 2)));
    }

    #[test]
    fn test_choose_move_first_wins_ties() {
        // Up and right both hold 2 fish; up is scanned first
        let tiles = vec![
            tile(0, None),
            tile(2, None),
            tile(0, None),
            tile(0, None),
            tile(0, Some(1)),
            tile(2, None),
            tile(0, None),
            tile(0, None),
            tile(0, None),
        ];
        let board = Board::from_tiles(3, 3, tiles);

        assert_eq!(choose_move(&board, PlayerId::new(1)), Some(Coord::new(0, 1)));
    }

    #[test]
    fn test_choose_move_blocked() {
        // Every neighbor is dead water or occupied
        let tiles = vec![
            tile(0, None),
            tile(0, None),
            tile(0, None),
            tile(0, Some(2)),
            tile(0, Some(1)),
            tile(0, None),
            tile(0, None),
            tile(0, None),
            tile(0, None),
        ];
        let board = Board::from_tiles(3, 3, tiles);

        assert_eq!(choose_move(&board, PlayerId::new(1)), None);
    }

    #[test]
    fn test_choose_move_without_piece() {
        let board = Board::from_tiles(2, 2, vec![tile(1, None); 4]);
        assert_eq!(choose_move(&board, PlayerId::new(3)), None);
    }
}
