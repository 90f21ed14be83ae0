//! Depth-first search over the move graph of a single piece.
//!
//! Nodes are squares, edges are single diagonal steps or jumps over an
//! opponent piece. Every landing square reached by a jump chain is a result,
//! so a chain of two captures yields both its one-capture prefix and the full
//! chain.

use log::trace;

use crate::board::Board;
use crate::types::{Direction, Piece, Square};

/// Squares visited by one candidate move, starting at the source.
/// Length 2 is a plain step; every capture adds the jumped square and its landing.
pub type Path = Vec<Square>;

/// Lists every path `piece` can take from `source` on `board`.
///
/// The board is only read. During the search the moving piece counts as having
/// left `source`, so a queen may close a jump loop back onto it.
pub fn find_paths(board: &Board, source: Square, piece: Piece) -> Vec<Path> {
    let paths = PathFinder::new(board, source, piece).run();
    trace!("{piece} at {source}: {} paths", paths.len());
    paths
}

struct PathFinder<'a> {
    board: &'a Board,
    source: Square,
    piece: Piece,
    buffer: Vec<Square>,
    paths: Vec<Path>,
}

impl<'a> PathFinder<'a> {
    fn new(board: &'a Board, source: Square, piece: Piece) -> Self {
        Self {
            board,
            source,
            piece,
            buffer: Vec::new(),
            paths: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Path> {
        self.buffer.push(self.source);
        self.visit_landing(self.source);
        self.paths
    }

    /// `current` is the source or an empty square reached by a jump.
    fn visit_landing(&mut self, current: Square) {
        let directions = self.piece.directions();

        if self.buffer.len() == 1 {
            for &direction in directions {
                if let Some(step) = current.offset(direction)
                    && self.board.is_empty(step)
                {
                    self.buffer.push(step);
                    self.record();
                    self.buffer.pop();
                }
            }
        } else {
            self.record();
        }

        for &direction in directions {
            let Some(enemy) = current.offset(direction) else {
                continue;
            };
            if self.board.is_opponent_of(enemy, self.piece.owner) && !self.buffer.contains(&enemy) {
                self.buffer.push(enemy);
                self.visit_jumped(enemy, direction);
                self.buffer.pop();
            }
        }
    }

    /// `enemy` was just jumped along `direction`; the landing lies straight beyond it.
    fn visit_jumped(&mut self, enemy: Square, direction: Direction) {
        let Some(landing) = enemy.offset(direction) else {
            return;
        };

        if landing == self.source {
            if self.buffer.len() > 2 {
                let mut closed = self.buffer.clone();
                closed.push(landing);
                self.paths.push(closed);
            }
            return;
        }

        if self.buffer.contains(&landing) || !self.board.is_empty(landing) {
            return;
        }

        self.buffer.push(landing);
        self.visit_landing(landing);
        self.buffer.pop();
    }

    fn record(&mut self) {
        self.paths.push(self.buffer.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::board::strategies::arb_board;
    use crate::types::Player;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board_with(pieces: &[((u8, u8), Piece)]) -> Board {
        let mut board = Board::empty();
        for &((row, col), piece) in pieces {
            board.place(sq(row, col), Some(piece));
        }
        board
    }

    fn ends(paths: &[Path]) -> Vec<Square> {
        let mut ends: Vec<Square> = paths.iter().filter_map(|p| p.last().copied()).collect();
        ends.sort();
        ends.dedup();
        ends
    }

    #[test]
    fn fresh_board_edge_pawn_has_single_step() {
        let board = Board::new();

        let paths = find_paths(&board, sq(2, 0), Piece::pawn(Player::A));

        assert_eq!(paths, vec![vec![sq(2, 0), sq(3, 1)]]);
    }

    #[test]
    fn blocked_pieces_have_no_paths() {
        let board = Board::new();

        assert!(find_paths(&board, sq(0, 0), Piece::queen(Player::A)).is_empty());
        assert!(find_paths(&board, sq(1, 1), Piece::pawn(Player::A)).is_empty());
    }

    #[test]
    fn queen_steps_in_all_four_directions() {
        let queen = Piece::queen(Player::A);
        let board = board_with(&[((3, 3), queen)]);

        let paths = find_paths(&board, sq(3, 3), queen);

        assert_eq!(ends(&paths), vec![sq(2, 2), sq(2, 4), sq(4, 2), sq(4, 4)]);
        assert!(paths.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn pawn_of_b_moves_toward_row_zero() {
        let pawn = Piece::pawn(Player::B);
        let board = board_with(&[((5, 3), pawn)]);

        let paths = find_paths(&board, sq(5, 3), pawn);

        assert_eq!(ends(&paths), vec![sq(4, 2), sq(4, 4)]);
    }

    #[test]
    fn single_capture_lands_beyond_enemy() {
        let pawn = Piece::pawn(Player::A);
        let board = board_with(&[((2, 0), pawn), ((3, 1), Piece::pawn(Player::B))]);

        let paths = find_paths(&board, sq(2, 0), pawn);

        assert_eq!(paths, vec![vec![sq(2, 0), sq(3, 1), sq(4, 2)]]);
    }

    #[test]
    fn capture_is_blocked_by_occupied_landing() {
        let pawn = Piece::pawn(Player::A);
        let board = board_with(&[
            ((2, 0), pawn),
            ((3, 1), Piece::pawn(Player::B)),
            ((4, 2), Piece::pawn(Player::B)),
        ]);

        assert!(find_paths(&board, sq(2, 0), pawn).is_empty());
    }

    #[test]
    fn own_pieces_are_never_jumped() {
        let pawn = Piece::pawn(Player::A);
        let board = board_with(&[((2, 0), pawn), ((3, 1), pawn)]);

        assert!(find_paths(&board, sq(2, 0), pawn).is_empty());
    }

    #[test]
    fn chain_records_every_intermediate_landing() {
        let pawn = Piece::pawn(Player::A);
        let enemy = Piece::pawn(Player::B);
        let board = board_with(&[((2, 0), pawn), ((3, 1), enemy), ((5, 3), enemy)]);

        let paths = find_paths(&board, sq(2, 0), pawn);

        assert_eq!(
            paths,
            vec![
                vec![sq(2, 0), sq(3, 1), sq(4, 2)],
                vec![sq(2, 0), sq(3, 1), sq(4, 2), sq(5, 3), sq(6, 4)],
            ]
        );
    }

    #[test]
    fn chain_may_turn_between_jumps_but_not_within_one() {
        let pawn = Piece::pawn(Player::A);
        let enemy = Piece::pawn(Player::B);
        // (3,1) is jumped toward (4,2); from there (5,1) lies on the other forward diagonal.
        let board = board_with(&[((2, 0), pawn), ((3, 1), enemy), ((5, 1), enemy)]);

        let paths = find_paths(&board, sq(2, 0), pawn);

        assert!(paths.contains(&vec![sq(2, 0), sq(3, 1), sq(4, 2), sq(5, 1), sq(6, 0)]));
        for path in &paths {
            for jump in path[1..].chunks(2).filter(|pair| pair.len() == 2) {
                let (enemy, landing) = (jump[0], jump[1]);
                assert!(!board.is_empty(enemy));
                assert!(board.is_empty(landing));
            }
        }
    }

    #[test]
    fn steps_do_not_chain_into_captures() {
        let pawn = Piece::pawn(Player::A);
        // Enemy diagonal to the step square, but a step ends the move.
        let board = board_with(&[((2, 2), pawn), ((4, 4), Piece::pawn(Player::B))]);

        let paths = find_paths(&board, sq(2, 2), pawn);

        assert!(paths.iter().all(|p| p.len() == 2));
    }

    #[test]
    fn queen_loop_closes_back_onto_source() {
        let queen = Piece::queen(Player::A);
        let enemy = Piece::pawn(Player::B);
        let board = board_with(&[
            ((2, 2), queen),
            ((3, 3), enemy),
            ((5, 3), enemy),
            ((5, 1), enemy),
            ((3, 1), enemy),
        ]);

        let paths = find_paths(&board, sq(2, 2), queen);
        let cyclic: Vec<&Path> = paths.iter().filter(|p| p.last() == Some(&sq(2, 2))).collect();

        assert_eq!(cyclic.len(), 2);
        assert!(cyclic.contains(&&vec![
            sq(2, 2),
            sq(3, 3),
            sq(4, 4),
            sq(5, 3),
            sq(6, 2),
            sq(5, 1),
            sq(4, 0),
            sq(3, 1),
            sq(2, 2),
        ]));
        assert!(paths.iter().all(|p| p.len() <= 9));
    }

    proptest! {
        #[test]
        fn paths_start_at_source_and_end_vacant(board in arb_board(), pick in 0usize..64) {
            let occupied: Vec<(Square, Piece)> = board
                .all_tiles()
                .filter_map(|tile| tile.piece.map(|piece| (tile.square, piece)))
                .collect();
            prop_assume!(!occupied.is_empty());
            let (source, piece) = occupied[pick % occupied.len()];

            for path in find_paths(&board, source, piece) {
                prop_assert!(path.len() >= 2);
                prop_assert_eq!(path[0], source);

                let last = path[path.len() - 1];
                let body = if last == source {
                    prop_assert!(path.len() > 3);
                    &path[..path.len() - 1]
                } else {
                    prop_assert!(board.is_empty(last));
                    &path[..]
                };

                let distinct: HashSet<Square> = body.iter().copied().collect();
                prop_assert_eq!(distinct.len(), body.len());

                for (idx, square) in path.iter().enumerate().skip(1) {
                    if *square == source {
                        continue;
                    }
                    if path.len() > 2 && idx % 2 == 1 {
                        prop_assert!(board.is_opponent_of(*square, piece.owner));
                    } else {
                        prop_assert!(board.is_empty(*square));
                    }
                }
            }
        }
    }
}
