use crate::types::{BOARD_SIZE, NUM_SQUARES, Piece, PieceKind, Player, Square};

const SETUP_ROWS: u8 = 3;

/// A square together with its current occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub square: Square,
    pub piece: Option<Piece>,
}

/// 8x8 board. Squares never change, only their occupants do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    /// Creates the initial board:
    /// A fills the playable squares of rows 0..=2, B those of rows 5..=7,
    /// and each side's corner square (0,0) / (7,7) holds its queen.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for square in Square::playable() {
            let owner = if square.row() < SETUP_ROWS {
                Player::A
            } else if square.row() >= BOARD_SIZE - SETUP_ROWS {
                Player::B
            } else {
                continue;
            };
            let piece = if square == queen_corner(owner) {
                Piece::queen(owner)
            } else {
                Piece::pawn(owner)
            };
            board.place(square, Some(piece));
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// Bounds-checked lookup; `None` outside the grid.
    pub fn tile_at(&self, row: i32, col: i32) -> Option<Tile> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        let square = Square::new(row, col)?;
        Some(Tile {
            square,
            piece: self.piece_at(square),
        })
    }

    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        Square::all().map(move |square| Tile {
            square,
            piece: self.piece_at(square),
        })
    }

    pub fn place(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns true when `square` holds a piece belonging to `player`'s opponent.
    pub fn is_opponent_of(&self, square: Square, player: Player) -> bool {
        self.piece_at(square)
            .is_some_and(|piece| piece.owner != player)
    }

    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.all_tiles().filter_map(move |tile| match tile.piece {
            Some(piece) if piece.owner == player => Some((tile.square, piece)),
            _ => None,
        })
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces_of(player).count()
    }

    pub fn queen_of(&self, player: Player) -> Option<Square> {
        self.pieces_of(player)
            .find(|(_, piece)| piece.is_queen())
            .map(|(square, _)| square)
    }

    /// Pieces on the player's home-most occupied row, the only ones
    /// eligible for promotion once the queen is lost.
    pub fn idle_pieces(&self, player: Player) -> Vec<Square> {
        let rows = self.pieces_of(player).map(|(square, _)| square.row());
        let home_row = match player {
            Player::A => rows.min(),
            Player::B => rows.max(),
        };
        let Some(home_row) = home_row else {
            return Vec::new();
        };

        self.pieces_of(player)
            .map(|(square, _)| square)
            .filter(|square| square.row() == home_row)
            .collect()
    }

    /// Converts board to `[u8; 64]` where
    /// 0=empty, 1=A pawn, 2=A queen, 3=B pawn, 4=B queen.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (cell, piece) in board.iter_mut().zip(self.cells.iter()) {
            *cell = match piece {
                None => 0,
                Some(Piece {
                    owner: Player::A,
                    kind: PieceKind::Pawn,
                }) => 1,
                Some(Piece {
                    owner: Player::A,
                    kind: PieceKind::Queen,
                }) => 2,
                Some(Piece {
                    owner: Player::B,
                    kind: PieceKind::Pawn,
                }) => 3,
                Some(Piece {
                    owner: Player::B,
                    kind: PieceKind::Queen,
                }) => 4,
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn queen_corner(owner: Player) -> Square {
    match owner {
        Player::A => Square::at(0, 0),
        Player::B => Square::at(BOARD_SIZE - 1, BOARD_SIZE - 1),
    }
}
