use std::fmt;

use serde::Serialize;

pub const BOARD_SIZE: u8 = 8;
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// One diagonal step as `(row delta, column delta)`.
pub type Direction = (i8, i8);

const ALL_DIAGONALS: [Direction; 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];
const FORWARD_A: [Direction; 2] = [(1, -1), (1, 1)];
const FORWARD_B: [Direction; 2] = [(-1, -1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// The opponent's back rank. A queen standing here wins the game.
    pub fn goal_row(self) -> u8 {
        match self {
            Self::A => BOARD_SIZE - 1,
            Self::B => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Pawn,
    Queen,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pawn => f.write_str("pawn"),
            Self::Queen => f.write_str("queen"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn pawn(owner: Player) -> Self {
        Self {
            owner,
            kind: PieceKind::Pawn,
        }
    }

    pub const fn queen(owner: Player) -> Self {
        Self {
            owner,
            kind: PieceKind::Queen,
        }
    }

    pub fn is_queen(self) -> bool {
        self.kind == PieceKind::Queen
    }

    /// Diagonals this piece may travel along.
    /// Pawns only advance toward the opponent's edge.
    pub fn directions(self) -> &'static [Direction] {
        match (self.kind, self.owner) {
            (PieceKind::Queen, _) => &ALL_DIAGONALS,
            (PieceKind::Pawn, Player::A) => &FORWARD_A,
            (PieceKind::Pawn, Player::B) => &FORWARD_B,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.owner, self.kind)
    }
}

/// A board coordinate. Only constructible inside the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Compile-time squares such as the queen corners.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self { row, col }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + self.col as usize
    }

    /// Squares that can ever hold a piece.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// The neighbouring square one step along `direction`, if still on the board.
    pub fn offset(self, (d_row, d_col): Direction) -> Option<Self> {
        let row = u8::try_from(i16::from(self.row) + i16::from(d_row)).ok()?;
        let col = u8::try_from(i16::from(self.col) + i16::from(d_col)).ok()?;
        Self::new(row, col)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }

    pub fn playable() -> impl Iterator<Item = Square> {
        Self::all().filter(|square| square.is_playable())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// View label for a square's occupant: `empty`, `{player} pawn` or `{player} queen`.
pub fn occupant_label(piece: Option<Piece>) -> String {
    piece.map_or_else(|| "empty".to_string(), |piece| piece.to_string())
}

/// One square the view must redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileUpdate {
    pub row: u8,
    pub col: u8,
    pub occupant: String,
}

impl TileUpdate {
    pub fn new(square: Square, piece: Option<Piece>) -> Self {
        Self {
            row: square.row(),
            col: square.col(),
            occupant: occupant_label(piece),
        }
    }
}

/// What the controller is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    QueenSelection,
    FromSelection,
    ToSelection,
    Finished,
}

/// Result of a click that changed the game, returned to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Squares to redraw, in the order they changed.
    pub tile_updates: Vec<TileUpdate>,
    pub active_player: Player,
    pub winner: Option<Player>,
    pub phase: Phase,
    /// Contract:
    /// - `ToSelection`: the square picked up and its sorted, distinct landing squares.
    /// - Any other phase: `None` and an empty list.
    pub selected: Option<Square>,
    pub destinations: Vec<Square>,
}
