use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::EngineError;
use crate::paths::{Path, find_paths};
use crate::types::{Piece, Player, Square};

/// Rule set selector, chosen once when a game is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Single jump only, capturing is optional.
    #[default]
    Strict,
    /// Jump chains allowed, capturing is mandatory when available.
    Forced,
}

impl Variant {
    pub fn rules(self) -> Box<dyn RuleVariant> {
        match self {
            Self::Strict => Box::new(StrictRules),
            Self::Forced => Box::new(ForcedRules),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Forced => f.write_str("forced"),
        }
    }
}

impl FromStr for Variant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "forced" => Ok(Self::Forced),
            _ => Err(EngineError::UnknownVariant(s.to_string())),
        }
    }
}

/// One legal landing square for the selected piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDestination {
    pub destination: Square,
    /// Opponent pieces jumped on the way, in path order.
    pub captures: Vec<Square>,
    pub path: Path,
}

impl CandidateDestination {
    /// Returns `None` for a path that never leaves its source.
    pub fn from_path(board: &Board, path: Path, player: Player) -> Option<Self> {
        if path.len() < 2 {
            return None;
        }
        let (&destination, interior) = path.split_last()?;
        let captures = interior
            .iter()
            .skip(1)
            .copied()
            .filter(|&square| board.is_opponent_of(square, player))
            .collect();

        Some(Self {
            destination,
            captures,
            path,
        })
    }

    pub fn is_capture(&self) -> bool {
        is_capture_path(&self.path)
    }
}

/// Every path of every piece of one player, searched once per decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerMoves {
    player: Player,
    pieces: Vec<(Square, Piece, Vec<Path>)>,
    capture_available: bool,
}

impl PlayerMoves {
    pub fn scan(board: &Board, player: Player) -> Self {
        let pieces: Vec<(Square, Piece, Vec<Path>)> = board
            .pieces_of(player)
            .map(|(square, piece)| (square, piece, find_paths(board, square, piece)))
            .collect();
        let capture_available = pieces
            .iter()
            .any(|(_, _, paths)| paths.iter().any(|path| is_capture_path(path)));

        Self {
            player,
            pieces,
            capture_available,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns true when any piece of the player can capture this turn.
    pub fn capture_available(&self) -> bool {
        self.capture_available
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces
            .iter()
            .find(|(from, _, _)| *from == square)
            .map(|(_, piece, _)| *piece)
    }

    /// Raw paths of the piece on `square`; empty when the player has no piece there.
    pub fn paths_from(&self, square: Square) -> &[Path] {
        self.pieces
            .iter()
            .find(|(from, _, _)| *from == square)
            .map(|(_, _, paths)| paths.as_slice())
            .unwrap_or(&[])
    }

    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.pieces.iter().map(|(square, _, _)| *square)
    }
}

/// Policy that turns raw paths into the moves legal this turn.
pub trait RuleVariant: Send + Sync {
    fn variant(&self) -> Variant;

    /// Whether `path` may be played, given whether the player can capture anywhere.
    fn allows(&self, path: &[Square], capture_available: bool) -> bool;

    /// Reduces the raw paths of one piece of `player` to its legal destinations.
    fn reduce_destinations(
        &self,
        board: &Board,
        paths: Vec<Path>,
        player: Player,
    ) -> Vec<CandidateDestination> {
        let capture_available = PlayerMoves::scan(board, player).capture_available();
        let kept = paths
            .into_iter()
            .filter(|path| self.allows(path, capture_available));
        to_destinations(board, kept, player)
    }

    /// Legal destinations of the piece on `square`, reusing an existing scan.
    fn destinations_in(
        &self,
        board: &Board,
        moves: &PlayerMoves,
        square: Square,
    ) -> Vec<CandidateDestination> {
        let kept = moves
            .paths_from(square)
            .iter()
            .filter(|path| self.allows(path, moves.capture_available()))
            .cloned();
        to_destinations(board, kept, moves.player())
    }

    /// Returns true when `square` holds a piece of `player` that may be picked up.
    fn is_selectable(&self, board: &Board, square: Square, player: Player) -> bool {
        !self
            .destinations_in(board, &PlayerMoves::scan(board, player), square)
            .is_empty()
    }

    fn destinations_from(
        &self,
        board: &Board,
        square: Square,
        player: Player,
    ) -> Vec<CandidateDestination> {
        self.destinations_in(board, &PlayerMoves::scan(board, player), square)
    }

    fn selectable_squares(&self, board: &Board, player: Player) -> Vec<Square> {
        let moves = PlayerMoves::scan(board, player);
        moves
            .squares()
            .filter(|&square| !self.destinations_in(board, &moves, square).is_empty())
            .collect()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StrictRules;

impl RuleVariant for StrictRules {
    fn variant(&self) -> Variant {
        Variant::Strict
    }

    fn allows(&self, path: &[Square], _capture_available: bool) -> bool {
        matches!(path.len(), 2 | 3)
    }

    // Captures are never mandatory, so no board-wide scan is needed.
    fn reduce_destinations(
        &self,
        board: &Board,
        paths: Vec<Path>,
        player: Player,
    ) -> Vec<CandidateDestination> {
        let kept = paths.into_iter().filter(|path| self.allows(path, false));
        to_destinations(board, kept, player)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ForcedRules;

impl RuleVariant for ForcedRules {
    fn variant(&self) -> Variant {
        Variant::Forced
    }

    fn allows(&self, path: &[Square], capture_available: bool) -> bool {
        !capture_available || is_capture_path(path)
    }
}

fn is_capture_path(path: &[Square]) -> bool {
    path.len() > 2
}

fn to_destinations(
    board: &Board,
    paths: impl IntoIterator<Item = Path>,
    player: Player,
) -> Vec<CandidateDestination> {
    paths
        .into_iter()
        .filter_map(|path| CandidateDestination::from_path(board, path, player))
        .collect()
}
