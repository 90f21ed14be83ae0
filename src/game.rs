use log::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::types::{Instruction, Phase, Piece, Player, Square, TileUpdate};
use crate::variant::{CandidateDestination, PlayerMoves, RuleVariant, StrictRules};

/// The piece picked up this turn, held together with the piece found on `from`
/// when it was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    from: Square,
    piece: Piece,
    destinations: Vec<CandidateDestination>,
}

impl Selection {
    /// Several paths may end on the same square. The longest chain is taken;
    /// among equally long chains the one the search found first wins.
    fn candidate_for(&self, square: Square) -> Option<&CandidateDestination> {
        self.destinations
            .iter()
            .filter(|candidate| candidate.destination == square)
            .fold(None, |best: Option<&CandidateDestination>, candidate| match best {
                Some(best) if best.path.len() >= candidate.path.len() => Some(best),
                _ => Some(candidate),
            })
    }

    fn landing_squares(&self) -> Vec<Square> {
        let mut squares: Vec<Square> = self
            .destinations
            .iter()
            .map(|candidate| candidate.destination)
            .collect();
        squares.sort();
        squares.dedup();
        squares
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TurnState {
    QueenSelection(Player),
    FromSelection(Player),
    ToSelection(Player, Selection),
    Finished(Player),
}

impl TurnState {
    /// Where `player`'s turn begins: a queenless player must promote first.
    fn start_of_turn(board: &Board, player: Player) -> Self {
        if board.queen_of(player).is_some() {
            Self::FromSelection(player)
        } else {
            Self::QueenSelection(player)
        }
    }

    fn player(&self) -> Player {
        match self {
            Self::QueenSelection(player)
            | Self::FromSelection(player)
            | Self::ToSelection(player, _)
            | Self::Finished(player) => *player,
        }
    }

    fn phase(&self) -> Phase {
        match self {
            Self::QueenSelection(_) => Phase::QueenSelection,
            Self::FromSelection(_) => Phase::FromSelection,
            Self::ToSelection(..) => Phase::ToSelection,
            Self::Finished(_) => Phase::Finished,
        }
    }
}

/// Drives one game click by click. Owns the board and all turn state.
pub struct TurnController {
    board: Board,
    state: TurnState,
    rules: Box<dyn RuleVariant>,
}

impl TurnController {
    pub fn new(rules: Box<dyn RuleVariant>) -> Self {
        let board = Board::new();
        Self {
            state: TurnState::start_of_turn(&board, Player::A),
            board,
            rules,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.rules())
    }

    pub fn new_with_default_rules() -> Self {
        Self::new(Box::new(StrictRules))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &dyn RuleVariant {
        self.rules.as_ref()
    }

    pub fn active_player(&self) -> Player {
        self.state.player()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.state {
            TurnState::Finished(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Squares the next click may pick: idle pieces while a queen is missing,
    /// movable pieces while choosing a source, nothing otherwise.
    pub fn selectable_squares(&self) -> Vec<Square> {
        match &self.state {
            TurnState::QueenSelection(player) => self.board.idle_pieces(*player),
            TurnState::FromSelection(player) => {
                self.rules.selectable_squares(&self.board, *player)
            }
            TurnState::ToSelection(..) | TurnState::Finished(_) => Vec::new(),
        }
    }

    /// Handles one click. Returns `None` when the click changes nothing.
    pub fn tile_clicked(&mut self, row: u8, col: u8) -> Option<Instruction> {
        let square = Square::new(row, col)?;

        match &self.state {
            TurnState::Finished(_) => None,
            TurnState::QueenSelection(player) => {
                let player = *player;
                self.select_queen(player, square)
            }
            TurnState::FromSelection(player) => {
                let player = *player;
                self.select_from(player, square)
            }
            TurnState::ToSelection(player, selection) => {
                let (player, from, piece) = (*player, selection.from, selection.piece);
                let candidate = selection.candidate_for(square).cloned();

                if square == from {
                    debug!("player {player} put {from} back");
                    self.state = TurnState::FromSelection(player);
                    return Some(self.instruction(Vec::new()));
                }

                let candidate = candidate?;
                Some(self.apply_move(player, from, piece, candidate))
            }
        }
    }

    /// Starts a fresh game with the same rules and redraws every square.
    pub fn restart(&mut self) -> Instruction {
        self.board = Board::new();
        self.state = TurnState::start_of_turn(&self.board, Player::A);
        info!("game restarted with {} rules", self.rules.variant());
        self.snapshot()
    }

    /// Instruction redrawing the whole board in its current state.
    pub fn snapshot(&self) -> Instruction {
        let tiles = self
            .board
            .all_tiles()
            .map(|tile| TileUpdate::new(tile.square, tile.piece))
            .collect();
        self.instruction(tiles)
    }

    fn select_queen(&mut self, player: Player, square: Square) -> Option<Instruction> {
        if !self.board.idle_pieces(player).contains(&square) {
            return None;
        }

        let queen = Piece::queen(player);
        self.board.place(square, Some(queen));
        info!("player {player} promoted {square} to queen");

        self.state = if square.row() == player.goal_row() {
            info!("player {player} wins");
            TurnState::Finished(player)
        } else {
            TurnState::FromSelection(player)
        };
        Some(self.instruction(vec![TileUpdate::new(square, Some(queen))]))
    }

    fn select_from(&mut self, player: Player, square: Square) -> Option<Instruction> {
        let moves = PlayerMoves::scan(&self.board, player);
        let piece = moves.piece_at(square)?;
        let destinations = self.rules.destinations_in(&self.board, &moves, square);
        if destinations.is_empty() {
            return None;
        }

        debug!(
            "player {player} picked up {piece} at {square} ({} destinations)",
            destinations.len()
        );
        self.state = TurnState::ToSelection(
            player,
            Selection {
                from: square,
                piece,
                destinations,
            },
        );
        Some(self.instruction(Vec::new()))
    }

    fn apply_move(
        &mut self,
        player: Player,
        from: Square,
        piece: Piece,
        candidate: CandidateDestination,
    ) -> Instruction {
        let mut updates = Vec::with_capacity(candidate.captures.len() + 2);
        for &captured in &candidate.captures {
            self.board.place(captured, None);
            updates.push(TileUpdate::new(captured, None));
        }
        self.board.place(from, None);
        updates.push(TileUpdate::new(from, None));
        self.board.place(candidate.destination, Some(piece));
        updates.push(TileUpdate::new(candidate.destination, Some(piece)));

        info!(
            "player {player} moved {piece} {from} -> {} capturing {}",
            candidate.destination,
            candidate.captures.len()
        );

        self.state = if self.has_won(player) {
            info!("player {player} wins");
            TurnState::Finished(player)
        } else {
            let opponent = player.opponent();
            // An eliminated opponent cannot take a turn; play stays with `player`.
            let next = if self.board.piece_count(opponent) > 0 {
                opponent
            } else {
                player
            };
            TurnState::start_of_turn(&self.board, next)
        };

        self.instruction(updates)
    }

    fn has_won(&self, player: Player) -> bool {
        self.board
            .queen_of(player)
            .is_some_and(|queen| queen.row() == player.goal_row())
    }

    fn instruction(&self, tile_updates: Vec<TileUpdate>) -> Instruction {
        let (selected, destinations) = match &self.state {
            TurnState::ToSelection(_, selection) => {
                (Some(selection.from), selection.landing_squares())
            }
            _ => (None, Vec::new()),
        };

        Instruction {
            tile_updates,
            active_player: self.state.player(),
            winner: self.winner(),
            phase: self.state.phase(),
            selected,
            destinations,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, player: Player) {
        self.board = board;
        self.state = TurnState::start_of_turn(&self.board, player);
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new_with_default_rules()
    }
}
