//! Position store: the canonical game position and its undo history.
//!
//! Wraps the `shakmaty` rules oracle. Every mutation replaces the position
//! wholesale, so consumers never observe a half-applied move.

use derive_more::Display;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Piece, Position, Role, Square};
use tracing::{debug, info, instrument};

use crate::error::{FenError, IllegalMove};

/// Half-moves without a capture or pawn move after which the game is drawn.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of the same position that end the game in a draw.
const REPETITION_LIMIT: usize = 3;

/// A legal move as seen by the interaction layer.
///
/// `to` is the square the human clicks to complete the move: for castling
/// that is the king's destination, not the rook's square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOption {
    /// Source square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Whether the move captures a piece (en passant included).
    pub is_capture: bool,
    /// Promotion piece, for pawn moves onto the last rank.
    pub promotion: Option<Role>,
}

impl MoveOption {
    /// Builds an option from an oracle move, or `None` for drops.
    fn from_move(m: &Move, turn: Color) -> Option<Self> {
        let from = m.from()?;
        let to = match m.castling_side() {
            Some(side) => side.king_to(turn),
            None => m.to(),
        };
        Some(Self {
            from,
            to,
            is_capture: m.is_capture(),
            promotion: m.promotion(),
        })
    }
}

impl std::fmt::Display for MoveOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Which piece a pawn becomes when it reaches the last rank.
///
/// The session always plays [`PromotionPolicy::Queen`]; the other variants
/// exist so a caller can pick a different piece without touching the
/// selection machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    /// Promote to a queen.
    #[default]
    Queen,
    /// Promote to a rook.
    Rook,
    /// Promote to a bishop.
    Bishop,
    /// Promote to a knight.
    Knight,
}

impl PromotionPolicy {
    /// Returns the piece role this policy promotes to.
    pub fn role(self) -> Role {
        match self {
            Self::Queen => Role::Queen,
            Self::Rook => Role::Rook,
            Self::Bishop => Role::Bishop,
            Self::Knight => Role::Knight,
        }
    }

    /// Returns the policy promoting to `role`, if `role` is a promotion piece.
    pub fn from_role(role: Role) -> Option<Self> {
        match role {
            Role::Queen => Some(Self::Queen),
            Role::Rook => Some(Self::Rook),
            Role::Bishop => Some(Self::Bishop),
            Role::Knight => Some(Self::Knight),
            Role::Pawn | Role::King => None,
        }
    }
}

/// Why a game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameOutcome {
    /// The side to move is mated.
    #[display("checkmate, {winner:?} wins")]
    Checkmate {
        /// The side delivering mate.
        winner: Color,
    },
    /// The side to move has no legal moves and is not in check.
    #[display("stalemate")]
    Stalemate,
    /// Neither side can possibly mate.
    #[display("draw by insufficient material")]
    InsufficientMaterial,
    /// Fifty moves by each side without a capture or pawn move.
    #[display("draw by the fifty-move rule")]
    FiftyMoveRule,
    /// The same position occurred three times.
    #[display("draw by threefold repetition")]
    ThreefoldRepetition,
}

/// Owns the current position and the positions that led to it.
#[derive(Debug, Clone)]
pub struct PositionStore {
    position: Chess,
    history: Vec<Chess>,
    moves: Vec<MoveOption>,
}

impl PositionStore {
    /// Creates a store at the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        Self {
            position: Chess::default(),
            history: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// Creates a store seeded from a FEN string.
    ///
    /// # Errors
    ///
    /// Returns [`FenError`] if the string does not parse or describes an
    /// illegal position.
    #[instrument(skip(fen), fields(fen = %fen))]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed: Fen = fen.trim().parse()?;
        let position: Chess = parsed.into_position(CastlingMode::Standard)?;
        debug!("Loaded position from FEN");
        Ok(Self {
            position,
            history: Vec::new(),
            moves: Vec::new(),
        })
    }

    /// Returns the current canonical position.
    pub fn current_position(&self) -> &Chess {
        &self.position
    }

    /// Returns the current position as a FEN string.
    pub fn fen(&self) -> String {
        fen_of(&self.position)
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Returns the piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    /// Returns the number of moves applied since the start or last reset.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Returns the most recently applied move, if any.
    pub fn last_move(&self) -> Option<&MoveOption> {
        self.moves.last()
    }

    /// Returns all legal moves, or only those starting on `square`.
    #[instrument(skip(self))]
    pub fn legal_moves(&self, square: Option<Square>) -> Vec<MoveOption> {
        let turn = self.position.turn();
        self.position
            .legal_moves()
            .iter()
            .filter_map(|m| MoveOption::from_move(m, turn))
            .filter(|option| square.is_none_or(|sq| option.from == sq))
            .collect()
    }

    /// Applies the move from `from` to `to`.
    ///
    /// Pawn moves onto the last rank promote according to `promotion`. On
    /// success the position is replaced and the applied move returned; on
    /// failure the position is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMove`] if no legal move connects the two squares.
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: PromotionPolicy,
    ) -> Result<MoveOption, IllegalMove> {
        let turn = self.position.turn();
        let wanted = promotion.role();
        let legal = self.position.legal_moves();
        let found = legal.iter().find_map(|m| {
            let option = MoveOption::from_move(m, turn)?;
            let promotes_as_wanted = option.promotion.is_none_or(|role| role == wanted);
            (option.from == from && option.to == to && promotes_as_wanted).then_some((m, option))
        });

        let Some((m, option)) = found else {
            debug!("Rejected move");
            return Err(IllegalMove { from, to });
        };

        let mut next = self.position.clone();
        next.play_unchecked(m);
        let previous = std::mem::replace(&mut self.position, next);
        self.history.push(previous);
        self.moves.push(option);

        info!(mv = %option, ply = self.moves.len(), "Move applied");
        Ok(option)
    }

    /// Reverts the last move. Returns `false` at the initial position.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            debug!("Nothing to undo");
            return false;
        };
        self.position = previous;
        let reverted = self.moves.pop();
        info!(mv = ?reverted.map(|m| m.to_string()), "Move undone");
        true
    }

    /// Returns to the standard starting position and forgets all history.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.position = Chess::default();
        self.history.clear();
        self.moves.clear();
        info!("Position reset");
    }

    /// Returns `true` when the game is over for the side to move.
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Returns why the game is over, or `None` while it is still in play.
    pub fn outcome(&self) -> Option<GameOutcome> {
        let pos = &self.position;
        if pos.is_checkmate() {
            return Some(GameOutcome::Checkmate {
                winner: !pos.turn(),
            });
        }
        if pos.is_stalemate() {
            return Some(GameOutcome::Stalemate);
        }
        if pos.is_insufficient_material() {
            return Some(GameOutcome::InsufficientMaterial);
        }
        if pos.halfmoves() >= FIFTY_MOVE_HALFMOVES {
            return Some(GameOutcome::FiftyMoveRule);
        }
        if self.repetitions() >= REPETITION_LIMIT {
            return Some(GameOutcome::ThreefoldRepetition);
        }
        None
    }

    /// Counts how often the current position has occurred, itself included.
    fn repetitions(&self) -> usize {
        let current = repetition_key(&self.position);
        1 + self
            .history
            .iter()
            .filter(|pos| repetition_key(pos) == current)
            .count()
    }
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Placement, side to move, castling rights and en-passant square.
fn repetition_key(pos: &Chess) -> String {
    fen_of(pos)
        .split_whitespace()
        .take(4)
        .collect::<Vec<_>>()
        .join(" ")
}
