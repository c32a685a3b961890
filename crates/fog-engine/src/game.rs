//! Immutable game state.
//!
//! A [`GameState`] is a value: applying a move returns a new state and leaves
//! the old one untouched. Properties derived from the position (the move set,
//! each side's visibility, the piece grid and the outcome) are computed on
//! first use and cached inside the state.

use crate::movegen::generate_moves;
use crate::visibility::visible_squares;
use crate::{Bitboard, MoveList, PieceSet, SpecialMoves};
use fog_core::{Color, Move, Piece, PieceKind, Square};
use once_cell::sync::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Error type for validated game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not in the current pseudo-legal move set.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// A king has already been captured.
    #[error("game has already ended")]
    GameOver,
    /// The text is not coordinate notation such as `e2e4` or `a7a8q`.
    #[error("invalid move notation: {0:?}")]
    InvalidNotation(String),
}

#[derive(Debug, Clone, Default)]
struct Derived {
    moves: OnceCell<MoveList>,
    visible: [OnceCell<Bitboard>; 2],
    grid: OnceCell<[Option<Piece>; 64]>,
    winner: OnceCell<Option<Color>>,
}

/// A position in a fog-of-war game together with whose turn it is.
///
/// Equality and hashing only look at the position, the special-move rights,
/// the side to move and the half-move counter.
#[derive(Clone)]
pub struct GameState {
    pieces: PieceSet,
    special: SpecialMoves,
    turn: Color,
    half_move: u32,
    derived: Derived,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// The standard starting position, white to move.
    pub fn new_game() -> Self {
        Self::from_parts(PieceSet::startpos(), SpecialMoves::new_game(), Color::White, 0)
    }

    /// Assembles a state from its parts.
    ///
    /// Nothing is validated: boards without kings or with impossible rights
    /// are accepted and simply behave as the rules dictate.
    pub fn from_parts(pieces: PieceSet, special: SpecialMoves, turn: Color, half_move: u32) -> Self {
        GameState {
            pieces,
            special,
            turn,
            half_move,
            derived: Derived::default(),
        }
    }

    #[inline]
    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    #[inline]
    pub fn special_moves(&self) -> &SpecialMoves {
        &self.special
    }

    /// The side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Half-moves played since the game began.
    #[inline]
    pub fn half_move(&self) -> u32 {
        self.half_move
    }

    /// The move number as written in a score sheet, starting at 1.
    #[inline]
    pub fn full_move_number(&self) -> u32 {
        self.half_move / 2 + 1
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pieces.piece_at(sq)
    }

    /// Returns the squares occupied by `color`.
    #[inline]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.pieces.by_color(color)
    }

    /// The pseudo-legal moves for the side to move.
    pub fn moves(&self) -> &MoveList {
        self.derived
            .moves
            .get_or_init(|| generate_moves(&self.pieces, &self.special, self.turn))
    }

    /// Plays `m` and returns the resulting state.
    ///
    /// The move is not checked against [`GameState::moves`]; use
    /// [`GameState::try_apply`] for that.
    pub fn apply(&self, m: Move) -> GameState {
        let next = GameState::from_parts(
            self.pieces.make_move(m),
            self.special.update(&self.pieces, m),
            self.turn.opposite(),
            self.half_move.saturating_add(1),
        );
        trace!(mov = %m, half_move = next.half_move, "applied move");

        if next.is_over() && !self.is_over() {
            debug!(winner = ?next.winner(), half_move = next.half_move, "king captured, game over");
        }
        next
    }

    /// Plays `m` if it is one of the current pseudo-legal moves.
    pub fn try_apply(&self, m: Move) -> Result<GameState, GameError> {
        if self.is_over() {
            warn!(mov = %m, "move rejected, game is over");
            return Err(GameError::GameOver);
        }
        if !self.moves().contains(m) {
            warn!(mov = %m, turn = %self.turn, "move rejected, not in move set");
            return Err(GameError::IllegalMove(m));
        }
        Ok(self.apply(m))
    }

    /// Resolves coordinate notation (`e2e4`, `e7e8q`) to a move in the
    /// current move set, filling in the castling, double push and en
    /// passant flags the text cannot express.
    pub fn parse_move(&self, s: &str) -> Result<Move, GameError> {
        let parsed =
            Move::from_uci(s.trim()).ok_or_else(|| GameError::InvalidNotation(s.to_string()))?;
        self.moves()
            .iter()
            .copied()
            .find(|m| {
                m.from() == parsed.from()
                    && m.to() == parsed.to()
                    && m.promotion() == parsed.promotion()
            })
            .ok_or(GameError::IllegalMove(parsed))
    }

    /// True once exactly one king remains on the board.
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// The side whose king is the only one left, if any.
    pub fn winner(&self) -> Option<Color> {
        *self.derived.winner.get_or_init(|| {
            let has_king = |color| {
                self.pieces
                    .pieces_of(PieceKind::King, color)
                    .is_not_empty()
            };
            match (has_king(Color::White), has_king(Color::Black)) {
                (true, false) => Some(Color::White),
                (false, true) => Some(Color::Black),
                _ => None,
            }
        })
    }

    /// The squares `color` can see.
    pub fn visible(&self, color: Color) -> Bitboard {
        *self.derived.visible[color.index()]
            .get_or_init(|| visible_squares(&self.pieces, &self.special, color))
    }

    /// [`GameState::visible`] as one flag per square, indexed by square.
    pub fn visibility_grid(&self, color: Color) -> [bool; 64] {
        self.visible(color).to_grid()
    }

    /// The piece on every square, indexed by square.
    pub fn piece_grid(&self) -> &[Option<Piece>; 64] {
        self.derived.grid.get_or_init(|| {
            std::array::from_fn(|i| {
                Square::from_index(i as u8).and_then(|sq| self.pieces.piece_at(sq))
            })
        })
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
            && self.special == other.special
            && self.turn == other.turn
            && self.half_move == other.half_move
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pieces.hash(state);
        self.special.hash(state);
        self.turn.hash(state);
        self.half_move.hash(state);
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("pieces", &self.pieces)
            .field("special", &self.special)
            .field("turn", &self.turn)
            .field("half_move", &self.half_move)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.pieces.rows().zip((1..=8).rev()) {
            write!(f, "{} ", rank)?;
            for c in row.chars() {
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{} to move, move {}", self.turn, self.full_move_number())
    }
}
