//! Bitboard engine for fog-of-war chess.
//!
//! In fog-of-war chess each side only sees the squares its own pieces can
//! reach. There is no check: kings may walk into attack, and the game ends
//! when a king is captured.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit board representation with efficient operations
//! - [`PieceSet`] - piece placement as occupancy bitboards
//! - [`SpecialMoves`] - castling rights and the en passant target
//! - [`GameState`] - immutable game state with cached move sets and visibility
//! - Pseudo-legal move generation and per-side visibility
//!
//! # Example
//!
//! ```
//! use fog_engine::GameState;
//! use fog_core::Color;
//!
//! let state = GameState::new_game();
//! assert_eq!(state.moves().len(), 20);
//!
//! let m = state.parse_move("e2e4").unwrap();
//! let state = state.try_apply(m).unwrap();
//! assert_eq!(state.turn(), Color::Black);
//! assert!(state.visible(Color::White).count() > 32);
//! ```

mod bitboard;
mod game;
pub mod movegen;
mod pieces;
mod special;
mod visibility;

pub use bitboard::Bitboard;
pub use game::{GameError, GameState};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{
    bishop_attacks, generate_moves, is_square_attacked, king_attacks, knight_attacks,
    pawn_attacks, pawn_pushes, piece_move_mask, queen_attacks, rook_attacks, sliding_moves,
    step_moves, MoveList,
};
pub use pieces::PieceSet;
pub use special::{CastlingRights, SpecialMoves};
pub use visibility::visible_squares;
