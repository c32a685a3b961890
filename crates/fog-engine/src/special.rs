//! Castling rights and the en passant target.

use fog_core::{Color, File, Move, PieceKind, Square};

use crate::{Bitboard, PieceSet};

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns these rights without any for `color`.
    #[inline]
    #[must_use]
    pub const fn without_color(self, color: Color) -> Self {
        self.without_kingside(color).without_queenside(color)
    }

    /// Returns these rights without kingside castling for `color`.
    #[inline]
    #[must_use]
    pub const fn without_kingside(self, color: Color) -> Self {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        CastlingRights(self.0 & mask)
    }

    /// Returns these rights without queenside castling for `color`.
    #[inline]
    #[must_use]
    pub const fn without_queenside(self, color: Color) -> Self {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        CastlingRights(self.0 & mask)
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Rights that depend on move history rather than on the placement alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpecialMoves {
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl SpecialMoves {
    pub const fn new(castling: CastlingRights, en_passant: Option<Square>) -> Self {
        SpecialMoves {
            castling,
            en_passant,
        }
    }

    /// Full castling rights, no en passant target.
    pub const fn new_game() -> Self {
        SpecialMoves::new(CastlingRights::ALL, None)
    }

    #[inline]
    pub const fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// The square a pawn skipped on the previous half-move, if any.
    #[inline]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The en passant target as a zero- or one-square bitboard.
    #[inline]
    pub fn en_passant_bitboard(&self) -> Bitboard {
        self.en_passant.map_or(Bitboard::EMPTY, Bitboard::from_square)
    }

    /// Returns the rights after `m` is played on `pre_move`.
    ///
    /// Castling rights only ever disappear: a king leaving its home square
    /// drops both of its side's rights, and any move from or onto a rook's
    /// home square drops the matching right. The en passant target lasts
    /// exactly one half-move.
    #[must_use]
    pub fn update(&self, pre_move: &PieceSet, m: Move) -> SpecialMoves {
        let touches = |sq: Square| m.from() == sq || m.to() == sq;

        let mut castling = self.castling;
        for color in Color::ALL {
            let rank = color.back_rank();
            if touches(Square::new(File::E, rank)) {
                castling = castling.without_color(color);
            }
            if touches(Square::new(File::H, rank)) {
                castling = castling.without_kingside(color);
            }
            if touches(Square::new(File::A, rank)) {
                castling = castling.without_queenside(color);
            }
        }

        let is_pawn = pre_move.kind_at(m.from()) == Some(PieceKind::Pawn);
        let en_passant = if is_pawn && m.from().index().abs_diff(m.to().index()) == 16 {
            Square::from_index((m.from().index() + m.to().index()) / 2)
        } else {
            None
        };

        SpecialMoves {
            castling,
            en_passant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fog_core::{MoveFlag, Piece};

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn castling_rights() {
        let rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        let rights = rights.without_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));
    }

    #[test]
    fn castling_rights_without_color() {
        let rights = CastlingRights::ALL.without_color(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn castling_rights_from_flags() {
        let rights =
            CastlingRights::new(CastlingRights::WHITE_KINGSIDE | CastlingRights::BLACK_QUEENSIDE);
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(rights.can_castle_queenside(Color::Black));

        // Bits above the four flags are dropped.
        assert_eq!(CastlingRights::new(0xFF), CastlingRights::ALL);
    }

    #[test]
    fn castling_rights_none() {
        let rights = CastlingRights::NONE;
        for color in Color::ALL {
            assert!(!rights.can_castle_kingside(color));
            assert!(!rights.can_castle_queenside(color));
        }
        assert_eq!(rights.raw(), 0);
    }

    #[test]
    fn double_push_sets_target() {
        let board = PieceSet::startpos();
        let next = SpecialMoves::new_game().update(
            &board,
            Move::new(sq("e2"), sq("e4"), MoveFlag::DoublePush),
        );
        assert_eq!(next.en_passant(), Some(sq("e3")));
        assert_eq!(next.en_passant_bitboard(), Bitboard::from(sq("e3")));

        let black = SpecialMoves::new_game().update(
            &board,
            Move::new(sq("d7"), sq("d5"), MoveFlag::DoublePush),
        );
        assert_eq!(black.en_passant(), Some(sq("d6")));
    }

    #[test]
    fn target_is_cleared_by_the_next_move() {
        let board = PieceSet::startpos();
        let special = SpecialMoves::new(CastlingRights::ALL, Some(sq("e3")));
        let next = special.update(&board, Move::normal(Square::G8, sq("f6")));
        assert_eq!(next.en_passant(), None);
    }

    #[test]
    fn non_pawn_two_rank_move_sets_no_target() {
        let board = PieceSet::empty().with_piece(sq("d1"), Piece::from_char('R').unwrap());
        let next = SpecialMoves::new_game().update(&board, Move::normal(sq("d1"), sq("d3")));
        assert_eq!(next.en_passant(), None);
    }

    #[test]
    fn king_move_clears_both_sides() {
        let board = PieceSet::startpos();
        let next = SpecialMoves::new_game().update(&board, Move::normal(Square::E1, sq("e2")));
        assert!(!next.castling().can_castle_kingside(Color::White));
        assert!(!next.castling().can_castle_queenside(Color::White));
        assert!(next.castling().can_castle_kingside(Color::Black));
    }

    #[test]
    fn rook_move_clears_one_side() {
        let board = PieceSet::startpos();
        let next = SpecialMoves::new_game().update(&board, Move::normal(Square::A8, sq("a6")));
        assert!(!next.castling().can_castle_queenside(Color::Black));
        assert!(next.castling().can_castle_kingside(Color::Black));
    }

    #[test]
    fn rook_captured_on_home_square_clears_right() {
        let board = PieceSet::startpos();
        let next = SpecialMoves::new_game().update(&board, Move::normal(sq("b2"), Square::H8));
        assert!(!next.castling().can_castle_kingside(Color::Black));
        assert!(next.castling().can_castle_queenside(Color::Black));
        assert_eq!(next.castling().raw().count_ones(), 3);
    }

    #[test]
    fn rights_never_return() {
        let board = PieceSet::startpos();
        let special = SpecialMoves::new(CastlingRights::NONE, None);
        let next = special.update(&board, Move::normal(Square::G1, sq("f3")));
        assert_eq!(next.castling(), CastlingRights::NONE);
    }
}
