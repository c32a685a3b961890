//! Move generation.
//!
//! Generates pseudo-legal moves: every move obeys piece movement and
//! occupancy rules, but only castling checks whether the king is attacked.
//! Leaving the king en prise is allowed; capturing it ends the game.

mod attacks;
pub mod perft;

use crate::{Bitboard, PieceSet, SpecialMoves};
use fog_core::{Color, File, Move, MoveFlag, PieceKind, Square};

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, pawn_pushes, piece_move_mask,
    queen_attacks, rook_attacks, sliding_moves, step_moves, DIAGONAL_DELTAS, FILE_DELTAS,
    KING_DELTAS, KNIGHT_DELTAS, MAX_STEP_SPAN, RANK_DELTAS,
};

/// A list of generated moves. Order carries no meaning.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns true if the list holds `m`.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every pseudo-legal move for `us`.
pub fn generate_moves(pieces: &PieceSet, special: &SpecialMoves, us: Color) -> MoveList {
    let mut moves = MoveList::new();

    generate_piece_moves(pieces, us, &mut moves);
    generate_castling_moves(pieces, special, us, &mut moves);
    generate_pawn_moves(pieces, special, us, &mut moves);

    moves
}

/// Generates moves for every non-pawn piece, castling excluded.
fn generate_piece_moves(pieces: &PieceSet, us: Color, moves: &mut MoveList) {
    let our_pieces = pieces.by_color(us);
    let occupied = pieces.occupied();

    for from in our_pieces & !pieces.by_kind(PieceKind::Pawn) {
        let Some(kind) = pieces.kind_at(from) else {
            continue;
        };
        for to in piece_move_mask(from, kind, occupied) & !our_pieces {
            moves.push(Move::normal(from, to));
        }
    }
}

/// Generates pawn pushes, captures, promotions and en passant.
fn generate_pawn_moves(pieces: &PieceSet, special: &SpecialMoves, us: Color, moves: &mut MoveList) {
    let them = us.opposite();
    let their_pieces = pieces.by_color(them);
    let occupied = pieces.occupied();
    let pawns = pieces.pieces_of(PieceKind::Pawn, us);

    for from in pawns {
        let targets = (pawn_attacks(from, us) & their_pieces) | pawn_pushes(from, us, !occupied);
        for to in targets {
            if to.rank() == us.promotion_rank() {
                for kind in PieceKind::PROMOTIONS {
                    if let Some(flag) = MoveFlag::promotion(kind) {
                        moves.push(Move::new(from, to, flag));
                    }
                }
            } else if from.index().abs_diff(to.index()) == 16 {
                moves.push(Move::new(from, to, MoveFlag::DoublePush));
            } else {
                moves.push(Move::normal(from, to));
            }
        }
    }

    // A pawn of ours attacks the target iff an enemy pawn on the target
    // would attack it.
    if let Some(ep_square) = special.en_passant() {
        if !occupied.contains(ep_square) {
            for from in pawn_attacks(ep_square, them) & pawns {
                moves.push(Move::new(from, ep_square, MoveFlag::EnPassant));
            }
        }
    }
}

/// Generates castling moves if the path is clear and the king never stands
/// on, crosses, or lands on an attacked square.
fn generate_castling_moves(
    pieces: &PieceSet,
    special: &SpecialMoves,
    us: Color,
    moves: &mut MoveList,
) {
    let rank = us.back_rank();
    let them = us.opposite();
    let occupied = pieces.occupied();
    let at = |file| Square::new(file, rank);
    let king_start = at(File::E);

    if !pieces.pieces_of(PieceKind::King, us).contains(king_start) {
        return;
    }
    let rooks = pieces.pieces_of(PieceKind::Rook, us);
    let is_safe = |files: &[File]| {
        files
            .iter()
            .all(|&file| !is_square_attacked(pieces, at(file), them))
    };

    if special.castling().can_castle_kingside(us) && rooks.contains(at(File::H)) {
        let between = Bitboard::from(at(File::F)) | Bitboard::from(at(File::G));
        if (occupied & between).is_empty() && is_safe(&[File::E, File::F, File::G]) {
            moves.push(Move::new(king_start, at(File::G), MoveFlag::CastleKingside));
        }
    }

    if special.castling().can_castle_queenside(us) && rooks.contains(at(File::A)) {
        let between =
            Bitboard::from(at(File::B)) | Bitboard::from(at(File::C)) | Bitboard::from(at(File::D));
        if (occupied & between).is_empty() && is_safe(&[File::E, File::D, File::C]) {
            moves.push(Move::new(king_start, at(File::C), MoveFlag::CastleQueenside));
        }
    }
}

/// Returns true if the given square is attacked by the given color.
///
/// Attacks are symmetric: a piece of ours placed on `sq` would reach an
/// enemy piece of the same kind exactly when that piece attacks `sq`. So
/// only the patterns from `sq` are generated, never the opponent's moves.
pub fn is_square_attacked(pieces: &PieceSet, sq: Square, by_color: Color) -> bool {
    let occupied = pieces.occupied();
    let enemy = |kind| pieces.pieces_of(kind, by_color);

    (pawn_attacks(sq, by_color.opposite()) & enemy(PieceKind::Pawn)).is_not_empty()
        || (knight_attacks(sq) & enemy(PieceKind::Knight)).is_not_empty()
        || (king_attacks(sq) & enemy(PieceKind::King)).is_not_empty()
        || (bishop_attacks(sq, occupied) & (enemy(PieceKind::Bishop) | enemy(PieceKind::Queen)))
            .is_not_empty()
        || (rook_attacks(sq, occupied) & (enemy(PieceKind::Rook) | enemy(PieceKind::Queen)))
            .is_not_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CastlingRights;
    use fog_core::Piece;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn board(placement: &[(&str, char)]) -> PieceSet {
        placement.iter().fold(PieceSet::empty(), |pieces, &(at, c)| {
            pieces.with_piece(sq(at), Piece::from_char(c).unwrap())
        })
    }

    fn startpos_moves() -> MoveList {
        generate_moves(&PieceSet::startpos(), &SpecialMoves::new_game(), Color::White)
    }

    #[test]
    fn movelist_push_and_iterate() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        let m1 = Move::normal(sq("e2"), sq("e4"));
        let m2 = Move::normal(sq("d2"), sq("d4"));
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert!(list.contains(m2));
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn generate_moves_startpos() {
        let moves = startpos_moves();
        assert_eq!(moves.len(), 20); // 16 pawn moves + 4 knight moves
        assert!(!moves.iter().any(|m| m.flag().is_castling()));
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::EnPassant));
        assert_eq!(
            moves
                .iter()
                .filter(|m| m.flag() == MoveFlag::DoublePush)
                .count(),
            8
        );
    }

    #[test]
    fn black_startpos_moves() {
        let moves = generate_moves(&PieceSet::startpos(), &SpecialMoves::new_game(), Color::Black);
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(Move::normal(Square::B8, sq("c6"))));
        assert!(moves.contains(Move::new(sq("e7"), sq("e5"), MoveFlag::DoublePush)));
    }

    #[test]
    fn moves_never_target_own_pieces() {
        let pieces = PieceSet::startpos();
        for m in &startpos_moves() {
            assert!(!pieces.by_color(Color::White).contains(m.to()));
        }
    }

    #[test]
    fn king_may_step_into_attack() {
        // e2 is covered by the black rook; the move is still generated.
        let pieces = board(&[("e1", 'K'), ("e8", 'r'), ("a8", 'k')]);
        let moves = generate_moves(&pieces, &SpecialMoves::default(), Color::White);
        assert!(moves.contains(Move::normal(Square::E1, sq("e2"))));
        assert_eq!(moves.len(), 5);
    }

    #[test]
    fn king_can_be_captured() {
        let pieces = board(&[("e1", 'K'), ("e5", 'r'), ("a8", 'k')]);
        let moves = generate_moves(&pieces, &SpecialMoves::default(), Color::Black);
        assert!(moves.contains(Move::normal(sq("e5"), Square::E1)));
    }

    fn castling_board() -> PieceSet {
        board(&[
            ("e1", 'K'),
            ("a1", 'R'),
            ("h1", 'R'),
            ("e8", 'k'),
            ("a8", 'r'),
            ("h8", 'r'),
        ])
    }

    #[test]
    fn castling_both_sides() {
        let moves = generate_moves(&castling_board(), &SpecialMoves::new_game(), Color::White);
        assert!(moves.contains(Move::new(Square::E1, Square::G1, MoveFlag::CastleKingside)));
        assert!(moves.contains(Move::new(Square::E1, Square::C1, MoveFlag::CastleQueenside)));

        let moves = generate_moves(&castling_board(), &SpecialMoves::new_game(), Color::Black);
        assert!(moves.contains(Move::new(Square::E8, Square::G8, MoveFlag::CastleKingside)));
        assert!(moves.contains(Move::new(Square::E8, Square::C8, MoveFlag::CastleQueenside)));
    }

    #[test]
    fn castling_requires_rights() {
        let special = SpecialMoves::new(
            CastlingRights::new(CastlingRights::WHITE_QUEENSIDE),
            None,
        );
        let moves = generate_moves(&castling_board(), &special, Color::White);
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::CastleKingside));
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::CastleQueenside));
    }

    #[test]
    fn castling_requires_empty_path() {
        let pieces = castling_board().with_piece(Square::B1, Piece::from_char('N').unwrap());
        let moves = generate_moves(&pieces, &SpecialMoves::new_game(), Color::White);
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::CastleQueenside));
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::CastleKingside));
    }

    #[test]
    fn no_castling_out_of_or_through_attack() {
        // Rook on f5 covers f1; king side is off, queen side is not.
        let pieces = castling_board().with_piece(sq("f5"), Piece::from_char('r').unwrap());
        let moves = generate_moves(&pieces, &SpecialMoves::new_game(), Color::White);
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::CastleKingside));
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::CastleQueenside));

        // Rook on e5 checks the king; neither side.
        let pieces = castling_board().with_piece(sq("e5"), Piece::from_char('r').unwrap());
        let moves = generate_moves(&pieces, &SpecialMoves::new_game(), Color::White);
        assert!(!moves.iter().any(|m| m.flag().is_castling()));
    }

    #[test]
    fn queenside_b_file_may_be_attacked() {
        // Only b1 is covered; the king never touches it.
        let pieces = castling_board().with_piece(sq("b5"), Piece::from_char('r').unwrap());
        let moves = generate_moves(&pieces, &SpecialMoves::new_game(), Color::White);
        assert!(moves.iter().any(|m| m.flag() == MoveFlag::CastleQueenside));
    }

    #[test]
    fn en_passant() {
        let pieces = board(&[("e5", 'P'), ("d5", 'p'), ("f5", 'p'), ("e1", 'K'), ("e8", 'k')]);
        let special = SpecialMoves::new(CastlingRights::NONE, Some(sq("d6")));
        let moves = generate_moves(&pieces, &special, Color::White);
        let ep: Vec<_> = moves
            .iter()
            .filter(|m| m.flag() == MoveFlag::EnPassant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].from(), sq("e5"));
        assert_eq!(ep[0].to(), sq("d6"));
    }

    #[test]
    fn en_passant_target_must_be_empty() {
        let pieces = board(&[("e5", 'P'), ("d5", 'p'), ("d6", 'n')]);
        let special = SpecialMoves::new(CastlingRights::NONE, Some(sq("d6")));
        let moves = generate_moves(&pieces, &special, Color::White);
        assert!(!moves.iter().any(|m| m.flag() == MoveFlag::EnPassant));
        // The knight on d6 is still an ordinary capture.
        assert!(moves.contains(Move::normal(sq("e5"), sq("d6"))));
    }

    #[test]
    fn promotion() {
        let pieces = board(&[("a7", 'P'), ("b8", 'r'), ("e1", 'K'), ("h1", 'k')]);
        let moves = generate_moves(&pieces, &SpecialMoves::default(), Color::White);

        // Four choices for the push to a8 and four for the capture on b8.
        let promotions: Vec<_> = moves.iter().filter(|m| m.flag().is_promotion()).collect();
        assert_eq!(promotions.len(), 8);
        for kind in PieceKind::PROMOTIONS {
            let flag = MoveFlag::promotion(kind).unwrap();
            assert!(moves.contains(Move::new(sq("a7"), sq("a8"), flag)));
            assert!(moves.contains(Move::new(sq("a7"), sq("b8"), flag)));
        }
    }

    #[test]
    fn blocked_pawn_has_no_push() {
        let pieces = board(&[("e2", 'P'), ("e3", 'n')]);
        let moves = generate_moves(&pieces, &SpecialMoves::default(), Color::White);
        assert!(moves.is_empty());
    }

    #[test]
    fn is_square_attacked_startpos() {
        let pieces = PieceSet::startpos();
        assert!(is_square_attacked(&pieces, sq("e3"), Color::White));
        assert!(is_square_attacked(&pieces, sq("f6"), Color::Black));
        assert!(!is_square_attacked(&pieces, sq("e4"), Color::White));
        assert!(!is_square_attacked(&pieces, sq("e4"), Color::Black));
    }

    #[test]
    fn is_square_attacked_by_each_kind() {
        let e4 = sq("e4");
        for (at, c) in [
            ("d5", 'p'),
            ("f6", 'n'),
            ("e5", 'k'),
            ("b7", 'b'),
            ("e8", 'r'),
            ("h4", 'q'),
            ("h7", 'q'),
        ] {
            let pieces = board(&[(at, c)]);
            assert!(is_square_attacked(&pieces, e4, Color::Black), "{} on {}", c, at);
            assert!(!is_square_attacked(&pieces, e4, Color::White));
        }
        // A black pawn on d3 attacks c2/e2, not e4.
        assert!(!is_square_attacked(&board(&[("d3", 'p')]), e4, Color::Black));
        // Blocked slider.
        let pieces = board(&[("e8", 'r'), ("e6", 'P')]);
        assert!(!is_square_attacked(&pieces, e4, Color::Black));
    }
}
