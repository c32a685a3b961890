//! Reachability masks for every piece kind.
//!
//! Squares are stepped with plain index arithmetic. A step whose result lies
//! more than [`MAX_STEP_SPAN`] away from its origin has wrapped around the
//! a/h edge and is discarded; sliders apply the same check on every step.
//! These masks describe reachability only: callers remove their own pieces.

use crate::Bitboard;
use fog_core::{Color, PieceKind, Square};
use once_cell::sync::Lazy;

/// Largest Chebyshev distance a single step may cover.
pub const MAX_STEP_SPAN: u8 = 2;

pub const KNIGHT_DELTAS: [i8; 8] = [6, -6, 15, -15, 17, -17, 10, -10];
pub const KING_DELTAS: [i8; 8] = [1, -1, 7, -7, 8, -8, 9, -9];
pub const DIAGONAL_DELTAS: [i8; 4] = [7, -7, 9, -9];
pub const RANK_DELTAS: [i8; 2] = [1, -1];
pub const FILE_DELTAS: [i8; 2] = [8, -8];

const WHITE_PAWN_ATTACK_DELTAS: [i8; 2] = [7, 9];
const BLACK_PAWN_ATTACK_DELTAS: [i8; 2] = [-7, -9];

static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| square_table(|sq| step_moves(sq, &KNIGHT_DELTAS)));

static KING_ATTACKS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| square_table(|sq| step_moves(sq, &KING_DELTAS)));

/// Pawn capture patterns, indexed `[color][square]`.
static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        square_table(|sq| step_moves(sq, &WHITE_PAWN_ATTACK_DELTAS)),
        square_table(|sq| step_moves(sq, &BLACK_PAWN_ATTACK_DELTAS)),
    ]
});

fn square_table(f: impl Fn(Square) -> Bitboard) -> [Bitboard; 64] {
    std::array::from_fn(|i| Square::from_index(i as u8).map_or(Bitboard::EMPTY, &f))
}

/// One step of `delta` from `square`, unless it leaves the board or wraps.
#[inline]
fn step(square: Square, delta: i8) -> Option<Square> {
    let to = square.offset(delta).ok()?;
    (square.distance(to) <= MAX_STEP_SPAN).then_some(to)
}

/// Union of `square + delta` over every delta that stays on the board.
pub fn step_moves(square: Square, deltas: &[i8]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&delta| step(square, delta))
        .collect()
}

/// Walks each direction from `square` until the edge or the first occupied
/// square. The blocking square is included.
pub fn sliding_moves(square: Square, occupied: Bitboard, deltas: &[i8]) -> Bitboard {
    let mut moves = Bitboard::EMPTY;
    for &delta in deltas {
        let mut current = square;
        while let Some(next) = step(current, delta) {
            moves.set(next);
            if occupied.contains(next) {
                break;
            }
            current = next;
        }
    }
    moves
}

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns pawn attacks from the given square for the given color.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Squares a pawn of `color` on `sq` can advance to.
///
/// The double step is only offered from the pawn's starting rank and only
/// when both squares are in `empty`.
pub fn pawn_pushes(sq: Square, color: Color, empty: Bitboard) -> Bitboard {
    let forward = [color.pawn_push()];
    let single = step_moves(sq, &forward) & empty;
    let mut pushes = single;
    if sq.rank() == color.pawn_rank() {
        for mid in single {
            pushes |= step_moves(mid, &forward) & empty;
        }
    }
    pushes
}

/// Returns bishop attacks given the occupancy.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding_moves(sq, occupied, &DIAGONAL_DELTAS)
}

/// Returns rook attacks given the occupancy.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    sliding_moves(sq, occupied, &RANK_DELTAS) | sliding_moves(sq, occupied, &FILE_DELTAS)
}

/// Returns queen attacks given the occupancy.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

/// Squares a piece of `kind` on `sq` reaches, blockers included.
///
/// Pawns move differently from how they capture and return an empty mask
/// here; see [`pawn_attacks`] and [`pawn_pushes`].
pub fn piece_move_mask(sq: Square, kind: PieceKind, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Bishop => bishop_attacks(sq, occupied),
        PieceKind::Rook => rook_attacks(sq, occupied),
        PieceKind::Queen => queen_attacks(sq, occupied),
        PieceKind::Knight => knight_attacks(sq),
        PieceKind::King => king_attacks(sq),
        PieceKind::Pawn => Bitboard::EMPTY,
    }
}
