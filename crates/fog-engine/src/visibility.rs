//! Fog of war: the squares each side can see.
//!
//! A side sees its own pieces and every square those pieces could move to or
//! capture on, computed with the same attack masks as move generation but
//! without its legality filters.

use fog_core::{Color, PieceKind};

use crate::movegen::{pawn_attacks, pawn_pushes, piece_move_mask};
use crate::{Bitboard, PieceSet, SpecialMoves};

/// Returns the squares visible to `color`, whichever side is to move.
///
/// A live en passant target adds the pawns that could take it, never the
/// empty target square itself.
pub fn visible_squares(pieces: &PieceSet, special: &SpecialMoves, color: Color) -> Bitboard {
    let ours = pieces.by_color(color);
    let theirs = pieces.by_color(color.opposite());
    let occupied = pieces.occupied();
    let pawns = pieces.pieces_of(PieceKind::Pawn, color);

    let mut visible = ours;

    for from in ours & !pawns {
        if let Some(kind) = pieces.kind_at(from) {
            visible |= piece_move_mask(from, kind, occupied);
        }
    }

    for from in pawns {
        visible |= pawn_attacks(from, color) & theirs;
        visible |= pawn_pushes(from, color, !occupied);
    }

    if let Some(target) = special.en_passant() {
        if !occupied.contains(target) {
            visible |= pawn_attacks(target, color.opposite()) & pawns;
        }
    }

    visible
}
