//! Piece placement: eight occupancy bitboards.

use fog_core::{Color, File, Move, MoveFlag, Piece, PieceKind, Rank, Square};

use crate::Bitboard;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Occupancy by color and by piece kind.
///
/// Every square set in a kind mask is set in exactly one color mask and vice
/// versa; [`PieceSet::is_consistent`] checks this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceSet {
    /// Bitboards for each piece kind, indexed by [`PieceKind::index`].
    kinds: [Bitboard; 6],
    /// Bitboards for each color, indexed by [`Color::index`].
    colors: [Bitboard; 2],
}

impl PieceSet {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        PieceSet {
            kinds: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        let mut pieces = PieceSet::empty();
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            for color in Color::ALL {
                pieces.put(Square::new(file, color.back_rank()), Piece::new(color, kind));
                pieces.put(
                    Square::new(file, color.pawn_rank()),
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        pieces
    }

    /// Returns a copy with `piece` placed on `sq`, replacing whatever was there.
    #[must_use]
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.remove(sq);
        self.put(sq, piece);
        self
    }

    /// Returns a copy with `sq` emptied.
    #[must_use]
    pub fn without_piece(mut self, sq: Square) -> Self {
        self.remove(sq);
        self
    }

    /// Returns the piece at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let color = Color::ALL
            .into_iter()
            .find(|color| self.colors[color.index()].contains(sq))?;
        let kind = self.kind_at(sq)?;
        Some(Piece::new(color, kind))
    }

    /// Returns the kind of the piece at the given square, if any.
    pub fn kind_at(&self, sq: Square) -> Option<PieceKind> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.kinds[kind.index()].contains(sq))
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Returns the squares occupied by `color`.
    #[inline]
    pub fn by_color(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    /// Returns the squares holding a piece of `kind`, either color.
    #[inline]
    pub fn by_kind(&self, kind: PieceKind) -> Bitboard {
        self.kinds[kind.index()]
    }

    /// Returns a bitboard of pieces of the given kind and color.
    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.kinds[kind.index()] & self.colors[color.index()]
    }

    /// Total number of pieces on the board.
    #[inline]
    pub fn count(&self) -> u32 {
        self.occupied().count()
    }

    /// Checks the occupancy invariants: colors are disjoint, kinds are
    /// disjoint, and the kind masks cover exactly the colored squares.
    pub fn is_consistent(&self) -> bool {
        let [white, black] = self.colors;
        if (white & black).is_not_empty() {
            return false;
        }
        let mut seen = Bitboard::EMPTY;
        for kind in self.kinds {
            if (seen & kind).is_not_empty() {
                return false;
            }
            seen |= kind;
        }
        seen == self.occupied()
    }

    /// Returns the placement after `m`.
    ///
    /// Whatever stands on the destination is captured. Castling also moves
    /// the rook, promotions change the arriving piece's kind and en passant
    /// removes the pawn beside the destination. Moves outside the
    /// pseudo-legal set still produce a board, just not a meaningful one.
    pub fn make_move(&self, m: Move) -> PieceSet {
        let mut next = *self;
        let from = m.from();
        let to = m.to();

        let Some(mover) = self.piece_at(from) else {
            return next;
        };

        next.remove(from);
        next.remove(to);
        let kind = m.promotion().unwrap_or(mover.kind);
        next.put(to, Piece::new(mover.color, kind));

        if let Some((rook_from, rook_to)) = m.castling_rook() {
            if let Some(rook) = self.piece_at(rook_from) {
                next.remove(rook_from);
                next.put(rook_to, rook);
            }
        }

        if m.flag() == MoveFlag::EnPassant {
            next.remove(Square::new(to.file(), from.rank()));
        }

        next
    }

    fn put(&mut self, sq: Square, piece: Piece) {
        self.kinds[piece.kind.index()].set(sq);
        self.colors[piece.color.index()].set(sq);
    }

    fn remove(&mut self, sq: Square) {
        for bb in self.kinds.iter_mut().chain(self.colors.iter_mut()) {
            bb.clear(sq);
        }
    }

    /// Rows of board letters from rank 8 down to rank 1, `.` for empty.
    pub(crate) fn rows(&self) -> impl Iterator<Item = String> + '_ {
        Rank::ALL.into_iter().rev().map(move |rank| {
            File::ALL
                .into_iter()
                .map(|file| {
                    self.piece_at(Square::new(file, rank))
                        .map_or('.', Piece::to_char)
                })
                .collect()
        })
    }
}
