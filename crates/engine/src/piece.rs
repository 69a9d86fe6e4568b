//! Piece identity and the tagged-variant dispatch used instead of dynamic
//! piece-class polymorphism (see the workspace design notes: a single
//! `PieceType` tag drives move generation and rendering hints such as the
//! knight's airborne window).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One square's row/column coordinate. `0` is the board's north/west edge.
pub type Coord = i8;

/// A player slot. `1..=2` on a standard board, `1..=4` on a four-player board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player(pub u8);

impl Player {
    pub const fn new(n: u8) -> Self {
        Player(n)
    }
}

/// Stable index of a piece within `Board::pieces`. Doubles as the
/// `pieceId` referenced throughout `ActiveMove`, `Cooldown`, and the wire
/// protocol — ordering of `Board::pieces` never changes after setup, so
/// this index is a piece's identity for the lifetime of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceId(pub usize);

/// `type ∈ {P,N,B,R,Q,K}` (spec.md §3). Mutates exactly once, P→Q, on
/// promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Knights are airborne (untouchable, invisible) between 15% and 85%
    /// of their move's progress (spec.md §4.3). Every other piece type
    /// has no such window.
    pub fn airborne_window(self) -> Option<(f64, f64)> {
        match self {
            PieceType::Knight => Some((0.15, 0.85)),
            _ => None,
        }
    }

    /// Straight-moving pawns cannot capture by collision (spec.md §4.3) —
    /// only diagonal pawn moves land on an occupied square. The
    /// `moving_diagonally` flag distinguishes the two at the call site.
    pub fn can_capture_by_collision(self, moving_diagonally: bool) -> bool {
        match self {
            PieceType::Pawn => moving_diagonally,
            _ => true,
        }
    }
}

/// A single piece on the board. Position is canonical as an integer
/// start-square; fractional positions are derived transiently by the
/// collision resolver and never stored here (spec.md §9 — avoids
/// floating-point drift across ticks).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub id: PieceId,
    pub piece_type: PieceType,
    pub player: Player,
    pub initial_row: Coord,
    pub initial_col: Coord,
    pub row: Coord,
    pub col: Coord,
    pub captured: bool,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, piece_type: PieceType, player: Player, row: Coord, col: Coord) -> Self {
        Piece {
            id,
            piece_type,
            player,
            initial_row: row,
            initial_col: col,
            row,
            col,
            captured: false,
            has_moved: false,
        }
    }
}
