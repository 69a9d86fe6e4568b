//! Board geometry: the two playable layouts, corner validity, and the
//! canonical opening position for each (spec.md §3, §4.1).

use crate::piece::{Coord, Piece, PieceId, PieceType, Player};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `boardType` (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BoardType {
    Standard8x8,
    FourPlayer12x12,
}

impl BoardType {
    pub fn size(self) -> i8 {
        match self {
            BoardType::Standard8x8 => 8,
            BoardType::FourPlayer12x12 => 12,
        }
    }

    pub fn player_count(self) -> u8 {
        match self {
            BoardType::Standard8x8 => 2,
            BoardType::FourPlayer12x12 => 4,
        }
    }
}

/// Geometry plus the ordered, stable piece list (spec.md §3: "ordered
/// sequence; ordering stable for deterministic iteration and tie-breaking").
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pub board_type: BoardType,
    pub pieces: Vec<Piece>,
}

impl Board {
    /// `isValid(row, col)` — in bounds, and not inside one of the four
    /// 2x2 corner cutouts on a four-player board.
    pub fn is_valid(&self, row: Coord, col: Coord) -> bool {
        let size = self.board_type.size();
        if row < 0 || col < 0 || row >= size || col >= size {
            return false;
        }
        if self.board_type == BoardType::FourPlayer12x12 {
            let near = |v: Coord| v <= 1;
            let far = |v: Coord| v >= size - 2;
            let in_corner = (near(row) || far(row)) && (near(col) || far(col));
            if in_corner {
                return false;
            }
        }
        true
    }

    pub fn piece_at(&self, row: Coord, col: Coord) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| !p.captured && p.row == row && p.col == col)
    }

    pub fn piece_at_mut(&mut self, row: Coord, col: Coord) -> Option<&mut Piece> {
        self.pieces
            .iter_mut()
            .find(|p| !p.captured && p.row == row && p.col == col)
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.0]
    }

    /// Bounds-checked lookup for piece ids coming from outside the engine
    /// (spec.md §4.10) — an intent's `pieceId` is a client-supplied value
    /// and may be stale or out of range.
    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.0]
    }
}

/// The inward-facing forward direction (row delta, col delta) for a
/// player's pawns, and the promotion edge they're heading toward.
#[derive(Debug, Clone, Copy)]
pub struct Orientation {
    pub forward: (Coord, Coord),
    pub promotion_row: Option<Coord>,
    pub promotion_col: Option<Coord>,
}

/// `initialBoard(boardType)` (spec.md §4.1).
pub fn initial_board(board_type: BoardType) -> Board {
    let mut pieces = Vec::new();
    match board_type {
        BoardType::Standard8x8 => {
            push_standard_side(&mut pieces, Player::new(1), 7, 6, -1);
            push_standard_side(&mut pieces, Player::new(2), 0, 1, 1);
        }
        BoardType::FourPlayer12x12 => {
            push_band_side(&mut pieces, Player::new(1), Edge::South);
            push_band_side(&mut pieces, Player::new(2), Edge::North);
            push_band_side(&mut pieces, Player::new(3), Edge::West);
            push_band_side(&mut pieces, Player::new(4), Edge::East);
        }
    }
    Board { board_type, pieces }
}

/// A player's orientation on their board (spec.md §4.1: "Pawns' forward
/// direction is the inward normal of that edge; promotion row is the
/// opposite inward edge"), derived directly from the edge/band
/// `initial_board` assigns that seat rather than reverse-engineered from
/// piece positions — a player's first pawn and king need not share a file
/// or rank, so that comparison doesn't reliably recover the edge.
pub fn orientation_for(board: &Board, player: Player) -> Orientation {
    let size = board.board_type.size();
    match player.0 {
        // South edge (row-aligned boards' player 1): advances toward row 0.
        1 => Orientation {
            forward: (-1, 0),
            promotion_row: Some(0),
            promotion_col: None,
        },
        // North edge: advances toward the far row.
        2 => Orientation {
            forward: (1, 0),
            promotion_row: Some(size - 1),
            promotion_col: None,
        },
        // West edge (four-player board only): advances toward the far column.
        3 => Orientation {
            forward: (0, 1),
            promotion_row: None,
            promotion_col: Some(size - 1),
        },
        // East edge (four-player board only): advances toward column 0.
        4 => Orientation {
            forward: (0, -1),
            promotion_row: None,
            promotion_col: Some(0),
        },
        other => panic!("no orientation defined for player {other}"),
    }
}

fn back_rank_layout() -> [PieceType; 8] {
    use PieceType::*;
    [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook]
}

fn push_standard_side(pieces: &mut Vec<Piece>, player: Player, back_row: Coord, pawn_row: Coord, _forward: Coord) {
    for (col, piece_type) in back_rank_layout().into_iter().enumerate() {
        let id = PieceId(pieces.len());
        pieces.push(Piece::new(id, piece_type, player, back_row, col as Coord));
    }
    for col in 0..8 {
        let id = PieceId(pieces.len());
        pieces.push(Piece::new(id, PieceType::Pawn, player, pawn_row, col));
    }
}

enum Edge {
    South,
    North,
    West,
    East,
}

/// Each player on a four-player board occupies a 2-row (or 2-col) band on
/// their edge (spec.md §4.1). We lay the back rank on the outer row/col of
/// the band and pawns on the inner row/col, mirroring the standard-board
/// convention of "back rank behind pawns, from the owner's perspective".
fn push_band_side(pieces: &mut Vec<Piece>, player: Player, edge: Edge) {
    let layout = back_rank_layout();
    match edge {
        Edge::South => {
            for (col, piece_type) in layout.into_iter().enumerate() {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, piece_type, player, 11, col as Coord + 2));
            }
            for col in 0..8 {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, PieceType::Pawn, player, 10, col + 2));
            }
        }
        Edge::North => {
            for (col, piece_type) in layout.into_iter().enumerate() {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, piece_type, player, 0, col as Coord + 2));
            }
            for col in 0..8 {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, PieceType::Pawn, player, 1, col + 2));
            }
        }
        Edge::West => {
            for (row, piece_type) in layout.into_iter().enumerate() {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, piece_type, player, row as Coord + 2, 0));
            }
            for row in 0..8 {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, PieceType::Pawn, player, row + 2, 1));
            }
        }
        Edge::East => {
            for (row, piece_type) in layout.into_iter().enumerate() {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, piece_type, player, row as Coord + 2, 11));
            }
            for row in 0..8 {
                let id = PieceId(pieces.len());
                pieces.push(Piece::new(id, PieceType::Pawn, player, row + 2, 10));
            }
        }
    }
}
