//! Wire message shapes shared between the session runtime and whatever
//! transport a caller bolts on (spec.md §4.8, §6). No behavior lives
//! here — every type is data plus a `From` conversion out of the engine's
//! internal representation.

pub mod replay;
pub mod snapshot;

pub use replay::Replay;
pub use snapshot::{CooldownView, MoveView, PieceView, Snapshot, WireEvent};

use engine::{Player, Winner};

/// The wire encoding of [`engine::Winner`] spec.md §3 and §6 describe:
/// "nullable player id, `0` meaning draw". Kept as its own newtype instead
/// of folding the mapping into `serde` attributes on `Winner` itself, so
/// the engine crate's own (de)serialization — used in its unit tests —
/// stays the plain, typed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WireWinner(pub u8);

impl From<Winner> for WireWinner {
    fn from(winner: Winner) -> Self {
        match winner {
            Winner::Draw => WireWinner(0),
            Winner::Player(Player(n)) => WireWinner(n),
        }
    }
}

impl WireWinner {
    /// Inverse of the `From<Winner>` conversion. Returns `None` when `raw`
    /// doesn't correspond to either a draw or a seat on `board_type`'s
    /// board — a malformed replay or snapshot.
    pub fn into_winner(self, board_type: engine::BoardType) -> Option<Winner> {
        if self.0 == 0 {
            Some(Winner::Draw)
        } else if self.0 <= board_type.player_count() {
            Some(Winner::Player(Player::new(self.0)))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::BoardType;

    #[test]
    fn draw_round_trips_through_zero() {
        let wire: WireWinner = Winner::Draw.into();
        assert_eq!(wire, WireWinner(0));
        assert_eq!(wire.into_winner(BoardType::Standard8x8), Some(Winner::Draw));
    }

    #[test]
    fn player_round_trips_through_its_seat_number() {
        let wire: WireWinner = Winner::Player(Player::new(2)).into();
        assert_eq!(wire, WireWinner(2));
        assert_eq!(
            wire.into_winner(BoardType::Standard8x8),
            Some(Winner::Player(Player::new(2)))
        );
    }

    #[test]
    fn an_out_of_range_seat_number_is_rejected() {
        let wire = WireWinner(5);
        assert_eq!(wire.into_winner(BoardType::Standard8x8), None);
    }
}
