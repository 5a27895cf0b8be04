//! Player-facing rendering of a game.

use crate::board::{BOARD_SIZE, Cell};
use crate::game::Seat;
use crate::state::GameSnapshot;
use serde::{Deserialize, Serialize};

/// Price multiplier of a cell with no bonus.
pub const UNSET_PRICE: i32 = -1;

/// What one player is shown of a game.
///
/// `letters` and `prices` are row-major 15×15 grids. Only the requesting
/// seat's hand and score are included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// One-character cell strings, `" "` when empty.
    pub letters: Vec<Vec<String>>,
    /// Per-cell price multipliers.
    pub prices: Vec<Vec<i32>>,
    /// The requester's hand.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tiles: Option<Vec<String>>,
    /// The requester's score.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub score: Option<u32>,
}

impl GameView {
    /// Renders a snapshot for the given seat, or for an observer when `None`.
    pub fn for_seat(snapshot: &GameSnapshot, seat: Option<Seat>) -> Self {
        let letters = snapshot
            .board()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Occupied(letter) => letter.to_string(),
                        Cell::Empty => " ".to_string(),
                    })
                    .collect()
            })
            .collect();

        let slot = seat.and_then(|seat| snapshot.player(seat));
        Self {
            letters,
            prices: vec![vec![UNSET_PRICE; BOARD_SIZE]; BOARD_SIZE],
            tiles: slot.map(|slot| slot.hand().iter().map(ToString::to_string).collect()),
            score: slot.map(|slot| *slot.score()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::config::GameConfig;
    use crate::letter::letters_from_str;
    use crate::oracle::AcceptAll;
    use crate::state::GameState;

    fn snapshot() -> GameSnapshot {
        let mut state = GameState::new(&GameConfig::default().with_seed(4)).unwrap();
        state
            .try_place(&[Coord::new(0, 0), Coord::new(0, 1)], &letters_from_str("Я*"), &AcceptAll)
            .unwrap();
        state.submit();
        state.fill_hand(Seat(1)).unwrap();
        state.snapshot()
    }

    #[test]
    fn test_grid_rendering() {
        let view = GameView::for_seat(&snapshot(), Some(Seat(1)));
        assert_eq!(view.letters.len(), 15);
        assert!(view.letters.iter().all(|row| row.len() == 15));
        assert_eq!(view.letters[0][0], "Я");
        assert_eq!(view.letters[0][1], "*");
        assert_eq!(view.letters[0][2], " ");
        assert!(view.prices.iter().flatten().all(|&p| p == -1));
    }

    #[test]
    fn test_only_requesters_hand() {
        let snapshot = snapshot();
        let mine = GameView::for_seat(&snapshot, Some(Seat(1)));
        assert_eq!(mine.tiles.as_ref().map(Vec::len), Some(7));
        assert_eq!(mine.score, Some(0));

        let other = GameView::for_seat(&snapshot, Some(Seat(0)));
        assert_eq!(other.tiles, Some(Vec::new()));

        let observer = GameView::for_seat(&snapshot, None);
        assert!(observer.tiles.is_none());
        assert!(observer.score.is_none());
    }

    #[test]
    fn test_json_shape() {
        let view = GameView::for_seat(&snapshot(), None);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("tiles").is_none());
        assert_eq!(json["letters"][0][0], "Я");
        assert_eq!(json["prices"][14][14], -1);
    }
}
