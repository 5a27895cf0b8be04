//! Error types for placement and game operations.

use crate::board::Coord;
use crate::game::{GameId, PlayerId, Seat};

/// A placement rejected before any word is looked up.
///
/// Rejections leave the committed board untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// Coordinate and letter counts differ.
    #[display("Got {} coordinates but {} letters", coords, letters)]
    SizeMismatch {
        /// Number of coordinates supplied.
        coords: usize,
        /// Number of letters supplied.
        letters: usize,
    },

    /// No tiles were placed.
    #[display("Placement contains no tiles")]
    EmptyPlacement,

    /// A coordinate lies outside the board.
    #[display("Coordinate {} is outside the board", _0)]
    OutOfBounds(Coord),

    /// A coordinate targets a cell that is already taken.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Coord),

    /// The tiles do not share a row or a column.
    #[display("Tiles are not in line")]
    NotAligned,

    /// The covered span has an empty cell in it.
    #[display("Tiles leave a gap at {}", _0)]
    NotContiguous(Coord),

    /// None of the tiles touches a tile already on the board.
    #[display("Tiles do not touch any tile on the board")]
    NotConnected,

    /// The placing seat does not hold the letters it tried to play.
    #[display("{} does not hold the placed tiles", _0)]
    TilesNotInHand(Seat),
}

impl std::error::Error for PlacementError {}

/// Error raised by game, registry, and action-handler operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The placement was structurally illegal.
    #[display("Invalid placement: {}", _0)]
    Placement(PlacementError),

    /// A seat index beyond the configured seats.
    #[display("{} is out of range ({} seats)", seat, seats)]
    SeatOutOfRange {
        /// Requested seat.
        seat: Seat,
        /// Configured seat count.
        seats: usize,
    },

    /// A roster longer than the configured seats.
    #[display("Roster of {} players exceeds {} seats", players, seats)]
    TooManyPlayers {
        /// Roster length.
        players: usize,
        /// Configured seat count.
        seats: usize,
    },

    /// No game is registered under the id.
    #[display("Game {} does not exist", _0)]
    GameNotFound(GameId),

    /// The player is not on the game's roster.
    #[display("Player {} has not joined the game", _0)]
    NotJoined(PlayerId),

    /// An action name the handler does not know.
    #[display("Unsupported action {:?}", _0)]
    UnsupportedAction(String),

    /// A request body that could not be parsed.
    #[display("Malformed request: {}", _0)]
    MalformedRequest(String),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::Placement(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_messages() {
        let err = PlacementError::SizeMismatch { coords: 2, letters: 3 };
        assert_eq!(err.to_string(), "Got 2 coordinates but 3 letters");

        let err = PlacementError::Occupied(Coord::new(4, 7));
        assert_eq!(err.to_string(), "Cell (4, 7) is already occupied");
    }

    #[test]
    fn test_game_error_wraps_placement() {
        let err: GameError = PlacementError::NotAligned.into();
        assert_eq!(err, GameError::Placement(PlacementError::NotAligned));
        assert_eq!(err.to_string(), "Invalid placement: Tiles are not in line");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_seat_errors() {
        let err = GameError::SeatOutOfRange {
            seat: Seat(3),
            seats: 2,
        };
        assert_eq!(err.to_string(), "Seat 3 is out of range (2 seats)");
    }
}
