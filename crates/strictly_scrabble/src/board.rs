//! The 15x15 board and placement legality.

use crate::config::PlacementPolicy;
use crate::error::PlacementError;
use crate::letter::Letter;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Number of rows and columns.
pub const BOARD_SIZE: usize = 15;

/// A cell position, `(row, col)`, each in `[0, 15)`.
///
/// Serialized as a `[row, col]` pair.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Returns true when the coordinate lies on the board.
    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The neighbouring coordinate along `axis`, if it is on the board.
    pub fn step(self, axis: Alignment, forward: bool) -> Option<Coord> {
        let (row, col) = match (axis, forward) {
            (Alignment::Horizontal, true) => (Some(self.row), self.col.checked_add(1)),
            (Alignment::Horizontal, false) => (Some(self.row), self.col.checked_sub(1)),
            (Alignment::Vertical, true) => (self.row.checked_add(1), Some(self.col)),
            (Alignment::Vertical, false) => (self.row.checked_sub(1), Some(self.col)),
        };
        let next = Coord::new(row?, col?);
        next.in_bounds().then_some(next)
    }

    fn neighbours(self) -> impl Iterator<Item = Coord> {
        [
            self.step(Alignment::Horizontal, false),
            self.step(Alignment::Horizontal, true),
            self.step(Alignment::Vertical, false),
            self.step(Alignment::Vertical, true),
        ]
        .into_iter()
        .flatten()
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for (usize, usize) {
    fn from(c: Coord) -> Self {
        (c.row, c.col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// All tiles share a row.
    Horizontal,
    /// All tiles share a column.
    Vertical,
}

impl Alignment {
    /// The crossing direction.
    pub fn perpendicular(self) -> Self {
        match self {
            Alignment::Horizontal => Alignment::Vertical,
            Alignment::Vertical => Alignment::Horizontal,
        }
    }

    /// Works out the line shared by every coordinate.
    ///
    /// A single tile counts as horizontal. Returns `None` when the
    /// coordinates share neither a row nor a column.
    pub fn of(coords: &[Coord]) -> Option<Self> {
        let first = coords.first()?;
        if coords.iter().all(|c| c.row == first.row) {
            Some(Alignment::Horizontal)
        } else if coords.iter().all(|c| c.col == first.col) {
            Some(Alignment::Vertical)
        } else {
            None
        }
    }

    fn index(self, coord: Coord) -> usize {
        match self {
            Alignment::Horizontal => coord.col,
            Alignment::Vertical => coord.row,
        }
    }

    fn at(self, anchor: Coord, index: usize) -> Coord {
        match self {
            Alignment::Horizontal => Coord::new(anchor.row, index),
            Alignment::Vertical => Coord::new(index, anchor.col),
        }
    }
}

/// A board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing placed yet.
    #[default]
    Empty,
    /// A committed tile; never changes again.
    Occupied(Letter),
}

/// The game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; BOARD_SIZE * BOARD_SIZE],
        }
    }

    /// Gets the cell at the coordinate, `None` off the board.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        coord
            .in_bounds()
            .then(|| self.cells[coord.row * BOARD_SIZE + coord.col])
    }

    /// The letter at the coordinate, if any.
    pub fn letter_at(&self, coord: Coord) -> Option<Letter> {
        match self.get(coord)? {
            Cell::Occupied(letter) => Some(letter),
            Cell::Empty => None,
        }
    }

    /// Returns true when the coordinate is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Cell::Empty))
    }

    /// Returns true when no tile has been placed.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| *c == Cell::Empty)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIZE)
    }

    /// Puts a tile on an empty cell.
    ///
    /// Occupied cells are never overwritten.
    pub fn place(&mut self, coord: Coord, letter: Letter) -> Result<(), PlacementError> {
        if !coord.in_bounds() {
            return Err(PlacementError::OutOfBounds(coord));
        }
        let cell = &mut self.cells[coord.row * BOARD_SIZE + coord.col];
        if *cell != Cell::Empty {
            return Err(PlacementError::Occupied(coord));
        }
        *cell = Cell::Occupied(letter);
        Ok(())
    }

    /// Checks a proposed placement against this (committed) board.
    ///
    /// Checks run in order and the first failure wins: matching lengths,
    /// non-empty, on the board, no collisions (with committed tiles or with
    /// each other), one shared row or column. [`PlacementPolicy::Connected`]
    /// adds the gap and connection checks.
    ///
    /// On success the returned [`Placement`] carries the hypothetical board
    /// with the new tiles on it; `self` is never modified.
    #[instrument(skip(self))]
    pub fn validate_placement(
        &self,
        coords: &[Coord],
        letters: &[Letter],
        policy: PlacementPolicy,
    ) -> Result<Placement, PlacementError> {
        if coords.len() != letters.len() {
            return Err(PlacementError::SizeMismatch {
                coords: coords.len(),
                letters: letters.len(),
            });
        }
        if coords.is_empty() {
            return Err(PlacementError::EmptyPlacement);
        }
        if let Some(&coord) = coords.iter().find(|c| !c.in_bounds()) {
            return Err(PlacementError::OutOfBounds(coord));
        }

        let mut board = self.clone();
        for (&coord, &letter) in coords.iter().zip(letters) {
            board.place(coord, letter)?;
        }

        let alignment = Alignment::of(coords).ok_or(PlacementError::NotAligned)?;

        if policy == PlacementPolicy::Connected {
            self.check_connected(&board, coords, alignment)?;
        }

        Ok(Placement {
            tiles: coords.iter().copied().zip(letters.iter().copied()).collect(),
            alignment,
            board,
        })
    }

    fn check_connected(
        &self,
        hypothetical: &Board,
        coords: &[Coord],
        alignment: Alignment,
    ) -> Result<(), PlacementError> {
        let anchor = coords[0];
        let (lo, hi) = coords
            .iter()
            .map(|&c| alignment.index(c))
            .fold((usize::MAX, 0), |(lo, hi), i| (lo.min(i), hi.max(i)));

        if let Some(gap) = (lo..=hi)
            .map(|i| alignment.at(anchor, i))
            .find(|&c| hypothetical.is_empty(c))
        {
            warn!(%gap, "Placement leaves a gap");
            return Err(PlacementError::NotContiguous(gap));
        }

        if self.is_blank() {
            return Ok(());
        }
        let touches = coords
            .iter()
            .flat_map(|c| c.neighbours())
            .any(|n| self.letter_at(n).is_some());
        if touches {
            Ok(())
        } else {
            warn!("Placement does not touch existing tiles");
            Err(PlacementError::NotConnected)
        }
    }

    /// Formats the board as a human-readable grid, `.` for empty cells.
    pub fn display(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => '.',
                        Cell::Occupied(letter) => letter.symbol(),
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A structurally legal placement, not yet committed.
#[derive(Debug, Clone, Getters)]
pub struct Placement {
    /// Placed tiles in the order they were given.
    tiles: Vec<(Coord, Letter)>,
    /// Line shared by the tiles.
    alignment: Alignment,
    /// Committed board plus the placed tiles.
    board: Board,
}

impl Placement {
    /// Coordinates of the placed tiles, in order.
    pub fn coords(&self) -> Vec<Coord> {
        self.tiles.iter().map(|(c, _)| *c).collect()
    }
}
