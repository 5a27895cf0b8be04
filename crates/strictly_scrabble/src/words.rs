//! Word extraction from a hypothetical board.

use crate::board::{Alignment, Board, Coord};
use crate::letter::Letter;
use tracing::{instrument, trace};

/// Collects every word a move forms.
///
/// The main word runs along `alignment` through the first placed tile; each
/// placed tile also contributes its crossing word in the perpendicular
/// direction. Sequences of one letter are dropped.
#[instrument(skip(board))]
pub fn extract_words(board: &Board, coords: &[Coord], alignment: Alignment) -> Vec<Vec<Letter>> {
    let Some(&first) = coords.first() else {
        return Vec::new();
    };

    let mut words = Vec::with_capacity(coords.len() + 1);
    words.push(scan(board, first, alignment));
    words.extend(
        coords
            .iter()
            .map(|&coord| scan(board, coord, alignment.perpendicular())),
    );
    words.retain(|w| w.len() > 1);

    trace!(count = words.len(), "Extracted words");
    words
}

/// Reads the run of tiles through `origin` along `axis`.
fn scan(board: &Board, origin: Coord, axis: Alignment) -> Vec<Letter> {
    let Some(centre) = board.letter_at(origin) else {
        return Vec::new();
    };

    let mut word = walk(board, origin, axis, false);
    word.reverse();
    word.push(centre);
    word.extend(walk(board, origin, axis, true));
    word
}

fn walk(board: &Board, origin: Coord, axis: Alignment, forward: bool) -> Vec<Letter> {
    std::iter::successors(origin.step(axis, forward), |c| c.step(axis, forward))
        .map_while(|c| board.letter_at(c))
        .collect()
}
