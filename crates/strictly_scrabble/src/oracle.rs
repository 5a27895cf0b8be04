//! The word-validity oracle injected into each game.

use crate::letter::Letter;

/// Decides whether a letter sequence is a legal word.
///
/// Implementations must be side-effect free and fast: the oracle is called
/// while the game lock is held, once per extracted word.
pub trait WordOracle: Send + Sync {
    /// Returns true when `word` is in the lexicon.
    fn is_word(&self, word: &[Letter]) -> bool;
}

impl<F> WordOracle for F
where
    F: Fn(&[Letter]) -> bool + Send + Sync,
{
    fn is_word(&self, word: &[Letter]) -> bool {
        self(word)
    }
}

/// Oracle that accepts every sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl WordOracle for AcceptAll {
    fn is_word(&self, _word: &[Letter]) -> bool {
        true
    }
}
