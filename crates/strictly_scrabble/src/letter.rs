//! Letters, the Cyrillic alphabet, and the canonical tile deck.

use serde::{Deserialize, Serialize};

/// Symbol used for a wildcard tile on the wire and in hands.
pub const WILDCARD_SYMBOL: char = '*';

/// Number of tiles in the canonical bag, wildcards included.
pub const CANONICAL_BAG_SIZE: usize = 131;

/// Number of wildcards in the canonical bag.
pub const CANONICAL_WILDCARDS: usize = 3;

/// Physical tile counts of the canonical deck (128 lettered tiles).
pub const CANONICAL_FREQUENCIES: [(char, usize); 32] = [
    ('А', 10),
    ('Б', 3),
    ('В', 5),
    ('Г', 3),
    ('Д', 5),
    ('Е', 9),
    ('Ж', 2),
    ('З', 2),
    ('И', 8),
    ('Й', 4),
    ('К', 6),
    ('Л', 4),
    ('М', 5),
    ('Н', 8),
    ('О', 10),
    ('П', 6),
    ('Р', 6),
    ('С', 6),
    ('Т', 5),
    ('У', 3),
    ('Ф', 1),
    ('Х', 2),
    ('Ц', 1),
    ('Ч', 2),
    ('Ш', 1),
    ('Щ', 1),
    ('Ъ', 1),
    ('Ы', 2),
    ('Ь', 2),
    ('Э', 1),
    ('Ю', 1),
    ('Я', 3),
];

/// A tile face: a letter of the alphabet or a wildcard.
///
/// Serialized as a single character, `*` for the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "char", into = "char")]
pub enum Letter {
    /// A concrete letter.
    Char(char),
    /// A blank tile standing in for any letter, worth nothing.
    Wildcard,
}

impl Letter {
    /// Returns true for the wildcard tile.
    pub fn is_wildcard(self) -> bool {
        matches!(self, Letter::Wildcard)
    }

    /// Returns the character shown for this tile.
    pub fn symbol(self) -> char {
        match self {
            Letter::Char(c) => c,
            Letter::Wildcard => WILDCARD_SYMBOL,
        }
    }
}

impl From<char> for Letter {
    fn from(c: char) -> Self {
        if c == WILDCARD_SYMBOL {
            Letter::Wildcard
        } else {
            Letter::Char(c)
        }
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.symbol()
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Splits a UTF-8 string into letters, one per code point.
pub fn letters_from_str(s: &str) -> Vec<Letter> {
    s.chars().map(Letter::from).collect()
}

/// Renders a letter sequence back into a string.
pub fn word_to_string(word: &[Letter]) -> String {
    word.iter().map(|l| l.symbol()).collect()
}

/// The 128 lettered tiles of the canonical deck, in alphabet order.
pub fn canonical_deck() -> Vec<Letter> {
    CANONICAL_FREQUENCIES
        .iter()
        .flat_map(|&(c, count)| std::iter::repeat_n(Letter::Char(c), count))
        .collect()
}
