//! Letter values and word scoring.

use crate::letter::Letter;
use tracing::instrument;

/// Point value of a single tile.
///
/// Wildcards and symbols outside the alphabet are worth nothing.
pub fn letter_value(letter: Letter) -> u32 {
    let Letter::Char(c) = letter else {
        return 0;
    };
    match c {
        'А' | 'Е' | 'И' | 'Н' | 'О' => 1,
        'В' | 'Д' | 'Й' | 'К' | 'Л' | 'М' | 'П' | 'Р' | 'С' | 'Т' => 2,
        'Б' | 'Г' | 'У' | 'Я' => 3,
        'Ж' | 'З' | 'Х' | 'Ч' | 'Ы' | 'Ь' => 5,
        'Ф' | 'Ц' | 'Ш' | 'Щ' | 'Ъ' | 'Э' | 'Ю' => 10,
        _ => 0,
    }
}

/// Sums the letter values of a word.
#[instrument(level = "trace")]
pub fn score_word(word: &[Letter]) -> u32 {
    word.iter().copied().map(letter_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::letters_from_str;

    #[test]
    fn test_simple_word() {
        assert_eq!(score_word(&letters_from_str("АБ")), 4);
    }

    #[test]
    fn test_wildcard_is_free() {
        // В = 2, Я = 3
        assert_eq!(score_word(&letters_from_str("В*Я")), 5);
    }

    #[test]
    fn test_unknown_symbol_is_free() {
        assert_eq!(letter_value(Letter::Char('Q')), 0);
        assert_eq!(letter_value(Letter::Char('Ё')), 0);
        assert_eq!(score_word(&letters_from_str("ЩQ")), 10);
    }

    #[test]
    fn test_full_table() {
        let alphabet = "АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ";
        let values = [
            1, 3, 2, 3, 2, 1, 5, 5, 1, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 3, 10, 5, 10, 5, 10, 10, 10, 5,
            5, 10, 10, 3,
        ];
        assert_eq!(alphabet.chars().count(), values.len());
        for (c, value) in alphabet.chars().zip(values) {
            assert_eq!(letter_value(Letter::Char(c)), value, "value of {c}");
        }
    }

    #[test]
    fn test_empty_word() {
        assert_eq!(score_word(&[]), 0);
    }
}
