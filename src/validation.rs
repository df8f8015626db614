use std::collections::HashSet;
use std::fmt;

/// Outcome of checking a guess before it may be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessStatus {
    Ok,
    WrongLength,
    NotLowercase,
    NotIsogram,
}

impl fmt::Display for GuessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::WrongLength => write!(f, "wrong length"),
            Self::NotLowercase => write!(f, "not lowercase"),
            Self::NotIsogram => write!(f, "not an isogram"),
        }
    }
}

/// True when no letter appears twice. The empty word counts as an isogram.
#[must_use]
pub fn is_isogram(word: &str) -> bool {
    let mut seen = HashSet::new();
    word.chars().all(|c| seen.insert(c))
}

/// True when every character is an ASCII lower-case letter.
#[must_use]
pub fn is_lowercase_word(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_lowercase())
}

/// Check a guess against the hidden word length.
///
/// Exactly one status is reported. Checks run in a fixed order: length, then
/// case, then isogram.
#[must_use]
pub fn validate(guess: &str, hidden_word_length: usize) -> GuessStatus {
    if guess.chars().count() != hidden_word_length {
        GuessStatus::WrongLength
    } else if !is_lowercase_word(guess) {
        GuessStatus::NotLowercase
    } else if !is_isogram(guess) {
        GuessStatus::NotIsogram
    } else {
        GuessStatus::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_isogram() {
        assert!(is_isogram("planet"));
        assert!(is_isogram("cat"));
        assert!(is_isogram(""));
        assert!(!is_isogram("kitten"));
        assert!(!is_isogram("aa"));
    }

    #[test]
    fn test_is_lowercase_word() {
        assert!(is_lowercase_word("cat"));
        assert!(!is_lowercase_word("Cat"));
        assert!(!is_lowercase_word("c4t"));
        assert!(!is_lowercase_word("c t"));
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(validate("cat", 3), GuessStatus::Ok);
        assert_eq!(validate("planets", 7), GuessStatus::Ok);
    }

    #[test]
    fn test_validate_wrong_length() {
        assert_eq!(validate("ca", 3), GuessStatus::WrongLength);
        assert_eq!(validate("cats", 3), GuessStatus::WrongLength);
        assert_eq!(validate("", 3), GuessStatus::WrongLength);
    }

    #[test]
    fn test_validate_not_lowercase() {
        assert_eq!(validate("CAT", 3), GuessStatus::NotLowercase);
        assert_eq!(validate("c4t", 3), GuessStatus::NotLowercase);
    }

    #[test]
    fn test_validate_not_isogram() {
        assert_eq!(validate("too", 3), GuessStatus::NotIsogram);
        assert_eq!(validate("kitten", 6), GuessStatus::NotIsogram);
    }

    #[test]
    fn test_validate_priority_is_fixed() {
        // Too short, upper case and repeated letters all at once
        for _ in 0..3 {
            assert_eq!(validate("AA", 3), GuessStatus::WrongLength);
        }
        // Right length, upper case and repeated letters
        assert_eq!(validate("AAB", 3), GuessStatus::NotLowercase);
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        assert_eq!(validate("café", 4), GuessStatus::NotLowercase);
    }
}
