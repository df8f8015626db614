use crate::debug_log;
use crate::validation::{is_isogram, is_lowercase_word};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::fmt;

/// Shortest hidden word.
pub const MIN_WORD_LENGTH: usize = 3;
/// Longest hidden word of the main game.
pub const MAX_WORD_LENGTH: usize = 7;
/// Length used by the bonus round, one past the main game.
pub const BONUS_WORD_LENGTH: usize = 8;

const WORDS_3: &[&str] = &[
    "cat", "dog", "sun", "pig", "cow", "fox", "owl", "bat", "map", "cup", "hat", "jam", "key",
    "log", "net", "pen", "rub", "sky", "ten", "web",
];
const WORDS_4: &[&str] = &[
    "lamb", "fish", "crab", "wolf", "duck", "frog", "goat", "hike", "jump", "mild", "nose", "park",
    "quiz", "ruby", "salt", "tide", "vase", "yarn", "zinc", "bold",
];
const WORDS_5: &[&str] = &[
    "plane", "crane", "brick", "cloud", "dwarf", "flame", "ghost", "judge", "knife", "lemon",
    "mango", "night", "ocean", "piano", "quilt", "roast", "shark", "table", "vocal", "whisk",
];
const WORDS_6: &[&str] = &[
    "planet", "bridge", "candle", "dragon", "flight", "garden", "hunter", "island", "jungle",
    "market", "orchid", "pocket", "silver", "travel", "wombat", "yogurt", "basket", "forest",
    "goblin", "marble",
];
const WORDS_7: &[&str] = &[
    "planets", "blanket", "dolphin", "kingdom", "buckets", "trample", "jackpot", "wrongly",
    "picture", "mustard", "country", "display", "harvest", "journey", "lockjaw", "chapter",
    "figures", "hydrant", "sparkle", "quickly",
];
const WORDS_8: &[&str] = &[
    "stockade", "blackout", "computer", "graphite", "sunlight", "hospital", "thousand",
    "platform", "nightcap", "republic", "bachelor", "flamingo",
];

/// Error raised when a hidden word cannot be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordSourceError {
    /// The requested length is outside the supported range.
    InvalidLength(usize),
    /// A source handed back something that is not a lower-case isogram of
    /// the requested length.
    InvalidWord { word: String, length: usize },
}

impl fmt::Display for WordSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => write!(
                f,
                "Word length must be between {MIN_WORD_LENGTH} and {BONUS_WORD_LENGTH}, got {len}"
            ),
            Self::InvalidWord { word, length } => write!(
                f,
                "'{word}' is not a lower-case isogram of {length} letters"
            ),
        }
    }
}

impl std::error::Error for WordSourceError {}

/// True when `length` can be requested from a word source.
#[must_use]
pub fn is_supported_length(length: usize) -> bool {
    (MIN_WORD_LENGTH..=BONUS_WORD_LENGTH).contains(&length)
}

/// Check that `word` may serve as the hidden word for `length`.
///
/// # Errors
/// Returns `WordSourceError::InvalidWord` for a wrong length, a non lower-case
/// letter, or a repeated letter.
pub fn check_hidden_word(word: &str, length: usize) -> Result<(), WordSourceError> {
    if word.chars().count() == length && is_lowercase_word(word) && is_isogram(word) {
        Ok(())
    } else {
        Err(WordSourceError::InvalidWord {
            word: word.to_string(),
            length,
        })
    }
}

/// Provider of hidden words.
pub trait WordSource {
    /// Pick a hidden word of exactly `length` letters.
    ///
    /// # Errors
    /// Returns `WordSourceError::InvalidLength` when `length` is unsupported.
    fn hidden_word(&mut self, length: usize) -> Result<String, WordSourceError>;
}

/// Embedded isograms for `length`, or `None` when the length is unsupported.
#[must_use]
pub fn embedded_words(length: usize) -> Option<&'static [&'static str]> {
    match length {
        3 => Some(WORDS_3),
        4 => Some(WORDS_4),
        5 => Some(WORDS_5),
        6 => Some(WORDS_6),
        7 => Some(WORDS_7),
        8 => Some(WORDS_8),
        _ => None,
    }
}

/// Picks uniformly from the embedded isogram lists.
///
/// The generator is seeded once, when the dictionary is created.
pub struct Dictionary {
    rng: StdRng,
}

impl Dictionary {
    /// Seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible selection for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSource for Dictionary {
    fn hidden_word(&mut self, length: usize) -> Result<String, WordSourceError> {
        let words = embedded_words(length).ok_or(WordSourceError::InvalidLength(length))?;
        let word = words
            .choose(&mut self.rng)
            .ok_or(WordSourceError::InvalidLength(length))?;
        debug_log!("Dictionary picked a {}-letter word", length);
        Ok((*word).to_string())
    }
}

/// Serves words from a fixed list, cycling through the ones of the requested
/// length in order. Useful for scripted play and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedWords {
    words: Vec<String>,
    next: usize,
}

impl FixedWords {
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl WordSource for FixedWords {
    fn hidden_word(&mut self, length: usize) -> Result<String, WordSourceError> {
        if !is_supported_length(length) {
            return Err(WordSourceError::InvalidLength(length));
        }
        let matching: Vec<&String> = self
            .words
            .iter()
            .filter(|w| w.chars().count() == length)
            .collect();
        if matching.is_empty() {
            return Err(WordSourceError::InvalidLength(length));
        }
        let word = matching[self.next % matching.len()].clone();
        self.next += 1;
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_words_are_isograms_of_their_length() {
        for length in MIN_WORD_LENGTH..=BONUS_WORD_LENGTH {
            let words = embedded_words(length).unwrap();
            assert!(!words.is_empty());
            for word in words {
                assert!(check_hidden_word(word, length).is_ok(), "{word}");
            }
        }
    }

    #[test]
    fn test_embedded_words_unsupported() {
        assert!(embedded_words(2).is_none());
        assert!(embedded_words(9).is_none());
    }

    #[test]
    fn test_dictionary_every_length() {
        let mut dict = Dictionary::with_seed(7);
        for length in MIN_WORD_LENGTH..=BONUS_WORD_LENGTH {
            let word = dict.hidden_word(length).unwrap();
            assert_eq!(word.len(), length);
            assert!(is_isogram(&word));
        }
    }

    #[test]
    fn test_dictionary_rejects_out_of_range() {
        let mut dict = Dictionary::with_seed(1);
        assert_eq!(dict.hidden_word(2), Err(WordSourceError::InvalidLength(2)));
        assert_eq!(dict.hidden_word(0), Err(WordSourceError::InvalidLength(0)));
        assert_eq!(
            dict.hidden_word(BONUS_WORD_LENGTH + 1),
            Err(WordSourceError::InvalidLength(BONUS_WORD_LENGTH + 1))
        );
    }

    #[test]
    fn test_dictionary_seed_is_reproducible() {
        let mut a = Dictionary::with_seed(42);
        let mut b = Dictionary::with_seed(42);
        for length in [3, 4, 5, 5, 6, 7] {
            assert_eq!(a.hidden_word(length), b.hidden_word(length));
        }
    }

    #[test]
    fn test_fixed_words_cycles_by_length() {
        let mut source = FixedWords::new(["cat", "lamb", "dog"]);
        assert_eq!(source.hidden_word(3).unwrap(), "cat");
        assert_eq!(source.hidden_word(3).unwrap(), "dog");
        assert_eq!(source.hidden_word(4).unwrap(), "lamb");
    }

    #[test]
    fn test_fixed_words_missing_length() {
        let mut source = FixedWords::new(["cat"]);
        assert_eq!(source.hidden_word(5), Err(WordSourceError::InvalidLength(5)));
        assert_eq!(source.hidden_word(1), Err(WordSourceError::InvalidLength(1)));
    }

    #[test]
    fn test_check_hidden_word() {
        assert!(check_hidden_word("cat", 3).is_ok());
        assert!(check_hidden_word("cats", 3).is_err());
        assert!(check_hidden_word("Cat", 3).is_err());
        assert!(check_hidden_word("too", 3).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = WordSourceError::InvalidLength(12);
        assert_eq!(err.to_string(), "Word length must be between 3 and 8, got 12");
        let err = WordSourceError::InvalidWord {
            word: "too".to_string(),
            length: 3,
        };
        assert_eq!(err.to_string(), "'too' is not a lower-case isogram of 3 letters");
    }
}
