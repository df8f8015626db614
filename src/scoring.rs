//! Bull/cow comparison, the positional hint set and per-round letter credit.
//!
//! Both the guess and the hidden word are isograms, so a letter can match at
//! most one position and a plain membership test is enough for cows.

use std::collections::HashMap;
use std::fmt;

/// Points for a letter the first time it shows up as a cow.
pub const COW_POINTS: i32 = 1;
/// Points for a letter the first time it lands in the right place.
pub const BULL_POINTS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BullCowCount {
    pub bulls: usize,
    pub cows: usize,
}

impl BullCowCount {
    #[must_use]
    pub fn new(bulls: usize, cows: usize) -> Self {
        Self { bulls, cows }
    }
}

/// Letters confirmed in position during the current round.
///
/// Only grows within a round; `clear` starts a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HintSet {
    slots: Vec<Option<char>>,
}

impl HintSet {
    #[must_use]
    pub fn new(word_length: usize) -> Self {
        Self {
            slots: vec![None; word_length],
        }
    }

    /// Forget every confirmed letter, sized for a word of `word_length`.
    pub fn clear(&mut self, word_length: usize) {
        self.slots.clear();
        self.slots.resize(word_length, None);
    }

    /// Record `letter` as confirmed at `position`. Out-of-range positions are ignored.
    pub fn confirm(&mut self, position: usize, letter: char) {
        if let Some(slot) = self.slots.get_mut(position) {
            *slot = Some(letter);
        }
    }

    #[must_use]
    pub fn letter_at(&self, position: usize) -> Option<char> {
        self.slots.get(position).copied().flatten()
    }

    /// Number of positions with a confirmed letter.
    #[must_use]
    pub fn known(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known() == 0
    }

    #[must_use]
    pub fn covers_all(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.slots.len()
    }
}

impl fmt::Display for HintSet {
    /// Renders as `c _ t`: confirmed letters in place, `_` elsewhere.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", slot.unwrap_or('_'))?;
        }
        Ok(())
    }
}

/// Credit level already paid out for a letter of the hidden word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Credit {
    None,
    Cow,
    Bull,
}

impl Credit {
    fn value(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Cow => COW_POINTS,
            Self::Bull => BULL_POINTS,
        }
    }
}

/// Tracks which letters of the hidden word have been paid for, so resubmitting
/// the same guess earns nothing.
#[derive(Debug, Clone, Default)]
pub struct PointMap {
    credits: HashMap<char, Credit>,
}

impl PointMap {
    #[must_use]
    pub fn for_word(hidden_word: &str) -> Self {
        Self {
            credits: hidden_word.chars().map(|c| (c, Credit::None)).collect(),
        }
    }

    /// Award points for one guess. Each letter pays at most up to its best
    /// credit level; upgrading a cow to a bull pays the difference.
    pub fn award(&mut self, guess: &str, hidden_word: &str) -> i32 {
        let mut earned = 0;
        for (g, h) in guess.chars().zip(hidden_word.chars()) {
            let reached = if g == h {
                Credit::Bull
            } else if hidden_word.contains(g) {
                Credit::Cow
            } else {
                continue;
            };
            if let Some(credit) = self.credits.get_mut(&g)
                && reached > *credit
            {
                earned += reached.value() - credit.value();
                *credit = reached;
            }
        }
        earned
    }

    /// Most points this word can still pay out.
    #[must_use]
    pub fn remaining(&self) -> i32 {
        self.credits
            .values()
            .map(|credit| Credit::Bull.value() - credit.value())
            .sum()
    }
}

/// Compare a guess to the hidden word, recording bulls in `hints`.
#[must_use]
pub fn score(guess: &str, hidden_word: &str, hints: &mut HintSet) -> BullCowCount {
    let mut count = BullCowCount::default();
    for (i, (g, h)) in guess.chars().zip(hidden_word.chars()).enumerate() {
        if g == h {
            count.bulls += 1;
            hints.confirm(i, g);
        } else if hidden_word.contains(g) {
            count.cows += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_fresh(guess: &str, hidden: &str) -> BullCowCount {
        let mut hints = HintSet::new(hidden.len());
        score(guess, hidden, &mut hints)
    }

    #[test]
    fn test_score_exact_match() {
        assert_eq!(score_fresh("cat", "cat"), BullCowCount::new(3, 0));
        assert_eq!(score_fresh("planets", "planets"), BullCowCount::new(7, 0));
    }

    #[test]
    fn test_score_all_cows() {
        assert_eq!(score_fresh("atc", "cat"), BullCowCount::new(0, 3));
        // 'a' sits in the middle of both words
        assert_eq!(score_fresh("tac", "cat"), BullCowCount::new(1, 2));
    }

    #[test]
    fn test_score_partial() {
        assert_eq!(score_fresh("cow", "cat"), BullCowCount::new(1, 0));
        assert_eq!(score_fresh("act", "cat"), BullCowCount::new(1, 2));
        assert_eq!(score_fresh("dog", "cat"), BullCowCount::new(0, 0));
    }

    #[test]
    fn test_score_never_exceeds_length() {
        let hidden = "planet";
        for guess in ["planet", "tenalp", "bridge", "plains", "lapten"] {
            let count = score_fresh(guess, hidden);
            assert!(count.bulls + count.cows <= hidden.len(), "{guess}: {count:?}");
        }
    }

    #[test]
    fn test_score_records_hints() {
        let mut hints = HintSet::new(3);
        let _ = score("cow", "cat", &mut hints);
        assert_eq!(hints.letter_at(0), Some('c'));
        assert_eq!(hints.known(), 1);
        assert_eq!(hints.to_string(), "c _ _");
    }

    #[test]
    fn test_hints_only_grow_within_round() {
        let mut hints = HintSet::new(3);
        let _ = score("cow", "cat", &mut hints);
        let _ = score("bat", "cat", &mut hints);
        assert_eq!(hints.to_string(), "c a t");
        // A worse guess does not remove anything
        let _ = score("dog", "cat", &mut hints);
        assert_eq!(hints.known(), 3);
        assert!(hints.covers_all());
    }

    #[test]
    fn test_hint_clear() {
        let mut hints = HintSet::new(3);
        hints.confirm(1, 'a');
        hints.clear(5);
        assert!(hints.is_empty());
        assert_eq!(hints.word_length(), 5);
        assert_eq!(hints.to_string(), "_ _ _ _ _");
    }

    #[test]
    fn test_hint_confirm_out_of_range_ignored() {
        let mut hints = HintSet::new(2);
        hints.confirm(7, 'z');
        assert!(hints.is_empty());
        assert!(!HintSet::default().covers_all());
    }

    #[test]
    fn test_point_map_pays_once() {
        let mut points = PointMap::for_word("cat");
        assert_eq!(points.award("cow", "cat"), BULL_POINTS);
        assert_eq!(points.award("cow", "cat"), 0);
    }

    #[test]
    fn test_point_map_cow_upgrade_pays_difference() {
        let mut points = PointMap::for_word("cat");
        assert_eq!(points.award("atc", "cat"), 3 * COW_POINTS);
        // 'a' moves from cow to bull
        assert_eq!(points.award("bat", "cat"), 2 * (BULL_POINTS - COW_POINTS));
        assert_eq!(points.remaining(), BULL_POINTS - COW_POINTS);
    }

    #[test]
    fn test_point_map_more_bulls_never_pay_less() {
        let fresh = || PointMap::for_word("planet");
        let guesses = ["tenalp", "pnalet", "planes", "planet"];
        let mut earned: Vec<(usize, i32)> = guesses
            .iter()
            .map(|g| {
                let mut hints = HintSet::new(6);
                (score(g, "planet", &mut hints).bulls, fresh().award(g, "planet"))
            })
            .collect();
        earned.sort_unstable();
        for pair in earned.windows(2) {
            if pair[1].0 > pair[0].0 {
                assert!(pair[1].1 >= pair[0].1, "{earned:?}");
            }
        }
    }

    #[test]
    fn test_point_map_remaining_full_word() {
        assert_eq!(PointMap::for_word("cat").remaining(), 3 * BULL_POINTS);
    }
}
