//! Game rules engine.
//!
//! `BullCowGame` owns the hidden word, the try counter, the point total and the
//! session progression. It performs no I/O; a view drives it through
//! `game_state::game_loop`.
//!
//! # State Machine
//! - `Playing`/`BonusActive` → `RoundWon` | `RoundLost` (on `submit_valid_guess`)
//! - `RoundWon`/`RoundLost` → `AwaitingContinue` | `BonusOffered` | `BonusCompleted` | `GameOver`
//!   (on `resolve_round`)
//! - waiting phases → `Playing` | `BonusActive` | `GameOver` (on `answer`)
//!
//! Calls made in the wrong phase end the session with `GameOutcome::Aborted`.

use crate::scoring::{BullCowCount, HintSet, PointMap, score};
use crate::validation::{GuessStatus, validate};
use crate::wordbank::{
    BONUS_WORD_LENGTH, Dictionary, MAX_WORD_LENGTH, MIN_WORD_LENGTH, WordSource, WordSourceError,
    check_hidden_word, is_supported_length,
};
use crate::{debug_log, info_log};
use log::warn;
use std::collections::BTreeMap;

/// Points per letter for guessing the word.
pub const WIN_POINTS_PER_LETTER: i32 = 2;
/// Points per letter lost when a round runs out of tries.
pub const LOSS_PENALTY_PER_LETTER: i32 = 3;

/// Why a session was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    /// The point total dropped to zero or below.
    OutOfPoints,
    /// Points remain but a round that had to be won was lost.
    WordsRemaining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost(LossReason),
    /// The player declined to go on to the next word.
    Quit,
    /// A call arrived in a phase that does not accept it.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    RoundWon,
    RoundLost,
    AwaitingContinue,
    BonusOffered,
    BonusActive,
    BonusCompleted,
    GameOver(GameOutcome),
}

/// Whether each main-game word length has been guessed at least once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMap {
    completed: BTreeMap<usize, bool>,
}

impl CompletionMap {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: (MIN_WORD_LENGTH..=MAX_WORD_LENGTH)
                .map(|len| (len, false))
                .collect(),
        }
    }

    /// Lengths outside the main game are ignored.
    pub fn mark(&mut self, length: usize) {
        if let Some(done) = self.completed.get_mut(&length) {
            *done = true;
        }
    }

    #[must_use]
    pub fn is_completed(&self, length: usize) -> bool {
        self.completed.get(&length).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.completed.values().all(|&done| done)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.values().filter(|&&done| done).count()
    }
}

impl Default for CompletionMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Tries allowed for a word of `length` letters.
#[must_use]
pub fn max_tries_for(length: usize) -> u32 {
    match length {
        0..=3 => 4,
        4 => 7,
        5 => 10,
        6 => 16,
        7 => 20,
        _ => 25,
    }
}

pub struct BullCowGame<S: WordSource = Dictionary> {
    source: S,
    hidden_word: String,
    current_try: u32,
    word_guessed: bool,
    helper: HintSet,
    point_map: PointMap,
    points: i32,
    current_word_length: usize,
    completion: CompletionMap,
    entered_bonus_round: bool,
    completed_bonus_round: bool,
    restart_after_bonus: bool,
    phase: Phase,
    terminated: bool,
}

impl<S: WordSource> BullCowGame<S> {
    /// Create a game with a zero point total and an empty completion map.
    pub fn new(source: S) -> Self {
        let mut game = Self {
            source,
            hidden_word: String::new(),
            current_try: 1,
            word_guessed: false,
            helper: HintSet::default(),
            point_map: PointMap::default(),
            points: 0,
            current_word_length: MIN_WORD_LENGTH,
            completion: CompletionMap::new(),
            entered_bonus_round: false,
            completed_bonus_round: false,
            restart_after_bonus: false,
            phase: Phase::Playing,
            terminated: false,
        };
        game.reset_player_point_total();
        game.set_game_completion_map();
        game
    }

    // Session bootstrap

    pub fn reset_player_point_total(&mut self) {
        self.points = 0;
    }

    pub fn set_game_completion_map(&mut self) {
        self.completion = CompletionMap::new();
    }

    // Round setup

    #[must_use]
    pub fn current_word_length(&self) -> usize {
        self.current_word_length
    }

    /// Ask the word source for a hidden word of `length` letters and install it.
    ///
    /// # Errors
    /// Fails for an unsupported length, or when the source returns a word that
    /// is not a lower-case isogram of that length. The previous word is kept.
    pub fn set_hidden_word_and_length(&mut self, length: usize) -> Result<(), WordSourceError> {
        if !is_supported_length(length) {
            return Err(WordSourceError::InvalidLength(length));
        }
        let word = self.source.hidden_word(length)?;
        check_hidden_word(&word, length)?;
        info_log!("New hidden word of {} letters", length);
        self.hidden_word = word;
        self.set_point_maps();
        self.reset_game_helper();
        Ok(())
    }

    /// Start per-letter point bookkeeping for the current hidden word.
    pub fn set_point_maps(&mut self) {
        self.point_map = PointMap::for_word(&self.hidden_word);
    }

    #[must_use]
    pub fn hidden_word(&self) -> &str {
        &self.hidden_word
    }

    #[must_use]
    pub fn hidden_word_length(&self) -> usize {
        self.hidden_word.chars().count()
    }

    /// Pick the word for the next round (bonus length when the bonus round was
    /// accepted) and reset the round counters.
    ///
    /// # Errors
    /// Propagates `set_hidden_word_and_length` failures.
    pub fn start_round(&mut self) -> Result<(), WordSourceError> {
        if !matches!(self.phase, Phase::Playing | Phase::BonusActive) || self.terminated {
            self.abort("start_round");
            return Ok(());
        }
        let length = if self.entered_bonus_round {
            self.bonus_word_length()
        } else {
            self.current_word_length
        };
        self.set_hidden_word_and_length(length)?;
        self.reset();
        Ok(())
    }

    // Per-round play

    /// Reset the try counter, the guessed flag and the hint set for a new round.
    ///
    /// Only valid while a round may be played; a finished round has to go
    /// through `resolve_round` first.
    pub fn reset(&mut self) {
        if !matches!(self.phase, Phase::Playing | Phase::BonusActive) || self.terminated {
            self.abort("reset");
            return;
        }
        self.current_try = 1;
        self.word_guessed = false;
        self.reset_game_helper();
        self.set_point_maps();
        self.phase = if self.entered_bonus_round {
            Phase::BonusActive
        } else {
            Phase::Playing
        };
    }

    #[must_use]
    pub fn max_tries(&self) -> u32 {
        max_tries_for(self.hidden_word_length())
    }

    #[must_use]
    pub fn is_word_guessed(&self) -> bool {
        self.word_guessed
    }

    #[must_use]
    pub fn current_try(&self) -> u32 {
        self.current_try
    }

    /// True while the current round accepts guesses. No round is active until
    /// a hidden word has been installed.
    #[must_use]
    pub fn is_round_active(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::BonusActive)
            && !self.hidden_word.is_empty()
            && !self.word_guessed
            && self.current_try <= self.max_tries()
    }

    #[must_use]
    pub fn check_guess_validity(&self, guess: &str) -> GuessStatus {
        validate(guess, self.hidden_word_length())
    }

    /// Score a guess that passed `check_guess_validity`.
    ///
    /// Counts the try, awards points for newly found letters and extends the
    /// hint set. A guess outside an active round ends the session; an invalid
    /// guess changes nothing. Both return an empty count.
    pub fn submit_valid_guess(&mut self, guess: &str) -> BullCowCount {
        if !self.is_round_active() {
            self.abort("submit_valid_guess");
            return BullCowCount::default();
        }
        let status = self.check_guess_validity(guess);
        if status != GuessStatus::Ok {
            warn!("Rejected unchecked guess: {}", status);
            return BullCowCount::default();
        }

        self.current_try += 1;
        let count = score(guess, &self.hidden_word, &mut self.helper);
        let earned = self.point_map.award(guess, &self.hidden_word);
        self.points += earned;
        debug_log!(
            "Try {}: bulls={} cows={} earned={} total={}",
            self.current_try - 1,
            count.bulls,
            count.cows,
            earned,
            self.points
        );

        if count.bulls == self.hidden_word_length() {
            self.word_guessed = true;
            self.phase = Phase::RoundWon;
        } else if self.current_try > self.max_tries() {
            self.phase = Phase::RoundLost;
        }
        count
    }

    #[must_use]
    pub fn game_helper(&self) -> &HintSet {
        &self.helper
    }

    pub fn reset_game_helper(&mut self) {
        self.helper.clear(self.hidden_word_length());
    }

    #[must_use]
    pub fn my_points(&self) -> i32 {
        self.points
    }

    #[must_use]
    pub fn tries_left(&self) -> u32 {
        (self.max_tries() + 1).saturating_sub(self.current_try)
    }

    // End of round and session

    /// Book a won round: bonus points, completion map and word length progression.
    pub fn implement_word_win_condition(&mut self) {
        let length = self.hidden_word_length();
        let bonus = WIN_POINTS_PER_LETTER * to_points(length) + to_points(self.tries_left());
        self.points += bonus;
        if !self.entered_bonus_round {
            self.completion.mark(length);
            self.current_word_length += 1;
        }
        info_log!("Round won at length {}: +{} points, total {}", length, bonus, self.points);
    }

    /// Book a lost round. The word length is unchanged.
    pub fn implement_word_loss_condition(&mut self) {
        let penalty = LOSS_PENALTY_PER_LETTER * to_points(self.hidden_word_length());
        self.points -= penalty;
        info_log!("Round lost: -{} points, total {}", penalty, self.points);
    }

    /// True once every main-game length has been completed.
    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.completion.all_completed()
    }

    #[must_use]
    pub fn completion(&self) -> &CompletionMap {
        &self.completion
    }

    #[must_use]
    pub fn entered_bonus_round(&self) -> bool {
        self.entered_bonus_round
    }

    pub fn set_enter_bonus_round(&mut self, enter: bool) {
        self.entered_bonus_round = enter;
    }

    #[must_use]
    pub fn bonus_word_length(&self) -> usize {
        BONUS_WORD_LENGTH
    }

    #[must_use]
    pub fn completed_bonus_round(&self) -> bool {
        self.completed_bonus_round
    }

    pub fn set_complete_bonus_round(&mut self, complete: bool) {
        self.completed_bonus_round = complete;
    }

    #[must_use]
    pub fn restart_after_bonus(&self) -> bool {
        self.restart_after_bonus
    }

    pub fn set_restart_after_bonus(&mut self, restart: bool) {
        self.restart_after_bonus = restart;
    }

    pub fn reset_current_word_length(&mut self) {
        self.current_word_length = MIN_WORD_LENGTH;
    }

    #[must_use]
    pub fn max_word_length(&self) -> usize {
        MAX_WORD_LENGTH
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once the session is over and no further answer is expected.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Book the finished round and move to the phase that decides what comes next.
    pub fn resolve_round(&mut self) -> Phase {
        let won = match self.phase {
            Phase::RoundWon => true,
            Phase::RoundLost => false,
            _ => {
                self.abort("resolve_round");
                return self.phase;
            }
        };
        if won {
            self.implement_word_win_condition();
        } else {
            self.implement_word_loss_condition();
        }

        let positive = self.points > 0;
        let loss_reason = if positive {
            LossReason::WordsRemaining
        } else {
            LossReason::OutOfPoints
        };

        self.phase = if self.entered_bonus_round {
            if won && positive {
                self.set_complete_bonus_round(true);
                Phase::BonusCompleted
            } else {
                Phase::GameOver(GameOutcome::Lost(loss_reason))
            }
        } else if positive && self.current_word_length <= self.max_word_length() {
            Phase::AwaitingContinue
        } else if positive && self.is_game_won() {
            Phase::BonusOffered
        } else {
            Phase::GameOver(GameOutcome::Lost(loss_reason))
        };
        info_log!("Round resolved: {:?}", self.phase);
        self.phase
    }

    /// Apply the player's yes/no answer to the question of the current phase.
    ///
    /// - `AwaitingContinue`: yes plays the next word, no quits.
    /// - `BonusOffered`: yes starts the bonus round, no ends with a win.
    /// - `BonusCompleted`: yes restarts from scratch, no ends with a win.
    /// - `GameOver` after a loss: yes restarts from scratch, no ends.
    pub fn answer(&mut self, yes: bool) -> Phase {
        match self.phase {
            Phase::AwaitingContinue => {
                if yes {
                    self.discard_hidden_word();
                    self.phase = Phase::Playing;
                } else {
                    self.finish(GameOutcome::Quit);
                }
            }
            Phase::BonusOffered => {
                self.set_enter_bonus_round(yes);
                if yes {
                    self.discard_hidden_word();
                    self.phase = Phase::BonusActive;
                } else {
                    self.finish(GameOutcome::Won);
                }
            }
            Phase::BonusCompleted => {
                self.set_restart_after_bonus(yes);
                if yes {
                    self.restart();
                } else {
                    self.finish(GameOutcome::Won);
                }
            }
            Phase::GameOver(GameOutcome::Lost(_)) if !self.terminated => {
                if yes {
                    self.restart();
                } else {
                    self.terminated = true;
                }
            }
            _ => self.abort("answer"),
        }
        self.phase
    }

    /// Clear every session counter and flag and return to `Playing`.
    pub fn restart(&mut self) {
        self.reset_player_point_total();
        self.reset_current_word_length();
        self.set_game_completion_map();
        self.set_enter_bonus_round(false);
        self.set_complete_bonus_round(false);
        self.set_restart_after_bonus(false);
        self.discard_hidden_word();
        self.terminated = false;
        self.phase = Phase::Playing;
        info_log!("Session restarted");
    }

    /// The word of a resolved round is dropped once play moves on.
    fn discard_hidden_word(&mut self) {
        self.hidden_word.clear();
        self.reset_game_helper();
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.phase = Phase::GameOver(outcome);
        self.terminated = true;
        info_log!("Session finished: {:?}", outcome);
    }

    fn abort(&mut self, call: &str) {
        warn!("{} called in phase {:?}, ending session", call, self.phase);
        self.finish(GameOutcome::Aborted);
    }
}

impl Default for BullCowGame<Dictionary> {
    fn default() -> Self {
        Self::new(Dictionary::new())
    }
}

fn to_points<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}
