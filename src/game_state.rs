use crate::engine::{BullCowGame, GameOutcome, LossReason, Phase};
use crate::scoring::BullCowCount;
use crate::validation::GuessStatus;
use crate::wordbank::{WordSource, WordSourceError};
use crate::{debug_log, info_log};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// Yes/no questions asked between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    NextWord,
    EnterBonusRound,
    RestartAfterBonus,
    RestartAfterLoss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundIntro {
    pub word_length: usize,
    pub max_tries: u32,
    pub bonus_round: bool,
    pub hidden_word: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessPrompt {
    pub current_try: u32,
    pub max_tries: u32,
    pub word_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSummary {
    pub guess: String,
    pub count: BullCowCount,
    pub hint: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub points: i32,
    pub word_guessed: bool,
    pub hidden_word: String,
}

/// Everything a front end must do for `game_loop`.
///
/// Implementations only render and collect input; every rule lives in the engine.
pub trait GameInterface {
    fn display_round_intro(&mut self, intro: &RoundIntro);
    fn read_guess(&mut self, prompt: &GuessPrompt) -> UserAction;
    fn display_invalid_guess(&mut self, status: GuessStatus, word_length: usize);
    fn display_guess_summary(&mut self, summary: &GuessSummary);
    fn display_round_summary(&mut self, summary: &RoundSummary);
    fn display_game_won(&mut self, points: i32);
    fn display_bonus_completed(&mut self, points: i32);
    fn display_game_lost(&mut self, points: i32, reason: LossReason);
    /// Ask a yes/no question. Returning `false` on end of input stops the session.
    fn confirm(&mut self, question: Question) -> bool;
    fn display_exit_message(&mut self);
}

/// Play rounds until the session ends or the player exits.
///
/// # Errors
/// Returns an error when no hidden word can be produced for a round.
pub fn game_loop<S, I>(game: &mut BullCowGame<S>, interface: &mut I) -> Result<(), WordSourceError>
where
    S: WordSource,
    I: GameInterface + ?Sized,
{
    while !game.is_terminated() {
        game.start_round()?;
        if game.is_terminated() {
            break;
        }
        interface.display_round_intro(&RoundIntro {
            word_length: game.hidden_word_length(),
            max_tries: game.max_tries(),
            bonus_round: game.entered_bonus_round(),
            hidden_word: game.hidden_word().to_string(),
        });

        if !play_round(game, interface) {
            info_log!("Player exited mid-round");
            interface.display_exit_message();
            return Ok(());
        }

        let phase = game.resolve_round();
        let points = game.my_points();
        debug_log!("game_loop() - phase after round: {:?}", phase);
        match phase {
            Phase::AwaitingContinue => {
                interface.display_round_summary(&RoundSummary {
                    points,
                    word_guessed: game.is_word_guessed(),
                    hidden_word: game.hidden_word().to_string(),
                });
                game.answer(interface.confirm(Question::NextWord));
            }
            Phase::BonusOffered => {
                interface.display_game_won(points);
                game.answer(interface.confirm(Question::EnterBonusRound));
            }
            Phase::BonusCompleted => {
                interface.display_bonus_completed(points);
                game.answer(interface.confirm(Question::RestartAfterBonus));
            }
            Phase::GameOver(GameOutcome::Lost(reason)) => {
                interface.display_game_lost(points, reason);
                game.answer(interface.confirm(Question::RestartAfterLoss));
            }
            _ => {}
        }
    }

    interface.display_exit_message();
    Ok(())
}

/// Collect guesses until the round is over. Returns `false` if the player exited.
fn play_round<S, I>(game: &mut BullCowGame<S>, interface: &mut I) -> bool
where
    S: WordSource,
    I: GameInterface + ?Sized,
{
    while game.is_round_active() {
        let Some(guess) = read_valid_guess(game, interface) else {
            return false;
        };
        let count = game.submit_valid_guess(&guess);
        interface.display_guess_summary(&GuessSummary {
            guess,
            count,
            hint: game.game_helper().to_string(),
            points: game.my_points(),
        });
    }
    true
}

/// Re-prompt until the guess passes validation.
fn read_valid_guess<S, I>(game: &BullCowGame<S>, interface: &mut I) -> Option<String>
where
    S: WordSource,
    I: GameInterface + ?Sized,
{
    let prompt = GuessPrompt {
        current_try: game.current_try(),
        max_tries: game.max_tries(),
        word_length: game.hidden_word_length(),
    };
    loop {
        match interface.read_guess(&prompt) {
            UserAction::Exit => return None,
            UserAction::Guess(guess) => match game.check_guess_validity(&guess) {
                GuessStatus::Ok => return Some(guess),
                status => {
                    debug_log!("read_valid_guess() - '{}' rejected: {}", guess, status);
                    interface.display_invalid_guess(status, prompt.word_length);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::FixedWords;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        guesses: VecDeque<String>,
        answers: VecDeque<bool>,
        invalid: Vec<GuessStatus>,
        summaries: Vec<GuessSummary>,
        questions: Vec<Question>,
        lost: Vec<LossReason>,
        exited: bool,
    }

    impl Scripted {
        fn new(guesses: &[&str], answers: &[bool]) -> Self {
            Self {
                guesses: guesses.iter().map(ToString::to_string).collect(),
                answers: answers.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for Scripted {
        fn display_round_intro(&mut self, _intro: &RoundIntro) {}

        fn read_guess(&mut self, _prompt: &GuessPrompt) -> UserAction {
            self.guesses.pop_front().map_or(UserAction::Exit, UserAction::Guess)
        }

        fn display_invalid_guess(&mut self, status: GuessStatus, _word_length: usize) {
            self.invalid.push(status);
        }

        fn display_guess_summary(&mut self, summary: &GuessSummary) {
            self.summaries.push(summary.clone());
        }

        fn display_round_summary(&mut self, _summary: &RoundSummary) {}

        fn display_game_won(&mut self, _points: i32) {}

        fn display_bonus_completed(&mut self, _points: i32) {}

        fn display_game_lost(&mut self, _points: i32, reason: LossReason) {
            self.lost.push(reason);
        }

        fn confirm(&mut self, question: Question) -> bool {
            self.questions.push(question);
            self.answers.pop_front().unwrap_or(false)
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn game() -> BullCowGame<FixedWords> {
        BullCowGame::new(FixedWords::new(["cat", "lamb"]))
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let mut game = game();
        let mut ui = Scripted::new(&[], &[]);
        game_loop(&mut game, &mut ui).unwrap();
        assert!(ui.exited);
        assert!(ui.summaries.is_empty());
    }

    #[test]
    fn test_game_loop_reprompts_invalid_guesses() {
        let mut game = game();
        let mut ui = Scripted::new(&["ca", "CAT", "too", "cat"], &[false]);
        game_loop(&mut game, &mut ui).unwrap();
        assert_eq!(
            ui.invalid,
            vec![
                GuessStatus::WrongLength,
                GuessStatus::NotLowercase,
                GuessStatus::NotIsogram
            ]
        );
        assert_eq!(ui.summaries.len(), 1);
        assert_eq!(ui.summaries[0].count, BullCowCount::new(3, 0));
        assert_eq!(ui.questions, vec![Question::NextWord]);
        assert!(game.is_terminated());
    }

    #[test]
    fn test_game_loop_hint_in_summary() {
        let mut game = game();
        let mut ui = Scripted::new(&["cow", "cat"], &[false]);
        game_loop(&mut game, &mut ui).unwrap();
        assert_eq!(ui.summaries[0].hint, "c _ _");
        assert_eq!(ui.summaries[1].hint, "c a t");
    }

    #[test]
    fn test_game_loop_two_rounds() {
        let mut game = game();
        let mut ui = Scripted::new(&["cat", "lamb"], &[true, false]);
        game_loop(&mut game, &mut ui).unwrap();
        assert_eq!(game.current_word_length(), 5);
        assert_eq!(ui.questions, vec![Question::NextWord, Question::NextWord]);
    }

    #[test]
    fn test_game_loop_loss_then_decline_restart() {
        let mut game = game();
        let mut ui = Scripted::new(&["dog", "dog", "dog", "dog"], &[false]);
        game_loop(&mut game, &mut ui).unwrap();
        assert_eq!(ui.lost, vec![LossReason::OutOfPoints]);
        assert_eq!(ui.questions, vec![Question::RestartAfterLoss]);
        assert!(game.is_terminated());
        assert!(ui.exited);
    }

    #[test]
    fn test_game_loop_loss_then_restart() {
        let mut game = game();
        let mut ui = Scripted::new(&["dog", "dog", "dog", "dog", "cat"], &[true, false]);
        game_loop(&mut game, &mut ui).unwrap();
        assert_eq!(
            ui.questions,
            vec![Question::RestartAfterLoss, Question::NextWord]
        );
        assert_eq!(game.current_word_length(), 4);
    }

    #[test]
    fn test_game_loop_missing_word_is_error() {
        let mut game = BullCowGame::new(FixedWords::new(["cat"]));
        let mut ui = Scripted::new(&["cat"], &[true]);
        let result = game_loop(&mut game, &mut ui);
        assert_eq!(result, Err(WordSourceError::InvalidLength(4)));
    }
}
