use crate::engine::LossReason;
use crate::game_state::{
    GameInterface, GuessPrompt, GuessSummary, Question, RoundIntro, RoundSummary, UserAction,
};
use crate::validation::GuessStatus;
use clap::Parser;
use std::io::{self, BufRead, Write};

/// Bulls and Cows: guess the hidden isogram
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Full-screen terminal interface instead of line prompts
    #[arg(long)]
    pub tui: bool,

    /// Seed for hidden word selection, for reproducible games
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Show the hidden word when a round starts
    #[arg(long)]
    pub reveal: bool,

    /// Debug-level logging (the log file is printed on exit)
    #[arg(short, long)]
    pub verbose: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Empty input or a leading `y`/`Y` means yes.
#[must_use]
pub fn is_yes(response: &str) -> bool {
    response.is_empty() || response.starts_with(['y', 'Y'])
}

#[must_use]
pub fn question_text(question: Question) -> &'static str {
    match question {
        Question::NextWord => "On to the next word? (Y/n) ",
        Question::EnterBonusRound => "Would you like to enter the bonus round? (Y/n) ",
        Question::RestartAfterBonus => "You destroyed my game! Would you like to restart? (Y/n) ",
        Question::RestartAfterLoss => "Would you like to restart? (Y/n) ",
    }
}

#[must_use]
pub fn invalid_guess_text(status: GuessStatus, word_length: usize) -> String {
    match status {
        GuessStatus::WrongLength => format!("Please enter a {word_length} letter word."),
        GuessStatus::NotIsogram => "Word entered was not an isogram!".to_string(),
        GuessStatus::NotLowercase => "Please enter only lowercase letters.".to_string(),
        GuessStatus::Ok => String::new(),
    }
}

#[must_use]
pub fn loss_text(reason: LossReason) -> &'static str {
    match reason {
        LossReason::OutOfPoints => "YOU LOST, you did not have enough points to continue.",
        LossReason::WordsRemaining => "YOU LOST, you did not guess all of the words!",
    }
}

pub fn display_title() {
    println!("-------------------------------------------");
    println!("Welcome to Bulls and Cows, a fun word game!");
    println!("-------------------------------------------");
    println!();
    println!("          }}   {{         ___ ");
    println!("          (o o)        (o o) ");
    println!("   /-------\\ /          \\ /-------\\ ");
    println!("  / | BULL |O            O| COW  | \\ ");
    println!(" *  |-,--- |              |------|  * ");
    println!("    ^      ^              ^      ^ ");
    println!();
}

pub fn display_directions(intro: &RoundIntro, reveal: bool) {
    if intro.bonus_round {
        println!(" <<<<<<<<<<<<<<<<<<< BONUS ROUND >>>>>>>>>>>>>>>>>>>>");
    }
    println!(
        " << Can you guess the {} letter isogram I'm thinking of?? >>",
        intro.word_length
    );
    println!(" ----------------------------------------------------------");
    println!(" << A Bull means a correct letter in the correct place.  >>");
    println!(" << A Cow means a correct letter in the incorrect place. >>");
    println!(" ----------------------------------------------------------");
    println!(" <<     If you get a Bull, watch for Helpful Hints!!     >>");
    println!(" ----------------------------------------------------------");
    println!("                <<<<< Have fun!!!! >>>>>");
    println!("You have {} tries.", intro.max_tries);
    if reveal {
        println!("(The word is: {})", intro.hidden_word);
    }
    println!();
}

pub fn display_guess_summary(summary: &GuessSummary) {
    println!(
        "Bulls = {}. Cows = {}.",
        summary.count.bulls, summary.count.cows
    );
    println!(
        "Helpful hint: In your guess, the letters {{ {} }} are in the correct position.",
        summary.hint
    );
    println!("Current points: {}\n", summary.points);
}

pub fn display_round_summary(summary: &RoundSummary) {
    println!("Total points: {}", summary.points);
    println!();
    if summary.word_guessed {
        println!("WELL DONE!!\n");
    } else {
        println!("The word was '{}'.", summary.hidden_word);
        println!("Better luck next time!\n");
    }
}

pub fn display_game_won(points: i32) {
    println!("Final points: {points}");
    println!();
    println!("=====================================");
    println!("YOU WON THE GAME! CONGRATULATIONS!!!!");
    println!("=====================================\n");
}

pub fn display_bonus_completed(points: i32) {
    println!("Final points: {points}");
    println!();
    println!("========================================");
    println!("AMAZING! YOU COMPLETED THE BONUS ROUND!!");
    println!("========================================\n");
}

pub fn display_game_lost(points: i32, reason: LossReason) {
    println!("Final points: {points}");
    println!("\n====================================================");
    println!("{}", loss_text(reason));
    println!("====================================================\n");
}

pub fn display_exit_message() {
    println!("Thanks for playing!");
}

/// Read one line; `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn flush_prompt() {
    let _ = io::stdout().flush();
}

pub fn read_guess<R: BufRead>(reader: &mut R, prompt: &GuessPrompt) -> UserAction {
    print!(
        "Try {} of {}. Enter your guess: ",
        prompt.current_try, prompt.max_tries
    );
    flush_prompt();
    read_trimmed_line(reader).map_or(UserAction::Exit, UserAction::Guess)
}

pub fn read_yes_no<R: BufRead>(reader: &mut R, question: Question) -> bool {
    print!("{}", question_text(question));
    flush_prompt();
    read_trimmed_line(reader).is_some_and(|response| is_yes(&response))
}

/// Line-oriented front end over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    reveal: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            reveal: false,
        }
    }

    #[must_use]
    pub fn with_reveal(mut self, reveal: bool) -> Self {
        self.reveal = reveal;
        self
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_round_intro(&mut self, intro: &RoundIntro) {
        display_title();
        display_directions(intro, self.reveal);
    }

    fn read_guess(&mut self, prompt: &GuessPrompt) -> UserAction {
        read_guess(&mut self.reader, prompt)
    }

    fn display_invalid_guess(&mut self, status: GuessStatus, word_length: usize) {
        println!("{}\n", invalid_guess_text(status, word_length));
    }

    fn display_guess_summary(&mut self, summary: &GuessSummary) {
        display_guess_summary(summary);
    }

    fn display_round_summary(&mut self, summary: &RoundSummary) {
        display_round_summary(summary);
    }

    fn display_game_won(&mut self, points: i32) {
        display_game_won(points);
    }

    fn display_bonus_completed(&mut self, points: i32) {
        display_bonus_completed(points);
    }

    fn display_game_lost(&mut self, points: i32, reason: LossReason) {
        display_game_lost(points, reason);
    }

    fn confirm(&mut self, question: Question) -> bool {
        read_yes_no(&mut self.reader, question)
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
