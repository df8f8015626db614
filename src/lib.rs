// Library interface for bulls-cows
// The binary and the integration tests both go through these modules

pub mod cli;
pub mod engine;
pub mod game_state;
pub mod logging;
pub mod scoring;
pub mod tui;
pub mod validation;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use engine::{BullCowGame, CompletionMap, GameOutcome, LossReason, Phase};
pub use game_state::{GameInterface, Question, UserAction, game_loop};
pub use scoring::{BullCowCount, HintSet, score};
pub use validation::{GuessStatus, validate};
pub use wordbank::{Dictionary, FixedWords, WordSource, WordSourceError};
