//! Full-screen terminal interface for Bulls and Cows, built on Ratatui.
//!
//! # Architecture
//! `TuiInterface` implements `GameInterface`: `game_loop` pushes round and
//! guess results into it, and it blocks on key events when a guess or a
//! yes/no answer is needed.
//!
//! # State Machine
//! - `EnteringGuess` while a round is running
//! - `Answering(question)` between rounds
//! - `Finished` once the session is over

use crate::engine::LossReason;
use crate::game_state::{
    GameInterface, GuessPrompt, GuessSummary, Question, RoundIntro, RoundSummary, UserAction,
};
use crate::scoring::BullCowCount;
use crate::validation::GuessStatus;
use crate::{cli, debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

/// Longest input accepted, so wrong-length guesses can still be typed and rejected.
const MAX_INPUT_LEN: usize = 12;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, PartialEq, Eq)]
struct GuessRow {
    guess: String,
    count: BullCowCount,
    /// Positions confirmed as bulls when this guess was scored.
    bulls_at: Vec<bool>,
}

impl GuessRow {
    fn from_summary(summary: &GuessSummary) -> Self {
        let hint: Vec<char> = summary
            .hint
            .split_whitespace()
            .filter_map(|slot| slot.chars().next())
            .collect();
        let bulls_at = summary
            .guess
            .chars()
            .enumerate()
            .map(|(i, c)| hint.get(i) == Some(&c))
            .collect();
        Self {
            guess: summary.guess.clone(),
            count: summary.count,
            bulls_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    Answering(Question),
    Finished,
}

/// What a key press does to the guess being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputEdit {
    Push(char),
    Pop,
    Submit,
    Exit,
    Ignore,
}

fn guess_edit_for(key: &KeyEvent, input_len: usize) -> InputEdit {
    if has_modifier_keys(key) {
        return InputEdit::Ignore;
    }
    match key.code {
        KeyCode::Esc => InputEdit::Exit,
        KeyCode::Enter => InputEdit::Submit,
        KeyCode::Backspace if input_len > 0 => InputEdit::Pop,
        KeyCode::Char(c) if !c.is_whitespace() && input_len < MAX_INPUT_LEN => InputEdit::Push(c),
        _ => InputEdit::Ignore,
    }
}

/// `Some(true)` for yes, `Some(false)` for no, `None` for keys to ignore.
fn answer_for(key: &KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y' | 'Y') => Some(true),
        KeyCode::Esc | KeyCode::Char('n' | 'N') => Some(false),
        _ => None,
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Replacement and control characters show up when the terminal loses focus.
fn is_garbage_char(c: char) -> bool {
    c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD
}

fn instructions_for(state: TuiState) -> &'static str {
    match state {
        TuiState::EnteringGuess => "Type your guess | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
        TuiState::Answering(_) => "Y / ENTER: Yes | N / ESC: No",
        TuiState::Finished => "Thanks for playing!",
    }
}

struct RenderContext<'a> {
    guesses: &'a [GuessRow],
    current_input: &'a str,
    state: TuiState,
    word_length: usize,
    max_tries: u32,
    bonus_round: bool,
    hint: &'a str,
    points: i32,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    guesses: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    word_length: usize,
    max_tries: u32,
    bonus_round: bool,
    hint: String,
    points: i32,
    reveal: bool,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new(reveal: bool) -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            word_length: 0,
            max_tries: 0,
            bonus_round: false,
            hint: String::new(),
            points: 0,
            reveal,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            guesses: &self.guesses,
            current_input: &self.current_input,
            state: self.state,
            word_length: self.word_length,
            max_tries: self.max_tries,
            bonus_round: self.bonus_round,
            hint: &self.hint,
            points: self.points,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Board
                Constraint::Length(8), // Info panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.bonus_round);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, bonus_round: bool) {
        let text = if bonus_round {
            "BULLS AND COWS - BONUS ROUND"
        } else {
            "BULLS AND COWS"
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title(format!(
                "Guesses ({} letters, {} tries)",
                ctx.word_length, ctx.max_tries
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines: Vec<Line> = ctx.guesses.iter().map(Self::guess_line).collect();
        if ctx.state == TuiState::EnteringGuess {
            lines.push(Self::input_line(ctx.current_input, ctx.word_length));
        }

        // Keep the most recent rows when the board overflows
        let visible = usize::from(inner.height);
        let skip = lines.len().saturating_sub(visible);
        let lines: Vec<Line> = lines.into_iter().skip(skip).collect();
        f.render_widget(Paragraph::new(lines), inner);
    }

    fn guess_line(row: &GuessRow) -> Line<'static> {
        let mut spans = vec![Span::raw("  ")];
        for (i, letter) in row.guess.chars().enumerate() {
            let style = if row.bulls_at.get(i).copied().unwrap_or(false) {
                Style::default().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {letter} "), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("  Bulls: {}  Cows: {}", row.count.bulls, row.count.cows),
            INFO_STYLE,
        ));
        Line::from(spans)
    }

    fn input_line(current_input: &str, word_length: usize) -> Line<'static> {
        let mut spans = vec![Span::raw("  ")];
        let cells = word_length.max(current_input.chars().count());
        for i in 0..cells {
            let letter = current_input.chars().nth(i).unwrap_or(' ');
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(Color::White).bg(Color::Blue),
            ));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Points: ", HEADER_STYLE),
                Span::raw(ctx.points.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Helpful hint: ", HEADER_STYLE),
                Span::styled(format!("{{ {} }}", ctx.hint), SUCCESS_STYLE),
            ]),
            Line::from(""),
        ];

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let paragraph = Paragraph::new(instructions_for(state))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Wait for the next relevant key press. `Ok(None)` when the poll timed out
    /// or the event was ignored.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let KeyCode::Char(c) = key.code
                    && is_garbage_char(c)
                {
                    debug_log!("next_key() - Ignoring garbage character {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event {:?}", other);
                Ok(None)
            }
        }
    }

    fn apply_guess_key(&mut self, key: &KeyEvent) -> Option<UserAction> {
        match guess_edit_for(key, self.current_input.chars().count()) {
            InputEdit::Push(c) => {
                self.error_message.clear();
                self.current_input.push(c);
                None
            }
            InputEdit::Pop => {
                self.current_input.pop();
                None
            }
            InputEdit::Submit => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("apply_guess_key() - Submitting '{}'", guess);
                Some(UserAction::Guess(guess))
            }
            InputEdit::Exit => Some(UserAction::Exit),
            InputEdit::Ignore => None,
        }
    }

    fn start_round_display(&mut self, intro: &RoundIntro) {
        self.guesses.clear();
        self.current_input.clear();
        self.error_message.clear();
        self.word_length = intro.word_length;
        self.max_tries = intro.max_tries;
        self.bonus_round = intro.bonus_round;
        self.hint = vec!["_"; intro.word_length].join(" ");
        self.state = TuiState::EnteringGuess;
        self.message = if self.reveal {
            format!("The word is: {}", intro.hidden_word)
        } else {
            format!(
                "Can you guess the {} letter isogram I'm thinking of?",
                intro.word_length
            )
        };
    }
}

impl GameInterface for TuiInterface {
    fn display_round_intro(&mut self, intro: &RoundIntro) {
        self.start_round_display(intro);
        self.status = format!("New word - {} tries", intro.max_tries);
        self.draw_or_log();
    }

    fn read_guess(&mut self, prompt: &GuessPrompt) -> UserAction {
        self.state = TuiState::EnteringGuess;
        self.status = format!("Try {} of {}", prompt.current_try, prompt.max_tries);
        loop {
            if self.draw().is_err() {
                info_log!("read_guess() - Draw failed, returning Exit");
                return UserAction::Exit;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.apply_guess_key(&key) {
                        return action;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("read_guess() - Input error: {}", e);
                    return UserAction::Exit;
                }
            }
        }
    }

    fn display_invalid_guess(&mut self, status: GuessStatus, word_length: usize) {
        self.error_message = cli::invalid_guess_text(status, word_length);
        self.draw_or_log();
    }

    fn display_guess_summary(&mut self, summary: &GuessSummary) {
        self.guesses.push(GuessRow::from_summary(summary));
        self.hint.clone_from(&summary.hint);
        self.points = summary.points;
        self.error_message.clear();
        self.draw_or_log();
    }

    fn display_round_summary(&mut self, summary: &RoundSummary) {
        self.points = summary.points;
        self.message = if summary.word_guessed {
            "WELL DONE!!".to_string()
        } else {
            format!("Better luck next time! The word was '{}'.", summary.hidden_word)
        };
        self.draw_or_log();
    }

    fn display_game_won(&mut self, points: i32) {
        self.points = points;
        self.message = "YOU WON THE GAME! CONGRATULATIONS!!!!".to_string();
        self.draw_or_log();
    }

    fn display_bonus_completed(&mut self, points: i32) {
        self.points = points;
        self.message = "AMAZING! YOU COMPLETED THE BONUS ROUND!!".to_string();
        self.draw_or_log();
    }

    fn display_game_lost(&mut self, points: i32, reason: LossReason) {
        self.points = points;
        self.message = cli::loss_text(reason).to_string();
        self.draw_or_log();
    }

    fn confirm(&mut self, question: Question) -> bool {
        self.state = TuiState::Answering(question);
        self.status = cli::question_text(question).trim().to_string();
        loop {
            if self.draw().is_err() {
                return false;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(yes) = answer_for(&key) {
                        info_log!("confirm() - {:?} answered {}", question, yes);
                        return yes;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("confirm() - Input error: {}", e);
                    return false;
                }
            }
        }
    }

    fn display_exit_message(&mut self) {
        self.state = TuiState::Finished;
        self.status = "Exiting...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
