use anyhow::{Context, Result};
use bulls_cows::cli::{CliInterface, parse_cli};
use bulls_cows::tui::TuiInterface;
use bulls_cows::{BullCowGame, Dictionary, game_loop, info_log, logging};
use std::io;

fn run() -> Result<()> {
    let cli = parse_cli();
    let log_path = match logging::init(cli.verbose) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("Logging disabled: {e}");
            None
        }
    };
    info_log!("Starting bulls-cows with {:?}", cli);

    let source = match cli.seed {
        Some(seed) => Dictionary::with_seed(seed),
        None => Dictionary::new(),
    };
    let mut game = BullCowGame::new(source);

    if cli.tui {
        let mut interface = TuiInterface::new(cli.reveal).context("failed to set up the terminal")?;
        game_loop(&mut game, &mut interface).context("game aborted")?;
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock()).with_reveal(cli.reveal);
        game_loop(&mut game, &mut interface).context("game aborted")?;
    }

    if cli.verbose
        && let Some(path) = log_path
    {
        println!("Log written to {}", path.display());
    }
    Ok(())
}

fn main() {
    // The process always exits with status 0; setup failures are reported here
    if let Err(e) = run() {
        eprintln!("bulls-cows: {e:#}");
    }
}
