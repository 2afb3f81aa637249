//! Stronghold - Entry Point
//!
//! Interactive text game: pick a difficulty, then choose one action per
//! turn from the menu until the kingdom falls, survives or abdicates.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stronghold::command::{Action, MenuChoice};
use stronghold::core::{NoPacer, Pacer, ThreadPacer};
use stronghold::kingdom::DEFAULT_SAVE_FILE;
use stronghold::{Difficulty, GameConfig, Kingdom, KingdomError, Result};

/// Stronghold - rule a medieval kingdom one turn at a time
#[derive(Parser, Debug)]
#[command(name = "stronghold")]
#[command(about = "Turn-based kingdom management")]
struct Args {
    /// Difficulty (easy, medium, hard); asked interactively when omitted
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Random seed for deterministic games
    #[arg(long)]
    seed: Option<u64>,

    /// Balance settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file used when quitting
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    save: PathBuf,

    /// Resume from a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Skip the dramatic pauses
    #[arg(long)]
    no_delay: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stronghold=warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting game");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("\n=== STRONGHOLD ===");
    let difficulty = match args.difficulty {
        Some(d) => d,
        None => match choose_difficulty(&mut input)? {
            Some(d) => d,
            None => return Ok(()),
        },
    };

    let status_delay = Duration::from_millis(config.status_delay_ms);
    let mut kingdom = Kingdom::with_config(difficulty, config, ChaCha8Rng::seed_from_u64(seed));

    if let Some(path) = &args.load {
        match kingdom.load(path) {
            Ok(()) => println!("Game loaded from {}.", path.display()),
            Err(e) => println!("Could not load game: {e}"),
        }
    }

    let pacer: Box<dyn Pacer> = if args.no_delay {
        Box::new(NoPacer)
    } else {
        Box::new(ThreadPacer)
    };

    while !kingdom.is_game_over() {
        clear_screen()?;
        println!("{}", kingdom.status());
        println!();
        for choice in MenuChoice::ALL {
            println!("{choice}");
        }

        let Some(line) = prompt(&mut input, "\nChoose action: ")? else {
            break;
        };
        let choice = match MenuChoice::parse(&line) {
            Ok(choice) => choice,
            Err(e) => {
                println!("{e}");
                pacer.pause(status_delay);
                continue;
            }
        };

        let Some(action) = build_action(&mut input, choice)? else {
            break;
        };

        if action == Action::Quit {
            offer_save(&mut input, &kingdom, &args.save)?;
        }

        println!("--------------------------");
        let result = kingdom.resolve_action(action, pacer.as_ref())?;
        if let Some(effect) = result.effect {
            println!("{effect}");
        }
        if let Some(error) = result.error {
            println!("{error}");
        }
        if let Some(report) = result.report {
            println!("{report}");
        }
        pacer.pause(status_delay);
    }

    if let Some(outcome) = kingdom.outcome {
        println!("\n{outcome}");
    }
    Ok(())
}

fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// Print a prompt and read one line; `None` at end of input
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Keep asking until the player types a number; `None` at end of input
fn prompt_number<T: std::str::FromStr>(input: &mut impl BufRead, label: &str) -> Result<Option<T>> {
    loop {
        let Some(line) = prompt(input, label)? else {
            return Ok(None);
        };
        match line.parse() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn choose_difficulty(input: &mut impl BufRead) -> Result<Option<Difficulty>> {
    println!("1. Easy\n2. Medium\n3. Hard");
    loop {
        let Some(line) = prompt(input, "Choose difficulty: ")? else {
            return Ok(None);
        };
        match Difficulty::from_menu(&line) {
            Ok(d) => return Ok(Some(d)),
            Err(e) => println!("{e}"),
        }
    }
}

/// Ask for whatever quantities the chosen menu entry needs
fn build_action(input: &mut impl BufRead, choice: MenuChoice) -> Result<Option<Action>> {
    if let Some(action) = choice.immediate_action() {
        return Ok(Some(action));
    }

    let action = match choice {
        MenuChoice::ChangeTaxRate => {
            prompt_number(input, "Enter new tax rate (5-50): ")?.map(Action::SetTaxRate)
        }
        MenuChoice::Recruit => {
            prompt_number(input, "Enter number of soldiers you want to recruit: ")?.map(Action::Recruit)
        }
        MenuChoice::TradeFood => {
            println!("1. Buy Food\n2. Sell Food");
            let Some(sub) = prompt(input, "Choose: ")? else {
                return Ok(None);
            };
            if sub == "1" {
                prompt_number(input, "How much food to buy: ")?.map(Action::BuyFood)
            } else {
                prompt_number(input, "How much food to sell: ")?.map(Action::SellFood)
            }
        }
        MenuChoice::TakeLoan => {
            let Some(amount) = prompt_number(input, "Enter loan amount: ")? else {
                return Ok(None);
            };
            prompt_number(input, "Repayment term (turns): ")?
                .map(|term| Action::TakeLoan { amount, term })
        }
        MenuChoice::BuyWeapons => {
            prompt_number(input, "How many weapons to buy: ")?.map(Action::BuyWeapons)
        }
        MenuChoice::RepayLoan => {
            prompt_number(input, "How much gold to repay: ")?.map(Action::RepayLoan)
        }
        other => return Err(KingdomError::InvalidChoice(other.label().to_string())),
    };
    Ok(action)
}

fn offer_save(input: &mut impl BufRead, kingdom: &Kingdom, path: &std::path::Path) -> Result<()> {
    println!("Do you want to save the game?\n1. Yes\n0. No");
    let wants_save = prompt(input, "Enter your choice: ")?.is_some_and(|line| line == "1");
    if !wants_save {
        println!("Game not saved.");
        return Ok(());
    }
    match kingdom.save(path) {
        Ok(()) => println!("Game saved to {}.", path.display()),
        Err(e) => println!("Could not save game: {e}"),
    }
    Ok(())
}
