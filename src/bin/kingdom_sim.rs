//! Headless Kingdom Simulator
//!
//! Plays seeded games with a simple steward policy and prints one summary
//! per game, as text or JSON.

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use stronghold::core::{NoPacer, ResourceType};
use stronghold::{Action, Difficulty, GameConfig, Kingdom};

/// Headless Kingdom Simulator - batch games with a scripted steward
#[derive(Parser, Debug)]
#[command(name = "kingdom_sim")]
#[command(about = "Play seeded kingdom games without a player")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Seed of the first game; later games use consecutive seeds
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Difficulty for every game
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,

    /// Balance settings (TOML)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

/// Per-game summary
#[derive(Serialize)]
struct GameSummary {
    seed: u64,
    outcome: String,
    victory: bool,
    turns: i64,
    king: String,
    population: u32,
    happiness: i32,
    food: i64,
    gold: i64,
    soldiers: u32,
    elections: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stronghold=warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load_from_toml(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config '{}': {}", path.display(), e);
            eprintln!("Using default config");
            GameConfig::default()
        }),
        None => GameConfig::default(),
    };

    let summaries: Vec<GameSummary> = (0..args.games)
        .map(|i| play(args.seed.wrapping_add(u64::from(i)), args.difficulty, &config))
        .collect();

    if args.format == "json" {
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize summaries: {e}"),
        }
        return;
    }

    for s in &summaries {
        println!(
            "seed {:>4}: {:<12} turn {:>2}  king {:<8} pop {:>3}  happy {:>3}%  food {:>5}  gold {:>5}  soldiers {:>3}",
            s.seed,
            s.outcome,
            s.turns,
            s.king,
            s.population,
            s.happiness,
            s.food,
            s.gold,
            s.soldiers
        );
    }
    let wins = summaries.iter().filter(|s| s.victory).count();
    println!("\n{wins}/{} games survived to the end", summaries.len());
}

fn play(seed: u64, difficulty: Difficulty, config: &GameConfig) -> GameSummary {
    let mut kingdom = Kingdom::with_config(difficulty, config.clone(), ChaCha8Rng::seed_from_u64(seed));

    while !kingdom.is_game_over() {
        let action = steward(&kingdom);
        if let Err(e) = kingdom.resolve_action(action, &NoPacer) {
            tracing::error!(seed, error = %e, "game aborted");
            break;
        }
    }

    let vitals = kingdom.vitals();
    GameSummary {
        seed,
        outcome: kingdom
            .outcome
            .map(|o| format!("{o:?}"))
            .unwrap_or_else(|| "Unfinished".into()),
        victory: kingdom.outcome.is_some_and(|o| o.is_victory()),
        turns: kingdom.turn,
        king: kingdom.ruler.name.clone(),
        population: vitals.population,
        happiness: vitals.happiness,
        food: vitals.food,
        gold: vitals.gold,
        soldiers: vitals.soldiers,
        elections: kingdom.chronicle.elections().count(),
    }
}

/// Keep the granary stocked, the people content and the treasury afloat
fn steward(kingdom: &Kingdom) -> Action {
    let food = kingdom.resource(ResourceType::Food);
    let gold = kingdom.resource(ResourceType::Gold);
    let appetite = i64::from(kingdom.population.total()) / 2;

    if food < appetite * 3 {
        let amount = appetite * 3 - food;
        if gold >= amount * kingdom.market.food_price() {
            return Action::BuyFood(amount);
        }
    }
    if kingdom.population.happiness() < 45 && kingdom.tax_rate() > 5 {
        return Action::SetTaxRate(5);
    }
    if gold < 200 {
        return Action::CollectTaxes;
    }
    if kingdom.resource(ResourceType::Wood) >= 50 && kingdom.resource(ResourceType::Stone) >= 30 {
        return Action::BuildFarm;
    }
    Action::Train
}
