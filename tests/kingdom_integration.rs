//! Integration tests for the turn engine
//!
//! These tests drive whole kingdoms through the public API:
//! - Turn accounting (consumption, wages, harvest)
//! - Every way a game can end
//! - Determinism under a fixed seed

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stronghold::core::{NoPacer, ResourceType};
use stronghold::kingdom::systems::election;
use stronghold::kingdom::{Army, ClassLosses, ElectionOutcome, GameOutcome, Leader, Population};
use stronghold::{Action, Difficulty, GameConfig, Kingdom, KingdomError};

fn quiet_config() -> GameConfig {
    GameConfig {
        random_event_odds: 0,
        ..GameConfig::default()
    }
}

fn quiet_kingdom(difficulty: Difficulty, seed: u64) -> Kingdom {
    Kingdom::with_config(difficulty, quiet_config(), ChaCha8Rng::seed_from_u64(seed))
}

// ============================================================================
// Turn accounting
// ============================================================================

#[test]
fn test_easy_start_one_turn_food() {
    let mut kingdom = quiet_kingdom(Difficulty::Easy, 1);
    assert_eq!(kingdom.population.total(), 160);
    assert_eq!(kingdom.buildings.farms(), 1);

    kingdom.next_turn().unwrap();

    assert_eq!(kingdom.resource(ResourceType::Food), 1020);
}

#[test]
fn test_farm_raises_harvest() {
    let mut kingdom = quiet_kingdom(Difficulty::Easy, 1);
    let result = kingdom.resolve_action(Action::BuildFarm, &NoPacer).unwrap();

    let report = result.report.unwrap();
    assert_eq!(report.production.food, 200);
    // 1000 - 80 + 200
    assert_eq!(kingdom.resource(ResourceType::Food), 1120);
    assert_eq!(kingdom.resource(ResourceType::Wood), 150);
    assert_eq!(kingdom.resource(ResourceType::Stone), 170);
}

#[test]
fn test_full_approval_with_low_roll_retains_king() {
    let config = GameConfig::default();
    let mut ruler = Leader::king("King_1");
    let mut population = Population::new(100, 20, 10, 30, 100);

    let outcome = election::resolve(&mut ruler, &mut population, 0, 5, &config);

    assert_eq!(
        outcome,
        ElectionOutcome::Retained {
            king: "King_1".into(),
            approval: 50
        }
    );
    assert_eq!(ruler.name, "King_1");
}

// ============================================================================
// Game endings
// ============================================================================

#[test]
fn test_revolt_ends_game() {
    let mut kingdom = quiet_kingdom(Difficulty::Easy, 2);
    kingdom.population.update_happiness(-60);

    let report = kingdom.next_turn().unwrap();

    assert_eq!(report.outcome, Some(GameOutcome::Revolt));
    assert_eq!(kingdom.outcome, Some(GameOutcome::Revolt));
}

#[test]
fn test_bankruptcy_ends_game() {
    let mut kingdom = quiet_kingdom(Difficulty::Easy, 3);
    kingdom.stockpile.gold.set(-2000);

    let report = kingdom.next_turn().unwrap();

    assert!(!report.upkeep_paid);
    assert_eq!(report.outcome, Some(GameOutcome::Bankruptcy));
}

#[test]
fn test_undefended_kingdom_can_fall() {
    let config = GameConfig {
        conquest_odds: 1,
        ..quiet_config()
    };
    let mut kingdom = Kingdom::with_config(Difficulty::Easy, config, ChaCha8Rng::seed_from_u64(4));
    kingdom.army = Army::new(0, 60);

    let report = kingdom.next_turn().unwrap();

    assert_eq!(report.upkeep_owed, 0);
    assert_eq!(report.outcome, Some(GameOutcome::Conquest));
}

#[test]
fn test_patient_ruler_reaches_victory() {
    let mut kingdom = quiet_kingdom(Difficulty::Easy, 5);

    while !kingdom.is_game_over() {
        kingdom.resolve_action(Action::Train, &NoPacer).unwrap();
    }

    assert_eq!(kingdom.outcome, Some(GameOutcome::Victory));
    assert_eq!(kingdom.turn, 20);
    assert_eq!(kingdom.chronicle.elections().count(), 4);
}

#[test]
fn test_every_game_terminates() {
    for seed in 0..20 {
        let mut kingdom = Kingdom::new(Difficulty::Hard, seed);
        while !kingdom.is_game_over() {
            kingdom.resolve_action(Action::CollectTaxes, &NoPacer).unwrap();
        }
        assert!(kingdom.turn <= 20, "seed {seed} ran past the victory turn");
        assert!(matches!(
            kingdom.resolve_action(Action::CollectTaxes, &NoPacer),
            Err(KingdomError::GameOver)
        ));
    }
}

// ============================================================================
// Disasters
// ============================================================================

#[test]
fn test_disasters_strike_when_enabled() {
    let config = GameConfig {
        disasters_enabled: true,
        ..quiet_config()
    };
    let mut kingdom = Kingdom::with_config(Difficulty::Hard, config, ChaCha8Rng::seed_from_u64(6));

    let report = kingdom.next_turn().unwrap();

    let disaster = report.disaster.unwrap();
    // 20% of 160 is 32 deaths, but each class share truncates on its own
    assert_eq!(
        disaster.computed_losses,
        ClassLosses {
            peasants: 22,
            merchants: 4,
            nobility: 3,
            soldiers: 1,
        }
    );
    assert_eq!(disaster.computed_losses.total(), 30);
    assert_eq!(disaster.peasants_lost, 22);
    // Hard start: 500 food - 80 eaten, then the harvest, then 80% survives
    assert_eq!(kingdom.resource(ResourceType::Food), 416);
}

#[test]
fn test_disasters_only_reset_cooldown_by_default() {
    let mut kingdom = quiet_kingdom(Difficulty::Medium, 7);

    let report = kingdom.next_turn().unwrap();

    assert!(report.disaster_due);
    assert!(report.disaster.is_none());
    assert_eq!(kingdom.population.total(), 160);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_history() {
    let script = [
        Action::CollectTaxes,
        Action::Recruit(5),
        Action::BuyFood(50),
        Action::Battle,
        Action::BuildBarracks,
        Action::Train,
        Action::TakeLoan { amount: 300, term: 4 },
        Action::SellFood(40),
    ];

    let run = |seed: u64| {
        let mut kingdom = Kingdom::new(Difficulty::Medium, seed);
        for action in script {
            if kingdom.is_game_over() {
                break;
            }
            kingdom.resolve_action(action, &NoPacer).unwrap();
        }
        kingdom.snapshot().to_json().unwrap()
    };

    assert_eq!(run(99), run(99));
}
