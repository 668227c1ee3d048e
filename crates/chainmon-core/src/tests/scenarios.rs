//! End-to-end scenarios with hand-checked results.

use crate::battle::{BattleEnd, BattleEngine, Side};
use crate::monster::{Combatant, Monster};
use crate::rarity::Rarity;
use crate::trade::{TradeOutcome, TradeValidator, RARITY_MISMATCH};

use super::helpers::{basic, monster, tiger, FixedRng};

// =============================================================================
// Battles
// =============================================================================

#[test]
fn tiger_knocks_out_basic_in_one_turn() {
    let engine = BattleEngine::new();
    let outcome = engine
        .run(&tiger(), &basic(), &mut FixedRng::new(0.9))
        .unwrap();

    assert_eq!(outcome.winner.name, "Stripes");
    assert_eq!(outcome.loser.name, "Pup");
    assert_eq!(outcome.winner_side, Side::A);
    assert_eq!(outcome.end, BattleEnd::Knockout);
    assert_eq!(outcome.loser.hp, 0.0);
    assert_eq!(outcome.winner.hp, 100.0);
    assert_eq!(
        outcome.log,
        vec!["Stripes used Lunar Ambush, dealing 45 damage!".to_string()]
    );
    assert_eq!(outcome.summary(), "Stripes wins against Pup!");
}

#[test]
fn zero_damage_battle_runs_to_the_default_cutoff() {
    let engine = BattleEngine::new();
    let a = Combatant::new("Mossback", "Basic", 5, 5, 60, Rarity::Common);
    let b = Combatant::new("Pebble", "Basic", 5, 5, 60, Rarity::Common);

    let outcome = engine.run(&a, &b, &mut FixedRng::new(0.5)).unwrap();

    assert_eq!(outcome.end, BattleEnd::Stalemate);
    assert_eq!(outcome.rounds, 1000);
    assert_eq!(outcome.turns.len(), 2000);
    assert_eq!(outcome.log.len(), 2001);
    assert_eq!(
        outcome.log.last().map(String::as_str),
        Some("Stalemate: battle halted after 1000 rounds.")
    );
    // Equal hp: side A takes the tie.
    assert_eq!(outcome.winner_side, Side::A);
    assert_eq!(outcome.winner.name, "Mossback");
    assert!(outcome.turns.iter().all(|turn| turn.damage == 0.0));
    assert_eq!(outcome.summary(), "Mossback outlasts Pebble after 1000 rounds!");
}

#[test]
fn chain_records_battle_end_to_end() {
    let dragon = Monster::new(11, "Ember", "Dragon", 40, 12, 120, "epic");
    let pup = Monster::new(12, "Pup", "Basic", 10, 5, 30, "common");
    let a = Combatant::from_monster(&dragon).unwrap();
    let b = Combatant::from_monster(&pup).unwrap();

    // Roll 0.9 picks Inferno Surge: 40 - 5 = 35 >= 30.
    let outcome = BattleEngine::new()
        .run(&a, &b, &mut FixedRng::new(0.9))
        .unwrap();
    assert_eq!(outcome.log[0], "Ember used Inferno Surge, dealing 35 damage!");
    assert_eq!(outcome.winner.rarity, Rarity::Epic);
}

// =============================================================================
// Trades
// =============================================================================

#[test]
fn common_for_legendary_is_rejected() {
    let validator = TradeValidator::new();
    let common = monster(1, "common");
    let legendary = monster(2, "legendary");

    assert_eq!(validator.validate(&common, &legendary), Ok(false));
    assert_eq!(
        validator.execute(&common, &legendary).unwrap(),
        TradeOutcome::Rejected {
            reason: RARITY_MISMATCH.to_string()
        }
    );
}

#[test]
fn rarity_strings_are_case_insensitive() {
    let validator = TradeValidator::new();
    assert_eq!(
        validator.validate(&monster(1, "Rare"), &monster(2, " EPIC ")),
        Ok(true)
    );
}
