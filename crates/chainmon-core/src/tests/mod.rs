//! Cross-module tests for the battle engine and trade validator.
//!
//! - `determinism.rs`: same seed and inputs produce identical outcomes
//! - `scenarios.rs`: end-to-end battles and trades with hand-checked results
//! - `properties.rs`: proptest invariants over arbitrary stats and seeds
//! - `helpers.rs`: scripted RNGs and combatant fixtures shared by unit tests

pub mod helpers;
mod scenarios;
