//! # Chainmon Python Bindings
//!
//! PyO3 bindings exposing the chainmon battle engine and trade validator to
//! the Python chat-bot layer.
//!
//! ## Usage
//!
//! ```python
//! import chainmon
//!
//! tiger = {"token_id": 3, "name": "Stripes", "type": "Tiger",
//!          "attack": 50, "defense": 10, "hp": 100, "rarity": "rare"}
//! pup = {"token_id": 4, "name": "Pup", "type": "Basic",
//!        "attack": 10, "defense": 5, "hp": 30, "rarity": "common"}
//!
//! outcome = chainmon.run_battle(tiger, pup, seed=42)
//! for line in outcome.log:
//!     print(line)
//! print(outcome.summary)
//!
//! # Replay the same battle
//! again = chainmon.run_battle(tiger, pup, seed=outcome.seed)
//!
//! trade = chainmon.execute_trade(tiger, pup)
//! print(trade.accepted, trade.reason)
//! ```

use std::sync::OnceLock;

use chainmon_core::{
    BattleEngine, BattleError, Combatant, CoreConfig, Monster, MoveCatalog, SeededRng, Side,
    TradeError, TradeValidator,
};
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tracing_subscriber::EnvFilter;

static DEFAULT_ENGINE: OnceLock<BattleEngine> = OnceLock::new();

fn default_engine() -> &'static BattleEngine {
    DEFAULT_ENGINE.get_or_init(BattleEngine::new)
}

// =============================================================================
// Conversions
// =============================================================================

fn battle_err(err: BattleError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn trade_err(err: TradeError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn required_item<'py, T: FromPyObject<'py>>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T> {
    dict.get_item(key)?
        .ok_or_else(|| PyKeyError::new_err(format!("missing key: {key}")))?
        .extract()
}

fn optional_item<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<Option<T>> {
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value.extract().map(Some),
        _ => Ok(None),
    }
}

/// Reads a monster dict using the chain field names.
///
/// `species` is accepted in place of `type`.
fn monster_from_dict(dict: &Bound<'_, PyDict>) -> PyResult<Monster> {
    let species: String = match optional_item(dict, "type")? {
        Some(species) => species,
        None => required_item(dict, "species")?,
    };
    let mut monster = Monster::new(
        required_item(dict, "token_id")?,
        required_item::<String>(dict, "name")?,
        species,
        required_item(dict, "attack")?,
        required_item(dict, "defense")?,
        required_item(dict, "hp")?,
        required_item::<String>(dict, "rarity")?,
    );
    if let Some(owner) = optional_item::<String>(dict, "owner")? {
        monster = monster.with_owner(owner);
    }
    monster.token_uri = optional_item(dict, "token_uri")?;
    Ok(monster)
}

fn monster_to_dict<'py>(py: Python<'py>, monster: &Monster) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("token_id", monster.token_id.as_u64())?;
    dict.set_item("name", &monster.name)?;
    dict.set_item("type", &monster.species)?;
    dict.set_item("attack", monster.attack)?;
    dict.set_item("defense", monster.defense)?;
    dict.set_item("hp", monster.hp)?;
    dict.set_item("rarity", &monster.rarity)?;
    dict.set_item("owner", monster.owner.as_deref())?;
    dict.set_item("token_uri", monster.token_uri.as_deref())?;
    Ok(dict)
}

fn combatant_from_dict(dict: &Bound<'_, PyDict>) -> PyResult<Combatant> {
    Combatant::from_monster(&monster_from_dict(dict)?).map_err(battle_err)
}

fn engine_for(config_json: Option<&str>) -> PyResult<BattleEngine> {
    match config_json {
        Some(json) => {
            let config =
                CoreConfig::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
            BattleEngine::with_config(MoveCatalog::standard(), config.battle)
                .map_err(|e| PyValueError::new_err(e.to_string()))
        }
        None => Ok(default_engine().clone()),
    }
}

fn validator_for(config_json: Option<&str>) -> PyResult<TradeValidator> {
    match config_json {
        Some(json) => {
            let config =
                CoreConfig::from_json(json).map_err(|e| PyValueError::new_err(e.to_string()))?;
            Ok(TradeValidator::with_config(config.trade))
        }
        None => Ok(TradeValidator::new()),
    }
}

// =============================================================================
// Result classes
// =============================================================================

/// Final state of one combatant after a battle.
#[pyclass(frozen, name = "Combatant")]
#[derive(Clone)]
pub struct PyCombatant {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub species: String,
    #[pyo3(get)]
    pub hp: f64,
    #[pyo3(get)]
    pub max_hp: f64,
    #[pyo3(get)]
    pub rarity: String,
    /// Health as a fraction of starting health, [0, 1].
    #[pyo3(get)]
    pub health_pct: f64,
}

impl From<&Combatant> for PyCombatant {
    fn from(c: &Combatant) -> Self {
        Self {
            name: c.name.clone(),
            species: c.species.clone(),
            hp: c.hp,
            max_hp: c.max_hp,
            rarity: c.rarity.to_string(),
            health_pct: c.health_pct(),
        }
    }
}

#[pymethods]
impl PyCombatant {
    fn __repr__(&self) -> String {
        format!(
            "Combatant(name={:?}, hp={:.1}/{:.1})",
            self.name, self.hp, self.max_hp
        )
    }
}

/// Result of a single battle.
#[pyclass(frozen, name = "BattleOutcome")]
pub struct PyBattleOutcome {
    #[pyo3(get)]
    pub winner: PyCombatant,
    #[pyo3(get)]
    pub loser: PyCombatant,
    /// `"A"` or `"B"`.
    #[pyo3(get)]
    pub winner_side: String,
    #[pyo3(get)]
    pub stalemate: bool,
    #[pyo3(get)]
    pub rounds: u32,
    #[pyo3(get)]
    pub log: Vec<String>,
    #[pyo3(get)]
    pub summary: String,
    /// Seed that reproduces this battle.
    #[pyo3(get)]
    pub seed: u64,
}

#[pymethods]
impl PyBattleOutcome {
    /// True if side A won.
    #[getter]
    fn a_won(&self) -> bool {
        self.winner_side == Side::A.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "BattleOutcome(winner={:?}, rounds={}, stalemate={})",
            self.winner.name, self.rounds, self.stalemate
        )
    }
}

/// Aggregate of a parallel battle series.
#[pyclass(frozen, name = "SeriesReport")]
pub struct PySeriesReport {
    #[pyo3(get)]
    pub battles: u32,
    #[pyo3(get)]
    pub a_wins: u32,
    #[pyo3(get)]
    pub b_wins: u32,
    #[pyo3(get)]
    pub stalemates: u32,
    #[pyo3(get)]
    pub a_win_rate: f64,
}

#[pymethods]
impl PySeriesReport {
    fn __repr__(&self) -> String {
        format!(
            "SeriesReport(battles={}, a_wins={}, b_wins={}, stalemates={})",
            self.battles, self.a_wins, self.b_wins, self.stalemates
        )
    }
}

/// Trade decision. `reason` is None when accepted.
#[pyclass(frozen, name = "TradeOutcome")]
pub struct PyTradeOutcome {
    #[pyo3(get)]
    pub accepted: bool,
    #[pyo3(get)]
    pub reason: Option<String>,
    /// `(offered, requested)` token ids when accepted.
    #[pyo3(get)]
    pub tokens: Option<(u64, u64)>,
}

#[pymethods]
impl PyTradeOutcome {
    fn __repr__(&self) -> String {
        match &self.reason {
            None => "TradeOutcome(accepted=True)".to_string(),
            Some(reason) => format!("TradeOutcome(accepted=False, reason={reason:?})"),
        }
    }
}

// =============================================================================
// Functions
// =============================================================================

/// Run a battle between two monster dicts.
///
/// Without a seed, a fresh one is drawn and reported on the outcome so the
/// battle can be replayed.
#[pyfunction]
#[pyo3(signature = (monster_a, monster_b, seed=None, config_json=None))]
fn run_battle(
    monster_a: &Bound<'_, PyDict>,
    monster_b: &Bound<'_, PyDict>,
    seed: Option<u64>,
    config_json: Option<&str>,
) -> PyResult<PyBattleOutcome> {
    let a = combatant_from_dict(monster_a)?;
    let b = combatant_from_dict(monster_b)?;
    let engine = engine_for(config_json)?;

    let mut rng = seed.map_or_else(SeededRng::from_entropy, SeededRng::new);
    let outcome = engine.run(&a, &b, &mut rng).map_err(battle_err)?;

    Ok(PyBattleOutcome {
        winner: PyCombatant::from(&outcome.winner),
        loser: PyCombatant::from(&outcome.loser),
        winner_side: outcome.winner_side.to_string(),
        stalemate: outcome.is_stalemate(),
        rounds: outcome.rounds,
        summary: outcome.summary(),
        log: outcome.log,
        seed: rng.seed(),
    })
}

/// Run `battles` independent battles in parallel and report win counts.
///
/// Releases the GIL while the series runs.
#[pyfunction]
#[pyo3(signature = (monster_a, monster_b, seed, battles, config_json=None))]
fn simulate_series(
    py: Python<'_>,
    monster_a: &Bound<'_, PyDict>,
    monster_b: &Bound<'_, PyDict>,
    seed: u64,
    battles: u32,
    config_json: Option<&str>,
) -> PyResult<PySeriesReport> {
    let a = combatant_from_dict(monster_a)?;
    let b = combatant_from_dict(monster_b)?;
    let engine = engine_for(config_json)?;

    let report = py
        .allow_threads(|| engine.simulate_series(&a, &b, seed, battles))
        .map_err(battle_err)?;

    Ok(PySeriesReport {
        battles: report.battles,
        a_wins: report.a_wins,
        b_wins: report.b_wins,
        stalemates: report.stalemates,
        a_win_rate: report.a_win_rate(),
    })
}

/// Check whether two monsters may be traded.
#[pyfunction]
#[pyo3(signature = (monster_a, monster_b, config_json=None))]
fn validate_trade(
    monster_a: &Bound<'_, PyDict>,
    monster_b: &Bound<'_, PyDict>,
    config_json: Option<&str>,
) -> PyResult<bool> {
    let validator = validator_for(config_json)?;
    validator
        .validate(&monster_from_dict(monster_a)?, &monster_from_dict(monster_b)?)
        .map_err(trade_err)
}

/// Decide a trade of `offered` for `requested`.
///
/// Ownership is not changed; on acceptance the caller submits the transfers.
#[pyfunction]
#[pyo3(signature = (offered, requested, config_json=None))]
fn execute_trade(
    offered: &Bound<'_, PyDict>,
    requested: &Bound<'_, PyDict>,
    config_json: Option<&str>,
) -> PyResult<PyTradeOutcome> {
    let validator = validator_for(config_json)?;
    let outcome = validator
        .execute(&monster_from_dict(offered)?, &monster_from_dict(requested)?)
        .map_err(trade_err)?;

    let tokens = match &outcome {
        chainmon_core::TradeOutcome::Accepted { offered, requested } => {
            Some((offered.as_u64(), requested.as_u64()))
        }
        chainmon_core::TradeOutcome::Rejected { .. } => None,
    };
    Ok(PyTradeOutcome {
        accepted: outcome.accepted(),
        reason: outcome.reason().map(str::to_string),
        tokens,
    })
}

/// Roll stats for a newly minted monster and return it as a monster dict.
///
/// The same seed always yields the same stats.
#[pyfunction]
#[pyo3(signature = (token_id, name, species, seed=None))]
fn roll_monster<'py>(
    py: Python<'py>,
    token_id: u64,
    name: &str,
    species: &str,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyDict>> {
    let mut rng = seed.map_or_else(SeededRng::from_entropy, SeededRng::new);
    monster_to_dict(py, &Monster::roll(token_id, name, species, &mut rng))
}

/// List `(name, description)` for a species; unknown species get the
/// fallback moveset.
#[pyfunction]
fn moves_for(species: &str) -> Vec<(String, String)> {
    default_engine()
        .catalog()
        .moves_for(species)
        .iter()
        .map(|mv| (mv.name.clone(), mv.description.clone()))
        .collect()
}

/// Install a stderr log subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Returns False if a subscriber
/// was already installed.
#[pyfunction]
#[pyo3(signature = (level="info"))]
fn init_logging(level: &str) -> PyResult<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| PyValueError::new_err(e.to_string()))?,
    };
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok())
}

/// Python module definition.
#[pymodule]
fn _chainmon(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCombatant>()?;
    m.add_class::<PyBattleOutcome>()?;
    m.add_class::<PySeriesReport>()?;
    m.add_class::<PyTradeOutcome>()?;
    m.add_function(wrap_pyfunction!(run_battle, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_series, m)?)?;
    m.add_function(wrap_pyfunction!(validate_trade, m)?)?;
    m.add_function(wrap_pyfunction!(execute_trade, m)?)?;
    m.add_function(wrap_pyfunction!(roll_monster, m)?)?;
    m.add_function(wrap_pyfunction!(moves_for, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    tracing::debug!("chainmon module loaded");
    Ok(())
}
