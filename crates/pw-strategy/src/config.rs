//! Tunable strategy parameters.

use serde::{Deserialize, Serialize};

use pw_core::{Ships, Turns};

/// All knobs of the default topology. Missing YAML fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    #[serde(default)]
    pub offense: OffenseConfig,

    #[serde(default)]
    pub spread: SpreadConfig,

    #[serde(default)]
    pub defense: DefenseConfig,

    #[serde(default)]
    pub steal: StealConfig,

    /// Iteration cap for every repeat-until-failure loop in the tree. Unbounded when unset.
    #[serde(default)]
    pub loop_cap: Option<usize>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            offense: OffenseConfig::default(),
            spread: SpreadConfig::default(),
            defense: DefenseConfig::default(),
            steal: StealConfig::default(),
            loop_cap: None,
        }
    }
}

/// Attacks on the weakest enemy planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffenseConfig {
    /// The strongest allied planet must hold at least this many ships before we attack.
    #[serde(default = "default_offense_min_source")]
    pub min_source_ships: Ships,

    /// Share of each source's free ships sent by the muster loop.
    #[serde(default = "default_muster_fraction")]
    pub muster_fraction: f64,

    /// Only attack while our total strength exceeds the enemy's.
    #[serde(default)]
    pub require_largest_fleet: bool,
}

fn default_offense_min_source() -> Ships {
    20
}
fn default_muster_fraction() -> f64 {
    0.65
}

impl Default for OffenseConfig {
    fn default() -> Self {
        Self {
            min_source_ships: default_offense_min_source(),
            muster_fraction: default_muster_fraction(),
            require_largest_fleet: false,
        }
    }
}

/// Expansion into nearby neutral planets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    #[serde(default = "default_spread_min_source")]
    pub min_source_ships: Ships,

    /// Furthest neutral planet considered, in turns.
    #[serde(default = "default_spread_range")]
    pub max_range: Turns,

    #[serde(default = "default_quarter")]
    pub send_fraction: f64,
}

fn default_spread_min_source() -> Ships {
    10
}
fn default_spread_range() -> Turns {
    10
}
fn default_quarter() -> f64 {
    0.25
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            min_source_ships: default_spread_min_source(),
            max_range: default_spread_range(),
            send_fraction: default_quarter(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    /// Share of the defender's free ships sent to the threatened planet.
    #[serde(default = "default_quarter")]
    pub send_fraction: f64,

    /// Defense only runs while we own at least this many planets.
    #[serde(default = "default_min_owned")]
    pub min_owned_planets: usize,
}

fn default_min_owned() -> usize {
    2
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            send_fraction: default_quarter(),
            min_owned_planets: default_min_owned(),
        }
    }
}

/// Snatching neutral planets the enemy is about to capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StealConfig {
    /// Turns after the enemy capture during which a steal is still worth it.
    #[serde(default = "default_grace")]
    pub grace_turns: Turns,

    /// Discount applied to allied free ships when sizing up a steal.
    #[serde(default = "default_steal_fraction")]
    pub fraction: f64,

    /// Largest post-capture garrison we are willing to fight.
    #[serde(default = "default_max_reinforcement")]
    pub max_reinforcement: Ships,
}

fn default_grace() -> Turns {
    3
}
fn default_steal_fraction() -> f64 {
    0.7
}
fn default_max_reinforcement() -> Ships {
    50
}

impl Default for StealConfig {
    fn default() -> Self {
        Self {
            grace_turns: default_grace(),
            fraction: default_steal_fraction(),
            max_reinforcement: default_max_reinforcement(),
        }
    }
}
