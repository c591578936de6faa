//! Bot configuration, loaded from a YAML file.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use pw_strategy::StrategyConfig;

/// Top-level configuration file.
///
/// ```yaml
/// strategy:
///   offense:
///     muster_fraction: 0.65
///   loop_cap: 256
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl BotConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let s = &self.strategy;
        for (name, fraction) in [
            ("offense.muster_fraction", s.offense.muster_fraction),
            ("spread.send_fraction", s.spread.send_fraction),
            ("defense.send_fraction", s.defense.send_fraction),
            ("steal.fraction", s.steal.fraction),
        ] {
            ensure!(
                (0.0..=1.0).contains(&fraction),
                "{name} must be within [0, 1], got {fraction}"
            );
        }
        ensure!(s.spread.max_range >= 0, "spread.max_range must not be negative");
        ensure!(s.steal.grace_turns >= 0, "steal.grace_turns must not be negative");
        ensure!(s.loop_cap != Some(0), "loop_cap must be at least 1 when set");
        Ok(())
    }
}
