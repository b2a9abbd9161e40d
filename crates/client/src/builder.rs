//! Assembles a battle from the client configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tactics_content::{ConfigLoader, ContentFactory};
use tactics_core::{GameConfig, PhaseManager};

use crate::config::ClientConfig;

/// Fluent builder resolving rules and scenario files into a ready battle.
///
/// Missing paths fall back to the built-in rules and the bundled sample.
#[derive(Clone, Debug, Default)]
pub struct BattleBuilder {
    rules: Option<PathBuf>,
    scenario: Option<PathBuf>,
}

impl BattleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            rules: config.rules.clone(),
            scenario: config.scenario.clone(),
        }
    }

    pub fn rules(mut self, path: impl Into<PathBuf>) -> Self {
        self.rules = Some(path.into());
        self
    }

    pub fn scenario(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario = Some(path.into());
        self
    }

    pub fn build(self) -> Result<PhaseManager> {
        let rules = match &self.rules {
            Some(path) => ConfigLoader::load(path)
                .with_context(|| format!("loading rules from {}", path.display()))?,
            None => GameConfig::default(),
        };

        let manager = match &self.scenario {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading scenario");
                ContentFactory::battle_from_path(path, &rules)?
            }
            None => {
                tracing::info!("no scenario configured, using the bundled sample");
                ContentFactory::sample(&rules)?
            }
        };
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tactics_core::Faction;

    #[test]
    fn defaults_to_bundled_sample() {
        let manager = BattleBuilder::new().build().unwrap();
        assert_eq!(manager.roster().len(), 6);
        assert_eq!(manager.turn().remaining, None);
    }

    #[test]
    fn rules_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        fs::write(&path, "turn_limit = 5\nfirst_faction = \"Enemy\"\n").unwrap();

        let manager = BattleBuilder::new().rules(&path).build().unwrap();
        assert_eq!(manager.turn().remaining, Some(5));
        assert_eq!(manager.turn().active, Faction::Enemy);
    }

    #[test]
    fn missing_scenario_reports_path() {
        let err = BattleBuilder::new()
            .scenario("/nonexistent/battle.ron")
            .build()
            .unwrap_err();
        assert!(format!("{err:#}").contains("battle.ron"), "{err:#}");
    }
}
