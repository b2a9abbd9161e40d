//! Battle configuration loader.

use std::path::Path;

use tactics_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Faction, GridDimensions};

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("first_faction = \"Enemy\"").unwrap();
        assert_eq!(config.first_faction, Faction::Enemy);
        assert_eq!(config.grid, GridDimensions::new(12, 8));
        assert_eq!(config.turn_limit, None);
    }

    #[test]
    fn rejects_unknown_faction() {
        assert!(ConfigLoader::parse("first_faction = \"Neutral\"").is_err());
    }
}
