//! Content factory for assembling a battle from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tactics_core::{GameConfig, GridBuilder, PhaseManager, Roster};

use crate::loaders::{ConfigLoader, LoadResult, ScenarioData, ScenarioLoader};

/// Bundled sample battle on the classic 12x8 grid.
const SAMPLE_SCENARIO: &str = include_str!("../../data/scenarios/skirmish.ron");

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a named scenario from `scenarios/<name>.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioData> {
        let path = self.data_dir.join("scenarios").join(format!("{name}.ron"));
        ScenarioLoader::load(&path)
    }

    /// Load config and the named scenario, then build the battle.
    pub fn load_battle(&self, name: &str) -> LoadResult<PhaseManager> {
        let config = self.load_config()?;
        let scenario = self.load_scenario(name)?;
        Self::build(&scenario, &config)
    }

    /// Paints the grid, places every unit and starts the phase machine.
    ///
    /// Units must start inside the grid, on walkable terrain, and never share
    /// a cell.
    pub fn build(scenario: &ScenarioData, config: &GameConfig) -> LoadResult<PhaseManager> {
        let dimensions = scenario.grid.unwrap_or(config.grid);
        let grid = GridBuilder::new(dimensions)
            .apply_all(&scenario.paint)
            .build();

        let mut roster = Roster::new();
        for (index, spec) in scenario.units.iter().enumerate() {
            let actor = spec.to_actor(index);
            let terrain = grid.terrain(actor.position).with_context(|| {
                format!(
                    "unit '{}' starts outside the {}x{} grid at {}",
                    actor.name, dimensions.cols, dimensions.rows, actor.position
                )
            })?;
            anyhow::ensure!(
                terrain.is_walkable(),
                "unit '{}' starts on {} at {}",
                actor.name,
                terrain,
                actor.position
            );
            roster
                .insert(actor)
                .with_context(|| format!("failed to place unit '{}'", spec.name))?;
        }

        tracing::info!(
            scenario = %scenario.name,
            cols = dimensions.cols,
            rows = dimensions.rows,
            units = roster.len(),
            "battle assembled"
        );
        Ok(PhaseManager::new(grid, roster, config))
    }

    /// The bundled sample scenario.
    pub fn sample_scenario() -> LoadResult<ScenarioData> {
        ScenarioLoader::parse(SAMPLE_SCENARIO)
    }

    /// The bundled sample battle with the given rules.
    pub fn sample(config: &GameConfig) -> LoadResult<PhaseManager> {
        Self::build(&Self::sample_scenario()?, config)
    }

    /// Loads a scenario from an explicit path rather than the data directory.
    pub fn battle_from_path(path: &Path, config: &GameConfig) -> LoadResult<PhaseManager> {
        let scenario = ScenarioLoader::load(path)?;
        Self::build(&scenario, config)
    }
}
