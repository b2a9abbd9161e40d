//! Scenario loader.
//!
//! A scenario bundles the terrain paint script with the starting roster:
//!
//! ```ron
//! (
//!     name: "Ridge",
//!     grid: Some((cols: 12, rows: 8)),
//!     paint: [VLine(col: 0, from: 0, to: 11, thickness: 1, terrain: Mountain)],
//!     units: [(name: "Alm", class: Lord, faction: Player, position: (x: 2, y: 4))],
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{
    Actor, ActorStats, Faction, GridDimensions, PaintCommand, Position, UnitClass, UnitId,
};

use crate::loaders::{LoadResult, read_file};

/// Scenario file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioData {
    pub name: String,
    /// Grid size; falls back to the configured default when absent.
    #[serde(default)]
    pub grid: Option<GridDimensions>,
    #[serde(default)]
    pub paint: Vec<PaintCommand>,
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

/// Placement of a single unit. Omitted stats come from the class defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Explicit id; units without one are numbered by their list position.
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub class: UnitClass,
    pub faction: Faction,
    pub position: Position,
    #[serde(default)]
    pub stats: Option<ActorStats>,
    /// Starting hit points (defaults to full health).
    #[serde(default)]
    pub hp: Option<u32>,
    /// Maximum hit points (defaults to the class value).
    #[serde(default)]
    pub max_hp: Option<u32>,
}

impl UnitSpec {
    /// Materialises the unit. `index` is its position in the scenario list.
    pub fn to_actor(&self, index: usize) -> Actor {
        let id = self.id.unwrap_or(index as u32 + 1);
        let (base_stats, base_hp) = self.class.base_stats();
        let actor = Actor::new(
            UnitId(id),
            self.name.clone(),
            self.class,
            self.faction,
            self.position,
            self.stats.unwrap_or(base_stats),
            self.max_hp.unwrap_or(base_hp),
        );
        match self.hp {
            Some(hp) => actor.with_hp(hp),
            None => actor,
        }
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioData> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioData> {
        let data: ScenarioData = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        tracing::debug!(
            scenario = %data.name,
            paint = data.paint.len(),
            units = data.units.len(),
            "scenario parsed"
        );
        Ok(data)
    }
}
