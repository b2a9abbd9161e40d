use crate::grid::GridDimensions;
use crate::state::Faction;

/// Battle rules and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Grid size used when a scenario does not specify one.
    pub grid: GridDimensions,
    /// Number of turn hand-offs before the battle ends in a draw.
    pub turn_limit: Option<u32>,
    /// Faction that opens the battle.
    pub first_faction: Faction,
}

impl GameConfig {
    // ===== fixed rules =====
    /// Actions granted to each unit when its faction's turn starts.
    pub const ACTIONS_PER_TURN: u8 = 1;

    pub fn new() -> Self {
        Self {
            grid: GridDimensions::default(),
            turn_limit: None,
            first_faction: Faction::Player,
        }
    }

    pub fn with_turn_limit(mut self, turn_limit: u32) -> Self {
        self.turn_limit = Some(turn_limit);
        self
    }

    pub fn with_first_faction(mut self, faction: Faction) -> Self {
        self.first_faction = faction;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
