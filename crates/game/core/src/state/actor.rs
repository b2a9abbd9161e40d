//! Unit model: identity, vitals, combat stats and the per-turn action budget.

use strum::{Display, EnumIter, EnumString};

use super::{Position, ResourceMeter, UnitId};
use crate::error::{ErrorSeverity, GameError};

/// Side a unit fights for. Units of the active faction are "friendly".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn opponent(self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Unit class. Informational, but supplies default stats for content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitClass {
    Lord,
    Knight,
    Archer,
    Mage,
    Soldier,
    Brigand,
}

impl UnitClass {
    /// Baseline stats and maximum hp for a freshly recruited unit.
    pub const fn base_stats(self) -> (ActorStats, u32) {
        match self {
            UnitClass::Lord => (ActorStats::new(7, 5, 7, 5, 1), 20),
            UnitClass::Knight => (ActorStats::new(8, 10, 2, 4, 1), 24),
            UnitClass::Archer => (ActorStats::new(6, 3, 6, 5, 2), 17),
            UnitClass::Mage => (ActorStats::new(7, 2, 5, 5, 2), 16),
            UnitClass::Soldier => (ActorStats::new(6, 5, 4, 5, 1), 19),
            UnitClass::Brigand => (ActorStats::new(7, 3, 5, 5, 1), 21),
        }
    }
}

/// Combat stats. Ranges are Manhattan distances in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub strength: u32,
    pub defense: u32,
    pub speed: u32,
    pub movement: u32,
    pub attack_range: u32,
}

impl ActorStats {
    pub const fn new(strength: u32, defense: u32, speed: u32, movement: u32, attack_range: u32) -> Self {
        Self {
            strength,
            defense,
            speed,
            movement,
            attack_range,
        }
    }
}

/// Why an actor refused to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorError {
    #[error("unit {0} has been defeated")]
    Defeated(UnitId),

    #[error("unit {0} has no actions remaining")]
    NoActionsRemaining(UnitId),
}

impl GameError for ActorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Defeated(_) => "ACTOR_DEFEATED",
            Self::NoActionsRemaining(_) => "ACTOR_NO_ACTIONS",
        }
    }
}

/// Result of a resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub attacker: UnitId,
    pub defender: UnitId,
    /// Hit points actually removed from the defender.
    pub damage: u32,
    pub defender_hp: u32,
    pub defeated: bool,
}

/// A controllable unit on the grid.
///
/// # Invariants
///
/// - `hp.current() <= hp.maximum()`
/// - `actions_remaining` is 0 or 1
/// - once `can_move` is false because hp hit zero it never becomes true again
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: UnitId,
    pub name: String,
    pub class: UnitClass,
    pub faction: Faction,
    pub position: Position,
    pub stats: ActorStats,
    hp: ResourceMeter,
    actions_remaining: u8,
    can_move: bool,
}

impl Actor {
    /// Creates a living unit at full health with one action available.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        class: UnitClass,
        faction: Faction,
        position: Position,
        stats: ActorStats,
        max_hp: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            faction,
            position,
            stats,
            hp: ResourceMeter::full(max_hp),
            actions_remaining: 1,
            can_move: max_hp > 0,
        }
    }

    /// Creates a unit using its class defaults.
    pub fn from_class(
        id: UnitId,
        name: impl Into<String>,
        class: UnitClass,
        faction: Faction,
        position: Position,
    ) -> Self {
        let (stats, max_hp) = class.base_stats();
        Self::new(id, name, class, faction, position, stats, max_hp)
    }

    /// Starts the unit wounded. Values above the maximum are clamped.
    pub fn with_hp(mut self, current: u32) -> Self {
        self.hp = ResourceMeter::new(current, self.hp.maximum());
        if self.hp.is_empty() {
            self.can_move = false;
        }
        self
    }

    pub fn with_actions(mut self, actions: u8) -> Self {
        self.actions_remaining = actions.min(1);
        self
    }

    pub fn hp(&self) -> ResourceMeter {
        self.hp
    }

    pub fn actions_remaining(&self) -> u8 {
        self.actions_remaining
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    /// True when the unit may still spend its action this turn.
    pub fn is_ready(&self) -> bool {
        self.can_move && self.actions_remaining > 0
    }

    fn ensure_ready(&self) -> Result<(), ActorError> {
        if !self.can_move {
            return Err(ActorError::Defeated(self.id));
        }
        if self.actions_remaining == 0 {
            return Err(ActorError::NoActionsRemaining(self.id));
        }
        Ok(())
    }

    /// Relocates the unit. Does not spend the action; range and terrain are
    /// checked by the phase manager.
    pub fn move_to(&mut self, destination: Position) -> Result<(), ActorError> {
        self.ensure_ready()?;
        self.position = destination;
        Ok(())
    }

    /// Strikes `target` for `max(0, strength - target.defense)` and spends
    /// the action, even when the blow deals nothing.
    pub fn attack(&mut self, target: &mut Actor) -> Result<AttackReport, ActorError> {
        self.ensure_ready()?;

        let raw = self.stats.strength.saturating_sub(target.stats.defense);
        let damage = target.receive_damage(raw);
        self.actions_remaining = 0;

        Ok(AttackReport {
            attacker: self.id,
            defender: target.id,
            damage,
            defender_hp: target.hp.current(),
            defeated: !target.is_alive(),
        })
    }

    /// Applies damage, saturating at zero hp. Returns the hp actually lost.
    pub fn receive_damage(&mut self, amount: u32) -> u32 {
        let removed = self.hp.drain(amount);
        if self.hp.is_empty() {
            self.can_move = false;
            self.actions_remaining = 0;
        }
        removed
    }

    pub fn end_turn(&mut self) {
        self.actions_remaining = 0;
    }

    /// Restores the per-turn budget. Defeated units stay exhausted.
    pub fn refresh(&mut self, budget: u8) {
        if self.can_move {
            self.actions_remaining = budget.min(1);
        }
    }

    pub fn distance_to(&self, other: &Actor) -> u32 {
        self.position.manhattan(other.position)
    }
}
