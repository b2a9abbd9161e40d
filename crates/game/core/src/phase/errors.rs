//! Rejection reasons for phase transitions.

use super::{Command, Phase};
use crate::error::{ErrorSeverity, GameError};
use crate::grid::Terrain;
use crate::state::{ActorError, Position, UnitId};

/// Why a command was refused. A rejected command leaves every piece of
/// battle state untouched and the phase where it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error("{command} is not accepted during the {phase} phase")]
    WrongPhase { command: Command, phase: Phase },

    #[error("no unit stands on {0}")]
    NoUnitAtCell(Position),

    #[error("unit {0} does not belong to the active faction")]
    NotFriendly(UnitId),

    #[error("unit {0} has been defeated")]
    UnitDefeated(UnitId),

    #[error("unit {0} has no actions remaining")]
    NoActionsRemaining(UnitId),

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("cell {target} is {distance} away, beyond range {range}")]
    OutOfRange {
        target: Position,
        distance: u32,
        range: u32,
    },

    #[error("cell {target} is {terrain} and cannot be entered")]
    Unwalkable { target: Position, terrain: Terrain },

    #[error("cell {target} is occupied by {occupant}")]
    Occupied { target: Position, occupant: UnitId },

    #[error("no hostile unit stands on {0}")]
    InvalidTarget(Position),

    #[error("the battle is over")]
    BattleOver,

    #[error("no unit is acting in the {0} phase")]
    NoActiveUnit(Phase),
}

impl From<ActorError> for Rejection {
    fn from(error: ActorError) -> Self {
        match error {
            ActorError::Defeated(id) => Rejection::UnitDefeated(id),
            ActorError::NoActionsRemaining(id) => Rejection::NoActionsRemaining(id),
        }
    }
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoUnitAtCell(_)
            | Self::OutOfBounds(_)
            | Self::OutOfRange { .. }
            | Self::Unwalkable { .. }
            | Self::Occupied { .. }
            | Self::InvalidTarget(_) => ErrorSeverity::Recoverable,
            Self::WrongPhase { .. }
            | Self::NotFriendly(_)
            | Self::UnitDefeated(_)
            | Self::NoActionsRemaining(_)
            | Self::BattleOver => ErrorSeverity::Validation,
            Self::NoActiveUnit(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongPhase { .. } => "WRONG_PHASE",
            Self::NoUnitAtCell(_) => "NO_UNIT_AT_CELL",
            Self::NotFriendly(_) => "NOT_FRIENDLY",
            Self::UnitDefeated(_) => "UNIT_DEFEATED",
            Self::NoActionsRemaining(_) => "NO_ACTIONS_REMAINING",
            Self::OutOfBounds(_) => "OUT_OF_BOUNDS",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::Unwalkable { .. } => "UNWALKABLE",
            Self::Occupied { .. } => "OCCUPIED",
            Self::InvalidTarget(_) => "INVALID_TARGET",
            Self::BattleOver => "BATTLE_OVER",
            Self::NoActiveUnit(_) => "NO_ACTIVE_UNIT",
        }
    }
}
