use super::{Actor, Faction, Position, UnitId};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while assembling a roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RosterError {
    #[error("unit id {0} is already registered")]
    DuplicateId(UnitId),

    #[error("cell {position} is already occupied by {occupant}")]
    CellTaken { position: Position, occupant: UnitId },
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "ROSTER_DUPLICATE_ID",
            Self::CellTaken { .. } => "ROSTER_CELL_TAKEN",
        }
    }
}

/// Ordered collection of every unit in the battle, living or defeated.
///
/// Defeated units remain in the roster (they are still drawn) but never
/// occupy a cell for movement or targeting purposes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    actors: Vec<Actor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit, rejecting duplicate ids and stacking on a living unit.
    pub fn insert(&mut self, actor: Actor) -> Result<(), RosterError> {
        if self.index_of(actor.id).is_some() {
            return Err(RosterError::DuplicateId(actor.id));
        }
        if actor.is_alive()
            && let Some(occupant) = self.at(actor.position)
        {
            return Err(RosterError::CellTaken {
                position: actor.position,
                occupant: occupant.id,
            });
        }
        self.actors.push(actor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn get(&self, id: UnitId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    fn index_of(&self, id: UnitId) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id == id)
    }

    /// Living unit standing on `position`, if any.
    pub fn at(&self, position: Position) -> Option<&Actor> {
        self.actors
            .iter()
            .find(|actor| actor.is_alive() && actor.position == position)
    }

    /// Borrows two distinct units mutably at once. Returns `None` if either id
    /// is unknown or both ids are the same.
    pub fn pair_mut(&mut self, a: UnitId, b: UnitId) -> Option<(&mut Actor, &mut Actor)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (left, right) = self.actors.split_at_mut(ib);
            Some((&mut left[ia], &mut right[0]))
        } else {
            let (left, right) = self.actors.split_at_mut(ia);
            Some((&mut right[0], &mut left[ib]))
        }
    }

    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &Actor> {
        self.actors
            .iter()
            .filter(move |actor| actor.faction == faction && actor.is_alive())
    }

    /// True if some unit of `faction` can still spend an action this turn.
    pub fn has_ready(&self, faction: Faction) -> bool {
        self.living(faction).any(Actor::is_ready)
    }

    /// Restores the action budget of every living unit of `faction`.
    pub fn refresh(&mut self, faction: Faction, budget: u8) {
        for actor in self.actors.iter_mut().filter(|a| a.faction == faction) {
            actor.refresh(budget);
        }
    }

    /// Builds a roster from a list of units, stopping at the first conflict.
    pub fn from_actors(actors: impl IntoIterator<Item = Actor>) -> Result<Self, RosterError> {
        let mut roster = Roster::new();
        for actor in actors {
            roster.insert(actor)?;
        }
        Ok(roster)
    }
}
