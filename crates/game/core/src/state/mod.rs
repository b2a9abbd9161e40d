//! Battle state: unit identity, positions, vitals and the roster.
//!
//! Everything here is plain data with local invariants. Cross-unit rules
//! (who may act, what counts as in range) belong to [`crate::phase`].

mod actor;
mod common;
mod roster;

pub use actor::{Actor, ActorError, ActorStats, AttackReport, Faction, UnitClass};
pub use common::{Position, ResourceMeter, UnitId};
pub use roster::{Roster, RosterError};
