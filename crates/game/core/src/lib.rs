//! Deterministic rules for a turn-based grid tactics battle.
//!
//! `tactics-core` defines the terrain grid, the unit model and the turn phase
//! machine, and exposes pure APIs that hosts drive once per frame. All battle
//! state mutation flows through [`phase::PhaseManager`]; frontends feed it
//! through [`input::InputHandler`] and observe it through [`events::EventBus`]
//! or [`scene::Frame`].
pub mod config;
pub mod cursor;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod phase;
pub mod scene;
pub mod state;

pub use config::GameConfig;
pub use cursor::{Direction, Selector};
pub use error::{ErrorSeverity, GameError};
pub use events::{Event, EventBus, SubscriptionId, Topic};
pub use grid::{Grid, GridBuilder, GridDimensions, PaintCommand, Terrain};
pub use input::{InputHandler, InputSource, Key, TickInput};
pub use phase::{BattleOutcome, Command, Phase, PhaseManager, Rejection, Transition, TurnState};
pub use scene::{BattleScene, Frame, Renderer, Scene};
pub use state::{
    Actor, ActorError, ActorStats, AttackReport, Faction, Position, ResourceMeter, Roster,
    RosterError, UnitClass, UnitId,
};
