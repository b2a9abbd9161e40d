//! Turn phase state machine.
//!
//! [`PhaseManager`] is the only owner of the grid, the roster, the selector
//! and the turn counter. Everything else reads them through accessors or asks
//! for a change through one of the transition methods below, each of which
//! returns `Result<Transition, Rejection>`:
//!
//! ```text
//! SELECT --select--> MOVE --confirm_move--> ATTACK --attack/skip_attack--> END
//!   ^                                                                       |
//!   +------------------------------- proceed -------------------------------+
//! ```
//!
//! `cancel` returns to SELECT from anywhere, putting a unit that moved but
//! has not yet acted back on its starting cell. A faction keeps the turn
//! until none of its units can act; only then is it handed to the opponent.
//! A rejected command changes nothing: the phase, every unit and the turn
//! counter stay as they were.

mod command;
mod errors;
mod turns;

pub use command::{Command, Transition};
pub use errors::Rejection;
pub use turns::{BattleOutcome, TurnState};

use strum::{Display, EnumIter};

use crate::config::GameConfig;
use crate::cursor::{Direction, Selector};
use crate::error::GameError;
use crate::events::Event;
use crate::grid::Grid;
use crate::state::{Actor, Position, Roster, UnitId};

/// Step of the active unit's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Select,
    Move,
    Attack,
    End,
}

impl Phase {
    /// The only legal forward successor.
    pub const fn next(self) -> Phase {
        match self {
            Phase::Select => Phase::Move,
            Phase::Move => Phase::Attack,
            Phase::Attack => Phase::End,
            Phase::End => Phase::Select,
        }
    }
}

#[derive(Debug)]
pub struct PhaseManager {
    grid: Grid,
    roster: Roster,
    selector: Selector,
    phase: Phase,
    active: Option<UnitId>,
    /// Cell the active unit left on its uncommitted move.
    origin: Option<Position>,
    turn: TurnState,
    outcome: Option<BattleOutcome>,
    events: Vec<Event>,
}

impl PhaseManager {
    /// Starts a battle in the SELECT phase with the configured faction to act.
    pub fn new(grid: Grid, mut roster: Roster, config: &GameConfig) -> Self {
        let turn = TurnState::new(config.first_faction, config.turn_limit);
        roster.refresh(turn.active, GameConfig::ACTIONS_PER_TURN);
        let selector = Selector::new(Position::ORIGIN, grid.dimensions());

        let mut manager = Self {
            grid,
            roster,
            selector,
            phase: Phase::Select,
            active: None,
            origin: None,
            turn,
            outcome: None,
            events: Vec::new(),
        };
        manager.focus_ready_unit();
        manager.evaluate_outcome();
        manager
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn selector(&self) -> Position {
        self.selector.position()
    }

    /// Unit whose turn is in progress, from selection until proceed or cancel.
    pub fn active_unit(&self) -> Option<&Actor> {
        self.active.and_then(|id| self.roster.get(id))
    }

    /// Takes every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ===== cursor =====

    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let moved = self.selector.step(direction);
        if moved {
            self.events.push(Event::CursorMoved {
                position: self.selector.position(),
                direction: Some(direction),
            });
        }
        moved
    }

    pub fn set_cursor(&mut self, position: Position) -> bool {
        let moved = self.selector.set(position);
        if moved {
            self.events.push(Event::CursorMoved {
                position: self.selector.position(),
                direction: None,
            });
        }
        moved
    }

    /// Places the cursor on the first friendly unit able to act, if any.
    fn focus_ready_unit(&mut self) {
        let target = self
            .roster
            .living(self.turn.active)
            .find(|actor| actor.is_ready())
            .map(|actor| actor.position);
        if let Some(position) = target {
            self.set_cursor(position);
        }
    }

    // ===== transitions =====

    /// Routes a command to its transition, targeting the selector cell.
    pub fn handle(&mut self, command: Command) -> Result<Transition, Rejection> {
        let target = self.selector.position();
        match command {
            Command::Select => self.select(target),
            Command::ConfirmMove => self.confirm_move(target),
            Command::Attack => self.attack(target),
            Command::SkipAttack => self.skip_attack(),
            Command::Proceed => self.proceed(),
            Command::Cancel => self.cancel(),
        }
    }

    /// SELECT -> MOVE: picks the friendly unit on `position`.
    pub fn select(&mut self, position: Position) -> Result<Transition, Rejection> {
        let result = self.try_select(position);
        self.settle(Command::Select, result)
    }

    /// MOVE -> ATTACK: relocates the active unit to `position`.
    pub fn confirm_move(&mut self, position: Position) -> Result<Transition, Rejection> {
        let result = self.try_confirm_move(position);
        self.settle(Command::ConfirmMove, result)
    }

    /// ATTACK -> END: strikes the hostile unit on `position`.
    pub fn attack(&mut self, position: Position) -> Result<Transition, Rejection> {
        let result = self.try_attack(position);
        self.settle(Command::Attack, result)
    }

    /// ATTACK -> END without resolving any damage.
    pub fn skip_attack(&mut self) -> Result<Transition, Rejection> {
        let result = self.try_skip_attack();
        self.settle(Command::SkipAttack, result)
    }

    /// END -> SELECT: closes the unit's turn. The faction keeps the turn
    /// while any of its units can still act.
    pub fn proceed(&mut self) -> Result<Transition, Rejection> {
        let result = self.try_proceed();
        self.settle(Command::Proceed, result)
    }

    /// Any phase -> SELECT, abandoning the current selection.
    ///
    /// A move not yet followed by an attack or skip is undone. If the active
    /// faction has nobody left able to act, the turn is handed off.
    pub fn cancel(&mut self) -> Result<Transition, Rejection> {
        let result = self.try_cancel();
        self.settle(Command::Cancel, result)
    }

    fn try_select(&mut self, position: Position) -> Result<Transition, Rejection> {
        self.expect_phase(Command::Select)?;

        let actor = self
            .roster
            .at(position)
            .ok_or(Rejection::NoUnitAtCell(position))?;
        if actor.faction != self.turn.active {
            return Err(Rejection::NotFriendly(actor.id));
        }
        if !actor.can_move() {
            return Err(Rejection::UnitDefeated(actor.id));
        }
        if actor.actions_remaining() == 0 {
            return Err(Rejection::NoActionsRemaining(actor.id));
        }

        let id = actor.id;
        self.active = Some(id);
        self.set_cursor(position);
        Ok(self.enter(Phase::Move, Some(id)))
    }

    fn try_confirm_move(&mut self, target: Position) -> Result<Transition, Rejection> {
        self.expect_phase(Command::ConfirmMove)?;
        let id = self.active_id()?;
        let actor = self.roster.get(id).ok_or(Rejection::NoActiveUnit(self.phase))?;

        let terrain = self
            .grid
            .terrain(target)
            .ok_or(Rejection::OutOfBounds(target))?;
        let distance = actor.position.manhattan(target);
        if distance > actor.stats.movement {
            return Err(Rejection::OutOfRange {
                target,
                distance,
                range: actor.stats.movement,
            });
        }
        if !terrain.is_walkable() {
            return Err(Rejection::Unwalkable { target, terrain });
        }
        if let Some(occupant) = self.roster.at(target)
            && occupant.id != id
        {
            return Err(Rejection::Occupied {
                target,
                occupant: occupant.id,
            });
        }

        let actor = self
            .roster
            .get_mut(id)
            .ok_or(Rejection::NoActiveUnit(self.phase))?;
        let origin = actor.position;
        actor.move_to(target)?;
        self.origin = Some(origin);

        if origin != target {
            self.events.push(Event::UnitMoved {
                unit: id,
                from: origin,
                to: target,
            });
        }
        Ok(self.enter(Phase::Attack, Some(id)))
    }

    fn try_attack(&mut self, target: Position) -> Result<Transition, Rejection> {
        self.expect_phase(Command::Attack)?;
        let id = self.active_id()?;
        let attacker = self.roster.get(id).ok_or(Rejection::NoActiveUnit(self.phase))?;

        let defender = self
            .roster
            .at(target)
            .filter(|defender| defender.faction != attacker.faction)
            .ok_or(Rejection::InvalidTarget(target))?;
        let distance = attacker.distance_to(defender);
        if distance > attacker.stats.attack_range {
            return Err(Rejection::OutOfRange {
                target,
                distance,
                range: attacker.stats.attack_range,
            });
        }

        let defender_id = defender.id;
        let (attacker, defender) = self
            .roster
            .pair_mut(id, defender_id)
            .ok_or(Rejection::InvalidTarget(target))?;
        let report = attacker.attack(defender)?;
        let defeated_faction = report.defeated.then_some(defender.faction);

        tracing::debug!(
            attacker = %report.attacker,
            defender = %report.defender,
            damage = report.damage,
            hp = report.defender_hp,
            "attack resolved"
        );
        self.events.push(Event::Attacked(report));
        if let Some(faction) = defeated_faction {
            self.events.push(Event::UnitDefeated {
                unit: defender_id,
                faction,
            });
        }

        let transition = self.enter_end();
        self.evaluate_outcome();
        Ok(transition)
    }

    fn try_skip_attack(&mut self) -> Result<Transition, Rejection> {
        self.expect_phase(Command::SkipAttack)?;
        self.active_id()?;
        Ok(self.enter_end())
    }

    fn try_proceed(&mut self) -> Result<Transition, Rejection> {
        self.expect_phase(Command::Proceed)?;

        if let Some(actor) = self.active.and_then(|id| self.roster.get_mut(id)) {
            actor.end_turn();
        }
        let unit = self.active.take();
        let transition = self.enter(Phase::Select, unit);
        if self.roster.has_ready(self.turn.active) {
            self.focus_ready_unit();
        } else {
            self.hand_off();
        }
        Ok(transition)
    }

    fn try_cancel(&mut self) -> Result<Transition, Rejection> {
        self.expect_phase(Command::Cancel)?;

        self.undo_move();
        let unit = self.active.take();
        let transition = self.enter(Phase::Select, unit);
        if !self.roster.has_ready(self.turn.active) {
            self.hand_off();
        }
        Ok(transition)
    }

    // ===== helpers =====

    fn expect_phase(&self, command: Command) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::BattleOver);
        }
        match command.expected_phase() {
            Some(phase) if phase != self.phase => Err(Rejection::WrongPhase {
                command,
                phase: self.phase,
            }),
            _ => Ok(()),
        }
    }

    fn active_id(&self) -> Result<UnitId, Rejection> {
        self.active.ok_or(Rejection::NoActiveUnit(self.phase))
    }

    /// Puts the active unit back where its uncommitted move started.
    fn undo_move(&mut self) {
        let Some(origin) = self.origin.take() else {
            return;
        };
        let Some(actor) = self.active.and_then(|id| self.roster.get_mut(id)) else {
            return;
        };
        let from = actor.position;
        actor.position = origin;
        if from != origin {
            self.events.push(Event::UnitMoved {
                unit: actor.id,
                from,
                to: origin,
            });
        }
    }

    /// Ends the active unit's turn and commits its move.
    fn enter_end(&mut self) -> Transition {
        self.origin = None;
        if let Some(actor) = self.active.and_then(|id| self.roster.get_mut(id)) {
            actor.end_turn();
        }
        self.enter(Phase::End, self.active)
    }

    fn enter(&mut self, to: Phase, unit: Option<UnitId>) -> Transition {
        let from = self.phase;
        self.phase = to;
        if from != to {
            self.events.push(Event::PhaseChanged { from, to, unit });
        }
        Transition::new(from, to)
    }

    fn settle(
        &mut self,
        command: Command,
        result: Result<Transition, Rejection>,
    ) -> Result<Transition, Rejection> {
        match &result {
            Ok(transition) => {
                tracing::debug!(%command, from = %transition.from, to = %transition.to, "transition accepted");
            }
            Err(rejection) if rejection.severity().is_internal() => {
                tracing::warn!(
                    %command,
                    phase = %self.phase,
                    code = rejection.error_code(),
                    "inconsistent battle state: {rejection}"
                );
                self.events.push(Event::ActionRejected {
                    command,
                    rejection: rejection.clone(),
                });
            }
            Err(rejection) => {
                tracing::debug!(
                    %command,
                    phase = %self.phase,
                    code = rejection.error_code(),
                    severity = rejection.severity().as_str(),
                    "command rejected: {rejection}"
                );
                self.events.push(Event::ActionRejected {
                    command,
                    rejection: rejection.clone(),
                });
            }
        }
        result
    }
}
