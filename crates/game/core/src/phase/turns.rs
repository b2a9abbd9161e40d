use crate::config::GameConfig;
use crate::events::Event;
use crate::state::Faction;

use super::PhaseManager;

/// Turn bookkeeping shared by both factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// 1-based turn counter, incremented on every hand-off.
    pub number: u32,
    /// Faction whose units are friendly this turn.
    pub active: Faction,
    /// Hand-offs left before the turn limit ends the battle.
    pub remaining: Option<u32>,
}

impl TurnState {
    pub fn new(active: Faction, turn_limit: Option<u32>) -> Self {
        Self {
            number: 1,
            active,
            remaining: turn_limit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// The named faction is the only one with living units.
    Victory(Faction),
    /// Turn limit exhausted, or nobody left standing.
    Draw,
}

/// Turn hand-off and battle-end detection for PhaseManager.
impl PhaseManager {
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Passes the turn to the opposing faction, or keeps it if the opponent
    /// has no living units left.
    pub(super) fn hand_off(&mut self) {
        self.turn.number += 1;
        if let Some(remaining) = self.turn.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        if self.turn.remaining == Some(0) {
            self.finish(BattleOutcome::Draw);
            return;
        }

        let current = self.turn.active;
        let next = if self.roster.living(current.opponent()).next().is_some() {
            current.opponent()
        } else {
            current
        };

        self.turn.active = next;
        self.roster.refresh(next, GameConfig::ACTIONS_PER_TURN);

        tracing::info!(
            turn = self.turn.number,
            faction = %next,
            remaining = ?self.turn.remaining,
            "turn handed off"
        );
        self.events.push(Event::TurnAdvanced {
            number: self.turn.number,
            faction: next,
            remaining: self.turn.remaining,
        });

        self.focus_ready_unit();
    }

    /// Records the battle result if at most one faction still has living units.
    pub(super) fn evaluate_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }

        let player = self.roster.living(Faction::Player).next().is_some();
        let enemy = self.roster.living(Faction::Enemy).next().is_some();
        let outcome = match (player, enemy) {
            (true, true) => return,
            (true, false) => BattleOutcome::Victory(Faction::Player),
            (false, true) => BattleOutcome::Victory(Faction::Enemy),
            (false, false) => BattleOutcome::Draw,
        };
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        tracing::info!(?outcome, turn = self.turn.number, "battle ended");
        self.outcome = Some(outcome);
        self.events.push(Event::BattleEnded(outcome));
    }
}
