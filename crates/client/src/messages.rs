//! Battle log lines shown under the grid.

use std::collections::VecDeque;

use tactics_core::{BattleOutcome, Event};

/// Bounded log of the most recent battle messages, oldest first.
#[derive(Clone, Debug)]
pub struct MessageLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub const DEFAULT_CAPACITY: usize = 6;

    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Records `event` if it is worth a line.
    pub fn record(&mut self, event: &Event) {
        if let Some(line) = describe(event) {
            self.push(line);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::UnitMoved { unit, from, to } => format!("{unit} moved {from} -> {to}"),
        Event::Attacked(report) => format!(
            "{} hits {} for {} ({} hp left)",
            report.attacker, report.defender, report.damage, report.defender_hp
        ),
        Event::UnitDefeated { unit, faction } => format!("{unit} ({faction}) is defeated"),
        Event::TurnAdvanced { number, faction, .. } => format!("Turn {number}: {faction} phase"),
        Event::BattleEnded(BattleOutcome::Victory(faction)) => format!("{faction} wins the battle"),
        Event::BattleEnded(BattleOutcome::Draw) => "The battle ends in a draw".to_string(),
        Event::ActionRejected { command, rejection } => format!("{command}: {rejection}"),
        Event::PhaseChanged { .. } | Event::CursorMoved { .. } => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{AttackReport, Faction, Position, UnitId};

    #[test]
    fn keeps_only_the_newest_lines() {
        let mut log = MessageLog::new(2);
        log.push("one".into());
        log.push("two".into());
        log.push("three".into());
        assert_eq!(log.lines().collect::<Vec<_>>(), vec!["two", "three"]);
    }

    #[test]
    fn cursor_and_phase_noise_is_skipped() {
        let mut log = MessageLog::default();
        log.record(&Event::CursorMoved {
            position: Position::new(1, 1),
            direction: None,
        });
        assert!(log.is_empty());

        log.record(&Event::Attacked(AttackReport {
            attacker: UnitId(1),
            defender: UnitId(2),
            damage: 6,
            defender_hp: 14,
            defeated: false,
        }));
        log.record(&Event::BattleEnded(BattleOutcome::Victory(Faction::Player)));
        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            vec!["#1 hits #2 for 6 (14 hp left)", "Player wins the battle"]
        );
    }
}
