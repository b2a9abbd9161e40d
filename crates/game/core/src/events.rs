//! Topic-based publish/subscribe for battle events.
//!
//! Listeners register against a closed [`Topic`] enumeration and receive
//! every [`Event`] published on that topic, synchronously and in
//! subscription order.

use std::collections::HashMap;

use crate::cursor::Direction;
use crate::phase::{BattleOutcome, Command, Phase, Rejection};
use crate::state::{AttackReport, Faction, Position, UnitId};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topic {
    /// Phase transitions and battle end.
    Phase,
    /// Selector movement.
    Cursor,
    /// Unit movement, attacks and defeats.
    Combat,
    /// Turn hand-off between factions.
    Turn,
    /// Refused commands.
    Rejection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    PhaseChanged {
        from: Phase,
        to: Phase,
        unit: Option<UnitId>,
    },
    CursorMoved {
        position: Position,
        direction: Option<Direction>,
    },
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    Attacked(AttackReport),
    UnitDefeated {
        unit: UnitId,
        faction: Faction,
    },
    TurnAdvanced {
        number: u32,
        faction: Faction,
        remaining: Option<u32>,
    },
    BattleEnded(BattleOutcome),
    ActionRejected {
        command: Command,
        rejection: Rejection,
    },
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::PhaseChanged { .. } | Event::BattleEnded(_) => Topic::Phase,
            Event::CursorMoved { .. } => Topic::Cursor,
            Event::UnitMoved { .. } | Event::Attacked(_) | Event::UnitDefeated { .. } => {
                Topic::Combat
            }
            Event::TurnAdvanced { .. } => Topic::Turn,
            Event::ActionRejected { .. } => Topic::Rejection,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Event)>;

/// Synchronous topic-based event bus.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<Topic, Vec<(SubscriptionId, Listener)>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every event published on `topic`.
    pub fn subscribe<F>(&mut self, topic: Topic, listener: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(topic)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Registers `listener` on several topics at once.
    pub fn subscribe_multiple<F>(&mut self, topics: &[Topic], listener: F) -> Vec<SubscriptionId>
    where
        F: FnMut(&Event) + Clone + 'static,
    {
        topics
            .iter()
            .map(|&topic| self.subscribe(topic, listener.clone()))
            .collect()
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for listeners in self.listeners.values_mut() {
            if let Some(index) = listeners.iter().position(|(sub, _)| *sub == id) {
                listeners.remove(index);
                return true;
            }
        }
        false
    }

    /// Delivers `event` to every listener of its topic.
    pub fn publish(&mut self, event: &Event) {
        let topic = event.topic();
        match self.listeners.get_mut(&topic) {
            Some(listeners) if !listeners.is_empty() => {
                for (_, listener) in listeners.iter_mut() {
                    listener(event);
                }
            }
            _ => tracing::trace!("No subscribers for topic {:?}", topic),
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.listeners.get(&topic).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<Topic, usize> = self
            .listeners
            .iter()
            .map(|(topic, listeners)| (*topic, listeners.len()))
            .collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}
