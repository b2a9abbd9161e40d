//! Per-tick input dispatch.
//!
//! The handler owns the key bindings' semantics but no game state: callers
//! pass the current [`Phase`] each tick, and the handler remembers only which
//! keys were down on the previous tick so it can detect press edges.

use strum::{EnumCount, EnumIter, IntoEnumIterator};

use crate::cursor::Direction;
use crate::phase::{Command, Phase};

/// Abstract keys. Concrete key codes are mapped onto these by the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Attack,
}

impl Key {
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// Level-triggered key state, polled once per tick.
pub trait InputSource {
    fn is_down(&self, key: Key) -> bool;
}

impl<F> InputSource for F
where
    F: Fn(Key) -> bool,
{
    fn is_down(&self, key: Key) -> bool {
        self(key)
    }
}

/// Everything one tick of input asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub horizontal: Option<Direction>,
    pub vertical: Option<Direction>,
    pub action: Option<Command>,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none() && self.action.is_none()
    }

    /// Cursor steps in dispatch order: horizontal first, then vertical.
    pub fn directions(&self) -> impl Iterator<Item = Direction> {
        self.horizontal.into_iter().chain(self.vertical)
    }
}

/// Translates key press edges into cursor steps and phase commands.
#[derive(Clone, Debug, Default)]
pub struct InputHandler {
    previous: [bool; Key::COUNT],
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples `source` once and returns this tick's commands.
    ///
    /// Opposite directions pressed on the same tick cancel out. When several
    /// action keys are pressed together, Cancel wins over Confirm, which wins
    /// over Attack.
    pub fn poll(&mut self, source: &dyn InputSource, phase: Phase) -> TickInput {
        let mut pressed = [false; Key::COUNT];
        for key in Key::iter() {
            let down = source.is_down(key);
            pressed[key.slot()] = down && !self.previous[key.slot()];
            self.previous[key.slot()] = down;
        }
        let edge = |key: Key| pressed[key.slot()];

        TickInput {
            horizontal: axis(edge(Key::Left), edge(Key::Right), Direction::Left, Direction::Right),
            vertical: axis(edge(Key::Up), edge(Key::Down), Direction::Up, Direction::Down),
            action: action(&edge, phase),
        }
    }

    /// Forgets held keys, e.g. after the window loses focus.
    pub fn reset(&mut self) {
        self.previous = [false; Key::COUNT];
    }
}

fn axis(negative: bool, positive: bool, neg: Direction, pos: Direction) -> Option<Direction> {
    match (negative, positive) {
        (true, false) => Some(neg),
        (false, true) => Some(pos),
        _ => None,
    }
}

fn action(edge: &impl Fn(Key) -> bool, phase: Phase) -> Option<Command> {
    if edge(Key::Cancel) && phase != Phase::Select {
        return Some(Command::Cancel);
    }
    if edge(Key::Confirm) {
        return Some(match phase {
            Phase::Select => Command::Select,
            Phase::Move => Command::ConfirmMove,
            Phase::Attack => Command::SkipAttack,
            Phase::End => Command::Proceed,
        });
    }
    if edge(Key::Attack) && phase == Phase::Attack {
        return Some(Command::Attack);
    }
    None
}
