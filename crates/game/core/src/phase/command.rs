use strum::{Display, EnumIter};

use super::Phase;

/// Confirm-style commands that drive the phase machine.
///
/// Cursor movement is not a command; see [`super::PhaseManager::move_cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    Select,
    ConfirmMove,
    Attack,
    SkipAttack,
    Proceed,
    Cancel,
}

impl Command {
    /// Phase in which the command is meaningful. `None` for `Cancel`, which is
    /// accepted everywhere.
    pub const fn expected_phase(self) -> Option<Phase> {
        match self {
            Command::Select => Some(Phase::Select),
            Command::ConfirmMove => Some(Phase::Move),
            Command::Attack | Command::SkipAttack => Some(Phase::Attack),
            Command::Proceed => Some(Phase::End),
            Command::Cancel => None,
        }
    }
}

/// An accepted phase change. `from == to` only for `Cancel` issued while
/// already selecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    pub const fn new(from: Phase, to: Phase) -> Self {
        Self { from, to }
    }

    pub fn is_change(&self) -> bool {
        self.from != self.to
    }
}
