//! Grid cursor used to target cells for selection, movement and attacks.

use crate::grid::GridDimensions;
use crate::state::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row 0 is the top of the grid, so `Up` decreases `y`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Cursor position, always inside `[0, cols) x [0, rows)`.
///
/// Out-of-range requests clamp to the nearest edge; they never wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector {
    position: Position,
    dimensions: GridDimensions,
}

impl Selector {
    pub fn new(start: Position, dimensions: GridDimensions) -> Self {
        let mut selector = Self {
            position: Position::ORIGIN,
            dimensions,
        };
        selector.set(start);
        selector
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves to `target`, clamped to the grid. Returns true if the cursor moved.
    pub fn set(&mut self, target: Position) -> bool {
        let max_x = i32::try_from(self.dimensions.cols.saturating_sub(1)).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.dimensions.rows.saturating_sub(1)).unwrap_or(i32::MAX);
        let clamped = Position::new(target.x.clamp(0, max_x), target.y.clamp(0, max_y));
        let moved = clamped != self.position;
        self.position = clamped;
        moved
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) -> bool {
        self.set(self.position.offset(dx, dy))
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        self.move_by(dx, dy)
    }
}
