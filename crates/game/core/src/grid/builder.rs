use super::{Grid, GridDimensions, Terrain};
use crate::state::Position;

/// One step of a terrain paint script.
///
/// Ranges are inclusive and may be given in either order. Thickness grows
/// towards higher columns for vertical lines and higher rows for horizontal
/// lines; a thickness or size of zero paints nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaintCommand {
    Cell {
        x: i32,
        y: i32,
        terrain: Terrain,
    },
    HLine {
        row: i32,
        from: i32,
        to: i32,
        thickness: u32,
        terrain: Terrain,
    },
    VLine {
        col: i32,
        from: i32,
        to: i32,
        thickness: u32,
        terrain: Terrain,
    },
    Rect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        terrain: Terrain,
    },
}

/// Accumulates paint commands over a fixed-size matrix.
///
/// Every write outside the matrix is silently dropped, and later writes
/// replace earlier ones cell by cell.
#[derive(Clone, Debug)]
pub struct GridBuilder {
    dimensions: GridDimensions,
    cells: Vec<Terrain>,
}

impl GridBuilder {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![Terrain::default(); dimensions.area()],
        }
    }

    fn paint(&mut self, x: i32, y: i32, terrain: Terrain) {
        if let Some(index) = self.dimensions.index(Position::new(x, y)) {
            self.cells[index] = terrain;
        }
    }

    /// Paints every cell of the half-open column range `[x0, x1)` crossed with
    /// the half-open row range `[y0, y1)`, clipped to the matrix.
    fn fill(&mut self, x0: i64, x1: i64, y0: i64, y1: i64, terrain: Terrain) {
        let x0 = x0.max(0);
        let y0 = y0.max(0);
        let x1 = x1.min(i64::from(self.dimensions.cols));
        let y1 = y1.min(i64::from(self.dimensions.rows));

        for y in y0..y1 {
            for x in x0..x1 {
                self.paint(x as i32, y as i32, terrain);
            }
        }
    }

    pub fn cell(&mut self, x: i32, y: i32, terrain: Terrain) -> &mut Self {
        self.paint(x, y, terrain);
        self
    }

    /// Horizontal line along `row`, spanning columns `from..=to`.
    pub fn draw_h(&mut self, row: i32, from: i32, to: i32, thickness: u32, terrain: Terrain) -> &mut Self {
        let (lo, hi) = ordered(from, to);
        let row = i64::from(row);
        self.fill(lo, hi + 1, row, row + i64::from(thickness), terrain);
        self
    }

    /// Vertical line along `col`, spanning rows `from..=to`.
    pub fn draw_v(&mut self, col: i32, from: i32, to: i32, thickness: u32, terrain: Terrain) -> &mut Self {
        let (lo, hi) = ordered(from, to);
        let col = i64::from(col);
        self.fill(col, col + i64::from(thickness), lo, hi + 1, terrain);
        self
    }

    /// Rectangular zone with its top-left corner at `(x, y)`.
    pub fn rect(&mut self, x: i32, y: i32, width: u32, height: u32, terrain: Terrain) -> &mut Self {
        let (x, y) = (i64::from(x), i64::from(y));
        self.fill(x, x + i64::from(width), y, y + i64::from(height), terrain);
        self
    }

    pub fn apply(&mut self, command: &PaintCommand) -> &mut Self {
        match *command {
            PaintCommand::Cell { x, y, terrain } => self.cell(x, y, terrain),
            PaintCommand::HLine {
                row,
                from,
                to,
                thickness,
                terrain,
            } => self.draw_h(row, from, to, thickness, terrain),
            PaintCommand::VLine {
                col,
                from,
                to,
                thickness,
                terrain,
            } => self.draw_v(col, from, to, thickness, terrain),
            PaintCommand::Rect {
                x,
                y,
                width,
                height,
                terrain,
            } => self.rect(x, y, width, height, terrain),
        }
    }

    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a PaintCommand>) -> &mut Self {
        for command in commands {
            self.apply(command);
        }
        self
    }

    pub fn build(&self) -> Grid {
        Grid {
            dimensions: self.dimensions,
            cells: self.cells.clone(),
        }
    }
}

fn ordered(a: i32, b: i32) -> (i64, i64) {
    let (a, b) = (i64::from(a), i64::from(b));
    (a.min(b), a.max(b))
}
