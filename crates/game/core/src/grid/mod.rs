//! Terrain grid and the paint commands that build it.
//!
//! A [`Grid`] is produced once by a [`GridBuilder`] and never resized or
//! repainted afterwards. Renderers read it through [`Grid::rows`]; movement
//! validation reads it through [`Grid::is_walkable`].

mod builder;

pub use builder::{GridBuilder, PaintCommand};

use strum::{Display, EnumIter, EnumString, FromRepr};

use crate::state::Position;

/// Canonical terrain classes. The discriminant is the terrain code.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, FromRepr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Terrain {
    #[default]
    Plain = 0,
    Mountain = 1,
    Forest = 2,
    Fortress = 3,
    Water = 4,
    Wall = 5,
}

impl Terrain {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }

    pub const fn is_walkable(self) -> bool {
        matches!(self, Terrain::Plain | Terrain::Forest | Terrain::Fortress)
    }

    /// Single-character glyph used by text renderers and fixtures.
    pub const fn glyph(self) -> char {
        match self {
            Terrain::Plain => '.',
            Terrain::Mountain => '^',
            Terrain::Forest => 'T',
            Terrain::Fortress => 'F',
            Terrain::Water => '~',
            Terrain::Wall => '#',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub cols: u32,
    pub rows: u32,
}

impl GridDimensions {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.cols
            && (position.y as u32) < self.rows
    }

    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.cols as usize + position.x as usize)
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self::new(12, 8)
    }
}

/// Immutable terrain matrix, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Terrain>,
}

impl Grid {
    /// A grid filled with [`Terrain::Plain`].
    pub fn plain(dimensions: GridDimensions) -> Self {
        GridBuilder::new(dimensions).build()
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn terrain(&self, position: Position) -> Option<Terrain> {
        self.dimensions
            .index(position)
            .map(|index| self.cells[index])
    }

    /// False for out-of-bounds cells.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.terrain(position).is_some_and(Terrain::is_walkable)
    }

    /// Iterates rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Terrain]> {
        self.cells.chunks(self.dimensions.cols.max(1) as usize)
    }

    /// The matrix as raw terrain codes.
    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|terrain| terrain.code()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terrain_codes_round_trip() {
        use strum::IntoEnumIterator;

        for terrain in Terrain::iter() {
            assert_eq!(Terrain::from_code(terrain.code()), Some(terrain));
        }
        assert_eq!(Terrain::from_code(200), None);
        assert_eq!("mountain".parse::<Terrain>(), Ok(Terrain::Mountain));
    }

    #[test]
    fn out_of_bounds_cells_are_not_walkable() {
        let grid = Grid::plain(GridDimensions::new(3, 2));
        assert!(grid.is_walkable(Position::new(2, 1)));
        assert!(!grid.is_walkable(Position::new(3, 1)));
        assert!(!grid.is_walkable(Position::new(-1, 0)));
        assert_eq!(grid.terrain(Position::new(0, 2)), None);
    }

    #[test]
    fn codes_are_row_major() {
        let grid = GridBuilder::new(GridDimensions::new(3, 2))
            .cell(2, 0, Terrain::Water)
            .build();
        assert_eq!(grid.codes(), vec![vec![0, 0, 4], vec![0, 0, 0]]);
    }
}
