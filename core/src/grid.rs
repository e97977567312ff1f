use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square board of cells, indexed by `(x, y)` with `x` the column and `y` the row.
///
/// Rows are named by letters starting at `A`, which is why a grid is never larger than
/// [`MAX_GRID_SIZE`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: Coord,
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Result<Self> {
        if !(usize::from(MIN_GRID_SIZE)..=usize::from(MAX_GRID_SIZE)).contains(&size) {
            return Err(GameError::InvalidSize(size));
        }
        Ok(Self {
            size: size as Coord,
            cells: Array2::default([size, size]),
        })
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub fn mine_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Takes signed coordinates so that neighbour offsets can be checked before converting.
    pub fn is_cell_in_grid(&self, x: isize, y: isize) -> bool {
        let size = isize::from(self.size);
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn cell_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self[coords])
    }

    /// Parses coordinates such as `A1` (row `A`, first column) into `(x, y)`.
    pub fn parse_coords(&self, input: &str) -> core::result::Result<Coord2, InputError> {
        let input = input.trim();
        let mut chars = input.chars();
        let row = chars.next().ok_or(InputError::Empty)?;
        if !row.is_ascii_uppercase() {
            return Err(InputError::InvalidRow);
        }
        let column: usize = chars
            .as_str()
            .trim()
            .parse()
            .map_err(|_| InputError::InvalidColumn)?;

        let y = (row as u8 - b'A') as isize;
        let x = column.checked_sub(1).ok_or(InputError::OutOfBounds)?;
        let x = isize::try_from(x).map_err(|_| InputError::OutOfBounds)?;
        if self.is_cell_in_grid(x, y) {
            Ok((x as Coord, y as Coord))
        } else {
            Err(InputError::OutOfBounds)
        }
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// All cells in row-major order, the same order they are displayed in.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        (0..self.size)
            .flat_map(move |y| (0..self.size).map(move |x| (x, y)))
            .map(move |coords| (coords, &self[coords]))
    }
}

pub fn row_letter(y: Coord) -> char {
    char::from(b'A' + y)
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("  ")?;
        for x in 0..self.size {
            write!(f, "{} ", u16::from(x) + 1)?;
        }
        writeln!(f)?;

        for y in 0..self.size {
            write!(f, "{} ", row_letter(y))?;
            for x in 0..self.size {
                write!(f, "{} ", self[(x, y)].label())?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}
