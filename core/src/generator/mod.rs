use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    /// Places `count` new mines on distinct cells of `grid`.
    ///
    /// Fails with [`GameError::TooManyMines`] if the grid does not have that many mine-free cells.
    fn place_mines(&mut self, grid: &mut Grid, count: usize) -> Result<()>;
}
