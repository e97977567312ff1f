pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod game;
mod generator;
mod grid;
mod session;
mod types;

/// Smallest grid that still has something to play.
pub const MIN_GRID_SIZE: Coord = 2;

/// Rows are named `A` to `Z`, so a grid never has more than 26 of them.
pub const MAX_GRID_SIZE: Coord = 26;

/// Share of the cells the interactive setup allows to be mines.
pub const MAX_MINE_DENSITY: f64 = 0.35;

/// Most mines the interactive setup accepts for a grid of `size`.
pub fn max_mines(size: Coord) -> CellCount {
    (f64::from(mult(size, size)) * MAX_MINE_DENSITY).floor() as CellCount
}
