use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a single [`Game::play`] call did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    InvalidInput(InputError),
    AlreadyRevealed,
    Revealed,
    Detonated,
    Won,
}

impl TurnOutcome {
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Detonated | Self::Won)
    }
}

/// One round of minesweeper on a prepared grid.
///
/// A turn is a single coordinate: hitting a mine loses, revealing the last safe cell wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    moves_remaining: CellCount,
    state: GameState,
}

impl Game {
    /// Starts a game on `grid`, which should already have its mines.
    ///
    /// Safe cells that are already revealed do not count as moves.
    pub fn new(grid: Grid) -> Self {
        let moves_remaining = grid
            .iter()
            .filter(|(_, cell)| !cell.is_mine() && !cell.is_revealed())
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            grid,
            moves_remaining,
            state: Default::default(),
        }
    }

    pub fn setup(
        size: usize,
        mine_count: usize,
        generator: &mut impl MineGenerator,
    ) -> Result<Self> {
        let mut grid = Grid::new(size)?;
        generator.place_mines(&mut grid, mine_count)?;
        let game = Self::new(grid);
        log::debug!(
            "New {size}x{size} game with {mine_count} mines, {} moves to win",
            game.moves_remaining
        );
        Ok(game)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn moves_remaining(&self) -> CellCount {
        self.moves_remaining
    }

    pub fn set_moves_remaining(&mut self, moves_remaining: CellCount) {
        self.moves_remaining = moves_remaining;
    }

    pub fn play(&mut self, input: &str) -> Result<TurnOutcome> {
        use TurnOutcome::*;

        self.check_not_finished()?;

        let coords = match self.grid.parse_coords(input) {
            Ok(coords) => coords,
            Err(err) => {
                log::debug!("Rejected input {input:?}: {err}");
                return Ok(InvalidInput(err));
            }
        };

        let cell = self.grid[coords];
        if cell.is_mine() {
            self.end_game(false);
            return Ok(Detonated);
        }
        if cell.is_revealed() {
            return Ok(AlreadyRevealed);
        }

        self.reveal_cell(coords)?;
        if self.moves_remaining == 0 {
            self.end_game(true);
            Ok(Won)
        } else {
            Ok(Revealed)
        }
    }

    /// Reveals the cell and, when it has no adjacent mines, keeps opening its neighbours.
    ///
    /// Returns how many cells were newly revealed, zero if the cell already was.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.grid.validate_coords(coords)?;
        let mut revealed = 0;
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !self.grid[visit_coords].reveal() {
                continue;
            }

            let adjacent_mines = self.grid.adjacent_mine_count(visit_coords);
            self.grid[visit_coords].set_label(Label::Adjacent(adjacent_mines));
            self.moves_remaining = self.moves_remaining.saturating_sub(1);
            revealed += 1;

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.grid
                        .neighbors(visit_coords)
                        .filter(|&pos| !self.grid[pos].is_revealed()),
                );
            }
        }

        Ok(revealed)
    }

    /// Ends the game without a win. Does nothing if it is already over.
    pub fn game_over(&mut self) {
        self.end_game(false);
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_game_over() {
            return;
        }

        self.state = if won {
            GameState::Won
        } else {
            GameState::Lost
        };
        log::debug!(
            "Game over: {:?} with {} moves remaining",
            self.state,
            self.moves_remaining
        );
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_game_over() {
            log::warn!("Move attempted after the game ended");
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
