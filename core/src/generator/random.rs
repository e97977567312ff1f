use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Picks uniformly random cells and keeps those that are not mines yet, until enough mines are placed.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    /// Generator seeded from system entropy, different on every run.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place_mines(&mut self, grid: &mut Grid, count: usize) -> Result<()> {
        let capacity = usize::from(grid.total_cells() - grid.mine_count());
        if count > capacity {
            log::warn!("Cannot place {count} mines, only {capacity} free cells");
            return Err(GameError::TooManyMines {
                requested: count,
                capacity,
            });
        }

        let size = grid.size();
        let mut placed = 0;
        while placed < count {
            let coords = (self.rng.random_range(0..size), self.rng.random_range(0..size));
            let cell = &mut grid[coords];
            if !cell.is_mine() {
                cell.set_mine();
                placed += 1;
                log::trace!("Mine placed at {}{}", row_letter(coords.1), coords.0 + 1);
            }
        }

        log::debug!("Placed {count} mines on a {size}x{size} grid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mines_on(grid: &Grid) -> Vec<Coord2> {
        grid.iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn places_exact_number_of_mines() {
        for count in [0, 1, 5, 24, 25] {
            let mut grid = Grid::new(5).unwrap();
            RandomMineGenerator::new()
                .place_mines(&mut grid, count)
                .unwrap();

            assert_eq!(mines_on(&grid).len(), count);
        }
    }

    #[test]
    fn fills_every_cell_when_asked_for_all() {
        let mut grid = Grid::new(3).unwrap();
        RandomMineGenerator::new().place_mines(&mut grid, 9).unwrap();

        assert!(grid.iter().all(|(_, cell)| cell.is_mine()));
    }

    #[test]
    fn rejects_more_mines_than_cells() {
        let mut grid = Grid::new(3).unwrap();
        let result = RandomMineGenerator::new().place_mines(&mut grid, 10);

        assert_eq!(
            result,
            Err(GameError::TooManyMines {
                requested: 10,
                capacity: 9
            })
        );
        assert_eq!(grid.mine_count(), 0);
    }

    #[test]
    fn counts_existing_mines_against_capacity() {
        let mut grid = Grid::new(2).unwrap();
        grid[(0, 0)].set_mine();
        let mut generator = RandomMineGenerator::from_seed(7);

        assert!(generator.place_mines(&mut grid, 4).is_err());
        generator.place_mines(&mut grid, 3).unwrap();
        assert_eq!(grid.mine_count(), 4);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let mut first = Grid::new(8).unwrap();
        let mut second = Grid::new(8).unwrap();
        RandomMineGenerator::from_seed(42)
            .place_mines(&mut first, 10)
            .unwrap();
        RandomMineGenerator::from_seed(42)
            .place_mines(&mut second, 10)
            .unwrap();

        assert_eq!(mines_on(&first), mines_on(&second));
    }

    #[test]
    fn entropy_seeded_layouts_differ() {
        // 5 mines on a 10x10 grid, two identical draws are practically impossible
        let mut first = Grid::new(10).unwrap();
        let mut second = Grid::new(10).unwrap();
        RandomMineGenerator::new().place_mines(&mut first, 5).unwrap();
        RandomMineGenerator::new().place_mines(&mut second, 5).unwrap();

        assert_ne!(mines_on(&first), mines_on(&second));
    }
}
