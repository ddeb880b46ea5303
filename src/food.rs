use rand::Rng;

use crate::snake::Snake;
use crate::{Cell, GridInt};

pub struct Food {
    position: Cell,
}

impl Food {
    /// Samples uniform cells in [0, grid_size)² until one misses the snake.
    /// Known limitation: spins forever if the snake occupies the whole grid.
    pub fn generate(grid_size: GridInt, snake: &Snake, rng: &mut impl Rng) -> Self {
        loop {
            let cell = (rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
            if !snake.contains(cell) {
                return Food { position: cell };
            }
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    #[cfg(test)]
    pub fn at(position: Cell) -> Self {
        Food { position }
    }
}
