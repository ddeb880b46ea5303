use crate::food::Food;
use crate::snake::Snake;
use crate::{Cell, GridInt};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Snake,
    Food,
}

/// A derived rendering cache: Snake and Food stay authoritative, the grid is
/// recomputed from them every frame.
pub struct GameBoard {
    size: GridInt,
    grid: Vec<CellState>,
}

impl GameBoard {
    pub fn new(size: GridInt) -> Self {
        let grid = vec![CellState::Empty; size as usize * size as usize];
        GameBoard { size, grid }
    }

    pub fn rebuild(&mut self, snake: &Snake, food: &Food) {
        for cell in self.grid.iter_mut() {
            *cell = CellState::Empty;
        }

        for cell in snake.cells() {
            if let Some(i) = self.index(cell) {
                self.grid[i] = CellState::Snake;
            }
        }

        if let Some(i) = self.index(food.position()) {
            self.grid[i] = CellState::Food;
        }
    }

    pub fn cell(&self, x: GridInt, y: GridInt) -> CellState {
        self.grid[y as usize * self.size as usize + x as usize]
    }

    fn index(&self, (x, y): Cell) -> Option<usize> {
        if x >= 0 && x < self.size && y >= 0 && y < self.size {
            Some(y as usize * self.size as usize + x as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::Right;

    #[test]
    fn rebuild_marks_exactly_snake_and_food_cells() {
        let snake = Snake::new((5, 5), Right);
        let food = Food::at((8, 2));
        let mut board = GameBoard::new(10);
        board.rebuild(&snake, &food);

        for y in 0..10 {
            for x in 0..10 {
                let expected = if snake.contains((x, y)) {
                    CellState::Snake
                } else if (x, y) == (8, 2) {
                    CellState::Food
                } else {
                    CellState::Empty
                };
                assert_eq!(board.cell(x, y), expected);
            }
        }
    }

    #[test]
    fn rebuild_clears_stale_cells() {
        let mut snake = Snake::new((5, 5), Right);
        let food = Food::at((8, 2));
        let mut board = GameBoard::new(10);
        board.rebuild(&snake, &food);

        snake.advance(false);
        board.rebuild(&snake, &food);
        assert_eq!(board.cell(3, 5), CellState::Empty);
        assert_eq!(board.cell(6, 5), CellState::Snake);
    }
}
