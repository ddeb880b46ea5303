use std::collections::VecDeque;

use crate::{Cell, GridInt};
use Direction::*;

pub const INITIAL_SNAKE_LENGTH: GridInt = 3;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    fn axis(self) -> Axis {
        match self {
            Left | Right => Axis::Horizontal,
            Up | Down => Axis::Vertical,
        }
    }
}

pub struct Snake {
    body: VecDeque<Cell>, // head-first
    direction: Direction,
}

impl Snake {
    /// A snake of the initial length, head at `head`, body trailing away
    /// from `direction`.
    pub fn new(head: Cell, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|i| (head.0 - dx * i, head.1 - dy * i))
            .collect();
        Snake { body, direction }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().unwrap()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// The cell the next advance would move the head into. Bounds are the
    /// caller's concern.
    pub fn next_head(&self) -> Cell {
        let (x, y) = self.head();
        let (dx, dy) = self.direction.delta();
        (x + dx, y + dy)
    }

    /// Moves the head one cell in the current direction. The tail stays put
    /// when food was eaten, so the body grows by one.
    pub fn advance(&mut self, ate_food: bool) {
        let new_head = self.next_head();
        self.body.push_front(new_head);

        if !ate_food {
            self.body.pop_back();
        }
    }

    /// Ignores requests on the same axis as the current direction, so the
    /// snake can never reverse into its own neck.
    pub fn update_direction(&mut self, requested: Direction) {
        if requested.axis() != self.direction.axis() {
            self.direction = requested;
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn detect_self_collision(&self) -> bool {
        // O(n²) pairwise scan, fine for a body capped at grid size squared
        self.body
            .iter()
            .enumerate()
            .any(|(i, cell)| self.body.iter().skip(i + 1).any(|other| other == cell))
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
