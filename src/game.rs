use std::{process::exit, thread::sleep, time::Duration};

use crate::board::{CellState, GameBoard};
use crate::food::Food;
use crate::snake::{Direction::{self, *}, Snake};
use crate::term::TermManager;
use crate::{Cell, GridInt, TermCell, GRID_SIZE};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

const TICK_INTERVAL_MS: u64 = 10;
const TICKS_PER_STEP: u64 = 10; // one simulation step every 100ms

const SNAKE_START: Cell = (5, 5);

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

// Terminal layout: score line on top, then the bordered board
const SCORE_POS: TermCell = (2, 1);
const BORDER_ORIGIN: TermCell = (1, 2);
const BOARD_ORIGIN: TermCell = (BORDER_ORIGIN.0 + 1, BORDER_ORIGIN.1 + 1);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// The simulation state: everything the tick function reads and mutates.
/// Snake and Food are authoritative; rendering derives from them.
pub struct GameState {
    grid_size: GridInt,
    snake: Snake,
    food: Food,
    pending_direction: Option<Direction>,
    phase: Phase,
    score: u32,
}

impl GameState {
    pub fn new(grid_size: GridInt, rng: &mut impl Rng) -> Self {
        let snake = Snake::new(SNAKE_START, Right);
        let food = Food::generate(grid_size, &snake, rng);
        GameState {
            grid_size,
            snake,
            food,
            pending_direction: None,
            phase: Phase::NotStarted,
            score: 0,
        }
    }

    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::Running;
        }
    }

    /// Input only writes this slot; the tick reads it exactly once, so a
    /// burst of key presses between ticks can't double-turn the snake.
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.phase != Phase::GameOver {
            self.pending_direction = Some(direction);
        }
    }

    /// Advances the simulation by one step. A no-op unless running.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::Running {
            return;
        }

        if let Some(dir) = self.pending_direction.take() {
            self.snake.update_direction(dir);
        }

        let (x, y) = self.snake.next_head();
        if x < 0 || y < 0 || x >= self.grid_size || y >= self.grid_size {
            self.phase = Phase::GameOver;
            return;
        }

        // Eaten check goes before the move: the candidate head is where the
        // food would be swallowed
        let ate = (x, y) == self.food.position();
        self.snake.advance(ate);

        if ate {
            self.score += 1;
            self.food = Food::generate(self.grid_size, &self.snake, rng);
        }

        if self.snake.detect_self_collision() {
            self.phase = Phase::GameOver;
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    fn with_entities(grid_size: GridInt, snake: Snake, food: Food) -> Self {
        GameState {
            grid_size,
            snake,
            food,
            pending_direction: None,
            phase: Phase::NotStarted,
            score: 0,
        }
    }
}

pub struct SnakeGame {
    term: TermManager,
    board: GameBoard,
}

impl SnakeGame {
    pub fn new() -> Self {
        SnakeGame {
            term: TermManager::new(),
            board: GameBoard::new(GRID_SIZE),
        }
    }

    pub fn initialize(&mut self) {
        self.term.setup();
    }

    pub fn show_intro(&mut self) {
        let lines = &[
            "Arrow keys or WASD to move",
            "Space to start",
            "CTRL+C to quit",
            "",
            "Press any key to continue",
        ];

        self.term.show_message(lines);

        if is_ctrl_c(&self.term.read_key_blocking()) {
            self.clean_exit()
        }
    }

    pub fn play(&mut self) {
        self.term.clear();

        let border = GRID_SIZE as u16 + 2;
        self.term.draw_border(BORDER_ORIGIN, border, border);

        let mut rng = rand::thread_rng();
        let mut state = GameState::new(GRID_SIZE, &mut rng);
        let mut ticks_until_step = TICKS_PER_STEP;

        self.draw_frame(&state);

        loop {
            sleep(Duration::from_millis(TICK_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue() {
                match &key_ev {
                    ev if is_ctrl_c(ev) => self.clean_exit(),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => state.queue_direction(Up),
                        KeyCode::Char('a') | KeyCode::Left => state.queue_direction(Left),
                        KeyCode::Char('s') | KeyCode::Down => state.queue_direction(Down),
                        KeyCode::Char('d') | KeyCode::Right => state.queue_direction(Right),
                        KeyCode::Char(' ') => state.start(),
                        _ => {}
                    },
                }
            }

            ticks_until_step -= 1;
            if ticks_until_step == 0 {
                ticks_until_step = TICKS_PER_STEP;

                state.tick(&mut rng);
                self.draw_frame(&state);

                if state.phase() == Phase::GameOver {
                    self.show_game_over(&state);
                    break;
                }
            }
        }

        // Quit if the user CTRL+C's after the game
        if is_ctrl_c(&self.term.read_key_blocking()) {
            self.clean_exit()
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clean_exit(&mut self) {
        self.term.restore();
        exit(0);
    }

    fn draw_frame(&mut self, state: &GameState) {
        self.board.rebuild(state.snake(), state.food());
        let head = state.snake().head();

        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let ch = match self.board.cell(x, y) {
                    CellState::Empty => ' ',
                    CellState::Food => FOOD_CHAR,
                    CellState::Snake if (x, y) == head => state.snake().head_char(),
                    CellState::Snake => SNAKE_BODY_CHAR,
                };
                self.term.print_at(term_pos((x, y)), ch);
            }
        }

        self.term
            .print_str_at(SCORE_POS, &format!("Score: {}", state.score()));
        self.term.flush();
    }

    fn show_game_over(&mut self, state: &GameState) {
        for cell in state.snake().cells() {
            self.term.print_at(term_pos(cell), DEAD_SNAKE_CHAR);
        }

        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", state.score()),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit.",
        ]);
    }
}

fn term_pos(cell: Cell) -> TermCell {
    (
        BOARD_ORIGIN.0 + cell.0 as u16,
        BOARD_ORIGIN.1 + cell.1 as u16,
    )
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    #[test]
    fn eating_grows_scores_and_relocates_food() {
        let snake = Snake::new((5, 5), Right);
        let mut state = GameState::with_entities(20, snake, Food::at((6, 5)));
        state.start();

        state.tick(&mut rng());

        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.snake().head(), (6, 5));
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.score(), 1);

        let food = state.food().position();
        assert_ne!(food, (6, 5));
        assert!(!state.snake().contains(food));
    }

    #[test]
    fn wall_collision_ends_the_game_without_moving() {
        let snake = Snake::new((0, 5), Left);
        let mut state = GameState::with_entities(20, snake, Food::at((10, 10)));
        state.start();

        state.tick(&mut rng());

        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.snake().head(), (0, 5));
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn non_eating_tick_keeps_length_and_score() {
        let snake = Snake::new((5, 5), Right);
        let mut state = GameState::with_entities(20, snake, Food::at((10, 10)));
        state.start();

        state.tick(&mut rng());

        assert_eq!(state.snake().head(), (6, 5));
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.score(), 0);
        assert_eq!(state.food().position(), (10, 10));
    }

    #[test]
    fn ticks_before_start_are_noops() {
        let snake = Snake::new((5, 5), Right);
        let mut state = GameState::with_entities(20, snake, Food::at((10, 10)));

        state.tick(&mut rng());
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.snake().head(), (5, 5));

        state.start();
        assert_eq!(state.phase(), Phase::Running);
        state.start(); // second start input changes nothing
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn game_over_is_terminal() {
        let snake = Snake::new((0, 5), Left);
        let mut state = GameState::with_entities(20, snake, Food::at((10, 10)));
        state.start();
        state.tick(&mut rng());
        assert_eq!(state.phase(), Phase::GameOver);

        state.queue_direction(Down);
        state.tick(&mut rng());
        state.start();
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.snake().head(), (0, 5));
    }

    #[test]
    fn pending_direction_applies_on_the_next_tick() {
        let snake = Snake::new((5, 5), Right);
        let mut state = GameState::with_entities(20, snake, Food::at((10, 10)));
        state.start();

        state.queue_direction(Left);
        state.queue_direction(Up); // last write before the tick wins
        state.tick(&mut rng());

        assert_eq!(state.snake().head(), (5, 4));
        assert_eq!(state.snake().direction(), Up);
    }

    #[test]
    fn self_collision_ends_the_game() {
        // Grow the snake to 5, then loop it into itself
        let mut state = GameState::with_entities(
            20,
            {
                let mut s = Snake::new((5, 5), Right);
                s.advance(true);
                s.advance(true); // length 5, head (7,5)
                s
            },
            Food::at((15, 15)),
        );
        state.start();

        state.queue_direction(Down);
        state.tick(&mut rng()); // (7,6)
        state.queue_direction(Left);
        state.tick(&mut rng()); // (6,6)
        state.queue_direction(Up);
        state.tick(&mut rng()); // (6,5), a body cell
        assert_eq!(state.phase(), Phase::GameOver);
    }
}
