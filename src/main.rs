mod board;
mod food;
mod game;
mod snake;
mod term;

// Grid coordinates are signed so that an out-of-bounds candidate head
// (e.g. (-1, 5)) is representable before the bounds check rejects it.
pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);

// Terminal coordinates, as crossterm wants them.
pub type TermCell = (u16, u16);

pub const GRID_SIZE: GridInt = 20;

fn main() {
    let mut game = game::SnakeGame::new();
    game.initialize();
    game.show_intro();

    loop {
        // The main game loop takes care of exiting cleanly on CTRL+C
        game.play();
    }
}
