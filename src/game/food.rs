use rand::Rng;

use super::grid::{Board, Position};

/// The single piece of food on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    board: Board,
    position: Position,
    max_attempts: usize,
}

impl Food {
    pub fn new(board: Board, position: Position, max_attempts: usize) -> Self {
        Self {
            board,
            position,
            max_attempts,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the food to a random cell not covered by `is_occupied`.
    ///
    /// Samples uniformly for up to `max_attempts` tries, then scans the board
    /// in row-major order for the first free cell. Returns false and leaves
    /// the food where it is when every cell is occupied.
    pub fn place_avoiding<R, F>(&mut self, rng: &mut R, is_occupied: F) -> bool
    where
        R: Rng,
        F: Fn(Position) -> bool,
    {
        for _ in 0..self.max_attempts {
            let x = rng.gen_range(0..self.board.width()) as i32;
            let y = rng.gen_range(0..self.board.height()) as i32;
            let pos = Position::new(x, y);

            if !is_occupied(pos) {
                self.position = pos;
                return true;
            }
        }

        log::warn!(
            "food placement gave up sampling after {} attempts, scanning for a free cell",
            self.max_attempts
        );

        match self.board.positions().find(|&pos| !is_occupied(pos)) {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => {
                log::warn!("board is full, food stays at {:?}", self.position);
                false
            }
        }
    }
}
