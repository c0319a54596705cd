use std::collections::VecDeque;

use rand::Rng;

use super::action::Direction;
use super::grid::{Board, Position};

/// What happened during a single [`Snake::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The head moved onto a free cell; `vacated` is the tail cell dropped this step
    Moved { vacated: Option<Position> },
    /// The head would have entered the body, so the snake started over
    Reset,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    board: Board,
    start: Position,
    /// Body segments, with head at index 0
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Turn requested for the next tick
    pending: Option<Direction>,
    /// Length the body grows (or shrinks) toward
    target_len: usize,
    last_vacated: Option<Position>,
}

impl Snake {
    /// Create a length-1 snake at `start` heading in `direction`
    pub fn new(board: Board, start: Position, direction: Direction) -> Self {
        Self {
            board,
            start,
            body: VecDeque::from([start]),
            direction,
            pending: None,
            target_len: 1,
            last_vacated: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All occupied cells, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn target_len(&self) -> usize {
        self.target_len
    }

    /// Tail cell dropped by the most recent move, if any
    pub fn last_vacated(&self) -> Option<Position> {
        self.last_vacated
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Queue a turn for the next tick.
    ///
    /// Turning back onto the current direction is dropped, as is a request
    /// for the direction already in effect. The check is against the current
    /// direction, not an already pending one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if direction == self.direction || direction.is_opposite(self.direction) {
            return;
        }
        self.pending = Some(direction);
    }

    /// Commit the pending turn, if any
    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
    }

    /// Lengthen the snake by one; the tail stays put on the next advance
    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    /// Move one cell in the current direction, wrapping over the board edges.
    ///
    /// The new head is checked against the body before it is committed, so a
    /// colliding step resets the snake instead of appending the cell.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Step {
        let new_head = self.board.step(self.head(), self.direction);

        if self.collides_with_body(new_head) {
            self.reset(rng);
            return Step::Reset;
        }

        self.body.push_front(new_head);
        self.last_vacated = if self.body.len() > self.target_len {
            self.body.pop_back()
        } else {
            None
        };

        Step::Moved {
            vacated: self.last_vacated,
        }
    }

    /// Start over as a single cell at the start position, facing a random way
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.body.clear();
        self.body.push_back(self.start);
        self.target_len = 1;
        self.direction = Direction::random(rng);
        self.pending = None;
        self.last_vacated = None;
    }
}

#[cfg(test)]
pub(crate) fn snake_with_body(board: Board, body: &[Position], direction: Direction) -> Snake {
    let mut snake = Snake::new(board, board.center(), direction);
    snake.body = body.iter().copied().collect();
    snake.target_len = body.len();
    snake
}
