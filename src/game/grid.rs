//! Toroidal grid geometry
//!
//! Positions are plain values; the [`Board`] knows the grid size and does the
//! wraparound arithmetic and the mapping from cells to screen coordinates.

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta, without wrapping
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A fixed-size grid whose edges wrap around to the opposite side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells on the board
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    /// Bring any position back onto the board, component-wise modulo the size
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(
            pos.x.rem_euclid(self.width as i32),
            pos.y.rem_euclid(self.height as i32),
        )
    }

    /// One step from `pos` in `direction`, wrapping over the edges
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.wrap(pos.moved_by(dx, dy))
    }

    /// Every cell of the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Row-major index of a cell that lies on the board
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }
}

/// Size of one grid cell on screen, in terminal columns and rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Top-left screen offset of a cell, relative to the board origin
    pub fn to_screen(&self, pos: Position) -> (u16, u16) {
        (
            (pos.x.max(0) as u16).saturating_mul(self.width),
            (pos.y.max(0) as u16).saturating_mul(self.height),
        )
    }

    /// Screen footprint of a whole board
    pub fn board_extent(&self, board: &Board) -> (u16, u16) {
        (
            (board.width() as u16).saturating_mul(self.width),
            (board.height() as u16).saturating_mul(self.height),
        )
    }
}
