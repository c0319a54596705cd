//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board is a torus: the snake leaves one edge and comes back on the opposite one.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, Palette, Rgb};
pub use engine::{GameEngine, TickReport};
pub use food::Food;
pub use grid::{Board, CellSize, Position};
pub use snake::{Snake, Step};
