//! Torus Snake - the classic Snake game on a wraparound board
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard input mapping (input module)
//! - Cell-based terminal rendering (render module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
