use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::{Board, CellSize, Position};

/// Fastest supported tick rate
pub const MAX_TICKS_PER_SECOND: u32 = 1000;

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colours used to draw the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    /// Outline drawn around every snake and food cell
    pub border: Rgb,
    pub food: Rgb,
    pub snake: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            border: Rgb(93, 216, 228),
            food: Rgb(255, 0, 0),
            snake: Rgb(0, 255, 0),
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Terminal columns per grid cell
    pub cell_width: u16,
    /// Terminal rows per grid cell
    pub cell_height: u16,
    /// Simulation steps per second
    pub ticks_per_second: u32,
    /// Where the snake starts (and restarts); board centre when unset
    pub start: Option<Position>,
    /// Heading at game start; random when unset
    pub initial_direction: Option<Direction>,
    /// Random food samples tried before falling back to a board scan
    pub max_food_attempts: usize,
    /// Seed for reproducible games
    pub seed: Option<u64>,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            cell_width: 2,
            cell_height: 1,
            ticks_per_second: 10,
            start: None,
            initial_direction: None,
            max_food_attempts: 64,
            seed: None,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.cell_width > 0 && self.cell_height > 0,
            "cell size must be non-zero"
        );
        // Screen coordinates are u16, so the whole board must fit in one
        ensure!(
            fits_on_screen(self.grid_width, self.cell_width)
                && fits_on_screen(self.grid_height, self.cell_height),
            "grid of {}x{} cells at {}x{} characters per cell is too large for a terminal",
            self.grid_width,
            self.grid_height,
            self.cell_width,
            self.cell_height
        );
        ensure!(
            self.grid_width * self.grid_height >= 2,
            "grid needs room for both the snake and the food"
        );
        ensure!(
            (1..=MAX_TICKS_PER_SECOND).contains(&self.ticks_per_second),
            "tick rate must be between 1 and {}, got {}",
            MAX_TICKS_PER_SECOND,
            self.ticks_per_second
        );
        if let Some(start) = self.start {
            ensure!(
                self.board().contains(start),
                "start cell ({}, {}) is outside the {}x{} board",
                start.x,
                start.y,
                self.grid_width,
                self.grid_height
            );
        }
        Ok(())
    }

    pub fn board(&self) -> Board {
        Board::new(self.grid_width, self.grid_height)
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }

    pub fn start_position(&self) -> Position {
        self.start.unwrap_or_else(|| self.board().center())
    }

    /// Time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

fn fits_on_screen(cells: usize, cell_span: u16) -> bool {
    cells
        .checked_mul(cell_span as usize)
        .is_some_and(|extent| extent <= u16::MAX as usize)
}
