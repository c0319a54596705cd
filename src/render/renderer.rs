use anyhow::Result;
use rand::Rng;

use super::canvas::{Canvas, CellSprite};
use crate::game::{GameEngine, Palette, TickReport};

/// Paints the game onto a [`Canvas`], repainting only what a tick changed
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Paint a fresh board with the current food and snake
    pub fn draw_initial<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        engine: &GameEngine<R>,
    ) -> Result<()> {
        canvas.clear(self.palette.background);
        self.draw_entities(canvas, engine);
        canvas.present()
    }

    pub fn draw_tick<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        engine: &GameEngine<R>,
        report: &TickReport,
    ) -> Result<()> {
        if report.reset {
            // The old body is gone all at once
            canvas.clear(self.palette.background);
        } else if let Some(vacated) = report.vacated {
            canvas.draw_cell(CellSprite::erase(vacated, self.palette.background));
        }

        self.draw_entities(canvas, engine);
        canvas.present()
    }

    fn draw_entities<C: Canvas, R: Rng>(&self, canvas: &mut C, engine: &GameEngine<R>) {
        canvas.draw_cell(CellSprite::outlined(
            engine.food().position(),
            self.palette.food,
            self.palette.border,
        ));

        for &segment in engine.snake().body() {
            canvas.draw_cell(CellSprite::outlined(
                segment,
                self.palette.snake,
                self.palette.border,
            ));
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Food, GameConfig, Position};
    use crate::render::canvas::{Paint, Surface};
    use rand::{SeedableRng, rngs::StdRng};

    fn setup() -> (GameEngine, Surface, Renderer) {
        let config = GameConfig {
            initial_direction: Some(Direction::Right),
            ..GameConfig::small()
        };
        let mut engine = GameEngine::with_rng(config.clone(), StdRng::seed_from_u64(8));
        *engine.food_mut() = Food::new(engine.board(), Position::new(0, 9), 64);
        let surface = Surface::new(config.board(), config.cell_size(), config.palette.background);
        (engine, surface, Renderer::new(config.palette))
    }

    fn is_snake(surface: &Surface, pos: Position) -> bool {
        surface.paint_at(pos)
            == Some(Paint {
                fill: Palette::default().snake,
                border: Some(Palette::default().border),
            })
    }

    #[test]
    fn test_initial_frame() {
        let (engine, mut surface, renderer) = setup();

        renderer.draw_initial(&mut surface, &engine).unwrap();

        assert!(is_snake(&surface, Position::new(5, 5)));
        let food = surface.paint_at(Position::new(0, 9)).unwrap();
        assert_eq!(food.fill, Palette::default().food);
        assert_eq!(food.border, Some(Palette::default().border));
    }

    #[test]
    fn test_vacated_cell_is_erased() {
        let (mut engine, mut surface, renderer) = setup();
        renderer.draw_initial(&mut surface, &engine).unwrap();

        let report = engine.tick();
        renderer.draw_tick(&mut surface, &engine, &report).unwrap();

        assert!(is_snake(&surface, Position::new(6, 5)));
        let vacated = surface.paint_at(Position::new(5, 5)).unwrap();
        assert_eq!(vacated.fill, Palette::default().background);
        assert_eq!(vacated.border, None);
    }

    #[test]
    fn test_reset_clears_old_body() {
        let (engine, mut surface, renderer) = setup();
        renderer.draw_initial(&mut surface, &engine).unwrap();

        // A stale snake picture far from the start cell
        surface.draw_cell(CellSprite::outlined(
            Position::new(2, 2),
            Palette::default().snake,
            Palette::default().border,
        ));
        let report = TickReport {
            reset: true,
            ..TickReport::default()
        };
        renderer.draw_tick(&mut surface, &engine, &report).unwrap();

        assert!(!is_snake(&surface, Position::new(2, 2)));
        assert!(is_snake(&surface, engine.snake().head()));
    }
}
