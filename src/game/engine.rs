use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    food::Food,
    grid::{Board, Position},
    snake::{Snake, Step},
};

/// What a tick changed, for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the snake ran into itself and started over
    pub reset: bool,
    /// Tail cell that must be erased
    pub vacated: Option<Position>,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    food: Food,
    ticks: u64,
}

impl GameEngine<StdRng> {
    /// Create a new game engine, seeded from the config when it carries a seed
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let board = config.board();
        let start = config.start_position();
        let direction = config
            .initial_direction
            .unwrap_or_else(|| Direction::random(&mut rng));

        let snake = Snake::new(board, start, direction);
        let mut food = Food::new(board, start, config.max_food_attempts);
        food.place_avoiding(&mut rng, |pos| snake.occupies(pos));

        log::info!(
            "new game on a {}x{} board, snake at ({}, {}) heading {:?}, food at {:?}",
            board.width(),
            board.height(),
            start.x,
            start.y,
            direction,
            food.position()
        );

        Self {
            config,
            rng,
            snake,
            food,
            ticks: 0,
        }
    }

    /// Ask the snake to turn on the next tick
    pub fn turn(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// Execute one step of the game: move, commit the queued turn, then eat
    pub fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport::default();

        match self.snake.advance(&mut self.rng) {
            Step::Moved { vacated } => report.vacated = vacated,
            Step::Reset => {
                log::info!(
                    "snake ran into itself on tick {}, restarting at {:?}",
                    self.ticks,
                    self.snake.start()
                );
                report.reset = true;
            }
        }

        self.snake.apply_pending_direction();

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            let snake = &self.snake;
            self.food
                .place_avoiding(&mut self.rng, |pos| snake.occupies(pos));
            report.ate_food = true;
            log::debug!(
                "food eaten, target length {}, next food at {:?}",
                self.snake.target_len(),
                self.food.position()
            );
        }

        report
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_mut(&mut self) -> &mut Food {
        &mut self.food
    }

    pub fn board(&self) -> Board {
        self.config.board()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::snake::snake_with_body;

    fn seeded(config: GameConfig) -> GameEngine {
        GameEngine::with_rng(config, StdRng::seed_from_u64(1234))
    }

    fn heading_right() -> GameConfig {
        GameConfig {
            initial_direction: Some(Direction::Right),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_game() {
        let engine = seeded(heading_right());

        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.snake().head(), Position::new(16, 12));
        assert_eq!(engine.snake().direction(), Direction::Right);
        assert_ne!(engine.food().position(), engine.snake().head());
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_seeded_games_match() {
        let config = GameConfig {
            seed: Some(77),
            ..GameConfig::default()
        };
        let a = GameEngine::new(config.clone());
        let b = GameEngine::new(config);

        assert_eq!(a.food().position(), b.food().position());
        assert_eq!(a.snake().direction(), b.snake().direction());
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = seeded(heading_right());
        *engine.food_mut() = Food::new(engine.board(), Position::new(0, 0), 64);

        let report = engine.tick();

        assert!(!report.ate_food);
        assert!(!report.reset);
        assert_eq!(report.vacated, Some(Position::new(16, 12)));
        assert_eq!(engine.snake().head(), Position::new(17, 12));
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = seeded(heading_right());
        *engine.food_mut() = Food::new(engine.board(), Position::new(17, 12), 64);

        let report = engine.tick();

        assert!(report.ate_food);
        assert_eq!(engine.snake().target_len(), 2);
        assert!(!engine.snake().occupies(engine.food().position()));

        // The tail stays put on the tick after eating
        *engine.food_mut() = Food::new(engine.board(), Position::new(0, 0), 64);
        let report = engine.tick();
        assert_eq!(report.vacated, None);
        assert_eq!(engine.snake().len(), 2);
    }

    #[test]
    fn test_turn_takes_effect_next_tick() {
        let mut engine = seeded(heading_right());
        *engine.food_mut() = Food::new(engine.board(), Position::new(0, 0), 64);

        engine.turn(Direction::Down);
        engine.tick();
        assert_eq!(engine.snake().head(), Position::new(17, 12));
        assert_eq!(engine.snake().direction(), Direction::Down);

        engine.tick();
        assert_eq!(engine.snake().head(), Position::new(17, 13));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = seeded(heading_right());

        engine.turn(Direction::Left);
        engine.tick();

        assert_eq!(engine.snake().direction(), Direction::Right);
    }

    #[test]
    fn test_self_collision_reports_reset() {
        let mut engine = seeded(GameConfig::small());
        let board = engine.board();
        *engine.food_mut() = Food::new(board, Position::new(0, 9), 64);
        // Head at (5,5) heading Up into the body segment at (5,4)
        *engine.snake_mut() = snake_with_body(
            board,
            &[
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
            ],
            Direction::Up,
        );

        let report = engine.tick();

        assert!(report.reset);
        assert_eq!(report.vacated, None);
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.snake().head(), Position::new(5, 5));
    }
}
