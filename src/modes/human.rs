use std::io::{Stdout, stdout};
use std::ops::ControlFlow;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Renderer, Surface, TerminalCanvas};

type TermCanvas = TerminalCanvas<CrosstermBackend<Stdout>>;

/// Keyboard-driven game in the terminal
pub struct HumanMode {
    engine: GameEngine,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(config.palette.clone());
        Self {
            engine: GameEngine::new(config),
            renderer,
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let config = self.engine.config();
        let surface = Surface::new(
            config.board(),
            config.cell_size(),
            config.palette.background,
        );
        let frame_color = config.palette.border;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let terminal = restore_on_error(Self::setup_terminal, || {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;
        let mut canvas = TerminalCanvas::new(terminal, surface, "Snake", frame_color);

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut canvas).await;

        // Cleanup terminal
        Self::cleanup_terminal(canvas.terminal_mut())?;

        result
    }

    async fn run_game_loop(&mut self, canvas: &mut TermCanvas) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.renderer.draw_initial(canvas, &self.engine)?;

        loop {
            tokio::select! {
                // Key presses are applied as they arrive, so by the time the
                // next tick fires every earlier event has been handled
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(&event).is_break() {
                                break;
                            }
                        }
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let report = self.engine.tick();
                    self.renderer.draw_tick(canvas, &self.engine, &report)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    log::info!("interrupted, quitting");
                    break;
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow<()> {
        match self.input_handler.handle_event(event) {
            KeyAction::Turn(direction) => {
                self.engine.turn(direction);
                ControlFlow::Continue(())
            }
            KeyAction::Quit => {
                log::info!("quit after {} ticks", self.engine.ticks());
                ControlFlow::Break(())
            }
            KeyAction::None => ControlFlow::Continue(()),
        }
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Run `setup`, calling `restore` before handing back any error
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = setup();
    if result.is_err() {
        restore();
    }
    result
}
