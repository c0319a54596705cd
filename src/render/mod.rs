pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, CellSprite, Paint, Surface, TerminalCanvas};
pub use renderer::Renderer;
