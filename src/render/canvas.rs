//! Drawing surface for grid cells
//!
//! The game only ever paints whole cells. A [`Surface`] remembers what was
//! painted where, so cells that are not repainted keep their last colour,
//! and a [`TerminalCanvas`] shows that surface through ratatui.

use anyhow::{Context, Result};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Widget},
};

use crate::game::{Board, CellSize, Position, Rgb};

/// A single cell to paint: fill colour plus an optional outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSprite {
    pub position: Position,
    pub fill: Rgb,
    pub border: Option<Rgb>,
}

impl CellSprite {
    pub fn outlined(position: Position, fill: Rgb, border: Rgb) -> Self {
        Self {
            position,
            fill,
            border: Some(border),
        }
    }

    /// Paint the cell back to the background colour
    pub fn erase(position: Position, background: Rgb) -> Self {
        Self {
            position,
            fill: background,
            border: None,
        }
    }

    fn paint(&self) -> Paint {
        Paint {
            fill: self.fill,
            border: self.border,
        }
    }
}

/// What a cell on the surface currently looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub fill: Rgb,
    pub border: Option<Rgb>,
}

/// Something the game can draw cells onto
pub trait Canvas {
    /// Paint every cell with `color`
    fn clear(&mut self, color: Rgb);
    fn draw_cell(&mut self, sprite: CellSprite);
    /// Show everything drawn so far
    fn present(&mut self) -> Result<()>;
}

/// In-memory picture of the board, one [`Paint`] per cell
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    board: Board,
    cell_size: CellSize,
    cells: Vec<Paint>,
}

impl Surface {
    pub fn new(board: Board, cell_size: CellSize, background: Rgb) -> Self {
        let blank = Paint {
            fill: background,
            border: None,
        };
        Self {
            board,
            cell_size,
            cells: vec![blank; board.area()],
        }
    }

    pub fn paint_at(&self, pos: Position) -> Option<Paint> {
        self.board.index_of(pos).map(|i| self.cells[i])
    }

    /// Screen size of the surface, without any frame around it
    pub fn extent(&self) -> (u16, u16) {
        self.cell_size.board_extent(&self.board)
    }
}

impl Canvas for Surface {
    fn clear(&mut self, color: Rgb) {
        let blank = Paint {
            fill: color,
            border: None,
        };
        self.cells.fill(blank);
    }

    fn draw_cell(&mut self, sprite: CellSprite) {
        if let Some(i) = self.board.index_of(sprite.position) {
            self.cells[i] = sprite.paint();
        }
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Glyph for column `col` of a cell `width` columns wide
fn cell_symbol(border: bool, col: u16, width: u16) -> &'static str {
    match (border, width) {
        (false, _) => " ",
        (true, 1) => "□",
        (true, _) if col == 0 => "[",
        (true, _) if col + 1 == width => "]",
        (true, _) => " ",
    }
}

impl Widget for &Surface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (pos, paint) in self.board.positions().zip(&self.cells) {
            let (sx, sy) = self.cell_size.to_screen(pos);
            let style = Style::default()
                .bg(to_color(paint.fill))
                .fg(paint.border.map(to_color).unwrap_or(Color::Reset));

            for dy in 0..self.cell_size.height {
                for dx in 0..self.cell_size.width {
                    let x = area.x.saturating_add(sx).saturating_add(dx);
                    let y = area.y.saturating_add(sy).saturating_add(dy);
                    if x >= area.right() || y >= area.bottom() {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(cell_symbol(
                            paint.border.is_some(),
                            dx,
                            self.cell_size.width,
                        ))
                        .set_style(style);
                    }
                }
            }
        }
    }
}

/// A [`Surface`] shown in a terminal, centred and framed with a title
pub struct TerminalCanvas<B: Backend> {
    terminal: Terminal<B>,
    surface: Surface,
    title: String,
    frame_color: Rgb,
}

impl<B: Backend> TerminalCanvas<B> {
    pub fn new(terminal: Terminal<B>, surface: Surface, title: &str, frame_color: Rgb) -> Self {
        Self {
            terminal,
            surface,
            title: format!(" {} ", title),
            frame_color,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }
}

/// Rectangle of `width` x `height` centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height).intersection(area)
}

impl<B: Backend> Canvas for TerminalCanvas<B> {
    fn clear(&mut self, color: Rgb) {
        self.surface.clear(color);
    }

    fn draw_cell(&mut self, sprite: CellSprite) {
        self.surface.draw_cell(sprite);
    }

    fn present(&mut self) -> Result<()> {
        let (width, height) = self.surface.extent();
        let surface = &self.surface;
        let block = Block::bordered()
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(to_color(self.frame_color)))
            .title(self.title.as_str());

        self.terminal
            .draw(|frame| {
                let outer = centered(
                    frame.area(),
                    width.saturating_add(2),
                    height.saturating_add(2),
                );
                let inner = block.inner(outer);
                frame.render_widget(block, outer);
                frame.render_widget(surface, inner);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }
}
