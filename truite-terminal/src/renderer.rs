//! Character-cell render surface for the terminal

use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use std::io::{self, Write};
use truite_core::{Color as Rgb, RenderSurface};

/// Surface units per terminal row. Cells are roughly twice as tall as they
/// are wide, so each row covers two units to keep shapes in proportion.
pub const CELL_ASPECT: f32 = 2.0;

/// Circles are shrunk by this factor so marker dots stay about one cell.
const CIRCLE_SCALE: f32 = 0.5;

const FILL_CHAR: char = '#';
const DOT_CHAR: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    color: Rgb,
}

/// A [`RenderSurface`] that rasterizes into a character buffer and writes it
/// to `W` on [`present`](RenderSurface::present).
pub struct TerminalSurface<W: Write> {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    background: Rgb,
    overlay: Option<String>,
    writer: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(columns: usize, rows: usize, writer: W) -> Self {
        Self {
            columns,
            rows,
            cells: vec![
                Cell {
                    character: ' ',
                    color: Rgb::BLACK,
                };
                columns * rows
            ],
            background: Rgb::BLACK,
            overlay: None,
            writer,
        }
    }

    /// Size in surface units, the coordinate space draw calls use.
    pub fn size(&self) -> (u32, u32) {
        (
            self.columns as u32,
            (self.rows as f32 * CELL_ASPECT) as u32,
        )
    }

    /// Text written over the first row on the next present.
    pub fn set_overlay(&mut self, text: impl Into<String>) {
        self.overlay = Some(text.into());
    }

    #[cfg(test)]
    fn char_at(&self, column: usize, row: usize) -> Option<char> {
        self.cell(column, row).map(|cell| cell.character)
    }

    fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        if column < self.columns && row < self.rows {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    fn width(&self) -> f32 {
        self.columns as f32
    }

    fn height(&self) -> f32 {
        self.rows as f32 * CELL_ASPECT
    }

    /// Plot at surface coordinates; anything off-screen is ignored.
    fn plot(&mut self, x: f32, y: f32, character: char, color: Rgb) {
        if !(x >= 0.0 && y >= 0.0) {
            return;
        }
        let column = x as usize;
        let row = (y / CELL_ASPECT) as usize;
        if column < self.columns && row < self.rows {
            self.cells[row * self.columns + column] = Cell { character, color };
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    type Error = io::Error;

    fn clear(&mut self, color: Rgb) {
        self.background = color;
        for cell in &mut self.cells {
            *cell = Cell {
                character: ' ',
                color,
            };
        }
    }

    fn draw_line(&mut self, from: Point2<f32>, to: Point2<f32>, color: Rgb) {
        let Some((from, to)) = clip_line(from, to, self.width(), self.height()) else {
            return;
        };

        let delta = to - from;
        let character = line_char(delta.x, delta.y / CELL_ASPECT);
        let steps = delta.x.abs().max(delta.y.abs() / CELL_ASPECT).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let point = from + delta * (step as f32 / steps as f32);
            self.plot(point.x, point.y, character, color);
        }
    }

    /// Even-odd scanline fill sampled at the center of each cell.
    fn draw_polygon(&mut self, points: &[Point2<f32>], color: Rgb) {
        if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return;
        }

        let mut crossings: Vec<f32> = Vec::new();
        for row in 0..self.rows {
            let y = (row as f32 + 0.5) * CELL_ASPECT;

            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = &points[(i + 1) % points.len()];
                if (a.y <= y) != (b.y <= y) {
                    crossings.push(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0);
                let end = (span[1] - 0.5).floor().min(self.width() - 1.0);
                let mut column = start;
                while column <= end {
                    self.plot(column, y, FILL_CHAR, color);
                    column += 1.0;
                }
            }
        }
    }

    fn draw_circle(&mut self, center: Point2<f32>, radius: f32, color: Rgb) {
        if !center.x.is_finite() || !center.y.is_finite() {
            return;
        }

        let radius = (radius * CIRCLE_SCALE).max(0.5);
        let column = center.x.floor();
        let row = (center.y / CELL_ASPECT).floor();
        let reach = radius.ceil();

        let mut dy = -reach;
        while dy <= reach {
            let mut dx = -reach;
            while dx <= reach {
                let x = column + dx + 0.5;
                let y = (row + dy + 0.5) * CELL_ASPECT;
                let distance = ((x - center.x).powi(2) + ((y - center.y) / CELL_ASPECT).powi(2)).sqrt();
                if (dx == 0.0 && dy == 0.0) || distance < radius {
                    self.plot(x, y, DOT_CHAR, color);
                }
                dx += 1.0;
            }
            dy += 1.0;
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.writer.queue(cursor::MoveTo(0, 0))?;
        self.writer.queue(SetBackgroundColor(to_terminal(self.background)))?;

        let mut current: Option<Rgb> = None;
        for row in 0..self.rows {
            self.writer.queue(cursor::MoveTo(0, row as u16))?;
            for cell in &self.cells[row * self.columns..(row + 1) * self.columns] {
                if current != Some(cell.color) {
                    self.writer.queue(SetForegroundColor(to_terminal(cell.color)))?;
                    current = Some(cell.color);
                }
                self.writer.queue(Print(cell.character))?;
            }
        }

        if let Some(overlay) = &self.overlay {
            let text: String = overlay.chars().take(self.columns).collect();
            self.writer.queue(cursor::MoveTo(0, 0))?;
            self.writer.queue(SetForegroundColor(Color::Yellow))?;
            self.writer.queue(Print(text))?;
        }

        self.writer.queue(ResetColor)?;
        self.writer.flush()
    }
}

fn to_terminal(color: Rgb) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Pick a glyph that follows the direction of a line in cell space.
fn line_char(dx: f32, dy: f32) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay * 2.0 < ax {
        '-'
    } else if ax * 2.0 < ay {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment to the `[0, width] x [0, height]` rectangle.
fn clip_line(
    from: Point2<f32>,
    to: Point2<f32>,
    width: f32,
    height: f32,
) -> Option<(Point2<f32>, Point2<f32>)> {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return None;
    }

    let delta = to - from;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-delta.x, from.x),
        (delta.x, width - from.x),
        (-delta.y, from.y),
        (delta.y, height - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((from + delta * t0, from + delta * t1))
}
