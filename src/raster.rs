//! A simple raster surface
//!
//! `CellSurface` draws text as a grid of character cells: every visible
//! character becomes a filled block in its resolved colour, whitespace
//! advances the pen and `\n` starts a new line. It has no font metrics; it
//! exists so exports produce real, deterministic PNG files without a
//! browser or display.

use std::io::Cursor;

use image::{ImageFormat, Rgba as Pixel, RgbaImage};
use unicode_width::UnicodeWidthChar;

use crate::error::CaptureError;
use crate::export::{CaptureOptions, RenderSurface, RenderedContent};
use crate::style::{parse_color, Rgba, StyleDeclaration};

/// Cell width in CSS pixels
const CELL_WIDTH: u32 = 10;
/// Cell height in CSS pixels
const CELL_HEIGHT: u32 = 20;

/// Frame drawn around the content while it is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub background: Rgba,
    pub border: Option<Rgba>,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            border: Some(Rgba { r: 0, g: 0, b: 0, a: 26 }),
        }
    }
}

/// One positioned character cell
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    col: u32,
    row: u32,
    width: u32,
    color: Rgba,
    background: Option<Rgba>,
    bold: bool,
    underline: bool,
}

/// In-memory surface that rasterizes content as character cells
#[derive(Debug, Default)]
pub struct CellSurface {
    content: Option<RenderedContent>,
    frame: Frame,
}

impl CellSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Lay out content as cells; returns cells plus grid size (cols, rows)
    fn layout(content: &RenderedContent) -> (Vec<Cell>, u32, u32) {
        let mut cells = Vec::new();
        let (mut col, mut row) = (0u32, 0u32);
        let mut max_col = 0u32;

        for run in &content.runs {
            let style = run.resolved(&content.base);
            let color = resolve_color(style.color.as_deref(), &content.base);
            let background = style.background_color.as_deref().and_then(parse_color);

            for ch in run.text.chars() {
                if ch == '\n' {
                    row += 1;
                    col = 0;
                    continue;
                }
                let width = UnicodeWidthChar::width(ch).unwrap_or(0) as u32;
                if width == 0 {
                    continue;
                }
                if !ch.is_whitespace() {
                    cells.push(Cell {
                        col,
                        row,
                        width,
                        color,
                        background,
                        bold: style.is_bold(),
                        underline: style.is_underlined(),
                    });
                }
                col += width;
                max_col = max_col.max(col);
            }
        }

        let rows = if max_col == 0 { 0 } else { row + 1 };
        (cells, max_col, rows)
    }
}

fn resolve_color(value: Option<&str>, base: &StyleDeclaration) -> Rgba {
    value
        .and_then(parse_color)
        .or_else(|| base.color.as_deref().and_then(parse_color))
        .unwrap_or(Rgba::BLACK)
}

fn fill(image: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba) {
    let x1 = x1.min(image.width());
    let y1 = y1.min(image.height());
    for y in y0..y1 {
        for x in x0..x1 {
            image.put_pixel(x, y, Pixel(color.to_array()));
        }
    }
}

impl RenderSurface for CellSurface {
    type Snapshot = Frame;

    fn prepare_capture(&mut self) -> Frame {
        std::mem::replace(
            &mut self.frame,
            Frame {
                background: Rgba::TRANSPARENT,
                border: None,
            },
        )
    }

    fn restore(&mut self, snapshot: Frame) {
        self.frame = snapshot;
    }

    fn render(&mut self, content: &RenderedContent) {
        self.content = Some(content.clone());
    }

    fn capture(&mut self, options: &CaptureOptions) -> Result<Vec<u8>, CaptureError> {
        let content = self
            .content
            .as_ref()
            .ok_or_else(|| CaptureError::new("nothing rendered"))?;

        let (cells, cols, rows) = Self::layout(content);
        let scale = options.scale;
        let px = |css: u32| (css as f32 * scale).round() as u32;

        let width = px(options.width.unwrap_or(cols * CELL_WIDTH));
        let height = px(options.height.unwrap_or(rows * CELL_HEIGHT));
        if width == 0 || height == 0 {
            return Err(CaptureError::new("content has no visible size"));
        }

        let mut image = RgbaImage::from_pixel(width, height, Pixel(self.frame.background.to_array()));

        // Centre the text block the way the preview box does
        let offset_x = width.saturating_sub(px(cols * CELL_WIDTH)) / 2;
        let offset_y = height.saturating_sub(px(rows * CELL_HEIGHT)) / 2;

        for cell in &cells {
            let x = offset_x + px(cell.col * CELL_WIDTH);
            let y = offset_y + px(cell.row * CELL_HEIGHT);
            let w = px(cell.width * CELL_WIDTH);
            let h = px(CELL_HEIGHT);

            if let Some(background) = cell.background {
                fill(&mut image, x, y, x + w, y + h, background);
            }

            let inset = if cell.bold { px(1) } else { px(2) };
            fill(
                &mut image,
                x + inset,
                y + px(4),
                x + w.saturating_sub(inset),
                y + h.saturating_sub(px(4)),
                cell.color,
            );
            if cell.underline {
                fill(&mut image, x, y + h.saturating_sub(px(2)), x + w, y + h.saturating_sub(px(1)), cell.color);
            }
        }

        if let Some(border) = self.frame.border {
            let t = px(1).max(1);
            fill(&mut image, 0, 0, width, t, border);
            fill(&mut image, 0, height.saturating_sub(t), width, height, border);
            fill(&mut image, 0, 0, t, height, border);
            fill(&mut image, width.saturating_sub(t), 0, width, height, border);
        }

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| CaptureError::new(format!("PNG encoding failed: {}", e)))?;
        Ok(png)
    }
}
