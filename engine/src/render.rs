//! Grid-of-blocks drawing on top of [`Renderer2d`].

use crate::graphics::{BLACK, Color, Renderer2d};
use crate::ui::Rect;

/// Pixel rect covered by grid cell `(x, y)`; `None` for negative coordinates.
pub fn cell_rect(x: i32, y: i32, cell_size: u32) -> Option<Rect> {
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    Some(Rect::new(
        x.saturating_mul(cell_size),
        y.saturating_mul(cell_size),
        cell_size,
        cell_size,
    ))
}

/// A filled square with a black one pixel outline.
pub fn draw_block(gfx: &mut dyn Renderer2d, x: i32, y: i32, cell_size: u32, color: Color) {
    let Some(rect) = cell_rect(x, y, cell_size) else {
        return;
    };
    gfx.fill_rect(rect, color);
    gfx.rect_outline(rect, BLACK);
}

/// Draws every non-zero cell of a row-major grid (row 0 at the top).
pub fn draw_grid<R>(gfx: &mut dyn Renderer2d, rows: &[R], cell_size: u32, color: Color)
where
    R: AsRef<[u8]>,
{
    for (y, row) in rows.iter().enumerate() {
        for (x, &cell) in row.as_ref().iter().enumerate() {
            if cell != 0 {
                draw_block(gfx, x as i32, y as i32, cell_size, color);
            }
        }
    }
}

/// Draws each `(x, y)` cell; cells above the visible area (negative `y`) are skipped.
pub fn draw_cells<I>(gfx: &mut dyn Renderer2d, cells: I, cell_size: u32, color: Color)
where
    I: IntoIterator<Item = (i32, i32)>,
{
    for (x, y) in cells {
        if y >= 0 {
            draw_block(gfx, x, y, cell_size, color);
        }
    }
}
