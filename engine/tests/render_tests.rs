use engine::graphics::{BLACK, draw_to_surface};
use engine::render::{cell_rect, draw_block, draw_cells, draw_grid};
use engine::surface::{RgbaBufferSurface, Surface, SurfaceSize};
use engine::ui::Rect;

const CELL: u32 = 30;
const CYAN: [u8; 4] = [0, 255, 255, 255];

fn surface(cols: u32, rows: u32) -> RgbaBufferSurface {
    RgbaBufferSurface::new(SurfaceSize::new(cols * CELL, rows * CELL))
}

#[test]
fn cell_rect_scales_grid_coordinates() {
    assert_eq!(cell_rect(2, 3, CELL), Some(Rect::new(60, 90, 30, 30)));
    assert_eq!(cell_rect(0, -1, CELL), None);
    assert_eq!(cell_rect(-1, 0, CELL), None);
}

#[test]
fn draw_block_fills_square_with_black_outline() {
    let mut s = surface(3, 3);
    draw_to_surface(&mut s, |gfx| {
        gfx.clear([50, 50, 50, 255]);
        draw_block(gfx, 1, 1, CELL, CYAN);
    });

    // Outline on every edge of the cell.
    assert_eq!(s.pixel(30, 30), Some(BLACK));
    assert_eq!(s.pixel(59, 59), Some(BLACK));
    assert_eq!(s.pixel(45, 30), Some(BLACK));
    assert_eq!(s.pixel(30, 45), Some(BLACK));
    // Interior filled.
    assert_eq!(s.pixel(31, 31), Some(CYAN));
    assert_eq!(s.pixel(45, 45), Some(CYAN));
    // Neighbouring cells untouched.
    assert_eq!(s.pixel(29, 45), Some([50, 50, 50, 255]));
    assert_eq!(s.pixel(60, 45), Some([50, 50, 50, 255]));
}

#[test]
fn draw_grid_only_draws_occupied_cells() {
    let mut s = surface(2, 2);
    let rows = [[0u8, 1u8], [1u8, 0u8]];
    draw_to_surface(&mut s, |gfx| {
        gfx.clear(BLACK);
        draw_grid(gfx, &rows, CELL, CYAN);
    });

    assert_eq!(s.pixel(45, 15), Some(CYAN));
    assert_eq!(s.pixel(15, 45), Some(CYAN));
    assert_eq!(s.pixel(15, 15), Some(BLACK));
    assert_eq!(s.pixel(45, 45), Some(BLACK));
}

#[test]
fn draw_cells_skips_rows_above_the_surface() {
    let mut s = surface(2, 2);
    draw_to_surface(&mut s, |gfx| {
        gfx.clear(BLACK);
        draw_cells(gfx, [(0, -1), (1, 0)], CELL, CYAN);
    });

    assert_eq!(s.pixel(45, 15), Some(CYAN));
    assert_eq!(s.pixel(15, 15), Some(BLACK));
}

#[test]
fn drawing_then_presenting_counts_one_frame() {
    let mut s = surface(1, 1);
    draw_to_surface(&mut s, |gfx| draw_block(gfx, 0, 0, CELL, CYAN));
    s.present().unwrap();
    assert_eq!(s.presented_frames(), 1);
    assert_eq!(s.pixel(15, 15), Some(CYAN));
}
