use engine::graphics::{BLACK, Color, Renderer2d};
use engine::render::{draw_cells, draw_grid};
use engine::surface::SurfaceSize;
use engine::view_tree::ViewTree;

use crate::playtest::InputAction;
use crate::state::GameState;
use crate::tetris_core::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::touch_pad::draw_touch_pad;

pub const BLOCK_SIZE: u32 = 30;

pub const WINDOW_SIZE: SurfaceSize = SurfaceSize::new(
    BOARD_WIDTH as u32 * BLOCK_SIZE,
    BOARD_HEIGHT as u32 * BLOCK_SIZE,
);

pub const BOARD_COLOR: Color = [0, 255, 255, 255];
pub const PIECE_COLOR: Color = [255, 0, 0, 255];

/// Draws one full frame: background, settled cells, the falling piece, then the pad overlay.
pub fn render_frame(
    gfx: &mut dyn Renderer2d,
    state: &GameState,
    pad: &ViewTree<InputAction>,
    show_pad: bool,
) {
    gfx.clear(BLACK);

    let tetris = state.tetris();
    draw_grid(gfx, tetris.board(), BLOCK_SIZE, BOARD_COLOR);
    draw_cells(gfx, tetris.piece().cells(), BLOCK_SIZE, PIECE_COLOR);

    if show_pad {
        draw_touch_pad(gfx, pad);
    }
}
