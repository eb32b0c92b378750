//! On-screen directional pad in the lower part of the window.
//!
//! The regions are always laid out and drawn; they only produce actions when built with
//! `wired = true`.

use engine::graphics::{Color, Renderer2d};
use engine::surface::SurfaceSize;
use engine::ui::Rect;
use engine::view_tree::{ButtonNode, ViewTree};

use crate::playtest::InputAction;

pub const PAD_BUTTON_SIZE: u32 = 60;

const PAD_FILL: Color = [255, 255, 255, 255];
const PAD_FILL_ALPHA: u8 = 48;
const PAD_OUTLINE: Color = [255, 255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchPadLayout {
    pub up: Rect,
    pub left: Rect,
    pub right: Rect,
    pub down: Rect,
}

impl TouchPadLayout {
    /// Cross of four buttons centred at the bottom of a `window`-sized frame.
    pub fn for_window(window: SurfaceSize) -> Self {
        let b = PAD_BUTTON_SIZE;
        let cluster = Rect::from_size(window.width, window.height).bottom_center(b * 3, b * 3);
        let (x, y) = (cluster.x, cluster.y);
        Self {
            up: Rect::new(x + b, y, b, b),
            left: Rect::new(x, y + b, b, b),
            right: Rect::new(x + 2 * b, y + b, b, b),
            down: Rect::new(x + b, y + 2 * b, b, b),
        }
    }

    pub fn regions(&self) -> [(Rect, InputAction); 4] {
        [
            (self.up, InputAction::Rotate),
            (self.left, InputAction::MoveLeft),
            (self.right, InputAction::MoveRight),
            (self.down, InputAction::SoftDrop),
        ]
    }
}

pub fn build_touch_pad(window: SurfaceSize, wired: bool) -> ViewTree<InputAction> {
    let mut tree = ViewTree::new();
    for (id, (rect, action)) in TouchPadLayout::for_window(window)
        .regions()
        .into_iter()
        .enumerate()
    {
        tree.push(ButtonNode {
            id: id as u32,
            rect,
            action,
            enabled: wired,
        });
    }
    tree
}

pub fn draw_touch_pad(gfx: &mut dyn Renderer2d, pad: &ViewTree<InputAction>) {
    for button in &pad.nodes {
        gfx.blend_rect(button.rect, PAD_FILL, PAD_FILL_ALPHA);
        gfx.rect_outline(button.rect, PAD_OUTLINE);
    }
}
