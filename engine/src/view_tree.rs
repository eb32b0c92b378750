use crate::ui::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerInput {
    pub pos: Option<(u32, u32)>,
    pub pressed: bool,
}

/// Flat list of tappable regions built fresh for each frame.
#[derive(Debug, Clone)]
pub struct ViewTree<A> {
    pub nodes: Vec<ButtonNode<A>>,
}

impl<A> Default for ViewTree<A> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<A> ViewTree<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: ButtonNode<A>) {
        self.nodes.push(node);
    }
}

#[derive(Debug, Clone)]
pub struct ButtonNode<A> {
    pub id: u32,
    pub rect: Rect,
    pub action: A,
    pub enabled: bool,
}

/// Actions of every enabled button under the pointer on the frame it was pressed.
///
/// Topmost (last pushed) buttons come first.
pub fn hit_test_actions<A: Clone>(view: &ViewTree<A>, input: PointerInput) -> Vec<A> {
    if !input.pressed {
        return Vec::new();
    }
    let Some((px, py)) = input.pos else {
        return Vec::new();
    };
    view.nodes
        .iter()
        .rev()
        .filter(|button| button.enabled && button.rect.contains(px, py))
        .map(|button| button.action.clone())
        .collect()
}
