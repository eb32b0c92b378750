use winit::event::VirtualKeyCode;

use crate::playtest::InputAction;

/// Arrow keys, with WASD as aliases. Up rotates.
pub fn map_key_to_action(key: VirtualKeyCode) -> Option<InputAction> {
    match key {
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(InputAction::MoveLeft),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(InputAction::MoveRight),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(InputAction::SoftDrop),
        VirtualKeyCode::Up | VirtualKeyCode::W => Some(InputAction::Rotate),
        _ => None,
    }
}

/// Maps a frame's key-down events in order; repeats stay separate actions.
pub fn actions_from_keys(keys: &[VirtualKeyCode]) -> Vec<InputAction> {
    keys.iter().copied().filter_map(map_key_to_action).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_share_actions() {
        let pairs = [
            (VirtualKeyCode::Left, VirtualKeyCode::A, InputAction::MoveLeft),
            (VirtualKeyCode::Right, VirtualKeyCode::D, InputAction::MoveRight),
            (VirtualKeyCode::Down, VirtualKeyCode::S, InputAction::SoftDrop),
            (VirtualKeyCode::Up, VirtualKeyCode::W, InputAction::Rotate),
        ];
        for (arrow, letter, action) in pairs {
            assert_eq!(map_key_to_action(arrow), Some(action));
            assert_eq!(map_key_to_action(letter), Some(action));
        }
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(map_key_to_action(VirtualKeyCode::Space), None);
        assert_eq!(map_key_to_action(VirtualKeyCode::Escape), None);
    }

    #[test]
    fn repeated_keys_keep_order() {
        let keys = [
            VirtualKeyCode::Left,
            VirtualKeyCode::Q,
            VirtualKeyCode::Left,
            VirtualKeyCode::Up,
        ];
        assert_eq!(
            actions_from_keys(&keys),
            vec![
                InputAction::MoveLeft,
                InputAction::MoveLeft,
                InputAction::Rotate
            ]
        );
    }
}
