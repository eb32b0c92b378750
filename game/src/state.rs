use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::playtest::InputAction;
use crate::tetris_core::{GravityAdvanceResult, TetrisCore};

pub const DEFAULT_GRAVITY_INTERVAL: Duration = Duration::from_millis(500);

/// Everything the frame driver owns between frames.
///
/// `clock` is a monotonic game clock advanced by frame deltas; gravity fires when
/// `clock - last_tick` strictly exceeds `gravity_interval`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tetris: TetrisCore,
    #[serde(with = "crate::serde_duration")]
    pub gravity_interval: Duration,
    #[serde(with = "crate::serde_duration")]
    pub clock: Duration,
    #[serde(with = "crate::serde_duration")]
    pub last_tick: Duration,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(TetrisCore::new())
    }
}

impl GameState {
    pub fn new(tetris: TetrisCore) -> Self {
        Self::with_gravity_interval(tetris, DEFAULT_GRAVITY_INTERVAL)
    }

    pub fn with_gravity_interval(tetris: TetrisCore, gravity_interval: Duration) -> Self {
        Self {
            tetris,
            gravity_interval,
            clock: Duration::ZERO,
            last_tick: Duration::ZERO,
        }
    }

    pub fn tetris(&self) -> &TetrisCore {
        &self.tetris
    }

    pub fn tetris_mut(&mut self) -> &mut TetrisCore {
        &mut self.tetris
    }

    pub fn is_halted(&self) -> bool {
        self.tetris.is_game_over()
    }

    /// One-line JSON dump of the whole state, for debug logs.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Applies one player action. Returns whether the piece changed.
    pub fn apply_action(&mut self, action: InputAction) -> bool {
        if self.is_halted() {
            return false;
        }
        match action {
            InputAction::MoveLeft => self.tetris.move_piece_left(),
            InputAction::MoveRight => self.tetris.move_piece_right(),
            InputAction::SoftDrop => self.tetris.move_piece_down(),
            InputAction::Rotate => self.tetris.rotate_piece(),
        }
    }

    /// Advances the clock by `dt`, applies `actions` in order, then runs at most one gravity step.
    ///
    /// Returns the gravity result when a tick fired this frame.
    pub fn advance(
        &mut self,
        dt: Duration,
        actions: &[InputAction],
    ) -> Option<GravityAdvanceResult> {
        if self.is_halted() {
            return None;
        }

        self.clock = self.clock.saturating_add(dt);
        for &action in actions {
            self.apply_action(action);
        }

        if self.clock.saturating_sub(self.last_tick) <= self.gravity_interval {
            return None;
        }
        self.last_tick = self.clock;

        let result = self.tetris.advance_with_gravity();
        match result {
            GravityAdvanceResult::Locked { lines_cleared } => {
                log::debug!("piece locked, {lines_cleared} line(s) cleared");
            }
            GravityAdvanceResult::Halted { lines_cleared } => {
                log::debug!("piece locked, {lines_cleared} line(s) cleared, spawn blocked");
            }
            GravityAdvanceResult::Moved | GravityAdvanceResult::NoActivePiece => {}
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetris_core::Vec2i;

    #[test]
    fn gravity_needs_strictly_more_than_the_interval() {
        let mut state = GameState::default();
        assert_eq!(state.advance(Duration::from_millis(500), &[]), None);
        assert_eq!(
            state.advance(Duration::from_millis(1), &[]),
            Some(GravityAdvanceResult::Moved)
        );
        assert_eq!(state.last_tick, Duration::from_millis(501));
    }

    #[test]
    fn a_long_frame_fires_only_one_tick() {
        let mut state = GameState::default();
        let start = state.tetris().current_piece_pos();
        assert_eq!(
            state.advance(Duration::from_secs(5), &[]),
            Some(GravityAdvanceResult::Moved)
        );
        assert_eq!(state.tetris().current_piece_pos(), start + Vec2i::DOWN);
    }

    #[test]
    fn snapshot_json_records_board_and_timing() {
        let mut state = GameState::default();
        state.tetris_mut().set_cell(2, 19, 1);
        state.advance(Duration::from_millis(40), &[]);

        let json = state.snapshot_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["clock"], 40);
        assert_eq!(value["gravity_interval"], 500);
        assert_eq!(value["tetris"]["board"][19][2], 1);
        assert_eq!(value["tetris"]["game_over"], false);
    }

    #[test]
    fn actions_apply_before_gravity() {
        let mut state = GameState::default();
        state.advance(Duration::from_millis(16), &[InputAction::MoveLeft]);
        assert_eq!(state.tetris().current_piece_pos(), Vec2i::new(2, -2));
    }
}
