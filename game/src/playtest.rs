use std::time::Duration;

use engine::GameLogic;

use crate::state::GameState;
use crate::tetris_core::{TetrisCore, Vec2i};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Everything one frame feeds into the simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub dt: Duration,
    pub actions: Vec<InputAction>,
}

impl FrameInput {
    /// A frame with no player input.
    pub fn idle(dt: Duration) -> Self {
        Self {
            dt,
            actions: Vec::new(),
        }
    }

    /// A frame long enough to fire exactly one gravity tick at `interval`.
    pub fn tick(interval: Duration) -> Self {
        Self::idle(interval + Duration::from_millis(1))
    }

    pub fn with_action(mut self, action: InputAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Headless rules: the same `GameState::advance` the window app runs, one frame per step.
#[derive(Debug, Clone)]
pub struct TetrisLogic {
    spawn_anchor: Option<Vec2i>,
    gravity_interval: Duration,
}

impl Default for TetrisLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl TetrisLogic {
    pub fn new() -> Self {
        Self {
            spawn_anchor: None,
            gravity_interval: crate::state::DEFAULT_GRAVITY_INTERVAL,
        }
    }

    pub fn with_spawn_anchor(mut self, anchor: Vec2i) -> Self {
        self.spawn_anchor = Some(anchor);
        self
    }

    pub fn with_gravity_interval(mut self, interval: Duration) -> Self {
        self.gravity_interval = interval;
        self
    }

    pub fn gravity_interval(&self) -> Duration {
        self.gravity_interval
    }
}

impl GameLogic for TetrisLogic {
    type State = GameState;
    type Input = FrameInput;

    fn initial_state(&self) -> Self::State {
        let core = match self.spawn_anchor {
            Some(anchor) => TetrisCore::with_spawn_anchor(anchor),
            None => TetrisCore::new(),
        };
        GameState::with_gravity_interval(core, self.gravity_interval)
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        next.advance(input.dt, &input.actions);
        next
    }
}
