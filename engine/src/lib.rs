pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod render;
pub mod surface;
pub mod ui;
pub mod view_tree;

/// Pure, deterministic game rules: one input in, one new state out.
///
/// Headful frontends drive the same rules through [`app::GameApp`]; tests drive them through
/// [`HeadlessRunner`] without a window.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

#[derive(Debug)]
pub struct HeadlessRunner<G: GameLogic> {
    game: G,
    state: G::State,
    frame: usize,
}

impl<G: GameLogic> HeadlessRunner<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn from_state(game: G, state: G::State) -> Self {
        Self {
            game,
            state,
            frame: 0,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    pub fn step(&mut self, input: G::Input) -> usize {
        self.state = self.game.step(&self.state, input);
        self.frame += 1;
        self.frame
    }

    pub fn run<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.step(input);
        }
        self.frame
    }

    /// Steps until `done` holds for the current state or `max_frames` inputs were consumed.
    ///
    /// Returns `true` if the predicate was satisfied.
    pub fn run_until<I, F>(&mut self, max_frames: usize, mut input: I, mut done: F) -> bool
    where
        I: FnMut(usize) -> G::Input,
        F: FnMut(&G::State) -> bool,
    {
        for _ in 0..max_frames {
            if done(&self.state) {
                return true;
            }
            let next = input(self.frame);
            self.step(next);
        }
        done(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Additive;

    impl GameLogic for Additive {
        type State = i32;
        type Input = i32;

        fn initial_state(&self) -> Self::State {
            0
        }

        fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
            *state + input
        }
    }

    #[test]
    fn runner_steps_and_counts_frames() {
        let mut runner = HeadlessRunner::new(Additive);
        runner.run([1, 2, 3]);
        assert_eq!(runner.frame(), 3);
        assert_eq!(runner.state(), &6);
    }

    #[test]
    fn run_until_stops_as_soon_as_predicate_holds() {
        let mut runner = HeadlessRunner::from_state(Additive, 10);
        let reached = runner.run_until(100, |_| 5, |s| *s >= 30);
        assert!(reached);
        assert_eq!(runner.state(), &30);
        assert_eq!(runner.frame(), 4);
    }

    #[test]
    fn run_until_gives_up_after_max_frames() {
        let mut runner = HeadlessRunner::new(Additive);
        let reached = runner.run_until(3, |_| 1, |s| *s > 100);
        assert!(!reached);
        assert_eq!(runner.frame(), 3);
    }
}
