use std::time::Duration;

use engine::app::{AppConfig, AppContext, FrameControl, GameApp, InputFrame, run_game};
use engine::graphics::Renderer2d;
use engine::view_tree::ViewTree;

use game::input::actions_from_keys;
use game::playtest::InputAction;
use game::render_pipeline::{WINDOW_SIZE, render_frame};
use game::settings::{GameSettings, SettingsStore};
use game::state::GameState;
use game::tetris_core::{GravityAdvanceResult, TetrisCore};
use game::touch_pad::build_touch_pad;

struct BlockfallApp {
    settings: GameSettings,
}

impl GameApp for BlockfallApp {
    type State = GameState;
    type Action = InputAction;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Self::State {
        let interval = self.settings.gameplay.drop_interval();
        log::info!("starting, drop interval {}ms", interval.as_millis());
        GameState::with_gravity_interval(TetrisCore::new(), interval)
    }

    fn build_view(&self, _state: &Self::State) -> ViewTree<Self::Action> {
        let controls = self.settings.controls;
        if controls.show_touch_pad {
            build_touch_pad(WINDOW_SIZE, controls.touch_controls)
        } else {
            ViewTree::new()
        }
    }

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        pad_actions: &[Self::Action],
    ) -> FrameControl {
        if input.pointer_pressed {
            log::trace!(
                "pointer press at {:?} -> {:?}",
                input.pointer_pos,
                pad_actions
            );
        }

        let mut actions = actions_from_keys(&input.keys_pressed);
        actions.extend_from_slice(pad_actions);

        match state.advance(dt, &actions) {
            Some(GravityAdvanceResult::Halted { .. }) => {
                log::info!(
                    "spawn blocked, game halted with {} settled cells",
                    state.tetris().occupied_count()
                );
                match state.snapshot_json() {
                    Ok(json) => log::debug!("final state: {json}"),
                    Err(err) => log::warn!("could not serialize final state: {err}"),
                }
                FrameControl::Exit
            }
            _ if state.is_halted() => FrameControl::Exit,
            _ => FrameControl::Continue,
        }
    }

    fn render(
        &mut self,
        state: &Self::State,
        view: &ViewTree<Self::Action>,
        renderer: &mut dyn Renderer2d,
    ) {
        render_frame(renderer, state, view, self.settings.controls.show_touch_pad);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = SettingsStore::from_env();
    let settings = store.load().with_env_overrides();
    log::info!("settings: {} ({settings:?})", store.path().display());

    let config = AppConfig {
        title: "Blockfall".to_string(),
        size: WINDOW_SIZE,
        resizable: false,
        vsync: Some(settings.video.vsync),
    };
    run_game(config, BlockfallApp { settings })?;
    Ok(())
}
