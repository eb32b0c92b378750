use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{
    ElementState, Event, KeyboardInput, MouseButton, TouchPhase, VirtualKeyCode, WindowEvent,
};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::graphics::{Renderer2d, draw_to_surface};
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::{Surface, SurfaceSize};
use crate::view_tree::{PointerInput, ViewTree, hit_test_actions};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to initialize graphics surface: {0}")]
    Pixels(#[from] pixels::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Frame buffer size in pixels; also the window's inner size in logical units.
    pub size: SurfaceSize,
    pub resizable: bool,
    pub vsync: Option<bool>,
}

impl AppConfig {
    /// Window inner size in logical units, so HiDPI displays scale the window up instead of
    /// shrinking it. The frame buffer stays at `size` physical pixels.
    pub fn logical_window_size(&self) -> LogicalSize<u32> {
        LogicalSize::new(self.size.width, self.size.height)
    }
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
}

/// Input gathered from window events since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Last known pointer position in frame buffer coordinates.
    pub pointer_pos: Option<(u32, u32)>,
    /// A left click or touch started during this frame.
    pub pointer_pressed: bool,
    /// Key-down events in arrival order, including OS key repeats.
    pub keys_pressed: Vec<VirtualKeyCode>,
}

impl InputFrame {
    pub fn pointer(&self) -> PointerInput {
        PointerInput {
            pos: self.pointer_pos,
            pressed: self.pointer_pressed,
        }
    }

    fn end_frame(&mut self) {
        self.pointer_pressed = false;
        self.keys_pressed.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

/// A game hosted by [`run_game`]: one `update_state` + `render` per display frame.
pub trait GameApp {
    type State;
    type Action: Clone;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    /// Tappable regions for the current state; hit-tested against the pointer before update.
    fn build_view(&self, state: &Self::State) -> ViewTree<Self::Action>;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        actions: &[Self::Action],
    ) -> FrameControl;

    fn render(
        &mut self,
        state: &Self::State,
        view: &ViewTree<Self::Action>,
        renderer: &mut dyn Renderer2d,
    );
}

fn build_context(config: &AppConfig, event_loop: &EventLoop<()>) -> Result<AppContext, AppError> {
    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(config.logical_window_size())
        .with_resizable(config.resizable)
        .build(event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut builder = PixelsBuilder::new(config.size.width, config.size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        builder = builder.enable_vsync(vsync);
    }
    let pixels = builder.build()?;
    let renderer = PixelsRenderer2d::new(pixels, config.size)?;

    log::info!(
        "window created: {}x{} (buffer {}x{})",
        window_size.width,
        window_size.height,
        config.size.width,
        config.size.height
    );

    Ok(AppContext { window, renderer })
}

/// Opens the window and drives `game` until it asks to exit or the window is closed.
///
/// Only returns on startup failure; a normal exit ends the process from inside the event loop.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), AppError> {
    let event_loop = EventLoop::new();
    let mut ctx = build_context(&config, &event_loop)?;

    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    log::info!("close requested, exiting");
                    control_flow.set_exit();
                }
                WindowEvent::Resized(size) => {
                    resize_window(&mut ctx, size);
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    resize_window(&mut ctx, *new_inner_size);
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    input.keys_pressed.push(key);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.pointer_pos = window_to_buffer(&ctx, position);
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    input.pointer_pressed = true;
                }
                WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                    input.pointer_pos = window_to_buffer(&ctx, touch.location);
                    input.pointer_pressed = true;
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let view_for_input = game.build_view(&state);
                let actions = hit_test_actions(&view_for_input, input.pointer());
                let control = game.update_state(&mut state, &input, dt, &actions);

                let view_for_render = game.build_view(&state);
                draw_to_surface(&mut ctx.renderer, |gfx| {
                    game.render(&state, &view_for_render, gfx);
                });
                if let Err(err) = ctx.renderer.present() {
                    log::error!("present failed: {err}");
                }

                input.end_frame();
                if control == FrameControl::Exit {
                    control_flow.set_exit();
                }
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    });
}

fn resize_window(ctx: &mut AppContext, size: PhysicalSize<u32>) {
    let size = SurfaceSize::new(size.width, size.height);
    if let Err(err) = ctx.renderer.resize_window(size) {
        log::error!("resize failed: {err}");
    }
}

fn window_to_buffer(ctx: &AppContext, position: PhysicalPosition<f64>) -> Option<(u32, u32)> {
    ctx.renderer
        .pixels()
        .window_pos_to_pixel((position.x as f32, position.y as f32))
        .ok()
        .map(|(x, y)| (x as u32, y as u32))
}
