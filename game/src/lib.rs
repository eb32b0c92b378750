pub mod input;
pub mod playtest;
pub mod render_pipeline;
pub mod serde_duration;
pub mod settings;
pub mod state;
pub mod tetris_core;
pub mod touch_pad;
