//! WebGPU rendering module
//!
//! Scenes are built as plain colored-triangle lists (`scene`, `hud`) and
//! presented by a single wgpu pipeline (`pipeline`).

pub mod hud;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use hud::{Countdown, HudSnapshot};
pub use pipeline::{RenderState, canvas_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
