//! wgpu side of the compositor.
//!
//! `FxTargets` owns the double-buffered off-screen textures, `FxPipelines`
//! the shader catalog and lazily-built render pipelines, `PatternTextures`
//! the static effect inputs, and `WgpuFxBackend` turns the scheduler's pass
//! records into render passes.
//!
//! Convention: all off-screen targets are Rgba8Unorm at the viewport's
//! physical size; the presentation target uses the surface format.

mod backend;
mod pipelines;
mod targets;
mod textures;

pub use backend::{EmptyScene, ScenePainter, WgpuFxBackend};
pub use pipelines::FxPipelines;
pub use targets::FxTargets;
pub use textures::{load_texture, PatternTexture, PatternTextures};
