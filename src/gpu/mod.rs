//! GPU rendering module using wgpu
//!
//! One device is shared by the main and picture-in-picture windows; each
//! window gets its own surface, depth buffer and pipelines.

pub mod context;
pub mod mesh;
pub mod pipelines;
pub mod renderer;

pub use context::GpuContext;
pub use renderer::GpuSceneRenderer;
