//! Rendering seam between the viewer and whatever draws the scene
//!
//! The viewer only talks to output surfaces through [`SceneRenderer`], so it
//! can be driven by the wgpu backend or by a recording fake in tests.

use crate::camera::PerspectiveCamera;
use crate::scene::{RenderOptions, Scene};

/// A render target bound to one output surface.
pub trait SceneRenderer {
    /// Makes the output surface visible in its container.
    fn attach(&mut self);

    /// Resizes the output surface in pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draws `scene` as seen through `camera`.
    ///
    /// # Arguments
    /// * `scene` - Scene to draw; only objects added to it are drawn
    /// * `camera` - Camera providing view and projection
    /// * `options` - Per-call exclusions
    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        options: &RenderOptions,
    ) -> Result<(), String>;
}
