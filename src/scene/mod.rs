//! Scene graph: one cube, one directional light, one ground grid
//!
//! Objects live as fields of [`Scene`]; membership is tracked separately so
//! that nothing is drawn or lit until it has been added.

pub mod material;
pub mod objects;

pub use material::{Material, MaterialSet};
pub use objects::{Cube, DirectionalLight, Grid};

/// Identifies one of the objects a scene can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectId {
    Cube,
    Light,
    Grid,
}

/// Per-viewport render options.
///
/// Objects in the exclude set are skipped for that render call only; the
/// scene itself is left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    exclude: Vec<ObjectId>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns options that additionally exclude `id`
    pub fn excluding(mut self, id: ObjectId) -> Self {
        if !self.exclude.contains(&id) {
            self.exclude.push(id);
        }
        self
    }

    pub fn excludes(&self, id: ObjectId) -> bool {
        self.exclude.contains(&id)
    }
}

/// Container of the renderable objects
#[derive(Debug, Clone)]
pub struct Scene {
    pub cube: Cube,
    pub light: DirectionalLight,
    pub grid: Grid,
    members: Vec<ObjectId>,
}

impl Scene {
    /// Creates a scene with all objects constructed but none added yet
    pub fn new(cube: Cube, light: DirectionalLight, grid: Grid) -> Self {
        Self {
            cube,
            light,
            grid,
            members: Vec::with_capacity(3),
        }
    }

    /// Adds an object to the scene. Adding twice has no further effect.
    pub fn add(&mut self, id: ObjectId) {
        if !self.members.contains(&id) {
            self.members.push(id);
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.contains(&id)
    }

    /// Objects in insertion order
    pub fn members(&self) -> &[ObjectId] {
        &self.members
    }

    /// Whether `id` would be drawn by a render call using `options`
    pub fn is_visible_in(&self, id: ObjectId, options: &RenderOptions) -> bool {
        if !self.contains(id) || options.excludes(id) {
            return false;
        }
        match id {
            ObjectId::Grid => self.grid.visible,
            ObjectId::Cube | ObjectId::Light => true,
        }
    }

    /// Light intensity as seen by the renderer (zero until the light is added)
    pub fn effective_light_intensity(&self) -> f32 {
        if self.contains(ObjectId::Light) {
            self.light.intensity
        } else {
            0.0
        }
    }
}
