//! Cube materials and the fixed set the viewer cycles through

use crate::color::RGBA;

/// Surface shading model for the cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lit by the directional light (diffuse + specular)
    Phong { color: RGBA },
    /// Colored by the view-space surface normal, unlit
    Normal,
    /// Flat color, unlit
    Basic { color: RGBA },
}

impl Material {
    /// Shader-side identifier, must match the material `switch` in `scene.wgsl`
    pub fn kind(&self) -> u32 {
        match self {
            Material::Phong { .. } => 0,
            Material::Normal => 1,
            Material::Basic { .. } => 2,
        }
    }

    pub fn base_color(&self) -> RGBA {
        match self {
            Material::Phong { color } | Material::Basic { color } => *color,
            Material::Normal => RGBA::white(),
        }
    }
}

/// Ordered, fixed sequence of materials
#[derive(Debug, Clone)]
pub struct MaterialSet {
    materials: Vec<Material>,
}

impl MaterialSet {
    pub fn new(materials: Vec<Material>) -> Self {
        assert!(!materials.is_empty(), "material set must not be empty");
        Self { materials }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn get(&self, index: usize) -> Option<Material> {
        self.materials.get(index).copied()
    }

    /// Index following `index`, wrapping to zero past the last material
    pub fn next_index(&self, index: usize) -> usize {
        let next = index + 1;
        if next > self.materials.len() - 1 { 0 } else { next }
    }
}

impl Default for MaterialSet {
    fn default() -> Self {
        Self::new(vec![
            Material::Phong { color: RGBA::from_hex(0x00cc00) },
            Material::Normal,
            Material::Basic { color: RGBA::from_hex(0xff00ff) },
        ])
    }
}
