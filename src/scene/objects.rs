//! Scene objects: cube mesh, directional light, grid helper

use glam::{EulerRot, Mat4, Quat, Vec3};

use super::material::Material;
use crate::color::RGBA;

/// Box mesh centered at the origin
#[derive(Debug, Clone)]
pub struct Cube {
    /// Edge length
    pub size: f32,
    pub material: Material,
    /// Euler angles in radians (XYZ order), accumulated without wrapping
    pub rotation: Vec3,
}

impl Cube {
    pub fn new(size: f32, material: Material) -> Self {
        Self {
            size,
            material,
            rotation: Vec3::ZERO,
        }
    }

    /// Adds `step` to all three rotation axes
    pub fn rotate_all(&mut self, step: f32) {
        self.rotation += Vec3::splat(step);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ))
    }
}

/// Light shining from `position` toward the world origin
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub color: RGBA,
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    pub fn new(color: RGBA, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: Vec3::Y,
        }
    }

    /// Unit vector from the origin toward the light
    pub fn direction_to_light(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

/// Ground-plane grid on XZ
#[derive(Debug, Clone)]
pub struct Grid {
    pub size: f32,
    pub divisions: u32,
    pub center_color: RGBA,
    pub line_color: RGBA,
    pub visible: bool,
}

impl Grid {
    pub fn new(size: f32, divisions: u32, center_color: RGBA, line_color: RGBA) -> Self {
        Self {
            size,
            divisions,
            center_color,
            line_color,
            visible: true,
        }
    }

    /// Line segments making up the grid, two per division step.
    ///
    /// The two lines through the origin use `center_color`.
    pub fn line_segments(&self) -> Vec<(Vec3, Vec3, RGBA)> {
        let center = self.divisions / 2;
        let step = self.size / self.divisions as f32;
        let half = self.size / 2.0;

        let mut segments = Vec::with_capacity(2 * (self.divisions as usize + 1));
        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let color = if i == center { self.center_color } else { self.line_color };
            segments.push((Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), color));
            segments.push((Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), color));
        }
        segments
    }
}
