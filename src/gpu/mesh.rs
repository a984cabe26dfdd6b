//! Vertex formats, uniform layout and CPU-side geometry for the scene

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::scene::{Cube, Grid, Scene};

/// Cube vertex: position + face normal
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Grid vertex: position + line color
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Per-draw uniforms, laid out to match `Uniforms` in `scene.wgsl`
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    /// xyz: direction toward the light, w: intensity
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub camera_pos: [f32; 4],
    /// x: material kind
    pub material: [u32; 4],
}

impl SceneUniforms {
    pub fn new(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let material = scene.cube.material;
        let light = &scene.light;
        let dir = light.direction_to_light();

        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            model: scene.cube.model_matrix().to_cols_array_2d(),
            base_color: material.base_color().to_array(),
            light_dir: [dir.x, dir.y, dir.z, scene.effective_light_intensity()],
            light_color: light.color.to_array(),
            camera_pos: camera.position.extend(1.0).to_array(),
            material: [material.kind(), 0, 0, 0],
        }
    }
}

/// Builds a box of edge `cube.size`: 4 vertices per face, CCW from outside
pub fn cube_geometry(cube: &Cube) -> (Vec<MeshVertex>, Vec<u16>) {
    let h = cube.size / 2.0;
    // (normal, u, v) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        let center = normal * h;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = center + u * (su * h) + v * (sv * h);
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

/// Flattens grid segments into a line list
pub fn grid_geometry(grid: &Grid) -> Vec<LineVertex> {
    grid.line_segments()
        .into_iter()
        .flat_map(|(a, b, color)| {
            [
                LineVertex { position: a.to_array(), color: color.rgb() },
                LineVertex { position: b.to_array(), color: color.rgb() },
            ]
        })
        .collect()
}
