//! wgpu implementation of [`SceneRenderer`] for one window

use std::rc::Rc;

use wgpu::util::DeviceExt;

use super::context::{GpuContext, SurfaceTarget};
use super::mesh::{SceneUniforms, cube_geometry, grid_geometry};
use super::pipelines::{ScenePipeline, create_depth_texture};
use crate::camera::PerspectiveCamera;
use crate::render::SceneRenderer;
use crate::scene::{ObjectId, RenderOptions, Scene};

struct SceneGeometry {
    cube_vertices: wgpu::Buffer,
    cube_indices: wgpu::Buffer,
    cube_index_count: u32,
    grid_vertices: wgpu::Buffer,
    grid_vertex_count: u32,
}

impl SceneGeometry {
    fn upload(device: &wgpu::Device, scene: &Scene) -> Self {
        let (vertices, indices) = cube_geometry(&scene.cube);
        let cube_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cube_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let lines = grid_geometry(&scene.grid);
        let grid_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&lines),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            cube_vertices,
            cube_indices,
            cube_index_count: indices.len() as u32,
            grid_vertices,
            grid_vertex_count: lines.len() as u32,
        }
    }
}

/// Draws the scene into a window surface
pub struct GpuSceneRenderer {
    label: &'static str,
    ctx: Rc<GpuContext>,
    target: SurfaceTarget,
    pipeline: ScenePipeline,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    // Uploaded on first render; cube and grid shapes never change
    geometry: Option<SceneGeometry>,

    // Recreated on resize
    _depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
}

impl GpuSceneRenderer {
    /// Create a renderer presenting to `target`
    pub fn new(label: &'static str, ctx: Rc<GpuContext>, target: SurfaceTarget) -> Self {
        let device = &ctx.device;
        let pipeline = ScenePipeline::new(device, target.format());

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: std::mem::size_of::<SceneUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &pipeline.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (depth_texture, depth_view) =
            create_depth_texture(device, target.size.0, target.size.1);

        Self {
            label,
            uniform_buffer,
            bind_group,
            geometry: None,
            _depth_texture: depth_texture,
            depth_view,
            pipeline,
            target,
            ctx,
        }
    }

    /// Request a redraw of the window
    pub fn request_redraw(&self) {
        self.target.window().request_redraw();
    }

    pub fn set_title(&self, title: &str) {
        self.target.window().set_title(title);
    }
}

impl SceneRenderer for GpuSceneRenderer {
    fn attach(&mut self) {
        self.target.window().set_visible(true);
        let (width, height) = self.target.size;
        log::debug!("{} surface attached ({}x{})", self.label, width, height);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.target.size != (width, height) {
            self.target.resize(&self.ctx.device, (width, height));
            let (texture, view) = create_depth_texture(&self.ctx.device, width, height);
            self._depth_texture = texture;
            self.depth_view = view;
        }
    }

    fn size(&self) -> (u32, u32) {
        self.target.size
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
        options: &RenderOptions,
    ) -> Result<(), String> {
        let output = match self.target.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("{} surface lost, reconfiguring", self.label);
                self.target.reconfigure(&self.ctx.device);
                return Ok(());
            }
            Err(e) => return Err(format!("{} surface error: {:?}", self.label, e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.ctx.device;
        let geometry = self
            .geometry
            .get_or_insert_with(|| SceneGeometry::upload(device, scene));

        let uniforms = SceneUniforms::new(scene, camera);
        self.ctx
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Scene Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            if scene.is_visible_in(ObjectId::Cube, options) {
                render_pass.set_pipeline(&self.pipeline.mesh_pipeline);
                render_pass.set_vertex_buffer(0, geometry.cube_vertices.slice(..));
                render_pass.set_index_buffer(
                    geometry.cube_indices.slice(..),
                    wgpu::IndexFormat::Uint16,
                );
                render_pass.draw_indexed(0..geometry.cube_index_count, 0, 0..1);
            }

            if scene.is_visible_in(ObjectId::Grid, options) {
                render_pass.set_pipeline(&self.pipeline.line_pipeline);
                render_pass.set_vertex_buffer(0, geometry.grid_vertices.slice(..));
                render_pass.draw(0..geometry.grid_vertex_count, 0..1);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
