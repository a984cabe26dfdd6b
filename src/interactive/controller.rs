//! Viewer controller - owns the scene, both viewports and interaction state

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::frame_loop::FrameLoop;
use crate::camera::PerspectiveCamera;
use crate::color::RGBA;
use crate::controls::{OrbitControls, PointerButton};
use crate::render::SceneRenderer;
use crate::scene::{
    Cube, DirectionalLight, Grid, Material, MaterialSet, ObjectId, RenderOptions, Scene,
};

/// Label shown on the spin button while the cube spins
pub const STOP_SPINNING_LABEL: &str = "Stop Spinning";
/// Label shown on the spin button while the cube is stopped
pub const SPIN_LABEL: &str = "Spin";

/// Camera placement and projection for one viewport
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub position: Vec3,
    pub near: f32,
    pub far: f32,
}

/// Configuration for the viewer
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Main window title
    pub title: String,
    /// Initial main window size in logical pixels
    pub window_size: (u32, u32),
    /// Picture-in-picture surface size, fixed for its lifetime
    pub port_size: (u32, u32),
    pub main_camera: CameraConfig,
    pub port_camera: CameraConfig,
    /// Rotation added to each cube axis per frame while spinning
    pub spin_step: f32,
    /// Multiplier on `spin_step`. No control changes it.
    pub spin_speed: f32,
    pub damping_factor: f32,
    /// RNG seed for the initial material and light randomization
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Cube Viewer".to_string(),
            window_size: (1280, 720),
            port_size: (256, 128),
            main_camera: CameraConfig {
                fov: 60.0,
                position: Vec3::new(8.0, 8.0, 8.0),
                near: 0.01,
                far: 1000.0,
            },
            port_camera: CameraConfig {
                fov: 45.0,
                position: Vec3::new(-4.0, 0.0, -4.0),
                near: 0.01,
                far: 1000.0,
            },
            spin_step: 0.01,
            spin_speed: 1.0,
            damping_factor: 0.05,
            seed: None,
        }
    }
}

/// Identifies one of the viewer's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    Spin,
    Material,
    Light,
}

/// A clickable control with a text label
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub id: ButtonId,
    pub label: String,
}

impl Button {
    fn new(id: ButtonId, label: &str) -> Self {
        Self { id, label: label.to_string() }
    }
}

/// The three buttons the viewer reads clicks from and writes labels into
#[derive(Debug, Clone)]
pub struct Buttons {
    pub spin: Button,
    pub material: Button,
    pub light: Button,
}

impl Default for Buttons {
    fn default() -> Self {
        Self {
            spin: Button::new(ButtonId::Spin, SPIN_LABEL),
            material: Button::new(ButtonId::Material, "Cycle Material"),
            light: Button::new(ButtonId::Light, "Randomize Light"),
        }
    }
}

/// Input delivered to the viewer between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEvent {
    Resize { width: u32, height: u32 },
    Click(ButtonId),
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton },
    Wheel { delta_y: f32 },
}

/// Spin flag, speed multiplier and material selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    pub spin: bool,
    pub spin_speed: f32,
    pub material_index: usize,
}

/// A camera paired with the renderer that draws through it
pub struct Viewport<R> {
    pub camera: PerspectiveCamera,
    pub renderer: R,
    pub options: RenderOptions,
}

/// Owns the scene, the main and picture-in-picture viewports, the orbit
/// controls and the buttons. All mutation happens through click, resize and
/// pointer handlers; [`FrameLoop`] drives rendering.
pub struct ViewerController<R: SceneRenderer> {
    config: ViewerConfig,
    scene: Scene,
    materials: MaterialSet,
    main: Viewport<R>,
    port: Viewport<R>,
    controls: OrbitControls,
    buttons: Buttons,
    state: InteractionState,
    rng: StdRng,
    initialized: bool,
    grid_observed_visible: bool,
}

impl<R: SceneRenderer> ViewerController<R> {
    /// Build the scene and viewports. Nothing is positioned, added or
    /// attached until [`ViewerController::initialize`].
    pub fn new(config: ViewerConfig, main_renderer: R, port_renderer: R) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let materials = MaterialSet::default();
        let material_index = rng.gen_range(0..materials.len());
        let initial_material = materials
            .get(material_index)
            .unwrap_or(Material::Normal);

        let scene = Scene::new(
            Cube::new(2.0, initial_material),
            DirectionalLight::new(RGBA::white(), 3.0),
            Grid::new(16.0, 16, RGBA::from_hex(0x00ff00), RGBA::from_hex(0xcccccc)),
        );

        let (main_w, main_h) = config.window_size;
        let main_camera = make_camera(&config.main_camera, aspect(main_w, main_h));
        let (port_w, port_h) = config.port_size;
        let port_camera = make_camera(&config.port_camera, aspect(port_w, port_h));

        let state = InteractionState {
            spin: true,
            spin_speed: config.spin_speed,
            material_index,
        };

        Self {
            scene,
            materials,
            main: Viewport {
                camera: main_camera,
                renderer: main_renderer,
                options: RenderOptions::new(),
            },
            port: Viewport {
                camera: port_camera,
                renderer: port_renderer,
                options: RenderOptions::new().excluding(ObjectId::Grid),
            },
            controls: OrbitControls::new(),
            buttons: Buttons::default(),
            state,
            rng,
            initialized: false,
            grid_observed_visible: true,
            config,
        }
    }

    /// One-time setup. Returns the frame loop that drives rendering.
    ///
    /// # Arguments
    /// * `window_size` - Current main window size in physical pixels
    pub fn initialize(&mut self, window_size: (u32, u32)) -> Result<FrameLoop, String> {
        if self.initialized {
            return Err("viewer already initialized".to_string());
        }

        // Cameras
        self.main.camera.position = self.config.main_camera.position;
        self.main.camera.look_at(Vec3::ZERO);
        self.port.camera.position = self.config.port_camera.position;
        self.port.camera.look_at(Vec3::ZERO);

        // Scene
        self.scene.add(ObjectId::Cube);
        self.scene.add(ObjectId::Light);
        self.scene.add(ObjectId::Grid);

        // Controls
        self.controls.target = Vec3::ZERO;
        self.controls.enable_damping = true;
        self.controls.damping_factor = self.config.damping_factor;

        // Renderers
        let (width, height) = window_size;
        self.main.camera.aspect = aspect(width, height);
        self.main.camera.update_projection_matrix();
        self.main.renderer.set_size(width, height);
        self.controls.set_element_size(width as f32, height as f32);
        let (port_w, port_h) = self.config.port_size;
        self.port.renderer.set_size(port_w, port_h);
        self.main.renderer.attach();
        self.port.renderer.attach();

        self.update_spin_label();
        self.initialized = true;

        log::info!(
            "Viewer initialized: main {}x{}, port {}x{}, material {}",
            width,
            height,
            port_w,
            port_h,
            self.state.material_index
        );

        Ok(FrameLoop::new())
    }

    /// Dispatch an input event to its handler
    pub fn handle(&mut self, event: ViewerEvent) {
        if !self.initialized {
            log::debug!("Ignoring {:?} before initialization", event);
            return;
        }

        match event {
            ViewerEvent::Resize { width, height } => self.resize(width, height),
            ViewerEvent::Click(ButtonId::Spin) => self.toggle_spin(),
            ViewerEvent::Click(ButtonId::Material) => self.cycle_material(),
            ViewerEvent::Click(ButtonId::Light) => self.randomize_light(),
            ViewerEvent::PointerDown { button, x, y } => {
                self.controls.pointer_down(button, Vec2::new(x, y));
            }
            ViewerEvent::PointerMove { x, y } => self.controls.pointer_move(Vec2::new(x, y)),
            ViewerEvent::PointerUp { button } => self.controls.pointer_up(button),
            ViewerEvent::Wheel { delta_y } => self.controls.wheel(delta_y),
        }
    }

    /// Advance rotation, render both viewports, then step the orbit controls
    pub(crate) fn frame(&mut self) {
        if self.state.spin {
            self.scene
                .cube
                .rotate_all(self.config.spin_step * self.state.spin_speed);
        }

        self.grid_observed_visible = self.scene.is_visible_in(ObjectId::Grid, &self.main.options);
        if let Err(e) = self
            .main
            .renderer
            .render(&self.scene, &self.main.camera, &self.main.options)
        {
            log::error!("Render error (main): {}", e);
        }

        self.grid_observed_visible = self.scene.is_visible_in(ObjectId::Grid, &self.port.options);
        if let Err(e) = self
            .port
            .renderer
            .render(&self.scene, &self.port.camera, &self.port.options)
        {
            log::error!("Render error (port): {}", e);
        }

        self.controls.update(&mut self.main.camera);
    }

    /// Re-derive the main camera aspect and surface size from the window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {}x{}", width, height);
            return;
        }

        self.main.camera.aspect = aspect(width, height);
        self.main.camera.update_projection_matrix();
        self.main.renderer.set_size(width, height);
        self.controls.set_element_size(width as f32, height as f32);
        log::debug!("Resized main viewport to {}x{}", width, height);
    }

    pub fn toggle_spin(&mut self) {
        self.state.spin = !self.state.spin;
        self.update_spin_label();
        log::debug!("Spin: {}", self.state.spin);
    }

    pub fn cycle_material(&mut self) {
        self.state.material_index = self.materials.next_index(self.state.material_index);
        if let Some(material) = self.materials.get(self.state.material_index) {
            self.scene.cube.material = material;
        }
        log::debug!("Material: {}", self.state.material_index);
    }

    pub fn randomize_light(&mut self) {
        let light = &mut self.scene.light;
        light.intensity = self.rng.gen_range(0.0..10.0);
        light.position = Vec3::new(
            self.rng.gen_range(0.0..10.0),
            self.rng.gen_range(0.0..10.0),
            self.rng.gen_range(0.0..10.0),
        );
        log::debug!(
            "Light: intensity {:.2} at ({:.2}, {:.2}, {:.2})",
            light.intensity,
            light.position.x,
            light.position.y,
            light.position.z
        );
    }

    fn update_spin_label(&mut self) {
        let label = if self.state.spin { STOP_SPINNING_LABEL } else { SPIN_LABEL };
        self.buttons.spin.label = label.to_string();
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    pub fn main_viewport(&self) -> &Viewport<R> {
        &self.main
    }

    pub fn port_viewport(&self) -> &Viewport<R> {
        &self.port
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn materials(&self) -> &MaterialSet {
        &self.materials
    }

    /// Grid visibility as seen by the most recent render pass.
    ///
    /// `false` between frames, since the picture-in-picture pass runs last.
    pub fn grid_observed_visible(&self) -> bool {
        self.grid_observed_visible
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

fn make_camera(config: &CameraConfig, aspect: f32) -> PerspectiveCamera {
    PerspectiveCamera::new(config.fov, aspect, config.near, config.far)
}
