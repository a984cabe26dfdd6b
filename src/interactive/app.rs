//! Windowed viewer using wgpu + winit
//!
//! The main window hosts the orbitable view; a second fixed-size window hosts
//! the picture-in-picture view. Keys stand in for the three buttons.

use std::rc::Rc;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use super::controller::{ButtonId, ViewerConfig, ViewerController, ViewerEvent};
use super::frame_loop::FrameLoop;
use crate::controls::PointerButton;
use crate::gpu::{GpuContext, GpuSceneRenderer};

/// Wheel line steps are converted to pixels at this rate
const PIXELS_PER_LINE: f32 = 100.0;

/// Key that clicks each button
pub fn button_for_key(key: KeyCode) -> Option<ButtonId> {
    match key {
        KeyCode::KeyS => Some(ButtonId::Spin),
        KeyCode::KeyM => Some(ButtonId::Material),
        KeyCode::KeyL => Some(ButtonId::Light),
        _ => None,
    }
}

fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Window state created once the event loop is running
struct ViewerState {
    viewer: ViewerController<GpuSceneRenderer>,
    frame_loop: FrameLoop,
    main_id: WindowId,
    port_id: WindowId,
    cursor: (f32, f32),
}

impl ViewerState {
    fn new(event_loop: &ActiveEventLoop, config: &ViewerConfig) -> Result<Self, String> {
        let (width, height) = config.window_size;
        let main_attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_visible(false);
        let main_window = Arc::new(
            event_loop
                .create_window(main_attrs)
                .map_err(|e| format!("Failed to create main window: {}", e))?,
        );

        let (port_w, port_h) = config.port_size;
        let port_attrs = Window::default_attributes()
            .with_title("Port")
            .with_inner_size(PhysicalSize::new(port_w, port_h))
            .with_resizable(false)
            .with_visible(false);
        let port_window = Arc::new(
            event_loop
                .create_window(port_attrs)
                .map_err(|e| format!("Failed to create port window: {}", e))?,
        );

        let (ctx, main_target) = GpuContext::new(main_window.clone())?;
        let port_target = ctx.create_target(port_window.clone())?;
        let ctx = Rc::new(ctx);

        let main = GpuSceneRenderer::new("main", ctx.clone(), main_target);
        let port = GpuSceneRenderer::new("port", ctx, port_target);

        let window_size = main_window.inner_size();
        let mut viewer = ViewerController::new(config.clone(), main, port);
        let frame_loop = viewer.initialize((window_size.width, window_size.height))?;

        Ok(Self {
            viewer,
            frame_loop,
            main_id: main_window.id(),
            port_id: port_window.id(),
            cursor: (0.0, 0.0),
        })
    }

    /// Stop the frame loop and leave the event loop
    fn shutdown(&self, event_loop: &ActiveEventLoop) {
        self.frame_loop.token().cancel();
        log::info!("Exiting after {} frames", self.frame_loop.frames());
        event_loop.exit();
    }

    /// Show the button labels in the main window title
    fn refresh_title(&self, title: &str) {
        let buttons = self.viewer.buttons();
        let text = format!(
            "{} | [S] {} | [M] {} | [L] {}",
            title, buttons.spin.label, buttons.material.label, buttons.light.label
        );
        self.viewer.main_viewport().renderer.set_title(&text);
    }
}

/// Application handler for winit event loop
struct ViewerApp {
    config: ViewerConfig,
    state: Option<ViewerState>,
}

impl ViewerApp {
    fn new(config: ViewerConfig) -> Self {
        Self { config, state: None }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match ViewerState::new(event_loop, &self.config) {
            Ok(state) => {
                println!("=== Cube Viewer ===");
                println!("Controls:");
                println!("  S           - Spin / Stop Spinning");
                println!("  M           - Cycle material");
                println!("  L           - Randomize light");
                println!("  Left drag   - Orbit");
                println!("  Right drag  - Pan");
                println!("  Middle drag - Zoom");
                println!("  Wheel       - Zoom");
                println!("  ESC         - Exit");
                println!();

                state.refresh_title(&self.config.title);
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to create viewer state: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.shutdown(event_loop);
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state: ElementState::Pressed,
                    repeat: false,
                    ..
                },
                ..
            } => {
                if key == KeyCode::Escape {
                    state.shutdown(event_loop);
                } else if let Some(button) = button_for_key(key) {
                    state.viewer.handle(ViewerEvent::Click(button));
                    if button == ButtonId::Spin {
                        state.refresh_title(&self.config.title);
                    }
                }
            }

            // Everything below only concerns the main window
            _ if id != state.main_id => {
                if id != state.port_id {
                    log::trace!("Event for unknown window {:?}", id);
                }
            }

            WindowEvent::Resized(size) => {
                state.viewer.handle(ViewerEvent::Resize {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.cursor = (position.x as f32, position.y as f32);
                state.viewer.handle(ViewerEvent::PointerMove {
                    x: state.cursor.0,
                    y: state.cursor.1,
                });
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } => {
                if let Some(button) = pointer_button(button) {
                    let event = match btn_state {
                        ElementState::Pressed => ViewerEvent::PointerDown {
                            button,
                            x: state.cursor.0,
                            y: state.cursor.1,
                        },
                        ElementState::Released => ViewerEvent::PointerUp { button },
                    };
                    state.viewer.handle(event);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Positive delta_y scrolls down, away from the cube
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
                    MouseScrollDelta::PixelDelta(p) => -(p.y as f32),
                };
                state.viewer.handle(ViewerEvent::Wheel { delta_y });
            }

            WindowEvent::RedrawRequested => {
                if !state.frame_loop.tick(&mut state.viewer) {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            // Request continuous redraw, one frame per display refresh
            state.viewer.main_viewport().renderer.request_redraw();
        }
    }
}

/// Run the viewer until a window is closed or ESC is pressed
pub fn run_viewer(config: ViewerConfig) -> Result<(), String> {
    env_logger::init();

    let event_loop = EventLoop::new().map_err(|e| format!("Failed to create event loop: {}", e))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config);
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("Event loop error: {}", e))?;

    Ok(())
}
