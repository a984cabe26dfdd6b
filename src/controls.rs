//! Orbit camera controls
//!
//! Keeps the camera on a sphere around `target` (y-up). Pointer drags and
//! wheel steps only accumulate deltas; [`OrbitControls::update`] applies them
//! once per frame, optionally damped so motion eases out over several frames.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Pointer button as seen by the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Rotate,
    Dolly,
    Pan,
}

/// Orbit controller bound to one camera/viewport
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    // Pending input
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    pending_pan: Vec2,

    // Pointer tracking
    element_size: Vec2,
    drag: DragState,
    last_pointer: Vec2,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            pending_pan: Vec2::ZERO,
            element_size: Vec2::ONE,
            drag: DragState::Idle,
            last_pointer: Vec2::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size in pixels of the surface the pointer events come from
    pub fn set_element_size(&mut self, width: f32, height: f32) {
        self.element_size = Vec2::new(width.max(1.0), height.max(1.0));
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    pub fn pointer_down(&mut self, button: PointerButton, position: Vec2) {
        self.drag = match button {
            PointerButton::Primary => DragState::Rotate,
            PointerButton::Secondary => DragState::Pan,
            PointerButton::Middle => DragState::Dolly,
        };
        self.last_pointer = position;
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        let delta = position - self.last_pointer;
        self.last_pointer = position;

        match self.drag {
            DragState::Rotate => {
                let height = self.element_size.y;
                let rotate = delta * self.rotate_speed;
                self.rotate_left(2.0 * PI * rotate.x / height);
                self.rotate_up(2.0 * PI * rotate.y / height);
            }
            DragState::Dolly => {
                // Dragging down moves away from the target
                if delta.y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                } else if delta.y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                }
            }
            DragState::Pan => {
                self.pending_pan += delta * self.pan_speed;
            }
            DragState::Idle => {}
        }
    }

    pub fn pointer_up(&mut self, _button: PointerButton) {
        self.drag = DragState::Idle;
    }

    /// Wheel step; negative `delta_y` (scrolling up) moves the camera closer
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if delta_y > 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    /// Applies accumulated input to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let start_position = camera.position;
        let start_target = self.target;

        if self.pending_pan != Vec2::ZERO {
            self.apply_pending_pan(camera);
        }

        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            0.0
        };

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        theta += self.delta_theta * factor;
        phi += self.delta_phi * factor;

        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(start_position) > EPS
            || self.target.distance_squared(start_target) > EPS
    }

    /// Converts pixel drag distance into a world-space target offset
    fn apply_pending_pan(&mut self, camera: &PerspectiveCamera) {
        let distance = (camera.position - self.target).length();
        let target_distance = distance * (camera.fov.to_radians() / 2.0).tan();
        let height = self.element_size.y;
        let (right, up) = camera.screen_axes();

        let left = 2.0 * self.pending_pan.x * target_distance / height;
        let upward = 2.0 * self.pending_pan.y * target_distance / height;
        self.pan_offset += -right * left + up * upward;
        self.pending_pan = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(60.0, 4.0 / 3.0, 0.01, 1000.0);
        camera.position = position;
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn azimuth(position: Vec3) -> f32 {
        position.x.atan2(position.z)
    }

    #[test]
    fn test_update_without_input_keeps_camera() {
        let mut camera = camera_at(Vec3::new(8.0, 8.0, 8.0));
        let mut controls = OrbitControls::new();
        controls.enable_damping = true;

        assert!(!controls.update(&mut camera));
        assert!(camera.position.distance(Vec3::new(8.0, 8.0, 8.0)) < 1e-4);
        assert_eq!(camera.target(), Vec3::ZERO);
    }

    #[test]
    fn test_undamped_rotation_applies_at_once() {
        let mut camera = camera_at(Vec3::new(8.0, 8.0, 8.0));
        let radius = camera.position.length();
        let mut controls = OrbitControls::new();

        controls.rotate_left(0.5);
        assert!(controls.update(&mut camera));

        let expected = PI / 4.0 - 0.5;
        assert!((azimuth(camera.position) - expected).abs() < 1e-4);
        assert!((camera.position.length() - radius).abs() < 1e-3);

        // Nothing left to apply
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_damped_rotation_converges() {
        let mut camera = camera_at(Vec3::new(8.0, 8.0, 8.0));
        let mut controls = OrbitControls::new();
        controls.enable_damping = true;

        controls.rotate_left(0.5);
        let first_moved = controls.update(&mut camera);
        assert!(first_moved);

        // Only a fraction is applied on the first frame
        let after_first = azimuth(camera.position);
        assert!((after_first - (PI / 4.0 - 0.5 * 0.05)).abs() < 1e-4);

        let mut moved = true;
        for _ in 0..600 {
            moved = controls.update(&mut camera);
        }
        assert!(!moved, "damping should settle");
        assert!((azimuth(camera.position) - (PI / 4.0 - 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_polar_angle_never_crosses_pole() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new();

        controls.rotate_up(10.0);
        controls.update(&mut camera);

        assert!(camera.position.is_finite());
        assert!((camera.position.y - 10.0).abs() < 1e-3);
        assert!(camera.position.z >= 0.0);

        controls.rotate_up(-20.0);
        controls.update(&mut camera);
        assert!((camera.position.y + 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_wheel_dolly_and_distance_limits() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 8.0));
        let mut controls = OrbitControls::new();
        controls.max_distance = 10.0;

        controls.wheel(-1.0);
        controls.update(&mut camera);
        assert!((camera.position.length() - 8.0 * 0.95).abs() < 1e-4);

        for _ in 0..50 {
            controls.wheel(1.0);
            controls.update(&mut camera);
        }
        assert!((camera.position.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_drag_rotates_by_element_height() {
        let mut camera = camera_at(Vec3::new(8.0, 8.0, 8.0));
        let mut controls = OrbitControls::new();
        controls.set_element_size(800.0, 600.0);

        controls.pointer_down(PointerButton::Primary, Vec2::new(100.0, 100.0));
        controls.pointer_move(Vec2::new(400.0, 100.0));
        controls.pointer_up(PointerButton::Primary);
        controls.update(&mut camera);

        // 300px over a 600px-high element is half a turn
        let expected = PI / 4.0 - PI;
        assert!((azimuth(camera.position) - expected).abs() < 1e-4);

        // Moves after release are ignored
        controls.pointer_move(Vec2::new(0.0, 0.0));
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_middle_drag_dollies() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 8.0));
        let mut controls = OrbitControls::new();
        controls.set_element_size(600.0, 600.0);

        controls.pointer_down(PointerButton::Middle, Vec2::new(50.0, 50.0));
        controls.pointer_move(Vec2::new(50.0, 20.0));
        assert!(controls.update(&mut camera));
        assert!((camera.position.length() - 8.0 * 0.95).abs() < 1e-4);

        controls.pointer_move(Vec2::new(50.0, 40.0));
        controls.update(&mut camera);
        assert!((camera.position.length() - 8.0).abs() < 1e-4);

        // Horizontal motion neither zooms nor rotates
        controls.pointer_move(Vec2::new(90.0, 40.0));
        assert!(!controls.update(&mut camera));
        controls.pointer_up(PointerButton::Middle);
    }

    #[test]
    fn test_secondary_drag_pans_target() {
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 10.0));
        let mut controls = OrbitControls::new();
        controls.set_element_size(600.0, 600.0);

        controls.pointer_down(PointerButton::Secondary, Vec2::ZERO);
        controls.pointer_move(Vec2::new(60.0, 0.0));
        assert!(controls.update(&mut camera));

        // Dragging right moves the target toward -X, camera follows
        assert!(controls.target.x < 0.0);
        assert!(controls.target.y.abs() < 1e-5);
        assert!(((camera.position - controls.target).length() - 10.0).abs() < 1e-3);
        assert_eq!(camera.target(), controls.target);
    }
}
