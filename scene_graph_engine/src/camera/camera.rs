/// Camera - perspective camera with eagerly derived matrices.
///
/// Every setter recomputes the affected matrix immediately, so the
/// projection can never lag behind its parameters. The camera is an
/// independent transform (position + look-at), not a graph node.

use glam::{Mat4, Vec3};

/// Initial camera parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Initial aspect ratio, replaced by the first viewport resize
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

/// Perspective camera.
#[derive(Debug, Clone)]
pub struct Camera {
    fov_y_degrees: f32,
    aspect: f32,
    near: f32,
    far: f32,
    position: Vec3,
    target: Vec3,
    up: Vec3,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            fov_y_degrees: config.fov_y_degrees,
            aspect: config.aspect,
            near: config.near,
            far: config.far,
            position: config.position,
            target: config.target,
            up: config.up,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    // ===== GETTERS =====

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// View matrix (world to camera space)
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Perspective projection matrix (right-handed)
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    // ===== SETTERS (each recomputes its matrix) =====

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn set_fov_y_degrees(&mut self, fov_y_degrees: f32) {
        self.fov_y_degrees = fov_y_degrees;
        self.update_projection_matrix();
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update_projection_matrix();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Aim the camera at a world-space point
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.update_view_matrix();
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_at_rh(self.position, self.target, self.up);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
