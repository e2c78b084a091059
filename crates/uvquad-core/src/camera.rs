use glam::{Mat4, Vec2, Vec3};

/// A 2D camera that transforms the view of a scene.
///
/// The matrix is cached; after changing any field, call [`Camera::update`]
/// to recalculate it.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    pub zoom: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,

    matrix: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            zoom: 1.0,
            viewport_width,
            viewport_height,
            matrix: Mat4::from_translation(half_viewport(viewport_width, viewport_height)),
        }
    }

    /// Does not recalculate the matrix.
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Recalculate the matrix: move to `position`, rotate, zoom, then centre
    /// on the viewport.
    pub fn update(&mut self) {
        self.matrix = Mat4::from_translation(half_viewport(self.viewport_width, self.viewport_height))
            * Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0))
            * Mat4::from_rotation_z(self.rotation)
            * Mat4::from_translation(-self.position.extend(0.0));
    }

    pub fn as_matrix(&self) -> Mat4 {
        self.matrix
    }

    /// World co-ordinates → camera co-ordinates.
    pub fn project(&self, point: Vec2) -> Vec2 {
        self.matrix.inverse().transform_point3(point.extend(0.0)).truncate()
    }

    /// Camera co-ordinates → world co-ordinates.
    pub fn unproject(&self, point: Vec2) -> Vec2 {
        self.matrix.transform_point3(point.extend(0.0)).truncate()
    }
}

fn half_viewport(width: f32, height: f32) -> Vec3 {
    Vec3::new(width / 2.0, height / 2.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    #[test]
    fn new_matrix_matches_default_update() {
        let mut cam = Camera::new(800.0, 600.0);
        let initial = cam.as_matrix();
        cam.update();
        assert!(initial.abs_diff_eq(cam.as_matrix(), 1e-6));
    }

    #[test]
    fn default_camera_offsets_by_half_viewport() {
        let cam = Camera::new(800.0, 600.0);
        assert!(close(cam.unproject(Vec2::ZERO), Vec2::new(400.0, 300.0)));
        assert!(close(cam.project(Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn project_inverts_unproject() {
        let mut cam = Camera::new(640.0, 480.0);
        cam.position = Vec2::new(12.0, -7.5);
        cam.rotation = 0.6;
        cam.zoom = 2.5;
        cam.update();
        for p in [Vec2::ZERO, Vec2::new(100.0, 50.0), Vec2::new(-33.0, 210.0)] {
            let back = cam.project(cam.unproject(p));
            assert!(close(back, p), "{p:?} came back as {back:?}");
        }
    }

    #[test]
    fn zoom_scales_about_camera_position() {
        let mut cam = Camera::new(200.0, 100.0);
        cam.position = Vec2::new(10.0, 10.0);
        cam.zoom = 2.0;
        cam.update();
        // camera position lands on viewport centre, offsets are doubled
        assert!(close(cam.unproject(Vec2::new(10.0, 10.0)), Vec2::new(100.0, 50.0)));
        assert!(close(cam.unproject(Vec2::new(11.0, 10.0)), Vec2::new(102.0, 50.0)));
    }

    #[test]
    fn rotation_quarter_turn() {
        let mut cam = Camera::new(0.0, 0.0);
        cam.rotation = FRAC_PI_2;
        cam.update();
        assert!(close(cam.unproject(Vec2::X), Vec2::Y));
    }

    #[test]
    fn viewport_change_needs_update() {
        let mut cam = Camera::new(100.0, 100.0);
        cam.set_viewport_size(300.0, 200.0);
        assert!(close(cam.unproject(Vec2::ZERO), Vec2::new(50.0, 50.0)));
        cam.update();
        assert!(close(cam.unproject(Vec2::ZERO), Vec2::new(150.0, 100.0)));
    }
}
