use glam::Vec2;

use crate::camera::Camera;

// ---------------------------------------------------------------------------
// Scene — what the uniform-driven fragment stage draws
// ---------------------------------------------------------------------------

/// A world-space checkerboard viewed through a [`Camera`], with a
/// time-driven pulse. The GPU fragment stage and [`Scene::shade`] compute the
/// same thing; the latter is the host-side reference.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    /// Checker cell edge length in world units.
    pub cell_size: f32,
    pub time: f32,
    /// Camera spin in radians per second.
    pub spin: f32,
}

impl Scene {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            camera: Camera::new(viewport_width, viewport_height),
            cell_size: 32.0,
            time: 0.0,
            spin: 0.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.set_viewport_size(width, height);
        self.camera.update();
    }

    /// Advance time and the camera spin by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
        if self.spin != 0.0 {
            self.camera.rotation += self.spin * dt;
            self.camera.update();
        }
    }

    /// Screen pixel (origin top-left) → world position under the camera.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.camera.project(screen)
    }

    /// Red/green written by the fragment at `screen`: checker parity, pulse.
    pub fn shade(&self, screen: Vec2) -> [f32; 2] {
        [
            checker_parity(self.screen_to_world(screen), self.cell_size),
            pulse(self.time),
        ]
    }
}

/// 0.0 or 1.0 depending on which checker cell `world` falls in.
pub fn checker_parity(world: Vec2, cell_size: f32) -> f32 {
    let cell = (world / cell_size).floor();
    (cell.x + cell.y).abs() % 2.0
}

pub fn pulse(time: f32) -> f32 {
    0.5 + 0.5 * time.sin()
}
