use glam::{Vec2, Vec3};

// ---------------------------------------------------------------------------
// Full-screen quad geometry
// ---------------------------------------------------------------------------

/// Quad corners in NDC, counter-clockwise from bottom-left.
pub const QUAD_CORNERS: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(-1.0, 1.0),
];

/// The `v_uv` each entry of [`QUAD_CORNERS`] must produce.
pub const UV_CORNERS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

// Two triangles covering clip space
const TRIANGLE_LIST: [Vec2; 6] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 1.0),
];

const TRIANGLE_STRIP: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// How the quad is submitted to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    #[default]
    TriangleList,
    TriangleStrip,
}

impl Topology {
    pub fn vertices(self) -> &'static [Vec2] {
        match self {
            Topology::TriangleList => &TRIANGLE_LIST,
            Topology::TriangleStrip => &TRIANGLE_STRIP,
        }
    }

    pub fn vertex_count(self) -> u32 {
        self.vertices().len() as u32
    }

    pub fn toggled(self) -> Self {
        match self {
            Topology::TriangleList => Topology::TriangleStrip,
            Topology::TriangleStrip => Topology::TriangleList,
        }
    }
}

// ---------------------------------------------------------------------------
// Rasterizer reference (pure, testable)
// ---------------------------------------------------------------------------

/// Linearly interpolate three per-vertex UVs with barycentric `weights`.
///
/// With `w = 1` on every vertex, perspective-correct and affine interpolation
/// coincide, so this is exactly what each fragment receives.
pub fn interpolate_uv(a: Vec2, b: Vec2, c: Vec2, weights: Vec3) -> Vec2 {
    a * weights.x + b * weights.y + c * weights.z
}

/// Centre of pixel `(x, y)` in screen pixels, origin top-left.
pub fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// UV seen by the fragment at pixel `(x, y)` of a `width × height` target.
///
/// Framebuffer row 0 is the top edge (NDC y = +1), so `v` runs downward from 1.
pub fn pixel_center_uv(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32,
        1.0 - (y as f32 + 0.5) / height as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{position_to_uv, transform};

    #[test]
    fn corners_map_to_uv_corners_in_order() {
        for (p, expected) in QUAD_CORNERS.iter().zip(UV_CORNERS) {
            let uv = transform(*p).v_uv;
            assert_eq!(uv, expected, "{p:?} → {uv:?}");
        }
    }

    #[test]
    fn list_and_strip_cover_all_four_corners() {
        for topology in [Topology::TriangleList, Topology::TriangleStrip] {
            for corner in QUAD_CORNERS {
                assert!(
                    topology.vertices().contains(&corner),
                    "{topology:?} misses {corner:?}"
                );
            }
        }
    }

    #[test]
    fn vertex_counts() {
        assert_eq!(Topology::TriangleList.vertex_count(), 6);
        assert_eq!(Topology::TriangleStrip.vertex_count(), 4);
    }

    #[test]
    fn toggled_flips_between_the_two_topologies() {
        assert_eq!(Topology::default().toggled(), Topology::TriangleStrip);
        assert_eq!(Topology::TriangleStrip.toggled(), Topology::TriangleList);
    }

    #[test]
    fn interpolation_matches_transform_of_interpolated_position() {
        // Affine map commutes with linear interpolation
        let [a, b, c] = [TRIANGLE_LIST[0], TRIANGLE_LIST[1], TRIANGLE_LIST[2]];
        let weights = Vec3::new(0.2, 0.3, 0.5);
        let uv = interpolate_uv(position_to_uv(a), position_to_uv(b), position_to_uv(c), weights);
        let p = a * weights.x + b * weights.y + c * weights.z;
        assert!((uv - position_to_uv(p)).abs().max_element() < 1e-6, "got {uv:?}");
    }

    #[test]
    fn interpolation_at_vertex_returns_vertex_uv() {
        let uv = interpolate_uv(Vec2::ZERO, Vec2::X, Vec2::ONE, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(uv, Vec2::X);
    }

    #[test]
    fn pixel_center_is_half_pixel_in() {
        assert_eq!(pixel_center(0, 0), Vec2::splat(0.5));
        assert_eq!(pixel_center(3, 7), Vec2::new(3.5, 7.5));
    }

    #[test]
    fn pixel_center_uv_of_single_pixel_target_is_center() {
        assert_eq!(pixel_center_uv(0, 0, 1, 1), Vec2::splat(0.5));
    }

    #[test]
    fn pixel_center_uv_top_left_and_bottom_right() {
        // 4×2 target: top-left pixel centre is (0.5, 0.5) px → uv (0.125, 0.75)
        assert_eq!(pixel_center_uv(0, 0, 4, 2), Vec2::new(0.125, 0.75));
        assert_eq!(pixel_center_uv(3, 1, 4, 2), Vec2::new(0.875, 0.25));
    }
}
