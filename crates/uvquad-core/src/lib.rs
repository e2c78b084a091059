pub mod camera;
pub mod clock;
pub mod quad;
pub mod scene;

use glam::{Vec2, Vec4};

// ---------------------------------------------------------------------------
// Vertex stage — CPU reference of the full-screen quad transform
// ---------------------------------------------------------------------------

/// Both outputs of one vertex invocation.
///
/// `clip` goes to the rasterizer, `v_uv` is interpolated across the primitive
/// and handed to the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexOutput {
    pub clip: Vec4,
    pub v_uv: Vec2,
}

/// Remap an NDC position in [-1, 1]² to a texture coordinate in [0, 1]².
///
/// No range validation: inputs outside [-1, 1] map to UVs outside [0, 1].
#[inline]
pub fn position_to_uv(position: Vec2) -> Vec2 {
    position * 0.5 + Vec2::splat(0.5)
}

/// Inverse of [`position_to_uv`].
#[inline]
pub fn uv_to_position(uv: Vec2) -> Vec2 {
    uv * 2.0 - Vec2::ONE
}

/// Homogeneous clip position for a screen-aligned vertex: depth 0, w 1.
#[inline]
pub fn clip_position(position: Vec2) -> Vec4 {
    Vec4::new(position.x, position.y, 0.0, 1.0)
}

/// Run the vertex stage for a single `position` attribute.
pub fn transform(position: Vec2) -> VertexOutput {
    VertexOutput {
        clip: clip_position(position),
        v_uv: position_to_uv(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn boundary_positions_map_to_uv_extremes() {
        assert_eq!(position_to_uv(Vec2::new(-1.0, -1.0)), Vec2::ZERO);
        assert_eq!(position_to_uv(Vec2::new(1.0, 1.0)), Vec2::ONE);
        assert_eq!(position_to_uv(Vec2::ZERO), Vec2::splat(0.5));
    }

    #[test]
    fn uv_stays_in_unit_square_for_ndc_inputs() {
        let steps = 64;
        for i in 0..=steps {
            for j in 0..=steps {
                let p = Vec2::new(
                    -1.0 + 2.0 * i as f32 / steps as f32,
                    -1.0 + 2.0 * j as f32 / steps as f32,
                );
                let uv = position_to_uv(p);
                assert!(
                    uv.cmpge(Vec2::ZERO).all() && uv.cmple(Vec2::ONE).all(),
                    "{p:?} → {uv:?} left the unit square"
                );
            }
        }
    }

    #[test]
    fn uv_round_trips_back_to_position() {
        for p in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(0.25, -0.75),
            Vec2::new(0.3, 0.7),
            Vec2::new(-0.123_456, 0.987_654),
            Vec2::new(1.0, 1.0),
        ] {
            let back = uv_to_position(position_to_uv(p));
            assert!(close(back, p), "{p:?} came back as {back:?}");
        }
    }

    #[test]
    fn clip_position_is_passthrough_with_fixed_depth_and_w() {
        for p in [Vec2::new(0.3, -0.9), Vec2::new(-1.0, 1.0), Vec2::new(7.5, -3.25)] {
            let clip = transform(p).clip;
            assert_eq!(clip.x.to_bits(), p.x.to_bits());
            assert_eq!(clip.y.to_bits(), p.y.to_bits());
            assert_eq!(clip.z, 0.0);
            assert_eq!(clip.w, 1.0);
        }
    }

    #[test]
    fn out_of_range_input_is_not_clamped() {
        // (3, -2) → (2, -0.5): consistent, just outside the unit square
        let out = transform(Vec2::new(3.0, -2.0));
        assert!(close(out.v_uv, Vec2::new(2.0, -0.5)), "got {:?}", out.v_uv);
        assert_eq!(out.clip, Vec4::new(3.0, -2.0, 0.0, 1.0));
    }

    #[test]
    fn transform_is_bit_identical_across_calls() {
        let p = Vec2::new(0.123_457, -0.654_321);
        let a = transform(p);
        let b = transform(p);
        assert_eq!(a.v_uv.to_array().map(f32::to_bits), b.v_uv.to_array().map(f32::to_bits));
        assert_eq!(a.clip.to_array().map(f32::to_bits), b.clip.to_array().map(f32::to_bits));
    }
}
