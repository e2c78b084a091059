/// Full-screen quad vertex stage.
///
/// Takes the quad corner in NDC from vertex buffer slot 0 and emits an
/// untouched clip position plus `v_uv` in [0, 1]² for the fragment stage.
/// Depth is pinned to 0 and w to 1: only valid for screen-aligned 2D passes.
pub const QUAD_VERTEX_WGSL: &str = r#"
struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0)       v_uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.v_uv = position * 0.5 + 0.5;
    out.clip = vec4<f32>(position, 0.0, 1.0);
    return out;
}
"#;

/// The same stage for hosts that compile GLSL.
pub const QUAD_VERTEX_GLSL: &str = r#"#version 450

layout(location = 0) in vec2 position;
layout(location = 0) out vec2 v_uv;

void main() {
    v_uv = position * 0.5 + 0.5;
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

/// Writes the interpolated UV into red/green. Pairs with [`QUAD_VERTEX_WGSL`].
pub const UV_FRAGMENT_WGSL: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.v_uv, 0.0, 1.0);
}
"#;

/// Camera-space checkerboard with a time pulse, driven by one uniform buffer.
/// `SceneUniforms` must match `scene_pass::SceneUniforms` byte for byte.
pub const SCENE_FRAGMENT_WGSL: &str = r#"
struct SceneUniforms {
    view_inv:   mat4x4<f32>,
    resolution: vec2<f32>,
    time:       f32,
    cell_size:  f32,
};

@group(0) @binding(0) var<uniform> u: SceneUniforms;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // v_uv grows upward; screen pixels grow downward
    let screen = vec2<f32>(in.v_uv.x, 1.0 - in.v_uv.y) * u.resolution;
    let world = (u.view_inv * vec4<f32>(screen, 0.0, 1.0)).xy;
    let cell = floor(world / u.cell_size);
    let parity = abs(cell.x + cell.y) % 2.0;
    let pulse = 0.5 + 0.5 * sin(u.time);
    return vec4<f32>(parity, pulse, 0.0, 1.0);
}
"#;

pub const VERTEX_ENTRY: &str = "vs_main";

/// Append a fragment stage to the vertex stage so both see `VertexOutput`.
pub fn module_source(fragment_wgsl: &str) -> String {
    format!("{QUAD_VERTEX_WGSL}\n{fragment_wgsl}")
}
