use uvquad_core::quad::Topology;
use uvquad_core::scene::Scene;
use wgpu::{BindGroup, Buffer, Device, Queue};

use crate::pipeline::{QuadPipeline, QuadPipelineDesc};
use crate::shader::SCENE_FRAGMENT_WGSL;

/// Per-frame data for the scene fragment stage, uploaded as one uniform buffer.
/// Must match `SceneUniforms` in `SCENE_FRAGMENT_WGSL`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    /// Inverse camera matrix, column-major: screen pixels → world.
    pub view_inv: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub cell_size: f32,
}

impl SceneUniforms {
    pub fn from_scene(scene: &Scene, width: u32, height: u32) -> Self {
        Self {
            view_inv: scene.camera.as_matrix().inverse().to_cols_array_2d(),
            resolution: [width as f32, height as f32],
            time: scene.time,
            cell_size: scene.cell_size,
        }
    }
}

/// The quad paired with the scene fragment stage, plus its uniform buffer
/// and bind group (group 0, binding 0).
pub struct ScenePass {
    quad: QuadPipeline,
    uniform_buf: Buffer,
    bind_group: BindGroup,
}

impl ScenePass {
    pub fn new(device: &Device, target_format: wgpu::TextureFormat, topology: Topology) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<SceneUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let quad = QuadPipeline::new(
            device,
            &QuadPipelineDesc {
                label: "scene_quad",
                fragment_wgsl: SCENE_FRAGMENT_WGSL,
                fragment_entry: "fs_main",
                bind_group_layouts: &[&bind_group_layout],
                target_format,
                topology,
            },
        );

        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        Self {
            quad,
            uniform_buf,
            bind_group,
        }
    }

    pub fn topology(&self) -> Topology {
        self.quad.topology
    }

    /// Takes effect with the next queue submission.
    pub fn update(&self, queue: &Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_bind_group(0, &self.bind_group, &[]);
        self.quad.draw(pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_wgsl_layout_size() {
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 80);
    }

    #[test]
    fn from_scene_inverts_camera_and_copies_fields() {
        let mut scene = Scene::new(640.0, 480.0);
        scene.time = 1.25;
        scene.cell_size = 16.0;
        let u = SceneUniforms::from_scene(&scene, 640, 480);
        assert_eq!(u.resolution, [640.0, 480.0]);
        assert_eq!(u.time, 1.25);
        assert_eq!(u.cell_size, 16.0);
        // default camera: inverse is a translation by minus half the viewport
        assert_eq!(u.view_inv[3][0], -320.0);
        assert_eq!(u.view_inv[3][1], -240.0);
        assert_eq!(u.view_inv[0][0], 1.0);
    }
}
