use uvquad_core::quad::Topology;
use wgpu::{BindGroupLayout, Buffer, Device, RenderPipeline};

use crate::shader::{module_source, UV_FRAGMENT_WGSL, VERTEX_ENTRY};
use crate::vertex::{create_vertex_buffer, QuadVertex};

/// What to pair the quad vertex stage with.
///
/// `fragment_wgsl` must declare an entry point taking `VertexOutput`; it is
/// appended to the vertex stage source, so the struct is already in scope.
pub struct QuadPipelineDesc<'a> {
    pub label: &'a str,
    pub fragment_wgsl: &'a str,
    pub fragment_entry: &'a str,
    pub bind_group_layouts: &'a [&'a BindGroupLayout],
    pub target_format: wgpu::TextureFormat,
    pub topology: Topology,
}

impl QuadPipelineDesc<'static> {
    /// UV visualiser: red = u, green = v.
    pub fn uv(target_format: wgpu::TextureFormat, topology: Topology) -> Self {
        Self {
            label: "uv_quad",
            fragment_wgsl: UV_FRAGMENT_WGSL,
            fragment_entry: "fs_main",
            bind_group_layouts: &[],
            target_format,
            topology,
        }
    }
}

/// Render pipeline plus the quad vertex buffer it draws.
pub struct QuadPipeline {
    pub pipeline: RenderPipeline,
    vertex_buf: Buffer,
    vertex_count: u32,
    pub topology: Topology,
}

impl QuadPipeline {
    pub fn new(device: &Device, desc: &QuadPipelineDesc) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: desc.bind_group_layouts,
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(module_source(desc.fragment_wgsl).into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: VERTEX_ENTRY,
                buffers: &[QuadVertex::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: desc.fragment_entry,
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: primitive_topology(desc.topology),
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        log::debug!(
            "Built quad pipeline '{}' ({:?}, {:?})",
            desc.label,
            desc.topology,
            desc.target_format
        );

        Self {
            pipeline,
            vertex_buf: create_vertex_buffer(device, desc.topology),
            vertex_count: desc.topology.vertex_count(),
            topology: desc.topology,
        }
    }

    /// Record the quad draw. Any bind groups the fragment stage needs must
    /// already be set on `pass`.
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buf.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
    }
}
