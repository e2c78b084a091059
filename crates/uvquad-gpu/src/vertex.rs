use uvquad_core::quad::Topology;
use wgpu::util::DeviceExt;

/// One quad corner as uploaded to the vertex buffer.
/// Must match the `position` input of `vs_main`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };
}

pub fn quad_vertices(topology: Topology) -> Vec<QuadVertex> {
    topology
        .vertices()
        .iter()
        .map(|p| QuadVertex { position: p.to_array() })
        .collect()
}

pub fn create_vertex_buffer(device: &wgpu::Device, topology: Topology) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("quad_vertices"),
        contents: bytemuck::cast_slice(&quad_vertices(topology)),
        usage: wgpu::BufferUsages::VERTEX,
    })
}
