use std::sync::mpsc;

use uvquad_core::quad::Topology;

use crate::context::GpuContext;
use crate::error::GpuError;
use crate::pipeline::{QuadPipeline, QuadPipelineDesc};
use crate::scene_pass::{ScenePass, SceneUniforms};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
const BYTES_PER_TEXEL: u32 = 4;

/// Normalised RGBA read back from an offscreen render, row 0 at the top.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 4]>,
}

impl Image {
    pub fn get(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.texels.get((y * self.width + x) as usize).copied()
    }
}

/// Rows copied out of a texture must be padded to 256 bytes.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_TEXEL;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}

fn check_target_size(width: u32, height: u32, max: u32) -> Result<(), GpuError> {
    if width == 0 || height == 0 {
        return Err(GpuError::EmptyTarget { width, height });
    }
    if width > max || height > max {
        return Err(GpuError::TargetTooLarge { width, height, max });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// OffscreenTarget — render texture + mappable copy buffer
// ---------------------------------------------------------------------------

struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    bytes_per_row: u32,
}

impl OffscreenTarget {
    fn new(ctx: &GpuContext, width: u32, height: u32) -> Result<Self, GpuError> {
        check_target_size(width, height, ctx.device.limits().max_texture_dimension_2d)?;

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen_target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&Default::default());

        let bytes_per_row = padded_bytes_per_row(width);
        let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("offscreen_readback"),
            size: (bytes_per_row * height) as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            texture,
            view,
            buffer,
            width,
            height,
            bytes_per_row,
        })
    }

    fn color_attachment(&self) -> wgpu::RenderPassColorAttachment<'_> {
        wgpu::RenderPassColorAttachment {
            view: &self.view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: wgpu::StoreOp::Store,
            },
        }
    }

    /// Copy the rendered texture out, submit `encoder`, and wait for the map.
    fn read_back(self, ctx: &GpuContext, mut encoder: wgpu::CommandEncoder) -> Result<Image, GpuError> {
        let extent = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(self.bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            extent,
        );
        ctx.queue.submit(std::iter::once(encoder.finish()));

        let slice = self.buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        ctx.device.poll(wgpu::Maintain::Wait);
        rx.recv().map_err(|_| GpuError::MapChannelClosed)??;

        let texels = {
            let data = slice.get_mapped_range();
            decode_rows(&data, self.width, self.height, self.bytes_per_row)
        };
        self.buffer.unmap();

        Ok(Image {
            width: self.width,
            height: self.height,
            texels,
        })
    }
}

fn new_encoder(ctx: &GpuContext, label: &str) -> wgpu::CommandEncoder {
    ctx.device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Draw the full-screen quad with the UV fragment stage into a
/// `width × height` target and read it back. Red = u, green = v.
pub fn render_uv_image(
    ctx: &GpuContext,
    width: u32,
    height: u32,
    topology: Topology,
) -> Result<Image, GpuError> {
    let target = OffscreenTarget::new(ctx, width, height)?;
    let quad = QuadPipeline::new(&ctx.device, &QuadPipelineDesc::uv(FORMAT, topology));

    let mut encoder = new_encoder(ctx, "uv-readback-encoder");
    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("uv-pass"),
            color_attachments: &[Some(target.color_attachment())],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        quad.draw(&mut rpass);
    }

    let image = target.read_back(ctx, encoder)?;
    log::debug!("Read back {}×{} UV image ({:?})", width, height, topology);
    Ok(image)
}

/// Draw the quad with the uniform-driven scene fragment stage and read it
/// back. Red = checker parity, green = pulse.
pub fn render_scene_image(
    ctx: &GpuContext,
    width: u32,
    height: u32,
    topology: Topology,
    uniforms: &SceneUniforms,
) -> Result<Image, GpuError> {
    let target = OffscreenTarget::new(ctx, width, height)?;
    let scene = ScenePass::new(&ctx.device, FORMAT, topology);
    scene.update(&ctx.queue, uniforms);

    let mut encoder = new_encoder(ctx, "scene-readback-encoder");
    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene-pass"),
            color_attachments: &[Some(target.color_attachment())],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        scene.draw(&mut rpass);
    }

    let image = target.read_back(ctx, encoder)?;
    log::debug!("Read back {}×{} scene image ({:?})", width, height, topology);
    Ok(image)
}

/// Strip row padding and normalise each byte to [0, 1].
fn decode_rows(data: &[u8], width: u32, height: u32, bytes_per_row: u32) -> Vec<[f32; 4]> {
    let row_len = (width * BYTES_PER_TEXEL) as usize;
    data.chunks_exact(bytes_per_row as usize)
        .take(height as usize)
        .flat_map(|row| row[..row_len].chunks_exact(BYTES_PER_TEXEL as usize))
        .map(|px| [px[0], px[1], px[2], px[3]].map(|b| b as f32 / 255.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn decode_skips_row_padding() {
        // 2×2 image, 256-byte rows
        let mut data = vec![0u8; 512];
        data[0..4].copy_from_slice(&[255, 0, 0, 255]);
        data[4..8].copy_from_slice(&[0, 255, 0, 255]);
        data[256..260].copy_from_slice(&[51, 102, 0, 255]);
        // garbage in the padding must be ignored
        data[8] = 7;
        let texels = decode_rows(&data, 2, 2, 256);
        assert_eq!(texels.len(), 4);
        assert_eq!(texels[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(texels[1], [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(texels[2], [0.2, 0.4, 0.0, 1.0]);
        assert_eq!(texels[3], [0.0; 4]);
    }

    #[test]
    fn get_is_row_major_and_bounds_checked() {
        let img = Image {
            width: 2,
            height: 1,
            texels: vec![[0.25, 0.5, 0.0, 1.0], [0.75, 0.5, 0.0, 1.0]],
        };
        assert_eq!(img.get(1, 0), Some([0.75, 0.5, 0.0, 1.0]));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, 1), None);
    }

    #[test]
    fn target_size_checks() {
        assert!(check_target_size(2048, 2048, 2048).is_ok());
        assert!(matches!(
            check_target_size(0, 4, 2048),
            Err(GpuError::EmptyTarget { width: 0, height: 4 })
        ));
        assert!(matches!(
            check_target_size(4096, 4, 2048),
            Err(GpuError::TargetTooLarge { width: 4096, height: 4, max: 2048 })
        ));
        assert!(matches!(
            check_target_size(4, 2049, 2048),
            Err(GpuError::TargetTooLarge { height: 2049, .. })
        ));
    }
}
