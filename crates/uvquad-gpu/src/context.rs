use wgpu::{Adapter, Device, Instance, Queue, Surface};

use crate::error::GpuError;

/// Adapter and device preferences for a [`GpuContext`].
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub power_preference: wgpu::PowerPreference,
    /// Ask for a software adapter (e.g. for CI without a GPU).
    pub force_fallback_adapter: bool,
    pub label: &'static str,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            label: "uvquad-gpu device",
        }
    }
}

pub struct GpuContext {
    pub instance: Instance,
    pub adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    /// Create a headless GPU context (no surface). Used for offscreen
    /// render-and-readback.
    pub async fn new_headless(config: &ContextConfig) -> Result<Self, GpuError> {
        Self::request(Instance::default(), config, None).await
    }

    /// Create a context whose adapter can present to `target` (usually an
    /// `Arc<winit::window::Window>`), together with the surface itself.
    pub async fn with_surface(
        config: &ContextConfig,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
    ) -> Result<(Self, Surface<'static>), GpuError> {
        let instance = Instance::default();
        let surface = instance.create_surface(target)?;
        let ctx = Self::request(instance, config, Some(&surface)).await?;
        Ok((ctx, surface))
    }

    async fn request(
        instance: Instance,
        config: &ContextConfig,
        compatible_surface: Option<&Surface<'_>>,
    ) -> Result<Self, GpuError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference,
                compatible_surface,
                force_fallback_adapter: config.force_fallback_adapter,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        log::info!("GPU adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some(config.label),
                    required_features: wgpu::Features::empty(),
                    // Downlevel-safe, but keep whatever texture size the adapter allows.
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

    /// Configure `surface` for presenting at `width × height`, preferring an
    /// sRGB format.
    pub fn configure_surface(
        &self,
        surface: &Surface<'_>,
        width: u32,
        height: u32,
        present_mode: wgpu::PresentMode,
    ) -> Result<wgpu::SurfaceConfiguration, GpuError> {
        let caps = surface.get_capabilities(&self.adapter);
        let format = pick_format(&caps.formats).ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&self.device, &config);

        log::info!(
            "Surface configured: {}×{} {:?} {:?}",
            config.width,
            config.height,
            format,
            present_mode
        );
        Ok(config)
    }
}

fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn srgb_format_preferred() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn first_format_when_no_srgb() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_format(&formats), Some(TextureFormat::Rgba16Float));
    }

    #[test]
    fn no_formats() {
        assert_eq!(pick_format(&[]), None);
    }

    #[test]
    fn default_config_does_not_force_fallback() {
        assert!(!ContextConfig::default().force_fallback_adapter);
    }
}
