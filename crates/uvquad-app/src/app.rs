use std::sync::Arc;

use uvquad_core::clock::{FpsMeter, FrameClock};
use uvquad_core::quad::{pixel_center, pixel_center_uv, Topology};
use uvquad_core::scene::Scene;
use uvquad_gpu::{
    ContextConfig, GpuContext, GpuError, QuadPipeline, QuadPipelineDesc, ScenePass, SceneUniforms,
};
use winit::window::Window;

use crate::input::InputAction;

/// Which fragment stage the quad is paired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Raw `v_uv` as red/green.
    Uv,
    /// Uniform-driven checkerboard seen through the camera.
    Scene,
}

impl View {
    fn toggled(self) -> Self {
        match self {
            View::Uv => View::Scene,
            View::Scene => View::Uv,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: &'static str,
    pub width: u32,
    pub height: u32,
    pub topology: Topology,
    pub view: View,
    pub present_mode: wgpu::PresentMode,
    /// Camera spin for the scene view, radians per second.
    pub spin: f32,
    pub gpu: ContextConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "UV Quad",
            width: 800,
            height: 600,
            topology: Topology::TriangleList,
            view: View::Scene,
            present_mode: wgpu::PresentMode::Fifo,
            spin: 0.2,
            gpu: ContextConfig::default(),
        }
    }
}

pub struct App {
    ctx: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,

    uv_quad: QuadPipeline,
    scene_pass: ScenePass,
    view: View,
    scene: Scene,

    clock: FrameClock,
    fps: FpsMeter,
}

impl App {
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let (ctx, surface) = pollster::block_on(GpuContext::with_surface(&config.gpu, window))?;
        let surface_config =
            ctx.configure_surface(&surface, size.width, size.height, config.present_mode)?;

        let format = surface_config.format;
        let mut scene = Scene::new(surface_config.width as f32, surface_config.height as f32);
        scene.spin = config.spin;

        Ok(Self {
            uv_quad: QuadPipeline::new(&ctx.device, &QuadPipelineDesc::uv(format, config.topology)),
            scene_pass: ScenePass::new(&ctx.device, format, config.topology),
            view: config.view,
            scene,
            ctx,
            surface,
            surface_config,
            clock: FrameClock::new(),
            fps: FpsMeter::default(),
        })
    }

    /// The quad covers clip space, so only the surface and the camera
    /// viewport depend on the resolution.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.surface.configure(&self.ctx.device, &self.surface_config);
        self.scene.resize(new_width as f32, new_height as f32);

        log::debug!("Surface resized to {}×{}", new_width, new_height);
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Returns `true` if the app should exit.
    pub fn handle_action(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleTopology => {
                let topology = self.uv_quad.topology.toggled();
                let format = self.surface_config.format;
                self.uv_quad =
                    QuadPipeline::new(&self.ctx.device, &QuadPipelineDesc::uv(format, topology));
                self.scene_pass = ScenePass::new(&self.ctx.device, format, topology);
                log::debug!("Topology → {:?}", topology);
            }

            InputAction::ToggleView => {
                self.view = self.view.toggled();
                log::debug!("View → {:?}", self.view);
            }

            InputAction::InspectPixel { x, y } => {
                let (w, h) = self.size();
                let uv = pixel_center_uv(x, y, w, h);
                let world = self.scene.screen_to_world(pixel_center(x, y));
                log::info!(
                    "({}, {}): v_uv = ({:.4}, {:.4}), world = ({:.2}, {:.2})",
                    x,
                    y,
                    uv.x,
                    uv.y,
                    world.x,
                    world.y
                );
            }

            InputAction::Quit => return true,
        }
        false
    }

    /// Advance the scene, upload its uniforms, and draw one frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let dt = self.clock.tick();
        self.scene.tick(dt);
        if let Some(fps) = self.fps.record(dt) {
            log::debug!(
                "FPS: {:.1}  view: {:?}  topology: {:?}",
                fps,
                self.view,
                self.uv_quad.topology
            );
        }

        let (width, height) = self.size();
        self.scene_pass.update(
            &self.ctx.queue,
            &SceneUniforms::from_scene(&self.scene, width, height),
        );

        let output = self.surface.get_current_texture()?;
        let surface_view = output.texture.create_view(&Default::default());
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fullscreen-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            match self.view {
                View::Uv => self.uv_quad.draw(&mut rpass),
                View::Scene => self.scene_pass.draw(&mut rpass),
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
