pub mod context;
pub mod error;
pub mod pipeline;
pub mod readback;
pub mod scene_pass;
pub mod shader;
pub mod vertex;

pub use context::{ContextConfig, GpuContext};
pub use error::GpuError;
pub use pipeline::{QuadPipeline, QuadPipelineDesc};
pub use scene_pass::{ScenePass, SceneUniforms};
