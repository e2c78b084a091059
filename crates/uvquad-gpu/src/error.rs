use thiserror::Error;

/// Host-side failures around the quad pass. The vertex stage itself cannot fail.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("readback buffer mapping was dropped before completing")]
    MapChannelClosed,

    #[error("render target must be non-empty, got {width}×{height}")]
    EmptyTarget { width: u32, height: u32 },

    #[error("render target {width}×{height} exceeds the device limit of {max}")]
    TargetTooLarge { width: u32, height: u32, max: u32 },

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
