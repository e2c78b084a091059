use std::time::{Duration, Instant};

/// Per-loop delta-time source.
///
/// Delta time is clamped so a stall (debugger, minimised window) does not
/// jump animated uniforms forward by seconds at once.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Seconds since the previous tick, at most 0.25.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last).min(self.dt_max);
        self.last = now;
        dt.as_secs_f32()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Averages frame rate over windows of at least one second.
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    frames: u32,
    elapsed: f32,
}

impl FpsMeter {
    /// Record one frame that took `dt` seconds. Returns the average FPS once a
    /// full second has accumulated, then starts a new window.
    pub fn record(&mut self, dt: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}
