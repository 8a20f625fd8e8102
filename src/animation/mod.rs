pub mod pulse;

pub use pulse::HeartPulse;

use std::time::{Duration, Instant};

/// Target frame rate
pub const TARGET_FPS: u32 = 30;

/// Frame duration for target FPS
pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / TARGET_FPS as u64);

/// Animation loop state
pub struct AnimationLoop {
    last_frame: Instant,
    frame_count: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_count: 0,
        }
    }

    /// Check if it's time for a new frame
    pub fn should_render(&self) -> bool {
        self.frame_count == 0 || self.last_frame.elapsed() >= FRAME_DURATION
    }

    /// Get delta time since last frame, capped so a stalled terminal doesn't skip animations
    pub fn delta_time(&self) -> f32 {
        self.last_frame.elapsed().as_secs_f32().min(0.25)
    }

    /// Mark frame as rendered
    pub fn frame_rendered(&mut self) {
        self.last_frame = Instant::now();
        self.frame_count += 1;
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time until next frame
    pub fn time_until_next_frame(&self) -> Duration {
        FRAME_DURATION.saturating_sub(self.last_frame.elapsed())
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}
