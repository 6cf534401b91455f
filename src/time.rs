//! Frame timing.
//!
//! [`FrameClock`] turns wall-clock instants into per-frame delta times. The delta is clamped so a
//! stall (window drag, debugger pause) integrates at most one slow frame's worth of motion.

use std::time::{Duration, Instant};

/// Largest delta handed to any update function, in seconds.
pub const MAX_FRAME_DT: f32 = 0.033;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Clamped seconds since the previous tick.
    pub dt: f32,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame_time: Instant,
    frame_index: u64,
    max_dt: f32,
    frames_since_report: u32,
    last_fps_time: Instant,
    current_fps: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            last_frame_time: now,
            frame_index: 0,
            max_dt: MAX_FRAME_DT,
            frames_since_report: 0,
            last_fps_time: now,
            current_fps: 0,
        }
    }

    /// Restarts timing from now, e.g. after the window was suspended.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.last_frame_time = now;
        self.last_fps_time = now;
        self.frames_since_report = 0;
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last_frame_time)
            .as_secs_f32()
            .min(self.max_dt);
        self.last_frame_time = now;
        self.frame_index += 1;

        self.frames_since_report += 1;
        if now.saturating_duration_since(self.last_fps_time) >= Duration::from_secs(1) {
            self.current_fps = self.frames_since_report;
            self.frames_since_report = 0;
            self.last_fps_time = now;
            log::debug!("{} fps", self.current_fps());
        }

        FrameTime {
            dt,
            frame_index: self.frame_index,
        }
    }

    /// Frames counted during the last full second.
    pub fn current_fps(&self) -> u32 {
        self.current_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
