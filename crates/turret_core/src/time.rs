use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Variable-step frame clock. Every redraw measures the wall-clock delta since
/// the previous one; the scene advances by exactly that delta, once.
pub struct TimeState {
    /// Deltas above this (seconds) are clamped, e.g. after a window drag.
    pub max_frame_dt: f64,
    pub total_time: f64,
    pub frame_count: u64,
    pub real_dt: f64,
    last_instant: Option<Instant>,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        Self {
            max_frame_dt: 0.25,
            total_time: 0.0,
            frame_count: 0,
            real_dt: 0.0,
            last_instant: None,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    /// Measure the wall-clock delta for this frame. The very first frame has a
    /// zero delta so startup work never counts as animation time.
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let dt = match self.last_instant {
            Some(last) => now.duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_instant = Some(now);
        self.record_frame(dt);
    }

    /// Feed an explicit delta (seconds). Used by `begin_frame` and by tests.
    pub fn record_frame(&mut self, dt: f64) {
        self.real_dt = dt;
        if self.real_dt > self.max_frame_dt {
            log::warn!(
                "Frame took {:.1}ms, capping delta to {}ms",
                self.real_dt * 1000.0,
                self.max_frame_dt * 1000.0
            );
            self.real_dt = self.max_frame_dt;
        }

        self.total_time += self.real_dt;
        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }

    /// This frame's delta in integer microseconds, as consumed by animations.
    pub fn delta_us(&self) -> u64 {
        (self.real_dt * 1_000_000.0).round() as u64
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}
