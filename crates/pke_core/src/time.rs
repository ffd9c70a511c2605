//! Wall-clock frame timing with a hard per-step ceiling.
//!
//! The simulation runs one variable-length step per frame, sized from the
//! real elapsed time but never above [`MAX_STEP_SECONDS`]. When a frame
//! hitch (tab backgrounding, debugger pause) produces a larger delta, the
//! excess is simply not simulated: the world resumes from the capped
//! baseline instead of catching up in one giant step. `World::step`
//! re-applies the same cap, so the invariant holds even for drivers that
//! bypass this clock.

use std::time::Instant;

/// Hard ceiling on a single simulated step, in seconds.
pub const MAX_STEP_SECONDS: f32 = 0.1;

const FPS_SAMPLE_COUNT: usize = 60;

pub struct FrameClock {
    last_instant: Instant,
    /// Uncapped wall-clock delta of the most recent frame.
    pub real_dt: f64,
    pub frame_count: u64,
    /// Total *simulated* time: capped deltas, not wall-clock time.
    pub total_simulated: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
            real_dt: 0.0,
            frame_count: 0,
            total_simulated: 0.0,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
        }
    }

    /// Measure the elapsed wall-clock time and return the capped step
    /// duration for this frame.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(real_dt)
    }

    fn advance(&mut self, real_dt: f64) -> f32 {
        self.real_dt = real_dt;
        let dt = if real_dt > f64::from(MAX_STEP_SECONDS) {
            log::warn!(
                "frame took {:.1}ms, capping step to {:.0}ms",
                real_dt * 1000.0,
                f64::from(MAX_STEP_SECONDS) * 1000.0
            );
            f64::from(MAX_STEP_SECONDS)
        } else {
            real_dt
        };

        self.frame_count += 1;
        self.total_simulated += dt;

        self.fps_samples[self.fps_sample_index] = real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        dt as f32
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
