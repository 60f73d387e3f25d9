use std::time::Instant;

/// Source of elapsed time between frame ticks.
pub trait Clock {
    /// Seconds since the previous call.
    fn delta(&mut self) -> f32;
}

/// Longest step a wall clock reports, so a stalled frame does not snap the
/// camera to its goal.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Wall clock measuring real time between ticks, capped at
/// [`MAX_FRAME_DELTA`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    last_frame: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DELTA);
        self.last_frame = now;
        dt
    }
}

/// Clock that advances by a constant step per tick. Used for scripted runs
/// and tests where frames must be reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    pub step: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.step
    }
}
