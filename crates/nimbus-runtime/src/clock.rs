//! Wall-clock frame timer

use std::time::Instant;

/// Measures the time between frames
pub struct FrameClock {
    /// Total measured time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Frames ticked so far
    pub frame_count: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame.
    ///
    /// The first tick measures nothing and yields 0. Later deltas are raw;
    /// the simulation applies its own clamp.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.frame_count += 1;

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return 0.0;
        }

        self.advance(now.duration_since(self.last_instant).as_secs_f64());
        self.last_instant = now;
        self.delta_time as f32
    }

    fn advance(&mut self, elapsed: f64) {
        self.delta_time = elapsed;
        self.total_time += elapsed;
    }

    /// Forget the last instant so the next tick yields 0 again, e.g. after a pause
    pub fn reset(&mut self) {
        self.first_tick = true;
    }
}
