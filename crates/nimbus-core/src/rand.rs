//! Injectable uniform random source plus a lightweight xorshift32 PRNG

use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can hand out uniform floats in [0, 1).
///
/// The simulation takes its randomness through this trait so tests can
/// drive it with a scripted sequence.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max)
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a float in [-1, 1)
    fn signed(&mut self) -> f32 {
        self.next_f32() * 2.0 - 1.0
    }
}

pub struct SkyRng {
    state: u32,
}

impl SkyRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self::new((nanos ^ (nanos >> 32)) as u32)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for SkyRng {
    fn next_f32(&mut self) -> f32 {
        // 24 high bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }
}

/// Replays a fixed list of values in a loop.
///
/// Handy for driving the simulation deterministically in tests.
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    /// Values are clamped into [0, 1); an empty list always yields 0
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 0.999_999_9))
            .collect();
        Self { values, cursor: 0 }
    }
}

impl RandomSource for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
