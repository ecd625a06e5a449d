//! Emitters (source regions) and their spawn-credit runtime state

use crate::config::ThermalConfig;
use nimbus_core::{RandomSource, Viewport};

/// A horizontal source span at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Emitter {
    pub x0: f32,
    pub x1: f32,
    /// Emission height in pixels above the bottom edge
    pub y: f32,
    /// Puffs per second
    pub rate: f32,
}

impl Emitter {
    /// Build an emitter; a reversed span is normalized so `x0 <= x1`
    pub fn new(x0: f32, x1: f32, y: f32, rate: f32) -> Self {
        Self {
            x0: x0.min(x1),
            x1: x0.max(x1),
            y,
            rate,
        }
    }

    /// Transient mid-altitude source used to seed merging, anvil-like
    /// structures. Spans the central 40% of the width at a randomized
    /// height just below the middle of the sky. Never stored.
    pub fn mid_level(viewport: Viewport, rng: &mut impl RandomSource) -> Self {
        Self::new(
            viewport.width * 0.30,
            viewport.width * 0.70,
            viewport.height * 0.45 + rng.next_f32() * 50.0,
            1.0,
        )
    }
}

/// Runtime state for one persistent ground thermal
#[derive(Debug, Clone)]
pub struct EmitterState {
    pub emitter: Emitter,
    /// Span fractions the emitter is re-anchored from on resize
    pub thermal: ThermalConfig,
    /// Fractional spawn credit carried between ticks
    pub credit: f32,
}

impl EmitterState {
    pub fn new(thermal: ThermalConfig, viewport: Viewport, ground_height: f32) -> Self {
        let emitter = Emitter::new(
            viewport.width * thermal.start,
            viewport.width * thermal.end,
            ground_height,
            thermal.rate,
        );
        Self {
            emitter,
            thermal,
            credit: 0.0,
        }
    }

    /// Reposition the span proportionally to a new viewport width.
    /// The rate and pending credit are kept.
    pub fn anchor(&mut self, viewport: Viewport, ground_height: f32) {
        self.emitter.x0 = viewport.width * self.thermal.start;
        self.emitter.x1 = viewport.width * self.thermal.end;
        self.emitter.y = ground_height;
    }

    /// Add `dt * rate` to the credit and return how many whole puffs it pays for
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        self.credit += dt * self.emitter.rate;
        let spawn_count = self.credit as u32;
        self.credit -= spawn_count as f32;
        spawn_count
    }

    /// Shift the rate by `delta`, never going below `floor`
    pub fn adjust_rate(&mut self, delta: f32, floor: f32) {
        self.emitter.rate = (self.emitter.rate + delta).max(floor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::SkyRng;

    fn left_thermal() -> ThermalConfig {
        ThermalConfig {
            start: 0.18,
            end: 0.38,
            rate: 4.0,
        }
    }

    #[test]
    fn reversed_span_is_normalized() {
        let e = Emitter::new(300.0, 100.0, 110.0, 1.0);
        assert!(e.x0 <= e.x1);
        assert_eq!((e.x0, e.x1), (100.0, 300.0));
    }

    #[test]
    fn rate_four_for_one_second_spawns_four() {
        let mut state = EmitterState::new(left_thermal(), Viewport::new(960, 600), 110.0);
        let total: u32 = (0..10).map(|_| state.accumulate(0.1)).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn spawn_count_is_deterministic() {
        let run = || {
            let mut state = EmitterState::new(left_thermal(), Viewport::new(960, 600), 110.0);
            (0..200).map(|i| state.accumulate(0.004 * (i % 7) as f32)).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn credit_stays_fractional() {
        let mut state = EmitterState::new(left_thermal(), Viewport::new(960, 600), 110.0);
        for _ in 0..50 {
            state.accumulate(0.033);
            assert!(state.credit >= 0.0 && state.credit < 1.0);
        }
    }

    #[test]
    fn large_dt_pays_out_several() {
        let mut state = EmitterState::new(left_thermal(), Viewport::new(960, 600), 110.0);
        assert_eq!(state.accumulate(1.0), 4);
    }

    #[test]
    fn resize_rescales_span() {
        let mut state = EmitterState::new(left_thermal(), Viewport::new(960, 600), 110.0);
        assert!((state.emitter.x0 - 172.8).abs() < 1e-3);
        assert!((state.emitter.x1 - 364.8).abs() < 1e-3);

        state.anchor(Viewport::new(480, 300), 110.0);
        assert!((state.emitter.x0 - 86.4).abs() < 1e-3);
        assert!((state.emitter.x1 - 182.4).abs() < 1e-3);
        assert_eq!(state.emitter.y, 110.0);
    }

    #[test]
    fn rate_never_drops_below_floor() {
        let mut state = EmitterState::new(left_thermal(), Viewport::new(960, 600), 110.0);
        for _ in 0..20 {
            state.adjust_rate(-0.8, 0.6);
        }
        assert!((state.emitter.rate - 0.6).abs() < 1e-6);
        state.adjust_rate(0.8, 0.6);
        assert!((state.emitter.rate - 1.4).abs() < 1e-5);
    }

    #[test]
    fn mid_level_emitter_is_central() {
        let viewport = Viewport::new(1000, 600);
        let mut rng = SkyRng::new(5);
        for _ in 0..100 {
            let e = Emitter::mid_level(viewport, &mut rng);
            assert!((e.x0 - 300.0).abs() < 1e-3);
            assert!((e.x1 - 700.0).abs() < 1e-3);
            assert!(e.y >= 270.0 && e.y <= 320.0);
        }
    }
}
