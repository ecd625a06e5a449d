//! The sky simulation context: thermals, live puffs, breeze and draw order

use crate::config::SkyConfig;
use crate::draw::{palette, DrawCommand, SoftBlob, PUFF_RINGS};
use crate::emitter::{Emitter, EmitterState};
use crate::event::SkyEvent;
use crate::puff::{Puff, PuffPool};
use nimbus_core::{RandomSource, SkyRng, Vec2, Viewport};

/// Mid-level seeding chance is expressed per frame at this rate
const REFERENCE_FPS: f32 = 60.0;
/// Sky gradient split, as a fraction of the height
const SKY_SPLIT: f32 = 0.45;
const HILL_NEAR_HEIGHT: f32 = 18.0;
const HILL_FAR_HEIGHT: f32 = 12.0;

/// Loop state. There is no way back from `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    Stopped,
}

/// Running totals, for logging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkyStats {
    pub live: usize,
    pub spawned: u64,
    pub culled: u64,
    /// Spawns refused because the pool was at capacity
    pub dropped: u64,
    pub mid_level_spawns: u64,
    pub breeze: f32,
    pub rates: Vec<f32>,
}

/// Everything the simulation owns, passed explicitly instead of living in globals
pub struct SkySim<R: RandomSource = SkyRng> {
    config: SkyConfig,
    viewport: Viewport,
    emitters: Vec<EmitterState>,
    puffs: PuffPool,
    breeze: f32,
    rng: R,
    state: SimState,
    elapsed: f32,
    spawned: u64,
    culled: u64,
    dropped: u64,
    mid_level_spawns: u64,
}

impl SkySim<SkyRng> {
    /// Build from config, seeding from `config.seed` or the wall clock
    pub fn new(config: SkyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SkyRng::new(seed),
            None => SkyRng::from_time(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> SkySim<R> {
    pub fn with_rng(config: SkyConfig, rng: R) -> Self {
        let viewport = Viewport::new(config.width, config.height);
        let emitters = config
            .thermals
            .iter()
            .cloned()
            .map(|t| EmitterState::new(t, viewport, config.ground_height))
            .collect();
        let puffs = PuffPool::new(config.max_puffs);
        let breeze = config.breeze;

        Self {
            config,
            viewport,
            emitters,
            puffs,
            breeze,
            rng,
            state: SimState::Running,
            elapsed: 0.0,
            spawned: 0,
            culled: 0,
            dropped: 0,
            mid_level_spawns: 0,
        }
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn breeze(&self) -> f32 {
        self.breeze
    }

    pub fn emitters(&self) -> &[EmitterState] {
        &self.emitters
    }

    pub fn puffs(&self) -> &[Puff] {
        self.puffs.alive_slice()
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    /// Simulated seconds so far (after dt clamping)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn stats(&self) -> SkyStats {
        SkyStats {
            live: self.puffs.alive_count(),
            spawned: self.spawned,
            culled: self.culled,
            dropped: self.dropped,
            mid_level_spawns: self.mid_level_spawns,
            breeze: self.breeze,
            rates: self.emitters.iter().map(|e| e.emitter.rate).collect(),
        }
    }

    /// Apply one shell event
    pub fn handle_event(&mut self, event: SkyEvent) {
        match event {
            SkyEvent::Quit => {
                if self.state == SimState::Running {
                    log::info!("[sky] Stopping after {:.1}s", self.elapsed);
                }
                self.state = SimState::Stopped;
            }
            SkyEvent::Resize { width, height } => self.resize(width, height),
            SkyEvent::AdjustBreeze(delta) => {
                self.breeze += delta;
                log::info!("[sky] Breeze {:.1} px/s", self.breeze);
            }
            SkyEvent::AdjustRate(delta) => {
                let floor = self.config.min_rate;
                for state in &mut self.emitters {
                    state.adjust_rate(delta, floor);
                }
                log::info!("[sky] Emission rates {:?}", self.stats().rates);
            }
        }
    }

    pub fn apply_events(&mut self, events: impl IntoIterator<Item = SkyEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }

    /// Re-anchor the thermals to a new viewport. Live puffs are left where they are.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        for state in &mut self.emitters {
            state.anchor(self.viewport, self.config.ground_height);
        }
        log::debug!("[sky] Resized to {width}x{height}");
    }

    /// Advance the simulation by one frame (spawn, update, cull).
    ///
    /// `dt` is clamped to `[0, max_dt]` so a hitch or a resume from pause
    /// cannot blow up the integration. Does nothing once stopped.
    pub fn step(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }
        let dt = dt.clamp(0.0, self.config.max_dt);
        self.elapsed += dt;

        for i in 0..self.emitters.len() {
            let count = self.emitters[i].accumulate(dt);
            let emitter = self.emitters[i].emitter;
            for n in 0..count {
                if self.puffs.is_full() {
                    self.drop_spawns(u64::from(count - n));
                    break;
                }
                self.spawn_from(&emitter);
            }
        }

        // Occasionally seed mid-level moisture to hint at merging and anvils
        if self.rng.next_f32() < self.config.mid_level_chance * dt * REFERENCE_FPS {
            let mid = Emitter::mid_level(self.viewport, &mut self.rng);
            if self.spawn_from(&mid) {
                self.mid_level_spawns += 1;
            }
        }

        let culled = self.puffs.update(dt, self.breeze, self.viewport);
        self.culled += culled as u64;
    }

    fn spawn_from(&mut self, emitter: &Emitter) -> bool {
        let puff = Puff::spawn(emitter, &mut self.rng);
        if self.puffs.insert(puff) {
            self.spawned += 1;
            true
        } else {
            self.drop_spawns(1);
            false
        }
    }

    /// Count spawns refused at the cap without building the puffs
    fn drop_spawns(&mut self, count: u64) {
        if self.dropped == 0 && count > 0 {
            log::warn!(
                "[sky] Puff cap of {} reached, dropping spawns",
                self.puffs.capacity()
            );
        }
        self.dropped += count;
    }

    /// Back-to-front draw list for the current state
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let Viewport { width, height } = self.viewport;
        let split = height * SKY_SPLIT;
        let ground = self.config.ground_height;

        let mut commands = Vec::with_capacity(self.puffs.alive_count() + 6);

        // Sky: deepest blue overhead, paling toward the horizon. Both rects
        // share SKY_MID at the split; swapping top/bottom brings back a seam.
        commands.push(DrawCommand::GradientRect {
            origin: Vec2::new(0.0, split),
            size: Vec2::new(width, height - split),
            bottom: palette::SKY_MID,
            top: palette::SKY_TOP,
        });
        commands.push(DrawCommand::GradientRect {
            origin: Vec2::ZERO,
            size: Vec2::new(width, split),
            bottom: palette::SKY_NEAR,
            top: palette::SKY_MID,
        });

        commands.push(DrawCommand::Rect {
            origin: Vec2::ZERO,
            size: Vec2::new(width, ground),
            color: palette::GROUND,
        });
        commands.push(DrawCommand::Rect {
            origin: Vec2::new(0.0, ground),
            size: Vec2::new(width, HILL_NEAR_HEIGHT),
            color: palette::HILL_NEAR,
        });
        commands.push(DrawCommand::Rect {
            origin: Vec2::new(0.0, ground + HILL_NEAR_HEIGHT),
            size: Vec2::new(width, HILL_FAR_HEIGHT),
            color: palette::HILL_FAR,
        });

        for p in self.puffs.alive_slice() {
            commands.push(DrawCommand::SoftBlob(SoftBlob {
                center: p.position,
                radius: p.radius,
                color: p.tint(),
                peak_alpha: p.peak_alpha(),
                rings: PUFF_RINGS,
            }));
        }

        commands.push(DrawCommand::SoftBlob(SoftBlob {
            center: Vec2::new(width * 0.82, height * 0.80),
            radius: 60.0,
            color: palette::SUN_HAZE,
            peak_alpha: 0.06,
            rings: 10,
        }));

        commands
    }

    /// Per-frame entry point: advance by `dt` and return the frame's draw list
    pub fn tick(&mut self, dt: f32) -> Vec<DrawCommand> {
        self.step(dt);
        self.draw_commands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThermalConfig;
    use nimbus_core::SequenceRng;

    /// 0.99 fails the mid-level chance check at any normal frame time
    fn quiet_rng() -> SequenceRng {
        SequenceRng::new(vec![0.99])
    }

    fn single_thermal(rate: f32) -> SkyConfig {
        SkyConfig {
            thermals: vec![ThermalConfig {
                start: 0.18,
                end: 0.38,
                rate,
            }],
            mid_level_chance: 0.0,
            ..SkyConfig::default()
        }
    }

    fn blob_count(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::SoftBlob(_)))
            .count()
    }

    #[test]
    fn rate_four_spawns_four_in_one_second() {
        // max_dt above the step so the clamp doesn't interfere
        let config = SkyConfig {
            max_dt: 0.25,
            ..single_thermal(4.0)
        };
        let mut sim = SkySim::with_rng(config, quiet_rng());
        for _ in 0..10 {
            sim.step(0.1);
        }
        assert_eq!(sim.stats().spawned, 4);
        assert_eq!(sim.puffs().len(), 4);
    }

    #[test]
    fn dt_is_clamped() {
        let mut sim = SkySim::with_rng(single_thermal(4.0), quiet_rng());
        sim.step(5.0);
        assert!((sim.elapsed() - 0.033).abs() < 1e-6);
        // 0.033 * 4 < 1, so a hitch spawns nothing
        assert_eq!(sim.stats().spawned, 0);

        sim.step(-1.0);
        assert!((sim.elapsed() - 0.033).abs() < 1e-6);
    }

    #[test]
    fn mid_level_spawn_when_chance_hits() {
        let config = SkyConfig {
            thermals: Vec::new(),
            ..SkyConfig::default()
        };
        // First draw 0.0 passes the check, the rest feed the spawn
        let mut sim = SkySim::with_rng(config, SequenceRng::new(vec![0.0, 0.5]));
        sim.step(0.016);
        let stats = sim.stats();
        assert_eq!(stats.mid_level_spawns, 1);
        assert_eq!(stats.live, 1);
        let p = &sim.puffs()[0];
        assert!(p.position.x >= 960.0 * 0.30 - 1.0 && p.position.x <= 960.0 * 0.70 + 1.0);
        assert!(p.position.y >= 600.0 * 0.45);
    }

    fn mid_level_only(max_dt: f32) -> SkyConfig {
        SkyConfig {
            thermals: Vec::new(),
            max_dt,
            ..SkyConfig::default()
        }
    }

    #[test]
    fn mid_level_chance_scales_with_dt() {
        // At 60 fps the threshold is the raw chance, 0.02
        let mut sim = SkySim::with_rng(mid_level_only(0.05), SequenceRng::new(vec![0.019]));
        sim.step(1.0 / 60.0);
        assert_eq!(sim.stats().mid_level_spawns, 1);

        let mut sim = SkySim::with_rng(mid_level_only(0.05), SequenceRng::new(vec![0.021]));
        sim.step(1.0 / 60.0);
        assert_eq!(sim.stats().mid_level_spawns, 0);
        assert!(sim.puffs().is_empty());

        // At 30 fps a frame is twice as likely to seed, 0.04
        let mut sim = SkySim::with_rng(mid_level_only(0.05), SequenceRng::new(vec![0.03]));
        sim.step(1.0 / 30.0);
        assert_eq!(sim.stats().mid_level_spawns, 1);

        let mut sim = SkySim::with_rng(mid_level_only(0.05), SequenceRng::new(vec![0.03]));
        sim.step(1.0 / 60.0);
        assert_eq!(sim.stats().mid_level_spawns, 0);
    }

    #[test]
    fn full_pool_drops_in_bulk() {
        // 1e10 * 0.033 is hundreds of millions of spawns; only the cap's worth may be built
        let config = SkyConfig {
            max_puffs: 50,
            ..single_thermal(1e10)
        };
        let mut sim = SkySim::with_rng(config, quiet_rng());
        sim.step(0.033);
        let stats = sim.stats();
        assert_eq!(stats.live, 50);
        assert_eq!(stats.spawned, 50);
        assert!(stats.dropped > 300_000_000);

        sim.step(0.033);
        let again = sim.stats();
        assert_eq!(again.spawned, 50);
        assert!(again.dropped > stats.dropped);
    }

    #[test]
    fn resize_reanchors_thermals() {
        let mut sim = SkySim::with_rng(SkyConfig::default(), quiet_rng());
        sim.handle_event(SkyEvent::Resize {
            width: 480,
            height: 300,
        });
        let left = &sim.emitters()[0].emitter;
        assert!((left.x0 - 86.4).abs() < 1e-3);
        assert!((left.x1 - 182.4).abs() < 1e-3);
        let right = &sim.emitters()[1].emitter;
        assert!((right.x0 - 264.0).abs() < 1e-3);
        assert!((right.x1 - 393.6).abs() < 1e-3);
        assert_eq!(sim.viewport(), Viewport::new(480, 300));
    }

    #[test]
    fn breeze_and_rate_adjustments() {
        let mut sim = SkySim::with_rng(SkyConfig::default(), quiet_rng());
        sim.handle_event(SkyEvent::AdjustBreeze(-4.0));
        assert!((sim.breeze() - 8.0).abs() < 1e-6);

        for _ in 0..10 {
            sim.handle_event(SkyEvent::AdjustRate(-0.8));
        }
        for rate in sim.stats().rates {
            assert!((rate - 0.6).abs() < 1e-6);
        }
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut sim = SkySim::with_rng(single_thermal(10.0), quiet_rng());
        sim.step(0.03);
        assert!(sim.is_running());
        sim.apply_events([SkyEvent::Quit]);
        assert_eq!(sim.state(), SimState::Stopped);

        let before = sim.stats();
        sim.step(0.03);
        assert_eq!(sim.stats(), before);
    }

    #[test]
    fn puff_cap_is_enforced() {
        let config = SkyConfig {
            max_puffs: 3,
            max_dt: 1.0,
            ..single_thermal(10.0)
        };
        let mut sim = SkySim::with_rng(config, quiet_rng());
        sim.step(1.0);
        let stats = sim.stats();
        assert_eq!(stats.live, 3);
        assert_eq!(stats.spawned, 3);
        assert_eq!(stats.dropped, 7);
    }

    #[test]
    fn draw_order_is_backdrop_clouds_sun() {
        let config = SkyConfig {
            max_dt: 1.0,
            ..single_thermal(5.0)
        };
        let mut sim = SkySim::with_rng(config, quiet_rng());
        let commands = sim.tick(1.0);

        assert!(matches!(commands[0], DrawCommand::GradientRect { .. }));
        assert!(matches!(commands[1], DrawCommand::GradientRect { .. }));
        assert!(matches!(commands[2], DrawCommand::Rect { .. }));
        assert!(matches!(commands[3], DrawCommand::Rect { .. }));
        assert!(matches!(commands[4], DrawCommand::Rect { .. }));
        assert_eq!(blob_count(&commands), sim.puffs().len() + 1);

        let Some(DrawCommand::SoftBlob(sun)) = commands.last() else {
            panic!("sun haze should be drawn last");
        };
        assert_eq!(sun.rings, 10);
        assert!((sun.center.x - 960.0 * 0.82).abs() < 1e-3);
        assert!((sun.center.y - 600.0 * 0.80).abs() < 1e-3);
        assert!((sun.peak_alpha - 0.06).abs() < 1e-6);
    }

    #[test]
    fn sky_is_deepest_overhead() {
        let sim = SkySim::with_rng(SkyConfig::default(), quiet_rng());
        let commands = sim.draw_commands();
        let DrawCommand::GradientRect { origin, size, top, .. } = commands[0] else {
            panic!("expected the upper sky gradient first");
        };
        assert!((origin.y + size.y - 600.0).abs() < 1e-3);
        assert_eq!(top, palette::SKY_TOP);
    }

    #[test]
    fn long_run_keeps_invariants() {
        let config = SkyConfig {
            seed: Some(77),
            ..SkyConfig::default()
        };
        let mut sim = SkySim::new(config);
        for _ in 0..3000 {
            sim.step(1.0 / 60.0);
            for p in sim.puffs() {
                assert!(p.life <= p.max_life);
                assert!((0.0..=1.0).contains(&p.whiteness));
                assert!(p.radius > 0.0);
            }
        }
        let stats = sim.stats();
        assert!(stats.spawned > 0);
        assert!(stats.culled > 0);
        assert_eq!(stats.spawned - stats.culled, stats.live as u64);
    }
}
