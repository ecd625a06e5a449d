//! Cloud puff particles: spawn, per-tick update, culling and the live pool

use crate::emitter::Emitter;
use nimbus_core::math::{clampf, lerp_rgb};
use nimbus_core::{Color, RandomSource, Vec2, Viewport};

/// Fraction of the horizontal velocity gap to the breeze closed each tick
pub const BREEZE_EASING: f32 = 0.05;
/// Whiteness gained per second
pub const WHITEN_RATE: f32 = 0.15;
/// How far past either side a puff may drift before it wraps around
pub const WRAP_MARGIN: f32 = 100.0;
/// Puffs whose bottom edge rises above this fraction of the height are culled
pub const CULL_HEIGHT: f32 = 1.1;

const YOUNG_TINT: Color = Color::rgb(0.75, 0.78, 0.82);
const MATURE_TINT: Color = Color::rgb(0.85, 0.86, 0.90);

/// One cloud particle
#[derive(Debug, Clone, PartialEq)]
pub struct Puff {
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    /// Radius growth in pixels per second
    pub growth: f32,
    /// Horizontal meander amplitude
    pub wobble: f32,
    pub life: f32,
    pub max_life: f32,
    /// 0 = young bluish-grey, 1 = mature white
    pub whiteness: f32,
}

impl Puff {
    /// Create a freshly condensed puff somewhere along `emitter`
    pub fn spawn(emitter: &Emitter, rng: &mut impl RandomSource) -> Self {
        let x = emitter.x0 + rng.next_f32() * (emitter.x1 - emitter.x0);
        let y = emitter.y + rng.next_f32() * 10.0;
        let radius = rng.range(12.0, 22.0);
        let vx = (rng.next_f32() - 0.5) * 8.0;
        let vy = rng.range(12.0, 22.0);
        let growth = rng.range(3.0, 9.0);
        let wobble = rng.signed() * 0.8;
        let max_life = rng.range(18.0, 26.0);

        Self {
            position: Vec2::new(x, y),
            radius,
            velocity: Vec2::new(vx, vy),
            growth,
            wobble,
            life: 0.0,
            max_life,
            whiteness: 0.2,
        }
    }

    /// Advance one tick.
    ///
    /// Vertical velocity is re-derived from the current height every tick
    /// rather than integrated; only the horizontal component carries over,
    /// easing toward `breeze` by a fixed per-tick factor.
    pub fn step(&mut self, dt: f32, breeze: f32, viewport: Viewport) {
        self.life += dt;

        let height_norm = clampf(self.position.y / viewport.height, 0.0, 1.0);
        let updraft = 1.0 - 0.4 * height_norm;
        self.velocity.y = 10.0 * updraft + 8.0;
        self.velocity.x += (breeze - self.velocity.x) * BREEZE_EASING;

        self.position.x += (self.velocity.x + self.wobble * (2.0 * self.life).sin()) * dt;
        self.position.y += self.velocity.y * dt;

        // Low puffs are still condensing and grow faster
        self.radius += self.growth * dt * (0.6 + 0.4 * (1.0 - height_norm));
        self.whiteness = clampf(self.whiteness + dt * WHITEN_RATE, 0.0, 1.0);

        self.wrap(viewport.width);
    }

    fn wrap(&mut self, width: f32) {
        if self.position.x < -WRAP_MARGIN {
            self.position.x += width + 2.0 * WRAP_MARGIN;
        }
        if self.position.x > width + WRAP_MARGIN {
            self.position.x -= width + 2.0 * WRAP_MARGIN;
        }
    }

    /// Past its lifetime or risen out of the visible sky
    pub fn is_expired(&self, viewport: Viewport) -> bool {
        self.life > self.max_life || self.position.y - self.radius > viewport.height * CULL_HEIGHT
    }

    /// Bluish-grey near the source, white once mature
    pub fn tint(&self) -> Color {
        lerp_rgb(YOUNG_TINT, MATURE_TINT, self.whiteness)
    }

    /// Small puffs are denser in the centre; large ones get softer
    pub fn peak_alpha(&self) -> f32 {
        0.22 / (1.0 + 0.004 * self.radius)
    }
}

/// Advance every puff and drop the expired ones.
///
/// Removal is a swap-remove, so the order of survivors is not stable.
/// Returns the number of puffs culled.
pub fn update_puffs(puffs: &mut Vec<Puff>, dt: f32, breeze: f32, viewport: Viewport) -> usize {
    for p in puffs.iter_mut() {
        p.step(dt, breeze, viewport);
    }

    let before = puffs.len();
    let mut i = 0;
    while i < puffs.len() {
        if puffs[i].is_expired(viewport) {
            // Keep i: the swapped-in puff still needs checking
            puffs.swap_remove(i);
        } else {
            i += 1;
        }
    }
    before - puffs.len()
}

/// Live puff collection with an upper bound on its size
pub struct PuffPool {
    puffs: Vec<Puff>,
    capacity: usize,
}

impl PuffPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            puffs: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn alive_count(&self) -> usize {
        self.puffs.len()
    }

    pub fn is_full(&self) -> bool {
        self.puffs.len() >= self.capacity
    }

    /// Insert a puff. Returns false (and drops it) when the pool is full.
    pub fn insert(&mut self, puff: Puff) -> bool {
        if self.is_full() {
            return false;
        }
        self.puffs.push(puff);
        true
    }

    /// Step and cull every live puff, returning how many were removed
    pub fn update(&mut self, dt: f32, breeze: f32, viewport: Viewport) -> usize {
        update_puffs(&mut self.puffs, dt, breeze, viewport)
    }

    pub fn alive_slice(&self) -> &[Puff] {
        &self.puffs
    }
}
