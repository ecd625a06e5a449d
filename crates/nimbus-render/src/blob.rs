//! Soft-blob ring layout
//!
//! A soft radial disc is faked by stacking concentric flat discs: every
//! ring is larger and fainter than the previous one, so where they overlap
//! the blended alpha falls off smoothly toward the rim.

use nimbus_sim::SoftBlob;

/// Slices per disc fan
pub const BLOB_SLICES: u32 = 32;

/// Exponent of the alpha falloff; above 1 keeps the centre dense and drops steeply at the edge
pub const FALLOFF_EXPONENT: f32 = 1.6;

/// One disc of a soft blob
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub alpha: f32,
}

/// Radius fraction of ring `index` out of `count`
pub fn ring_fraction(index: u32, count: u32) -> f32 {
    (index + 1) as f32 / count as f32
}

pub fn ring_alpha(peak_alpha: f32, t: f32) -> f32 {
    peak_alpha * (1.0 - t).max(0.0).powf(FALLOFF_EXPONENT)
}

/// Rings of `blob`, smallest first. Zero rings yields nothing.
pub fn rings(blob: &SoftBlob) -> impl Iterator<Item = Ring> + '_ {
    (0..blob.rings).map(move |i| {
        let t = ring_fraction(i, blob.rings);
        Ring {
            radius: t * blob.radius,
            alpha: ring_alpha(blob.peak_alpha, t),
        }
    })
}
