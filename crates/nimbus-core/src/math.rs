//! Scalar helpers shared by the simulation and the renderer

use crate::types::Color;

/// Clamp `x` into `[lo, hi]`
#[inline]
pub fn clampf(x: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(x))
}

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between the RGB channels of two colours.
/// Alpha is taken from `a`.
pub fn lerp_rgb(a: Color, b: Color, t: f32) -> Color {
    Color {
        r: lerp_f32(a.r, b.r, t),
        g: lerp_f32(a.g, b.g, t),
        b: lerp_f32(a.b, b.b, t),
        a: a.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_and_outside() {
        assert_eq!(clampf(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clampf(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clampf(7.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_rgb_midpoint() {
        let white = Color::WHITE;
        let black = Color::BLACK;
        let mid = lerp_rgb(white, black, 0.5);
        for c in &mid.to_array()[..3] {
            assert!((*c - 0.5).abs() < 1e-6);
        }
        assert_eq!(mid.a, 1.0);
    }
}
