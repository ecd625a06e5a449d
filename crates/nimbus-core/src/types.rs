//! Screen-space and colour types

use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// A 2D vector in window pixels (origin bottom-left, y up)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_array(arr: [f32; 2]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
        }
    }

    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Point on a circle of `radius` around `self` at `angle` radians
    pub fn on_circle(&self, radius: f32, angle: f32) -> Self {
        Self {
            x: self.x + radius * angle.cos(),
            y: self.y + radius * angle.sin(),
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Drawable area in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque colour from three channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same colour with a different alpha
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_difference() {
        let v1 = Vec2::new(1.0, 2.0);
        let v2 = Vec2::new(4.0, 5.0);
        assert_eq!(v2 - v1, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_on_circle() {
        let c = Vec2::new(10.0, 10.0);
        let p = c.on_circle(5.0, 0.0);
        assert!((p.x - 15.0).abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);

        let q = c.on_circle(5.0, std::f32::consts::FRAC_PI_2);
        assert!((q.x - 10.0).abs() < 1e-5);
        assert!((q.y - 15.0).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_never_zero() {
        let v = Viewport::new(0, 0);
        assert_eq!(v.width, 1.0);
        assert_eq!(v.height, 1.0);
        let v = Viewport::new(960, 600);
        assert_eq!((v.width, v.height), (960.0, 600.0));
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let c = Color::rgb(0.4, 0.55, 0.35).with_alpha(0.25);
        assert_eq!(c.to_array(), [0.4, 0.55, 0.35, 0.25]);
    }
}
