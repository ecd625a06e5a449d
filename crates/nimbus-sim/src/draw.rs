//! Draw commands produced by the simulation each frame
//!
//! Commands are listed back-to-front; a renderer replays them in order
//! with source-alpha / one-minus-source-alpha blending.

use nimbus_core::{Color, Vec2};

/// Ring count used for every cloud puff
pub const PUFF_RINGS: u32 = 9;

/// A soft radial disc approximated by layered translucent rings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftBlob {
    pub center: Vec2,
    pub radius: f32,
    /// Base colour; its alpha channel is ignored
    pub color: Color,
    /// Alpha of the innermost ring before falloff
    pub peak_alpha: f32,
    pub rings: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned rectangle shaded from `bottom` to `top`
    GradientRect {
        origin: Vec2,
        size: Vec2,
        bottom: Color,
        top: Color,
    },
    /// Flat rectangle
    Rect { origin: Vec2, size: Vec2, color: Color },
    SoftBlob(SoftBlob),
}

/// Fixed palette of the backdrop
pub mod palette {
    use nimbus_core::Color;

    pub const SKY_TOP: Color = Color::rgb(0.42, 0.66, 0.95);
    pub const SKY_MID: Color = Color::rgb(0.62, 0.78, 0.98);
    pub const SKY_NEAR: Color = Color::rgb(0.78, 0.86, 0.99);
    pub const GROUND: Color = Color::rgb(0.40, 0.55, 0.35);
    pub const HILL_NEAR: Color = Color::rgb(0.33, 0.47, 0.32);
    pub const HILL_FAR: Color = Color::rgb(0.28, 0.42, 0.30);
    pub const SUN_HAZE: Color = Color::rgb(1.0, 0.98, 0.88);
    pub const CLEAR: Color = Color::BLACK;
}
