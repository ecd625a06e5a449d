//! Nimbus Core - Foundational types for the Nimbus sky simulator
//!
//! This crate provides the pieces every other Nimbus crate depends on:
//! - `Vec2`, `Viewport`, `Color` - Screen-space and colour types
//! - `clampf`, `lerp_f32`, `lerp_rgb` - Small scalar helpers
//! - `RandomSource` / `SkyRng` / `SequenceRng` - Injectable uniform random sources
//! - Error types and Result alias

mod error;
pub mod math;
pub mod rand;
mod types;

pub use error::{NimbusError, Result};
pub use rand::{RandomSource, SequenceRng, SkyRng};
pub use types::{Color, Vec2, Viewport};
