//! Nimbus Sim - cumulus cloud puff simulation
//!
//! Provides the platform-independent half of the sky:
//! - Ground thermals with fractional spawn credit
//! - Puff advection, growth and whitening with swap-remove culling
//! - A back-to-front list of draw commands for any renderer

pub mod config;
pub mod draw;
pub mod emitter;
pub mod event;
pub mod puff;
pub mod sky;

pub use config::{SkyConfig, ThermalConfig};
pub use draw::{palette, DrawCommand, SoftBlob, PUFF_RINGS};
pub use emitter::{Emitter, EmitterState};
pub use event::SkyEvent;
pub use puff::{update_puffs, Puff, PuffPool};
pub use sky::{SimState, SkySim, SkyStats};
