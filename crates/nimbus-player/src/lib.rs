//! Nimbus Player - front-ends for the sky simulation
//!
//! This crate provides the `SkyApp` application handler for the
//! interactive window, plus the command-line overrides shared with the
//! offscreen renderer.

mod options;
mod sky_app;

pub use options::ConfigOverrides;
pub use sky_app::SkyApp;
