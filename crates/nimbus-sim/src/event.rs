//! Discrete events the platform shell feeds into the simulation

/// Shell-to-simulation event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkyEvent {
    /// Stop the loop
    Quit,
    /// Viewport changed size, in pixels
    Resize { width: u32, height: u32 },
    /// Shift the ambient breeze by this many pixels per second
    AdjustBreeze(f32),
    /// Shift every thermal's emission rate by this many puffs per second
    AdjustRate(f32),
}
