//! Nimbus Runtime - platform shell plumbing
//!
//! - `FrameClock` measures wall-clock frame time
//! - `InputState` tracks keys and the sky's action bindings
//! - `EventBus` queues `SkyEvent`s from the shell for the simulation

mod clock;
mod controls;
mod event_bus;
pub mod input;

pub use clock::FrameClock;
pub use controls::{push_action_events, ControlSteps};
pub use event_bus::EventBus;
pub use input::InputState;
