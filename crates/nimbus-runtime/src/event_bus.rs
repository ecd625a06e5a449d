//! Queue of pending sky events between the shell and the simulation

use nimbus_sim::SkyEvent;

/// Events gathered during a frame, handed to the simulation in arrival order
#[derive(Default)]
pub struct EventBus {
    pending: Vec<SkyEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SkyEvent) {
        self.pending.push(event);
    }

    /// Queue the same event `times` times, once per key press seen this frame
    pub fn push_repeated(&mut self, event: SkyEvent, times: usize) {
        self.pending.extend(std::iter::repeat(event).take(times));
    }

    /// Take everything queued so far, leaving the bus empty
    pub fn drain(&mut self) -> Vec<SkyEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
