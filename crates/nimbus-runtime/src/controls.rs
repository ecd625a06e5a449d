//! Translate held/pressed actions into simulation events

use crate::event_bus::EventBus;
use crate::input::{InputState, BREEZE_LEFT, BREEZE_RIGHT, LESS_HUMID, MORE_HUMID, QUIT};
use nimbus_sim::SkyEvent;

/// Step sizes applied per key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSteps {
    pub breeze: f32,
    pub rate: f32,
}

/// Push one event per action press this frame. Returns true if quit was requested.
pub fn push_action_events(input: &InputState, steps: ControlSteps, bus: &mut EventBus) -> bool {
    let bindings = [
        (BREEZE_LEFT, SkyEvent::AdjustBreeze(-steps.breeze)),
        (BREEZE_RIGHT, SkyEvent::AdjustBreeze(steps.breeze)),
        (MORE_HUMID, SkyEvent::AdjustRate(steps.rate)),
        (LESS_HUMID, SkyEvent::AdjustRate(-steps.rate)),
    ];
    for (action, event) in bindings {
        bus.push_repeated(event, input.action_presses(action));
    }

    let quit = input.is_action_just_pressed(QUIT);
    if quit {
        log::debug!("[input] Quit requested");
        bus.push(SkyEvent::Quit);
    }
    quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const STEPS: ControlSteps = ControlSteps {
        breeze: 4.0,
        rate: 0.8,
    };

    #[test]
    fn arrows_map_to_adjustments() {
        let mut input = InputState::new();
        let mut bus = EventBus::new();
        input.process_key_down(KeyCode::ArrowLeft, false);
        input.process_key_down(KeyCode::ArrowUp, false);
        input.process_key_down(KeyCode::ArrowUp, true);

        assert!(!push_action_events(&input, STEPS, &mut bus));
        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                SkyEvent::AdjustBreeze(-4.0),
                SkyEvent::AdjustRate(0.8),
                SkyEvent::AdjustRate(0.8),
            ]
        );
    }

    #[test]
    fn quit_key_pushes_quit() {
        let mut input = InputState::new();
        let mut bus = EventBus::new();
        input.process_key_down(KeyCode::Escape, false);
        assert!(push_action_events(&input, STEPS, &mut bus));
        assert_eq!(bus.drain(), vec![SkyEvent::Quit]);
    }

    #[test]
    fn nothing_pressed_nothing_pushed() {
        let input = InputState::new();
        let mut bus = EventBus::new();
        push_action_events(&input, STEPS, &mut bus);
        assert!(bus.is_empty());
    }
}
