//! Keyboard and mouse event handling for the arena.
//!
//! Handlers never touch simulation records. They update the input state, queue
//! discrete commands for the next tick, or flip the pause phase.

use engine_core::Vec2;
use input::{ElementState, KeyCode, MouseButton};

impl crate::Arena {
    /// Handle a physical key event. Escape toggles pause on its down transition.
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if key == KeyCode::Escape {
            let fresh = state == ElementState::Pressed && !self.input.is_key_held(key);
            self.input.process_keyboard(key, state, &self.controls);
            if fresh {
                self.toggle_pause();
            }
            return;
        }
        self.input.process_keyboard(key, state, &self.controls);
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.input.process_mouse_button(button, state);
    }

    /// Accumulate raw mouse motion for the camera.
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.input.process_mouse_motion(delta);
    }

    /// Mouse motion since the last call, for the driver's camera.
    pub fn take_look_delta(&mut self) -> Vec2 {
        self.input.take_mouse_delta()
    }

    /// Secondary button held: the camera should use the aim offset.
    pub fn is_aiming(&self) -> bool {
        self.input.is_aiming()
    }
}
