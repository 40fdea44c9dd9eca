//! Input handling: held keys, mouse buttons and the discrete command queue.
//!
//! Input events arrive asynchronously relative to simulation ticks. They only
//! ever touch this state: held keys/buttons are last-write-wins, discrete
//! presses are appended to a FIFO queue that the tick drains in arrival order.

mod controls;

pub use controls::{Action, ControlScheme};

use engine_core::Vec2;
use std::collections::{HashSet, VecDeque};

/// A discrete request consumed at the next tick boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A one-shot bound action was pressed (build select, toggle, ability, edit).
    Action(Action),
    /// Primary mouse button pressed: place a structure or fire.
    Primary,
}

/// Movement keys held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveIntent {
    /// Any horizontal key held.
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Manages input state between ticks.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Discrete commands waiting for the next tick.
    commands: VecDeque<Command>,
    /// Accumulated mouse delta since the last drain.
    mouse_delta: Vec2,
    /// When false, presses update the held sets but enqueue nothing.
    accepting_commands: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable command queueing (off outside of a running match).
    pub fn set_accepting_commands(&mut self, accepting: bool) {
        self.accepting_commands = accepting;
        if !accepting {
            self.commands.clear();
        }
    }

    /// Process a keyboard event. One-shot actions are queued only on the
    /// down transition, so OS auto-repeat does not re-toggle build mode.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState, controls: &ControlScheme) {
        match state {
            ElementState::Pressed => {
                let fresh = self.keys_held.insert(key);
                if fresh && self.accepting_commands {
                    for action in controls.actions_for(key).filter(|a| !a.is_continuous()) {
                        self.commands.push_back(Command::Action(action));
                    }
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                let fresh = self.mouse_held.insert(button);
                if fresh && button == MouseButton::Left && self.accepting_commands {
                    self.commands.push_back(Command::Primary);
                }
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
            }
        }
    }

    /// Process raw mouse motion.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta += Vec2::new(delta.0 as f32, delta.1 as f32);
    }

    /// Take the accumulated mouse motion.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Take every queued command in arrival order.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.commands.drain(..).collect()
    }

    /// Number of commands waiting.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Drop held keys, buttons and queued commands.
    pub fn clear(&mut self) {
        self.keys_held.clear();
        self.mouse_held.clear();
        self.commands.clear();
        self.mouse_delta = Vec2::ZERO;
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if the key bound to `action` is held.
    pub fn is_action_held(&self, action: Action, controls: &ControlScheme) -> bool {
        self.is_key_held(controls.key_for(action))
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if aim is held (Right mouse button).
    pub fn is_aiming(&self) -> bool {
        self.is_mouse_held(MouseButton::Right)
    }

    /// Sample the movement keys through the control scheme.
    pub fn move_intent(&self, controls: &ControlScheme) -> MoveIntent {
        MoveIntent {
            forward: self.is_action_held(Action::Forward, controls),
            backward: self.is_action_held(Action::Backward, controls),
            left: self.is_action_held(Action::Left, controls),
            right: self.is_action_held(Action::Right, controls),
            jump: self.is_action_held(Action::Jump, controls),
        }
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    fn accepting() -> InputState {
        let mut input = InputState::new();
        input.set_accepting_commands(true);
        input
    }

    #[test]
    fn movement_keys_are_held_not_queued() {
        let controls = ControlScheme::default();
        let mut input = accepting();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed, &controls);
        input.process_keyboard(KeyCode::Space, ElementState::Pressed, &controls);
        assert_eq!(input.pending_commands(), 0);
        let intent = input.move_intent(&controls);
        assert!(intent.forward && intent.jump);
        assert!(!intent.backward);
        assert!(intent.is_moving());

        input.process_keyboard(KeyCode::KeyW, ElementState::Released, &controls);
        let intent = input.move_intent(&controls);
        assert!(!intent.forward);
        // Jump alone is not horizontal movement.
        assert!(!intent.is_moving());
    }

    #[test]
    fn build_keys_queue_once_per_press() {
        let controls = ControlScheme::default();
        let mut input = accepting();
        input.process_keyboard(KeyCode::KeyQ, ElementState::Pressed, &controls);
        // auto-repeat
        input.process_keyboard(KeyCode::KeyQ, ElementState::Pressed, &controls);
        input.process_keyboard(KeyCode::KeyQ, ElementState::Released, &controls);
        input.process_keyboard(KeyCode::KeyZ, ElementState::Pressed, &controls);
        assert_eq!(
            input.drain_commands(),
            vec![Command::Action(Action::ToggleBuild), Command::Action(Action::BuildWall)]
        );
        assert_eq!(input.pending_commands(), 0);
    }

    #[test]
    fn primary_and_aim() {
        let mut input = accepting();
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(input.is_aiming());
        assert_eq!(input.drain_commands(), vec![Command::Primary, Command::Primary]);

        input.process_mouse_button(MouseButton::Right, ElementState::Released);
        assert!(!input.is_aiming());
    }

    #[test]
    fn nothing_queued_while_not_accepting() {
        let controls = ControlScheme::default();
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::KeyZ, ElementState::Pressed, &controls);
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(input.pending_commands(), 0);
        assert!(input.is_key_held(KeyCode::KeyZ));
    }

    #[test]
    fn remapped_keys_follow_scheme() {
        let mut controls = ControlScheme::default();
        controls.rebind(Action::Forward, KeyCode::ArrowUp);
        let mut input = accepting();
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed, &controls);
        assert!(!input.move_intent(&controls).forward);
        input.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed, &controls);
        assert!(input.move_intent(&controls).forward);
    }

    #[test]
    fn mouse_delta_accumulates_and_resets() {
        let mut input = InputState::new();
        input.process_mouse_motion((2.0, -1.0));
        input.process_mouse_motion((3.0, 4.0));
        assert_eq!(input.take_mouse_delta(), Vec2::new(5.0, 3.0));
        assert_eq!(input.take_mouse_delta(), Vec2::ZERO);
    }
}
