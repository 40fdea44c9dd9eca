//! Remappable control scheme.

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Logical actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
    BuildWall,
    BuildFloor,
    BuildRamp,
    ToggleBuild,
    Ability,
    EditBuilding,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::BuildWall,
        Action::BuildFloor,
        Action::BuildRamp,
        Action::ToggleBuild,
        Action::Ability,
        Action::EditBuilding,
    ];

    /// Held actions are sampled every tick; the rest fire once per key press.
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Action::Forward | Action::Backward | Action::Left | Action::Right | Action::Jump
        )
    }
}

/// Key bindings, one key per logical action. Stored in `config.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlScheme {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub build_wall: KeyCode,
    pub build_floor: KeyCode,
    pub build_ramp: KeyCode,
    pub toggle_build: KeyCode,
    pub ability: KeyCode,
    pub edit_building: KeyCode,
}

impl Default for ControlScheme {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            build_wall: KeyCode::KeyZ,
            build_floor: KeyCode::KeyX,
            build_ramp: KeyCode::KeyC,
            toggle_build: KeyCode::KeyQ,
            ability: KeyCode::KeyF,
            edit_building: KeyCode::KeyG,
        }
    }
}

impl ControlScheme {
    /// Key bound to `action`.
    pub fn key_for(&self, action: Action) -> KeyCode {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::BuildWall => self.build_wall,
            Action::BuildFloor => self.build_floor,
            Action::BuildRamp => self.build_ramp,
            Action::ToggleBuild => self.toggle_build,
            Action::Ability => self.ability,
            Action::EditBuilding => self.edit_building,
        }
    }

    /// Rebind `action` to `key`.
    pub fn rebind(&mut self, action: Action, key: KeyCode) {
        let slot = match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
            Action::BuildWall => &mut self.build_wall,
            Action::BuildFloor => &mut self.build_floor,
            Action::BuildRamp => &mut self.build_ramp,
            Action::ToggleBuild => &mut self.toggle_build,
            Action::Ability => &mut self.ability,
            Action::EditBuilding => &mut self.edit_building,
        };
        *slot = key;
    }

    /// Every action bound to `key`, in declaration order. A key may carry more
    /// than one action if the player bound it twice.
    pub fn actions_for(&self, key: KeyCode) -> impl Iterator<Item = Action> + '_ {
        Action::ALL.into_iter().filter(move |a| self.key_for(*a) == key)
    }
}
