//! Third-person chase camera.

use engine_core::{Quat, Vec3};

use crate::scene::CameraView;

/// Over-the-shoulder offset in camera-yaw space.
pub const THIRD_PERSON_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 4.5);
/// Tighter offset while aiming down sights.
pub const AIM_OFFSET: Vec3 = Vec3::new(0.8, 1.8, 1.5);
/// Fraction of the gap closed per second (clamped to a full snap).
const FOLLOW_RATE: f32 = 20.0;
/// Radians per mouse count at sensitivity 1.0.
const BASE_SENSITIVITY: f32 = 0.002;

/// Mouse-look camera that trails the player.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    pub position: Vec3,
    /// Multiplier on [`BASE_SENSITIVITY`].
    pub sensitivity: f32,
    yaw: f32,
    pitch: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ChaseCamera {
    pub fn new(sensitivity: f32) -> Self {
        Self { position: THIRD_PERSON_OFFSET, sensitivity, yaw: 0.0, pitch: 0.0 }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Point the camera without going through mouse deltas.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-max_pitch(), max_pitch());
    }

    /// Apply mouse look.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        let scale = BASE_SENSITIVITY * self.sensitivity;
        self.yaw -= delta_x * scale;
        self.pitch = (self.pitch - delta_y * scale).clamp(-max_pitch(), max_pitch());
    }

    /// Move toward the chase point behind `player`.
    pub fn follow(&mut self, player: Vec3, aiming: bool, dt: f32) {
        let offset = if aiming { AIM_OFFSET } else { THIRD_PERSON_OFFSET };
        let desired = player + Quat::from_rotation_y(self.yaw) * offset;
        self.position = self.position.lerp(desired, (dt * FOLLOW_RATE).min(1.0));
    }

    /// Snap straight to the chase point (match start).
    pub fn snap_to(&mut self, player: Vec3) {
        self.position = player + Quat::from_rotation_y(self.yaw) * THIRD_PERSON_OFFSET;
    }

    pub fn view(&self) -> CameraView {
        CameraView::new(self.position, self.yaw, self.pitch)
    }
}

fn max_pitch() -> f32 {
    std::f32::consts::FRAC_PI_2 - 0.01
}
