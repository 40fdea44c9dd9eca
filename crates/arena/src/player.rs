//! Player locomotion, structure collision and vitals.

use engine_core::{flatten, planar_distance, yaw_from_direction, Pose, Vec3};
use input::MoveIntent;

use crate::building::Structure;

pub const PLAYER_SPEED: f32 = 10.0;
pub const GRAVITY: f32 = 30.0;
pub const JUMP_FORCE: f32 = 12.0;
/// The player drops in from the sky at match start.
pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 50.0, 0.0);
pub const MAX_AMMO: u32 = 999;
pub const STARTING_MATERIALS: i32 = 9999;

/// Planar distance to a structure's placement point that blocks movement.
const COLLISION_RADIUS: f32 = 2.5;
/// Structures further away than this vertically never block.
const COLLISION_HEIGHT: f32 = 3.0;
/// Within this distance above the ground the player snaps down onto it.
const GROUND_SNAP: f32 = 0.2;

/// Kinematic state of the player. Vertical velocity is authoritative,
/// horizontal motion is recomputed from input every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub yaw: f32,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::spawn()
    }
}

impl PlayerState {
    pub fn spawn() -> Self {
        Self {
            position: SPAWN_POINT,
            yaw: 0.0,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.yaw)
    }

    /// Advance one tick: horizontal move relative to the camera, then gravity,
    /// ground snap and jump.
    pub fn update(&mut self, intent: MoveIntent, camera_dir: Vec3, dt: f32, structures: &[Structure]) {
        self.move_horizontal(intent, camera_dir, dt, structures);
        self.resolve_vertical(intent.jump, dt, structures);
    }

    /// Move on the XZ plane. A blocked move is dropped as a whole, there is no sliding.
    fn move_horizontal(&mut self, intent: MoveIntent, camera_dir: Vec3, dt: f32, structures: &[Structure]) {
        if !intent.is_moving() {
            return;
        }
        let forward = flatten(camera_dir).normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        let right = forward.cross(Vec3::Y);

        let mut dir = Vec3::ZERO;
        if intent.forward {
            dir += forward;
        }
        if intent.backward {
            dir -= forward;
        }
        if intent.left {
            dir -= right;
        }
        if intent.right {
            dir += right;
        }
        let dir = dir.normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }

        let candidate = self.position + dir * PLAYER_SPEED * dt;
        if blocked(candidate, structures) {
            return;
        }
        self.position = candidate;
        self.yaw = yaw_from_direction(camera_dir);
    }

    fn resolve_vertical(&mut self, jump: bool, dt: f32, structures: &[Structure]) {
        let ground = ground_height(self.position, structures);

        if !self.grounded {
            self.velocity.y -= GRAVITY * dt;
        }
        if self.position.y <= ground + GROUND_SNAP && self.velocity.y <= 0.0 {
            self.position.y = ground;
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
        if self.grounded && jump {
            self.velocity.y = JUMP_FORCE;
            self.grounded = false;
        }
        self.position.y += self.velocity.y * dt;

        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.velocity.y = 0.0;
            self.grounded = true;
        }
    }
}

/// True if standing at `point` would put the player inside a structure.
pub fn blocked(point: Vec3, structures: &[Structure]) -> bool {
    structures.iter().any(|s| {
        planar_distance(s.position, point) < COLLISION_RADIUS
            && (s.position.y - point.y).abs() < COLLISION_HEIGHT
    })
}

/// Highest supporting surface under `point`; 0 is the world floor.
pub fn ground_height(point: Vec3, structures: &[Structure]) -> f32 {
    structures
        .iter()
        .filter_map(|s| s.support_height(point))
        .fold(0.0, f32::max)
}

/// HUD-facing player numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerVitals {
    pub health: f32,
    pub shield: f32,
    pub ammo: u32,
    pub kills: u32,
    pub alive: bool,
    /// Goes negative when the player keeps building past zero.
    pub materials: i32,
    pub weapon_tier: u8,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PlayerVitals {
    pub fn new(weapon_tier: u8) -> Self {
        Self {
            health: 100.0,
            shield: 100.0,
            ammo: MAX_AMMO,
            kills: 0,
            alive: true,
            materials: STARTING_MATERIALS,
            weapon_tier,
        }
    }

    /// One trigger pull. Never blocks the shot, ammo just bottoms out at zero.
    pub fn spend_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    pub fn spend_materials(&mut self, amount: i32) {
        self.materials -= amount;
    }
}
