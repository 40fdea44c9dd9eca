//! Scene queries for the aim ray.
//!
//! Combat never reaches into the renderer. It gets a [`CameraView`] and a
//! [`SceneQuery`], and the arena backs the query with a rapier mirror of the
//! ground, the placed structures and the live bots.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_4, SQRT_2};

use engine_core::Vec3;
use physics::{ColliderHandle, PhysicsWorld};

use crate::bot::Enemy;
use crate::building::{BuildType, Structure};

/// First opaque point along a ray, if any within `max_distance`.
pub trait SceneQuery {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Camera pose handed to the simulation each tick.
///
/// Yaw 0 with pitch 0 looks down -Z; positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraView {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraView {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self { position, yaw, pitch }
    }

    /// Look from `position` toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let d = (target - position).normalize_or_zero();
        let yaw = (-d.x).atan2(-d.z);
        let pitch = d.y.clamp(-1.0, 1.0).asin();
        Self { position, yaw, pitch }
    }

    /// Unit view direction through the screen center.
    pub fn direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }
}

const WALL_HALF_EXTENTS: Vec3 = Vec3::new(2.0, 2.0, 0.1);
const FLOOR_HALF_EXTENTS: Vec3 = Vec3::new(2.0, 0.1, 2.0);
const RAMP_HALF_EXTENTS: Vec3 = Vec3::new(2.0, 0.1, 2.0 * SQRT_2);
/// Ramps climb along local +Z.
const RAMP_TILT: f32 = -FRAC_PI_4;

const BOT_CAPSULE_HALF_HEIGHT: f32 = 0.6;
const BOT_CAPSULE_RADIUS: f32 = 0.4;
const BOT_CAPSULE_CENTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Collider half extents and tilt for a structure type.
fn structure_shape(build_type: BuildType) -> (Vec3, f32) {
    match build_type {
        BuildType::Wall => (WALL_HALF_EXTENTS, 0.0),
        BuildType::Floor => (FLOOR_HALF_EXTENTS, 0.0),
        BuildType::Ramp => (RAMP_HALF_EXTENTS, RAMP_TILT),
    }
}

/// Rapier-backed [`SceneQuery`] kept in step with the arena's records.
pub struct SceneMirror {
    world: PhysicsWorld,
    /// Structures are append-only, so only the tail past this count is new.
    structures_synced: usize,
    enemies: HashMap<u32, ColliderHandle>,
}

impl Default for SceneMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneMirror {
    pub fn new() -> Self {
        Self {
            world: PhysicsWorld::with_ground(),
            structures_synced: 0,
            enemies: HashMap::new(),
        }
    }

    /// Drop everything but the ground.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Bring colliders in line with `structures` and `enemies`, then rebuild
    /// the query pipeline.
    pub fn sync(&mut self, structures: &[Structure], enemies: &[Enemy]) {
        for s in &structures[self.structures_synced.min(structures.len())..] {
            let (half_extents, tilt) = structure_shape(s.build_type);
            self.world.add_static_cuboid(s.position, s.rotation, tilt, half_extents);
        }
        self.structures_synced = structures.len();

        self.enemies.retain(|id, handle| {
            if enemies.iter().any(|e| e.id == *id) {
                true
            } else {
                self.world.remove_collider(*handle);
                false
            }
        });
        for e in enemies {
            let center = e.position + BOT_CAPSULE_CENTER;
            match self.enemies.get(&e.id) {
                Some(handle) => self.world.set_collider_translation(*handle, center),
                None => {
                    let handle = self.world.add_capsule(center, BOT_CAPSULE_HALF_HEIGHT, BOT_CAPSULE_RADIUS);
                    self.enemies.insert(e.id, handle);
                }
            }
        }

        self.world.update_query_pipeline();
    }

    /// Colliders in the mirror, ground included.
    pub fn collider_count(&self) -> usize {
        self.world.collider_count()
    }
}

impl SceneQuery for SceneMirror {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Vec3> {
        self.world.raycast(origin, direction, max_distance).map(|hit| hit.point)
    }
}
