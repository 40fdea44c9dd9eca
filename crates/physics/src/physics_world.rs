//! Static collision scene used for ray queries.
//!
//! Nothing here is simulated: the arena's own locomotion and projectile code
//! move everything. This world only mirrors the current shapes so the aim ray
//! can find the first thing under the crosshair.

use crate::collision::CollisionGroup;
use engine_core::Vec3;
use rapier3d::na::{Isometry3, Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;

/// Collider-only world. Colliders have no parent bodies; they are positioned
/// directly and moved with [`PhysicsWorld::set_collider_translation`].
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub island_manager: IslandManager,
    pub query_pipeline: QueryPipeline,
    /// Colliders were added, moved or removed since the last pipeline update.
    dirty: bool,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Create a world containing only the ground plane at y = 0.
    pub fn with_ground() -> Self {
        let mut world = Self::new();
        world.add_ground_plane();
        world
    }

    /// Rebuild the query acceleration structure if anything changed.
    pub fn update_query_pipeline(&mut self) {
        if self.dirty {
            self.query_pipeline.update(&self.collider_set);
            self.dirty = false;
        }
    }

    /// Add a ground plane collider (flat Y=0 half-space).
    pub fn add_ground_plane(&mut self) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .collision_groups(CollisionGroup::environment())
            .build();
        self.insert(collider)
    }

    /// Add a fixed cuboid.
    /// `translation`: world position of center. `yaw`: rotation around Y.
    /// `tilt`: rotation around the local X axis, applied before the yaw.
    /// `half_extents`: half sizes in local X, Y, Z.
    pub fn add_static_cuboid(
        &mut self,
        translation: Vec3,
        yaw: f32,
        tilt: f32,
        half_extents: Vec3,
    ) -> ColliderHandle {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), yaw as Real)
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), tilt as Real);
        let position = Isometry3::from_parts(
            Translation3::new(translation.x, translation.y, translation.z),
            rotation,
        );
        let collider = ColliderBuilder::cuboid(
            half_extents.x as Real,
            half_extents.y as Real,
            half_extents.z as Real,
        )
        .position(position)
        .collision_groups(CollisionGroup::structure())
        .build();
        self.insert(collider)
    }

    /// Add an upright capsule (characters). `center` is the capsule midpoint.
    pub fn add_capsule(&mut self, center: Vec3, half_height: f32, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .translation(vector![center.x, center.y, center.z])
            .collision_groups(CollisionGroup::enemy())
            .build();
        self.insert(collider)
    }

    /// Move a collider.
    pub fn set_collider_translation(&mut self, handle: ColliderHandle, position: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(vector![position.x, position.y, position.z]);
            self.dirty = true;
        }
    }

    /// Remove a collider by its handle.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        if self
            .collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true)
            .is_some()
        {
            self.dirty = true;
        }
    }

    /// Number of colliders, ground included.
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    fn insert(&mut self, collider: Collider) -> ColliderHandle {
        self.dirty = true;
        self.collider_set.insert(collider)
    }
}
