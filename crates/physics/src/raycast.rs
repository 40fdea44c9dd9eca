//! Raycasting for aim resolution.

use crate::{CollisionGroup, PhysicsWorld};
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

impl PhysicsWorld {
    /// Cast the aim ray against ground, structures and bots and return the first hit.
    ///
    /// The query pipeline must be current (see [`PhysicsWorld::update_query_pipeline`]).
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let filter = QueryFilter::default().groups(CollisionGroup::aim());

        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(_, distance)| {
                let point = ray.point_at(distance);
                RaycastHit {
                    distance,
                    point: Vec3::new(point.x, point.y, point.z),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_down_hits_ground() {
        let mut world = PhysicsWorld::with_ground();
        world.update_query_pipeline();
        let hit = world
            .raycast(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, 100.0)
            .expect("ground hit");
        assert!((hit.distance - 10.0).abs() < 1e-3);
        assert!(hit.point.y.abs() < 1e-3);
    }

    #[test]
    fn ray_parallel_to_ground_misses() {
        let mut world = PhysicsWorld::with_ground();
        world.update_query_pipeline();
        assert!(world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::X, 100.0).is_none());
    }

    #[test]
    fn capsule_blocks_before_ground() {
        let mut world = PhysicsWorld::with_ground();
        world.add_capsule(Vec3::new(0.0, 1.0, -10.0), 0.6, 0.4);
        world.update_query_pipeline();
        let hit = world
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 100.0)
            .expect("capsule hit");
        assert!((hit.point.z + 9.6).abs() < 1e-2, "{:?}", hit.point);
    }

    #[test]
    fn moved_capsule_is_found_at_new_spot() {
        let mut world = PhysicsWorld::with_ground();
        let h = world.add_capsule(Vec3::new(0.0, 1.0, -10.0), 0.6, 0.4);
        world.update_query_pipeline();
        world.set_collider_translation(h, Vec3::new(0.0, 1.0, -20.0));
        world.update_query_pipeline();
        let hit = world
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 100.0)
            .expect("capsule hit");
        assert!((hit.point.z + 19.6).abs() < 1e-2, "{:?}", hit.point);
    }

    #[test]
    fn removed_collider_is_not_hit() {
        let mut world = PhysicsWorld::with_ground();
        let h = world.add_static_cuboid(Vec3::new(0.0, 2.0, -5.0), 0.0, 0.0, Vec3::new(2.0, 2.0, 0.1));
        world.update_query_pipeline();
        assert!(world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 50.0).is_some());
        world.remove_collider(h);
        world.update_query_pipeline();
        assert!(world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 50.0).is_none());
        assert_eq!(world.collider_count(), 1);
    }

    #[test]
    fn structure_in_front_shields_the_bot_behind() {
        let mut world = PhysicsWorld::with_ground();
        world.add_static_cuboid(Vec3::new(0.0, 2.0, -5.0), 0.0, 0.0, Vec3::new(2.0, 2.0, 0.1));
        world.add_capsule(Vec3::new(0.0, 1.0, -10.0), 0.6, 0.4);
        world.update_query_pipeline();
        let hit = world
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z, 50.0)
            .expect("structure hit");
        assert!((hit.distance - 4.9).abs() < 1e-2, "{:?}", hit);
    }

    #[test]
    fn zero_direction_casts_nothing() {
        let mut world = PhysicsWorld::with_ground();
        world.update_query_pipeline();
        assert!(world.raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO, 50.0).is_none());
    }
}
