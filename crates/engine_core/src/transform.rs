//! Yaw-only poses and planar helpers.
//!
//! Everything in the arena stands upright, so orientation is a single yaw angle
//! about +Y. Yaw 0 faces +Z; positive yaw turns toward +X.

use glam::{Quat, Vec3};

/// Position plus facing yaw (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3,
    pub yaw: f32,
}

impl Pose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Unit facing direction on the XZ plane.
    pub fn facing(&self) -> Vec3 {
        facing_from_yaw(self.yaw)
    }

    /// Rotation quaternion for this pose.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Transform a point from this pose's local frame into world space.
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation() * local
    }

    /// Express a world point in this pose's local frame.
    pub fn world_to_local(&self, world: Vec3) -> Vec3 {
        Quat::from_rotation_y(-self.yaw) * (world - self.position)
    }
}

/// Unit XZ direction for a yaw.
pub fn facing_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw of a direction, ignoring its vertical component.
pub fn yaw_from_direction(dir: Vec3) -> f32 {
    dir.x.atan2(dir.z)
}

/// Drop the vertical component.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance on the XZ plane.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(a - b).length()
}

/// Yaw in degrees, wrapped to `[0, 360)`.
pub fn yaw_degrees_wrapped(yaw: f32) -> f32 {
    yaw.to_degrees().rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn facing_matches_yaw_convention() {
        assert!((facing_from_yaw(0.0) - Vec3::Z).length() < 1e-6);
        assert!((facing_from_yaw(FRAC_PI_2) - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn yaw_from_direction_inverts_facing() {
        for yaw in [-2.5f32, -1.0, 0.0, 0.7, 3.0] {
            let back = yaw_from_direction(facing_from_yaw(yaw));
            assert!((back - yaw).abs() < 1e-5, "{yaw} -> {back}");
        }
    }

    #[test]
    fn local_world_round_trip() {
        let pose = Pose::new(Vec3::new(3.0, 1.0, -2.0), 1.1);
        let p = Vec3::new(-4.0, 2.0, 7.5);
        let back = pose.local_to_world(pose.world_to_local(p));
        assert!((back - p).length() < 1e-4);
    }

    #[test]
    fn local_z_points_along_facing() {
        let pose = Pose::new(Vec3::ZERO, FRAC_PI_2);
        let local = pose.world_to_local(Vec3::new(2.0, 0.0, 0.0));
        assert!((local.z - 2.0).abs() < 1e-5);
        assert!(local.x.abs() < 1e-5);
    }

    #[test]
    fn planar_distance_ignores_height() {
        let d = planar_distance(Vec3::new(0.0, 10.0, 0.0), Vec3::new(3.0, -4.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn wrapped_degrees_are_non_negative() {
        assert!((yaw_degrees_wrapped(-FRAC_PI_2) - 270.0).abs() < 1e-3);
    }
}
