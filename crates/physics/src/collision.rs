//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for the things the aim ray can hit.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Static environment (ground)
    Environment = 1 << 0,
    /// Player-built walls, floors and ramps
    Structure = 1 << 1,
    /// Bots
    Enemy = 1 << 2,
}

impl CollisionGroup {
    fn bits(groups: &[CollisionGroup]) -> Group {
        Group::from_bits_retain(groups.iter().fold(0u32, |acc, g| acc | *g as u32))
    }

    /// Membership/filter for the ground.
    pub fn environment() -> InteractionGroups {
        InteractionGroups::new(Self::bits(&[Self::Environment]), Group::ALL)
    }

    /// Membership/filter for structures.
    pub fn structure() -> InteractionGroups {
        InteractionGroups::new(Self::bits(&[Self::Structure]), Group::ALL)
    }

    /// Membership/filter for bots.
    pub fn enemy() -> InteractionGroups {
        InteractionGroups::new(Self::bits(&[Self::Enemy]), Group::ALL)
    }

    /// Query groups for a ray that may stop on any of `targets`.
    pub fn query(targets: &[CollisionGroup]) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Self::bits(targets))
    }

    /// Query groups for the aim ray: everything solid.
    pub fn aim() -> InteractionGroups {
        Self::query(&[Self::Environment, Self::Structure, Self::Enemy])
    }
}
