//! Read-only view of the arena for rendering and HUD display.

use crate::bot::Enemy;
use crate::building::{BuildPreview, BuildType, Structure};
use crate::player::{PlayerState, PlayerVitals};
use crate::state::{GamePhase, MatchMode};
use crate::weapons::{DamageAnnotation, Projectile, WeaponProfile};

/// Everything a presentation layer needs for one frame. Borrowed from the
/// arena, so it can only be held between ticks.
#[derive(Debug, Clone, Copy)]
pub struct ArenaSnapshot<'a> {
    pub phase: GamePhase,
    pub mode: MatchMode,
    pub wins: u32,
    pub player: &'a PlayerState,
    pub vitals: &'a PlayerVitals,
    pub enemies: &'a [Enemy],
    pub build_mode: Option<BuildType>,
    pub preview: Option<BuildPreview>,
    pub structures: &'a [Structure],
    pub projectiles: &'a [Projectile],
    pub annotations: &'a [DamageAnnotation],
    pub airstrike_active: bool,
    pub airstrike_unlocked: bool,
}

impl ArenaSnapshot<'_> {
    pub fn live_enemies(&self) -> usize {
        self.enemies.len()
    }

    pub fn weapon(&self) -> WeaponProfile {
        WeaponProfile::for_tier(self.vitals.weapon_tier)
    }

    /// One-line HUD readout.
    pub fn status_line(&self) -> String {
        let build = match self.build_mode {
            Some(b) => b.name(),
            None => "combat",
        };
        format!(
            "[{:?}] HP {:.0} SH {:.0} | {} ammo {} | mats {} | kills {} | alive {} | {} | pos ({:.1}, {:.1}, {:.1})",
            self.phase,
            self.vitals.health,
            self.vitals.shield,
            self.weapon().name(),
            self.vitals.ammo,
            self.vitals.materials,
            self.vitals.kills,
            self.live_enemies(),
            build,
            self.player.position.x,
            self.player.position.y,
            self.player.position.z,
        )
    }
}
