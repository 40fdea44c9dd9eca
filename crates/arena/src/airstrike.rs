//! Airstrike ability: a few seconds of random strikes on live bots.

use std::time::Duration;

use engine_core::Vec3;
use rand::Rng;

use crate::bot::Enemy;
use crate::weapons::CombatSystem;

pub const AIRSTRIKE_DURATION: Duration = Duration::from_secs(5);
/// Chance per tick that a strike lands while active.
pub const STRIKE_CHANCE: f64 = 0.1;
pub const STRIKE_DAMAGE: f32 = 50.0;
const STRIKE_ANNOTATION_OFFSET: Vec3 = Vec3::new(0.0, 3.0, 0.0);

#[derive(Debug, Default)]
pub struct Airstrike {
    /// Activation time of the running strike, if any.
    started_at: Option<Duration>,
}

impl Airstrike {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Call in the strike. Refused while locked or already running.
    pub fn activate(&mut self, unlocked: bool, now: Duration) -> bool {
        if !unlocked || self.is_active() {
            return false;
        }
        self.started_at = Some(now);
        log::debug!("Airstrike inbound");
        true
    }

    /// Run one tick of the strike. Returns the id of the bot hit, if any.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: Duration,
        enemies: &mut [Enemy],
        combat: &mut CombatSystem,
        rng: &mut R,
    ) -> Option<u32> {
        let started = self.started_at?;
        if now.saturating_sub(started) > AIRSTRIKE_DURATION {
            self.started_at = None;
            log::debug!("Airstrike over");
            return None;
        }
        if enemies.is_empty() || !rng.gen_bool(STRIKE_CHANCE) {
            return None;
        }
        let target = &mut enemies[rng.gen_range(0..enemies.len())];
        target.health.take_damage(STRIKE_DAMAGE);
        combat.annotate(target.position + STRIKE_ANNOTATION_OFFSET, STRIKE_DAMAGE, true, now);
        log::trace!("Airstrike hit {}", target.name);
        Some(target.id)
    }
}
