//! Weapon profiles, projectile simulation and damage annotations.

use std::time::Duration;

use engine_core::{Pose, Vec3};
use rand::Rng;

use crate::bot::Enemy;
use crate::scene::{CameraView, SceneQuery};

pub const PROJECTILE_SPEED: f32 = 50.0;
/// Aim rays that hit nothing aim at the point this far along the view.
pub const MAX_RANGE: f32 = 100.0;
pub const PROJECTILE_TTL: Duration = Duration::from_secs(2);
/// Distance from a bot's torso center that counts as a hit.
pub const HIT_RADIUS: f32 = 1.0;
/// A hit is critical when its uniform roll lands above this.
pub const CRIT_THRESHOLD: f32 = 0.8;
pub const CRIT_MULTIPLIER: f32 = 2.0;
pub const ANNOTATION_LIFETIME: Duration = Duration::from_secs(1);

/// Muzzle position relative to the player's feet, in the player's frame.
const MUZZLE_OFFSET: Vec3 = Vec3::new(0.5, 1.5, 0.5);
/// Floating damage numbers appear this far above a hit bot's feet.
const HIT_ANNOTATION_OFFSET: Vec3 = Vec3::new(0.0, 2.2, 0.0);

const RIFLE_COLOR: [f32; 4] = [0.2, 0.4, 1.0, 1.0];
const SHOTGUN_COLOR: [f32; 4] = [1.0, 0.55, 0.0, 1.0];

/// Weapon types the progression hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponType {
    /// Single accurate round.
    AssaultRifle,
    /// Six-pellet spread.
    TacticalShotgun,
}

/// Per-shot numbers for a weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    pub weapon_type: WeaponType,
    pub pellets: u32,
    /// Max jitter added to the view direction's x and y per pellet.
    pub spread: f32,
    pub damage: f32,
    pub color: [f32; 4],
}

impl WeaponProfile {
    pub const ASSAULT_RIFLE: Self = Self {
        weapon_type: WeaponType::AssaultRifle,
        pellets: 1,
        spread: 0.0,
        damage: 35.0,
        color: RIFLE_COLOR,
    };

    pub const TACTICAL_SHOTGUN: Self = Self {
        weapon_type: WeaponType::TacticalShotgun,
        pellets: 6,
        spread: 0.15,
        damage: 15.0,
        color: SHOTGUN_COLOR,
    };

    /// Tier 1 carries the shotgun, every other tier the rifle.
    pub fn for_tier(tier: u8) -> Self {
        match tier {
            1 => Self::TACTICAL_SHOTGUN,
            _ => Self::ASSAULT_RIFLE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.weapon_type {
            WeaponType::AssaultRifle => "Assault Rifle",
            WeaponType::TacticalShotgun => "Tactical Shotgun",
        }
    }
}

/// Who fired a projectile. Bots never shoot today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u64,
    pub position: Vec3,
    /// Already scaled by [`PROJECTILE_SPEED`].
    pub velocity: Vec3,
    pub owner: ProjectileOwner,
    pub spawned_at: Duration,
    pub damage: f32,
    pub color: [f32; 4],
}

/// Floating damage number.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageAnnotation {
    pub id: u64,
    pub position: Vec3,
    pub amount: f32,
    pub critical: bool,
    pub created_at: Duration,
}

/// Live projectiles and damage annotations.
#[derive(Debug, Default)]
pub struct CombatSystem {
    projectiles: Vec<Projectile>,
    annotations: Vec<DamageAnnotation>,
    next_projectile_id: u64,
    next_annotation_id: u64,
}

impl CombatSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn annotations(&self) -> &[DamageAnnotation] {
        &self.annotations
    }

    /// Fire one trigger pull: one projectile per pellet, aimed from the muzzle
    /// at whatever the camera ray (jittered per pellet) hits first.
    /// Returns the number of projectiles spawned.
    pub fn fire<R: Rng + ?Sized>(
        &mut self,
        profile: &WeaponProfile,
        shooter: &Pose,
        camera: &CameraView,
        scene: &dyn SceneQuery,
        rng: &mut R,
        now: Duration,
    ) -> usize {
        let muzzle = shooter.local_to_world(MUZZLE_OFFSET);
        let view = camera.direction();

        for _ in 0..profile.pellets {
            let mut dir = view;
            if profile.spread > 0.0 {
                dir.x += (rng.gen::<f32>() - 0.5) * profile.spread;
                dir.y += (rng.gen::<f32>() - 0.5) * profile.spread;
            }
            let dir = dir.normalize_or_zero();
            let target = scene
                .cast_ray(camera.position, dir, MAX_RANGE)
                .unwrap_or(camera.position + dir * MAX_RANGE);
            let heading = (target - muzzle).normalize_or_zero();

            let id = self.next_projectile_id;
            self.next_projectile_id += 1;
            self.projectiles.push(Projectile {
                id,
                position: muzzle,
                velocity: heading * PROJECTILE_SPEED,
                owner: ProjectileOwner::Player,
                spawned_at: now,
                damage: profile.damage,
                color: profile.color,
            });
        }
        log::trace!("{} fired {} pellet(s)", profile.name(), profile.pellets);
        profile.pellets as usize
    }

    /// Advance projectiles and resolve hits against `enemies`. A projectile
    /// retires on its first hit (earliest bot in list order) or once it
    /// reaches [`PROJECTILE_TTL`]. Dead bots are not swept here.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, now: Duration, enemies: &mut [Enemy], rng: &mut R) {
        let mut hits = Vec::new();
        self.projectiles.retain_mut(|p| {
            p.position += p.velocity * dt;

            let target = enemies
                .iter_mut()
                .find(|e| !e.is_dead() && e.torso().distance(p.position) < HIT_RADIUS);
            if let Some(enemy) = target {
                let critical = rng.gen::<f32>() > CRIT_THRESHOLD;
                let amount = if critical { p.damage * CRIT_MULTIPLIER } else { p.damage };
                enemy.health.take_damage(amount);
                log::trace!(
                    "Projectile #{} hit {} for {}{}",
                    p.id,
                    enemy.name,
                    amount,
                    if critical { " (crit)" } else { "" }
                );
                hits.push((enemy.position + HIT_ANNOTATION_OFFSET, amount, critical));
                return false;
            }

            now.saturating_sub(p.spawned_at) < PROJECTILE_TTL
        });

        for (position, amount, critical) in hits {
            self.annotate(position, amount, critical, now);
        }
    }

    /// Spawn a damage number.
    pub fn annotate(&mut self, position: Vec3, amount: f32, critical: bool, now: Duration) {
        let id = self.next_annotation_id;
        self.next_annotation_id += 1;
        self.annotations.push(DamageAnnotation { id, position, amount, critical, created_at: now });
    }

    /// Drop annotations older than [`ANNOTATION_LIFETIME`].
    pub fn expire_annotations(&mut self, now: Duration) {
        self.annotations
            .retain(|a| now.saturating_sub(a.created_at) <= ANNOTATION_LIFETIME);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    /// Scene with nothing in it.
    struct Empty;

    impl SceneQuery for Empty {
        fn cast_ray(&self, _: Vec3, _: Vec3, _: f32) -> Option<Vec3> {
            None
        }
    }

    /// Scene where every ray stops at a fixed point.
    struct Fixed(Vec3);

    impl SceneQuery for Fixed {
        fn cast_ray(&self, _: Vec3, _: Vec3, _: f32) -> Option<Vec3> {
            Some(self.0)
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn tiers_map_to_profiles() {
        assert_eq!(WeaponProfile::for_tier(0), WeaponProfile::ASSAULT_RIFLE);
        assert_eq!(WeaponProfile::for_tier(1), WeaponProfile::TACTICAL_SHOTGUN);
        assert_eq!(WeaponProfile::for_tier(2), WeaponProfile::ASSAULT_RIFLE);
        assert_eq!(WeaponProfile::for_tier(3), WeaponProfile::ASSAULT_RIFLE);
    }

    #[test]
    fn rifle_fires_one_projectile() {
        let mut combat = CombatSystem::new();
        let camera = CameraView::new(Vec3::new(0.0, 2.0, 4.5), 0.0, 0.0);
        let n = combat.fire(&WeaponProfile::ASSAULT_RIFLE, &Pose::default(), &camera, &Empty, &mut rng(), Duration::ZERO);
        assert_eq!(n, 1);
        assert_eq!(combat.projectiles().len(), 1);
        let p = &combat.projectiles()[0];
        assert_eq!(p.damage, 35.0);
        assert!((p.velocity.length() - PROJECTILE_SPEED).abs() < 1e-3);
    }

    #[test]
    fn shotgun_fires_six_pellets() {
        let mut combat = CombatSystem::new();
        let camera = CameraView::new(Vec3::new(0.0, 2.0, 4.5), 0.0, 0.0);
        combat.fire(&WeaponProfile::TACTICAL_SHOTGUN, &Pose::default(), &camera, &Empty, &mut rng(), Duration::ZERO);
        assert_eq!(combat.projectiles().len(), 6);
        assert!(combat.projectiles().iter().all(|p| p.damage == 15.0));
    }

    #[test]
    fn projectiles_aim_at_the_ray_hit() {
        let mut combat = CombatSystem::new();
        let target = Vec3::new(3.0, 1.0, -20.0);
        let pose = Pose::new(Vec3::new(1.0, 0.0, 1.0), 0.7);
        combat.fire(&WeaponProfile::ASSAULT_RIFLE, &pose, &CameraView::default(), &Fixed(target), &mut rng(), Duration::ZERO);
        let p = &combat.projectiles()[0];
        let muzzle = pose.local_to_world(MUZZLE_OFFSET);
        assert_eq!(p.position, muzzle);
        let expected = (target - muzzle).normalize() * PROJECTILE_SPEED;
        assert!((p.velocity - expected).length() < 1e-3);
    }

    #[test]
    fn projectile_retires_after_ttl() {
        let mut combat = CombatSystem::new();
        combat.fire(&WeaponProfile::ASSAULT_RIFLE, &Pose::default(), &CameraView::default(), &Empty, &mut rng(), Duration::ZERO);
        let mut r = rng();
        combat.update(0.5, Duration::from_millis(1900), &mut [], &mut r);
        assert_eq!(combat.projectiles().len(), 1);
        combat.update(0.1, Duration::from_millis(2000), &mut [], &mut r);
        assert!(combat.projectiles().is_empty());
    }

    fn projectile_at(position: Vec3, damage: f32) -> Projectile {
        Projectile {
            id: 0,
            position,
            velocity: Vec3::ZERO,
            owner: ProjectileOwner::Player,
            spawned_at: Duration::ZERO,
            damage,
            color: RIFLE_COLOR,
        }
    }

    #[test]
    fn hit_damages_first_enemy_and_retires() {
        let mut combat = CombatSystem::new();
        let mut enemies = vec![
            Enemy::new(0, "a", Vec3::ZERO),
            Enemy::new(1, "b", Vec3::new(0.3, 0.0, 0.0)),
        ];
        combat.projectiles.push(projectile_at(Vec3::new(0.1, 1.2, 0.0), 35.0));
        combat.update(0.016, Duration::from_millis(16), &mut enemies, &mut rng());

        assert!(combat.projectiles().is_empty());
        let dealt = 100.0 - enemies[0].health.current;
        assert!(dealt == 35.0 || dealt == 70.0, "{dealt}");
        assert_eq!(enemies[1].health.current, 100.0);

        let note = &combat.annotations()[0];
        assert_eq!(note.amount, dealt);
        assert_eq!(note.critical, dealt == 70.0);
        assert_eq!(note.position, Vec3::new(0.0, 2.2, 0.0));
    }

    #[test]
    fn dead_enemies_are_not_hit_again() {
        let mut combat = CombatSystem::new();
        let mut enemies = vec![Enemy::new(0, "a", Vec3::ZERO), Enemy::new(1, "b", Vec3::ZERO)];
        enemies[0].health.take_damage(100.0);
        combat.projectiles.push(projectile_at(Vec3::new(0.0, 1.2, 0.0), 10.0));
        combat.update(0.016, Duration::ZERO, &mut enemies, &mut rng());
        assert_eq!(enemies[0].health.current, 0.0);
        assert!(enemies[1].health.current < 100.0);
    }

    #[test]
    fn health_never_increases() {
        let mut combat = CombatSystem::new();
        let mut enemies = vec![Enemy::new(0, "a", Vec3::ZERO)];
        let mut r = rng();
        let mut last = enemies[0].health.current;
        for i in 0..10 {
            combat.projectiles.push(projectile_at(Vec3::new(0.0, 1.2, 0.0), 15.0));
            combat.update(0.016, Duration::from_millis(i * 16), &mut enemies, &mut r);
            assert!(enemies[0].health.current <= last);
            last = enemies[0].health.current;
        }
    }

    #[test]
    fn annotations_expire_after_a_second() {
        let mut combat = CombatSystem::new();
        combat.annotate(Vec3::ZERO, 35.0, false, Duration::ZERO);
        combat.expire_annotations(Duration::from_millis(1000));
        assert_eq!(combat.annotations().len(), 1);
        combat.expire_annotations(Duration::from_millis(1001));
        assert!(combat.annotations().is_empty());
    }
}
