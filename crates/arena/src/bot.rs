//! Bots: roster spawning and seek-and-hold movement.

use std::time::Duration;

use engine_core::{flatten, planar_distance, Health, Vec3};
use rand::Rng;

use crate::state::MatchMode;

pub const BOT_SPEED: f32 = 4.5;
/// Bots stop advancing once this close to the player (planar).
pub const ENGAGEMENT_RADIUS: f32 = 5.0;
/// Height of the torso center above a bot's feet, used for hit tests.
pub const TORSO_HEIGHT: f32 = 1.2;

pub const BOT_NAMES: [&str; 15] = [
    "FaZe_Bot",
    "Ninja_Clone",
    "NoobMaster69",
    "ProBuilder",
    "TTV_Sweat",
    "Bot_Anna",
    "Sniper_Wolf",
    "Galaxy_Skin",
    "TryHard_99",
    "Llama_Lover",
    "Victory_Royale",
    "Fishstick",
    "Jonesy",
    "Peely_Fan",
    "Dark_Knight",
];

const BOT_TINT: [f32; 4] = [0.9, 0.15, 0.15, 1.0];

/// A live bot. Removed from the match in the tick its health drops to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub name: String,
    /// Feet position.
    pub position: Vec3,
    /// Seek velocity of the last tick, zero while holding.
    pub velocity: Vec3,
    pub health: Health,
    /// Not read yet; bots have a single behavior.
    pub next_decision: Duration,
    /// Not read yet; bots never shoot back.
    pub last_shot: Duration,
    pub tint: [f32; 4],
}

impl Enemy {
    pub fn new(id: u32, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            velocity: Vec3::ZERO,
            health: Health::default(),
            next_decision: Duration::ZERO,
            last_shot: Duration::ZERO,
            tint: BOT_TINT,
        }
    }

    /// Center of the hit sphere.
    pub fn torso(&self) -> Vec3 {
        self.position + Vec3::Y * TORSO_HEIGHT
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Walk straight at `target` on the XZ plane until within engagement range.
    pub fn seek(&mut self, target: Vec3, dt: f32) {
        if planar_distance(self.position, target) > ENGAGEMENT_RADIUS {
            self.velocity = flatten(target - self.position).normalize_or_zero() * BOT_SPEED;
            self.position += self.velocity * dt;
        } else {
            self.velocity = Vec3::ZERO;
        }
    }
}

/// Spawn the bot batch for `mode`, scattered uniformly over its spawn box.
pub fn spawn_roster<R: Rng + ?Sized>(mode: MatchMode, rng: &mut R) -> Vec<Enemy> {
    let half = mode.spawn_box() / 2.0;
    (0..mode.bot_count())
        .map(|i| {
            let position = Vec3::new(rng.gen_range(-half..=half), 0.0, rng.gen_range(-half..=half));
            Enemy::new(i as u32, BOT_NAMES[i % BOT_NAMES.len()], position)
        })
        .collect()
}

/// Step every bot toward the player.
pub fn update_enemies(enemies: &mut [Enemy], player: Vec3, dt: f32) {
    for enemy in enemies.iter_mut() {
        enemy.seek(player, dt);
    }
}

/// Remove dead bots, returning them in list order.
pub fn sweep_dead(enemies: &mut Vec<Enemy>) -> Vec<Enemy> {
    let mut dead = Vec::new();
    enemies.retain(|e| {
        if e.is_dead() {
            dead.push(e.clone());
            false
        } else {
            true
        }
    });
    dead
}
