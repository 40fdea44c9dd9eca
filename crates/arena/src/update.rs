//! Per-frame simulation step.
//!
//! Order within a tick: locomotion, build preview, queued commands, airstrike,
//! projectiles, dead-bot sweep, bot movement, annotation expiry, victory check.

use std::time::Duration;

use input::{Action, Command};

use crate::bot;
use crate::building::{BuildType, STRUCTURE_COST};
use crate::scene::CameraView;
use crate::state::{ArenaEvent, GamePhase};
use crate::weapons::WeaponProfile;
use crate::Arena;

/// Run one frame. Called from [`Arena::tick`].
pub fn tick(arena: &mut Arena, dt: f32, camera: &CameraView) {
    if arena.phase != GamePhase::Playing {
        return;
    }
    arena.time.advance_seconds(dt);
    let dt = arena.time.delta_seconds();
    let now = arena.time.elapsed();

    let intent = arena.input.move_intent(&arena.controls);
    arena.player.update(intent, camera.direction(), dt, arena.build.structures());

    arena.build.update_preview(&arena.player.pose());

    for command in arena.input.drain_commands() {
        apply_command(arena, command, camera, now);
    }

    if arena.airstrike.is_active() {
        arena
            .airstrike
            .update(now, &mut arena.enemies, &mut arena.combat, &mut arena.rng);
    }

    arena.combat.update(dt, now, &mut arena.enemies, &mut arena.rng);

    for dead in bot::sweep_dead(&mut arena.enemies) {
        arena.vitals.kills += 1;
        log::info!("Eliminated {} ({} left)", dead.name, arena.enemies.len());
        arena.events.push(ArenaEvent::EnemyEliminated { id: dead.id, name: dead.name });
    }

    bot::update_enemies(&mut arena.enemies, arena.player.position, dt);

    arena.combat.expire_annotations(now);

    if arena.enemies.is_empty() {
        arena.phase = GamePhase::Victory;
        arena.progression.record_win();
        arena.input.set_accepting_commands(false);
        arena.events.push(ArenaEvent::MatchEnded { won: true });
        log::info!(
            "Victory! {} kill(s), {} win(s) total",
            arena.vitals.kills,
            arena.progression.wins
        );
    }
}

fn apply_command(arena: &mut Arena, command: Command, camera: &CameraView, now: Duration) {
    match command {
        Command::Primary => primary(arena, camera, now),
        Command::Action(Action::BuildWall) => select(arena, BuildType::Wall),
        Command::Action(Action::BuildFloor) => select(arena, BuildType::Floor),
        Command::Action(Action::BuildRamp) => select(arena, BuildType::Ramp),
        Command::Action(Action::ToggleBuild) => {
            arena.build.toggle();
            arena.build.update_preview(&arena.player.pose());
        }
        Command::Action(Action::Ability) => {
            if !arena.airstrike.activate(arena.progression.airstrike_unlocked(), now) {
                log::debug!("Airstrike unavailable");
            }
        }
        Command::Action(Action::EditBuilding) => {
            log::debug!("Structure edit requested; editing is not supported");
        }
        Command::Action(action) => {
            log::trace!("Ignoring queued continuous action {:?}", action);
        }
    }
}

fn select(arena: &mut Arena, build_type: BuildType) {
    arena.build.select(build_type);
    arena.build.update_preview(&arena.player.pose());
}

/// Place in build mode, fire otherwise. Never both.
fn primary(arena: &mut Arena, camera: &CameraView, now: Duration) {
    if arena.build.is_building() {
        if arena.build.place_at_preview().is_some() {
            arena.vitals.spend_materials(STRUCTURE_COST);
        }
        return;
    }

    arena.scene.sync(arena.build.structures(), &arena.enemies);
    let profile = WeaponProfile::for_tier(arena.vitals.weapon_tier);
    arena.vitals.spend_ammo();
    arena.combat.fire(
        &profile,
        &arena.player.pose(),
        camera,
        &arena.scene,
        &mut arena.rng,
        now,
    );
}
