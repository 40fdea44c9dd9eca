//! Headless arena driver: plays one scripted match at a fixed 60 Hz step.

use anyhow::{bail, Result};
use arena::camera::ChaseCamera;
use arena::config::GameConfig;
use arena::scene::CameraView;
use arena::state::ArenaEvent;
use arena::Arena;
use engine_core::{flatten, planar_distance, Time, Vec3};
use input::{Action, ElementState, KeyCode, MouseButton};

/// Stop walking once this close to the target bot.
const CLOSE_IN_DISTANCE: f32 = 8.0;
/// Frames between trigger pulls while engaging.
const FIRE_INTERVAL: u32 = 15;

/// What the scripted player is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    /// Falling from the spawn point.
    Landing,
    /// Turn away from the nearest bot and wall off the rear.
    Fortify,
    /// Face the nearest bot, close in and shoot.
    Engage,
}

fn tap(arena: &mut Arena, key: KeyCode) {
    arena.handle_key(key, ElementState::Pressed);
    arena.handle_key(key, ElementState::Released);
}

fn click(arena: &mut Arena) {
    arena.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
    arena.handle_mouse_button(MouseButton::Left, ElementState::Released);
}

/// Feet and torso of the bot closest to the player.
fn nearest_bot(arena: &Arena) -> Option<(Vec3, Vec3)> {
    let snap = arena.snapshot();
    let player = snap.player.position;
    snap.enemies
        .iter()
        .min_by(|a, b| {
            planar_distance(a.position, player).total_cmp(&planar_distance(b.position, player))
        })
        .map(|e| (e.position, e.torso()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load();
    let controls = config.controls.clone();
    let mut arena = Arena::from_config(&config);
    let mut camera = ChaseCamera::new(config.sensitivity);
    let mut time = Time::new();
    let dt = time.fixed_timestep_seconds();

    arena.start_next_match(config.default_mode);
    camera.snap_to(arena.snapshot().player.position);

    let mut script = Script::Landing;
    let mut frames_in_step = 0u32;
    let mut won = None;

    for frame in 0..config.demo_frame_budget {
        time.advance_fixed();
        let (player, grounded) = {
            let snap = arena.snapshot();
            (snap.player.position, snap.player.grounded)
        };

        match script {
            Script::Landing => {
                if grounded {
                    log::info!("Landed at ({:.1}, {:.1}, {:.1})", player.x, player.y, player.z);
                    script = Script::Fortify;
                    frames_in_step = 0;
                }
            }
            Script::Fortify => {
                if let Some((bot, _)) = nearest_bot(&arena) {
                    let away = flatten(player - bot).normalize_or_zero();
                    let view = CameraView::looking_at(camera.position, camera.position + away);
                    camera.set_orientation(view.yaw, 0.0);
                }
                match frames_in_step {
                    // One step forward to turn the player around.
                    0 => arena.handle_key(controls.key_for(Action::Forward), ElementState::Pressed),
                    1 => arena.handle_key(controls.key_for(Action::Forward), ElementState::Released),
                    2 => {
                        tap(&mut arena, controls.key_for(Action::BuildWall));
                        click(&mut arena);
                        tap(&mut arena, controls.key_for(Action::ToggleBuild));
                    }
                    _ => script = Script::Engage,
                }
                frames_in_step += 1;
            }
            Script::Engage => {
                let Some((bot, torso)) = nearest_bot(&arena) else {
                    bail!("no bots left but the match is still running");
                };
                let view = CameraView::looking_at(camera.position, torso);
                camera.set_orientation(view.yaw, view.pitch);

                let forward = controls.key_for(Action::Forward);
                let state = if planar_distance(player, bot) > CLOSE_IN_DISTANCE {
                    ElementState::Pressed
                } else {
                    ElementState::Released
                };
                arena.handle_key(forward, state);

                if frames_in_step % FIRE_INTERVAL == 0 {
                    click(&mut arena);
                }
                frames_in_step += 1;
            }
        }

        let look = arena.take_look_delta();
        camera.process_mouse(look.x, look.y);
        camera.follow(player, arena.is_aiming(), dt);
        arena.tick(dt, &camera.view());

        for event in arena.drain_events() {
            match event {
                ArenaEvent::EnemyEliminated { id, name } => {
                    log::info!("Kill feed: {} (bot #{}) eliminated", name, id);
                }
                ArenaEvent::MatchEnded { won: result } => won = Some(result),
            }
        }

        if frame % 60 == 0 {
            log::info!("{}", arena.snapshot().status_line());
        }
        if arena.phase().is_over() {
            break;
        }
    }

    let snap = arena.snapshot();
    match won {
        Some(true) => log::info!(
            "Match won in {:.1}s: {} kill(s), {} structure(s), {} win(s)",
            arena.clock().elapsed_seconds(),
            snap.vitals.kills,
            snap.structures.len(),
            snap.wins
        ),
        Some(false) => log::info!("Match lost"),
        None => log::warn!(
            "Frame budget of {} exhausted with {} bot(s) left",
            config.demo_frame_budget,
            snap.live_enemies()
        ),
    }
    log::info!("Driver ran {} frame(s)", time.frame_count());
    Ok(())
}
