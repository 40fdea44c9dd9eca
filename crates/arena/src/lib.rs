//! Build-battle arena simulation.
//!
//! [`Arena`] owns every piece of match state. Input handlers only write the
//! held-key set and the command queue; [`Arena::tick`] is the one place that
//! moves the simulation forward.

pub mod airstrike;
pub mod bot;
pub mod building;
pub mod camera;
pub mod config;
mod events;
pub mod hud;
pub mod player;
pub mod scene;
pub mod state;
mod update;
pub mod weapons;

use engine_core::Time;
use input::{ControlScheme, InputState};
use rand::rngs::StdRng;
use rand::SeedableRng;

use airstrike::Airstrike;
use bot::Enemy;
use building::BuildSystem;
use config::GameConfig;
use hud::ArenaSnapshot;
use player::{PlayerState, PlayerVitals};
use scene::{CameraView, SceneMirror};
use state::{ArenaEvent, GamePhase, MatchMode, Progression};
use weapons::CombatSystem;

/// The simulation context. Owned by the driver.
pub struct Arena {
    pub(crate) phase: GamePhase,
    pub(crate) mode: MatchMode,
    pub(crate) progression: Progression,
    /// Advanced only by playing ticks, so every timestamp freezes while paused.
    pub(crate) time: Time,
    pub(crate) input: InputState,
    pub(crate) controls: ControlScheme,
    pub(crate) player: PlayerState,
    pub(crate) vitals: PlayerVitals,
    pub(crate) build: BuildSystem,
    pub(crate) combat: CombatSystem,
    pub(crate) enemies: Vec<Enemy>,
    pub(crate) airstrike: Airstrike,
    pub(crate) scene: SceneMirror,
    pub(crate) rng: StdRng,
    pub(crate) events: Vec<ArenaEvent>,
}

impl Arena {
    /// Idle arena. `seed` fixes every random roll; `None` seeds from entropy.
    pub fn new(controls: ControlScheme, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            phase: GamePhase::Idle,
            mode: MatchMode::OneVsOne,
            progression: Progression::default(),
            time: Time::new(),
            input: InputState::new(),
            controls,
            player: PlayerState::spawn(),
            vitals: PlayerVitals::default(),
            build: BuildSystem::new(),
            combat: CombatSystem::new(),
            enemies: Vec::new(),
            airstrike: Airstrike::new(),
            scene: SceneMirror::new(),
            rng,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.controls.clone(), config.rng_seed)
    }

    /// Reset all match state, spawn the roster and start playing.
    pub fn start_match(&mut self, mode: MatchMode, weapon_tier: u8) {
        self.mode = mode;
        self.time.reset();
        self.player = PlayerState::spawn();
        self.vitals = PlayerVitals::new(weapon_tier);
        self.build.reset();
        self.combat.reset();
        self.airstrike.reset();
        self.scene.reset();
        self.enemies = bot::spawn_roster(mode, &mut self.rng);
        self.events.clear();
        self.input.clear();
        self.input.set_accepting_commands(true);
        self.phase = GamePhase::Playing;
        log::info!(
            "Match started: {} with {} bot(s), weapon tier {}",
            mode.label(),
            self.enemies.len(),
            weapon_tier
        );
    }

    /// Start a match at the tier the current win count earns.
    pub fn start_next_match(&mut self, mode: MatchMode) {
        self.start_match(mode, self.progression.weapon_tier());
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.input.set_accepting_commands(false);
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.input.set_accepting_commands(true);
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Back to the lobby. Match state stays readable until the next start.
    pub fn leave_match(&mut self) {
        self.phase = GamePhase::Idle;
        self.input.clear();
        self.input.set_accepting_commands(false);
        log::info!("Left match");
    }

    /// Advance one frame. Does nothing unless a match is playing.
    pub fn tick(&mut self, dt: f32, camera: &CameraView) {
        update::tick(self, dt, camera);
    }

    /// Take the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<ArenaEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> ArenaSnapshot<'_> {
        ArenaSnapshot {
            phase: self.phase,
            mode: self.mode,
            wins: self.progression.wins,
            player: &self.player,
            vitals: &self.vitals,
            enemies: &self.enemies,
            build_mode: self.build.mode(),
            preview: self.build.preview(),
            structures: self.build.structures(),
            projectiles: self.combat.projectiles(),
            annotations: self.combat.annotations(),
            airstrike_active: self.airstrike.is_active(),
            airstrike_unlocked: self.progression.airstrike_unlocked(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    /// Overwrite the win count (lobby menus, tests).
    pub fn set_wins(&mut self, wins: u32) {
        self.progression = Progression::new(wins);
    }

    pub fn controls(&self) -> &ControlScheme {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlScheme {
        &mut self.controls
    }

    /// Simulated time of the current match.
    pub fn clock(&self) -> &Time {
        &self.time
    }
}
