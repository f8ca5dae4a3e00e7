//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use riot_core::commands::{MovementKeys, PlayerCommand};
use riot_core::components::{Body, Grenade, Health, PlayerState};
use riot_core::constants::{FRAME_MS, JUMP_FORCE, PLAYER_ATTACK_COOLDOWN_MS, RADIO_COOLDOWN_MS};
use riot_core::enums::{GamePhase, WeaponKind};
use riot_core::events::GameEvent;
use riot_core::state::GameStateSnapshot;
use riot_core::stats::player_melee_profile;
use riot_core::types::{cooldown_elapsed, Position, SimTime};
use riot_core::venue::{ConfigError, MissionConfig};

use crate::mission::MissionState;
use crate::scoring::ScoreState;
use crate::systems::effects::EffectLog;
use crate::systems::snapshot::SnapshotSource;
use crate::systems::{self, Frame};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Clock step used by `tick()`.
    pub frame_ms: f64,
    /// Venue table and riot causes.
    pub mission: MissionConfig,
    /// Fixed riot cause for every mission. Drawn at random when unset.
    pub cause_index: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_ms: FRAME_MS,
            mission: MissionConfig::default(),
            cause_index: None,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    frame_ms: f64,
    rng: ChaCha8Rng,
    config: MissionConfig,
    cause_index: Option<usize>,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,

    player: Option<Entity>,
    mission: Option<MissionState>,
    score: ScoreState,
    effects: EffectLog,
    grenades: Vec<Grenade>,
    /// Player melee swings queued by commands, resolved after projectiles.
    pending_melee: Vec<WeaponKind>,
    keys: MovementKeys,
    cursor: Position,
    camera_x: f64,
}

impl SimulationEngine {
    /// Create an engine, validating the mission config first.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.mission.validate()?;
        if let Some(index) = config.cause_index {
            let count = config.mission.causes.len();
            if index >= count {
                return Err(ConfigError::UnknownCause { index, count });
            }
        }
        Ok(Self::build(config))
    }

    /// Create an engine. An invalid mission config is replaced by the
    /// built-in venue table.
    pub fn new(config: SimConfig) -> Self {
        match Self::try_new(config.clone()) {
            Ok(engine) => engine,
            Err(err) => {
                warn!("{err}; falling back to the built-in mission config");
                Self::build(SimConfig {
                    mission: MissionConfig::default(),
                    cause_index: None,
                    ..config
                })
            }
        }
    }

    fn build(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            frame_ms: config.frame_ms,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: config.mission,
            cause_index: config.cause_index,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            player: None,
            mission: None,
            score: ScoreState::default(),
            effects: EffectLog::default(),
            grenades: Vec::new(),
            pending_melee: Vec::new(),
            keys: MovementKeys::default(),
            cursor: Position::default(),
            camera_x: 0.0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame on the internal clock and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let dt = self.frame_ms;
        self.step(|time| time.advance(dt))
    }

    /// Advance one frame to a host-supplied timestamp. Timestamps that go
    /// backwards leave the clock where it is.
    pub fn tick_at(&mut self, now_ms: f64) -> GameStateSnapshot {
        self.step(|time| time.advance_to(now_ms))
    }

    fn step(&mut self, advance: impl FnOnce(&mut SimTime)) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            advance(&mut self.time);
            self.run_systems();
        }

        self.snapshot()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<Entity> {
        self.player
    }

    pub fn mission(&self) -> Option<&MissionState> {
        self.mission.as_ref()
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn camera_x(&self) -> f64 {
        self.camera_x
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn grenades_mut(&mut self) -> &mut Vec<Grenade> {
        &mut self.grenades
    }

    #[cfg(test)]
    pub fn effects(&self) -> &EffectLog {
        &self.effects
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Gameplay commands are ignored unless
    /// a mission is running.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMission => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::MissionEnded) {
                    self.start_mission();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetMovement { keys } => {
                self.keys = keys;
                if keys.left != keys.right {
                    let facing = if keys.right { 1.0 } else { -1.0 };
                    self.with_player_state(|state| state.facing = facing);
                }
            }
            PlayerCommand::SetCursor { x, y } => {
                self.cursor = Position::new(x, y);
                self.face_cursor();
            }
            _ if self.phase != GamePhase::Active => {}
            PlayerCommand::Shoot => self.player_attack(),
            PlayerCommand::Jump => self.player_jump(),
            PlayerCommand::ThrowGrenade => self.player_throw_grenade(),
            PlayerCommand::UseMedkit => {
                if let Some(player) = self.player {
                    systems::healing::use_medkit(&mut self.world, player, &mut self.effects);
                }
            }
            PlayerCommand::CycleWeapon => self.with_player_state(|state| {
                state.current_weapon = (state.current_weapon + 1) % state.inventory.len().max(1);
            }),
            PlayerCommand::ToggleShield => {
                self.with_player_state(|state| state.shield_active = !state.shield_active)
            }
            PlayerCommand::UseRadio => self.use_radio(),
            PlayerCommand::EnterTransport => {
                if let (Some(player), Some(mission)) = (self.player, self.mission.as_mut()) {
                    mission.enter_transport(&mut self.world, player, &mut self.events);
                }
            }
            PlayerCommand::ExitTransport => {
                if let (Some(player), Some(mission)) = (self.player, self.mission.as_mut()) {
                    mission.exit_transport(&mut self.world, player, &mut self.events);
                }
            }
            PlayerCommand::Deploy => {
                if let (Some(player), Some(mission)) = (self.player, self.mission.as_mut()) {
                    mission.deploy(&mut self.world, player, &mut self.rng, &mut self.events);
                }
            }
            PlayerCommand::AcknowledgeBriefing => {
                if let Some(mission) = self.mission.as_mut() {
                    mission.acknowledge_briefing(&mut self.events);
                }
            }
        }
    }

    /// Pick a riot cause, build the world and go live.
    fn start_mission(&mut self) {
        let count = self.config.causes.len();
        if count == 0 {
            warn!("cannot start a mission without riot causes");
            return;
        }
        let index = self
            .cause_index
            .filter(|&i| i < count)
            .unwrap_or_else(|| self.rng.gen_range(0..count));
        let cause = self.config.causes[index].clone();
        let Some(venue) = self.config.venue(&cause.venue).copied() else {
            warn!("riot cause '{}' has no venue '{}'", cause.title, cause.venue);
            return;
        };

        let player = world_setup::setup_mission(&mut self.world, &mut self.rng, &venue);
        let mission = MissionState::new(cause, venue, self.time.elapsed_ms);
        info!("mission started: {} at {}", mission.cause.title, mission.cause.venue);

        self.camera_x = systems::movement::follow_camera(venue.boundaries.left, &mission, venue.start_x);
        self.player = Some(player);
        self.mission = Some(mission);
        self.score = ScoreState::default();
        self.effects.clear();
        self.grenades.clear();
        self.pending_melee.clear();
        self.keys = MovementKeys::default();
        self.phase = GamePhase::Active;
    }

    fn with_player_state(&mut self, f: impl FnOnce(&mut PlayerState)) {
        if let Some(player) = self.player {
            if let Ok(mut state) = self.world.get::<&mut PlayerState>(player) {
                f(&mut state);
            }
        }
    }

    fn player_body(&self) -> Option<Body> {
        let player = self.player?;
        self.world.get::<&Body>(player).ok().map(|body| *body)
    }

    fn seated(&self) -> bool {
        self.mission.as_ref().is_some_and(|m| m.in_transport())
    }

    /// Face the cursor, which is given in screen space.
    fn face_cursor(&mut self) {
        let Some(body) = self.player_body() else {
            return;
        };
        let screen_x = body.center().x - self.camera_x;
        let facing = if self.cursor.x >= screen_x { 1.0 } else { -1.0 };
        self.with_player_state(|state| state.facing = facing);
    }

    /// Fire the SMG now, or queue a melee swing for later this frame.
    fn player_attack(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        if self.seated() {
            return;
        }
        let now = self.time.elapsed_ms;
        let weapon = match self.world.get::<&PlayerState>(player) {
            Ok(state) => state.weapon(),
            Err(_) => return,
        };

        if weapon.is_ranged() {
            systems::combat::fire_projectile(&mut self.world, player, now);
            return;
        }

        if let Ok(mut state) = self.world.get::<&mut PlayerState>(player) {
            if !cooldown_elapsed(state.last_attack_ms, now, PLAYER_ATTACK_COOLDOWN_MS) {
                return;
            }
            state.last_attack_ms = Some(now);
        }
        self.pending_melee.push(weapon);
    }

    fn player_jump(&mut self) {
        if self.seated() {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        if let Ok(mut body) = self.world.get::<&mut Body>(player) {
            if !body.is_jumping {
                body.velocity.y = JUMP_FORCE;
                body.is_jumping = true;
            }
        }
    }

    fn player_throw_grenade(&mut self) {
        if self.seated() {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        let Ok((body, state)) = self.world.query_one_mut::<(&Body, &mut PlayerState)>(player) else {
            return;
        };
        if state.grenades == 0 {
            return;
        }
        state.grenades -= 1;
        self.grenades
            .push(systems::grenades::throw(body.center(), state.facing));
    }

    /// Radio in a backup squad behind the player.
    fn use_radio(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let now = self.time.elapsed_ms;
        let ready = match self.world.get::<&mut PlayerState>(player) {
            Ok(mut state) if cooldown_elapsed(state.last_radio_ms, now, RADIO_COOLDOWN_MS) => {
                state.last_radio_ms = Some(now);
                true
            }
            _ => false,
        };
        if !ready {
            return;
        }
        let player_x = self.player_body().map(|b| b.position.x).unwrap_or_default();

        let officers = world_setup::call_backup(&mut self.world, &mut self.rng, player_x);
        info!("radio backup: {officers} officers arriving");
        self.events.push(GameEvent::Objective {
            text: "Backup units arriving!".to_string(),
        });
        self.events.push(GameEvent::BackupArrived {
            officers: officers as u32,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let (Some(player), Some(mission)) = (self.player, self.mission.as_mut()) else {
            return;
        };
        let now_ms = self.time.elapsed_ms;

        // Effects from the previous frame age first, so new ones show in full.
        self.effects.age();

        // 1. Briefing timer
        mission.update_briefing(now_ms, &mut self.events);

        // 2. Walking / driving, then the camera
        systems::movement::run(&mut self.world, mission, player, &self.keys);
        let player_x = self
            .world
            .get::<&Body>(player)
            .map(|body| body.position.x)
            .unwrap_or(self.camera_x);
        self.camera_x = systems::movement::follow_camera(self.camera_x, mission, player_x);

        let mut frame = Frame {
            rng: &mut self.rng,
            score: &mut self.score,
            effects: &mut self.effects,
            events: &mut self.events,
            player,
            now_ms,
            world_width: mission.venue.world_width,
        };

        // 3. AI
        systems::officer_ai::run(&mut self.world, &mut frame);
        systems::rioter_ai::run(&mut self.world, &mut frame);

        // 4. Projectiles, then grenades
        systems::projectiles::run(&mut self.world, &mut frame);
        systems::grenades::run(&mut self.world, &mut frame, &mut self.grenades);

        // 5. Queued player melee
        for weapon in std::mem::take(&mut self.pending_melee) {
            if let Some((range, damage)) = player_melee_profile(weapon) {
                systems::combat::apply_melee(&mut self.world, &mut frame, player, range, damage, weapon);
            }
        }

        // 6. Contact damage
        systems::combat::resolve_contact_damage(&mut self.world, &frame);

        // 7. Medic healing
        systems::healing::run(&mut self.world, &mut frame);

        // 8. Combo window
        frame.score.expire_combo(now_ms);

        // 9. Mission end
        let downed = self
            .world
            .get::<&Health>(player)
            .map(|health| health.is_depleted())
            .unwrap_or(false);
        if downed {
            self.end_mission();
        }
    }

    fn end_mission(&mut self) {
        if self.phase == GamePhase::MissionEnded {
            return;
        }
        self.phase = GamePhase::MissionEnded;
        info!("mission ended with score {}", self.score.score);
        self.events.push(GameEvent::MissionEnded {
            score: self.score.score,
            statistics: self.score.statistics,
        });
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let events = std::mem::take(&mut self.events);
        let source = SnapshotSource {
            time: self.time,
            phase: self.phase,
            player: self.player,
            mission: self.mission.as_ref(),
            score: &self.score,
            grenades: &self.grenades,
            effects: &self.effects,
            camera_x: self.camera_x,
        };
        systems::snapshot::build_snapshot(&self.world, &source, events)
    }
}
