//! Tests for the simulation engine, combat systems, mission flow and scoring.

use hecs::{Entity, World};

use riot_core::commands::{MovementKeys, PlayerCommand};
use riot_core::components::{
    Body, Effect, Grenade, Health, Officer, PlayerState, Projectile, Projectiles, Rioter,
};
use riot_core::constants::*;
use riot_core::enums::*;
use riot_core::events::GameEvent;
use riot_core::types::{Position, Size, Velocity};
use riot_core::venue::{ConfigError, MissionConfig};

use crate::engine::{SimConfig, SimulationEngine};
use crate::scoring::ScoreState;
use crate::systems::effects::EffectLog;
use crate::systems::{combat, grenades, population};
use crate::world_setup;

// ---- Helpers ----

/// Engine with a running mission in the Downtown venue (start x 100).
fn started_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        cause_index: Some(0),
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartMission);
    engine.tick();
    engine
}

fn entities_with<T: hecs::Component>(world: &World) -> Vec<Entity> {
    world.query::<&T>().iter().map(|(e, _)| e).collect()
}

fn despawn_all<T: hecs::Component>(world: &mut World) {
    for entity in entities_with::<T>(world) {
        world.despawn(entity).unwrap();
    }
}

/// Engine with no rioters and no officers left on the field.
fn empty_field(seed: u64) -> SimulationEngine {
    let mut engine = started_engine(seed);
    despawn_all::<Rioter>(engine.world_mut());
    despawn_all::<Officer>(engine.world_mut());
    engine
}

fn player_of(engine: &SimulationEngine) -> Entity {
    engine.player().expect("mission should have a player")
}

fn player_health(engine: &SimulationEngine) -> f64 {
    engine
        .world()
        .get::<&Health>(player_of(engine))
        .unwrap()
        .current
}

fn move_player_to(engine: &mut SimulationEngine, x: f64) {
    let player = player_of(engine);
    let mut body = engine.world_mut().get::<&mut Body>(player).unwrap();
    body.position.x = x;
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartMission);
    engine_b.queue_command(PlayerCommand::StartMission);

    for i in 0..300 {
        if i == 10 {
            for engine in [&mut engine_a, &mut engine_b] {
                engine.queue_command(PlayerCommand::SetMovement {
                    keys: MovementKeys {
                        right: true,
                        ..Default::default()
                    },
                });
                engine.queue_command(PlayerCommand::UseRadio);
            }
        }
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = started_engine(111);
    let mut engine_b = started_engine(222);

    let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
    let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
    assert_ne!(json_a, json_b, "Different seeds should scatter the crowd differently");
}

// ---- Engine lifecycle ----

#[test]
fn test_start_mission_populates_world() {
    let engine = started_engine(1);
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(entities_with::<Officer>(engine.world()).len(), 20);
    assert_eq!(population::rioter_count(engine.world()), INITIAL_RIOTERS);
    assert!(!population::any_active(engine.world()), "Crowd starts dormant");

    let mission = engine.mission().unwrap();
    assert_eq!(mission.phase, MissionPhase::Briefing);
    assert_eq!(mission.cause.venue, "Downtown Business District");
    assert_eq!(mission.truck_position.x, 100.0);

    let world = engine.world();
    for (_, (_, body)) in world.query::<(&Rioter, &Body)>().iter() {
        assert!(body.position.x >= SPAWN_DISTANCE);
        assert!(body.position.x < SPAWN_DISTANCE + SPAWN_BAND_WIDTH);
    }
}

#[test]
fn test_menu_ignores_gameplay_commands() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::Shoot);
    engine.queue_command(PlayerCommand::UseRadio);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert_eq!(snap.time.tick, 0);
    assert!(snap.officers.is_empty());
}

#[test]
fn test_pause_and_resume() {
    let mut engine = started_engine(7);
    let before = engine.time();

    engine.queue_command(PlayerCommand::Pause);
    engine.tick();
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert_eq!(engine.time().tick, before.tick, "Clock must not move while paused");

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().tick, before.tick + 1);
}

#[test]
fn test_host_clock_never_goes_backwards() {
    let mut engine = started_engine(7);
    engine.tick_at(1_000.0);
    assert_eq!(engine.time().elapsed_ms, 1_000.0);
    engine.tick_at(500.0);
    assert_eq!(engine.time().elapsed_ms, 1_000.0, "Backwards timestamp ignored");
    engine.tick_at(1_250.0);
    assert_eq!(engine.time().elapsed_ms, 1_250.0);
}

#[test]
fn test_try_new_rejects_bad_config() {
    let result = SimulationEngine::try_new(SimConfig {
        cause_index: Some(9),
        ..Default::default()
    });
    assert!(matches!(
        result,
        Err(ConfigError::UnknownCause { index: 9, count: 3 })
    ));

    let mut mission = MissionConfig::default();
    mission.causes.clear();
    let result = SimulationEngine::try_new(SimConfig {
        mission: mission.clone(),
        ..Default::default()
    });
    assert!(matches!(result, Err(ConfigError::NoCauses)));

    // The infallible constructor falls back to the built-in table.
    let mut engine = SimulationEngine::new(SimConfig {
        mission,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartMission);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
}

// ---- Scenario: melee kill ----

#[test]
fn test_baton_kill_arrests_and_repopulates() {
    let mut engine = empty_field(3);
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 130.0, 1.0, false);
    engine.world_mut().get::<&mut Health>(rioter).unwrap().current = 10.0;

    engine.queue_command(PlayerCommand::CycleWeapon);
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick();

    assert!(!engine.world().contains(rioter), "Rioter should be removed");
    assert!(
        population::rioter_count(engine.world()) >= REPOPULATE_BATCH,
        "Crowd should be reinforced in the same step"
    );
    assert_eq!(engine.score().statistics.arrests_made, 1);
    assert_eq!(engine.score().score, 100);
    assert_eq!(snap.player.weapon, WeaponKind::Baton);
    assert!(snap.player.swinging, "Swing effect should be on screen");
    assert_eq!(engine.effects().count(EffectKind::MeleeSwing), 1);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::ScoreAwarded {
            kind: ScoreKind::RioterArrest,
            points: 100,
            ..
        }
    )));
}

#[test]
fn test_knife_kill_scores_defeat() {
    let mut engine = empty_field(3);
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 120.0, 1.0, false);
    engine.world_mut().get::<&mut Health>(rioter).unwrap().current = 50.0;

    engine.queue_command(PlayerCommand::CycleWeapon);
    engine.queue_command(PlayerCommand::CycleWeapon);
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick();

    assert!(!engine.world().contains(rioter));
    assert_eq!(engine.score().statistics.rioters_defeated, 1);
    assert_eq!(engine.score().statistics.arrests_made, 0);
    assert_eq!(engine.score().score, 50);
}

#[test]
fn test_melee_respects_rate_limit() {
    let mut engine = empty_field(3);
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 130.0, 1.0, false);

    engine.queue_command(PlayerCommand::CycleWeapon);
    engine.queue_command(PlayerCommand::Shoot);
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick();

    let health = engine.world().get::<&Health>(rioter).unwrap().current;
    assert_eq!(health, RIOTER_HEALTH - BATON_DAMAGE, "Second swing inside 200ms is dropped");
}

#[test]
fn test_melee_cooldown_counts_from_the_command() {
    let mut engine = empty_field(3);
    let player = player_of(&engine);
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 130.0, 1.0, false);
    let start = engine.time().elapsed_ms;

    engine.queue_command(PlayerCommand::CycleWeapon);
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick_at(start + 10.0);
    assert_eq!(
        engine.world().get::<&PlayerState>(player).unwrap().last_attack_ms,
        Some(start),
        "Swing is stamped once, with the time the command was taken"
    );

    engine.tick_at(start + PLAYER_ATTACK_COOLDOWN_MS);
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick_at(start + PLAYER_ATTACK_COOLDOWN_MS + 10.0);

    let health = engine.world().get::<&Health>(rioter).unwrap().current;
    assert_eq!(health, RIOTER_HEALTH - 2.0 * BATON_DAMAGE, "Swing at exactly 200ms lands");
}

// ---- Projectiles ----

#[test]
fn test_player_bullet_kills_and_scores() {
    let mut engine = empty_field(5);
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 140.0, 1.0, false);
    engine.world_mut().get::<&mut Health>(rioter).unwrap().current = 10.0;

    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick();
    assert_eq!(snap.projectiles.len(), 1);
    assert!(snap.projectiles[0].from_player);

    let snap = engine.tick();
    assert!(!engine.world().contains(rioter));
    assert!(snap.projectiles.is_empty(), "Bullet is spent on the hit");
    assert_eq!(engine.score().statistics.rioters_defeated, 1);
    assert_eq!(engine.score().score, 50);
}

#[test]
fn test_bullets_leave_the_world() {
    let mut engine = empty_field(5);
    let player = player_of(&engine);
    engine.queue_command(PlayerCommand::SetCursor { x: 0.0, y: 300.0 });
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick();
    assert_eq!(
        engine.world().get::<&PlayerState>(player).unwrap().facing,
        -1.0,
        "Cursor left of the player turns them around"
    );

    for _ in 0..20 {
        engine.tick();
    }
    let projectiles = engine.world().get::<&Projectiles>(player).unwrap();
    assert!(projectiles.0.is_empty(), "Bullet past x=0 should be dropped");
}

#[test]
fn test_bullets_leave_the_screen_vertically() {
    let mut engine = empty_field(5);
    let player = player_of(&engine);
    {
        let mut projectiles = engine.world_mut().get::<&mut Projectiles>(player).unwrap();
        projectiles.0.push(Projectile {
            position: Position::new(300.0, 5.0),
            velocity: Velocity::new(0.0, -BULLET_SPEED),
            damage: PLAYER_BULLET_DAMAGE,
        });
        projectiles.0.push(Projectile {
            position: Position::new(300.0, SCREEN_HEIGHT - 5.0),
            velocity: Velocity::new(0.0, BULLET_SPEED),
            damage: PLAYER_BULLET_DAMAGE,
        });
        projectiles.0.push(Projectile {
            position: Position::new(300.0, 300.0),
            velocity: Velocity::new(0.0, BULLET_SPEED),
            damage: PLAYER_BULLET_DAMAGE,
        });
    }

    engine.tick();
    let projectiles = engine.world().get::<&Projectiles>(player).unwrap();
    assert_eq!(projectiles.0.len(), 1, "Shots past the top and bottom edges are dropped");
    assert_eq!(projectiles.0[0].position.y, 300.0 + BULLET_SPEED);
}

#[test]
fn test_officer_holds_fire_without_active_rioter() {
    let mut engine = empty_field(9);
    world_setup::spawn_rioter(engine.world_mut(), 300.0, 1.0, false);
    let gunner = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 200.0, 2.0);

    let now = engine.time().elapsed_ms;
    assert!(!combat::fire_projectile(engine.world_mut(), gunner, now));
    let projectiles = engine.world().get::<&Projectiles>(gunner).unwrap();
    assert!(projectiles.0.is_empty());
}

#[test]
fn test_officer_aims_at_nearest_active_rioter() {
    let mut engine = empty_field(9);
    world_setup::spawn_rioter(engine.world_mut(), 100.0, 1.0, false);
    world_setup::spawn_rioter(engine.world_mut(), 500.0, 1.0, true);
    let gunner = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 300.0, 2.0);

    let now = engine.time().elapsed_ms;
    assert!(combat::fire_projectile(engine.world_mut(), gunner, now));
    let projectiles = engine.world().get::<&Projectiles>(gunner).unwrap();
    let shot = projectiles.0[0];
    assert!((shot.velocity.x - BULLET_SPEED).abs() < 1e-9, "Aimed right at the active rioter");
    assert!(shot.velocity.y.abs() < 1e-9);
    assert_eq!(shot.damage, OFFICER_BULLET_DAMAGE);
}

#[test]
fn test_officer_fire_respects_division_cooldown() {
    let mut engine = empty_field(9);
    world_setup::spawn_rioter(engine.world_mut(), 600.0, 1.0, true);
    let gunner = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 300.0, 2.0);
    let cooldown = Division::Gunner.stats().attack_cooldown_ms;

    let now = engine.time().elapsed_ms;
    assert!(combat::fire_projectile(engine.world_mut(), gunner, now));
    assert!(!combat::fire_projectile(engine.world_mut(), gunner, now + 1.0));
    assert!(!combat::fire_projectile(engine.world_mut(), gunner, now + cooldown - 1.0));
    assert_eq!(engine.world().get::<&Projectiles>(gunner).unwrap().0.len(), 1);

    assert!(combat::fire_projectile(engine.world_mut(), gunner, now + cooldown));
    assert_eq!(engine.world().get::<&Projectiles>(gunner).unwrap().0.len(), 2);
}

// ---- Grenades ----

#[test]
fn test_grenade_blast_three_rioters() {
    let mut engine = empty_field(11);
    let blast = Position::new(1000.0, GROUND_LEVEL - GRENADE_SIZE);
    let rioters: Vec<Entity> = [1045.0, 910.0, 1075.0]
        .into_iter()
        .map(|x| world_setup::spawn_rioter(engine.world_mut(), x, 1.0, false))
        .collect();

    engine.grenades_mut().push(Grenade {
        position: blast,
        velocity: Velocity::default(),
        size: Size::new(GRENADE_SIZE, GRENADE_SIZE),
        fuse_frames: 1,
    });
    engine.tick();

    assert!(engine.grenades_mut().is_empty(), "Grenade removed on detonation");
    assert_eq!(engine.effects().count(EffectKind::Explosion), 1);

    for rioter in rioters {
        let world = engine.world();
        let body = world.get::<&Body>(rioter).expect("No rioter should die");
        let d = blast.distance_to(&body.center());
        assert!((50.0..=100.0).contains(&d), "Rioter at distance {d}");
        let health = world.get::<&Health>(rioter).unwrap().current;
        let expected = RIOTER_HEALTH - grenades::falloff(d);
        assert!(
            (health - expected).abs() < 1e-9,
            "Expected {expected}, got {health}"
        );
    }
}

#[test]
fn test_grenade_falloff_shape() {
    assert_eq!(grenades::falloff(0.0), GRENADE_DAMAGE);
    assert_eq!(grenades::falloff(GRENADE_RADIUS), 0.0);
    assert_eq!(grenades::falloff(GRENADE_RADIUS + 1.0), 0.0);

    let mut last = f64::INFINITY;
    for step in 0..=120 {
        let dmg = grenades::falloff(step as f64);
        assert!(dmg <= last, "Falloff must not increase with distance");
        assert!(dmg >= 0.0);
        last = dmg;
    }
}

#[test]
fn test_grenade_bounces_off_the_ground() {
    let mut engine = empty_field(11);
    let floor = GROUND_LEVEL - GRENADE_SIZE;
    engine.grenades_mut().push(Grenade {
        position: Position::new(1000.0, floor),
        velocity: Velocity::new(4.0, 2.0),
        size: Size::new(GRENADE_SIZE, GRENADE_SIZE),
        fuse_frames: GRENADE_FUSE_FRAMES,
    });
    engine.tick();

    let grenade = engine.grenades_mut()[0];
    assert_eq!(grenade.position.y, floor, "Clamped to the floor");
    assert!((grenade.position.x - 1004.0).abs() < 1e-9);
    assert!((grenade.velocity.y - (2.0 + GRAVITY) * -0.5).abs() < 1e-9, "Bounces up at half speed");
    assert!((grenade.velocity.x - 4.0 * 0.7).abs() < 1e-9, "Loses speed to ground friction");
    assert_eq!(grenade.fuse_frames, GRENADE_FUSE_FRAMES - 1);
}

#[test]
fn test_throw_grenade_uses_stock() {
    let mut engine = empty_field(11);
    let player = player_of(&engine);
    for _ in 0..5 {
        engine.queue_command(PlayerCommand::ThrowGrenade);
    }
    let snap = engine.tick();
    assert_eq!(snap.grenades.len(), PLAYER_START_GRENADES as usize);
    assert_eq!(engine.world().get::<&PlayerState>(player).unwrap().grenades, 0);
    assert!(snap.grenades[0].velocity.x > 0.0, "Thrown the way the player faces");

    for _ in 0..GRENADE_FUSE_FRAMES {
        engine.tick();
    }
    assert!(engine.grenades_mut().is_empty());
}

// ---- Healing ----

#[test]
fn test_medic_heals_wounded_officer() {
    let mut engine = empty_field(13);
    let medic = world_setup::spawn_officer(engine.world_mut(), Division::Medic, 500.0, 2.0);
    let gunner = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 550.0, 2.0);
    *engine.world_mut().get::<&mut Health>(gunner).unwrap() = Health::new(50.0, 200.0);

    engine.tick();

    let world = engine.world();
    assert_eq!(world.get::<&Health>(gunner).unwrap().current, 80.0);
    assert_eq!(
        world.get::<&Officer>(medic).unwrap().last_heal_ms,
        Some(engine.time().elapsed_ms),
        "Heal cooldown should restart"
    );
    assert_eq!(engine.effects().count(EffectKind::Heal), 1);

    // Cooldown holds for the next few frames.
    engine.tick();
    assert_eq!(engine.world().get::<&Health>(gunner).unwrap().current, 80.0);
}

#[test]
fn test_medic_save_scores_officer_saved() {
    let mut engine = empty_field(13);
    world_setup::spawn_officer(engine.world_mut(), Division::Medic, 500.0, 2.0);
    let gunner = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 550.0, 2.0);
    *engine.world_mut().get::<&mut Health>(gunner).unwrap() = Health::new(175.0, 200.0);

    engine.tick();

    assert_eq!(engine.world().get::<&Health>(gunner).unwrap().current, 200.0);
    assert_eq!(engine.score().statistics.officers_saved, 1);
    assert_eq!(engine.score().score, 125);
}

#[test]
fn test_medic_ignores_officers_out_of_range() {
    let mut engine = empty_field(13);
    world_setup::spawn_officer(engine.world_mut(), Division::Medic, 500.0, 2.0);
    let gunner = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 800.0, 2.0);
    *engine.world_mut().get::<&mut Health>(gunner).unwrap() = Health::new(50.0, 200.0);

    engine.tick();
    assert_eq!(engine.world().get::<&Health>(gunner).unwrap().current, 50.0);
}

#[test]
fn test_medkit_idempotence() {
    let mut engine = empty_field(17);
    let player = player_of(&engine);

    engine.queue_command(PlayerCommand::UseMedkit);
    engine.tick();
    assert_eq!(player_health(&engine), 150.0);

    engine.queue_command(PlayerCommand::UseMedkit);
    engine.queue_command(PlayerCommand::UseMedkit);
    engine.tick();
    assert_eq!(player_health(&engine), 200.0, "Third medkit has no stock");
    assert_eq!(engine.world().get::<&PlayerState>(player).unwrap().medkits, 0);

    let mut engine = empty_field(17);
    let player = player_of(&engine);
    *engine.world_mut().get::<&mut Health>(player).unwrap() = Health::full(PLAYER_MAX_HEALTH);
    engine.queue_command(PlayerCommand::UseMedkit);
    engine.tick();
    assert_eq!(player_health(&engine), PLAYER_MAX_HEALTH);
    assert_eq!(
        engine.world().get::<&PlayerState>(player).unwrap().medkits,
        PLAYER_START_MEDKITS,
        "Medkit not spent at full health"
    );
}

// ---- Contact damage and mission end ----

#[test]
fn test_shield_blocks_contact_damage() {
    let mut engine = empty_field(19);
    world_setup::spawn_rioter(engine.world_mut(), 110.0, 1.0, false);

    engine.tick();
    assert_eq!(player_health(&engine), PLAYER_START_HEALTH - CONTACT_DAMAGE);

    engine.queue_command(PlayerCommand::ToggleShield);
    engine.tick();
    assert_eq!(player_health(&engine), PLAYER_START_HEALTH - CONTACT_DAMAGE);
}

#[test]
fn test_mission_ends_exactly_once() {
    let mut engine = empty_field(19);
    let player = player_of(&engine);
    engine.world_mut().get::<&mut Health>(player).unwrap().current = 3.0;
    for _ in 0..5 {
        world_setup::spawn_rioter(engine.world_mut(), 100.0, 1.0, false);
    }

    let mut ended = 0;
    for _ in 0..10 {
        let snap = engine.tick();
        ended += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::MissionEnded { .. }))
            .count();
        assert!(snap.player.health >= 0.0);
    }

    assert_eq!(ended, 1);
    assert_eq!(engine.phase(), GamePhase::MissionEnded);
    assert_eq!(player_health(&engine), 0.0);

    // A new mission can be started from the end screen.
    engine.queue_command(PlayerCommand::StartMission);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(player_health(&engine), PLAYER_START_HEALTH);
}

// ---- Mission flow ----

#[test]
fn test_transport_entry_rejected_far_from_door() {
    let mut engine = started_engine(23);
    move_player_to(&mut engine, 400.0);

    engine.queue_command(PlayerCommand::EnterTransport);
    engine.tick();

    let mission = engine.mission().unwrap();
    assert_eq!(mission.phase, MissionPhase::Briefing, "State must be unchanged");
    let world = engine.world();
    for (_, officer) in world.query::<&Officer>().iter() {
        assert!(!officer.in_transport);
    }
}

#[test]
fn test_briefing_ready_once_then_acknowledged() {
    let mut engine = started_engine(23);
    let mut shown = 0;
    for _ in 0..200 {
        let snap = engine.tick();
        shown += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BriefingReady { .. }))
            .count();
    }
    assert_eq!(shown, 1);

    engine.queue_command(PlayerCommand::AcknowledgeBriefing);
    engine.tick();
    assert_eq!(engine.mission().unwrap().phase, MissionPhase::Staging);
}

#[test]
fn test_exit_away_from_riot_returns_to_staging() {
    let mut engine = started_engine(29);
    move_player_to(&mut engine, 100.0 + TRUCK_DOOR_OFFSET);

    engine.queue_command(PlayerCommand::EnterTransport);
    let snap = engine.tick();
    assert_eq!(snap.mission.phase, MissionPhase::InTransport);
    assert_eq!(snap.officers.iter().filter(|o| o.in_transport).count(), 20);

    engine.queue_command(PlayerCommand::Deploy);
    engine.tick();
    assert_eq!(
        engine.mission().unwrap().phase,
        MissionPhase::InTransport,
        "Deploy rejected far from the riot"
    );

    engine.queue_command(PlayerCommand::ExitTransport);
    let snap = engine.tick();
    assert_eq!(snap.mission.phase, MissionPhase::Staging);
    assert!(!snap.mission.riot_started);
    assert!(
        snap.officers.iter().all(|o| o.in_transport),
        "Officers stay aboard until deployed"
    );
}

#[test]
fn test_drive_and_deploy_starts_riot() {
    let mut engine = started_engine(31);
    move_player_to(&mut engine, 100.0 + TRUCK_DOOR_OFFSET);
    engine.queue_command(PlayerCommand::EnterTransport);
    engine.queue_command(PlayerCommand::SetMovement {
        keys: MovementKeys {
            right: true,
            ..Default::default()
        },
    });

    let mut ticks = 0;
    while !engine.mission().unwrap().near_riot() {
        engine.tick();
        ticks += 1;
        assert!(ticks < 1_000, "Transport never reached the riot");
    }

    let truck_x = engine.mission().unwrap().truck_position.x;
    let player = player_of(&engine);
    let seat = engine.mission().unwrap().driver_seat();
    assert_eq!(engine.world().get::<&Body>(player).unwrap().position, seat);

    engine.queue_command(PlayerCommand::SetMovement {
        keys: MovementKeys::default(),
    });
    engine.queue_command(PlayerCommand::Deploy);
    let snap = engine.tick();

    let mission = engine.mission().unwrap();
    assert_eq!(mission.phase, MissionPhase::Combat);
    assert!(mission.riot_started);
    assert!(snap.rioters.iter().all(|r| r.active), "Riot wakes the crowd");
    assert!(snap.officers.iter().all(|o| !o.in_transport));
    assert_eq!(
        engine.world().get::<&Body>(player).unwrap().position.x,
        truck_x + TRUCK_COMBAT_EXIT_OFFSET
    );
}

#[test]
fn test_transport_stays_inside_venue() {
    let mut engine = started_engine(37);
    move_player_to(&mut engine, 100.0 + TRUCK_DOOR_OFFSET);
    engine.queue_command(PlayerCommand::EnterTransport);
    engine.queue_command(PlayerCommand::SetMovement {
        keys: MovementKeys {
            left: true,
            ..Default::default()
        },
    });
    for _ in 0..100 {
        engine.tick();
    }
    let mission = engine.mission().unwrap();
    assert!(mission.truck_position.x > mission.venue.boundaries.left);
    assert!(engine.camera_x() >= mission.venue.boundaries.left);
}

// ---- AI ----

#[test]
fn test_active_rioter_chases_player() {
    let mut engine = empty_field(41);
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 600.0, 2.0, true);
    engine.tick();
    let x = engine.world().get::<&Body>(rioter).unwrap().position.x;
    assert_eq!(x, 598.0);
}

#[test]
fn test_downed_officer_is_ignored() {
    let mut engine = empty_field(41);
    let officer = world_setup::spawn_officer(engine.world_mut(), Division::Gunner, 250.0, 2.0);
    engine.world_mut().get::<&mut Health>(officer).unwrap().current = 0.0;
    let rioter = world_setup::spawn_rioter(engine.world_mut(), 200.0, 2.0, true);

    engine.tick();

    let world = engine.world();
    assert_eq!(world.get::<&Body>(officer).unwrap().position.x, 250.0, "No AI while down");
    assert_eq!(
        world.get::<&Body>(rioter).unwrap().position.x,
        198.0,
        "Rioter chases the player, not the downed officer"
    );
    assert_eq!(world.get::<&Health>(officer).unwrap().current, 0.0);
}

#[test]
fn test_radio_backup_and_cooldown() {
    let mut engine = started_engine(43);
    engine.queue_command(PlayerCommand::UseRadio);
    let snap = engine.tick();
    assert_eq!(snap.officers.len(), 40);
    assert!(snap
        .events
        .contains(&GameEvent::BackupArrived { officers: 20 }));
    assert!(!snap.player.radio_ready);

    engine.queue_command(PlayerCommand::UseRadio);
    let snap = engine.tick();
    assert_eq!(snap.officers.len(), 40, "Radio is on cooldown");
}

#[test]
fn test_division_fixed_for_life() {
    let mut engine = started_engine(47);
    let before: Vec<(Entity, Division)> = engine
        .world()
        .query::<&Officer>()
        .iter()
        .map(|(e, o)| (e, o.division))
        .collect();
    for _ in 0..60 {
        engine.tick();
    }
    for (entity, division) in before {
        let world = engine.world();
        let officer = world.get::<&Officer>(entity).unwrap();
        assert_eq!(officer.division, division);
        assert_eq!(world.get::<&Health>(entity).unwrap().max, division.stats().health);
    }
}

// ---- Scoring ----

#[test]
fn test_multiplier_bounds_and_combo_reset() {
    let mut score = ScoreState::default();
    let mut events = Vec::new();

    for i in 0..40 {
        score.add_score(ScoreKind::RioterDefeat, 0, i as f64 * 100.0, &mut events);
        assert!(score.multiplier >= 1.0 && score.multiplier <= MAX_MULTIPLIER);
    }
    assert_eq!(score.multiplier, MAX_MULTIPLIER);
    assert_eq!(score.combo_count, 39);

    let points = score.add_score(ScoreKind::RioterArrest, 0, 3_900.0 + COMBO_WINDOW_MS, &mut events);
    assert_eq!(points, 100, "Combo resets after the window");
    assert_eq!(score.combo_count, 0);
    assert_eq!(score.multiplier, 1.0);
    assert_eq!(events.len(), 41);
}

#[test]
fn test_combo_multiplier_applied_to_points() {
    let mut score = ScoreState::default();
    let mut events = Vec::new();
    assert_eq!(score.add_score(ScoreKind::RioterDefeat, 0, 0.0, &mut events), 50);
    assert_eq!(score.add_score(ScoreKind::RioterDefeat, 0, 500.0, &mut events), 55);
    assert_eq!(score.add_score(ScoreKind::PropertySaved, 10, 900.0, &mut events), 252);
    assert_eq!(score.score, 357);

    score.expire_combo(1_500.0);
    assert_eq!(score.combo_count, 2, "Window still open");
    score.expire_combo(2_900.0);
    assert_eq!(score.combo_count, 0);
    assert_eq!(score.multiplier, 1.0);
}

// ---- Effects ----

#[test]
fn test_effect_log_caps_and_ages() {
    let mut log = EffectLog::default();
    for i in 0..(MAX_EFFECTS + 10) {
        log.push(Effect::heal(Position::new(i as f64, 0.0)));
    }
    assert_eq!(log.len(), MAX_EFFECTS);
    assert_eq!(log.as_slice()[0].position.x, 10.0, "Oldest dropped first");

    log.push(Effect::explosion(Position::default()));
    for _ in 0..EXPLOSION_FRAMES {
        log.age();
    }
    assert_eq!(log.count(EffectKind::Explosion), 0);
    assert_eq!(log.count(EffectKind::Heal), MAX_EFFECTS - 1);

    for _ in EXPLOSION_FRAMES..HEAL_EFFECT_FRAMES {
        log.age();
    }
    assert!(log.is_empty());
}
