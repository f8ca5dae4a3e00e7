//! Snapshot system: queries the world and builds a complete GameStateSnapshot.
//!
//! Read-only. Never modifies the world.

use hecs::{Entity, World};

use riot_core::components::*;
use riot_core::constants::RADIO_COOLDOWN_MS;
use riot_core::enums::GamePhase;
use riot_core::events::GameEvent;
use riot_core::state::*;
use riot_core::types::{cooldown_elapsed, SimTime};

use crate::mission::MissionState;
use crate::scoring::ScoreState;

use super::effects::EffectLog;

/// Engine state the snapshot reads from, besides the world.
pub struct SnapshotSource<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: Option<Entity>,
    pub mission: Option<&'a MissionState>,
    pub score: &'a ScoreState,
    pub grenades: &'a [Grenade],
    pub effects: &'a EffectLog,
    pub camera_x: f64,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    source: &SnapshotSource,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let player = source
        .player
        .map(|entity| build_player(world, entity, source))
        .unwrap_or_default();
    let officers = build_officers(world);
    let rioters = build_rioters(world);

    GameStateSnapshot {
        time: source.time,
        phase: source.phase,
        mission: build_mission(source, &player),
        player,
        score: ScoreView {
            score: source.score.score,
            multiplier: source.score.multiplier,
            combo_count: source.score.combo_count,
            statistics: source.score.statistics,
            officers: officers.len() as u32,
            rioters: rioters.len() as u32,
        },
        officers,
        rioters,
        projectiles: build_projectiles(world, source.player),
        grenades: source.grenades.to_vec(),
        effects: source.effects.as_slice().to_vec(),
        camera_x: source.camera_x,
        events,
    }
}

fn build_player(world: &World, entity: Entity, source: &SnapshotSource) -> PlayerView {
    let Ok(mut query) = world.query_one::<(&Body, &Health, &PlayerState)>(entity) else {
        return PlayerView::default();
    };
    let Some((body, health, state)) = query.get() else {
        return PlayerView::default();
    };
    let weapon = state.weapon();
    PlayerView {
        position: body.position,
        size: body.size,
        health: health.current,
        max_health: health.max,
        weapon,
        swinging: source.effects.is_swing_active(weapon),
        shield_active: state.shield_active,
        facing: state.facing,
        grenades: state.grenades,
        medkits: state.medkits,
        radio_ready: cooldown_elapsed(state.last_radio_ms, source.time.elapsed_ms, RADIO_COOLDOWN_MS),
    }
}

fn build_mission(source: &SnapshotSource, player: &PlayerView) -> MissionView {
    let Some(mission) = source.mission else {
        return MissionView::default();
    };
    let player_body = Body {
        position: player.position,
        size: player.size,
        ..Body::default()
    };
    MissionView {
        phase: mission.phase,
        truck_position: mission.truck_position,
        cause: Some(mission.cause.clone()),
        world_width: mission.venue.world_width,
        riot_started: mission.riot_started,
        near_transport_door: !mission.in_transport() && mission.near_transport_door(&player_body),
        near_riot: mission.near_riot(),
    }
}

fn build_officers(world: &World) -> Vec<OfficerView> {
    world
        .query::<(&Officer, &Body, &Health)>()
        .iter()
        .map(|(_, (officer, body, health))| OfficerView {
            position: body.position,
            health: health.current,
            max_health: health.max,
            division: officer.division,
            weapon: officer.weapon(),
            shield_active: officer.shield_active,
            in_transport: officer.in_transport,
        })
        .collect()
}

fn build_rioters(world: &World) -> Vec<RioterView> {
    world
        .query::<(&Rioter, &Body, &Health)>()
        .iter()
        .map(|(_, (rioter, body, health))| RioterView {
            position: body.position,
            health: health.current,
            max_health: health.max,
            active: rioter.active,
        })
        .collect()
}

/// Every projectile in flight, the player's first.
fn build_projectiles(world: &World, player: Option<Entity>) -> Vec<ProjectileView> {
    let mut views = Vec::new();
    if let Some(player) = player {
        if let Ok(projectiles) = world.get::<&Projectiles>(player) {
            views.extend(projectiles.0.iter().map(|p| ProjectileView {
                position: p.position,
                velocity: p.velocity,
                from_player: true,
            }));
        }
    }
    for (_, (_, projectiles)) in world.query::<(&Officer, &Projectiles)>().iter() {
        views.extend(projectiles.0.iter().map(|p| ProjectileView {
            position: p.position,
            velocity: p.velocity,
            from_player: false,
        }));
    }
    views
}
