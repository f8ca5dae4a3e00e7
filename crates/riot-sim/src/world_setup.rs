//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, officer squads and rioters with their component
//! bundles. Every actor spawns standing on the ground.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use riot_core::components::*;
use riot_core::constants::*;
use riot_core::enums::Division;
use riot_core::venue::VenueConfig;

/// Reset the world for a new mission: player at the venue start, the
/// starting squad near the left edge, and a dormant crowd at the riot site.
/// Returns the player entity.
pub fn setup_mission(world: &mut World, rng: &mut ChaCha8Rng, venue: &VenueConfig) -> Entity {
    world.clear();

    let player = spawn_player(world, venue.start_x);
    spawn_squad(world, rng, STAGING_MIN_X, STAGING_SPREAD);

    for _ in 0..INITIAL_RIOTERS {
        let x = SPAWN_DISTANCE + rng.gen::<f64>() * SPAWN_BAND_WIDTH;
        let speed = RIOTER_INITIAL_BASE_SPEED + rng.gen::<f64>() * RIOTER_SPEED_SPREAD;
        spawn_rioter(world, x, speed, false);
    }

    player
}

pub fn spawn_player(world: &mut World, x: f64) -> Entity {
    world.spawn((
        Body::grounded(x),
        Health::new(PLAYER_START_HEALTH, PLAYER_MAX_HEALTH),
        PlayerState::default(),
        Projectiles::default(),
    ))
}

/// Spawn one officer. Health and weapon come from the division table.
pub fn spawn_officer(world: &mut World, division: Division, x: f64, speed: f64) -> Entity {
    world.spawn((
        Body::grounded(x),
        Health::full(division.stats().health),
        Officer::new(division, speed),
        Projectiles::default(),
    ))
}

pub fn spawn_rioter(world: &mut World, x: f64, speed: f64, active: bool) -> Entity {
    world.spawn((
        Body::grounded(x),
        Health::full(RIOTER_HEALTH),
        Rioter { speed, active },
    ))
}

/// Spawn a full squad (10 gunners, 2 medics, 8 close combat) scattered over
/// `[base_x, base_x + spread)`. Returns the number of officers spawned.
pub fn spawn_squad(world: &mut World, rng: &mut ChaCha8Rng, base_x: f64, spread: f64) -> usize {
    let mut spawned = 0;
    for division in Division::ALL {
        for _ in 0..squad_size(division) {
            let x = base_x + rng.gen::<f64>() * spread;
            let speed = OFFICER_BASE_SPEED + rng.gen::<f64>() * OFFICER_SPEED_SPREAD;
            spawn_officer(world, division, x, speed);
            spawned += 1;
        }
    }
    spawned
}

fn squad_size(division: Division) -> usize {
    match division {
        Division::Gunner => SQUAD_GUNNERS,
        Division::Medic => SQUAD_MEDICS,
        Division::CloseCombat => SQUAD_CLOSE_COMBAT,
    }
}

/// Radio backup: a squad arriving just behind the player.
pub fn call_backup(world: &mut World, rng: &mut ChaCha8Rng, player_x: f64) -> usize {
    spawn_squad(
        world,
        rng,
        player_x - BACKUP_SPAWN_OFFSET,
        BACKUP_SPAWN_SPREAD,
    )
}
