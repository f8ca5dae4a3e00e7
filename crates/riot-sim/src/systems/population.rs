//! Rioter population: counting and batch reinforcement.
//!
//! Reinforcements are the only supply mechanism. Whenever a removal leaves
//! the crowd at or below the low-water mark, a full batch spawns in the
//! band beyond the riot site.

use hecs::World;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use riot_core::components::Rioter;
use riot_core::constants::*;

use crate::world_setup;

pub fn rioter_count(world: &World) -> usize {
    world.query::<&Rioter>().iter().count()
}

pub fn any_active(world: &World) -> bool {
    world.query::<&Rioter>().iter().any(|(_, r)| r.active)
}

/// Spawn one reinforcement batch. New rioters join active only if the
/// riot is already under way.
pub fn repopulate(world: &mut World, rng: &mut ChaCha8Rng) -> usize {
    let active = any_active(world);
    for _ in 0..REPOPULATE_BATCH {
        let x = SPAWN_DISTANCE + rng.gen::<f64>() * SPAWN_BAND_WIDTH;
        let speed = RIOTER_BASE_SPEED + rng.gen::<f64>() * RIOTER_SPEED_SPREAD;
        world_setup::spawn_rioter(world, x, speed, active);
    }
    debug!(
        "reinforced crowd with {} rioters (active: {})",
        REPOPULATE_BATCH, active
    );
    REPOPULATE_BATCH
}

/// Reinforce if the crowd has dropped to the low-water mark. Call after every removal.
pub fn check(world: &mut World, rng: &mut ChaCha8Rng) -> bool {
    if rioter_count(world) <= REPOPULATE_THRESHOLD {
        repopulate(world, rng);
        true
    } else {
        false
    }
}
