//! Projectile flight and hit resolution.
//!
//! Hits are measured against the rioter's center.

use hecs::{Entity, World};

use riot_core::components::{Body, Officer, Projectile, Projectiles, Rioter};
use riot_core::constants::{BULLET_HIT_RADIUS, SCREEN_HEIGHT};
use riot_core::enums::ScoreKind;

use super::{combat, Frame};

/// Advance the player's projectiles, then every officer's.
pub fn run(world: &mut World, frame: &mut Frame) {
    let player = frame.player;
    update_collection(world, frame, player);

    let officers: Vec<Entity> = world.query::<&Officer>().iter().map(|(e, _)| e).collect();
    for officer in officers {
        update_collection(world, frame, officer);
    }
}

/// Move each projectile, resolve at most one hit, and drop spent or
/// out-of-bounds projectiles. Only the player's kills score.
fn update_collection(world: &mut World, frame: &mut Frame, owner: Entity) {
    let mut in_flight = match world.get::<&mut Projectiles>(owner) {
        Ok(mut projectiles) => std::mem::take(&mut projectiles.0),
        Err(_) => return,
    };
    if in_flight.is_empty() {
        return;
    }

    let credit = (owner == frame.player).then_some(ScoreKind::RioterDefeat);
    let mut survivors = Vec::with_capacity(in_flight.len());

    for mut shot in in_flight.drain(..) {
        shot.position.x += shot.velocity.x;
        shot.position.y += shot.velocity.y;

        if let Some(rioter) = first_hit(world, &shot) {
            combat::damage_rioter(world, frame, rioter, shot.damage, credit);
            continue;
        }

        let p = shot.position;
        if p.x < 0.0 || p.x > frame.world_width || p.y < 0.0 || p.y > SCREEN_HEIGHT {
            continue;
        }
        survivors.push(shot);
    }

    if let Ok(mut projectiles) = world.get::<&mut Projectiles>(owner) {
        projectiles.0 = survivors;
    }
}

fn first_hit(world: &World, shot: &Projectile) -> Option<Entity> {
    world
        .query::<(&Rioter, &Body)>()
        .iter()
        .find(|(_, (_, body))| shot.position.distance_to(&body.center()) < BULLET_HIT_RADIUS)
        .map(|(entity, _)| entity)
}
