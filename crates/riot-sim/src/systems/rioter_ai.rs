//! Rioter AI system: chase, fall, and the odd jump.

use hecs::World;

use riot_ai::rioter::{choose_target, roll_jump, step_toward};
use riot_core::components::{Body, Health, Officer, Rioter};
use riot_core::types::Position;

use super::{physics, Frame};

/// Move every active rioter toward the nearest of the player and the
/// deployed, conscious officers.
pub fn run(world: &mut World, frame: &mut Frame) {
    let Ok(player) = world.get::<&Body>(frame.player).map(|b| b.position) else {
        return;
    };
    let officers: Vec<Position> = world
        .query::<(&Officer, &Body, &Health)>()
        .iter()
        .filter(|(_, (officer, _, health))| !officer.in_transport && !health.is_depleted())
        .map(|(_, (_, body, _))| body.position)
        .collect();

    for (_entity, (rioter, body)) in world.query_mut::<(&Rioter, &mut Body)>() {
        if !rioter.active {
            continue;
        }
        let target = choose_target(&body.position, &player, officers.iter().copied());
        body.position.x += step_toward(body.position.x, target.x, rioter.speed);

        physics::apply_gravity(body);

        if let Some(vy) = roll_jump(body.is_jumping, frame.rng) {
            body.velocity.y = vy;
            body.is_jumping = true;
        }
    }
}
