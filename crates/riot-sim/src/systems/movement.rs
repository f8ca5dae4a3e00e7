//! Player walking, transport driving and the camera.

use hecs::{Entity, World};

use riot_core::commands::MovementKeys;
use riot_core::components::{Body, Officer};
use riot_core::constants::*;

use crate::mission::MissionState;

use super::physics;

/// Move the player, or the transport and everyone riding it, for one frame.
pub fn run(world: &mut World, mission: &mut MissionState, player: Entity, keys: &MovementKeys) {
    if mission.in_transport() {
        mission.drive(keys.left, keys.right);
        carry_passengers(world, mission, player);
    } else if let Ok(mut body) = world.get::<&mut Body>(player) {
        walk(&mut body, mission, keys);
        physics::apply_gravity(&mut body);
    }
}

fn walk(body: &mut Body, mission: &MissionState, keys: &MovementKeys) {
    let bounds = mission.venue.boundaries;
    if keys.left {
        let next = body.position.x - PLAYER_SPEED;
        if next > bounds.left {
            body.position.x = next;
        }
    }
    if keys.right {
        let next = body.position.x + PLAYER_SPEED;
        if next < bounds.right - body.size.width {
            body.position.x = next;
        }
    }
}

/// Pin the player to the driver seat and seated officers to their seats.
fn carry_passengers(world: &mut World, mission: &MissionState, player: Entity) {
    let origin = mission.truck_position;
    if let Ok(mut body) = world.get::<&mut Body>(player) {
        body.position = mission.driver_seat();
        body.velocity.y = 0.0;
    }
    for (_entity, (officer, body)) in world.query_mut::<(&Officer, &mut Body)>() {
        if let (true, Some(seat)) = (officer.in_transport, officer.transport_offset) {
            body.position = origin.offset(seat.x, seat.y);
            body.velocity.y = 0.0;
        }
    }
}

/// Next camera x. Eases toward the transport while riding, otherwise keeps
/// the player a fixed margin from the viewport edge. Always clamped to the
/// venue boundaries.
pub fn follow_camera(camera_x: f64, mission: &MissionState, player_x: f64) -> f64 {
    let margin = SCREEN_WIDTH * CAMERA_MARGIN_FRACTION;
    let next = if mission.in_transport() {
        let target = mission.truck_position.x - margin;
        camera_x + (target - camera_x) * CAMERA_EASE
    } else {
        player_x - margin
    };

    let bounds = mission.venue.boundaries;
    next.max(bounds.left).min(bounds.right - SCREEN_WIDTH)
}
