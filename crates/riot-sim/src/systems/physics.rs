//! Gravity integration and ground clamping.

use riot_core::components::Body;
use riot_core::constants::GRAVITY;

/// One frame of gravity: accelerate, integrate, then clamp to the ground line.
pub fn apply_gravity(body: &mut Body) {
    body.velocity.y += GRAVITY;
    body.position.y += body.velocity.y;

    let ground_y = body.ground_y();
    if body.position.y > ground_y {
        body.position.y = ground_y;
        body.velocity.y = 0.0;
        body.is_jumping = false;
    }
}
