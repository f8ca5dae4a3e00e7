//! Rioter target seeking.
//!
//! Rioters chase the nearest of the player and every deployed officer,
//! stepping horizontally only. The player is the fallback target.

use rand::Rng;

use riot_core::constants::{JUMP_FORCE, RIOTER_JUMP_CHANCE};
use riot_core::types::Position;

use crate::targeting::{nearest, sign};

/// Pick the chase target: the player unless an officer is strictly closer.
pub fn choose_target(
    rioter: &Position,
    player: &Position,
    officers: impl IntoIterator<Item = Position>,
) -> Position {
    let candidates = std::iter::once(*player).chain(officers).map(|p| (p, p));
    nearest(rioter, candidates)
        .map(|(p, _)| p)
        .unwrap_or(*player)
}

/// Horizontal displacement for one frame toward `target_x`.
pub fn step_toward(from_x: f64, target_x: f64, speed: f64) -> f64 {
    sign(target_x - from_x) * speed
}

/// Roll the per-frame jump. Returns the new vertical velocity if the rioter jumps.
pub fn roll_jump<R: Rng>(is_jumping: bool, rng: &mut R) -> Option<f64> {
    if !is_jumping && rng.gen_bool(RIOTER_JUMP_CHANCE) {
        Some(JUMP_FORCE)
    } else {
        None
    }
}
