//! Systems that operate on the simulation world each frame.
//!
//! Systems are free functions over `&mut World` plus a `Frame` carrying the
//! engine-owned state a step may touch. They do not own state themselves.

pub mod combat;
pub mod effects;
pub mod grenades;
pub mod healing;
pub mod movement;
pub mod officer_ai;
pub mod physics;
pub mod population;
pub mod projectiles;
pub mod rioter_ai;
pub mod snapshot;

use hecs::Entity;
use rand_chacha::ChaCha8Rng;

use riot_core::events::GameEvent;

use crate::scoring::ScoreState;
use effects::EffectLog;

/// Engine-owned state borrowed by systems for one frame.
pub struct Frame<'a> {
    pub rng: &'a mut ChaCha8Rng,
    pub score: &'a mut ScoreState,
    pub effects: &'a mut EffectLog,
    pub events: &'a mut Vec<GameEvent>,
    pub player: Entity,
    pub now_ms: f64,
    pub world_width: f64,
}
