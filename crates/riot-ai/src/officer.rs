//! Officer behavior, dispatched by division.
//!
//! Pure functions on plain data: the engine gathers an `OfficerContext`,
//! calls `evaluate`, and applies the returned `OfficerIntent`.

use rand::Rng;

use riot_core::constants::{GUNNER_MAX_RANGE_FRACTION, GUNNER_MIN_RANGE_FRACTION};
use riot_core::enums::Division;
use riot_core::stats::DivisionStats;
use riot_core::types::{cooldown_elapsed, Position};

use crate::targeting::sign;

/// Input to the behavior function for one officer.
#[derive(Debug, Clone)]
pub struct OfficerContext {
    pub division: Division,
    pub position: Position,
    pub speed: f64,
    pub now_ms: f64,
    pub last_attack_ms: Option<f64>,
    pub last_heal_ms: Option<f64>,
    /// Nearest active rioter and its distance.
    pub nearest_rioter: Option<(Position, f64)>,
    /// Most wounded fellow officer, if any is below the threshold.
    pub wounded_ally: Option<Position>,
}

/// What the officer does this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OfficerAction {
    Idle,
    /// Fire a projectile at the nearest active rioter.
    Fire,
    /// Swing the division's melee weapon.
    Melee,
    /// Heal the wounded ally from the context.
    Heal,
}

/// Output of the behavior function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfficerIntent {
    /// Horizontal displacement this frame.
    pub dx: f64,
    /// New shield state, if it changes.
    pub shield: Option<bool>,
    pub action: OfficerAction,
}

impl OfficerIntent {
    pub const IDLE: OfficerIntent = OfficerIntent {
        dx: 0.0,
        shield: None,
        action: OfficerAction::Idle,
    };
}

/// Evaluate one officer. Officers with no active rioter to face stay idle.
pub fn evaluate<R: Rng>(ctx: &OfficerContext, rng: &mut R) -> OfficerIntent {
    let Some((rioter, distance)) = ctx.nearest_rioter else {
        return OfficerIntent::IDLE;
    };

    let stats = ctx.division.stats();

    match ctx.division {
        Division::Gunner => evaluate_gunner(ctx, &stats, &rioter, distance, rng),
        Division::Medic => evaluate_medic(ctx, &stats, distance, rng),
        Division::CloseCombat => evaluate_close_combat(ctx, &stats, &rioter, distance),
    }
}

fn evaluate_gunner<R: Rng>(
    ctx: &OfficerContext,
    stats: &DivisionStats,
    rioter: &Position,
    distance: f64,
    rng: &mut R,
) -> OfficerIntent {
    let toward = sign(rioter.x - ctx.position.x);
    let dx = if distance < stats.attack_range * GUNNER_MIN_RANGE_FRACTION {
        -toward * ctx.speed
    } else if distance > stats.attack_range * GUNNER_MAX_RANGE_FRACTION {
        toward * ctx.speed
    } else {
        0.0
    };

    let action = if cooldown_elapsed(ctx.last_attack_ms, ctx.now_ms, stats.attack_cooldown_ms)
        && accuracy_roll(stats, rng)
    {
        OfficerAction::Fire
    } else {
        OfficerAction::Idle
    };

    OfficerIntent {
        dx,
        shield: None,
        action,
    }
}

fn evaluate_medic<R: Rng>(
    ctx: &OfficerContext,
    stats: &DivisionStats,
    distance: f64,
    rng: &mut R,
) -> OfficerIntent {
    if let Some(ally) = ctx.wounded_ally {
        let heal_dx = ally.x - ctx.position.x;
        let can_heal = stats.heal.is_some_and(|heal| {
            heal_dx.abs() < heal.range
                && cooldown_elapsed(ctx.last_heal_ms, ctx.now_ms, heal.cooldown_ms)
        });
        return OfficerIntent {
            dx: sign(heal_dx) * ctx.speed,
            shield: None,
            action: if can_heal {
                OfficerAction::Heal
            } else {
                OfficerAction::Idle
            },
        };
    }

    let action = if distance < stats.attack_range
        && cooldown_elapsed(ctx.last_attack_ms, ctx.now_ms, stats.attack_cooldown_ms)
        && accuracy_roll(stats, rng)
    {
        OfficerAction::Fire
    } else {
        OfficerAction::Idle
    };

    OfficerIntent {
        dx: 0.0,
        shield: None,
        action,
    }
}

fn evaluate_close_combat(
    ctx: &OfficerContext,
    stats: &DivisionStats,
    rioter: &Position,
    distance: f64,
) -> OfficerIntent {
    if distance > stats.attack_range {
        let charge = stats.charge_speed.unwrap_or(ctx.speed);
        return OfficerIntent {
            dx: sign(rioter.x - ctx.position.x) * charge,
            shield: Some(true),
            action: OfficerAction::Idle,
        };
    }

    let action = if cooldown_elapsed(ctx.last_attack_ms, ctx.now_ms, stats.attack_cooldown_ms) {
        OfficerAction::Melee
    } else {
        OfficerAction::Idle
    };

    OfficerIntent {
        dx: 0.0,
        shield: Some(false),
        action,
    }
}

fn accuracy_roll<R: Rng>(stats: &DivisionStats, rng: &mut R) -> bool {
    match stats.accuracy {
        Some(p) => rng.gen::<f64>() <= p,
        None => true,
    }
}
