//! Grenade flight, fuse and blast resolution.

use hecs::{Entity, World};
use log::debug;

use riot_core::components::{Body, Effect, Grenade, Rioter};
use riot_core::constants::*;
use riot_core::enums::ScoreKind;
use riot_core::types::{Position, Size, Velocity};

use super::{combat, Frame};

/// A fresh grenade thrown from `origin` toward `facing`.
pub fn throw(origin: Position, facing: f64) -> Grenade {
    Grenade {
        position: origin,
        velocity: Velocity::new(GRENADE_THROW_FORCE * facing, -GRENADE_THROW_FORCE / 2.0),
        size: Size::new(GRENADE_SIZE, GRENADE_SIZE),
        fuse_frames: GRENADE_FUSE_FRAMES,
    }
}

/// Blast damage at distance `d`: linear from full at the center to zero at the radius.
pub fn falloff(d: f64) -> f64 {
    if d <= GRENADE_RADIUS {
        GRENADE_DAMAGE * (1.0 - d / GRENADE_RADIUS)
    } else {
        0.0
    }
}

/// Advance every grenade one frame and detonate the expired ones.
/// Returns the number of explosions.
pub fn run(world: &mut World, frame: &mut Frame, grenades: &mut Vec<Grenade>) -> usize {
    let mut detonated = Vec::new();

    grenades.retain_mut(|grenade| {
        step(grenade);
        grenade.fuse_frames = grenade.fuse_frames.saturating_sub(1);
        if grenade.fuse_frames == 0 {
            detonated.push(grenade.position);
            false
        } else {
            true
        }
    });

    for &at in &detonated {
        explode(world, frame, at);
    }
    detonated.len()
}

fn step(grenade: &mut Grenade) {
    grenade.velocity.y += GRAVITY;
    grenade.position.x += grenade.velocity.x;
    grenade.position.y += grenade.velocity.y;

    let floor = GROUND_LEVEL - grenade.size.height;
    if grenade.position.y > floor {
        grenade.position.y = floor;
        grenade.velocity.y *= GRENADE_BOUNCE_DAMPING;
        grenade.velocity.x *= GRENADE_GROUND_FRICTION;
    }
}

fn explode(world: &mut World, frame: &mut Frame, at: Position) {
    let hits: Vec<(Entity, f64)> = world
        .query::<(&Rioter, &Body)>()
        .iter()
        .filter_map(|(entity, (_, body))| {
            let d = at.distance_to(&body.center());
            (d <= GRENADE_RADIUS).then(|| (entity, falloff(d)))
        })
        .collect();

    let mut kills = 0;
    for (rioter, damage) in hits {
        if combat::damage_rioter(world, frame, rioter, damage, Some(ScoreKind::RioterDefeat)) {
            kills += 1;
        }
    }

    frame.effects.push(Effect::explosion(at));
    debug!("grenade exploded at x={:.0}, {} kills", at.x, kills);
}

