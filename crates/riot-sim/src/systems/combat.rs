//! Combat resolution: melee, firing, damage and rioter removal.
//!
//! Actor-to-actor distances are measured between top-left corners. Actors
//! share one size, so this matches center distance. Projectiles spawn at
//! the shooter's center and are aimed at the target's center.

use hecs::{Entity, World};
use log::debug;

use riot_ai::targeting::{aim_velocity, nearest};
use riot_core::components::{
    Body, Effect, Health, Officer, PlayerState, Projectile, Projectiles, Rioter,
};
use riot_core::constants::*;
use riot_core::enums::{ScoreKind, WeaponKind};
use riot_core::types::{cooldown_elapsed, Position, Velocity};

use super::{population, Frame};

/// Nearest active rioter to `from`: entity, position, distance.
pub fn nearest_active_rioter(world: &World, from: &Position) -> Option<(Entity, Position, f64)> {
    let mut query = world.query::<(&Rioter, &Body)>();
    let candidates = query
        .iter()
        .filter(|(_, (rioter, _))| rioter.active)
        .map(|(entity, (_, body))| ((entity, body.position), body.position));
    nearest(from, candidates).map(|((entity, pos), d)| (entity, pos, d))
}

/// Despawn a rioter, credit the kill, then top up the crowd.
pub fn remove_rioter(world: &mut World, frame: &mut Frame, rioter: Entity, credit: Option<ScoreKind>) {
    if world.despawn(rioter).is_err() {
        return;
    }
    if let Some(kind) = credit {
        frame.score.add_score(kind, 0, frame.now_ms, frame.events);
    }
    population::check(world, frame.rng);
}

/// Damage a rioter, removing it if that kills it. Returns true on a kill.
pub fn damage_rioter(
    world: &mut World,
    frame: &mut Frame,
    rioter: Entity,
    amount: f64,
    credit: Option<ScoreKind>,
) -> bool {
    let depleted = match world.get::<&mut Health>(rioter) {
        Ok(mut health) => health.apply_damage(amount),
        Err(_) => return false,
    };
    if depleted {
        remove_rioter(world, frame, rioter, credit);
    }
    depleted
}

/// Hit every rioter within `range` of the attacker. Returns the hit count.
///
/// Player kills score an arrest with the baton and a defeat otherwise;
/// officer kills are not scored. Officer swings stamp the officer's attack
/// time; the player's swing was stamped when the attack command was taken.
pub fn apply_melee(
    world: &mut World,
    frame: &mut Frame,
    attacker: Entity,
    range: f64,
    damage: f64,
    weapon: WeaponKind,
) -> usize {
    let Ok(body) = world.get::<&Body>(attacker).map(|b| *b) else {
        return 0;
    };
    let origin = body.position;
    let swing_at = body.center();

    let targets: Vec<Entity> = world
        .query::<(&Rioter, &Body)>()
        .iter()
        .filter(|(_, (_, rb))| origin.distance_to(&rb.position) <= range)
        .map(|(entity, _)| entity)
        .collect();

    let credit = if attacker == frame.player {
        Some(if weapon == WeaponKind::Baton {
            ScoreKind::RioterArrest
        } else {
            ScoreKind::RioterDefeat
        })
    } else {
        None
    };

    for &target in &targets {
        frame.effects.push(Effect::melee_swing(swing_at, weapon));
        damage_rioter(world, frame, target, damage, credit);
    }

    if let Ok(mut officer) = world.get::<&mut Officer>(attacker) {
        officer.last_attack_ms = Some(frame.now_ms);
    }

    if !targets.is_empty() {
        debug!("{:?} swing hit {} rioters", weapon, targets.len());
    }
    targets.len()
}

/// Spawn a projectile from `shooter`. Returns false if no shot was fired.
///
/// The player fires horizontally in the facing direction. Officers aim at
/// the nearest active rioter and hold fire without one. Both are rate
/// limited: the player by the attack cooldown, officers by their division.
pub fn fire_projectile(world: &mut World, shooter: Entity, now_ms: f64) -> bool {
    let Ok(body) = world.get::<&Body>(shooter).map(|b| *b) else {
        return false;
    };

    let shot = if let Ok(mut player) = world.get::<&mut PlayerState>(shooter) {
        if !cooldown_elapsed(player.last_attack_ms, now_ms, PLAYER_ATTACK_COOLDOWN_MS) {
            return false;
        }
        player.last_attack_ms = Some(now_ms);
        Projectile {
            position: body.center(),
            velocity: Velocity::new(player.facing * BULLET_SPEED, 0.0),
            damage: PLAYER_BULLET_DAMAGE,
        }
    } else {
        let Some((target, _, _)) = nearest_active_rioter(world, &body.position) else {
            return false;
        };
        let Ok(aim_at) = world.get::<&Body>(target).map(|b| b.center()) else {
            return false;
        };
        let Ok(mut officer) = world.get::<&mut Officer>(shooter) else {
            return false;
        };
        let cooldown = officer.division.stats().attack_cooldown_ms;
        if !cooldown_elapsed(officer.last_attack_ms, now_ms, cooldown) {
            return false;
        }
        officer.last_attack_ms = Some(now_ms);
        Projectile {
            position: body.center(),
            velocity: aim_velocity(&body.center(), &aim_at, BULLET_SPEED),
            damage: OFFICER_BULLET_DAMAGE,
        }
    };

    match world.get::<&mut Projectiles>(shooter) {
        Ok(mut projectiles) => {
            projectiles.0.push(shot);
            true
        }
        Err(_) => false,
    }
}

/// Rioters chip away at whoever they touch.
///
/// The player takes damage unless shielded. Deployed, conscious officers
/// take the same damage while their shield is down. Returns the damage
/// dealt to the player.
pub fn resolve_contact_damage(world: &mut World, frame: &Frame) -> f64 {
    let rioters: Vec<Position> = world
        .query::<(&Rioter, &Body)>()
        .iter()
        .map(|(_, (_, body))| body.position)
        .collect();
    let touching = |at: &Position| -> f64 {
        rioters
            .iter()
            .filter(|r| at.distance_to(r) < CONTACT_RADIUS)
            .count() as f64
            * CONTACT_DAMAGE
    };

    let mut player_damage = 0.0;
    if let Ok((body, health, player)) =
        world.query_one_mut::<(&Body, &mut Health, &PlayerState)>(frame.player)
    {
        if !player.shield_active {
            player_damage = touching(&body.position);
            if player_damage > 0.0 {
                health.apply_damage(player_damage);
            }
        }
    }

    for (_entity, (body, health, officer)) in
        world.query_mut::<(&Body, &mut Health, &Officer)>()
    {
        if officer.in_transport || officer.shield_active || health.is_depleted() {
            continue;
        }
        let damage = touching(&body.position);
        if damage > 0.0 {
            health.apply_damage(damage);
        }
    }

    player_damage
}
