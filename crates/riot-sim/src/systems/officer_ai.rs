//! Officer AI system.
//!
//! Builds an `OfficerContext` per deployed officer, asks `riot_ai` for an
//! intent and applies it. Officers act one after another, so a later
//! officer sees the effects of an earlier one in the same frame.

use hecs::{Entity, World};

use riot_ai::officer::{evaluate, OfficerAction, OfficerContext};
use riot_core::components::{Body, Health, Officer};
use riot_core::enums::Division;

use super::{combat, healing, physics, Frame};

pub fn run(world: &mut World, frame: &mut Frame) {
    let officers: Vec<Entity> = world
        .query::<&Officer>()
        .iter()
        .filter(|(_, officer)| !officer.in_transport)
        .map(|(entity, _)| entity)
        .collect();

    for entity in officers {
        let conscious = world
            .get::<&Health>(entity)
            .map(|h| !h.is_depleted())
            .unwrap_or(false);
        if conscious {
            act(world, frame, entity);
        }
        if let Ok(mut body) = world.get::<&mut Body>(entity) {
            physics::apply_gravity(&mut body);
        }
    }
}

fn act(world: &mut World, frame: &mut Frame, entity: Entity) {
    let (officer, position) = match world.query_one_mut::<(&Officer, &Body)>(entity) {
        Ok((officer, body)) => (officer.clone(), body.position),
        Err(_) => return,
    };

    let nearest_rioter = combat::nearest_active_rioter(world, &position).map(|(_, p, d)| (p, d));
    let wounded = if officer.division == Division::Medic {
        healing::find_wounded(world, entity)
    } else {
        None
    };

    let ctx = OfficerContext {
        division: officer.division,
        position,
        speed: officer.speed,
        now_ms: frame.now_ms,
        last_attack_ms: officer.last_attack_ms,
        last_heal_ms: officer.last_heal_ms,
        nearest_rioter,
        wounded_ally: wounded.map(|(_, pos)| pos),
    };
    let intent = evaluate(&ctx, frame.rng);

    if let Ok((officer, body)) = world.query_one_mut::<(&mut Officer, &mut Body)>(entity) {
        body.position.x += intent.dx;
        if let Some(raised) = intent.shield {
            officer.shield_active = raised;
        }
    }

    match intent.action {
        OfficerAction::Idle => {}
        OfficerAction::Fire => {
            combat::fire_projectile(world, entity, frame.now_ms);
        }
        OfficerAction::Melee => {
            let stats = officer.division.stats();
            combat::apply_melee(
                world,
                frame,
                entity,
                stats.attack_range,
                stats.damage,
                stats.weapon,
            );
        }
        OfficerAction::Heal => {
            if let Some((target, _)) = wounded {
                healing::heal_officer(world, frame, entity, target);
            }
        }
    }
}
