//! Officer healing and the player's medkits.

use hecs::{Entity, World};
use log::debug;

use riot_ai::targeting::most_wounded;
use riot_core::components::{Body, Effect, Health, Officer, PlayerState};
use riot_core::constants::{MEDKIT_HEAL, WOUNDED_THRESHOLD};
use riot_core::enums::{Division, ScoreKind};
use riot_core::types::{cooldown_elapsed, Position};

use super::effects::EffectLog;
use super::Frame;

/// Officers that can receive healing: deployed, conscious, and not `exclude`.
fn heal_candidates(world: &World, exclude: Entity) -> Vec<(Entity, Position, f64)> {
    world
        .query::<(&Officer, &Body, &Health)>()
        .iter()
        .filter(|(entity, (officer, _, health))| {
            *entity != exclude && !officer.in_transport && !health.is_depleted()
        })
        .map(|(entity, (_, body, health))| (entity, body.position, health.ratio()))
        .collect()
}

/// Most wounded fellow officer anywhere on the field.
pub fn find_wounded(world: &World, medic: Entity) -> Option<(Entity, Position)> {
    let candidates = heal_candidates(world, medic)
        .into_iter()
        .map(|(entity, pos, ratio)| ((entity, pos), ratio));
    most_wounded(candidates, WOUNDED_THRESHOLD).map(|(found, _)| found)
}

/// Heal `target` on behalf of `medic`. Scores a save when it brings the
/// target back to full health.
pub fn heal_officer(world: &mut World, frame: &mut Frame, medic: Entity, target: Entity) -> f64 {
    let Some(heal) = world
        .get::<&Officer>(medic)
        .ok()
        .and_then(|officer| officer.division.stats().heal)
    else {
        return 0.0;
    };

    let (restored, full, center) = match world.query_one_mut::<(&mut Health, &Body)>(target) {
        Ok((health, body)) => {
            let restored = health.heal(heal.amount);
            (restored, health.is_full(), body.center())
        }
        Err(_) => return 0.0,
    };

    if let Ok(mut officer) = world.get::<&mut Officer>(medic) {
        officer.last_heal_ms = Some(frame.now_ms);
    }
    frame.effects.push(Effect::heal(center));
    if full {
        frame.score.add_score(ScoreKind::OfficerSaved, 0, frame.now_ms, frame.events);
    }
    debug!("medic healed officer for {restored:.0}");
    restored
}

/// Each ready medic heals the most wounded officer within its heal range.
pub fn run(world: &mut World, frame: &mut Frame) {
    let Some(profile) = Division::Medic.stats().heal else {
        return;
    };
    let medics: Vec<(Entity, Position)> = world
        .query::<(&Officer, &Body, &Health)>()
        .iter()
        .filter(|(_, (officer, _, health))| {
            officer.division == Division::Medic && !officer.in_transport && !health.is_depleted()
        })
        .map(|(entity, (_, body, _))| (entity, body.position))
        .collect();

    for (medic, at) in medics {
        let ready = world
            .get::<&Officer>(medic)
            .map(|o| cooldown_elapsed(o.last_heal_ms, frame.now_ms, profile.cooldown_ms))
            .unwrap_or(false);
        if !ready {
            continue;
        }

        let in_range = heal_candidates(world, medic)
            .into_iter()
            .filter(|(_, pos, _)| at.distance_to(pos) <= profile.range)
            .map(|(entity, _, ratio)| (entity, ratio));
        if let Some((target, _)) = most_wounded(in_range, WOUNDED_THRESHOLD) {
            heal_officer(world, frame, medic, target);
        }
    }
}

/// Spend a medkit on the player. No-op at full health or with none left.
pub fn use_medkit(world: &mut World, player: Entity, effects: &mut EffectLog) -> bool {
    let Ok((state, health, body)) =
        world.query_one_mut::<(&mut PlayerState, &mut Health, &Body)>(player)
    else {
        return false;
    };
    if state.medkits == 0 || health.is_full() {
        return false;
    }
    state.medkits -= 1;
    health.heal(MEDKIT_HEAL);
    effects.push(Effect::heal(body.center()));
    true
}
