//! Static stat tables for officer divisions and player weapons.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Division, WeaponKind};

/// Healing capability of a division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealProfile {
    pub range: f64,
    pub amount: f64,
    pub cooldown_ms: f64,
}

/// Fixed stat profile for an officer division.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivisionStats {
    pub health: f64,
    pub weapon: WeaponKind,
    pub attack_range: f64,
    pub attack_cooldown_ms: f64,
    pub damage: f64,
    /// Probability a ranged shot is taken when off cooldown.
    pub accuracy: Option<f64>,
    /// Movement speed while charging with the shield raised.
    pub charge_speed: Option<f64>,
    pub heal: Option<HealProfile>,
    /// Whether officers of this division start with the shield raised.
    pub has_shield: bool,
}

impl Division {
    /// All divisions, in squad spawn order.
    pub const ALL: [Division; 3] = [Division::Gunner, Division::Medic, Division::CloseCombat];

    pub fn stats(self) -> DivisionStats {
        match self {
            Division::Gunner => DivisionStats {
                health: 200.0,
                weapon: WeaponKind::Smg,
                attack_range: 300.0,
                attack_cooldown_ms: 800.0,
                damage: 20.0,
                accuracy: Some(0.8),
                charge_speed: None,
                heal: None,
                has_shield: false,
            },
            Division::Medic => DivisionStats {
                health: 150.0,
                weapon: WeaponKind::Sidearm,
                attack_range: 150.0,
                attack_cooldown_ms: 1200.0,
                damage: 10.0,
                accuracy: Some(0.6),
                charge_speed: None,
                heal: Some(HealProfile {
                    range: MEDIC_HEAL_RANGE,
                    amount: MEDIC_HEAL_AMOUNT,
                    cooldown_ms: MEDIC_HEAL_COOLDOWN_MS,
                }),
                has_shield: false,
            },
            Division::CloseCombat => DivisionStats {
                health: 250.0,
                weapon: WeaponKind::Baton,
                attack_range: 60.0,
                attack_cooldown_ms: 1000.0,
                damage: 40.0,
                accuracy: None,
                charge_speed: Some(4.0),
                heal: None,
                has_shield: true,
            },
        }
    }
}

/// Melee reach and damage of a player weapon. `None` for ranged weapons.
pub fn player_melee_profile(weapon: WeaponKind) -> Option<(f64, f64)> {
    match weapon {
        WeaponKind::Baton => Some((BATON_RANGE, BATON_DAMAGE)),
        WeaponKind::Knife => Some((KNIFE_RANGE, KNIFE_DAMAGE)),
        WeaponKind::Smg | WeaponKind::Sidearm => None,
    }
}
