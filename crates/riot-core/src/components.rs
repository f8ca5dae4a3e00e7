//! ECS components for hecs entities, plus the engine-owned object records.
//!
//! Components are plain data structs with few methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::types::{Position, Size, Velocity};

/// Physical body shared by every actor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner in world space.
    pub position: Position,
    pub velocity: Velocity,
    pub size: Size,
    pub is_jumping: bool,
}

impl Body {
    /// A body of the standard actor size standing on the ground at `x`.
    pub fn grounded(x: f64) -> Self {
        Self {
            position: Position::new(x, GROUND_LEVEL - ACTOR_HEIGHT),
            velocity: Velocity::default(),
            size: Size::new(ACTOR_WIDTH, ACTOR_HEIGHT),
            is_jumping: false,
        }
    }

    pub fn center(&self) -> Position {
        self.position
            .offset(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// y of the top edge when standing on the ground.
    pub fn ground_y(&self) -> f64 {
        GROUND_LEVEL - self.size.height
    }
}

/// Hit points. `current` always stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn new(current: f64, max: f64) -> Self {
        Self {
            current: current.clamp(0.0, max),
            max,
        }
    }

    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage, clamping at zero. Returns true if now depleted.
    pub fn apply_damage(&mut self, amount: f64) -> bool {
        self.current = (self.current - amount).clamp(0.0, self.max);
        self.is_depleted()
    }

    /// Restore health, clamping at max. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current + amount).clamp(0.0, self.max);
        self.current - before
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

/// A bullet in flight. Stored in its owner's `Projectiles`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
}

/// Bullets owned by an actor. Always present, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projectiles(pub Vec<Projectile>);

/// Player-only state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub inventory: Vec<WeaponKind>,
    pub current_weapon: usize,
    pub shield_active: bool,
    /// +1.0 facing right, -1.0 facing left. Sets bullet and grenade direction.
    pub facing: f64,
    pub grenades: u32,
    pub medkits: u32,
    pub last_attack_ms: Option<f64>,
    pub last_radio_ms: Option<f64>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            inventory: vec![WeaponKind::Smg, WeaponKind::Baton, WeaponKind::Knife],
            current_weapon: 0,
            shield_active: false,
            facing: 1.0,
            grenades: PLAYER_START_GRENADES,
            medkits: PLAYER_START_MEDKITS,
            last_attack_ms: None,
            last_radio_ms: None,
        }
    }
}

impl PlayerState {
    pub fn weapon(&self) -> WeaponKind {
        self.inventory
            .get(self.current_weapon)
            .copied()
            .unwrap_or_default()
    }
}

/// Allied NPC state. `division` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Officer {
    pub division: Division,
    /// Walk speed (pixels per frame).
    pub speed: f64,
    pub shield_active: bool,
    pub in_transport: bool,
    /// Seat relative to the transport origin while riding.
    pub transport_offset: Option<Position>,
    pub last_attack_ms: Option<f64>,
    pub last_heal_ms: Option<f64>,
}

impl Officer {
    pub fn new(division: Division, speed: f64) -> Self {
        Self {
            division,
            speed,
            shield_active: division.stats().has_shield,
            in_transport: false,
            transport_offset: None,
            last_attack_ms: None,
            last_heal_ms: None,
        }
    }

    pub fn weapon(&self) -> WeaponKind {
        self.division.stats().weapon
    }
}

/// Hostile NPC state. Inactive rioters neither move nor target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rioter {
    pub speed: f64,
    pub active: bool,
}

/// A thrown grenade. Owned by the engine, not by an actor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Grenade {
    pub position: Position,
    pub velocity: Velocity,
    pub size: Size,
    /// Frames until detonation.
    pub fuse_frames: u32,
}

/// Transient visual marker consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub position: Position,
    pub remaining_frames: u32,
    pub radius: Option<f64>,
    pub weapon: Option<WeaponKind>,
}

impl Effect {
    pub fn explosion(position: Position) -> Self {
        Self {
            kind: EffectKind::Explosion,
            position,
            remaining_frames: EXPLOSION_FRAMES,
            radius: Some(GRENADE_RADIUS),
            weapon: None,
        }
    }

    pub fn heal(position: Position) -> Self {
        Self {
            kind: EffectKind::Heal,
            position,
            remaining_frames: HEAL_EFFECT_FRAMES,
            radius: Some(HEAL_EFFECT_RADIUS),
            weapon: None,
        }
    }

    pub fn melee_swing(position: Position, weapon: WeaponKind) -> Self {
        Self {
            kind: EffectKind::MeleeSwing,
            position,
            remaining_frames: MELEE_SWING_FRAMES,
            radius: None,
            weapon: Some(weapon),
        }
    }
}
