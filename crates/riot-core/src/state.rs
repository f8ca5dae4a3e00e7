//! Game state snapshot: the complete visible state handed to the presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::components::{Effect, Grenade};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Size, Velocity};
use crate::venue::RiotCause;

/// Complete game state produced after each tick. Read-only for consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub mission: MissionView,
    pub player: PlayerView,
    pub officers: Vec<OfficerView>,
    pub rioters: Vec<RioterView>,
    pub projectiles: Vec<ProjectileView>,
    pub grenades: Vec<Grenade>,
    pub effects: Vec<Effect>,
    /// Left edge of the viewport in world space.
    pub camera_x: f64,
    pub score: ScoreView,
    pub events: Vec<GameEvent>,
}

/// Mission state for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionView {
    pub phase: MissionPhase,
    pub truck_position: Position,
    pub cause: Option<RiotCause>,
    pub world_width: f64,
    pub riot_started: bool,
    pub near_transport_door: bool,
    pub near_riot: bool,
}

/// Player state for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub size: Size,
    pub health: f64,
    pub max_health: f64,
    pub weapon: WeaponKind,
    /// Whether a melee swing of the equipped weapon is on screen.
    pub swinging: bool,
    pub shield_active: bool,
    pub facing: f64,
    pub grenades: u32,
    pub medkits: u32,
    pub radio_ready: bool,
}

/// Allied officer for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficerView {
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub division: Division,
    pub weapon: WeaponKind,
    pub shield_active: bool,
    pub in_transport: bool,
}

/// Rioter for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RioterView {
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub active: bool,
}

/// Bullet in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub velocity: Velocity,
    pub from_player: bool,
}

/// Mission statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsView {
    pub arrests_made: u32,
    pub rioters_defeated: u32,
    pub officers_saved: u32,
    pub property_protected: u32,
    pub civilians_protected: u32,
    pub peaceful_resolutions: u32,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u64,
    pub multiplier: f64,
    pub combo_count: u32,
    pub statistics: StatisticsView,
    pub officers: u32,
    pub rioters: u32,
}
