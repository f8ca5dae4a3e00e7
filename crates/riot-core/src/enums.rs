//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Officer combat role. Each division has a fixed stat profile
/// (see `stats::DivisionStats`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    /// Ranged support with an SMG, keeps a distance band.
    Gunner,
    /// Heals wounded officers, carries a sidearm for self-defense.
    Medic,
    /// Shield and baton, charges into melee.
    CloseCombat,
}

/// Weapon carried by the player or an officer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Smg,
    Baton,
    Knife,
    /// Medic self-defense pistol.
    Sidearm,
}

impl WeaponKind {
    /// Whether this weapon fires projectiles (as opposed to melee).
    pub fn is_ranged(self) -> bool {
        matches!(self, WeaponKind::Smg | WeaponKind::Sidearm)
    }
}

/// Transient visual marker category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Explosion,
    Heal,
    MeleeSwing,
}

/// Scoring event category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreKind {
    /// Subduing a rioter non-lethally (baton).
    RioterArrest,
    /// Defeating a rioter with force.
    RioterDefeat,
    PropertySaved,
    CivilianProtected,
    /// Healing a fellow officer back to full health.
    OfficerSaved,
    PeacefulResolution,
}

impl ScoreKind {
    /// Base points awarded before the combo multiplier.
    pub fn base_points(self) -> u32 {
        match self {
            ScoreKind::RioterArrest => 100,
            ScoreKind::RioterDefeat => 50,
            ScoreKind::PropertySaved => 200,
            ScoreKind::CivilianProtected => 150,
            ScoreKind::OfficerSaved => 125,
            ScoreKind::PeacefulResolution => 300,
        }
    }
}

/// Mission progress (the player-driven state machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    /// Waiting on the briefing; the player may already walk to the transport.
    #[default]
    Briefing,
    /// Briefing acknowledged, player on foot and the riot not started.
    Staging,
    /// Player driving the transport.
    InTransport,
    /// Riot started, player on foot at the riot site.
    Combat,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Player health reached zero; statistics have been reported.
    MissionEnded,
}
