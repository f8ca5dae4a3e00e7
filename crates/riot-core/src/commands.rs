//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// Currently held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Held input ---
    /// Replace the held-key snapshot (persists until the next update).
    SetMovement { keys: MovementKeys },
    /// Cursor position in screen space, for aimed actions.
    SetCursor { x: f64, y: f64 },

    // --- Combat ---
    /// Fire the equipped weapon (projectile or melee swing).
    Shoot,
    Jump,
    ThrowGrenade,
    UseMedkit,
    CycleWeapon,
    ToggleShield,
    /// Call for backup (long cooldown).
    UseRadio,

    // --- Mission ---
    EnterTransport,
    ExitTransport,
    /// Unload officers at the riot site.
    Deploy,
    AcknowledgeBriefing,

    // --- Simulation control ---
    /// Start a new mission (from the menu or after the mission ended).
    StartMission,
    Pause,
    Resume,
}
