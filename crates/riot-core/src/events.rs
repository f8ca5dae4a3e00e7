//! One-shot notifications emitted by the simulation for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::ScoreKind;
use crate::state::StatisticsView;
use crate::venue::RiotCause;

/// Events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The briefing for this mission is ready to be shown.
    BriefingReady { cause: RiotCause },
    /// Short objective text for the HUD.
    Objective { text: String },
    /// Points were awarded.
    ScoreAwarded {
        kind: ScoreKind,
        points: u64,
        combo: u32,
    },
    /// A radio call delivered reinforcements.
    BackupArrived { officers: u32 },
    /// Player health reached zero. Emitted exactly once per run.
    MissionEnded {
        score: u64,
        statistics: StatisticsView,
    },
}
