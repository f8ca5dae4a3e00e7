//! Score and combo bookkeeping.
//!
//! Stored in `SimulationEngine`, NOT as ECS components.

use log::debug;

use riot_core::constants::{COMBO_STEP, COMBO_WINDOW_MS, MAX_MULTIPLIER};
use riot_core::enums::ScoreKind;
use riot_core::events::GameEvent;
use riot_core::state::StatisticsView;

/// Running score state tracked by the engine.
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub score: u64,
    /// Always within `[1, MAX_MULTIPLIER]`.
    pub multiplier: f64,
    pub combo_count: u32,
    pub last_score_ms: Option<f64>,
    pub statistics: StatisticsView,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            multiplier: 1.0,
            combo_count: 0,
            last_score_ms: None,
            statistics: StatisticsView::default(),
        }
    }
}

impl ScoreState {
    /// Award points for a scoring event and return them.
    ///
    /// An event inside the combo window of the previous one extends the combo
    /// (+0.1x per step, capped at 3x); otherwise the combo restarts at 1x.
    pub fn add_score(
        &mut self,
        kind: ScoreKind,
        bonus: u32,
        now_ms: f64,
        events: &mut Vec<GameEvent>,
    ) -> u64 {
        let in_window = self
            .last_score_ms
            .is_some_and(|last| now_ms - last < COMBO_WINDOW_MS);

        if in_window {
            self.combo_count += 1;
            self.multiplier = (1.0 + self.combo_count as f64 * COMBO_STEP).min(MAX_MULTIPLIER);
        } else {
            self.reset_combo();
        }

        let base = (kind.base_points() + bonus) as f64;
        let points = (base * self.multiplier).round() as u64;

        let stats = &mut self.statistics;
        match kind {
            ScoreKind::RioterArrest => stats.arrests_made += 1,
            ScoreKind::RioterDefeat => stats.rioters_defeated += 1,
            ScoreKind::OfficerSaved => stats.officers_saved += 1,
            ScoreKind::PropertySaved => stats.property_protected += 1,
            ScoreKind::CivilianProtected => stats.civilians_protected += 1,
            ScoreKind::PeacefulResolution => stats.peaceful_resolutions += 1,
        }

        self.score = self.score.saturating_add(points);
        self.last_score_ms = Some(now_ms);

        debug!(
            "score {:?}: +{} (x{:.1}, combo {})",
            kind, points, self.multiplier, self.combo_count
        );
        events.push(GameEvent::ScoreAwarded {
            kind,
            points,
            combo: self.combo_count,
        });
        points
    }

    /// Drop the combo once the window since the last event has closed.
    pub fn expire_combo(&mut self, now_ms: f64) {
        if let Some(last) = self.last_score_ms {
            if now_ms - last >= COMBO_WINDOW_MS {
                self.reset_combo();
            }
        }
    }

    fn reset_combo(&mut self) {
        self.combo_count = 0;
        self.multiplier = 1.0;
    }
}
