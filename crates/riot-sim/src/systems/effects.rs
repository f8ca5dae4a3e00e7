//! Effect bookkeeping: countdown, pruning and a hard cap.

use riot_core::components::Effect;
use riot_core::constants::MAX_EFFECTS;
use riot_core::enums::{EffectKind, WeaponKind};

/// Live visual markers, oldest first.
#[derive(Debug, Clone, Default)]
pub struct EffectLog {
    effects: Vec<Effect>,
}

impl EffectLog {
    /// Add an effect, dropping the oldest once the cap is reached.
    pub fn push(&mut self, effect: Effect) {
        if self.effects.len() >= MAX_EFFECTS {
            let overflow = self.effects.len() + 1 - MAX_EFFECTS;
            self.effects.drain(..overflow);
        }
        self.effects.push(effect);
    }

    /// Age every effect by one frame and drop the expired ones.
    pub fn age(&mut self) {
        for effect in &mut self.effects {
            effect.remaining_frames = effect.remaining_frames.saturating_sub(1);
        }
        self.effects.retain(|e| e.remaining_frames > 0);
    }

    /// Whether a melee swing with `weapon` is still on screen.
    pub fn is_swing_active(&self, weapon: WeaponKind) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == EffectKind::MeleeSwing && e.weapon == Some(weapon))
    }

    pub fn count(&self, kind: EffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
