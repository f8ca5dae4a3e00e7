//! Brute-force target selection and aiming.
//!
//! Populations are tens to a few hundred actors, so every query is a
//! linear scan. Ties always resolve to the earliest candidate.

use glam::DVec2;

use riot_core::types::{Position, Velocity};

/// Sign of `v`, with zero mapping to zero.
pub fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Nearest candidate to `from` and its distance.
pub fn nearest<T>(
    from: &Position,
    candidates: impl IntoIterator<Item = (T, Position)>,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (key, pos) in candidates {
        let d = from.distance_to(&pos);
        match &best {
            Some((_, best_d)) if d >= *best_d => {}
            _ => best = Some((key, d)),
        }
    }
    best
}

/// Candidate with the lowest health ratio strictly below `threshold`.
pub fn most_wounded<T>(
    candidates: impl IntoIterator<Item = (T, f64)>,
    threshold: f64,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    let mut lowest = threshold;
    for (key, ratio) in candidates {
        if ratio < lowest {
            lowest = ratio;
            best = Some((key, ratio));
        }
    }
    best
}

/// Velocity of `speed` pointing from `from` to `to`.
/// Coincident points fire straight ahead (+x).
pub fn aim_velocity(from: &Position, to: &Position, speed: f64) -> Velocity {
    let delta = DVec2::new(to.x - from.x, to.y - from.y);
    let dir = delta.try_normalize().unwrap_or(DVec2::X);
    let v = dir * speed;
    Velocity::new(v.x, v.y)
}
