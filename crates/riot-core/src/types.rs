//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in world space (pixels).
/// x grows to the right, y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (pixels per frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned extent of an actor or object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current frame number (increments by 1 each tick).
    pub tick: u64,
    /// Monotonic simulation clock in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Offset by a displacement.
    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl SimTime {
    /// Advance one frame by `dt_ms` milliseconds. Negative steps are ignored.
    pub fn advance(&mut self, dt_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += dt_ms.max(0.0);
    }

    /// Advance one frame to an absolute host timestamp.
    /// The clock never moves backwards.
    pub fn advance_to(&mut self, now_ms: f64) {
        self.tick += 1;
        if now_ms > self.elapsed_ms {
            self.elapsed_ms = now_ms;
        }
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: &Position, b: &Position) -> f64 {
    a.distance_to(b)
}

/// True once `cooldown_ms` has passed since `last_ms` (or if it never happened).
pub fn cooldown_elapsed(last_ms: Option<f64>, now_ms: f64, cooldown_ms: f64) -> bool {
    match last_ms {
        Some(last) => now_ms - last >= cooldown_ms,
        None => true,
    }
}
