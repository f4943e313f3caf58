//! Greenlight - a "move only on green" road race, simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (traffic light, kinematics, collisions)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input polling and signal acquisition (keyboard speed tiers or a
//! biosignal ratio) live outside this crate; collaborators feed per-tick
//! inputs in and project the per-tick snapshot back out through
//! [`sim::RoadProjection`].

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Linear interpolation between `a` and `b` by `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap a scroll accumulator into [0, 1).
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    x.rem_euclid(1.0)
}
