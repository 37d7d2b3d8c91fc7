//! Paper Dash - an endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (particle budget)
//! - `platform`: Browser bindings for the frame driver and renderer

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Longest step the simulation will integrate in one call (seconds)
    pub const MAX_STEP_DT: f32 = 1.0 / 30.0;
    /// Cadence the native driver steps at
    pub const DRIVER_DT: f32 = 1.0 / 60.0;

    /// World physics (pixels, seconds)
    pub const GRAVITY: f32 = 2200.0;
    pub const JUMP_VELOCITY: f32 = -900.0;

    /// Scroll speed ramp
    pub const BASE_SPEED: f32 = 380.0;
    pub const SPEED_MAX: f32 = 820.0;
    pub const SPEED_RAMP_PER_SECOND: f32 = 14.0;

    /// Seconds between obstacles at base speed
    pub const SPAWN_INTERVAL_MIN: f32 = 0.95;
    pub const SPAWN_INTERVAL_MAX: f32 = 1.65;

    /// Distance units per pixel scrolled ("meters-ish")
    pub const DISTANCE_SCALE: f32 = 0.06;

    /// Actor defaults
    pub const ACTOR_WIDTH: f32 = 46.0;
    pub const ACTOR_HEIGHT: f32 = 72.0;

    /// Hard cap on live particles; quality presets pick a budget at or below it
    pub const MAX_PARTICLES: usize = 1024;
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    a + (b - a) * t
}

/// Clamp an externally supplied frame delta into [0, max]; NaN and negatives become 0
#[inline]
pub fn sanitize_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max)
    } else {
        0.0
    }
}
