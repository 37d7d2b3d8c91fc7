//! Data-driven game balance
//!
//! Every number the simulation reads lives here so a run can be re-balanced
//! from a JSON file without touching code. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Hitbox shrink applied to an entity's visual bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inset {
    /// Offset of the hitbox from the left edge
    pub left: f32,
    /// Offset of the hitbox from the top edge
    pub top: f32,
    /// Total width removed
    pub shrink_w: f32,
    /// Total height removed
    pub shrink_h: f32,
}

impl Inset {
    pub const fn new(left: f32, top: f32, shrink_w: f32, shrink_h: f32) -> Self {
        Self {
            left,
            top,
            shrink_w,
            shrink_h,
        }
    }
}

/// Obstacle height tiers, sampled by cumulative probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightTiers {
    pub short: f32,
    pub medium: f32,
    pub tall: f32,
    /// Roll below this is short (40%)
    pub short_below: f32,
    /// Roll below this (and not short) is medium (38%); the rest is tall
    pub medium_below: f32,
}

impl Default for HeightTiers {
    fn default() -> Self {
        Self {
            short: 44.0,
            medium: 64.0,
            tall: 84.0,
            short_below: 0.40,
            medium_below: 0.78,
        }
    }
}

/// Particle burst parameters (paper poof)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstTuning {
    pub count: usize,
    pub vel_x: (f32, f32),
    pub vel_y: (f32, f32),
    pub life: (f32, f32),
    pub size: (f32, f32),
    pub spin: (f32, f32),
    /// Fraction of world gravity applied to particles
    pub gravity_scale: f32,
}

impl Default for BurstTuning {
    fn default() -> Self {
        Self {
            count: 12,
            vel_x: (-180.0, 120.0),
            vel_y: (-220.0, -60.0),
            life: (0.35, 0.65),
            size: (3.0, 6.0),
            spin: (-10.0, 10.0),
            gravity_scale: 0.55,
        }
    }
}

/// Complete balance table for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub base_speed: f32,
    pub speed_max: f32,
    pub speed_ramp_per_second: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub distance_scale: f32,
    pub max_step_dt: f32,

    pub actor_width: f32,
    pub actor_height: f32,
    /// Actor x as a fraction of viewport width; the layout product is taken in f64
    pub actor_x_fraction: f64,
    /// Ground line as a fraction of viewport height
    pub ground_fraction: f64,

    pub tiers: HeightTiers,
    pub obstacle_width: (f32, f32),
    /// Distance beyond the right edge a regular spawn lands at
    pub spawn_offset: (f32, f32),
    /// Distance beyond the right edge the run's first obstacle lands at
    pub seed_offset: f32,
    /// An obstacle is dropped once its trailing edge is this far past the left edge
    pub despawn_margin: f32,

    pub actor_inset: Inset,
    pub obstacle_inset: Inset,

    pub burst: BurstTuning,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            base_speed: BASE_SPEED,
            speed_max: SPEED_MAX,
            speed_ramp_per_second: SPEED_RAMP_PER_SECOND,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            distance_scale: DISTANCE_SCALE,
            max_step_dt: MAX_STEP_DT,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            actor_x_fraction: 0.18,
            ground_fraction: 0.78,
            tiers: HeightTiers::default(),
            obstacle_width: (42.0, 62.0),
            spawn_offset: (60.0, 160.0),
            seed_offset: 200.0,
            despawn_margin: 60.0,
            actor_inset: Inset::new(8.0, 10.0, 16.0, 10.0),
            obstacle_inset: Inset::new(4.0, 4.0, 8.0, 6.0),
            burst: BurstTuning::default(),
            max_particles: MAX_PARTICLES,
        }
    }
}

/// Why a tuning table was rejected
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value parsed but makes no physical sense
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse tuning: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

fn check_range(field: &'static str, (lo, hi): (f32, f32)) -> Result<(), TuningError> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(invalid(field, "must be finite"));
    }
    if hi < lo {
        return Err(invalid(field, "upper bound below lower bound"));
    }
    Ok(())
}

impl Tuning {
    /// Parse and validate a JSON tuning table
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults as a starting file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        let scalars = [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("base_speed", self.base_speed),
            ("speed_max", self.speed_max),
            ("speed_ramp_per_second", self.speed_ramp_per_second),
            ("distance_scale", self.distance_scale),
            ("max_step_dt", self.max_step_dt),
            ("seed_offset", self.seed_offset),
            ("despawn_margin", self.despawn_margin),
            ("burst.gravity_scale", self.burst.gravity_scale),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }

        if self.base_speed <= 0.0 {
            return Err(invalid("base_speed", "must be positive"));
        }
        if self.speed_max < self.base_speed {
            return Err(invalid("speed_max", "below base_speed"));
        }
        if self.speed_ramp_per_second < 0.0 {
            return Err(invalid("speed_ramp_per_second", "must not be negative"));
        }
        if self.max_step_dt <= 0.0 {
            return Err(invalid("max_step_dt", "must be positive"));
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity", "must point upward (negative)"));
        }

        check_range(
            "spawn_interval",
            (self.spawn_interval_min, self.spawn_interval_max),
        )?;
        if self.spawn_interval_min <= 0.0 {
            return Err(invalid("spawn_interval_min", "must be positive"));
        }

        if !(self.actor_width > 0.0 && self.actor_height > 0.0) {
            return Err(invalid("actor_size", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.actor_x_fraction) {
            return Err(invalid("actor_x_fraction", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.ground_fraction) {
            return Err(invalid("ground_fraction", "must be within [0, 1]"));
        }

        let tiers = &self.tiers;
        if !(tiers.short > 0.0 && tiers.medium > 0.0 && tiers.tall > 0.0) {
            return Err(invalid("tiers", "heights must be positive"));
        }
        if !(0.0 <= tiers.short_below
            && tiers.short_below <= tiers.medium_below
            && tiers.medium_below <= 1.0)
        {
            return Err(invalid("tiers", "thresholds must be ordered within [0, 1]"));
        }

        check_range("obstacle_width", self.obstacle_width)?;
        if self.obstacle_width.0 <= 0.0 {
            return Err(invalid("obstacle_width", "must be positive"));
        }
        check_range("spawn_offset", self.spawn_offset)?;

        check_range("burst.vel_x", self.burst.vel_x)?;
        check_range("burst.vel_y", self.burst.vel_y)?;
        check_range("burst.life", self.burst.life)?;
        check_range("burst.size", self.burst.size)?;
        check_range("burst.spin", self.burst.spin)?;
        if self.burst.life.0 <= 0.0 {
            return Err(invalid("burst.life", "must be positive"));
        }

        Ok(())
    }
}
