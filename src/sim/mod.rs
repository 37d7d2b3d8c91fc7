//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time arrives as a clamped delta from the frame driver
//! - Injected RNG only
//! - Stable iteration order (oldest obstacle first)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod random;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, SweepParams, SweepResult, sweep_obstacles};
pub use random::{RandomSource, ScriptedRandom};
pub use snapshot::{ActorView, ObstacleView, ParticleView, Snapshot};
pub use spawner::HeightTier;
pub use state::{Actor, GameState, Obstacle, Particle, RunPhase, Viewport, World};
pub use tick::{TickEvents, TickInput, tick};
