//! Game state and core simulation types
//!
//! The entity store for a run: world scalars, the actor, and the ordered
//! obstacle and particle collections. Everything is reset on each transition
//! into `Running`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::spawner;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Not started yet, overlay visible
    #[default]
    Idle,
    /// Simulation stepping each frame
    Running,
    /// Caught; waits for a restart trigger
    GameOver,
}

/// Drawing surface size, supplied by the renderer when a run resets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: if width.is_finite() { width.max(1.0) } else { 1.0 },
            height: if height.is_finite() { height.max(1.0) } else { 1.0 },
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// World scalars shared by every subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub base_speed: f32,
    /// Current scroll speed, always within [base_speed, speed_max]
    pub speed: f32,
    pub speed_max: f32,
    pub speed_ramp_per_second: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    /// Seconds until the next obstacle spawns
    pub next_spawn_countdown: f32,
    /// Score distance, monotonic while running
    pub distance_traveled: f32,
    pub dodged_count: u32,
    /// Vertical coordinate of the running surface
    pub ground_level: f32,
    /// Viewport width captured at reset; spawn positions are measured from it
    pub viewport_width: f32,
}

/// Floor of `extent * fraction`, multiplied in f64
fn layout_floor(extent: f32, fraction: f64) -> f32 {
    (f64::from(extent) * fraction).floor() as f32
}

impl World {
    pub fn from_tuning(tuning: &Tuning, viewport: Viewport) -> Self {
        Self {
            gravity: tuning.gravity,
            jump_velocity: tuning.jump_velocity,
            base_speed: tuning.base_speed,
            speed: tuning.base_speed,
            speed_max: tuning.speed_max,
            speed_ramp_per_second: tuning.speed_ramp_per_second,
            spawn_interval_min: tuning.spawn_interval_min,
            spawn_interval_max: tuning.spawn_interval_max,
            next_spawn_countdown: 0.0,
            distance_traveled: 0.0,
            dodged_count: 0,
            ground_level: layout_floor(viewport.height, tuning.ground_fraction),
            viewport_width: viewport.width,
        }
    }

    /// Displayed score
    pub fn score(&self) -> u64 {
        self.distance_traveled.max(0.0).floor() as u64
    }
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Fixed after reset
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vy: f32,
    pub on_ground: bool,
    /// Seconds of run animation; drives bob/step cycles only
    pub anim_phase: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning, viewport: Viewport, ground_level: f32) -> Self {
        Self {
            x: layout_floor(viewport.width, tuning.actor_x_fraction),
            y: ground_level - tuning.actor_height,
            w: tuning.actor_width,
            h: tuning.actor_height,
            vy: 0.0,
            on_ground: true,
            anim_phase: 0.0,
        }
    }

    /// Top of the actor when standing on the ground
    pub fn ground_top(&self, ground_level: f32) -> f32 {
        ground_level - self.h
    }

    /// Leading (right) edge
    pub fn front(&self) -> f32 {
        self.x + self.w
    }
}

/// A paper stack scrolling toward the actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Set once the trailing edge clears the actor
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.w
    }
}

/// A cosmetic paper scrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: glam::Vec2,
    pub vel: glam::Vec2,
    pub age: f32,
    pub life: f32,
    pub size: f32,
    pub rotation: f32,
    pub spin: f32,
}

impl Particle {
    /// 1 at birth, 0 at expiry
    pub fn remaining_life_fraction(&self) -> f32 {
        crate::lerp_clamped(1.0, 0.0, self.age / self.life)
    }
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = Pcg32> {
    /// Seed of the built-in RNG, if one was used
    pub seed: Option<u64>,
    pub phase: RunPhase,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub world: World,
    pub actor: Actor,
    /// Live obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Cap on live particles
    pub particle_limit: usize,
    /// Seconds spent in `Running` this run
    pub run_time: f32,
    /// Runs started since construction
    pub runs_started: u32,
    pub(crate) random: R,
    next_id: u32,
}

impl GameState<Pcg32> {
    /// Create an idle state with a seeded PCG generator
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut state = Self::with_random(Pcg32::seed_from_u64(seed), viewport, tuning);
        state.seed = Some(seed);
        state
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create an idle state drawing randomness from `random`
    pub fn with_random(random: R, viewport: Viewport, tuning: Tuning) -> Self {
        let world = World::from_tuning(&tuning, viewport);
        let actor = Actor::new(&tuning, viewport, world.ground_level);
        let particle_limit = tuning.max_particles;
        let mut state = Self {
            seed: None,
            phase: RunPhase::Idle,
            tuning,
            viewport,
            world,
            actor,
            obstacles: Vec::new(),
            particles: Vec::new(),
            particle_limit,
            run_time: 0.0,
            runs_started: 0,
            random,
            next_id: 1,
        };

        // Idle screen shows the same scene a run starts with
        state.reset();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Change the drawing surface; takes effect at the next reset
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Put actor, world, and collections back to their run-start values
    ///
    /// Leaves `phase` alone; the run controller decides the transition.
    pub fn reset(&mut self) {
        self.world = World::from_tuning(&self.tuning, self.viewport);
        self.actor = Actor::new(&self.tuning, self.viewport, self.world.ground_level);
        self.world.next_spawn_countdown = self
            .random
            .range(self.world.spawn_interval_min, self.world.spawn_interval_max);
        self.obstacles.clear();
        self.particles.clear();
        self.run_time = 0.0;

        spawner::seed_obstacle(self);
    }

    /// Mutable access to the injected random source
    pub fn random_mut(&mut self) -> &mut R {
        &mut self.random
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;

    #[test]
    fn test_new_state_is_idle_with_one_obstacle() {
        let state = GameState::new(42, Viewport::new(800.0, 600.0), Tuning::default());
        assert_eq!(state.phase, RunPhase::Idle);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.particles.is_empty());
        assert_eq!(state.world.ground_level, 468.0);
        assert_eq!(state.actor.x, 144.0);
        assert_eq!(state.actor.y, 468.0 - 72.0);
        assert!(state.actor.on_ground);
    }

    #[test]
    fn test_layout_floors_in_double_precision() {
        // 600 * 0.78f32 is 467.99997; the layout line must still land on 468
        for (w, h, x, ground) in [
            (1000.0, 600.0, 180.0, 468.0),
            (1280.0, 720.0, 230.0, 561.0),
            (1920.0, 1080.0, 345.0, 842.0),
            (375.0, 667.0, 67.0, 520.0),
        ] {
            let state = GameState::new(1, Viewport::new(w, h), Tuning::default());
            assert_eq!(state.world.ground_level, ground, "ground at {w}x{h}");
            assert_eq!(state.actor.x, x, "actor x at {w}x{h}");
        }
    }

    #[test]
    fn test_set_viewport_waits_for_reset() {
        let mut state = GameState::new(2, Viewport::new(1000.0, 600.0), Tuning::default());
        state.set_viewport(Viewport::new(3000.0, 900.0));
        assert_eq!(state.world.viewport_width, 1000.0);
        assert_eq!(state.world.ground_level, 468.0);

        state.reset();
        assert_eq!(state.world.viewport_width, 3000.0);
        assert_eq!(state.world.ground_level, 702.0);
        assert_eq!(state.obstacles[0].x, 3200.0);
    }

    #[test]
    fn test_reset_countdown_within_interval() {
        let state = GameState::with_random(
            ScriptedRandom::constant(0.5),
            Viewport::default(),
            Tuning::default(),
        );
        assert!((state.world.next_spawn_countdown - 1.3).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_rejects_degenerate_sizes() {
        let vp = Viewport::new(-5.0, f32::NAN);
        assert_eq!(vp.width, 1.0);
        assert_eq!(vp.height, 1.0);
    }

    #[test]
    fn test_particle_fraction_fades_linearly() {
        let mut p = Particle {
            pos: glam::Vec2::ZERO,
            vel: glam::Vec2::ZERO,
            age: 0.0,
            life: 0.5,
            size: 4.0,
            rotation: 0.0,
            spin: 0.0,
        };
        assert_eq!(p.remaining_life_fraction(), 1.0);
        p.age = 0.25;
        assert!((p.remaining_life_fraction() - 0.5).abs() < 1e-6);
        p.age = 0.75;
        assert_eq!(p.remaining_life_fraction(), 0.0);
    }

    #[test]
    fn test_score_floors_distance() {
        let mut world = World::from_tuning(&Tuning::default(), Viewport::default());
        world.distance_traveled = 12.9;
        assert_eq!(world.score(), 12);
    }
}
