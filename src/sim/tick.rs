//! Run controller and per-frame step
//!
//! Owns the Idle -> Running -> GameOver transitions and advances the
//! simulation by one variable timestep. Gameplay only moves while `Running`;
//! particles keep animating in every phase so the impact burst plays out
//! under the game-over overlay.

use glam::Vec2;

use super::collision::{self, SweepParams};
use super::particles;
use super::physics;
use super::random::RandomSource;
use super::spawner;
use super::state::{GameState, RunPhase};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap / Space / ArrowUp: starts a run when not running, jumps otherwise
    pub jump: bool,
    /// Start button: starts a run when not running, ignored otherwise
    pub start: bool,
    /// Demo mode - jumps on its own and leaves the idle screen
    pub autopilot: bool,
}

/// What happened during a tick, for HUD/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickEvents {
    pub started: bool,
    pub jumped: bool,
    pub landed: bool,
    pub spawned: bool,
    pub dodged: u32,
    pub game_over: bool,
}

/// Advance the game by `dt` seconds of wall time
///
/// `dt` is sanitized here: negative or non-finite deltas count as no time,
/// long gaps are clamped to `tuning.max_step_dt`.
pub fn tick<R: RandomSource>(
    state: &mut GameState<R>,
    input: &TickInput,
    dt: f32,
) -> TickEvents {
    let dt = crate::sanitize_dt(dt, state.tuning.max_step_dt);
    let mut events = TickEvents::default();

    let mut input = input.clone();
    if input.autopilot {
        match state.phase {
            RunPhase::Idle => input.start = true,
            RunPhase::Running => input.jump |= autopilot_wants_jump(state),
            RunPhase::GameOver => {}
        }
    }

    match state.phase {
        RunPhase::Idle | RunPhase::GameOver => {
            // Either trigger restarts; the tap that starts a run is not also a jump
            if input.start || input.jump {
                begin_run(state);
                events.started = true;
            }
        }
        RunPhase::Running => {
            if input.jump {
                events.jumped = physics::try_jump(&mut state.actor, &state.world);
            }
        }
    }

    if state.phase == RunPhase::Running && dt > 0.0 {
        step_running(state, dt, &mut events);
    }

    particles::update(
        &mut state.particles,
        state.world.gravity,
        state.tuning.burst.gravity_scale,
        dt,
    );

    events
}

/// Full reset and transition into `Running`
fn begin_run<R: RandomSource>(state: &mut GameState<R>) {
    state.reset();
    state.phase = RunPhase::Running;
    state.runs_started += 1;
    log::info!(
        "Run {} started (seed {:?}, viewport {}x{})",
        state.runs_started,
        state.seed,
        state.viewport.width,
        state.viewport.height
    );
}

/// Transition into `GameOver` with an impact burst at the contact point
fn end_run<R: RandomSource>(state: &mut GameState<R>) {
    let actor = &state.actor;
    let impact = Vec2::new(actor.x + actor.w * 0.7, actor.y + actor.h * 0.6);
    spawn_burst(state, impact);
    state.phase = RunPhase::GameOver;
    log::info!(
        "Caught! score {} dodged {} after {:.1}s (speed {:.0})",
        state.world.score(),
        state.world.dodged_count,
        state.run_time,
        state.world.speed
    );
}

fn spawn_burst<R: RandomSource>(state: &mut GameState<R>, origin: Vec2) {
    particles::burst(
        &mut state.particles,
        &mut state.random,
        &state.tuning.burst,
        origin,
        state.particle_limit,
    );
}

fn step_running<R: RandomSource>(state: &mut GameState<R>, dt: f32, events: &mut TickEvents) {
    state.run_time += dt;

    // Speed ramps up slowly over time
    let world = &mut state.world;
    world.speed =
        (world.speed + world.speed_ramp_per_second * dt).clamp(world.base_speed, world.speed_max);
    world.distance_traveled += world.speed * dt * state.tuning.distance_scale;
    log::trace!("speed {:.1} distance {:.2}", world.speed, world.distance_traveled);

    let outcome = physics::integrate_actor(&mut state.actor, &state.world, dt);
    if let Some(at) = outcome.landed_at {
        log::debug!("Landed at x={:.0}", at.x);
        spawn_burst(state, at);
        events.landed = true;
    }

    events.spawned = spawner::update(state, dt);

    let params = SweepParams {
        scroll: state.world.speed * dt,
        despawn_margin: state.tuning.despawn_margin,
        actor_inset: state.tuning.actor_inset,
        obstacle_inset: state.tuning.obstacle_inset,
    };
    let sweep = collision::sweep_obstacles(&mut state.obstacles, &state.actor, &params);
    state.world.dodged_count += sweep.dodged;
    events.dodged = sweep.dodged;

    if let Some(id) = sweep.hit {
        log::debug!("Collided with obstacle {}", id);
        end_run(state);
        events.game_over = true;
    }
}

/// Jump when the next obstacle is about to pass under the top of the arc
fn autopilot_wants_jump<R: RandomSource>(state: &GameState<R>) -> bool {
    if !state.actor.on_ground {
        return false;
    }
    let actor = &state.actor;
    let world = &state.world;
    let apex_time = -world.jump_velocity / world.gravity;

    state
        .obstacles
        .iter()
        .filter(|o| o.trailing_edge() >= actor.x)
        .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
        .is_some_and(|o| {
            let gap = o.x - actor.front();
            let lead = world.speed * apex_time - (o.w + actor.w) * 0.5;
            gap <= lead
        })
}

impl<R: RandomSource> GameState<R> {
    /// Frame driver entry point: advance by one display frame
    pub fn step(&mut self, dt: f32) -> TickEvents {
        tick(self, &TickInput::default(), dt)
    }

    /// Input entry point: start a run if not running, otherwise jump
    ///
    /// Takes effect immediately; no time passes.
    pub fn trigger_jump(&mut self) -> TickEvents {
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(self, &input, 0.0)
    }

    /// Start button: begins a run from Idle or GameOver, ignored while running
    pub fn start(&mut self) -> TickEvents {
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(self, &input, 0.0)
    }
}
