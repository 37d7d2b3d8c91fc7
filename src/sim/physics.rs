//! Actor physics
//!
//! Semi-implicit Euler under gravity with a hard ground clamp. The ground
//! clamp runs after integration, so no velocity or step size can leave the
//! actor below the running surface.

use glam::Vec2;

use super::state::{Actor, World};

/// What happened to the actor during one integration step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicsOutcome {
    /// Point to spawn a landing burst at, if the actor touched down this step
    pub landed_at: Option<Vec2>,
}

/// Advance the actor's vertical motion by `dt` seconds
pub fn integrate_actor(actor: &mut Actor, world: &World, dt: f32) -> PhysicsOutcome {
    let was_airborne = !actor.on_ground;

    actor.anim_phase += dt;
    actor.vy += world.gravity * dt;
    actor.y += actor.vy * dt;

    let ground_top = actor.ground_top(world.ground_level);
    if actor.y >= ground_top {
        actor.y = ground_top;
        actor.vy = 0.0;
        actor.on_ground = true;
        if was_airborne {
            return PhysicsOutcome {
                landed_at: Some(Vec2::new(
                    actor.x + actor.w * 0.55,
                    world.ground_level - 6.0,
                )),
            };
        }
    } else {
        actor.on_ground = false;
    }

    PhysicsOutcome::default()
}

/// Launch the actor if it is standing; returns whether the jump happened
pub fn try_jump(actor: &mut Actor, world: &World) -> bool {
    if !actor.on_ground {
        return false;
    }
    actor.vy = world.jump_velocity;
    actor.on_ground = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::tuning::Tuning;

    fn setup() -> (Actor, World) {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1000.0, 600.0);
        let world = World::from_tuning(&tuning, viewport);
        let actor = Actor::new(&tuning, viewport, world.ground_level);
        (actor, world)
    }

    #[test]
    fn test_standing_actor_stays_grounded() {
        let (mut actor, world) = setup();
        let outcome = integrate_actor(&mut actor, &world, 1.0 / 60.0);
        assert!(actor.on_ground);
        assert_eq!(actor.vy, 0.0);
        assert_eq!(actor.y, actor.ground_top(world.ground_level));
        assert!(outcome.landed_at.is_none());
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (mut actor, world) = setup();
        assert!(try_jump(&mut actor, &world));
        assert_eq!(actor.vy, -900.0);
        assert!(!actor.on_ground);
        // No double jump
        assert!(!try_jump(&mut actor, &world));
        assert_eq!(actor.vy, -900.0);
    }

    #[test]
    fn test_jump_reaches_apex_near_expected_time() {
        let (mut actor, world) = setup();
        try_jump(&mut actor, &world);
        let dt = 1.0 / 600.0;
        let steps = (900.0_f32 / 2200.0 / dt).round() as usize;
        for _ in 0..steps {
            integrate_actor(&mut actor, &world, dt);
        }
        assert!(actor.vy.abs() < 5.0, "vy at apex was {}", actor.vy);
        assert!(!actor.on_ground);
    }

    #[test]
    fn test_landing_reports_burst_point_once() {
        let (mut actor, world) = setup();
        try_jump(&mut actor, &world);
        let mut landings = Vec::new();
        for _ in 0..200 {
            if let Some(at) = integrate_actor(&mut actor, &world, 1.0 / 60.0).landed_at {
                landings.push(at);
            }
        }
        assert_eq!(landings.len(), 1);
        assert_eq!(landings[0].x, actor.x + actor.w * 0.55);
        assert_eq!(landings[0].y, world.ground_level - 6.0);
        assert!(actor.on_ground);
    }

    #[test]
    fn test_huge_downward_velocity_never_sinks() {
        let (mut actor, world) = setup();
        actor.on_ground = false;
        actor.y -= 10.0;
        actor.vy = 1.0e9;
        integrate_actor(&mut actor, &world, 1.0 / 30.0);
        assert_eq!(actor.y, actor.ground_top(world.ground_level));
        assert!(actor.on_ground);
        assert_eq!(actor.vy, 0.0);
    }
}
