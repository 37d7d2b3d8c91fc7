//! Collision detection for rectangular geometry
//!
//! Actor and obstacles collide as axis-aligned boxes, each shrunk by an inset
//! so grazing contacts don't end a run. Obstacle scrolling, offscreen cleanup,
//! and dodge scoring ride along in the same pass.

use glam::Vec2;

use super::state::{Actor, Obstacle};
use crate::tuning::Inset;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Shrink by an inset; sizes never go negative
    pub fn inset(&self, inset: &Inset) -> Self {
        Self {
            min: self.min + Vec2::new(inset.left, inset.top),
            size: (self.size - Vec2::new(inset.shrink_w, inset.shrink_h)).max(Vec2::ZERO),
        }
    }

    /// Strict overlap; boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Inset hitbox of the actor
pub fn actor_hitbox(actor: &Actor, inset: &Inset) -> Aabb {
    Aabb::new(actor.x, actor.y, actor.w, actor.h).inset(inset)
}

/// Inset hitbox of an obstacle
pub fn obstacle_hitbox(obstacle: &Obstacle, inset: &Inset) -> Aabb {
    Aabb::new(obstacle.x, obstacle.y, obstacle.w, obstacle.h).inset(inset)
}

/// Parameters for one obstacle pass
#[derive(Debug, Clone, Copy)]
pub struct SweepParams {
    /// Leftward scroll this step
    pub scroll: f32,
    /// Obstacles whose trailing edge is left of `-despawn_margin` are dropped
    pub despawn_margin: f32,
    pub actor_inset: Inset,
    pub obstacle_inset: Inset,
}

/// Result of one obstacle pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SweepResult {
    /// Obstacles newly marked as passed
    pub dodged: u32,
    /// Obstacles garbage collected
    pub removed: usize,
    /// ID of the first obstacle hit, if any
    pub hit: Option<u32>,
}

/// Scroll, clean up, score, and collide every live obstacle, oldest first
///
/// Stops at the first collision; obstacles after it are left untouched for
/// this step.
pub fn sweep_obstacles(
    obstacles: &mut Vec<Obstacle>,
    actor: &Actor,
    params: &SweepParams,
) -> SweepResult {
    let mut result = SweepResult::default();
    let actor_box = actor_hitbox(actor, &params.actor_inset);

    let mut i = 0;
    while i < obstacles.len() {
        let obstacle = &mut obstacles[i];
        obstacle.x -= params.scroll;

        if obstacle.trailing_edge() < -params.despawn_margin {
            obstacles.remove(i);
            result.removed += 1;
            continue;
        }

        if !obstacle.passed && obstacle.trailing_edge() < actor.x {
            obstacle.passed = true;
            result.dodged += 1;
        }

        if actor_box.overlaps(&obstacle_hitbox(obstacle, &params.obstacle_inset)) {
            result.hit = Some(obstacle.id);
            break;
        }

        i += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn actor_at(x: f32, y: f32) -> Actor {
        Actor {
            x,
            y,
            w: 46.0,
            h: 72.0,
            vy: 0.0,
            on_ground: true,
            anim_phase: 0.0,
        }
    }

    fn obstacle(id: u32, x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            id,
            x,
            y,
            w,
            h,
            passed: false,
        }
    }

    fn params(scroll: f32) -> SweepParams {
        let tuning = Tuning::default();
        SweepParams {
            scroll,
            despawn_margin: tuning.despawn_margin,
            actor_inset: tuning.actor_inset,
            obstacle_inset: tuning.obstacle_inset,
        }
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_inset_shrinks_box() {
        let tuning = Tuning::default();
        let hitbox = actor_hitbox(&actor_at(100.0, 200.0), &tuning.actor_inset);
        assert_eq!(hitbox, Aabb::new(108.0, 210.0, 30.0, 62.0));
    }

    #[test]
    fn test_one_unit_overlap_after_insets_hits() {
        // Actor hitbox spans x [108, 138], y [210, 272]
        let actor = actor_at(100.0, 200.0);
        // Obstacle hitbox starts at (x+4, y+4); place it 1 unit inside both axes
        let mut obstacles = vec![obstacle(1, 137.0 - 4.0, 271.0 - 4.0, 50.0, 50.0)];
        let result = sweep_obstacles(&mut obstacles, &actor, &params(0.0));
        assert_eq!(result.hit, Some(1));
    }

    #[test]
    fn test_visual_overlap_inside_inset_is_forgiven() {
        let actor = actor_at(100.0, 200.0);
        // Visual boxes overlap by 6 px horizontally, but both insets eat it
        let mut obstacles = vec![obstacle(1, 140.0, 220.0, 50.0, 52.0)];
        let result = sweep_obstacles(&mut obstacles, &actor, &params(0.0));
        assert_eq!(result.hit, None);
    }

    #[test]
    fn test_scroll_and_despawn() {
        let actor = actor_at(100.0, 200.0);
        let mut obstacles = vec![obstacle(1, -95.0, 500.0, 45.0, 44.0)];
        let result = sweep_obstacles(&mut obstacles, &actor, &params(10.0));
        assert_eq!(result.removed, 0);
        assert_eq!(obstacles[0].x, -105.0);

        // Trailing edge sat exactly on the margin; one more step drops it
        let result = sweep_obstacles(&mut obstacles, &actor, &params(10.0));
        assert_eq!(result.removed, 1);
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_passed_counts_exactly_once() {
        let actor = actor_at(100.0, 0.0);
        let mut obstacles = vec![obstacle(1, 60.0, 500.0, 45.0, 44.0)];
        let first = sweep_obstacles(&mut obstacles, &actor, &params(10.0));
        assert_eq!(first.dodged, 1);
        assert!(obstacles[0].passed);
        let second = sweep_obstacles(&mut obstacles, &actor, &params(10.0));
        assert_eq!(second.dodged, 0);
    }

    #[test]
    fn test_first_collision_wins() {
        let actor = actor_at(100.0, 200.0);
        let mut obstacles = vec![
            obstacle(1, 110.0, 220.0, 50.0, 52.0),
            obstacle(2, 112.0, 220.0, 50.0, 52.0),
        ];
        let result = sweep_obstacles(&mut obstacles, &actor, &params(1.0));
        assert_eq!(result.hit, Some(1));
        // Processing stopped before the second obstacle moved
        assert_eq!(obstacles[1].x, 112.0);
    }
}
