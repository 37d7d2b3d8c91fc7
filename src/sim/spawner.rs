//! Obstacle spawning
//!
//! Countdown driven. The countdown is resampled after every spawn and scaled
//! by `base_speed / speed`, so obstacles stay roughly evenly spaced in
//! distance as the scroll speed ramps up. The interval is not floored at max
//! speed, so obstacles crowd together there.

use super::random::RandomSource;
use super::state::{GameState, Obstacle};
use crate::tuning::{HeightTiers, Tuning};

/// Height tier of a spawned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightTier {
    Short,
    Medium,
    Tall,
}

impl HeightTier {
    /// Map a unit roll onto the cumulative tier thresholds
    pub fn from_roll(roll: f32, tiers: &HeightTiers) -> Self {
        if roll < tiers.short_below {
            HeightTier::Short
        } else if roll < tiers.medium_below {
            HeightTier::Medium
        } else {
            HeightTier::Tall
        }
    }

    pub fn height(self, tiers: &HeightTiers) -> f32 {
        match self {
            HeightTier::Short => tiers.short,
            HeightTier::Medium => tiers.medium,
            HeightTier::Tall => tiers.tall,
        }
    }
}

/// Roll tier and width for a new obstacle standing on the ground at `x`
fn roll_obstacle(
    random: &mut impl RandomSource,
    tuning: &Tuning,
    id: u32,
    x: f32,
    ground_level: f32,
) -> Obstacle {
    let tier = HeightTier::from_roll(random.unit(), &tuning.tiers);
    let h = tier.height(&tuning.tiers);
    let w = random.range_of(tuning.obstacle_width).floor();
    Obstacle {
        id,
        x,
        y: ground_level - h,
        w,
        h,
        passed: false,
    }
}

/// Push a freshly rolled obstacle at `x`
pub fn spawn_obstacle<R: RandomSource>(state: &mut GameState<R>, x: f32) {
    let id = state.next_entity_id();
    let obstacle = roll_obstacle(
        &mut state.random,
        &state.tuning,
        id,
        x,
        state.world.ground_level,
    );
    log::debug!(
        "Spawned obstacle {} at x={:.0} ({}x{})",
        obstacle.id,
        obstacle.x,
        obstacle.w,
        obstacle.h
    );
    state.obstacles.push(obstacle);
}

/// Force the run's first obstacle a fixed distance beyond the right edge
pub fn seed_obstacle<R: RandomSource>(state: &mut GameState<R>) {
    let x = state.world.viewport_width + state.tuning.seed_offset;
    spawn_obstacle(state, x);
}

/// Next countdown after a spawn at the current speed
pub fn next_interval(
    random: &mut impl RandomSource,
    min: f32,
    max: f32,
    base_speed: f32,
    speed: f32,
) -> f32 {
    random.range(min, max) * (base_speed / speed)
}

/// Advance the spawn countdown by `dt`; spawns at most one obstacle
///
/// Returns true if an obstacle was spawned this step.
pub fn update<R: RandomSource>(state: &mut GameState<R>, dt: f32) -> bool {
    state.world.next_spawn_countdown -= dt;
    if state.world.next_spawn_countdown > 0.0 {
        return false;
    }

    let x = state.world.viewport_width + state.random.range_of(state.tuning.spawn_offset);
    spawn_obstacle(state, x);

    let world = &state.world;
    let (min, max, base, speed) = (
        world.spawn_interval_min,
        world.spawn_interval_max,
        world.base_speed,
        world.speed,
    );
    state.world.next_spawn_countdown = next_interval(&mut state.random, min, max, base, speed);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;
    use crate::sim::state::Viewport;

    fn scripted(values: Vec<f32>) -> GameState<ScriptedRandom> {
        GameState::with_random(
            ScriptedRandom::new(values),
            Viewport::new(1000.0, 600.0),
            Tuning::default(),
        )
    }

    #[test]
    fn test_tier_thresholds() {
        let tiers = HeightTiers::default();
        assert_eq!(HeightTier::from_roll(0.0, &tiers), HeightTier::Short);
        assert_eq!(HeightTier::from_roll(0.399, &tiers), HeightTier::Short);
        assert_eq!(HeightTier::from_roll(0.40, &tiers), HeightTier::Medium);
        assert_eq!(HeightTier::from_roll(0.779, &tiers), HeightTier::Medium);
        assert_eq!(HeightTier::from_roll(0.78, &tiers), HeightTier::Tall);
        assert_eq!(HeightTier::Tall.height(&tiers), 84.0);
    }

    #[test]
    fn test_tier_distribution_matches_weights() {
        use rand::SeedableRng;
        let tiers = HeightTiers::default();
        let mut rng = rand_pcg::Pcg32::seed_from_u64(2024);
        let mut counts = [0u32; 3];
        let n = 20_000;
        for _ in 0..n {
            match HeightTier::from_roll(rng.unit(), &tiers) {
                HeightTier::Short => counts[0] += 1,
                HeightTier::Medium => counts[1] += 1,
                HeightTier::Tall => counts[2] += 1,
            }
        }
        let share = |c: u32| c as f32 / n as f32;
        assert!((share(counts[0]) - 0.40).abs() < 0.02);
        assert!((share(counts[1]) - 0.38).abs() < 0.02);
        assert!((share(counts[2]) - 0.22).abs() < 0.02);
    }

    #[test]
    fn test_seed_obstacle_position_and_geometry() {
        // reset: countdown roll, then tier roll (0.5 -> medium), width roll
        let state = scripted(vec![0.5]);
        let o = &state.obstacles[0];
        assert_eq!(o.x, 1200.0);
        assert_eq!(o.h, 64.0);
        assert_eq!(o.w, 52.0);
        assert_eq!(o.y + o.h, state.world.ground_level);
        assert!(!o.passed);
    }

    #[test]
    fn test_update_waits_for_countdown() {
        let mut state = scripted(vec![0.5]);
        state.world.next_spawn_countdown = 0.5;
        assert!(!update(&mut state, 0.2));
        assert_eq!(state.obstacles.len(), 1);
        assert!((state.world.next_spawn_countdown - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_update_spawns_beyond_right_edge() {
        let mut state = scripted(vec![0.0]);
        state.world.next_spawn_countdown = 0.01;
        assert!(update(&mut state, 0.02));
        assert_eq!(state.obstacles.len(), 2);
        let o = &state.obstacles[1];
        assert_eq!(o.x, 1060.0);
        assert_eq!(o.h, 44.0);
        assert_eq!(o.w, 42.0);
    }

    #[test]
    fn test_resize_mid_run_keeps_spawn_edge() {
        let mut state = scripted(vec![0.3, 0.9, 0.6]);
        state.start();
        state.set_viewport(Viewport::new(3000.0, 600.0));
        for _ in 0..5 {
            state.world.next_spawn_countdown = 0.0;
            assert!(update(&mut state, 0.01));
            let x = state.obstacles.last().map(|o| o.x).unwrap_or_default();
            assert!((1060.0..1160.0).contains(&x), "spawned at {x}");
        }
    }

    #[test]
    fn test_interval_compresses_with_speed() {
        let mut rng = ScriptedRandom::constant(0.5);
        let slow = next_interval(&mut rng, 0.95, 1.65, 380.0, 380.0);
        let fast = next_interval(&mut rng, 0.95, 1.65, 380.0, 760.0);
        assert!((slow - 1.3).abs() < 1e-5);
        assert!((fast - 0.65).abs() < 1e-5);
    }
}
