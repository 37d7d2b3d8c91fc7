//! Paper-poof particles
//!
//! Purely cosmetic. Nothing in the gameplay path reads particle state.

use glam::Vec2;

use super::random::RandomSource;
use super::state::Particle;
use crate::tuning::BurstTuning;

/// Spawn one burst at `origin`, capped so the live count never exceeds `limit`
///
/// Returns the number of particles actually added.
pub fn burst(
    particles: &mut Vec<Particle>,
    random: &mut impl RandomSource,
    tuning: &BurstTuning,
    origin: Vec2,
    limit: usize,
) -> usize {
    let room = limit.saturating_sub(particles.len());
    let count = tuning.count.min(room);
    particles.reserve(count);

    for _ in 0..count {
        let vel = Vec2::new(random.range_of(tuning.vel_x), random.range_of(tuning.vel_y));
        let life = random.range_of(tuning.life);
        let size = random.range_of(tuning.size);
        let rotation = random.range(0.0, std::f32::consts::TAU);
        let spin = random.range_of(tuning.spin);
        particles.push(Particle {
            pos: origin,
            vel,
            age: 0.0,
            life,
            size,
            rotation,
            spin,
        });
    }

    count
}

/// Age and integrate every particle; expired ones are removed before they move
pub fn update(particles: &mut Vec<Particle>, gravity: f32, gravity_scale: f32, dt: f32) {
    particles.retain_mut(|p| {
        p.age += dt;
        if p.age >= p.life {
            return false;
        }
        p.vel.y += gravity * gravity_scale * dt;
        p.pos += p.vel * dt;
        p.rotation += p.spin * dt;
        true
    });
}
