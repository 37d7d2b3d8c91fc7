//! Read-only view handed to the renderer and HUD
//!
//! The renderer never touches `GameState` directly; it draws from a snapshot
//! taken after each step. Snapshots serialize to JSON for the browser side.

use serde::Serialize;

use super::random::RandomSource;
use super::state::{GameState, RunPhase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub on_ground: bool,
    pub anim_phase: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation: f32,
    /// Opacity multiplier, 1 at birth fading linearly to 0
    pub remaining_life_fraction: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub actor: ActorView,
    pub obstacles: Vec<ObstacleView>,
    pub particles: Vec<ParticleView>,
    /// Floored distance
    pub score: u64,
    pub dodged: u32,
    pub ground_level: f32,
    pub speed: f32,
}

impl Snapshot {
    pub fn capture<R: RandomSource>(state: &GameState<R>) -> Self {
        let actor = &state.actor;
        Self {
            phase: state.phase,
            actor: ActorView {
                x: actor.x,
                y: actor.y,
                w: actor.w,
                h: actor.h,
                on_ground: actor.on_ground,
                anim_phase: actor.anim_phase,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    x: o.x,
                    y: o.y,
                    w: o.w,
                    h: o.h,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                    rotation: p.rotation,
                    remaining_life_fraction: p.remaining_life_fraction(),
                })
                .collect(),
            score: state.world.score(),
            dodged: state.world.dodged_count,
            ground_level: state.world.ground_level,
            speed: state.world.speed,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
