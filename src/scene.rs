//! Renderer seam
//!
//! Drawing is an external collaborator: the host hands it a per-frame
//! snapshot of entity positions and colors, and what happens after that is
//! not this crate's business. `SceneSnapshot` is that hand-off.

use glam::Vec3;

use crate::sim::{GameState, PlayerCar, Scenery, TrafficCar};

/// One frame's worth of renderable state, borrowed from the simulation
#[derive(Debug)]
pub struct SceneSnapshot<'a> {
    pub player: &'a PlayerCar,
    pub traffic: &'a [TrafficCar],
    pub scenery: &'a [Scenery],
    pub particles: &'a [Vec3],
    /// Current forward speed, for motion effects
    pub speed: f32,
}

impl<'a> SceneSnapshot<'a> {
    /// Capture the current frame from the simulation
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            traffic: &state.traffic,
            scenery: &state.scenery,
            particles: &state.particles,
            speed: state.speed,
        }
    }
}

/// The external render collaborator
pub trait Renderer {
    /// Draw one frame. `time` is the host's monotonic clock in milliseconds.
    fn render(&mut self, scene: &SceneSnapshot<'_>, time: f64);
}

/// Renderer that draws nothing, for headless runs and tests
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &SceneSnapshot<'_>, _time: f64) {
        log::trace!(
            "frame: {} traffic, speed {:.1}",
            scene.traffic.len(),
            scene.speed
        );
    }
}
