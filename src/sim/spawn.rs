//! Entity spawning and initial world population

use glam::Vec3;
use rand::Rng;

use super::state::{CAR_PALETTE, GameState, Scenery, SceneryKind, TrafficCar};
use crate::consts::*;

/// Spawn one traffic car far ahead of the player at a random lane offset
pub fn spawn_traffic_car(state: &mut GameState) {
    let x = state
        .rng
        .random_range(-TRAFFIC_SPAWN_HALF_WIDTH..TRAFFIC_SPAWN_HALF_WIDTH);
    let color = CAR_PALETTE[state.rng.random_range(0..CAR_PALETTE.len())];
    let id = state.next_entity_id();

    state.traffic.push(TrafficCar {
        id,
        pos: Vec3::new(x, 0.0, TRAFFIC_SPAWN_Z),
        color,
    });
}

/// Seed the scrolling world: buildings, trees, the particle pool, and the
/// first few traffic cars. Called once from `GameState::new`.
pub fn populate_world(state: &mut GameState) {
    // Buildings line both sides, evenly spaced in depth, pushed out past
    // the road edge
    for i in 0..BUILDING_COUNT {
        let side = if state.rng.random_bool(0.5) { 20.0 } else { -20.0 };
        let x = state.rng.random_range(-50.0..50.0) + side;
        state.scenery.push(Scenery {
            kind: SceneryKind::Building,
            pos: Vec3::new(x, 0.0, -(i as f32) * BUILDING_SPACING),
        });
    }

    // Trees sit closer to the road, denser in depth
    for i in 0..TREE_COUNT {
        let side = if state.rng.random_bool(0.5) { 15.0 } else { -15.0 };
        let x = state.rng.random_range(-50.0..50.0) + side;
        state.scenery.push(Scenery {
            kind: SceneryKind::Tree,
            pos: Vec3::new(x, 0.0, -(i as f32) * TREE_SPACING),
        });
    }

    // Ambient particles fill a box around the road
    for _ in 0..PARTICLE_COUNT {
        let x = state.rng.random_range(-10.0..10.0);
        let y = state.rng.random_range(0.0..20.0);
        let z = state.rng.random_range(-50.0..50.0);
        state.particles.push(Vec3::new(x, y, z));
    }

    // A little traffic on the road before the first frame
    for _ in 0..INITIAL_TRAFFIC {
        spawn_traffic_car(state);
    }
}
