//! Per-frame simulation step
//!
//! Advances the whole world by one frame delta: traffic scroll and
//! near-miss scoring, scenery/particle recycling, the spawn draw, and the
//! score-derived speed/difficulty curves.

use rand::Rng;

use super::spawn::spawn_traffic_car;
use super::state::{GameState, PlayerCar};
use crate::consts::*;

/// A discrete steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    /// Sign of the lateral move (+x is right)
    pub fn direction(self) -> f32 {
        match self {
            Steer::Left => -1.0,
            Steer::Right => 1.0,
        }
    }
}

/// Input commands for a single frame
///
/// The host maps at most one discrete tap/keypress per frame, matching the
/// original's 1:1 tap-to-move control.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Steer one step left or right
    pub steer: Option<Steer>,
    /// Begin the run (the first tap of a session lands here)
    pub start: bool,
}

/// Forward speed as a pure function of score: 30 plus up to +30 bonus,
/// saturating at score 30000
pub fn speed_for_score(score: u64) -> f32 {
    BASE_SPEED + (score as f32 / SPEED_SCORE_DIVISOR).min(MAX_SPEED_BONUS)
}

/// Spawn-rate multiplier as a pure function of score: 1 plus up to +1,
/// saturating at score 2000
pub fn difficulty_for_score(score: u64) -> f32 {
    1.0 + (score as f32 / DIFFICULTY_SCORE_DIVISOR).min(MAX_DIFFICULTY_BONUS)
}

/// Apply one discrete steer to the player
///
/// Moves past the lane boundary are rejected outright, not clamped to it.
/// A successful steer also sets the cosmetic roll.
pub fn steer(player: &mut PlayerCar, dir: Steer) {
    let new_x = player.pos.x + dir.direction() * STEER_STEP;
    if new_x.abs() < LANE_LIMIT {
        player.pos.x = new_x;
        player.tilt = -dir.direction() * STEER_TILT;
    }
}

/// Advance the game state by one frame
///
/// Before the run starts this is a no-op (a `start` input begins the run;
/// anything else leaves the state untouched). Negative or non-finite `dt`
/// is treated as zero movement.
pub fn advance(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.started {
        if input.start {
            state.start();
        }
        return;
    }

    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    if let Some(dir) = input.steer {
        steer(&mut state.player, dir);
    }

    state.time_ticks += 1;

    // Speed follows score, recomputed from scratch every tick
    state.speed = speed_for_score(state.score);

    // Combo decays in real time and collapses back to x1
    state.combo_timer -= dt;
    if state.combo_timer <= 0.0 {
        state.combo = 1;
    }

    let scroll = state.speed * dt;

    // Traffic rushes toward the player; passing close (but not overlapping)
    // scores a near miss. The check re-fires every tick the car stays in
    // the band - lingering cars keep feeding the combo.
    for car in &mut state.traffic {
        car.pos.z += scroll;

        if (car.pos.z - state.player.pos.z).abs() < NEAR_MISS_DEPTH {
            let lateral = (car.pos.x - state.player.pos.x).abs();
            if lateral > NEAR_MISS_MIN && lateral < NEAR_MISS_MAX {
                state.score = state
                    .score
                    .saturating_add(NEAR_MISS_POINTS.saturating_mul(state.combo as u64));
                state.combo += 1;
                state.combo_timer = COMBO_WINDOW;
            }
        }
    }

    // Drop cars that have passed the camera (retain, never splice mid-scan)
    state.traffic.retain(|car| car.pos.z <= TRAFFIC_DESPAWN_Z);

    // Recycle scenery to fake an endless road; at most one wrap per tick
    for object in &mut state.scenery {
        object.pos.z += scroll;
        if object.pos.z > SCENERY_WRAP_Z {
            object.pos.z -= SCENERY_WRAP_SPAN;
        }
    }

    // Particles stream past at double speed
    for particle in &mut state.particles {
        particle.z += scroll * PARTICLE_SPEED_SCALE;
        if particle.z > PARTICLE_WRAP_Z {
            particle.z -= PARTICLE_WRAP_SPAN;
        }
    }

    // Spawn draw: per-tick probability, deliberately NOT scaled by dt.
    // Spawn rate therefore tracks the host frame rate, same as the original.
    let spawn_p = SPAWN_BASE_PROBABILITY * state.difficulty;
    if state.rng.random_bool(spawn_p as f64) {
        spawn_traffic_car(state);
    }

    // Difficulty follows score, one tick behind the spawn draw above
    state.difficulty = difficulty_for_score(state.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    use crate::sim::state::{CarColor, TrafficCar};

    const DT: f32 = 1.0 / 60.0;

    /// A started session with no traffic on the road
    fn started_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state.traffic.clear();
        state
    }

    fn car_at(id: u32, x: f32, z: f32) -> TrafficCar {
        TrafficCar {
            id,
            pos: Vec3::new(x, 0.0, z),
            color: CarColor::Green,
        }
    }

    #[test]
    fn test_idle_state_is_untouched() {
        let state = GameState::new(42);
        let mut ticked = state.clone();

        advance(&mut ticked, &TickInput::default(), 0.5);

        // Bit-for-bit unchanged until the first start input
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            serde_json::to_string(&ticked).unwrap()
        );
    }

    #[test]
    fn test_first_start_input_begins_run() {
        let mut state = GameState::new(42);
        let input = TickInput {
            start: true,
            steer: Some(Steer::Left),
        };
        let x_before = state.player.pos.x;

        advance(&mut state, &input, DT);

        assert!(state.started);
        assert_eq!(state.score, 0);
        // The starting tap does not also steer
        assert_eq!(state.player.pos.x, x_before);
    }

    #[test]
    fn test_near_miss_scores_and_builds_combo() {
        let mut state = started_state(42);
        state.traffic.push(car_at(100, 1.5, 0.0));

        advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 10);
        assert_eq!(state.combo, 2);
        assert_eq!(state.combo_timer, COMBO_WINDOW);
    }

    #[test]
    fn test_overlap_too_close_scores_nothing() {
        // Lateral 0.5 is inside the overlap zone, not the near-miss band.
        // No crash state exists either - the car just passes through.
        let mut state = started_state(42);
        state.traffic.push(car_at(100, 0.5, 0.0));

        advance(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 1);
    }

    #[test]
    fn test_band_edges_are_exclusive() {
        let mut state = started_state(42);
        // Exactly on both edges with dt = 0 so positions hold still
        state.traffic.push(car_at(100, NEAR_MISS_MIN, 0.0));
        state.traffic.push(car_at(101, NEAR_MISS_MAX, 0.0));

        advance(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_lingering_car_scores_every_tick() {
        // Faithful original behavior: a car holding the band re-scores each
        // tick with an escalating combo (10, then 20).
        let mut state = started_state(42);
        state.traffic.push(car_at(100, 1.5, 0.0));

        advance(&mut state, &TickInput::default(), 0.0);
        advance(&mut state, &TickInput::default(), 0.0);

        assert_eq!(state.score, 30);
        assert_eq!(state.combo, 3);
    }

    #[test]
    fn test_combo_resets_when_timer_expires() {
        let mut state = started_state(42);
        state.combo = 5;
        state.combo_timer = 0.01;

        advance(&mut state, &TickInput::default(), 0.02);

        assert_eq!(state.combo, 1);
    }

    #[test]
    fn test_traffic_despawns_past_camera() {
        let mut state = started_state(42);
        state.traffic.push(car_at(100, 3.0, 25.0));

        advance(&mut state, &TickInput::default(), DT);

        assert!(state.traffic.iter().all(|c| c.id != 100));
    }

    #[test]
    fn test_scenery_wraps_exactly_once() {
        let mut state = started_state(42);
        state.scenery[0].pos.z = 51.0;

        // dt = 0 stops the scroll, so only the wrap check runs
        advance(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.scenery[0].pos.z, 51.0 - SCENERY_WRAP_SPAN);

        // Further ticks leave it alone
        advance(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.scenery[0].pos.z, 51.0 - SCENERY_WRAP_SPAN);
    }

    #[test]
    fn test_particles_wrap_at_double_speed() {
        let mut state = started_state(0);
        state.score = 0; // speed = 30
        state.particles[0] = Vec3::new(0.0, 5.0, 0.0);
        state.particles[1] = Vec3::new(0.0, 5.0, 50.5);

        advance(&mut state, &TickInput::default(), 0.1);

        // 30 * 2 * 0.1 = 6 units of travel
        assert!((state.particles[0].z - 6.0).abs() < 1e-4);
        assert!((state.particles[1].z - (56.5 - PARTICLE_WRAP_SPAN)).abs() < 1e-4);
    }

    #[test]
    fn test_steer_moves_and_tilts() {
        let mut player = PlayerCar::default();

        steer(&mut player, Steer::Right);
        assert_eq!(player.pos.x, 0.5);
        assert_eq!(player.tilt, -STEER_TILT);

        steer(&mut player, Steer::Left);
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.tilt, STEER_TILT);
    }

    #[test]
    fn test_steer_boundary_rejects_not_clamps() {
        let mut player = PlayerCar::default();
        player.pos.x = 5.8;

        steer(&mut player, Steer::Right);
        // 5.8 + 0.5 = 6.3 >= 6: the whole move is dropped
        assert_eq!(player.pos.x, 5.8);
        assert_eq!(player.tilt, 0.0);

        player.pos.x = 5.4;
        steer(&mut player, Steer::Right);
        assert!((player.pos.x - 5.9).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_dt_means_zero_movement() {
        let mut state = started_state(42);
        state.traffic.push(car_at(100, 3.0, -10.0));

        advance(&mut state, &TickInput::default(), f32::NAN);
        advance(&mut state, &TickInput::default(), -1.0);

        let car = state.traffic.iter().find(|c| c.id == 100).unwrap();
        assert_eq!(car.pos.z, -10.0);
        assert!(state.combo_timer.is_finite());
    }

    #[test]
    fn test_determinism() {
        // Same seed + same inputs = identical runs, spawn draws included
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);

        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                steer: Some(Steer::Left),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                steer: Some(Steer::Right),
                ..Default::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs {
                advance(&mut a, input, DT);
                advance(&mut b, input, DT);
            }
        }

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_spawned_traffic_appears_over_time() {
        // The spawn draw is per-tick (not dt-scaled), so a few thousand
        // ticks at difficulty 1 will produce plenty of cars.
        let mut state = started_state(7);

        let mut seen = 0usize;
        for _ in 0..2000 {
            advance(&mut state, &TickInput::default(), DT);
            seen = seen.max(state.traffic.len());
        }

        assert!(seen > 0, "no traffic spawned in 2000 ticks");
        for car in &state.traffic {
            assert!(car.pos.x.abs() < TRAFFIC_SPAWN_HALF_WIDTH + f32::EPSILON);
        }
    }

    proptest! {
        #[test]
        fn prop_speed_bounded_and_monotone(score in 0u64..1_000_000) {
            let s = speed_for_score(score);
            prop_assert!((BASE_SPEED..=BASE_SPEED + MAX_SPEED_BONUS).contains(&s));
            prop_assert!(speed_for_score(score + 1) >= s);
            if score >= 30_000 {
                prop_assert_eq!(s, BASE_SPEED + MAX_SPEED_BONUS);
            }
        }

        #[test]
        fn prop_difficulty_bounded_and_monotone(score in 0u64..1_000_000) {
            let d = difficulty_for_score(score);
            prop_assert!((1.0..=1.0 + MAX_DIFFICULTY_BONUS).contains(&d));
            prop_assert!(difficulty_for_score(score + 1) >= d);
            if score >= 2_000 {
                prop_assert_eq!(d, 1.0 + MAX_DIFFICULTY_BONUS);
            }
        }

        #[test]
        fn prop_score_never_decreases(seed in 0u64..1_000, ticks in 1usize..200) {
            let mut state = GameState::new(seed);
            state.start();
            let mut last = state.score;
            for _ in 0..ticks {
                advance(&mut state, &TickInput::default(), DT);
                prop_assert!(state.score >= last);
                prop_assert!(state.combo >= 1);
                last = state.score;
            }
        }
    }
}
