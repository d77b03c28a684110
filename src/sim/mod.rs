//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-provided frame delta only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (Vec order, entity IDs monotone)
//! - No rendering or platform dependencies

pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::{populate_world, spawn_traffic_car};
pub use state::{CarColor, GameState, PlayerCar, RngState, Scenery, SceneryKind, TrafficCar};
pub use tick::{Steer, TickInput, advance, difficulty_for_score, speed_for_score, steer};
