//! Game state and entity records
//!
//! Everything the per-frame step reads or mutates lives here.

use glam::Vec3;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Cosmetic traffic car paint, drawn from a fixed palette.
///
/// Has no effect on the simulation; carried so the renderer can tell cars
/// apart frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarColor {
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

/// The spawn palette, in the original draw order
pub const CAR_PALETTE: [CarColor; 5] = [
    CarColor::Green,
    CarColor::Blue,
    CarColor::Yellow,
    CarColor::Magenta,
    CarColor::Cyan,
];

impl CarColor {
    /// Packed 0xRRGGBB value for the renderer
    pub fn as_rgb(self) -> u32 {
        match self {
            CarColor::Green => 0x00ff00,
            CarColor::Blue => 0x0000ff,
            CarColor::Yellow => 0xffff00,
            CarColor::Magenta => 0xff00ff,
            CarColor::Cyan => 0x00ffff,
        }
    }
}

/// The player's car
///
/// x slides within the lane bounds; y and z never move - the world scrolls
/// past the player instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCar {
    pub pos: Vec3,
    /// Cosmetic roll from the last steer input
    pub tilt: f32,
}

impl Default for PlayerCar {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            tilt: 0.0,
        }
    }
}

/// An oncoming traffic car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficCar {
    pub id: u32,
    pub pos: Vec3,
    pub color: CarColor,
}

/// What a scenery slot contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneryKind {
    Building,
    Tree,
}

/// A recycled background object (building or roadside tree)
///
/// Only z matters to the simulation; x/y are fixed at seed time and ride
/// along for the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenery {
    pub kind: SceneryKind,
    pub pos: Vec3,
}

/// Session RNG wrapper (PCG-32, seeded once per session)
///
/// Every random draw in the simulation goes through this so that a seed
/// fully determines a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState(Pcg32);

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl RngCore for RngState {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Session RNG
    pub rng: RngState,
    /// Score (saturating; monotone while running)
    pub score: u64,
    /// Combo multiplier, always >= 1
    pub combo: u32,
    /// Seconds left before the combo resets
    pub combo_timer: f32,
    /// Spawn-rate multiplier, derived from score every tick
    pub difficulty: f32,
    /// Forward speed, derived from score every tick
    pub speed: f32,
    /// False until the first input; the step is a no-op until then
    pub started: bool,
    /// Ticks advanced since session start
    pub time_ticks: u64,
    /// The player's car
    pub player: PlayerCar,
    /// Active oncoming traffic (ids monotone, order stable)
    pub traffic: Vec<TrafficCar>,
    /// Recycled buildings and trees (fixed count, never removed)
    pub scenery: Vec<Scenery>,
    /// Ambient particle pool (fixed count, cosmetic)
    pub particles: Vec<Vec3>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session with the given seed and a fully populated world
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: RngState::new(seed),
            score: 0,
            combo: 1,
            combo_timer: 0.0,
            difficulty: 1.0,
            speed: BASE_SPEED,
            started: false,
            time_ticks: 0,
            player: PlayerCar::default(),
            traffic: Vec::new(),
            scenery: Vec::with_capacity(BUILDING_COUNT + TREE_COUNT),
            particles: Vec::with_capacity(PARTICLE_COUNT),
            next_id: 1,
        };

        super::spawn::populate_world(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin the run: first input lands here instead of steering
    pub fn start(&mut self) {
        self.started = true;
        self.score = 0;
        self.combo = 1;
        self.difficulty = 1.0;
    }
}
