//! Neon Highway - an arcade traffic-dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, scoring, per-frame step)
//! - `scene`: Snapshot of renderable state + the renderer seam
//! - `hud`: Score/high-score/combo view-model
//! - `settings`: Quality presets and preferences

pub mod hud;
pub mod scene;
pub mod settings;
pub mod sim;

pub use hud::HudModel;
pub use scene::{NullRenderer, Renderer, SceneSnapshot};
pub use settings::{QualityPreset, Settings};

/// Game tuning constants
pub mod consts {
    /// Base forward speed (world units per second)
    pub const BASE_SPEED: f32 = 30.0;
    /// Maximum speed bonus from score (reached at score 30000)
    pub const MAX_SPEED_BONUS: f32 = 30.0;
    /// Score points per unit of speed bonus
    pub const SPEED_SCORE_DIVISOR: f32 = 1000.0;

    /// Player lane half-width; steers past this are rejected outright
    pub const LANE_LIMIT: f32 = 6.0;
    /// Lateral distance moved per steer input
    pub const STEER_STEP: f32 = 0.5;
    /// Cosmetic roll applied on a successful steer
    pub const STEER_TILT: f32 = 0.1;

    /// Depth at which traffic spawns (far ahead of the player)
    pub const TRAFFIC_SPAWN_Z: f32 = -50.0;
    /// Lateral spawn band half-width for traffic
    pub const TRAFFIC_SPAWN_HALF_WIDTH: f32 = 5.0;
    /// Depth past the camera where traffic despawns
    pub const TRAFFIC_DESPAWN_Z: f32 = 20.0;
    /// Traffic cars pre-spawned at session start
    pub const INITIAL_TRAFFIC: usize = 5;
    /// Base per-tick spawn probability (scaled by difficulty, NOT by dt)
    pub const SPAWN_BASE_PROBABILITY: f32 = 0.02;

    /// Longitudinal window for a near miss
    pub const NEAR_MISS_DEPTH: f32 = 2.0;
    /// Lateral band for a near miss: closer than this is a straight overlap
    pub const NEAR_MISS_MIN: f32 = 0.8;
    /// Lateral band for a near miss: farther than this is just traffic
    pub const NEAR_MISS_MAX: f32 = 2.0;
    /// Points awarded per near miss (multiplied by combo)
    pub const NEAR_MISS_POINTS: u64 = 10;
    /// Seconds of combo left after a scoring event
    pub const COMBO_WINDOW: f32 = 3.0;

    /// Scenery recycles once it scrolls past this depth
    pub const SCENERY_WRAP_Z: f32 = 50.0;
    /// Distance scenery is pushed back on recycle
    pub const SCENERY_WRAP_SPAN: f32 = 200.0;
    /// Buildings seeded at session start
    pub const BUILDING_COUNT: usize = 20;
    /// Depth spacing between seeded buildings
    pub const BUILDING_SPACING: f32 = 20.0;
    /// Trees seeded at session start
    pub const TREE_COUNT: usize = 30;
    /// Depth spacing between seeded trees
    pub const TREE_SPACING: f32 = 10.0;

    /// Fixed ambient particle pool size
    pub const PARTICLE_COUNT: usize = 1000;
    /// Particles scroll at this multiple of world speed
    pub const PARTICLE_SPEED_SCALE: f32 = 2.0;
    /// Particles recycle once past this depth
    pub const PARTICLE_WRAP_Z: f32 = 50.0;
    /// Distance particles are pushed back on recycle
    pub const PARTICLE_WRAP_SPAN: f32 = 150.0;

    /// Difficulty bonus cap (reached at score 2000)
    pub const MAX_DIFFICULTY_BONUS: f32 = 1.0;
    /// Score points per unit of difficulty bonus
    pub const DIFFICULTY_SCORE_DIVISOR: f32 = 2000.0;
}
