//! Planet Defense - tap falling missiles before they reach the planet
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, hit testing, difficulty)
//! - `game`: Session orchestrator driving the sim and its collaborators
//! - `platform`: Collaborator contracts (render surface, sound, HUD)
//! - `headless`: Browser-free sessions with an auto-aim player
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Synthesized effects and background music
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences read from the page URL

pub mod audio;
pub mod game;
pub mod headless;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Starting planet health
    pub const INITIAL_HEALTH: i32 = 100;

    /// Spawn timing (milliseconds)
    pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;
    pub const SPAWN_DECAY: f64 = 0.995;
    pub const MIN_SPAWN_INTERVAL_MS: f64 = 400.0;

    /// Missile radius range [min, max)
    pub const MISSILE_MIN_RADIUS: f32 = 15.0;
    pub const MISSILE_MAX_RADIUS: f32 = 25.0;
    /// Base fall speed range [min, max) in pixels/second
    pub const MISSILE_MIN_SPEED: f32 = 40.0;
    pub const MISSILE_MAX_SPEED: f32 = 70.0;
    /// Extra fall speed per point of score (unbounded)
    pub const SPEED_PER_POINT: f32 = 1.0;

    /// Progression
    pub const POINTS_PER_LEVEL: u32 = 10;
    pub const MAX_LEVEL: u32 = 10;
    /// Spawn interval multiplier per level above 1
    pub const LEVEL_INTERVAL_FACTOR: f64 = 0.9;

    /// Explosion defaults
    pub const EXPLOSION_SCALE: f32 = 3.0;
    pub const EXPLOSION_DURATION_MS: f32 = 800.0;

    /// Radius multiplier for the forgiving fallback hit test
    pub const FALLBACK_HIT_FACTOR: f32 = 3.0;

    /// Background star count at medium quality
    pub const STAR_COUNT: usize = 100;
}
