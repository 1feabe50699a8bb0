//! Game state and core simulation types
//!
//! Session state is owned by the orchestrator; sim functions borrow it for
//! the duration of a single callback.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first `start()`
    Idle,
    /// Active gameplay
    Running,
    /// Session ended; only `start()` leaves this phase
    GameOver(Outcome),
}

/// Drawable dimensions of the render surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A falling missile
///
/// Radius and speed are fixed at spawn; only `pos.y` changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    /// Center position (y grows downward)
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed in pixels/second
    pub speed: f32,
}

impl Missile {
    /// Advance the missile by `dt_ms` milliseconds
    pub fn fall(&mut self, dt_ms: f64) {
        self.pos.y += (self.speed as f64 * dt_ms / 1000.0) as f32;
    }

    /// Bottom edge is fully past the ground line
    pub fn has_impacted(&self, ground_y: f32) -> bool {
        self.pos.y - self.radius > ground_y
    }
}

/// An expanding, fading explosion left by a destroyed missile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
    pub elapsed_ms: f32,
    pub duration_ms: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, missile_radius: f32, scale: f32, duration_ms: f32) -> Self {
        Self {
            pos,
            radius: 0.0,
            max_radius: missile_radius * scale,
            alpha: 1.0,
            elapsed_ms: 0.0,
            duration_ms,
        }
    }

    /// Fraction of the animation completed, 0-1
    pub fn progress(&self) -> f32 {
        (self.elapsed_ms / self.duration_ms).min(1.0)
    }

    /// Advance the animation; returns true once it has finished
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        let progress = self.progress();
        self.radius = self.max_radius * progress;
        self.alpha = 1.0 - progress;
        progress >= 1.0
    }
}

/// Notifications produced by the sim for the orchestrator to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A missile reached the ground
    Impact { damage: i32 },
    /// The player destroyed a missile
    Destroy { missile_id: u32 },
    /// Level changed
    LevelUp { level: u32 },
    /// Session reached a terminal phase
    SessionEnded(Outcome),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Missiles in spawn order (oldest first)
    pub missiles: Vec<Missile>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub health: i32,
    pub level: u32,
    pub spawn_interval_ms: f64,
    pub last_spawn_ms: f64,
    /// Timestamp of the previous tick (None until the first tick)
    pub last_timestamp_ms: Option<f64>,
    /// Ticks processed while running
    pub ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create an idle state; `tuning` is validated first
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            missiles: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            health: tuning.initial_health,
            level: 1,
            spawn_interval_ms: tuning.base_spawn_interval_ms,
            last_spawn_ms: 0.0,
            last_timestamp_ms: None,
            ticks: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.reset();
        state.phase = GamePhase::Idle;
        state
    }

    /// Reset every session value and enter `Running`. The RNG keeps its stream.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.missiles.clear();
        self.explosions.clear();
        self.score = 0;
        self.health = self.tuning.initial_health;
        self.level = 1;
        self.spawn_interval_ms = self.tuning.base_spawn_interval_ms;
        self.last_spawn_ms = 0.0;
        self.last_timestamp_ms = None;
        self.ticks = 0;
        self.events.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Latch the terminal phase. Returns false if the session had already ended.
    pub fn end_session(&mut self, outcome: Outcome) -> bool {
        if self.is_over() {
            return false;
        }
        self.phase = GamePhase::GameOver(outcome);
        self.events.push(GameEvent::SessionEnded(outcome));
        true
    }

    /// Health as shown to the player (never negative)
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }

    /// Remove a missile by identity
    pub fn remove_missile(&mut self, id: u32) -> Option<Missile> {
        let idx = self.missiles.iter().position(|m| m.id == id)?;
        Some(self.missiles.remove(idx))
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
