//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestamps only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod silhouette;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Hit, HitKind, resolve_hit, resolve_pointer};
pub use difficulty::{Progression, advance, interval_for_level, level_for_score};
pub use silhouette::{Part, Silhouette};
pub use spawner::maybe_spawn;
pub use state::{Explosion, GameEvent, GamePhase, GameState, Missile, Outcome, Playfield};
pub use tick::{TickReport, tick};
