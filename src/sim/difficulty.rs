//! Level progression
//!
//! Every `points_per_level` points raises the level, up to `max_level`.
//! Crossing a level boundary recomputes the spawn interval from scratch,
//! overriding the gradual per-spawn decay (sawtooth difficulty). Scoring past
//! the last level wins the session.

use super::state::{GameEvent, GameState, Outcome};
use crate::tuning::Tuning;

/// Outcome of re-evaluating progression for a score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    pub level: u32,
    /// New spawn interval when the level changed
    pub spawn_interval_ms: Option<f64>,
    pub won: bool,
}

/// Level implied by a score, not clamped to the maximum
#[inline]
pub fn unbounded_level(score: u32, tuning: &Tuning) -> u32 {
    score / tuning.points_per_level + 1
}

/// Displayed level for a score
#[inline]
pub fn level_for_score(score: u32, tuning: &Tuning) -> u32 {
    unbounded_level(score, tuning).min(tuning.max_level)
}

/// Spawn interval at the start of a level
pub fn interval_for_level(level: u32, tuning: &Tuning) -> f64 {
    let exponent = level.saturating_sub(1) as i32;
    tuning.base_spawn_interval_ms * tuning.level_interval_factor.powi(exponent)
}

/// Evaluate progression for `score` given the current level
pub fn advance(score: u32, current_level: u32, tuning: &Tuning) -> Progression {
    if score >= tuning.win_score() {
        return Progression {
            level: current_level,
            spawn_interval_ms: None,
            won: true,
        };
    }

    let level = level_for_score(score, tuning);
    let spawn_interval_ms = (level != current_level).then(|| interval_for_level(level, tuning));
    Progression {
        level,
        spawn_interval_ms,
        won: false,
    }
}

/// Apply progression to the session after the score changed
pub fn apply(state: &mut GameState) {
    let progression = advance(state.score, state.level, &state.tuning);

    if progression.won {
        log::info!("Final level cleared with score {}", state.score);
        state.end_session(Outcome::Win);
        return;
    }

    if let Some(interval) = progression.spawn_interval_ms {
        state.level = progression.level;
        state.spawn_interval_ms = interval;
        state.events.push(GameEvent::LevelUp {
            level: progression.level,
        });
        log::info!("Level {} (spawn interval {:.0} ms)", state.level, interval);
    }
}
