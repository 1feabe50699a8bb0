//! Headless sessions
//!
//! Runs a full session without a browser: fixed 60 Hz timestamps, a null
//! render surface, and an auto-aim player that taps the lowest missile every
//! few frames. Useful for balance checks and for the native binary.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::platform::{HeadlessSurface, LogSink};
use crate::sim::{GamePhase, Outcome, Playfield};
use crate::tuning::Tuning;

/// Headless run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessConfig {
    pub seed: u64,
    pub playfield: Playfield,
    /// Host frame time in milliseconds
    pub frame_ms: f64,
    /// Tap the lowest missile every this many frames (0 = never tap)
    pub aim_every: u32,
    /// Give up after this many frames
    pub max_ticks: u64,
    pub tuning: Tuning,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            playfield: Playfield::new(800.0, 600.0),
            frame_ms: 1000.0 / 60.0,
            aim_every: 30,
            max_ticks: 60 * 60 * 10,
            tuning: Tuning::default(),
        }
    }
}

/// Result of a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// `None` if the session was still running at `max_ticks`
    pub outcome: Option<Outcome>,
    pub score: u32,
    pub level: u32,
    pub health: i32,
    pub ticks: u64,
    pub taps: u32,
}

/// Point the auto-aim player taps: the missile closest to the ground
fn lowest_missile(game: &Game<HeadlessSurface, LogSink, LogSink>) -> Option<Vec2> {
    game.state()
        .missiles
        .iter()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|m| m.pos)
}

/// Play one session to completion (or until `max_ticks`)
pub fn run(config: &HeadlessConfig) -> SessionSummary {
    let surface = HeadlessSurface {
        playfield: config.playfield,
    };
    let mut game = Game::with_tuning(
        config.seed,
        config.tuning.clone(),
        surface,
        LogSink,
        LogSink,
    );
    game.start();

    let mut taps = 0;
    for frame in 1..=config.max_ticks {
        let timestamp = frame as f64 * config.frame_ms;
        if !game.tick(timestamp) {
            break;
        }

        if config.aim_every > 0 && frame % config.aim_every as u64 == 0 {
            if let Some(target) = lowest_missile(&game) {
                taps += 1;
                game.pointer_down(target.x, target.y);
            }
            if !game.state().is_running() {
                break;
            }
        }
    }

    let state = game.state();
    let outcome = match state.phase {
        GamePhase::GameOver(outcome) => Some(outcome),
        _ => None,
    };
    log::info!(
        "Headless session finished: {:?} score {} after {} ticks",
        outcome,
        state.score,
        state.ticks
    );

    SessionSummary {
        outcome,
        score: state.score,
        level: state.level,
        health: state.display_health(),
        ticks: state.ticks,
        taps,
    }
}
