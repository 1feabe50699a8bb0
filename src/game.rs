//! Session orchestrator
//!
//! Owns the session state and its collaborators. The host calls [`Game::tick`]
//! once per display refresh and [`Game::pointer_down`] on each click or tap;
//! both run to completion before returning, so no locking is needed.
//!
//! Phases: `Idle` -> `Running` -> `GameOver(Win | Loss)`; `start()` is the only
//! way out of `GameOver`.

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::platform::{HudSink, RenderSurface, SoundSink};
use crate::sim::{self, GameEvent, GamePhase, GameState, Outcome};
use crate::tuning::Tuning;

pub struct Game<R, S, H> {
    state: GameState,
    surface: R,
    sound: S,
    hud: H,
    /// End overlay already shown for the current session
    end_announced: bool,
}

impl<R: RenderSurface, S: SoundSink, H: HudSink> Game<R, S, H> {
    pub fn new(seed: u64, surface: R, sound: S, hud: H) -> Self {
        Self::with_tuning(seed, Tuning::default(), surface, sound, hud)
    }

    pub fn with_tuning(seed: u64, tuning: Tuning, surface: R, sound: S, hud: H) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            surface,
            sound,
            hud,
            end_announced: false,
        }
    }

    /// Begin a fresh session (from idle or after a win/loss)
    pub fn start(&mut self) {
        if self.state.is_running() {
            log::warn!("Restarting a session that was still running");
        }
        self.state.reset();
        self.end_announced = false;

        self.hud
            .update_hud(self.state.score, self.state.display_health(), self.state.level);
        self.hud.hide_end_overlay();
        self.sound.start_music();

        log::info!("Session started (seed {})", self.state.seed);
    }

    /// Run one frame at host time `timestamp_ms`.
    ///
    /// Returns true if the host should schedule another frame.
    pub fn tick(&mut self, timestamp_ms: f64) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let playfield = self.surface.playfield();
        sim::tick(&mut self.state, timestamp_ms, playfield);
        self.dispatch_events();

        if !self.state.is_running() {
            return false;
        }

        self.render();
        true
    }

    /// Handle a click/tap at surface coordinates. Returns true if a missile was destroyed.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let destroyed = sim::resolve_pointer(&mut self.state, Vec2::new(x, y)).is_some();
        self.dispatch_events();
        destroyed
    }

    /// Show the end overlay for the current terminal phase. Safe to call repeatedly.
    pub fn announce_end(&mut self) {
        let GamePhase::GameOver(outcome) = self.state.phase else {
            return;
        };
        if self.end_announced {
            return;
        }
        self.end_announced = true;
        self.hud
            .show_end_overlay(outcome == Outcome::Win, self.state.score);
        log::info!("Session over: {:?}, final score {}", outcome, self.state.score);
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Impact { .. } => {
                    self.sound.play(SoundEffect::Impact);
                    self.refresh_hud();
                }
                GameEvent::Destroy { .. } => {
                    self.sound.play(SoundEffect::Destroy);
                    self.refresh_hud();
                }
                GameEvent::LevelUp { .. } => self.refresh_hud(),
                GameEvent::SessionEnded(_) => {
                    self.refresh_hud();
                    self.announce_end();
                }
            }
        }
    }

    fn refresh_hud(&mut self) {
        self.hud
            .update_hud(self.state.score, self.state.display_health(), self.state.level);
    }

    fn render(&mut self) {
        self.surface.draw_background();
        self.surface.draw_planet();
        self.surface.draw_missiles(&self.state.missiles);
        self.surface.draw_explosions(&self.state.explosions);
        self.surface.present();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }
}
