//! Platform abstraction layer
//!
//! The session orchestrator talks to the outside world only through these
//! traits: something to draw into, something that makes noise, and a HUD.
//! Calls are notifications; implementations swallow their own failures.

use crate::audio::SoundEffect;
use crate::sim::{Explosion, Missile, Playfield};

/// Drawable surface. Draw calls arrive in back-to-front order once per frame.
pub trait RenderSurface {
    /// Current drawable size in pixels
    fn playfield(&self) -> Playfield;
    fn draw_background(&mut self);
    fn draw_planet(&mut self);
    fn draw_missiles(&mut self, missiles: &[Missile]);
    fn draw_explosions(&mut self, explosions: &[Explosion]);
    /// Frame is complete
    fn present(&mut self);
}

/// Sound effects and ambient music
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect);
    /// Begin (or continue) background music. Never stopped at session end.
    fn start_music(&mut self);
}

/// Score/health display and the end-of-session overlay
pub trait HudSink {
    fn update_hud(&mut self, score: u32, health: i32, level: u32);
    fn show_end_overlay(&mut self, win: bool, final_score: u32);
    fn hide_end_overlay(&mut self);
}

/// Surface that draws nothing, for headless runs
#[derive(Debug, Clone, Copy)]
pub struct HeadlessSurface {
    pub playfield: Playfield,
}

impl RenderSurface for HeadlessSurface {
    fn playfield(&self) -> Playfield {
        self.playfield
    }
    fn draw_background(&mut self) {}
    fn draw_planet(&mut self) {}
    fn draw_missiles(&mut self, _missiles: &[Missile]) {}
    fn draw_explosions(&mut self, _explosions: &[Explosion]) {}
    fn present(&mut self) {}
}

/// Sound and HUD sink that only logs, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("sound: {:?}", effect);
    }

    fn start_music(&mut self) {
        log::debug!("music: start");
    }
}

impl HudSink for LogSink {
    fn update_hud(&mut self, score: u32, health: i32, level: u32) {
        log::trace!("hud: score={} health={} level={}", score, health, level);
    }

    fn show_end_overlay(&mut self, win: bool, final_score: u32) {
        log::info!(
            "{} (final score {})",
            if win { "You Win!" } else { "Game Over" },
            final_score
        );
    }

    fn hide_end_overlay(&mut self) {}
}
