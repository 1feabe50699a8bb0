//! Audio system using Web Audio API and HTML media elements
//!
//! Procedurally generated sound effects - no external files needed!
//! Music streams from the bundled MP3 tracks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

use super::{MUSIC_VOLUME, Playlist, SoundEffect};
use crate::platform::SoundSink;
use crate::settings::Settings;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    context_failed: bool,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    music: MusicPlayer,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        let mut music = MusicPlayer::new(Playlist::bundled());
        music.set_volume(settings.effective_music_volume());
        Self {
            ctx: None,
            context_failed: false,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
            music,
        }
    }

    /// Lazily create the audio context (browsers want a user gesture first)
    fn context(&mut self) -> Option<&AudioContext> {
        if self.ctx.is_none() && !self.context_failed {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - effects disabled");
                    self.context_failed = true;
                }
            }
        }
        self.ctx.as_ref()
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Falling tone with a fast exponential fade
    fn play_sweep(
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from_hz: f32,
        to_hz: f32,
        peak: f32,
        seconds: f64,
    ) {
        let Some((osc, gain)) = Self::create_osc(ctx, from_hz, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(from_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to_hz, t + seconds)
            .ok();
        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + seconds)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + seconds).ok();
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.context() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            // Low sawtooth thud
            SoundEffect::Impact => {
                Self::play_sweep(ctx, OscillatorType::Sawtooth, 200.0, 60.0, vol * 0.5, 0.25)
            }
            // Bright square pop
            SoundEffect::Destroy => {
                Self::play_sweep(ctx, OscillatorType::Square, 300.0, 50.0, vol * 0.8, 0.3)
            }
        }
    }

    fn start_music(&mut self) {
        self.music.play_next();
    }
}

struct MusicState {
    playlist: Playlist,
    /// One slot per playlist index; `None` where the element could not be created
    elements: Vec<Option<HtmlAudioElement>>,
    rng: Pcg32,
}

impl MusicState {
    fn element(&self, index: Option<usize>) -> Option<&HtmlAudioElement> {
        self.elements.get(index?)?.as_ref()
    }

    fn stop_current(&self) {
        if let Some(el) = self.element(self.playlist.current()) {
            let _ = el.pause();
        }
    }

    fn play_next(&mut self) {
        self.stop_current();
        let Some(index) = self.playlist.next(&mut self.rng) else {
            return;
        };
        let Some(el) = self.element(Some(index)) else {
            log::debug!("Track {} unavailable", index);
            return;
        };

        el.set_current_time(0.0);
        log::debug!("Playing track {:?}", self.playlist.track(index));
        if let Ok(promise) = el.play() {
            wasm_bindgen_futures::spawn_local(async move {
                // Autoplay policy may reject until the first user gesture
                if wasm_bindgen_futures::JsFuture::from(promise).await.is_err() {
                    log::debug!("Music playback was blocked");
                }
            });
        }
    }
}

/// Background music: a random bundled track, replaced by another when it ends
pub struct MusicPlayer {
    state: Rc<RefCell<MusicState>>,
    _on_ended: Option<Closure<dyn FnMut()>>,
}

impl MusicPlayer {
    pub fn new(playlist: Playlist) -> Self {
        if playlist.is_empty() {
            log::warn!("No music tracks configured");
        }
        let elements: Vec<Option<HtmlAudioElement>> = (0..playlist.len())
            .map(|i| {
                let src = playlist.track(i)?;
                match HtmlAudioElement::new_with_src(src) {
                    Ok(el) => {
                        el.set_loop(false);
                        el.set_volume(MUSIC_VOLUME as f64);
                        Some(el)
                    }
                    Err(_) => {
                        log::warn!("Failed to create audio element for {}", src);
                        None
                    }
                }
            })
            .collect();

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let state = Rc::new(RefCell::new(MusicState {
            playlist,
            elements,
            rng: Pcg32::seed_from_u64(seed),
        }));

        // One shared handler: whichever track ends, pick the next
        let weak: Weak<RefCell<MusicState>> = Rc::downgrade(&state);
        let on_ended = Closure::<dyn FnMut()>::new(move || {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().play_next();
            }
        });
        for el in state.borrow().elements.iter().flatten() {
            el.set_onended(Some(on_ended.as_ref().unchecked_ref()));
        }

        Self {
            state,
            _on_ended: Some(on_ended),
        }
    }

    /// Stop whatever is playing and start a random track
    pub fn play_next(&mut self) {
        self.state.borrow_mut().play_next();
    }

    pub fn set_volume(&mut self, volume: f32) {
        for el in self.state.borrow().elements.iter().flatten() {
            el.set_volume(volume.clamp(0.0, 1.0) as f64);
        }
    }
}
