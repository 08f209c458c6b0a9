//! Browser shell
//!
//! `WebGame` is what the page script talks to: it owns a `Session` backed by
//! LocalStorage and a Web Audio frontend. The page drives the clock with
//! `advance` from its animation loop and draws from `snapshot`.

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::frontend::{AudioError, Frontend, Notice, Snapshot, SoundCue};
use crate::game::Session;
use crate::persistence::LocalStorageStore;
use crate::platform::{self, map_key, swipe_direction};
use crate::settings::Settings;

/// Frequency (Hz), waveform and length (s) of each cue
fn tone(cue: SoundCue) -> (f32, OscillatorType, f64) {
    match cue {
        SoundCue::Eat => (440.0, OscillatorType::Square, 0.08),
        SoundCue::PowerUp => (660.0, OscillatorType::Sine, 0.2),
        SoundCue::LevelUp => (880.0, OscillatorType::Triangle, 0.35),
        SoundCue::GameOver => (110.0, OscillatorType::Sawtooth, 0.6),
    }
}

/// Procedural Web Audio cues; everything else goes to the console
pub struct WebFrontend {
    ctx: Option<AudioContext>,
    sound: bool,
}

impl WebFrontend {
    pub fn new(sound: bool) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, sound }
    }

    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Result<(OscillatorNode, GainNode), JsValue> {
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        Ok((osc, gain))
    }

    fn beep(ctx: &AudioContext, cue: SoundCue) -> Result<(), JsValue> {
        let (freq, osc_type, length) = tone(cue);
        let (osc, gain) = Self::create_osc(ctx, freq, osc_type)?;
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.3, t)?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, t + length)?;
        osc.start()?;
        osc.stop_with_when(t + length + 0.05)?;
        Ok(())
    }
}

impl Frontend for WebFrontend {
    fn render(&mut self, snapshot: &Snapshot) {
        log::trace!("frame: score {} len {}", snapshot.score, snapshot.snake.len());
    }

    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        if !self.sound {
            return Err(AudioError::Unavailable);
        }
        let Some(ctx) = &self.ctx else {
            return Err(AudioError::Unavailable);
        };
        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Self::beep(ctx, cue).map_err(|e| AudioError::Playback {
            cue,
            reason: format!("{:?}", e),
        })
    }

    fn notify(&mut self, notice: Notice) {
        log::info!("{}", notice.text());
    }

    fn levels_unlocked(&mut self, highest: u32) {
        log::info!("Levels 1-{} unlocked", highest);
    }

    fn game_over(&mut self, score: u64, level: u32) {
        log::info!("GAME OVER - score {} on level {}", score, level);
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    platform::init_logging();
    log::info!("Snake Levels (web) starting...");
}

/// Handle the page script holds on to
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load_local();
        let frontend = WebFrontend::new(settings.sound);
        let session = Session::new(&settings, Box::new(frontend), Box::new(LocalStorageStore));
        WebGame { session, settings }
    }

    pub fn start(&mut self, level: u32) {
        self.session.start(level);
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn menu(&mut self) {
        self.session.menu();
    }

    /// Feed elapsed wall time (ms) into the virtual clock
    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 {
            self.session.advance(ms as u64);
        }
    }

    /// `KeyboardEvent.key`; returns whether the key was consumed
    pub fn key(&mut self, key: &str) -> bool {
        match map_key(key) {
            Some(intent) => {
                self.session.handle_intent(intent);
                true
            }
            None => false,
        }
    }

    pub fn swipe(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        swipe_direction(Vec2::new(x0, y0), Vec2::new(x1, y1))
            .is_some_and(|dir| self.session.steer(dir))
    }

    pub fn toggle_dark_mode(&mut self) {
        self.session.toggle_dark_mode();
        self.settings.dark_mode = self.session.state().dark_mode;
        self.settings.save_local();
    }

    pub fn highest_unlocked(&self) -> u32 {
        self.session.highest_unlocked()
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.session.phase())
    }

    /// Current frame as JSON for the canvas renderer
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&Snapshot::capture(self.session.state())).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
