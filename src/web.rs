//! Browser bindings
//!
//! The page owns rendering, timers and input. It forwards input events and
//! timestamps here and reads back JSON snapshots, result events and rule
//! cards. Rejected inputs are logged and dropped.

use wasm_bindgen::prelude::*;

use crate::Tuning;
use crate::error::Rejected;
use crate::rules;
use crate::sim::{BattingSession, FieldingSession, PlayEvent};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("Logger already initialized: {e}");
    }
    log::info!("Dugout simulation loaded");
}

fn seed_now() -> u64 {
    js_sys::Date::now() as u64
}

fn load_tuning(json: Option<String>) -> Tuning {
    match json.as_deref().map(Tuning::from_json) {
        Some(Ok(tuning)) => tuning,
        Some(Err(e)) => {
            log::warn!("Ignoring tuning: {e}");
            Tuning::default()
        }
        None => Tuning::default(),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Snapshot serialization failed: {e}");
        "null".to_string()
    })
}

fn events_json(events: &[PlayEvent]) -> String {
    to_json(&events)
}

fn dropped<T>(input: &str, result: Result<T, Rejected>) -> Option<T> {
    result
        .map_err(|e| log::debug!("{input} ignored: {e}"))
        .ok()
}

/// Rule card for an outcome identifier as JSON, or `null`
#[wasm_bindgen(js_name = ruleFor)]
pub fn rule_for(id: &str) -> String {
    to_json(&rules::lookup(id))
}

#[wasm_bindgen]
pub struct WebBatting {
    session: BattingSession,
}

#[wasm_bindgen]
impl WebBatting {
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Self {
        let seed = seed_now();
        log::info!("Batting game with seed: {}", seed);
        Self {
            session: BattingSession::with_tuning(seed, load_tuning(tuning_json)),
        }
    }

    /// Returns the pitch as JSON, or `null` if rejected
    #[wasm_bindgen(js_name = startPitch)]
    pub fn start_pitch(&mut self, now: f64) -> String {
        to_json(&dropped("pitch", self.session.start_pitch(now as u64)))
    }

    /// Returns the play as JSON, or `null` if the swing was ignored
    pub fn swing(&mut self, now: f64, bunt: bool) -> String {
        to_json(&dropped("swing", self.session.swing(now as u64, bunt)))
    }

    /// Run due timers; returns a JSON array of plays
    pub fn advance(&mut self, now: f64) -> String {
        events_json(&self.session.advance(now as u64))
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.session.snapshot())
    }
}

#[wasm_bindgen]
pub struct WebFielding {
    session: FieldingSession,
}

#[wasm_bindgen]
impl WebFielding {
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Self {
        let seed = seed_now();
        log::info!("Fielding game with seed: {}", seed);
        Self {
            session: FieldingSession::with_tuning(seed, load_tuning(tuning_json)),
        }
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    /// Pointer position in field percent
    #[wasm_bindgen(js_name = moveGlove)]
    pub fn move_glove(&mut self, x: f32, y: f32) {
        dropped("glove", self.session.move_glove(x, y));
    }

    /// Returns the new ball as JSON, or `null` if rejected
    pub fn hit(&mut self) -> String {
        to_json(&dropped("hit", self.session.hit()))
    }

    /// One animation frame; returns a JSON array of plays
    pub fn frame(&mut self, now: f64) -> String {
        events_json(&self.session.frame(now as u64))
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.session.snapshot())
    }
}
