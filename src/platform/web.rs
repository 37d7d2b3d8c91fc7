//! Browser bindings
//!
//! JavaScript drives the loop:
//!
//! ```js
//! const runner = new WebRunner(canvas.width, canvas.height);
//! window.addEventListener("pointerdown", () => runner.trigger_jump());
//! function frame(now) {
//!   runner.step((now - last) / 1000);
//!   draw(JSON.parse(runner.snapshot_json()));
//!   requestAnimationFrame(frame);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::settings::{QualityPreset, Settings};
use crate::sim::{GameState, RunPhase, TickInput, Viewport, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Paper Dash starting...");
}

fn fresh_seed() -> u64 {
    let high = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let low = js_sys::Date::now() as u64;
    (high << 32) ^ low
}

/// Game instance exported to JavaScript
#[wasm_bindgen]
pub struct WebRunner {
    state: GameState,
    settings: Settings,
    autopilot: bool,
}

#[wasm_bindgen]
impl WebRunner {
    /// Default tuning, stored settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebRunner {
        Self::build(width, height, Tuning::default())
    }

    /// Custom tuning from a JSON document
    pub fn with_tuning(width: f32, height: f32, tuning_json: &str) -> Result<WebRunner, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(width, height, tuning))
    }

    fn build(width: f32, height: f32, tuning: Tuning) -> WebRunner {
        let seed = fresh_seed();
        let mut state = GameState::new(seed, Viewport::new(width, height), tuning);
        let settings = Settings::load();
        settings.apply(&mut state);
        log::info!("Game initialized with seed: {}", seed);
        WebRunner {
            state,
            settings,
            autopilot: false,
        }
    }

    /// Canvas size changed; used from the next run on
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.set_viewport(Viewport::new(width, height));
    }

    /// Frame callback; `dt` in seconds
    pub fn step(&mut self, dt: f32) {
        let input = TickInput {
            autopilot: self.autopilot,
            ..Default::default()
        };
        tick(&mut self.state, &input, dt);
    }

    /// Tap / Space / ArrowUp
    pub fn trigger_jump(&mut self) {
        self.state.trigger_jump();
    }

    /// Overlay start button
    pub fn start(&mut self) {
        self.state.start();
    }

    /// Attract mode for the title screen
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn set_quality(&mut self, preset: &str) {
        if let Some(quality) = QualityPreset::parse(preset) {
            self.settings.quality = quality;
            self.settings.apply(&mut self.state);
            self.settings.save();
        } else {
            log::warn!("Unknown quality preset: {}", preset);
        }
    }

    pub fn set_particles(&mut self, enabled: bool) {
        self.settings.particles = enabled;
        self.settings.apply(&mut self.state);
        self.settings.save();
    }

    /// Render snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.state
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// "idle", "running", or "game_over" for overlay toggling
    pub fn phase(&self) -> String {
        match self.state.phase {
            RunPhase::Idle => "idle",
            RunPhase::Running => "running",
            RunPhase::GameOver => "game_over",
        }
        .to_string()
    }

    /// Scoreboard text
    pub fn score(&self) -> f64 {
        self.state.world.score() as f64
    }

    pub fn dodged(&self) -> u32 {
        self.state.world.dodged_count
    }
}
