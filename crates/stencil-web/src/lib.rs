//! Browser bridge for the stencil engine.
//!
//! The page forwards pointer and resize events, calls `stencil_tick` from
//! `requestAnimationFrame`, and draws whatever `stencil_render_model`
//! returns.

pub mod runner;

pub use runner::StencilRunner;

use std::cell::RefCell;

use stencil_engine::{EngineConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<StencilRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut StencilRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("stencil not initialized; call stencil_init() first");
                None
            }
        }
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

/// Create the engine. `config_json` overrides defaults field by field; without
/// it the word sequence is seeded from `Math.random()`.
#[wasm_bindgen]
pub fn stencil_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(|json| config_from_json(json, random_seed)) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::error!("bad config, using defaults: {e}");
            EngineConfig::default().with_seed(random_seed())
        }
        None => EngineConfig::default().with_seed(random_seed()),
    };

    let mut runner = match StencilRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("stencil init failed: {e}");
            return;
        }
    };
    if let Err(e) = runner.init() {
        log::error!("no word to start: {e}");
    }

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("stencil: initialized");
}

/// Parse a page config. A config that leaves out `seed` takes one from
/// `seed` instead of the fixed default.
pub fn config_from_json(json: &str, seed: impl FnOnce() -> u64) -> stencil_engine::Result<EngineConfig> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let has_seed = value.get("seed").is_some();
    let config: EngineConfig = serde_json::from_value(value)?;
    Ok(if has_seed { config } else { config.with_seed(seed()) })
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64 + 1
}

#[wasm_bindgen]
pub fn stencil_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn stencil_pointer_down(x: f32, y: f32) {
    push(InputEvent::StrokeStart { x, y });
}

#[wasm_bindgen]
pub fn stencil_pointer_move(x: f32, y: f32) {
    push(InputEvent::StrokeMove { x, y });
}

#[wasm_bindgen]
pub fn stencil_pointer_up(x: f32, y: f32) {
    push(InputEvent::StrokeEnd { x, y });
}

/// Mouse left the canvas or the touch was cancelled.
#[wasm_bindgen]
pub fn stencil_pointer_cancel() {
    push(InputEvent::StrokeCancel);
}

/// CSS size of the canvas plus `window.devicePixelRatio`.
#[wasm_bindgen]
pub fn stencil_resize(width: f32, height: f32, pixel_ratio: f32) {
    push(InputEvent::Resize { width, height, pixel_ratio });
}

#[wasm_bindgen]
pub fn stencil_new_word() {
    push(InputEvent::NewWord);
}

#[wasm_bindgen]
pub fn stencil_reset_word() {
    push(InputEvent::ResetWord);
}

/// Current frame as JSON.
#[wasm_bindgen]
pub fn stencil_render_model() -> String {
    with_runner(|r| r.render_model().to_json())
        .and_then(|json| json.map_err(|e| log::error!("render model: {e}")).ok())
        .unwrap_or_else(|| "null".to_string())
}

/// Events from the last tick as a JSON array.
#[wasm_bindgen]
pub fn stencil_events() -> String {
    with_runner(|r| serde_json::to_string(r.events()))
        .and_then(|json| json.map_err(|e| log::error!("events: {e}")).ok())
        .unwrap_or_else(|| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_without_seed_is_seeded_by_caller() {
        let config = config_from_json(r#"{"word_complete_delay": 1.5}"#, || 7).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.word_complete_delay, 1.5);

        let a = config_from_json("{}", || 1).unwrap();
        let b = config_from_json("{}", || 2).unwrap();
        assert_ne!(a.seed, b.seed);
    }

    #[test]
    fn explicit_seed_is_kept() {
        let config = config_from_json(r#"{"seed": 99}"#, || panic!("seed source used")).unwrap();
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(config_from_json("{", || 1).is_err());
        assert!(config_from_json(r#"{"seed": "x"}"#, || 1).is_err());
    }
}
