//! `#[wasm_bindgen]` surface of the orrery.
//!
//! The page calls `orrery_load_config` (optional) and `orrery_init` once,
//! then `orrery_tick` from `requestAnimationFrame` until it returns `false`.
//! Buffers are read through the pointer/count accessors; text for the
//! controls and the fact label through the string accessors.

pub mod runner;

pub use runner::OrreryRunner;

use std::cell::RefCell;

use js_sys::Array;
use orrery::{bodies, InputEvent, OrreryConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
    static PENDING_CONFIG: RefCell<Option<OrreryConfig>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Orrery not initialized. Call orrery_init() first.");
        f(runner)
    })
}

fn push(event: InputEvent) {
    with_runner(|r| r.push_input(event));
}

// ---- Lifecycle ----

/// Stage a JSON config for the next `orrery_init`. Returns `false` and keeps
/// the defaults if the JSON is malformed.
#[wasm_bindgen]
pub fn orrery_load_config(json: &str) -> bool {
    match OrreryConfig::from_json(json) {
        Ok(config) => {
            PENDING_CONFIG.with(|cell| *cell.borrow_mut() = Some(config));
            true
        }
        Err(err) => {
            log::warn!("orrery: {err}; using defaults");
            false
        }
    }
}

#[wasm_bindgen]
pub fn orrery_init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"orrery: logger already installed".into());
    }

    let config = PENDING_CONFIG
        .with(|cell| cell.borrow_mut().take())
        .unwrap_or_default();
    let runner = OrreryRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
}

/// Returns `false` once the loop is shut down; the page stops scheduling.
#[wasm_bindgen]
pub fn orrery_tick(dt: f32) -> bool {
    with_runner(|r| r.tick(dt))
}

#[wasm_bindgen]
pub fn orrery_shutdown() {
    with_runner(|r| r.shutdown());
}

// ---- Input ----

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    push(InputEvent::PointerDown { x, y });
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    push(InputEvent::PointerUp { x, y });
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    push(InputEvent::PointerMove { x, y });
}

#[wasm_bindgen]
pub fn orrery_pointer_leave() {
    push(InputEvent::PointerLeave);
}

#[wasm_bindgen]
pub fn orrery_wheel(delta_y: f32) {
    push(InputEvent::Wheel { delta_y });
}

#[wasm_bindgen]
pub fn orrery_touch_start(count: u32, x0: f32, y0: f32, x1: f32, y1: f32) {
    push(InputEvent::TouchStart { count, x0, y0, x1, y1 });
}

#[wasm_bindgen]
pub fn orrery_touch_move(count: u32, x0: f32, y0: f32, x1: f32, y1: f32) {
    push(InputEvent::TouchMove { count, x0, y0, x1, y1 });
}

#[wasm_bindgen]
pub fn orrery_touch_end() {
    push(InputEvent::TouchEnd);
}

#[wasm_bindgen]
pub fn orrery_key_down(key_code: u32) {
    push(InputEvent::KeyDown { key_code });
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    push(InputEvent::Resize { width, height });
}

#[wasm_bindgen]
pub fn orrery_toggle_pause() {
    push(InputEvent::Control(orrery::ControlEvent::click(orrery::ControlId::PauseButton)));
}

#[wasm_bindgen]
pub fn orrery_toggle_theme() {
    push(InputEvent::Control(orrery::ControlEvent::click(orrery::ControlId::ThemeButton)));
}

/// Slider `input` handler. `value` is the slider's text value.
#[wasm_bindgen]
pub fn orrery_set_speed(planet: u32, value: &str) -> bool {
    with_runner(|r| match r.set_speed(planet as usize, value) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("orrery: {err}");
            false
        }
    })
}

// ---- Page text ----

#[wasm_bindgen]
pub fn orrery_label_visible() -> bool {
    with_runner(|r| r.orrery().state().hover.is_visible())
}

#[wasm_bindgen]
pub fn orrery_label_name() -> String {
    with_runner(|r| r.orrery().state().hover.name().to_string())
}

#[wasm_bindgen]
pub fn orrery_label_fact() -> String {
    with_runner(|r| r.orrery().state().hover.fact().to_string())
}

#[wasm_bindgen]
pub fn orrery_label_left() -> f32 {
    with_runner(|r| r.orrery().state().hover.anchor().x)
}

#[wasm_bindgen]
pub fn orrery_label_top() -> f32 {
    with_runner(|r| r.orrery().state().hover.anchor().y)
}

#[wasm_bindgen]
pub fn orrery_pause_label() -> String {
    with_runner(|r| r.orrery().pause_label().to_string())
}

#[wasm_bindgen]
pub fn orrery_theme_label() -> String {
    with_runner(|r| r.orrery().theme_label().to_string())
}

/// CSS `background` value for the page body.
#[wasm_bindgen]
pub fn orrery_page_background() -> String {
    with_runner(|r| r.orrery().page_gradient().to_string())
}

/// Slider readouts (`"1.0x"`), in planet order.
#[wasm_bindgen]
pub fn orrery_speed_labels() -> Array {
    with_runner(|r| {
        r.orrery()
            .speed_labels()
            .into_iter()
            .map(JsValue::from)
            .collect()
    })
}

/// Lowercase planet keys (`"mars"`) for wiring `<key>-speed` sliders.
#[wasm_bindgen]
pub fn orrery_planet_keys() -> Array {
    bodies::PLANETS.iter().map(|p| JsValue::from_str(p.key)).collect()
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn orrery_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn orrery_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn orrery_sdf_ptr() -> *const f32 {
    with_runner(|r| r.orrery().sdf_ptr())
}

#[wasm_bindgen]
pub fn orrery_sdf_count() -> u32 {
    with_runner(|r| r.orrery().sdf_count() as u32)
}

#[wasm_bindgen]
pub fn orrery_vector_ptr() -> *const f32 {
    with_runner(|r| r.orrery().vector_ptr())
}

#[wasm_bindgen]
pub fn orrery_vector_vertex_count() -> u32 {
    with_runner(|r| r.orrery().vector_vertex_count() as u32)
}

#[wasm_bindgen]
pub fn orrery_stars_ptr() -> *const f32 {
    with_runner(|r| r.orrery().stars_ptr())
}

#[wasm_bindgen]
pub fn orrery_star_count() -> u32 {
    with_runner(|r| r.orrery().stars().len() as u32)
}

#[wasm_bindgen]
pub fn orrery_lights_ptr() -> *const f32 {
    with_runner(|r| r.orrery().lights_ptr())
}

#[wasm_bindgen]
pub fn orrery_light_count() -> u32 {
    with_runner(|r| r.orrery().lights().len() as u32)
}

#[wasm_bindgen]
pub fn orrery_events_ptr() -> *const f32 {
    with_runner(|r| r.orrery().events_ptr())
}

#[wasm_bindgen]
pub fn orrery_event_count() -> u32 {
    with_runner(|r| r.orrery().events().len() as u32)
}
