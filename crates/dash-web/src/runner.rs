use std::cell::RefCell;

use js_sys::Function;
use serde_json::json;
use wasm_bindgen::prelude::*;

use dash_engine::{
    AudioBackend, EventKind, GameConfig, GameEngine, HighScoreStore, InputEvent, Key,
    RenderInstance,
};

use crate::audio::WebAudioBackend;
use crate::outbox::{Delivery, Outbox, Registry, Topic};
use crate::storage::LocalStorageStore;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn call_js(f: &Function, arg: Option<&JsValue>) {
    let result = match arg {
        Some(v) => f.call1(&JsValue::NULL, v),
        None => f.call0(&JsValue::NULL),
    };
    if let Err(err) = result {
        log::warn!("JS listener threw: {:?}", err);
    }
}

fn js_arg(delivery: &Delivery) -> Option<JsValue> {
    match *delivery {
        Delivery::Event(_, payload) => payload.map(JsValue::from),
        Delivery::Score(score) => Some(JsValue::from(score)),
        Delivery::Mute(muted) => Some(JsValue::from(muted)),
    }
}

/// Engine handle exported to JS. The page owns it and passes it to
/// whichever UI layer needs it.
///
/// Every method takes `&self`. The engine sits in a `RefCell` that is only
/// borrowed for the duration of one engine call. Listeners run afterwards,
/// so they may call back into the handle.
#[wasm_bindgen]
pub struct WebGame {
    engine: RefCell<GameEngine>,
    outbox: Outbox,
    callbacks: RefCell<Registry<Function>>,
}

impl WebGame {
    fn with_engine<R>(&self, f: impl FnOnce(&mut GameEngine) -> R) -> R {
        let result = f(&mut self.engine.borrow_mut());
        self.flush();
        result
    }

    fn read<R>(&self, f: impl FnOnce(&GameEngine) -> R) -> R {
        f(&self.engine.borrow())
    }

    /// Hand queued notifications to JS. Listeners may enqueue more through
    /// re-entrant calls; those are delivered by the same loop.
    fn flush(&self) {
        while let Some(delivery) = self.outbox.pop() {
            let targets = self.callbacks.borrow().targets(&delivery);
            let arg = js_arg(&delivery);
            for f in &targets {
                call_js(f, arg.as_ref());
            }
        }
    }
}

#[wasm_bindgen]
impl WebGame {
    /// Build from an optional (partial) JSON configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        crate::install_hooks();

        let config = match config_json.as_deref() {
            Some(json) => GameConfig::from_json(json).map_err(js_error)?,
            None => GameConfig::default(),
        };
        let store = LocalStorageStore::new().map(|s| Box::new(s) as Box<dyn HighScoreStore>);
        let audio = if config.audio.enabled {
            WebAudioBackend::new().map(|a| Box::new(a) as Box<dyn AudioBackend>)
        } else {
            None
        };
        let mut engine = GameEngine::new(config, store, audio).map_err(js_error)?;
        let outbox = Outbox::new();
        outbox.attach(&mut engine);
        log::info!("dash-web: engine created");
        Ok(WebGame {
            engine: RefCell::new(engine),
            outbox,
            callbacks: RefCell::new(Registry::new()),
        })
    }

    // ---- Lifecycle ----

    pub fn initialize(&self) -> Result<(), JsValue> {
        self.with_engine(|e| e.initialize()).map_err(js_error)
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.with_engine(|e| e.start()).map_err(js_error)
    }

    pub fn pause(&self) -> bool {
        self.with_engine(|e| e.pause())
    }

    pub fn resume(&self) -> bool {
        self.with_engine(|e| e.resume())
    }

    pub fn stop(&self) -> bool {
        self.with_engine(|e| e.stop())
    }

    pub fn reset(&self) {
        self.with_engine(|e| e.reset());
    }

    pub fn destroy(&self) {
        self.callbacks.borrow_mut().clear();
        self.engine.borrow_mut().destroy();
        self.outbox.clear();
    }

    /// Call from `requestAnimationFrame` with its timestamp.
    pub fn frame(&self, now_ms: f64) -> u32 {
        self.with_engine(|e| e.frame(now_ms))
    }

    pub fn jump(&self) -> bool {
        self.with_engine(|e| e.jump())
    }

    // ---- Score ----

    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u32 {
        self.read(|e| e.get_score())
    }

    #[wasm_bindgen(js_name = setScore)]
    pub fn set_score(&self, score: f64) {
        // `as` saturates; NaN becomes 0.
        self.with_engine(|e| e.set_score(score as i64));
    }

    #[wasm_bindgen(js_name = getHighScore)]
    pub fn get_high_score(&self) -> u32 {
        self.read(|e| e.get_high_score())
    }

    #[wasm_bindgen(js_name = resetHighScore)]
    pub fn reset_high_score(&self) {
        self.with_engine(|e| e.reset_high_score());
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.read(|e| e.is_playing())
    }

    #[wasm_bindgen(js_name = isPaused)]
    pub fn is_paused(&self) -> bool {
        self.read(|e| e.is_paused())
    }

    pub fn state(&self) -> String {
        self.read(|e| e.state().as_str().to_string())
    }

    #[wasm_bindgen(js_name = setGameSpeed)]
    pub fn set_game_speed(&self, speed: f32) {
        self.with_engine(|e| e.set_game_speed(speed));
    }

    #[wasm_bindgen(js_name = setScoreChangeCallback)]
    pub fn set_score_change_callback(&self, callback: Option<Function>) {
        self.callbacks.borrow_mut().set_score_callback(callback);
    }

    #[wasm_bindgen(js_name = setDifficultyOverride)]
    pub fn set_difficulty_override(&self, value: Option<f32>) {
        self.with_engine(|e| e.set_difficulty_override(value));
    }

    // ---- Events ----

    /// Subscribe `callback` to `gamestart`, `pause`, `resume`, `gameover`,
    /// `score` or `collect`. Returns an id for `off`.
    pub fn on(&self, event: &str, callback: Function) -> Result<u32, JsValue> {
        let kind = EventKind::from_name(event)
            .ok_or_else(|| JsValue::from_str(&format!("unknown event {event:?}")))?;
        Ok(self.callbacks.borrow_mut().add(Topic::Event(kind), callback))
    }

    pub fn off(&self, id: u32) -> bool {
        self.callbacks.borrow_mut().remove(id, false)
    }

    // ---- Input ----

    /// `code` is `KeyboardEvent.code`. Returns true if the game used the key,
    /// so the page can `preventDefault()`.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => self.with_engine(|e| e.handle_input(InputEvent::KeyDown { key })),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => self.with_engine(|e| e.handle_input(InputEvent::KeyUp { key })),
            None => false,
        }
    }

    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&self, id: u32, x: f32, y: f32) -> bool {
        self.with_engine(|e| e.handle_input(InputEvent::TouchStart { id, x, y }))
    }

    /// Omit `id` when the touch list was empty.
    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&self, id: Option<u32>) -> bool {
        self.with_engine(|e| e.handle_input(InputEvent::TouchEnd { id }))
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f32, y: f32) -> bool {
        self.with_engine(|e| e.handle_input(InputEvent::PointerDown { x, y }))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, x: f32, y: f32) -> bool {
        self.with_engine(|e| e.handle_input(InputEvent::PointerUp { x, y }))
    }

    pub fn blur(&self) -> bool {
        self.with_engine(|e| e.handle_input(InputEvent::Blur))
    }

    /// Width of the touch surface, for touch zoning.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&self, width: f32) {
        self.with_engine(|e| e.set_viewport(width));
    }

    // ---- Audio ----

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        self.with_engine(|e| e.audio_mut().set_volume(volume));
    }

    pub fn mute(&self) {
        self.with_engine(|e| e.audio_mut().mute());
    }

    pub fn unmute(&self) {
        self.with_engine(|e| e.audio_mut().unmute());
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.read(|e| e.audio().is_muted())
    }

    #[wasm_bindgen(js_name = onMuteChange)]
    pub fn on_mute_change(&self, callback: Function) -> u32 {
        self.callbacks.borrow_mut().add(Topic::Mute, callback)
    }

    #[wasm_bindgen(js_name = offMuteChange)]
    pub fn off_mute_change(&self, id: u32) -> bool {
        self.callbacks.borrow_mut().remove(id, true)
    }

    // ---- Render data (read by the host renderer) ----

    #[wasm_bindgen(js_name = instancesPtr)]
    pub fn instances_ptr(&self) -> *const f32 {
        self.read(|e| e.render_buffer().instances_ptr())
    }

    #[wasm_bindgen(js_name = instanceCount)]
    pub fn instance_count(&self) -> u32 {
        self.read(|e| e.render_buffer().instance_count())
    }

    #[wasm_bindgen(js_name = instanceFloats)]
    pub fn instance_floats() -> u32 {
        RenderInstance::FLOATS as u32
    }

    #[wasm_bindgen(js_name = outlinesPtr)]
    pub fn outlines_ptr(&self) -> *const f32 {
        self.read(|e| e.render_buffer().outlines_ptr())
    }

    #[wasm_bindgen(js_name = outlineCount)]
    pub fn outline_count(&self) -> u32 {
        self.read(|e| e.render_buffer().outline_count())
    }

    /// Overlay text for the current frame as a JSON array.
    #[wasm_bindgen(js_name = textsJson)]
    pub fn texts_json(&self) -> String {
        let items: Vec<_> = self.read(|e| {
            e.render_buffer()
                .texts
                .iter()
                .map(|t| json!({ "x": t.x, "y": t.y, "text": t.text, "layer": t.layer.as_u8() }))
                .collect()
        });
        serde_json::Value::Array(items).to_string()
    }

    pub fn fps(&self) -> f32 {
        self.read(|e| e.renderer().fps())
    }

    #[wasm_bindgen(js_name = setShowHitboxes)]
    pub fn set_show_hitboxes(&self, show: bool) {
        self.with_engine(|e| e.renderer_mut().set_show_hitboxes(show));
    }

    #[wasm_bindgen(js_name = setShowFps)]
    pub fn set_show_fps(&self, show: bool) {
        self.with_engine(|e| e.renderer_mut().set_show_fps(show));
    }

    /// Whether the host should scale with nearest-neighbour filtering.
    pub fn pixelated(&self) -> bool {
        self.read(|e| e.config().render.pixelated)
    }

    #[wasm_bindgen(js_name = worldWidth)]
    pub fn world_width(&self) -> f32 {
        self.read(|e| e.config().width)
    }

    #[wasm_bindgen(js_name = worldHeight)]
    pub fn world_height(&self) -> f32 {
        self.read(|e| e.config().height)
    }
}
