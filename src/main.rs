//! Realm Clone entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use realm_clone::GameConfig;
    use realm_clone::consts::FRAME_MS;
    use realm_clone::platform::{CanvasRect, Session, resolve_click};
    use realm_clone::renderer::{CanvasRenderer, render_frame};
    use realm_clone::sim::Snapshot;

    /// Game instance holding all state
    struct Game {
        session: Session,
        renderer: Option<CanvasRenderer>,
        last_time: f64,
    }

    impl Game {
        fn frame(&mut self, time: f64) -> Snapshot {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FRAME_MS
            };
            self.last_time = time;

            let snapshot = self.session.frame(dt);
            render_frame(self.renderer.as_mut(), &snapshot);
            snapshot
        }
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Everything registered with the browser for one session
    pub struct Host {
        window: Window,
        frame_callback: FrameCallback,
        frame_id: Rc<RefCell<Option<i32>>>,
        spawn_timer: Option<i32>,
        _spawn_callback: Closure<dyn FnMut()>,
        listeners: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
    }

    impl Host {
        /// Cancel the frame loop, spawn timer and listeners
        fn teardown(&mut self) {
            if let Some(id) = self.frame_id.borrow_mut().take() {
                let _ = self.window.cancel_animation_frame(id);
            }
            self.frame_callback.borrow_mut().take();

            if let Some(id) = self.spawn_timer.take() {
                self.window.clear_interval_with_handle(id);
            }

            for (target, kind, closure) in self.listeners.drain(..) {
                let _ = target
                    .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            }
            log::info!("Session torn down");
        }
    }

    impl Drop for Host {
        fn drop(&mut self) {
            self.teardown();
        }
    }

    fn update_hud(document: &web_sys::Document, snapshot: &Snapshot) {
        if let Some(el) = document.get_element_by_id("hud-health") {
            el.set_text_content(Some(&snapshot.hud.health_text()));
        }
        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&snapshot.hud.score_text()));
        }
    }

    /// Pointer position in field coordinates, if the click landed on the game canvas
    fn click_target(event: &MouseEvent, canvas_id: &str, field: Vec2) -> Option<Vec2> {
        let canvas = event.target()?.dyn_into::<HtmlCanvasElement>().ok()?;
        let rect = canvas.get_bounding_client_rect();
        let rect = CanvasRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        };
        let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        resolve_click(&canvas.id(), canvas_id, client, Some(rect), field.x, field.y)
    }

    fn listen(
        listeners: &mut Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
        target: &EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) {
        if target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .is_ok()
        {
            listeners.push((target.clone(), kind, closure));
        } else {
            log::warn!("Failed to register {} listener", kind);
        }
    }

    pub fn start(canvas_id: &str) -> Result<Host, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = GameConfig::default()
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let field = Vec2::new(config.field_width, config.field_height);
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);

        // A missing canvas or context just means frames are skipped
        let renderer = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| CanvasRenderer::new(&canvas));
        if renderer.is_none() {
            log::warn!("Canvas '{}' unavailable; rendering disabled", canvas_id);
        }

        let session = Session::new(config, seed);
        let spawn_interval = session.spawn_interval_ms();
        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            last_time: 0.0,
        }));

        // Input listeners only touch the intent set / fire queue
        let mut listeners = Vec::new();
        let window_target: EventTarget = window.clone().into();
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| e.key()) {
                    game.borrow_mut().session.input_mut().key_down(&key);
                }
            });
            listen(&mut listeners, &window_target, "keydown", closure);
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| e.key()) {
                    game.borrow_mut().session.input_mut().key_up(&key);
                }
            });
            listen(&mut listeners, &window_target, "keyup", closure);
        }
        {
            // Keys released while the page is unfocused never send keyup
            let game = game.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                game.borrow_mut().session.input_mut().release_all();
            });
            listen(&mut listeners, &window_target, "blur", closure);
        }
        {
            let game = game.clone();
            let canvas_id = canvas_id.to_owned();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let target = event
                    .dyn_ref::<MouseEvent>()
                    .and_then(|e| click_target(e, &canvas_id, field));
                game.borrow_mut().session.input_mut().click(target);
            });
            listen(&mut listeners, &window_target, "click", closure);
        }

        // Real-time spawn timer, independent of frame rate
        let spawn_callback = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().session.spawn_now();
            })
        };
        let spawn_timer = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                spawn_callback.as_ref().unchecked_ref(),
                spawn_interval as i32,
            )
            .ok();

        // Frame loop: schedule the next frame only after this one finishes
        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(RefCell::new(None));
        {
            let callback = frame_callback.clone();
            let frame_id_inner = frame_id.clone();
            let window_inner = window.clone();
            *frame_callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let snapshot = game.borrow_mut().frame(time);
                update_hud(&document, &snapshot);

                let next = callback.borrow().as_ref().and_then(|cb| {
                    window_inner
                        .request_animation_frame(cb.as_ref().unchecked_ref())
                        .ok()
                });
                *frame_id_inner.borrow_mut() = next;
            }));
        }
        let first = frame_callback.borrow().as_ref().and_then(|cb| {
            window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok()
        });
        *frame_id.borrow_mut() = first;

        log::info!("Realm Clone running (seed {})", seed);

        Ok(Host {
            window,
            frame_callback,
            frame_id,
            spawn_timer,
            _spawn_callback: spawn_callback,
            listeners,
        })
    }
}

/// Handle to a running browser session; `stop()` releases every registration
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct GameHandle {
    host: Option<wasm_game::Host>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GameHandle {
    pub fn stop(&mut self) {
        // Dropping the host cancels everything it registered
        self.host.take();
    }
}

/// Start a session drawing into the canvas with the given element id
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_game(canvas_id: &str) -> Result<GameHandle, JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Realm Clone starting...");
    let host = wasm_game::start(canvas_id)?;
    Ok(GameHandle { host: Some(host) })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use realm_clone::GameConfig;
    use realm_clone::platform::native::{LoopOptions, spawn_session};
    use realm_clone::renderer::HudLogger;
    use realm_clone::sim::Autopilot;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Realm Clone (native, headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path),
        None => GameConfig::default().validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session_secs = std::env::var("REALM_SESSION_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(30);

    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let options = LoopOptions {
        autopilot: Some(Autopilot::default()),
        renderer: Some(Box::new(HudLogger::default())),
        ..Default::default()
    };
    let handle = match spawn_session(config, seed, options) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("Failed to start session thread: {}", e);
            return ExitCode::FAILURE;
        }
    };

    std::thread::sleep(Duration::from_secs(session_secs));

    if let Some(last) = handle.shutdown() {
        log::info!(
            "Final: {} | {} | destroyed {}",
            last.hud.health_text(),
            last.hud.score_text(),
            last.kills
        );
    }
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is start_game, this is just to satisfy the compiler
}
