//! Flappy entry point
//!
//! On the web: mounts the game on `#canvas`, wires DOM input and the HUD, and
//! runs the animation loop. Natively: runs the autopilot headless and logs
//! the rounds it plays.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use flappy_web::Settings;
    use flappy_web::audio::{AudioManager, SoundEffect};
    use flappy_web::persistence::LocalStore;
    use flappy_web::platform::dom::{AnimationLoop, Listener};
    use flappy_web::platform::{
        Action, BUTTON_IDS, POINTER_ACTION, action_for_button, action_for_key,
    };
    use flappy_web::renderer::{NullRenderer, RenderInitError, RenderState, SceneOptions};
    use flappy_web::session::Session;
    use flappy_web::sim::GamePhase;

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        /// `None` when WebGPU/WebGL is unavailable; the HUD still works
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        document: Document,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let events = match self.render_state.as_mut() {
                Some(render_state) => self.session.frame(time, render_state),
                None => self.session.frame(time, &mut NullRenderer),
            };
            for event in events {
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }
            self.update_hud();
        }

        fn handle_action(&mut self, action: Action) {
            self.audio.resume();
            if action == Action::ToggleMute {
                self.settings.muted = !self.settings.muted;
                self.settings.save(&mut LocalStore::new());
                self.audio.apply_settings(&self.settings);
                log::info!("Muted: {}", self.settings.muted);
                return;
            }
            self.session.handle_action(action);
        }

        /// Latch a pause if the player would otherwise lose the round unattended
        fn auto_pause(&mut self, reason: &str) {
            let state = &self.session.state;
            if self.settings.pause_on_blur && state.phase == GamePhase::Playing && !state.paused {
                self.session.handle_action(Action::TogglePause);
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let view = self.session.view();
            let document = &self.document;

            set_text(document, "hud-score", &view.score.to_string());
            set_text(document, "hud-best", &view.best.to_string());
            set_hidden(document, "hud-fps", !self.settings.show_fps);
            if self.settings.show_fps {
                set_text(document, "hud-fps", &format!("{} fps", view.fps));
            }
            set_hidden(document, "idle-badge", !view.idle);
            let hint = view.pause_hint();
            set_hidden(document, "hud-pause", hint.is_none());
            if let Some(hint) = hint {
                set_text(document, "hud-pause", hint);
            }
            set_hidden(document, "pause-btn", view.phase != GamePhase::Playing);
            set_hidden(document, "menu-btn", view.phase != GamePhase::GameOver);

            set_hidden(document, "menu-overlay", view.phase != GamePhase::Menu);
            set_hidden(
                document,
                "pause-overlay",
                !(view.phase == GamePhase::Playing && view.paused),
            );
            let game_over = view.phase == GamePhase::GameOver;
            set_hidden(document, "gameover-overlay", !game_over);
            if game_over {
                set_text(document, "final-score", &view.score.to_string());
                set_text(document, "final-best", &view.best.to_string());
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Everything the running game holds on to. Dropping it stops the loop
    /// and removes every listener.
    struct Mount {
        _listeners: Vec<Listener>,
        _animation: AnimationLoop,
    }

    thread_local! {
        static MOUNT: RefCell<Option<Mount>> = const { RefCell::new(None) };
    }

    pub fn unmount() {
        let mount = MOUNT.with(|m| m.borrow_mut().take());
        if mount.is_some() {
            drop(mount);
            log::info!("Flappy unmounted");
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy starting...");

        // A second mount replaces the first
        unmount();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load(&LocalStore::new());

        let render_state = match init_renderer(&canvas, width, height).await {
            Ok(mut render_state) => {
                render_state.options = SceneOptions {
                    tilt: !settings.reduced_motion,
                };
                Some(render_state)
            }
            Err(e) => {
                log::error!("Graphics unavailable, running without canvas: {}", e);
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, LocalStore::new()),
            render_state,
            audio: AudioManager::new(&settings),
            settings,
            document: document.clone(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        let listeners = setup_listeners(&window, &document, &canvas, &game);

        let animation = {
            let game = game.clone();
            AnimationLoop::start(move |time| game.borrow_mut().frame(time))
        };

        MOUNT.with(|m| {
            *m.borrow_mut() = Some(Mount {
                _listeners: listeners,
                _animation: animation,
            })
        });

        log::info!("Flappy running!");
        Ok(())
    }

    fn setup_listeners(
        window: &web_sys::Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Vec<Listener> {
        let mut listeners = Vec::new();

        // Keyboard
        {
            let game = game.clone();
            listeners.push(Listener::new(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                let Some(action) = action_for_key(&event.code()) else {
                    return;
                };
                if action.prevents_default() {
                    event.prevent_default();
                }
                // Holding a key does not machine-gun flaps
                if event.repeat() {
                    return;
                }
                game.borrow_mut().handle_action(action);
            }));
        }

        // Pointer (mouse, touch, pen)
        {
            let game = game.clone();
            listeners.push(Listener::new(canvas, "pointerdown", move |event| {
                event.prevent_default();
                game.borrow_mut().handle_action(POINTER_ACTION);
            }));
        }

        // On-screen Menu / Pause buttons
        for id in BUTTON_IDS {
            let (Some(button), Some(action)) = (document.get_element_by_id(id), action_for_button(id))
            else {
                log::warn!("Missing control button #{}", id);
                continue;
            };
            let game = game.clone();
            listeners.push(Listener::new(&button, "click", move |event| {
                // A focused button would also fire on Space
                if let Some(el) = event
                    .current_target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    let _ = el.blur();
                }
                game.borrow_mut().handle_action(action);
            }));
        }

        // Tab hidden
        {
            let game = game.clone();
            let document_clone = document.clone();
            listeners.push(Listener::new(document, "visibilitychange", move |_| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            }));
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            listeners.push(Listener::new(window, "blur", move |_| {
                game.borrow_mut().auto_pause("window blur");
            }));
        }

        // Canvas resize
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            listeners.push(Listener::new(window, "resize", move |_| {
                let dpr = web_sys::window()
                    .map(|w| w.device_pixel_ratio())
                    .unwrap_or(1.0);
                let width = (canvas_clone.client_width() as f64 * dpr) as u32;
                let height = (canvas_clone.client_height() as f64 * dpr) as u32;
                if width == 0 || height == 0 {
                    return;
                }
                canvas_clone.set_width(width);
                canvas_clone.set_height(height);
                if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                    render_state.resize(width, height);
                }
            }));
        }

        // Page going away; unmount once this callback has returned
        listeners.push(Listener::new(window, "pagehide", move |_| {
            wasm_bindgen_futures::spawn_local(async { unmount() });
        }));

        listeners
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

/// Stop the game loop and remove every listener
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_game::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_web::consts::DEFAULT_FRAME_MS;
    use flappy_web::renderer::NullRenderer;
    use flappy_web::sim::GameEvent;
    use flappy_web::{MemoryStore, Session};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    log::info!("Flappy (native) starting: seed {}, {} frames", seed, frames);
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let mut session = Session::new(seed, MemoryStore::new());
    session.set_idle_mode(true);
    let mut renderer = NullRenderer;

    let mut rounds = 0;
    for frame in 0..frames {
        let now = frame as f64 * DEFAULT_FRAME_MS as f64;
        for event in session.frame(now, &mut renderer) {
            if let GameEvent::Crashed { cause, score } = event {
                rounds += 1;
                log::info!("Round {} over: {:?}, score {}", rounds, cause, score);
            }
        }
    }

    log::info!(
        "Finished {} frames: {} rounds, best {}, current score {}",
        frames,
        rounds,
        session.best(),
        session.state.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
