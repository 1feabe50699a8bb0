//! Planet Defense entry point
//!
//! Web: wires the canvas, WebGPU, audio and DOM HUD to the session and
//! drives it with `requestAnimationFrame`.
//! Native: plays a seeded headless session and prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use planet_defense::audio::web::AudioManager;
    use planet_defense::platform::HudSink;
    use planet_defense::renderer::{RenderState, Renderer, Scene};
    use planet_defense::sim::Playfield;
    use planet_defense::{Game, Settings};

    /// Score/health text and the end overlay, straight into the page
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_overlay_hidden(&self, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id("gameOverOverlay") {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    impl HudSink for DomHud {
        fn update_hud(&mut self, score: u32, health: i32, level: u32) {
            self.set_text("score", &format!("Score: {}", score));
            self.set_text(
                "health",
                &format!("Earth Health: {} | Level: {}", health.max(0), level),
            );
        }

        fn show_end_overlay(&mut self, win: bool, final_score: u32) {
            if let Some(title) = self
                .document
                .query_selector("#gameOverOverlay h1")
                .ok()
                .flatten()
            {
                title.set_text_content(Some(if win { "You Win!" } else { "Game Over" }));
            }
            self.set_text("finalScore", &final_score.to_string());
            self.set_overlay_hidden(false);
        }

        fn hide_end_overlay(&mut self) {
            self.set_overlay_hidden(true);
        }
    }

    type WebGame = Game<Renderer, AudioManager, DomHud>;

    /// Session plus frame scheduling
    struct App {
        game: WebGame,
        /// A frame callback is pending
        loop_active: bool,
    }

    impl App {
        /// Start a session; returns true if the caller must schedule the first frame
        fn start(&mut self) -> bool {
            self.game.start();
            !std::mem::replace(&mut self.loop_active, true)
        }
    }

    /// Window size in CSS pixels; the canvas maps 1:1 so pointer offsets are surface coords
    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        let w = px(window.inner_width()).max(1.0) as u32;
        let h = px(window.inner_height()).max(1.0) as u32;
        (w, h)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Planet Defense starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into::<HtmlCanvasElement>()?;

        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let gpu = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {}", e)))?;
        let scene = Scene::new(
            Playfield::new(width as f32, height as f32),
            settings.quality,
            seed,
        );

        let game = Game::with_tuning(
            seed,
            settings.tuning.clone(),
            Renderer::new(scene, gpu),
            AudioManager::new(&settings),
            DomHud {
                document: document.clone(),
            },
        );
        let app = Rc::new(RefCell::new(App {
            game,
            loop_active: false,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_resize_handler(&window, &canvas, app.clone());
        setup_restart_button(&document, app.clone());

        if app.borrow_mut().start() {
            request_animation_frame(app);
        }

        log::info!("Planet Defense running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse click: offset coordinates are relative to the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let x = event.offset_x() as f32;
                let y = event.offset_y() as f32;
                app.borrow_mut().game.pointer_down(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: first touch point relative to the canvas rectangle
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress the emulated click that would tap a second time
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    app.borrow_mut().game.pointer_down(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = window_size(&window);
            canvas.set_width(width);
            canvas.set_height(height);
            app.borrow_mut().game.surface_mut().resize(width, height);
            log::debug!("Resized to {}x{}", width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) {
        let Some(btn) = document.get_element_by_id("restartButton") else {
            log::warn!("Restart button missing");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let schedule = app.borrow_mut().start();
            if schedule {
                request_animation_frame(app.clone());
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let keep_going = a.game.tick(time);
            a.loop_active = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use planet_defense::Tuning;
    use planet_defense::headless::{self, HeadlessConfig};

    env_logger::init();
    log::info!("Planet Defense (native) starting headless session...");

    // Usage: planet-defense [seed] [aim_every]
    let mut config = HeadlessConfig::default();
    let mut args = std::env::args().skip(1);
    if let Some(arg) = args.next() {
        match arg.parse() {
            Ok(seed) => config.seed = seed,
            Err(_) => log::warn!("Ignoring bad seed {:?}", arg),
        }
    }
    if let Some(arg) = args.next() {
        match arg.parse() {
            Ok(aim_every) => config.aim_every = aim_every,
            Err(_) => log::warn!("Ignoring bad aim interval {:?}", arg),
        }
    }
    if let Ok(json) = std::env::var("PLANET_DEFENSE_TUNING") {
        match Tuning::from_json(&json) {
            Ok(tuning) => config.tuning = tuning,
            Err(e) => log::warn!("Ignoring PLANET_DEFENSE_TUNING: {}", e),
        }
    }

    let summary = headless::run(&config);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to encode summary: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
