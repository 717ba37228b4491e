//! Flappy Drone entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build drives the game from `requestAnimationFrame`; the native build runs
//! a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use flappy_drone::consts::*;
    use flappy_drone::platform::{FpsCounter, FramePacer, InputEvent, InputQueue, step};
    use flappy_drone::renderer::{
        MeshSurface, RenderState, TEXT_SIZE, TextRun, compose, execute, screen_to_viewport,
        viewport_scale,
    };
    use flappy_drone::sim::GameState;
    use flappy_drone::{Assets, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        assets: Assets,
        settings: Settings,
        surface: MeshSurface,
        render_state: Option<RenderState>,
        pacer: FramePacer,
        fps: FpsCounter,
        input: InputQueue,
        last_time: f64,
        running: bool,
        /// DOM nodes showing the frame's text runs
        text_nodes: Vec<web_sys::Element>,
        shown_texts: Vec<TextRun>,
        shown_viewport: (u32, u32),
    }

    impl Game {
        fn new(seed: u64, assets: Assets, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                surface: MeshSurface::new(&assets),
                assets,
                settings,
                render_state: None,
                pacer: FramePacer::default(),
                fps: FpsCounter::default(),
                input: InputQueue::new(),
                last_time: 0.0,
                running: true,
                text_nodes: Vec::new(),
                shown_texts: Vec::new(),
                shown_viewport: (0, 0),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.fps.frame(dt);
            for _ in 0..self.pacer.steps(dt) {
                let (_, frame) = step(&mut self.state, &mut self.input);
                if frame.quit {
                    self.running = false;
                    log::info!("Quit requested, final score {}", self.state.score);
                    return;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let commands = compose(&self.state, &self.assets, &self.settings);
            if let Err(e) = execute(&mut self.surface, &commands) {
                log::warn!("Compose error: {e}");
                return;
            }
            let Some(frame) = self.surface.take_frame() else {
                return;
            };
            self.draw_texts(&frame.texts);
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(&frame) {
                Ok(()) => {}
                Err(e) if e.needs_reconfigure() => render_state.reconfigure(),
                Err(e) => log::warn!("Render error: {e}"),
            }
        }

        /// Lay the frame's text runs over the canvas as positioned DOM text.
        ///
        /// The overlay covers the same area as the canvas, so run positions go
        /// through the same letterbox mapping as the triangles.
        fn draw_texts(&mut self, texts: &[TextRun]) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(overlay) = document.get_element_by_id("overlay") else {
                return;
            };
            let viewport = (
                overlay.client_width().max(0) as u32,
                overlay.client_height().max(0) as u32,
            );
            if texts == self.shown_texts.as_slice() && viewport == self.shown_viewport {
                return;
            }

            while self.text_nodes.len() < texts.len() {
                let Ok(node) = document.create_element("div") else {
                    return;
                };
                let _ = node.set_attribute("class", "text-run");
                if overlay.append_child(&node).is_err() {
                    return;
                }
                self.text_nodes.push(node);
            }

            let (w, h) = viewport;
            let font_size = TEXT_SIZE * viewport_scale(w, h);
            for (node, run) in self.text_nodes.iter().zip(texts) {
                let [x, y] = screen_to_viewport(run.pos.into(), w, h);
                node.set_text_content(Some(&run.text));
                let style = format!(
                    "left:{x}px;top:{y}px;font-size:{font_size}px;color:{}",
                    run.color.to_css()
                );
                let _ = node.set_attribute("style", &style);
            }
            for node in &self.text_nodes[texts.len()..] {
                node.set_text_content(None);
            }

            self.shown_texts = texts.to_vec();
            self.shown_viewport = viewport;
        }

        /// FPS readout in the HUD
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps { "hud-item" } else { "hud-item hidden" };
                let _ = el.set_attribute("class", class);
            }
            if self.settings.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&format!("{:.0}", self.fps.fps())));
                }
            }
        }

        /// Cosmetic toggles; persisted immediately
        fn toggle_setting(&mut self, key: &str) -> bool {
            match key {
                "f" | "F" => self.settings.show_fps = !self.settings.show_fps,
                "m" | "M" => self.settings.reduced_motion = !self.settings.reduced_motion,
                _ => return false,
            }
            self.settings.save();
            true
        }

        /// Drop any backlog after the page was hidden
        fn suspend(&mut self) {
            self.pacer.reset();
            self.last_time = 0.0;
        }
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_error)?;

        log::info!("Flappy Drone starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let assets = Assets::builtin().map_err(js_error)?;
        let settings = Settings::load();

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, assets, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_error)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_error)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_error)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(canvas.clone(), game.clone());
        setup_auto_suspend(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Drone running at {} FPS", FPS);
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer (mouse, touch, pen) jumps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                game.borrow_mut().input.push(InputEvent::Jump);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = event.key();
                if game.borrow_mut().toggle_setting(&key) {
                    return;
                }
                if game.borrow_mut().input.push_key(&key) {
                    // Keep Space and arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keep the backing store at device resolution
    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_suspend(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().suspend();
                    log::info!("Suspended (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().suspend();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
            g.running
        };

        if running {
            request_animation_frame(game);
        } else {
            log::info!("Game loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::Context;
    use clap::Parser;

    use flappy_drone::consts::FPS;
    use flappy_drone::platform::{FrameClock, InputEvent, InputQueue, step};
    use flappy_drone::renderer::{MeshSurface, compose, execute};
    use flappy_drone::sim::{GameEvent, GameState};
    use flappy_drone::{Assets, Settings};

    /// Headless Flappy Drone session flown by the autopilot
    #[derive(Debug, Parser)]
    #[command(version, about)]
    pub struct Args {
        /// Frames to simulate before quitting
        #[arg(long, default_value_t = 900)]
        pub frames: u64,
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Don't sleep between frames
        #[arg(long)]
        pub fast: bool,
        /// Alternate sprite manifest (JSON)
        #[arg(long)]
        pub manifest: Option<std::path::PathBuf>,
    }

    #[derive(Debug, Default)]
    struct Summary {
        runs: u32,
        best_score: u32,
        vertices: usize,
    }

    pub fn run(args: Args) -> anyhow::Result<()> {
        let assets = match &args.manifest {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading manifest {}", path.display()))?;
                Assets::from_json(&json)
                    .with_context(|| format!("loading manifest {}", path.display()))?
            }
            None => Assets::builtin().context("loading built-in sprite manifest")?,
        };
        let settings = Settings::load();

        log::info!(
            "Flappy Drone (headless) seed={} frames={} at {} FPS",
            args.seed,
            args.frames,
            FPS
        );

        let mut state = GameState::new(args.seed);
        let mut surface = MeshSurface::new(&assets);
        let mut input = InputQueue::new();
        input.push(InputEvent::ToggleAutopilot);
        let mut clock = FrameClock::new(FPS);
        let mut summary = Summary {
            runs: 1,
            ..Default::default()
        };

        for frame in 0..args.frames {
            // Frame limit stands in for Escape
            if frame + 1 == args.frames {
                input.push(InputEvent::Quit);
            }
            let (events, frame_input) = step(&mut state, &mut input);
            summary.best_score = summary.best_score.max(state.score);
            for event in &events {
                if let GameEvent::Crashed { score, .. } = event {
                    summary.best_score = summary.best_score.max(*score);
                    summary.runs += 1;
                }
            }

            let commands = compose(&state, &assets, &settings);
            execute(&mut surface, &commands).context("drawing frame")?;
            if let Some(frame) = surface.take_frame() {
                summary.vertices = summary.vertices.max(frame.vertices.len());
            }

            if frame_input.quit {
                break;
            }
            if !args.fast {
                let late = clock.wait();
                if !late.is_zero() {
                    log::debug!("Frame {frame} ran {late:?} late");
                }
            }
        }

        log::info!(
            "Done after {} frames (seed {}): {} runs, best score {}, peak {} vertices",
            surface.frames_presented(),
            state.seed,
            summary.runs,
            summary.best_score,
            summary.vertices
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run(headless::Args::parse())
}
