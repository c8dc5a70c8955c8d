//! Chroma Blob entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build drives the game from requestAnimationFrame; the native
//! build runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use chroma_blob::platform::{InputProvider, KeyState, viewport_to_canvas};
    use chroma_blob::renderer::{HudSnapshot, RenderState, build_scene};
    use chroma_blob::{FrameOutcome, GameObserver, Session, Settings};

    const LETTERBOX: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Forwards level-ups and game over to the page
    struct DomObserver;

    impl GameObserver for DomObserver {
        fn on_level_up(&mut self, level: u32) {
            log::info!("Level {}", level);
            set_text("level-banner", &format!("Level {}", level));
        }

        fn on_game_over(&mut self, final_score: u64) {
            log::info!("Game over, final score {}", final_score);
            set_text("final-score", &final_score.to_string());
            set_hidden("game-over", false);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session<DomObserver>,
        render_state: Option<RenderState>,
        keys: KeyState,
        settings: Settings,
        touch_capable: bool,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, touch_capable: bool) -> Self {
            Self {
                session: Session::new(seed, DomObserver),
                render_state: None,
                keys: KeyState::new(),
                settings: Settings::load(),
                touch_capable,
                canvas,
            }
        }

        /// Run one simulation tick
        fn update(&mut self) -> FrameOutcome {
            let input = self.keys.sample();
            self.session.frame(&input)
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let show_touch = self.settings.touch_controls.enabled(self.touch_capable);
            let vertices = build_scene(
                self.session.state(),
                &self.settings,
                show_touch.then_some(&self.keys),
            );

            match render_state.render(&vertices, LETTERBOX) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = HudSnapshot::from_state(self.session.state());
            set_text("hud-score", &hud.score.to_string());
            set_text("hud-level", &hud.level.to_string());
            set_text("hud-lives", &hud.lives.to_string());
            let color = match hud.ability {
                Some(ability) => format!("{} ({})", hud.color, ability),
                None => hud.color.to_string(),
            };
            set_text("hud-color", &color);

            let effects: Vec<String> = hud
                .countdowns
                .iter()
                .map(|c| format!("{} {}s", c.label, c.seconds))
                .collect();
            set_text("hud-effects", &effects.join(" | "));
        }

        /// Pointer/touch position in canvas coordinates
        fn to_canvas(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let point = Vec2::new(
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            );
            viewport_to_canvas(point, Vec2::new(rect.width() as f32, rect.height() as f32))
        }

        fn resize_canvas(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Chroma Blob starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        set_hidden("loading", true);

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let touch_capable = window.navigator().max_touch_points() > 0;

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone(), touch_capable)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (the game keeps simulating without a surface)
        match create_render_state(canvas.clone(), width, height).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::warn!("Running without a render surface"),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_lifecycle_handlers(game.clone());

        set_hidden("hud", false);

        // Start game loop
        request_animation_frame(game);

        log::info!("Chroma Blob running!");
    }

    async fn create_render_state(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                None
            }
        }
    }

    fn touch_points(game: &Game, event: &TouchEvent) -> Vec<Vec2> {
        let touches = event.touches();
        (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| game.to_canvas(t.client_x(), t.client_y()))
            .collect()
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: every change replaces the full set of active touches
        for name in ["touchstart", "touchmove", "touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let points = touch_points(&g, &event);
                g.keys.set_touches(&points);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_lifecycle_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Window blur (click outside) - release held keys
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tab hidden - same as blur
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().keys.clear();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize_canvas();
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page unload - stop the loop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.cancel();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = {
            let mut g = game.borrow_mut();
            let outcome = g.update();
            g.render();
            g.update_hud();
            outcome
        };

        if outcome == FrameOutcome::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use serde::Serialize;

    use chroma_blob::platform::{InputProvider, KeyState};
    use chroma_blob::renderer::{HudSnapshot, build_scene};
    use chroma_blob::sim::GameEvent;
    use chroma_blob::{FrameOutcome, GameObserver, QualityPreset, Session, Settings};

    /// Headless Chroma Blob: the autopilot plays a seeded run
    #[derive(Debug, Parser)]
    #[command(version, about)]
    pub struct Args {
        /// Run seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Maximum frames to simulate (60 per second of game time)
        #[arg(long, default_value_t = 36_000)]
        pub frames: u64,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Override the settings' quality preset (low, medium, high)
        #[arg(long)]
        pub quality: Option<QualityPreset>,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        pub summary_json: bool,
    }

    /// Counts what happened during the run
    #[derive(Debug, Default)]
    struct RunLog {
        levels: Vec<u32>,
        final_score: Option<u64>,
        orbs: u32,
        power_ups: u32,
        defeats: u32,
        hits: u32,
        targets: u32,
    }

    impl GameObserver for RunLog {
        fn on_level_up(&mut self, level: u32) {
            log::info!("Reached level {}", level);
            self.levels.push(level);
        }

        fn on_game_over(&mut self, final_score: u64) {
            self.final_score = Some(final_score);
        }

        fn on_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::OrbAbsorbed { .. } => self.orbs += 1,
                GameEvent::PowerUpCollected { .. } => self.power_ups += 1,
                GameEvent::EnemyDefeated { .. } => self.defeats += 1,
                GameEvent::PlayerHit { .. } => self.hits += 1,
                GameEvent::TargetMatched { .. } => self.targets += 1,
                GameEvent::LevelUp { .. } | GameEvent::GameOver { .. } => {}
            }
        }
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        frames: u64,
        level: u32,
        score: u64,
        lives: u32,
        game_over: bool,
        levels_reached: Vec<u32>,
        orbs_absorbed: u32,
        power_ups_collected: u32,
        enemies_defeated: u32,
        hits_taken: u32,
        targets_matched: u32,
        max_vertices: usize,
    }

    fn load_settings(args: &Args) -> Settings {
        let mut settings = match &args.settings {
            Some(path) => Settings::load_from_path(path).unwrap_or_else(|e| {
                log::warn!("{}; using default settings", e);
                Settings::default()
            }),
            None => Settings::load(),
        };
        if let Some(preset) = args.quality {
            settings.apply_preset(preset);
        }
        settings
    }

    pub fn run(args: Args) {
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let settings = load_settings(&args);
        log::info!(
            "Chroma Blob (native) seed {} for up to {} frames, quality {}",
            seed,
            args.frames,
            settings.quality.as_str()
        );

        let mut keys = KeyState::new();
        keys.set_idle_mode(true);

        let mut session = Session::new(seed, RunLog::default());
        let mut frames = 0;
        let mut max_vertices = 0;
        while frames < args.frames {
            let outcome = session.frame(&keys.sample());
            frames += 1;

            let vertices = build_scene(session.state(), &settings, None);
            max_vertices = max_vertices.max(vertices.len());

            if frames % 600 == 0 {
                log::info!("{}", HudSnapshot::from_state(session.state()).lines().join(" | "));
            }
            if outcome == FrameOutcome::Stop {
                break;
            }
        }

        let state = session.state();
        let summary = RunSummary {
            seed,
            frames,
            level: state.level,
            score: state.score(),
            lives: state.player.lives,
            game_over: state.is_game_over(),
            levels_reached: session.observer().levels.clone(),
            orbs_absorbed: session.observer().orbs,
            power_ups_collected: session.observer().power_ups,
            enemies_defeated: session.observer().defeats,
            hits_taken: session.observer().hits,
            targets_matched: session.observer().targets,
            max_vertices,
        };

        match session.observer().final_score {
            Some(score) => log::info!("Game over after {} frames, score {}", frames, score),
            None => log::info!("Stopped after {} frames, score {}", frames, summary.score),
        }

        if args.summary_json {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to serialize summary: {}", e),
            }
        } else {
            for line in HudSnapshot::from_state(state).lines() {
                println!("{}", line);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    native::run(native::Args::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
