//! Wave Survivor entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use wave_survivor::consts::MAX_SUBSTEPS;
    use wave_survivor::renderer::RenderState;
    use wave_survivor::sim::{GameEvent, GameState, TickInput, tick};
    use wave_survivor::{Config, PlayerSprite};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        tick_dt: f32,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, config: &Config, sprite: &PlayerSprite) -> Self {
            Self {
                state: GameState::new(seed, config, sprite.size),
                render_state: None,
                tick_dt: config.tick_dt(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= self.tick_dt;
                substeps += 1;

                // Quit is one-shot
                self.input.quit = false;
            }

            for event in self.state.take_events() {
                match event {
                    GameEvent::WaveStarted { wave, enemies } => {
                        log::info!("Wave {} ({} enemies)", wave, enemies)
                    }
                    GameEvent::PlayerHit { damage, health } => {
                        log::info!("Hit for {} - health {}", damage, health)
                    }
                    GameEvent::GameOver { wave, ticks } => {
                        log::info!("Game over on wave {} after {} ticks", wave, ticks)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state.frame()) {
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
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Wave Survivor starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No #canvas element");
                return;
            }
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let config = Config::load();
        let sprite = PlayerSprite::fetch_or_placeholder(&config.player_sprite).await;

        // Initialize game
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, &config, &sprite)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
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
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let screen = (config.screen_width as f32, config.screen_height as f32);
        match RenderState::new(surface, &adapter, width, height, screen, &sprite).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Renderer setup failed: {}", e);
                return;
            }
        }

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Wave Survivor running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down: hold directions, one-shot commands
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => g.input.up = true,
                    "ArrowDown" | "s" | "S" => g.input.down = true,
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "Escape" => g.input.quit = true,
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up: release directions
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" | "W" => g.input.up = false,
                    "ArrowDown" | "s" | "S" => g.input.down = false,
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
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
                g.tick_dt
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.state.is_running()
        };

        // Last frame stays on screen once the run ends
        if running {
            request_animation_frame(game);
        } else {
            log::info!("Wave Survivor stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wave Survivor (native) starting...");
    log::info!("Native mode runs headless in idle mode - run with `trunk serve` to play");

    let config = wave_survivor::Config::load();
    let summary = headless::run(&config);
    println!(
        "Reached wave {} in {} ticks ({} enemies destroyed, health {})",
        summary.wave, summary.ticks, summary.kills, summary.health
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use wave_survivor::sim::{GameEvent, GameState, TickInput, tick};
    use wave_survivor::{Config, PlayerSprite};

    /// Outcome of a headless run
    pub struct Summary {
        pub wave: u32,
        pub ticks: u64,
        pub kills: u32,
        pub health: i32,
    }

    /// Play with the idle AI until game over or the tick cap
    pub fn run(config: &Config) -> Summary {
        let sprite = PlayerSprite::load_or_placeholder(&config.player_sprite);
        let seed = config.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Game initialized with seed: {}", seed);

        let mut state = GameState::new(seed, config, sprite.size);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut kills = 0;
        while state.is_running() && state.time_ticks < config.max_ticks {
            tick(&mut state, &input);
            for event in state.take_events() {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::PlayerHit { damage, health } => {
                        log::info!("Hit for {} - health {}", damage, health)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        if state.is_running() {
            log::info!("Tick limit reached ({})", config.max_ticks);
        }

        Summary {
            wave: state.wave,
            ticks: state.time_ticks,
            kills,
            health: state.player.health,
        }
    }
}
