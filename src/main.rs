//! Neon Highway entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use neon_highway::hud::HudModel;
    use neon_highway::scene::{NullRenderer, Renderer, SceneSnapshot};
    use neon_highway::sim::{GameState, Steer, TickInput, advance};
    use neon_highway::Settings;

    /// Minimum milliseconds between simulation frames (~60 Hz cap)
    const FRAME_INTERVAL_MS: f64 = 16.67;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        hud: HudModel,
        input: TickInput,
        renderer: Box<dyn Renderer>,
        settings: Settings,
        last_time: f64,
        canvas_width: f32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                hud: HudModel::default(),
                input: TickInput::default(),
                // Drawing is host-provided; swap in the real renderer here
                renderer: Box::new(NullRenderer),
                settings: Settings::load(),
                last_time: 0.0,
                canvas_width: 0.0,
            }
        }

        /// Map a pointer x coordinate to a steer direction (left/right half)
        fn tap_to_steer(&self, x: f32) -> Steer {
            if x < self.canvas_width / 2.0 {
                Steer::Left
            } else {
                Steer::Right
            }
        }

        /// Record a discrete tap: before the first one the run starts,
        /// after that it steers
        fn handle_tap(&mut self, x: f32) {
            if self.state.started {
                self.input.steer = Some(self.tap_to_steer(x));
            } else {
                self.input.start = true;
            }
        }

        /// Advance one frame and clear one-shot inputs
        fn update(&mut self, dt: f32) {
            let input = self.input;
            advance(&mut self.state, &input, dt);
            self.input = TickInput::default();
        }

        /// Render the current frame through the external collaborator
        fn render(&mut self, time: f64) {
            let snapshot = SceneSnapshot::capture(&self.state);
            self.renderer.render(&snapshot, time);
        }

        /// Update HUD elements in DOM (only fields that changed)
        fn update_hud(&mut self) {
            let changes = self.hud.observe(&self.state);
            if !changes.any() && self.state.started {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if changes.score {
                if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.hud.score.to_string()));
                }
            }

            if changes.high_score {
                if let Some(el) = document
                    .query_selector("#hud-highscore .hud-value")
                    .ok()
                    .flatten()
                {
                    el.set_text_content(Some(&self.hud.high_score.to_string()));
                }
            }

            // Combo badge only shows while a streak is running
            if let Some(el) = document.get_element_by_id("hud-combo") {
                if self.hud.combo > 1 {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-combo .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&format!("x{}", self.hud.combo)));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // "Tap to start" prompt until the run begins
            if let Some(el) = document.get_element_by_id("start-prompt") {
                let class = if self.state.started { "hidden" } else { "" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Highway starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the backing store for the device pixel ratio
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().canvas_width = client_w as f32;

        log::info!(
            "Game initialized with seed {} (quality: {})",
            seed,
            game.borrow().settings.quality.as_str()
        );

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Neon Highway running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse: tap either half of the road to steer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().handle_tap(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().handle_tap(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        if g.state.started {
                            g.input.steer = Some(Steer::Left);
                        } else {
                            g.input.start = true;
                        }
                    }
                    "ArrowRight" | "d" | "D" => {
                        if g.state.started {
                            g.input.steer = Some(Steer::Right);
                        } else {
                            g.input.start = true;
                        }
                    }
                    " " | "Enter" => g.input.start = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let elapsed = time - g.last_time;
            // Cap at ~60 Hz; the display may tick faster
            if g.last_time > 0.0 && elapsed < FRAME_INTERVAL_MS {
                drop(g);
                request_animation_frame(game);
                return;
            }

            let dt = if g.last_time > 0.0 {
                (elapsed / 1000.0) as f32
            } else {
                (FRAME_INTERVAL_MS / 1000.0) as f32
            };
            g.last_time = time;

            g.update(dt);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_highway::scene::{NullRenderer, Renderer, SceneSnapshot};
    use neon_highway::sim::{GameState, Steer, TickInput, advance};

    env_logger::init();
    log::info!("Neon Highway (native) starting...");

    // Headless demo run: no windowing on native, just the simulation
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    let mut renderer = NullRenderer;

    advance(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        0.0,
    );

    let dt = 1.0 / 60.0;
    for tick in 0u32..600 {
        // Weave across the road so some passes land in the near-miss band
        let steer = match tick % 120 {
            0..30 => Some(Steer::Left),
            60..90 => Some(Steer::Right),
            _ => None,
        };
        advance(&mut state, &TickInput { steer, start: false }, dt);
        renderer.render(&SceneSnapshot::capture(&state), f64::from(tick) * 16.67);
    }

    log::info!(
        "Demo run done: score {}, combo x{}, {} cars on the road",
        state.score,
        state.combo,
        state.traffic.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
