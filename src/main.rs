//! Arcade Loop entry point
//!
//! Handles platform-specific initialization and drives the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::{Vec2, Vec3};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use arcade_loop::consts::flat::{PLAY_HEIGHT, PLAY_WIDTH};
    use arcade_loop::renderer::vertex::css;
    use arcade_loop::renderer::{Color, Projection, RenderSurface, Shape, TextAlign, colors};
    use arcade_loop::{ArcadeConfig, FrameRequests, GameLoop, Variant};

    /// Canvas 2D drawing surface
    struct CanvasSurface {
        ctx: CanvasRenderingContext2d,
        projection: Projection,
    }

    impl RenderSurface for CanvasSurface {
        fn clear(&mut self) {
            let view = self.projection.view;
            self.ctx.set_fill_style_str(&css(colors::BACKGROUND));
            self.ctx.fill_rect(0.0, 0.0, view.x as f64, view.y as f64);
        }

        fn fill_shape(&mut self, shape: Shape, color: Color, pos: Vec3, size: Vec3) {
            let Some(rect) = self.projection.project_box(pos, size) else {
                return;
            };
            self.ctx.set_fill_style_str(&css(color));
            match shape {
                Shape::Rect | Shape::Cube => {
                    let extent = rect.size();
                    self.ctx.fill_rect(
                        rect.min.x as f64,
                        rect.min.y as f64,
                        extent.x as f64,
                        extent.y as f64,
                    );
                }
                Shape::Sphere => {
                    let centre = rect.centre();
                    let radius = rect.size().min_element() / 2.0;
                    self.ctx.begin_path();
                    let _ = self
                        .ctx
                        .arc(centre.x as f64, centre.y as f64, radius as f64, 0.0, TAU);
                    self.ctx.fill();
                }
            }
        }

        fn fill_text(&mut self, text: &str, anchor: Vec2, px: f32, align: TextAlign, color: Color) {
            let pos = self.projection.anchor(anchor);
            self.ctx.set_font(&format!("{}px Arial", px));
            self.ctx.set_text_align(match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            });
            self.ctx.set_fill_style_str(&css(color));
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }
    }

    /// Everything the browser callbacks share
    struct Game {
        game_loop: GameLoop,
        surface: CanvasSurface,
        frames: FrameRequests,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("Arcade Loop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;

        // <canvas id="gameCanvas" data-variant="depth">
        let variant = canvas
            .get_attribute("data-variant")
            .and_then(|v| Variant::from_str(&v))
            .unwrap_or_default();
        if variant == Variant::Flat {
            canvas.set_width(PLAY_WIDTH as u32);
            canvas.set_height(PLAY_HEIGHT as u32);
        }

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let config = ArcadeConfig::load(variant);
        let view = Vec2::new(canvas.width() as f32, canvas.height() as f32);
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            surface: CanvasSurface {
                ctx,
                projection: Projection::new(&config, view),
            },
            game_loop: GameLoop::new(config, seed),
            frames: FrameRequests::default(),
        }));

        setup_key_handlers(game.clone())?;

        let schedule = {
            let mut g = game.borrow_mut();
            let Game {
                game_loop, frames, ..
            } = &mut *g;
            game_loop.start(frames);
            frames.take()
        };
        if schedule {
            request_animation_frame(game);
        }

        log::info!("Arcade Loop running!");
        Ok(())
    }

    fn setup_key_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(
                    key.as_str(),
                    " " | "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown"
                ) {
                    // Keep the page from scrolling
                    event.prevent_default();
                }

                let schedule = {
                    let mut g = game.borrow_mut();
                    let Game {
                        game_loop, frames, ..
                    } = &mut *g;
                    game_loop.key_down(&key, event.time_stamp(), frames);
                    frames.take()
                };
                if schedule {
                    request_animation_frame(game.clone());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().game_loop.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
        let schedule = {
            let mut g = game.borrow_mut();
            let Game {
                game_loop,
                surface,
                frames,
            } = &mut *g;
            game_loop.frame(time, surface, frames);
            frames.take()
        };

        if schedule {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated frame length for the headless demo (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Stop a demo run after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAME_LIMIT: u64 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
const DEMO_SEED: u64 = 0x00A1_1CE5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arcade_loop::{ArcadeConfig, Variant};

    env_logger::init();
    log::info!("Arcade Loop (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build to play");

    // ARCADE_CONFIG=path/to/config.json runs a single custom config
    if let Ok(path) = std::env::var("ARCADE_CONFIG") {
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| ArcadeConfig::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(config) => {
                run_demo(config);
                return;
            }
            Err(e) => log::warn!("Ignoring {}: {}", path, e),
        }
    }

    for variant in [Variant::Flat, Variant::Depth] {
        run_demo(ArcadeConfig::load(variant));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo(config: arcade_loop::ArcadeConfig) {
    use arcade_loop::renderer::{Projection, QuadBatch};
    use arcade_loop::{FrameRequests, GameLoop};
    use glam::Vec2;

    let variant = config.variant;
    let mut surface = QuadBatch::new(Projection::new(&config, Vec2::new(800.0, 600.0)));
    let mut game = GameLoop::new(config, DEMO_SEED);
    let mut frames = FrameRequests::default();

    game.set_autopilot(true);
    game.start(&mut frames);

    let mut now = 0.0;
    let mut hits = 0usize;
    while frames.take() && game.state().frame < DEMO_FRAME_LIMIT {
        now += FRAME_MS;
        hits += game.frame(now, &mut surface, &mut frames).hits.len();
    }

    let state = game.state();
    println!(
        "{:>5}: {} frames, {} hits, score {}, {}",
        variant.as_str(),
        state.frame,
        hits,
        state.score,
        if state.is_over() { "game over" } else { "survived" }
    );
}
