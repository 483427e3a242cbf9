//! Frame orchestrator
//!
//! `GameLoop` owns the whole game: config, state, input and RNG. The host
//! feeds it key events and frame callbacks, gives it a surface to draw on and
//! a scheduler to ask for the next frame. It is single-threaded; hosts that
//! share it between callbacks wrap it in `Rc<RefCell<_>>`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{ArcadeConfig, Variant};
use crate::input::{Action, Command, InputMapper, Key};
use crate::renderer::{Color, RenderSurface, Shape, TextAlign, colors};
use crate::sim::autopilot;
use crate::sim::{Body, FrameReport, GamePhase, GameState, TickInput, tick};

/// Asks the host for another frame callback
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Scheduler that just records requests. The host checks `take()` after each
/// callback and schedules a real frame if one was asked for.
#[derive(Debug, Clone, Default)]
pub struct FrameRequests {
    pending: bool,
    total: u64,
}

impl FrameRequests {
    /// Consume the pending request
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Requests made over the scheduler's lifetime
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl FrameScheduler for FrameRequests {
    fn request_frame(&mut self) {
        self.pending = true;
        self.total += 1;
    }
}

/// HUD text size (pixels)
const HUD_TEXT_PX: f32 = 20.0;
const TITLE_TEXT_PX: f32 = 40.0;

pub struct GameLoop<R = Pcg32> {
    config: ArcadeConfig,
    state: GameState,
    input: InputMapper,
    rng: R,
    /// Shots accepted since the last frame
    pending_shots: u32,
    autopilot: bool,
    last_report: FrameReport,
}

impl GameLoop<Pcg32> {
    /// New game with a seeded RNG
    pub fn new(config: ArcadeConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameLoop<R> {
    /// New game drawing spawn positions from `rng`
    pub fn with_rng(config: ArcadeConfig, rng: R) -> Self {
        let input = InputMapper::new(config.bindings.clone(), config.rules.shoot_cooldown_ms);
        Self {
            state: GameState::new(&config),
            config,
            input,
            rng,
            pending_shots: 0,
            autopilot: false,
            last_report: FrameReport::default(),
        }
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn last_report(&self) -> &FrameReport {
        &self.last_report
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if self.autopilot && !enabled {
            self.input.release_all();
        }
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Begin scheduling frames
    pub fn start(&mut self, scheduler: &mut impl FrameScheduler) {
        log::info!("Starting {} game", self.config.variant.as_str());
        scheduler.request_frame();
    }

    /// Key pressed. `key` is a DOM key identifier; unknown keys are ignored.
    pub fn key_down(&mut self, key: &str, now_ms: f64, scheduler: &mut impl FrameScheduler) {
        let Some(key) = Key::from_dom(key) else {
            return;
        };

        if self.state.is_over() {
            // Only restart is live once the game is over
            if self.input.action_for(key) == Some(Action::Restart) {
                self.restart(scheduler);
            }
            return;
        }

        match self.input.key_down(key, now_ms) {
            Some(Command::SpawnProjectile) => self.pending_shots += 1,
            Some(Command::ToggleAutopilot) => self.set_autopilot(!self.autopilot),
            Some(Command::Restart) | None => {}
        }
    }

    /// Key released
    pub fn key_up(&mut self, key: &str) {
        if let Some(key) = Key::from_dom(key) {
            self.input.key_up(key);
        }
    }

    /// Replace all game state with a fresh run. Only valid once the game is
    /// over; returns whether a restart happened.
    pub fn restart(&mut self, scheduler: &mut impl FrameScheduler) -> bool {
        if !self.state.is_over() {
            return false;
        }

        let final_score = self.state.score;
        self.state = GameState::new(&self.config);
        self.input.reset();
        self.pending_shots = 0;
        self.last_report = FrameReport::default();

        log::info!("Restarted (previous score {})", final_score);
        scheduler.request_frame();
        true
    }

    /// One frame callback: simulate, draw, and schedule the next frame while
    /// the game is running.
    pub fn frame<S, F>(&mut self, now_ms: f64, surface: &mut S, scheduler: &mut F) -> &FrameReport
    where
        S: RenderSurface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.state.is_over() {
            self.last_report = FrameReport::default();
            self.render(surface);
            return &self.last_report;
        }

        if self.autopilot {
            let plan = autopilot::plan(&self.state, &self.config);
            self.input.set_held(plan.held);
            if plan.fire && self.input.fire(now_ms).is_some() {
                self.pending_shots += 1;
            }
        }

        let input = TickInput {
            held: self.input.held(),
            shots: std::mem::take(&mut self.pending_shots),
        };
        self.last_report = tick(&mut self.state, &input, &self.config, &mut self.rng);

        self.render(surface);

        if self.state.is_over() {
            log::info!(
                "{} game over: score {}, {} frames",
                self.config.variant.as_str(),
                self.state.score,
                self.state.frame
            );
        } else {
            scheduler.request_frame();
        }

        &self.last_report
    }

    /// Draw the current state
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let variant = self.config.variant;
        surface.clear();

        let (player_shape, player_color, shot_shape, hostile_shape) = match variant {
            Variant::Flat => (Shape::Rect, colors::PLAYER_FLAT, Shape::Rect, Shape::Rect),
            Variant::Depth => (Shape::Cube, colors::PLAYER_DEPTH, Shape::Sphere, Shape::Cube),
        };

        // Far to near so nearer bodies paint over farther ones
        let mut draws: Vec<(f32, Shape, Color, &dyn Body)> = Vec::with_capacity(
            1 + self.state.projectiles.len() + self.state.hostiles.len(),
        );
        draws.push((0.0, player_shape, player_color, &self.state.player as &dyn Body));
        for p in &self.state.projectiles {
            draws.push((0.0, shot_shape, colors::PROJECTILE, p as &dyn Body));
        }
        for h in &self.state.hostiles {
            draws.push((0.0, hostile_shape, colors::HOSTILE, h as &dyn Body));
        }
        if variant == Variant::Depth {
            for draw in &mut draws {
                draw.0 = draw.3.centre().z;
            }
            draws.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        for (_, shape, color, body) in draws {
            surface.fill_shape(shape, color, body.pos(), body.size());
        }

        if self.config.rules.score_per_hit > 0 {
            surface.fill_text(
                &format!("Score: {}", self.state.score),
                Vec2::new(0.0125, 0.05),
                HUD_TEXT_PX,
                TextAlign::Left,
                colors::TEXT,
            );
        }

        if self.state.is_over() {
            surface.fill_text(
                "Game Over!",
                Vec2::new(0.5, 0.5),
                TITLE_TEXT_PX,
                TextAlign::Center,
                colors::TEXT,
            );
            surface.fill_text(
                "Press Enter to Restart",
                Vec2::new(0.5, 0.5 + 40.0 / 600.0),
                HUD_TEXT_PX,
                TextAlign::Center,
                colors::TEXT,
            );
        }
    }
}
