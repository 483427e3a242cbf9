//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same config, inputs and seeded
//! RNG, a run replays identically:
//! - One step per frame, constant per-frame velocities
//! - Injected RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod lifecycle;
pub mod movement;
pub mod state;
pub mod tick;

pub use autopilot::AutopilotPlan;
pub use collision::{Hit, breached, overlaps, resolve_hits, within};
pub use lifecycle::{prune_projectiles, spawn_hostile};
pub use movement::{advance_all, clamp_to_arena, move_player};
pub use state::{Body, GamePhase, GameState, Hostile, Moving, Player, Projectile};
pub use tick::{FrameReport, TickInput, tick};
