//! Per-frame simulation step
//!
//! One call advances the game by exactly one frame in a fixed order:
//! queued shots, movement, pruning, spawning, collisions, game over.

use rand::Rng;

use super::collision::{Hit, breached, resolve_hits};
use super::lifecycle::{prune_projectiles, spawn_hostile};
use super::movement::{advance_all, move_player};
use super::state::{GamePhase, GameState};
use crate::config::ArcadeConfig;
use crate::input::HeldActions;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intents held this frame
    pub held: HeldActions,
    /// Shots fired since the previous frame
    pub shots: u32,
}

/// What happened during a frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub fired: u32,
    pub pruned: usize,
    pub spawned: Option<u32>,
    pub hits: Vec<Hit>,
    /// The frame ended the game
    pub breached: bool,
}

/// Advance the game state by one frame
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    config: &ArcadeConfig,
    rng: &mut R,
) -> FrameReport {
    let mut report = FrameReport::default();

    // Nothing moves once the game is over
    if state.phase == GamePhase::Over {
        return report;
    }

    state.frame += 1;

    for _ in 0..input.shots {
        state.spawn_projectile(config);
    }
    report.fired = input.shots;

    move_player(&mut state.player, &input.held, config);
    advance_all(&mut state.projectiles);
    advance_all(&mut state.hostiles);

    report.pruned = prune_projectiles(state, config);
    report.spawned = spawn_hostile(state, config, rng);
    report.hits = resolve_hits(state, config);

    if breached(state, config) {
        state.phase = GamePhase::Over;
        report.breached = true;
        log::info!(
            "Game over on frame {} with score {}",
            state.frame,
            state.score
        );
    }

    report
}
