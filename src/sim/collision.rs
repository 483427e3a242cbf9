//! Collision and game-over detection
//!
//! Hits are resolved mark-and-compact: every (hostile, projectile) pair is
//! tested against a snapshot, consumed entities are flagged, and both
//! collections are compacted once afterwards.

use super::state::{Body, GameState};
use crate::config::{ArcadeConfig, HitTest};

/// Axis-aligned rectangle overlap on x/y (touching edges do not overlap)
#[inline]
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    let (a_min, a_max) = (a.pos(), a.max_corner());
    let (b_min, b_max) = (b.pos(), b.max_corner());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Centre-to-centre distance strictly below `radius`
#[inline]
pub fn within(a: &impl Body, b: &impl Body, radius: f32) -> bool {
    a.centre().distance_squared(b.centre()) < radius * radius
}

impl HitTest {
    pub fn hits(&self, a: &impl Body, b: &impl Body) -> bool {
        match *self {
            HitTest::Overlap => overlaps(a, b),
            HitTest::Proximity { radius } => within(a, b, radius),
        }
    }
}

/// A destroyed (projectile, hostile) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub projectile: u32,
    pub hostile: u32,
}

/// Destroy colliding pairs and award score.
///
/// Hostiles are visited in order; each takes the first unspent projectile it
/// touches. A projectile is spent at most once and a destroyed hostile is not
/// tested again.
pub fn resolve_hits(state: &mut GameState, config: &ArcadeConfig) -> Vec<Hit> {
    let hit_test = config.rules.hit_test;
    let mut spent = vec![false; state.projectiles.len()];
    let mut destroyed = vec![false; state.hostiles.len()];
    let mut hits = Vec::new();

    for (h_idx, hostile) in state.hostiles.iter().enumerate() {
        let found = state
            .projectiles
            .iter()
            .enumerate()
            .find(|(p_idx, p)| !spent[*p_idx] && hit_test.hits(*p, hostile));

        if let Some((p_idx, projectile)) = found {
            spent[p_idx] = true;
            destroyed[h_idx] = true;
            hits.push(Hit {
                projectile: projectile.id,
                hostile: hostile.id,
            });
        }
    }

    if hits.is_empty() {
        return hits;
    }

    compact(&mut state.projectiles, &spent);
    compact(&mut state.hostiles, &destroyed);

    let award = config.rules.score_per_hit.saturating_mul(hits.len() as u64);
    state.score = state.score.saturating_add(award);

    for hit in &hits {
        log::debug!("Projectile {} destroyed hostile {}", hit.projectile, hit.hostile);
    }
    hits
}

/// Drop flagged entries, keeping the order of the rest
fn compact<T>(items: &mut Vec<T>, remove: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !remove[idx];
        idx += 1;
        keep
    });
}

/// Fraction of a hostile's per-frame step treated as touching the breach line
const BREACH_TOLERANCE: f32 = 1e-3;

/// Whether any hostile's leading edge has reached the breach line
pub fn breached(state: &GameState, config: &ArcadeConfig) -> bool {
    let variant = config.variant;
    state.hostiles.iter().any(|h| {
        let slack = variant.depth_of(h.vel).abs() * BREACH_TOLERANCE;
        variant.depth_of(h.max_corner()) >= config.arena.breach_line - slack
    })
}
