//! Movement step
//!
//! The player is clamped to the play area; projectiles and hostiles advance
//! unconditionally and are dealt with by pruning and collision instead.

use glam::Vec3;

use super::state::{Moving, Player};
use crate::config::ArcadeConfig;
use crate::input::HeldActions;

/// Move the player from held intents, keeping it inside the play area
pub fn move_player(player: &mut Player, held: &HeldActions, config: &ArcadeConfig) {
    debug_assert!(player.pos.is_finite(), "player position is not finite");
    debug_assert!(player.size.cmpge(Vec3::ZERO).all(), "negative player size");

    let mut delta = Vec3::new(held.horizontal() * player.speed, 0.0, 0.0);
    if config.player.vertical_movement {
        delta.y = held.vertical() * config.variant.up_sign() * player.speed;
    }

    player.pos = clamp_to_arena(player.pos + delta, player.size, config);
}

/// Clamp a box's min corner to [0, bound - size] on x and y.
/// Non-finite components collapse to 0.
pub fn clamp_to_arena(pos: Vec3, size: Vec3, config: &ArcadeConfig) -> Vec3 {
    let max_x = (config.arena.width - size.x.max(0.0)).max(0.0);
    let max_y = (config.arena.height - size.y.max(0.0)).max(0.0);
    let finite = |v: f32| if v.is_finite() { v } else { 0.0 };

    Vec3::new(
        finite(pos.x).clamp(0.0, max_x),
        finite(pos.y).clamp(0.0, max_y),
        finite(pos.z),
    )
}

/// Advance every body by its velocity
pub fn advance_all<B: Moving>(bodies: &mut [B]) {
    for body in bodies {
        body.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;
    use proptest::prelude::*;

    fn held(left: bool, right: bool, up: bool, down: bool) -> HeldActions {
        HeldActions {
            left,
            right,
            up,
            down,
        }
    }

    #[test]
    fn test_flat_moves_horizontally_only() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);

        move_player(&mut state.player, &held(false, true, true, false), &config);
        assert_eq!(state.player.pos, Vec3::new(390.0, 560.0, 0.0));
    }

    #[test]
    fn test_flat_clamps_at_edges() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);

        for _ in 0..100 {
            move_player(&mut state.player, &held(true, false, false, false), &config);
        }
        assert_eq!(state.player.pos.x, 0.0);

        for _ in 0..100 {
            move_player(&mut state.player, &held(false, true, false, false), &config);
        }
        assert_eq!(state.player.pos.x, 750.0);
    }

    #[test]
    fn test_depth_up_is_positive_y() {
        let config = ArcadeConfig::depth();
        let mut state = GameState::new(&config);
        let start = state.player.pos;

        move_player(&mut state.player, &held(false, false, true, false), &config);
        assert!(state.player.pos.y > start.y);
        assert_eq!(state.player.pos.z, start.z);
    }

    #[test]
    fn test_clamp_collapses_nan() {
        let config = ArcadeConfig::flat();
        let pos = clamp_to_arena(Vec3::new(f32::NAN, 10.0, 0.0), Vec3::splat(5.0), &config);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, 10.0);
    }

    fn arb_held() -> impl Strategy<Value = HeldActions> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
            .prop_map(|(l, r, u, d)| held(l, r, u, d))
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            depth in any::<bool>(),
            moves in prop::collection::vec(arb_held(), 1..400),
        ) {
            let config = if depth { ArcadeConfig::depth() } else { ArcadeConfig::flat() };
            let mut state = GameState::new(&config);
            let max_x = config.arena.width - config.player.size.x;
            let max_y = config.arena.height - config.player.size.y;

            for held in &moves {
                move_player(&mut state.player, held, &config);
                let pos = state.player.pos;
                prop_assert!(pos.x >= 0.0 && pos.x <= max_x);
                prop_assert!(pos.y >= 0.0 && pos.y <= max_y);
            }
        }
    }
}
