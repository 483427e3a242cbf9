//! Attract-mode autopilot
//!
//! Picks the hostile closest to the breach line, slides under it and asks to
//! fire once lined up. The plan goes through the normal input path, so the
//! shot cooldown still applies.

use super::state::{Body, GameState, Hostile};
use crate::config::{ArcadeConfig, Variant};
use crate::input::HeldActions;

/// Intents for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutopilotPlan {
    pub held: HeldActions,
    pub fire: bool,
}

/// The most urgent hostile: furthest along the approach axis
pub fn most_urgent<'a>(state: &'a GameState, config: &ArcadeConfig) -> Option<&'a Hostile> {
    state.hostiles.iter().max_by(|a, b| {
        config
            .variant
            .depth_of(a.max_corner())
            .total_cmp(&config.variant.depth_of(b.max_corner()))
    })
}

pub fn plan(state: &GameState, config: &ArcadeConfig) -> AutopilotPlan {
    let Some(target) = most_urgent(state, config) else {
        return AutopilotPlan::default();
    };

    let player = &state.player;
    // Within half a step counts as lined up, otherwise the player jitters
    let deadzone = (player.speed / 2.0).max(f32::EPSILON);
    let offset = target.centre() - player.centre();

    let mut held = HeldActions {
        left: offset.x < -deadzone,
        right: offset.x > deadzone,
        ..Default::default()
    };

    let mut aligned = offset.x.abs() < target.size.x / 2.0;

    if config.player.vertical_movement {
        // Screen-up is +y in depth space and -y on the canvas
        let up = offset.y * config.variant.up_sign();
        held.up = up > deadzone;
        held.down = up < -deadzone;
        if config.variant == Variant::Depth {
            aligned &= offset.y.abs() < target.size.y / 2.0;
        }
    }

    AutopilotPlan {
        held,
        fire: aligned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_idle_without_targets() {
        let config = ArcadeConfig::flat();
        let state = GameState::new(&config);
        assert_eq!(plan(&state, &config), AutopilotPlan::default());
    }

    #[test]
    fn test_steers_toward_lowest_hostile() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);
        state.spawn_hostile_at(&config, Vec3::new(700.0, 10.0, 0.0));
        state.spawn_hostile_at(&config, Vec3::new(20.0, 300.0, 0.0));

        let plan = plan(&state, &config);
        assert!(plan.held.left);
        assert!(!plan.held.right);
        assert!(!plan.fire);
    }

    #[test]
    fn test_fires_when_lined_up() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);
        // Hostile centred over the player
        state.spawn_hostile_at(&config, Vec3::new(377.5, 100.0, 0.0));

        let plan = plan(&state, &config);
        assert!(plan.fire);
        assert_eq!(plan.held.horizontal(), 0.0);
    }

    #[test]
    fn test_depth_steers_vertically() {
        let config = ArcadeConfig::depth();
        let mut state = GameState::new(&config);
        state.spawn_hostile_at(&config, Vec3::new(4.5, 8.0, -20.5));

        let plan = plan(&state, &config);
        assert!(plan.held.up);
        assert!(!plan.fire);
    }
}
