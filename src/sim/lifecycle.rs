//! Entity lifecycle: hostile spawning and projectile pruning

use glam::Vec3;
use rand::Rng;

use super::state::{Body, GameState};
use crate::config::{ArcadeConfig, Variant};

/// Remove projectiles that left the play area. Order of survivors is kept.
pub fn prune_projectiles(state: &mut GameState, config: &ArcadeConfig) -> usize {
    let before = state.projectiles.len();
    let exit = config.arena.projectile_exit;
    state
        .projectiles
        .retain(|p| config.variant.depth_of(p.pos()) >= exit);
    before - state.projectiles.len()
}

/// One Bernoulli trial per frame; on success spawns a hostile at a random
/// lateral position. Returns the new hostile's ID.
pub fn spawn_hostile<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &ArcadeConfig,
    rng: &mut R,
) -> Option<u32> {
    if rng.random::<f64>() >= config.hostile.spawn_chance {
        return None;
    }

    let size = config.hostile.size;
    let span_x = (config.arena.width - size.x).max(0.0);
    let x = rng.random::<f32>() * span_x;

    let pos = match config.variant {
        Variant::Flat => Vec3::new(x, config.hostile.spawn_depth, 0.0),
        Variant::Depth => {
            let span_y = (config.arena.height - size.y).max(0.0);
            let y = rng.random::<f32>() * span_y;
            Vec3::new(x, y, config.hostile.spawn_depth)
        }
    };

    let id = state.spawn_hostile_at(config, pos);
    log::debug!("Spawned hostile {} at {:?}", id, pos);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_prune_is_stable() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);
        for _ in 0..4 {
            state.spawn_projectile(&config);
        }
        state.projectiles[1].pos.y = -0.5;
        state.projectiles[2].pos.y = -20.0;

        let ids: Vec<u32> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(prune_projectiles(&mut state, &config), 2);
        let kept: Vec<u32> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(kept, vec![ids[0], ids[3]]);
    }

    #[test]
    fn test_prune_depth_far_plane() {
        let config = ArcadeConfig::depth();
        let mut state = GameState::new(&config);
        state.spawn_projectile(&config);
        state.projectiles[0].pos.z = -49.9;
        assert_eq!(prune_projectiles(&mut state, &config), 0);
        state.projectiles[0].pos.z = -50.1;
        assert_eq!(prune_projectiles(&mut state, &config), 1);
    }

    #[test]
    fn test_spawn_certain_and_never() {
        let mut config = ArcadeConfig::flat();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = GameState::new(&config);

        config.hostile.spawn_chance = 0.0;
        for _ in 0..100 {
            assert_eq!(spawn_hostile(&mut state, &config, &mut rng), None);
        }

        config.hostile.spawn_chance = 1.0;
        for _ in 0..100 {
            assert!(spawn_hostile(&mut state, &config, &mut rng).is_some());
        }
        assert_eq!(state.hostiles.len(), 100);
    }

    #[test]
    fn test_spawn_positions_inside_width() {
        for config in [ArcadeConfig::flat(), ArcadeConfig::depth()] {
            let mut config = config;
            config.hostile.spawn_chance = 1.0;
            let mut rng = Pcg32::seed_from_u64(42);
            let mut state = GameState::new(&config);

            for _ in 0..500 {
                spawn_hostile(&mut state, &config, &mut rng);
            }
            for h in &state.hostiles {
                assert!(h.pos.x >= 0.0 && h.max_corner().x <= config.arena.width);
                assert_eq!(config.variant.depth_of(h.pos), config.hostile.spawn_depth);
                if config.variant == Variant::Depth {
                    assert!(h.pos.y >= 0.0 && h.max_corner().y <= config.arena.height);
                }
            }
        }
    }
}
