//! Game state and core simulation types
//!
//! Everything a frame mutates lives in `GameState`. Positions are the min
//! corner of each body's box.

use glam::Vec3;

use crate::config::ArcadeConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// A hostile breached; waiting for restart
    Over,
}

/// Anything with a box in the play area
pub trait Body {
    fn pos(&self) -> Vec3;
    fn size(&self) -> Vec3;

    #[inline]
    fn centre(&self) -> Vec3 {
        self.pos() + self.size() / 2.0
    }

    /// Far corner of the box
    #[inline]
    fn max_corner(&self) -> Vec3 {
        self.pos() + self.size()
    }
}

/// Bodies moving at a constant per-frame velocity
pub trait Moving: Body {
    fn advance(&mut self);
}

/// The player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec3,
    pub size: Vec3,
    /// Units per frame
    pub speed: f32,
}

impl Player {
    pub fn new(config: &ArcadeConfig) -> Self {
        Self {
            pos: config.player.start,
            size: config.player.size,
            speed: config.player.speed,
        }
    }
}

impl Body for Player {
    fn pos(&self) -> Vec3 {
        self.pos
    }
    fn size(&self) -> Vec3 {
        self.size
    }
}

/// A player-fired projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    pub size: Vec3,
    pub vel: Vec3,
    /// Where the projectile was fired from
    origin: Vec3,
    /// Frames advanced since launch
    age: u32,
}

/// An enemy heading for the player
#[derive(Debug, Clone, PartialEq)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec3,
    pub size: Vec3,
    pub vel: Vec3,
    origin: Vec3,
    age: u32,
}

// `pos` is recomputed from the launch point on every advance
macro_rules! moving_body {
    ($ty:ty) => {
        impl $ty {
            pub fn new(id: u32, pos: Vec3, size: Vec3, vel: Vec3) -> Self {
                Self {
                    id,
                    pos,
                    size,
                    vel,
                    origin: pos,
                    age: 0,
                }
            }

            /// Frames advanced since launch
            pub fn age(&self) -> u32 {
                self.age
            }
        }

        impl Body for $ty {
            #[inline]
            fn pos(&self) -> Vec3 {
                self.pos
            }
            #[inline]
            fn size(&self) -> Vec3 {
                self.size
            }
        }

        impl Moving for $ty {
            #[inline]
            fn advance(&mut self) {
                self.age += 1;
                self.pos = self.origin + self.vel * self.age as f32;
            }
        }
    };
}

moving_body!(Projectile);
moving_body!(Hostile);

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    /// Live projectiles in firing order
    pub projectiles: Vec<Projectile>,
    /// Live hostiles in spawn order
    pub hostiles: Vec<Hostile>,
    pub score: u64,
    /// Frames simulated this run
    pub frame: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state for a new run
    pub fn new(config: &ArcadeConfig) -> Self {
        Self {
            phase: GamePhase::Running,
            player: Player::new(config),
            projectiles: Vec::new(),
            hostiles: Vec::new(),
            score: 0,
            frame: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Fire a projectile from the player's muzzle
    pub fn spawn_projectile(&mut self, config: &ArcadeConfig) -> u32 {
        use crate::config::Variant;

        let size = config.projectile.size;
        let centre = self.player.centre();
        // Flat shots leave from the player's top edge, depth shots from its centre
        let pos = match config.variant {
            Variant::Flat => Vec3::new(centre.x - size.x / 2.0, self.player.pos.y, 0.0),
            Variant::Depth => centre - size / 2.0,
        };

        let id = self.next_entity_id();
        self.projectiles
            .push(Projectile::new(id, pos, size, config.projectile.velocity));
        id
    }

    /// Add a hostile at the given position
    pub fn spawn_hostile_at(&mut self, config: &ArcadeConfig, pos: Vec3) -> u32 {
        let id = self.next_entity_id();
        self.hostiles.push(Hostile::new(
            id,
            pos,
            config.hostile.size,
            config.hostile.velocity,
        ));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let config = ArcadeConfig::flat();
        let state = GameState::new(&config);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.hostiles.is_empty());
        assert_eq!(state.player.pos, config.player.start);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);
        let a = state.spawn_projectile(&config);
        let b = state.spawn_hostile_at(&config, Vec3::ZERO);
        let c = state.spawn_projectile(&config);
        assert!(a != b && b != c && a != c);
    }

    #[test]
    fn test_flat_muzzle_is_centred() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);
        state.spawn_projectile(&config);

        let shot = &state.projectiles[0];
        assert_eq!(shot.pos, Vec3::new(395.0, 560.0, 0.0));
        assert_eq!(shot.centre().x, state.player.centre().x);
    }

    #[test]
    fn test_depth_muzzle_is_player_centre() {
        let config = ArcadeConfig::depth();
        let mut state = GameState::new(&config);
        state.spawn_projectile(&config);

        let shot = &state.projectiles[0];
        assert!((shot.centre() - state.player.centre()).length() < 1e-6);
    }

    #[test]
    fn test_advance() {
        let config = ArcadeConfig::flat();
        let mut state = GameState::new(&config);
        state.spawn_hostile_at(&config, Vec3::new(10.0, -45.0, 0.0));
        state.hostiles[0].advance();
        assert_eq!(state.hostiles[0].pos.y, -43.5);
        assert_eq!(state.hostiles[0].age(), 1);
    }

    #[test]
    fn test_long_flight_lands_on_exact_multiple() {
        // 0.05 has no exact binary form; summing it 300 times drifts
        let config = ArcadeConfig::depth();
        let mut state = GameState::new(&config);
        state.spawn_hostile_at(&config, Vec3::new(0.0, 0.0, -20.5));
        for _ in 0..300 {
            state.hostiles[0].advance();
        }
        assert_eq!(state.hostiles[0].pos.z, -5.5);
        assert_eq!(state.hostiles[0].max_corner().z, -4.5);
    }
}
