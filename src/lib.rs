//! Arcade Loop - frame-driven arcade shooter core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, spawning, collisions, game over)
//! - `input`: Key identifiers to logical actions, shot cooldown
//! - `game`: Frame orchestrator and scheduling seam
//! - `renderer`: Render surface seam and a CPU vertex batch
//! - `config`: Variant presets and validated overrides

pub mod config;
pub mod game;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{ArcadeConfig, ConfigError, Variant};
pub use game::{FrameRequests, FrameScheduler, GameLoop};
pub use input::{Action, Command, HeldActions, InputMapper, Key};

/// Game configuration constants
pub mod consts {
    /// Flat (2D canvas) variant. Canvas coordinates: x right, y down.
    pub mod flat {
        /// Play area dimensions (pixels)
        pub const PLAY_WIDTH: f32 = 800.0;
        pub const PLAY_HEIGHT: f32 = 600.0;

        /// Player defaults - slides along the bottom row
        pub const PLAYER_WIDTH: f32 = 50.0;
        pub const PLAYER_HEIGHT: f32 = 30.0;
        pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
        /// Pixels per frame while a direction is held
        pub const PLAYER_SPEED: f32 = 15.0;

        /// Projectile defaults
        pub const PROJECTILE_WIDTH: f32 = 10.0;
        pub const PROJECTILE_HEIGHT: f32 = 15.0;
        pub const PROJECTILE_SPEED: f32 = 5.0;
        /// Projectiles above this row are pruned
        pub const PROJECTILE_EXIT: f32 = 0.0;

        /// Hostile defaults
        pub const HOSTILE_SIZE: f32 = 45.0;
        pub const HOSTILE_SPEED: f32 = 1.5;
        /// Hostiles start one body-height above the visible area
        pub const HOSTILE_SPAWN_Y: f32 = -HOSTILE_SIZE;
        /// Per-frame spawn probability
        pub const SPAWN_CHANCE: f64 = 0.02;

        pub const SCORE_PER_HIT: u64 = 10;
        pub const SHOOT_COOLDOWN_MS: f64 = 1.0;
    }

    /// Depth (3D) variant. World units: x right, y up, z toward the camera.
    pub mod depth {
        /// Lateral extent of the playfield
        pub const FIELD_WIDTH: f32 = 10.0;
        pub const FIELD_HEIGHT: f32 = 10.0;

        /// Player cube, centred on the field at a fixed depth
        pub const PLAYER_SIZE: f32 = 1.0;
        pub const PLAYER_SPEED: f32 = 0.1;
        /// Depth of the player's centre
        pub const PLAYER_DEPTH: f32 = -5.0;

        /// Projectile (sphere of radius 0.1)
        pub const PROJECTILE_SIZE: f32 = 0.2;
        pub const PROJECTILE_SPEED: f32 = 0.2;
        /// Projectiles farther than this depth are pruned
        pub const PROJECTILE_EXIT: f32 = -50.0;

        /// Hostile cube
        pub const HOSTILE_SIZE: f32 = 1.0;
        pub const HOSTILE_SPEED: f32 = 0.05;
        /// Depth of a freshly spawned hostile's centre
        pub const HOSTILE_SPAWN_DEPTH: f32 = -20.0;
        pub const SPAWN_CHANCE: f64 = 0.02;

        /// Centre-to-centre distance that counts as a hit
        pub const HIT_DISTANCE: f32 = 1.0;
        /// No score in this variant
        pub const SCORE_PER_HIT: u64 = 0;
        pub const SHOOT_COOLDOWN_MS: f64 = 0.0;

        /// Camera sits at the origin looking down -z (75 degree vertical FOV)
        pub const CAMERA_Z: f32 = 0.0;
        pub const TAN_HALF_FOV: f32 = 0.767_327;
        pub const NEAR_PLANE: f32 = 0.1;
    }
}
