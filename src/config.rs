//! Game configuration
//!
//! Each variant has a preset built from `crate::consts`. Presets can be
//! overridden with JSON (LocalStorage on the web) and are validated before use.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{depth, flat};
use crate::input::KeyBindings;

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// 2D canvas shooter: hostiles fall down the screen
    #[default]
    Flat,
    /// 3D shooter: hostiles approach from far depth
    Depth,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Flat => "Flat",
            Variant::Depth => "Depth",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" | "2d" => Some(Variant::Flat),
            "depth" | "3d" => Some(Variant::Depth),
            _ => None,
        }
    }

    /// Coordinate along the axis hostiles travel (y for Flat, z for Depth).
    /// Hostiles move toward +axis, projectiles toward -axis.
    #[inline]
    pub fn depth_of(&self, v: Vec3) -> f32 {
        match self {
            Variant::Flat => v.y,
            Variant::Depth => v.z,
        }
    }

    /// Sign of "up" on the y axis (canvas y grows downward)
    #[inline]
    pub fn up_sign(&self) -> f32 {
        match self {
            Variant::Flat => -1.0,
            Variant::Depth => 1.0,
        }
    }
}

/// Play area bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Projectiles whose approach-axis coordinate drops below this are pruned
    pub projectile_exit: f32,
    /// A hostile whose leading edge reaches this coordinate ends the game
    pub breach_line: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Start position (min corner)
    pub start: Vec3,
    pub size: Vec3,
    /// Units per frame
    pub speed: f32,
    /// Whether up/down intents move the player
    pub vertical_movement: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileTuning {
    pub size: Vec3,
    /// Units per frame
    pub velocity: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileTuning {
    pub size: Vec3,
    /// Units per frame
    pub velocity: Vec3,
    /// Approach-axis coordinate of a freshly spawned hostile (min corner)
    pub spawn_depth: f32,
    /// Independent per-frame spawn probability
    pub spawn_chance: f64,
}

/// How a projectile/hostile hit is decided
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitTest {
    /// Rectangle overlap on x/y
    Overlap,
    /// Centre distance below `radius`
    Proximity { radius: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub hit_test: HitTest,
    pub score_per_hit: u64,
    pub shoot_cooldown_ms: f64,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("spawn chance must be within [0, 1], got {0}")]
    SpawnChance(f64),
    #[error("shoot cooldown must be a non-negative number of ms, got {0}")]
    Cooldown(f64),
    #[error("projectile.velocity must carry shots away from the player, got {0} along the approach axis")]
    ProjectileHeading(f32),
    #[error("hostile.velocity must carry hostiles toward the player, got {0} along the approach axis")]
    HostileHeading(f32),
    #[error("arena.breach_line {value} must lie after the spawn edge {spawn_edge} and no further than {limit}")]
    BreachLine {
        value: f32,
        spawn_edge: f32,
        limit: f32,
    },
    #[error("player ({width}x{height}) does not fit the {arena_width}x{arena_height} play area")]
    PlayerTooLarge {
        width: f32,
        height: f32,
        arena_width: f32,
        arena_height: f32,
    },
}

/// Complete configuration for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcadeConfig {
    pub variant: Variant,
    pub arena: ArenaConfig,
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub hostile: HostileTuning,
    pub rules: RulesConfig,
    #[serde(default)]
    pub bindings: KeyBindings,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self::flat()
    }
}

impl ArcadeConfig {
    /// 2D canvas preset
    pub fn flat() -> Self {
        use flat::*;

        Self {
            variant: Variant::Flat,
            arena: ArenaConfig {
                width: PLAY_WIDTH,
                height: PLAY_HEIGHT,
                projectile_exit: PROJECTILE_EXIT,
                breach_line: PLAY_HEIGHT,
            },
            player: PlayerTuning {
                start: Vec3::new(
                    PLAY_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
                    PLAY_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
                    0.0,
                ),
                size: Vec3::new(PLAYER_WIDTH, PLAYER_HEIGHT, 0.0),
                speed: PLAYER_SPEED,
                vertical_movement: false,
            },
            projectile: ProjectileTuning {
                size: Vec3::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT, 0.0),
                velocity: Vec3::new(0.0, -PROJECTILE_SPEED, 0.0),
            },
            hostile: HostileTuning {
                size: Vec3::new(HOSTILE_SIZE, HOSTILE_SIZE, 0.0),
                velocity: Vec3::new(0.0, HOSTILE_SPEED, 0.0),
                spawn_depth: HOSTILE_SPAWN_Y,
                spawn_chance: SPAWN_CHANCE,
            },
            rules: RulesConfig {
                hit_test: HitTest::Overlap,
                score_per_hit: SCORE_PER_HIT,
                shoot_cooldown_ms: SHOOT_COOLDOWN_MS,
            },
            bindings: KeyBindings::default(),
        }
    }

    /// 3D preset
    pub fn depth() -> Self {
        use depth::*;

        let player_size = Vec3::splat(PLAYER_SIZE);
        Self {
            variant: Variant::Depth,
            arena: ArenaConfig {
                width: FIELD_WIDTH,
                height: FIELD_HEIGHT,
                projectile_exit: PROJECTILE_EXIT,
                // Player's front face
                breach_line: PLAYER_DEPTH + PLAYER_SIZE / 2.0,
            },
            player: PlayerTuning {
                start: Vec3::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0, PLAYER_DEPTH)
                    - player_size / 2.0,
                size: player_size,
                speed: PLAYER_SPEED,
                vertical_movement: true,
            },
            projectile: ProjectileTuning {
                size: Vec3::splat(PROJECTILE_SIZE),
                velocity: Vec3::new(0.0, 0.0, -PROJECTILE_SPEED),
            },
            hostile: HostileTuning {
                size: Vec3::splat(HOSTILE_SIZE),
                velocity: Vec3::new(0.0, 0.0, HOSTILE_SPEED),
                spawn_depth: HOSTILE_SPAWN_DEPTH - HOSTILE_SIZE / 2.0,
                spawn_chance: SPAWN_CHANCE,
            },
            rules: RulesConfig {
                hit_test: HitTest::Proximity {
                    radius: HIT_DISTANCE,
                },
                score_per_hit: SCORE_PER_HIT,
                shoot_cooldown_ms: SHOOT_COOLDOWN_MS,
            },
            bindings: KeyBindings::default(),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Flat => Self::flat(),
            Variant::Depth => Self::depth(),
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        finite("arena.projectile_exit", self.arena.projectile_exit)?;
        finite("arena.breach_line", self.arena.breach_line)?;

        // Flat bodies have no z extent
        let lateral = |v: Vec3| match self.variant {
            Variant::Flat => [v.x, v.y],
            Variant::Depth => [v.x, v.y.min(v.z)],
        };

        let [w, h] = lateral(self.player.size);
        positive("player.size", w.min(h))?;
        let [w, h] = lateral(self.projectile.size);
        positive("projectile.size", w.min(h))?;
        let [w, h] = lateral(self.hostile.size);
        positive("hostile.size", w.min(h))?;

        if !(self.player.speed.is_finite() && self.player.speed >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "player.speed",
                value: self.player.speed,
            });
        }
        if !self.player.start.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "player.start",
            });
        }
        if !self.projectile.velocity.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "projectile.velocity",
            });
        }
        if !self.hostile.velocity.is_finite() {
            return Err(ConfigError::NotFinite {
                field: "hostile.velocity",
            });
        }
        finite("hostile.spawn_depth", self.hostile.spawn_depth)?;

        // Shots recede along the approach axis, hostiles advance along it
        let shot_step = self.variant.depth_of(self.projectile.velocity);
        if shot_step >= 0.0 {
            return Err(ConfigError::ProjectileHeading(shot_step));
        }
        let hostile_step = self.variant.depth_of(self.hostile.velocity);
        if hostile_step <= 0.0 {
            return Err(ConfigError::HostileHeading(hostile_step));
        }

        // Between a fresh hostile's leading edge and the far side of the play
        // area (the bottom edge, or the back of the player in depth)
        let spawn_edge = self.hostile.spawn_depth + self.variant.depth_of(self.hostile.size);
        let limit = match self.variant {
            Variant::Flat => self.arena.height,
            Variant::Depth => self.player.start.z + self.player.size.z,
        };
        let line = self.arena.breach_line;
        if !(line > spawn_edge && line <= limit) {
            return Err(ConfigError::BreachLine {
                value: line,
                spawn_edge,
                limit,
            });
        }

        if !(0.0..=1.0).contains(&self.hostile.spawn_chance) {
            return Err(ConfigError::SpawnChance(self.hostile.spawn_chance));
        }
        let cooldown = self.rules.shoot_cooldown_ms;
        if !(cooldown.is_finite() && cooldown >= 0.0) {
            return Err(ConfigError::Cooldown(cooldown));
        }
        if let HitTest::Proximity { radius } = self.rules.hit_test {
            positive("rules.hit_test.radius", radius)?;
        }

        if self.player.size.x > self.arena.width || self.player.size.y > self.arena.height {
            return Err(ConfigError::PlayerTooLarge {
                width: self.player.size.x,
                height: self.player.size.y,
                arena_width: self.arena.width,
                arena_height: self.arena.height,
            });
        }

        Ok(())
    }

    /// LocalStorage key for config overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arcade_loop_config";

    /// Load a config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(variant: Variant) -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) if config.variant == variant => {
                        log::info!("Loaded {} config from LocalStorage", variant.as_str());
                        return config;
                    }
                    Ok(config) => {
                        log::info!(
                            "Stored config is for {}, using {} preset",
                            config.variant.as_str(),
                            variant.as_str()
                        );
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using {} preset", variant.as_str());
        Self::for_variant(variant)
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(variant: Variant) -> Self {
        Self::for_variant(variant)
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        ArcadeConfig::flat().validate().unwrap();
        ArcadeConfig::depth().validate().unwrap();
        assert_eq!(ArcadeConfig::default().variant, Variant::Flat);
    }

    #[test]
    fn test_flat_preset_matches_canvas_layout() {
        let config = ArcadeConfig::flat();
        assert_eq!(config.player.start, Vec3::new(375.0, 560.0, 0.0));
        assert_eq!(config.hostile.spawn_depth, -45.0);
        assert_eq!(config.arena.breach_line, 600.0);
    }

    #[test]
    fn test_depth_preset_layout() {
        let config = ArcadeConfig::depth();
        // Player centre sits at (5, 5, -5)
        assert_eq!(config.player.start + config.player.size / 2.0, Vec3::new(5.0, 5.0, -5.0));
        // Hostile centre spawns at -20
        assert_eq!(config.hostile.spawn_depth + 0.5, -20.0);
        assert_eq!(config.arena.breach_line, -4.5);
    }

    #[test]
    fn test_json_overrides() {
        let mut config = ArcadeConfig::flat();
        config.hostile.spawn_chance = 0.5;
        let json = config.to_json().unwrap();

        let parsed = ArcadeConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = ArcadeConfig::flat();
        config.hostile.spawn_chance = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::SpawnChance(_))));

        let mut config = ArcadeConfig::flat();
        config.player.size.x = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "player.size", .. })
        ));

        let mut config = ArcadeConfig::flat();
        config.player.size.x = 900.0;
        assert!(matches!(config.validate(), Err(ConfigError::PlayerTooLarge { .. })));

        let mut config = ArcadeConfig::depth();
        config.rules.shoot_cooldown_ms = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::Cooldown(_))));

        let mut config = ArcadeConfig::flat();
        config.projectile.velocity = Vec3::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::ProjectileHeading(_))));

        // Flat shots falling toward the player
        let mut config = ArcadeConfig::flat();
        config.projectile.velocity.y = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::ProjectileHeading(_))));

        let mut config = ArcadeConfig::depth();
        config.hostile.velocity = Vec3::new(0.05, 0.0, 0.0);
        assert!(matches!(config.validate(), Err(ConfigError::HostileHeading(_))));

        let mut config = ArcadeConfig::flat();
        config.hostile.velocity.y = -1.5;
        assert!(matches!(config.validate(), Err(ConfigError::HostileHeading(_))));

        let mut config = ArcadeConfig::flat();
        config.arena.breach_line = 700.0;
        assert!(matches!(config.validate(), Err(ConfigError::BreachLine { .. })));

        // Behind the spawn point: every hostile would breach on arrival
        let mut config = ArcadeConfig::depth();
        config.arena.breach_line = -30.0;
        assert!(matches!(config.validate(), Err(ConfigError::BreachLine { .. })));

        let mut config = ArcadeConfig::depth();
        config.arena.breach_line = -4.0;
        assert!(matches!(config.validate(), Err(ConfigError::BreachLine { .. })));

        assert!(matches!(
            ArcadeConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_str("3D"), Some(Variant::Depth));
        assert_eq!(Variant::from_str("flat"), Some(Variant::Flat));
        assert_eq!(Variant::from_str("iso"), None);
        assert_eq!(Variant::Depth.as_str(), "Depth");
    }
}
