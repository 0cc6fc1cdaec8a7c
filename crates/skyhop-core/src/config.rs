//! Simulation configuration.
//!
//! [`SimConfig`] gathers every tunable constant of the game: tile size,
//! gravity, speeds, jump powers, item values and presentation rates. It is
//! built once (usually from [`SimConfig::default`] or a JSON file decoded by
//! the caller), checked with [`SimConfig::validate`], and then shared
//! read-only for the lifetime of a run.
//!
//! All speeds and accelerations are integer pixels per frame.
//!
//! # Example
//!
//! ```
//! use skyhop_core::config::SimConfig;
//!
//! let config = SimConfig::default();
//! assert_eq!(config.tile_size, 64);
//! assert_eq!(config.hero.jump_power, 22);
//! assert!(config.validate().is_ok());
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gravity and terminal velocities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in air.
    pub gravity: i32,
    /// Maximum falling speed in air.
    pub terminal_velocity: i32,
    /// Downward acceleration inside a fluid zone.
    pub water_gravity: i32,
    /// Maximum sinking speed inside a fluid zone.
    pub water_terminal_velocity: i32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1,
            terminal_velocity: 20,
            water_gravity: 1,
            water_terminal_velocity: 4,
        }
    }
}

/// Hero movement, health and damage response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Hearts at level start.
    pub hearts: u32,
    /// Heart cap for healing pickups.
    pub max_hearts: u32,
    /// Horizontal speed on land.
    pub walk_speed: i32,
    /// Horizontal speed in a fluid zone.
    pub swim_speed: i32,
    /// Vertical speed on a climbable.
    pub climb_speed: i32,
    /// Jump impulse from solid ground.
    pub jump_power: i32,
    /// Jump impulse while climbing.
    pub climb_jump_power: i32,
    /// Jump impulse while in a fluid zone.
    pub water_jump_power: i32,
    /// Frames of invulnerability after a hit.
    pub escape_time: u32,
    /// Knockback speeds applied away from the enemy, per axis.
    pub knockback: IVec2,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            hearts: 3,
            max_hearts: 5,
            walk_speed: 5,
            swim_speed: 3,
            climb_speed: 3,
            jump_power: 22,
            climb_jump_power: 11,
            water_jump_power: 8,
            escape_time: 180,
            knockback: IVec2::new(15, 5),
        }
    }
}

/// Patrol speeds per enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Cloud speed.
    pub cloud_speed: i32,
    /// Spikeball speed.
    pub spikeball_speed: i32,
    /// Spikeman speed.
    pub spikeman_speed: i32,
    /// Fish speed.
    pub fish_speed: i32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            cloud_speed: 3,
            spikeball_speed: 2,
            spikeman_speed: 2,
            fish_speed: 2,
        }
    }
}

/// Pickup effects and platform tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Score awarded per gem.
    pub gem_value: u32,
    /// Hearts restored per heart pickup.
    pub heart_value: u32,
    /// Horizontal speed of moving platforms.
    pub moving_platform_speed: i32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            gem_value: 10,
            heart_value: 1,
            moving_platform_speed: 2,
        }
    }
}

/// Camera viewport and smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Viewport width in pixels.
    pub viewport_width: i32,
    /// Viewport height in pixels.
    pub viewport_height: i32,
    /// Smoothing lag in `[0, 1)`; 0 tracks the target exactly.
    pub lag: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport_width: 16 * 64,
            viewport_height: 9 * 64,
            lag: 0.8,
        }
    }
}

/// Complete, immutable simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Edge length of one grid tile in pixels.
    pub tile_size: i32,
    /// Gravity settings.
    pub physics: PhysicsConfig,
    /// Hero settings.
    pub hero: HeroConfig,
    /// Enemy settings.
    pub enemies: EnemyConfig,
    /// Item and platform settings.
    pub items: ItemConfig,
    /// Camera settings.
    pub camera: CameraConfig,
    /// Animation frames advanced per simulation frame.
    pub frame_rate: f32,
    /// Frames between reaching the goal and the next level starting.
    pub level_transition_frames: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size: 64,
            physics: PhysicsConfig::default(),
            hero: HeroConfig::default(),
            enemies: EnemyConfig::default(),
            items: ItemConfig::default(),
            camera: CameraConfig::default(),
            frame_rate: 0.1,
            level_transition_frames: 120,
        }
    }
}

impl SimConfig {
    /// Create a default config with a different tile size.
    #[must_use]
    pub fn with_tile_size(tile_size: i32) -> Self {
        Self {
            tile_size,
            ..Default::default()
        }
    }

    /// Converts a grid coordinate to the pixel center of that tile.
    #[must_use]
    pub fn tile_center(&self, grid: IVec2) -> IVec2 {
        grid * self.tile_size + IVec2::splat(self.tile_size / 2)
    }

    /// Checks that every constant describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tile_size", self.tile_size)?;
        positive("physics.terminal_velocity", self.physics.terminal_velocity)?;
        positive(
            "physics.water_terminal_velocity",
            self.physics.water_terminal_velocity,
        )?;
        non_negative("physics.gravity", self.physics.gravity)?;
        non_negative("physics.water_gravity", self.physics.water_gravity)?;

        let hero = &self.hero;
        if hero.hearts == 0 || hero.hearts > hero.max_hearts {
            return Err(ConfigError::Hearts {
                hearts: hero.hearts,
                max: hero.max_hearts,
            });
        }
        for (name, value) in [
            ("hero.walk_speed", hero.walk_speed),
            ("hero.swim_speed", hero.swim_speed),
            ("hero.climb_speed", hero.climb_speed),
            ("hero.jump_power", hero.jump_power),
            ("hero.climb_jump_power", hero.climb_jump_power),
            ("hero.water_jump_power", hero.water_jump_power),
            ("hero.knockback.x", hero.knockback.x),
            ("hero.knockback.y", hero.knockback.y),
            ("enemies.cloud_speed", self.enemies.cloud_speed),
            ("enemies.spikeball_speed", self.enemies.spikeball_speed),
            ("enemies.spikeman_speed", self.enemies.spikeman_speed),
            ("enemies.fish_speed", self.enemies.fish_speed),
            ("items.moving_platform_speed", self.items.moving_platform_speed),
        ] {
            non_negative(name, value)?;
        }
        positive("camera.viewport_width", self.camera.viewport_width)?;
        positive("camera.viewport_height", self.camera.viewport_height)?;

        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ConfigError::FrameRate(self.frame_rate));
        }
        if !(0.0..1.0).contains(&self.camera.lag) {
            return Err(ConfigError::CameraLag(self.camera.lag));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: i32) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: i32) -> Result<(), ConfigError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
