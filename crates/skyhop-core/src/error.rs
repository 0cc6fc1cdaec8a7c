//! Error types for the simulation core.
//!
//! The running simulation never fails: out-of-bounds positions are corrected
//! every frame and queries against empty collections simply miss. Errors are
//! reserved for inputs that cannot produce a playable world at all, and they
//! are all reported before the first frame runs.

use thiserror::Error;

use crate::animation::AnimatedKind;

/// Rejected [`SimConfig`](crate::config::SimConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A setting that must be strictly positive was not.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Setting name
        name: &'static str,
        /// Offending value
        value: i32,
    },

    /// A setting that must not be negative was.
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Setting name
        name: &'static str,
        /// Offending value
        value: i32,
    },

    /// Starting hearts exceed the heart cap.
    #[error("starting hearts ({hearts}) must be between 1 and max hearts ({max})")]
    Hearts {
        /// Starting hearts
        hearts: u32,
        /// Heart cap
        max: u32,
    },

    /// Animation frame rate is zero, negative or not finite.
    #[error("animation frame rate must be positive and finite, got {0}")]
    FrameRate(f32),

    /// Camera lag outside `[0, 1)`.
    #[error("camera lag must be in [0, 1), got {0}")]
    CameraLag(f32),
}

/// Problems with the animation sets supplied for a level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// No animation set was supplied for an animated kind.
    #[error("no animation set for {kind}")]
    MissingSet {
        /// Kind without animations
        kind: AnimatedKind,
    },

    /// A key the kind's behavior can select is absent.
    #[error("animation set for {kind} is missing key '{key}'")]
    MissingKey {
        /// Kind being validated
        kind: AnimatedKind,
        /// Missing key
        key: String,
    },

    /// A key maps to an empty frame sequence.
    #[error("animation '{key}' for {kind} has no frames")]
    EmptySequence {
        /// Kind being validated
        kind: AnimatedKind,
        /// Empty key
        key: String,
    },
}

/// Level data that cannot be turned into a world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    /// Width or height is zero or negative.
    #[error("level dimensions must be positive, got {width}x{height} tiles")]
    Dimensions {
        /// Width in tiles
        width: i32,
        /// Height in tiles
        height: i32,
    },

    /// The level is too large to address in pixels.
    #[error("level of {width}x{height} tiles is too large")]
    TooLarge {
        /// Width in tiles
        width: i32,
        /// Height in tiles
        height: i32,
    },

    /// The hero's start tile is off the level grid.
    #[error("start tile ({x}, {y}) is outside the level")]
    StartOutside {
        /// Grid x
        x: i32,
        /// Grid y
        y: i32,
    },

    /// Animation sets do not cover the level's animated entities.
    #[error(transparent)]
    Animation(#[from] AnimationError),

    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Umbrella error for the core crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Configuration error
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Level error
    #[error("level error: {0}")]
    Level(#[from] LevelError),

    /// Animation error
    #[error("animation error: {0}")]
    Animation(#[from] AnimationError),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
