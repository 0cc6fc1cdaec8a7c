//! Component structs for each entity variant.
//!
//! Physics-driven variants carry a [`Body`]; static variants carry only a
//! [`Rect`]. Presentation state lives in an optional [`Animator`]. Behavior
//! never lives here: the per-variant update functions are in
//! [`crate::behavior`], and the physics primitives on [`Body`] are in
//! [`crate::physics`].

use glam::IVec2;

use crate::animation::Animator;
use crate::config::SimConfig;
use crate::geometry::Rect;
use crate::level::{ClimbableKind, EnemyKind, FluidKind, GoalKind, InteractableKind, ItemKind};

// =============================================================================
// Body
// =============================================================================

/// Position and velocity of a physics-driven entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Body {
    /// Authoritative collision box.
    pub rect: Rect,
    /// Pixels per frame; `y` grows downward.
    pub velocity: IVec2,
    /// Whether the box overlapped a fluid zone at the last water check.
    pub in_water: bool,
}

impl Body {
    /// Creates a resting body with the given box.
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            velocity: IVec2::ZERO,
            in_water: false,
        }
    }

    /// Creates a resting tile-sized body centered on a grid tile.
    #[must_use]
    pub fn on_tile(grid: IVec2, config: &SimConfig) -> Self {
        Self::new(tile_rect(grid, config))
    }

    /// Builder-style: sets the initial velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: IVec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Tile-sized box centered on a grid tile.
#[must_use]
pub fn tile_rect(grid: IVec2, config: &SimConfig) -> Rect {
    Rect::centered_on(config.tile_center(grid), config.tile_size, config.tile_size)
}

// =============================================================================
// Hero
// =============================================================================

/// The player-controlled entity.
#[derive(Debug, Clone)]
pub struct HeroComponents {
    /// Physics state
    pub body: Body,
    /// Presentation state
    pub animator: Animator,
    /// Remaining hearts; zero means dead.
    pub hearts: u32,
    /// Heart cap for healing.
    pub max_hearts: u32,
    /// Grid tile to return to after falling out of the world.
    pub respawn_point: IVec2,
    /// Key codes held, in pickup order.
    pub key_chain: Vec<String>,
    /// Whether the hero is on a climbable with gravity suspended.
    pub is_climbing: bool,
    /// Facing direction for animation.
    pub facing_right: bool,
    /// Frames of remaining post-hit invulnerability.
    pub escape_time: u32,
}

impl HeroComponents {
    /// Creates a hero standing on `start` with full starting hearts.
    #[must_use]
    pub fn new(start: IVec2, animator: Animator, config: &SimConfig) -> Self {
        Self {
            body: Body::on_tile(start, config),
            animator,
            hearts: config.hero.hearts,
            max_hearts: config.hero.max_hearts,
            respawn_point: start,
            key_chain: Vec::new(),
            is_climbing: false,
            facing_right: true,
            escape_time: 0,
        }
    }

    /// Returns true while the hero has hearts left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hearts > 0
    }

    /// What this hero takes into the next level.
    #[must_use]
    pub fn progress(&self) -> HeroProgress {
        HeroProgress {
            hearts: self.hearts,
            max_hearts: self.max_hearts,
            key_chain: self.key_chain.clone(),
        }
    }

    /// Restores hearts and keys carried over from an earlier level.
    ///
    /// Position, respawn point and per-level state stay as [`Self::new`] set
    /// them.
    pub fn resume(&mut self, progress: HeroProgress) {
        self.max_hearts = progress.max_hearts.max(1);
        self.hearts = progress.hearts.clamp(1, self.max_hearts);
        self.key_chain = progress.key_chain;
    }
}

/// Hero state that survives a level change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroProgress {
    /// Remaining hearts.
    pub hearts: u32,
    /// Heart cap.
    pub max_hearts: u32,
    /// Key codes held.
    pub key_chain: Vec<String>,
}

// =============================================================================
// Terrain
// =============================================================================

/// Per-frame behavior of a solid platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformBehavior {
    /// Never moves (grass, block)
    Static,
    /// Destroyed when the hero bumps it from below
    Breakable,
    /// Patrols horizontally within `range` pixels of `origin_x`
    Moving {
        /// Spawn `x`
        origin_x: i32,
        /// Maximum distance from `origin_x`
        range: i32,
    },
    /// Holds an item released by the first bump from below
    ItemBlock {
        /// Remaining item, `None` once used
        item: Option<ItemKind>,
    },
}

/// Solid terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformComponents {
    /// Box and, for moving platforms, patrol velocity
    pub body: Body,
    /// Platform behavior
    pub behavior: PlatformBehavior,
}

/// A pushable crate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrateComponents {
    /// Physics state
    pub body: Body,
    /// Set when a pusher made contact this frame, cleared by the crate's update.
    pub pushed: bool,
}

/// A ladder, vine or fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimbableComponents {
    /// Variant
    pub kind: ClimbableKind,
    /// Extent
    pub rect: Rect,
}

/// A water zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidComponents {
    /// Variant
    pub kind: FluidKind,
    /// Extent
    pub rect: Rect,
}

// =============================================================================
// Actors and Props
// =============================================================================

/// A patrolling enemy.
#[derive(Debug, Clone)]
pub struct EnemyComponents {
    /// Variant
    pub kind: EnemyKind,
    /// Physics state
    pub body: Body,
    /// Presentation state
    pub animator: Animator,
}

/// A pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemComponents {
    /// Variant and payload
    pub kind: ItemKind,
    /// Extent
    pub rect: Rect,
}

/// A door, sign or NPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractableComponents {
    /// Variant and payload
    pub kind: InteractableKind,
    /// Extent
    pub rect: Rect,
    /// Doors without a code start unlocked; other kinds ignore this.
    pub unlocked: bool,
}

impl InteractableComponents {
    /// Creates an interactable; coded doors start locked.
    #[must_use]
    pub fn new(kind: InteractableKind, rect: Rect) -> Self {
        let unlocked = !matches!(kind, InteractableKind::Door { code: Some(_), .. });
        Self {
            kind,
            rect,
            unlocked,
        }
    }
}

/// A flag or flagpole.
#[derive(Debug, Clone)]
pub struct GoalComponents {
    /// Variant
    pub kind: GoalKind,
    /// Extent
    pub rect: Rect,
    /// Present for animated flags
    pub animator: Option<Animator>,
}
