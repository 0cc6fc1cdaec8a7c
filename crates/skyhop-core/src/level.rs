//! Decoded level records.
//!
//! The core does not read level files. Callers decode their format of choice
//! into [`LevelData`] (the types derive `serde` for convenience) and hand it
//! to [`World::load`](crate::world::World::load).
//!
//! Every placement is a grid `location` plus a kind tag with kind-specific
//! fields, flattened into one JSON object:
//!
//! ```
//! use skyhop_core::level::{LevelData, PlatformKind};
//!
//! let level: LevelData = serde_json::from_str(r#"{
//!     "width": 20,
//!     "height": 10,
//!     "start": [1, 8],
//!     "platforms": [
//!         { "location": [1, 9], "type": "grass" },
//!         { "location": [4, 6], "type": "moving", "range": 2 }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(level.platforms.len(), 2);
//! assert_eq!(level.platforms[1].kind, PlatformKind::Moving { range: 2 });
//! assert!(level.enemies.is_empty()); // absent arrays mean no entities
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid location with a kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement<K> {
    /// Tile coordinate.
    pub location: IVec2,
    /// Kind and parameters.
    #[serde(flatten)]
    pub kind: K,
}

impl<K> Placement<K> {
    /// Creates a placement.
    pub fn new(location: IVec2, kind: K) -> Self {
        Self { location, kind }
    }
}

/// Solid terrain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlatformKind {
    /// Grass-topped dirt
    Grass,
    /// Stone block
    Block,
    /// Pushable crate
    Crate,
    /// Destroyed by a head-bump from below
    Breakable,
    /// Patrols horizontally, carrying riders
    Moving {
        /// Patrol half-width in tiles
        #[serde(default = "default_patrol_range")]
        range: i32,
    },
    /// Releases an item once when bumped from below
    ItemBlock {
        /// Item released
        item: ItemKind,
    },
}

const fn default_patrol_range() -> i32 {
    3
}

/// Non-solid climbing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClimbableKind {
    /// Ladder section
    Ladder,
    /// Hanging vine
    Vine,
    /// Climbable fence
    Fence,
}

/// Non-solid fluid zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FluidKind {
    /// Water
    Water,
}

/// Enemy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemyKind {
    /// Flies horizontally, ignores terrain
    Cloud,
    /// Rolls with gravity, turns at walls
    Spikeball,
    /// Walks with gravity, turns at walls and ledges
    Spikeman,
    /// Swims horizontally inside water
    Fish,
}

/// Pickups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Adds score
    Gem,
    /// Restores a heart
    Heart,
    /// Adds a code to the hero's key chain
    Key {
        /// Code matched against locked doors
        #[serde(default)]
        code: String,
    },
}

/// Things the hero can interact with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractableKind {
    /// Teleports the hero, optionally after unlocking
    Door {
        /// Grid destination
        destination: IVec2,
        /// Key code required, if locked
        #[serde(default)]
        code: Option<String>,
    },
    /// Shows a message
    Sign {
        /// Text
        message: String,
    },
    /// Speaks a message
    Npc {
        /// Character type, e.g. "wizard"
        npc_type: String,
        /// Text
        message: String,
    },
}

/// Level goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
    /// Animated flag at the top of the pole
    Flag,
    /// Pole segment
    Flagpole,
}

/// One decoded level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
    /// Hero spawn and initial respawn point.
    pub start: IVec2,
    /// Solid terrain.
    #[serde(default)]
    pub platforms: Vec<Placement<PlatformKind>>,
    /// Ladders, vines, fences.
    #[serde(default)]
    pub climbables: Vec<Placement<ClimbableKind>>,
    /// Water tiles.
    #[serde(default)]
    pub fluids: Vec<Placement<FluidKind>>,
    /// Enemies.
    #[serde(default)]
    pub enemies: Vec<Placement<EnemyKind>>,
    /// Pickups.
    #[serde(default)]
    pub items: Vec<Placement<ItemKind>>,
    /// Doors, signs, NPCs.
    #[serde(default)]
    pub interactables: Vec<Placement<InteractableKind>>,
    /// Flags and flagpoles.
    #[serde(default)]
    pub goals: Vec<Placement<GoalKind>>,
}

impl LevelData {
    /// Empty level of the given size with the hero at `start`.
    #[must_use]
    pub fn new(width: i32, height: i32, start: IVec2) -> Self {
        Self {
            width,
            height,
            start,
            platforms: Vec::new(),
            climbables: Vec::new(),
            fluids: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            interactables: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Adds a row of platforms from `x0` to `x1` inclusive.
    #[must_use]
    pub fn with_floor(mut self, y: i32, x0: i32, x1: i32, kind: &PlatformKind) -> Self {
        for x in x0..=x1 {
            self.platforms
                .push(Placement::new(IVec2::new(x, y), kind.clone()));
        }
        self
    }

    /// Total number of placements, excluding the hero.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.platforms.len()
            + self.climbables.len()
            + self.fluids.len()
            + self.enemies.len()
            + self.items.len()
            + self.interactables.len()
            + self.goals.len()
    }

    /// Grid location of every placement, excluding the hero.
    pub fn locations(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.platforms
            .iter()
            .map(|p| p.location)
            .chain(self.climbables.iter().map(|p| p.location))
            .chain(self.fluids.iter().map(|p| p.location))
            .chain(self.enemies.iter().map(|p| p.location))
            .chain(self.items.iter().map(|p| p.location))
            .chain(self.interactables.iter().map(|p| p.location))
            .chain(self.goals.iter().map(|p| p.location))
    }

    /// Returns true if `grid` lies on the level's tile grid.
    #[must_use]
    pub const fn contains(&self, grid: IVec2) -> bool {
        grid.x >= 0 && grid.y >= 0 && grid.x < self.width && grid.y < self.height
    }

    /// Returns true if an interactable lies on the grid and, for a door,
    /// leads somewhere on the grid.
    #[must_use]
    pub fn fits(&self, placement: &Placement<InteractableKind>) -> bool {
        let leads_inside = match &placement.kind {
            InteractableKind::Door { destination, .. } => self.contains(*destination),
            InteractableKind::Sign { .. } | InteractableKind::Npc { .. } => true,
        };
        leads_inside && self.contains(placement.location)
    }

    /// Number of placements that cannot be spawned: off the grid, or doors
    /// leading off it.
    #[must_use]
    pub fn outside_count(&self) -> usize {
        let off_grid = self
            .locations()
            .filter(|grid| !self.contains(*grid))
            .count();
        let stray_doors = self
            .interactables
            .iter()
            .filter(|p| self.contains(p.location) && !self.fits(p))
            .count();
        off_grid + stray_doors
    }
}
