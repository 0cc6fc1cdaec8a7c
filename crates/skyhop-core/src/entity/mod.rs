//! Entity types for the platformer world.
//!
//! - [`EntityId`]: stable handle into the [`World`](crate::world::World)
//! - [`EntityTag`]: category used for queries and update ordering
//! - [`EntityInner`]: type-safe storage for per-variant components
//! - [`Entity`]: the complete entity container
//!
//! # Architecture
//!
//! Entities never reference each other or the world. Everything that relates
//! two entities (a hero picking up an item, a platform carrying a rider) is
//! expressed through ids: the behavior reads the other entity through a
//! [`WorldView`](crate::world_view::WorldView) and requests changes by
//! emitting [`Output`](crate::output::Output)s.
//!
//! # Example
//!
//! ```
//! use skyhop_core::entity::{Entity, EntityId, EntityInner, EntityTag, ItemComponents};
//! use skyhop_core::geometry::Rect;
//! use skyhop_core::level::ItemKind;
//!
//! let gem = Entity::new(
//!     EntityId::new(7),
//!     EntityInner::Item(ItemComponents { kind: ItemKind::Gem, rect: Rect::new(0, 0, 64, 64) }),
//! );
//!
//! assert_eq!(gem.id().as_u64(), 7);
//! assert_eq!(gem.tag(), EntityTag::Item);
//! assert!(gem.body().is_none());
//! ```

pub mod components;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

pub use components::{
    tile_rect, Body, ClimbableComponents, CrateComponents, EnemyComponents, FluidComponents,
    GoalComponents, HeroComponents, HeroProgress, InteractableComponents, ItemComponents,
    PlatformBehavior, PlatformComponents,
};

/// Unique identifier for an entity.
///
/// Ids are assigned monotonically by the world and never reused, so an id
/// held across frames either still names the same entity or names nothing.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new `EntityId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Entity category.
///
/// Tags drive both overlap queries (solids are `Platform` and `Crate`) and the
/// per-frame update order, see [`EntityTag::UPDATE_ORDER`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityTag {
    /// The player
    Hero,
    /// Solid terrain, including moving and breakable platforms
    Platform,
    /// Pushable solid
    Crate,
    /// Ladder, vine, fence
    Climbable,
    /// Water
    Fluid,
    /// Patrolling hazard
    Enemy,
    /// Pickup
    Item,
    /// Door, sign, NPC
    Interactable,
    /// Flag, flagpole
    Goal,
}

impl EntityTag {
    /// Tags that block movement.
    pub const SOLIDS: &'static [Self] = &[Self::Platform, Self::Crate];

    /// Groups with per-frame behavior, in the order the frame driver runs them.
    pub const UPDATE_ORDER: [Self; 5] = [
        Self::Platform,
        Self::Hero,
        Self::Crate,
        Self::Enemy,
        Self::Goal,
    ];
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hero => "Hero",
            Self::Platform => "Platform",
            Self::Crate => "Crate",
            Self::Climbable => "Climbable",
            Self::Fluid => "Fluid",
            Self::Enemy => "Enemy",
            Self::Item => "Item",
            Self::Interactable => "Interactable",
            Self::Goal => "Goal",
        };
        write!(f, "{name}")
    }
}

/// Type-safe storage for entity-specific components.
#[derive(Debug, Clone)]
pub enum EntityInner {
    /// Player components
    Hero(Box<HeroComponents>),
    /// Platform components
    Platform(PlatformComponents),
    /// Crate components
    Crate(CrateComponents),
    /// Climbable components
    Climbable(ClimbableComponents),
    /// Fluid components
    Fluid(FluidComponents),
    /// Enemy components
    Enemy(EnemyComponents),
    /// Item components
    Item(ItemComponents),
    /// Interactable components
    Interactable(InteractableComponents),
    /// Goal components
    Goal(GoalComponents),
}

impl EntityInner {
    /// Returns the tag matching this variant.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        match self {
            Self::Hero(_) => EntityTag::Hero,
            Self::Platform(_) => EntityTag::Platform,
            Self::Crate(_) => EntityTag::Crate,
            Self::Climbable(_) => EntityTag::Climbable,
            Self::Fluid(_) => EntityTag::Fluid,
            Self::Enemy(_) => EntityTag::Enemy,
            Self::Item(_) => EntityTag::Item,
            Self::Interactable(_) => EntityTag::Interactable,
            Self::Goal(_) => EntityTag::Goal,
        }
    }
}

/// A world entity: id, tag and components.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    tag: EntityTag,
    inner: EntityInner,
}

impl Entity {
    /// Creates an entity; the tag is derived from `inner`.
    #[must_use]
    pub fn new(id: EntityId, inner: EntityInner) -> Self {
        Self {
            id,
            tag: inner.tag(),
            inner,
        }
    }

    /// Returns the entity's id.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Returns the entity's tag.
    #[must_use]
    pub const fn tag(&self) -> EntityTag {
        self.tag
    }

    /// Returns the components.
    #[must_use]
    pub const fn inner(&self) -> &EntityInner {
        &self.inner
    }

    /// Returns the components mutably.
    #[must_use]
    pub fn inner_mut(&mut self) -> &mut EntityInner {
        &mut self.inner
    }

    /// Returns the collision box of any variant.
    #[must_use]
    pub fn rect(&self) -> Rect {
        match &self.inner {
            EntityInner::Hero(hero) => hero.body.rect,
            EntityInner::Platform(platform) => platform.body.rect,
            EntityInner::Crate(crate_) => crate_.body.rect,
            EntityInner::Enemy(enemy) => enemy.body.rect,
            EntityInner::Climbable(climbable) => climbable.rect,
            EntityInner::Fluid(fluid) => fluid.rect,
            EntityInner::Item(item) => item.rect,
            EntityInner::Interactable(interactable) => interactable.rect,
            EntityInner::Goal(goal) => goal.rect,
        }
    }

    /// Returns the physics body, if this variant has one.
    #[must_use]
    pub fn body(&self) -> Option<&Body> {
        match &self.inner {
            EntityInner::Hero(hero) => Some(&hero.body),
            EntityInner::Platform(platform) => Some(&platform.body),
            EntityInner::Crate(crate_) => Some(&crate_.body),
            EntityInner::Enemy(enemy) => Some(&enemy.body),
            _ => None,
        }
    }

    /// Returns the physics body mutably, if this variant has one.
    #[must_use]
    pub fn body_mut(&mut self) -> Option<&mut Body> {
        match &mut self.inner {
            EntityInner::Hero(hero) => Some(&mut hero.body),
            EntityInner::Platform(platform) => Some(&mut platform.body),
            EntityInner::Crate(crate_) => Some(&mut crate_.body),
            EntityInner::Enemy(enemy) => Some(&mut enemy.body),
            _ => None,
        }
    }

    /// Returns the hero components, if this is the hero.
    #[must_use]
    pub fn as_hero(&self) -> Option<&HeroComponents> {
        match &self.inner {
            EntityInner::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    /// Returns the hero components mutably, if this is the hero.
    #[must_use]
    pub fn as_hero_mut(&mut self) -> Option<&mut HeroComponents> {
        match &mut self.inner {
            EntityInner::Hero(hero) => Some(hero),
            _ => None,
        }
    }

    /// Returns the platform components, if this is a platform.
    #[must_use]
    pub const fn as_platform(&self) -> Option<&PlatformComponents> {
        match &self.inner {
            EntityInner::Platform(platform) => Some(platform),
            _ => None,
        }
    }

    /// Returns the platform components mutably, if this is a platform.
    #[must_use]
    pub fn as_platform_mut(&mut self) -> Option<&mut PlatformComponents> {
        match &mut self.inner {
            EntityInner::Platform(platform) => Some(platform),
            _ => None,
        }
    }

    /// Returns the crate components, if this is a crate.
    #[must_use]
    pub const fn as_crate(&self) -> Option<&CrateComponents> {
        match &self.inner {
            EntityInner::Crate(crate_) => Some(crate_),
            _ => None,
        }
    }

    /// Returns the crate components mutably, if this is a crate.
    #[must_use]
    pub fn as_crate_mut(&mut self) -> Option<&mut CrateComponents> {
        match &mut self.inner {
            EntityInner::Crate(crate_) => Some(crate_),
            _ => None,
        }
    }

    /// Returns the enemy components, if this is an enemy.
    #[must_use]
    pub const fn as_enemy(&self) -> Option<&EnemyComponents> {
        match &self.inner {
            EntityInner::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    /// Returns the item components, if this is an item.
    #[must_use]
    pub const fn as_item(&self) -> Option<&ItemComponents> {
        match &self.inner {
            EntityInner::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the interactable components, if this is an interactable.
    #[must_use]
    pub const fn as_interactable(&self) -> Option<&InteractableComponents> {
        match &self.inner {
            EntityInner::Interactable(interactable) => Some(interactable),
            _ => None,
        }
    }

    /// Returns the interactable components mutably, if this is an interactable.
    #[must_use]
    pub fn as_interactable_mut(&mut self) -> Option<&mut InteractableComponents> {
        match &mut self.inner {
            EntityInner::Interactable(interactable) => Some(interactable),
            _ => None,
        }
    }

    /// Returns the goal components, if this is a goal.
    #[must_use]
    pub const fn as_goal(&self) -> Option<&GoalComponents> {
        match &self.inner {
            EntityInner::Goal(goal) => Some(goal),
            _ => None,
        }
    }

    /// Returns the climbable components, if this is a climbable.
    #[must_use]
    pub const fn as_climbable(&self) -> Option<&ClimbableComponents> {
        match &self.inner {
            EntityInner::Climbable(climbable) => Some(climbable),
            _ => None,
        }
    }
}
