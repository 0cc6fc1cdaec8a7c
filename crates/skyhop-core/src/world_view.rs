//! `WorldView` provides read-only access to the world for behaviors.
//!
//! The [`WorldView`] is the only way an updating entity sees the rest of the
//! level. The entity being updated has been taken out of the registry (see
//! [`World::take`]), so every query here naturally excludes it.
//!
//! # Immutability
//!
//! `WorldView` hands out shared references only. Behaviors that need to
//! change another entity emit an [`Output`](crate::output::Output) instead.
//!
//! # Empty Results
//!
//! Queries against an empty category, or ids that no longer exist, return
//! nothing; they never fail.

use std::collections::BTreeSet;

use crate::config::SimConfig;
use crate::entity::{Entity, EntityId, EntityTag, HeroComponents};
use crate::geometry::Rect;
use crate::world::World;

// =============================================================================
// WorldView
// =============================================================================

/// Read-only query handle over a [`World`].
#[derive(Debug, Clone, Copy)]
pub struct WorldView<'a> {
    /// Reference to the world being viewed.
    world: &'a World,
}

impl<'a> WorldView<'a> {
    /// Creates a view over `world`.
    #[must_use]
    pub const fn new(world: &'a World) -> Self {
        Self { world }
    }

    /// Shared configuration.
    #[must_use]
    pub fn config(&self) -> &'a SimConfig {
        self.world.config()
    }

    /// World width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.world.width()
    }

    /// World height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.world.height()
    }

    /// Returns an entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&'a Entity> {
        self.world.get(id)
    }

    /// The hero's id.
    #[must_use]
    pub const fn hero_id(&self) -> Option<EntityId> {
        self.world.hero_id()
    }

    /// The hero, unless it is the entity being updated.
    #[must_use]
    pub fn hero(&self) -> Option<&'a HeroComponents> {
        self.world.hero()
    }

    // -------------------------------------------------------------------------
    // Overlap Queries
    // -------------------------------------------------------------------------

    /// Entities in any of `tags` strictly overlapping `rect`, in id order.
    pub fn overlapping(
        &self,
        rect: Rect,
        tags: &'static [EntityTag],
    ) -> impl Iterator<Item = &'a Entity> + 'a {
        let world = self.world;
        world
            .query_rect(rect)
            .into_iter()
            .filter_map(move |id| world.get(id))
            .filter(move |entity| tags.contains(&entity.tag()) && entity.rect().overlaps(&rect))
    }

    /// Returns true if anything in `tags` overlaps `rect`.
    #[must_use]
    pub fn any_overlapping(&self, rect: Rect, tags: &'static [EntityTag]) -> bool {
        self.overlapping(rect, tags).next().is_some()
    }

    /// Boxes of solids (platforms and crates) overlapping `rect`.
    #[must_use]
    pub fn solid_rects(&self, rect: Rect) -> Vec<Rect> {
        self.overlapping(rect, EntityTag::SOLIDS)
            .map(Entity::rect)
            .collect()
    }

    /// Solids overlapping `rect`.
    pub fn solids(&self, rect: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.overlapping(rect, EntityTag::SOLIDS)
    }

    /// Climbables overlapping `rect`.
    pub fn climbables(&self, rect: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.overlapping(rect, &[EntityTag::Climbable])
    }

    /// Returns true if `rect` overlaps a fluid zone.
    #[must_use]
    pub fn in_fluid(&self, rect: Rect) -> bool {
        self.any_overlapping(rect, &[EntityTag::Fluid])
    }

    /// Enemies overlapping `rect`.
    pub fn enemies(&self, rect: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.overlapping(rect, &[EntityTag::Enemy])
    }

    /// Items overlapping `rect`.
    pub fn items(&self, rect: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.overlapping(rect, &[EntityTag::Item])
    }

    /// Interactables overlapping `rect`.
    pub fn interactables(&self, rect: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.overlapping(rect, &[EntityTag::Interactable])
    }

    /// Returns true if `rect` overlaps a goal.
    #[must_use]
    pub fn reaches_goal(&self, rect: Rect) -> bool {
        self.any_overlapping(rect, &[EntityTag::Goal])
    }

    /// Crates overlapping `rect`.
    pub fn crates(&self, rect: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.overlapping(rect, &[EntityTag::Crate])
    }

    // -------------------------------------------------------------------------
    // Crate Chains
    // -------------------------------------------------------------------------

    /// Crates rigidly connected to `start` for a push in `direction`.
    ///
    /// Depth-first from `start`: a crate joins the chain when it shares the
    /// leading edge of a chain member (vertical offset within half a tile) or
    /// rests on top of one (horizontal offset within half a tile). The result
    /// starts with `start` and lists each crate once.
    #[must_use]
    pub fn connected_crates(&self, start: EntityId, direction: i32) -> Vec<EntityId> {
        let half = self.config().tile_size / 2;
        let crates: Vec<(EntityId, Rect)> = self
            .world
            .entities()
            .filter(|entity| entity.tag() == EntityTag::Crate)
            .map(|entity| (entity.id(), entity.rect()))
            .collect();

        let Some(&(_, start_rect)) = crates.iter().find(|(id, _)| *id == start) else {
            return Vec::new();
        };

        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut stack = vec![(start, start_rect)];
        seen.insert(start);

        while let Some((id, rect)) = stack.pop() {
            chain.push(id);
            for &(other_id, other) in &crates {
                if seen.contains(&other_id) {
                    continue;
                }
                let beside = (rect.y - other.y).abs() <= half
                    && ((direction > 0 && rect.right() == other.left())
                        || (direction < 0 && rect.left() == other.right()));
                let on_top = rect.top() == other.bottom() && (rect.x - other.x).abs() <= half;
                if beside || on_top {
                    seen.insert(other_id);
                    stack.push((other_id, other));
                }
            }
        }
        chain
    }
}
