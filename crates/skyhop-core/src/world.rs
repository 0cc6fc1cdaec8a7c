//! The world: entity registry and spatial index for one loaded level.
//!
//! The World owns every entity of a level. It provides:
//! - Entity storage with deterministic iteration order (`BTreeMap`)
//! - A uniform-grid spatial index for rectangle overlap queries
//! - Entity lifecycle management (spawn/despawn, take/restore)
//! - Level construction from decoded [`LevelData`]
//!
//! # Spatial Index Synchronization
//!
//! The spatial index is NOT automatically synchronized when an entity's box
//! changes through [`World::get_mut`]. Call [`World::update_spatial`]
//! afterward. Spawning, despawning and [`World::restore`] keep the index in
//! sync on their own.
//!
//! # Take and Restore
//!
//! While an entity runs its own update it is taken out of the registry with
//! [`World::take`], so the rest of the world can be borrowed immutably as a
//! [`WorldView`](crate::world_view::WorldView) without the entity seeing
//! itself. [`World::restore`] puts it back under the same id.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glam::IVec2;
//! use skyhop_core::animation::AnimationLibrary;
//! use skyhop_core::config::SimConfig;
//! use skyhop_core::entity::EntityTag;
//! use skyhop_core::level::{LevelData, PlatformKind};
//! use skyhop_core::world::World;
//!
//! let level = LevelData::new(20, 10, IVec2::new(2, 7)).with_floor(9, 0, 19, &PlatformKind::Grass);
//! let world = World::load(&level, Arc::new(SimConfig::default()), &AnimationLibrary::placeholder())
//!     .unwrap();
//!
//! assert_eq!(world.width(), 20 * 64);
//! assert_eq!(world.ids_with_tag(EntityTag::Platform).len(), 20);
//! assert!(world.hero().is_some());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use glam::IVec2;
use tracing::{debug, info, warn};

use crate::animation::{AnimatedKind, AnimationLibrary};
use crate::config::SimConfig;
use crate::entity::{
    tile_rect, Body, ClimbableComponents, CrateComponents, EnemyComponents, Entity, EntityId,
    EntityInner, EntityTag, FluidComponents, GoalComponents, HeroComponents, HeroProgress,
    InteractableComponents, ItemComponents, PlatformBehavior, PlatformComponents,
};
use crate::error::LevelError;
use crate::geometry::Rect;
use crate::level::{EnemyKind, GoalKind, ItemKind, LevelData, PlatformKind};

/// Largest world extent, in pixels, a level may load with.
pub const MAX_WORLD_PIXELS: i32 = 1 << 24;

// =============================================================================
// Spatial Index
// =============================================================================

/// Uniform-grid spatial hash over entity boxes.
///
/// Each entity is registered in every cell its box covers. Queries return
/// candidate ids sorted by id; callers still run the exact overlap test.
///
/// # Note on `HashMap` Usage
///
/// Iteration order of the cell map never reaches simulation state: query
/// results are sorted before they are returned.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: i32,
    cells: HashMap<IVec2, Vec<EntityId>>,
    boxes: HashMap<EntityId, Rect>,
}

impl SpatialIndex {
    /// Creates an empty index with square cells of `cell_size` pixels.
    #[must_use]
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            cells: HashMap::new(),
            boxes: HashMap::new(),
        }
    }

    /// Inserts or moves an entity's box.
    pub fn insert(&mut self, id: EntityId, rect: Rect) {
        if self.boxes.get(&id) == Some(&rect) {
            return;
        }
        self.remove(id);
        for cell in self.cells_for(rect) {
            self.cells.entry(cell).or_default().push(id);
        }
        self.boxes.insert(id, rect);
    }

    /// Removes an entity; unknown ids are ignored.
    pub fn remove(&mut self, id: EntityId) {
        let Some(rect) = self.boxes.remove(&id) else {
            return;
        };
        for cell in self.cells_for(rect) {
            if let Some(ids) = self.cells.get_mut(&cell) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    self.cells.remove(&cell);
                }
            }
        }
    }

    /// Candidate ids whose cells intersect `rect`, sorted and deduplicated.
    #[must_use]
    pub fn query(&self, rect: Rect) -> Vec<EntityId> {
        let mut results: Vec<EntityId> = self
            .cells_for(rect)
            .filter_map(|cell| self.cells.get(&cell))
            .flatten()
            .copied()
            .collect();

        // Sort for deterministic order
        results.sort_unstable();
        results.dedup();
        results
    }

    /// Number of indexed entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    fn cells_for(&self, rect: Rect) -> impl Iterator<Item = IVec2> {
        let size = self.cell_size;
        let (x0, x1, y0, y1) = if rect.is_empty() {
            (0, -1, 0, -1)
        } else {
            (
                rect.left().div_euclid(size),
                (rect.right() - 1).div_euclid(size),
                rect.top().div_euclid(size),
                (rect.bottom() - 1).div_euclid(size),
            )
        };
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| IVec2::new(x, y)))
    }
}

// =============================================================================
// World
// =============================================================================

/// All entities of one loaded level.
#[derive(Debug, Clone)]
pub struct World {
    /// Monotonically increasing entity ID counter.
    next_id: u64,
    /// Entity storage with deterministic iteration order.
    entities: BTreeMap<EntityId, Entity>,
    /// Overlap index over entity boxes.
    spatial: SpatialIndex,
    /// Shared immutable configuration.
    config: Arc<SimConfig>,
    /// World width in pixels.
    width: i32,
    /// World height in pixels.
    height: i32,
    /// The hero, once spawned.
    hero: Option<EntityId>,
}

impl World {
    /// Creates an empty world of `width` x `height` pixels.
    #[must_use]
    pub fn new(width: i32, height: i32, config: Arc<SimConfig>) -> Self {
        Self {
            next_id: 1,
            entities: BTreeMap::new(),
            spatial: SpatialIndex::new(config.tile_size * 2),
            config,
            width,
            height,
            hero: None,
        }
    }

    /// Builds a world from decoded level data.
    ///
    /// Tile coordinates are converted to tile-sized boxes centered on their
    /// tile. Absent record arrays simply produce no entities, and placements
    /// off the level grid are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Fails on an invalid config, level dimensions that are non-positive or
    /// too large, a start tile off the grid, or animation sets that do not
    /// cover an animated entity in the level.
    pub fn load(
        level: &LevelData,
        config: Arc<SimConfig>,
        animations: &AnimationLibrary,
    ) -> Result<Self, LevelError> {
        Self::load_resuming(level, config, animations, None)
    }

    /// Like [`World::load`], but the hero keeps the hearts and keys in
    /// `progress` instead of starting fresh.
    ///
    /// # Errors
    ///
    /// Same as [`World::load`].
    pub fn load_resuming(
        level: &LevelData,
        config: Arc<SimConfig>,
        animations: &AnimationLibrary,
        progress: Option<HeroProgress>,
    ) -> Result<Self, LevelError> {
        config.validate()?;
        if level.width <= 0 || level.height <= 0 {
            return Err(LevelError::Dimensions {
                width: level.width,
                height: level.height,
            });
        }
        let tile = config.tile_size;
        let pixels = |tiles: i32| {
            tiles
                .checked_mul(tile)
                .filter(|px| *px <= MAX_WORLD_PIXELS)
        };
        let (Some(width), Some(height)) = (pixels(level.width), pixels(level.height)) else {
            return Err(LevelError::TooLarge {
                width: level.width,
                height: level.height,
            });
        };
        if !level.contains(level.start) {
            return Err(LevelError::StartOutside {
                x: level.start.x,
                y: level.start.y,
            });
        }

        let outside = level.outside_count();
        if outside > 0 {
            warn!(outside, "placements_outside_level_skipped");
        }

        let rate = config.frame_rate;
        let mut world = Self::new(width, height, Arc::clone(&config));

        let mut hero = HeroComponents::new(
            level.start,
            animations.animator(AnimatedKind::Hero, rate)?,
            &config,
        );
        if let Some(progress) = progress {
            debug!(
                hearts = progress.hearts,
                keys = progress.key_chain.len(),
                "hero_resumed"
            );
            hero.resume(progress);
        }
        world.spawn(EntityInner::Hero(Box::new(hero)));

        for placement in level.platforms.iter().filter(|p| level.contains(p.location)) {
            let body = Body::on_tile(placement.location, &config);
            let inner = match &placement.kind {
                PlatformKind::Crate => EntityInner::Crate(CrateComponents {
                    body,
                    pushed: false,
                }),
                kind => EntityInner::Platform(platform_components(body, kind, &config)),
            };
            world.spawn(inner);
        }

        for placement in level.climbables.iter().filter(|p| level.contains(p.location)) {
            world.spawn(EntityInner::Climbable(ClimbableComponents {
                kind: placement.kind,
                rect: tile_rect(placement.location, &config),
            }));
        }

        for placement in level.fluids.iter().filter(|p| level.contains(p.location)) {
            world.spawn(EntityInner::Fluid(FluidComponents {
                kind: placement.kind,
                rect: tile_rect(placement.location, &config),
            }));
        }

        for placement in level.enemies.iter().filter(|p| level.contains(p.location)) {
            let kind = placement.kind;
            let body = Body::on_tile(placement.location, &config)
                .with_velocity(IVec2::new(initial_enemy_speed(kind, &config), 0));
            let animator = animations.animator(animated_kind(kind), rate)?;
            world.spawn(EntityInner::Enemy(EnemyComponents {
                kind,
                body,
                animator,
            }));
        }

        for placement in level.items.iter().filter(|p| level.contains(p.location)) {
            world.spawn_item(
                placement.kind.clone(),
                tile_rect(placement.location, &config),
            );
        }

        for placement in level.interactables.iter().filter(|p| level.fits(p)) {
            world.spawn(EntityInner::Interactable(InteractableComponents::new(
                placement.kind.clone(),
                tile_rect(placement.location, &config),
            )));
        }

        for placement in level.goals.iter().filter(|p| level.contains(p.location)) {
            let animator = match placement.kind {
                GoalKind::Flag => Some(animations.animator(AnimatedKind::Flag, rate)?),
                GoalKind::Flagpole => None,
            };
            world.spawn(EntityInner::Goal(GoalComponents {
                kind: placement.kind,
                rect: tile_rect(placement.location, &config),
                animator,
            }));
        }

        info!(
            width = level.width,
            height = level.height,
            entities = world.len(),
            "level_loaded"
        );
        Ok(world)
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Adds an entity and returns its new id.
    pub fn spawn(&mut self, inner: EntityInner) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;

        let entity = Entity::new(id, inner);
        if entity.tag() == EntityTag::Hero {
            self.hero = Some(id);
        }
        self.spatial.insert(id, entity.rect());
        self.entities.insert(id, entity);
        id
    }

    /// Adds an item pickup occupying `rect`.
    pub fn spawn_item(&mut self, kind: ItemKind, rect: Rect) -> EntityId {
        self.spawn(EntityInner::Item(ItemComponents { kind, rect }))
    }

    /// Removes an entity; returns it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.spatial.remove(id);
        if self.hero == Some(id) {
            self.hero = None;
        }
        debug!(entity = %id, tag = %entity.tag(), "despawned");
        Some(entity)
    }

    /// Temporarily removes an entity so it can update against the rest of the world.
    ///
    /// Unlike [`World::despawn`] the hero id is kept, and the entity must be
    /// handed back with [`World::restore`].
    pub fn take(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(&id)?;
        self.spatial.remove(id);
        Some(entity)
    }

    /// Reinserts an entity obtained from [`World::take`] and syncs its box.
    pub fn restore(&mut self, entity: Entity) {
        let id = entity.id();
        self.spatial.insert(id, entity.rect());
        self.entities.insert(id, entity);
    }

    /// Syncs the spatial index with the entity's current box.
    pub fn update_spatial(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.get(&id) {
            self.spatial.insert(id, entity.rect());
        }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Returns an entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Returns an entity mutably; call [`World::update_spatial`] after moving it.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Returns true if `id` is present.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Iterates entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Ids with `tag`, in id order.
    #[must_use]
    pub fn ids_with_tag(&self, tag: EntityTag) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|entity| entity.tag() == tag)
            .map(Entity::id)
            .collect()
    }

    /// Ids whose boxes may intersect `rect`, in id order.
    #[must_use]
    pub fn query_rect(&self, rect: Rect) -> Vec<EntityId> {
        self.spatial.query(rect)
    }

    /// The hero's id.
    #[must_use]
    pub const fn hero_id(&self) -> Option<EntityId> {
        self.hero
    }

    /// The hero's components.
    #[must_use]
    pub fn hero(&self) -> Option<&HeroComponents> {
        self.hero
            .and_then(|id| self.entities.get(&id))
            .and_then(Entity::as_hero)
    }

    /// The hero's components, mutably.
    #[must_use]
    pub fn hero_mut(&mut self) -> Option<&mut HeroComponents> {
        let id = self.hero?;
        self.entities.get_mut(&id).and_then(Entity::as_hero_mut)
    }

    /// Shared configuration.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Shared configuration handle.
    #[must_use]
    pub fn config_arc(&self) -> Arc<SimConfig> {
        Arc::clone(&self.config)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of entities (excluding any currently taken out).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the world holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

pub(crate) fn platform_components(
    body: Body,
    kind: &PlatformKind,
    config: &SimConfig,
) -> PlatformComponents {
    let (body, behavior) = match kind {
        PlatformKind::Grass | PlatformKind::Block | PlatformKind::Crate => {
            (body, PlatformBehavior::Static)
        }
        PlatformKind::Breakable => (body, PlatformBehavior::Breakable),
        PlatformKind::Moving { range } => {
            if *range < 0 {
                warn!(range = *range, "negative_moving_range_clamped");
            }
            (
                body.with_velocity(IVec2::new(config.items.moving_platform_speed, 0)),
                PlatformBehavior::Moving {
                    origin_x: body.rect.x,
                    range: (*range).max(0).saturating_mul(config.tile_size),
                },
            )
        }
        PlatformKind::ItemBlock { item } => (
            body,
            PlatformBehavior::ItemBlock {
                item: Some(item.clone()),
            },
        ),
    };
    PlatformComponents { body, behavior }
}

pub(crate) fn initial_enemy_speed(kind: EnemyKind, config: &SimConfig) -> i32 {
    let enemies = &config.enemies;
    match kind {
        EnemyKind::Cloud => -enemies.cloud_speed,
        EnemyKind::Spikeball => -enemies.spikeball_speed,
        EnemyKind::Spikeman => -enemies.spikeman_speed,
        EnemyKind::Fish => enemies.fish_speed,
    }
}

/// Animation kind backing an enemy variant.
#[must_use]
pub const fn animated_kind(kind: EnemyKind) -> AnimatedKind {
    match kind {
        EnemyKind::Cloud => AnimatedKind::Cloud,
        EnemyKind::Spikeball => AnimatedKind::Spikeball,
        EnemyKind::Spikeman => AnimatedKind::Spikeman,
        EnemyKind::Fish => AnimatedKind::Fish,
    }
}
