//! World builders and entity factories for tests.
//!
//! Grid arguments are tile coordinates; every factory places a tile-sized box
//! centered on its tile, the same way a loaded level does.

use std::sync::Arc;

use glam::IVec2;

use crate::animation::{AnimatedKind, AnimationLibrary, Animator};
use crate::behavior::{self, UpdateContext};
use crate::config::SimConfig;
use crate::entity::{
    tile_rect, Body, ClimbableComponents, CrateComponents, EnemyComponents, EntityId, EntityInner,
    FluidComponents, HeroComponents, InteractableComponents, PlatformBehavior, PlatformComponents,
};
use crate::input::InputState;
use crate::level::{ClimbableKind, EnemyKind, FluidKind, InteractableKind, ItemKind, PlatformKind};
use crate::output::Output;
use crate::world::{animated_kind, initial_enemy_speed, platform_components, World};
use crate::world_view::WorldView;

// =============================================================================
// Worlds
// =============================================================================

/// Empty world of `width` x `height` tiles with the default config.
pub fn test_world(width: i32, height: i32) -> World {
    let config = Arc::new(SimConfig::default());
    let tile = config.tile_size;
    World::new(width * tile, height * tile, config)
}

fn animator(kind: AnimatedKind, world: &World) -> Animator {
    AnimationLibrary::placeholder()
        .animator(kind, world.config().frame_rate)
        .expect("placeholder library covers every kind")
}

// =============================================================================
// Terrain
// =============================================================================

/// Static grass tile.
pub fn spawn_platform(world: &mut World, grid: IVec2) -> EntityId {
    let body = Body::on_tile(grid, world.config());
    world.spawn(EntityInner::Platform(PlatformComponents {
        body,
        behavior: PlatformBehavior::Static,
    }))
}

/// Row of static tiles on row `y` from column `x0` through `x1` inclusive.
pub fn spawn_floor(world: &mut World, y: i32, x0: i32, x1: i32) {
    for x in x0..=x1 {
        spawn_platform(world, IVec2::new(x, y));
    }
}

/// Moving platform patrolling `range_tiles` either side of its spawn.
pub fn spawn_moving_platform(world: &mut World, grid: IVec2, range_tiles: i32) -> EntityId {
    let config = world.config_arc();
    let body = Body::on_tile(grid, &config);
    let platform = platform_components(body, &PlatformKind::Moving { range: range_tiles }, &config);
    world.spawn(EntityInner::Platform(platform))
}

/// Crate at rest.
pub fn spawn_crate(world: &mut World, grid: IVec2) -> EntityId {
    let body = Body::on_tile(grid, world.config());
    world.spawn(EntityInner::Crate(CrateComponents {
        body,
        pushed: false,
    }))
}

/// Water tile.
pub fn spawn_fluid(world: &mut World, grid: IVec2) -> EntityId {
    let rect = tile_rect(grid, world.config());
    world.spawn(EntityInner::Fluid(FluidComponents {
        kind: FluidKind::Water,
        rect,
    }))
}

/// Ladder, vine or fence tile.
pub fn spawn_climbable(world: &mut World, grid: IVec2, kind: ClimbableKind) -> EntityId {
    let rect = tile_rect(grid, world.config());
    world.spawn(EntityInner::Climbable(ClimbableComponents { kind, rect }))
}

// =============================================================================
// Actors
// =============================================================================

/// Enemy with its level-load starting velocity.
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, grid: IVec2) -> EntityId {
    let speed = initial_enemy_speed(kind, world.config());
    let body = Body::on_tile(grid, world.config()).with_velocity(IVec2::new(speed, 0));
    let animator = animator(animated_kind(kind), world);
    world.spawn(EntityInner::Enemy(EnemyComponents {
        kind,
        body,
        animator,
    }))
}

/// Pickup.
pub fn spawn_item(world: &mut World, grid: IVec2, kind: ItemKind) -> EntityId {
    let rect = tile_rect(grid, world.config());
    world.spawn_item(kind, rect)
}

/// Door, sign or NPC.
pub fn spawn_interactable(world: &mut World, grid: IVec2, kind: InteractableKind) -> EntityId {
    let rect = tile_rect(grid, world.config());
    world.spawn(EntityInner::Interactable(InteractableComponents::new(
        kind, rect,
    )))
}

/// Hero standing on `grid` with default hearts.
pub fn spawn_hero(world: &mut World, grid: IVec2) -> EntityId {
    let config = world.config_arc();
    let hero = HeroComponents::new(grid, animator(AnimatedKind::Hero, world), &config);
    world.spawn(EntityInner::Hero(Box::new(hero)))
}

// =============================================================================
// Accessors
// =============================================================================

/// The hero's components.
pub fn hero(world: &World) -> &HeroComponents {
    world.hero().expect("world has a hero")
}

/// The hero's components, mutably.
pub fn hero_mut(world: &mut World) -> &mut HeroComponents {
    world.hero_mut().expect("world has a hero")
}

/// An enemy's components.
pub fn enemy(world: &World, id: EntityId) -> &EnemyComponents {
    world
        .get(id)
        .and_then(|entity| entity.as_enemy())
        .expect("id is an enemy")
}

/// Copy of an entity's body.
pub fn body(world: &World, id: EntityId) -> Body {
    *world
        .get(id)
        .and_then(|entity| entity.body())
        .expect("id has a body")
}

/// An entity's body, mutably. [`run_behavior`] resyncs the spatial index.
pub fn body_mut(world: &mut World, id: EntityId) -> &mut Body {
    world
        .get_mut(id)
        .and_then(|entity| entity.body_mut())
        .expect("id has a body")
}

// =============================================================================
// Running
// =============================================================================

/// Runs one entity's behavior against the rest of `world` and returns what
/// it emitted, without resolving anything.
pub fn run_behavior(world: &mut World, id: EntityId, input: &InputState) -> Vec<Output> {
    let ids: Vec<EntityId> = world.entities().map(|entity| entity.id()).collect();
    for other in ids {
        world.update_spatial(other);
    }

    let mut entity = world.take(id).expect("entity exists");
    let mut outputs = Vec::new();
    {
        let mut ctx = UpdateContext::new(WorldView::new(world), input, &mut outputs);
        behavior::update(&mut entity, &mut ctx);
    }
    world.restore(entity);
    outputs
}
