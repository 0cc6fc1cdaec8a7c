//! Command resolver for structural world changes.
//!
//! The `CommandResolver` handles:
//! - `Despawn`: remove an entity
//! - `Push`: hand a crate chain the pusher's velocity for this frame
//! - `Carry`: displace a rider standing on a moving platform
//! - `Unlock`: open a locked door
//! - `ReleaseItem`: spawn an item block's item one tile above it

use tracing::{debug, trace};

use crate::entity::{Entity, EntityId, PlatformBehavior};
use crate::output::{Command, GameHooks, Output, OutputKind};
use crate::world::World;
use crate::world_view::WorldView;

use super::Resolver;

/// Resolver for [`Command`] outputs.
///
/// Commands are applied in output order against the live world, so a later
/// command sees the effect of an earlier one.
///
/// # Example
///
/// ```
/// use skyhop_core::output::OutputKind;
/// use skyhop_core::resolver::{CommandResolver, Resolver};
///
/// let resolver = CommandResolver::new();
/// assert_eq!(resolver.handles(), &[OutputKind::Command]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandResolver;

impl CommandResolver {
    /// Creates a new command resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn push(world: &mut World, crates: &[EntityId], vx: i32) {
        for &id in crates {
            if let Some(crate_) = world.get_mut(id).and_then(Entity::as_crate_mut) {
                crate_.body.velocity.x = vx;
                crate_.pushed = true;
            }
        }
        trace!(crates = crates.len(), vx, "crates_pushed");
    }

    fn carry(world: &mut World, target: EntityId, dx: i32) {
        let Some(mut rider) = world.take(target) else {
            return;
        };
        if let Some(body) = rider.body_mut() {
            body.shift_x(dx, &WorldView::new(world));
        }
        world.restore(rider);
    }

    fn unlock(world: &mut World, target: EntityId) {
        if let Some(door) = world.get_mut(target).and_then(Entity::as_interactable_mut) {
            door.unlocked = true;
            debug!(door = %target, "door_unlocked");
        }
    }

    fn release_item(world: &mut World, block: EntityId) {
        let tile = world.config().tile_size;
        let Some(platform) = world.get_mut(block).and_then(Entity::as_platform_mut) else {
            return;
        };
        let PlatformBehavior::ItemBlock { item } = &mut platform.behavior else {
            return;
        };
        let Some(kind) = item.take() else {
            return;
        };
        let rect = platform.body.rect.translated(0, -tile);
        let item = world.spawn_item(kind, rect);
        debug!(block = %block, item = %item, "item_released");
    }
}

impl Resolver for CommandResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Command]
    }

    fn resolve(&self, outputs: &[&Output], world: &mut World, _hooks: &mut dyn GameHooks) {
        for output in outputs {
            let Output::Command(command) = output else {
                continue;
            };
            if let Some(target) = command.target() {
                if world.get(target).is_none() {
                    trace!(target = %target, "command_target_gone");
                    continue;
                }
            }
            match command {
                Command::Despawn { target } => {
                    world.despawn(*target);
                }
                Command::Push { crates, vx } => Self::push(world, crates, *vx),
                Command::Carry { target, dx } => Self::carry(world, *target, *dx),
                Command::Unlock { target } => Self::unlock(world, *target),
                Command::ReleaseItem { block } => Self::release_item(world, *block),
            }
        }
    }
}
