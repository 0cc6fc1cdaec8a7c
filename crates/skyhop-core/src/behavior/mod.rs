//! Per-variant update logic.
//!
//! Each behavior composes the [`physics`](crate::physics) primitives in the
//! fixed order of the body contract and decides its animation key. Behaviors
//! mutate only the entity they are given; anything touching another entity
//! is emitted as an [`Output`] through the [`UpdateContext`].
//!
//! | Group     | Module         | Per-frame work                               |
//! |-----------|----------------|----------------------------------------------|
//! | Platform  | [`platform`]   | moving platforms patrol and carry riders     |
//! | Hero      | [`hero`]       | input, damage, pickups, pushing, head bumps  |
//! | Crate     | [`pushable`]   | gravity, collision, push velocity            |
//! | Enemy     | [`enemy`]      | patrol and turnaround rules per kind         |
//! | Goal      | [`goal`]       | flag animation                               |
//!
//! Interactables have no per-frame work of their own; the hero fires them
//! through [`interact`].

pub mod enemy;
pub mod goal;
pub mod hero;
pub mod interact;
pub mod platform;
pub mod pushable;

use crate::config::SimConfig;
use crate::entity::{Entity, EntityInner};
use crate::input::InputState;
use crate::output::Output;
use crate::world_view::WorldView;

/// Everything a behavior sees besides its own entity.
#[derive(Debug)]
pub struct UpdateContext<'a> {
    /// The rest of the world
    pub view: WorldView<'a>,
    /// Shared constants
    pub config: &'a SimConfig,
    /// This frame's input
    pub input: &'a InputState,
    /// Output buffer for this entity's update
    pub outputs: &'a mut Vec<Output>,
}

impl<'a> UpdateContext<'a> {
    /// Creates a context over `view` writing into `outputs`.
    #[must_use]
    pub fn new(view: WorldView<'a>, input: &'a InputState, outputs: &'a mut Vec<Output>) -> Self {
        Self {
            view,
            config: view.config(),
            input,
            outputs,
        }
    }

    /// Queues an output for resolution after this update.
    pub fn emit(&mut self, output: impl Into<Output>) {
        self.outputs.push(output.into());
    }
}

/// Runs one frame of `entity`'s behavior.
///
/// Variants without per-frame behavior are left untouched.
pub fn update(entity: &mut Entity, ctx: &mut UpdateContext<'_>) {
    let id = entity.id();
    match entity.inner_mut() {
        EntityInner::Hero(hero) => hero::update(id, hero, ctx),
        EntityInner::Platform(platform) => platform::update(id, platform, ctx),
        EntityInner::Crate(crate_) => pushable::update(id, crate_, ctx),
        EntityInner::Enemy(enemy) => enemy::update(id, enemy, ctx),
        EntityInner::Goal(goal) => goal::update(goal),
        EntityInner::Climbable(_)
        | EntityInner::Fluid(_)
        | EntityInner::Item(_)
        | EntityInner::Interactable(_) => {}
    }
}
