//! The frame driver.
//!
//! `Simulation` advances a [`World`] one frame per [`Simulation::step`]:
//!
//! 1. **STATUS**: a paused, interacting or finished level only handles its
//!    own inputs (unpause, dismiss) and leaves the world untouched
//! 2. **UPDATE**: every entity group runs in [`EntityTag::UPDATE_ORDER`];
//!    each entity is taken out of the world, updated against a view of the
//!    rest, put back, and its outputs are resolved immediately
//! 3. **EVALUATE**: hero death, goal reach, and newly opened messages decide
//!    the next [`LevelStatus`]
//!
//! # Determinism
//!
//! Entities update in id order within a group (crates leading-edge first),
//! physics is integer-only, and outputs resolve in emission order. The same
//! level and input sequence always produce the same frames.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glam::IVec2;
//! use skyhop_core::animation::AnimationLibrary;
//! use skyhop_core::config::SimConfig;
//! use skyhop_core::input::InputState;
//! use skyhop_core::level::{LevelData, PlatformKind};
//! use skyhop_core::output::NoHooks;
//! use skyhop_core::simulation::{LevelStatus, Simulation};
//!
//! let level = LevelData::new(20, 10, IVec2::new(2, 8)).with_floor(9, 0, 19, &PlatformKind::Grass);
//! let mut sim = Simulation::load(&level, Arc::new(SimConfig::default()), &AnimationLibrary::placeholder())
//!     .unwrap();
//!
//! for _ in 0..10 {
//!     assert_eq!(sim.step(&InputState::idle(), &mut NoHooks), LevelStatus::Playing);
//! }
//! assert_eq!(sim.frame(), 10);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::animation::AnimationLibrary;
use crate::behavior::{self, pushable, UpdateContext};
use crate::config::SimConfig;
use crate::entity::{Entity, EntityId, EntityTag, HeroProgress};
use crate::error::LevelError;
use crate::input::{Action, InputState};
use crate::level::LevelData;
use crate::output::{Event, GameHooks, Message, Output};
use crate::resolver::{self, Resolver};
use crate::world::World;
use crate::world_view::WorldView;

// =============================================================================
// Level Status
// =============================================================================

/// Where the level stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelStatus {
    /// Entities update every frame
    Playing,
    /// Frozen until `Pause` is pressed again
    Paused,
    /// Frozen until the open message is dismissed
    Interacting,
    /// The hero reached a goal
    Complete,
    /// The hero ran out of hearts
    Lost,
}

impl LevelStatus {
    /// Returns true once the level can no longer change.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Complete | Self::Lost)
    }
}

impl fmt::Display for LevelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Interacting => "interacting",
            Self::Complete => "complete",
            Self::Lost => "lost",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Drives one loaded level.
pub struct Simulation {
    /// The level's entities.
    world: World,
    /// Resolvers applied to each entity's outputs, in order.
    resolvers: Vec<Box<dyn Resolver>>,
    /// Status after the last step.
    status: LevelStatus,
    /// Frames in which entities were updated.
    frame: u64,
    /// Message currently shown, while interacting.
    message: Option<Message>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("world", &self.world)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("status", &self.status)
            .field("frame", &self.frame)
            .field("message", &self.message)
            .finish()
    }
}

impl Simulation {
    /// Wraps an already built world with the default resolvers.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world,
            resolvers: resolver::default_resolvers(),
            status: LevelStatus::Playing,
            frame: 0,
            message: None,
        }
    }

    /// Builds the world for `level` and wraps it.
    ///
    /// # Errors
    ///
    /// Propagates [`World::load`] failures.
    pub fn load(
        level: &LevelData,
        config: Arc<SimConfig>,
        animations: &AnimationLibrary,
    ) -> Result<Self, LevelError> {
        World::load(level, config, animations).map(Self::new)
    }

    /// Builds the next level's world around a hero carrying `progress`.
    ///
    /// # Errors
    ///
    /// Propagates [`World::load_resuming`] failures.
    pub fn load_resuming(
        level: &LevelData,
        config: Arc<SimConfig>,
        animations: &AnimationLibrary,
        progress: HeroProgress,
    ) -> Result<Self, LevelError> {
        World::load_resuming(level, config, animations, Some(progress)).map(Self::new)
    }

    /// Advances one frame.
    ///
    /// # Arguments
    ///
    /// * `input` - Controls held and actions pressed this frame
    /// * `hooks` - The game driver's callbacks
    ///
    /// # Returns
    ///
    /// The status after the frame.
    pub fn step(&mut self, input: &InputState, hooks: &mut dyn GameHooks) -> LevelStatus {
        match self.status {
            LevelStatus::Complete | LevelStatus::Lost => return self.status,
            LevelStatus::Paused => {
                if input.pressed(Action::Pause) {
                    self.set_status(LevelStatus::Playing);
                }
                return self.status;
            }
            LevelStatus::Interacting => {
                if input.pressed(Action::Dismiss) {
                    self.message = None;
                    hooks.close_message();
                    self.set_status(LevelStatus::Playing);
                }
                return self.status;
            }
            LevelStatus::Playing => {}
        }

        if input.pressed(Action::Pause) {
            self.set_status(LevelStatus::Paused);
            return self.status;
        }

        let opened = self.update_groups(input, hooks);
        self.frame += 1;

        let next = self.evaluate(opened, hooks);
        self.set_status(next);
        self.status
    }

    /// Runs every group once; returns the last message opened, if any.
    fn update_groups(&mut self, input: &InputState, hooks: &mut dyn GameHooks) -> Option<Message> {
        let mut opened = None;
        for tag in EntityTag::UPDATE_ORDER {
            let mut ids = self.world.ids_with_tag(tag);
            if tag == EntityTag::Crate {
                let world = &self.world;
                ids.sort_by_cached_key(|id| {
                    world
                        .get(*id)
                        .and_then(Entity::as_crate)
                        .map_or(0, pushable::leading_edge_key)
                });
            }
            for id in ids {
                if let Some(message) = self.update_entity(id, input, hooks) {
                    opened = Some(message);
                }
            }
        }
        opened
    }

    /// Updates one entity and resolves its outputs.
    ///
    /// Ids removed earlier in the frame are skipped.
    fn update_entity(
        &mut self,
        id: EntityId,
        input: &InputState,
        hooks: &mut dyn GameHooks,
    ) -> Option<Message> {
        let mut entity = self.world.take(id)?;
        let mut outputs = Vec::new();
        {
            let view = WorldView::new(&self.world);
            let mut ctx = UpdateContext::new(view, input, &mut outputs);
            behavior::update(&mut entity, &mut ctx);
        }
        self.world.restore(entity);

        resolver::route(&self.resolvers, &outputs, &mut self.world, hooks);

        outputs.into_iter().rev().find_map(|output| match output {
            Output::Event(Event::MessageOpened(message)) => Some(message),
            _ => None,
        })
    }

    fn evaluate(&mut self, opened: Option<Message>, hooks: &mut dyn GameHooks) -> LevelStatus {
        let Some(hero) = self.world.hero() else {
            return LevelStatus::Playing;
        };
        if !hero.is_alive() {
            hooks.lose();
            return LevelStatus::Lost;
        }
        if WorldView::new(&self.world).reaches_goal(hero.body.rect) {
            hooks.level_complete();
            return LevelStatus::Complete;
        }
        if let Some(message) = opened {
            self.message = Some(message);
            return LevelStatus::Interacting;
        }
        LevelStatus::Playing
    }

    fn set_status(&mut self, status: LevelStatus) {
        if status != self.status {
            info!(from = %self.status, to = %status, frame = self.frame, "status_changed");
            self.status = status;
        }
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably (for setup and tests).
    #[must_use]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Status after the last step.
    #[must_use]
    pub const fn status(&self) -> LevelStatus {
        self.status
    }

    /// Frames in which entities were updated.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// The message being shown, while interacting.
    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Adds a resolver after the existing ones.
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        debug!(count = self.resolvers.len() + 1, "resolver_added");
        self.resolvers.push(resolver);
    }

    /// Number of registered resolvers.
    #[must_use]
    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }
}
