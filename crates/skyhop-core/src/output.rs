//! Output system: how behaviors change anything beyond their own entity.
//!
//! A behavior mutates its own components directly. Everything else is a
//! proposal pushed into the frame's output buffer:
//! - [`Command`]: a structural change to the world (despawn, push, unlock)
//! - [`Event`]: a notification for the game driver (score, hero hurt, message)
//!
//! The frame driver resolves the outputs of each entity right after that
//! entity's update, through the resolvers in [`crate::resolver`]. Commands
//! become world mutations; events are forwarded to the driver's
//! [`GameHooks`].
//!
//! # Example
//!
//! ```
//! use skyhop_core::entity::EntityId;
//! use skyhop_core::output::{Command, Event, Output, OutputKind};
//!
//! let outputs = vec![
//!     Output::Command(Command::Despawn { target: EntityId::new(4) }),
//!     Output::Event(Event::ScoreAdded { amount: 10 }),
//! ];
//!
//! assert_eq!(outputs[0].kind(), OutputKind::Command);
//! assert_eq!(outputs[1].kind(), OutputKind::Event);
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;
use crate::level::ItemKind;

// =============================================================================
// Output Categories
// =============================================================================

/// Structural world changes requested by a behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Remove an entity (item pickup, enemy off the world, broken block).
    Despawn {
        /// Entity to remove
        target: EntityId,
    },
    /// Give a crate chain the pusher's horizontal velocity for this frame.
    Push {
        /// Crates in the chain, starting with the one touched
        crates: Vec<EntityId>,
        /// Pusher's horizontal velocity
        vx: i32,
    },
    /// Move a rider standing on a moving platform.
    Carry {
        /// Rider
        target: EntityId,
        /// Horizontal displacement
        dx: i32,
    },
    /// Mark a locked door as open.
    Unlock {
        /// Door
        target: EntityId,
    },
    /// Release the item stored in an item block.
    ReleaseItem {
        /// Item block
        block: EntityId,
    },
}

impl Command {
    /// Returns the entity this command acts on, if it targets exactly one.
    #[must_use]
    pub const fn target(&self) -> Option<EntityId> {
        match self {
            Self::Despawn { target } | Self::Carry { target, .. } | Self::Unlock { target } => {
                Some(*target)
            }
            Self::ReleaseItem { block } => Some(*block),
            Self::Push { .. } => None,
        }
    }
}

/// Kind of modal message box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageKind {
    /// Text on a sign
    Sign,
    /// Speech bubble from a character
    Speech {
        /// Character type that speaks
        speaker: String,
    },
}

/// A modal message requested by an interactable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Presentation style
    #[serde(flatten)]
    pub kind: MessageKind,
    /// Text to show
    pub text: String,
}

/// Notifications of things that happened during a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Score changed.
    ScoreAdded {
        /// Points added
        amount: u32,
    },
    /// The hero picked up an item.
    ItemCollected {
        /// Item entity (already removed)
        item: EntityId,
        /// What it was
        kind: ItemKind,
    },
    /// The hero took damage from an enemy.
    HeroHurt {
        /// Enemy touched
        enemy: EntityId,
        /// Hearts left
        hearts: u32,
    },
    /// The hero fell below the world.
    HeroFell {
        /// Hearts left
        hearts: u32,
        /// Whether the hero was sent back to the respawn point
        respawned: bool,
    },
    /// An enemy left the world for good.
    EnemyRemoved {
        /// Enemy entity
        enemy: EntityId,
    },
    /// A locked door was opened with a key.
    DoorUnlocked {
        /// Door entity
        door: EntityId,
        /// Key code consumed
        code: String,
    },
    /// The hero went through a door.
    DoorEntered {
        /// Door entity
        door: EntityId,
        /// Grid destination
        destination: IVec2,
    },
    /// An interactable asked for a message box.
    MessageOpened(Message),
    /// A breakable platform was destroyed.
    BlockBroken {
        /// Platform entity
        block: EntityId,
    },
    /// An item block was bumped and released its item.
    BlockActivated {
        /// Block entity
        block: EntityId,
        /// Item released above it
        item: ItemKind,
    },
}

/// Top-level output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    /// World mutation
    Command(Command),
    /// Driver notification
    Event(Event),
}

/// Output category used to route outputs to resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// [`Output::Command`]
    Command,
    /// [`Output::Event`]
    Event,
}

impl Output {
    /// Returns this output's category.
    #[must_use]
    pub const fn kind(&self) -> OutputKind {
        match self {
            Self::Command(_) => OutputKind::Command,
            Self::Event(_) => OutputKind::Event,
        }
    }
}

impl From<Command> for Output {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<Event> for Output {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

// =============================================================================
// Game Hooks
// =============================================================================

/// Callbacks into the game driver that owns scenes, score and overlays.
///
/// All methods default to no-ops, so a driver only implements what it uses.
pub trait GameHooks {
    /// Adds to the running score.
    fn add_score(&mut self, _amount: u32) {}

    /// Shows a modal message; the simulation freezes until it is dismissed.
    fn open_message(&mut self, _message: &Message) {}

    /// Hides the modal message.
    fn close_message(&mut self) {}

    /// The hero reached a goal.
    fn level_complete(&mut self) {}

    /// The hero ran out of hearts.
    fn lose(&mut self) {}

    /// Observes every gameplay event, including the ones above.
    fn on_event(&mut self, _event: &Event) {}
}

/// Hooks that ignore everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl GameHooks for NoHooks {}

/// Hooks that record every callback, for tests and headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingHooks {
    /// Accumulated score
    pub score: u32,
    /// Messages opened, in order
    pub messages: Vec<Message>,
    /// Number of messages closed
    pub closed: u32,
    /// Number of level completions reported
    pub completed: u32,
    /// Number of losses reported
    pub lost: u32,
    /// Every event observed
    pub events: Vec<Event>,
}

impl RecordingHooks {
    /// Creates empty hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many recorded events satisfy `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}

impl GameHooks for RecordingHooks {
    fn add_score(&mut self, amount: u32) {
        self.score += amount;
    }

    fn open_message(&mut self, message: &Message) {
        self.messages.push(message.clone());
    }

    fn close_message(&mut self) {
        self.closed += 1;
    }

    fn level_complete(&mut self) {
        self.completed += 1;
    }

    fn lose(&mut self) {
        self.lost += 1;
    }

    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
