//! Hook resolver: forwards gameplay events to the game driver.
//!
//! Unlike the command resolver, it never mutates the world. Score and message
//! events map onto their dedicated [`GameHooks`] callbacks; every event is also
//! passed to [`GameHooks::on_event`].

use tracing::debug;

use crate::output::{Event, GameHooks, Output, OutputKind};
use crate::world::World;

use super::Resolver;

/// Resolver for [`Event`] outputs.
///
/// # Example
///
/// ```
/// use skyhop_core::output::OutputKind;
/// use skyhop_core::resolver::{HookResolver, Resolver};
///
/// let resolver = HookResolver::new();
/// assert!(resolver.handles().contains(&OutputKind::Event));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HookResolver;

impl HookResolver {
    /// Creates a new hook resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for HookResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Event]
    }

    fn resolve(&self, outputs: &[&Output], _world: &mut World, hooks: &mut dyn GameHooks) {
        for output in outputs {
            let Output::Event(event) = output else {
                continue;
            };
            match event {
                Event::ScoreAdded { amount } => hooks.add_score(*amount),
                Event::MessageOpened(message) => {
                    debug!(text = %message.text, "message_opened");
                    hooks.open_message(message);
                }
                _ => {}
            }
            hooks.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::SimConfig;
    use crate::entity::EntityId;
    use crate::output::{Command, Message, MessageKind, RecordingHooks};

    #[test]
    fn forwards_score_and_messages() {
        let mut world = World::new(64, 64, Arc::new(SimConfig::default()));
        let mut hooks = RecordingHooks::new();
        let message = Message {
            kind: MessageKind::Speech {
                speaker: "wizard".to_string(),
            },
            text: "Hello".to_string(),
        };
        let outputs = [
            Output::Event(Event::ScoreAdded { amount: 10 }),
            Output::Event(Event::MessageOpened(message.clone())),
            Output::Event(Event::EnemyRemoved {
                enemy: EntityId::new(3),
            }),
        ];
        let routed: Vec<&Output> = outputs.iter().collect();

        HookResolver::new().resolve(&routed, &mut world, &mut hooks);

        assert_eq!(hooks.score, 10);
        assert_eq!(hooks.messages, vec![message]);
        assert_eq!(hooks.events.len(), 3);
    }

    #[test]
    fn ignores_commands() {
        let mut world = World::new(64, 64, Arc::new(SimConfig::default()));
        let mut hooks = RecordingHooks::new();
        let output = Output::Command(Command::Despawn {
            target: EntityId::new(1),
        });

        HookResolver::new().resolve(&[&output], &mut world, &mut hooks);
        assert!(hooks.events.is_empty());
    }
}
