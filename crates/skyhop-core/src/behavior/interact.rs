//! What happens when the hero presses interact over a door, sign or NPC.

use tracing::info;

use crate::entity::{Entity, HeroComponents};
use crate::level::InteractableKind;
use crate::output::{Command, Event, Message, MessageKind};

use super::UpdateContext;

/// Fires `target` for `hero`.
///
/// - Door: a locked door consumes a matching key from the key chain and
///   unlocks; an unlocked door moves the hero to its destination tile
/// - Sign: opens a sign message
/// - NPC: opens a speech message from that character
///
/// Non-interactable targets are ignored.
pub fn interact(hero: &mut HeroComponents, target: &Entity, ctx: &mut UpdateContext<'_>) {
    let Some(interactable) = target.as_interactable() else {
        return;
    };
    let id = target.id();

    match &interactable.kind {
        InteractableKind::Door { destination, code } => {
            let mut unlocked = interactable.unlocked;
            if let (false, Some(code)) = (unlocked, code) {
                if let Some(slot) = hero.key_chain.iter().position(|key| key == code) {
                    hero.key_chain.remove(slot);
                    unlocked = true;
                    info!(door = %id, code = %code, "door_unlocked");
                    ctx.emit(Command::Unlock { target: id });
                    ctx.emit(Event::DoorUnlocked {
                        door: id,
                        code: code.clone(),
                    });
                }
            }
            if unlocked {
                hero.body.move_to(*destination, ctx.config);
                ctx.emit(Event::DoorEntered {
                    door: id,
                    destination: *destination,
                });
            }
        }
        InteractableKind::Sign { message } => {
            ctx.emit(Event::MessageOpened(Message {
                kind: MessageKind::Sign,
                text: message.clone(),
            }));
        }
        InteractableKind::Npc { npc_type, message } => {
            ctx.emit(Event::MessageOpened(Message {
                kind: MessageKind::Speech {
                    speaker: npc_type.clone(),
                },
                text: message.clone(),
            }));
        }
    }
}
