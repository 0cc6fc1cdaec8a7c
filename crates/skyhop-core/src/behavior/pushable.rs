//! Crates: solid bodies that only slide while something pushes them.
//!
//! A push (see [`Command::Push`]) hands every crate in a connected chain the
//! pusher's horizontal velocity and marks it `pushed` for the current frame.
//! The crate's own update integrates that velocity once and clears the mark,
//! so a chain stops in the first frame nobody pushes it.

use tracing::debug;

use crate::entity::{CrateComponents, EntityId};
use crate::output::Command;

use super::UpdateContext;

/// Runs one frame of a crate.
pub fn update(id: EntityId, crate_: &mut CrateComponents, ctx: &mut UpdateContext<'_>) {
    let view = ctx.view;
    let body = &mut crate_.body;

    body.check_water(&view);
    body.apply_gravity(&ctx.config.physics);
    if !crate_.pushed {
        body.velocity.x = 0;
    }
    body.move_x();
    let hit_x = body.check_platforms_x(&view);
    body.move_y();
    body.check_platforms_y(&view);
    let edge = body.check_world_edges(&view);
    if hit_x || edge {
        body.velocity.x = 0;
    }
    crate_.pushed = false;

    if body.check_world_bottom(&view) {
        debug!(crate_id = %id, "crate_fell_out");
        ctx.emit(Command::Despawn { target: id });
    }
}

/// Update order key: crates leading in their travel direction come first.
#[must_use]
pub fn leading_edge_key(crate_: &CrateComponents) -> i32 {
    let rect = crate_.body.rect;
    match crate_.body.velocity.x.signum() {
        1 => -rect.right(),
        -1 => rect.left(),
        _ => 0,
    }
}
