//! Enemy patrol rules.
//!
//! - Cloud: flies straight, turns at the world edges
//! - Spikeball: full body physics, turns at walls and world edges, removed
//!   once it falls below the world
//! - Spikeman: a spikeball that also turns at ledges and faces its direction
//! - Fish: swims straight without gravity, turns at walls, world edges and
//!   the border of its water

use tracing::debug;

use crate::entity::{EnemyComponents, EntityId};
use crate::geometry::Rect;
use crate::level::EnemyKind;
use crate::output::{Command, Event};

use super::UpdateContext;

/// Runs one frame of an enemy.
pub fn update(id: EntityId, enemy: &mut EnemyComponents, ctx: &mut UpdateContext<'_>) {
    match enemy.kind {
        EnemyKind::Cloud => fly(enemy, ctx),
        EnemyKind::Spikeball => walk(id, enemy, ctx, false),
        EnemyKind::Spikeman => walk(id, enemy, ctx, true),
        EnemyKind::Fish => swim(enemy, ctx),
    }
}

fn fly(enemy: &mut EnemyComponents, ctx: &UpdateContext<'_>) {
    let body = &mut enemy.body;
    body.move_x();
    let edge = body.check_world_edges(&ctx.view);
    enemy.animator.animate("default");
    if edge {
        body.turn_around();
    }
}

fn walk(id: EntityId, enemy: &mut EnemyComponents, ctx: &mut UpdateContext<'_>, ledges: bool) {
    let view = ctx.view;
    let body = &mut enemy.body;

    body.check_water(&view);
    body.apply_gravity(&ctx.config.physics);
    body.move_x();
    let hit_x = body.check_platforms_x(&view);
    body.move_y();
    body.check_platforms_y(&view);
    let edge = body.check_world_edges(&view);
    let fell_out = body.check_world_bottom(&view);

    // Only grounded walkers look for ledges, so a falling one keeps its heading.
    let ledge = ledges && body.on_platform(&view) && body.check_platform_edges(&view);

    let key = match enemy.kind {
        EnemyKind::Spikeman if body.velocity.x > 0 => "walk_right",
        EnemyKind::Spikeman => "walk_left",
        _ => "default",
    };
    enemy.animator.animate(key);

    if edge || hit_x || ledge {
        body.turn_around();
    }

    if fell_out {
        debug!(enemy = %id, kind = ?enemy.kind, "enemy_fell_out");
        ctx.emit(Command::Despawn { target: id });
        ctx.emit(Event::EnemyRemoved { enemy: id });
    }
}

fn swim(enemy: &mut EnemyComponents, ctx: &UpdateContext<'_>) {
    let view = ctx.view;
    let body = &mut enemy.body;

    let was_in_water = body.check_water(&view);
    let before = body.rect;
    body.move_x();
    let hit_x = body.check_platforms_x(&view);
    let edge = body.check_world_edges(&view);

    let mut shore = false;
    if was_in_water && !view.in_fluid(leading_column(body.rect, body.velocity.x)) {
        body.rect = before;
        shore = true;
    }

    let key = if body.velocity.x > 0 {
        "swim_right"
    } else {
        "swim_left"
    };
    enemy.animator.animate(key);

    if hit_x || edge || shore {
        body.turn_around();
    }
}

/// One-pixel column along the edge of `rect` that leads in direction `vx`.
const fn leading_column(rect: Rect, vx: i32) -> Rect {
    let x = if vx > 0 { rect.right() - 1 } else { rect.left() };
    Rect::new(x, rect.y, 1, rect.h)
}
