//! The hero's control state machine.
//!
//! # Frame Order
//!
//! ```text
//! check_water -> leave climbing -> gravity (unless climbing) -> input
//!   -> items -> enemies -> move_x -> push crates -> check_platforms_x
//!   -> move_y -> head bumps -> check_platforms_y -> world edges
//!   -> world bottom -> animate
//! ```
//!
//! Input is applied after gravity, so a jump impulse is the frame's final
//! vertical velocity. Enemy knockback overrides input for the frame it lands.
//!
//! # States
//!
//! | State    | Entered by                                | Left by                         |
//! |----------|-------------------------------------------|---------------------------------|
//! | Grounded | landing on a solid                        | jumping, walking off a ledge    |
//! | Airborne | jumping, falling                          | landing, grabbing a climbable   |
//! | Climbing | up/down while overlapping a climbable     | jumping, leaving all climbables |
//! | Swimming | overlapping a fluid (orthogonal to above) | leaving the fluid               |

use glam::IVec2;
use tracing::info;

use crate::entity::{Entity, EntityId, HeroComponents, PlatformBehavior};
use crate::input::Action;
use crate::level::ItemKind;
use crate::output::{Command, Event};

use super::{interact, UpdateContext};

/// Runs one frame of the hero.
pub fn update(id: EntityId, hero: &mut HeroComponents, ctx: &mut UpdateContext<'_>) {
    let view = ctx.view;

    hero.body.check_water(&view);
    if view.climbables(hero.body.rect).next().is_none() {
        hero.is_climbing = false;
    }
    if !hero.is_climbing {
        hero.body.apply_gravity(&ctx.config.physics);
    }

    act(hero, ctx);
    check_items(hero, ctx);
    check_enemies(id, hero, ctx);

    hero.body.move_x();
    push_crates(hero, ctx);
    hero.body.check_platforms_x(&view);

    hero.body.move_y();
    if hero.body.velocity.y < 0 {
        bump_blocks(hero, ctx);
    }
    hero.body.check_platforms_y(&view);
    hero.body.check_world_edges(&view);
    if hero.body.check_world_bottom(&view) {
        fall_out(id, hero, ctx);
    }

    let key = animation_key(hero, hero.body.on_platform(&view));
    hero.animator.animate(key);
}

/// Applies this frame's input: walking, climbing, jumping and interacting.
fn act(hero: &mut HeroComponents, ctx: &mut UpdateContext<'_>) {
    let view = ctx.view;
    let input = ctx.input;
    let config = ctx.config;
    let tuning = &config.hero;
    let rect = hero.body.rect;

    let horizontal = input.horizontal();
    let speed = if hero.body.in_water {
        tuning.swim_speed
    } else {
        tuning.walk_speed
    };
    hero.body.velocity.x = horizontal * speed;
    if horizontal != 0 {
        hero.facing_right = horizontal > 0;
    }

    let vertical = input.vertical();
    let climbables: Vec<_> = view.climbables(rect).map(Entity::rect).collect();
    if vertical != 0 && !climbables.is_empty() {
        hero.is_climbing = true;
    }
    if hero.is_climbing {
        hero.body.velocity.y = match vertical {
            -1 if climbables.iter().any(|c| c.top() < rect.center_y()) => -tuning.climb_speed,
            1 => tuning.climb_speed,
            _ => 0,
        };
    }

    if input.pressed(Action::Jump) {
        let power = if hero.is_climbing {
            Some(tuning.climb_jump_power)
        } else if hero.body.in_water {
            Some(tuning.water_jump_power)
        } else if hero.body.on_platform(&view) {
            Some(tuning.jump_power)
        } else {
            None
        };
        if let Some(power) = power {
            hero.body.velocity.y = -power;
            hero.is_climbing = false;
        }
    }

    if input.pressed(Action::Interact) {
        let targets: Vec<&Entity> = view.interactables(rect).collect();
        for target in targets {
            interact::interact(hero, target, ctx);
        }
    }
}

/// Picks up every overlapping item.
fn check_items(hero: &mut HeroComponents, ctx: &mut UpdateContext<'_>) {
    let view = ctx.view;
    let config = ctx.config;
    let items = &config.items;

    for entity in view.items(hero.body.rect) {
        let Some(item) = entity.as_item() else {
            continue;
        };
        match &item.kind {
            ItemKind::Gem => ctx.emit(Event::ScoreAdded {
                amount: items.gem_value,
            }),
            ItemKind::Heart => {
                hero.hearts = (hero.hearts + items.heart_value).min(hero.max_hearts);
            }
            ItemKind::Key { code } => hero.key_chain.push(code.clone()),
        }
        ctx.emit(Command::Despawn {
            target: entity.id(),
        });
        ctx.emit(Event::ItemCollected {
            item: entity.id(),
            kind: item.kind.clone(),
        });
    }
}

/// Takes damage from the first overlapping enemy unless still escaping.
fn check_enemies(id: EntityId, hero: &mut HeroComponents, ctx: &mut UpdateContext<'_>) {
    if hero.escape_time > 0 {
        hero.escape_time -= 1;
        return;
    }
    let view = ctx.view;
    let config = ctx.config;
    let rect = hero.body.rect;
    let Some(enemy) = view.enemies(rect).next() else {
        return;
    };
    let tuning = &config.hero;
    let other = enemy.rect();

    hero.hearts = hero.hearts.saturating_sub(1);
    hero.escape_time = tuning.escape_time;
    hero.is_climbing = false;
    hero.body.velocity = IVec2::new(
        if rect.center_x() < other.center_x() {
            -tuning.knockback.x
        } else {
            tuning.knockback.x
        },
        if rect.center_y() <= other.center_y() {
            -tuning.knockback.y
        } else {
            tuning.knockback.y
        },
    );

    info!(hero = %id, enemy = %enemy.id(), hearts = hero.hearts, "hero_hurt");
    ctx.emit(Event::HeroHurt {
        enemy: enemy.id(),
        hearts: hero.hearts,
    });
}

/// Hands the hero's horizontal velocity to the crates it walks into.
fn push_crates(hero: &HeroComponents, ctx: &mut UpdateContext<'_>) {
    let vx = hero.body.velocity.x;
    if vx == 0 {
        return;
    }
    let view = ctx.view;
    let rect = hero.body.rect;
    let probe = if vx > 0 {
        rect.widened(0, 1)
    } else {
        rect.widened(1, 0)
    };

    let mut chain: Vec<EntityId> = Vec::new();
    for touched in view.crates(probe) {
        let ahead = if vx > 0 {
            touched.rect().center_x() >= rect.center_x()
        } else {
            touched.rect().center_x() <= rect.center_x()
        };
        if !ahead {
            continue;
        }
        for id in view.connected_crates(touched.id(), vx.signum()) {
            if !chain.contains(&id) {
                chain.push(id);
            }
        }
    }

    if !chain.is_empty() {
        ctx.emit(Command::Push { crates: chain, vx });
    }
}

/// Breaks or activates the blocks the hero's head runs into.
fn bump_blocks(hero: &HeroComponents, ctx: &mut UpdateContext<'_>) {
    let view = ctx.view;
    for solid in view.solids(hero.body.rect) {
        let Some(platform) = solid.as_platform() else {
            continue;
        };
        let block = solid.id();
        match &platform.behavior {
            PlatformBehavior::Breakable => {
                ctx.emit(Command::Despawn { target: block });
                ctx.emit(Event::BlockBroken { block });
            }
            PlatformBehavior::ItemBlock { item: Some(item) } => {
                ctx.emit(Command::ReleaseItem { block });
                ctx.emit(Event::BlockActivated {
                    block,
                    item: item.clone(),
                });
            }
            _ => {}
        }
    }
}

/// Loses a heart for falling out of the world; respawns if still alive.
fn fall_out(id: EntityId, hero: &mut HeroComponents, ctx: &mut UpdateContext<'_>) {
    hero.hearts = hero.hearts.saturating_sub(1);
    let respawned = hero.is_alive();
    if respawned {
        hero.body.move_to(hero.respawn_point, ctx.config);
        hero.body.velocity = IVec2::ZERO;
        hero.is_climbing = false;
    }
    info!(hero = %id, hearts = hero.hearts, respawned, "hero_fell_out");
    ctx.emit(Event::HeroFell {
        hearts: hero.hearts,
        respawned,
    });
}

fn animation_key(hero: &HeroComponents, on_platform: bool) -> &'static str {
    if hero.is_climbing {
        return "climb";
    }
    let moving = hero.body.velocity.x != 0;
    match (on_platform, moving, hero.facing_right) {
        (false, _, true) => "jump_right",
        (false, _, false) => "jump_left",
        (true, true, true) => "walk_right",
        (true, true, false) => "walk_left",
        (true, false, true) => "idle_right",
        (true, false, false) => "idle_left",
    }
}
