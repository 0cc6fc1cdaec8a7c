//! Moving platforms.
//!
//! A moving platform patrols horizontally within `range` pixels of its spawn
//! position. Anything standing on it when the frame starts is carried by the
//! distance the platform actually moved; a body it runs into from the side
//! stops it and turns it around, like a solid would. Static, breakable and
//! item-block platforms have no per-frame work; the hero's head bump drives
//! the latter two.

use crate::entity::{Body, Entity, EntityId, EntityTag, PlatformBehavior, PlatformComponents};
use crate::geometry::Rect;
use crate::output::Command;
use crate::world_view::WorldView;

use super::UpdateContext;

/// Bodies a moving platform carries or stops against.
const RIDERS: &[EntityTag] = &[EntityTag::Hero, EntityTag::Crate, EntityTag::Enemy];

/// Runs one frame of a platform.
pub fn update(_id: EntityId, platform: &mut PlatformComponents, ctx: &mut UpdateContext<'_>) {
    let PlatformBehavior::Moving { origin_x, range } = platform.behavior else {
        return;
    };
    let view = ctx.view;
    let body = &mut platform.body;

    let rect = body.rect;
    let riders: Vec<EntityId> = view
        .overlapping(Rect::new(rect.x, rect.top() - 1, rect.w, 1), RIDERS)
        .map(Entity::id)
        .collect();

    body.move_x();
    let hit = body.check_platforms_x(&view);
    let bumped = check_bodies_x(body, &riders, &view);
    let edge = body.check_world_edges(&view);

    let offset = body.rect.x - origin_x;
    if offset >= range {
        body.rect.x = origin_x + range;
        body.velocity.x = -body.velocity.x.abs();
    } else if offset <= -range {
        body.rect.x = origin_x - range;
        body.velocity.x = body.velocity.x.abs();
    } else if hit || bumped || edge {
        body.turn_around();
    }

    let dx = body.rect.x - rect.x;
    if dx != 0 {
        for target in riders {
            ctx.emit(Command::Carry { target, dx });
        }
    }
}

/// Snaps the platform back off bodies it slid into from the side.
fn check_bodies_x(body: &mut Body, riders: &[EntityId], view: &WorldView<'_>) -> bool {
    let hits: Vec<Rect> = view
        .overlapping(body.rect, RIDERS)
        .filter(|entity| !riders.contains(&entity.id()))
        .map(Entity::rect)
        .collect();
    body.snap_x(&hits, body.velocity.x);
    !hits.is_empty()
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::input::InputState;
    use crate::output::Output;
    use crate::tests::{
        body, run_behavior, spawn_crate, spawn_hero, spawn_moving_platform, test_world,
    };

    #[test]
    fn patrols_within_range() {
        let mut world = test_world(20, 10);
        let id = spawn_moving_platform(&mut world, IVec2::new(10, 5), 1);
        let origin = body(&world, id).rect.x;

        let mut xs = Vec::new();
        for _ in 0..120 {
            run_behavior(&mut world, id, &InputState::idle());
            xs.push(body(&world, id).rect.x);
        }

        assert!(xs.iter().all(|x| (x - origin).abs() <= 64));
        assert!(xs.contains(&(origin + 64)));
        assert!(xs.contains(&(origin - 64)));
    }

    #[test]
    fn turns_at_solids() {
        let mut world = test_world(20, 10);
        let id = spawn_moving_platform(&mut world, IVec2::new(10, 5), 3);
        spawn_crate(&mut world, IVec2::new(11, 5));

        run_behavior(&mut world, id, &InputState::idle());

        let b = body(&world, id);
        assert_eq!(b.rect.right(), 11 * 64);
        assert!(b.velocity.x < 0);
    }

    #[test]
    fn turns_at_a_hero_beside_it() {
        let mut world = test_world(20, 10);
        let id = spawn_moving_platform(&mut world, IVec2::new(10, 5), 3);
        let hero = spawn_hero(&mut world, IVec2::new(11, 5));

        let outputs = run_behavior(&mut world, id, &InputState::idle());

        let b = body(&world, id);
        assert_eq!(b.rect.right(), 11 * 64);
        assert!(b.velocity.x < 0);
        assert!(outputs.is_empty());
        assert_eq!(body(&world, hero).rect.left(), 11 * 64);
    }

    #[test]
    fn carries_riders_by_actual_displacement() {
        let mut world = test_world(20, 10);
        let id = spawn_moving_platform(&mut world, IVec2::new(10, 5), 3);
        let rider = spawn_crate(&mut world, IVec2::new(10, 4));

        let outputs = run_behavior(&mut world, id, &InputState::idle());

        assert_eq!(
            outputs,
            vec![Output::Command(Command::Carry {
                target: rider,
                dx: 2
            })]
        );
    }

    #[test]
    fn static_platforms_do_nothing() {
        let mut world = test_world(20, 10);
        let id = crate::tests::spawn_platform(&mut world, IVec2::new(3, 3));
        spawn_crate(&mut world, IVec2::new(3, 2));
        let outputs = run_behavior(&mut world, id, &InputState::idle());
        assert!(outputs.is_empty());
    }
}
