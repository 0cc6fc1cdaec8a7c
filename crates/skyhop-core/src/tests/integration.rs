//! End-to-end frames through [`Simulation`].

use std::sync::Arc;

use glam::IVec2;

use crate::animation::AnimationLibrary;
use crate::config::SimConfig;
use crate::entity::{EntityId, EntityTag};
use crate::input::{Action, Controls, InputState};
use crate::level::{
    EnemyKind, InteractableKind, ItemKind, LevelData, Placement, PlatformKind,
};
use crate::output::{Event, MessageKind, RecordingHooks};
use crate::simulation::{LevelStatus, Simulation};
use crate::world_view::WorldView;

// =============================================================================
// Setup
// =============================================================================

fn grass_level(width: i32, start: IVec2) -> LevelData {
    LevelData::new(width, 10, start).with_floor(9, 0, width - 1, &PlatformKind::Grass)
}

fn load(level: &LevelData) -> Simulation {
    Simulation::load(
        level,
        Arc::new(SimConfig::default()),
        &AnimationLibrary::placeholder(),
    )
    .unwrap()
}

fn run(sim: &mut Simulation, input: &InputState, frames: usize, hooks: &mut RecordingHooks) {
    for _ in 0..frames {
        sim.step(input, hooks);
    }
}

fn ids(sim: &Simulation, tag: EntityTag) -> Vec<EntityId> {
    sim.world().ids_with_tag(tag)
}

fn left(sim: &Simulation, id: EntityId) -> i32 {
    sim.world().get(id).unwrap().rect().left()
}

// =============================================================================
// Falling Out
// =============================================================================

mod fall_tests {
    use super::*;

    fn dropped_below_world(hearts: u32) -> (Simulation, RecordingHooks, LevelStatus) {
        let mut sim = load(&grass_level(20, IVec2::new(5, 8)));
        {
            let hero = sim.world_mut().hero_mut().unwrap();
            hero.hearts = hearts;
            hero.body.rect.y = 10 * 64;
        }
        let mut hooks = RecordingHooks::new();
        let status = sim.step(&InputState::idle(), &mut hooks);
        (sim, hooks, status)
    }

    #[test]
    fn last_heart_is_lost_and_level_ends() {
        let (sim, hooks, status) = dropped_below_world(1);

        assert_eq!(status, LevelStatus::Lost);
        let hero = sim.world().hero().unwrap();
        assert_eq!(hero.hearts, 0);
        assert!(!hero.is_alive());
        assert_eq!(hooks.lost, 1);
        assert!(hooks.events.contains(&Event::HeroFell {
            hearts: 0,
            respawned: false
        }));
    }

    #[test]
    fn spare_heart_respawns_at_start() {
        let (sim, hooks, status) = dropped_below_world(2);

        assert_eq!(status, LevelStatus::Playing);
        let hero = sim.world().hero().unwrap();
        assert_eq!(hero.hearts, 1);
        assert!(hero.is_alive());
        assert_eq!(hero.body.rect.position(), IVec2::new(5 * 64, 8 * 64));
        assert_eq!(hero.body.velocity, IVec2::ZERO);
        assert_eq!(hooks.lost, 0);
    }
}

// =============================================================================
// Enemies
// =============================================================================

mod enemy_tests {
    use super::*;

    #[test]
    fn contact_costs_one_heart_then_grace_period() {
        let mut lvl = grass_level(20, IVec2::new(5, 8));
        lvl.enemies
            .push(Placement::new(IVec2::new(6, 8), EnemyKind::Cloud));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        let escape = sim.world().config().hero.escape_time;

        // The cloud drifts into the hero at the end of the first frame.
        sim.step(&InputState::idle(), &mut hooks);
        assert_eq!(sim.world().hero().unwrap().hearts, 3);

        sim.step(&InputState::idle(), &mut hooks);
        let hero = sim.world().hero().unwrap();
        assert_eq!(hero.hearts, 2);
        assert_eq!(hero.escape_time, escape);
        assert!(hero.body.velocity.x < 0, "pushed left, away from the cloud");
        assert!(hero.body.velocity.y < 0, "pushed up");

        sim.step(&InputState::idle(), &mut hooks);
        let hero = sim.world().hero().unwrap();
        assert_eq!(hero.hearts, 2);
        assert_eq!(hero.escape_time, escape - 1);
        assert_eq!(hooks.count(|e| matches!(e, Event::HeroHurt { .. })), 1);
    }

    #[test]
    fn enemy_removed_mid_frame_does_not_skip_the_others() {
        let mut lvl = LevelData::new(20, 10, IVec2::new(1, 8)).with_floor(
            9,
            0,
            9,
            &PlatformKind::Grass,
        );
        lvl.enemies
            .push(Placement::new(IVec2::new(15, 8), EnemyKind::Spikeball));
        lvl.enemies
            .push(Placement::new(IVec2::new(5, 8), EnemyKind::Spikeball));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        let survivor = ids(&sim, EntityTag::Enemy)[1];

        run(&mut sim, &InputState::idle(), 30, &mut hooks);

        assert_eq!(ids(&sim, EntityTag::Enemy), vec![survivor]);
        assert_eq!(left(&sim, survivor), 5 * 64 - 30 * 2);
        assert_eq!(
            hooks.count(|e| matches!(e, Event::EnemyRemoved { .. })),
            1
        );
    }
}

// =============================================================================
// Crates
// =============================================================================

mod crate_tests {
    use super::*;

    #[test]
    fn chain_of_three_moves_together_and_stops_together() {
        let mut lvl = grass_level(20, IVec2::new(2, 8));
        for x in 3..=5 {
            lvl.platforms
                .push(Placement::new(IVec2::new(x, 8), PlatformKind::Crate));
        }
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        let crates = ids(&sim, EntityTag::Crate);
        assert_eq!(crates.len(), 3);
        let start: Vec<i32> = crates.iter().map(|id| left(&sim, *id)).collect();

        let right = InputState::holding(Controls::RIGHT);
        sim.step(&right, &mut hooks);
        for (id, before) in crates.iter().zip(&start) {
            assert_eq!(left(&sim, *id), before + 5, "crate {id}");
        }

        run(&mut sim, &right, 9, &mut hooks);
        let pushed: Vec<i32> = crates.iter().map(|id| left(&sim, *id)).collect();
        for (after, before) in pushed.iter().zip(&start) {
            assert_eq!(*after, before + 50);
        }

        sim.step(&InputState::idle(), &mut hooks);
        for (id, before) in crates.iter().zip(&pushed) {
            assert_eq!(left(&sim, *id), *before, "crate {id} kept sliding");
            let body = sim.world().get(*id).unwrap().body().copied().unwrap();
            assert_eq!(body.velocity.x, 0);
        }
    }

    #[test]
    fn wall_stops_the_chain() {
        let mut lvl = grass_level(20, IVec2::new(2, 8));
        lvl.platforms
            .push(Placement::new(IVec2::new(3, 8), PlatformKind::Crate));
        lvl.platforms
            .push(Placement::new(IVec2::new(5, 8), PlatformKind::Block));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        let crate_id = ids(&sim, EntityTag::Crate)[0];

        run(
            &mut sim,
            &InputState::holding(Controls::RIGHT),
            30,
            &mut hooks,
        );

        let rect = sim.world().get(crate_id).unwrap().rect();
        assert_eq!(rect.right(), 5 * 64);
        assert!(sim.world().hero().unwrap().body.rect.right() <= rect.left());
    }
}

// =============================================================================
// Hero Control
// =============================================================================

mod hero_tests {
    use super::*;

    #[test]
    fn ground_jump_sets_full_impulse_and_leaves_the_ground() {
        let lvl = LevelData::new(20, 10, IVec2::new(5, 5)).with_floor(
            6,
            0,
            19,
            &PlatformKind::Grass,
        );
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        {
            let hero = sim.world().hero().unwrap();
            assert_eq!(hero.body.velocity.y, 0);
            assert!(hero.body.on_platform(&WorldView::new(sim.world())));
        }

        sim.step(&InputState::idle().press(Action::Jump), &mut hooks);

        let hero = sim.world().hero().unwrap();
        assert_eq!(hero.body.velocity.y, -22);
        assert!(!hero.body.on_platform(&WorldView::new(sim.world())));
    }

    #[test]
    fn key_change_restarts_the_animation() {
        let mut sim = load(&grass_level(20, IVec2::new(5, 8)));
        let mut hooks = RecordingHooks::new();

        run(&mut sim, &InputState::idle(), 15, &mut hooks);
        let animator = &sim.world().hero().unwrap().animator;
        assert_eq!(animator.key(), "idle_right");
        assert_eq!(animator.displayed_index(), 1);

        sim.step(&InputState::holding(Controls::RIGHT), &mut hooks);
        let animator = &sim.world().hero().unwrap().animator;
        assert_eq!(animator.key(), "walk_right");
        assert_eq!(animator.displayed_index(), 0);
        assert!(animator.frame_index().abs() < f32::EPSILON);
    }

    #[test]
    fn world_edges_hold_the_hero_in() {
        let mut sim = load(&grass_level(20, IVec2::new(0, 8)));
        let mut hooks = RecordingHooks::new();
        run(&mut sim, &InputState::holding(Controls::LEFT), 3, &mut hooks);
        assert_eq!(sim.world().hero().unwrap().body.rect.left(), 0);

        let mut sim = load(&grass_level(20, IVec2::new(19, 8)));
        run(&mut sim, &InputState::holding(Controls::RIGHT), 3, &mut hooks);
        assert_eq!(sim.world().hero().unwrap().body.rect.right(), 20 * 64);
    }

    #[test]
    fn moving_platform_carries_its_rider() {
        let mut lvl = LevelData::new(20, 10, IVec2::new(5, 7));
        lvl.platforms.push(Placement::new(
            IVec2::new(5, 8),
            PlatformKind::Moving { range: 2 },
        ));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();

        run(&mut sim, &InputState::idle(), 5, &mut hooks);

        let hero = sim.world().hero().unwrap();
        assert_eq!(hero.body.rect.x, 5 * 64 + 5 * 2);
        assert_eq!(hero.body.rect.bottom(), 8 * 64);
    }
}

// =============================================================================
// Items and Blocks
// =============================================================================

mod item_tests {
    use super::*;

    fn block_level(kind: PlatformKind) -> LevelData {
        let mut lvl = grass_level(20, IVec2::new(5, 8));
        lvl.platforms.push(Placement::new(IVec2::new(5, 6), kind));
        lvl
    }

    #[test]
    fn pickups_apply_once() {
        let mut lvl = grass_level(20, IVec2::new(2, 8));
        lvl.items.push(Placement::new(IVec2::new(3, 8), ItemKind::Gem));
        lvl.items.push(Placement::new(IVec2::new(4, 8), ItemKind::Heart));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();

        run(
            &mut sim,
            &InputState::holding(Controls::RIGHT),
            40,
            &mut hooks,
        );

        assert!(ids(&sim, EntityTag::Item).is_empty());
        assert_eq!(hooks.score, 10);
        assert_eq!(sim.world().hero().unwrap().hearts, 4);
        assert_eq!(
            hooks.count(|e| matches!(e, Event::ItemCollected { .. })),
            2
        );
    }

    #[test]
    fn item_block_releases_its_item_once() {
        let mut sim = load(&block_level(PlatformKind::ItemBlock {
            item: ItemKind::Gem,
        }));
        let mut hooks = RecordingHooks::new();
        let jump = InputState::idle().press(Action::Jump);

        for _ in 0..2 {
            sim.step(&jump, &mut hooks);
            run(&mut sim, &InputState::idle(), 40, &mut hooks);
        }

        assert_eq!(
            hooks.count(|e| matches!(e, Event::BlockActivated { .. })),
            1
        );
        let items = ids(&sim, EntityTag::Item);
        assert_eq!(items.len(), 1);
        assert_eq!(
            sim.world().get(items[0]).unwrap().rect().position(),
            IVec2::new(5 * 64, 5 * 64)
        );
    }

    #[test]
    fn breakable_block_is_destroyed_by_a_head_bump() {
        let mut sim = load(&block_level(PlatformKind::Breakable));
        let mut hooks = RecordingHooks::new();
        let platforms = ids(&sim, EntityTag::Platform).len();

        sim.step(&InputState::idle().press(Action::Jump), &mut hooks);
        run(&mut sim, &InputState::idle(), 10, &mut hooks);

        assert_eq!(ids(&sim, EntityTag::Platform).len(), platforms - 1);
        assert_eq!(hooks.count(|e| matches!(e, Event::BlockBroken { .. })), 1);
    }
}

// =============================================================================
// Interaction
// =============================================================================

mod interaction_tests {
    use super::*;

    #[test]
    fn key_opens_the_matching_door() {
        let mut lvl = grass_level(20, IVec2::new(2, 8));
        lvl.items.push(Placement::new(
            IVec2::new(2, 8),
            ItemKind::Key {
                code: "red".to_string(),
            },
        ));
        lvl.interactables.push(Placement::new(
            IVec2::new(2, 8),
            InteractableKind::Door {
                destination: IVec2::new(15, 8),
                code: Some("red".to_string()),
            },
        ));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        let door = ids(&sim, EntityTag::Interactable)[0];

        sim.step(&InputState::idle(), &mut hooks);
        assert_eq!(sim.world().hero().unwrap().key_chain, vec!["red".to_string()]);

        sim.step(&InputState::idle().press(Action::Interact), &mut hooks);

        let hero = sim.world().hero().unwrap();
        assert!(hero.key_chain.is_empty());
        assert_eq!(hero.body.rect.center_x(), 15 * 64 + 32);
        assert!(
            sim.world()
                .get(door)
                .and_then(|entity| entity.as_interactable())
                .unwrap()
                .unlocked
        );
        assert_eq!(
            hooks.count(|e| matches!(e, Event::DoorUnlocked { .. })),
            1
        );
        assert_eq!(hooks.count(|e| matches!(e, Event::DoorEntered { .. })), 1);
    }

    #[test]
    fn speech_freezes_the_world_until_dismissed() {
        let mut lvl = grass_level(20, IVec2::new(5, 8));
        lvl.interactables.push(Placement::new(
            IVec2::new(5, 8),
            InteractableKind::Npc {
                npc_type: "wizard".to_string(),
                message: "The bridge is out".to_string(),
            },
        ));
        lvl.enemies
            .push(Placement::new(IVec2::new(12, 4), EnemyKind::Cloud));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();
        let cloud = ids(&sim, EntityTag::Enemy)[0];

        let status = sim.step(&InputState::idle().press(Action::Interact), &mut hooks);
        assert_eq!(status, LevelStatus::Interacting);
        assert_eq!(
            hooks.messages[0].kind,
            MessageKind::Speech {
                speaker: "wizard".to_string()
            }
        );

        let frozen = left(&sim, cloud);
        run(&mut sim, &InputState::idle(), 5, &mut hooks);
        assert_eq!(left(&sim, cloud), frozen);

        sim.step(&InputState::idle().press(Action::Dismiss), &mut hooks);
        sim.step(&InputState::idle(), &mut hooks);
        assert_eq!(left(&sim, cloud), frozen - 3);
    }

    #[test]
    fn goal_overlap_completes_the_level() {
        let mut lvl = grass_level(20, IVec2::new(2, 8));
        lvl.goals.push(Placement::new(
            IVec2::new(6, 8),
            crate::level::GoalKind::Flagpole,
        ));
        let mut sim = load(&lvl);
        let mut hooks = RecordingHooks::new();

        let mut status = LevelStatus::Playing;
        for _ in 0..60 {
            status = sim.step(&InputState::holding(Controls::RIGHT), &mut hooks);
            if status.is_finished() {
                break;
            }
        }

        assert_eq!(status, LevelStatus::Complete);
        assert_eq!(hooks.completed, 1);
        assert!(sim.world().hero().unwrap().body.rect.right() > 6 * 64);
    }
}
