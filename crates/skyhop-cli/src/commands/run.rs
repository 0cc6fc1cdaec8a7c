//! Headless run command: plays a campaign against scripted input and prints a
//! JSON summary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::IVec2;
use serde::Serialize;
use skyhop_core::animation::AnimationLibrary;
use skyhop_core::camera::ScrollingCamera;
use skyhop_core::output::{Event, RecordingHooks};
use skyhop_core::World;
use tracing::{debug, info, trace};

use crate::campaign::{Campaign, Progress};
use crate::script::InputScript;

pub struct RunArgs {
    pub levels: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub max_frames: u64,
    pub output: Option<PathBuf>,
}

/// What a run ended with.
#[derive(Debug, Serialize)]
struct RunSummary {
    progress: Progress,
    level: usize,
    levels: usize,
    frames: u64,
    score: u32,
    hearts: Option<u32>,
    hero: Option<[i32; 2]>,
    camera: [i32; 2],
    messages: usize,
    events: usize,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let levels = super::load_levels(&args.levels)?;
    let script = match &args.input {
        Some(path) => InputScript::load(path)?,
        None => InputScript::default(),
    };
    let level_count = levels.len();

    let mut campaign = Campaign::new(levels, config, AnimationLibrary::placeholder())
        .context("starting campaign")?;
    let mut hooks = RecordingHooks::new();
    let mut camera = camera_for(campaign.simulation().world());
    let mut level = campaign.level_index();

    info!(
        levels = level_count,
        scripted_frames = script.scripted_frames(),
        max_frames = args.max_frames,
        "run_started"
    );

    let mut frames = 0;
    while frames < args.max_frames && !campaign.progress().is_over() {
        let seen = hooks.events.len();
        let progress = campaign.step(&script.input(frames), &mut hooks)?;
        frames += 1;

        let world = campaign.simulation().world();
        if campaign.level_index() != level {
            level = campaign.level_index();
            camera = camera_for(world);
        } else if let Some(hero) = world.hero() {
            let target = hero.body.rect.center();
            let teleported = hooks.events[seen..]
                .iter()
                .any(|event| matches!(event, Event::DoorEntered { .. }));
            if teleported {
                debug!(frame = frames, "camera_snapped");
                camera.snap_to_target(target);
            } else {
                camera.update(target);
            }
        }
        trace!(frame = frames, ?progress, "frame");
    }

    let world = campaign.simulation().world();
    let hero = world.hero();
    let offsets = camera.offsets();
    let summary = RunSummary {
        progress: campaign.progress(),
        level: campaign.level_index(),
        levels: level_count,
        frames,
        score: hooks.score,
        hearts: hero.map(|hero| hero.hearts),
        hero: hero.map(|hero| {
            let position = hero.body.rect.position();
            [position.x, position.y]
        }),
        camera: [offsets.x, offsets.y],
        messages: hooks.messages.len(),
        events: hooks.events.len(),
    };
    info!(frames, progress = ?summary.progress, score = summary.score, "run_finished");

    let json = serde_json::to_string_pretty(&summary)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing summary {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn camera_for(world: &World) -> ScrollingCamera {
    let target = world
        .hero()
        .map(|hero| hero.body.rect.center())
        .unwrap_or_default();
    let size = IVec2::new(world.width(), world.height());
    ScrollingCamera::new(&world.config().camera, size, target)
}
