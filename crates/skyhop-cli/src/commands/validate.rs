//! Level validation command: builds each level's world and reports what it
//! contains, failing on the first level that cannot load.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use skyhop_core::animation::AnimationLibrary;
use skyhop_core::entity::EntityTag;
use skyhop_core::World;

pub struct ValidateArgs {
    pub levels: Vec<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LevelReport {
    path: String,
    width: i32,
    height: i32,
    entities: BTreeMap<EntityTag, usize>,
    outside: usize,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let levels = super::load_levels(&args.levels)?;
    let animations = AnimationLibrary::placeholder();

    let mut reports = Vec::with_capacity(levels.len());
    for (path, level) in args.levels.iter().zip(&levels) {
        let world = World::load(level, std::sync::Arc::clone(&config), &animations)
            .with_context(|| format!("loading level {}", path.display()))?;

        let mut entities = BTreeMap::new();
        for entity in world.entities() {
            *entities.entry(entity.tag()).or_insert(0) += 1;
        }
        reports.push(LevelReport {
            path: path.display().to_string(),
            width: level.width,
            height: level.height,
            entities,
            outside: level.outside_count(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!(
            "{}: {}x{} tiles",
            report.path, report.width, report.height
        );
        for (tag, count) in &report.entities {
            println!("  {:<13} {count}", tag.to_string());
        }
        if report.outside > 0 {
            println!("  warning: {} placement(s) outside the level skipped", report.outside);
        }
    }
    println!("{} level(s) OK", reports.len());
    Ok(())
}
