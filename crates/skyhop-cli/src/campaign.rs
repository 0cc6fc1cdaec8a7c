//! Multi-level driver: plays levels in order, waits out the transition after
//! each completion, and stops on a win or a loss.

use std::sync::Arc;

use serde::Serialize;
use skyhop_core::animation::AnimationLibrary;
use skyhop_core::config::SimConfig;
use skyhop_core::input::InputState;
use skyhop_core::level::LevelData;
use skyhop_core::output::RecordingHooks;
use skyhop_core::{LevelStatus, Simulation};
use tracing::info;

/// Where the campaign stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    /// A level is running (or paused, or showing a message).
    Playing,
    /// The current level is complete; the next loads when the countdown ends.
    Transition { frames_left: u32 },
    /// Every level is complete.
    Won,
    /// The hero ran out of hearts.
    Lost,
}

impl Progress {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Runs a sequence of levels with one set of hooks.
#[derive(Debug)]
pub struct Campaign {
    levels: Vec<LevelData>,
    config: Arc<SimConfig>,
    animations: AnimationLibrary,
    current: usize,
    sim: Simulation,
    progress: Progress,
}

impl Campaign {
    /// Loads the first level.
    pub fn new(
        levels: Vec<LevelData>,
        config: Arc<SimConfig>,
        animations: AnimationLibrary,
    ) -> anyhow::Result<Self> {
        let first = levels
            .first()
            .ok_or_else(|| anyhow::anyhow!("a campaign needs at least one level"))?;
        let sim = Simulation::load(first, Arc::clone(&config), &animations)?;
        Ok(Self {
            levels,
            config,
            animations,
            current: 0,
            sim,
            progress: Progress::Playing,
        })
    }

    /// Advances one frame.
    pub fn step(
        &mut self,
        input: &InputState,
        hooks: &mut RecordingHooks,
    ) -> anyhow::Result<Progress> {
        self.progress = match self.progress {
            Progress::Won | Progress::Lost => self.progress,
            Progress::Transition { frames_left } if frames_left > 1 => Progress::Transition {
                frames_left: frames_left - 1,
            },
            Progress::Transition { .. } => self.advance()?,
            Progress::Playing => match self.sim.step(input, hooks) {
                LevelStatus::Complete => {
                    info!(level = self.current, "level_complete");
                    self.transition()?
                }
                LevelStatus::Lost => {
                    info!(level = self.current, "game_over");
                    Progress::Lost
                }
                LevelStatus::Playing | LevelStatus::Paused | LevelStatus::Interacting => {
                    Progress::Playing
                }
            },
        };
        Ok(self.progress)
    }

    /// Starts the countdown after a completed level.
    fn transition(&mut self) -> anyhow::Result<Progress> {
        match self.config.level_transition_frames {
            0 => self.advance(),
            frames => Ok(Progress::Transition {
                frames_left: frames,
            }),
        }
    }

    /// Loads the next level, or reports a win after the last one.
    fn advance(&mut self) -> anyhow::Result<Progress> {
        let next = self.current + 1;
        let Some(level) = self.levels.get(next) else {
            info!(levels = self.levels.len(), "campaign_won");
            return Ok(Progress::Won);
        };
        let sim = match self.sim.world().hero() {
            Some(hero) => Simulation::load_resuming(
                level,
                Arc::clone(&self.config),
                &self.animations,
                hero.progress(),
            )?,
            None => Simulation::load(level, Arc::clone(&self.config), &self.animations)?,
        };
        self.sim = sim;
        self.current = next;
        let hearts = self.sim.world().hero().map(|hero| hero.hearts);
        info!(level = next, ?hearts, "level_started");
        Ok(Progress::Playing)
    }

    pub const fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Zero-based index of the level being played.
    pub const fn level_index(&self) -> usize {
        self.current
    }

    pub const fn progress(&self) -> Progress {
        self.progress
    }
}
