//! Scripted input for headless runs.
//!
//! A script is a JSON list of segments. Each segment holds a set of
//! directions for `frames` frames and presses its actions on the first of
//! those frames only:
//!
//! ```json
//! [
//!   { "frames": 40, "hold": ["right"] },
//!   { "frames": 1, "hold": ["right"], "press": ["jump"] },
//!   { "frames": 30 }
//! ]
//! ```
//!
//! Past the last segment the script reports idle input.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skyhop_core::input::{Action, Controls, InputState};

/// A held direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    const fn controls(self) -> Controls {
        match self {
            Self::Left => Controls::LEFT,
            Self::Right => Controls::RIGHT,
            Self::Up => Controls::UP,
            Self::Down => Controls::DOWN,
        }
    }
}

/// One run of identical frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub frames: u32,
    #[serde(default)]
    pub hold: Vec<Direction>,
    #[serde(default)]
    pub press: Vec<Action>,
}

/// Frame-indexed input source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputScript {
    segments: Vec<Segment>,
}

impl InputScript {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Reads a script from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading input script {}", path.display()))?;
        let segments = serde_json::from_str(&text)
            .with_context(|| format!("parsing input script {}", path.display()))?;
        Ok(Self::new(segments))
    }

    /// Total scripted frames.
    pub fn scripted_frames(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Input for frame `n` (zero-based).
    pub fn input(&self, n: u64) -> InputState {
        let mut start = 0;
        for segment in &self.segments {
            let end = start + u64::from(segment.frames);
            if n < end {
                let held = segment
                    .hold
                    .iter()
                    .fold(Controls::empty(), |acc, d| acc | d.controls());
                let mut input = InputState::holding(held);
                if n == start {
                    for action in &segment.press {
                        input = input.press(*action);
                    }
                }
                return input;
            }
            start = end;
        }
        InputState::idle()
    }
}
