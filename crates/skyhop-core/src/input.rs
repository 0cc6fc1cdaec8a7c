//! Per-frame input snapshot.
//!
//! The caller polls its input device and hands the simulation an
//! [`InputState`]: the directional controls currently held plus the discrete
//! actions pressed since the previous frame.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Directional controls held this frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Controls: u8 {
        /// Move left
        const LEFT = 0b0001;
        /// Move right
        const RIGHT = 0b0010;
        /// Climb up
        const UP = 0b0100;
        /// Climb down
        const DOWN = 0b1000;
    }
}

/// Discrete actions pressed this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Jump
    Jump,
    /// Interact with overlapping doors, signs, NPCs
    Interact,
    /// Toggle pause
    Pause,
    /// Close the open message box
    Dismiss,
}

/// Everything the core needs from the input device for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    /// Held directional controls.
    #[serde(default)]
    pub held: Controls,
    /// Actions pressed this frame, in order.
    #[serde(default)]
    pub pressed: Vec<Action>,
}

impl InputState {
    /// Input with nothing held or pressed.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Input holding `held`.
    #[must_use]
    pub fn holding(held: Controls) -> Self {
        Self {
            held,
            pressed: Vec::new(),
        }
    }

    /// Builder-style: adds a pressed action.
    #[must_use]
    pub fn press(mut self, action: Action) -> Self {
        self.pressed.push(action);
        self
    }

    /// Returns true if `action` was pressed this frame.
    #[must_use]
    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Horizontal intent: left wins over right, as on a keyboard polled in that order.
    #[must_use]
    pub fn horizontal(&self) -> i32 {
        if self.held.contains(Controls::LEFT) {
            -1
        } else if self.held.contains(Controls::RIGHT) {
            1
        } else {
            0
        }
    }

    /// Vertical intent: up wins over down.
    #[must_use]
    pub fn vertical(&self) -> i32 {
        if self.held.contains(Controls::UP) {
            -1
        } else if self.held.contains(Controls::DOWN) {
            1
        } else {
            0
        }
    }
}
