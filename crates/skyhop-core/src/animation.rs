//! Frame-cycling animation state.
//!
//! Presentation frames are opaque [`FrameHandle`]s supplied by the caller; the
//! core never looks inside them. An [`AnimationSet`] maps animation keys to
//! ordered frame sequences, and an [`Animator`] tracks which key is playing and
//! a fractional frame index that advances by a fixed rate every tick.
//!
//! Behaviors pick the key each tick. Switching keys, or running past the end
//! of the sequence, restarts at frame 0.
//!
//! Every animated kind declares the keys its behavior may select
//! ([`AnimatedKind::required_keys`]); sets are checked against that list when
//! an [`Animator`] is built, so an unknown key cannot reach a running world.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Opaque handle to a drawable frame owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameHandle(pub u32);

/// Entity kinds that carry an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatedKind {
    /// The player character
    Hero,
    /// Flying cloud enemy
    Cloud,
    /// Rolling spikeball enemy
    Spikeball,
    /// Walking spikeman enemy
    Spikeman,
    /// Swimming fish enemy
    Fish,
    /// Waving goal flag
    Flag,
}

impl AnimatedKind {
    /// Every animated kind.
    pub const ALL: [Self; 6] = [
        Self::Hero,
        Self::Cloud,
        Self::Spikeball,
        Self::Spikeman,
        Self::Fish,
        Self::Flag,
    ];

    /// Keys the kind's behavior may select.
    #[must_use]
    pub const fn required_keys(self) -> &'static [&'static str] {
        match self {
            Self::Hero => &[
                "idle_left",
                "idle_right",
                "walk_left",
                "walk_right",
                "jump_left",
                "jump_right",
                "climb",
            ],
            Self::Cloud | Self::Spikeball | Self::Flag => &["default"],
            Self::Spikeman => &["walk_left", "walk_right"],
            Self::Fish => &["swim_left", "swim_right"],
        }
    }

    /// Key shown before the first tick.
    #[must_use]
    pub const fn initial_key(self) -> &'static str {
        match self {
            Self::Hero => "idle_right",
            Self::Cloud | Self::Spikeball | Self::Flag => "default",
            Self::Spikeman => "walk_right",
            Self::Fish => "swim_right",
        }
    }
}

impl fmt::Display for AnimatedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => write!(f, "hero"),
            Self::Cloud => write!(f, "cloud"),
            Self::Spikeball => write!(f, "spikeball"),
            Self::Spikeman => write!(f, "spikeman"),
            Self::Fish => write!(f, "fish"),
            Self::Flag => write!(f, "flag"),
        }
    }
}

// =============================================================================
// Animation Sets
// =============================================================================

/// Mapping from animation key to an ordered frame sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSet {
    sequences: BTreeMap<String, Vec<FrameHandle>>,
}

impl AnimationSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, frames: Vec<FrameHandle>) -> Self {
        self.insert(key, frames);
        self
    }

    /// Inserts or replaces the sequence for `key`.
    pub fn insert(&mut self, key: impl Into<String>, frames: Vec<FrameHandle>) {
        self.sequences.insert(key.into(), frames);
    }

    /// Returns the frames for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[FrameHandle]> {
        self.sequences.get(key).map(Vec::as_slice)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.sequences.contains_key(key)
    }

    /// Checks that every key `kind` can select is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns the first missing or empty key.
    pub fn validate_for(&self, kind: AnimatedKind) -> Result<(), AnimationError> {
        for key in kind.required_keys() {
            match self.get(key) {
                None => {
                    return Err(AnimationError::MissingKey {
                        kind,
                        key: (*key).to_string(),
                    })
                }
                Some([]) => {
                    return Err(AnimationError::EmptySequence {
                        kind,
                        key: (*key).to_string(),
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Animation sets for every animated kind in a level.
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    sets: BTreeMap<AnimatedKind, Arc<AnimationSet>>,
}

impl AnimationLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library with two distinct frames per required key, for headless runs.
    #[must_use]
    pub fn placeholder() -> Self {
        let mut library = Self::new();
        let mut next = 0;
        for kind in AnimatedKind::ALL {
            let mut set = AnimationSet::new();
            for key in kind.required_keys() {
                set.insert(*key, vec![FrameHandle(next), FrameHandle(next + 1)]);
                next += 2;
            }
            library.insert(kind, set);
        }
        library
    }

    /// Registers the set for `kind`.
    pub fn insert(&mut self, kind: AnimatedKind, set: AnimationSet) {
        self.sets.insert(kind, Arc::new(set));
    }

    /// Returns the shared set for `kind`.
    #[must_use]
    pub fn get(&self, kind: AnimatedKind) -> Option<Arc<AnimationSet>> {
        self.sets.get(&kind).cloned()
    }

    /// Builds a validated animator for `kind`.
    ///
    /// # Errors
    ///
    /// Fails if the set is missing or lacks a key the kind can select.
    pub fn animator(
        &self,
        kind: AnimatedKind,
        frame_rate: f32,
    ) -> Result<Animator, AnimationError> {
        let set = self.get(kind).ok_or(AnimationError::MissingSet { kind })?;
        Animator::new(kind, set, frame_rate)
    }
}

// =============================================================================
// Animator
// =============================================================================

/// Playback state of one animated entity.
#[derive(Debug, Clone)]
pub struct Animator {
    set: Arc<AnimationSet>,
    key: &'static str,
    frame_index: f32,
    frame_rate: f32,
}

impl Animator {
    /// Creates an animator playing the kind's initial key.
    ///
    /// # Errors
    ///
    /// Fails if `set` does not cover [`AnimatedKind::required_keys`].
    pub fn new(
        kind: AnimatedKind,
        set: Arc<AnimationSet>,
        frame_rate: f32,
    ) -> Result<Self, AnimationError> {
        set.validate_for(kind)?;
        Ok(Self {
            set,
            key: kind.initial_key(),
            frame_index: 0.0,
            frame_rate,
        })
    }

    /// Key currently playing.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Fractional frame position.
    #[must_use]
    pub const fn frame_index(&self) -> f32 {
        self.frame_index
    }

    /// Index of the frame being displayed.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn displayed_index(&self) -> usize {
        self.frame_index.floor() as usize
    }

    /// Frame being displayed.
    #[must_use]
    pub fn frame(&self) -> Option<FrameHandle> {
        self.set
            .get(self.key)
            .and_then(|frames| frames.get(self.displayed_index()))
            .copied()
    }

    /// Advances one tick with `key` selected by the behavior.
    ///
    /// Restarts at frame 0 when the key changed or the sequence ran out.
    #[allow(clippy::cast_precision_loss)]
    pub fn animate(&mut self, key: &'static str) {
        debug_assert!(
            self.set.contains_key(key),
            "animation key '{key}' selected but not supplied"
        );
        let changed = key != self.key;
        self.key = key;
        self.frame_index += self.frame_rate;

        let len = self.set.get(key).map_or(0, <[FrameHandle]>::len);
        if changed || self.frame_index >= len as f32 {
            self.frame_index = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spikeman_animator(rate: f32) -> Animator {
        let set = AnimationSet::new()
            .with(
                "walk_left",
                vec![FrameHandle(0), FrameHandle(1), FrameHandle(2)],
            )
            .with(
                "walk_right",
                vec![FrameHandle(3), FrameHandle(4), FrameHandle(5)],
            );
        Animator::new(AnimatedKind::Spikeman, Arc::new(set), rate).unwrap()
    }

    mod set_tests {
        use super::*;

        #[test]
        fn validate_reports_missing_key() {
            let set = AnimationSet::new().with("walk_left", vec![FrameHandle(0)]);
            assert_eq!(
                set.validate_for(AnimatedKind::Spikeman),
                Err(AnimationError::MissingKey {
                    kind: AnimatedKind::Spikeman,
                    key: "walk_right".to_string(),
                })
            );
        }

        #[test]
        fn validate_reports_empty_sequence() {
            let set = AnimationSet::new().with("default", Vec::new());
            assert!(matches!(
                set.validate_for(AnimatedKind::Cloud),
                Err(AnimationError::EmptySequence { .. })
            ));
        }

        #[test]
        fn placeholder_covers_every_kind() {
            let library = AnimationLibrary::placeholder();
            for kind in AnimatedKind::ALL {
                assert!(library.animator(kind, 0.1).is_ok(), "{kind}");
            }
        }

        #[test]
        fn missing_set_is_an_error() {
            let library = AnimationLibrary::new();
            assert!(matches!(
                library.animator(AnimatedKind::Hero, 0.1),
                Err(AnimationError::MissingSet {
                    kind: AnimatedKind::Hero
                })
            ));
        }
    }

    mod animator_tests {
        use super::*;

        #[test]
        fn advances_by_frame_rate() {
            let mut animator = spikeman_animator(0.5);
            animator.animate("walk_right");
            assert_eq!(animator.displayed_index(), 0);
            animator.animate("walk_right");
            assert_eq!(animator.displayed_index(), 1);
            assert_eq!(animator.frame(), Some(FrameHandle(4)));
        }

        #[test]
        fn wraps_after_last_frame() {
            let mut animator = spikeman_animator(1.0);
            animator.animate("walk_right");
            animator.animate("walk_right");
            assert_eq!(animator.displayed_index(), 2);
            animator.animate("walk_right");
            assert_eq!(animator.displayed_index(), 0);
        }

        #[test]
        fn key_switch_restarts_at_zero() {
            let mut animator = spikeman_animator(0.7);
            animator.animate("walk_right");
            animator.animate("walk_right");
            animator.animate("walk_right");
            assert!(animator.frame_index() > 1.0);

            animator.animate("walk_left");
            assert_eq!(animator.key(), "walk_left");
            assert_eq!(animator.displayed_index(), 0);
            assert_eq!(animator.frame(), Some(FrameHandle(0)));
        }

        #[test]
        #[should_panic(expected = "not supplied")]
        #[cfg(debug_assertions)]
        fn unknown_key_fails_fast_in_debug() {
            let mut animator = spikeman_animator(0.1);
            animator.animate("jump_left");
        }
    }
}
