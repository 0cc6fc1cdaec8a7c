//! # Skyhop Core
//!
//! Frame-stepped simulation core for Skyhop, a tile-based 2D platformer.
//!
//! The crate owns everything between decoded level data and drawable state:
//! entity physics with axis-separated collision, the hero/enemy/crate state
//! machines, and the frame driver. Asset loading, audio, text layout and
//! window management belong to the embedding game.
//!
//! ## Architecture
//!
//! - **World**: id-keyed entity registry with a spatial index ([`world`])
//! - **Behaviors**: per-variant update logic reading a [`world_view::WorldView`]
//!   and emitting [`output::Output`]s ([`behavior`], [`physics`])
//! - **Resolvers**: apply commands to the world and forward events to the
//!   driver's [`output::GameHooks`] ([`resolver`])
//! - **Simulation**: group update order, pause and message freezes, level
//!   completion and loss ([`simulation`])
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use glam::IVec2;
//! use skyhop_core::animation::AnimationLibrary;
//! use skyhop_core::config::SimConfig;
//! use skyhop_core::input::{Controls, InputState};
//! use skyhop_core::level::{LevelData, PlatformKind};
//! use skyhop_core::output::RecordingHooks;
//! use skyhop_core::simulation::Simulation;
//!
//! let level = LevelData::new(30, 10, IVec2::new(1, 8)).with_floor(9, 0, 29, &PlatformKind::Grass);
//! let mut sim = Simulation::load(&level, Arc::new(SimConfig::default()), &AnimationLibrary::placeholder())?;
//! let mut hooks = RecordingHooks::new();
//!
//! let run_right = InputState::holding(Controls::RIGHT);
//! for _ in 0..20 {
//!     sim.step(&run_right, &mut hooks);
//! }
//! assert!(sim.world().hero().unwrap().body.rect.x > 64);
//! # Ok::<(), skyhop_core::error::LevelError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod animation;
pub mod behavior;
pub mod camera;
pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod level;
pub mod output;
pub mod physics;
pub mod resolver;
pub mod simulation;
pub mod world;
pub mod world_view;

pub use error::{Error, Result};
pub use simulation::{LevelStatus, Simulation};
pub use world::World;

#[cfg(test)]
mod tests;
