//! Crate-level tests for the frame pipeline.
//!
//! - `determinism.rs`: identical inputs replay to identical worlds
//! - `integration.rs`: end-to-end frames through [`crate::Simulation`]
//! - `properties.rs`: proptest invariants over the physics primitives
//! - `helpers.rs`: world builders and entity factories shared with the
//!   per-module unit tests

mod helpers;
mod integration;

pub use helpers::*;
